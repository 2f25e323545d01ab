//! [`RoomKind`]-related definitions.

use std::future;

use common::Handler as _;
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLScalar};
use service::{command, domain, query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, error::EntityError, AsError, Context, Error};

/// A classification of `Room`s driving typical-object suggestions.
#[derive(Clone, Debug)]
pub struct RoomKind {
    /// ID of this [`RoomKind`].
    id: Id,

    /// Underlying [`domain::RoomKind`].
    kind: OnceCell<domain::RoomKind>,
}

impl From<domain::RoomKind> for RoomKind {
    fn from(kind: domain::RoomKind) -> Self {
        Self {
            id: kind.id.into(),
            kind: OnceCell::new_with(Some(kind)),
        }
    }
}

impl RoomKind {
    /// Creates a new [`RoomKind`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`RoomKind`] with the provided ID exists,
    /// otherwise accessing this [`RoomKind`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            kind: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::RoomKind`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::RoomKind`] doesn't exist.
    async fn kind(&self, ctx: &Context) -> Result<&domain::RoomKind, Error> {
        let id = self.id.into();
        self.kind
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::room_kinds::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|k| {
                        future::ready(
                            k.ok_or_else(|| EntityError::NotExists.into()),
                        )
                    })
            })
            .await
    }
}

/// A classification of `Room`s driving typical-object suggestions.
#[graphql_object(context = Context)]
impl RoomKind {
    /// Unique identifier of this `RoomKind`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RoomKind.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of this `RoomKind`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RoomKind.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.kind(ctx).await?.name.clone().into())
    }

    /// Typical objects suggested for `Room`s of this `RoomKind`, in display
    /// order.
    ///
    /// The first request for a `RoomKind` with no suggestions yet seeds them
    /// from the built-in table.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RoomKind.typicalObjects",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn typical_objects(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::typical::TypicalObject>, Error> {
        ctx.service()
            .execute(command::SeedTypicalObjects {
                room_kind_id: self.id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|entries| entries.into_iter().map(Into::into).collect())
    }
}

/// Unique identifier of a `RoomKind`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::room_kind::Id)]
#[into(domain::room_kind::Id)]
#[graphql(name = "RoomKindId", transparent)]
pub struct Id(Uuid);

/// Name of a `RoomKind`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "RoomKindName",
    with = scalar::Via::<domain::room_kind::Name>,
)]
pub struct Name(domain::room_kind::Name);
