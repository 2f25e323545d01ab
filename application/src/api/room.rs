//! [`Room`]-related definitions.

use std::future;

use common::Handler as _;
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, read};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, error::EntityError, AsError, Context, Error};

/// A place on a `Floor` holding inventory `Item`s.
#[derive(Clone, Debug)]
pub struct Room {
    /// ID of this [`Room`].
    id: Id,

    /// Underlying [`domain::Room`].
    room: OnceCell<domain::Room>,
}

impl From<domain::Room> for Room {
    fn from(room: domain::Room) -> Self {
        Self {
            id: room.id.into(),
            room: OnceCell::new_with(Some(room)),
        }
    }
}

impl Room {
    /// Creates a new [`Room`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Room`] with the provided ID exists,
    /// otherwise accessing this [`Room`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            room: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Room`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Room`] doesn't exist.
    async fn room(&self, ctx: &Context) -> Result<&domain::Room, Error> {
        let id = self.id.into();
        self.room
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::rooms::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|r| {
                        future::ready(
                            r.ok_or_else(|| EntityError::NotExists.into()),
                        )
                    })
            })
            .await
    }
}

/// A place on a `Floor` holding inventory `Item`s.
#[graphql_object(context = Context)]
impl Room {
    /// Unique identifier of this `Room`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Room.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of this `Room`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Room.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.room(ctx).await?.name.clone().into())
    }

    /// `Floor` this `Room` is on.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Room.floor",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn floor(&self, ctx: &Context) -> Result<api::Floor, Error> {
        let floor_id = self.room(ctx).await?.floor_id;
        #[expect(
            unsafe_code,
            reason = "`Room` loaded from repository guarantees `Floor` \
                      existence"
        )]
        let floor = unsafe { api::Floor::new_unchecked(floor_id) };
        Ok(floor)
    }

    /// `RoomKind` this `Room` is classified as.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Room.kind",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn kind(&self, ctx: &Context) -> Result<api::RoomKind, Error> {
        let kind_id = self.room(ctx).await?.kind_id;
        #[expect(
            unsafe_code,
            reason = "`Room` loaded from repository guarantees `RoomKind` \
                      existence"
        )]
        let kind = unsafe { api::RoomKind::new_unchecked(kind_id) };
        Ok(kind)
    }

    /// `Item`s registered in this `Room`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Room.items",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn items(&self, ctx: &Context) -> Result<Vec<api::Item>, Error> {
        ctx.service()
            .execute(query::items::List::by(read::item::list::Filter {
                room: Some(self.id.into()),
                ..read::item::list::Filter::default()
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|items| items.into_iter().map(Into::into).collect())
    }
}

/// Unique identifier of a `Room`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::room::Id)]
#[into(domain::room::Id)]
#[graphql(name = "RoomId", transparent)]
pub struct Id(Uuid);

/// Name of a `Room`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "RoomName",
    with = scalar::Via::<domain::room::Name>,
)]
pub struct Name(domain::room::Name);
