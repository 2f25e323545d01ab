//! [`Floor`]-related definitions.

use std::future;

use common::Handler as _;
use derive_more::{Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, error::EntityError, AsError, Context, Error};

/// A storey of a `Location`.
#[derive(Clone, Debug)]
pub struct Floor {
    /// ID of this [`Floor`].
    id: Id,

    /// Underlying [`domain::Floor`].
    floor: OnceCell<domain::Floor>,
}

impl From<domain::Floor> for Floor {
    fn from(floor: domain::Floor) -> Self {
        Self {
            id: floor.id.into(),
            floor: OnceCell::new_with(Some(floor)),
        }
    }
}

impl Floor {
    /// Creates a new [`Floor`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Floor`] with the provided ID exists,
    /// otherwise accessing this [`Floor`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            floor: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Floor`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Floor`] doesn't exist.
    async fn floor(&self, ctx: &Context) -> Result<&domain::Floor, Error> {
        let id = self.id.into();
        self.floor
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::floors::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|f| {
                        future::ready(
                            f.ok_or_else(|| EntityError::NotExists.into()),
                        )
                    })
            })
            .await
    }
}

/// A storey of a `Location`.
#[graphql_object(context = Context)]
impl Floor {
    /// Unique identifier of this `Floor`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Floor.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Storey number of this `Floor` (may be negative for basements).
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Floor.level",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn level(&self, ctx: &Context) -> Result<i32, Error> {
        Ok(self.floor(ctx).await?.level.into())
    }

    /// `Location` this `Floor` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Floor.location",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn location(
        &self,
        ctx: &Context,
    ) -> Result<api::Location, Error> {
        let location_id = self.floor(ctx).await?.location_id;
        #[expect(
            unsafe_code,
            reason = "`Floor` loaded from repository guarantees `Location` \
                      existence"
        )]
        let location = unsafe { api::Location::new_unchecked(location_id) };
        Ok(location)
    }

    /// `Room`s of this `Floor`, ordered by name.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Floor.rooms",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn rooms(&self, ctx: &Context) -> Result<Vec<api::Room>, Error> {
        ctx.service()
            .execute(query::rooms::List::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|rooms| rooms.into_iter().map(Into::into).collect())
    }
}

/// Unique identifier of a `Floor`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::floor::Id)]
#[into(domain::floor::Id)]
#[graphql(name = "FloorId", transparent)]
pub struct Id(Uuid);
