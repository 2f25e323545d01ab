//! [`Location`]-related definitions.

use std::future;

use common::Handler as _;
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, error::EntityError, AsError, Context, Error};

/// A named site inside a `Sector`.
#[derive(Clone, Debug)]
pub struct Location {
    /// ID of this [`Location`].
    id: Id,

    /// Underlying [`domain::Location`].
    location: OnceCell<domain::Location>,
}

impl From<domain::Location> for Location {
    fn from(location: domain::Location) -> Self {
        Self {
            id: location.id.into(),
            location: OnceCell::new_with(Some(location)),
        }
    }
}

impl Location {
    /// Creates a new [`Location`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Location`] with the provided ID exists,
    /// otherwise accessing this [`Location`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            location: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Location`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Location`] doesn't exist.
    async fn location(
        &self,
        ctx: &Context,
    ) -> Result<&domain::Location, Error> {
        let id = self.id.into();
        self.location
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::locations::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|l| {
                        future::ready(
                            l.ok_or_else(|| EntityError::NotExists.into()),
                        )
                    })
            })
            .await
    }
}

/// A named site inside a `Sector`.
#[graphql_object(context = Context)]
impl Location {
    /// Unique identifier of this `Location`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Location.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of this `Location`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Location.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.location(ctx).await?.name.clone().into())
    }

    /// `Sector` this `Location` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Location.sector",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn sector(&self, ctx: &Context) -> Result<api::Sector, Error> {
        let sector_id = self.location(ctx).await?.sector_id;
        #[expect(
            unsafe_code,
            reason = "`Location` loaded from repository guarantees `Sector` \
                      existence"
        )]
        let sector = unsafe { api::Sector::new_unchecked(sector_id) };
        Ok(sector)
    }

    /// `Floor`s of this `Location`, ordered by level.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Location.floors",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn floors(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Floor>, Error> {
        ctx.service()
            .execute(query::floors::List::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|floors| floors.into_iter().map(Into::into).collect())
    }
}

/// Unique identifier of a `Location`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::location::Id)]
#[into(domain::location::Id)]
#[graphql(name = "LocationId", transparent)]
pub struct Id(Uuid);

/// Name of a `Location`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "LocationName",
    with = scalar::Via::<domain::location::Name>,
)]
pub struct Name(domain::location::Name);
