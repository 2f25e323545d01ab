//! [`Sector`]-related definitions.

use std::future;

use common::Handler as _;
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, error::EntityError, AsError, Context, Error};

/// A sector of the tracked facilities.
#[derive(Clone, Debug)]
pub struct Sector {
    /// ID of this [`Sector`].
    id: Id,

    /// Underlying [`domain::Sector`].
    sector: OnceCell<domain::Sector>,
}

impl From<domain::Sector> for Sector {
    fn from(sector: domain::Sector) -> Self {
        Self {
            id: sector.id.into(),
            sector: OnceCell::new_with(Some(sector)),
        }
    }
}

impl Sector {
    /// Creates a new [`Sector`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Sector`] with the provided ID exists,
    /// otherwise accessing this [`Sector`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            sector: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Sector`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Sector`] doesn't exist.
    async fn sector(&self, ctx: &Context) -> Result<&domain::Sector, Error> {
        let id = self.id.into();
        self.sector
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::sectors::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|s| {
                        future::ready(
                            s.ok_or_else(|| EntityError::NotExists.into()),
                        )
                    })
            })
            .await
    }
}

/// A sector of the tracked facilities.
#[graphql_object(context = Context)]
impl Sector {
    /// Unique identifier of this `Sector`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Sector.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of this `Sector`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Sector.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.sector(ctx).await?.name.clone().into())
    }

    /// `Location`s of this `Sector`, ordered by name.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Sector.locations",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn locations(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Location>, Error> {
        ctx.service()
            .execute(query::locations::List::by(Some(self.id.into())))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|locations| {
                locations.into_iter().map(Into::into).collect()
            })
    }
}

/// Unique identifier of a `Sector`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::sector::Id)]
#[into(domain::sector::Id)]
#[graphql(name = "SectorId", transparent)]
pub struct Id(Uuid);

/// Name of a `Sector`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "SectorName",
    with = scalar::Via::<domain::sector::Name>,
)]
pub struct Name(domain::sector::Name);
