//! [`Variant`]-related definitions.

use std::future;

use common::Handler as _;
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, error::EntityError, AsError, Context, Error};

/// An `Object` refined by an optional brand and material.
#[derive(Clone, Debug)]
pub struct Variant {
    /// ID of this [`Variant`].
    id: Id,

    /// Underlying [`domain::Variant`].
    variant: OnceCell<domain::Variant>,
}

impl From<domain::Variant> for Variant {
    fn from(variant: domain::Variant) -> Self {
        Self {
            id: variant.id.into(),
            variant: OnceCell::new_with(Some(variant)),
        }
    }
}

impl Variant {
    /// Creates a new [`Variant`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Variant`] with the provided ID exists,
    /// otherwise accessing this [`Variant`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            variant: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Variant`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Variant`] doesn't exist.
    async fn variant(&self, ctx: &Context) -> Result<&domain::Variant, Error> {
        let id = self.id.into();
        self.variant
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::variants::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|v| {
                        future::ready(
                            v.ok_or_else(|| EntityError::NotExists.into()),
                        )
                    })
            })
            .await
    }
}

/// An `Object` refined by an optional brand and material.
#[graphql_object(context = Context)]
impl Variant {
    /// Unique identifier of this `Variant`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Variant.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Brand of this `Variant`, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Variant.brand",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn brand(&self, ctx: &Context) -> Result<Option<Brand>, Error> {
        Ok(self.variant(ctx).await?.brand.clone().map(Into::into))
    }

    /// Material of this `Variant`, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Variant.material",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn material(
        &self,
        ctx: &Context,
    ) -> Result<Option<Material>, Error> {
        Ok(self.variant(ctx).await?.material.clone().map(Into::into))
    }

    /// `Object` this `Variant` refines.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Variant.object",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn object(&self, ctx: &Context) -> Result<api::Object, Error> {
        let object_id = self.variant(ctx).await?.object_id;
        #[expect(
            unsafe_code,
            reason = "`Variant` loaded from repository guarantees `Object` \
                      existence"
        )]
        let object = unsafe { api::Object::new_unchecked(object_id) };
        Ok(object)
    }
}

/// Unique identifier of a `Variant`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::variant::Id)]
#[into(domain::variant::Id)]
#[graphql(name = "VariantId", transparent)]
pub struct Id(Uuid);

/// Brand of a `Variant`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "VariantBrand",
    with = scalar::Via::<domain::variant::Brand>,
)]
pub struct Brand(domain::variant::Brand);

/// Material of a `Variant`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "VariantMaterial",
    with = scalar::Via::<domain::variant::Material>,
)]
pub struct Material(domain::variant::Material);
