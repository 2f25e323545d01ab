//! [`Object`]-related definitions.

use std::future;

use common::Handler as _;
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, error::EntityError, AsError, Context, Error};

/// A catalog entry naming a kind of inventory object.
#[derive(Clone, Debug)]
pub struct Object {
    /// ID of this [`Object`].
    id: Id,

    /// Underlying [`domain::Object`].
    object: OnceCell<domain::Object>,
}

impl From<domain::Object> for Object {
    fn from(object: domain::Object) -> Self {
        Self {
            id: object.id.into(),
            object: OnceCell::new_with(Some(object)),
        }
    }
}

impl Object {
    /// Creates a new [`Object`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Object`] with the provided ID exists,
    /// otherwise accessing this [`Object`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            object: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Object`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Object`] doesn't exist.
    async fn object(&self, ctx: &Context) -> Result<&domain::Object, Error> {
        let id = self.id.into();
        self.object
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::objects::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|o| {
                        future::ready(
                            o.ok_or_else(|| EntityError::NotExists.into()),
                        )
                    })
            })
            .await
    }
}

/// A catalog entry naming a kind of inventory object.
#[graphql_object(context = Context)]
impl Object {
    /// Unique identifier of this `Object`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Object.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of this `Object`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Object.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.object(ctx).await?.name.clone().into())
    }

    /// `Category` this `Object` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Object.category",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn category(
        &self,
        ctx: &Context,
    ) -> Result<api::Category, Error> {
        let category_id = self.object(ctx).await?.category_id;
        #[expect(
            unsafe_code,
            reason = "`Object` loaded from repository guarantees `Category` \
                      existence"
        )]
        let category = unsafe { api::Category::new_unchecked(category_id) };
        Ok(category)
    }

    /// `Variant`s of this `Object`, ordered by brand and material.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Object.variants",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn variants(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Variant>, Error> {
        ctx.service()
            .execute(query::variants::List::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|variants| variants.into_iter().map(Into::into).collect())
    }
}

/// Unique identifier of an `Object`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::object::Id)]
#[into(domain::object::Id)]
#[graphql(name = "ObjectId", transparent)]
pub struct Id(Uuid);

/// Name of an `Object`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ObjectName",
    with = scalar::Via::<domain::object::Name>,
)]
pub struct Name(domain::object::Name);
