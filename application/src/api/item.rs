//! [`Item`]-related definitions.

use std::future;

use common::{DateTime, Handler as _};
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar};
use service::{domain, query, read};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, error::EntityError, AsError, Context, Error};

/// An inventory record of a `Variant` placed in a `Room`.
#[derive(Clone, Debug)]
pub struct Item {
    /// ID of this [`Item`].
    id: Id,

    /// Underlying [`domain::Item`].
    item: OnceCell<domain::Item>,
}

impl From<domain::Item> for Item {
    fn from(item: domain::Item) -> Self {
        Self {
            id: item.id.into(),
            item: OnceCell::new_with(Some(item)),
        }
    }
}

impl Item {
    /// Creates a new [`Item`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Item`] with the provided ID exists,
    /// otherwise accessing this [`Item`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            item: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Item`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Item`] doesn't exist.
    async fn item(&self, ctx: &Context) -> Result<&domain::Item, Error> {
        let id = self.id.into();
        self.item
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::items::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|i| {
                        future::ready(
                            i.ok_or_else(|| EntityError::NotExists.into()),
                        )
                    })
            })
            .await
    }
}

/// An inventory record of a `Variant` placed in a `Room`.
#[graphql_object(context = Context)]
impl Item {
    /// Unique identifier of this `Item`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Item.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Counted quantity of this `Item`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Item.quantity",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn quantity(&self, ctx: &Context) -> Result<i32, Error> {
        Ok(self.item(ctx).await?.quantity.into())
    }

    /// Condition status of this `Item`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Item.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn status(&self, ctx: &Context) -> Result<Status, Error> {
        Ok(self.item(ctx).await?.status.into())
    }

    /// Free-text detail about this `Item`, possibly empty.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Item.detail",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn detail(&self, ctx: &Context) -> Result<Detail, Error> {
        Ok(self.item(ctx).await?.detail.clone().into())
    }

    /// `DateTime` when this `Item` was recorded.
    ///
    /// Never advanced by edits.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Item.recordedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn recorded_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.item(ctx).await?.recorded_at.coerce())
    }

    /// `Room` this `Item` is placed in, if assigned.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Item.room",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn room(&self, ctx: &Context) -> Result<Option<api::Room>, Error> {
        let room_id = self.item(ctx).await?.room_id;
        #[expect(
            unsafe_code,
            reason = "`Item` loaded from repository guarantees `Room` \
                      existence"
        )]
        let room = room_id.map(|id| unsafe { api::Room::new_unchecked(id) });
        Ok(room)
    }

    /// `Variant` this `Item` is an instance of, if known.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Item.variant",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn variant(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Variant>, Error> {
        let variant_id = self.item(ctx).await?.variant_id;
        #[expect(
            unsafe_code,
            reason = "`Item` loaded from repository guarantees `Variant` \
                      existence"
        )]
        let variant =
            variant_id.map(|id| unsafe { api::Variant::new_unchecked(id) });
        Ok(variant)
    }

    /// History of this `Item`: snapshots of its values before each detected
    /// change, most recent first.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Item.history",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn history(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::history::HistoryEntry>, Error> {
        ctx.service()
            .execute(query::history::ByItem::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|entries| entries.into_iter().map(Into::into).collect())
    }
}

/// Unique identifier of an `Item`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::item::Id)]
#[into(domain::item::Id)]
#[graphql(name = "ItemId", transparent)]
pub struct Id(Uuid);

/// Free-text detail of an `Item`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ItemDetail",
    with = scalar::Via::<domain::item::Detail>,
)]
pub struct Detail(domain::item::Detail);

/// Condition status of an `Item`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ItemStatus")]
pub enum Status {
    /// In good condition.
    Good,

    /// Awaiting repair or review.
    Pending,

    /// In bad condition.
    Bad,
}

impl From<domain::item::Status> for Status {
    fn from(status: domain::item::Status) -> Self {
        use domain::item::Status as S;
        match status {
            S::Good => Self::Good,
            S::Pending => Self::Pending,
            S::Bad => Self::Bad,
        }
    }
}

impl From<Status> for domain::item::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Good => Self::Good,
            Status::Pending => Self::Pending,
            Status::Bad => Self::Bad,
        }
    }
}

/// Filter narrowing a set of `Item`s.
///
/// Present fields compose with logical `AND`.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct ItemFilter {
    /// `Sector` the `Item`s are placed in.
    pub sector: Option<api::sector::Id>,

    /// `Location` the `Item`s are placed in.
    pub location: Option<api::location::Id>,

    /// `Floor` the `Item`s are placed on.
    pub floor: Option<api::floor::Id>,

    /// `RoomKind` of the `Room` the `Item`s are placed in.
    pub room_kind: Option<api::room_kind::Id>,

    /// `Room` the `Item`s are placed in.
    pub room: Option<api::room::Id>,

    /// `Category` of the `Item`s' `Object`.
    pub category: Option<api::category::Id>,

    /// `Object` the `Item`s are instances of.
    pub object: Option<api::object::Id>,

    /// Exact `Variant` the `Item`s are instances of.
    pub variant: Option<api::variant::Id>,

    /// Condition status of the `Item`s.
    pub status: Option<Status>,

    /// Exact `Variant` brand of the `Item`s.
    pub brand: Option<api::variant::Brand>,

    /// Exact `Variant` material of the `Item`s.
    pub material: Option<api::variant::Material>,
}

impl From<ItemFilter> for read::item::list::Filter {
    fn from(filter: ItemFilter) -> Self {
        let ItemFilter {
            sector,
            location,
            floor,
            room_kind,
            room,
            category,
            object,
            variant,
            status,
            brand,
            material,
        } = filter;
        Self {
            sector: sector.map(Into::into),
            location: location.map(Into::into),
            floor: floor.map(Into::into),
            room_kind: room_kind.map(Into::into),
            room: room.map(Into::into),
            category: category.map(Into::into),
            object: object.map(Into::into),
            variant: variant.map(Into::into),
            status: status.map(Into::into),
            brand: brand.map(Into::into),
            material: material.map(Into::into),
        }
    }
}
