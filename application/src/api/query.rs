//! GraphQL [`Query`]s definitions.

use common::Handler as _;
use juniper::graphql_object;
use service::{command, query, read};

use crate::{api, error::EntityError, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the `Sector` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_EXISTS` - the `Sector` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "sector",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn sector(
        id: api::sector::Id,
        ctx: &Context,
    ) -> Result<api::Sector, Error> {
        ctx.service()
            .execute(query::sectors::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| EntityError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns all `Sector`s, ordered by name.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "sectors",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn sectors(ctx: &Context) -> Result<Vec<api::Sector>, Error> {
        ctx.service()
            .execute(query::sectors::List::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|sectors| sectors.into_iter().map(Into::into).collect())
    }

    /// Returns the `Location` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_EXISTS` - the `Location` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "location",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn location(
        id: api::location::Id,
        ctx: &Context,
    ) -> Result<api::Location, Error> {
        ctx.service()
            .execute(query::locations::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| EntityError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns `Location`s, optionally narrowed to one `Sector`, ordered by
    /// name.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "locations",
            otel.name = Self::SPAN_NAME,
            sector = ?sector,
        ),
    )]
    pub async fn locations(
        sector: Option<api::sector::Id>,
        ctx: &Context,
    ) -> Result<Vec<api::Location>, Error> {
        ctx.service()
            .execute(query::locations::List::by(sector.map(Into::into)))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|locations| {
                locations.into_iter().map(Into::into).collect()
            })
    }

    /// Returns the `Floor`s of the specified `Location`, ordered by level.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "floors",
            location = %location,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn floors(
        location: api::location::Id,
        ctx: &Context,
    ) -> Result<Vec<api::Floor>, Error> {
        ctx.service()
            .execute(query::floors::List::by(location.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|floors| floors.into_iter().map(Into::into).collect())
    }

    /// Returns the `Room` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_EXISTS` - the `Room` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "room",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn room(
        id: api::room::Id,
        ctx: &Context,
    ) -> Result<api::Room, Error> {
        ctx.service()
            .execute(query::rooms::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| EntityError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Room`s of the specified `Floor`, ordered by name.
    #[tracing::instrument(
        skip_all,
        fields(
            floor = %floor,
            gql.name = "rooms",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn rooms(
        floor: api::floor::Id,
        ctx: &Context,
    ) -> Result<Vec<api::Room>, Error> {
        ctx.service()
            .execute(query::rooms::List::by(floor.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|rooms| rooms.into_iter().map(Into::into).collect())
    }

    /// Returns all `RoomKind`s, ordered by name.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "roomKinds",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn room_kinds(
        ctx: &Context,
    ) -> Result<Vec<api::RoomKind>, Error> {
        ctx.service()
            .execute(query::room_kinds::List::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|kinds| kinds.into_iter().map(Into::into).collect())
    }

    /// Returns the typical objects suggested for the specified `RoomKind`,
    /// in display order.
    ///
    /// The first request for a `RoomKind` with no suggestions yet seeds them
    /// from the built-in table.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_EXISTS` - the `RoomKind` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "typicalObjects",
            otel.name = Self::SPAN_NAME,
            room_kind = %room_kind,
        ),
    )]
    pub async fn typical_objects(
        room_kind: api::room_kind::Id,
        ctx: &Context,
    ) -> Result<Vec<api::typical::TypicalObject>, Error> {
        ctx.service()
            .execute(command::SeedTypicalObjects {
                room_kind_id: room_kind.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|entries| entries.into_iter().map(Into::into).collect())
    }

    /// Returns all `Category`s, ordered by name.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "categories",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn categories(
        ctx: &Context,
    ) -> Result<Vec<api::Category>, Error> {
        ctx.service()
            .execute(query::categories::List::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|categories| {
                categories.into_iter().map(Into::into).collect()
            })
    }

    /// Returns `Object`s, optionally narrowed to one `Category`, ordered by
    /// name.
    #[tracing::instrument(
        skip_all,
        fields(
            category = ?category,
            gql.name = "objects",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn objects(
        category: Option<api::category::Id>,
        ctx: &Context,
    ) -> Result<Vec<api::Object>, Error> {
        ctx.service()
            .execute(query::objects::List::by(category.map(Into::into)))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|objects| objects.into_iter().map(Into::into).collect())
    }

    /// Returns the `Variant`s of the specified `Object`, ordered by brand
    /// and material.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "variants",
            object = %object,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn variants(
        object: api::object::Id,
        ctx: &Context,
    ) -> Result<Vec<api::Variant>, Error> {
        ctx.service()
            .execute(query::variants::List::by(object.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|variants| variants.into_iter().map(Into::into).collect())
    }

    /// Returns the `Item` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_EXISTS` - the `Item` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "item",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn item(
        id: api::item::Id,
        ctx: &Context,
    ) -> Result<api::Item, Error> {
        ctx.service()
            .execute(query::items::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| EntityError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Item`s matching the provided filter, ordered by their
    /// location path and object name.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "items",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn items(
        filter: Option<api::item::ItemFilter>,
        ctx: &Context,
    ) -> Result<Vec<api::Item>, Error> {
        ctx.service()
            .execute(query::items::List::by(
                filter.map(Into::into).unwrap_or_default(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|items| items.into_iter().map(Into::into).collect())
    }

    /// Returns the `HistoryEntry`s matching the provided filter, most
    /// recent first.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "itemHistory",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn item_history(
        room: Option<api::room::Id>,
        object: Option<api::object::Id>,
        variant: Option<api::variant::Id>,
        status: Option<api::item::Status>,
        ctx: &Context,
    ) -> Result<Vec<api::history::HistoryEntry>, Error> {
        ctx.service()
            .execute(query::history::List::by(read::history::list::Filter {
                room: room.map(Into::into),
                object: object.map(Into::into),
                variant: variant.map(Into::into),
                status: status.map(Into::into),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|entries| entries.into_iter().map(Into::into).collect())
    }

    /// Returns the condition report over the `Item`s matching the provided
    /// filter.
    ///
    /// Always recomputed from the current persisted state.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "conditionReport",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn condition_report(
        filter: Option<api::item::ItemFilter>,
        ctx: &Context,
    ) -> Result<api::report::ConditionReport, Error> {
        ctx.service()
            .execute(query::report::Condition {
                filter: filter.map(Into::into).unwrap_or_default(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the worksheet layouts of the full inventory export, one per
    /// `Location`, ordered sector by sector.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "exportWorkbook",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn export_workbook(
        ctx: &Context,
    ) -> Result<Vec<api::export::Worksheet>, Error> {
        ctx.service()
            .execute(query::export::Export)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(api::export::worksheets)
    }
}
