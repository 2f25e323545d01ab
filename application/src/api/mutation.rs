//! GraphQL [`Mutation`]s definitions.

use common::Handler as _;
use juniper::graphql_object;
use service::{command, domain};

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

/// Converts the provided level into a [`domain::floor::Level`].
fn into_level(level: i32) -> Result<domain::floor::Level, Error> {
    domain::floor::Level::try_from(level)
        .map_err(|_| api::InputError::NumberOutOfRange.into())
}

/// Converts the provided quantity into a [`domain::item::Quantity`].
fn into_quantity(quantity: i32) -> Result<domain::item::Quantity, Error> {
    domain::item::Quantity::try_from(quantity)
        .map_err(|_| api::InputError::NumberOutOfRange.into())
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `Sector` with the provided name.
    ///
    /// Returns the existing `Sector` if one with the same name already
    /// exists.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createSector",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_sector(
        name: api::sector::Name,
        ctx: &Context,
    ) -> Result<api::Sector, Error> {
        ctx.service()
            .execute(command::CreateSector { name: name.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Renames the `Sector` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_EXISTS` - the `Sector` does not exist;
    /// - `NAME_OCCUPIED` - the name is occupied by another `Sector`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateSector",
            id = %id,
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_sector(
        id: api::sector::Id,
        name: api::sector::Name,
        ctx: &Context,
    ) -> Result<api::Sector, Error> {
        ctx.service()
            .execute(command::UpdateSector {
                sector_id: id.into(),
                name: name.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Sector` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_EXISTS` - the `Sector` does not exist;
    /// - `STILL_REFERENCED` - the `Sector` still contains `Location`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteSector",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_sector(
        id: api::sector::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        ctx.service()
            .execute(command::DeleteEntity::<
                domain::Sector,
                domain::sector::Id,
            >::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Creates a new `Location` with the provided name in the specified
    /// `Sector`.
    ///
    /// Returns the existing `Location` if one with the same name already
    /// exists in that `Sector`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NAME_OCCUPIED` - the name is occupied in another `Sector`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createLocation",
            name = %name,
            otel.name = Self::SPAN_NAME,
            sector = %sector,
        ),
    )]
    pub async fn create_location(
        name: api::location::Name,
        sector: api::sector::Id,
        ctx: &Context,
    ) -> Result<api::Location, Error> {
        ctx.service()
            .execute(command::CreateLocation {
                name: name.into(),
                sector_id: sector.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Renames the `Location` with the specified ID and/or moves it to
    /// another `Sector`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateLocation",
            id = %id,
            name = %name,
            otel.name = Self::SPAN_NAME,
            sector = %sector,
        ),
    )]
    pub async fn update_location(
        id: api::location::Id,
        name: api::location::Name,
        sector: api::sector::Id,
        ctx: &Context,
    ) -> Result<api::Location, Error> {
        ctx.service()
            .execute(command::UpdateLocation {
                location_id: id.into(),
                name: name.into(),
                sector_id: sector.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Location` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteLocation",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_location(
        id: api::location::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        ctx.service()
            .execute(command::DeleteEntity::<
                domain::Location,
                domain::location::Id,
            >::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Creates a new `Floor` on the provided level in the specified
    /// `Location`.
    ///
    /// Returns the existing `Floor` if the `Location` already has one on
    /// that level.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createFloor",
            level = %level,
            location = %location,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_floor(
        level: i32,
        location: api::location::Id,
        ctx: &Context,
    ) -> Result<api::Floor, Error> {
        ctx.service()
            .execute(command::CreateFloor {
                level: into_level(level).map_err(ctx.error())?,
                location_id: location.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Changes the level of the `Floor` with the specified ID and/or moves
    /// it to another `Location`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateFloor",
            id = %id,
            level = %level,
            location = %location,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_floor(
        id: api::floor::Id,
        level: i32,
        location: api::location::Id,
        ctx: &Context,
    ) -> Result<api::Floor, Error> {
        ctx.service()
            .execute(command::UpdateFloor {
                floor_id: id.into(),
                level: into_level(level).map_err(ctx.error())?,
                location_id: location.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Floor` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteFloor",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_floor(
        id: api::floor::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        ctx.service()
            .execute(
                command::DeleteEntity::<domain::Floor, domain::floor::Id>::by(
                    id.into(),
                ),
            )
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Creates a new `RoomKind` with the provided name.
    ///
    /// Returns the existing `RoomKind` if one with the same name already
    /// exists.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createRoomKind",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_room_kind(
        name: api::room_kind::Name,
        ctx: &Context,
    ) -> Result<api::RoomKind, Error> {
        ctx.service()
            .execute(command::CreateRoomKind { name: name.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Renames the `RoomKind` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateRoomKind",
            id = %id,
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_room_kind(
        id: api::room_kind::Id,
        name: api::room_kind::Name,
        ctx: &Context,
    ) -> Result<api::RoomKind, Error> {
        ctx.service()
            .execute(command::UpdateRoomKind {
                room_kind_id: id.into(),
                name: name.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `RoomKind` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteRoomKind",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_room_kind(
        id: api::room_kind::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        ctx.service()
            .execute(command::DeleteEntity::<
                domain::RoomKind,
                domain::room_kind::Id,
            >::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Creates a new `Room` on the specified `Floor`, classified as the
    /// specified `RoomKind`.
    #[tracing::instrument(
        skip_all,
        fields(
            floor = %floor,
            gql.name = "createRoom",
            kind = %kind,
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_room(
        name: api::room::Name,
        floor: api::floor::Id,
        kind: api::room_kind::Id,
        ctx: &Context,
    ) -> Result<api::Room, Error> {
        ctx.service()
            .execute(command::CreateRoom {
                name: name.into(),
                floor_id: floor.into(),
                kind_id: kind.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Edits the `Room` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            floor = %floor,
            gql.name = "updateRoom",
            id = %id,
            kind = %kind,
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_room(
        id: api::room::Id,
        name: api::room::Name,
        floor: api::floor::Id,
        kind: api::room_kind::Id,
        ctx: &Context,
    ) -> Result<api::Room, Error> {
        ctx.service()
            .execute(command::UpdateRoom {
                room_id: id.into(),
                name: name.into(),
                floor_id: floor.into(),
                kind_id: kind.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Room` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteRoom",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_room(
        id: api::room::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        ctx.service()
            .execute(
                command::DeleteEntity::<domain::Room, domain::room::Id>::by(
                    id.into(),
                ),
            )
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Creates a new `Category` with the provided name.
    ///
    /// Returns the existing `Category` if one with the same name already
    /// exists.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createCategory",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_category(
        name: api::category::Name,
        ctx: &Context,
    ) -> Result<api::Category, Error> {
        ctx.service()
            .execute(command::CreateCategory { name: name.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Renames the `Category` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateCategory",
            id = %id,
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_category(
        id: api::category::Id,
        name: api::category::Name,
        ctx: &Context,
    ) -> Result<api::Category, Error> {
        ctx.service()
            .execute(command::UpdateCategory {
                category_id: id.into(),
                name: name.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Category` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteCategory",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_category(
        id: api::category::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        ctx.service()
            .execute(command::DeleteEntity::<
                domain::Category,
                domain::category::Id,
            >::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Creates a new `Object` with the provided name in the specified
    /// `Category`.
    ///
    /// Returns the existing `Object` if one with the same name already
    /// exists; its `Category` association is left untouched in that case.
    #[tracing::instrument(
        skip_all,
        fields(
            category = %category,
            gql.name = "createObject",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_object(
        name: api::object::Name,
        category: api::category::Id,
        ctx: &Context,
    ) -> Result<api::Object, Error> {
        ctx.service()
            .execute(command::CreateObject {
                name: name.into(),
                category_id: category.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Renames the `Object` with the specified ID and/or moves it to
    /// another `Category`.
    #[tracing::instrument(
        skip_all,
        fields(
            category = %category,
            gql.name = "updateObject",
            id = %id,
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_object(
        id: api::object::Id,
        name: api::object::Name,
        category: api::category::Id,
        ctx: &Context,
    ) -> Result<api::Object, Error> {
        ctx.service()
            .execute(command::UpdateObject {
                object_id: id.into(),
                name: name.into(),
                category_id: category.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Object` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteObject",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_object(
        id: api::object::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        ctx.service()
            .execute(command::DeleteEntity::<
                domain::Object,
                domain::object::Id,
            >::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Creates a new `Variant` of the specified `Object` with the provided
    /// brand and material.
    ///
    /// Returns the existing `Variant` if the `Object` already has one with
    /// the same brand and material.
    #[tracing::instrument(
        skip_all,
        fields(
            brand = ?brand,
            gql.name = "createVariant",
            material = ?material,
            object = %object,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_variant(
        object: api::object::Id,
        brand: Option<api::variant::Brand>,
        material: Option<api::variant::Material>,
        ctx: &Context,
    ) -> Result<api::Variant, Error> {
        ctx.service()
            .execute(command::CreateVariant {
                object_id: object.into(),
                spec: domain::variant::Spec {
                    brand: brand.map(Into::into),
                    material: material.map(Into::into),
                },
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Changes the brand/material of the `Variant` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            brand = ?brand,
            gql.name = "updateVariant",
            id = %id,
            material = ?material,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_variant(
        id: api::variant::Id,
        brand: Option<api::variant::Brand>,
        material: Option<api::variant::Material>,
        ctx: &Context,
    ) -> Result<api::Variant, Error> {
        ctx.service()
            .execute(command::UpdateVariant {
                variant_id: id.into(),
                spec: domain::variant::Spec {
                    brand: brand.map(Into::into),
                    material: material.map(Into::into),
                },
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Variant` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteVariant",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_variant(
        id: api::variant::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        ctx.service()
            .execute(command::DeleteEntity::<
                domain::Variant,
                domain::variant::Id,
            >::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Registers a new `Item`, stamping its recorded date with the current
    /// moment.
    ///
    /// Creation never writes history.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createItem",
            otel.name = Self::SPAN_NAME,
            room = ?room,
            variant = ?variant,
        ),
    )]
    pub async fn create_item(
        room: Option<api::room::Id>,
        variant: Option<api::variant::Id>,
        quantity: i32,
        status: api::item::Status,
        detail: Option<api::item::Detail>,
        ctx: &Context,
    ) -> Result<api::Item, Error> {
        ctx.service()
            .execute(command::CreateItem {
                room_id: room.map(Into::into),
                variant_id: variant.map(Into::into),
                quantity: into_quantity(quantity).map_err(ctx.error())?,
                status: status.into(),
                detail: detail.map_or_else(Default::default, Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the `Item` with the specified ID.
    ///
    /// Persists the submitted values; if quantity, status or detail
    /// actually changed, a `HistoryEntry` snapshot of the previous values
    /// is recorded atomically with the update. The recorded date is never
    /// advanced.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_EXISTS` - the `Item` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateItem",
            id = %id,
            otel.name = Self::SPAN_NAME,
            room = ?room,
            variant = ?variant,
        ),
    )]
    pub async fn update_item(
        id: api::item::Id,
        room: Option<api::room::Id>,
        variant: Option<api::variant::Id>,
        quantity: i32,
        status: api::item::Status,
        detail: Option<api::item::Detail>,
        ctx: &Context,
    ) -> Result<api::Item, Error> {
        ctx.service()
            .execute(command::UpdateItem {
                item_id: id.into(),
                room_id: room.map(Into::into),
                variant_id: variant.map(Into::into),
                quantity: into_quantity(quantity).map_err(ctx.error())?,
                status: status.into(),
                detail: detail.map_or_else(Default::default, Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Item` with the specified ID, along with its history.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteItem",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_item(
        id: api::item::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        ctx.service()
            .execute(
                command::DeleteEntity::<domain::Item, domain::item::Id>::by(
                    id.into(),
                ),
            )
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Marks the specified `Variant` as typical for the specified
    /// `RoomKind` at the provided display position.
    ///
    /// Returns the existing association if the pair is already marked.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createTypicalObject",
            otel.name = Self::SPAN_NAME,
            position = %position,
            room_kind = %room_kind,
            variant = %variant,
        ),
    )]
    pub async fn create_typical_object(
        room_kind: api::room_kind::Id,
        variant: api::variant::Id,
        position: i32,
        ctx: &Context,
    ) -> Result<api::typical::Id, Error> {
        let position = domain::typical_object::Position::try_from(position)
            .map_err(|_| Error::from(api::InputError::NumberOutOfRange))
            .map_err(ctx.error())?;
        ctx.service()
            .execute(command::CreateTypicalObject {
                room_kind_id: room_kind.into(),
                variant_id: variant.into(),
                position,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|typical| typical.id.into())
    }

    /// Removes the `TypicalObject` association with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteTypicalObject",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_typical_object(
        id: api::typical::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        ctx.service()
            .execute(command::DeleteEntity::<
                domain::TypicalObject,
                domain::typical_object::Id,
            >::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Creates a `Room` together with its whole context in one
    /// transaction: `Sector`, `Location`, `Floor` and `RoomKind` are each
    /// picked or created, and every item row is registered in the new
    /// `Room`.
    ///
    /// The submission is all-or-nothing. Entirely blank item rows are
    /// silently skipped.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_CHOICE` - a choice names neither or both of its sides;
    /// - `INCOMPLETE_ITEM_ROW` - a non-blank row misses quantity or status;
    /// - `NOT_EXISTS` - a picked entity does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createStructure",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_structure(
        input: api::structure::StructureInput,
        ctx: &Context,
    ) -> Result<api::structure::StructureOutput, Error> {
        let cmd = input.into_command().map_err(ctx.error())?;
        ctx.service()
            .execute(cmd)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(api::structure::StructureOutput)
    }
}
