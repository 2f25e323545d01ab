//! [`Command`] definition.

pub mod create_category;
pub mod create_floor;
pub mod create_item;
pub mod create_location;
pub mod create_object;
pub mod create_room;
pub mod create_room_kind;
pub mod create_sector;
pub mod create_structure;
pub mod create_typical_object;
pub mod create_variant;
pub mod delete;
pub mod seed_typical_objects;
pub mod update_category;
pub mod update_floor;
pub mod update_item;
pub mod update_location;
pub mod update_object;
pub mod update_room;
pub mod update_room_kind;
pub mod update_sector;
pub mod update_variant;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_category::CreateCategory, create_floor::CreateFloor,
    create_item::CreateItem, create_location::CreateLocation,
    create_object::CreateObject, create_room::CreateRoom,
    create_room_kind::CreateRoomKind, create_sector::CreateSector,
    create_structure::CreateStructure,
    create_typical_object::CreateTypicalObject, create_variant::CreateVariant,
    delete::DeleteEntity, seed_typical_objects::SeedTypicalObjects,
    update_category::UpdateCategory, update_floor::UpdateFloor,
    update_item::UpdateItem, update_location::UpdateLocation,
    update_object::UpdateObject, update_room::UpdateRoom,
    update_room_kind::UpdateRoomKind, update_sector::UpdateSector,
    update_variant::UpdateVariant,
};
