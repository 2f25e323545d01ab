//! Domain definitions.

pub mod category;
pub mod floor;
pub mod item;
pub mod location;
pub mod object;
pub mod room;
pub mod room_kind;
pub mod sector;
pub mod typical_object;
pub mod variant;

pub use self::{
    category::Category, floor::Floor, item::Item, location::Location,
    object::Object, room::Room, room_kind::RoomKind, sector::Sector,
    typical_object::TypicalObject, variant::Variant,
};
