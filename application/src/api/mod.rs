//! GraphQL API definitions.

pub mod category;
pub mod export;
pub mod floor;
pub mod history;
pub mod item;
pub mod location;
mod mutation;
pub mod object;
mod query;
pub mod report;
pub mod room;
pub mod room_kind;
pub mod scalar;
pub mod sector;
pub mod structure;
pub mod typical;
pub mod variant;

use juniper::EmptySubscription;

use crate::{define_error, Context};

pub use self::{
    category::Category, floor::Floor, item::Item, location::Location,
    mutation::Mutation, object::Object, query::Query, room::Room,
    room_kind::RoomKind, sector::Sector, variant::Variant,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

define_error! {
    enum InputError {
        #[code = "AMBIGUOUS_CHOICE"]
        #[status = BAD_REQUEST]
        #[message = "Exactly one of the existing/new choices must be provided"]
        AmbiguousChoice,

        #[code = "INVALID_NUMBER"]
        #[status = BAD_REQUEST]
        #[message = "Provided number is out of the supported range"]
        NumberOutOfRange,
    }
}
