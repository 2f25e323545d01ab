//! [`Item`]-related read definitions.

#[cfg(doc)]
use crate::domain::Item;

pub mod list {
    //! [`Item`] list definitions.

    use crate::domain::{
        category, floor, item, location, object, room, room_kind, sector,
        variant,
    };
    #[cfg(doc)]
    use crate::domain::{Item, Variant};

    /// Filter narrowing a set of [`Item`]s.
    ///
    /// Present fields compose with logical `AND`.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`Sector`] the [`Item`]s are placed in.
        ///
        /// [`Sector`]: crate::domain::Sector
        pub sector: Option<sector::Id>,

        /// [`Location`] the [`Item`]s are placed in.
        ///
        /// [`Location`]: crate::domain::Location
        pub location: Option<location::Id>,

        /// [`Floor`] the [`Item`]s are placed on.
        ///
        /// [`Floor`]: crate::domain::Floor
        pub floor: Option<floor::Id>,

        /// [`RoomKind`] of the [`Room`] the [`Item`]s are placed in.
        ///
        /// [`Room`]: crate::domain::Room
        /// [`RoomKind`]: crate::domain::RoomKind
        pub room_kind: Option<room_kind::Id>,

        /// [`Room`] the [`Item`]s are placed in.
        ///
        /// [`Room`]: crate::domain::Room
        pub room: Option<room::Id>,

        /// [`Category`] of the [`Item`]s' [`Object`].
        ///
        /// [`Category`]: crate::domain::Category
        /// [`Object`]: crate::domain::Object
        pub category: Option<category::Id>,

        /// [`Object`] the [`Item`]s are instances of.
        ///
        /// [`Object`]: crate::domain::Object
        pub object: Option<object::Id>,

        /// Exact [`Variant`] the [`Item`]s are instances of.
        pub variant: Option<variant::Id>,

        /// Condition [`item::Status`] of the [`Item`]s.
        pub status: Option<item::Status>,

        /// Exact [`Variant`] brand of the [`Item`]s.
        pub brand: Option<variant::Brand>,

        /// Exact [`Variant`] material of the [`Item`]s.
        pub material: Option<variant::Material>,
    }
}
