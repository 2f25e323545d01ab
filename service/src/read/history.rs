//! [`HistoryEntry`]-related read definitions.

#[cfg(doc)]
use crate::domain::item::HistoryEntry;

pub mod list {
    //! [`HistoryEntry`] list definitions.

    use crate::domain::{item, object, room, variant};
    #[cfg(doc)]
    use crate::domain::{item::HistoryEntry, Item, Object, Room, Variant};

    /// Filter narrowing a set of [`HistoryEntry`]s.
    ///
    /// Present fields compose with logical `AND`.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// [`Room`] the snapshotted [`Item`] is placed in.
        pub room: Option<room::Id>,

        /// [`Object`] the snapshotted [`Item`] is an instance of.
        pub object: Option<object::Id>,

        /// Exact [`Variant`] the snapshotted [`Item`] is an instance of.
        pub variant: Option<variant::Id>,

        /// Prior condition [`item::Status`] captured by the [`HistoryEntry`].
        pub status: Option<item::Status>,
    }
}
