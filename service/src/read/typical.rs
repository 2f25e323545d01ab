//! [`TypicalObject`]-related read definitions.

use crate::domain::{category, object, typical_object, variant};
#[cfg(doc)]
use crate::domain::{RoomKind, TypicalObject, Variant};

/// [`TypicalObject`] of a [`RoomKind`] joined with its catalog labels, as
/// suggested to clients.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    /// ID of the [`TypicalObject`] association.
    pub id: typical_object::Id,

    /// Display position of the association in the suggestion list.
    pub position: typical_object::Position,

    /// Indicator whether the association is still suggested.
    pub active: bool,

    /// ID of the [`Category`] of the suggested [`Object`].
    ///
    /// [`Category`]: crate::domain::Category
    /// [`Object`]: crate::domain::Object
    pub category_id: category::Id,

    /// Name of the [`Category`] of the suggested [`Object`].
    ///
    /// [`Category`]: crate::domain::Category
    /// [`Object`]: crate::domain::Object
    pub category_name: category::Name,

    /// ID of the suggested [`Object`].
    ///
    /// [`Object`]: crate::domain::Object
    pub object_id: object::Id,

    /// Name of the suggested [`Object`].
    ///
    /// [`Object`]: crate::domain::Object
    pub object_name: object::Name,

    /// ID of the suggested [`Variant`].
    pub variant_id: variant::Id,

    /// Brand of the suggested [`Variant`], if any.
    pub brand: Option<variant::Brand>,

    /// Material of the suggested [`Variant`], if any.
    pub material: Option<variant::Material>,
}
