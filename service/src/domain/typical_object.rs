//! [`TypicalObject`] definitions.

use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

use crate::domain::{room_kind, variant};
#[cfg(doc)]
use crate::domain::{RoomKind, Variant};

/// Association marking a [`Variant`] as typically expected in [`Room`]s of a
/// [`RoomKind`].
///
/// Unique per ([`RoomKind`], [`Variant`]) pair.
///
/// [`Room`]: crate::domain::Room
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TypicalObject {
    /// ID of this [`TypicalObject`].
    pub id: Id,

    /// ID of the [`RoomKind`] this [`TypicalObject`] applies to.
    pub room_kind_id: room_kind::Id,

    /// ID of the expected [`Variant`].
    pub variant_id: variant::Id,

    /// Indicator whether this [`TypicalObject`] is still suggested.
    pub active: bool,

    /// [`Position`] of this [`TypicalObject`] in the suggestion list.
    pub position: Position,
}

/// ID of a [`TypicalObject`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, FromStr, Hash, Into,
    PartialEq,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Display order of a [`TypicalObject`] within its [`RoomKind`] list.
///
/// Used purely for sequencing and not required to be unique.
pub type Position = i16;
