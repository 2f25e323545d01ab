//! [`Room`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

use crate::domain::{floor, room_kind};
#[cfg(doc)]
use crate::domain::{Floor, RoomKind};

/// Place on a [`Floor`] holding inventory [`Item`]s.
///
/// Unlike the rest of the hierarchy, [`Room`] names are not unique.
///
/// [`Item`]: crate::domain::Item
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Room {
    /// ID of this [`Room`].
    pub id: Id,

    /// [`Name`] of this [`Room`].
    pub name: Name,

    /// ID of the [`Floor`] this [`Room`] is on.
    pub floor_id: floor::Id,

    /// ID of the [`RoomKind`] this [`Room`] is classified as.
    pub kind_id: room_kind::Id,
}

/// ID of a [`Room`].
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

/// Name of a [`Room`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 100
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}
