//! [`Floor`] definitions.

use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

use crate::domain::location;
#[cfg(doc)]
use crate::domain::Location;

/// Storey of a [`Location`], containing [`Room`]s.
///
/// Unique per ([`Location`], [`Level`]) pair.
///
/// [`Room`]: crate::domain::Room
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Floor {
    /// ID of this [`Floor`].
    pub id: Id,

    /// [`Level`] of this [`Floor`].
    pub level: Level,

    /// ID of the [`Location`] this [`Floor`] belongs to.
    pub location_id: location::Id,
}

/// ID of a [`Floor`].
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

/// Storey number of a [`Floor`] (may be negative for basements).
pub type Level = i16;
