//! [`Query`] collection related to [`Room`]s.

use common::operations::By;

use crate::domain::{floor, room, Room};
#[cfg(doc)]
use crate::{domain::Floor, Query};

use super::DatabaseQuery;

/// Queries a [`Room`] by its ID.
pub type ById = DatabaseQuery<By<Option<Room>, room::Id>>;

/// Queries the [`Room`]s of a [`Floor`], ordered by name.
pub type List = DatabaseQuery<By<Vec<Room>, floor::Id>>;
