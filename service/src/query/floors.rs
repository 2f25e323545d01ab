//! [`Query`] collection related to [`Floor`]s.

use common::operations::By;

use crate::domain::{floor, location, Floor};
#[cfg(doc)]
use crate::{domain::Location, Query};

use super::DatabaseQuery;

/// Queries a [`Floor`] by its ID.
pub type ById = DatabaseQuery<By<Option<Floor>, floor::Id>>;

/// Queries the [`Floor`]s of a [`Location`], ordered by level.
pub type List = DatabaseQuery<By<Vec<Floor>, location::Id>>;
