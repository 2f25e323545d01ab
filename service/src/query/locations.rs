//! [`Query`] collection related to [`Location`]s.

use common::operations::By;

use crate::domain::{location, sector, Location};
#[cfg(doc)]
use crate::{domain::Sector, Query};

use super::DatabaseQuery;

/// Queries a [`Location`] by its ID.
pub type ById = DatabaseQuery<By<Option<Location>, location::Id>>;

/// Queries [`Location`]s, optionally narrowed to one [`Sector`], ordered by
/// name.
pub type List = DatabaseQuery<By<Vec<Location>, Option<sector::Id>>>;
