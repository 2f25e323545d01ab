//! [`Query`] collection related to [`Sector`]s.

use common::operations::By;

use crate::domain::{sector, Sector};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Sector`] by its ID.
pub type ById = DatabaseQuery<By<Option<Sector>, sector::Id>>;

/// Queries all [`Sector`]s, ordered by name.
pub type List = DatabaseQuery<By<Vec<Sector>, ()>>;
