//! [`Query`] collection related to [`Category`]s.

use common::operations::By;

use crate::domain::{category, Category};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Category`] by its ID.
pub type ById = DatabaseQuery<By<Option<Category>, category::Id>>;

/// Queries all [`Category`]s, ordered by name.
pub type List = DatabaseQuery<By<Vec<Category>, ()>>;
