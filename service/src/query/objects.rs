//! [`Query`] collection related to [`Object`]s.

use common::operations::By;

use crate::domain::{category, object, Object};
#[cfg(doc)]
use crate::{domain::Category, Query};

use super::DatabaseQuery;

/// Queries an [`Object`] by its ID.
pub type ById = DatabaseQuery<By<Option<Object>, object::Id>>;

/// Queries [`Object`]s, optionally narrowed to one [`Category`], ordered by
/// name.
pub type List = DatabaseQuery<By<Vec<Object>, Option<category::Id>>>;
