//! [`Query`] collection related to [`Item`]s.

use common::operations::By;

use crate::{
    domain::{item, Item},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`Item`] by its ID.
pub type ById = DatabaseQuery<By<Option<Item>, item::Id>>;

/// Queries [`Item`]s matching a [`read::item::list::Filter`], ordered by
/// their location path and object name.
pub type List = DatabaseQuery<By<Vec<Item>, read::item::list::Filter>>;
