//! [`Query`] collection related to [`item::HistoryEntry`]s.

use common::operations::By;

use crate::{domain::item, read};
#[cfg(doc)]
use crate::{domain::Item, Query};

use super::DatabaseQuery;

/// Queries the [`item::HistoryEntry`]s of one [`Item`], most recent first.
pub type ByItem = DatabaseQuery<By<Vec<item::HistoryEntry>, item::Id>>;

/// Queries [`item::HistoryEntry`]s matching a
/// [`read::history::list::Filter`], most recent first.
pub type List =
    DatabaseQuery<By<Vec<item::HistoryEntry>, read::history::list::Filter>>;
