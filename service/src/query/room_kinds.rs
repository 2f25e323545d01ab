//! [`Query`] collection related to [`RoomKind`]s.

use common::operations::By;

use crate::domain::{room_kind, RoomKind};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`RoomKind`] by its ID.
pub type ById = DatabaseQuery<By<Option<RoomKind>, room_kind::Id>>;

/// Queries all [`RoomKind`]s, ordered by name.
pub type List = DatabaseQuery<By<Vec<RoomKind>, ()>>;
