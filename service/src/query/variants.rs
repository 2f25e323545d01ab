//! [`Query`] collection related to [`Variant`]s.

use common::operations::By;

use crate::domain::{object, variant, Variant};
#[cfg(doc)]
use crate::{domain::Object, Query};

use super::DatabaseQuery;

/// Queries a [`Variant`] by its ID.
pub type ById = DatabaseQuery<By<Option<Variant>, variant::Id>>;

/// Queries the [`Variant`]s of an [`Object`], ordered by brand and material.
pub type List = DatabaseQuery<By<Vec<Variant>, object::Id>>;
