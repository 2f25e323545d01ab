//! [`HistoryEntry`]-related definitions.

use common::DateTime;
use derive_more::{Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api, Context};

/// A snapshot of an `Item`'s values before a detected change.
///
/// Written only by the item update path; never edited or created directly.
#[derive(Clone, Debug, From)]
pub struct HistoryEntry(domain::item::HistoryEntry);

/// A snapshot of an `Item`'s values before a detected change.
#[graphql_object(context = Context)]
impl HistoryEntry {
    /// Unique identifier of this `HistoryEntry`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// `Item` this `HistoryEntry` belongs to.
    #[must_use]
    pub fn item(&self) -> api::Item {
        #[expect(
            unsafe_code,
            reason = "`HistoryEntry` loaded from repository guarantees \
                      `Item` existence"
        )]
        unsafe {
            api::Item::new_unchecked(self.0.item_id)
        }
    }

    /// Quantity the `Item` had before the change.
    #[must_use]
    pub fn quantity(&self) -> i32 {
        self.0.quantity.into()
    }

    /// Condition status the `Item` had before the change.
    #[must_use]
    pub fn status(&self) -> api::item::Status {
        self.0.status.into()
    }

    /// Detail the `Item` had before the change.
    #[must_use]
    pub fn detail(&self) -> api::item::Detail {
        self.0.detail.clone().into()
    }

    /// `DateTime` the `Item` was recorded at before the change.
    #[must_use]
    pub fn recorded_at(&self) -> DateTime {
        self.0.recorded_at.coerce()
    }
}

/// Unique identifier of a `HistoryEntry`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::item::HistoryEntryId)]
#[into(domain::item::HistoryEntryId)]
#[graphql(name = "HistoryEntryId", transparent)]
pub struct Id(Uuid);
