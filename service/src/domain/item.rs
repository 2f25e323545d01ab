//! [`Item`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

use crate::domain::{room, variant};
#[cfg(doc)]
use crate::domain::{Room, Variant};

/// Inventory record of a [`Variant`] placed in a [`Room`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Item {
    /// ID of this [`Item`].
    pub id: Id,

    /// ID of the [`Room`] this [`Item`] is placed in, if assigned.
    pub room_id: Option<room::Id>,

    /// ID of the [`Variant`] this [`Item`] is an instance of, if known.
    pub variant_id: Option<variant::Id>,

    /// Counted [`Quantity`] of this [`Item`].
    pub quantity: Quantity,

    /// Condition [`Status`] of this [`Item`].
    pub status: Status,

    /// Free-text [`Detail`] about this [`Item`].
    pub detail: Detail,

    /// [`DateTime`] when this [`Item`] was recorded.
    ///
    /// Set once on creation and never advanced by edits.
    pub recorded_at: RecordedDateTime,
}

impl Item {
    /// Indicates whether any of the history-tracked fields (quantity, status,
    /// detail) of this [`Item`] differs from the `persisted` one.
    #[must_use]
    pub fn differs_from(&self, persisted: &Self) -> bool {
        self.quantity != persisted.quantity
            || self.status != persisted.status
            || self.detail != persisted.detail
    }
}

/// ID of an [`Item`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, FromStr, Hash, Into,
    PartialEq,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Counted quantity of an [`Item`].
pub type Quantity = i16;

define_kind! {
    #[doc = "Condition status of an [`Item`]."]
    enum Status {
        #[doc = "In good condition."]
        Good = 1,

        #[doc = "Awaiting repair or review."]
        Pending = 2,

        #[doc = "In bad condition."]
        Bad = 3,
    }
}

/// Free-text detail about an [`Item`].
///
/// May be empty: an absent detail and an empty one are the same value, so
/// change detection never distinguishes them.
#[derive(AsRef, Clone, Debug, Default, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Detail(String);

impl Detail {
    /// Creates a new [`Detail`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `detail` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(detail: impl Into<String>) -> Self {
        Self(detail.into())
    }

    /// Creates a new [`Detail`] if the given `detail` is valid.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Option<Self> {
        let detail = detail.into();
        Self::check(&detail).then_some(Self(detail))
    }

    /// Indicates whether this [`Detail`] is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks whether the given `detail` is a valid [`Detail`].
    fn check(detail: impl AsRef<str>) -> bool {
        let detail = detail.as_ref();
        detail.trim() == detail && detail.len() <= 200
    }
}

impl FromStr for Detail {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Detail`")
    }
}

/// [`DateTime`] when an [`Item`] was recorded.
pub type RecordedDateTime = DateTimeOf<(Item, unit::Creation)>;

/// Immutable snapshot of an [`Item`]'s tracked fields as they were before a
/// detected change.
///
/// Written only by the item update path, exactly one per detected change, and
/// deleted together with its [`Item`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HistoryEntry {
    /// ID of this [`HistoryEntry`].
    pub id: HistoryEntryId,

    /// ID of the [`Item`] this [`HistoryEntry`] belongs to.
    pub item_id: Id,

    /// [`Quantity`] the [`Item`] had before the change.
    pub quantity: Quantity,

    /// [`Status`] the [`Item`] had before the change.
    pub status: Status,

    /// [`Detail`] the [`Item`] had before the change.
    pub detail: Detail,

    /// [`DateTime`] the [`Item`] was recorded at before the change.
    pub recorded_at: RecordedDateTime,
}

impl HistoryEntry {
    /// Captures the tracked fields of the provided [`Item`] as a new
    /// [`HistoryEntry`].
    #[must_use]
    pub fn snapshot(item: &Item) -> Self {
        Self {
            id: HistoryEntryId::new(),
            item_id: item.id,
            quantity: item.quantity,
            status: item.status,
            detail: item.detail.clone(),
            recorded_at: item.recorded_at,
        }
    }
}

/// ID of a [`HistoryEntry`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, FromStr, Hash, Into,
    PartialEq,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct HistoryEntryId(Uuid);

impl HistoryEntryId {
    /// Creates a new random [`HistoryEntryId`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}
