//! Condition-report definitions.

use common::{DateTime, Percent};
use derive_more::From;
use juniper::graphql_object;
use service::{query::report, read};

use crate::{api, Context};

/// Condition report over the filtered `Item`s: per-sector, per-location and
/// per-object quantity sums with percentage shares per status.
#[derive(Clone, Debug, From)]
pub struct ConditionReport(report::condition::Output);

/// Condition report over the filtered `Item`s.
#[graphql_object(context = Context)]
impl ConditionReport {
    /// Rows per `Sector`, ordered by sector name.
    ///
    /// `Item`s placed in no `Room` contribute to no row here.
    #[must_use]
    pub fn by_sector(&self) -> Vec<SectorConditionRow> {
        self.0.by_sector.iter().cloned().map(SectorConditionRow).collect()
    }

    /// Rows per `Location`, ordered by (sector, location) name.
    #[must_use]
    pub fn by_location(&self) -> Vec<LocationConditionRow> {
        self.0
            .by_location
            .iter()
            .cloned()
            .map(LocationConditionRow)
            .collect()
    }

    /// Rows per `Object`, ordered by object name, carrying the bad `Item`s
    /// of each group.
    #[must_use]
    pub fn by_object(&self) -> Vec<ObjectConditionRow> {
        self.0.by_object.iter().cloned().map(ObjectConditionRow).collect()
    }
}

/// Condition sums of the `Item`s placed in one `Sector`.
#[derive(Clone, Debug)]
pub struct SectorConditionRow(report::condition::SectorRow);

/// Condition sums of the `Item`s placed in one `Sector`.
#[graphql_object(context = Context)]
impl SectorConditionRow {
    /// `Sector` of this row.
    #[must_use]
    pub fn sector(&self) -> api::Sector {
        #[expect(
            unsafe_code,
            reason = "report rows are grouped over existing `Sector`s"
        )]
        unsafe {
            api::Sector::new_unchecked(self.0.sums.id)
        }
    }

    /// Name of the `Sector`.
    #[must_use]
    pub fn sector_name(&self) -> api::sector::Name {
        self.0.sums.name.clone().into()
    }

    /// Total quantity of the group.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.0.sums.sums.total
    }

    /// Quantity in good condition.
    #[must_use]
    pub fn good(&self) -> i32 {
        self.0.sums.sums.good
    }

    /// Quantity in pending condition.
    #[must_use]
    pub fn pending(&self) -> i32 {
        self.0.sums.sums.pending
    }

    /// Quantity in bad condition.
    #[must_use]
    pub fn bad(&self) -> i32 {
        self.0.sums.sums.bad
    }

    /// Share of the total in good condition, one decimal place.
    #[must_use]
    pub fn good_percent(&self) -> Percent {
        self.0.percentages.good
    }

    /// Share of the total in pending condition, one decimal place.
    #[must_use]
    pub fn pending_percent(&self) -> Percent {
        self.0.percentages.pending
    }

    /// Share of the total in bad condition, one decimal place.
    #[must_use]
    pub fn bad_percent(&self) -> Percent {
        self.0.percentages.bad
    }
}

/// Condition sums of the `Item`s placed in one `Location`.
#[derive(Clone, Debug)]
pub struct LocationConditionRow(report::condition::LocationRow);

/// Condition sums of the `Item`s placed in one `Location`.
#[graphql_object(context = Context)]
impl LocationConditionRow {
    /// `Location` of this row.
    #[must_use]
    pub fn location(&self) -> api::Location {
        #[expect(
            unsafe_code,
            reason = "report rows are grouped over existing `Location`s"
        )]
        unsafe {
            api::Location::new_unchecked(self.0.sums.id)
        }
    }

    /// Name of the `Location`.
    #[must_use]
    pub fn location_name(&self) -> api::location::Name {
        self.0.sums.name.clone().into()
    }

    /// Name of the `Sector` the `Location` belongs to.
    #[must_use]
    pub fn sector_name(&self) -> api::sector::Name {
        self.0.sums.sector_name.clone().into()
    }

    /// Total quantity of the group.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.0.sums.sums.total
    }

    /// Quantity in good condition.
    #[must_use]
    pub fn good(&self) -> i32 {
        self.0.sums.sums.good
    }

    /// Quantity in pending condition.
    #[must_use]
    pub fn pending(&self) -> i32 {
        self.0.sums.sums.pending
    }

    /// Quantity in bad condition.
    #[must_use]
    pub fn bad(&self) -> i32 {
        self.0.sums.sums.bad
    }

    /// Share of the total in good condition, one decimal place.
    #[must_use]
    pub fn good_percent(&self) -> Percent {
        self.0.percentages.good
    }

    /// Share of the total in pending condition, one decimal place.
    #[must_use]
    pub fn pending_percent(&self) -> Percent {
        self.0.percentages.pending
    }

    /// Share of the total in bad condition, one decimal place.
    #[must_use]
    pub fn bad_percent(&self) -> Percent {
        self.0.percentages.bad
    }
}

/// Condition sums of the `Item`s being instances of one `Object`, with the
/// group's bad `Item`s.
#[derive(Clone, Debug)]
pub struct ObjectConditionRow(read::report::ObjectRow);

/// Condition sums of the `Item`s being instances of one `Object`.
#[graphql_object(context = Context)]
impl ObjectConditionRow {
    /// `Object` of this row.
    ///
    /// Brand/material differences are merged: the grouping is by `Object`,
    /// not `Variant`.
    #[must_use]
    pub fn object(&self) -> api::Object {
        #[expect(
            unsafe_code,
            reason = "report rows are grouped over existing `Object`s"
        )]
        unsafe {
            api::Object::new_unchecked(self.0.sums.id)
        }
    }

    /// Name of the `Object`.
    #[must_use]
    pub fn object_name(&self) -> api::object::Name {
        self.0.sums.name.clone().into()
    }

    /// Total quantity of the group.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.0.sums.sums.total
    }

    /// Quantity in good condition.
    #[must_use]
    pub fn good(&self) -> i32 {
        self.0.sums.sums.good
    }

    /// Quantity in pending condition.
    #[must_use]
    pub fn pending(&self) -> i32 {
        self.0.sums.sums.pending
    }

    /// Quantity in bad condition.
    #[must_use]
    pub fn bad(&self) -> i32 {
        self.0.sums.sums.bad
    }

    /// Share of the total in good condition, one decimal place.
    #[must_use]
    pub fn good_percent(&self) -> Percent {
        self.0.percentages.good
    }

    /// Share of the total in pending condition, one decimal place.
    #[must_use]
    pub fn pending_percent(&self) -> Percent {
        self.0.percentages.pending
    }

    /// Share of the total in bad condition, one decimal place.
    #[must_use]
    pub fn bad_percent(&self) -> Percent {
        self.0.percentages.bad
    }

    /// Bad `Item`s of this group, ordered by their location path.
    #[must_use]
    pub fn bad_items(&self) -> Vec<BadItem> {
        self.0.bad_items.iter().cloned().map(BadItem).collect()
    }
}

/// An individual `Item` in bad condition, annotated with its location path.
#[derive(Clone, Debug)]
pub struct BadItem(read::report::BadItem);

/// An individual `Item` in bad condition.
#[graphql_object(context = Context)]
impl BadItem {
    /// The `Item` itself.
    #[must_use]
    pub fn item(&self) -> api::Item {
        #[expect(
            unsafe_code,
            reason = "bad items are read from existing `Item` rows"
        )]
        unsafe {
            api::Item::new_unchecked(self.0.id)
        }
    }

    /// Name of the `Object` the `Item` is an instance of.
    #[must_use]
    pub fn object_name(&self) -> api::object::Name {
        self.0.object_name.clone().into()
    }

    /// Brand of the `Item`'s `Variant`, if any.
    #[must_use]
    pub fn brand(&self) -> Option<api::variant::Brand> {
        self.0.brand.clone().map(Into::into)
    }

    /// Material of the `Item`'s `Variant`, if any.
    #[must_use]
    pub fn material(&self) -> Option<api::variant::Material> {
        self.0.material.clone().map(Into::into)
    }

    /// Quantity of the `Item`.
    #[must_use]
    pub fn quantity(&self) -> i32 {
        self.0.quantity.into()
    }

    /// Detail of the `Item`.
    #[must_use]
    pub fn detail(&self) -> api::item::Detail {
        self.0.detail.clone().into()
    }

    /// `DateTime` when the `Item` was recorded.
    #[must_use]
    pub fn recorded_at(&self) -> DateTime {
        self.0.recorded_at.coerce()
    }

    /// Full location path of the `Item`, absent for unassigned ones.
    #[must_use]
    pub fn path(&self) -> Option<LocationPath> {
        self.0.path.clone().map(LocationPath)
    }
}

/// Full location path of an `Item`: sector, location, floor and room.
#[derive(Clone, Debug)]
pub struct LocationPath(read::report::Path);

/// Full location path of an `Item`.
#[graphql_object(context = Context)]
impl LocationPath {
    /// Name of the `Sector`.
    #[must_use]
    pub fn sector_name(&self) -> api::sector::Name {
        self.0.sector.clone().into()
    }

    /// Name of the `Location`.
    #[must_use]
    pub fn location_name(&self) -> api::location::Name {
        self.0.location.clone().into()
    }

    /// Storey number of the floor.
    #[must_use]
    pub fn floor_level(&self) -> i32 {
        self.0.level.into()
    }

    /// Name of the `Room`.
    #[must_use]
    pub fn room_name(&self) -> api::room::Name {
        self.0.room.clone().into()
    }
}
