//! Condition-report read definitions.

use common::Percent;

use crate::domain::{
    floor, item, location, object, room, sector, variant,
};
#[cfg(doc)]
use crate::domain::{Item, Location, Object, Room, Sector, Variant};

/// Quantity sums of one report group, total and per [`item::Status`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Sums {
    /// Total quantity of the group.
    pub total: i32,

    /// Quantity in [`item::Status::Good`] condition.
    pub good: i32,

    /// Quantity in [`item::Status::Pending`] condition.
    pub pending: i32,

    /// Quantity in [`item::Status::Bad`] condition.
    pub bad: i32,
}

impl Sums {
    /// Derives the per-[`item::Status`] [`Percentages`] of these [`Sums`].
    ///
    /// A group with a zero total yields an exact zero triple, not a division
    /// error. The three shares are rounded independently, so they may sum to
    /// slightly less than 100.
    #[must_use]
    pub fn percentages(&self) -> Percentages {
        Percentages {
            good: Percent::ratio(self.good, self.total),
            pending: Percent::ratio(self.pending, self.total),
            bad: Percent::ratio(self.bad, self.total),
        }
    }
}

/// Share of each [`item::Status`] in a report group's total quantity.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Percentages {
    /// Share in [`item::Status::Good`] condition.
    pub good: Percent,

    /// Share in [`item::Status::Pending`] condition.
    pub pending: Percent,

    /// Share in [`item::Status::Bad`] condition.
    pub bad: Percent,
}

/// [`Sums`] of the [`Item`]s placed in one [`Sector`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SectorSums {
    /// ID of the [`Sector`].
    pub id: sector::Id,

    /// Name of the [`Sector`].
    pub name: sector::Name,

    /// [`Sums`] of the group.
    pub sums: Sums,
}

/// [`Sums`] of the [`Item`]s placed in one [`Location`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocationSums {
    /// ID of the [`Location`].
    pub id: location::Id,

    /// Name of the [`Location`].
    pub name: location::Name,

    /// Name of the [`Sector`] the [`Location`] belongs to.
    pub sector_name: sector::Name,

    /// [`Sums`] of the group.
    pub sums: Sums,
}

/// [`Sums`] of the [`Item`]s being instances of one [`Object`].
///
/// Grouped by [`Object`], not [`Variant`]: brand/material differences are
/// merged.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ObjectSums {
    /// ID of the [`Object`].
    pub id: object::Id,

    /// Name of the [`Object`].
    pub name: object::Name,

    /// [`Sums`] of the group.
    pub sums: Sums,
}

/// Individual [`Item`] in [`item::Status::Bad`] condition, annotated with its
/// location [`Path`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BadItem {
    /// ID of the [`Item`].
    pub id: item::Id,

    /// ID of the [`Object`] the [`Item`] is an instance of.
    pub object_id: object::Id,

    /// Name of the [`Object`] the [`Item`] is an instance of.
    pub object_name: object::Name,

    /// Brand of the [`Item`]'s [`Variant`], if any.
    pub brand: Option<variant::Brand>,

    /// Material of the [`Item`]'s [`Variant`], if any.
    pub material: Option<variant::Material>,

    /// Quantity of the [`Item`].
    pub quantity: item::Quantity,

    /// Detail of the [`Item`].
    pub detail: item::Detail,

    /// When the [`Item`] was recorded.
    pub recorded_at: item::RecordedDateTime,

    /// Full location [`Path`] of the [`Item`], absent for unassigned ones.
    pub path: Option<Path>,
}

/// Full location path of an [`Item`]: sector, location, floor and room.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Path {
    /// Name of the [`Sector`].
    pub sector: sector::Name,

    /// Name of the [`Location`].
    pub location: location::Name,

    /// Level of the floor.
    pub level: floor::Level,

    /// Name of the [`Room`].
    pub room: room::Name,
}

/// Row of the by-object report table: [`ObjectSums`] with derived
/// [`Percentages`] and the group's [`BadItem`]s.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectRow {
    /// [`Sums`] of the group, with its identity.
    pub sums: ObjectSums,

    /// Derived [`Percentages`] of the group.
    pub percentages: Percentages,

    /// [`BadItem`]s of the group, in reporting order.
    pub bad_items: Vec<BadItem>,
}

/// Attaches every [`BadItem`] to its [`ObjectSums`] group, deriving the
/// group [`Percentages`] on the way.
///
/// Both inputs are expected in reporting order (objects by name, bad items
/// by (object, sector, location, floor, room)), which is preserved.
#[must_use]
pub fn group_bad_items(
    sums: Vec<ObjectSums>,
    bad_items: Vec<BadItem>,
) -> Vec<ObjectRow> {
    let mut rows = sums
        .into_iter()
        .map(|sums| ObjectRow {
            percentages: sums.sums.percentages(),
            sums,
            bad_items: vec![],
        })
        .collect::<Vec<_>>();

    for bad in bad_items {
        if let Some(row) =
            rows.iter_mut().find(|row| row.sums.id == bad.object_id)
        {
            row.bad_items.push(bad);
        }
    }

    rows
}

#[cfg(test)]
mod spec {
    use common::Percent;

    use crate::domain::{item, object, sector};

    use super::{group_bad_items, BadItem, ObjectSums, Sums};

    fn percent(s: &str) -> Percent {
        s.parse().unwrap()
    }

    #[test]
    fn percentages_round_to_one_decimal() {
        let sums = Sums {
            total: 10,
            good: 6,
            pending: 3,
            bad: 1,
        };

        let pct = sums.percentages();
        assert_eq!(pct.good, percent("60.0"));
        assert_eq!(pct.pending, percent("30.0"));
        assert_eq!(pct.bad, percent("10.0"));
    }

    #[test]
    fn percentages_of_empty_group_are_zero() {
        let pct = Sums::default().percentages();
        assert_eq!(pct.good, Percent::ZERO);
        assert_eq!(pct.pending, Percent::ZERO);
        assert_eq!(pct.bad, Percent::ZERO);
    }

    #[test]
    fn bad_items_end_up_under_their_object() {
        let mirrors = object::Id::new();
        let tables = object::Id::new();

        let sums = vec![
            ObjectSums {
                id: mirrors,
                name: "Espejos".parse().unwrap(),
                sums: Sums {
                    total: 4,
                    good: 1,
                    pending: 0,
                    bad: 3,
                },
            },
            ObjectSums {
                id: tables,
                name: "Mesas".parse().unwrap(),
                sums: Sums {
                    total: 5,
                    good: 5,
                    pending: 0,
                    bad: 0,
                },
            },
        ];
        let bad = |object_id, sector: &str| BadItem {
            id: item::Id::new(),
            object_id,
            object_name: "Espejos".parse().unwrap(),
            brand: None,
            material: None,
            quantity: 1,
            detail: item::Detail::default(),
            recorded_at: common::DateTime::UNIX_EPOCH.coerce(),
            path: Some(super::Path {
                sector: sector.parse::<sector::Name>().unwrap(),
                location: "Planta".parse().unwrap(),
                level: 1,
                room: "Baño 1".parse().unwrap(),
            }),
        };

        let rows =
            group_bad_items(sums, vec![bad(mirrors, "Este"), bad(mirrors, "Oeste")]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].bad_items.len(), 2);
        assert_eq!(rows[0].percentages.bad, "75.0".parse().unwrap());
        assert!(rows[1].bad_items.is_empty());
        assert_eq!(rows[1].percentages.good, "100.0".parse().unwrap());
    }
}
