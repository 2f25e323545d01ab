//! Inventory-export definitions.
//!
//! Shapes the export tree into per-location worksheet layouts with valid,
//! unique titles. Rendering the actual workbook file is left to the
//! consumer.

use common::DateTime;
use juniper::graphql_object;
use service::read;

use crate::{api, Context};

/// Characters a worksheet title cannot contain.
const FORBIDDEN: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];

/// Maximum length of a worksheet title, in characters.
const MAX_TITLE_LEN: usize = 31;

/// Builds the worksheet layouts of the provided export tree, one per
/// location, titled `"<sector> - <location>"` with forbidden characters
/// stripped, length bounded and duplicates suffixed with `(2)`-style
/// counters.
#[must_use]
pub fn worksheets(
    sheets: Vec<read::export::LocationSheet>,
) -> Vec<Worksheet> {
    let mut titles = Vec::with_capacity(sheets.len());
    sheets
        .into_iter()
        .map(|sheet| {
            let base =
                format!("{} - {}", sheet.sector_name, sheet.location_name);
            let title = unique_title(&base, &titles);
            titles.push(title.clone());
            Worksheet { title, sheet }
        })
        .collect()
}

/// Strips forbidden characters from the provided `name`, collapses
/// whitespace and bounds the length to [`MAX_TITLE_LEN`] characters.
fn safe_title(name: &str) -> String {
    let cleaned = name
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { ' ' } else { c })
        .collect::<String>();
    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_TITLE_LEN)
        .collect()
}

/// Returns a [`safe_title`] of the provided `name` not present in `taken`,
/// appending a `(2)`-style counter when the plain one is occupied.
fn unique_title(name: &str, taken: &[String]) -> String {
    let title = safe_title(name);
    if !taken.contains(&title) {
        return title;
    }
    let mut i = 2;
    loop {
        let suffix = format!("({i})");
        let cut = MAX_TITLE_LEN - suffix.chars().count();
        let candidate = safe_title(
            &(title.chars().take(cut).collect::<String>() + suffix.as_str()),
        );
        if !taken.contains(&candidate) {
            return candidate;
        }
        i += 1;
    }
}

/// One worksheet of the inventory export workbook: a location with its
/// floors, rooms and items.
#[derive(Clone, Debug)]
pub struct Worksheet {
    /// Title of this [`Worksheet`], valid and unique within the workbook.
    title: String,

    /// Underlying export tree of the location.
    sheet: read::export::LocationSheet,
}

/// One worksheet of the inventory export workbook.
#[graphql_object(context = Context)]
impl Worksheet {
    /// Title of this `Worksheet`, valid and unique within the workbook.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// `Location` this `Worksheet` lays out.
    #[must_use]
    pub fn location(&self) -> api::Location {
        #[expect(
            unsafe_code,
            reason = "export rows are read from existing `Location`s"
        )]
        unsafe {
            api::Location::new_unchecked(self.sheet.location_id)
        }
    }

    /// Name of the `Location`.
    #[must_use]
    pub fn location_name(&self) -> api::location::Name {
        self.sheet.location_name.clone().into()
    }

    /// Name of the `Sector` the `Location` belongs to.
    #[must_use]
    pub fn sector_name(&self) -> api::sector::Name {
        self.sheet.sector_name.clone().into()
    }

    /// Floor blocks of this `Worksheet`, by level, kept even when empty.
    #[must_use]
    pub fn floors(&self) -> Vec<WorksheetFloor> {
        self.sheet.floors.iter().cloned().map(WorksheetFloor).collect()
    }
}

/// One floor block of a `Worksheet`.
#[derive(Clone, Debug)]
pub struct WorksheetFloor(read::export::FloorBlock);

/// One floor block of a `Worksheet`.
#[graphql_object(context = Context)]
impl WorksheetFloor {
    /// Storey number of the floor.
    #[must_use]
    pub fn level(&self) -> i32 {
        self.0.level.into()
    }

    /// Room blocks of the floor, by name, kept even when empty.
    #[must_use]
    pub fn rooms(&self) -> Vec<WorksheetRoom> {
        self.0.rooms.iter().cloned().map(WorksheetRoom).collect()
    }
}

/// One room block of a `Worksheet`.
#[derive(Clone, Debug)]
pub struct WorksheetRoom(read::export::RoomBlock);

/// One room block of a `Worksheet`.
#[graphql_object(context = Context)]
impl WorksheetRoom {
    /// Name of the room.
    #[must_use]
    pub fn name(&self) -> api::room::Name {
        self.0.name.clone().into()
    }

    /// Items registered in the room, possibly none.
    #[must_use]
    pub fn items(&self) -> Vec<WorksheetItem> {
        self.0.items.iter().cloned().map(WorksheetItem).collect()
    }
}

/// One item row of a `Worksheet` room block.
#[derive(Clone, Debug)]
pub struct WorksheetItem(read::export::ItemRow);

/// One item row of a `Worksheet` room block.
#[graphql_object(context = Context)]
impl WorksheetItem {
    /// Name of the `Object` the item is an instance of, if known.
    #[must_use]
    pub fn object_name(&self) -> Option<api::object::Name> {
        self.0.object_name.clone().map(Into::into)
    }

    /// Brand of the item's `Variant`, if any.
    #[must_use]
    pub fn brand(&self) -> Option<api::variant::Brand> {
        self.0.brand.clone().map(Into::into)
    }

    /// Material of the item's `Variant`, if any.
    #[must_use]
    pub fn material(&self) -> Option<api::variant::Material> {
        self.0.material.clone().map(Into::into)
    }

    /// Quantity of the item.
    #[must_use]
    pub fn quantity(&self) -> i32 {
        self.0.quantity.into()
    }

    /// Condition status of the item.
    #[must_use]
    pub fn status(&self) -> api::item::Status {
        self.0.status.into()
    }

    /// Detail of the item.
    #[must_use]
    pub fn detail(&self) -> api::item::Detail {
        self.0.detail.clone().into()
    }

    /// `DateTime` when the item was recorded.
    #[must_use]
    pub fn recorded_at(&self) -> DateTime {
        self.0.recorded_at.coerce()
    }
}

#[cfg(test)]
mod spec {
    use super::{safe_title, unique_title};

    #[test]
    fn title_strips_forbidden_characters() {
        assert_eq!(safe_title("Este - Planta A"), "Este - Planta A");
        assert_eq!(safe_title("Este: Planta/2?"), "Este Planta 2");
        assert_eq!(safe_title("  doubled   spaces  "), "doubled spaces");
    }

    #[test]
    fn title_is_bounded_to_31_characters() {
        let long = "Sector con un nombre larguísimo - Planta";
        let title = safe_title(long);
        assert_eq!(title.chars().count(), 31);
    }

    #[test]
    fn duplicate_titles_get_counted_suffixes() {
        let first = unique_title("Este - Planta", &[]);
        assert_eq!(first, "Este - Planta");

        let second = unique_title("Este - Planta", &[first.clone()]);
        assert_eq!(second, "Este - Planta(2)");

        let third = unique_title("Este - Planta", &[first, second]);
        assert_eq!(third, "Este - Planta(3)");
    }

    #[test]
    fn suffix_fits_within_the_length_bound() {
        let long = "L".repeat(40);
        let first = unique_title(&long, &[]);
        let second = unique_title(&long, std::slice::from_ref(&first));
        assert_eq!(second.chars().count(), 31);
        assert!(second.ends_with("(2)"));
        assert_ne!(first, second);
    }
}
