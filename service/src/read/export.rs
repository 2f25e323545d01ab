//! Inventory-export read definitions.
//!
//! The export walks the whole hierarchy one location at a time, keeping
//! floors and rooms that have nothing registered yet, since the rendered
//! workbook shows them explicitly.

use std::collections::HashMap;

use crate::domain::{floor, item, location, object, room, sector, variant};
#[cfg(doc)]
use crate::domain::{Floor, Item, Location, Object, Room, Sector, Variant};

/// [`Location`] of the export skeleton, with its [`Sector`] label.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocationRow {
    /// ID of the [`Location`].
    pub id: location::Id,

    /// Name of the [`Location`].
    pub name: location::Name,

    /// Name of the [`Sector`] the [`Location`] belongs to.
    pub sector_name: sector::Name,
}

/// [`Floor`] of the export skeleton.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FloorRow {
    /// ID of the [`Floor`].
    pub id: floor::Id,

    /// ID of the [`Location`] the [`Floor`] belongs to.
    pub location_id: location::Id,

    /// Level of the [`Floor`].
    pub level: floor::Level,
}

/// [`Room`] of the export skeleton.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoomRow {
    /// ID of the [`Room`].
    pub id: room::Id,

    /// ID of the [`Floor`] the [`Room`] is on.
    pub floor_id: floor::Id,

    /// Name of the [`Room`].
    pub name: room::Name,
}

/// Exported [`Item`] with its catalog labels.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemRow {
    /// ID of the [`Room`] the [`Item`] is placed in.
    pub room_id: room::Id,

    /// Name of the [`Object`] the [`Item`] is an instance of, if known.
    pub object_name: Option<object::Name>,

    /// Brand of the [`Item`]'s [`Variant`], if any.
    pub brand: Option<variant::Brand>,

    /// Material of the [`Item`]'s [`Variant`], if any.
    pub material: Option<variant::Material>,

    /// Quantity of the [`Item`].
    pub quantity: item::Quantity,

    /// Condition [`item::Status`] of the [`Item`].
    pub status: item::Status,

    /// Detail of the [`Item`].
    pub detail: item::Detail,

    /// When the [`Item`] was recorded.
    pub recorded_at: item::RecordedDateTime,
}

/// One [`Location`] of the export: the source of one worksheet.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocationSheet {
    /// ID of the [`Location`].
    pub location_id: location::Id,

    /// Name of the [`Location`].
    pub location_name: location::Name,

    /// Name of the [`Sector`] the [`Location`] belongs to.
    pub sector_name: sector::Name,

    /// [`FloorBlock`]s of the [`Location`], by level.
    pub floors: Vec<FloorBlock>,
}

/// One [`Floor`] of a [`LocationSheet`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FloorBlock {
    /// Level of the [`Floor`].
    pub level: floor::Level,

    /// [`RoomBlock`]s of the [`Floor`], by name.
    pub rooms: Vec<RoomBlock>,
}

/// One [`Room`] of a [`FloorBlock`], with its registered [`ItemRow`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoomBlock {
    /// Name of the [`Room`].
    pub name: room::Name,

    /// [`ItemRow`]s registered in the [`Room`], possibly none.
    pub items: Vec<ItemRow>,
}

/// Stitches the flat export rows into the location → floor → room → item
/// tree, preserving the order of every input.
///
/// Locations without floors and rooms without items stay in the tree as
/// empty blocks.
#[must_use]
pub fn assemble(
    locations: Vec<LocationRow>,
    floors: Vec<FloorRow>,
    rooms: Vec<RoomRow>,
    items: Vec<ItemRow>,
) -> Vec<LocationSheet> {
    let mut items_by_room: HashMap<room::Id, Vec<ItemRow>> = HashMap::new();
    for item in items {
        items_by_room.entry(item.room_id).or_default().push(item);
    }

    let mut rooms_by_floor: HashMap<floor::Id, Vec<RoomBlock>> =
        HashMap::new();
    for room in rooms {
        let block = RoomBlock {
            items: items_by_room.remove(&room.id).unwrap_or_default(),
            name: room.name,
        };
        rooms_by_floor.entry(room.floor_id).or_default().push(block);
    }

    let mut floors_by_location: HashMap<location::Id, Vec<FloorBlock>> =
        HashMap::new();
    for floor in floors {
        let block = FloorBlock {
            level: floor.level,
            rooms: rooms_by_floor.remove(&floor.id).unwrap_or_default(),
        };
        floors_by_location
            .entry(floor.location_id)
            .or_default()
            .push(block);
    }

    locations
        .into_iter()
        .map(|location| LocationSheet {
            floors: floors_by_location
                .remove(&location.id)
                .unwrap_or_default(),
            location_id: location.id,
            location_name: location.name,
            sector_name: location.sector_name,
        })
        .collect()
}

#[cfg(test)]
mod spec {
    use crate::domain::{floor, item, location, room};

    use super::{assemble, FloorRow, ItemRow, LocationRow, RoomRow};

    fn location(name: &str) -> LocationRow {
        LocationRow {
            id: location::Id::new(),
            name: name.parse().unwrap(),
            sector_name: "Este".parse().unwrap(),
        }
    }

    fn item(room_id: room::Id) -> ItemRow {
        ItemRow {
            room_id,
            object_name: Some("Mesas".parse().unwrap()),
            brand: None,
            material: None,
            quantity: 2,
            status: item::Status::Good,
            detail: item::Detail::default(),
            recorded_at: common::DateTime::UNIX_EPOCH.coerce(),
        }
    }

    #[test]
    fn keeps_empty_locations_floors_and_rooms() {
        let occupied = location("Planta A");
        let vacant = location("Planta B");
        let ground = FloorRow {
            id: floor::Id::new(),
            location_id: occupied.id,
            level: 0,
        };
        let office = RoomRow {
            id: room::Id::new(),
            floor_id: ground.id,
            name: "Oficina".parse().unwrap(),
        };
        let storage = RoomRow {
            id: room::Id::new(),
            floor_id: ground.id,
            name: "Bodega".parse().unwrap(),
        };

        let sheets = assemble(
            vec![occupied.clone(), vacant.clone()],
            vec![ground],
            vec![office.clone(), storage.clone()],
            vec![item(office.id)],
        );

        assert_eq!(sheets.len(), 2);

        let first = &sheets[0];
        assert_eq!(first.location_id, occupied.id);
        assert_eq!(first.floors.len(), 1);
        assert_eq!(first.floors[0].rooms.len(), 2);
        assert_eq!(first.floors[0].rooms[0].name, office.name);
        assert_eq!(first.floors[0].rooms[0].items.len(), 1);
        assert!(first.floors[0].rooms[1].items.is_empty());

        let second = &sheets[1];
        assert_eq!(second.location_id, vacant.id);
        assert!(second.floors.is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let loc = location("Planta");
        let upper = FloorRow {
            id: floor::Id::new(),
            location_id: loc.id,
            level: 1,
        };
        let lower = FloorRow {
            id: floor::Id::new(),
            location_id: loc.id,
            level: -1,
        };

        let sheets =
            assemble(vec![loc], vec![lower, upper], vec![], vec![]);

        let levels = sheets[0]
            .floors
            .iter()
            .map(|f| f.level)
            .collect::<Vec<_>>();
        assert_eq!(levels, vec![-1, 1]);
    }
}
