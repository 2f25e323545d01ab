//! In-memory [`Database`] test double.
//!
//! Implements the same per-operation [`Database`] seam as the Postgres
//! client, staging every write of a transaction and applying it to the
//! shared state only on [`Commit`]. Dropping a transaction without
//! committing discards its writes, which is what lets the command tests
//! observe rollback behavior.

use std::sync::{Arc, Mutex, MutexGuard};

use common::operations::{
    By, Commit, Insert, Lock, Select, Transact, Update,
};
use tracerr::Traced;

use crate::{
    domain::{
        category, floor, item, location, object, room, room_kind, sector,
        variant, Category, Floor, Item, Location, Object, Room, RoomKind,
        Sector, TypicalObject, Variant,
    },
    infra::{database, postgres, Database},
    read,
};

/// Whole in-memory dataset.
#[derive(Clone, Debug, Default)]
struct State {
    sectors: Vec<Sector>,
    locations: Vec<Location>,
    floors: Vec<Floor>,
    room_kinds: Vec<RoomKind>,
    rooms: Vec<Room>,
    categories: Vec<Category>,
    objects: Vec<Object>,
    variants: Vec<Variant>,
    typical_objects: Vec<TypicalObject>,
    items: Vec<Item>,
    history: Vec<item::HistoryEntry>,
    fail_history_inserts: bool,
}

/// Replaces the row with the same ID, or appends the value.
macro_rules! upsert {
    ($rows:expr, $val:expr) => {{
        let rows = &mut $rows;
        let val = $val;
        if let Some(slot) = rows.iter_mut().find(|v| v.id == val.id) {
            *slot = val;
        } else {
            rows.push(val);
        }
    }};
}

/// In-memory [`Database`] handle.
#[derive(Clone, Debug, Default)]
pub(crate) struct MemDb(Arc<Mutex<State>>);

impl MemDb {
    fn state(&self) -> MutexGuard<'_, State> {
        self.0.lock().unwrap()
    }

    /// Makes every [`item::HistoryEntry`] insert fail from now on.
    pub(crate) fn fail_history_inserts(&self) {
        self.state().fail_history_inserts = true;
    }

    pub(crate) fn put_sector(&self, sector: Sector) {
        upsert!(self.state().sectors, sector);
    }

    pub(crate) fn put_room_kind(&self, kind: RoomKind) {
        upsert!(self.state().room_kinds, kind);
    }

    pub(crate) fn put_category(&self, category: Category) {
        upsert!(self.state().categories, category);
    }

    pub(crate) fn put_object(&self, object: Object) {
        upsert!(self.state().objects, object);
    }

    pub(crate) fn put_item(&self, item: Item) {
        upsert!(self.state().items, item);
    }

    pub(crate) fn item(&self, id: item::Id) -> Option<Item> {
        self.state().items.iter().find(|i| i.id == id).cloned()
    }

    pub(crate) fn object_by_name(&self, name: &object::Name) -> Option<Object> {
        self.state().objects.iter().find(|o| o.name == *name).cloned()
    }

    pub(crate) fn history(&self) -> Vec<item::HistoryEntry> {
        self.state().history.clone()
    }

    pub(crate) fn history_len(&self) -> usize {
        self.state().history.len()
    }

    pub(crate) fn sectors_len(&self) -> usize {
        self.state().sectors.len()
    }

    pub(crate) fn categories_len(&self) -> usize {
        self.state().categories.len()
    }

    pub(crate) fn items_len(&self) -> usize {
        self.state().items.len()
    }

    pub(crate) fn typical_objects_len(&self) -> usize {
        self.state().typical_objects.len()
    }
}

/// In-memory transaction: a staged copy of the dataset, applied back on
/// [`Commit`].
#[derive(Clone, Debug)]
pub(crate) struct MemTx {
    base: MemDb,
    staged: Arc<Mutex<State>>,
}

impl MemTx {
    fn staged(&self) -> MutexGuard<'_, State> {
        self.staged.lock().unwrap()
    }
}

/// Error every failing operation of the double reports.
fn closed_pool() -> Traced<database::Error> {
    tracerr::new!(database::Error::from(postgres::Error::PoolError(
        deadpool_postgres::PoolError::Closed,
    )))
}

/// Joins the active [`TypicalObject`]s of a [`RoomKind`] with their catalog
/// labels, in suggestion order.
fn typical_entries(
    state: &State,
    kind: room_kind::Id,
) -> Vec<read::typical::Entry> {
    let mut entries = state
        .typical_objects
        .iter()
        .filter(|t| t.room_kind_id == kind && t.active)
        .filter_map(|t| {
            let variant =
                state.variants.iter().find(|v| v.id == t.variant_id)?;
            let object =
                state.objects.iter().find(|o| o.id == variant.object_id)?;
            let category = state
                .categories
                .iter()
                .find(|c| c.id == object.category_id)?;
            Some(read::typical::Entry {
                id: t.id,
                position: t.position,
                active: t.active,
                category_id: category.id,
                category_name: category.name.clone(),
                object_id: object.id,
                object_name: object.name.clone(),
                variant_id: variant.id,
                brand: variant.brand.clone(),
                material: variant.material.clone(),
            })
        })
        .collect::<Vec<_>>();
    entries.sort_by_key(|e| {
        (e.position, e.category_name.to_string(), e.object_name.to_string())
    });
    entries
}

impl Database<Transact> for MemDb {
    type Ok = MemTx;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        let staged = self.state().clone();
        Ok(MemTx {
            base: self.clone(),
            staged: Arc::new(Mutex::new(staged)),
        })
    }
}

impl Database<Commit> for MemTx {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        *self.base.state() = self.staged().clone();
        Ok(())
    }
}

impl Database<Insert<Item>> for MemDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(item): Insert<Item>,
    ) -> Result<Self::Ok, Self::Err> {
        upsert!(self.state().items, item);
        Ok(())
    }
}

impl Database<Select<By<Option<RoomKind>, room_kind::Id>>> for MemDb {
    type Ok = Option<RoomKind>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<RoomKind>, room_kind::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.state().room_kinds.iter().find(|k| k.id == id).cloned())
    }
}

impl Database<Select<By<Vec<read::typical::Entry>, room_kind::Id>>> for MemDb {
    type Ok = Vec<read::typical::Entry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<read::typical::Entry>, room_kind::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(typical_entries(&self.state(), by.into_inner()))
    }
}

impl Database<Select<By<Vec<read::typical::Entry>, room_kind::Id>>> for MemTx {
    type Ok = Vec<read::typical::Entry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<read::typical::Entry>, room_kind::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(typical_entries(&self.staged(), by.into_inner()))
    }
}

impl Database<Insert<item::HistoryEntry>> for MemTx {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(entry): Insert<item::HistoryEntry>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut staged = self.staged();
        if staged.fail_history_inserts {
            return Err(closed_pool());
        }
        staged.history.push(entry);
        Ok(())
    }
}

/// Implements a no-op [`Lock`] for the provided key.
macro_rules! mem_lock {
    ($entity:ty, $key:ty) => {
        impl Database<Lock<By<$entity, $key>>> for MemTx {
            type Ok = ();
            type Err = Traced<database::Error>;

            async fn execute(
                &self,
                _: Lock<By<$entity, $key>>,
            ) -> Result<Self::Ok, Self::Err> {
                Ok(())
            }
        }
    };
}

mem_lock!(Sector, sector::Name);
mem_lock!(Location, location::Name);
mem_lock!(Floor, (location::Id, floor::Level));
mem_lock!(RoomKind, room_kind::Name);
mem_lock!(Category, category::Name);
mem_lock!(Object, object::Name);
mem_lock!(Variant, (object::Id, variant::Spec));
mem_lock!(Item, item::Id);
mem_lock!(TypicalObject, room_kind::Id);

/// Implements staged [`Insert`]/[`Update`] upserts for the provided entity.
macro_rules! mem_write {
    ($entity:ty, $rows:ident) => {
        impl Database<Insert<$entity>> for MemTx {
            type Ok = ();
            type Err = Traced<database::Error>;

            async fn execute(
                &self,
                Insert(val): Insert<$entity>,
            ) -> Result<Self::Ok, Self::Err> {
                upsert!(self.staged().$rows, val);
                Ok(())
            }
        }

        impl Database<Update<$entity>> for MemTx {
            type Ok = ();
            type Err = Traced<database::Error>;

            async fn execute(
                &self,
                Update(val): Update<$entity>,
            ) -> Result<Self::Ok, Self::Err> {
                upsert!(self.staged().$rows, val);
                Ok(())
            }
        }
    };
}

mem_write!(Sector, sectors);
mem_write!(Location, locations);
mem_write!(Floor, floors);
mem_write!(RoomKind, room_kinds);
mem_write!(Room, rooms);
mem_write!(Category, categories);
mem_write!(Object, objects);
mem_write!(Variant, variants);
mem_write!(TypicalObject, typical_objects);
mem_write!(Item, items);

/// Implements a staged [`Select`] of an optional row by a key.
macro_rules! mem_select {
    ($entity:ty, $rows:ident, $key:ty, $matches:expr) => {
        impl Database<Select<By<Option<$entity>, $key>>> for MemTx {
            type Ok = Option<$entity>;
            type Err = Traced<database::Error>;

            async fn execute(
                &self,
                Select(by): Select<By<Option<$entity>, $key>>,
            ) -> Result<Self::Ok, Self::Err> {
                let key = by.into_inner();
                let matches: fn(&$entity, &$key) -> bool = $matches;
                Ok(self
                    .staged()
                    .$rows
                    .iter()
                    .find(|row| matches(row, &key))
                    .cloned())
            }
        }
    };
}

mem_select!(Sector, sectors, sector::Id, |s, id| s.id == *id);
mem_select!(Sector, sectors, sector::Name, |s, name| s.name == *name);
mem_select!(Location, locations, location::Id, |l, id| l.id == *id);
mem_select!(Location, locations, location::Name, |l, name| l.name == *name);
mem_select!(Floor, floors, floor::Id, |f, id| f.id == *id);
mem_select!(Floor, floors, (location::Id, floor::Level), |f, key| {
    f.location_id == key.0 && f.level == key.1
});
mem_select!(RoomKind, room_kinds, room_kind::Id, |k, id| k.id == *id);
mem_select!(RoomKind, room_kinds, room_kind::Name, |k, name| {
    k.name == *name
});
mem_select!(Room, rooms, room::Id, |r, id| r.id == *id);
mem_select!(Category, categories, category::Id, |c, id| c.id == *id);
mem_select!(Category, categories, category::Name, |c, name| {
    c.name == *name
});
mem_select!(Object, objects, object::Id, |o, id| o.id == *id);
mem_select!(Object, objects, object::Name, |o, name| o.name == *name);
mem_select!(Variant, variants, variant::Id, |v, id| v.id == *id);
mem_select!(Variant, variants, (object::Id, variant::Spec), |v, key| {
    v.object_id == key.0 && v.spec() == key.1
});
mem_select!(Item, items, item::Id, |i, id| i.id == *id);
mem_select!(
    TypicalObject,
    typical_objects,
    (room_kind::Id, variant::Id),
    |t, key| t.room_kind_id == key.0 && t.variant_id == key.1
);
