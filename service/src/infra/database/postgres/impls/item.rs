//! [`Item`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{item, Item},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Appends an indexed `AND` condition per present [`Filter`] field to the
/// `WHERE` clause, pushing its parameter into `ps`.
///
/// Relies on the table aliases shared by every filtered query: `i` items,
/// `r` rooms, `f` floors, `l` locations, `s` sectors, `v` variants,
/// `o` objects, `c` categories.
///
/// [`Filter`]: read::item::list::Filter
pub(super) fn conditions<'f>(
    filter: &'f read::item::list::Filter,
    ps: &mut Vec<&'f (dyn ToSql + Sync)>,
) -> String {
    let mut sql = String::new();
    if let Some(id) = &filter.sector {
        ps.push(id);
        sql.push_str(&format!(" AND s.id = ${}::UUID", ps.len()));
    }
    if let Some(id) = &filter.location {
        ps.push(id);
        sql.push_str(&format!(" AND l.id = ${}::UUID", ps.len()));
    }
    if let Some(id) = &filter.floor {
        ps.push(id);
        sql.push_str(&format!(" AND f.id = ${}::UUID", ps.len()));
    }
    if let Some(id) = &filter.room_kind {
        ps.push(id);
        sql.push_str(&format!(" AND r.kind_id = ${}::UUID", ps.len()));
    }
    if let Some(id) = &filter.room {
        ps.push(id);
        sql.push_str(&format!(" AND r.id = ${}::UUID", ps.len()));
    }
    if let Some(id) = &filter.category {
        ps.push(id);
        sql.push_str(&format!(" AND c.id = ${}::UUID", ps.len()));
    }
    if let Some(id) = &filter.object {
        ps.push(id);
        sql.push_str(&format!(" AND o.id = ${}::UUID", ps.len()));
    }
    if let Some(id) = &filter.variant {
        ps.push(id);
        sql.push_str(&format!(" AND v.id = ${}::UUID", ps.len()));
    }
    if let Some(status) = &filter.status {
        ps.push(status);
        sql.push_str(&format!(" AND i.status = ${}::INT2", ps.len()));
    }
    if let Some(brand) = &filter.brand {
        ps.push(brand);
        sql.push_str(&format!(" AND v.brand = ${}::VARCHAR", ps.len()));
    }
    if let Some(material) = &filter.material {
        ps.push(material);
        sql.push_str(&format!(" AND v.material = ${}::VARCHAR", ps.len()));
    }
    sql
}

/// `FROM` clause joining an [`Item`] to its whole location path and catalog
/// entry, with every [`Filter`] alias bound.
///
/// [`Filter`]: read::item::list::Filter
const FILTERED_FROM: &str = "\
    FROM items i \
    LEFT JOIN rooms r ON r.id = i.room_id \
    LEFT JOIN floors f ON f.id = r.floor_id \
    LEFT JOIN locations l ON l.id = f.location_id \
    LEFT JOIN sectors s ON s.id = l.sector_id \
    LEFT JOIN variants v ON v.id = i.variant_id \
    LEFT JOIN objects o ON o.id = v.object_id \
    LEFT JOIN categories c ON c.id = o.category_id";

/// Converts a [`tokio_postgres::Row`] into an [`Item`], expecting the
/// `items` columns under their own names.
fn item_from_row(row: &tokio_postgres::Row) -> Item {
    Item {
        id: row.get("id"),
        room_id: row.get("room_id"),
        variant_id: row.get("variant_id"),
        quantity: row.get("quantity"),
        status: row.get("status"),
        detail: row.get("detail"),
        recorded_at: row.get("recorded_at"),
    }
}

impl<C> Database<Select<By<Option<Item>, item::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Item>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Item>, item::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, room_id, variant_id, \
                   quantity, status, detail, recorded_at \
            FROM items \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| item_from_row(&row)))
    }
}

impl<C> Database<Select<By<Vec<Item>, read::item::list::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Item>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Item>, read::item::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];
        let sql = format!(
            "SELECT i.id, i.room_id, i.variant_id, \
                    i.quantity, i.status, i.detail, i.recorded_at \
             {FILTERED_FROM} \
             WHERE TRUE{filtering} \
             ORDER BY l.name, f.level, r.name, o.name",
            filtering = conditions(&filter, &mut ps),
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(item_from_row)
            .collect())
    }
}

impl<C> Database<Insert<Item>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Item>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(item): Insert<Item>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(item)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Item>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(item): Update<Item>,
    ) -> Result<Self::Ok, Self::Err> {
        let Item {
            id,
            room_id,
            variant_id,
            quantity,
            status,
            detail,
            recorded_at,
        } = item;

        const SQL: &str = "\
            INSERT INTO items (\
                id, room_id, variant_id, \
                quantity, status, detail, recorded_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, \
                $4::INT2, $5::INT2, $6::VARCHAR, $7::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET room_id = EXCLUDED.room_id, \
                variant_id = EXCLUDED.variant_id, \
                quantity = EXCLUDED.quantity, \
                status = EXCLUDED.status, \
                detail = EXCLUDED.detail, \
                recorded_at = EXCLUDED.recorded_at";
        self.exec(
            SQL,
            &[
                &id,
                &room_id,
                &variant_id,
                &quantity,
                &status,
                &detail,
                &recorded_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Item, item::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Item, item::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: item::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO items_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Item, item::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Item, item::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM items \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|affected| affected > 0)
    }
}

/// Converts a [`tokio_postgres::Row`] into an [`item::HistoryEntry`].
fn history_from_row(row: &tokio_postgres::Row) -> item::HistoryEntry {
    item::HistoryEntry {
        id: row.get("id"),
        item_id: row.get("item_id"),
        quantity: row.get("quantity"),
        status: row.get("status"),
        detail: row.get("detail"),
        recorded_at: row.get("recorded_at"),
    }
}

impl<C> Database<Insert<item::HistoryEntry>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(entry): Insert<item::HistoryEntry>,
    ) -> Result<Self::Ok, Self::Err> {
        let item::HistoryEntry {
            id,
            item_id,
            quantity,
            status,
            detail,
            recorded_at,
        } = entry;

        const SQL: &str = "\
            INSERT INTO item_history (\
                id, item_id, quantity, status, detail, recorded_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, \
                $3::INT2, $4::INT2, $5::VARCHAR, $6::TIMESTAMPTZ\
            )";
        self.exec(SQL, &[&id, &item_id, &quantity, &status, &detail, &recorded_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Vec<item::HistoryEntry>, item::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<item::HistoryEntry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<item::HistoryEntry>, item::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let item_id = by.into_inner();

        const SQL: &str = "\
            SELECT id, item_id, quantity, status, detail, recorded_at \
            FROM item_history \
            WHERE item_id = $1::UUID \
            ORDER BY recorded_at DESC";
        Ok(self
            .query(SQL, &[&item_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(history_from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<item::HistoryEntry>, read::history::list::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<item::HistoryEntry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<item::HistoryEntry>, read::history::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];
        let mut filtering = String::new();
        if let Some(id) = &filter.room {
            ps.push(id);
            filtering.push_str(&format!(" AND i.room_id = ${}::UUID", ps.len()));
        }
        if let Some(id) = &filter.object {
            ps.push(id);
            filtering.push_str(&format!(" AND o.id = ${}::UUID", ps.len()));
        }
        if let Some(id) = &filter.variant {
            ps.push(id);
            filtering.push_str(&format!(" AND v.id = ${}::UUID", ps.len()));
        }
        if let Some(status) = &filter.status {
            ps.push(status);
            filtering.push_str(&format!(" AND h.status = ${}::INT2", ps.len()));
        }

        let sql = format!(
            "SELECT h.id, h.item_id, \
                    h.quantity, h.status, h.detail, h.recorded_at \
             FROM item_history h \
             JOIN items i ON i.id = h.item_id \
             LEFT JOIN rooms r ON r.id = i.room_id \
             LEFT JOIN floors f ON f.id = r.floor_id \
             LEFT JOIN locations l ON l.id = f.location_id \
             LEFT JOIN variants v ON v.id = i.variant_id \
             LEFT JOIN objects o ON o.id = v.object_id \
             WHERE TRUE{filtering} \
             ORDER BY h.recorded_at DESC, l.name, f.level, r.name",
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(history_from_row)
            .collect())
    }
}
