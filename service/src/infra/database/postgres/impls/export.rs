//! Export-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<Vec<read::export::LocationRow>, ()>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::export::LocationRow>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<read::export::LocationRow>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT l.id, l.name, s.name AS sector_name \
            FROM locations l \
            JOIN sectors s ON s.id = l.sector_id \
            ORDER BY s.name, l.name";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| read::export::LocationRow {
                id: row.get("id"),
                name: row.get("name"),
                sector_name: row.get("sector_name"),
            })
            .collect())
    }
}

impl<C> Database<Select<By<Vec<read::export::FloorRow>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::export::FloorRow>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<read::export::FloorRow>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, location_id, level \
            FROM floors \
            ORDER BY location_id, level";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| read::export::FloorRow {
                id: row.get("id"),
                location_id: row.get("location_id"),
                level: row.get("level"),
            })
            .collect())
    }
}

impl<C> Database<Select<By<Vec<read::export::RoomRow>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::export::RoomRow>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<read::export::RoomRow>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, floor_id, name \
            FROM rooms \
            ORDER BY floor_id, name";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| read::export::RoomRow {
                id: row.get("id"),
                floor_id: row.get("floor_id"),
                name: row.get("name"),
            })
            .collect())
    }
}

impl<C> Database<Select<By<Vec<read::export::ItemRow>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::export::ItemRow>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<read::export::ItemRow>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT i.room_id, o.name AS object_name, v.brand, v.material, \
                   i.quantity, i.status, i.detail, i.recorded_at \
            FROM items i \
            JOIN rooms r ON r.id = i.room_id \
            LEFT JOIN variants v ON v.id = i.variant_id \
            LEFT JOIN objects o ON o.id = v.object_id \
            ORDER BY r.id, i.recorded_at, i.id";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| read::export::ItemRow {
                room_id: row.get("room_id"),
                object_name: row.get("object_name"),
                brand: row.get("brand"),
                material: row.get("material"),
                quantity: row.get("quantity"),
                status: row.get("status"),
                detail: row.get("detail"),
                recorded_at: row.get("recorded_at"),
            })
            .collect())
    }
}
