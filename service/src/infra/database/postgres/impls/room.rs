//! [`Room`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{floor, room, Room},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Room>, room::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Room>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Room>, room::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, floor_id, kind_id \
            FROM rooms \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Room {
                id: row.get("id"),
                name: row.get("name"),
                floor_id: row.get("floor_id"),
                kind_id: row.get("kind_id"),
            }))
    }
}

impl<C> Database<Select<By<Vec<Room>, floor::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Room>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Room>, floor::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let floor_id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, floor_id, kind_id \
            FROM rooms \
            WHERE floor_id = $1::UUID \
            ORDER BY name";
        Ok(self
            .query(SQL, &[&floor_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Room {
                id: row.get("id"),
                name: row.get("name"),
                floor_id: row.get("floor_id"),
                kind_id: row.get("kind_id"),
            })
            .collect())
    }
}

impl<C> Database<Insert<Room>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Room>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(room): Insert<Room>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(room)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Room>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(room): Update<Room>,
    ) -> Result<Self::Ok, Self::Err> {
        let Room {
            id,
            name,
            floor_id,
            kind_id,
        } = room;

        const SQL: &str = "\
            INSERT INTO rooms (id, name, floor_id, kind_id) \
            VALUES ($1::UUID, $2::VARCHAR, $3::UUID, $4::UUID) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                floor_id = EXCLUDED.floor_id, \
                kind_id = EXCLUDED.kind_id";
        self.exec(SQL, &[&id, &name, &floor_id, &kind_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Room, room::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Room, room::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM rooms \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|affected| affected > 0)
    }
}
