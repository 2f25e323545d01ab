//! [`RoomKind`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{room_kind, RoomKind},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<RoomKind>, room_kind::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<RoomKind>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<RoomKind>, room_kind::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name \
            FROM room_kinds \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| RoomKind {
                id: row.get("id"),
                name: row.get("name"),
            }))
    }
}

impl<C> Database<Select<By<Option<RoomKind>, room_kind::Name>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<RoomKind>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<RoomKind>, room_kind::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        let name = by.into_inner();

        const SQL: &str = "\
            SELECT id, name \
            FROM room_kinds \
            WHERE name = $1::VARCHAR \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&name])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| RoomKind {
                id: row.get("id"),
                name: row.get("name"),
            }))
    }
}

impl<C> Database<Select<By<Vec<RoomKind>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<RoomKind>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<RoomKind>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name \
            FROM room_kinds \
            ORDER BY name";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| RoomKind {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }
}

impl<C> Database<Insert<RoomKind>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<RoomKind>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(kind): Insert<RoomKind>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(kind)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<RoomKind>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(kind): Update<RoomKind>,
    ) -> Result<Self::Ok, Self::Err> {
        let RoomKind { id, name } = kind;

        const SQL: &str = "\
            INSERT INTO room_kinds (id, name) \
            VALUES ($1::UUID, $2::VARCHAR) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name";
        self.exec(SQL, &[&id, &name])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<RoomKind, room_kind::Name>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<RoomKind, room_kind::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let name: room_kind::Name = by.into_inner();

        const SQL: &str = "\
            INSERT INTO room_kinds_lock \
            VALUES ($1::VARCHAR) \
            ON CONFLICT (name) DO NOTHING";
        self.query(SQL, &[&name])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<RoomKind, room_kind::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<RoomKind, room_kind::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM room_kinds \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|affected| affected > 0)
    }
}
