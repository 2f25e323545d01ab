//! [`Location`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{location, sector, Location},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Location>, location::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Location>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Location>, location::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, sector_id \
            FROM locations \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Location {
                id: row.get("id"),
                name: row.get("name"),
                sector_id: row.get("sector_id"),
            }))
    }
}

impl<C> Database<Select<By<Option<Location>, location::Name>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Location>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Location>, location::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        let name = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, sector_id \
            FROM locations \
            WHERE name = $1::VARCHAR \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&name])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Location {
                id: row.get("id"),
                name: row.get("name"),
                sector_id: row.get("sector_id"),
            }))
    }
}

impl<C> Database<Select<By<Vec<Location>, Option<sector::Id>>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Location>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Location>, Option<sector::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sector_id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, sector_id \
            FROM locations \
            WHERE $1::UUID IS NULL OR sector_id = $1::UUID \
            ORDER BY name";
        Ok(self
            .query(SQL, &[&sector_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Location {
                id: row.get("id"),
                name: row.get("name"),
                sector_id: row.get("sector_id"),
            })
            .collect())
    }
}

impl<C> Database<Insert<Location>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Location>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(location): Insert<Location>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(location))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Location>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(location): Update<Location>,
    ) -> Result<Self::Ok, Self::Err> {
        let Location {
            id,
            name,
            sector_id,
        } = location;

        const SQL: &str = "\
            INSERT INTO locations (id, name, sector_id) \
            VALUES ($1::UUID, $2::VARCHAR, $3::UUID) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                sector_id = EXCLUDED.sector_id";
        self.exec(SQL, &[&id, &name, &sector_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Location, location::Name>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Location, location::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let name: location::Name = by.into_inner();

        const SQL: &str = "\
            INSERT INTO locations_lock \
            VALUES ($1::VARCHAR) \
            ON CONFLICT (name) DO NOTHING";
        self.query(SQL, &[&name])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Location, location::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Location, location::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM locations \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|affected| affected > 0)
    }
}
