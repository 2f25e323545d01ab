//! [`Floor`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{floor, location, Floor},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Floor>, floor::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Floor>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Floor>, floor::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, level, location_id \
            FROM floors \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Floor {
                id: row.get("id"),
                level: row.get("level"),
                location_id: row.get("location_id"),
            }))
    }
}

impl<C> Database<Select<By<Option<Floor>, (location::Id, floor::Level)>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Floor>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Floor>, (location::Id, floor::Level)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (location_id, level) = by.into_inner();

        const SQL: &str = "\
            SELECT id, level, location_id \
            FROM floors \
            WHERE location_id = $1::UUID \
              AND level = $2::INT2 \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&location_id, &level])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Floor {
                id: row.get("id"),
                level: row.get("level"),
                location_id: row.get("location_id"),
            }))
    }
}

impl<C> Database<Select<By<Vec<Floor>, location::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Floor>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Floor>, location::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let location_id = by.into_inner();

        const SQL: &str = "\
            SELECT id, level, location_id \
            FROM floors \
            WHERE location_id = $1::UUID \
            ORDER BY level";
        Ok(self
            .query(SQL, &[&location_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Floor {
                id: row.get("id"),
                level: row.get("level"),
                location_id: row.get("location_id"),
            })
            .collect())
    }
}

impl<C> Database<Insert<Floor>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Floor>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(floor): Insert<Floor>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(floor)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Floor>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(floor): Update<Floor>,
    ) -> Result<Self::Ok, Self::Err> {
        let Floor {
            id,
            level,
            location_id,
        } = floor;

        const SQL: &str = "\
            INSERT INTO floors (id, level, location_id) \
            VALUES ($1::UUID, $2::INT2, $3::UUID) \
            ON CONFLICT (id) DO UPDATE \
            SET level = EXCLUDED.level, \
                location_id = EXCLUDED.location_id";
        self.exec(SQL, &[&id, &level, &location_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Floor, (location::Id, floor::Level)>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Floor, (location::Id, floor::Level)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (location_id, level) = by.into_inner();

        const SQL: &str = "\
            INSERT INTO floors_lock \
            VALUES ($1::UUID, $2::INT2) \
            ON CONFLICT (location_id, level) DO NOTHING";
        self.query(SQL, &[&location_id, &level])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Floor, floor::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Floor, floor::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM floors \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|affected| affected > 0)
    }
}
