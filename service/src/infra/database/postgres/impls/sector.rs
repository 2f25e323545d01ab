//! [`Sector`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{sector, Sector},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Sector>, sector::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Sector>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Sector>, sector::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name \
            FROM sectors \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Sector {
                id: row.get("id"),
                name: row.get("name"),
            }))
    }
}

impl<C> Database<Select<By<Option<Sector>, sector::Name>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Sector>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Sector>, sector::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        let name = by.into_inner();

        const SQL: &str = "\
            SELECT id, name \
            FROM sectors \
            WHERE name = $1::VARCHAR \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&name])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Sector {
                id: row.get("id"),
                name: row.get("name"),
            }))
    }
}

impl<C> Database<Select<By<Vec<Sector>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Sector>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<Sector>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name \
            FROM sectors \
            ORDER BY name";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Sector {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }
}

impl<C> Database<Insert<Sector>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Sector>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(sector): Insert<Sector>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(sector)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Sector>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(sector): Update<Sector>,
    ) -> Result<Self::Ok, Self::Err> {
        let Sector { id, name } = sector;

        const SQL: &str = "\
            INSERT INTO sectors (id, name) \
            VALUES ($1::UUID, $2::VARCHAR) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name";
        self.exec(SQL, &[&id, &name])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Sector, sector::Name>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Sector, sector::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let name: sector::Name = by.into_inner();

        const SQL: &str = "\
            INSERT INTO sectors_lock \
            VALUES ($1::VARCHAR) \
            ON CONFLICT (name) DO NOTHING";
        self.query(SQL, &[&name])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Sector, sector::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Sector, sector::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM sectors \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|affected| affected > 0)
    }
}
