//! [`Object`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{category, object, Object},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Object>, object::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Object>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Object>, object::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, category_id \
            FROM objects \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Object {
                id: row.get("id"),
                name: row.get("name"),
                category_id: row.get("category_id"),
            }))
    }
}

impl<C> Database<Select<By<Option<Object>, object::Name>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Object>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Object>, object::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        let name = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, category_id \
            FROM objects \
            WHERE name = $1::VARCHAR \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&name])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Object {
                id: row.get("id"),
                name: row.get("name"),
                category_id: row.get("category_id"),
            }))
    }
}

impl<C> Database<Select<By<Vec<Object>, Option<category::Id>>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Object>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Object>, Option<category::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let category_id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, category_id \
            FROM objects \
            WHERE $1::UUID IS NULL OR category_id = $1::UUID \
            ORDER BY name";
        Ok(self
            .query(SQL, &[&category_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Object {
                id: row.get("id"),
                name: row.get("name"),
                category_id: row.get("category_id"),
            })
            .collect())
    }
}

impl<C> Database<Insert<Object>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Object>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(object): Insert<Object>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(object)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Object>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(object): Update<Object>,
    ) -> Result<Self::Ok, Self::Err> {
        let Object {
            id,
            name,
            category_id,
        } = object;

        const SQL: &str = "\
            INSERT INTO objects (id, name, category_id) \
            VALUES ($1::UUID, $2::VARCHAR, $3::UUID) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                category_id = EXCLUDED.category_id";
        self.exec(SQL, &[&id, &name, &category_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Object, object::Name>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Object, object::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let name: object::Name = by.into_inner();

        const SQL: &str = "\
            INSERT INTO objects_lock \
            VALUES ($1::VARCHAR) \
            ON CONFLICT (name) DO NOTHING";
        self.query(SQL, &[&name])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Object, object::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Object, object::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM objects \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|affected| affected > 0)
    }
}
