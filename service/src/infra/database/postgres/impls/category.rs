//! [`Category`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{category, Category},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Category>, category::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Category>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Category>, category::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name \
            FROM categories \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Category {
                id: row.get("id"),
                name: row.get("name"),
            }))
    }
}

impl<C> Database<Select<By<Option<Category>, category::Name>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Category>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Category>, category::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        let name = by.into_inner();

        const SQL: &str = "\
            SELECT id, name \
            FROM categories \
            WHERE name = $1::VARCHAR \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&name])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Category {
                id: row.get("id"),
                name: row.get("name"),
            }))
    }
}

impl<C> Database<Select<By<Vec<Category>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Category>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<Category>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name \
            FROM categories \
            ORDER BY name";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Category {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }
}

impl<C> Database<Insert<Category>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Category>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(category): Insert<Category>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(category))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Category>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(category): Update<Category>,
    ) -> Result<Self::Ok, Self::Err> {
        let Category { id, name } = category;

        const SQL: &str = "\
            INSERT INTO categories (id, name) \
            VALUES ($1::UUID, $2::VARCHAR) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name";
        self.exec(SQL, &[&id, &name])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Category, category::Name>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Category, category::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let name: category::Name = by.into_inner();

        const SQL: &str = "\
            INSERT INTO categories_lock \
            VALUES ($1::VARCHAR) \
            ON CONFLICT (name) DO NOTHING";
        self.query(SQL, &[&name])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Category, category::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Category, category::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM categories \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|affected| affected > 0)
    }
}
