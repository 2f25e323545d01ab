//! [`Variant`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{object, variant, Variant},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Variant>, variant::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Variant>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Variant>, variant::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, object_id, brand, material \
            FROM variants \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Variant {
                id: row.get("id"),
                object_id: row.get("object_id"),
                brand: row.get("brand"),
                material: row.get("material"),
            }))
    }
}

impl<C> Database<Select<By<Option<Variant>, (object::Id, variant::Spec)>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Variant>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Variant>, (object::Id, variant::Spec)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (object_id, variant::Spec { brand, material }) = by.into_inner();

        const SQL: &str = "\
            SELECT id, object_id, brand, material \
            FROM variants \
            WHERE object_id = $1::UUID \
              AND brand IS NOT DISTINCT FROM $2::VARCHAR \
              AND material IS NOT DISTINCT FROM $3::VARCHAR \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&object_id, &brand, &material])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Variant {
                id: row.get("id"),
                object_id: row.get("object_id"),
                brand: row.get("brand"),
                material: row.get("material"),
            }))
    }
}

impl<C> Database<Select<By<Vec<Variant>, object::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Variant>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Variant>, object::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let object_id = by.into_inner();

        const SQL: &str = "\
            SELECT id, object_id, brand, material \
            FROM variants \
            WHERE object_id = $1::UUID \
            ORDER BY brand, material";
        Ok(self
            .query(SQL, &[&object_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Variant {
                id: row.get("id"),
                object_id: row.get("object_id"),
                brand: row.get("brand"),
                material: row.get("material"),
            })
            .collect())
    }
}

impl<C> Database<Insert<Variant>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Variant>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(variant): Insert<Variant>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(variant))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Variant>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(variant): Update<Variant>,
    ) -> Result<Self::Ok, Self::Err> {
        let Variant {
            id,
            object_id,
            brand,
            material,
        } = variant;

        const SQL: &str = "\
            INSERT INTO variants (id, object_id, brand, material) \
            VALUES ($1::UUID, $2::UUID, $3::VARCHAR, $4::VARCHAR) \
            ON CONFLICT (id) DO UPDATE \
            SET object_id = EXCLUDED.object_id, \
                brand = EXCLUDED.brand, \
                material = EXCLUDED.material";
        self.exec(SQL, &[&id, &object_id, &brand, &material])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Variant, (object::Id, variant::Spec)>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Variant, (object::Id, variant::Spec)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (object_id, spec) = by.into_inner();

        // The lock table cannot hold NULLs in its key, so an absent
        // brand/material locks as the empty string.
        let brand = spec.brand.as_ref().map_or_else(String::new, ToString::to_string);
        let material = spec.material.as_ref().map_or_else(String::new, ToString::to_string);

        const SQL: &str = "\
            INSERT INTO variants_lock \
            VALUES ($1::UUID, $2::VARCHAR, $3::VARCHAR) \
            ON CONFLICT (object_id, brand, material) DO NOTHING";
        self.query(SQL, &[&object_id, &brand, &material])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Variant, variant::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Variant, variant::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM variants \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|affected| affected > 0)
    }
}
