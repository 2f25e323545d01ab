//! [`TypicalObject`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{room_kind, typical_object, variant, TypicalObject},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<Vec<read::typical::Entry>, room_kind::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::typical::Entry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<read::typical::Entry>, room_kind::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let room_kind_id = by.into_inner();

        const SQL: &str = "\
            SELECT t.id, t.position, t.active, \
                   c.id AS category_id, c.name AS category_name, \
                   o.id AS object_id, o.name AS object_name, \
                   v.id AS variant_id, v.brand, v.material \
            FROM typical_objects t \
            JOIN variants v ON v.id = t.variant_id \
            JOIN objects o ON o.id = v.object_id \
            JOIN categories c ON c.id = o.category_id \
            WHERE t.room_kind_id = $1::UUID \
              AND t.active \
            ORDER BY t.position, c.name, o.name, v.brand, v.material";
        Ok(self
            .query(SQL, &[&room_kind_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| read::typical::Entry {
                id: row.get("id"),
                position: row.get("position"),
                active: row.get("active"),
                category_id: row.get("category_id"),
                category_name: row.get("category_name"),
                object_id: row.get("object_id"),
                object_name: row.get("object_name"),
                variant_id: row.get("variant_id"),
                brand: row.get("brand"),
                material: row.get("material"),
            })
            .collect())
    }
}

impl<C>
    Database<Select<By<Option<TypicalObject>, (room_kind::Id, variant::Id)>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<TypicalObject>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Option<TypicalObject>, (room_kind::Id, variant::Id)>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let (room_kind_id, variant_id) = by.into_inner();

        const SQL: &str = "\
            SELECT id, room_kind_id, variant_id, active, position \
            FROM typical_objects \
            WHERE room_kind_id = $1::UUID \
              AND variant_id = $2::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&room_kind_id, &variant_id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| TypicalObject {
                id: row.get("id"),
                room_kind_id: row.get("room_kind_id"),
                variant_id: row.get("variant_id"),
                active: row.get("active"),
                position: row.get("position"),
            }))
    }
}

impl<C> Database<Insert<TypicalObject>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<TypicalObject>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(typical): Insert<TypicalObject>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(typical))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<TypicalObject>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(typical): Update<TypicalObject>,
    ) -> Result<Self::Ok, Self::Err> {
        let TypicalObject {
            id,
            room_kind_id,
            variant_id,
            active,
            position,
        } = typical;

        const SQL: &str = "\
            INSERT INTO typical_objects (\
                id, room_kind_id, variant_id, active, position\
            ) \
            VALUES ($1::UUID, $2::UUID, $3::UUID, $4::BOOL, $5::INT2) \
            ON CONFLICT (id) DO UPDATE \
            SET active = EXCLUDED.active, \
                position = EXCLUDED.position";
        self.exec(SQL, &[&id, &room_kind_id, &variant_id, &active, &position])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<TypicalObject, room_kind::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<TypicalObject, room_kind::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let room_kind_id: room_kind::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO typical_objects_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (room_kind_id) DO NOTHING";
        self.query(SQL, &[&room_kind_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<TypicalObject, typical_object::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<TypicalObject, typical_object::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM typical_objects \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|affected| affected > 0)
    }
}
