//! Report-related [`Database`] implementations.

use common::operations::{By, Select};
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::item::Status,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

use super::item::conditions;

/// Aggregate `SELECT` list summing quantities per [`Status`], expecting the
/// three statuses bound as `$1`..`$3`.
const SUMS: &str = "\
    SUM(i.quantity)::INT4 AS total, \
    COALESCE(SUM(i.quantity) FILTER (WHERE i.status = $1::INT2), 0)::INT4 \
        AS good, \
    COALESCE(SUM(i.quantity) FILTER (WHERE i.status = $2::INT2), 0)::INT4 \
        AS pending, \
    COALESCE(SUM(i.quantity) FILTER (WHERE i.status = $3::INT2), 0)::INT4 \
        AS bad";

/// Extracts the [`read::report::Sums`] columns of the provided row.
fn sums_from_row(row: &tokio_postgres::Row) -> read::report::Sums {
    read::report::Sums {
        total: row.get("total"),
        good: row.get("good"),
        pending: row.get("pending"),
        bad: row.get("bad"),
    }
}

impl<C>
    Database<Select<By<Vec<read::report::SectorSums>, read::item::list::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::report::SectorSums>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<read::report::SectorSums>, read::item::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> =
            vec![&Status::Good, &Status::Pending, &Status::Bad];
        // Items without a room join to no sector, so the room chain is inner.
        let sql = format!(
            "SELECT s.id, s.name, {SUMS} \
             FROM items i \
             JOIN rooms r ON r.id = i.room_id \
             JOIN floors f ON f.id = r.floor_id \
             JOIN locations l ON l.id = f.location_id \
             JOIN sectors s ON s.id = l.sector_id \
             LEFT JOIN variants v ON v.id = i.variant_id \
             LEFT JOIN objects o ON o.id = v.object_id \
             LEFT JOIN categories c ON c.id = o.category_id \
             WHERE TRUE{filtering} \
             GROUP BY s.id, s.name \
             ORDER BY s.name",
            filtering = conditions(&filter, &mut ps),
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| read::report::SectorSums {
                id: row.get("id"),
                name: row.get("name"),
                sums: sums_from_row(row),
            })
            .collect())
    }
}

impl<C>
    Database<
        Select<By<Vec<read::report::LocationSums>, read::item::list::Filter>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::report::LocationSums>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<read::report::LocationSums>, read::item::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> =
            vec![&Status::Good, &Status::Pending, &Status::Bad];
        let sql = format!(
            "SELECT l.id, l.name, s.name AS sector_name, {SUMS} \
             FROM items i \
             JOIN rooms r ON r.id = i.room_id \
             JOIN floors f ON f.id = r.floor_id \
             JOIN locations l ON l.id = f.location_id \
             JOIN sectors s ON s.id = l.sector_id \
             LEFT JOIN variants v ON v.id = i.variant_id \
             LEFT JOIN objects o ON o.id = v.object_id \
             LEFT JOIN categories c ON c.id = o.category_id \
             WHERE TRUE{filtering} \
             GROUP BY l.id, l.name, s.name \
             ORDER BY s.name, l.name",
            filtering = conditions(&filter, &mut ps),
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| read::report::LocationSums {
                id: row.get("id"),
                name: row.get("name"),
                sector_name: row.get("sector_name"),
                sums: sums_from_row(row),
            })
            .collect())
    }
}

impl<C>
    Database<Select<By<Vec<read::report::ObjectSums>, read::item::list::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::report::ObjectSums>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<read::report::ObjectSums>, read::item::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> =
            vec![&Status::Good, &Status::Pending, &Status::Bad];
        // Items without a variant have no object to group under, so the
        // catalog chain is inner; unassigned rooms still count.
        let sql = format!(
            "SELECT o.id, o.name, {SUMS} \
             FROM items i \
             JOIN variants v ON v.id = i.variant_id \
             JOIN objects o ON o.id = v.object_id \
             JOIN categories c ON c.id = o.category_id \
             LEFT JOIN rooms r ON r.id = i.room_id \
             LEFT JOIN floors f ON f.id = r.floor_id \
             LEFT JOIN locations l ON l.id = f.location_id \
             LEFT JOIN sectors s ON s.id = l.sector_id \
             WHERE TRUE{filtering} \
             GROUP BY o.id, o.name \
             ORDER BY o.name",
            filtering = conditions(&filter, &mut ps),
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| read::report::ObjectSums {
                id: row.get("id"),
                name: row.get("name"),
                sums: sums_from_row(row),
            })
            .collect())
    }
}

impl<C>
    Database<Select<By<Vec<read::report::BadItem>, read::item::list::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::report::BadItem>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<read::report::BadItem>, read::item::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&Status::Bad];
        let sql = format!(
            "SELECT i.id, i.quantity, i.detail, i.recorded_at, \
                    o.id AS object_id, o.name AS object_name, \
                    v.brand, v.material, \
                    s.name AS sector_name, l.name AS location_name, \
                    f.level, r.name AS room_name \
             FROM items i \
             JOIN variants v ON v.id = i.variant_id \
             JOIN objects o ON o.id = v.object_id \
             JOIN categories c ON c.id = o.category_id \
             LEFT JOIN rooms r ON r.id = i.room_id \
             LEFT JOIN floors f ON f.id = r.floor_id \
             LEFT JOIN locations l ON l.id = f.location_id \
             LEFT JOIN sectors s ON s.id = l.sector_id \
             WHERE i.status = $1::INT2{filtering} \
             ORDER BY o.name, s.name, l.name, f.level, r.name",
            filtering = conditions(&filter, &mut ps),
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| {
                let path = row
                    .get::<_, Option<crate::domain::room::Name>>("room_name")
                    .map(|room| read::report::Path {
                        sector: row.get("sector_name"),
                        location: row.get("location_name"),
                        level: row.get("level"),
                        room,
                    });
                read::report::BadItem {
                    id: row.get("id"),
                    object_id: row.get("object_id"),
                    object_name: row.get("object_name"),
                    brand: row.get("brand"),
                    material: row.get("material"),
                    quantity: row.get("quantity"),
                    detail: row.get("detail"),
                    recorded_at: row.get("recorded_at"),
                    path,
                }
            })
            .collect())
    }
}
