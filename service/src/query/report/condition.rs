//! [`Condition`] report definition.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] producing the condition report over the [`Item`]s matching a
/// [`read::item::list::Filter`].
///
/// Always recomputed from the current persisted state, never cached.
///
/// [`Item`]: crate::domain::Item
#[derive(Clone, Debug, Default)]
pub struct Condition {
    /// [`read::item::list::Filter`] narrowing the reported [`Item`]s.
    ///
    /// [`Item`]: crate::domain::Item
    pub filter: read::item::list::Filter,
}

/// Output of the [`Condition`] [`Query`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Sums and percentages per sector, ordered by sector name.
    ///
    /// [`Item`]s placed in no room contribute to no sector.
    ///
    /// [`Item`]: crate::domain::Item
    pub by_sector: Vec<SectorRow>,

    /// Sums and percentages per location, ordered by (sector, location)
    /// name.
    pub by_location: Vec<LocationRow>,

    /// Sums, percentages and bad [`Item`]s per object, ordered by object
    /// name.
    ///
    /// [`Item`]: crate::domain::Item
    pub by_object: Vec<read::report::ObjectRow>,
}

/// Row of the by-sector report table.
#[derive(Clone, Debug)]
pub struct SectorRow {
    /// [`read::report::Sums`] of the group, with its identity.
    pub sums: read::report::SectorSums,

    /// Derived [`read::report::Percentages`] of the group.
    pub percentages: read::report::Percentages,
}

/// Row of the by-location report table.
#[derive(Clone, Debug)]
pub struct LocationRow {
    /// [`read::report::Sums`] of the group, with its identity.
    pub sums: read::report::LocationSums,

    /// Derived [`read::report::Percentages`] of the group.
    pub percentages: read::report::Percentages,
}

impl<Db> Query<Condition> for Service<Db>
where
    Db: Database<
            Select<
                By<Vec<read::report::SectorSums>, read::item::list::Filter>,
            >,
            Ok = Vec<read::report::SectorSums>,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<Vec<read::report::LocationSums>, read::item::list::Filter>,
            >,
            Ok = Vec<read::report::LocationSums>,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<Vec<read::report::ObjectSums>, read::item::list::Filter>,
            >,
            Ok = Vec<read::report::ObjectSums>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<read::report::BadItem>, read::item::list::Filter>>,
            Ok = Vec<read::report::BadItem>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Condition { filter }: Condition,
    ) -> Result<Self::Ok, Self::Err> {
        let by_sector = self
            .database()
            .execute(Select(By::<Vec<read::report::SectorSums>, _>::new(
                filter.clone(),
            )))
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|sums| SectorRow {
                percentages: sums.sums.percentages(),
                sums,
            })
            .collect();

        let by_location = self
            .database()
            .execute(Select(By::<Vec<read::report::LocationSums>, _>::new(
                filter.clone(),
            )))
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|sums| LocationRow {
                percentages: sums.sums.percentages(),
                sums,
            })
            .collect();

        let object_sums = self
            .database()
            .execute(Select(By::<Vec<read::report::ObjectSums>, _>::new(
                filter.clone(),
            )))
            .await
            .map_err(tracerr::wrap!())?;
        let bad_items = self
            .database()
            .execute(Select(By::<Vec<read::report::BadItem>, _>::new(filter)))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(Output {
            by_sector,
            by_location,
            by_object: read::report::group_bad_items(object_sums, bad_items),
        })
    }
}
