//! [`Export`] query definition.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] producing the full inventory tree for the workbook export: every
/// location with its floors, rooms and items, ordered sector by sector.
#[derive(Clone, Copy, Debug, Default)]
pub struct Export;

impl<Db> Query<Export> for Service<Db>
where
    Db: Database<
            Select<By<Vec<read::export::LocationRow>, ()>>,
            Ok = Vec<read::export::LocationRow>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<read::export::FloorRow>, ()>>,
            Ok = Vec<read::export::FloorRow>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<read::export::RoomRow>, ()>>,
            Ok = Vec<read::export::RoomRow>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<read::export::ItemRow>, ()>>,
            Ok = Vec<read::export::ItemRow>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Vec<read::export::LocationSheet>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Export) -> Result<Self::Ok, Self::Err> {
        let locations = self
            .database()
            .execute(Select(By::<Vec<read::export::LocationRow>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        let floors = self
            .database()
            .execute(Select(By::<Vec<read::export::FloorRow>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        let rooms = self
            .database()
            .execute(Select(By::<Vec<read::export::RoomRow>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        let items = self
            .database()
            .execute(Select(By::<Vec<read::export::ItemRow>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(read::export::assemble(locations, floors, rooms, items))
    }
}
