//! [`Command`] for creating a new [`Sector`].

use common::operations::{By, Commit, Insert, Lock, Select, Transact, Transacted};
use tracerr::Traced;

use crate::{
    domain::{sector, Sector},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Sector`].
///
/// Returns the existing [`Sector`] if one with the same name already exists.
#[derive(Clone, Debug)]
pub struct CreateSector {
    /// [`sector::Name`] of the new [`Sector`].
    pub name: sector::Name,
}

impl<Db> Command<CreateSector> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Sector>, sector::Name>>,
            Ok = Option<Sector>,
            Err = Traced<database::Error>,
        > + Database<Insert<Sector>, Err = Traced<database::Error>>
        + Database<Lock<By<Sector, sector::Name>>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Sector;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateSector) -> Result<Self::Ok, Self::Err> {
        let CreateSector { name } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::wrap!())?;

        // Avoid concurrent creation of the same `Sector`.
        tx.execute(Lock(By::new(name.clone())))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<Sector>, _>::new(name.clone())))
            .await
            .map_err(tracerr::wrap!())?;
        if let Some(sector) = existing {
            // `Sector` with the same name already exists.
            return Ok(sector);
        }

        let sector = Sector {
            id: sector::Id::new(),
            name,
        };
        tx.execute(Insert(sector.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(sector)
    }
}

/// Error of [`CreateSector`] [`Command`] execution.
pub type ExecutionError = database::Error;
