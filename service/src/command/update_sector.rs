//! [`Command`] for updating a [`Sector`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{sector, Sector},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for renaming a [`Sector`].
#[derive(Clone, Debug)]
pub struct UpdateSector {
    /// ID of the [`Sector`] to update.
    pub sector_id: sector::Id,

    /// New [`sector::Name`] of the [`Sector`].
    pub name: sector::Name,
}

impl<Db> Command<UpdateSector> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Sector>, sector::Id>>,
            Ok = Option<Sector>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Sector>, sector::Name>>,
            Ok = Option<Sector>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Sector, sector::Name>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Sector>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Sector;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateSector) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateSector { sector_id, name } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent creation of a `Sector` with the new name.
        tx.execute(Lock(By::new(name.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let occupant = tx
            .execute(Select(By::<Option<Sector>, sector::Name>::new(
                name.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if occupant.as_ref().is_some_and(|s| s.id != sector_id) {
            return Err(tracerr::new!(E::NameOccupied(name)));
        }

        let mut sector = tx
            .execute(Select(By::<Option<Sector>, sector::Id>::new(sector_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::SectorNotExists(sector_id))
            .map_err(tracerr::wrap!())?;
        if sector.name == name {
            return Ok(sector);
        }

        sector.name = name;
        tx.execute(Update(sector.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(sector)
    }
}

/// Error of [`UpdateSector`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`sector::Name`] is occupied by another [`Sector`].
    #[display("`Sector(name: {_0})` already exists")]
    #[from(ignore)]
    NameOccupied(#[error(not(source))] sector::Name),

    /// [`Sector`] doesn't exist.
    #[display("`Sector(id: {_0})` does not exist")]
    #[from(ignore)]
    SectorNotExists(#[error(not(source))] sector::Id),
}
