//! [`Command`] for updating a [`Location`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{location, sector, Location},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for renaming a [`Location`] and/or moving it to another
/// [`Sector`].
///
/// [`Sector`]: crate::domain::Sector
#[derive(Clone, Debug)]
pub struct UpdateLocation {
    /// ID of the [`Location`] to update.
    pub location_id: location::Id,

    /// New [`location::Name`] of the [`Location`].
    pub name: location::Name,

    /// New [`Sector`] of the [`Location`].
    ///
    /// [`Sector`]: crate::domain::Sector
    pub sector_id: sector::Id,
}

impl<Db> Command<UpdateLocation> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Location>, location::Id>>,
            Ok = Option<Location>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Location>, location::Name>>,
            Ok = Option<Location>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Location, location::Name>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Location>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Location;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateLocation,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateLocation {
            location_id,
            name,
            sector_id,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent creation of a `Location` with the new name.
        tx.execute(Lock(By::new(name.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let occupant = tx
            .execute(Select(By::<Option<Location>, location::Name>::new(
                name.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if occupant.as_ref().is_some_and(|l| l.id != location_id) {
            return Err(tracerr::new!(E::NameOccupied(name)));
        }

        let mut location = tx
            .execute(Select(By::<Option<Location>, location::Id>::new(
                location_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::LocationNotExists(location_id))
            .map_err(tracerr::wrap!())?;
        if location.name == name && location.sector_id == sector_id {
            return Ok(location);
        }

        location.name = name;
        location.sector_id = sector_id;
        tx.execute(Update(location.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(location)
    }
}

/// Error of [`UpdateLocation`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`location::Name`] is occupied by another [`Location`].
    #[display("`Location(name: {_0})` already exists")]
    #[from(ignore)]
    NameOccupied(#[error(not(source))] location::Name),

    /// [`Location`] doesn't exist.
    #[display("`Location(id: {_0})` does not exist")]
    #[from(ignore)]
    LocationNotExists(#[error(not(source))] location::Id),
}
