//! [`Command`] for creating a new [`Location`].

use common::operations::{By, Commit, Insert, Lock, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{location, sector, Location},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Location`].
///
/// Returns the existing [`Location`] if one with the same name already exists
/// in the same [`Sector`].
///
/// [`Sector`]: crate::domain::Sector
#[derive(Clone, Debug)]
pub struct CreateLocation {
    /// [`location::Name`] of the new [`Location`].
    pub name: location::Name,

    /// ID of the [`Sector`] the new [`Location`] belongs to.
    ///
    /// [`Sector`]: crate::domain::Sector
    pub sector_id: sector::Id,
}

impl<Db> Command<CreateLocation> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Location>, location::Name>>,
            Ok = Option<Location>,
            Err = Traced<database::Error>,
        > + Database<Insert<Location>, Err = Traced<database::Error>>
        + Database<
            Lock<By<Location, location::Name>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Location;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateLocation,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateLocation { name, sector_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent creation of the same `Location`.
        tx.execute(Lock(By::new(name.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<Location>, _>::new(name.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if let Some(location) = existing {
            return if location.sector_id == sector_id {
                Ok(location)
            } else {
                // Names are unique across all `Sector`s.
                Err(tracerr::new!(E::NameOccupied(location.name)))
            };
        }

        let location = Location {
            id: location::Id::new(),
            name,
            sector_id,
        };
        tx.execute(Insert(location.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(location)
    }
}

/// Error of [`CreateLocation`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`location::Name`] is occupied by a [`Location`] of another
    /// [`Sector`].
    ///
    /// [`Sector`]: crate::domain::Sector
    #[display("`Location(name: {_0})` already exists in another `Sector`")]
    #[from(ignore)]
    NameOccupied(#[error(not(source))] location::Name),
}
