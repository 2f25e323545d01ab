//! [`Command`] for updating a [`Floor`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{floor, location, Floor},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for changing the level of a [`Floor`] and/or moving it to
/// another [`Location`].
///
/// [`Location`]: crate::domain::Location
#[derive(Clone, Copy, Debug)]
pub struct UpdateFloor {
    /// ID of the [`Floor`] to update.
    pub floor_id: floor::Id,

    /// New [`floor::Level`] of the [`Floor`].
    pub level: floor::Level,

    /// New [`Location`] of the [`Floor`].
    ///
    /// [`Location`]: crate::domain::Location
    pub location_id: location::Id,
}

impl<Db> Command<UpdateFloor> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Floor>, floor::Id>>,
            Ok = Option<Floor>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Floor>, (location::Id, floor::Level)>>,
            Ok = Option<Floor>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Floor, (location::Id, floor::Level)>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Floor>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Floor;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateFloor) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateFloor {
            floor_id,
            level,
            location_id,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent creation of a `Floor` with the new key.
        tx.execute(Lock(By::new((location_id, level))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let occupant = tx
            .execute(Select(By::<Option<Floor>, _>::new((location_id, level))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if occupant.is_some_and(|f| f.id != floor_id) {
            return Err(tracerr::new!(E::LevelOccupied(level)));
        }

        let mut floor = tx
            .execute(Select(By::<Option<Floor>, floor::Id>::new(floor_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::FloorNotExists(floor_id))
            .map_err(tracerr::wrap!())?;
        if floor.level == level && floor.location_id == location_id {
            return Ok(floor);
        }

        floor.level = level;
        floor.location_id = location_id;
        tx.execute(Update(floor))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(floor)
    }
}

/// Error of [`UpdateFloor`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// The [`Location`] already has a [`Floor`] on the new level.
    ///
    /// [`Location`]: crate::domain::Location
    #[display("`Floor(level: {_0})` already exists in the `Location`")]
    #[from(ignore)]
    LevelOccupied(#[error(not(source))] floor::Level),

    /// [`Floor`] doesn't exist.
    #[display("`Floor(id: {_0})` does not exist")]
    #[from(ignore)]
    FloorNotExists(#[error(not(source))] floor::Id),
}
