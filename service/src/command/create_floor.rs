//! [`Command`] for creating a new [`Floor`].

use common::operations::{By, Commit, Insert, Lock, Select, Transact, Transacted};
use tracerr::Traced;

use crate::{
    domain::{floor, location, Floor},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Floor`].
///
/// Returns the existing [`Floor`] if the [`Location`] already has one on the
/// same level.
///
/// [`Location`]: crate::domain::Location
#[derive(Clone, Copy, Debug)]
pub struct CreateFloor {
    /// [`floor::Level`] of the new [`Floor`].
    pub level: floor::Level,

    /// ID of the [`Location`] the new [`Floor`] belongs to.
    ///
    /// [`Location`]: crate::domain::Location
    pub location_id: location::Id,
}

impl<Db> Command<CreateFloor> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Floor>, (location::Id, floor::Level)>>,
            Ok = Option<Floor>,
            Err = Traced<database::Error>,
        > + Database<Insert<Floor>, Err = Traced<database::Error>>
        + Database<
            Lock<By<Floor, (location::Id, floor::Level)>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Floor;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateFloor) -> Result<Self::Ok, Self::Err> {
        let CreateFloor { level, location_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::wrap!())?;

        // Avoid concurrent creation of the same `Floor`.
        tx.execute(Lock(By::new((location_id, level))))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<Floor>, _>::new((location_id, level))))
            .await
            .map_err(tracerr::wrap!())?;
        if let Some(floor) = existing {
            // `Floor` on the same level already exists.
            return Ok(floor);
        }

        let floor = Floor {
            id: floor::Id::new(),
            level,
            location_id,
        };
        tx.execute(Insert(floor))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(floor)
    }
}

/// Error of [`CreateFloor`] [`Command`] execution.
pub type ExecutionError = database::Error;
