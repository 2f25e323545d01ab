//! [`Command`] for creating a new [`RoomKind`].

use common::operations::{By, Commit, Insert, Lock, Select, Transact, Transacted};
use tracerr::Traced;

use crate::{
    domain::{room_kind, RoomKind},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`RoomKind`].
///
/// Returns the existing [`RoomKind`] if one with the same name already
/// exists.
#[derive(Clone, Debug)]
pub struct CreateRoomKind {
    /// [`room_kind::Name`] of the new [`RoomKind`].
    pub name: room_kind::Name,
}

impl<Db> Command<CreateRoomKind> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<RoomKind>, room_kind::Name>>,
            Ok = Option<RoomKind>,
            Err = Traced<database::Error>,
        > + Database<Insert<RoomKind>, Err = Traced<database::Error>>
        + Database<
            Lock<By<RoomKind, room_kind::Name>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = RoomKind;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateRoomKind,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateRoomKind { name } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::wrap!())?;

        // Avoid concurrent creation of the same `RoomKind`.
        tx.execute(Lock(By::new(name.clone())))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<RoomKind>, _>::new(name.clone())))
            .await
            .map_err(tracerr::wrap!())?;
        if let Some(kind) = existing {
            // `RoomKind` with the same name already exists.
            return Ok(kind);
        }

        let kind = RoomKind {
            id: room_kind::Id::new(),
            name,
        };
        tx.execute(Insert(kind.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(kind)
    }
}

/// Error of [`CreateRoomKind`] [`Command`] execution.
pub type ExecutionError = database::Error;
