//! [`Command`] for updating a [`RoomKind`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{room_kind, RoomKind},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for renaming a [`RoomKind`].
#[derive(Clone, Debug)]
pub struct UpdateRoomKind {
    /// ID of the [`RoomKind`] to update.
    pub room_kind_id: room_kind::Id,

    /// New [`room_kind::Name`] of the [`RoomKind`].
    pub name: room_kind::Name,
}

impl<Db> Command<UpdateRoomKind> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<RoomKind>, room_kind::Id>>,
            Ok = Option<RoomKind>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<RoomKind>, room_kind::Name>>,
            Ok = Option<RoomKind>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<RoomKind, room_kind::Name>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<RoomKind>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = RoomKind;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateRoomKind,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateRoomKind { room_kind_id, name } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent creation of a `RoomKind` with the new name.
        tx.execute(Lock(By::new(name.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let occupant = tx
            .execute(Select(By::<Option<RoomKind>, room_kind::Name>::new(
                name.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if occupant.as_ref().is_some_and(|k| k.id != room_kind_id) {
            return Err(tracerr::new!(E::NameOccupied(name)));
        }

        let mut kind = tx
            .execute(Select(By::<Option<RoomKind>, room_kind::Id>::new(
                room_kind_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomKindNotExists(room_kind_id))
            .map_err(tracerr::wrap!())?;
        if kind.name == name {
            return Ok(kind);
        }

        kind.name = name;
        tx.execute(Update(kind.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(kind)
    }
}

/// Error of [`UpdateRoomKind`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`room_kind::Name`] is occupied by another [`RoomKind`].
    #[display("`RoomKind(name: {_0})` already exists")]
    #[from(ignore)]
    NameOccupied(#[error(not(source))] room_kind::Name),

    /// [`RoomKind`] doesn't exist.
    #[display("`RoomKind(id: {_0})` does not exist")]
    #[from(ignore)]
    RoomKindNotExists(#[error(not(source))] room_kind::Id),
}
