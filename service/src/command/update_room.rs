//! [`Command`] for updating a [`Room`].

use common::operations::{By, Commit, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{floor, room, room_kind, Room},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for editing a [`Room`]: its name, floor or kind.
#[derive(Clone, Debug)]
pub struct UpdateRoom {
    /// ID of the [`Room`] to update.
    pub room_id: room::Id,

    /// New [`room::Name`] of the [`Room`].
    pub name: room::Name,

    /// New [`Floor`] of the [`Room`].
    ///
    /// [`Floor`]: crate::domain::Floor
    pub floor_id: floor::Id,

    /// New [`RoomKind`] of the [`Room`].
    ///
    /// [`RoomKind`]: crate::domain::RoomKind
    pub kind_id: room_kind::Id,
}

impl<Db> Command<UpdateRoom> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Room>, room::Id>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        > + Database<Update<Room>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Room;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateRoom) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateRoom {
            room_id,
            name,
            floor_id,
            kind_id,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut room = tx
            .execute(Select(By::<Option<Room>, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomNotExists(room_id))
            .map_err(tracerr::wrap!())?;
        if room.name == name
            && room.floor_id == floor_id
            && room.kind_id == kind_id
        {
            return Ok(room);
        }

        room.name = name;
        room.floor_id = floor_id;
        room.kind_id = kind_id;
        tx.execute(Update(room.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(room)
    }
}

/// Error of [`UpdateRoom`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Room`] doesn't exist.
    #[display("`Room(id: {_0})` does not exist")]
    #[from(ignore)]
    RoomNotExists(#[error(not(source))] room::Id),
}
