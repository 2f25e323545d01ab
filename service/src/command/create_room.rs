//! [`Command`] for creating a new [`Room`].

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::{floor, room, room_kind, Room},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Room`].
///
/// [`Room`] names are not unique, so every execution creates a fresh row.
#[derive(Clone, Debug)]
pub struct CreateRoom {
    /// [`room::Name`] of the new [`Room`].
    pub name: room::Name,

    /// ID of the [`Floor`] the new [`Room`] is on.
    ///
    /// [`Floor`]: crate::domain::Floor
    pub floor_id: floor::Id,

    /// ID of the [`RoomKind`] the new [`Room`] is classified as.
    ///
    /// [`RoomKind`]: crate::domain::RoomKind
    pub kind_id: room_kind::Id,
}

impl<Db> Command<CreateRoom> for Service<Db>
where
    Db: Database<Insert<Room>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Room;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateRoom) -> Result<Self::Ok, Self::Err> {
        let CreateRoom {
            name,
            floor_id,
            kind_id,
        } = cmd;

        let room = Room {
            id: room::Id::new(),
            name,
            floor_id,
            kind_id,
        };

        self.database()
            .execute(Insert(room.clone()))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(room)
    }
}

/// Error of [`CreateRoom`] [`Command`] execution.
pub type ExecutionError = database::Error;
