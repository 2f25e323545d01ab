//! [`Command`] for creating a new [`TypicalObject`].

use common::operations::{By, Commit, Insert, Lock, Select, Transact, Transacted};
use tracerr::Traced;

use crate::{
    domain::{room_kind, typical_object, variant, TypicalObject},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for marking a [`Variant`] as typical for a [`RoomKind`].
///
/// Returns the existing association if the pair is already marked.
///
/// [`RoomKind`]: crate::domain::RoomKind
/// [`Variant`]: crate::domain::Variant
#[derive(Clone, Copy, Debug)]
pub struct CreateTypicalObject {
    /// ID of the [`RoomKind`] to mark the [`Variant`] as typical for.
    ///
    /// [`RoomKind`]: crate::domain::RoomKind
    /// [`Variant`]: crate::domain::Variant
    pub room_kind_id: room_kind::Id,

    /// ID of the [`Variant`] to mark.
    ///
    /// [`Variant`]: crate::domain::Variant
    pub variant_id: variant::Id,

    /// Display [`typical_object::Position`] of the new association.
    pub position: typical_object::Position,
}

impl<Db> Command<CreateTypicalObject> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<TypicalObject>, (room_kind::Id, variant::Id)>>,
            Ok = Option<TypicalObject>,
            Err = Traced<database::Error>,
        > + Database<Insert<TypicalObject>, Err = Traced<database::Error>>
        + Database<
            Lock<By<TypicalObject, room_kind::Id>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = TypicalObject;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateTypicalObject,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateTypicalObject {
            room_kind_id,
            variant_id,
            position,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::wrap!())?;

        // Avoid concurrent edits of the same `RoomKind` suggestion list.
        tx.execute(Lock(By::new(room_kind_id)))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<TypicalObject>, _>::new((
                room_kind_id,
                variant_id,
            ))))
            .await
            .map_err(tracerr::wrap!())?;
        if let Some(typical) = existing {
            // The pair is already marked as typical.
            return Ok(typical);
        }

        let typical = TypicalObject {
            id: typical_object::Id::new(),
            room_kind_id,
            variant_id,
            active: true,
            position,
        };
        tx.execute(Insert(typical))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(typical)
    }
}

/// Error of [`CreateTypicalObject`] [`Command`] execution.
pub type ExecutionError = database::Error;
