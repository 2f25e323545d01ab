//! [`Command`] for updating an [`Object`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{category, object, Object},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for renaming an [`Object`] and/or moving it to another
/// [`Category`].
///
/// Unlike the seeding and creation paths, this is the one deliberate way of
/// changing an [`Object`]'s [`Category`] association.
///
/// [`Category`]: crate::domain::Category
#[derive(Clone, Debug)]
pub struct UpdateObject {
    /// ID of the [`Object`] to update.
    pub object_id: object::Id,

    /// New [`object::Name`] of the [`Object`].
    pub name: object::Name,

    /// New [`Category`] of the [`Object`].
    ///
    /// [`Category`]: crate::domain::Category
    pub category_id: category::Id,
}

impl<Db> Command<UpdateObject> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Object>, object::Id>>,
            Ok = Option<Object>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Object>, object::Name>>,
            Ok = Option<Object>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Object, object::Name>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Object>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Object;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateObject) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateObject {
            object_id,
            name,
            category_id,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent creation of an `Object` with the new name.
        tx.execute(Lock(By::new(name.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let occupant = tx
            .execute(Select(By::<Option<Object>, object::Name>::new(
                name.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if occupant.as_ref().is_some_and(|o| o.id != object_id) {
            return Err(tracerr::new!(E::NameOccupied(name)));
        }

        let mut object = tx
            .execute(Select(By::<Option<Object>, object::Id>::new(object_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ObjectNotExists(object_id))
            .map_err(tracerr::wrap!())?;
        if object.name == name && object.category_id == category_id {
            return Ok(object);
        }

        object.name = name;
        object.category_id = category_id;
        tx.execute(Update(object.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(object)
    }
}

/// Error of [`UpdateObject`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`object::Name`] is occupied by another [`Object`].
    #[display("`Object(name: {_0})` already exists")]
    #[from(ignore)]
    NameOccupied(#[error(not(source))] object::Name),

    /// [`Object`] doesn't exist.
    #[display("`Object(id: {_0})` does not exist")]
    #[from(ignore)]
    ObjectNotExists(#[error(not(source))] object::Id),
}
