//! [`Command`] for creating a new [`Object`].

use common::operations::{By, Commit, Insert, Lock, Select, Transact, Transacted};
use tracerr::Traced;

use crate::{
    domain::{category, object, Object},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Object`].
///
/// Returns the existing [`Object`] if one with the same name already exists.
/// In that case its [`Category`] association is left untouched, even when a
/// different one was requested: the catalog keeps whatever grouping the name
/// was first registered under.
///
/// [`Category`]: crate::domain::Category
#[derive(Clone, Debug)]
pub struct CreateObject {
    /// [`object::Name`] of the new [`Object`].
    pub name: object::Name,

    /// ID of the [`Category`] the new [`Object`] belongs to.
    ///
    /// [`Category`]: crate::domain::Category
    pub category_id: category::Id,
}

impl<Db> Command<CreateObject> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Object>, object::Name>>,
            Ok = Option<Object>,
            Err = Traced<database::Error>,
        > + Database<Insert<Object>, Err = Traced<database::Error>>
        + Database<Lock<By<Object, object::Name>>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Object;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateObject) -> Result<Self::Ok, Self::Err> {
        let CreateObject { name, category_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::wrap!())?;

        // Avoid concurrent creation of the same `Object`.
        tx.execute(Lock(By::new(name.clone())))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<Object>, _>::new(name.clone())))
            .await
            .map_err(tracerr::wrap!())?;
        if let Some(object) = existing {
            // Keep the category the name was first registered under.
            return Ok(object);
        }

        let object = Object {
            id: object::Id::new(),
            name,
            category_id,
        };
        tx.execute(Insert(object.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(object)
    }
}

/// Error of [`CreateObject`] [`Command`] execution.
pub type ExecutionError = database::Error;
