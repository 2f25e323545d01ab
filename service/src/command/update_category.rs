//! [`Command`] for updating a [`Category`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{category, Category},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for renaming a [`Category`].
#[derive(Clone, Debug)]
pub struct UpdateCategory {
    /// ID of the [`Category`] to update.
    pub category_id: category::Id,

    /// New [`category::Name`] of the [`Category`].
    pub name: category::Name,
}

impl<Db> Command<UpdateCategory> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Category>, category::Id>>,
            Ok = Option<Category>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Category>, category::Name>>,
            Ok = Option<Category>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Category, category::Name>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Category>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Category;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateCategory,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateCategory { category_id, name } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent creation of a `Category` with the new name.
        tx.execute(Lock(By::new(name.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let occupant = tx
            .execute(Select(By::<Option<Category>, category::Name>::new(
                name.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if occupant.as_ref().is_some_and(|c| c.id != category_id) {
            return Err(tracerr::new!(E::NameOccupied(name)));
        }

        let mut category = tx
            .execute(Select(By::<Option<Category>, category::Id>::new(
                category_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CategoryNotExists(category_id))
            .map_err(tracerr::wrap!())?;
        if category.name == name {
            return Ok(category);
        }

        category.name = name;
        tx.execute(Update(category.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(category)
    }
}

/// Error of [`UpdateCategory`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`category::Name`] is occupied by another [`Category`].
    #[display("`Category(name: {_0})` already exists")]
    #[from(ignore)]
    NameOccupied(#[error(not(source))] category::Name),

    /// [`Category`] doesn't exist.
    #[display("`Category(id: {_0})` does not exist")]
    #[from(ignore)]
    CategoryNotExists(#[error(not(source))] category::Id),
}
