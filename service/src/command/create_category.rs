//! [`Command`] for creating a new [`Category`].

use common::operations::{By, Commit, Insert, Lock, Select, Transact, Transacted};
use tracerr::Traced;

use crate::{
    domain::{category, Category},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Category`].
///
/// Returns the existing [`Category`] if one with the same name already
/// exists.
#[derive(Clone, Debug)]
pub struct CreateCategory {
    /// [`category::Name`] of the new [`Category`].
    pub name: category::Name,
}

impl<Db> Command<CreateCategory> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Category>, category::Name>>,
            Ok = Option<Category>,
            Err = Traced<database::Error>,
        > + Database<Insert<Category>, Err = Traced<database::Error>>
        + Database<
            Lock<By<Category, category::Name>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Category;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateCategory,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateCategory { name } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::wrap!())?;

        // Avoid concurrent creation of the same `Category`.
        tx.execute(Lock(By::new(name.clone())))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<Category>, _>::new(name.clone())))
            .await
            .map_err(tracerr::wrap!())?;
        if let Some(category) = existing {
            // `Category` with the same name already exists.
            return Ok(category);
        }

        let category = Category {
            id: category::Id::new(),
            name,
        };
        tx.execute(Insert(category.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(category)
    }
}

/// Error of [`CreateCategory`] [`Command`] execution.
pub type ExecutionError = database::Error;
