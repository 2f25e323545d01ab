//! [`Command`] for deleting entities.

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] deleting the `W` entity with the provided ID `B`.
///
/// Referential integrity is enforced by the storage layer: deleting an
/// entity that is still referenced by dependent rows fails, except for an
/// [`Item`], whose history is dropped along with it.
///
/// [`Item`]: crate::domain::Item
#[derive(Clone, Copy, Debug)]
pub struct DeleteEntity<W, B>(By<W, B>);

impl<W, B> DeleteEntity<W, B> {
    /// Creates a new [`DeleteEntity`] command deleting a `W` by the provided
    /// ID.
    #[must_use]
    pub fn by(id: B) -> Self {
        Self(By::new(id))
    }
}

impl<Db, W, B> Command<DeleteEntity<W, B>> for Service<Db>
where
    Db: Database<Delete<By<W, B>>, Ok = bool, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        DeleteEntity(by): DeleteEntity<W, B>,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let affected = self
            .database()
            .execute(Delete(by))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !affected {
            return Err(tracerr::new!(E::NotExists));
        }

        Ok(())
    }
}

/// Error of [`DeleteEntity`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Entity with the provided ID doesn't exist.
    #[display("entity does not exist")]
    #[from(ignore)]
    NotExists,
}
