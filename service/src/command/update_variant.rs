//! [`Command`] for updating a [`Variant`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{object, variant, Variant},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for changing the brand/material [`variant::Spec`] of a
/// [`Variant`].
#[derive(Clone, Debug)]
pub struct UpdateVariant {
    /// ID of the [`Variant`] to update.
    pub variant_id: variant::Id,

    /// New [`variant::Spec`] of the [`Variant`].
    pub spec: variant::Spec,
}

impl<Db> Command<UpdateVariant> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Variant>, variant::Id>>,
            Ok = Option<Variant>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Variant>, (object::Id, variant::Spec)>>,
            Ok = Option<Variant>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Variant, (object::Id, variant::Spec)>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Variant>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Variant;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateVariant,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateVariant { variant_id, spec } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut variant = tx
            .execute(Select(By::<Option<Variant>, variant::Id>::new(
                variant_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::VariantNotExists(variant_id))
            .map_err(tracerr::wrap!())?;
        if variant.spec() == spec {
            return Ok(variant);
        }

        // Avoid concurrent creation of a `Variant` with the new spec.
        tx.execute(Lock(By::new((variant.object_id, spec.clone()))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let occupant = tx
            .execute(Select(By::<Option<Variant>, _>::new((
                variant.object_id,
                spec.clone(),
            ))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if occupant.as_ref().is_some_and(|v| v.id != variant_id) {
            return Err(tracerr::new!(E::SpecOccupied(spec)));
        }

        variant.brand = spec.brand;
        variant.material = spec.material;
        tx.execute(Update(variant.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(variant)
    }
}

/// Error of [`UpdateVariant`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// The [`Object`] already has a [`Variant`] with the new spec.
    ///
    /// [`Object`]: crate::domain::Object
    #[display("`Variant` with the same spec already exists")]
    #[from(ignore)]
    SpecOccupied(#[error(not(source))] variant::Spec),

    /// [`Variant`] doesn't exist.
    #[display("`Variant(id: {_0})` does not exist")]
    #[from(ignore)]
    VariantNotExists(#[error(not(source))] variant::Id),
}
