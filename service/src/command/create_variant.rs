//! [`Command`] for creating a new [`Variant`].

use common::operations::{By, Commit, Insert, Lock, Select, Transact, Transacted};
use tracerr::Traced;

use crate::{
    domain::{object, variant, Variant},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Variant`].
///
/// Returns the existing [`Variant`] if its [`Object`] already has one with
/// the same brand and material.
///
/// [`Object`]: crate::domain::Object
#[derive(Clone, Debug)]
pub struct CreateVariant {
    /// ID of the [`Object`] the new [`Variant`] refines.
    ///
    /// [`Object`]: crate::domain::Object
    pub object_id: object::Id,

    /// Brand/material [`variant::Spec`] of the new [`Variant`].
    pub spec: variant::Spec,
}

impl<Db> Command<CreateVariant> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Variant>, (object::Id, variant::Spec)>>,
            Ok = Option<Variant>,
            Err = Traced<database::Error>,
        > + Database<Insert<Variant>, Err = Traced<database::Error>>
        + Database<
            Lock<By<Variant, (object::Id, variant::Spec)>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Variant;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateVariant,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateVariant { object_id, spec } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::wrap!())?;

        // Avoid concurrent creation of the same `Variant`.
        tx.execute(Lock(By::new((object_id, spec.clone()))))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<Variant>, _>::new((
                object_id,
                spec.clone(),
            ))))
            .await
            .map_err(tracerr::wrap!())?;
        if let Some(variant) = existing {
            // `Variant` with the same spec already exists.
            return Ok(variant);
        }

        let variant = Variant {
            id: variant::Id::new(),
            object_id,
            brand: spec.brand,
            material: spec.material,
        };
        tx.execute(Insert(variant.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(variant)
    }
}

/// Error of [`CreateVariant`] [`Command`] execution.
pub type ExecutionError = database::Error;
