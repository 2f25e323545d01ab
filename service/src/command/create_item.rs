//! [`Command`] for creating a new [`Item`].

use common::{operations::Insert, DateTime};
use tracerr::Traced;

use crate::{
    domain::{item, room, variant, Item},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Item`].
///
/// Stamps the recorded date with the current moment. Creation never writes
/// history: snapshots exist only for what an [`Item`] used to be before an
/// edit.
#[derive(Clone, Debug)]
pub struct CreateItem {
    /// ID of the [`Room`] the new [`Item`] is placed in, if any.
    ///
    /// [`Room`]: crate::domain::Room
    pub room_id: Option<room::Id>,

    /// ID of the [`Variant`] the new [`Item`] is an instance of, if any.
    ///
    /// [`Variant`]: crate::domain::Variant
    pub variant_id: Option<variant::Id>,

    /// Quantity of the new [`Item`].
    pub quantity: item::Quantity,

    /// Condition [`item::Status`] of the new [`Item`].
    pub status: item::Status,

    /// [`item::Detail`] of the new [`Item`].
    pub detail: item::Detail,
}

impl<Db> Command<CreateItem> for Service<Db>
where
    Db: Database<Insert<Item>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Item;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateItem) -> Result<Self::Ok, Self::Err> {
        let CreateItem {
            room_id,
            variant_id,
            quantity,
            status,
            detail,
        } = cmd;

        let item = Item {
            id: item::Id::new(),
            room_id,
            variant_id,
            quantity,
            status,
            detail,
            recorded_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(item.clone()))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(item)
    }
}

/// Error of [`CreateItem`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(test)]
mod spec {
    use common::Handler as _;

    use crate::{domain::item, testing::MemDb, Config, Service};

    use super::CreateItem;

    #[tokio::test]
    async fn creation_writes_no_history() {
        let db = MemDb::default();
        let service = Service::new(Config::default(), db.clone());

        let created = service
            .execute(CreateItem {
                room_id: None,
                variant_id: None,
                quantity: 2,
                status: item::Status::Bad,
                detail: "patas sueltas".parse().unwrap(),
            })
            .await
            .expect("creation succeeds");

        assert_eq!(db.item(created.id), Some(created));
        assert_eq!(db.history_len(), 0);
    }
}
