//! [`Command`] for updating an [`Item`].

use common::operations::{
    By, Commit, Insert, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{item, room, variant, Item},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Item`].
///
/// This is the only write path for persisted [`Item`]s: along with the
/// submitted values it records an [`item::HistoryEntry`] snapshot of the
/// previous quantity, status and detail, if and only if at least one of them
/// actually changed. The row and its snapshot are committed atomically.
#[derive(Clone, Debug)]
pub struct UpdateItem {
    /// ID of the [`Item`] to update.
    pub item_id: item::Id,

    /// ID of the [`Room`] the [`Item`] is placed in, if any.
    ///
    /// [`Room`]: crate::domain::Room
    pub room_id: Option<room::Id>,

    /// ID of the [`Variant`] the [`Item`] is an instance of, if any.
    ///
    /// [`Variant`]: crate::domain::Variant
    pub variant_id: Option<variant::Id>,

    /// New quantity of the [`Item`].
    pub quantity: item::Quantity,

    /// New condition [`item::Status`] of the [`Item`].
    pub status: item::Status,

    /// New [`item::Detail`] of the [`Item`].
    pub detail: item::Detail,
}

impl<Db> Command<UpdateItem> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Item>, item::Id>>,
            Ok = Option<Item>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Item, item::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Item>, Ok = (), Err = Traced<database::Error>>
        + Database<
            Insert<item::HistoryEntry>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Item;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateItem) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateItem {
            item_id,
            room_id,
            variant_id,
            quantity,
            status,
            detail,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Item`.
        tx.execute(Lock(By::new(item_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let previous = tx
            .execute(Select(By::<Option<Item>, _>::new(item_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ItemNotExists(item_id))
            .map_err(tracerr::wrap!())?;

        let updated = Item {
            id: previous.id,
            room_id,
            variant_id,
            quantity,
            status,
            detail,
            // An edit never advances the recorded date.
            recorded_at: previous.recorded_at,
        };

        tx.execute(Update(updated.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if updated.differs_from(&previous) {
            tx.execute(Insert(item::HistoryEntry::snapshot(&previous)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            tracing::debug!(item = %updated.id, "history snapshot recorded");
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(updated)
    }
}

/// Error of [`UpdateItem`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Item`] doesn't exist.
    #[display("`Item(id: {_0})` does not exist")]
    #[from(ignore)]
    ItemNotExists(#[error(not(source))] item::Id),
}

#[cfg(test)]
mod spec {
    use common::Handler as _;

    use crate::{
        domain::{item, Item},
        testing::MemDb,
        Config, Service,
    };

    use super::{ExecutionError, UpdateItem};

    fn item(quantity: item::Quantity, detail: &str) -> Item {
        Item {
            id: item::Id::new(),
            room_id: None,
            variant_id: None,
            quantity,
            status: item::Status::Good,
            detail: detail.parse().unwrap(),
            recorded_at: common::DateTime::UNIX_EPOCH.coerce(),
        }
    }

    fn update_of(existing: &Item) -> UpdateItem {
        UpdateItem {
            item_id: existing.id,
            room_id: existing.room_id,
            variant_id: existing.variant_id,
            quantity: existing.quantity,
            status: existing.status,
            detail: existing.detail.clone(),
        }
    }

    #[tokio::test]
    async fn no_history_without_tracked_change() {
        let db = MemDb::default();
        let existing = item(5, "");
        db.put_item(existing.clone());
        let service = Service::new(Config::default(), db.clone());

        let updated = service
            .execute(update_of(&existing))
            .await
            .expect("update succeeds");

        assert_eq!(updated, existing);
        assert_eq!(db.item(existing.id), Some(existing));
        assert_eq!(db.history_len(), 0);
    }

    #[tokio::test]
    async fn reassignment_alone_writes_no_history() {
        let db = MemDb::default();
        let existing = item(5, "ok");
        db.put_item(existing.clone());
        let service = Service::new(Config::default(), db.clone());

        let room_id = crate::domain::room::Id::new();
        let mut cmd = update_of(&existing);
        cmd.room_id = Some(room_id);
        let updated = service.execute(cmd).await.expect("update succeeds");

        assert_eq!(updated.room_id, Some(room_id));
        assert_eq!(db.history_len(), 0);
    }

    #[tokio::test]
    async fn change_snapshots_previous_values() {
        let db = MemDb::default();
        let existing = item(5, "ok");
        db.put_item(existing.clone());
        let service = Service::new(Config::default(), db.clone());

        let mut cmd = update_of(&existing);
        cmd.quantity = 3;
        cmd.status = item::Status::Pending;
        let updated = service.execute(cmd).await.expect("update succeeds");

        assert_eq!(updated.quantity, 3);
        assert_eq!(updated.status, item::Status::Pending);
        // The recorded date never advances on an edit.
        assert_eq!(updated.recorded_at, existing.recorded_at);
        assert_eq!(db.item(existing.id), Some(updated));

        let history = db.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].item_id, existing.id);
        assert_eq!(history[0].quantity, 5);
        assert_eq!(history[0].status, item::Status::Good);
        assert_eq!(history[0].detail, existing.detail);
        assert_eq!(history[0].recorded_at, existing.recorded_at);
    }

    #[tokio::test]
    async fn empty_and_absent_detail_are_the_same() {
        let db = MemDb::default();
        let existing = item(5, "");
        db.put_item(existing.clone());
        let service = Service::new(Config::default(), db.clone());

        let mut cmd = update_of(&existing);
        cmd.detail = item::Detail::default();
        _ = service.execute(cmd).await.expect("update succeeds");

        assert_eq!(db.history_len(), 0);
    }

    #[tokio::test]
    async fn failed_history_insert_rolls_the_update_back() {
        let db = MemDb::default();
        let existing = item(5, "ok");
        db.put_item(existing.clone());
        db.fail_history_inserts();
        let service = Service::new(Config::default(), db.clone());

        let mut cmd = update_of(&existing);
        cmd.quantity = 1;
        let result = service.execute(cmd).await;

        assert!(result.is_err());
        // Neither the update nor the snapshot may land without the other.
        assert_eq!(db.item(existing.id), Some(existing));
        assert_eq!(db.history_len(), 0);
    }

    #[tokio::test]
    async fn unknown_item_is_reported() {
        let db = MemDb::default();
        let service = Service::new(Config::default(), db.clone());

        let ghost = item(5, "");
        let result = service.execute(update_of(&ghost)).await;

        match result.expect_err("must fail").as_ref() {
            ExecutionError::ItemNotExists(id) => assert_eq!(*id, ghost.id),
            ExecutionError::Db(e) => panic!("unexpected error: {e}"),
        }
        assert_eq!(db.history_len(), 0);
    }
}
