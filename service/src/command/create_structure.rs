//! [`Command`] for creating a whole structure in one submission.

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        category, floor, item, location, object, room, room_kind, sector,
        variant, Category, Floor, Item, Location, Object, Room, RoomKind,
        Sector, Variant,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// Choice between picking an existing entity and creating a new one.
#[derive(Clone, Copy, Debug)]
pub enum Pick<Id, New> {
    /// Use the existing entity with the provided ID.
    Existing(Id),

    /// Create the entity from the provided value, reusing an equal one when
    /// it already exists.
    New(New),
}

/// Row of the [`CreateStructure`] submission describing one [`Item`] to
/// register in the new [`Room`].
#[derive(Clone, Debug)]
pub struct ItemRow {
    /// [`Category`] of the [`Item`]'s object.
    pub category: Pick<category::Id, category::Name>,

    /// [`Object`] the [`Item`] is an instance of.
    pub object: Pick<object::Id, object::Name>,

    /// [`Variant`] the [`Item`] is an instance of.
    pub variant: Pick<variant::Id, variant::Spec>,

    /// Quantity of the [`Item`].
    pub quantity: item::Quantity,

    /// Condition [`item::Status`] of the [`Item`].
    pub status: item::Status,

    /// [`item::Detail`] of the [`Item`].
    pub detail: item::Detail,
}

/// [`Command`] for creating a [`Room`] together with its whole context in
/// one transaction: [`Sector`], [`Location`], [`Floor`] and [`RoomKind`] are
/// each picked or created, and every [`ItemRow`] is registered in the new
/// [`Room`], creating missing catalog entries on the way.
///
/// The submission is all-or-nothing: any failure rolls the whole structure
/// back.
#[derive(Clone, Debug)]
pub struct CreateStructure {
    /// [`Sector`] choice.
    pub sector: Pick<sector::Id, sector::Name>,

    /// [`Location`] choice.
    pub location: Pick<location::Id, location::Name>,

    /// [`Floor`] choice.
    pub floor: Pick<floor::Id, floor::Level>,

    /// [`RoomKind`] choice.
    pub room_kind: Pick<room_kind::Id, room_kind::Name>,

    /// [`room::Name`] of the new [`Room`].
    pub room_name: room::Name,

    /// [`ItemRow`]s to register in the new [`Room`].
    pub items: Vec<ItemRow>,
}

/// Output of the [`CreateStructure`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Created [`Room`].
    pub room: Room,

    /// [`Item`]s registered in the [`Room`], in submission order.
    pub items: Vec<Item>,
}

impl<Db> Command<CreateStructure> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Sector>, sector::Id>>,
            Ok = Option<Sector>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Sector>, sector::Name>>,
            Ok = Option<Sector>,
            Err = Traced<database::Error>,
        > + Database<Lock<By<Sector, sector::Name>>, Err = Traced<database::Error>>
        + Database<Insert<Sector>, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Location>, location::Id>>,
            Ok = Option<Location>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Location>, location::Name>>,
            Ok = Option<Location>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Location, location::Name>>,
            Err = Traced<database::Error>,
        > + Database<Insert<Location>, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Floor>, floor::Id>>,
            Ok = Option<Floor>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Floor>, (location::Id, floor::Level)>>,
            Ok = Option<Floor>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Floor, (location::Id, floor::Level)>>,
            Err = Traced<database::Error>,
        > + Database<Insert<Floor>, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<RoomKind>, room_kind::Id>>,
            Ok = Option<RoomKind>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<RoomKind>, room_kind::Name>>,
            Ok = Option<RoomKind>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<RoomKind, room_kind::Name>>,
            Err = Traced<database::Error>,
        > + Database<Insert<RoomKind>, Err = Traced<database::Error>>
        + Database<Insert<Room>, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Category>, category::Id>>,
            Ok = Option<Category>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Category>, category::Name>>,
            Ok = Option<Category>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Category, category::Name>>,
            Err = Traced<database::Error>,
        > + Database<Insert<Category>, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Object>, object::Id>>,
            Ok = Option<Object>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Object>, object::Name>>,
            Ok = Option<Object>,
            Err = Traced<database::Error>,
        > + Database<Lock<By<Object, object::Name>>, Err = Traced<database::Error>>
        + Database<Insert<Object>, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Variant>, variant::Id>>,
            Ok = Option<Variant>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Variant>, (object::Id, variant::Spec)>>,
            Ok = Option<Variant>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Variant, (object::Id, variant::Spec)>>,
            Err = Traced<database::Error>,
        > + Database<Insert<Variant>, Err = Traced<database::Error>>
        + Database<Insert<Item>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateStructure,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateStructure {
            sector,
            location,
            floor,
            room_kind,
            room_name,
            items,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let sector = match sector {
            Pick::Existing(id) => tx
                .execute(Select(By::<Option<Sector>, sector::Id>::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::SectorNotExists(id))
                .map_err(tracerr::wrap!())?,
            Pick::New(name) => {
                tx.execute(Lock(By::new(name.clone())))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(drop)?;
                match tx
                    .execute(Select(By::<Option<Sector>, sector::Name>::new(
                        name.clone(),
                    )))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                {
                    Some(existing) => existing,
                    None => {
                        let created = Sector {
                            id: sector::Id::new(),
                            name,
                        };
                        tx.execute(Insert(created.clone()))
                            .await
                            .map_err(tracerr::map_from_and_wrap!(=> E))
                            .map(drop)?;
                        created
                    }
                }
            }
        };

        let location = match location {
            Pick::Existing(id) => tx
                .execute(Select(By::<Option<Location>, location::Id>::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::LocationNotExists(id))
                .map_err(tracerr::wrap!())?,
            Pick::New(name) => {
                tx.execute(Lock(By::new(name.clone())))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(drop)?;
                match tx
                    .execute(Select(
                        By::<Option<Location>, location::Name>::new(
                            name.clone(),
                        ),
                    ))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                {
                    Some(existing) if existing.sector_id == sector.id => {
                        existing
                    }
                    Some(existing) => {
                        return Err(tracerr::new!(E::LocationNameOccupied(
                            existing.name,
                        )));
                    }
                    None => {
                        let created = Location {
                            id: location::Id::new(),
                            name,
                            sector_id: sector.id,
                        };
                        tx.execute(Insert(created.clone()))
                            .await
                            .map_err(tracerr::map_from_and_wrap!(=> E))
                            .map(drop)?;
                        created
                    }
                }
            }
        };

        let floor = match floor {
            Pick::Existing(id) => tx
                .execute(Select(By::<Option<Floor>, floor::Id>::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::FloorNotExists(id))
                .map_err(tracerr::wrap!())?,
            Pick::New(level) => {
                tx.execute(Lock(By::new((location.id, level))))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(drop)?;
                match tx
                    .execute(Select(By::<Option<Floor>, _>::new((
                        location.id,
                        level,
                    ))))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                {
                    Some(existing) => existing,
                    None => {
                        let created = Floor {
                            id: floor::Id::new(),
                            level,
                            location_id: location.id,
                        };
                        tx.execute(Insert(created))
                            .await
                            .map_err(tracerr::map_from_and_wrap!(=> E))
                            .map(drop)?;
                        created
                    }
                }
            }
        };

        let kind = match room_kind {
            Pick::Existing(id) => tx
                .execute(Select(By::<Option<RoomKind>, room_kind::Id>::new(
                    id,
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::RoomKindNotExists(id))
                .map_err(tracerr::wrap!())?,
            Pick::New(name) => {
                tx.execute(Lock(By::new(name.clone())))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(drop)?;
                match tx
                    .execute(Select(
                        By::<Option<RoomKind>, room_kind::Name>::new(
                            name.clone(),
                        ),
                    ))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                {
                    Some(existing) => existing,
                    None => {
                        let created = RoomKind {
                            id: room_kind::Id::new(),
                            name,
                        };
                        tx.execute(Insert(created.clone()))
                            .await
                            .map_err(tracerr::map_from_and_wrap!(=> E))
                            .map(drop)?;
                        created
                    }
                }
            }
        };

        let room = Room {
            id: room::Id::new(),
            name: room_name,
            floor_id: floor.id,
            kind_id: kind.id,
        };
        tx.execute(Insert(room.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let recorded_at = DateTime::now().coerce();
        let mut registered = Vec::with_capacity(items.len());
        for row in items {
            let ItemRow {
                category,
                object,
                variant,
                quantity,
                status,
                detail,
            } = row;

            let category_id = match category {
                Pick::Existing(id) => tx
                    .execute(Select(By::<Option<Category>, category::Id>::new(
                        id,
                    )))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .ok_or(E::CategoryNotExists(id))
                    .map_err(tracerr::wrap!())?
                    .id,
                Pick::New(name) => {
                    tx.execute(Lock(By::new(name.clone())))
                        .await
                        .map_err(tracerr::map_from_and_wrap!(=> E))
                        .map(drop)?;
                    match tx
                        .execute(Select(
                            By::<Option<Category>, category::Name>::new(
                                name.clone(),
                            ),
                        ))
                        .await
                        .map_err(tracerr::map_from_and_wrap!(=> E))?
                    {
                        Some(existing) => existing.id,
                        None => {
                            let created = Category {
                                id: category::Id::new(),
                                name,
                            };
                            tx.execute(Insert(created.clone()))
                                .await
                                .map_err(tracerr::map_from_and_wrap!(=> E))
                                .map(drop)?;
                            created.id
                        }
                    }
                }
            };

            let object = match object {
                Pick::Existing(id) => tx
                    .execute(Select(By::<Option<Object>, object::Id>::new(id)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .ok_or(E::ObjectNotExists(id))
                    .map_err(tracerr::wrap!())?,
                Pick::New(name) => {
                    tx.execute(Lock(By::new(name.clone())))
                        .await
                        .map_err(tracerr::map_from_and_wrap!(=> E))
                        .map(drop)?;
                    match tx
                        .execute(Select(By::<Option<Object>, object::Name>::new(
                            name.clone(),
                        )))
                        .await
                        .map_err(tracerr::map_from_and_wrap!(=> E))?
                    {
                        // An existing name keeps its category association.
                        Some(existing) => existing,
                        None => {
                            let created = Object {
                                id: object::Id::new(),
                                name,
                                category_id,
                            };
                            tx.execute(Insert(created.clone()))
                                .await
                                .map_err(tracerr::map_from_and_wrap!(=> E))
                                .map(drop)?;
                            created
                        }
                    }
                }
            };

            let variant = match variant {
                Pick::Existing(id) => tx
                    .execute(Select(By::<Option<Variant>, variant::Id>::new(
                        id,
                    )))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .ok_or(E::VariantNotExists(id))
                    .map_err(tracerr::wrap!())?,
                Pick::New(spec) => {
                    tx.execute(Lock(By::new((object.id, spec.clone()))))
                        .await
                        .map_err(tracerr::map_from_and_wrap!(=> E))
                        .map(drop)?;
                    match tx
                        .execute(Select(By::<Option<Variant>, _>::new((
                            object.id,
                            spec.clone(),
                        ))))
                        .await
                        .map_err(tracerr::map_from_and_wrap!(=> E))?
                    {
                        Some(existing) => existing,
                        None => {
                            let created = Variant {
                                id: variant::Id::new(),
                                object_id: object.id,
                                brand: spec.brand,
                                material: spec.material,
                            };
                            tx.execute(Insert(created.clone()))
                                .await
                                .map_err(tracerr::map_from_and_wrap!(=> E))
                                .map(drop)?;
                            created
                        }
                    }
                }
            };

            let item = Item {
                id: item::Id::new(),
                room_id: Some(room.id),
                variant_id: Some(variant.id),
                quantity,
                status,
                detail,
                recorded_at,
            };
            tx.execute(Insert(item.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
            registered.push(item);
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tracing::info!(
            room = %room.name,
            items = registered.len(),
            "structure created",
        );

        Ok(Output {
            room,
            items: registered,
        })
    }
}

/// Error of [`CreateStructure`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Picked [`Sector`] doesn't exist.
    #[display("`Sector(id: {_0})` does not exist")]
    #[from(ignore)]
    SectorNotExists(#[error(not(source))] sector::Id),

    /// Picked [`Location`] doesn't exist.
    #[display("`Location(id: {_0})` does not exist")]
    #[from(ignore)]
    LocationNotExists(#[error(not(source))] location::Id),

    /// New [`location::Name`] is occupied by a [`Location`] of another
    /// [`Sector`].
    #[display("`Location(name: {_0})` already exists in another `Sector`")]
    #[from(ignore)]
    LocationNameOccupied(#[error(not(source))] location::Name),

    /// Picked [`Floor`] doesn't exist.
    #[display("`Floor(id: {_0})` does not exist")]
    #[from(ignore)]
    FloorNotExists(#[error(not(source))] floor::Id),

    /// Picked [`RoomKind`] doesn't exist.
    #[display("`RoomKind(id: {_0})` does not exist")]
    #[from(ignore)]
    RoomKindNotExists(#[error(not(source))] room_kind::Id),

    /// Picked [`Category`] doesn't exist.
    #[display("`Category(id: {_0})` does not exist")]
    #[from(ignore)]
    CategoryNotExists(#[error(not(source))] category::Id),

    /// Picked [`Object`] doesn't exist.
    #[display("`Object(id: {_0})` does not exist")]
    #[from(ignore)]
    ObjectNotExists(#[error(not(source))] object::Id),

    /// Picked [`Variant`] doesn't exist.
    #[display("`Variant(id: {_0})` does not exist")]
    #[from(ignore)]
    VariantNotExists(#[error(not(source))] variant::Id),
}

#[cfg(test)]
mod spec {
    use common::Handler as _;

    use crate::{
        domain::{item, sector, Sector},
        testing::MemDb,
        Config, Service,
    };

    use super::{CreateStructure, ItemRow, Pick};

    #[tokio::test]
    async fn creates_the_whole_structure_reusing_existing_names() {
        let db = MemDb::default();
        let existing = Sector {
            id: sector::Id::new(),
            name: "Este".parse().unwrap(),
        };
        db.put_sector(existing.clone());
        let service = Service::new(Config::default(), db.clone());

        let output = service
            .execute(CreateStructure {
                sector: Pick::New("Este".parse().unwrap()),
                location: Pick::New("Planta".parse().unwrap()),
                floor: Pick::New(2),
                room_kind: Pick::New("Baño".parse().unwrap()),
                room_name: "Baño hombres".parse().unwrap(),
                items: vec![
                    ItemRow {
                        category: Pick::New("Sanitario".parse().unwrap()),
                        object: Pick::New("Lavamanos".parse().unwrap()),
                        variant: Pick::New(crate::domain::variant::Spec {
                            brand: None,
                            material: Some("Cerámica".parse().unwrap()),
                        }),
                        quantity: 3,
                        status: item::Status::Good,
                        detail: item::Detail::default(),
                    },
                    ItemRow {
                        category: Pick::New("Sanitario".parse().unwrap()),
                        object: Pick::New("Espejos".parse().unwrap()),
                        variant: Pick::New(crate::domain::variant::Spec::default()),
                        quantity: 1,
                        status: item::Status::Bad,
                        detail: "trizado".parse().unwrap(),
                    },
                ],
            })
            .await
            .expect("structure creation succeeds");

        // The sector with the same name was reused, not duplicated.
        assert_eq!(db.sectors_len(), 1);
        assert_eq!(output.items.len(), 2);
        assert_eq!(db.items_len(), 2);
        for item in &output.items {
            assert_eq!(item.room_id, Some(output.room.id));
            assert!(item.variant_id.is_some());
        }
        // Both rows named the same new category, created exactly once.
        assert_eq!(db.categories_len(), 1);
        assert_eq!(db.history_len(), 0);
    }
}
