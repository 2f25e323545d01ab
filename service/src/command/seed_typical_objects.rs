//! [`Command`] for listing (and lazily seeding) a [`RoomKind`]'s typical
//! objects.

use common::operations::{By, Commit, Insert, Lock, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        category, object, room_kind, typical_object, variant, Category,
        Object, RoomKind, TypicalObject, Variant,
    },
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] returning the typical-object suggestions of a [`RoomKind`].
///
/// The first execution for a [`RoomKind`] with no [`TypicalObject`] rows yet
/// seeds them from the configured [`Table`] in a single transaction, creating
/// any missing [`Category`]/[`Object`]/generic-[`Variant`] rows on the way.
/// Executions after that (or for a [`RoomKind`] absent from the [`Table`])
/// only read.
#[derive(Clone, Copy, Debug)]
pub struct SeedTypicalObjects {
    /// ID of the [`RoomKind`] to list the typical objects of.
    pub room_kind_id: room_kind::Id,
}

impl<Db> Command<SeedTypicalObjects> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<RoomKind>, room_kind::Id>>,
            Ok = Option<RoomKind>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<read::typical::Entry>, room_kind::Id>>,
            Ok = Vec<read::typical::Entry>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Select<By<Vec<read::typical::Entry>, room_kind::Id>>,
            Ok = Vec<read::typical::Entry>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<TypicalObject, room_kind::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Category, category::Name>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Category>, category::Name>>,
            Ok = Option<Category>,
            Err = Traced<database::Error>,
        > + Database<Insert<Category>, Err = Traced<database::Error>>
        + Database<Lock<By<Object, object::Name>>, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Object>, object::Name>>,
            Ok = Option<Object>,
            Err = Traced<database::Error>,
        > + Database<Insert<Object>, Err = Traced<database::Error>>
        + Database<
            Lock<By<Variant, (object::Id, variant::Spec)>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Variant>, (object::Id, variant::Spec)>>,
            Ok = Option<Variant>,
            Err = Traced<database::Error>,
        > + Database<Insert<Variant>, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<TypicalObject>, (room_kind::Id, variant::Id)>>,
            Ok = Option<TypicalObject>,
            Err = Traced<database::Error>,
        > + Database<Insert<TypicalObject>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Vec<read::typical::Entry>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SeedTypicalObjects,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SeedTypicalObjects { room_kind_id } = cmd;

        let kind = self
            .database()
            .execute(Select(By::<Option<RoomKind>, _>::new(room_kind_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomKindNotExists(room_kind_id))
            .map_err(tracerr::wrap!())?;

        let entries = self
            .database()
            .execute(Select(By::<Vec<read::typical::Entry>, _>::new(
                room_kind_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !entries.is_empty() {
            return Ok(entries);
        }

        let Some(groups) =
            self.config().typical_objects.groups_for(&kind.name)
        else {
            return Ok(vec![]);
        };
        let groups = groups.to_vec();

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent seeding of the same `RoomKind`.
        tx.execute(Lock(By::new(room_kind_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let entries = tx
            .execute(Select(By::<Vec<read::typical::Entry>, _>::new(
                room_kind_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !entries.is_empty() {
            // Another writer has seeded the list meanwhile.
            return Ok(entries);
        }

        let mut position: typical_object::Position = 0;
        for Group { category, objects } in groups {
            tx.execute(Lock(By::new(category.clone())))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
            let mut category_id = match tx
                .execute(Select(By::<Option<Category>, _>::new(
                    category.clone(),
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
            {
                Some(existing) => existing.id,
                None => {
                    let created = Category {
                        id: category::Id::new(),
                        name: category,
                    };
                    tx.execute(Insert(created.clone()))
                        .await
                        .map_err(tracerr::map_from_and_wrap!(=> E))
                        .map(drop)?;
                    created.id
                }
            };

            for name in objects {
                tx.execute(Lock(By::new(name.clone())))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(drop)?;
                let object = match tx
                    .execute(Select(By::<Option<Object>, _>::new(name.clone())))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                {
                    Some(existing) => {
                        // The name may already be registered under another
                        // category. It is not reassigned, and that category
                        // takes over for the rest of this group.
                        category_id = existing.category_id;
                        existing
                    }
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
                };

                let spec = variant::Spec::default();
                tx.execute(Lock(By::new((object.id, spec.clone()))))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(drop)?;
                let variant = match tx
                    .execute(Select(By::<Option<Variant>, _>::new((
                        object.id,
                        spec,
                    ))))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                {
                    Some(existing) => existing,
                    None => {
                        let created = Variant {
                            id: variant::Id::new(),
                            object_id: object.id,
                            brand: None,
                            material: None,
                        };
                        tx.execute(Insert(created.clone()))
                            .await
                            .map_err(tracerr::map_from_and_wrap!(=> E))
                            .map(drop)?;
                        created
                    }
                };

                let link = tx
                    .execute(Select(By::<Option<TypicalObject>, _>::new((
                        room_kind_id,
                        variant.id,
                    ))))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;
                if link.is_none() {
                    tx.execute(Insert(TypicalObject {
                        id: typical_object::Id::new(),
                        room_kind_id,
                        variant_id: variant.id,
                        active: true,
                        position,
                    }))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(drop)?;
                }
                position += 1;
            }
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tracing::info!(
            room_kind = %kind.name,
            suggestions = position,
            "typical objects seeded",
        );

        self.database()
            .execute(Select(By::<Vec<read::typical::Entry>, _>::new(
                room_kind_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`SeedTypicalObjects`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`RoomKind`] doesn't exist.
    #[display("`RoomKind(id: {_0})` does not exist")]
    #[from(ignore)]
    RoomKindNotExists(#[error(not(source))] room_kind::Id),
}

/// Typical-objects seed table: per [`room_kind::Name`], the ordered
/// [`Group`]s of objects expected in rooms of that kind.
///
/// Loaded once at startup as read-only configuration.
#[derive(Clone, Debug)]
pub struct Table(Vec<Entry>);

/// One [`Table`] entry.
#[derive(Clone, Debug)]
pub struct Entry {
    /// [`room_kind::Name`] the [`Group`]s apply to.
    pub room_kind: room_kind::Name,

    /// Ordered [`Group`]s of typical objects.
    pub groups: Vec<Group>,
}

/// Ordered group of typical [`Object`]s under one [`Category`].
///
/// [`Category`]: crate::domain::Category
/// [`Object`]: crate::domain::Object
#[derive(Clone, Debug)]
pub struct Group {
    /// [`category::Name`] the objects are grouped under.
    pub category: category::Name,

    /// Ordered [`object::Name`]s of the group.
    pub objects: Vec<object::Name>,
}

impl Table {
    /// Creates a new [`Table`] from the provided entries.
    #[must_use]
    pub fn new(entries: Vec<Entry>) -> Self {
        Self(entries)
    }

    /// Returns the [`Group`]s configured for the provided
    /// [`room_kind::Name`], if any.
    #[must_use]
    pub fn groups_for(&self, name: &room_kind::Name) -> Option<&[Group]> {
        self.0
            .iter()
            .find(|entry| entry.room_kind == *name)
            .map(|entry| entry.groups.as_slice())
    }

    /// Returns the built-in [`Table`].
    #[must_use]
    pub fn builtin() -> Self {
        const INFRASTRUCTURE: (&str, &[&str]) = (
            "Infraestructura",
            &[
                "Paredes",
                "Piso",
                "Cielo",
                "Techo",
                "Luces",
                "Ventanas",
                "Puertas",
                "Conexión eléctrica",
                "Interruptores",
            ],
        );

        Self(vec![
            entry(
                "Baño",
                &[
                    INFRASTRUCTURE,
                    (
                        "Sanitario",
                        &[
                            "Tasas",
                            "Urinario",
                            "Desagües",
                            "Papeleros",
                            "Lavamanos",
                        ],
                    ),
                    ("Decoración", &["Espejos"]),
                    (
                        "Higiene",
                        &[
                            "Jaboneras",
                            "Dispensadores de papel",
                            "Dispensadores de jabón",
                        ],
                    ),
                ],
            ),
            entry(
                "Vestidor",
                &[
                    INFRASTRUCTURE,
                    ("Mobiliario", &["Bancos", "Casilleros", "Percheros"]),
                    ("Sanitario", &["Duchas"]),
                    (
                        "Higiene",
                        &["Secadores de toalla", "Dispensadores de jabón"],
                    ),
                    ("Climatización", &["Extractores", "Estufas"]),
                ],
            ),
            entry(
                "Comedor",
                &[
                    INFRASTRUCTURE,
                    ("Mobiliario", &["Mesas", "Sillas", "Muebles"]),
                    (
                        "Electrodomésticos",
                        &[
                            "Refrigerador",
                            "Microondas",
                            "Dispensador de agua",
                            "Televisor",
                        ],
                    ),
                    ("Sanitario", &["Lavaplatos", "Papeleros"]),
                    ("Climatización", &["Aire acondicionado"]),
                ],
            ),
            entry(
                "Cafetería",
                &[
                    INFRASTRUCTURE,
                    ("Mobiliario", &["Mesas", "Sillas", "Muebles"]),
                    (
                        "Electrodomésticos",
                        &["Cafetera", "Refrigerador", "Dispensador de agua"],
                    ),
                    ("Climatización", &["Aire acondicionado"]),
                ],
            ),
            entry(
                "Baño vestidor",
                &[
                    INFRASTRUCTURE,
                    (
                        "Sanitario",
                        &[
                            "Tasas",
                            "Urinario",
                            "Desagües",
                            "Lavamanos",
                            "Duchas",
                            "Papeleros",
                        ],
                    ),
                    ("Decoración", &["Espejos"]),
                    (
                        "Higiene",
                        &["Secadores de toalla", "Dispensadores de jabón"],
                    ),
                    ("Mobiliario", &["Bancas", "Casilleros"]),
                    ("Climatización", &["Extractores"]),
                ],
            ),
        ])
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Builds a [`Table`] [`Entry`] from the built-in literals.
fn entry(room_kind: &str, groups: &[(&str, &[&str])]) -> Entry {
    Entry {
        room_kind: kind_name(room_kind),
        groups: groups
            .iter()
            .map(|(category, objects)| Group {
                category: category_name(category),
                objects: objects.iter().copied().map(object_name).collect(),
            })
            .collect(),
    }
}

/// Builds a [`room_kind::Name`] from a built-in literal.
fn kind_name(name: &str) -> room_kind::Name {
    #[expect(unsafe_code, reason = "the built-in table matches the format")]
    unsafe {
        room_kind::Name::new_unchecked(name)
    }
}

/// Builds a [`category::Name`] from a built-in literal.
fn category_name(name: &str) -> category::Name {
    #[expect(unsafe_code, reason = "the built-in table matches the format")]
    unsafe {
        category::Name::new_unchecked(name)
    }
}

/// Builds an [`object::Name`] from a built-in literal.
fn object_name(name: &str) -> object::Name {
    #[expect(unsafe_code, reason = "the built-in table matches the format")]
    unsafe {
        object::Name::new_unchecked(name)
    }
}

#[cfg(test)]
mod spec {
    use common::Handler as _;

    use crate::{
        domain::{category, object, room_kind, Category, Object, RoomKind},
        testing::MemDb,
        Config, Service,
    };

    use super::SeedTypicalObjects;

    fn bathroom(db: &MemDb) -> room_kind::Id {
        let kind = RoomKind {
            id: room_kind::Id::new(),
            name: "Baño".parse().unwrap(),
        };
        db.put_room_kind(kind.clone());
        kind.id
    }

    #[tokio::test]
    async fn seeds_once_and_is_idempotent() {
        let db = MemDb::default();
        let room_kind_id = bathroom(&db);
        let service = Service::new(Config::default(), db.clone());

        let first = service
            .execute(SeedTypicalObjects { room_kind_id })
            .await
            .expect("seeding succeeds");
        // 9 infrastructure + 5 sanitary + 1 decoration + 3 hygiene entries.
        assert_eq!(first.len(), 18);
        assert_eq!(first[0].category_name, "Infraestructura".parse().unwrap());
        assert_eq!(first[0].object_name, "Paredes".parse().unwrap());
        assert!(first[0].brand.is_none());

        let second = service
            .execute(SeedTypicalObjects { room_kind_id })
            .await
            .expect("re-listing succeeds");
        assert_eq!(second, first);
        assert_eq!(db.typical_objects_len(), 18);
    }

    #[tokio::test]
    async fn unknown_kind_name_seeds_nothing() {
        let db = MemDb::default();
        let kind = RoomKind {
            id: room_kind::Id::new(),
            name: "Azotea".parse().unwrap(),
        };
        db.put_room_kind(kind.clone());
        let service = Service::new(Config::default(), db.clone());

        let entries = service
            .execute(SeedTypicalObjects { room_kind_id: kind.id })
            .await
            .expect("listing succeeds");

        assert!(entries.is_empty());
        assert_eq!(db.typical_objects_len(), 0);
    }

    #[tokio::test]
    async fn existing_object_keeps_its_category() {
        let db = MemDb::default();
        let room_kind_id = bathroom(&db);

        let sanitary = Category {
            id: category::Id::new(),
            name: "Sanitario".parse().unwrap(),
        };
        db.put_category(sanitary.clone());
        // "Piso" is seeded under "Infraestructura", but already registered
        // elsewhere.
        let floor_object = Object {
            id: object::Id::new(),
            name: "Piso".parse().unwrap(),
            category_id: sanitary.id,
        };
        db.put_object(floor_object.clone());

        let service = Service::new(Config::default(), db.clone());
        let entries = service
            .execute(SeedTypicalObjects { room_kind_id })
            .await
            .expect("seeding succeeds");

        assert_eq!(entries.len(), 18);
        assert_eq!(
            db.object_by_name(&floor_object.name).unwrap().category_id,
            sanitary.id,
        );
        // Objects seeded before the collision keep the group's category,
        // while the ones after it inherit the collided one.
        let infrastructure = db
            .object_by_name(&"Paredes".parse().unwrap())
            .unwrap()
            .category_id;
        assert_ne!(infrastructure, sanitary.id);
        assert_eq!(
            db.object_by_name(&"Cielo".parse().unwrap()).unwrap().category_id,
            sanitary.id,
        );
    }
}
