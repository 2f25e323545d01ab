//! Bulk structure-creation definitions.

use juniper::{graphql_object, GraphQLInputObject};
use service::command::create_structure::{self, Pick};
use service::domain;

use crate::{api, define_error, Context, Error};

define_error! {
    enum StructureError {
        #[code = "INCOMPLETE_ITEM_ROW"]
        #[status = BAD_REQUEST]
        #[message = "Non-empty item rows require quantity and status"]
        IncompleteItemRow,
    }
}

/// Choice between an existing `Sector` and a new one.
///
/// Exactly one of the fields must be provided.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct SectorChoice {
    /// ID of the existing `Sector` to use.
    pub existing: Option<api::sector::Id>,

    /// Name of the `Sector` to create (or reuse by name).
    pub new: Option<api::sector::Name>,
}

/// Choice between an existing `Location` and a new one.
///
/// Exactly one of the fields must be provided.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct LocationChoice {
    /// ID of the existing `Location` to use.
    pub existing: Option<api::location::Id>,

    /// Name of the `Location` to create (or reuse by name).
    pub new: Option<api::location::Name>,
}

/// Choice between an existing `Floor` and a new one.
///
/// Exactly one of the fields must be provided.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct FloorChoice {
    /// ID of the existing `Floor` to use.
    pub existing: Option<api::floor::Id>,

    /// Level of the `Floor` to create (or reuse by level).
    pub new: Option<i32>,
}

/// Choice between an existing `RoomKind` and a new one.
///
/// Exactly one of the fields must be provided.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct RoomKindChoice {
    /// ID of the existing `RoomKind` to use.
    pub existing: Option<api::room_kind::Id>,

    /// Name of the `RoomKind` to create (or reuse by name).
    pub new: Option<api::room_kind::Name>,
}

/// Choice between an existing `Category` and a new one.
///
/// Exactly one of the fields must be provided.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct CategoryChoice {
    /// ID of the existing `Category` to use.
    pub existing: Option<api::category::Id>,

    /// Name of the `Category` to create (or reuse by name).
    pub new: Option<api::category::Name>,
}

/// Choice between an existing `Object` and a new one.
///
/// Exactly one of the fields must be provided.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct ObjectChoice {
    /// ID of the existing `Object` to use.
    pub existing: Option<api::object::Id>,

    /// Name of the `Object` to create (or reuse by name).
    pub new: Option<api::object::Name>,
}

/// Choice between an existing `Variant` and a new one.
///
/// Exactly one of `existing` and the brand/material pair must be provided;
/// a new generic `Variant` may leave both brand and material out.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct VariantChoice {
    /// ID of the existing `Variant` to use.
    pub existing: Option<api::variant::Id>,

    /// Brand of the `Variant` to create (or reuse by spec).
    pub brand: Option<api::variant::Brand>,

    /// Material of the `Variant` to create (or reuse by spec).
    pub material: Option<api::variant::Material>,
}

/// One item row of a `createStructure` submission.
///
/// A row with every field absent is silently skipped.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct ItemRowInput {
    /// `Category` choice of the row.
    pub category: Option<CategoryChoice>,

    /// `Object` choice of the row.
    pub object: Option<ObjectChoice>,

    /// `Variant` choice of the row.
    pub variant: Option<VariantChoice>,

    /// Quantity of the `Item`.
    pub quantity: Option<i32>,

    /// Condition status of the `Item`.
    pub status: Option<api::item::Status>,

    /// Detail of the `Item`.
    pub detail: Option<api::item::Detail>,
}

impl ItemRowInput {
    /// Indicates whether every field of this row is absent.
    fn is_blank(&self) -> bool {
        let Self {
            category,
            object,
            variant,
            quantity,
            status,
            detail,
        } = self;
        category.is_none()
            && object.is_none()
            && variant.is_none()
            && quantity.is_none()
            && status.is_none()
            && detail.is_none()
    }
}

/// Resolves an existing/new pair into a [`Pick`], requiring exactly one
/// side.
fn pick<Id, New, DomId, DomNew>(
    existing: Option<Id>,
    new: Option<New>,
) -> Result<Pick<DomId, DomNew>, Error>
where
    Id: Into<DomId>,
    New: Into<DomNew>,
{
    match (existing, new) {
        (Some(id), None) => Ok(Pick::Existing(id.into())),
        (None, Some(new)) => Ok(Pick::New(new.into())),
        (Some(_), Some(_)) | (None, None) => {
            Err(api::InputError::AmbiguousChoice.into())
        }
    }
}

/// Whole `createStructure` submission.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct StructureInput {
    /// `Sector` choice.
    pub sector: SectorChoice,

    /// `Location` choice.
    pub location: LocationChoice,

    /// `Floor` choice.
    pub floor: FloorChoice,

    /// `RoomKind` choice.
    pub room_kind: RoomKindChoice,

    /// Name of the new `Room`.
    pub room_name: api::room::Name,

    /// Item rows to register in the new `Room`.
    pub items: Vec<ItemRowInput>,
}

impl StructureInput {
    /// Validates this input into a [`create_structure::CreateStructure`]
    /// command.
    ///
    /// # Errors
    ///
    /// Errors if any choice is ambiguous, a number is out of range, or a
    /// non-blank item row misses its quantity or status.
    pub fn into_command(
        self,
    ) -> Result<create_structure::CreateStructure, Error> {
        let Self {
            sector,
            location,
            floor,
            room_kind,
            room_name,
            items,
        } = self;

        let floor = match (floor.existing, floor.new) {
            (Some(id), None) => Pick::Existing(id.into()),
            (None, Some(level)) => Pick::New(
                domain::floor::Level::try_from(level)
                    .map_err(|_| api::InputError::NumberOutOfRange)?,
            ),
            (Some(_), Some(_)) | (None, None) => {
                return Err(api::InputError::AmbiguousChoice.into());
            }
        };

        let mut rows = Vec::with_capacity(items.len());
        for row in items {
            if row.is_blank() {
                continue;
            }
            let ItemRowInput {
                category,
                object,
                variant,
                quantity,
                status,
                detail,
            } = row;

            let (Some(category), Some(object), Some(variant)) =
                (category, object, variant)
            else {
                return Err(api::InputError::AmbiguousChoice.into());
            };
            let (Some(quantity), Some(status)) = (quantity, status) else {
                return Err(StructureError::IncompleteItemRow.into());
            };

            let variant = match (variant.existing, variant.brand, variant.material) {
                (Some(id), None, None) => Pick::Existing(id.into()),
                (None, brand, material) => Pick::New(domain::variant::Spec {
                    brand: brand.map(Into::into),
                    material: material.map(Into::into),
                }),
                (Some(_), _, _) => {
                    return Err(api::InputError::AmbiguousChoice.into());
                }
            };

            rows.push(create_structure::ItemRow {
                category: pick(category.existing, category.new)?,
                object: pick(object.existing, object.new)?,
                variant,
                quantity: domain::item::Quantity::try_from(quantity)
                    .map_err(|_| api::InputError::NumberOutOfRange)?,
                status: status.into(),
                detail: detail.map_or_else(Default::default, Into::into),
            });
        }

        Ok(create_structure::CreateStructure {
            sector: pick(sector.existing, sector.new)?,
            location: pick(location.existing, location.new)?,
            floor,
            room_kind: pick(room_kind.existing, room_kind.new)?,
            room_name: room_name.into(),
            items: rows,
        })
    }
}

/// Result of a `createStructure` submission.
#[derive(Clone, Debug)]
pub struct StructureOutput(pub(crate) create_structure::Output);

/// Result of a `createStructure` submission.
#[graphql_object(context = Context)]
impl StructureOutput {
    /// Created `Room`.
    #[must_use]
    pub fn room(&self) -> api::Room {
        self.0.room.clone().into()
    }

    /// `Item`s registered in the `Room`, in submission order.
    #[must_use]
    pub fn items(&self) -> Vec<api::Item> {
        self.0.items.iter().cloned().map(Into::into).collect()
    }
}
