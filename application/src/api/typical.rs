//! Typical-object suggestion definitions.

use derive_more::{Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, read};
use uuid::Uuid;

use crate::{api, Context};

/// A `Variant` suggested as typical for a `RoomKind`, with its catalog
/// labels.
#[derive(Clone, Debug, From)]
pub struct TypicalObject(read::typical::Entry);

/// A `Variant` suggested as typical for a `RoomKind`.
#[graphql_object(context = Context)]
impl TypicalObject {
    /// Unique identifier of this `TypicalObject` association.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Display position of this `TypicalObject` in the suggestion list.
    #[must_use]
    pub fn position(&self) -> i32 {
        self.0.position.into()
    }

    /// `Category` of the suggested `Object`.
    #[must_use]
    pub fn category(&self) -> api::Category {
        #[expect(
            unsafe_code,
            reason = "suggestion loaded from repository guarantees \
                      `Category` existence"
        )]
        unsafe {
            api::Category::new_unchecked(self.0.category_id)
        }
    }

    /// Name of the `Category` of the suggested `Object`.
    #[must_use]
    pub fn category_name(&self) -> api::category::Name {
        self.0.category_name.clone().into()
    }

    /// Suggested `Object`.
    #[must_use]
    pub fn object(&self) -> api::Object {
        #[expect(
            unsafe_code,
            reason = "suggestion loaded from repository guarantees `Object` \
                      existence"
        )]
        unsafe {
            api::Object::new_unchecked(self.0.object_id)
        }
    }

    /// Name of the suggested `Object`.
    #[must_use]
    pub fn object_name(&self) -> api::object::Name {
        self.0.object_name.clone().into()
    }

    /// Suggested `Variant`.
    #[must_use]
    pub fn variant(&self) -> api::Variant {
        #[expect(
            unsafe_code,
            reason = "suggestion loaded from repository guarantees \
                      `Variant` existence"
        )]
        unsafe {
            api::Variant::new_unchecked(self.0.variant_id)
        }
    }

    /// Brand of the suggested `Variant`, if any.
    #[must_use]
    pub fn brand(&self) -> Option<api::variant::Brand> {
        self.0.brand.clone().map(Into::into)
    }

    /// Material of the suggested `Variant`, if any.
    #[must_use]
    pub fn material(&self) -> Option<api::variant::Material> {
        self.0.material.clone().map(Into::into)
    }
}

/// Unique identifier of a `TypicalObject` association.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::typical_object::Id)]
#[into(domain::typical_object::Id)]
#[graphql(name = "TypicalObjectId", transparent)]
pub struct Id(Uuid);
