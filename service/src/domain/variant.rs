//! [`Variant`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

use crate::domain::object;
#[cfg(doc)]
use crate::domain::Object;

/// [`Object`] refined by an optional [`Brand`] and [`Material`].
///
/// A [`Variant`] with neither is the "generic" one. Unique per
/// ([`Object`], [`Brand`], [`Material`]) triple.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Variant {
    /// ID of this [`Variant`].
    pub id: Id,

    /// ID of the [`Object`] this [`Variant`] refines.
    pub object_id: object::Id,

    /// [`Brand`] of this [`Variant`], if any.
    pub brand: Option<Brand>,

    /// [`Material`] of this [`Variant`], if any.
    pub material: Option<Material>,
}

impl Variant {
    /// Returns the [`Spec`] distinguishing this [`Variant`] within its
    /// [`Object`].
    #[must_use]
    pub fn spec(&self) -> Spec {
        Spec {
            brand: self.brand.clone(),
            material: self.material.clone(),
        }
    }
}

/// Brand/material refinement distinguishing a [`Variant`] within its
/// [`Object`].
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Spec {
    /// [`Brand`] of the [`Variant`], if any.
    pub brand: Option<Brand>,

    /// [`Material`] of the [`Variant`], if any.
    pub material: Option<Material>,
}

/// ID of a [`Variant`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, FromStr, Hash, Into,
    PartialEq,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Brand of a [`Variant`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Brand(String);

impl Brand {
    /// Creates a new [`Brand`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `brand` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(brand: impl Into<String>) -> Self {
        Self(brand.into())
    }

    /// Creates a new [`Brand`] if the given `brand` is valid.
    #[must_use]
    pub fn new(brand: impl Into<String>) -> Option<Self> {
        let brand = brand.into();
        Self::check(&brand).then_some(Self(brand))
    }

    /// Checks whether the given `brand` is a valid [`Brand`].
    fn check(brand: impl AsRef<str>) -> bool {
        let brand = brand.as_ref();
        brand.trim() == brand && !brand.is_empty() && brand.len() <= 100
    }
}

impl FromStr for Brand {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Brand`")
    }
}

/// Material of a [`Variant`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Material(String);

impl Material {
    /// Creates a new [`Material`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `material` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(material: impl Into<String>) -> Self {
        Self(material.into())
    }

    /// Creates a new [`Material`] if the given `material` is valid.
    #[must_use]
    pub fn new(material: impl Into<String>) -> Option<Self> {
        let material = material.into();
        Self::check(&material).then_some(Self(material))
    }

    /// Checks whether the given `material` is a valid [`Material`].
    fn check(material: impl AsRef<str>) -> bool {
        let material = material.as_ref();
        material.trim() == material
            && !material.is_empty()
            && material.len() <= 100
    }
}

impl FromStr for Material {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Material`")
    }
}
