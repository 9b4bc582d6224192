//! Catalog assembly from decoded configuration records.
//!
//! The builder maps per-entity-kind records onto the entity model and rejects
//! malformed records (missing fields, non-positive quantities, bad timing).
//! It performs no cross-entity checks; referential integrity is the job of
//! [`crate::validate`], kept separate so validation rules can evolve and be
//! tested in isolation from parsing.

use crate::recipe::{Recipe, Timing};
use crate::resource::{Building, Item, Matrix, NaturalResource, Resource};
use serde::Deserialize;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while assembling a [`Catalog`]. All are fatal: there is no
/// partial or degraded catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A record is missing a required field.
    #[error("malformed {kind} record: missing required field '{field}'")]
    MalformedEntity {
        kind: &'static str,
        field: &'static str,
    },

    /// A recipe record declares both `time` and `fraction`.
    #[error("recipe '{recipe}' declares both 'time' and 'fraction'")]
    AmbiguousTiming { recipe: String },

    /// A recipe record declares neither `time` nor `fraction`.
    #[error("recipe '{recipe}' requires either a 'time' or a 'fraction' property")]
    MissingTiming { recipe: String },

    /// A product or material quantity is zero.
    #[error("recipe '{recipe}': quantity for '{id}' must be positive")]
    NonPositiveQuantity { recipe: String, id: String },

    /// A recipe duration is not positive.
    #[error("recipe '{recipe}': time must be positive, got {value}")]
    InvalidDuration { recipe: String, value: f64 },

    /// A recipe fraction falls outside (0, 1].
    #[error("recipe '{recipe}': fraction must be in (0, 1], got {value}")]
    InvalidFraction { recipe: String, value: f64 },
}

// ---------------------------------------------------------------------------
// Configuration records
// ---------------------------------------------------------------------------
//
// Records mirror the on-disk shape: every field is optional at decode time so
// that a missing field surfaces as a construction-time `MalformedEntity`
// naming the entity kind and field, not as an opaque deserializer message.

/// An `items` or `natural-resources` record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A `matrices` record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatrixRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// A `buildings` record. The on-disk field is `type`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildingRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub building_type: Option<String>,
}

/// A `building-types` registry record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildingTypeRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A `recipes` record. `time` and `fraction` are mutually exclusive; the
/// builder folds them into [`Timing`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeRecord {
    #[serde(default)]
    pub products: Option<BTreeMap<String, u32>>,
    #[serde(default)]
    pub materials: Option<BTreeMap<String, u32>>,
    #[serde(default)]
    pub building: Option<String>,
    #[serde(default)]
    pub time: Option<f64>,
    #[serde(default)]
    pub fraction: Option<f64>,
}

/// The decoded configuration snapshot: one sequence per entity kind.
///
/// Accepts both `building-types` and `building_types` spellings for the
/// registry key, and the optional `natural-resources` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogRecords {
    #[serde(default)]
    pub items: Vec<ItemRecord>,
    #[serde(default)]
    pub matrices: Vec<MatrixRecord>,
    #[serde(default)]
    pub buildings: Vec<BuildingRecord>,
    #[serde(default, alias = "building-types")]
    pub building_types: Vec<BuildingTypeRecord>,
    #[serde(default, alias = "natural-resources")]
    pub natural_resources: Vec<ItemRecord>,
    #[serde(default)]
    pub recipes: Vec<RecipeRecord>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The resolved entity set: resources, the building-type registry, and
/// recipes. Built once from a configuration snapshot and immutable for the
/// rest of the process; every derived structure (craftability memo, graphs)
/// is computed from it and never feeds back.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    matrices: Vec<Matrix>,
    buildings: Vec<Building>,
    naturals: Vec<NaturalResource>,
    building_types: BTreeMap<String, String>,
    recipes: Vec<Recipe>,
}

impl Catalog {
    /// Assemble a catalog from decoded records. Rejects malformed records;
    /// does not check cross-entity references.
    pub fn from_records(records: CatalogRecords) -> Result<Self, CatalogError> {
        let items = records
            .items
            .into_iter()
            .map(|r| {
                Ok(Item {
                    id: require(r.id, "item", "id")?,
                    name: require(r.name, "item", "name")?,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let matrices = records
            .matrices
            .into_iter()
            .map(|r| {
                Ok(Matrix {
                    id: require(r.id, "matrix", "id")?,
                    name: require(r.name, "matrix", "name")?,
                    color: require(r.color, "matrix", "color")?,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let buildings = records
            .buildings
            .into_iter()
            .map(|r| {
                Ok(Building {
                    id: require(r.id, "building", "id")?,
                    name: require(r.name, "building", "name")?,
                    building_type: require(r.building_type, "building", "type")?,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let naturals = records
            .natural_resources
            .into_iter()
            .map(|r| {
                Ok(NaturalResource {
                    id: require(r.id, "natural resource", "id")?,
                    name: require(r.name, "natural resource", "name")?,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let mut building_types = BTreeMap::new();
        for r in records.building_types {
            let id = require(r.id, "building type", "id")?;
            let name = require(r.name, "building type", "name")?;
            building_types.insert(id, name);
        }

        let recipes = records
            .recipes
            .into_iter()
            .map(build_recipe)
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Ok(Self {
            items,
            matrices,
            buildings,
            naturals,
            building_types,
            recipes,
        })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn matrices(&self) -> &[Matrix] {
        &self.matrices
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn natural_resources(&self) -> &[NaturalResource] {
        &self.naturals
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// The building-type registry: building-type id to display name.
    pub fn building_types(&self) -> &BTreeMap<String, String> {
        &self.building_types
    }

    pub fn building_type_name(&self, id: &str) -> Option<&str> {
        self.building_types.get(id).map(String::as_str)
    }

    /// Every resource in the catalog, as the closed [`Resource`] union.
    /// Order: items, matrices, buildings, natural resources.
    pub fn resources(&self) -> impl Iterator<Item = Resource> + '_ {
        self.items
            .iter()
            .cloned()
            .map(Resource::Item)
            .chain(self.matrices.iter().cloned().map(Resource::Matrix))
            .chain(self.buildings.iter().cloned().map(Resource::Building))
            .chain(self.naturals.iter().cloned().map(Resource::Natural))
    }
}

fn require<T>(
    value: Option<T>,
    kind: &'static str,
    field: &'static str,
) -> Result<T, CatalogError> {
    value.ok_or(CatalogError::MalformedEntity { kind, field })
}

fn build_recipe(record: RecipeRecord) -> Result<Recipe, CatalogError> {
    let products = record.products.ok_or(CatalogError::MalformedEntity {
        kind: "recipe",
        field: "products",
    })?;
    let materials = record.materials.ok_or(CatalogError::MalformedEntity {
        kind: "recipe",
        field: "materials",
    })?;
    let building = record.building.ok_or(CatalogError::MalformedEntity {
        kind: "recipe",
        field: "building",
    })?;

    let reference = recipe_reference(&products, &materials);

    for (id, qty) in products.iter().chain(materials.iter()) {
        if *qty == 0 {
            return Err(CatalogError::NonPositiveQuantity {
                recipe: reference,
                id: id.clone(),
            });
        }
    }

    let timing = match (record.time, record.fraction) {
        (Some(_), Some(_)) => return Err(CatalogError::AmbiguousTiming { recipe: reference }),
        (None, None) => return Err(CatalogError::MissingTiming { recipe: reference }),
        (Some(t), None) if t <= 0.0 => {
            return Err(CatalogError::InvalidDuration {
                recipe: reference,
                value: t,
            });
        }
        (Some(t), None) => Timing::Duration(t),
        (None, Some(f)) if f <= 0.0 || f > 1.0 => {
            return Err(CatalogError::InvalidFraction {
                recipe: reference,
                value: f,
            });
        }
        (None, Some(f)) => Timing::Fraction(f),
    };

    Ok(Recipe {
        products,
        materials,
        building,
        timing,
    })
}

/// Render a recipe reference before the `Recipe` itself exists, matching
/// `Recipe`'s `Display` form.
fn recipe_reference(products: &BTreeMap<String, u32>, materials: &BTreeMap<String, u32>) -> String {
    let products: Vec<&str> = products.keys().map(String::as_str).collect();
    let materials: Vec<&str> = materials.keys().map(String::as_str).collect();
    format!("{} <- {}", products.join(", "), materials.join(", "))
}

// ===========================================================================
// Tests
// ===========================================================================
