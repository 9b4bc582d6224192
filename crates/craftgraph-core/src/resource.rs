use serde::{Deserialize, Serialize};

/// A plain craftable (or intermediate) item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier, unique across the whole catalog.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A science matrix: an abstract research output with a presentation color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix {
    pub id: String,
    pub name: String,
    /// Presentation hint, opaque to the core.
    pub color: String,
}

/// A placeable building. `building_type` references the building-type registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub name: String,
    pub building_type: String,
}

/// A raw input harvested from the world rather than produced by a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalResource {
    pub id: String,
    pub name: String,
}

/// Any entity participating in production. Closed set: a resource belongs to
/// exactly one variant for its lifetime, and consumers match on the variant
/// instead of inspecting types dynamically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resource {
    Item(Item),
    Matrix(Matrix),
    Building(Building),
    Natural(NaturalResource),
}

/// Discriminant for [`Resource`], for callers that only need the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Item,
    Matrix,
    Building,
    Natural,
}

impl Resource {
    pub fn id(&self) -> &str {
        match self {
            Resource::Item(r) => &r.id,
            Resource::Matrix(r) => &r.id,
            Resource::Building(r) => &r.id,
            Resource::Natural(r) => &r.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Resource::Item(r) => &r.name,
            Resource::Matrix(r) => &r.name,
            Resource::Building(r) => &r.name,
            Resource::Natural(r) => &r.name,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Item(_) => ResourceKind::Item,
            Resource::Matrix(_) => ResourceKind::Matrix,
            Resource::Building(_) => ResourceKind::Building,
            Resource::Natural(_) => ResourceKind::Natural,
        }
    }
}
