//! Referential-integrity validation of an assembled catalog.
//!
//! Validation is a pure function of the catalog and is all-or-nothing: a
//! graph must never be built from a catalog that has not passed. The default
//! mode collects every violation in one pass, which is what you want when
//! authoring a large config; [`ValidationMode::FailFast`] stops at the first
//! violation for callers that only need a yes/no gate.

use crate::catalog::Catalog;
use crate::resource::ResourceKind;
use std::collections::HashSet;
use std::fmt;

/// What went wrong, per violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// A recipe's building-type id is not in the registry.
    UnknownBuilding,
    /// A recipe product id resolves to no item, matrix, or natural resource.
    UnknownProduct,
    /// A recipe material id resolves to no item, matrix, or natural resource.
    UnknownMaterial,
    /// The same resource id is declared more than once.
    DuplicateResourceId,
    /// A recipe's product map is empty.
    EmptyProductSet,
    /// A recipe's material map is empty.
    EmptyMaterialSet,
}

/// One referential-integrity violation: the kind, the offending recipe or
/// resource rendered human-readably, and the invalid identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub subject: String,
    pub id: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationKind::UnknownBuilding => {
                write!(f, "recipe '{}': unknown building type '{}'", self.subject, self.id)
            }
            ViolationKind::UnknownProduct => {
                write!(f, "recipe '{}': unknown product '{}'", self.subject, self.id)
            }
            ViolationKind::UnknownMaterial => {
                write!(f, "recipe '{}': unknown material '{}'", self.subject, self.id)
            }
            ViolationKind::DuplicateResourceId => {
                write!(f, "{}: duplicate resource id '{}'", self.subject, self.id)
            }
            ViolationKind::EmptyProductSet => {
                write!(f, "recipe '{}': empty product set", self.subject)
            }
            ViolationKind::EmptyMaterialSet => {
                write!(f, "recipe '{}': empty material set", self.subject)
            }
        }
    }
}

/// Whether to report every violation or stop at the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    #[default]
    Exhaustive,
    FailFast,
}

/// Validate with the default exhaustive mode.
pub fn validate(catalog: &Catalog) -> Result<(), Vec<Violation>> {
    validate_with(catalog, ValidationMode::Exhaustive)
}

/// Check every catalog invariant: unique resource ids, registered building
/// types, non-empty product/material sets, and product/material ids that
/// resolve to an item, matrix, or natural resource (never a building).
pub fn validate_with(catalog: &Catalog, mode: ValidationMode) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut ingredient_ids: HashSet<String> = HashSet::new();

    let resources: Vec<_> = catalog.resources().collect();
    for resource in &resources {
        if !seen.insert(resource.id()) {
            violations.push(Violation {
                kind: ViolationKind::DuplicateResourceId,
                subject: format!("{} '{}'", kind_label(resource.kind()), resource.name()),
                id: resource.id().to_string(),
            });
            if mode == ValidationMode::FailFast {
                return Err(violations);
            }
        }
        // Buildings are never valid recipe endpoints.
        if resource.kind() != ResourceKind::Building {
            ingredient_ids.insert(resource.id().to_string());
        }
    }

    for recipe in catalog.recipes() {
        let subject = recipe.to_string();
        let mut found = Vec::new();

        if catalog.building_type_name(&recipe.building).is_none() {
            found.push(Violation {
                kind: ViolationKind::UnknownBuilding,
                subject: subject.clone(),
                id: recipe.building.clone(),
            });
        }
        if recipe.products.is_empty() {
            found.push(Violation {
                kind: ViolationKind::EmptyProductSet,
                subject: subject.clone(),
                id: String::new(),
            });
        }
        if recipe.materials.is_empty() {
            found.push(Violation {
                kind: ViolationKind::EmptyMaterialSet,
                subject: subject.clone(),
                id: String::new(),
            });
        }
        for id in recipe.products.keys() {
            if !ingredient_ids.contains(id) {
                found.push(Violation {
                    kind: ViolationKind::UnknownProduct,
                    subject: subject.clone(),
                    id: id.clone(),
                });
            }
        }
        for id in recipe.materials.keys() {
            if !ingredient_ids.contains(id) {
                found.push(Violation {
                    kind: ViolationKind::UnknownMaterial,
                    subject: subject.clone(),
                    id: id.clone(),
                });
            }
        }

        if mode == ValidationMode::FailFast && !found.is_empty() {
            found.truncate(1);
            return Err(found);
        }
        violations.extend(found);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn kind_label(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Item => "item",
        ResourceKind::Matrix => "matrix",
        ResourceKind::Building => "building",
        ResourceKind::Natural => "natural resource",
    }
}

// ===========================================================================
// Tests
// ===========================================================================
