use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How a recipe converts materials into products over time. Exactly one
/// variant applies: a fixed execution duration, or a probabilistic byproduct
/// fraction. A recipe with both or neither is rejected at catalog build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Timing {
    /// Seconds per execution. Always positive.
    Duration(f64),
    /// Byproduct ratio in (0, 1].
    Fraction(f64),
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timing::Duration(s) => write!(f, "{}s", trim_number(*s)),
            Timing::Fraction(p) => write!(f, "{}%", trim_number(p * 100.0)),
        }
    }
}

/// Format a number without a trailing `.0` for whole values, so labels read
/// `1s` and `4%` rather than `1.0s` and `4.0%`.
fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// One production rule: consumes all `materials` jointly to produce all
/// `products` jointly, at a building of type `building`.
///
/// Recipes have no identity beyond their content. Two recipes with identical
/// products, materials, building, and timing are interchangeable, and
/// [`Recipe::fingerprint`] is equal for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Outputs of one execution: resource id to positive quantity.
    pub products: BTreeMap<String, u32>,
    /// Inputs consumed per execution: resource id to positive quantity.
    pub materials: BTreeMap<String, u32>,
    /// Building-type id; must resolve in the catalog's registry.
    pub building: String,
    pub timing: Timing,
}

impl Recipe {
    /// Content-derived identifier, stable across runs and processes. Built
    /// from the sorted products, sorted materials, building, and timing, so
    /// identical recipes share a fingerprint and differing ones never collide
    /// on memory identity.
    pub fn fingerprint(&self) -> String {
        let mut out = String::from("recipe:");
        for (id, qty) in &self.products {
            out.push_str(id);
            out.push('*');
            out.push_str(&qty.to_string());
            out.push(',');
        }
        out.push('<');
        for (id, qty) in &self.materials {
            out.push_str(id);
            out.push('*');
            out.push_str(&qty.to_string());
            out.push(',');
        }
        out.push('@');
        out.push_str(&self.building);
        out.push('/');
        out.push_str(&self.timing.to_string());
        out
    }
}

impl fmt::Display for Recipe {
    /// Human-readable reference, e.g. `iron_ingot <- iron_ore`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let products: Vec<&str> = self.products.keys().map(String::as_str).collect();
        let materials: Vec<&str> = self.materials.keys().map(String::as_str).collect();
        write!(f, "{} <- {}", products.join(", "), materials.join(", "))
    }
}
