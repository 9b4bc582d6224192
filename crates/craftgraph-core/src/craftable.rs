//! Per-catalog craftability memo.
//!
//! A resource is craftable iff at least one recipe lists it as a product.
//! That is a static property of an immutable catalog, so the answer is
//! computed once per id and cached; the graph builder asks once per node.
//! The cache is scoped to the catalog instance, never process-wide, so
//! multiple catalogs in one process cannot alias each other's answers.

use crate::catalog::Catalog;
use std::collections::HashMap;
use std::sync::RwLock;

/// Memoizing craftability resolver borrowed from one [`Catalog`].
#[derive(Debug)]
pub struct Craftability<'a> {
    catalog: &'a Catalog,
    cache: RwLock<HashMap<String, bool>>,
}

impl<'a> Craftability<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// True iff `id` appears among the products of at least one recipe.
    ///
    /// First call for an id scans the recipe list; later calls hit the cache.
    /// The value is computed outside the write lock and published once, so a
    /// resolver shared across threads converges on the same answer while
    /// tolerating redundant computation instead of requiring exclusivity.
    pub fn craftable(&self, id: &str) -> bool {
        if let Ok(cache) = self.cache.read()
            && let Some(&known) = cache.get(id)
        {
            return known;
        }

        let value = self
            .catalog
            .recipes()
            .iter()
            .any(|recipe| recipe.products.contains_key(id));

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(id.to_string(), value);
        }
        value
    }

    #[cfg(test)]
    fn cached(&self, id: &str) -> Option<bool> {
        self.cache.read().ok().and_then(|c| c.get(id).copied())
    }
}
