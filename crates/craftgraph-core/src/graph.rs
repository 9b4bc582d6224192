//! Directed graph views over a validated catalog.
//!
//! Two views are derived, both pure functions of the catalog:
//!
//! - [`crafting_graph`]: three tiers, material -> recipe-node -> product. The
//!   recipe pseudo-node preserves the fact that one execution jointly
//!   consumes all materials to jointly produce all products.
//! - [`dependency_graph`]: two tiers, product -> material. Collapses the
//!   recipe join into pairwise edges; callers that need the joint structure
//!   must use the crafting graph.
//!
//! [`extract_ancestry`] restricts a graph to the transitive ancestry of one
//! target node. The [`Graph`] value itself is renderer-neutral: adapters
//! consume nodes and edges (or the serde form) and decide layout and output
//! naming themselves.

use crate::catalog::Catalog;
use crate::craftable::Craftability;
use crate::recipe::Timing;
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

/// Canonical name of the crafting (three-tier) view.
pub const CRAFTING_GRAPH: &str = "crafting_graph";
/// Canonical name of the dependency (collapsed) view.
pub const DEPENDENCY_GRAPH: &str = "dependency_graph";

const CRAFTABLE_COLOR: &str = "lightblue";
const BASE_COLOR: &str = "lightgreen";
const EDGE_COLOR: &str = "lightgray";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("target resource '{0}' is not a node of this graph")]
    UnknownTarget(String),
}

// ---------------------------------------------------------------------------
// Graph value
// ---------------------------------------------------------------------------

/// A graph node: resource, matrix, or recipe pseudo-node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    /// Color doubles as the category: craftable vs. base for items,
    /// the declared color for matrices, edge-gray for recipe nodes.
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Recipe annotations carried by dependency-graph edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DependencyDetail {
    pub material_quantity: u32,
    pub product_quantity: u32,
    pub timing: Timing,
}

/// A directed edge. `detail` is populated on dependency-graph edges only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub label: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<DependencyDetail>,
}

/// A named directed graph, handed to rendering adapters as-is.
#[derive(Debug, Clone, Serialize)]
pub struct Graph {
    name: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Graph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn add_node(&mut self, node: Node) {
        match self.index.get(&node.id) {
            Some(&i) => self.nodes[i] = node,
            None => {
                self.index.insert(node.id.clone(), self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Build the three-tier crafting graph: every item, matrix, and natural
/// resource as a node (colored by craftability), one pseudo-node per recipe
/// keyed by its content fingerprint, and quantity-labeled edges material ->
/// recipe -> product.
pub fn crafting_graph(catalog: &Catalog) -> Graph {
    let mut graph = Graph::new(CRAFTING_GRAPH);
    add_resource_nodes(&mut graph, catalog);

    for recipe in catalog.recipes() {
        let recipe_id = recipe.fingerprint();
        let building = catalog
            .building_type_name(&recipe.building)
            .unwrap_or(&recipe.building);
        graph.add_node(Node {
            id: recipe_id.clone(),
            label: format!("{} ({})", building, recipe.timing),
            color: EDGE_COLOR.to_string(),
            weight: None,
        });

        for (material, &quantity) in &recipe.materials {
            graph.add_edge(Edge {
                from: material.clone(),
                to: recipe_id.clone(),
                label: quantity.to_string(),
                color: EDGE_COLOR.to_string(),
                weight: Some(f64::from(quantity)),
                detail: None,
            });
        }
        for (product, &quantity) in &recipe.products {
            graph.add_edge(Edge {
                from: recipe_id.clone(),
                to: product.clone(),
                label: quantity.to_string(),
                color: EDGE_COLOR.to_string(),
                weight: Some(f64::from(quantity)),
                detail: None,
            });
        }
    }

    graph
}

/// Build the collapsed dependency graph: items, matrices, and natural
/// resources only, with one product -> material edge per (product, material)
/// pair of every recipe, annotated with both quantities and the timing.
pub fn dependency_graph(catalog: &Catalog) -> Graph {
    let mut graph = Graph::new(DEPENDENCY_GRAPH);
    add_resource_nodes(&mut graph, catalog);

    for recipe in catalog.recipes() {
        for (product, &product_quantity) in &recipe.products {
            for (material, &material_quantity) in &recipe.materials {
                graph.add_edge(Edge {
                    from: product.clone(),
                    to: material.clone(),
                    label: material_quantity.to_string(),
                    color: EDGE_COLOR.to_string(),
                    weight: Some(f64::from(material_quantity)),
                    detail: Some(DependencyDetail {
                        material_quantity,
                        product_quantity,
                        timing: recipe.timing,
                    }),
                });
            }
        }
    }

    graph
}

/// The node tier shared by both views. Items are classified two-ways:
/// craftable or base; natural resources are always base; matrices carry
/// their declared color.
fn add_resource_nodes(graph: &mut Graph, catalog: &Catalog) {
    let resolver = Craftability::new(catalog);

    for item in catalog.items() {
        let color = if resolver.craftable(&item.id) {
            CRAFTABLE_COLOR
        } else {
            BASE_COLOR
        };
        graph.add_node(Node {
            id: item.id.clone(),
            label: item.name.clone(),
            color: color.to_string(),
            weight: None,
        });
    }
    for natural in catalog.natural_resources() {
        graph.add_node(Node {
            id: natural.id.clone(),
            label: natural.name.clone(),
            color: BASE_COLOR.to_string(),
            weight: None,
        });
    }
    for matrix in catalog.matrices() {
        graph.add_node(Node {
            id: matrix.id.clone(),
            label: matrix.name.clone(),
            color: matrix.color.clone(),
            weight: None,
        });
    }
}

// ---------------------------------------------------------------------------
// Ancestry extraction
// ---------------------------------------------------------------------------

/// Induced subgraph over the target and everything it transitively depends
/// on, found by following edges forward from the target (product -> material
/// on the dependency graph).
///
/// Standard reachability, not path enumeration: each node is visited at most
/// once, so cycles (mutual ingredients) terminate and appear exactly once.
pub fn extract_ancestry(graph: &Graph, target: &str) -> Result<Graph, GraphError> {
    if !graph.contains_node(target) {
        return Err(GraphError::UnknownTarget(target.to_string()));
    }

    let mut outgoing: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in graph.edges() {
        outgoing
            .entry(edge.from.as_str())
            .or_default()
            .push(edge.to.as_str());
    }

    let mut reached: HashSet<&str> = HashSet::new();
    let mut frontier: VecDeque<&str> = VecDeque::new();
    reached.insert(target);
    frontier.push_back(target);
    while let Some(current) = frontier.pop_front() {
        for &next in outgoing.get(current).into_iter().flatten() {
            if reached.insert(next) {
                frontier.push_back(next);
            }
        }
    }

    let mut ancestry = Graph::new(format!("{}_{}", graph.name(), target));
    for node in graph.nodes() {
        if reached.contains(node.id.as_str()) {
            ancestry.add_node(node.clone());
        }
    }
    for edge in graph.edges() {
        if reached.contains(edge.from.as_str()) && reached.contains(edge.to.as_str()) {
            ancestry.add_edge(edge.clone());
        }
    }

    Ok(ancestry)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BuildingTypeRecord, CatalogRecords, ItemRecord, RecipeRecord};
    use std::collections::BTreeMap;

    fn item(id: &str, name: &str) -> ItemRecord {
        ItemRecord {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
        }
    }

    fn quantities(entries: &[(&str, u32)]) -> Option<BTreeMap<String, u32>> {
        Some(
            entries
                .iter()
                .map(|(id, q)| (id.to_string(), *q))
                .collect(),
        )
    }

    fn timed_recipe(
        products: &[(&str, u32)],
        materials: &[(&str, u32)],
        time: f64,
    ) -> RecipeRecord {
        RecipeRecord {
            products: quantities(products),
            materials: quantities(materials),
            building: Some("smelter".into()),
            time: Some(time),
            fraction: None,
        }
    }

    fn catalog_of(items: &[(&str, &str)], recipes: Vec<RecipeRecord>) -> Catalog {
        let records = CatalogRecords {
            items: items.iter().map(|(id, name)| item(id, name)).collect(),
            building_types: vec![BuildingTypeRecord {
                id: Some("smelter".into()),
                name: Some("Smelter".into()),
            }],
            recipes,
            ..Default::default()
        };
        Catalog::from_records(records).unwrap()
    }

    fn smelting_catalog() -> Catalog {
        catalog_of(
            &[("iron_ore", "Iron Ore"), ("iron_ingot", "Iron Ingot")],
            vec![timed_recipe(&[("iron_ingot", 1)], &[("iron_ore", 1)], 1.0)],
        )
    }

    #[test]
    fn crafting_graph_has_three_tiers() {
        let catalog = smelting_catalog();
        let graph = crafting_graph(&catalog);

        assert_eq!(graph.name(), CRAFTING_GRAPH);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        let recipe_id = catalog.recipes()[0].fingerprint();
        let recipe_node = graph.node(&recipe_id).unwrap();
        assert_eq!(recipe_node.label, "Smelter (1s)");

        assert_eq!(graph.edges()[0].from, "iron_ore");
        assert_eq!(graph.edges()[0].to, recipe_id);
        assert_eq!(graph.edges()[1].from, recipe_id);
        assert_eq!(graph.edges()[1].to, "iron_ingot");
    }

    #[test]
    fn nodes_are_classified_by_craftability() {
        let catalog = smelting_catalog();
        let graph = crafting_graph(&catalog);
        assert_eq!(graph.node("iron_ingot").unwrap().color, CRAFTABLE_COLOR);
        assert_eq!(graph.node("iron_ore").unwrap().color, BASE_COLOR);
    }

    #[test]
    fn matrix_nodes_keep_declared_color() {
        let mut records = CatalogRecords::default();
        records.matrices = vec![crate::catalog::MatrixRecord {
            id: Some("blue_matrix".into()),
            name: Some("Electromagnetic Matrix".into()),
            color: Some("blue".into()),
        }];
        let catalog = Catalog::from_records(records).unwrap();
        let graph = dependency_graph(&catalog);
        assert_eq!(graph.node("blue_matrix").unwrap().color, "blue");
    }

    #[test]
    fn joint_recipe_stays_joint_in_crafting_graph() {
        // Two materials jointly produce two products through one recipe node.
        let catalog = catalog_of(
            &[
                ("iron_ore", "Iron Ore"),
                ("coal", "Coal"),
                ("steel", "Steel"),
                ("slag", "Slag"),
            ],
            vec![timed_recipe(
                &[("steel", 1), ("slag", 2)],
                &[("iron_ore", 2), ("coal", 1)],
                3.0,
            )],
        );
        let graph = crafting_graph(&catalog);

        // 4 resources + 1 recipe node; 2 in-edges + 2 out-edges.
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 4);

        let recipe_id = catalog.recipes()[0].fingerprint();
        let into_recipe = graph.edges().iter().filter(|e| e.to == recipe_id).count();
        let out_of_recipe = graph.edges().iter().filter(|e| e.from == recipe_id).count();
        assert_eq!(into_recipe, 2);
        assert_eq!(out_of_recipe, 2);
    }

    #[test]
    fn dependency_graph_collapses_to_pairwise_edges() {
        let catalog = catalog_of(
            &[
                ("iron_ore", "Iron Ore"),
                ("coal", "Coal"),
                ("steel", "Steel"),
                ("slag", "Slag"),
            ],
            vec![timed_recipe(
                &[("steel", 1), ("slag", 2)],
                &[("iron_ore", 2), ("coal", 1)],
                3.0,
            )],
        );
        let graph = dependency_graph(&catalog);

        // No recipe pseudo-nodes; products x materials edges.
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);

        let edge = graph
            .edges()
            .iter()
            .find(|e| e.from == "steel" && e.to == "iron_ore")
            .unwrap();
        let detail = edge.detail.unwrap();
        assert_eq!(detail.material_quantity, 2);
        assert_eq!(detail.product_quantity, 1);
        assert_eq!(detail.timing, Timing::Duration(3.0));
    }

    #[test]
    fn fraction_recipe_labels_as_percentage() {
        let catalog = catalog_of(
            &[("hydrogen", "Hydrogen"), ("deuterium", "Deuterium")],
            vec![RecipeRecord {
                products: quantities(&[("deuterium", 1)]),
                materials: quantities(&[("hydrogen", 1)]),
                building: Some("smelter".into()),
                time: None,
                fraction: Some(0.01),
            }],
        );
        let graph = crafting_graph(&catalog);
        let recipe_id = catalog.recipes()[0].fingerprint();
        assert_eq!(graph.node(&recipe_id).unwrap().label, "Smelter (1%)");
    }

    #[test]
    fn ancestry_of_unknown_target_errors() {
        let graph = dependency_graph(&smelting_catalog());
        let err = extract_ancestry(&graph, "unobtainium").unwrap_err();
        assert!(matches!(err, GraphError::UnknownTarget(id) if id == "unobtainium"));
    }

    #[test]
    fn ancestry_follows_dependencies_not_dependents() {
        // gear <- iron_ingot <- iron_ore; ancestry of iron_ingot must include
        // its material but not the gear built from it.
        let catalog = catalog_of(
            &[
                ("iron_ore", "Iron Ore"),
                ("iron_ingot", "Iron Ingot"),
                ("gear", "Gear"),
            ],
            vec![
                timed_recipe(&[("iron_ingot", 1)], &[("iron_ore", 1)], 1.0),
                timed_recipe(&[("gear", 1)], &[("iron_ingot", 2)], 1.0),
            ],
        );
        let graph = dependency_graph(&catalog);
        let ancestry = extract_ancestry(&graph, "iron_ingot").unwrap();

        assert!(ancestry.contains_node("iron_ingot"));
        assert!(ancestry.contains_node("iron_ore"));
        assert!(!ancestry.contains_node("gear"));
        assert_eq!(ancestry.edge_count(), 1);
    }

    #[test]
    fn ancestry_terminates_on_cycles() {
        // X and Y are mutual ingredients.
        let catalog = catalog_of(
            &[("x", "X"), ("y", "Y")],
            vec![
                timed_recipe(&[("x", 1)], &[("y", 1)], 1.0),
                timed_recipe(&[("y", 1)], &[("x", 1)], 1.0),
            ],
        );
        let graph = dependency_graph(&catalog);
        let ancestry = extract_ancestry(&graph, "x").unwrap();

        assert_eq!(ancestry.node_count(), 2);
        assert!(ancestry.contains_node("x"));
        assert!(ancestry.contains_node("y"));
    }

    #[test]
    fn graph_serializes_without_internal_index() {
        let graph = dependency_graph(&smelting_catalog());
        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["name"], "dependency_graph");
        assert!(json["nodes"].is_array());
        assert!(json["edges"].is_array());
        assert!(json.get("index").is_none());
    }
}
