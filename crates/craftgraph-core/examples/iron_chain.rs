//! Crafting-chain example: iron ore -> iron ingot -> gear, plus a matrix.
//!
//! Builds a small catalog in code, validates it, derives both graph views,
//! and prints the gear's ancestry subgraph as JSON (the neutral form a
//! rendering adapter would consume).
//!
//! Run with: `cargo run -p craftgraph-core --example iron_chain`

use craftgraph_core::catalog::{
    BuildingTypeRecord, Catalog, CatalogRecords, ItemRecord, MatrixRecord, RecipeRecord,
};
use craftgraph_core::graph::{crafting_graph, dependency_graph, extract_ancestry};
use craftgraph_core::validate::validate;
use std::collections::BTreeMap;

fn item(id: &str, name: &str) -> ItemRecord {
    ItemRecord {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
    }
}

fn map(entries: &[(&str, u32)]) -> Option<BTreeMap<String, u32>> {
    Some(
        entries
            .iter()
            .map(|(id, q)| (id.to_string(), *q))
            .collect(),
    )
}

fn recipe(products: &[(&str, u32)], materials: &[(&str, u32)], time: f64) -> RecipeRecord {
    RecipeRecord {
        products: map(products),
        materials: map(materials),
        building: Some("assembler".to_string()),
        time: Some(time),
        fraction: None,
    }
}

fn main() {
    let records = CatalogRecords {
        items: vec![
            item("iron_ore", "Iron Ore"),
            item("iron_ingot", "Iron Ingot"),
            item("gear", "Gear"),
        ],
        matrices: vec![MatrixRecord {
            id: Some("blue_matrix".into()),
            name: Some("Electromagnetic Matrix".into()),
            color: Some("blue".into()),
        }],
        building_types: vec![BuildingTypeRecord {
            id: Some("assembler".into()),
            name: Some("Assembling Machine".into()),
        }],
        recipes: vec![
            recipe(&[("iron_ingot", 1)], &[("iron_ore", 1)], 1.0),
            recipe(&[("gear", 1)], &[("iron_ingot", 2)], 2.0),
            recipe(&[("blue_matrix", 1)], &[("gear", 1), ("iron_ingot", 1)], 4.0),
        ],
        ..Default::default()
    };

    let catalog = Catalog::from_records(records).expect("records are well-formed");
    if let Err(violations) = validate(&catalog) {
        for v in violations {
            eprintln!("{v}");
        }
        std::process::exit(1);
    }

    let crafting = crafting_graph(&catalog);
    let dependencies = dependency_graph(&catalog);
    println!(
        "{}: {} nodes, {} edges",
        crafting.name(),
        crafting.node_count(),
        crafting.edge_count()
    );
    println!(
        "{}: {} nodes, {} edges",
        dependencies.name(),
        dependencies.node_count(),
        dependencies.edge_count()
    );

    let ancestry = extract_ancestry(&dependencies, "gear").expect("gear is in the graph");
    let json = serde_json::to_string_pretty(&ancestry).expect("graph serializes");
    println!("{json}");
}
