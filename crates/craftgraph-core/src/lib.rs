//! Craftgraph Core -- catalog resolution and dependency-graph construction
//! for declarative crafting economies.
//!
//! The pipeline is linear: decoded configuration records are assembled into
//! an immutable [`catalog::Catalog`], checked by [`validate::validate`]
//! (all-or-nothing; a graph is never built from an invalid catalog), and then
//! turned into renderer-neutral graph views by [`graph::crafting_graph`] and
//! [`graph::dependency_graph`]. [`graph::extract_ancestry`] restricts a view
//! to the transitive ancestry of one target resource.
//!
//! # Key Types
//!
//! - [`resource::Resource`] -- closed union of item, matrix, building, and
//!   natural-resource variants.
//! - [`recipe::Recipe`] -- one production rule with a tagged [`recipe::Timing`]
//!   (duration or byproduct fraction) and a content-derived fingerprint used
//!   as its graph-node key.
//! - [`catalog::Catalog`] -- the resolved entity set plus the building-type
//!   registry; immutable after construction.
//! - [`craftable::Craftability`] -- per-catalog memo answering whether any
//!   recipe produces a given resource.
//! - [`graph::Graph`] -- named nodes-and-edges value handed to rendering
//!   adapters; carries no layout or output-format knowledge.

pub mod catalog;
pub mod craftable;
pub mod graph;
pub mod recipe;
pub mod resource;
pub mod validate;
