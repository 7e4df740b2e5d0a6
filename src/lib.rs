//! Genscope Core - node graph primitives for pattern-generation trees
//!
//! This library provides the structural layer a text/pattern generator builds
//! on: labeled nodes carrying per-node attribute stores (bounds, repetition
//! counts, literal values) and outgoing relations to other nodes. A builder
//! stage grows the tree by attaching children; a walker stage later iterates
//! relations and reads attributes to drive output production. Both stages
//! live outside this crate.
//!
//! All nodes of one tree live in a [`NodeGraph`] arena and relations are
//! [`NodeId`] indices into it, so cyclic structures carry no ownership cycles.
//! Insertion into a relation set is keyed by id; value-based queries
//! ([`NodeGraph::contains_equal`], [`NodeGraph::detach_equal`]) compare nodes
//! structurally through the arena.

pub mod attrs;
pub mod error;
pub mod graph;
pub mod label;
pub mod node;

pub use attrs::{AttrMap, AttrValue};
pub use error::LabelError;
pub use graph::NodeGraph;
pub use label::Label;
pub use node::{Node, NodeId};
