//! Node arena and value-equality queries

use crate::node::{Node, NodeId};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Arena owning every node of one generation graph
///
/// Nodes are stored by id and relations between them are ids, so the arena is
/// the single owner of all node state. Dropping the arena drops every node
/// exactly once, no matter how the relation graph is shaped.
///
/// The arena is also where value equality lives: comparing two nodes
/// structurally means chasing their links, which only the arena can resolve.
///
/// Not synchronized; callers needing concurrent mutation must wrap the graph
/// in their own lock or confine it to one thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeGraph {
    nodes: HashMap<NodeId, Node>,
    next_node_id: NodeId,
}

impl NodeGraph {
    /// Creates a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to the graph and returns its id
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = self.next_node_id;
        self.next_node_id += 1;
        debug!("add node {id} ({})", node.label());
        self.nodes.insert(id, node);
        id
    }

    /// Fetches a node by id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Fetches a node by id for mutation
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Checks whether the arena holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes a node and strips it from every remaining node's relations.
    ///
    /// Relations are non-owning, so nothing the removed node linked to is
    /// touched beyond the scrub.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let removed = self.nodes.remove(&id)?;
        for node in self.nodes.values_mut() {
            node.detach_ref(id);
        }
        debug!("remove node {id} ({})", removed.label());
        Some(removed)
    }

    /// Structural value equality of two nodes.
    ///
    /// Equal labels, equal attribute maps, and pairwise value-equal relations
    /// in attach order. Cyclic graphs terminate: a pair of ids already under
    /// comparison is taken as equal, so two nodes that only differ by which
    /// self-referential id they carry still compare equal.
    ///
    /// An id missing from the arena compares unequal to everything, including
    /// itself.
    pub fn value_eq(&self, a: NodeId, b: NodeId) -> bool {
        let mut in_progress = HashSet::new();
        self.value_eq_guarded(a, b, &mut in_progress)
    }

    fn value_eq_guarded(
        &self,
        a: NodeId,
        b: NodeId,
        in_progress: &mut HashSet<(NodeId, NodeId)>,
    ) -> bool {
        let (Some(node_a), Some(node_b)) = (self.nodes.get(&a), self.nodes.get(&b)) else {
            return false;
        };
        if a == b || !in_progress.insert((a, b)) {
            return true;
        }
        node_a.label() == node_b.label()
            && node_a.attrs() == node_b.attrs()
            && node_a.links().len() == node_b.links().len()
            && node_a
                .links()
                .iter()
                .zip(node_b.links())
                .all(|(&la, &lb)| self.value_eq_guarded(la, lb, in_progress))
    }

    /// Checks whether at least one of `owner`'s relations is value-equal to
    /// `target`
    pub fn contains_equal(&self, owner: NodeId, target: NodeId) -> bool {
        self.nodes
            .get(&owner)
            .map_or(false, |node| {
                node.links().iter().any(|&id| self.value_eq(id, target))
            })
    }

    /// Removes every relation of `owner` that is value-equal to `target`.
    ///
    /// May remove zero, one, or many relations; returns how many were
    /// removed. Relative order of the survivors is preserved, their absolute
    /// positions shift.
    pub fn detach_equal(&mut self, owner: NodeId, target: NodeId) -> usize {
        let matched: Vec<NodeId> = match self.nodes.get(&owner) {
            Some(node) => node
                .links()
                .iter()
                .copied()
                .filter(|&id| self.value_eq(id, target))
                .collect(),
            None => return 0,
        };
        if let Some(node) = self.nodes.get_mut(&owner) {
            for id in &matched {
                node.detach_ref(*id);
            }
        }
        if !matched.is_empty() {
            debug!("detach {} relation(s) from node {owner}", matched.len());
        }
        matched.len()
    }

    /// Iterates `owner`'s relations resolved to nodes, in attach order.
    ///
    /// Restartable: each call walks the relation set as it stands. An unknown
    /// owner yields an empty iterator.
    pub fn iter_links(&self, owner: NodeId) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .get(&owner)
            .map(Node::links)
            .unwrap_or(&[])
            .iter()
            .filter_map(|&id| self.nodes.get(&id).map(|node| (id, node)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::AttrValue;
    use crate::label::Label;

    #[test]
    fn test_add_and_fetch() {
        let mut graph = NodeGraph::new();
        let id = graph.add_node(Node::new("root"));
        assert_eq!(graph.len(), 1);
        assert_eq!(
            graph.node(id).map(Node::label),
            Some(&Label::Str("root".to_string()))
        );
        assert!(graph.node(id + 1).is_none());
    }

    #[test]
    fn test_remove_node_scrubs_links() {
        let mut graph = NodeGraph::new();
        let child = graph.add_node(Node::new("child"));
        let root = graph.add_node(Node::new("root"));
        graph.node_mut(root).unwrap().attach(child);

        let removed = graph.remove_node(child);
        assert!(removed.is_some());
        assert_eq!(graph.node(root).unwrap().link_count(), 0);
        assert!(graph.remove_node(child).is_none());
    }

    #[test]
    fn test_value_eq_basic() {
        let mut graph = NodeGraph::new();
        let a = graph.add_node(Node::new("x"));
        let b = graph.add_node(Node::new("x"));
        let c = graph.add_node(Node::new("y"));

        assert!(graph.value_eq(a, b));
        assert!(!graph.value_eq(a, c));

        graph.node_mut(a).unwrap().set_attr("bound", 5i64);
        assert!(!graph.value_eq(a, b));
        graph.node_mut(b).unwrap().set_attr("bound", 5i64);
        assert!(graph.value_eq(a, b));
    }

    #[test]
    fn test_value_eq_follows_links() {
        let mut graph = NodeGraph::new();
        let leaf_a = graph.add_node(Node::new("leaf"));
        let leaf_b = graph.add_node(Node::new("leaf"));
        let a = graph.add_node(Node::new("branch"));
        let b = graph.add_node(Node::new("branch"));
        graph.node_mut(a).unwrap().attach(leaf_a);
        graph.node_mut(b).unwrap().attach(leaf_b);

        assert!(graph.value_eq(a, b));

        graph.node_mut(leaf_b).unwrap().set_attr("literal", "z");
        assert!(!graph.value_eq(a, b));
    }

    #[test]
    fn test_value_eq_missing_id() {
        let mut graph = NodeGraph::new();
        let a = graph.add_node(Node::new("x"));
        assert!(!graph.value_eq(a, 99));
        assert!(!graph.value_eq(99, 99));
    }

    #[test]
    fn test_value_equal_duplicates_attach_then_detach_both() {
        let mut graph = NodeGraph::new();
        let a = graph.add_node(Node::new("dup"));
        let b = graph.add_node(Node::new("dup"));
        let owner = graph.add_node(Node::new("owner"));

        // distinct ids both stay even though the nodes are value-equal
        graph.node_mut(owner).unwrap().attach(a).attach(b);
        assert_eq!(graph.node(owner).unwrap().link_count(), 2);

        // value-based removal takes both out in one call
        assert_eq!(graph.detach_equal(owner, a), 2);
        assert_eq!(graph.node(owner).unwrap().link_count(), 0);
        assert!(!graph.contains_equal(owner, a));
    }

    #[test]
    fn test_detach_equal_spares_unequal_relations() {
        let mut graph = NodeGraph::new();
        let x = graph.add_node(Node::new("x"));
        let y = graph.add_node(Node::new("y"));
        let owner = graph.add_node(Node::new("owner"));
        graph.node_mut(owner).unwrap().attach(x).attach(y);

        assert_eq!(graph.detach_equal(owner, x), 1);
        assert_eq!(graph.node(owner).unwrap().links(), &[y]);

        // nothing left matching x
        assert_eq!(graph.detach_equal(owner, x), 0);
        assert_eq!(graph.detach_equal(99, x), 0);
    }

    #[test]
    fn test_contains_equal_matches_by_value() {
        let mut graph = NodeGraph::new();
        let child = graph.add_node(Node::new("child"));
        let twin = graph.add_node(Node::new("child"));
        let other = graph.add_node(Node::new("other"));
        let owner = graph.add_node(Node::new("owner"));
        graph.node_mut(owner).unwrap().attach(child);

        // twin was never attached, but a value-equal relation exists
        assert!(graph.contains_equal(owner, twin));
        assert!(!graph.contains_equal(owner, other));
    }

    #[test]
    fn test_self_cycle() {
        let mut graph = NodeGraph::new();
        let a = graph.add_node(Node::new("a"));
        graph.node_mut(a).unwrap().attach(a);

        assert_eq!(graph.node(a).unwrap().link_count(), 1);
        assert!(graph.contains_equal(a, a));
        assert!(graph.value_eq(a, a));
    }

    #[test]
    fn test_mutual_cycle() {
        let mut graph = NodeGraph::new();
        let a = graph.add_node(Node::new("a"));
        let b = graph.add_node(Node::new("b"));
        graph.node_mut(a).unwrap().attach(b);
        graph.node_mut(b).unwrap().attach(a);

        assert_eq!(graph.node(a).unwrap().link_count(), 1);
        assert_eq!(graph.node(b).unwrap().link_count(), 1);
        // single-level traversal, no divergence
        let walked: Vec<NodeId> = graph.iter_links(a).map(|(id, _)| id).collect();
        assert_eq!(walked, vec![b]);
    }

    #[test]
    fn test_distinct_self_cycles_compare_equal() {
        let mut graph = NodeGraph::new();
        let a = graph.add_node(Node::new("loop"));
        let b = graph.add_node(Node::new("loop"));
        graph.node_mut(a).unwrap().attach(a);
        graph.node_mut(b).unwrap().attach(b);

        assert!(graph.value_eq(a, b));

        graph.node_mut(b).unwrap().set_attr("bound", 1i64);
        assert!(!graph.value_eq(a, b));
    }

    #[test]
    fn test_iter_links_order_and_count() {
        let mut graph = NodeGraph::new();
        let first = graph.add_node(Node::new("first"));
        let second = graph.add_node(Node::new("second"));
        let third = graph.add_node(Node::new("third"));
        let owner = graph.add_node(Node::new("owner"));
        graph
            .node_mut(owner)
            .unwrap()
            .attach(first)
            .attach(second)
            .attach(third);

        let walked: Vec<NodeId> = graph.iter_links(owner).map(|(id, _)| id).collect();
        assert_eq!(walked, vec![first, second, third]);
        assert_eq!(
            graph.iter_links(owner).count(),
            graph.node(owner).unwrap().link_count()
        );

        // removal shifts positions but keeps the survivors' relative order
        graph.node_mut(owner).unwrap().detach_ref(second);
        let walked: Vec<NodeId> = graph.iter_links(owner).map(|(id, _)| id).collect();
        assert_eq!(walked, vec![first, third]);
    }

    #[test]
    fn test_iter_links_unknown_owner_is_empty() {
        let graph = NodeGraph::new();
        assert_eq!(graph.iter_links(42).count(), 0);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut graph = NodeGraph::new();
        let child = graph.add_node(Node::new("child"));
        let root = graph.add_node(Node::new("root"));
        graph
            .node_mut(root)
            .unwrap()
            .attach(child)
            .set_attr("bound", AttrValue::Integer(5));

        let json = serde_json::to_string(&graph).unwrap();
        let restored: NodeGraph = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.len(), 2);
        assert_eq!(restored.node(root).unwrap().links(), &[child]);
        assert_eq!(
            restored.node(root).unwrap().attr("bound"),
            Some(&AttrValue::Integer(5))
        );
        assert!(restored.value_eq(child, child));
    }
}
