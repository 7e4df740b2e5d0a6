//! Node types and core node functionality

use crate::attrs::{AttrMap, AttrValue};
use crate::error::LabelError;
use crate::label::Label;
use serde::{Deserialize, Serialize};

/// Unique identifier for a node within a [`NodeGraph`](crate::NodeGraph)
pub type NodeId = usize;

/// Core node structure: a label, an attribute store, and outgoing relations
///
/// Relations are held as [`NodeId`] indices into the arena that owns every
/// node, so a node never owns the nodes it links to and cyclic graphs (a node
/// linked to itself, mutual links between two nodes) need no special cleanup.
///
/// Identity and value equality are distinct notions here. Insertion into the
/// relation set is keyed by id ([`attach`](Node::attach) is idempotent per
/// id), while value-based queries and removal live on the arena
/// ([`NodeGraph::contains_equal`](crate::NodeGraph::contains_equal),
/// [`NodeGraph::detach_equal`](crate::NodeGraph::detach_equal)) because they
/// must resolve linked ids to compare structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    label: Label,
    attrs: AttrMap,
    links: Vec<NodeId>,
}

impl Node {
    /// Creates a node with the given label and empty attrs/links.
    ///
    /// A non-scalar label is rejected and the default label `"node"` stays in
    /// effect. Use [`set_label`](Node::set_label) when the rejection matters.
    pub fn new(label: impl Into<AttrValue>) -> Self {
        let mut node = Self::default();
        let _ = node.set_label(label);
        node
    }

    /// Fetches the node's label
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Sets the node's label.
    ///
    /// Only scalar or null values are accepted. On rejection the previous
    /// label is left untouched and the error names the offending value kind.
    pub fn set_label(&mut self, value: impl Into<AttrValue>) -> Result<(), LabelError> {
        let value = value.into();
        match Label::from_value(&value) {
            Some(label) => {
                self.label = label;
                Ok(())
            }
            None => Err(LabelError::NotScalar { kind: value.kind() }),
        }
    }

    /// Attaches an outgoing relation, keyed by id.
    ///
    /// Attaching an id that is already linked is a no-op; distinct ids are
    /// kept even when the nodes they name are value-equal. Relations are
    /// enumerated in attach order.
    pub fn attach(&mut self, id: NodeId) -> &mut Self {
        if !self.links.contains(&id) {
            self.links.push(id);
        }
        self
    }

    /// Detaches a relation by id, if present.
    ///
    /// Later relations shift down one position; their relative order is
    /// preserved. For value-based removal see
    /// [`NodeGraph::detach_equal`](crate::NodeGraph::detach_equal).
    pub fn detach_ref(&mut self, id: NodeId) -> &mut Self {
        self.links.retain(|&linked| linked != id);
        self
    }

    /// Current relations, in attach order.
    ///
    /// The returned slice reflects the relation set at the time of the call;
    /// re-borrow after any `attach`/`detach` to observe the update.
    pub fn links(&self) -> &[NodeId] {
        &self.links
    }

    /// Number of current relations
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Checks whether an id is currently linked
    pub fn has_link(&self, id: NodeId) -> bool {
        self.links.contains(&id)
    }

    /// Looks up an attribute; `None` means the key was never set (or was
    /// unset), never a defaulted value
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    /// Stores an attribute; last write wins
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> &mut Self {
        self.attrs.set(key, value);
        self
    }

    /// Checks whether an attribute key is present
    pub fn has_attr(&self, key: &str) -> bool {
        self.attrs.has(key)
    }

    /// Removes an attribute, returning its value if it was present
    pub fn unset_attr(&mut self, key: &str) -> Option<AttrValue> {
        self.attrs.unset(key)
    }

    /// The node's attribute store
    pub fn attrs(&self) -> &AttrMap {
        &self.attrs
    }
}

impl Default for Node {
    fn default() -> Self {
        Self {
            label: Label::default(),
            attrs: AttrMap::new(),
            links: Vec::new(),
        }
    }
}
