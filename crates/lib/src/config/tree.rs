//! The configuration node tree.
//!
//! A [`ConfigTree`] owns a [`ConfigStore`] and an arena of nodes. Plugins
//! declare their configuration schema as a tree of named nodes: containers
//! group other nodes, and leaves carry a [`ValueCodec`] that reads and writes
//! one typed value. Nothing is cached; every read goes to the store at the
//! node's computed path.
//!
//! # Paths
//!
//! A node's *base path* is the dot-joined chain of names from the root. Its
//! *value path* is the base path, unless the node is a sub node with
//! children: the base path is then a section holding the children, so the
//! node's own value moves to a child named by the codec's value node name.
//!
//! ```
//! use paperkit::config::{BoolCodec, ConfigTree, IntCodec, MemoryStore};
//!
//! let mut tree = ConfigTree::new(MemoryStore::new());
//! let root = tree.root();
//! let spawning = tree.declare(root, "spawning", BoolCodec::new(true))?;
//! assert_eq!(tree.value_path(spawning.id()), "spawning");
//!
//! // Giving the flag a child moves its value under `enabled`.
//! let limit = tree.declare(&spawning, "limit", IntCodec::bounded(0, 64))?;
//! assert_eq!(tree.value_path(spawning.id()), "spawning.enabled");
//! assert_eq!(tree.value_path(limit.id()), "spawning.limit");
//! assert!(tree.value(&spawning));
//! # Ok::<(), paperkit::Error>(())
//! ```
//!
//! # Registration
//!
//! Declaring a node registers it with its parent. If a sibling already
//! occupies the same base path, [`NodePriority`] decides which one stays
//! listed. The other remains a valid handle that reads the same path, but it
//! is no longer visited by [`ConfigTree::save`].

use std::{fmt, rc::Rc};

use tracing::debug;
use uuid::Uuid;

use super::{
    ConfigStore, ConfigValue, IntCodec, NodePriority, ValueCodec, codec::ErasedCodec,
    path as config_path,
};
use crate::{Result, constants};

/// Identifies a node within the tree that declared it.
///
/// Ids are only handed out by [`ConfigTree`]. Passing an id to a tree other
/// than the one that created it is a programming error and may panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The arena index of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A typed handle to a value node.
///
/// The handle carries the node's codec so reads can produce `C::Value`
/// without consulting the arena.
pub struct Node<C: ValueCodec> {
    id: NodeId,
    codec: Rc<C>,
}

impl<C: ValueCodec> Node<C> {
    pub(crate) fn from_parts(id: NodeId, codec: Rc<C>) -> Self {
        Self { id, codec }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }
}

impl<C: ValueCodec> Clone for Node<C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            codec: Rc::clone(&self.codec),
        }
    }
}

impl<C: ValueCodec> fmt::Debug for Node<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node").field("id", &self.id).finish()
    }
}

impl<C: ValueCodec> From<&Node<C>> for NodeId {
    fn from(node: &Node<C>) -> Self {
        node.id
    }
}

/// Identity of a node for equality purposes: owning store plus base path.
///
/// Two nodes with the same key are equal regardless of their codecs, which
/// lets a newer declaration shadow an older one at the same path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub store: Uuid,
    pub base_path: String,
}

pub(crate) enum NodeKind {
    /// Value-less node that only groups children.
    Container,
    /// Leaf (or value-carrying branch) with a codec.
    Value(Rc<dyn ErasedCodec>),
    /// Value node whose effective value can be overridden per difficulty.
    Difficulty {
        codec: Rc<dyn ErasedCodec>,
        tiers: [Option<NodeId>; 4],
    },
}

pub(crate) struct NodeSlot {
    pub(crate) parent: Option<NodeId>,
    pub(crate) name: Option<String>,
    pub(crate) priority: NodePriority,
    pub(crate) children: Vec<NodeId>,
    pub(crate) kind: NodeKind,
}

impl NodeSlot {
    fn codec(&self) -> Option<&Rc<dyn ErasedCodec>> {
        match &self.kind {
            NodeKind::Container => None,
            NodeKind::Value(codec) | NodeKind::Difficulty { codec, .. } => Some(codec),
        }
    }

    fn is_tier(&self, id: NodeId) -> bool {
        match &self.kind {
            NodeKind::Difficulty { tiers, .. } => tiers.contains(&Some(id)),
            _ => false,
        }
    }
}

/// A tree of configuration nodes over a [`ConfigStore`].
pub struct ConfigTree<S> {
    id: Uuid,
    store: S,
    pub(crate) nodes: Vec<NodeSlot>,
    version: Node<IntCodec>,
}

impl<S: ConfigStore> ConfigTree<S> {
    /// Creates a tree with an unnamed root and its hidden `_version` leaf.
    pub fn new(store: S) -> Self {
        let root = NodeSlot {
            parent: None,
            name: None,
            priority: NodePriority::Normal,
            children: Vec::new(),
            kind: NodeKind::Container,
        };
        let version_codec = Rc::new(IntCodec::bounded(0, i32::MAX));
        let version_slot = NodeSlot {
            parent: Some(NodeId(0)),
            name: Some(constants::VERSION_NODE.to_string()),
            priority: NodePriority::Highest,
            children: Vec::new(),
            kind: NodeKind::Value(version_codec.clone()),
        };
        let mut tree = Self {
            id: Uuid::new_v4(),
            store,
            nodes: vec![root, version_slot],
            version: Node {
                id: NodeId(1),
                codec: version_codec,
            },
        };
        tree.register(NodeId(0), NodeId(1));
        tree
    }

    /// Unique identity of this tree and its store.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The unnamed root container.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the tree, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Number of nodes ever declared, including the root and `_version`.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ===== Declaration =====

    /// Declares a value node named `name` under `parent` with normal priority.
    pub fn declare<C: ValueCodec>(
        &mut self,
        parent: impl Into<NodeId>,
        name: &str,
        codec: C,
    ) -> Result<Node<C>> {
        self.declare_with_priority(parent, name, codec, NodePriority::Normal)
    }

    /// Declares a value node with an explicit registration priority.
    pub fn declare_with_priority<C: ValueCodec>(
        &mut self,
        parent: impl Into<NodeId>,
        name: &str,
        codec: C,
        priority: NodePriority,
    ) -> Result<Node<C>> {
        let codec = Rc::new(codec);
        let erased: Rc<dyn ErasedCodec> = codec.clone();
        let id = self.insert(parent.into(), name, priority, NodeKind::Value(erased))?;
        Ok(Node { id, codec })
    }

    /// Declares a value-less container named `name` under `parent`.
    pub fn container(&mut self, parent: impl Into<NodeId>, name: &str) -> Result<NodeId> {
        self.container_with_priority(parent, name, NodePriority::Normal)
    }

    /// Declares a container with an explicit registration priority.
    pub fn container_with_priority(
        &mut self,
        parent: impl Into<NodeId>,
        name: &str,
        priority: NodePriority,
    ) -> Result<NodeId> {
        self.insert(parent.into(), name, priority, NodeKind::Container)
    }

    pub(crate) fn insert(
        &mut self,
        parent: NodeId,
        name: &str,
        priority: NodePriority,
        kind: NodeKind,
    ) -> Result<NodeId> {
        config_path::validate_name(name)?;
        if parent.0 >= self.nodes.len() {
            return Err(super::ConfigError::UnknownNode { id: parent.0 }.into());
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeSlot {
            parent: Some(parent),
            name: Some(name.to_string()),
            priority,
            children: Vec::new(),
            kind,
        });
        self.register(parent, id);
        Ok(id)
    }

    /// Adds `child` to the child list of `parent`, arbitrating path collisions.
    fn register(&mut self, parent: NodeId, child: NodeId) {
        let child_path = self.base_path(child);
        let existing = self.nodes[parent.0]
            .children
            .iter()
            .position(|&sibling| sibling != child && self.base_path(sibling) == child_path);

        match existing {
            Some(position) => {
                let existing_id = self.nodes[parent.0].children[position];
                let existing_priority = self.nodes[existing_id.0].priority;
                let incoming_priority = self.nodes[child.0].priority;
                if incoming_priority.supersedes(existing_priority) {
                    debug!(
                        path = %child_path,
                        ?existing_priority,
                        ?incoming_priority,
                        "Replacing configuration node"
                    );
                    self.nodes[parent.0].children[position] = child;
                } else {
                    debug!(
                        path = %child_path,
                        ?existing_priority,
                        ?incoming_priority,
                        "Discarding configuration node shadowed by an existing node"
                    );
                }
            }
            None => self.nodes[parent.0].children.push(child),
        }
    }

    // ===== Structure =====

    pub(crate) fn slot(&self, id: NodeId) -> &NodeSlot {
        &self.nodes[id.0]
    }

    /// The node's name; `None` for the root.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.slot(id).name.as_deref()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id).parent
    }

    pub fn priority(&self, id: NodeId) -> NodePriority {
        self.slot(id).priority
    }

    /// Whether the node has a parent.
    pub fn is_sub_node(&self, id: NodeId) -> bool {
        self.slot(id).parent.is_some()
    }

    /// Whether the node has a non-blank name.
    pub fn has_name(&self, id: NodeId) -> bool {
        self.name(id).is_some_and(|name| !name.trim().is_empty())
    }

    /// Whether the node carries no value of its own.
    pub fn is_container(&self, id: NodeId) -> bool {
        matches!(self.slot(id).kind, NodeKind::Container)
    }

    /// Whether any node is registered under this one, difficulty tiers included.
    pub fn has_children(&self, id: NodeId) -> bool {
        !self.slot(id).children.is_empty()
    }

    /// The registered children, excluding difficulty tier nodes.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let slot = self.slot(id);
        slot.children
            .iter()
            .copied()
            .filter(|&child| !slot.is_tier(child))
            .collect()
    }

    /// Whether the node is currently listed by its parent.
    ///
    /// Nodes that lost a priority contest are not. The root always is.
    pub fn is_registered(&self, id: NodeId) -> bool {
        match self.slot(id).parent {
            Some(parent) => self.slot(parent).children.contains(&id),
            None => true,
        }
    }

    // ===== Paths =====

    /// Dot-joined names from the root to this node. Empty for the root.
    pub fn base_path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            let slot = self.slot(node);
            if let Some(name) = slot.name.as_deref().filter(|name| !name.trim().is_empty()) {
                names.push(name);
            }
            current = slot.parent;
        }
        names.reverse();
        names.join(".")
    }

    /// The child name the node's value moves to once it has children.
    pub fn value_node_name(&self, id: NodeId) -> &str {
        match &self.slot(id).kind {
            NodeKind::Container => constants::VALUE_NODE,
            NodeKind::Value(codec) => codec.value_node_name(),
            NodeKind::Difficulty { .. } => constants::DEFAULT_NODE,
        }
    }

    /// The path holding the node's own value.
    ///
    /// Equal to [`base_path`](Self::base_path) unless the node is a sub node
    /// with children, in which case the value node name is appended.
    pub fn value_path(&self, id: NodeId) -> String {
        let base = self.base_path(id);
        if self.is_sub_node(id) && self.has_children(id) {
            config_path::join(&base, self.value_node_name(id))
        } else {
            base
        }
    }

    /// Identity of the node for equality comparisons.
    pub fn key(&self, id: NodeId) -> NodeKey {
        NodeKey {
            store: self.id,
            base_path: self.base_path(id),
        }
    }

    /// Whether two nodes of this tree share a base path, whatever their kinds.
    pub fn node_eq(&self, a: NodeId, b: NodeId) -> bool {
        a == b || self.base_path(a) == self.base_path(b)
    }

    // ===== Values =====

    /// The raw stored value at the node's value path.
    pub fn raw_value(&self, id: NodeId) -> Option<ConfigValue> {
        self.store.get(&self.value_path(id))
    }

    /// Reads the node's typed value, falling back to its default.
    pub fn value<C: ValueCodec>(&self, node: &Node<C>) -> C::Value {
        let path = self.value_path(node.id);
        node.codec.decode(self.store.get(&path), &path)
    }

    /// The node's default value.
    pub fn default_value<C: ValueCodec>(&self, node: &Node<C>) -> C::Value {
        node.codec.default_value()
    }

    /// Writes the node's value to the store. Blank value paths are skipped.
    pub fn set_value<C: ValueCodec>(&mut self, node: &Node<C>, value: C::Value) {
        let path = self.value_path(node.id);
        if path.trim().is_empty() {
            return;
        }
        let encoded = node.codec.encode(&value);
        self.store.set(&path, encoded);
    }

    /// Removes the node's value from the store so reads yield the default.
    pub fn clear_value(&mut self, id: NodeId) {
        let path = self.value_path(id);
        if !path.trim().is_empty() {
            self.store.set(&path, None);
        }
    }

    /// Renders the node as `value_path=value`.
    pub fn describe(&self, id: NodeId) -> String {
        let path = self.value_path(id);
        let value = match self.slot(id).codec() {
            Some(codec) => codec.describe(self.store.get(&path), &path),
            None => "null".to_string(),
        };
        format!("{path}={value}")
    }

    // ===== Version =====

    /// The hidden `_version` leaf under the root.
    pub fn version_node(&self) -> &Node<IntCodec> {
        &self.version
    }

    /// The stored schema version, `0` when absent.
    pub fn version(&self) -> i32 {
        self.value(&self.version)
    }

    pub fn set_version(&mut self, version: i32) {
        let node = self.version.clone();
        self.set_value(&node, version);
    }

    // ===== Save =====

    /// Writes every registered node's current value back to the store.
    ///
    /// Defaults are materialized, so after a save the store holds a complete
    /// picture of the declared schema.
    pub fn save(&mut self) {
        self.save_node(self.root());
    }

    /// Saves one node and everything registered below it.
    pub fn save_node(&mut self, id: NodeId) {
        let (tiers, children) = {
            let slot = self.slot(id);
            let tiers: Vec<NodeId> = match &slot.kind {
                NodeKind::Difficulty { tiers, .. } => tiers.iter().flatten().copied().collect(),
                _ => Vec::new(),
            };
            (tiers, self.children(id))
        };

        for tier in tiers {
            self.save_node(tier);
        }

        let codec = self.slot(id).codec().cloned();
        if let Some(codec) = codec.filter(|_| self.is_sub_node(id) || self.has_children(id)) {
            let path = self.value_path(id);
            if !path.trim().is_empty() {
                let value = codec.save_value(self.store.get(&path), &path);
                self.store.set(&path, value);
            }
        }

        for child in children {
            self.save_node(child);
        }
    }

    // ===== Comments =====

    fn comment_path(&self, id: NodeId, use_base_path: bool) -> String {
        if use_base_path {
            self.base_path(id)
        } else {
            self.value_path(id)
        }
    }

    /// Block comments at the node's value path, or base path if requested.
    pub fn comments(&self, id: NodeId, use_base_path: bool) -> Vec<String> {
        self.store.comments(&self.comment_path(id, use_base_path))
    }

    /// Replaces the node's block comments. An empty list removes them.
    pub fn set_comments<I, T>(&mut self, id: NodeId, use_base_path: bool, comments: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let path = self.comment_path(id, use_base_path);
        self.store
            .set_comments(&path, comments.into_iter().map(Into::into).collect());
    }

    /// Inline comments at the node's value path, or base path if requested.
    pub fn inline_comments(&self, id: NodeId, use_base_path: bool) -> Vec<String> {
        self.store
            .inline_comments(&self.comment_path(id, use_base_path))
    }

    /// Replaces the node's inline comments. An empty list removes them.
    pub fn set_inline_comments<I, T>(&mut self, id: NodeId, use_base_path: bool, comments: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let path = self.comment_path(id, use_base_path);
        self.store
            .set_inline_comments(&path, comments.into_iter().map(Into::into).collect());
    }
}

impl<S> fmt::Debug for ConfigTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigTree")
            .field("id", &self.id)
            .field("nodes", &self.nodes.len())
            .finish()
    }
}
