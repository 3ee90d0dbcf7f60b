use std::cell::RefCell;

use paperkit::{
    commands::CommandSender,
    config::{
        BoolCodec, ConfigTree, IntCodec, MemoryStore, Node, NodeId, StringCodec, StringListCodec,
    },
};

// ==========================
// CONFIG FACTORIES
// ==========================

/// Creates an empty tree over a fresh in-memory store.
pub fn test_tree() -> ConfigTree<MemoryStore> {
    ConfigTree::new(MemoryStore::new())
}

/// A small plugin schema used across config tests.
pub struct SampleSchema {
    pub general: NodeId,
    pub debug: Node<BoolCodec>,
    pub prefix: Node<StringCodec>,
    pub spawning: Node<BoolCodec>,
    pub spawn_limit: Node<IntCodec>,
    pub worlds: Node<StringListCodec>,
}

/// Declares [`SampleSchema`] on `tree`:
///
/// ```text
/// general.debug            bool  false
/// general.prefix           text  "[Kit]"
/// spawning.enabled         bool  true   (has children)
/// spawning.limit           int   16     [0, 64]
/// worlds                   list  ["world"]
/// ```
pub fn declare_sample(tree: &mut ConfigTree<MemoryStore>) -> SampleSchema {
    let root = tree.root();
    let general = tree.container(root, "general").unwrap();
    let debug = tree.declare(general, "debug", BoolCodec::new(false)).unwrap();
    let prefix = tree.declare(general, "prefix", StringCodec::new("[Kit]")).unwrap();
    let spawning = tree.declare(root, "spawning", BoolCodec::new(true)).unwrap();
    let spawn_limit = tree
        .declare(&spawning, "limit", IntCodec::new(16).with_bounds(0, 64))
        .unwrap();
    let worlds = tree
        .declare(root, "worlds", StringListCodec::new(vec!["world".to_string()]))
        .unwrap();
    SampleSchema {
        general,
        debug,
        prefix,
        spawning,
        spawn_limit,
        worlds,
    }
}

// ==========================
// COMMAND HELPERS
// ==========================

/// A sender that records every message it is sent.
pub struct RecordingSender {
    pub name: String,
    pub permissions: Vec<String>,
    pub messages: RefCell<Vec<String>>,
}

impl RecordingSender {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            permissions: Vec::new(),
            messages: RefCell::new(Vec::new()),
        }
    }

    pub fn with_permission(mut self, permission: &str) -> Self {
        self.permissions.push(permission.to_string());
        self
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl CommandSender for RecordingSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn send_message(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}
