//! Hierarchical plugin configuration.
//!
//! Plugins describe their settings as a tree of named nodes declared on a
//! [`ConfigTree`]. Each node derives its dotted path from its position in the
//! tree, and value nodes read and write one typed value at that path through
//! a [`ValueCodec`]. The tree sits on top of a [`ConfigStore`], which only
//! knows how to get and set values and comments by path.
//!
//! # Core Types
//!
//! - [`ConfigTree`] - the node arena and all node operations
//! - [`Node`] - a typed handle to one value node
//! - [`ValueCodec`] - how a node's value is read, written and defaulted
//! - [`ConfigStore`] / [`MemoryStore`] - the dotted-path store
//! - [`DifficultyNode`] - a value with per-difficulty overrides
//! - [`MySqlConfig`] - the ready-made `mysql` section

// Value model first; everything else reads and writes it
pub mod value;

pub mod codec;
pub mod difficulty;
pub mod errors;
pub mod mysql;
pub mod path;
pub mod priority;
pub mod schema;
pub mod store;
pub mod tree;

pub use codec::{
    BigDecimalCodec, BigIntegerCodec, BoolCodec, DoubleCodec, EnumCodec, EnumListCodec, IntCodec,
    MapListCodec, OptionalCodec, StringCodec, StringListCodec, TypedMapListCodec, ValueCodec,
};
pub use difficulty::{Difficulty, DifficultyNode};
pub use errors::ConfigError;
pub use mysql::MySqlConfig;
pub use priority::NodePriority;
pub use schema::{ConfigConsumer, ReloadRegistry, RootSchema};
pub use store::{ConfigStore, MemoryStore};
pub use tree::{ConfigTree, Node, NodeId, NodeKey};
pub use value::{ConfigValue, FromConfigValue};
