//! Difficulty-dependent configuration nodes.
//!
//! A difficulty node owns up to four tier children, one per [`Difficulty`],
//! plus a scalar value of its own stored under `default`. Reads and writes
//! for a difficulty start at the requested tier and fall through to harder
//! tiers, then back through easier ones, until one is defined. When no tier
//! is defined at all the node's own value is used.

use std::{fmt, rc::Rc, str::FromStr};

use super::{
    ConfigError, ConfigStore, ConfigTree, Node, NodeId, NodePriority, ValueCodec,
    tree::NodeKind,
};
use crate::Result;

/// Game difficulty tiers, easiest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    Peaceful,
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Every tier in fallback order.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Peaceful,
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The name of the tier's child node.
    pub fn node_name(self) -> &'static str {
        match self {
            Difficulty::Peaceful => "peaceful",
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// This tier, every harder one, then the easier ones nearest first.
    pub fn waterfall(self) -> impl Iterator<Item = Difficulty> {
        let easier = Self::ALL.into_iter().take(self.index()).rev();
        Self::ALL.into_iter().skip(self.index()).chain(easier)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Peaceful => "PEACEFUL",
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORMAL",
            Difficulty::Hard => "HARD",
        })
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.node_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::TypeMismatch {
                expected: "difficulty".to_string(),
                actual: s.to_string(),
            })
    }
}

/// Handle to a difficulty-dependent node and its tiers.
pub struct DifficultyNode<C: ValueCodec> {
    node: Node<C>,
    tiers: [Option<Node<C>>; 4],
}

impl<C: ValueCodec> DifficultyNode<C> {
    /// The node's own value, used when no tier applies.
    pub fn node(&self) -> &Node<C> {
        &self.node
    }

    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    /// The tier node declared for `difficulty`, if any.
    pub fn tier(&self, difficulty: Difficulty) -> Option<&Node<C>> {
        self.tiers[difficulty.index()].as_ref()
    }

    /// The first declared tier along `difficulty`'s waterfall.
    fn resolve(&self, difficulty: Difficulty) -> Option<&Node<C>> {
        difficulty.waterfall().find_map(|tier| self.tier(tier))
    }
}

impl<C: ValueCodec> Clone for DifficultyNode<C> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            tiers: self.tiers.clone(),
        }
    }
}

impl<C: ValueCodec> fmt::Debug for DifficultyNode<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let declared: Vec<Difficulty> = Difficulty::ALL
            .into_iter()
            .filter(|d| self.tier(*d).is_some())
            .collect();
        f.debug_struct("DifficultyNode")
            .field("id", &self.node.id())
            .field("tiers", &declared)
            .finish()
    }
}

impl<C: ValueCodec> From<&DifficultyNode<C>> for NodeId {
    fn from(node: &DifficultyNode<C>) -> Self {
        node.id()
    }
}

impl<S: ConfigStore> ConfigTree<S> {
    /// Declares a difficulty-dependent node.
    ///
    /// `codec` describes the node's own value; each entry in `tiers` declares
    /// the child for one difficulty with its own codec (and default).
    ///
    /// ```
    /// use paperkit::config::{ConfigTree, Difficulty, IntCodec, MemoryStore};
    ///
    /// let mut tree = ConfigTree::new(MemoryStore::new());
    /// let root = tree.root();
    /// let damage = tree.declare_difficulty(
    ///     root,
    ///     "damage",
    ///     IntCodec::new(1),
    ///     [(Difficulty::Normal, IntCodec::new(4))],
    /// )?;
    /// assert_eq!(tree.value_for(&damage, Difficulty::Peaceful), 4);
    /// assert_eq!(tree.value_path(damage.id()), "damage.default");
    /// # Ok::<(), paperkit::Error>(())
    /// ```
    pub fn declare_difficulty<C, I>(
        &mut self,
        parent: impl Into<NodeId>,
        name: &str,
        codec: C,
        tiers: I,
    ) -> Result<DifficultyNode<C>>
    where
        C: ValueCodec,
        I: IntoIterator<Item = (Difficulty, C)>,
    {
        let codec = Rc::new(codec);
        let id = self.insert(
            parent.into(),
            name,
            NodePriority::Normal,
            NodeKind::Difficulty {
                codec: codec.clone(),
                tiers: [None; 4],
            },
        )?;

        let mut handles: [Option<Node<C>>; 4] = [None, None, None, None];
        for (difficulty, tier_codec) in tiers {
            let tier = self.declare(id, difficulty.node_name(), tier_codec)?;
            if !self.is_registered(tier.id()) {
                // a repeated tier lost to the one declared first
                continue;
            }
            if let NodeKind::Difficulty { tiers, .. } = &mut self.nodes[id.0].kind {
                tiers[difficulty.index()] = Some(tier.id());
            }
            handles[difficulty.index()] = Some(tier);
        }

        Ok(DifficultyNode {
            node: Node::from_parts(id, codec),
            tiers: handles,
        })
    }

    /// The effective value for `difficulty`.
    ///
    /// Falls through peaceful, easy, normal and hard starting at the
    /// requested tier, then back through the easier tiers. If the node has
    /// no tiers, its own value is returned.
    pub fn value_for<C: ValueCodec>(&self, node: &DifficultyNode<C>, difficulty: Difficulty) -> C::Value {
        match node.resolve(difficulty) {
            Some(tier) => self.value(tier),
            None => self.value(&node.node),
        }
    }

    /// Writes `value` to the node chosen by the same fallback as [`value_for`](Self::value_for).
    pub fn set_value_for<C: ValueCodec>(
        &mut self,
        node: &DifficultyNode<C>,
        difficulty: Difficulty,
        value: C::Value,
    ) {
        match node.resolve(difficulty) {
            Some(tier) => self.set_value(tier, value),
            None => self.set_value(&node.node, value),
        }
    }
}
