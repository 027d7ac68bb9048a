use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One entry of a package manifest.
///
/// On the wire a node is an array: `["name"]` for a file and
/// `["name", [...children]]` for a directory. `["name", null]` is read as a
/// file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeNode {
    pub name: String,
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: None,
        }
    }

    pub fn dir(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            children: Some(children),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .as_deref()
            .map_or(0, |children| children.iter().map(TreeNode::node_count).sum())
    }
}

/// Root-level nodes of a manifest in display order.
pub type Manifest = Vec<TreeNode>;

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.is_leaf() { 1 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.name)?;
        if let Some(children) = &self.children {
            seq.serialize_element(children)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for TreeNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(TreeNodeVisitor)
    }
}

struct TreeNodeVisitor;

impl<'de> Visitor<'de> for TreeNodeVisitor {
    type Value = TreeNode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an array of [name] or [name, children]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<TreeNode, A::Error> {
        let name: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let children = seq.next_element::<Option<Vec<TreeNode>>>()?.flatten();

        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(3, &self));
        }

        Ok(TreeNode { name, children })
    }
}
