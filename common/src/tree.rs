//! 探索ツリー
//!
//! ルート作品から、たどった作品を子ノードとして積み上げる。
//! ノードIDはツリー内で一意（ルートは `root`、以降は `node-1`, `node-2`, ...）。

use crate::error::{ExploreError, Result};
use crate::types::Artwork;
use serde::Serialize;

/// ツリーの1ノード
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub id: String,
    pub artwork: Artwork,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(id: String, artwork: Artwork) -> Self {
        Self {
            id,
            artwork,
            children: Vec::new(),
        }
    }

    fn find(&self, id: &str) -> Option<&TreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut TreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }

    fn walk<'a>(&'a self, depth: usize, out: &mut Vec<(usize, &'a TreeNode)>) {
        out.push((depth, self));
        for child in &self.children {
            child.walk(depth + 1, out);
        }
    }
}

/// 探索ツリー
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorationTree {
    root: TreeNode,
    #[serde(skip)]
    next_id: u64,
}

impl ExplorationTree {
    pub const ROOT_ID: &'static str = "root";

    pub fn new(root: Artwork) -> Self {
        Self {
            root: TreeNode::new(Self::ROOT_ID.to_string(), root),
            next_id: 1,
        }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// 親ノードの末尾に子を追加し、新しいノードIDを返す
    ///
    /// 親が見つからなければツリーは変更しない。
    pub fn add_child(&mut self, parent_id: &str, artwork: Artwork) -> Result<String> {
        let id = format!("node-{}", self.next_id);
        let parent = self
            .root
            .find_mut(parent_id)
            .ok_or_else(|| ExploreError::UnknownNode(parent_id.to_string()))?;

        tracing::debug!(parent = parent_id, node = %id, artwork = %artwork.id, "tree node added");
        parent.children.push(TreeNode::new(id.clone(), artwork));
        self.next_id += 1;
        Ok(id)
    }

    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        self.root.find(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// ルートを含むノード数
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// 深さ優先（行きがけ順）で (深さ, ノード) を列挙
    pub fn depth_first(&self) -> Vec<(usize, &TreeNode)> {
        let mut out = Vec::with_capacity(self.node_count());
        self.root.walk(0, &mut out);
        out
    }

    /// 字下げ付きの表示行
    pub fn render_lines(&self) -> Vec<String> {
        self.depth_first()
            .into_iter()
            .map(|(depth, node)| {
                format!(
                    "{}{} {} / {}",
                    "  ".repeat(depth),
                    node.id,
                    node.artwork.title,
                    node.artwork.artist
                )
            })
            .collect()
    }
}
