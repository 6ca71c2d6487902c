//! フラットなコメント列から返信フォレストを組み立てる。
//!
//! コメントは投稿ごとに created_at 昇順で渡される。親は必ず子より先に
//! 作成されるという不変条件があるため、全件の id→index マップを先に
//! 作った上で一度の走査で children リストへ振り分ければツリーが完成する。
//! 再帰は構築に不要で、ノードはフラットな arena に置いたまま
//! インデックスで親子関係を持つ。O(n)。

use crate::domain::value_objects::CommentId;
use std::collections::HashMap;

/// フォレスト構築の入力になれる型。`Comment` 本体のほか、
/// like_count 等を抱き合わせた読み取りモデルも実装する。
pub trait ThreadNode {
    fn comment_id(&self) -> &CommentId;
    fn parent_comment_id(&self) -> Option<&CommentId>;
}

impl ThreadNode for crate::domain::entities::Comment {
    fn comment_id(&self) -> &CommentId {
        &self.id
    }

    fn parent_comment_id(&self) -> Option<&CommentId> {
        self.parent_id.as_ref()
    }
}

/// 1 投稿分のコメントフォレスト。
///
/// ノードは入力順のまま `nodes` に保持し、親子関係は
/// インデックスのリストで表現する。兄弟の順序は入力の時系列順。
#[derive(Debug, Clone)]
pub struct CommentForest<T> {
    nodes: Vec<T>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl<T: ThreadNode> CommentForest<T> {
    /// created_at 昇順のコメント列からフォレストを構築する。
    ///
    /// `parent_id` が入力集合に存在しない場合(クロスポスト破損など)は
    /// ルートとして扱い、決して落とさない。自分自身を親に指す破損も
    /// 同様にルート扱い。
    pub fn build(nodes: Vec<T>) -> Self {
        let mut index_of: HashMap<CommentId, usize> = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            index_of.insert(node.comment_id().clone(), index);
        }

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        let mut roots = Vec::new();

        for (index, node) in nodes.iter().enumerate() {
            let parent_index = node
                .parent_comment_id()
                .and_then(|parent| index_of.get(parent))
                .copied();
            match parent_index {
                Some(parent) if parent != index => children[parent].push(index),
                _ => roots.push(index),
            }
        }

        Self {
            nodes,
            children,
            roots,
        }
    }

    /// ルートノードのインデックス(入力の時系列順)。
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// 直接の返信のインデックス(入力の時系列順)。
    pub fn replies_of(&self, index: usize) -> &[usize] {
        &self.children[index]
    }

    pub fn node(&self, index: usize) -> &T {
        &self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 全ノードを入力順で走査する。
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.nodes.iter()
    }
}
