use generational_arena::Index;
use termtree::Tree;

use crate::domain::arena::TreeArena;
use crate::domain::builder::Outline;

pub const ROOT_LABEL: &str = "(outline)";

pub trait TreeView {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeView for Outline {
    fn to_tree_string(&self) -> Tree<String> {
        let mut tree = Tree::new(ROOT_LABEL.to_string());

        fn build_tree(arena: &TreeArena, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = arena.get_node(node_idx) {
                for &child_idx in &node.children {
                    if let Some(child) = arena.get_node(child_idx) {
                        let label = child
                            .data
                            .as_ref()
                            .map(|d| d.to_string())
                            .unwrap_or_default();
                        let mut child_tree = Tree::new(label);
                        build_tree(arena, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        build_tree(self.tree(), self.root(), &mut tree);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::OutlineBuilder;

    #[test]
    fn test_tree_view_shows_nesting() {
        let outline = OutlineBuilder::default().build("- d: outer\n    - i: leaf\nnote");
        let tree = outline.to_tree_string();
        assert_eq!(tree.root, ROOT_LABEL);
        assert_eq!(tree.leaves.len(), 2);
        assert_eq!(tree.leaves[0].root, "[d] outer");
        assert_eq!(tree.leaves[0].leaves[0].root, "[i] leaf");
        assert_eq!(tree.leaves[1].root, "note");
    }
}
