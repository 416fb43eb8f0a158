//! Node queries: by trait, widget type, or an arbitrary predicate.
//!
//! Queries walk the subtree under a given node in pre-order, so results come
//! back in tree order.

use super::node::{NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Nodes under (and including) `root` that have `name` enabled.
    pub fn query_by_trait(&self, root: NodeId, name: &str) -> Vec<NodeId> {
        self.query_all(root, |data| data.state.traits.has(name))
    }

    /// Nodes under (and including) `root` whose widget type is `widget_type`.
    pub fn query_by_type(&self, root: NodeId, widget_type: &str) -> Vec<NodeId> {
        self.query_all(root, |data| data.widget_type() == widget_type)
    }

    /// Nodes under (and including) `root` matching `predicate`.
    pub fn query_all(&self, root: NodeId, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.walk_depth_first(root)
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(&predicate))
            .collect()
    }

    /// First node under `root` matching `predicate`.
    pub fn query_one(&self, root: NodeId, predicate: impl Fn(&NodeData) -> bool) -> Option<NodeId> {
        self.query_all(root, predicate).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::tree::Dom;
    use crate::widgets::{Button, Label, Panel};

    #[test]
    fn queries_follow_tree_order() {
        let mut dom = Dom::new();
        let root = dom.create(Panel::new());
        let left = dom.create(Panel::new());
        let save = dom.create(Button::new());
        let title = dom.create(Label::new("title"));
        let cancel = dom.create(Button::new());
        dom.add_child(root, left);
        dom.add_child(left, save);
        dom.add_child(root, title);
        dom.add_child(root, cancel);

        assert_eq!(dom.query_by_type(root, "Button"), vec![save, cancel]);
        assert_eq!(dom.query_by_type(left, "Button"), vec![save]);
        assert!(dom.query_by_type(root, "Slider").is_empty());

        dom.add_trait(cancel, "danger");
        assert_eq!(dom.query_by_trait(root, "danger"), vec![cancel]);
        assert_eq!(dom.query_by_trait(root, "button"), vec![save, cancel]);

        let found = dom.query_one(root, |data| {
            data.widget::<Label>().is_some_and(|label| label.text() == "title")
        });
        assert_eq!(found, Some(title));
    }

    #[test]
    fn detached_nodes_are_not_found() {
        let mut dom = Dom::new();
        let root = dom.create(Panel::new());
        let _loose = dom.create(Button::new());
        assert!(dom.query_by_type(root, "Button").is_empty());
    }
}
