//! Arena-backed owning tree.
//!
//! The tree owns one contiguous `Vec` of slots. Containers refer to their
//! children by [`NodeId`], so there are no owning pointers between nodes and
//! insertion only ever accepts fresh, owned [`Value`] subtrees: a node cannot
//! be shared between parents or become its own ancestor.

use std::fmt;

use indexmap::IndexMap;

use crate::value::Element;
use crate::{Kind, Node, Value, ValueError};

/// Index of a node inside the [`Tree`] that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Slot {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<NodeId>),
    Object(IndexMap<String, NodeId>),
    Element {
        tag: String,
        attributes: IndexMap<String, String>,
        children: Vec<NodeId>,
        text: Option<String>,
    },
}

impl Slot {
    pub(crate) fn kind(&self) -> Kind {
        match self {
            Slot::Null => Kind::Null,
            Slot::Bool(_) => Kind::Bool,
            Slot::Number(_) => Kind::Number,
            Slot::String(_) => Kind::String,
            Slot::Array(_) => Kind::Array,
            Slot::Object(_) => Kind::Object,
            Slot::Element { .. } => Kind::Element,
        }
    }

    /// Items, object values or element children, in order.
    pub(crate) fn child_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        let (items, values) = match self {
            Slot::Array(items) | Slot::Element { children: items, .. } => (items.as_slice(), None),
            Slot::Object(map) => (&[][..], Some(map.values())),
            _ => (&[][..], None),
        };
        items
            .iter()
            .chain(values.into_iter().flatten())
            .copied()
    }

    fn remap(&mut self, new_ids: &[usize]) {
        let fix = |id: &mut NodeId| id.0 = new_ids[id.0];
        match self {
            Slot::Array(items) | Slot::Element { children: items, .. } => {
                items.iter_mut().for_each(fix)
            }
            Slot::Object(map) => map.values_mut().for_each(fix),
            _ => {}
        }
    }
}

/// Owning container of a value graph rooted at one node.
///
/// Subtrees replaced by [`Tree::set`] or by re-inserting an existing object
/// key stay allocated until [`Tree::compact`] runs or the tree is dropped.
/// They are unreachable from the root and invisible to navigation, equality
/// and the formatters.
#[derive(Debug, Clone)]
pub struct Tree {
    slots: Vec<Slot>,
    root: NodeId,
}

impl Tree {
    pub fn new(value: impl Into<Value>) -> Self {
        let mut tree = Tree {
            slots: Vec::new(),
            root: NodeId(0),
        };
        tree.root = tree.alloc(value.into());
        tree
    }

    pub fn root(&self) -> Node<'_> {
        Node::new(self, self.root)
    }

    /// Borrows the node `id`, or `None` if it is not an index of this tree.
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.slots.len()).then(|| Node::new(self, id))
    }

    pub(crate) fn slot(&self, id: NodeId) -> &Slot {
        &self.slots[id.0]
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Slot, ValueError> {
        self.slots.get_mut(id.0).ok_or(ValueError::InvalidNode(id))
    }

    /// Appends `value` to an array or to an element's children.
    pub fn push(&mut self, parent: NodeId, value: impl Into<Value>) -> Result<NodeId, ValueError> {
        match self.slot_mut(parent)?.kind() {
            Kind::Array | Kind::Element => {}
            found => return Err(ValueError::mismatch(Kind::Array, found)),
        }
        let child = self.alloc(value.into());
        match &mut self.slots[parent.0] {
            Slot::Array(items) => items.push(child),
            Slot::Element { children, .. } => children.push(child),
            _ => unreachable!("kind checked above"),
        }
        Ok(child)
    }

    /// Sets `key` on an object. An existing key is replaced and moved to the
    /// end, so iteration order reflects the last write.
    pub fn insert(
        &mut self,
        parent: NodeId,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<NodeId, ValueError> {
        let found = self.slot_mut(parent)?.kind();
        if found != Kind::Object {
            return Err(ValueError::mismatch(Kind::Object, found));
        }
        let child = self.alloc(value.into());
        if let Slot::Object(map) = &mut self.slots[parent.0] {
            let key = key.into();
            map.shift_remove(&key);
            map.insert(key, child);
        }
        Ok(child)
    }

    /// Sets an attribute on an element, last write wins.
    pub fn set_attribute(
        &mut self,
        element: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ValueError> {
        match self.slot_mut(element)? {
            Slot::Element { attributes, .. } => {
                let name = name.into();
                attributes.shift_remove(&name);
                attributes.insert(name, value.into());
                Ok(())
            }
            other => Err(ValueError::mismatch(Kind::Element, other.kind())),
        }
    }

    pub fn set_text(&mut self, element: NodeId, text: Option<String>) -> Result<(), ValueError> {
        match self.slot_mut(element)? {
            Slot::Element { text: slot, .. } => {
                *slot = text;
                Ok(())
            }
            other => Err(ValueError::mismatch(Kind::Element, other.kind())),
        }
    }

    /// Replaces the node `id` in place with a fresh copy of `value`.
    pub fn set(&mut self, id: NodeId, value: impl Into<Value>) -> Result<(), ValueError> {
        self.slot_mut(id)?;
        let slot = self.build(value.into());
        self.slots[id.0] = slot;
        Ok(())
    }

    /// Rebuilds the owned form of the whole tree.
    pub fn to_value(&self) -> Value {
        self.root().to_value()
    }

    /// Depth-first, pre-order traversal of the nodes reachable from the root.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            tree: self,
            stack: vec![(0, self.root)],
        }
    }

    /// Number of nodes reachable from the root.
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Number of allocated slots, detached ones included.
    pub fn arena_len(&self) -> usize {
        self.slots.len()
    }

    /// Drops every slot that is no longer reachable from the root.
    ///
    /// When anything is dropped, reachable nodes are renumbered in pre-order
    /// starting with the root at `0`, so a [`NodeId`] taken before the call
    /// must be looked up again.
    pub fn compact(&mut self) {
        let order: Vec<NodeId> = self.walk().map(|(_, node)| node.id()).collect();
        if order.len() == self.slots.len() {
            return;
        }
        let mut new_ids = vec![usize::MAX; self.slots.len()];
        for (new, id) in order.iter().enumerate() {
            new_ids[id.0] = new;
        }
        let mut old = std::mem::take(&mut self.slots);
        self.slots = order
            .iter()
            .map(|id| {
                let mut slot = std::mem::replace(&mut old[id.0], Slot::Null);
                slot.remap(&new_ids);
                slot
            })
            .collect();
        self.root = NodeId(0);
    }

    fn alloc(&mut self, value: Value) -> NodeId {
        let slot = self.build(value);
        self.slots.push(slot);
        NodeId(self.slots.len() - 1)
    }

    fn build(&mut self, value: Value) -> Slot {
        match value {
            Value::Null => Slot::Null,
            Value::Bool(b) => Slot::Bool(b),
            Value::Number(n) => Slot::Number(n),
            Value::String(s) => Slot::String(s),
            Value::Array(items) => {
                Slot::Array(items.into_iter().map(|item| self.alloc(item)).collect())
            }
            Value::Object(pairs) => {
                let mut map = IndexMap::with_capacity(pairs.len());
                for (key, item) in pairs {
                    let child = self.alloc(item);
                    map.shift_remove(&key);
                    map.insert(key, child);
                }
                Slot::Object(map)
            }
            Value::Element(Element {
                tag,
                attributes,
                children,
                text,
            }) => {
                let mut attrs = IndexMap::with_capacity(attributes.len());
                for (name, value) in attributes {
                    attrs.shift_remove(&name);
                    attrs.insert(name, value);
                }
                Slot::Element {
                    tag,
                    attributes: attrs,
                    children: children.into_iter().map(|c| self.alloc(c)).collect(),
                    text,
                }
            }
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new(Value::Null)
    }
}

impl From<Value> for Tree {
    fn from(value: Value) -> Self {
        Tree::new(value)
    }
}

/// Iterator returned by [`Tree::walk`]: yields `(depth, node)` pairs.
pub struct Walk<'t> {
    tree: &'t Tree,
    stack: Vec<(usize, NodeId)>,
}

impl<'t> Iterator for Walk<'t> {
    type Item = (usize, Node<'t>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.stack.pop()?;
        let tree = self.tree;
        let children: &[NodeId] = match tree.slot(id) {
            Slot::Array(items) => items,
            Slot::Element { children, .. } => children,
            Slot::Object(map) => {
                self.stack
                    .extend(map.values().rev().map(|&child| (depth + 1, child)));
                &[]
            }
            _ => &[],
        };
        self.stack
            .extend(children.iter().rev().map(|&child| (depth + 1, child)));
        Some((depth, Node::new(tree, id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_appends_to_arrays_and_elements() {
        let mut tree = Tree::new(Value::Array(vec![]));
        let root = tree.root().id();
        tree.push(root, 1).unwrap();
        tree.push(root, "two").unwrap();
        assert_eq!(tree.root().len().unwrap(), 2);

        let mut xml = Tree::new(Value::element("root"));
        let root = xml.root().id();
        let leaf = xml.push(root, Value::element("leaf")).unwrap();
        assert_eq!(xml.node(leaf).unwrap().tag().unwrap(), "leaf");
    }

    #[test]
    fn push_rejects_scalars_and_objects() {
        let mut tree = Tree::new(Value::object([("a", Value::Null)]));
        let root = tree.root().id();
        assert_eq!(
            tree.push(root, 1),
            Err(ValueError::TypeMismatch {
                expected: Kind::Array,
                found: Kind::Object
            })
        );
    }

    #[test]
    fn insert_moves_rewritten_key_to_end() {
        let mut tree = Tree::new(Value::object([
            ("a", Value::from(1)),
            ("b", Value::from(2)),
        ]));
        let root = tree.root().id();
        tree.insert(root, "a", 3).unwrap();
        let keys: Vec<&str> = tree.root().entries().unwrap().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(
            tree.root().get("a").unwrap().unwrap().as_number().unwrap(),
            3.0
        );
    }

    #[test]
    fn object_literal_duplicates_resolve_to_last() {
        let tree = Tree::new(Value::object([
            ("a", Value::from(1)),
            ("b", Value::from(2)),
            ("a", Value::from(3)),
        ]));
        assert_eq!(tree.root().len().unwrap(), 2);
        let keys: Vec<&str> = tree.root().entries().unwrap().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn set_replaces_in_place_and_hides_old_subtree() {
        let mut tree = Tree::new(Value::from(vec![Value::from(vec![Value::from(1)])]));
        let inner = tree.root().at(0).unwrap().unwrap().id();
        tree.set(inner, "flat").unwrap();
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.to_value(), Value::from(vec![Value::from("flat")]));
    }

    #[test]
    fn compact_reclaims_replaced_subtrees() {
        let mut tree = Tree::new(Value::object([("n", Value::from(0))]));
        let root = tree.root().id();
        tree.insert(root, "list", Value::Array(vec![])).unwrap();
        for i in 0..1000 {
            tree.insert(root, "n", i).unwrap();
        }
        let list = tree.root().get("list").unwrap().unwrap().id();
        tree.set(list, vec![Value::from(1), Value::from(2)]).unwrap();
        assert!(tree.arena_len() > 1000);

        let before = tree.to_value();
        tree.compact();
        assert_eq!(tree.arena_len(), tree.node_count());
        assert_eq!(tree.arena_len(), 5);
        assert_eq!(tree.root().id(), NodeId(0));
        assert_eq!(tree.to_value(), before);

        let root = tree.root().id();
        let list = tree.root().get("list").unwrap().unwrap().id();
        tree.push(list, 3).unwrap();
        tree.insert(root, "n", -1).unwrap();
        assert_eq!(
            tree.to_value(),
            Value::object([
                (
                    "list",
                    Value::from(vec![Value::from(1), Value::from(2), Value::from(3)])
                ),
                ("n", Value::from(-1)),
            ])
        );
    }

    #[test]
    fn compact_without_garbage_keeps_ids() {
        let mut tree = Tree::new(Value::from(vec![Value::from(1)]));
        let root = tree.root().id();
        tree.compact();
        assert_eq!(tree.root().id(), root);
    }

    #[test]
    fn deep_tree_rebuilds_owned_value() {
        let mut tree = Tree::new(Value::Array(vec![]));
        let mut id = tree.root().id();
        for i in 0..1000 {
            id = tree.push(id, Value::Array(vec![Value::from(i)])).unwrap();
        }
        let mut value = &tree.to_value();
        let mut depth = 0;
        while let Value::Array(items) = value {
            match items.last() {
                Some(next @ Value::Array(_)) => value = next,
                _ => break,
            }
            depth += 1;
        }
        assert_eq!(depth, 1000);
        assert!(tree == tree.to_value());
    }

    #[test]
    fn foreign_node_id_is_rejected() {
        let mut tree = Tree::new(Value::Null);
        let bogus = NodeId(99);
        assert!(tree.node(bogus).is_none());
        assert_eq!(tree.set(bogus, 1), Err(ValueError::InvalidNode(bogus)));
    }

    #[test]
    fn walk_is_pre_order_with_depth() {
        let tree = Tree::new(Value::object([
            ("a", Value::from(vec![Value::from(1), Value::from(2)])),
            ("b", Value::Null),
        ]));
        let seen: Vec<(usize, Kind)> = tree.walk().map(|(d, n)| (d, n.kind())).collect();
        assert_eq!(
            seen,
            vec![
                (0, Kind::Object),
                (1, Kind::Array),
                (2, Kind::Number),
                (2, Kind::Number),
                (1, Kind::Null),
            ]
        );
    }

    #[test]
    fn attributes_and_text_mutation() {
        let mut tree = Tree::new(Value::element("a").attr("x", "1"));
        let root = tree.root().id();
        tree.set_attribute(root, "y", "2").unwrap();
        tree.set_attribute(root, "x", "3").unwrap();
        tree.set_text(root, Some("body".into())).unwrap();
        let attrs: Vec<(&str, &str)> = tree.root().attributes().unwrap().collect();
        assert_eq!(attrs, vec![("y", "2"), ("x", "3")]);
        assert_eq!(tree.root().text().unwrap(), Some("body"));

        let mut scalar = Tree::new(Value::from(1));
        let root = scalar.root().id();
        assert!(scalar.set_attribute(root, "x", "1").is_err());
    }
}
