//! Generic parent-linked tree node.
//!
//! A node owns its children (ordered `Vec` of `Rc` handles) and holds only a
//! `Weak` back-reference to its parent, so dropping a subtree never leaks
//! through a reference cycle. Every node is constructed with its own freshly
//! allocated children vector.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Shared handle to a tree node.
pub type NodeRef<T> = Rc<RefCell<Node<T>>>;

/// A single tree node carrying an opaque payload.
#[derive(Debug)]
pub struct Node<T> {
    data: T,
    parent: Weak<RefCell<Node<T>>>,
    children: Vec<NodeRef<T>>,
}

impl<T> Node<T> {
    /// Create a detached root node.
    pub fn new_root(data: T) -> NodeRef<T> {
        Rc::new(RefCell::new(Node {
            data,
            parent: Weak::new(),
            children: Vec::new(),
        }))
    }

    /// Append a new child under `parent` and return it.
    pub fn add_child(parent: &NodeRef<T>, data: T) -> NodeRef<T> {
        let child = Rc::new(RefCell::new(Node {
            data,
            parent: Rc::downgrade(parent),
            children: Vec::new(),
        }));
        parent.borrow_mut().children.push(Rc::clone(&child));
        child
    }

    /// The node's payload.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Mutable access to the payload.
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Direct children, in insertion order.
    pub fn children(&self) -> &[NodeRef<T>] {
        &self.children
    }

    /// The parent node, if this node is still attached and not the root.
    pub fn parent(&self) -> Option<NodeRef<T>> {
        self.parent.upgrade()
    }

    /// True if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The ordered chain of nodes from the root down to `node`, inclusive.
    pub fn ancestors(node: &NodeRef<T>) -> Vec<NodeRef<T>> {
        let mut chain = vec![Rc::clone(node)];
        let mut current = node.borrow().parent();
        while let Some(parent) = current {
            let next = parent.borrow().parent();
            chain.push(parent);
            current = next;
        }
        chain.reverse();
        chain
    }

    /// Unlink `node` from its parent's children. No-op for the root.
    ///
    /// The detached node's own subtree stays intact but becomes unreachable
    /// from the tree root.
    pub fn detach(node: &NodeRef<T>) {
        let Some(parent) = node.borrow().parent() else {
            return;
        };
        let mut parent = parent.borrow_mut();
        if let Some(idx) = parent.children.iter().position(|c| Rc::ptr_eq(c, node)) {
            parent.children.remove(idx);
        }
    }

    /// Lazy depth-first iterator over the *leaf* nodes reachable from `node`.
    ///
    /// Internal nodes are traversed but not yielded; `node` itself is never
    /// yielded. The iterator is finite and each call starts a fresh walk.
    pub fn leaves(node: &NodeRef<T>) -> Leaves<T> {
        let mut stack: Vec<NodeRef<T>> = node.borrow().children.clone();
        stack.reverse();
        Leaves { stack }
    }
}

impl<T: Clone> Node<T> {
    /// The payloads of [`Node::ancestors`], root-first.
    pub fn data_path(node: &NodeRef<T>) -> Vec<T> {
        Self::ancestors(node)
            .iter()
            .map(|n| n.borrow().data.clone())
            .collect()
    }
}

impl<T: PartialEq> Node<T> {
    /// Linear search of direct children by payload equality.
    pub fn get_child(&self, data: &T) -> Option<NodeRef<T>> {
        self.children
            .iter()
            .find(|c| c.borrow().data == *data)
            .cloned()
    }
}

/// Depth-first leaf iterator. See [`Node::leaves`].
#[derive(Debug)]
pub struct Leaves<T> {
    stack: Vec<NodeRef<T>>,
}

impl<T> Iterator for Leaves<T> {
    type Item = NodeRef<T>;

    fn next(&mut self) -> Option<NodeRef<T>> {
        while let Some(node) = self.stack.pop() {
            if node.borrow().is_leaf() {
                return Some(node);
            }
            let mut children = node.borrow().children.clone();
            children.reverse();
            self.stack.extend(children);
        }
        None
    }
}
