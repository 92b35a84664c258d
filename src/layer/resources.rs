//! Stacked Resource Store
//!
//! Each resource key owns a shadow stack attached to the node that first
//! defined it. A derived layer overriding the key pushes its own entry onto
//! that stack instead of clobbering the base's value, and pops exactly its
//! own entry on teardown. Because the stack lives on the defining node, two
//! sibling layers deriving from a common base can each shadow the same
//! resource at the same time without disturbing one another: every entry is
//! tagged with its owning layer, and a lookup only sees entries owned by
//! layers in the reader's own resolution order.
//!
//! Values are opaque (`Rc<dyn Any>`); collaborators downcast to the concrete
//! type they expect.

use std::any::Any;
use std::rc::{Rc, Weak};

use crate::error::{Result, StrataError};
use crate::layer::node::{Layer, LayerNode};

/// An opaque resource value.
pub type Value = Rc<dyn Any>;

pub(crate) struct StackEntry {
    value: Value,
    /// The layer that pushed this entry. Weak to keep a base's stack from
    /// holding its own dependents alive.
    owner: Weak<LayerNode>,
}

/// Shadow stack for one resource key: most-recently-pushed entry last,
/// at most one entry per owning layer.
pub(crate) type ResourceStack = Vec<StackEntry>;

impl Layer {
    /// Look up a resource, falling through to base layers.
    ///
    /// Scans the resolution order front-to-back; the first node holding a
    /// stack for `key` with an entry owned by a layer in this layer's own
    /// resolution order wins, using the topmost such entry. Entries pushed
    /// by unrelated sibling branches are invisible here.
    pub fn get(&self, key: &str) -> Option<Value> {
        let order = self.resolution_order();
        for manager in &order {
            let resources = manager.node.resources.borrow();
            if let Some(stack) = resources.get(key) {
                if let Some(entry) = stack.iter().rev().find(|e| owned_by_any(e, &order)) {
                    return Some(Rc::clone(&entry.value));
                }
            }
        }
        None
    }

    /// Look up a resource, returning `default` when nothing is visible.
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }

    /// Look up a resource and downcast it to the expected type.
    ///
    /// Returns `None` when the key is absent *or* holds a different type.
    pub fn get_as<T: Any>(&self, key: &str) -> Option<Rc<T>> {
        self.get(key)?.downcast().ok()
    }

    /// Look up a resource, failing loudly when it is absent.
    ///
    /// # Errors
    /// Returns `KeyNotFound` naming this layer when no node in the
    /// resolution order has a visible entry for `key`.
    pub fn resource(&self, key: &str) -> Result<Value> {
        self.get(key).ok_or_else(|| StrataError::KeyNotFound {
            key: key.to_string(),
            layer: self.to_string(),
        })
    }

    /// Whether a resource is visible from this layer.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set a resource, shadowing rather than clobbering any base value.
    ///
    /// If any node in the resolution order already has a stack for `key`,
    /// this layer's entry is updated in place where it exists and pushed
    /// where it does not — on *every* such node, so that branches of the
    /// base graph sharing the key stay in sync. Setting the same key twice
    /// from the same layer replaces the value; it never stacks twice.
    ///
    /// If no node has a stack for `key`, a fresh stack is created on this
    /// layer itself: this layer becomes the defining node.
    pub fn set(&self, key: impl Into<String>, value: impl Any) {
        let key = key.into();
        let value: Value = Rc::new(value);
        let mut found_stack = false;

        for manager in self.resolution_order() {
            let mut resources = manager.node.resources.borrow_mut();
            let Some(stack) = resources.get_mut(&key) else {
                continue;
            };
            found_stack = true;

            match stack.iter_mut().rev().find(|entry| self.owns(entry)) {
                Some(entry) => entry.value = Rc::clone(&value),
                None => stack.push(StackEntry {
                    value: Rc::clone(&value),
                    owner: Rc::downgrade(&self.node),
                }),
            }
            // Keep scanning: another branch of the base graph may hold its
            // own stack for this key, and those must stay in sync.
        }

        if !found_stack {
            self.node.resources.borrow_mut().insert(
                key,
                vec![StackEntry {
                    value,
                    owner: Rc::downgrade(&self.node),
                }],
            );
        }
    }

    /// Remove this layer's own entry for `key`, restoring whatever it
    /// shadowed. Entries pushed by other layers — base values, sibling
    /// shadows — are left untouched. A stack that empties out is dropped
    /// from its node entirely.
    ///
    /// # Errors
    /// Returns `KeyNotFound` when this layer authored no entry for `key`
    /// anywhere in its resolution order.
    pub fn delete(&self, key: &str) -> Result<()> {
        let mut found = false;

        for manager in self.resolution_order() {
            let mut resources = manager.node.resources.borrow_mut();
            if let Some(stack) = resources.get_mut(key) {
                if let Some(idx) = stack.iter().rposition(|entry| self.owns(entry)) {
                    stack.remove(idx);
                    found = true;
                }
                let empty = stack.is_empty();
                if empty {
                    resources.remove(key);
                }
            }
        }

        if found {
            Ok(())
        } else {
            Err(StrataError::KeyNotFound {
                key: key.to_string(),
                layer: self.to_string(),
            })
        }
    }

    fn owns(&self, entry: &StackEntry) -> bool {
        entry.owner.as_ptr() == Rc::as_ptr(&self.node)
    }
}

fn owned_by_any(entry: &StackEntry, order: &[Layer]) -> bool {
    order
        .iter()
        .any(|layer| entry.owner.as_ptr() == Rc::as_ptr(&layer.node))
}
