//! Scoped context propagation
//!
//! A [`ContextScope`] is a node in a tree of scopes that mirrors the component
//! tree. A component provides a value into its scope; any component built from
//! that scope or from a descendant scope can read it, without intermediate
//! components forwarding it by hand.
//!
//! ```
//! use kurs_core::context::ContextScope;
//!
//! let root = ContextScope::root();
//! root.provide(42u32);
//!
//! let nested = root.child().child();
//! assert_eq!(nested.get::<u32>().as_deref(), Some(&42));
//! ```
//!
//! Values are keyed by type. Providing the same type again in a deeper scope
//! shadows the outer value for that subtree only.

use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// One node of the context tree
pub struct ContextScope {
    parent: Option<Rc<ContextScope>>,
    values: RefCell<FxHashMap<TypeId, Rc<dyn Any>>>,
    depth: usize,
}

impl ContextScope {
    /// Create a scope with no parent
    pub fn root() -> Rc<Self> {
        Rc::new(Self {
            parent: None,
            values: RefCell::new(FxHashMap::default()),
            depth: 0,
        })
    }

    /// Create a child scope that inherits every value visible here
    pub fn child(self: &Rc<Self>) -> Rc<Self> {
        Rc::new(Self {
            parent: Some(Rc::clone(self)),
            values: RefCell::new(FxHashMap::default()),
            depth: self.depth + 1,
        })
    }

    /// Provide a value for this scope and its descendants
    pub fn provide<T: 'static>(&self, value: T) -> Rc<T> {
        let value = Rc::new(value);
        self.provide_rc(Rc::clone(&value));
        value
    }

    /// Provide an already shared value
    pub fn provide_rc<T: 'static>(&self, value: Rc<T>) {
        let shadowed = self
            .values
            .borrow_mut()
            .insert(TypeId::of::<T>(), value as Rc<dyn Any>)
            .is_some();
        if shadowed {
            tracing::debug!(
                ty = std::any::type_name::<T>(),
                depth = self.depth,
                "context value replaced"
            );
        }
    }

    /// Nearest value of type `T`, searching this scope then its ancestors
    pub fn get<T: 'static>(&self) -> Option<Rc<T>> {
        let key = TypeId::of::<T>();
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(value) = current.values.borrow().get(&key) {
                return Rc::clone(value).downcast::<T>().ok();
            }
            scope = current.parent.as_deref();
        }
        None
    }

    /// Whether a value of type `T` is visible from this scope
    pub fn has<T: 'static>(&self) -> bool {
        self.get::<T>().is_some()
    }

    /// Distance from the root scope
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn parent(&self) -> Option<&Rc<ContextScope>> {
        self.parent.as_ref()
    }
}

impl fmt::Debug for ContextScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextScope")
            .field("depth", &self.depth)
            .field("values", &self.values.borrow().len())
            .finish()
    }
}
