use std::fmt;
use std::sync::Arc;

///
/// FactObject
///
/// A host-provided opaque object that can appear as a leaf in a fact
/// record. Unlike `Value::Map`, which models a plain data mapping,
/// a `FactObject` models a navigable host type: `VariableProperty`
/// resolution tries a zero-arg method first, then a field, then keyed
/// access (§4.3) before falling back to its default.
///
/// Implementors only need to override the accessors that make sense for
/// their type; the default is "nothing found here", which lets
/// `VariableProperty` fall through to the next priority tier.
pub trait FactObject: fmt::Debug + Send + Sync {
    /// Invoke a zero-arg method named `name`, if this object exposes one.
    fn call_method(&self, _name: &str) -> Option<super::Value> {
        None
    }

    /// Read an accessible field named `name`, if this object has one.
    fn get_field(&self, _name: &str) -> Option<super::Value> {
        None
    }

    /// Read a value via keyed access (e.g. `obj["name"]`), if supported.
    fn get_keyed(&self, _name: &str) -> Option<super::Value> {
        None
    }
}

///
/// ObjectValue
///
/// Wraps an opaque object with identity-based equality: two
/// `ObjectValue`s are `equal_to` only when they point at the same
/// underlying allocation, never by structural comparison.
#[derive(Clone)]
pub struct ObjectValue(Arc<dyn FactObject>);

impl ObjectValue {
    #[must_use]
    pub fn new(object: impl FactObject + 'static) -> Self {
        Self(Arc::new(object))
    }

    #[must_use]
    pub fn from_arc(object: Arc<dyn FactObject>) -> Self {
        Self(object)
    }

    #[must_use]
    pub fn as_fact_object(&self) -> &dyn FactObject {
        &*self.0
    }

    #[must_use]
    pub fn identity_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectValue({:?})", self.0)
    }
}

///
/// ProtectedMarker
///
/// The literal value returned when reading a `protected` context entry:
/// a stable, inspectable stand-in for "the factory itself", never the
/// value the factory would have produced. Two reads of the same
/// protected entry return marker values with the same identity.
#[derive(Debug)]
pub struct ProtectedMarker {
    pub name: String,
}

impl FactObject for ProtectedMarker {}
