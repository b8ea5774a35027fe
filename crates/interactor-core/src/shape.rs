//! Runtime identity of request and response types.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The runtime identity of a request or response type.
///
/// Two values have the same shape exactly when they have the same declared
/// type; field values never take part. The type name is carried for
/// diagnostics and is ignored by equality and hashing.
#[derive(Clone, Copy)]
pub struct Shape {
    id: TypeId,
    name: &'static str,
}

impl Shape {
    /// Returns the shape of `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The `TypeId` this shape is keyed by.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The fully qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if this is the shape of `T`.
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Shape {}

impl Hash for Shape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({})", self.name)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct First {
        _id: u32,
    }
    struct Second;

    #[test]
    fn test_shape_identity_is_the_declared_type() {
        assert_eq!(Shape::of::<First>(), Shape::of::<First>());
        assert_ne!(Shape::of::<First>(), Shape::of::<Second>());
        assert!(Shape::of::<Second>().is::<Second>());
    }

    #[test]
    fn test_shape_hashes_by_type() {
        let mut set = HashSet::new();
        set.insert(Shape::of::<First>());
        set.insert(Shape::of::<First>());
        set.insert(Shape::of::<Second>());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_shape_display_uses_type_name() {
        let shape = Shape::of::<Second>();
        assert!(shape.to_string().ends_with("Second"));
        assert!(format!("{shape:?}").starts_with("Shape("));
    }
}
