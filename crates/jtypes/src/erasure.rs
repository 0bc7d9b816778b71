//! Type erasure (JLS §4.6).

use crate::error::TypeError;
use crate::model::Type;

/// The erasure of a type.
///
/// Declared types drop their type arguments and erase their enclosing type,
/// arrays erase their component, a type variable erases to the erasure of its
/// upper bound, and an intersection erases to the erasure of its leftmost
/// bound. Every other type is its own erasure.
pub fn erasure(ty: &Type) -> Result<Type, TypeError> {
    match ty {
        Type::Declared(declared) => {
            let enclosing = match declared.enclosing_type() {
                Type::None => Type::None,
                enclosing => erasure(enclosing)?,
            };
            Type::declared_in(enclosing, declared.declaration(), Vec::new())
        }
        Type::Array(component) => Ok(Type::array(erasure(component)?)),
        Type::Variable(variable) => erasure(variable.upper_bound()?),
        Type::Intersection(intersection) => erasure(&intersection.bounds()[0]),
        Type::Primitive(_) | Type::Void | Type::None | Type::Null | Type::Wildcard(_) => {
            Ok(ty.clone())
        }
    }
}
