//! Subtyping (JLS §4.10) and containment of type arguments (JLS §4.5.1).

use crate::capture::capture;
use crate::error::TypeError;
use crate::model::{DeclaredType, PrimitiveKind, Type};
use crate::provider::DeclarationProvider;
use crate::resolve::resolve_actual_type_arguments;

/// Whether two type arguments represent the same type.
///
/// Wildcards are type arguments, not types: if either operand is a wildcard,
/// the result is `false` — a wildcard is not even the same type as itself.
pub fn is_same_type(t1: &Type, t2: &Type) -> bool {
    !t1.is_wildcard() && !t2.is_wildcard() && t1 == t2
}

/// Whether `t1` is a subtype of `t2` (JLS §4.10). Reflexive and transitive.
pub fn is_subtype(
    provider: &dyn DeclarationProvider,
    t1: &Type,
    t2: &Type,
) -> Result<bool, TypeError> {
    if is_same_type(t1, t2) {
        return Ok(true);
    }

    // §4.10.2: the direct supertypes of the null type are all reference types.
    if matches!(t1, Type::Null)
        && matches!(
            t2,
            Type::Array(_) | Type::Declared(_) | Type::Null | Type::Variable(_)
        )
    {
        return Ok(true);
    }

    match t2 {
        // §4.10.3: array component types are covariant, and all subtypes of an
        // array type are array types.
        Type::Array(super_component) => match t1 {
            Type::Array(sub_component) => is_subtype(provider, sub_component, super_component),
            _ => Ok(false),
        },
        Type::Declared(super_declared) => subtype_of_declared(provider, t1, super_declared),
        Type::Primitive(super_kind) => match t1 {
            Type::Primitive(sub_kind) => Ok(primitive_widening(*sub_kind, *super_kind)),
            _ => Ok(false),
        },
        // A type variable is a supertype only of its lower bound.
        Type::Variable(variable) => Ok(is_same_type(variable.lower_bound()?, t1)),
        // JLS §4.10 only makes the members of an intersection its direct
        // *supertypes*; it does not make sub-intersections supertypes (see
        // JDK-6718388). An intersection is therefore only a supertype of
        // itself, which the equality check above already covered.
        Type::Intersection(_) => Ok(is_same_type(t2, t1)),
        Type::Void | Type::None | Type::Null | Type::Wildcard(_) => Ok(false),
    }
}

/// Whether `t1` is a subtype of the declared type `super_declared`, dispatched
/// on the form of `t1`.
fn subtype_of_declared(
    provider: &dyn DeclarationProvider,
    t1: &Type,
    super_declared: &DeclaredType,
) -> Result<bool, TypeError> {
    match t1 {
        Type::Declared(sub_declared) => {
            // Wildcards cannot occur on an inheritance path (JLS §8.1.4,
            // §9.1.3 outlaw them in extends/implements clauses), so a sub type
            // with wildcard arguments is replaced by its capture conversion
            // before projecting.
            let captured;
            let actual_sub = if sub_declared
                .type_arguments()
                .iter()
                .any(|argument| argument.is_wildcard())
            {
                let Type::Declared(declared) = capture(t1)? else {
                    unreachable!("capture conversion preserves the declared form");
                };
                captured = Type::Declared(declared);
                &captured
            } else {
                t1
            };

            let Some(projected) =
                resolve_actual_type_arguments(provider, super_declared.declaration(), actual_sub)?
            else {
                return Ok(false);
            };

            let super_arguments = super_declared.type_arguments();
            if projected.is_empty() && !super_arguments.is_empty() {
                // The projection came out raw, and a raw type is not a subtype
                // of any parameterized invocation.
                return Ok(false);
            }

            // When `super_declared` is itself raw the loop body never runs:
            // the raw type is a supertype of every invocation.
            for (super_argument, projected_argument) in super_arguments.iter().zip(&projected) {
                if !contains(provider, super_argument, projected_argument)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        // §4.10.3: an array type is only a subtype of Object, Cloneable, and
        // Serializable among the declared types.
        Type::Array(_) => {
            let well_known = provider.well_known();
            Ok(super_declared == well_known.object_declared()
                || super_declared == well_known.cloneable().prototype()
                || super_declared == well_known.serializable().prototype())
        }
        // §4.10.2: the direct supertypes of a type variable are the types in
        // its bound.
        Type::Variable(variable) => is_subtype(
            provider,
            variable.upper_bound()?,
            &Type::Declared(super_declared.clone()),
        ),
        // §4.10.2: the direct supertypes of an intersection are its members.
        Type::Intersection(intersection) => {
            let super_type = Type::Declared(super_declared.clone());
            for bound in intersection.bounds() {
                if is_subtype(provider, bound, &super_type)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// The primitive widening lattice (JLS §4.10.1): `double ≥ float ≥ long ≥ int
/// ≥ short ≥ byte`, with `char` widening to `int` and above. Every kind is a
/// subtype of itself.
fn primitive_widening(from: PrimitiveKind, to: PrimitiveKind) -> bool {
    use PrimitiveKind::*;
    if from == to {
        return true;
    }
    match (from, to) {
        (Byte, Short | Int | Long | Float | Double) => true,
        (Short, Int | Long | Float | Double) => true,
        (Char, Int | Long | Float | Double) => true,
        (Int, Long | Float | Double) => true,
        (Long, Float | Double) => true,
        (Float, Double) => true,
        _ => false,
    }
}

/// Whether type argument `t1` contains type argument `t2`, written `t2 <= t1`
/// in JLS §4.5.1.
///
/// Subtyping does not extend through parameterized types; containment is the
/// relation that makes `List<Integer>` a subtype of `List<? extends Number>`
/// without making it a subtype of `List<Number>`.
pub fn contains(
    provider: &dyn DeclarationProvider,
    t1: &Type,
    t2: &Type,
) -> Result<bool, TypeError> {
    // The cases, writing t2 <= t1:
    //
    // (a) wildcard <= wildcard
    //   1. ? extends T <= ? extends S   if T <: S
    //   2. ? extends T <= ?
    //   3. ? super T   <= ? super S     if S <: T
    //   4. ? super T   <= ?
    //   5. ? super T   <= ? extends Object
    // (b) type <= type: T <= T
    // (c) type <= wildcard, reduced to (a) via T <= ? extends T / T <= ? super T

    let Type::Wildcard(outer) = t1 else {
        return Ok(is_same_type(t1, t2));
    };
    let outer_extends = outer.extends_bound();
    let outer_super = outer.super_bound();

    let Type::Wildcard(inner) = t2 else {
        // (c): wrap the bare type in the matching wildcard form.
        if outer_extends.is_some() {
            return contains(provider, t1, &Type::wildcard(Some(t2.clone()), None)?);
        }
        if outer_super.is_some() {
            return contains(provider, t1, &Type::wildcard(None, Some(t2.clone()))?);
        }
        // (c) combined with (a) 2. or (a) 4.: T <= ? always holds.
        return Ok(true);
    };

    if let Some(inner_extends) = inner.extends_bound() {
        if let Some(outer_bound) = outer_extends {
            // (a) 1.
            return is_subtype(provider, inner_extends, outer_bound);
        }
        // (a) 2. — but "? super S" never contains "? extends T".
        Ok(outer_super.is_none())
    } else if let Some(inner_super) = inner.super_bound() {
        if let Some(outer_bound) = outer_super {
            // (a) 3.
            return is_subtype(provider, outer_bound, inner_super);
        }
        // (a) 4. and 5.: "?" always, "? extends T" only when T is Object.
        match outer_extends {
            None => Ok(true),
            Some(outer_bound) => Ok(is_same_type(
                outer_bound,
                &provider.well_known().object_type(),
            )),
        }
    } else {
        // "?" is equivalent to "? extends Object", so it is contained by "?"
        // and "? extends Object" but by no other wildcard.
        Ok(outer_super.is_none()
            && match outer_extends {
                None => true,
                Some(outer_bound) => {
                    is_same_type(outer_bound, &provider.well_known().object_type())
                }
            })
    }
}
