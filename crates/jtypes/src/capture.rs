//! Capture conversion (JLS §5.1.10).

use std::sync::Arc;

use crate::element::TypeParameter;
use crate::error::TypeError;
use crate::model::{Type, TypeVariable, WildcardBound};
use crate::subst::{substitute, SubstitutionMap};

/// The capture conversion of a type.
///
/// Capture conversion on anything other than a parameterized type is the
/// identity. For a parameterized type `G<T_1, …, T_n>` every wildcard argument
/// `T_i` is replaced by a fresh type variable `S_i`:
///
/// - for `?`, the upper bound of `S_i` is the formal parameter's bound `U_i`
///   and the lower bound is the null type;
/// - for `? extends B_i`, the upper bound is `glb(B_i, U_i)` and the lower
///   bound is the null type;
/// - for `? super B_i`, the upper bound is `U_i` and the lower bound is `B_i`.
///
/// In every case `U_i` has its formal-parameter references `A_j` rewritten to
/// the fresh variables `S_j`. That rewriting is delegated to
/// [`substitute`]: the intermediate type is built with *prototypical*
/// variables in the wildcard positions, and the substitution `A_j := S_j`
/// then replaces them while re-linking the (possibly mutually recursive)
/// bounds of the fresh variables.
pub fn capture(ty: &Type) -> Result<Type, TypeError> {
    let Type::Declared(declared) = ty else {
        return Ok(ty.clone());
    };
    if declared.type_arguments().is_empty() {
        return Ok(ty.clone());
    }

    let declaration = declared.declaration();
    let mut intermediate_arguments = Vec::with_capacity(declared.type_arguments().len());
    let mut substitutions = SubstitutionMap::new();
    for (parameter, argument) in declaration
        .type_parameters()
        .iter()
        .zip(declared.type_arguments())
    {
        if let Type::Wildcard(wildcard) = argument {
            // The intermediate type carries the prototypical variable, which
            // is the only thing the substitution pass will replace.
            intermediate_arguments.push(parameter.as_type());
            substitutions.insert(
                parameter.clone(),
                Type::Variable(capture_wildcard_argument(wildcard, parameter)?),
            );
        } else {
            intermediate_arguments.push(argument.clone());
            substitutions.insert(parameter.clone(), argument.clone());
        }
    }

    let intermediate = Type::declared_in(
        declared.enclosing_type().clone(),
        declaration,
        intermediate_arguments,
    )?;
    substitute(&intermediate, &substitutions)
}

/// The fresh type variable capturing a single wildcard argument.
///
/// The bounds produced here still reference the prototypical variables of the
/// enclosing declaration's parameters; [`capture`] resolves them afterwards.
fn capture_wildcard_argument(
    wildcard: &WildcardBound,
    parameter: &Arc<TypeParameter>,
) -> Result<TypeVariable, TypeError> {
    // Denoted U_i in JLS §5.1.10.
    let original_upper = parameter.prototype().upper_bound()?;

    let (upper, lower) = match wildcard {
        WildcardBound::Unbounded => (original_upper.clone(), Type::Null),
        WildcardBound::Extends(extends_bound) => (
            Type::intersection(greatest_lower_bound(extends_bound, original_upper))?,
            Type::Null,
        ),
        WildcardBound::Super(super_bound) => (original_upper.clone(), (**super_bound).clone()),
    };

    Ok(TypeVariable::with_bounds(
        parameter.clone(),
        upper,
        lower,
        Some(wildcard.clone()),
    ))
}

/// The bound list of `glb(B, U)`.
///
/// JLS §5.1.10 defines `glb(V_1, …, V_m)` as `V_1 & … & V_m` without saying
/// whether intersections nest. This implementation keeps them flat: when the
/// original upper bound is itself an intersection, its members are unwrapped
/// before the wildcard bound is prepended.
fn greatest_lower_bound(extends_bound: &Type, original_upper: &Type) -> Vec<Type> {
    let mut bounds = vec![extends_bound.clone()];
    match original_upper {
        Type::Intersection(intersection) => {
            bounds.extend(intersection.bounds().iter().cloned());
        }
        other => bounds.push(other.clone()),
    }
    bounds
}
