//! Substitution of formal type parameters.

use std::collections::HashMap;
use std::sync::Arc;

use crate::element::TypeParameter;
use crate::error::TypeError;
use crate::model::{Type, TypeVariable, WildcardBound};

/// Mapping from formal type parameters to the types replacing them.
pub type SubstitutionMap = HashMap<Arc<TypeParameter>, Type>;

/// Both the caller-supplied mapping and the fresh variables pre-allocated for
/// recursive replacements.
struct Substitutions<'a> {
    map: &'a SubstitutionMap,
    fresh: &'a HashMap<Arc<TypeParameter>, TypeVariable>,
}

/// Replaces formal type parameters in `ty` according to `map`.
///
/// Where a parameter is mapped to a type variable *of that same parameter*
/// (as happens for every wildcard position during capture conversion, and for
/// raw-type propagation during type-argument resolution), a fresh variable is
/// created first and the replacement's bounds are rewritten to reference the
/// fresh variable. This is what turns `Enum<?>` into a captured type whose
/// variable's upper bound mentions the variable itself, without ever building
/// a cycle during construction.
///
/// `ty` must not contain transitive references to itself other than through a
/// declaration, and type variables reachable from `map` values must not
/// reference themselves through their own bounds unless they are prototypical
/// variables. Both hold for every type this crate constructs on behalf of
/// callers.
pub fn substitute(ty: &Type, map: &SubstitutionMap) -> Result<Type, TypeError> {
    if map.is_empty() {
        return Ok(ty.clone());
    }

    let mut fresh: HashMap<Arc<TypeParameter>, TypeVariable> = HashMap::new();
    for (parameter, replacement) in map {
        if let Type::Variable(variable) = replacement {
            if variable.parameter() == parameter {
                fresh.insert(
                    parameter.clone(),
                    TypeVariable::new_unfinished(
                        parameter.clone(),
                        variable.captured_argument().cloned(),
                    ),
                );
            }
        }
    }

    let substitutions = Substitutions {
        map,
        fresh: &fresh,
    };
    for (parameter, fresh_variable) in &fresh {
        let Some(Type::Variable(replacement)) = map.get(parameter) else {
            unreachable!("fresh variables are only allocated for variable replacements");
        };
        let upper = apply(replacement.upper_bound()?, &substitutions)?;
        let lower = apply(replacement.lower_bound()?, &substitutions)?;
        fresh_variable.set_bounds(upper, lower)?;
    }

    apply(ty, &substitutions)
}

fn apply(ty: &Type, substitutions: &Substitutions<'_>) -> Result<Type, TypeError> {
    match ty {
        Type::Declared(declared) => {
            let arguments = declared
                .type_arguments()
                .iter()
                .map(|argument| apply(argument, substitutions))
                .collect::<Result<Vec<_>, _>>()?;
            Type::declared_in(
                declared.enclosing_type().clone(),
                declared.declaration(),
                arguments,
            )
        }
        Type::Array(component) => Ok(Type::array(apply(component, substitutions)?)),
        Type::Variable(variable) => {
            let parameter = variable.parameter();
            if let Some(fresh_variable) = substitutions.fresh.get(parameter) {
                if variable == parameter.prototype() {
                    return Ok(Type::Variable(fresh_variable.clone()));
                }
            }
            if let Some(replacement) = substitutions.map.get(parameter) {
                return Ok(replacement.clone());
            }
            let upper = apply(variable.upper_bound()?, substitutions)?;
            let lower = apply(variable.lower_bound()?, substitutions)?;
            Ok(Type::Variable(TypeVariable::with_bounds(
                parameter.clone(),
                upper,
                lower,
                variable.captured_argument().cloned(),
            )))
        }
        Type::Wildcard(bound) => {
            let bound = match bound {
                WildcardBound::Unbounded => WildcardBound::Unbounded,
                WildcardBound::Extends(upper) => {
                    WildcardBound::Extends(Box::new(apply(upper, substitutions)?))
                }
                WildcardBound::Super(lower) => {
                    WildcardBound::Super(Box::new(apply(lower, substitutions)?))
                }
            };
            Ok(Type::Wildcard(bound))
        }
        Type::Intersection(intersection) => {
            let bounds = intersection
                .bounds()
                .iter()
                .map(|bound| apply(bound, substitutions))
                .collect::<Result<Vec<_>, _>>()?;
            Type::intersection(bounds)
        }
        Type::Primitive(_) | Type::Void | Type::None | Type::Null => Ok(ty.clone()),
    }
}
