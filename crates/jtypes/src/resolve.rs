//! Projection of actual type arguments across the inheritance hierarchy.

use std::collections::HashMap;
use std::sync::Arc;

use crate::element::TypeDeclaration;
use crate::error::TypeError;
use crate::model::{DeclaredType, Type};
use crate::name::Name;
use crate::provider::DeclarationProvider;
use crate::subst::{substitute, SubstitutionMap};

/// Resolves the actual type arguments that `target`'s formal parameters take
/// on when `sub_type` is viewed as an instance of `target`.
///
/// The shortest inheritance path from `sub_type` to `target` is found first;
/// JLS §8.1.5 guarantees that a declaration cannot be inherited twice with
/// different type arguments, so the shortest path carries all information
/// needed. The actual arguments are then propagated bottom-up along the path
/// by repeated substitution.
///
/// A raw type *within* the path is replaced by the prototypical type of its
/// declaration, so the result may contain type variables standing for "left
/// unbound by inheriting from a raw type". If the *last* path element is raw,
/// the result is `Some` of an empty list.
///
/// Returns `Ok(None)` when `sub_type` is not a declared type or has no
/// inheritance path to `target`.
pub fn resolve_actual_type_arguments(
    provider: &dyn DeclarationProvider,
    target: &Arc<TypeDeclaration>,
    sub_type: &Type,
) -> Result<Option<Vec<Type>>, TypeError> {
    let Type::Declared(derived) = sub_type else {
        return Ok(None);
    };

    let Some(path) = shortest_path_to_supertype(provider, target, derived) else {
        return Ok(None);
    };

    // Nothing to resolve for a non-generic target. This must stay behind the
    // reachability check so that unrelated types still report "no projection".
    if target.type_parameters().is_empty() {
        return Ok(Some(Vec::new()));
    }

    let mut path = path.into_iter();
    let mut current = path.next().expect("an inheritance path is never empty");
    for next in path {
        let declaration = current.declaration().clone();

        // A raw type here means the original sub type was raw, or an earlier
        // step derived from a raw type. Its supertypes are those of the
        // prototypical type.
        if current.type_arguments().is_empty() && !declaration.type_parameters().is_empty() {
            current = declaration.prototype().clone();
        }

        let map: SubstitutionMap = declaration
            .type_parameters()
            .iter()
            .cloned()
            .zip(current.type_arguments().iter().cloned())
            .collect();
        let substituted = substitute(&Type::Declared(next), &map)?;
        let Type::Declared(declared) = substituted else {
            unreachable!("substitution preserves the declared form");
        };
        current = declared;
    }

    Ok(Some(current.type_arguments().to_vec()))
}

/// The direct supertypes of a type declaration (JLS §4.10.2): the superclass
/// (when present) followed by the superinterfaces, in declaration order. An
/// interface without explicit superinterfaces has `Object` as its sole direct
/// supertype.
fn direct_supertypes(
    provider: &dyn DeclarationProvider,
    declaration: &Arc<TypeDeclaration>,
) -> Vec<DeclaredType> {
    let interfaces = declaration.interfaces();
    let mut supertypes = Vec::with_capacity(1 + interfaces.len());
    if let Type::Declared(superclass) = declaration.superclass() {
        supertypes.push(superclass.clone());
    }
    for interface in interfaces {
        if let Type::Declared(declared) = interface {
            supertypes.push(declared.clone());
        }
    }
    if declaration.kind().is_interface() && interfaces.is_empty() {
        supertypes.push(provider.well_known().object_declared().clone());
    }
    supertypes
}

struct VertexState {
    distance: usize,
    visited: bool,
    /// The type as it appears in the predecessor declaration's supertype list.
    declared_type: DeclaredType,
    previous: Option<Name>,
}

/// The shortest inheritance path from `derived` to `base`, starting with
/// `derived` itself, or `None` if `base` is not reachable.
///
/// Runs a Dijkstra search over the declaration graph keyed by declaration
/// equality. All edges have weight one, so a vertex's recorded supertype form
/// and predecessor never change after discovery; ties between equally short
/// paths are broken by the declaration order of direct supertypes, which makes
/// the result deterministic.
fn shortest_path_to_supertype(
    provider: &dyn DeclarationProvider,
    base: &Arc<TypeDeclaration>,
    derived: &DeclaredType,
) -> Option<Vec<DeclaredType>> {
    let mut states: HashMap<Name, VertexState> = HashMap::new();
    let mut boundary: Vec<Name> = Vec::new();

    let start = derived.declaration().qualified_name().clone();
    states.insert(
        start.clone(),
        VertexState {
            distance: 0,
            visited: false,
            declared_type: derived.clone(),
            previous: None,
        },
    );
    boundary.push(start);

    // Invariants: the boundary holds only unvisited vertices, and the shortest
    // path to every visited vertex is known.
    while !boundary.is_empty() {
        let mut shortest_index = 0;
        for index in 1..boundary.len() {
            if states[&boundary[index]].distance < states[&boundary[shortest_index]].distance {
                shortest_index = index;
            }
        }
        let shortest_key = boundary[shortest_index].clone();

        // Distances are non-decreasing across iterations, so the first match
        // is the shortest path.
        if states[&shortest_key].declared_type.declaration().as_ref() == base.as_ref() {
            return Some(reconstruct_path(&states, &shortest_key, derived));
        }

        // Plain remove keeps insertion order, which is the tie-breaker.
        boundary.remove(shortest_index);
        let state = states.get_mut(&shortest_key).expect("vertex was inserted");
        state.visited = true;
        let shortest_distance = state.distance;
        let shortest_declaration = state.declared_type.declaration().clone();

        for supertype in direct_supertypes(provider, &shortest_declaration) {
            let key = supertype.declaration().qualified_name().clone();
            let entry = states.entry(key.clone()).or_insert_with(|| VertexState {
                distance: usize::MAX,
                visited: false,
                declared_type: supertype,
                previous: None,
            });
            let alternative = shortest_distance + 1;
            if !entry.visited && alternative < entry.distance {
                entry.distance = alternative;
                entry.previous = Some(shortest_key.clone());
                if !boundary.contains(&key) {
                    boundary.push(key);
                }
            }
        }
    }
    None
}

fn reconstruct_path(
    states: &HashMap<Name, VertexState>,
    target: &Name,
    derived: &DeclaredType,
) -> Vec<DeclaredType> {
    let mut path = Vec::new();
    let mut current = &states[target];
    while let Some(previous) = &current.previous {
        path.push(current.declared_type.clone());
        current = &states[previous];
    }
    path.push(derived.clone());
    path.reverse();
    path
}
