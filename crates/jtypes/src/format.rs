//! Canonical textual form of types.
//!
//! The rendering is deterministic and matches Java source syntax: qualified
//! names for top-level declared types, `Outer<A>.Inner<B>` for nested types
//! with a declared enclosing type, `?`/`? extends T`/`? super T` for
//! wildcards, `T_1 & T_2` for intersections, and `capture<…>` for type
//! variables introduced by capture conversion.

use std::fmt::{self, Write as _};

use crate::model::{DeclaredType, IntersectionType, Type, TypeVariable, WildcardBound};

/// Formats a [`Type`] into a newly allocated [`String`].
///
/// Equivalent to `ty.to_string()`; provided for call sites that read better
/// with a function.
pub fn format_type(ty: &Type) -> String {
    ty.to_string()
}

pub(crate) fn fmt_type(ty: &Type, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match ty {
        Type::Primitive(kind) => f.write_str(kind.keyword()),
        Type::Void => f.write_str("void"),
        Type::None => f.write_str("none"),
        Type::Null => f.write_str("null"),
        Type::Array(component) => {
            fmt_type(component, f)?;
            f.write_str("[]")
        }
        Type::Declared(declared) => fmt_declared(declared, f),
        Type::Variable(variable) => fmt_type_variable(variable, f),
        Type::Wildcard(bound) => fmt_wildcard(bound, f),
        Type::Intersection(intersection) => fmt_intersection(intersection, f),
    }
}

pub(crate) fn fmt_declared(declared: &DeclaredType, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Type::Declared(enclosing) = declared.enclosing_type() {
        fmt_declared(enclosing, f)?;
        f.write_char('.')?;
        f.write_str(declared.declaration().simple_name().as_str())?;
    } else {
        f.write_str(declared.declaration().qualified_name().as_str())?;
    }

    let arguments = declared.type_arguments();
    if !arguments.is_empty() {
        f.write_char('<')?;
        fmt_list(arguments, ", ", f)?;
        f.write_char('>')?;
    }
    Ok(())
}

pub(crate) fn fmt_type_variable(variable: &TypeVariable, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(captured) = variable.captured_argument() {
        f.write_str("capture<")?;
        fmt_wildcard(captured, f)?;
        f.write_char('>')
    } else {
        f.write_str(variable.parameter().name().as_str())
    }
}

pub(crate) fn fmt_wildcard(bound: &WildcardBound, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_char('?')?;
    if let Some(upper) = bound.extends_bound() {
        f.write_str(" extends ")?;
        fmt_type(upper, f)?;
    }
    if let Some(lower) = bound.super_bound() {
        f.write_str(" super ")?;
        fmt_type(lower, f)?;
    }
    Ok(())
}

pub(crate) fn fmt_intersection(
    intersection: &IntersectionType,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    fmt_list(intersection.bounds(), " & ", f)
}

fn fmt_list(types: &[Type], separator: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (index, ty) in types.iter().enumerate() {
        if index != 0 {
            f.write_str(separator)?;
        }
        fmt_type(ty, f)?;
    }
    Ok(())
}
