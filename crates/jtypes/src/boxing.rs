//! Boxing and unboxing over the fixed eight-entry table.

use std::sync::Arc;

use crate::element::TypeDeclaration;
use crate::error::TypeError;
use crate::model::{PrimitiveKind, Type};
use crate::provider::DeclarationProvider;

/// The boxed class declaration for a primitive kind (JLS §5.1.7).
pub fn boxed_declaration(
    provider: &dyn DeclarationProvider,
    kind: PrimitiveKind,
) -> Arc<TypeDeclaration> {
    provider.well_known().boxed_declaration(kind).clone()
}

/// The primitive kind a boxed declared type unboxes to (JLS §5.1.8).
///
/// Defined only for the canonical declared types of the eight boxed classes;
/// anything else is an [`TypeError::InvalidArgument`].
pub fn unboxed_type(
    provider: &dyn DeclarationProvider,
    ty: &Type,
) -> Result<PrimitiveKind, TypeError> {
    let Type::Declared(declared) = ty else {
        return Err(TypeError::InvalidArgument(format!(
            "expected a declared type, got {ty}"
        )));
    };
    provider
        .well_known()
        .unboxed_kind(declared.declaration())
        .ok_or_else(|| TypeError::InvalidArgument(format!("expected a boxed type, got {ty}")))
}
