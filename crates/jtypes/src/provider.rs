//! The collaborator that supplies type declarations.

use std::sync::Arc;

use crate::element::TypeDeclaration;
use crate::model::{DeclaredType, PrimitiveKind, Type};

/// Source of [`TypeDeclaration`]s consumed by the type algebra.
///
/// Implementations must uphold two guarantees:
///
/// - Every declaration handed out is fully finished, together with the whole
///   declaration graph reachable from it. Nothing is late-bound after a
///   declaration becomes observable.
/// - Declarations are interned by their underlying key: requesting the same
///   qualified name twice yields declarations that compare equal.
pub trait DeclarationProvider {
    /// The declaration for a qualified name, or `None` if the provider does
    /// not know the name.
    fn declaration(&self, qualified_name: &str) -> Option<Arc<TypeDeclaration>>;

    /// The declarations with JLS-mandated roles.
    fn well_known(&self) -> &WellKnownTypes;
}

/// The declarations the algorithms need by name: `Object` (default bound,
/// top of the reference lattice), `Cloneable` and `Serializable` (array
/// supertypes), and the eight boxed classes.
pub struct WellKnownTypes {
    object: Arc<TypeDeclaration>,
    cloneable: Arc<TypeDeclaration>,
    serializable: Arc<TypeDeclaration>,
    boxed: [Arc<TypeDeclaration>; 8],
}

impl WellKnownTypes {
    /// `boxed` holds the boxed class per primitive kind, in
    /// [`PrimitiveKind::ALL`] order.
    pub fn new(
        object: Arc<TypeDeclaration>,
        cloneable: Arc<TypeDeclaration>,
        serializable: Arc<TypeDeclaration>,
        boxed: [Arc<TypeDeclaration>; 8],
    ) -> WellKnownTypes {
        WellKnownTypes {
            object,
            cloneable,
            serializable,
            boxed,
        }
    }

    pub fn object(&self) -> &Arc<TypeDeclaration> {
        &self.object
    }

    pub fn cloneable(&self) -> &Arc<TypeDeclaration> {
        &self.cloneable
    }

    pub fn serializable(&self) -> &Arc<TypeDeclaration> {
        &self.serializable
    }

    /// `java.lang.Object` as a type.
    pub fn object_type(&self) -> Type {
        self.object.as_type()
    }

    pub(crate) fn object_declared(&self) -> &DeclaredType {
        self.object.prototype()
    }

    /// The boxed class declaration for a primitive kind.
    pub fn boxed_declaration(&self, kind: PrimitiveKind) -> &Arc<TypeDeclaration> {
        &self.boxed[kind.table_index()]
    }

    /// The primitive kind a declaration unboxes to, if it is one of the eight
    /// boxed classes.
    pub fn unboxed_kind(&self, declaration: &TypeDeclaration) -> Option<PrimitiveKind> {
        PrimitiveKind::ALL
            .into_iter()
            .find(|kind| self.boxed[kind.table_index()].as_ref() == declaration)
    }
}
