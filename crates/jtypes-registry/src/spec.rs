//! Declarative class descriptions.
//!
//! A [`ClassSpec`] describes one class or interface declaration the way its
//! source header would: name, kind, formal type parameters with bounds, a
//! superclass, superinterfaces, and an optional enclosing declaration. Specs
//! are plain serializable data; a universe of them can be embedded in code via
//! the builder methods or loaded from JSON.
//!
//! Type references inside a spec use [`TypeRef`], which is resolved against
//! the registry when the declaration graph is materialized. A
//! [`TypeRef::Variable`] resolves against the formal parameters of the
//! declaring class and its enclosing classes, in that order.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use jtypes::{DeclarationKind, PrimitiveKind};

/// An unresolved reference to a type, as it would appear in a source-level
/// extends clause, bound, or type argument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TypeRef {
    /// A class or interface by qualified name, optionally parameterized.
    Named {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<TypeRef>,
    },
    /// A type parameter of the declaring class or an enclosing class.
    Variable(String),
    Array(Box<TypeRef>),
    /// A wildcard type argument with at most one bound.
    Wildcard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        extends: Option<Box<TypeRef>>,
        #[serde(default, rename = "super", skip_serializing_if = "Option::is_none")]
        super_bound: Option<Box<TypeRef>>,
    },
    /// A primitive type; valid only below an array reference.
    Primitive(PrimitiveKind),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> TypeRef {
        TypeRef::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn parameterized(name: impl Into<String>, args: Vec<TypeRef>) -> TypeRef {
        TypeRef::Named {
            name: name.into(),
            args,
        }
    }

    pub fn variable(name: impl Into<String>) -> TypeRef {
        TypeRef::Variable(name.into())
    }

    pub fn array(component: TypeRef) -> TypeRef {
        TypeRef::Array(Box::new(component))
    }

    /// The unbounded wildcard `?`.
    pub fn wildcard() -> TypeRef {
        TypeRef::Wildcard {
            extends: None,
            super_bound: None,
        }
    }

    /// `? extends bound`
    pub fn extends_wildcard(bound: TypeRef) -> TypeRef {
        TypeRef::Wildcard {
            extends: Some(Box::new(bound)),
            super_bound: None,
        }
    }

    /// `? super bound`
    pub fn super_wildcard(bound: TypeRef) -> TypeRef {
        TypeRef::Wildcard {
            extends: None,
            super_bound: Some(Box::new(bound)),
        }
    }

    pub fn primitive(kind: PrimitiveKind) -> TypeRef {
        TypeRef::Primitive(kind)
    }
}

/// A formal type parameter with its declared bounds. An empty bound list
/// stands for the implicit `extends Object`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TypeParameterSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<TypeRef>,
}

impl TypeParameterSpec {
    pub fn new(name: impl Into<String>) -> TypeParameterSpec {
        TypeParameterSpec {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    pub fn with_bound(mut self, bound: TypeRef) -> TypeParameterSpec {
        self.bounds.push(bound);
        self
    }
}

/// A class or interface declaration to be registered with a
/// [`crate::DeclarationRegistry`].
///
/// A class without an explicit superclass gets `java.lang.Object`; interfaces
/// and `Object` itself have none. Nested declarations name their enclosing
/// declaration by qualified name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClassSpec {
    pub name: String,
    pub kind: DeclarationKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameterSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<TypeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosing: Option<String>,
}

impl ClassSpec {
    fn new(kind: DeclarationKind, name: impl Into<String>) -> ClassSpec {
        ClassSpec {
            name: name.into(),
            kind,
            type_parameters: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            enclosing: None,
        }
    }

    pub fn class(name: impl Into<String>) -> ClassSpec {
        ClassSpec::new(DeclarationKind::Class, name)
    }

    pub fn interface(name: impl Into<String>) -> ClassSpec {
        ClassSpec::new(DeclarationKind::Interface, name)
    }

    pub fn enum_class(name: impl Into<String>) -> ClassSpec {
        ClassSpec::new(DeclarationKind::Enum, name)
    }

    pub fn annotation(name: impl Into<String>) -> ClassSpec {
        ClassSpec::new(DeclarationKind::Annotation, name)
    }

    pub fn with_type_parameter(mut self, parameter: TypeParameterSpec) -> ClassSpec {
        self.type_parameters.push(parameter);
        self
    }

    pub fn with_superclass(mut self, superclass: TypeRef) -> ClassSpec {
        self.superclass = Some(superclass);
        self
    }

    pub fn with_interface(mut self, interface: TypeRef) -> ClassSpec {
        self.interfaces.push(interface);
        self
    }

    pub fn nested_in(mut self, enclosing: impl Into<String>) -> ClassSpec {
        self.enclosing = Some(enclosing.into());
        self
    }
}
