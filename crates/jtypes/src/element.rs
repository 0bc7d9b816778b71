//! Element objects referenced by the type model: type declarations and their
//! formal type parameters.
//!
//! A [`TypeDeclaration`] is built in two phases, mirroring how a declaration
//! graph with cycles (`Enum<E extends Enum<E>>`, mutually recursive bounds,
//! nesting) must be materialized: [`TypeDeclaration::new`] fixes the name,
//! kind, and formal parameter *names*, so that bound expressions can already
//! reference the parameters' prototypical variables; [`TypeDeclaration::finish`]
//! then supplies the resolved superclass, superinterfaces, enclosing
//! declaration, and parameter bounds, and freezes the prototypical variables.
//! Providers must finish every declaration before handing it out; the
//! accessors treat a read of an unfinished declaration as a programmer error
//! and panic.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock, Weak};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::model::{DeclaredType, Type, TypeVariable};
use crate::name::Name;

/// The kind of a type declaration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

impl DeclarationKind {
    /// Whether declarations of this kind are interfaces (JLS treats annotation
    /// types as interfaces).
    pub fn is_interface(self) -> bool {
        matches!(self, DeclarationKind::Interface | DeclarationKind::Annotation)
    }
}

/// An element a type can refer to.
#[derive(Clone, Debug)]
pub enum Element {
    Declaration(Arc<TypeDeclaration>),
    TypeParameter(Arc<TypeParameter>),
}

struct DeclarationDetails {
    superclass: Type,
    interfaces: Vec<Type>,
    enclosing: Option<Weak<TypeDeclaration>>,
}

/// A class or interface declaration.
///
/// Equality is decided by the qualified name alone: the provider is expected
/// to intern declarations so that one name maps to one declaration.
pub struct TypeDeclaration {
    qualified_name: Name,
    simple_name: Name,
    kind: DeclarationKind,
    this: OnceLock<Weak<TypeDeclaration>>,
    type_parameters: OnceLock<Vec<Arc<TypeParameter>>>,
    details: OnceLock<DeclarationDetails>,
    prototype: OnceLock<DeclaredType>,
}

impl TypeDeclaration {
    /// Creates an unfinished declaration with the given formal parameter
    /// names. The simple name is the last `.`-separated segment of
    /// `qualified_name`.
    pub fn new(
        kind: DeclarationKind,
        qualified_name: impl Into<Name>,
        parameter_names: &[&str],
    ) -> Arc<TypeDeclaration> {
        let qualified_name = qualified_name.into();
        let simple_name = Name::new(qualified_name.last_segment());
        let declaration = Arc::new(TypeDeclaration {
            qualified_name,
            simple_name,
            kind,
            this: OnceLock::new(),
            type_parameters: OnceLock::new(),
            details: OnceLock::new(),
            prototype: OnceLock::new(),
        });
        let set = declaration.this.set(Arc::downgrade(&declaration));
        debug_assert!(set.is_ok());
        let parameters = parameter_names
            .iter()
            .enumerate()
            .map(|(index, name)| TypeParameter::create(name, index, &declaration))
            .collect();
        let set = declaration.type_parameters.set(parameters);
        debug_assert!(set.is_ok());
        declaration
    }

    /// Supplies the resolved parts of the declaration and freezes its formal
    /// parameters' prototypical variables.
    ///
    /// `superclass` must be a declared type or `Type::None`; every interface
    /// must be a declared type; `parameter_bounds` must hold one non-empty
    /// bound list per formal parameter. Fails with
    /// [`TypeError::IllegalState`] when called twice.
    pub fn finish(
        &self,
        superclass: Type,
        interfaces: Vec<Type>,
        enclosing: Option<&Arc<TypeDeclaration>>,
        parameter_bounds: Vec<Vec<Type>>,
    ) -> Result<(), TypeError> {
        if self.details.get().is_some() {
            return Err(TypeError::IllegalState(format!(
                "declaration {} was already finished",
                self.qualified_name
            )));
        }
        if !matches!(superclass, Type::None | Type::Declared(_)) {
            return Err(TypeError::InvalidArgument(format!(
                "superclass of {} must be a declared type or none, got {superclass}",
                self.qualified_name
            )));
        }
        for interface in &interfaces {
            if !matches!(interface, Type::Declared(_)) {
                return Err(TypeError::InvalidArgument(format!(
                    "superinterface of {} must be a declared type, got {interface}",
                    self.qualified_name
                )));
            }
        }
        let parameters = self.type_parameters();
        if parameter_bounds.len() != parameters.len() {
            return Err(TypeError::InvalidArgument(format!(
                "{} declares {} type parameter(s), got {} bound list(s)",
                self.qualified_name,
                parameters.len(),
                parameter_bounds.len()
            )));
        }
        for (parameter, bounds) in parameters.iter().zip(parameter_bounds) {
            parameter.finish(bounds)?;
        }
        let set = self.details.set(DeclarationDetails {
            superclass,
            interfaces,
            enclosing: enclosing.map(Arc::downgrade),
        });
        debug_assert!(set.is_ok());
        Ok(())
    }

    pub fn qualified_name(&self) -> &Name {
        &self.qualified_name
    }

    pub fn simple_name(&self) -> &Name {
        &self.simple_name
    }

    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    /// The ordered formal type parameters (empty for non-generic types).
    pub fn type_parameters(&self) -> &[Arc<TypeParameter>] {
        self.type_parameters
            .get()
            .expect("type parameters are set on construction")
    }

    /// The superclass: a declared type, or `Type::None` for `Object` and
    /// interfaces.
    pub fn superclass(&self) -> &Type {
        &self.details().superclass
    }

    pub fn interfaces(&self) -> &[Type] {
        &self.details().interfaces
    }

    /// The declaration this one is nested in, if any.
    pub fn enclosing_declaration(&self) -> Option<Arc<TypeDeclaration>> {
        self.details()
            .enclosing
            .as_ref()
            .map(|weak| weak.upgrade().expect("enclosing declaration was dropped"))
    }

    /// The prototypical type: this declaration's invocation on its own formal
    /// parameters' type variables, nested in the enclosing declaration's
    /// prototypical type. Built lazily under a write-once discipline.
    pub fn prototype(&self) -> &DeclaredType {
        self.prototype.get_or_init(|| {
            let enclosing = match self.enclosing_declaration() {
                Some(outer) => Type::Declared(outer.prototype().clone()),
                None => Type::None,
            };
            let arguments = self
                .type_parameters()
                .iter()
                .map(|parameter| Type::Variable(parameter.prototype().clone()))
                .collect();
            let this = self
                .this
                .get()
                .and_then(Weak::upgrade)
                .expect("declaration is still referenced");
            DeclaredType::new(enclosing, this, arguments)
        })
    }

    /// The prototypical type as a [`Type`].
    pub fn as_type(&self) -> Type {
        Type::Declared(self.prototype().clone())
    }

    pub fn is_finished(&self) -> bool {
        self.details.get().is_some()
    }

    fn details(&self) -> &DeclarationDetails {
        self.details
            .get()
            .unwrap_or_else(|| panic!("declaration {} used before being finished", self.qualified_name))
    }
}

impl PartialEq for TypeDeclaration {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name == other.qualified_name
    }
}

impl Eq for TypeDeclaration {}

impl Hash for TypeDeclaration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified_name.hash(state);
    }
}

impl fmt::Debug for TypeDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            DeclarationKind::Class | DeclarationKind::Enum => "class",
            DeclarationKind::Interface | DeclarationKind::Annotation => "interface",
        };
        write!(f, "{kind} {}", self.qualified_name)
    }
}

/// A formal type parameter of a [`TypeDeclaration`].
///
/// Two parameters are equal when they sit at the same position of the same
/// declaration. The parameter owns its *prototypical* type variable, which is
/// frozen during [`TypeDeclaration::finish`] with the declared bounds (a
/// single bound verbatim, multiple bounds wrapped in an intersection) and the
/// null type as lower bound.
pub struct TypeParameter {
    name: Name,
    index: usize,
    declaring_name: Name,
    declaring: Weak<TypeDeclaration>,
    bounds: OnceLock<Vec<Type>>,
    prototype: OnceLock<TypeVariable>,
}

impl TypeParameter {
    fn create(name: &str, index: usize, declaring: &Arc<TypeDeclaration>) -> Arc<TypeParameter> {
        let parameter = Arc::new(TypeParameter {
            name: Name::new(name),
            index,
            declaring_name: declaring.qualified_name().clone(),
            declaring: Arc::downgrade(declaring),
            bounds: OnceLock::new(),
            prototype: OnceLock::new(),
        });
        let prototype = TypeVariable::new_unfinished(parameter.clone(), None);
        let set = parameter.prototype.set(prototype);
        debug_assert!(set.is_ok());
        parameter
    }

    fn finish(&self, bounds: Vec<Type>) -> Result<(), TypeError> {
        if bounds.is_empty() {
            return Err(TypeError::InvalidArgument(format!(
                "type parameter {} of {} needs at least one bound",
                self.name, self.declaring_name
            )));
        }
        let upper = if bounds.len() == 1 {
            bounds[0].clone()
        } else {
            Type::intersection(bounds.clone())?
        };
        self.bounds.set(bounds).map_err(|_| {
            TypeError::IllegalState(format!(
                "type parameter {} of {} was already finished",
                self.name, self.declaring_name
            ))
        })?;
        self.prototype().set_bounds(upper, Type::Null)
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Position within the declaring declaration's parameter list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The declared bounds (at least one once finished).
    pub fn bounds(&self) -> &[Type] {
        self.bounds.get().unwrap_or_else(|| {
            panic!(
                "type parameter {} of {} used before being finished",
                self.name, self.declaring_name
            )
        })
    }

    /// The declaration this parameter belongs to.
    pub fn declaring_declaration(&self) -> Arc<TypeDeclaration> {
        self.declaring
            .upgrade()
            .expect("declaring declaration was dropped")
    }

    /// The prototypical type variable of this parameter. Unfrozen until the
    /// declaring declaration is finished.
    pub fn prototype(&self) -> &TypeVariable {
        self.prototype
            .get()
            .expect("prototype variable is set on construction")
    }

    /// The prototypical variable as a [`Type`].
    pub fn as_type(&self) -> Type {
        Type::Variable(self.prototype().clone())
    }
}

impl PartialEq for TypeParameter {
    fn eq(&self, other: &Self) -> bool {
        self.declaring_name == other.declaring_name && self.index == other.index
    }
}

impl Eq for TypeParameter {}

impl Hash for TypeParameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.declaring_name.hash(state);
        self.index.hash(state);
    }
}

impl fmt::Debug for TypeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.declaring_name, self.name)
    }
}
