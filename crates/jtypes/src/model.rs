//! The `Type` tagged union and its variant payloads.
//!
//! Types are immutable values with structural equality and a stable hash. The
//! single exception to "immutable on construction" is [`TypeVariable`], which
//! is built in two phases so that capture conversion can create variables
//! whose bounds refer back to the variable itself (see JLS §5.1.10). A type
//! variable is *frozen* once its bounds have been set; equality and hashing
//! are only defined on frozen variables.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::element::{Element, TypeDeclaration, TypeParameter};
use crate::error::TypeError;

/// The eight Java primitive type kinds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    /// All primitive kinds, in the order used by the boxed-class table.
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Char,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    /// The Java source keyword for this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    pub(crate) fn table_index(self) -> usize {
        self as usize
    }
}

/// A Java type.
///
/// `Void` and `None` are pseudo-types: `Void` models the return type of a
/// method, `None` the absence of a superclass or enclosing type. `Null` is the
/// type of the `null` expression, a subtype of every reference type.
/// `Wildcard` is a type *argument* rather than a first-class type; it never
/// compares the same as any type, including itself.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Primitive(PrimitiveKind),
    Void,
    None,
    Null,
    Array(Box<Type>),
    Declared(DeclaredType),
    Variable(TypeVariable),
    Wildcard(WildcardBound),
    Intersection(IntersectionType),
}

impl Type {
    pub fn primitive(kind: PrimitiveKind) -> Type {
        Type::Primitive(kind)
    }

    pub fn array(component: Type) -> Type {
        Type::Array(Box::new(component))
    }

    /// A declared type with no enclosing type.
    ///
    /// `arguments` must either be empty (a raw or non-generic type) or match
    /// the declaration's formal parameter count.
    pub fn declared(
        declaration: &Arc<TypeDeclaration>,
        arguments: Vec<Type>,
    ) -> Result<Type, TypeError> {
        Type::declared_in(Type::None, declaration, arguments)
    }

    /// A declared type with an explicit enclosing type (`Declared` or `None`).
    pub fn declared_in(
        enclosing: Type,
        declaration: &Arc<TypeDeclaration>,
        arguments: Vec<Type>,
    ) -> Result<Type, TypeError> {
        if !matches!(enclosing, Type::None | Type::Declared(_)) {
            return Err(TypeError::InvalidArgument(format!(
                "enclosing type must be a declared type or none, got {enclosing}"
            )));
        }
        let formal_count = declaration.type_parameters().len();
        if !arguments.is_empty() && arguments.len() != formal_count {
            return Err(TypeError::InvalidArgument(format!(
                "{} declares {formal_count} type parameter(s), got {} argument(s)",
                declaration.qualified_name(),
                arguments.len()
            )));
        }
        Ok(Type::Declared(DeclaredType {
            enclosing: Box::new(enclosing),
            declaration: Arc::clone(declaration),
            arguments,
        }))
    }

    /// A wildcard type argument. At most one bound may be present; passing
    /// neither yields the unbounded wildcard `?`.
    pub fn wildcard(
        extends_bound: Option<Type>,
        super_bound: Option<Type>,
    ) -> Result<Type, TypeError> {
        Ok(Type::Wildcard(WildcardBound::new(extends_bound, super_bound)?))
    }

    /// An intersection type `T_1 & … & T_n`. At least one bound is required.
    pub fn intersection(bounds: Vec<Type>) -> Result<Type, TypeError> {
        if bounds.is_empty() {
            return Err(TypeError::InvalidArgument(
                "an intersection type needs at least one bound".to_string(),
            ));
        }
        Ok(Type::Intersection(IntersectionType { bounds }))
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Type::Wildcard(_))
    }

    pub fn as_declared(&self) -> Option<&DeclaredType> {
        match self {
            Type::Declared(declared) => Some(declared),
            _ => None,
        }
    }

    /// The element this type refers to: the declaration of a declared type or
    /// the formal parameter of a type variable. `None` for every other form.
    pub fn as_element(&self) -> Option<Element> {
        match self {
            Type::Declared(declared) => Some(Element::Declaration(declared.declaration.clone())),
            Type::Variable(variable) => Some(Element::TypeParameter(variable.parameter().clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::format::fmt_type(self, f)
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<DeclaredType> for Type {
    fn from(declared: DeclaredType) -> Self {
        Type::Declared(declared)
    }
}

/// A class or interface type: a [`TypeDeclaration`] invocation with zero or
/// more actual type arguments and an optional enclosing declared type.
///
/// Zero arguments on a generic declaration form a *raw* type.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DeclaredType {
    enclosing: Box<Type>,
    declaration: Arc<TypeDeclaration>,
    arguments: Vec<Type>,
}

impl DeclaredType {
    pub(crate) fn new(
        enclosing: Type,
        declaration: Arc<TypeDeclaration>,
        arguments: Vec<Type>,
    ) -> DeclaredType {
        DeclaredType {
            enclosing: Box::new(enclosing),
            declaration,
            arguments,
        }
    }

    /// The enclosing type: `Type::Declared` or `Type::None`.
    pub fn enclosing_type(&self) -> &Type {
        &self.enclosing
    }

    pub fn declaration(&self) -> &Arc<TypeDeclaration> {
        &self.declaration
    }

    pub fn type_arguments(&self) -> &[Type] {
        &self.arguments
    }

    /// Whether this is a raw type: no arguments on a generic declaration.
    pub fn is_raw(&self) -> bool {
        self.arguments.is_empty() && !self.declaration.type_parameters().is_empty()
    }
}

impl fmt::Debug for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::format::fmt_declared(self, f)
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::format::fmt_declared(self, f)
    }
}

/// The bound of a wildcard type argument: `?`, `? extends T`, or `? super T`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Unbounded,
    Extends(Box<Type>),
    Super(Box<Type>),
}

impl WildcardBound {
    pub fn new(
        extends_bound: Option<Type>,
        super_bound: Option<Type>,
    ) -> Result<WildcardBound, TypeError> {
        match (extends_bound, super_bound) {
            (None, None) => Ok(WildcardBound::Unbounded),
            (Some(upper), None) => Ok(WildcardBound::Extends(Box::new(upper))),
            (None, Some(lower)) => Ok(WildcardBound::Super(Box::new(lower))),
            (Some(_), Some(_)) => Err(TypeError::InvalidArgument(
                "a wildcard may have an extends bound or a super bound, not both".to_string(),
            )),
        }
    }

    pub fn extends_bound(&self) -> Option<&Type> {
        match self {
            WildcardBound::Extends(bound) => Some(bound),
            _ => None,
        }
    }

    pub fn super_bound(&self) -> Option<&Type> {
        match self {
            WildcardBound::Super(bound) => Some(bound),
            _ => None,
        }
    }
}

impl fmt::Debug for WildcardBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::format::fmt_wildcard(self, f)
    }
}

/// An intersection type `T_1 & … & T_n` with at least one bound.
///
/// Intersections appear as type-variable upper bounds (multiple declared
/// bounds) and as the glb computed by capture conversion.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IntersectionType {
    bounds: Vec<Type>,
}

impl IntersectionType {
    pub fn bounds(&self) -> &[Type] {
        &self.bounds
    }
}

impl fmt::Debug for IntersectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::format::fmt_intersection(self, f)
    }
}

struct VariableBounds {
    upper: Type,
    lower: Type,
}

struct TypeVariableInner {
    parameter: Arc<TypeParameter>,
    captured_argument: Option<WildcardBound>,
    bounds: OnceLock<VariableBounds>,
}

/// The type of a formal [`TypeParameter`], or a fresh variable introduced by
/// substitution or capture conversion.
///
/// A variable is constructed in two phases: [`TypeVariable::new_unfinished`]
/// fixes the parameter and the captured wildcard argument (if any), and
/// [`TypeVariable::set_bounds`] freezes the upper and lower bound exactly
/// once. Reading a bound before the freeze is a [`TypeError::IllegalState`].
/// Clones share the underlying variable.
///
/// Two frozen variables compare equal when they share the underlying variable,
/// or when their parameters, captured arguments, and bounds all compare equal.
/// The shared-variable shortcut is what keeps equality well-founded for
/// variables with recursive bounds, such as the capture of `Enum<?>`.
#[derive(Clone)]
pub struct TypeVariable {
    inner: Arc<TypeVariableInner>,
}

impl TypeVariable {
    /// Creates a new unfinished variable for `parameter`.
    ///
    /// The result does not satisfy the `TypeVariable` contract until
    /// [`set_bounds`](Self::set_bounds) has been called.
    pub fn new_unfinished(
        parameter: Arc<TypeParameter>,
        captured_argument: Option<WildcardBound>,
    ) -> TypeVariable {
        TypeVariable {
            inner: Arc::new(TypeVariableInner {
                parameter,
                captured_argument,
                bounds: OnceLock::new(),
            }),
        }
    }

    /// Creates a frozen variable in one step.
    ///
    /// Not suited for bounds that must refer to the new variable itself; for
    /// those, create an unfinished variable whose bounds reference the
    /// parameter's prototypical variable and route them through
    /// [`crate::substitute`], which re-links the references.
    pub fn with_bounds(
        parameter: Arc<TypeParameter>,
        upper_bound: Type,
        lower_bound: Type,
        captured_argument: Option<WildcardBound>,
    ) -> TypeVariable {
        let variable = TypeVariable::new_unfinished(parameter, captured_argument);
        variable
            .set_bounds(upper_bound, lower_bound)
            .expect("a variable created here cannot already be frozen");
        variable
    }

    pub fn parameter(&self) -> &Arc<TypeParameter> {
        &self.inner.parameter
    }

    /// The wildcard argument this variable captured, if it was produced by
    /// capture conversion.
    pub fn captured_argument(&self) -> Option<&WildcardBound> {
        self.inner.captured_argument.as_ref()
    }

    pub fn is_frozen(&self) -> bool {
        self.inner.bounds.get().is_some()
    }

    /// Sets the bounds, freezing the variable. Fails if already frozen.
    pub fn set_bounds(&self, upper_bound: Type, lower_bound: Type) -> Result<(), TypeError> {
        self.inner
            .bounds
            .set(VariableBounds {
                upper: upper_bound,
                lower: lower_bound,
            })
            .map_err(|_| {
                TypeError::IllegalState(format!(
                    "bounds of type variable {} were already set",
                    self.inner.parameter.name()
                ))
            })
    }

    pub fn upper_bound(&self) -> Result<&Type, TypeError> {
        self.bounds().map(|bounds| &bounds.upper)
    }

    pub fn lower_bound(&self) -> Result<&Type, TypeError> {
        self.bounds().map(|bounds| &bounds.lower)
    }

    fn bounds(&self) -> Result<&VariableBounds, TypeError> {
        self.inner.bounds.get().ok_or_else(|| {
            TypeError::IllegalState(format!(
                "type variable {} used before its bounds were set",
                self.inner.parameter.name()
            ))
        })
    }

    fn frozen_bounds(&self) -> &VariableBounds {
        self.inner
            .bounds
            .get()
            .expect("type variable used before its bounds were set")
    }

    pub(crate) fn shares_variable_with(&self, other: &TypeVariable) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for TypeVariable {
    fn eq(&self, other: &Self) -> bool {
        if self.shares_variable_with(other) {
            return true;
        }
        let own = self.frozen_bounds();
        let theirs = other.frozen_bounds();
        self.inner.parameter == other.inner.parameter
            && self.inner.captured_argument == other.inner.captured_argument
            && own.upper == theirs.upper
            && own.lower == theirs.lower
    }
}

impl Eq for TypeVariable {}

impl Hash for TypeVariable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Bounds may be cyclic after capture conversion, so only the stable
        // parts participate. Equal variables still hash equal.
        let _ = self.frozen_bounds();
        self.inner.parameter.hash(state);
        self.inner.captured_argument.hash(state);
    }
}

impl fmt::Debug for TypeVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::format::fmt_type_variable(self, f)
    }
}

impl fmt::Display for TypeVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::format::fmt_type_variable(self, f)
    }
}
