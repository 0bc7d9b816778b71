//! Declaration registry backing the `jtypes` type algebra.
//!
//! The registry is the bridge between declarative class descriptions
//! ([`ClassSpec`]) and the fully linked [`TypeDeclaration`] graph the core
//! algorithms consume. It plays the role a reflection or classfile loader
//! would play in a full toolchain, and implements
//! [`jtypes::DeclarationProvider`].
//!
//! Declarations are materialized lazily, one *session* per top-level request:
//! every declaration reachable from the request is created unfinished, queued,
//! and finished (superclass, interfaces, bounds, enclosing declaration) before
//! the whole batch is committed to the interning cache. Within a session the
//! same name always yields the same declaration, so recursive and mutually
//! recursive references (`Enum<E extends Enum<E>>`) link up to a single
//! declaration per name. Concurrent sessions may race on the commit; the
//! first commit wins and later requests observe the interned winner, which
//! compares equal by construction.
//!
//! [`DeclarationRegistry::with_minimal_jdk`] seeds the universe every Java
//! type system needs: `Object`, the array supertypes `Cloneable` and
//! `Serializable`, the eight boxed classes, `String`, `Number`, `Enum`,
//! `Comparable`, `Iterable`, and the collection interfaces `Collection`,
//! `List`, `Set` plus `ArrayList`.

mod spec;

pub use spec::{ClassSpec, TypeParameterSpec, TypeRef};

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, OnceLock};

use jtypes::{DeclarationProvider, Type, TypeDeclaration, TypeError, WellKnownTypes};

const OBJECT: &str = "java.lang.Object";

/// An interning provider of [`TypeDeclaration`]s described by [`ClassSpec`]s.
pub struct DeclarationRegistry {
    specs: HashMap<String, ClassSpec>,
    cache: Mutex<HashMap<String, Arc<TypeDeclaration>>>,
    well_known: OnceLock<WellKnownTypes>,
}

impl DeclarationRegistry {
    /// A registry seeded with the minimal JDK universe.
    pub fn with_minimal_jdk() -> DeclarationRegistry {
        let mut registry = DeclarationRegistry {
            specs: HashMap::new(),
            cache: Mutex::new(HashMap::new()),
            well_known: OnceLock::new(),
        };
        for spec in minimal_jdk() {
            registry.register(spec);
        }
        registry.init_well_known();
        registry
    }

    /// A registry seeded with the minimal JDK universe plus `classes`.
    pub fn with_minimal_jdk_and(classes: impl IntoIterator<Item = ClassSpec>) -> DeclarationRegistry {
        let mut registry = DeclarationRegistry::with_minimal_jdk();
        registry.register_all(classes);
        registry
    }

    /// Registers a class description.
    ///
    /// Registering the same qualified name twice would silently fork the
    /// declaration's identity, so it is treated as a programmer error.
    pub fn register(&mut self, spec: ClassSpec) {
        let previous = self.specs.insert(spec.name.clone(), spec);
        if let Some(previous) = previous {
            panic!("duplicate class description for {}", previous.name);
        }
    }

    pub fn register_all(&mut self, classes: impl IntoIterator<Item = ClassSpec>) {
        for spec in classes {
            self.register(spec);
        }
    }

    /// The interned declaration for a qualified name, materializing it (and
    /// everything reachable from it) on first request.
    ///
    /// Fails with [`TypeError::MissingOperand`] when the name, or any name
    /// reachable from it, has no registered description.
    pub fn declaration(&self, qualified_name: &str) -> Result<Arc<TypeDeclaration>, TypeError> {
        if let Some(found) = self.cache.lock().expect("cache lock").get(qualified_name) {
            return Ok(found.clone());
        }

        let mut session = Session {
            registry: self,
            by_name: HashMap::new(),
            created: Vec::new(),
            pending: VecDeque::new(),
        };
        session.declaration(qualified_name)?;
        while let Some(next) = session.pending.pop_front() {
            session.finish(&next)?;
        }

        // Commit the batch. Under a concurrent race the earlier commit wins
        // and this session's duplicates are dropped; both copies compare
        // equal, so callers cannot tell.
        let mut cache = self.cache.lock().expect("cache lock");
        for (name, declaration) in session.created {
            cache.entry(name).or_insert(declaration);
        }
        Ok(cache
            .get(qualified_name)
            .expect("the requested declaration was materialized above")
            .clone())
    }

    fn init_well_known(&self) {
        let get = |name: &str| {
            self.declaration(name).unwrap_or_else(|error| {
                panic!("built-in declaration {name} must materialize: {error}")
            })
        };
        let boxed = [
            "java.lang.Boolean",
            "java.lang.Byte",
            "java.lang.Short",
            "java.lang.Character",
            "java.lang.Integer",
            "java.lang.Long",
            "java.lang.Float",
            "java.lang.Double",
        ]
        .map(get);
        let well_known = WellKnownTypes::new(
            get(OBJECT),
            get("java.lang.Cloneable"),
            get("java.io.Serializable"),
            boxed,
        );
        let set = self.well_known.set(well_known);
        debug_assert!(set.is_ok());
    }
}

impl DeclarationProvider for DeclarationRegistry {
    fn declaration(&self, qualified_name: &str) -> Option<Arc<TypeDeclaration>> {
        DeclarationRegistry::declaration(self, qualified_name).ok()
    }

    fn well_known(&self) -> &WellKnownTypes {
        self.well_known
            .get()
            .expect("the registry is constructed with well-known declarations")
    }
}

/// One materialization run: the declarations created for a single top-level
/// request, shared by name until they are committed.
struct Session<'a> {
    registry: &'a DeclarationRegistry,
    by_name: HashMap<String, Arc<TypeDeclaration>>,
    created: Vec<(String, Arc<TypeDeclaration>)>,
    pending: VecDeque<String>,
}

impl Session<'_> {
    /// The declaration for `name` within this session: interned, already
    /// created here, or newly created (unfinished) and queued for finishing.
    fn declaration(&mut self, name: &str) -> Result<Arc<TypeDeclaration>, TypeError> {
        if let Some(found) = self.registry.cache.lock().expect("cache lock").get(name) {
            return Ok(found.clone());
        }
        if let Some(found) = self.by_name.get(name) {
            return Ok(found.clone());
        }

        let spec = self.registry.specs.get(name).ok_or_else(|| {
            TypeError::MissingOperand(format!("no declaration registered for '{name}'"))
        })?;
        let parameter_names: Vec<&str> = spec
            .type_parameters
            .iter()
            .map(|parameter| parameter.name.as_str())
            .collect();
        let declaration = TypeDeclaration::new(spec.kind, name, &parameter_names);
        self.by_name.insert(name.to_string(), declaration.clone());
        self.created.push((name.to_string(), declaration.clone()));
        self.pending.push_back(name.to_string());
        Ok(declaration)
    }

    /// Resolves and installs the declaration's superclass, interfaces,
    /// enclosing declaration, and parameter bounds.
    fn finish(&mut self, name: &str) -> Result<(), TypeError> {
        let declaration = self.by_name[name].clone();
        let spec = self.registry.specs[name].clone();

        let enclosing = spec
            .enclosing
            .as_deref()
            .map(|enclosing_name| self.declaration(enclosing_name))
            .transpose()?;

        let superclass = match &spec.superclass {
            Some(type_ref) => self.resolve_type_ref(type_ref, &declaration)?,
            None if spec.kind.is_interface() || name == OBJECT => Type::None,
            None => self.object_type()?,
        };

        let interfaces = spec
            .interfaces
            .iter()
            .map(|type_ref| self.resolve_type_ref(type_ref, &declaration))
            .collect::<Result<Vec<_>, _>>()?;

        let mut parameter_bounds = Vec::with_capacity(spec.type_parameters.len());
        for parameter in &spec.type_parameters {
            if parameter.bounds.is_empty() {
                parameter_bounds.push(vec![self.object_type()?]);
            } else {
                parameter_bounds.push(
                    parameter
                        .bounds
                        .iter()
                        .map(|bound| self.resolve_type_ref(bound, &declaration))
                        .collect::<Result<Vec<_>, _>>()?,
                );
            }
        }

        declaration.finish(superclass, interfaces, enclosing.as_ref(), parameter_bounds)
    }

    fn object_type(&mut self) -> Result<Type, TypeError> {
        let object = self.declaration(OBJECT)?;
        Type::declared(&object, Vec::new())
    }

    /// Resolves a [`TypeRef`] in the scope of `scope`: type-variable names are
    /// looked up in the scope's formal parameters and then outwards through
    /// its enclosing declarations.
    fn resolve_type_ref(
        &mut self,
        type_ref: &TypeRef,
        scope: &Arc<TypeDeclaration>,
    ) -> Result<Type, TypeError> {
        match type_ref {
            TypeRef::Named { name, args } => {
                let declaration = self.declaration(name)?;
                let arguments = args
                    .iter()
                    .map(|argument| self.resolve_type_ref(argument, scope))
                    .collect::<Result<Vec<_>, _>>()?;
                Type::declared(&declaration, arguments)
            }
            TypeRef::Variable(variable_name) => {
                let mut current = Some(scope.clone());
                while let Some(declaration) = current {
                    let found = declaration
                        .type_parameters()
                        .iter()
                        .find(|parameter| parameter.name() == variable_name.as_str());
                    if let Some(parameter) = found {
                        return Ok(parameter.as_type());
                    }
                    let enclosing_name = self
                        .registry
                        .specs
                        .get(declaration.qualified_name().as_str())
                        .and_then(|enclosing_spec| enclosing_spec.enclosing.as_deref());
                    current = match enclosing_name {
                        Some(enclosing_name) => Some(self.declaration(enclosing_name)?),
                        None => None,
                    };
                }
                Err(TypeError::Unsupported(format!(
                    "type parameter '{variable_name}' is not declared by {} or an enclosing \
                     declaration; method and constructor type parameters are not modeled",
                    scope.qualified_name()
                )))
            }
            TypeRef::Array(component) => Ok(Type::array(self.resolve_type_ref(component, scope)?)),
            TypeRef::Wildcard {
                extends,
                super_bound,
            } => {
                let upper = extends
                    .as_deref()
                    .map(|bound| self.resolve_type_ref(bound, scope))
                    .transpose()?;
                let lower = super_bound
                    .as_deref()
                    .map(|bound| self.resolve_type_ref(bound, scope))
                    .transpose()?;
                Type::wildcard(upper, lower)
            }
            TypeRef::Primitive(kind) => Ok(Type::primitive(*kind)),
        }
    }
}

/// The built-in class descriptions.
fn minimal_jdk() -> Vec<ClassSpec> {
    let comparable_to = |name: &str| {
        TypeRef::parameterized("java.lang.Comparable", vec![TypeRef::named(name)])
    };
    let serializable = || TypeRef::named("java.io.Serializable");
    let number_subclass = |name: &str| {
        ClassSpec::class(name)
            .with_superclass(TypeRef::named("java.lang.Number"))
            .with_interface(comparable_to(name))
    };

    vec![
        ClassSpec::class(OBJECT),
        ClassSpec::interface("java.lang.Cloneable"),
        ClassSpec::interface("java.io.Serializable"),
        ClassSpec::interface("java.lang.Comparable")
            .with_type_parameter(TypeParameterSpec::new("T")),
        ClassSpec::interface("java.lang.Iterable").with_type_parameter(TypeParameterSpec::new("T")),
        ClassSpec::class("java.lang.Number").with_interface(serializable()),
        ClassSpec::class("java.lang.String")
            .with_interface(serializable())
            .with_interface(comparable_to("java.lang.String")),
        ClassSpec::class("java.lang.Enum")
            .with_type_parameter(TypeParameterSpec::new("E").with_bound(TypeRef::parameterized(
                "java.lang.Enum",
                vec![TypeRef::variable("E")],
            )))
            .with_interface(TypeRef::parameterized(
                "java.lang.Comparable",
                vec![TypeRef::variable("E")],
            ))
            .with_interface(serializable()),
        ClassSpec::class("java.lang.Boolean")
            .with_interface(serializable())
            .with_interface(comparable_to("java.lang.Boolean")),
        ClassSpec::class("java.lang.Character")
            .with_interface(serializable())
            .with_interface(comparable_to("java.lang.Character")),
        number_subclass("java.lang.Byte"),
        number_subclass("java.lang.Short"),
        number_subclass("java.lang.Integer"),
        number_subclass("java.lang.Long"),
        number_subclass("java.lang.Float"),
        number_subclass("java.lang.Double"),
        ClassSpec::interface("java.util.Collection")
            .with_type_parameter(TypeParameterSpec::new("E"))
            .with_interface(TypeRef::parameterized(
                "java.lang.Iterable",
                vec![TypeRef::variable("E")],
            )),
        ClassSpec::interface("java.util.List")
            .with_type_parameter(TypeParameterSpec::new("E"))
            .with_interface(TypeRef::parameterized(
                "java.util.Collection",
                vec![TypeRef::variable("E")],
            )),
        ClassSpec::interface("java.util.Set")
            .with_type_parameter(TypeParameterSpec::new("E"))
            .with_interface(TypeRef::parameterized(
                "java.util.Collection",
                vec![TypeRef::variable("E")],
            )),
        ClassSpec::class("java.util.ArrayList")
            .with_type_parameter(TypeParameterSpec::new("E"))
            .with_interface(TypeRef::parameterized(
                "java.util.List",
                vec![TypeRef::variable("E")],
            ))
            .with_interface(TypeRef::named("java.lang.Cloneable"))
            .with_interface(serializable()),
    ]
}
