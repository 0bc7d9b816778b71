use thiserror::Error;

/// Failures surfaced by type-system operations.
///
/// Every failure propagates immediately to the caller; nothing in this crate
/// recovers from an error or logs it. "Not a subtype" is deliberately *not* an
/// error: [`crate::resolve_actual_type_arguments`] reports it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// An argument was structurally unusable: an intersection with zero
    /// bounds, a wildcard with both an extends and a super bound, a declared
    /// type whose argument count matches neither zero nor the declaration's
    /// formal parameter count, or an unboxing request for a type that is not
    /// one of the eight boxed declared types.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A required input was absent, e.g. a declaration key with no registered
    /// declaration behind it.
    #[error("missing operand: {0}")]
    MissingOperand(String),

    /// A value was used outside its lifecycle window: a type variable's bounds
    /// were read before being set, or were set twice.
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// The operation or input is outside the modeled subset, e.g. a type
    /// reference to a method or constructor type parameter.
    #[error("unsupported: {0}")]
    Unsupported(String),
}
