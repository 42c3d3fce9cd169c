//! Error types for the UI-resource registry and spec compiler (§3.1).

use thiserror::Error;

/// Failure modes for [`crate::registry::UiResourceRegistry`] operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A `register`/`upsert` was attempted for a uri already present.
    #[error("resource {uri} already exists")]
    AlreadyExists {
        /// The colliding uri.
        uri: String,
    },

    /// `upsert`/`delete` was attempted against an embedded (immutable) entry.
    #[error("resource {uri} is embedded and cannot be mutated")]
    EmbeddedImmutable {
        /// The target uri.
        uri: String,
    },

    /// `register` was called with an entry not marked embedded, or `upsert`
    /// with an entry marked embedded.
    #[error("resource {uri} has the wrong mutability class for this operation")]
    WrongMutabilityClass {
        /// The target uri.
        uri: String,
    },

    /// The dynamic-entry count limit would be exceeded.
    #[error("dynamic resource capacity of {limit} entries reached")]
    EntryCapacityExceeded {
        /// The configured entry-count limit.
        limit: usize,
    },

    /// The dynamic-entry total byte-size limit would be exceeded.
    #[error("dynamic resource capacity of {limit} bytes reached")]
    ByteCapacityExceeded {
        /// The configured byte-size limit.
        limit: usize,
    },

    /// No entry exists for the given uri.
    #[error("resource {uri} not found")]
    NotFound {
        /// The missing uri.
        uri: String,
    },
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Failure modes for [`crate::compiler::validate`]/[`crate::compiler::compile`].
#[derive(Debug, Error)]
pub enum CompileError {
    /// `components` referenced a `type` outside the closed catalog.
    #[error("unknown component type: {type_name}")]
    UnknownComponentType {
        /// The offending type string.
        type_name: String,
    },

    /// A component's `type` field was the empty string.
    #[error("component type must not be empty")]
    EmptyComponentType,

    /// The spec's top-level `components` array was empty.
    #[error("spec must declare at least one component")]
    EmptyComponents,

    /// Total component count exceeded the structural limit.
    #[error("component count {count} exceeds the limit of {limit}")]
    TooManyComponents {
        /// Observed count.
        count: usize,
        /// Configured limit.
        limit: usize,
    },

    /// Nesting depth exceeded the structural limit.
    #[error("nesting depth {depth} exceeds the limit of {limit}")]
    TooDeep {
        /// Observed depth.
        depth: usize,
        /// Configured limit.
        limit: usize,
    },

    /// The encoded spec exceeded the total byte-size limit.
    #[error("encoded spec size {size} bytes exceeds the limit of {limit} bytes")]
    SpecTooLarge {
        /// Observed size.
        size: usize,
        /// Configured limit.
        limit: usize,
    },

    /// A single component's encoded props exceeded the per-component limit.
    #[error("component props size {size} bytes exceeds the limit of {limit} bytes")]
    PropsTooLarge {
        /// Observed size.
        size: usize,
        /// Configured limit.
        limit: usize,
    },

    /// A component kind that does not allow children carried a `children`
    /// array.
    #[error("component type {type_name} does not allow children")]
    ChildrenNotAllowed {
        /// The offending type string.
        type_name: String,
    },

    /// A prototype-pollution-sensitive key appeared anywhere in `props`.
    #[error("dangerous key {key} is not permitted in component props")]
    DangerousKey {
        /// The offending key.
        key: String,
    },

    /// A string value in `props` matched a dangerous URL scheme or CSS token.
    #[error("dangerous value in component props: {detail}")]
    DangerousValue {
        /// Description of the matched pattern.
        detail: String,
    },
}

/// Result alias for compiler operations.
pub type CompileResult<T> = Result<T, CompileError>;
