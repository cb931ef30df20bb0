//! # mapiprops Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the mapiprops
//! library. Import it to get the registry, its results and the property primitives in one line.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all mapiprops operations
pub use crate::Error;

/// The result type used throughout mapiprops
pub use crate::Result;

/// The process-wide registry
pub use crate::registry;

// ================================================================================================
// Registry
// ================================================================================================

/// Registry facade and its configuration
pub use crate::registry::{PropertyRegistry, ResolverConfig};

/// Resolution results and the records they point at
pub use crate::registry::{DefinitionOrigin, PropertyDefinition, Resolution};

/// Ambiguity classification
pub use crate::registry::{Ambiguity, AmbiguityKind};

/// Loading other corpus revisions
pub use crate::registry::DataSource;

// ================================================================================================
// Property Primitives
// ================================================================================================

/// Property types, flags and tags
pub use crate::types::{PropertyTag, PropertyType, TypeFlags};
