// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # mapiprops
//!
//! A registry of MAPI property tags as documented by [MS-OXPROPS], [MS-OXCDATA] and [MS-PST].
//!
//! Every MAPI property is addressed by a 32-bit tag: a 16-bit property id in the high half and a
//! 16-bit value type in the low half. `mapiprops` maps the id to its documented definitions
//! (canonical name, declared types, functional area, defining section and aliases) and resolves
//! the ids the specifications assign more than one meaning. It is the lookup table a
//! PST/MSG/MAPI property-stream reader consults for every property it decodes.
//!
//! ## Features
//!
//! - **Data-driven corpus** - Definitions ship as a versioned JSON document, validated at build
//!   time and embedded into the crate
//! - **Explicit ambiguity** - Ids with several meanings are classified as type-disjoint or
//!   type-overlapping instead of being merged into one name
//! - **Hint-based resolution** - Observed value type and container area narrow an ambiguous id
//!   down, with a configurable canonical tie-break
//! - **Reverse lookup** - Canonical names, `PR_*` aliases and placeholder names map back to ids
//! - **Lock-free sharing** - The registry is immutable after construction; the process-wide
//!   instance is built exactly once
//!
//! ## Quick Start
//!
//! ```rust
//! use mapiprops::{PropertyType, Resolution};
//!
//! let registry = mapiprops::registry()?;
//!
//! // Single definition
//! let subject = registry.lookup_by_id(0x0037, None, None);
//! assert_eq!(subject.definition().map(|d| d.name().into_owned()),
//!            Some("PidTagSubject".to_string()));
//!
//! // Type-disjoint ambiguity, split by the observed type
//! let size = registry.lookup_by_id(0x0E08, Some(PropertyType::Integer64), None);
//! assert!(size.is_resolved());
//!
//! // Type-overlapping ambiguity, split by the area of the container
//! match registry.lookup_by_id(0x6841, None, None) {
//!     Resolution::Ambiguous(candidates) => assert_eq!(candidates.len(), 3),
//!     other => panic!("unexpected {other:?}"),
//! }
//! assert!(registry.lookup_by_id(0x6841, None, Some("Search")).is_resolved());
//!
//! // Not catalogued
//! assert!(registry.lookup_by_id(0xABCD, None, None).is_unknown());
//! # Ok::<(), mapiprops::Error>(())
//! ```
//!
//! ## Custom corpora
//!
//! Any other revision of the data file can be loaded at runtime:
//!
//! ```rust
//! use mapiprops::{DataSource, PropertyRegistry, ResolverConfig};
//!
//! let json = r#"{ "format": 1, "entries": [
//!     { "id": "0x0037", "name": "PidTagSubject", "types": ["PtypString"] }
//! ] }"#;
//!
//! let registry = PropertyRegistry::from_source(&DataSource::from_json(json)?)?
//!     .with_config(ResolverConfig::lenient());
//! assert_eq!(registry.len(), 1);
//! # Ok::<(), mapiprops::Error>(())
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and never installs a logger. Construction is
//! reported at `debug`, self-check findings at `warn`/`info`, individual resolver decisions at
//! `trace`.

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use mapiprops::prelude::*;
///
/// let registry = mapiprops::registry()?;
/// let tag = PropertyTag::with_type(0x0037, PropertyType::String);
/// assert!(registry.resolve_tag(tag, None).is_resolved());
/// # Ok::<(), mapiprops::Error>(())
/// ```
pub mod prelude;

/// MAPI property types and tags, as defined by [MS-OXCDATA] 2.9 and 2.11.1.
///
/// # Key Types
///
/// - [`types::PropertyType`] - The closed set of documented `Ptyp*` value types
/// - [`types::TypeFlags`] - The multi-value bits of a type code
/// - [`types::PropertyTag`] - A 32-bit property tag
pub mod types;

/// The property registry: table, ambiguity index, resolver and diagnostics.
///
/// See [`registry::PropertyRegistry`] for the query surface.
pub mod registry;

/// `mapiprops` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always [`Error`].
///
/// # Examples
///
/// ```rust
/// use mapiprops::{DataSource, PropertyRegistry, Result};
///
/// fn load(json: &str) -> Result<PropertyRegistry> {
///     PropertyRegistry::from_source(&DataSource::from_json(json)?)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `mapiprops` Error type
///
/// Only building a registry can fail; every query of a built registry is infallible.
pub use error::Error;

/// Registry types needed by most callers.
pub use registry::{
    DataSource, DefinitionOrigin, PropertyDefinition, PropertyRecord, PropertyRegistry,
    Resolution, ResolverConfig,
};

/// Property type and tag primitives.
pub use types::{PropertyTag, PropertyType, TypeFlags};

/// Returns the process-wide registry built from the embedded corpus.
///
/// The registry is built on the first call and shared by every later call. If the build fails,
/// the same error is returned to every caller.
///
/// # Errors
///
/// Returns the error of the one-time build, see [`Error`].
///
/// # Examples
///
/// ```rust
/// let registry = mapiprops::registry()?;
/// assert!(registry.is_reserved_id(0x0086));
/// # Ok::<(), mapiprops::Error>(())
/// ```
pub fn registry() -> Result<&'static PropertyRegistry> {
    PropertyRegistry::global()
}
