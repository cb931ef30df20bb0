//! The MAPI property tag registry.
//!
//! This module ties the registry components together behind [`PropertyRegistry`]:
//!
//! - [`RegistryTable`] - every documented definition, keyed by 16-bit property id
//! - [`AmbiguityIndex`] - the ids carrying more than one definition, classified by type overlap
//! - [`Resolver`] - maps `(id, observed type, area hint)` to a [`Resolution`]
//! - [`Diagnostics`] - non-fatal findings about the corpus, collected while building
//!
//! All of these are built once from a [`DataSource`] and never change afterwards. A registry can
//! be shared between any number of threads without locking; the process-wide instance returned
//! by [`crate::registry()`] is built on first use.
//!
//! # Examples
//!
//! ```rust
//! use mapiprops::{PropertyTag, Resolution};
//!
//! let registry = mapiprops::registry()?;
//!
//! if let Resolution::Resolved(def) = registry.resolve_tag(PropertyTag(0x0037_001F), None) {
//!     assert_eq!(def.name(), "PidTagSubject");
//! }
//!
//! let by_alias = registry.lookup_by_name("PR_SUBJECT_W");
//! assert_eq!(by_alias[0].id(), 0x0037);
//!
//! assert!(registry.is_reserved_id(0x0086));
//! # Ok::<(), mapiprops::Error>(())
//! ```

mod ambiguity;
mod config;
mod definition;
mod diagnostics;
mod hexid;
mod names;
mod resolver;
mod source;
mod table;

pub use ambiguity::{Ambiguity, AmbiguityIndex, AmbiguityKind};
pub use config::ResolverConfig;
pub use definition::{DefinitionOrigin, PropertyDefinition};
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics};
pub use resolver::{Resolution, Resolver};
pub use source::{DataSource, PropertyRecord, FORMAT_VERSION};
pub use table::{Fingerprint, RegistryTable};

use std::collections::BTreeSet;
use std::sync::OnceLock;

use log::debug;

use crate::{
    registry::names::{NameIndex, Slot},
    types::{PropertyTag, PropertyType},
    Result,
};

static GLOBAL: OnceLock<Result<PropertyRegistry>> = OnceLock::new();

/// A fully built, immutable property registry.
#[derive(Debug, Clone)]
pub struct PropertyRegistry {
    table: RegistryTable,
    ambiguity: AmbiguityIndex,
    names: NameIndex,
    diagnostics: Diagnostics,
    config: ResolverConfig,
}

impl PropertyRegistry {
    /// Builds a registry from the corpus embedded at compile time.
    ///
    /// # Errors
    /// Returns an error if the embedded corpus can't be parsed or fails the integrity checks.
    pub fn embedded() -> Result<Self> {
        Self::from_source(&DataSource::embedded()?)
    }

    /// Builds a registry from any revision of the corpus.
    ///
    /// # Arguments
    /// * `source` - The parsed corpus
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedEntry`] or [`crate::Error::DuplicateDefinition`] if the
    /// corpus fails the integrity checks. Nothing is returned for a partially valid corpus.
    pub fn from_source(source: &DataSource) -> Result<Self> {
        let table = RegistryTable::build(source)?;
        let ambiguity = AmbiguityIndex::build(&table);
        let names = NameIndex::build(&table);
        let diagnostics = diagnostics::self_check(&table, &names);

        debug!(
            "Property registry ready: {} ids, {} definitions, {} names, {} ambiguous ids, {} diagnostics",
            table.len(),
            table.definition_count(),
            names.len(),
            ambiguity.len(),
            diagnostics.count()
        );

        Ok(PropertyRegistry {
            table,
            ambiguity,
            names,
            diagnostics,
            config: ResolverConfig::default(),
        })
    }

    /// Returns the registry with another resolution policy.
    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The process-wide registry built from the embedded corpus.
    ///
    /// The first call builds it; concurrent first callers wait for that single build. A failed
    /// build is cached as well, so every caller sees the same error.
    ///
    /// # Errors
    /// Returns the error of the one-time build.
    pub fn global() -> Result<&'static PropertyRegistry> {
        GLOBAL
            .get_or_init(PropertyRegistry::embedded)
            .as_ref()
            .map_err(Clone::clone)
    }

    /// The resolution policy in use
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// A resolver over this registry
    #[must_use]
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.table, &self.ambiguity, self.config)
    }

    /// Resolves a property id, see [`Resolver::lookup_by_id`]
    #[must_use]
    pub fn lookup_by_id(
        &self,
        id: u16,
        observed: Option<PropertyType>,
        area_hint: Option<&str>,
    ) -> Resolution<'_> {
        self.resolver().lookup_by_id(id, observed, area_hint)
    }

    /// Resolves a full 32-bit property tag, see [`Resolver::resolve_tag`]
    #[must_use]
    pub fn resolve_tag(&self, tag: PropertyTag, area_hint: Option<&str>) -> Resolution<'_> {
        self.resolver().resolve_tag(tag, area_hint)
    }

    /// All definitions whose canonical name or one of whose aliases equals `name`.
    ///
    /// The match is exact and case-sensitive. Results are in table order; an empty result means
    /// the name is not catalogued.
    #[must_use]
    pub fn lookup_by_name(&self, name: &str) -> Vec<&PropertyDefinition> {
        self.slots(self.names.lookup(name))
    }

    /// Like [`PropertyRegistry::lookup_by_name`], ignoring ASCII case
    #[must_use]
    pub fn lookup_by_name_ignore_case(&self, name: &str) -> Vec<&PropertyDefinition> {
        self.slots(self.names.lookup_ignore_case(name))
    }

    fn slots(&self, slots: &[Slot]) -> Vec<&PropertyDefinition> {
        slots
            .iter()
            .filter_map(|&(id, position)| self.table.get(id)?.get(position))
            .collect()
    }

    /// Returns true if `id` is explicitly marked reserved or unused.
    ///
    /// An uncatalogued id is not reserved.
    #[must_use]
    pub fn is_reserved_id(&self, id: u16) -> bool {
        self.table
            .get(id)
            .is_some_and(|defs| defs.iter().any(PropertyDefinition::is_reserved))
    }

    /// All definitions of `id` in declaration order, empty if the id is not catalogued
    #[must_use]
    pub fn definitions(&self, id: u16) -> &[PropertyDefinition] {
        self.table.get(id).unwrap_or_default()
    }

    /// The ambiguity classification of `id`, `None` unless it has several definitions
    #[must_use]
    pub fn ambiguity(&self, id: u16) -> Option<&Ambiguity> {
        self.ambiguity.get(id)
    }

    /// The ambiguity index
    #[must_use]
    pub fn ambiguities(&self) -> &AmbiguityIndex {
        &self.ambiguity
    }

    /// The underlying table
    #[must_use]
    pub fn table(&self) -> &RegistryTable {
        &self.table
    }

    /// Iterates over all catalogued ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = u16> + '_ {
        self.table.ids()
    }

    /// Iterates over the definitions of a functional area, compared exactly
    pub fn in_area<'a>(&'a self, area: &'a str) -> impl Iterator<Item = &'a PropertyDefinition> {
        self.table
            .definitions()
            .filter(move |def| def.area() == Some(area))
    }

    /// All functional areas named by the corpus, sorted
    #[must_use]
    pub fn areas(&self) -> BTreeSet<&str> {
        self.table
            .definitions()
            .filter_map(PropertyDefinition::area)
            .collect()
    }

    /// Number of catalogued ids
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if no id is catalogued
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The specification revisions the corpus was taken from
    #[must_use]
    pub fn corpus(&self) -> Option<&str> {
        self.table.corpus()
    }

    /// Fingerprint of the table content, see [`RegistryTable::fingerprint`]
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        self.table.fingerprint()
    }

    /// Findings of the self-check run while building
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Definitions involved in an upstream transcription anomaly, in table order.
    ///
    /// This lists the documented definition as well as the one catalogued under the literal
    /// upstream assigned.
    #[must_use]
    pub fn transcription_anomalies(&self) -> Vec<&PropertyDefinition> {
        self.table
            .definitions()
            .filter(|def| def.transcribed_as().is_some())
            .collect()
    }
}
