//! Resolution of raw property ids to definitions.
//!
//! The [`Resolver`] is the query surface a property-stream reader calls for every decoded
//! property. It never fails: an id without definitions is [`Resolution::Unknown`], an id whose
//! meaning can't be decided is [`Resolution::Ambiguous`].
//!
//! # Resolution policy
//!
//! 1. No definition → `Unknown`; exactly one → `Resolved`.
//! 2. The observed value type selects the candidates declaring it. One match resolves. With
//!    [`ResolverConfig::string_type_equivalence`] an unmatched string type is retried with its
//!    8-bit/UTF-16 counterpart.
//! 3. The area hint selects the candidates of that area. One match resolves; otherwise the area
//!    is applied to the candidates left by step 2 and one remaining match resolves.
//!
//!    The first area match runs over all candidates, not only those left by step 2. A unique area
//!    match therefore wins even if it doesn't declare the observed type.
//! 4. If [`ResolverConfig::canonical_tie_break`] is set and exactly one candidate left after
//!    steps 2 and 3 is protocol-canonical, it wins.
//! 5. Otherwise → `Ambiguous` with all candidates of the id.
//!
//! # Examples
//!
//! ```rust
//! use mapiprops::{PropertyType, Resolution};
//!
//! let registry = mapiprops::registry()?;
//!
//! match registry.lookup_by_id(0x0E08, Some(PropertyType::Integer64), None) {
//!     Resolution::Resolved(def) => assert_eq!(def.name(), "PidTagMessageSizeExtended"),
//!     other => panic!("unexpected {other:?}"),
//! }
//!
//! let search = registry.lookup_by_id(0x6841, None, Some("Search"));
//! assert_eq!(search.definition().map(|d| d.name().into_owned()),
//!            Some("PidTagSearchFolderTemplateId".to_string()));
//! # Ok::<(), mapiprops::Error>(())
//! ```

use std::slice;

use log::trace;

use crate::{
    registry::{AmbiguityIndex, PropertyDefinition, RegistryTable, ResolverConfig},
    types::{PropertyTag, PropertyType},
};

/// Outcome of resolving a property id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Exactly one definition applies
    Resolved(&'a PropertyDefinition),
    /// Several definitions apply; all candidates of the id, in table order
    Ambiguous(&'a [PropertyDefinition]),
    /// The id is not catalogued
    Unknown,
}

impl<'a> Resolution<'a> {
    /// The resolved definition, `None` unless [`Resolution::Resolved`]
    #[must_use]
    pub fn definition(&self) -> Option<&'a PropertyDefinition> {
        match self {
            Resolution::Resolved(def) => Some(def),
            _ => None,
        }
    }

    /// All definitions still in question: one for a resolved id, none for an unknown one
    #[must_use]
    pub fn candidates(&self) -> &'a [PropertyDefinition] {
        match self {
            Resolution::Resolved(def) => slice::from_ref(*def),
            Resolution::Ambiguous(defs) => defs,
            Resolution::Unknown => &[],
        }
    }

    /// The documented fallback for callers that need a single answer.
    ///
    /// For an ambiguous id this is the first protocol-canonical candidate, or the first
    /// candidate if none is canonical.
    #[must_use]
    pub fn preferred(&self) -> Option<&'a PropertyDefinition> {
        match self {
            Resolution::Resolved(def) => Some(def),
            Resolution::Ambiguous(defs) => defs
                .iter()
                .find(|d| d.is_canonical())
                .or_else(|| defs.first()),
            Resolution::Unknown => None,
        }
    }

    /// Returns true for [`Resolution::Resolved`]
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    /// Returns true for [`Resolution::Ambiguous`]
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Resolution::Ambiguous(_))
    }

    /// Returns true for [`Resolution::Unknown`]
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Resolution::Unknown)
    }
}

/// Stateless lookup service over a registry table and its ambiguity index.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    table: &'a RegistryTable,
    ambiguity: &'a AmbiguityIndex,
    config: ResolverConfig,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver
    ///
    /// # Arguments
    /// * `table` - The registry table
    /// * `ambiguity` - The ambiguity index derived from `table`
    /// * `config` - Resolution policy
    #[must_use]
    pub fn new(
        table: &'a RegistryTable,
        ambiguity: &'a AmbiguityIndex,
        config: ResolverConfig,
    ) -> Self {
        Resolver {
            table,
            ambiguity,
            config,
        }
    }

    /// The resolution policy in use
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves a property id.
    ///
    /// # Arguments
    /// * `id` - The 16-bit property id
    /// * `observed` - Type of the value found in the stream, if known
    /// * `area_hint` - Functional area of the containing object or table, if known
    #[must_use]
    pub fn lookup_by_id(
        &self,
        id: u16,
        observed: Option<PropertyType>,
        area_hint: Option<&str>,
    ) -> Resolution<'a> {
        let Some(candidates) = self.table.get(id) else {
            return Resolution::Unknown;
        };

        if let [single] = candidates {
            return Resolution::Resolved(single);
        }

        let resolution = self.disambiguate(candidates, observed, area_hint);
        if let (Resolution::Ambiguous(_), Some(ambiguity)) = (resolution, self.ambiguity.get(id)) {
            trace!(
                "0x{:04X} stays ambiguous ({}, {} candidates, observed {:?}, area {:?})",
                id,
                ambiguity.kind(),
                ambiguity.candidate_count(),
                observed,
                area_hint
            );
        }
        resolution
    }

    /// Resolves a full 32-bit property tag.
    ///
    /// The type half of the tag is used as the observed type; `PtypUnspecified` and undocumented
    /// type codes count as "no observed type".
    #[must_use]
    pub fn resolve_tag(&self, tag: PropertyTag, area_hint: Option<&str>) -> Resolution<'a> {
        let observed = match tag.prop_type() {
            Some(PropertyType::Unspecified) => None,
            Some(prop_type) => Some(prop_type),
            None => {
                trace!(
                    "{}: undocumented type code 0x{:04X}, resolving by id only",
                    tag,
                    tag.type_code()
                );
                None
            }
        };

        self.lookup_by_id(tag.id(), observed, area_hint)
    }

    fn disambiguate(
        &self,
        candidates: &'a [PropertyDefinition],
        observed: Option<PropertyType>,
        area_hint: Option<&str>,
    ) -> Resolution<'a> {
        let mut pool: Vec<&'a PropertyDefinition> = candidates.iter().collect();

        if let Some(observed) = observed {
            let typed = self.by_type(candidates, observed);
            if let [def] = typed.as_slice() {
                trace!("{def}: resolved by observed type {observed}");
                return Resolution::Resolved(def);
            }
            if !typed.is_empty() {
                pool = typed;
            }
        }

        if let Some(hint) = area_hint {
            let in_area: Vec<&'a PropertyDefinition> = candidates
                .iter()
                .filter(|d| self.config.area_matches(d.area(), hint))
                .collect();
            if let [def] = in_area.as_slice() {
                trace!("{def}: resolved by area '{hint}'");
                return Resolution::Resolved(def);
            }

            let narrowed: Vec<&'a PropertyDefinition> = pool
                .iter()
                .copied()
                .filter(|d| self.config.area_matches(d.area(), hint))
                .collect();
            if let [def] = narrowed.as_slice() {
                trace!("{def}: resolved by observed type and area '{hint}'");
                return Resolution::Resolved(def);
            }
            if !narrowed.is_empty() {
                pool = narrowed;
            }
        }

        if self.config.canonical_tie_break {
            let mut canonical = pool.iter().filter(|d| d.is_canonical());
            if let (Some(def), None) = (canonical.next(), canonical.next()) {
                trace!("{def}: resolved by canonical tie-break");
                return Resolution::Resolved(def);
            }
        }

        Resolution::Ambiguous(candidates)
    }

    /// Candidates declaring `observed`, falling back to the string counterpart if enabled
    fn by_type(
        &self,
        candidates: &'a [PropertyDefinition],
        observed: PropertyType,
    ) -> Vec<&'a PropertyDefinition> {
        let strict: Vec<&'a PropertyDefinition> =
            candidates.iter().filter(|d| d.declares(observed)).collect();
        if !strict.is_empty() || !self.config.string_type_equivalence {
            return strict;
        }

        match observed.string_counterpart() {
            Some(counterpart) => candidates
                .iter()
                .filter(|d| d.declares(counterpart))
                .collect(),
            None => strict,
        }
    }
}
