//! Resolver configuration
//!
//! The defaults follow the documented resolution policy to the letter. The presets trade
//! strictness against the quirks of real stores: ANSI PST files carry `PtypString8` where the
//! specification documents `PtypString`, and container hints often arrive in another case.

/// Configuration of the ambiguity resolution policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Resolve to the single protocol-canonical candidate when type and area hints don't decide
    pub canonical_tie_break: bool,

    /// Accept `PtypString8` for `PtypString` (and the reverse) when the strict type match
    /// finds no candidate
    pub string_type_equivalence: bool,

    /// Compare area hints ignoring ASCII case
    pub case_insensitive_area: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            canonical_tie_break: true,
            string_type_equivalence: false,
            case_insensitive_area: false,
        }
    }
}

impl ResolverConfig {
    /// Only type and area hints resolve ambiguous ids; no tie-break, no leniency
    #[must_use]
    pub fn strict() -> Self {
        Self {
            canonical_tie_break: false,
            string_type_equivalence: false,
            case_insensitive_area: false,
        }
    }

    /// Everything enabled, suited to decoding ANSI stores and loosely labelled containers
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            canonical_tie_break: true,
            string_type_equivalence: true,
            case_insensitive_area: true,
        }
    }

    /// Compares an area hint against a definition's area under this configuration
    pub(crate) fn area_matches(&self, area: Option<&str>, hint: &str) -> bool {
        match area {
            Some(area) if self.case_insensitive_area => area.eq_ignore_ascii_case(hint),
            Some(area) => area == hint,
            None => false,
        }
    }
}
