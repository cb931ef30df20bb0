//! One documented meaning of a property id.
//!
//! A [`PropertyDefinition`] is the leaf record of the registry. A numeric id may carry several of
//! them when the specifications assign the id more than one meaning; the registry table keeps
//! them in declaration order, protocol-defined entries first.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{PropertyTag, PropertyType};

/// Where a definition comes from.
///
/// Only used to rank candidates when nothing else separates them: exactly one
/// [`DefinitionOrigin::Canonical`] candidate wins the tie-break of the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionOrigin {
    /// Defined by a protocol specification ([MS-OXPROPS], [MS-PST], ...)
    #[default]
    Canonical,
    /// A historical redefinition, or an entry only "known on the internet"
    Legacy,
    /// Not documented anywhere, known by convention
    Undocumented,
}

impl fmt::Display for DefinitionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionOrigin::Canonical => write!(f, "canonical"),
            DefinitionOrigin::Legacy => write!(f, "legacy"),
            DefinitionOrigin::Undocumented => write!(f, "undocumented"),
        }
    }
}

/// A documented meaning of a 16-bit property id.
///
/// Immutable once constructed; all fields are reachable through accessors only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDefinition {
    id: u16,
    canonical_name: Option<String>,
    declared_types: BTreeSet<PropertyType>,
    area: Option<String>,
    source_ref: Option<String>,
    aliases: BTreeSet<String>,
    reserved: bool,
    origin: DefinitionOrigin,
    transcribed_as: Option<String>,
}

impl PropertyDefinition {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: u16,
        canonical_name: Option<String>,
        declared_types: BTreeSet<PropertyType>,
        area: Option<String>,
        source_ref: Option<String>,
        aliases: BTreeSet<String>,
        reserved: bool,
        origin: DefinitionOrigin,
        transcribed_as: Option<String>,
    ) -> Self {
        PropertyDefinition {
            id,
            canonical_name,
            declared_types,
            area,
            source_ref,
            aliases,
            reserved,
            origin,
            transcribed_as,
        }
    }

    /// The property id
    #[must_use]
    pub fn id(&self) -> u16 {
        self.id
    }

    /// The documented canonical name, absent for undocumented or reserved ids
    #[must_use]
    pub fn canonical_name(&self) -> Option<&str> {
        self.canonical_name.as_deref()
    }

    /// The canonical name, or the `unknown0x####` placeholder when there is none
    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        match &self.canonical_name {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => Cow::Owned(placeholder_name(self.id)),
        }
    }

    /// The documented property types, ordered by type code
    #[must_use]
    pub fn declared_types(&self) -> &BTreeSet<PropertyType> {
        &self.declared_types
    }

    /// Returns true if `prop_type` is one of the declared types
    #[must_use]
    pub fn declares(&self, prop_type: PropertyType) -> bool {
        self.declared_types.contains(&prop_type)
    }

    /// The functional area, e.g. "Address Book"
    #[must_use]
    pub fn area(&self) -> Option<&str> {
        self.area.as_deref()
    }

    /// The defining specification and section, e.g. "[MS-OXCMSG] 2.2.1.46"
    #[must_use]
    pub fn source_ref(&self) -> Option<&str> {
        self.source_ref.as_deref()
    }

    /// Alternate names (`PR_*`, `ptag*`, schema URIs)
    #[must_use]
    pub fn aliases(&self) -> &BTreeSet<String> {
        &self.aliases
    }

    /// True for ids explicitly marked unknown, reserved or unused
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        self.reserved
    }

    /// Where this definition comes from
    #[must_use]
    pub fn origin(&self) -> DefinitionOrigin {
        self.origin
    }

    /// True if this is a protocol-defined entry
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        self.origin == DefinitionOrigin::Canonical
    }

    /// The id literal the upstream corpus assigned to this property, if it disagrees with the
    /// documented id.
    ///
    /// Both the documented definition and the one catalogued under the assigned literal carry it,
    /// so streams written with either id resolve.
    #[must_use]
    pub fn transcribed_as(&self) -> Option<&str> {
        self.transcribed_as.as_deref()
    }

    /// Returns true if `name` is the canonical name (or placeholder) or one of the aliases
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name() == name || self.aliases.contains(name)
    }

    /// Builds the property tag of this definition for one of its types
    #[must_use]
    pub fn tag(&self, prop_type: PropertyType) -> PropertyTag {
        PropertyTag::with_type(self.id, prop_type)
    }
}

impl fmt::Display for PropertyDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:04X})", self.name(), self.id)
    }
}

/// Name given to a definition without a canonical name
pub(crate) fn placeholder_name(id: u16) -> String {
    format!("unknown0x{id:04X}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> PropertyDefinition {
        PropertyDefinition::new(
            0x0037,
            Some("PidTagSubject".to_string()),
            BTreeSet::from([PropertyType::String]),
            Some("General Message Properties".to_string()),
            Some("[MS-OXCMSG] 2.2.1.46".to_string()),
            BTreeSet::from(["PR_SUBJECT".to_string(), "PR_SUBJECT_W".to_string()]),
            false,
            DefinitionOrigin::Canonical,
            None,
        )
    }

    #[test]
    fn test_accessors() {
        let def = subject();
        assert_eq!(def.id(), 0x0037);
        assert_eq!(def.canonical_name(), Some("PidTagSubject"));
        assert_eq!(def.name(), "PidTagSubject");
        assert!(def.declares(PropertyType::String));
        assert!(!def.declares(PropertyType::String8));
        assert_eq!(def.area(), Some("General Message Properties"));
        assert!(def.is_canonical());
        assert!(!def.is_reserved());
        assert_eq!(def.tag(PropertyType::String).value(), 0x0037_001F);
    }

    #[test]
    fn test_is_named() {
        let def = subject();
        assert!(def.is_named("PidTagSubject"));
        assert!(def.is_named("PR_SUBJECT_W"));
        assert!(!def.is_named("pr_subject"));
    }

    #[test]
    fn test_placeholder_name() {
        let def = PropertyDefinition::new(
            0x0086,
            None,
            BTreeSet::new(),
            None,
            None,
            BTreeSet::new(),
            true,
            DefinitionOrigin::Undocumented,
            None,
        );
        assert_eq!(def.name(), "unknown0x0086");
        assert!(def.is_named("unknown0x0086"));
        assert_eq!(format!("{def}"), "unknown0x0086 (0x0086)");
    }

    #[test]
    fn test_origin_display() {
        assert_eq!(DefinitionOrigin::default(), DefinitionOrigin::Canonical);
        assert_eq!(DefinitionOrigin::Legacy.to_string(), "legacy");
    }
}
