//! Index of ids that carry more than one definition.
//!
//! Several ids are documented with more than one meaning: a property was redefined by a later
//! protocol, one id is multiplexed between unrelated features (free/busy data and search folders
//! share 0x6841, for example), or a legacy name survived next to the canonical one. The
//! [`AmbiguityIndex`] records every such id together with how hard it is to tell the meanings
//! apart:
//!
//! - [`AmbiguityKind::TypeDisjoint`] - no two candidates declare a common type, so the type of the
//!   observed value picks the meaning
//! - [`AmbiguityKind::TypeOverlapping`] - at least two candidates share a type, so only a context
//!   hint (the area) or the canonical tie-break can separate them
//!
//! The index is a pure function of the [`RegistryTable`]; building it twice from the same table
//! yields the same classification.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use log::debug;

use crate::{
    registry::{PropertyDefinition, RegistryTable},
    types::PropertyType,
};

/// How the candidates of an ambiguous id relate to each other by type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmbiguityKind {
    /// The declared type sets are pairwise disjoint
    TypeDisjoint,
    /// At least two candidates declare a common type
    TypeOverlapping,
}

impl fmt::Display for AmbiguityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmbiguityKind::TypeDisjoint => write!(f, "type-disjoint"),
            AmbiguityKind::TypeOverlapping => write!(f, "type-overlapping"),
        }
    }
}

/// Classification of a single ambiguous id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
    id: u16,
    kind: AmbiguityKind,
    candidates: Vec<String>,
    shared_types: BTreeSet<PropertyType>,
}

impl Ambiguity {
    fn classify(id: u16, definitions: &[PropertyDefinition]) -> Self {
        let mut shared_types = BTreeSet::new();

        for (i, left) in definitions.iter().enumerate() {
            for right in &definitions[i + 1..] {
                shared_types.extend(
                    left.declared_types()
                        .intersection(right.declared_types())
                        .copied(),
                );
            }
        }

        let kind = if shared_types.is_empty() {
            AmbiguityKind::TypeDisjoint
        } else {
            AmbiguityKind::TypeOverlapping
        };

        Ambiguity {
            id,
            kind,
            candidates: definitions.iter().map(|d| d.name().into_owned()).collect(),
            shared_types,
        }
    }

    /// The ambiguous property id
    #[must_use]
    pub fn id(&self) -> u16 {
        self.id
    }

    /// The classification
    #[must_use]
    pub fn kind(&self) -> AmbiguityKind {
        self.kind
    }

    /// Names of the candidates, in table order
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Number of candidates
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Types declared by more than one candidate, empty for [`AmbiguityKind::TypeDisjoint`]
    #[must_use]
    pub fn shared_types(&self) -> &BTreeSet<PropertyType> {
        &self.shared_types
    }

    /// Returns true if the observed value type alone is enough to pick a candidate
    #[must_use]
    pub fn is_type_disjoint(&self) -> bool {
        self.kind == AmbiguityKind::TypeDisjoint
    }
}

/// Every ambiguous id of a [`RegistryTable`], with its classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmbiguityIndex {
    entries: BTreeMap<u16, Ambiguity>,
}

impl AmbiguityIndex {
    /// Derives the index from a table.
    ///
    /// # Arguments
    /// * `table` - The registry table to inspect
    #[must_use]
    pub fn build(table: &RegistryTable) -> Self {
        let entries: BTreeMap<u16, Ambiguity> = table
            .iter()
            .filter(|(_, definitions)| definitions.len() > 1)
            .map(|(id, definitions)| (id, Ambiguity::classify(id, definitions)))
            .collect();

        let index = AmbiguityIndex { entries };
        debug!(
            "Built ambiguity index: {} ids ({} type-disjoint, {} type-overlapping)",
            index.len(),
            index.count(AmbiguityKind::TypeDisjoint),
            index.count(AmbiguityKind::TypeOverlapping)
        );
        index
    }

    /// Returns the classification of `id`, `None` if it is not ambiguous
    #[must_use]
    pub fn get(&self, id: u16) -> Option<&Ambiguity> {
        self.entries.get(&id)
    }

    /// Returns true if `id` has more than one candidate
    #[must_use]
    pub fn is_ambiguous(&self, id: u16) -> bool {
        self.entries.contains_key(&id)
    }

    /// Iterates over all ambiguous ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &Ambiguity> {
        self.entries.values()
    }

    /// Number of ambiguous ids
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no id is ambiguous
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of ambiguous ids of the given kind
    #[must_use]
    pub fn count(&self, kind: AmbiguityKind) -> usize {
        self.entries.values().filter(|a| a.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{DataSource, DefinitionOrigin, PropertyRecord, FORMAT_VERSION};

    fn record(id: &str, name: &str, types: &[&str]) -> PropertyRecord {
        PropertyRecord {
            id: id.to_string(),
            name: Some(name.to_string()),
            types: types.iter().map(|t| t.to_string()).collect(),
            area: None,
            source: None,
            aliases: Vec::new(),
            reserved: false,
            origin: DefinitionOrigin::Canonical,
            transcribed_as: None,
        }
    }

    fn table(entries: Vec<PropertyRecord>) -> RegistryTable {
        RegistryTable::build(&DataSource {
            format: FORMAT_VERSION,
            corpus: None,
            entries,
        })
        .unwrap()
    }

    #[test]
    fn test_single_definitions_are_not_indexed() {
        let index = AmbiguityIndex::build(&table(vec![
            record("0x0037", "PidTagSubject", &["PtypString"]),
            record("0x0E06", "PidTagMessageDeliveryTime", &["PtypTime"]),
        ]));
        assert!(index.is_empty());
        assert!(!index.is_ambiguous(0x0037));
    }

    #[test]
    fn test_type_disjoint() {
        let index = AmbiguityIndex::build(&table(vec![
            record("0x0E08", "PidTagMessageSize", &["PtypInteger32"]),
            record("0x0E08", "PidTagMessageSizeExtended", &["PtypInteger64"]),
        ]));

        let ambiguity = index.get(0x0E08).unwrap();
        assert_eq!(ambiguity.kind(), AmbiguityKind::TypeDisjoint);
        assert!(ambiguity.is_type_disjoint());
        assert!(ambiguity.shared_types().is_empty());
        assert_eq!(
            ambiguity.candidates(),
            ["PidTagMessageSize", "PidTagMessageSizeExtended"]
        );
    }

    #[test]
    fn test_type_overlapping() {
        let index = AmbiguityIndex::build(&table(vec![
            record("0x6841", "PidTagScheduleInfoResourceType", &["PtypInteger32"]),
            record("0x6841", "PidTagSearchFolderTemplateId", &["PtypInteger32"]),
        ]));

        let ambiguity = index.get(0x6841).unwrap();
        assert_eq!(ambiguity.kind(), AmbiguityKind::TypeOverlapping);
        assert_eq!(
            ambiguity.shared_types(),
            &BTreeSet::from([PropertyType::Integer32])
        );
        assert_eq!(index.count(AmbiguityKind::TypeOverlapping), 1);
        assert_eq!(index.count(AmbiguityKind::TypeDisjoint), 0);
    }

    #[test]
    fn test_partial_overlap_is_overlapping() {
        let index = AmbiguityIndex::build(&table(vec![
            record("0x6845", "PidTagScheduleInfoDelegateEntryIds", &["PtypMultipleBinary"]),
            record("0x6845", "PidTagWlinkGroupClsid", &["PtypBinary"]),
            record("0x6845", "PidTagSomethingElse", &["PtypBinary", "PtypString"]),
        ]));

        let ambiguity = index.get(0x6845).unwrap();
        assert_eq!(ambiguity.kind(), AmbiguityKind::TypeOverlapping);
        assert_eq!(ambiguity.candidate_count(), 3);
        assert_eq!(
            ambiguity.shared_types(),
            &BTreeSet::from([PropertyType::Binary])
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let t = table(vec![
            record("0x0E08", "PidTagMessageSize", &["PtypInteger32"]),
            record("0x0E08", "PidTagMessageSizeExtended", &["PtypInteger64"]),
            record("0x6841", "PidTagScheduleInfoResourceType", &["PtypInteger32"]),
            record("0x6841", "PidTagSearchFolderTemplateId", &["PtypInteger32"]),
        ]);
        assert_eq!(AmbiguityIndex::build(&t), AmbiguityIndex::build(&t));
        assert_eq!(
            AmbiguityIndex::build(&t)
                .iter()
                .map(Ambiguity::id)
                .collect::<Vec<_>>(),
            vec![0x0E08, 0x6841]
        );
    }
}
