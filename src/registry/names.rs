//! Reverse lookup from names to definitions.
//!
//! Canonical names, `unknown0x####` placeholders and every alias are indexed. A name may point at
//! several definitions: legacy aliases are sometimes shared between ids, and the same canonical
//! name can be documented under two ids. Matches are kept in table order (ascending id, then
//! declaration order).

use std::collections::{BTreeSet, HashMap};

use crate::registry::RegistryTable;

/// Position of a definition inside the registry table: `(id, index within the id)`
pub(crate) type Slot = (u16, usize);

/// Name index over a [`RegistryTable`]
#[derive(Debug, Clone, Default)]
pub(crate) struct NameIndex {
    exact: HashMap<String, Vec<Slot>>,
    folded: HashMap<String, Vec<Slot>>,
}

impl NameIndex {
    pub(crate) fn build(table: &RegistryTable) -> Self {
        let mut index = NameIndex::default();

        for (id, definitions) in table.iter() {
            for (position, definition) in definitions.iter().enumerate() {
                let slot = (id, position);

                let mut names: BTreeSet<String> = definition.aliases().clone();
                names.insert(definition.name().into_owned());

                let folded: BTreeSet<String> =
                    names.iter().map(|name| name.to_ascii_lowercase()).collect();

                for name in names {
                    index.exact.entry(name).or_default().push(slot);
                }
                for name in folded {
                    index.folded.entry(name).or_default().push(slot);
                }
            }
        }

        index
    }

    /// Exact, case-sensitive match
    pub(crate) fn lookup(&self, name: &str) -> &[Slot] {
        self.exact.get(name).map_or(&[], Vec::as_slice)
    }

    /// ASCII case-insensitive match
    pub(crate) fn lookup_ignore_case(&self, name: &str) -> &[Slot] {
        self.folded
            .get(&name.to_ascii_lowercase())
            .map_or(&[], Vec::as_slice)
    }

    /// Number of distinct names
    pub(crate) fn len(&self) -> usize {
        self.exact.len()
    }

    /// Names pointing at more than one definition
    pub(crate) fn shared(&self) -> impl Iterator<Item = (&str, &[Slot])> {
        self.exact
            .iter()
            .filter(|(_, slots)| slots.len() > 1)
            .map(|(name, slots)| (name.as_str(), slots.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{DataSource, DefinitionOrigin, PropertyRecord, FORMAT_VERSION};

    fn record(id: &str, name: Option<&str>, aliases: &[&str]) -> PropertyRecord {
        PropertyRecord {
            id: id.to_string(),
            name: name.map(str::to_string),
            types: vec!["PtypBinary".to_string()],
            area: None,
            source: None,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            reserved: false,
            origin: DefinitionOrigin::Canonical,
            transcribed_as: None,
        }
    }

    fn index(entries: Vec<PropertyRecord>) -> NameIndex {
        let table = RegistryTable::build(&DataSource {
            format: FORMAT_VERSION,
            corpus: None,
            entries,
        })
        .unwrap();
        NameIndex::build(&table)
    }

    #[test]
    fn test_lookup_names_and_aliases() {
        let index = index(vec![
            record("0x0FFF", Some("PidTagEntryId"), &["PR_ENTRYID", "ptagEntryId"]),
            record("0x0FF9", Some("PidTagRecordKey"), &["PR_RECORD_KEY"]),
        ]);

        assert_eq!(index.lookup("PidTagEntryId"), &[(0x0FFF, 0)]);
        assert_eq!(index.lookup("ptagEntryId"), &[(0x0FFF, 0)]);
        assert_eq!(index.lookup("PR_RECORD_KEY"), &[(0x0FF9, 0)]);
        assert!(index.lookup("pr_record_key").is_empty());
        assert_eq!(index.lookup_ignore_case("pr_record_key"), &[(0x0FF9, 0)]);
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn test_shared_alias_in_table_order() {
        let index = index(vec![
            record("0x6670", Some("PidTagLongTermEntryIdFromTable"), &["PR_LTID"]),
            record("0x0FFF", Some("PidTagEntryId"), &["PR_LTID"]),
            record("0x6670", Some("PidTagOther"), &["PR_LTID"]),
        ]);

        assert_eq!(
            index.lookup("PR_LTID"),
            &[(0x0FFF, 0), (0x6670, 0), (0x6670, 1)]
        );
        let shared: Vec<_> = index.shared().map(|(name, _)| name).collect();
        assert_eq!(shared, vec!["PR_LTID"]);
    }

    #[test]
    fn test_placeholder_names() {
        let index = index(vec![record("0x6841", None, &[])]);
        assert_eq!(index.lookup("unknown0x6841"), &[(0x6841, 0)]);
        assert_eq!(index.lookup_ignore_case("UNKNOWN0X6841"), &[(0x6841, 0)]);
    }

    #[test]
    fn test_alias_equal_to_name_counts_once() {
        let index = index(vec![record("0x0037", Some("PidTagSubject"), &["PidTagSubject"])]);
        assert_eq!(index.lookup("PidTagSubject"), &[(0x0037, 0)]);
    }
}
