//! The registry table: every documented definition, keyed by property id.
//!
//! [`RegistryTable::build`] materializes the records of a [`DataSource`] into
//! [`PropertyDefinition`]s and groups them by id. Construction is deterministic: ids iterate in
//! ascending order and the definitions of one id keep the order in which the data source declares
//! them. Any integrity problem aborts the build, a partially built table is never returned.
//!
//! # Integrity checks
//!
//! - Every id is a `0x`-prefixed 16-bit hexadecimal literal
//! - Every type name is a documented `Ptyp*` name
//! - Non-reserved entries declare at least one type
//! - Names and aliases are not empty
//! - No two entries claim the same `(id, name)` pair ([`Error::DuplicateDefinition`])

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use log::debug;
use sha1::{Digest, Sha1};

use crate::{
    registry::{hexid::parse_hex_id, DataSource, PropertyDefinition, PropertyRecord},
    types::PropertyType,
    Error, Result,
};

/// SHA-1 over the canonical rendering of a [`RegistryTable`].
///
/// Two tables built from the same data source always share a fingerprint, so it identifies a
/// corpus revision independently of the formatting of the data file.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub [u8; 20]);

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({self})")
    }
}

/// Immutable mapping from property id to its ordered definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryTable {
    entries: BTreeMap<u16, Vec<PropertyDefinition>>,
    corpus: Option<String>,
}

impl RegistryTable {
    /// Builds the table from a data source.
    ///
    /// # Arguments
    /// * `source` - The corpus to materialize
    ///
    /// # Errors
    /// Returns [`Error::MalformedEntry`] for an entry that fails the schema checks and
    /// [`Error::DuplicateDefinition`] for a repeated `(id, name)` pair.
    pub fn build(source: &DataSource) -> Result<Self> {
        let mut entries: BTreeMap<u16, Vec<PropertyDefinition>> = BTreeMap::new();
        let mut seen: HashSet<(u16, String)> = HashSet::with_capacity(source.len());

        for (index, record) in source.entries.iter().enumerate() {
            let definition = materialize(index, record)?;

            if !seen.insert((definition.id(), definition.name().into_owned())) {
                return Err(Error::DuplicateDefinition {
                    id: definition.id(),
                    name: definition.name().into_owned(),
                });
            }

            entries.entry(definition.id()).or_default().push(definition);
        }

        debug!(
            "Built property table: {} ids, {} definitions",
            entries.len(),
            source.len()
        );

        Ok(RegistryTable {
            entries,
            corpus: source.corpus.clone(),
        })
    }

    /// Returns the definitions of `id` in declaration order
    #[must_use]
    pub fn get(&self, id: u16) -> Option<&[PropertyDefinition]> {
        self.entries.get(&id).map(Vec::as_slice)
    }

    /// Returns true if `id` has at least one definition
    #[must_use]
    pub fn contains(&self, id: u16) -> bool {
        self.entries.contains_key(&id)
    }

    /// Iterates over all catalogued ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = u16> + '_ {
        self.entries.keys().copied()
    }

    /// Iterates over `(id, definitions)` in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (u16, &[PropertyDefinition])> {
        self.entries.iter().map(|(id, defs)| (*id, defs.as_slice()))
    }

    /// Iterates over every definition, in id order and then declaration order
    pub fn definitions(&self) -> impl Iterator<Item = &PropertyDefinition> {
        self.entries.values().flatten()
    }

    /// Number of catalogued ids
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no id is catalogued
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of definitions over all ids
    #[must_use]
    pub fn definition_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// The specification revisions named by the data source
    #[must_use]
    pub fn corpus(&self) -> Option<&str> {
        self.corpus.as_deref()
    }

    /// Computes the fingerprint of the table content.
    ///
    /// Each definition contributes one line with all of its fields; sets are rendered in their
    /// sorted order.
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = Sha1::new();

        for def in self.definitions() {
            let types: Vec<String> = def
                .declared_types()
                .iter()
                .map(|t| format!("{:04X}", t.code()))
                .collect();
            let aliases: Vec<&str> = def.aliases().iter().map(String::as_str).collect();

            let line = format!(
                "{:04X}|{}|{}|{}|{}|{}|{}|{}|{}\n",
                def.id(),
                def.canonical_name().unwrap_or(""),
                types.join(","),
                def.area().unwrap_or(""),
                def.source_ref().unwrap_or(""),
                aliases.join(","),
                def.is_reserved(),
                def.origin(),
                def.transcribed_as().unwrap_or(""),
            );
            hasher.update(line.as_bytes());
        }

        let mut digest = [0u8; 20];
        digest.copy_from_slice(&hasher.finalize());
        Fingerprint(digest)
    }
}

/// Turns one raw record into a definition, enforcing the schema rules.
fn materialize(index: usize, record: &PropertyRecord) -> Result<PropertyDefinition> {
    let Some(id) = parse_hex_id(&record.id) else {
        return Err(malformed_entry!(
            index,
            "invalid property id literal '{}'",
            record.id
        ));
    };

    if record.name.as_deref().is_some_and(str::is_empty) {
        return Err(malformed_entry!(index, "empty name for id 0x{:04X}", id));
    }

    let mut declared_types = BTreeSet::new();
    for type_name in &record.types {
        match type_name.parse::<PropertyType>() {
            Ok(prop_type) => {
                declared_types.insert(prop_type);
            }
            Err(message) => return Err(malformed_entry!(index, "0x{:04X}: {}", id, message)),
        }
    }

    if declared_types.is_empty() && !record.reserved {
        return Err(malformed_entry!(
            index,
            "0x{:04X} ({}) declares no property type",
            id,
            record.name.as_deref().unwrap_or("unnamed")
        ));
    }

    let mut aliases = BTreeSet::new();
    for alias in &record.aliases {
        if alias.is_empty() {
            return Err(malformed_entry!(index, "empty alias for id 0x{:04X}", id));
        }
        aliases.insert(alias.clone());
    }

    Ok(PropertyDefinition::new(
        id,
        record.name.clone(),
        declared_types,
        record.area.clone(),
        record.source.clone(),
        aliases,
        record.reserved,
        record.origin,
        record.transcribed_as.clone(),
    ))
}
