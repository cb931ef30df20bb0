//! Self-check diagnostics for a built registry.
//!
//! A registry that passed construction is structurally valid, but the corpus it came from can
//! still carry entries worth a second look: aliases reused by unrelated ids, ids outside the
//! tagged range, names that don't follow the `PidTag`/`PidLid` convention, or ids that upstream
//! transcribed inconsistently. None of these stop the registry from being built. They are
//! collected into [`Diagnostics`], logged once while building, and kept on the registry for
//! tooling.
//!
//! # Key Components
//!
//! - [`Diagnostics`] - Container for diagnostic entries
//! - [`Diagnostic`] - Individual entry with severity, category and the id it concerns
//! - [`DiagnosticSeverity`] - Severity level (Info, Warning)
//! - [`DiagnosticCategory`] - What kind of finding it is
//!
//! # Examples
//!
//! ```rust
//! use mapiprops::registry::DiagnosticCategory;
//!
//! let registry = mapiprops::registry()?;
//! let diagnostics = registry.diagnostics();
//!
//! for entry in diagnostics.by_category(DiagnosticCategory::Transcription) {
//!     println!("{entry}");
//! }
//! assert!(!diagnostics.for_id(0x3005).is_empty());
//! # Ok::<(), mapiprops::Error>(())
//! ```

use std::collections::BTreeMap;
use std::fmt::{self, Write};

use log::{info, warn};

use crate::{
    registry::{hexid::parse_hex_id, names::NameIndex, RegistryTable},
    types::PropertyTag,
};

/// Severity level of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Unusual but intentional content, such as a recorded transcription anomaly
    Info,

    /// Content that is likely to confuse a reverse lookup or a resolver caller
    Warning,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Info => write!(f, "INFO"),
            DiagnosticSeverity::Warning => write!(f, "WARN"),
        }
    }
}

/// Category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    /// A name or alias resolves to definitions under more than one id.
    Alias,

    /// A definition sits in the named-property range 0x8000-0xFFFE.
    ///
    /// Ids in that range are assigned per store from the name-to-id map, so a fixed
    /// definition there only holds for the store it was observed in.
    IdRange,

    /// A canonical name doesn't start with `PidTag` or `PidLid`.
    Naming,

    /// A non-canonical definition is listed before a canonical one of the same id.
    Ordering,

    /// A reserved id declares value types.
    Reserved,

    /// Upstream assigned the property an id that disagrees with the documented one.
    Transcription,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Alias => write!(f, "Alias"),
            DiagnosticCategory::IdRange => write!(f, "IdRange"),
            DiagnosticCategory::Naming => write!(f, "Naming"),
            DiagnosticCategory::Ordering => write!(f, "Ordering"),
            DiagnosticCategory::Reserved => write!(f, "Reserved"),
            DiagnosticCategory::Transcription => write!(f, "Transcription"),
        }
    }
}

/// A single diagnostic entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level of this diagnostic.
    pub severity: DiagnosticSeverity,

    /// What kind of finding this is.
    pub category: DiagnosticCategory,

    /// Human-readable description of the finding.
    pub message: String,

    /// The property id concerned, if the finding is about a single id.
    pub id: Option<u16>,
}

impl Diagnostic {
    /// Creates a new diagnostic entry.
    ///
    /// # Arguments
    ///
    /// * `severity` - Severity level of the diagnostic
    /// * `category` - Category of the finding
    /// * `message` - Human-readable description
    pub fn new(
        severity: DiagnosticSeverity,
        category: DiagnosticCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            id: None,
        }
    }

    /// Attaches the property id the finding is about.
    #[must_use]
    pub fn with_id(mut self, id: u16) -> Self {
        self.id = Some(id);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.category, self.message)?;

        if let Some(id) = self.id {
            write!(f, " (id: 0x{id:04X})")?;
        }

        Ok(())
    }
}

/// Container of diagnostic entries, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates a new empty diagnostics container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an informational diagnostic about `id`.
    pub fn info(&mut self, category: DiagnosticCategory, id: u16, message: impl Into<String>) {
        self.push(Diagnostic::new(DiagnosticSeverity::Info, category, message).with_id(id));
    }

    /// Adds a warning diagnostic about `id`.
    pub fn warning(&mut self, category: DiagnosticCategory, id: u16, message: impl Into<String>) {
        self.push(Diagnostic::new(DiagnosticSeverity::Warning, category, message).with_id(id));
    }

    /// Adds a diagnostic entry directly and logs it.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            DiagnosticSeverity::Warning => warn!("{diagnostic}"),
            DiagnosticSeverity::Info => info!("{diagnostic}"),
        }
        self.entries.push(diagnostic);
    }

    /// Returns true if any diagnostics have been collected.
    pub fn has_any(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Returns true if any warning-level diagnostics have been collected.
    pub fn has_warnings(&self) -> bool {
        self.entries
            .iter()
            .any(|d| d.severity == DiagnosticSeverity::Warning)
    }

    /// Returns the total number of diagnostics.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of warning-level diagnostics.
    pub fn warning_count(&self) -> usize {
        self.severity_count(DiagnosticSeverity::Warning)
    }

    /// Returns the number of info-level diagnostics.
    pub fn info_count(&self) -> usize {
        self.severity_count(DiagnosticSeverity::Info)
    }

    fn severity_count(&self, severity: DiagnosticSeverity) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Returns an iterator over all diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Returns all warnings.
    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
            .collect()
    }

    /// Returns diagnostics filtered by category.
    pub fn by_category(&self, category: DiagnosticCategory) -> Vec<&Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.category == category)
            .collect()
    }

    /// Returns diagnostics about a single id.
    pub fn for_id(&self, id: u16) -> Vec<&Diagnostic> {
        self.entries.iter().filter(|d| d.id == Some(id)).collect()
    }

    /// Formats a summary of all diagnostics for display.
    pub fn summary(&self) -> String {
        let mut output = String::new();

        let _ = writeln!(
            output,
            "Diagnostics: {} warning(s), {} info(s)",
            self.warning_count(),
            self.info_count()
        );

        for diag in &self.entries {
            let _ = writeln!(output, "  {diag}");
        }

        output
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// Runs the self-check over a built table.
pub(crate) fn self_check(table: &RegistryTable, names: &NameIndex) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    for (id, definitions) in table.iter() {
        if PropertyTag::new(id, 0).is_named() {
            diagnostics.warning(
                DiagnosticCategory::IdRange,
                id,
                format!(
                    "{} is defined in the named-property range",
                    definitions[0]
                ),
            );
        }

        let first_canonical = definitions.iter().position(|d| d.is_canonical());
        if let Some(position) = first_canonical.filter(|&p| p > 0) {
            diagnostics.info(
                DiagnosticCategory::Ordering,
                id,
                format!(
                    "{} ({}) is listed before canonical {}",
                    definitions[0].name(),
                    definitions[0].origin(),
                    definitions[position].name()
                ),
            );
        }

        for definition in definitions {
            if let Some(name) = definition.canonical_name() {
                if !name.starts_with("PidTag") && !name.starts_with("PidLid") {
                    diagnostics.info(
                        DiagnosticCategory::Naming,
                        id,
                        format!("'{name}' does not follow the PidTag/PidLid naming"),
                    );
                }
            }

            if definition.is_reserved() && !definition.declared_types().is_empty() {
                diagnostics.info(
                    DiagnosticCategory::Reserved,
                    id,
                    format!(
                        "reserved {definition} declares {} type(s)",
                        definition.declared_types().len()
                    ),
                );
            }

            if let Some(literal) = definition.transcribed_as() {
                let message = if parse_hex_id(literal) == Some(id) {
                    format!("{definition} is catalogued under the id assigned upstream")
                } else {
                    format!("{definition} was transcribed upstream as {literal}")
                };
                diagnostics.info(DiagnosticCategory::Transcription, id, message);
            }
        }
    }

    // HashMap order is not stable, collect before reporting
    let mut shared: BTreeMap<&str, Vec<u16>> = BTreeMap::new();
    for (name, slots) in names.shared() {
        // assigned and documented ids of one property, already reported as a transcription
        let transcribed = slots.iter().all(|&(id, position)| {
            table
                .get(id)
                .and_then(|defs| defs.get(position))
                .is_some_and(|def| def.transcribed_as().is_some())
        });
        if transcribed {
            continue;
        }

        let mut ids: Vec<u16> = slots.iter().map(|&(id, _)| id).collect();
        ids.dedup();
        if ids.len() > 1 {
            shared.insert(name, ids);
        }
    }
    for (name, ids) in shared {
        let rendered: Vec<String> = ids.iter().map(|id| format!("0x{id:04X}")).collect();
        diagnostics.push(
            Diagnostic::new(
                DiagnosticSeverity::Warning,
                DiagnosticCategory::Alias,
                format!("'{name}' is shared by {}", rendered.join(", ")),
            ),
        );
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{DataSource, DefinitionOrigin, PropertyRecord, FORMAT_VERSION};

    fn record(id: &str, name: Option<&str>, origin: DefinitionOrigin) -> PropertyRecord {
        PropertyRecord {
            id: id.to_string(),
            name: name.map(str::to_string),
            types: vec!["PtypInteger32".to_string()],
            area: None,
            source: None,
            aliases: Vec::new(),
            reserved: false,
            origin,
            transcribed_as: None,
        }
    }

    fn check(entries: Vec<PropertyRecord>) -> Diagnostics {
        let table = RegistryTable::build(&DataSource {
            format: FORMAT_VERSION,
            corpus: None,
            entries,
        })
        .unwrap();
        let names = NameIndex::build(&table);
        self_check(&table, &names)
    }

    #[test]
    fn test_clean_table() {
        let diagnostics = check(vec![
            record("0x0E08", Some("PidTagMessageSize"), DefinitionOrigin::Canonical),
            record("0x0E08", Some("PidTagMessageSizeExtended"), DefinitionOrigin::Canonical),
        ]);
        assert!(!diagnostics.has_any());
        assert_eq!(diagnostics.count(), 0);
    }

    #[test]
    fn test_transcription_and_ordering() {
        let mut depth = record("0x3005", Some("PidTagDepth"), DefinitionOrigin::Canonical);
        depth.transcribed_as = Some("0x0305".to_string());

        let diagnostics = check(vec![
            depth,
            record("0x6670", Some("PidTagContactAddressBookFolderEntryId"), DefinitionOrigin::Legacy),
            record("0x6670", Some("PidTagLongTermEntryIdFromTable"), DefinitionOrigin::Canonical),
        ]);

        let transcription = diagnostics.by_category(DiagnosticCategory::Transcription);
        assert_eq!(transcription.len(), 1);
        assert_eq!(transcription[0].id, Some(0x3005));
        assert!(transcription[0].message.contains("0x0305"));

        let ordering = diagnostics.for_id(0x6670);
        assert_eq!(ordering.len(), 1);
        assert_eq!(ordering[0].category, DiagnosticCategory::Ordering);
        assert!(!diagnostics.has_warnings());
        assert_eq!(diagnostics.info_count(), 2);
    }

    #[test]
    fn test_assigned_and_documented_ids() {
        let mut assigned = record("0x0305", Some("PidTagDepth"), DefinitionOrigin::Legacy);
        assigned.transcribed_as = Some("0x0305".to_string());
        assigned.aliases = vec!["PR_DEPTH".to_string()];
        let mut documented = record("0x3005", Some("PidTagDepth"), DefinitionOrigin::Canonical);
        documented.transcribed_as = Some("0x0305".to_string());
        documented.aliases = vec!["PR_DEPTH".to_string()];

        let diagnostics = check(vec![assigned, documented]);

        let transcription = diagnostics.by_category(DiagnosticCategory::Transcription);
        assert_eq!(transcription.len(), 2);
        assert_eq!(transcription[0].id, Some(0x0305));
        assert!(transcription[0].message.contains("assigned upstream"));
        assert_eq!(transcription[1].id, Some(0x3005));
        assert!(transcription[1].message.contains("transcribed upstream as 0x0305"));

        // the shared name is the anomaly itself, not an alias clash
        assert!(diagnostics.by_category(DiagnosticCategory::Alias).is_empty());
        assert!(!diagnostics.has_warnings());
    }

    #[test]
    fn test_shared_alias_and_range() {
        let mut entry_id = record("0x0FFF", Some("PidTagEntryId"), DefinitionOrigin::Canonical);
        entry_id.aliases = vec!["PR_ENTRYID".to_string()];
        let mut other = record("0x8001", Some("PidLidSomething"), DefinitionOrigin::Undocumented);
        other.aliases = vec!["PR_ENTRYID".to_string()];

        let diagnostics = check(vec![entry_id, other]);

        let alias = diagnostics.by_category(DiagnosticCategory::Alias);
        assert_eq!(alias.len(), 1);
        assert!(alias[0].message.contains("0x0FFF, 0x8001"));
        assert_eq!(alias[0].id, None);

        assert_eq!(diagnostics.by_category(DiagnosticCategory::IdRange).len(), 1);
        assert_eq!(diagnostics.warning_count(), 2);
    }

    #[test]
    fn test_alias_within_one_id_is_not_shared() {
        let mut first = record("0x6841", Some("PidTagScheduleInfoResourceType"), DefinitionOrigin::Canonical);
        first.aliases = vec!["PR_6841".to_string()];
        let mut second = record("0x6841", Some("PidTagSearchFolderTemplateId"), DefinitionOrigin::Canonical);
        second.aliases = vec!["PR_6841".to_string()];

        assert!(check(vec![first, second])
            .by_category(DiagnosticCategory::Alias)
            .is_empty());
    }

    #[test]
    fn test_naming_and_reserved() {
        let mut reserved = record("0x0086", None, DefinitionOrigin::Canonical);
        reserved.reserved = true;

        let diagnostics = check(vec![
            record("0x0E1D", Some("PR_NORMALIZED_SUBJECT"), DefinitionOrigin::Legacy),
            reserved,
        ]);

        assert_eq!(diagnostics.by_category(DiagnosticCategory::Naming).len(), 1);
        assert_eq!(diagnostics.by_category(DiagnosticCategory::Reserved).len(), 1);

        let summary = diagnostics.summary();
        assert!(summary.starts_with("Diagnostics: 0 warning(s), 2 info(s)"));
        assert!(summary.contains("[INFO] Naming"));
    }
}
