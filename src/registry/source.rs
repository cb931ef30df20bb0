//! The versioned property corpus the registry is built from.
//!
//! The corpus ships as a JSON document (`data/properties.json`) rather than as code, so it can be
//! regenerated whenever [MS-OXPROPS] or [MS-PST] are revised. The build script validates the
//! file and copies it into `OUT_DIR`, from where [`DataSource::embedded`] includes it.
//!
//! # Layout
//!
//! ```json
//! {
//!   "format": 1,
//!   "corpus": "[MS-OXPROPS] 31.0, [MS-PST] 10.0",
//!   "entries": [
//!     { "id": "0x0037", "name": "PidTagSubject", "types": ["PtypString"],
//!       "area": "General Message Properties", "source": "[MS-OXCMSG] 2.2.1.46",
//!       "aliases": ["PR_SUBJECT", "PR_SUBJECT_W"] },
//!     { "id": "0x0086", "reserved": true, "origin": "undocumented" }
//!   ]
//! }
//! ```
//!
//! Only `id` is mandatory per entry. `types` may be empty for reserved entries only; that rule
//! and the uniqueness of `(id, name)` are enforced when the table is built.

use serde::{Deserialize, Serialize};

use crate::{registry::DefinitionOrigin, Error, Result};

/// The data format revision this crate reads
pub const FORMAT_VERSION: u32 = 1;

static EMBEDDED: &str = include_str!(concat!(env!("OUT_DIR"), "/properties.json"));

/// A single entry of the corpus, exactly as written in the data file.
///
/// Values are kept as strings here; the table builder turns them into typed
/// [`crate::PropertyDefinition`]s and reports malformed ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyRecord {
    /// Hexadecimal property id, `0x` prefixed
    pub id: String,
    /// Canonical name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Documented `Ptyp*` type names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    /// Functional area
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// Defining specification and section
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Alternate names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Explicitly reserved or unused id
    #[serde(default)]
    pub reserved: bool,
    /// Origin of the entry, protocol-defined by default
    #[serde(default)]
    pub origin: DefinitionOrigin,
    /// The inconsistent id literal found upstream, kept for the data-quality report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcribed_as: Option<String>,
}

/// A complete revision of the property corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataSource {
    /// Data format revision, see [`FORMAT_VERSION`]
    pub format: u32,
    /// Specification revisions the entries were taken from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus: Option<String>,
    /// All entries, in declaration order
    pub entries: Vec<PropertyRecord>,
}

impl DataSource {
    /// Parses the corpus that was embedded at build time.
    ///
    /// # Errors
    /// Returns an error only if the embedded document is damaged, which the build script rules
    /// out for regular builds.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED)
    }

    /// Parses a corpus from its JSON representation.
    ///
    /// # Arguments
    /// * `json` - The complete JSON document
    ///
    /// # Errors
    /// Returns [`Error::DataFormat`] for invalid JSON or a document of the wrong shape, and
    /// [`Error::UnsupportedFormat`] if the document declares another format revision.
    pub fn from_json(json: &str) -> Result<Self> {
        let source: DataSource = serde_json::from_str(json)?;
        if source.format != FORMAT_VERSION {
            return Err(Error::UnsupportedFormat {
                found: source.format,
                supported: FORMAT_VERSION,
            });
        }

        Ok(source)
    }

    /// Serializes the corpus back into its JSON representation
    ///
    /// # Errors
    /// Returns [`Error::DataFormat`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the corpus has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
