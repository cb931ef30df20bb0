use thiserror::Error;

macro_rules! malformed_entry {
    // Single string version
    ($entry:expr, $msg:expr) => {
        crate::Error::MalformedEntry {
            entry: $entry,
            message: $msg.to_string(),
        }
    };

    // Format string with arguments version
    ($entry:expr, $fmt:expr, $($arg:tt)*) => {
        crate::Error::MalformedEntry {
            entry: $entry,
            message: format!($fmt, $($arg)*),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every variant describes a problem with the property corpus the registry is built from. Once a
/// [`crate::PropertyRegistry`] exists, none of its queries can fail: unknown and ambiguous ids are
/// ordinary [`crate::Resolution`] values.
///
/// # Error Categories
///
/// ## Table integrity
/// - [`Error::DuplicateDefinition`] - Two entries claim the same `(id, name)` pair
/// - [`Error::MalformedEntry`] - An entry fails the minimal schema checks
///
/// ## Data source
/// - [`Error::DataFormat`] - The data file is not valid JSON or has the wrong shape
/// - [`Error::UnsupportedFormat`] - The data file declares a format revision this crate can't read
///
/// # Examples
///
/// ```rust
/// use mapiprops::{DataSource, Error, PropertyRegistry};
///
/// let json = r#"{ "format": 1, "entries": [
///     { "id": "0x0037", "name": "PidTagSubject", "types": [] }
/// ] }"#;
///
/// match DataSource::from_json(json).and_then(|source| PropertyRegistry::from_source(&source)) {
///     Ok(_) => println!("registry built"),
///     Err(Error::MalformedEntry { entry, message }) => {
///         eprintln!("entry {entry}: {message}");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Two entries of the corpus claim the identical `(id, canonical name)` pair.
    ///
    /// Several documented properties legitimately share one numeric id, so a repeated id alone is
    /// never an error. Repeating the same name on the same id is a true duplicate in the source
    /// data and aborts the build of the table.
    #[error("Duplicate definition of {name} for property id 0x{id:04X}")]
    DuplicateDefinition {
        /// The property id both entries were declared with
        id: u16,
        /// The canonical name both entries carry
        name: String,
    },

    /// An entry of the corpus failed the minimal schema checks.
    ///
    /// Raised for a non-reserved entry without any declared type, an id that is not a 16-bit
    /// hexadecimal literal, or a type name that is not a documented `Ptyp*` name.
    ///
    /// # Fields
    ///
    /// * `entry` - Zero-based position of the offending entry in the data file
    /// * `message` - Detailed description of what was malformed
    #[error("Malformed entry #{entry}: {message}")]
    MalformedEntry {
        /// Zero-based position of the entry in the data source
        entry: usize,
        /// The message to be printed for the MalformedEntry error
        message: String,
    },

    /// The data source could not be decoded.
    ///
    /// Wraps the message of the underlying JSON error, which covers syntax errors as well as
    /// documents whose shape does not match the expected record layout.
    #[error("Invalid property data - {0}")]
    DataFormat(String),

    /// The data source declares a format revision this crate does not understand.
    #[error("Unsupported property data format {found}, expected {supported}")]
    UnsupportedFormat {
        /// The format revision found in the data source
        found: u32,
        /// The format revision this crate reads
        supported: u32,
    },
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::DataFormat(error.to_string())
    }
}
