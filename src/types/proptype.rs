//! MAPI property type codes.
//!
//! Every MAPI property value is tagged with a 16-bit type code ([MS-OXCDATA] §2.11.1). This
//! module models the documented codes as the closed enum [`PropertyType`]. It is the one place
//! where the crate keeps sum-type ergonomics. Property *ids* are open-ended data and live in the
//! registry table instead.
//!
//! Multi-valued types set the `0x1000` bit on top of their element type. Columns of contents
//! tables that expand a multi-valued property into one row per value additionally set `0x2000`
//! (see [`TypeFlags`]). [`PropertyType::from_code`] folds that instance bit away so a column type
//! maps onto the type the property is documented with.
//!
//! # Examples
//!
//! ```rust
//! use mapiprops::PropertyType;
//!
//! assert_eq!(PropertyType::from_code(0x001F), Some(PropertyType::String));
//! assert_eq!(PropertyType::from_code(0x301F), Some(PropertyType::MultipleString));
//! assert_eq!("PtypBinary".parse::<PropertyType>(), Ok(PropertyType::Binary));
//! assert_eq!(PropertyType::MultipleInteger32.base(), PropertyType::Integer32);
//! ```

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use strum::{EnumCount, EnumIter, IntoEnumIterator};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Modifier bits carried in the high nibble of a property type code
    pub struct TypeFlags : u16 {
        /// The value is an array of the element type
        const MULTI_VALUE = 0x1000;
        /// A table column holding one element of a multi-valued property per row
        const MULTI_VALUE_INSTANCE = 0x2000;
    }
}

impl TypeFlags {
    /// Extracts the modifier bits of a raw type code
    #[must_use]
    pub fn of(code: u16) -> Self {
        TypeFlags::from_bits_truncate(code)
    }
}

/// The documented MAPI property types.
///
/// Variants are declared in ascending code order, so the derived ordering matches the numeric
/// ordering of [`PropertyType::code`].
///
/// ## Reference
/// * [MS-OXCDATA] §2.11.1 - Property Data Types
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, EnumIter, EnumCount)]
#[repr(u16)]
pub enum PropertyType {
    /// `PtypUnspecified` (0x0000) - the type is not specified
    Unspecified = 0x0000,
    /// `PtypNull` (0x0001) - no value
    Null = 0x0001,
    /// `PtypInteger16` (0x0002) - 16-bit signed integer
    Integer16 = 0x0002,
    /// `PtypInteger32` (0x0003) - 32-bit signed integer
    Integer32 = 0x0003,
    /// `PtypFloating32` (0x0004) - 32-bit IEEE float
    Floating32 = 0x0004,
    /// `PtypFloating64` (0x0005) - 64-bit IEEE float
    Floating64 = 0x0005,
    /// `PtypCurrency` (0x0006) - 64-bit fixed point, four decimal places
    Currency = 0x0006,
    /// `PtypFloatingTime` (0x0007) - OLE automation date
    FloatingTime = 0x0007,
    /// `PtypErrorCode` (0x000A) - 32-bit SCODE
    ErrorCode = 0x000A,
    /// `PtypBoolean` (0x000B) - 16-bit boolean
    Boolean = 0x000B,
    /// `PtypObject` / `PtypEmbeddedTable` (0x000D) - object or embedded table
    Object = 0x000D,
    /// `PtypInteger64` (0x0014) - 64-bit signed integer
    Integer64 = 0x0014,
    /// `PtypString8` (0x001E) - 8-bit string in the store's code page
    String8 = 0x001E,
    /// `PtypString` (0x001F) - UTF-16LE string
    String = 0x001F,
    /// `PtypTime` (0x0040) - FILETIME
    Time = 0x0040,
    /// `PtypGuid` (0x0048) - 16-byte GUID
    Guid = 0x0048,
    /// `PtypServerId` (0x00FB) - server-internal object id
    ServerId = 0x00FB,
    /// `PtypRestriction` (0x00FD) - serialized restriction
    Restriction = 0x00FD,
    /// `PtypRuleAction` (0x00FE) - serialized rule actions
    RuleAction = 0x00FE,
    /// `PtypBinary` (0x0102) - counted byte array
    Binary = 0x0102,
    /// `PtypMultipleInteger16` (0x1002)
    MultipleInteger16 = 0x1002,
    /// `PtypMultipleInteger32` (0x1003)
    MultipleInteger32 = 0x1003,
    /// `PtypMultipleFloating32` (0x1004)
    MultipleFloating32 = 0x1004,
    /// `PtypMultipleFloating64` (0x1005)
    MultipleFloating64 = 0x1005,
    /// `PtypMultipleCurrency` (0x1006)
    MultipleCurrency = 0x1006,
    /// `PtypMultipleFloatingTime` (0x1007)
    MultipleFloatingTime = 0x1007,
    /// `PtypMultipleInteger64` (0x1014)
    MultipleInteger64 = 0x1014,
    /// `PtypMultipleString8` (0x101E)
    MultipleString8 = 0x101E,
    /// `PtypMultipleString` (0x101F)
    MultipleString = 0x101F,
    /// `PtypMultipleTime` (0x1040)
    MultipleTime = 0x1040,
    /// `PtypMultipleGuid` (0x1048)
    MultipleGuid = 0x1048,
    /// `PtypMultipleBinary` (0x1102)
    MultipleBinary = 0x1102,
}

impl PropertyType {
    /// Returns the numeric type code
    #[must_use]
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Maps a raw type code onto a documented type.
    ///
    /// The multi-value-instance bit is ignored, everything else has to match a documented code
    /// exactly.
    ///
    /// # Arguments
    /// * `code` - The raw 16-bit type code, as found in the low half of a property tag
    ///
    /// # Returns
    /// The matching [`PropertyType`], or `None` for undocumented codes
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        let code = code & !TypeFlags::MULTI_VALUE_INSTANCE.bits();
        PropertyType::iter().find(|t| t.code() == code)
    }

    /// Returns the documented `Ptyp*` name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PropertyType::Unspecified => "PtypUnspecified",
            PropertyType::Null => "PtypNull",
            PropertyType::Integer16 => "PtypInteger16",
            PropertyType::Integer32 => "PtypInteger32",
            PropertyType::Floating32 => "PtypFloating32",
            PropertyType::Floating64 => "PtypFloating64",
            PropertyType::Currency => "PtypCurrency",
            PropertyType::FloatingTime => "PtypFloatingTime",
            PropertyType::ErrorCode => "PtypErrorCode",
            PropertyType::Boolean => "PtypBoolean",
            PropertyType::Object => "PtypObject",
            PropertyType::Integer64 => "PtypInteger64",
            PropertyType::String8 => "PtypString8",
            PropertyType::String => "PtypString",
            PropertyType::Time => "PtypTime",
            PropertyType::Guid => "PtypGuid",
            PropertyType::ServerId => "PtypServerId",
            PropertyType::Restriction => "PtypRestriction",
            PropertyType::RuleAction => "PtypRuleAction",
            PropertyType::Binary => "PtypBinary",
            PropertyType::MultipleInteger16 => "PtypMultipleInteger16",
            PropertyType::MultipleInteger32 => "PtypMultipleInteger32",
            PropertyType::MultipleFloating32 => "PtypMultipleFloating32",
            PropertyType::MultipleFloating64 => "PtypMultipleFloating64",
            PropertyType::MultipleCurrency => "PtypMultipleCurrency",
            PropertyType::MultipleFloatingTime => "PtypMultipleFloatingTime",
            PropertyType::MultipleInteger64 => "PtypMultipleInteger64",
            PropertyType::MultipleString8 => "PtypMultipleString8",
            PropertyType::MultipleString => "PtypMultipleString",
            PropertyType::MultipleTime => "PtypMultipleTime",
            PropertyType::MultipleGuid => "PtypMultipleGuid",
            PropertyType::MultipleBinary => "PtypMultipleBinary",
        }
    }

    /// Returns `true` for the array forms (`PtypMultiple*`)
    #[must_use]
    pub fn is_multi_valued(self) -> bool {
        TypeFlags::of(self.code()).contains(TypeFlags::MULTI_VALUE)
    }

    /// Returns the element type of a multi-valued type, or the type itself.
    #[must_use]
    pub fn base(self) -> Self {
        if !self.is_multi_valued() {
            return self;
        }

        let element = self.code() & !TypeFlags::MULTI_VALUE.bits();
        PropertyType::from_code(element).unwrap_or(self)
    }

    /// Returns `true` for the 8-bit and UTF-16 string types, single or multi-valued
    #[must_use]
    pub fn is_string(self) -> bool {
        matches!(self.base(), PropertyType::String | PropertyType::String8)
    }

    /// Maps a string type onto its counterpart in the other encoding.
    ///
    /// ANSI stores write `PtypString8` where Unicode stores write `PtypString` for the same
    /// property, so a resolver may accept either one in place of the other.
    #[must_use]
    pub fn string_counterpart(self) -> Option<Self> {
        match self {
            PropertyType::String => Some(PropertyType::String8),
            PropertyType::String8 => Some(PropertyType::String),
            PropertyType::MultipleString => Some(PropertyType::MultipleString8),
            PropertyType::MultipleString8 => Some(PropertyType::MultipleString),
            _ => None,
        }
    }

    /// Number of documented property types
    #[must_use]
    pub fn count() -> usize {
        PropertyType::COUNT
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "PtypEmbeddedTable" {
            return Ok(PropertyType::Object);
        }

        PropertyType::iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| format!("unknown property type name '{s}'"))
    }
}

impl TryFrom<u16> for PropertyType {
    type Error = u16;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        PropertyType::from_code(code).ok_or(code)
    }
}

impl From<PropertyType> for u16 {
    fn from(prop_type: PropertyType) -> Self {
        prop_type.code()
    }
}
