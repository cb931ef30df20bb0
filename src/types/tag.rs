use std::fmt;

use crate::types::PropertyType;

/// A 32-bit MAPI property tag.
///
/// Property tags in PST and MSG streams consist of a 32-bit value where:
/// - The high 16 bits (bits 16-31) hold the property id
/// - The low 16 bits (bits 0-15) hold the property type code
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyTag(pub u32);

impl PropertyTag {
    /// Creates a tag from a property id and a raw type code
    #[must_use]
    pub fn new(id: u16, type_code: u16) -> Self {
        PropertyTag((u32::from(id) << 16) | u32::from(type_code))
    }

    /// Creates a tag from a property id and a documented type
    #[must_use]
    pub fn with_type(id: u16, prop_type: PropertyType) -> Self {
        PropertyTag::new(id, prop_type.code())
    }

    /// Returns the raw tag value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the property id (high 16 bits)
    #[must_use]
    pub fn id(&self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// Extracts the raw type code (low 16 bits)
    #[must_use]
    pub fn type_code(&self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }

    /// Decodes the type code, `None` if it is not a documented type
    #[must_use]
    pub fn prop_type(&self) -> Option<PropertyType> {
        PropertyType::from_code(self.type_code())
    }

    /// Returns true for ids in the named-property range (0x8000-0xFFFE).
    ///
    /// Ids in this range are assigned per store through the name-to-id map and carry no meaning
    /// on their own.
    #[must_use]
    pub fn is_named(&self) -> bool {
        (0x8000..=0xFFFE).contains(&self.id())
    }
}

impl From<u32> for PropertyTag {
    fn from(value: u32) -> Self {
        PropertyTag(value)
    }
}

impl From<PropertyTag> for u32 {
    fn from(tag: PropertyTag) -> Self {
        tag.0
    }
}

impl fmt::Debug for PropertyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prop_type() {
            Some(prop_type) => write!(
                f,
                "PropertyTag(0x{:08X}, id: 0x{:04X}, type: {})",
                self.0,
                self.id(),
                prop_type
            ),
            None => write!(
                f,
                "PropertyTag(0x{:08X}, id: 0x{:04X}, type: 0x{:04X})",
                self.0,
                self.id(),
                self.type_code()
            ),
        }
    }
}

impl fmt::Display for PropertyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}
