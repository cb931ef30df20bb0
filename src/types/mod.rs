//! Property type codes and property tags.
//!
//! # Key Components
//!
//! - [`PropertyType`] - The documented MAPI property types ([MS-OXCDATA] §2.11.1)
//! - [`TypeFlags`] - Multi-value modifier bits of a type code
//! - [`PropertyTag`] - A 32-bit `(id, type)` property tag as stored in PST and MSG files

mod proptype;
mod tag;

pub use proptype::{PropertyType, TypeFlags};
pub use tag::PropertyTag;
