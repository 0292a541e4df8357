//! Lookup table compiled into the library.

use crate::table::ObjectLookupTable;
use once_cell::sync::Lazy;

pub static OBJECTS_TXT: &str = include_str!("../data/objects.txt");

static TABLE: Lazy<ObjectLookupTable> =
    Lazy::new(|| ObjectLookupTable::parse(OBJECTS_TXT).expect("embedded objects.txt is UTF-8"));

/// Table parsed from [`OBJECTS_TXT`] on first use.
pub fn table() -> &'static ObjectLookupTable {
    &TABLE
}
