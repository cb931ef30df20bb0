#![no_main]

use libfuzzer_sys::fuzz_target;
use mapiprops::{DataSource, PropertyRegistry};

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = std::str::from_utf8(data) {
        if let Ok(source) = DataSource::from_json(json) {
            let _ = PropertyRegistry::from_source(&source);
        }
    }
});
