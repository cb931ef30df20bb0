#![no_main]

use libfuzzer_sys::fuzz_target;
use mapiprops::{PropertyTag, PropertyType};

fuzz_target!(|data: &[u8]| {
    let Ok(registry) = mapiprops::registry() else {
        return;
    };
    if data.len() < 6 {
        return;
    }

    let tag = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let observed = PropertyType::from_code(u16::from_le_bytes([data[4], data[5]]));
    let hint = std::str::from_utf8(&data[6..]).ok();

    let _ = registry.resolve_tag(PropertyTag(tag), hint);
    let _ = registry.lookup_by_id((tag >> 16) as u16, observed, hint);
    if let Some(name) = hint {
        let _ = registry.lookup_by_name(name);
        let _ = registry.lookup_by_name_ignore_case(name);
    }
});
