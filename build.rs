use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::Path;

use serde_json::Value;

#[path = "src/registry/hexid.rs"]
mod hexid;

use hexid::parse_hex_id;

const DATA_FILE: &str = "data/properties.json";
const FORMAT_VERSION: u64 = 1;

fn fail(message: String) -> ! {
    panic!("{DATA_FILE}: {message}");
}

/// Minimal schema check; the library repeats the full checks with typed errors.
fn validate(document: &Value) -> usize {
    let format = document.get("format").and_then(Value::as_u64);
    if format != Some(FORMAT_VERSION) {
        fail(format!(
            "unsupported format {format:?}, expected {FORMAT_VERSION}"
        ));
    }

    let Some(entries) = document.get("entries").and_then(Value::as_array) else {
        fail("missing 'entries' array".to_string());
    };

    let mut seen: HashSet<(u16, String)> = HashSet::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let literal = entry.get("id").and_then(Value::as_str).unwrap_or("");
        let Some(id) = parse_hex_id(literal) else {
            fail(format!("entry #{index}: invalid id '{literal}'"));
        };

        let name = match entry.get("name").and_then(Value::as_str) {
            Some(name) => name.to_string(),
            None => format!("unknown0x{id:04X}"),
        };

        let reserved = entry
            .get("reserved")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let typed = entry
            .get("types")
            .and_then(Value::as_array)
            .is_some_and(|types| !types.is_empty());
        if !reserved && !typed {
            fail(format!("entry #{index} ({name}, 0x{id:04X}): no declared type"));
        }

        if !seen.insert((id, name.clone())) {
            fail(format!("entry #{index}: duplicate definition {name} for 0x{id:04X}"));
        }
    }

    entries.len()
}

fn main() {
    println!("cargo:rerun-if-changed={DATA_FILE}");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/registry/hexid.rs");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");

    let source = Path::new(&manifest_dir).join(DATA_FILE);
    let content = fs::read_to_string(&source)
        .unwrap_or_else(|e| fail(format!("cannot read {}: {e}", source.display())));

    let document: Value =
        serde_json::from_str(&content).unwrap_or_else(|e| fail(format!("invalid JSON: {e}")));
    let count = validate(&document);
    if count == 0 {
        println!("cargo:warning={DATA_FILE} contains no entries");
    }

    let dest = Path::new(&out_dir).join("properties.json");
    fs::write(&dest, content)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", dest.display()));
}
