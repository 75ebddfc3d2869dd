//! Selecting a decode mode from service configuration.
#![cfg(feature = "serde")]

use marshal::{CompatibilityMode, DecodeOptions, EntryType, Marshal};

#[test]
fn modes_use_kebab_case_names() {
    assert_eq!(
        serde_json::to_string(&CompatibilityMode::LegacyStrings).unwrap(),
        "\"legacy-strings\""
    );
    let mode: CompatibilityMode = serde_json::from_str("\"sherlock\"").unwrap();
    assert_eq!(mode, CompatibilityMode::Sherlock);
    assert!(serde_json::from_str::<CompatibilityMode>("\"watson\"").is_err());
}

#[test]
fn decode_options_from_json() {
    let opts: DecodeOptions = serde_json::from_str(r#"{"mode":"sherlock"}"#).unwrap();
    assert_eq!(opts.mode(), Some(CompatibilityMode::Sherlock));
    let m = Marshal::decode_with(vec![0x04u8, b'x'], &opts).unwrap();
    assert_eq!(m.string_at(0).unwrap(), "x");

    let defaults: DecodeOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(defaults, DecodeOptions::new());
}

#[test]
fn entry_types_use_wire_names() {
    assert_eq!(
        serde_json::to_string(&EntryType::ByteArray).unwrap(),
        "\"BYTE_ARRAY\""
    );
    let t: EntryType = serde_json::from_str("\"MARSHAL\"").unwrap();
    assert_eq!(t, EntryType::Marshal);
}
