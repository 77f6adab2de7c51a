//! Integration tests for the zenmon-common library.

use zenmon_common::{AttrKeyBuilder, KEY_PREFIX, LogFormat, parse_attr_key, parse_config};

#[test]
fn test_key_expression_building_and_parsing() {
    let keys = AttrKeyBuilder::new("vpmic0");
    let key = keys.attr("in0_input");

    assert_eq!(key, "zenmon/vpmic/vpmic0/in0_input");

    let parsed = parse_attr_key(KEY_PREFIX, &key).expect("Parse failed");
    assert_eq!(parsed.instrument, "vpmic0");
    assert_eq!(parsed.attribute, "in0_input");
}

#[test]
fn test_custom_prefix_roundtrip() {
    let keys = AttrKeyBuilder::with_prefix("lab/bench", "rig-01");

    for attribute in ["in0_input", "temp1_label", "curr1_max"] {
        let key = keys.attr(attribute);
        let parsed = parse_attr_key("lab/bench", &key).expect("Parse failed");
        assert_eq!(parsed.instrument, "rig-01");
        assert_eq!(parsed.attribute, attribute);
    }
}

#[test]
fn test_wildcard_and_status_keys_stay_disjoint() {
    let keys = AttrKeyBuilder::new("vpmic0");

    assert_eq!(keys.instrument_wildcard(), "zenmon/vpmic/vpmic0/*");
    assert_eq!(keys.status_key(), "zenmon/vpmic/vpmic0/@/status");

    // The status key never parses as an attribute key.
    assert!(parse_attr_key(KEY_PREFIX, &keys.status_key()).is_none());
}

#[test]
fn test_special_characters_in_instrument_name() {
    let names = ["vpmic-01", "rig_02", "device.local", "192.168.1.1"];

    for name in names {
        let key = AttrKeyBuilder::new(name).attr("temp1_input");
        let parsed = parse_attr_key(KEY_PREFIX, &key).unwrap();
        assert_eq!(parsed.instrument, name);
    }
}

#[test]
fn test_config_parsing_workflow() {
    #[derive(Debug, serde::Deserialize)]
    struct TestConfig {
        #[serde(default)]
        zenoh: zenmon_common::ZenohConfig,
        #[serde(default)]
        logging: zenmon_common::LoggingConfig,
    }

    let json5 = r#"
    {
        zenoh: {
            mode: "client",
            connect: ["tcp/localhost:7447"],
            listen: [],
        },
        logging: {
            level: "warn",
            format: "json",
        },
    }
    "#;

    let config: TestConfig = parse_config(json5).expect("Parse failed");

    assert_eq!(config.zenoh.mode, "client");
    assert_eq!(config.zenoh.connect, vec!["tcp/localhost:7447"]);
    assert!(config.zenoh.listen.is_empty());
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.format, LogFormat::Json);
}
