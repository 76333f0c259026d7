use std::thread;

use chrono::DateTime;
use proptest::prelude::*;
use serde_json::{Map, Value, json};
use storefront_shared::{
    ConfigError, ENVELOPE_VERSION, create_error_response, create_health_response, setup_logging,
};

fn assert_iso_timestamp(value: &Value) {
    let ts = value.as_str().expect("timestamp should be a string");
    assert!(ts.ends_with('Z'), "{ts} should be UTC");
    assert!(DateTime::parse_from_rfc3339(ts).is_ok(), "{ts} should be RFC 3339");
}

fn keys(map: &Map<String, Value>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

#[test]
fn health_response_has_exactly_the_base_keys() {
    let map = create_health_response("customer-service", None);

    assert_eq!(keys(&map), vec!["service", "status", "timestamp", "version"]);
    assert_eq!(map["status"], "healthy");
    assert_eq!(map["service"], "customer-service");
    assert_eq!(map["version"], ENVELOPE_VERSION);
    assert_iso_timestamp(&map["timestamp"]);
}

#[test]
fn health_additional_info_overrides_and_extends() {
    let info = json!({ "version": "2.0.0", "region": "us" });
    let Value::Object(info) = info else {
        unreachable!()
    };

    let map = create_health_response("product-service", Some(info));

    assert_eq!(map["version"], "2.0.0");
    assert_eq!(map["region"], "us");
    assert_eq!(map["status"], "healthy");
}

#[test]
fn health_additional_info_may_replace_status() {
    let mut info = Map::new();
    info.insert("status".into(), json!("degraded"));

    let map = create_health_response("product-service", Some(info));

    assert_eq!(map["status"], "degraded");
}

#[test]
fn empty_additional_info_changes_nothing() {
    let map = create_health_response("product-service", Some(Map::new()));
    assert_eq!(map.len(), 4);
}

#[test]
fn error_response_without_code_omits_the_key() {
    let map = create_error_response("boom", None);

    assert_eq!(keys(&map), vec!["error", "message", "timestamp"]);
    assert_eq!(map["error"], true);
    assert_eq!(map["message"], "boom");
    assert!(!map.contains_key("error_code"));
    assert_iso_timestamp(&map["timestamp"]);
}

#[test]
fn error_response_with_code_adds_it() {
    let map = create_error_response("boom", Some("E1"));

    assert_eq!(keys(&map), vec!["error", "error_code", "message", "timestamp"]);
    assert_eq!(map["error_code"], "E1");
}

#[test]
fn error_json_never_contains_null_code() {
    let text = serde_json::to_string(&create_error_response("boom", None)).unwrap();
    assert!(!text.contains("error_code"));
}

#[test]
fn builders_are_safe_to_call_from_many_threads() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let name = format!("service-{i}");
                let health = create_health_response(&name, None);
                let error = create_error_response(&name, Some("E1"));
                (name, health, error)
            })
        })
        .collect();

    for handle in handles {
        let (name, health, error) = handle.join().unwrap();
        assert_eq!(health["service"], name.as_str());
        assert_eq!(error["message"], name.as_str());
    }
}

#[test]
fn setup_logging_is_reachable_through_the_shared_crate() {
    let logger = setup_logging("envelopes-test-service", "INFO").unwrap();
    logger.info("health check served");

    assert_eq!(
        setup_logging("envelopes-test-service", "TRACE").unwrap_err(),
        ConfigError::InvalidLevel("TRACE".to_string())
    );
}

proptest! {
    #[test]
    fn any_service_name_yields_the_base_health_shape(name in "\\PC{0,40}") {
        let map = create_health_response(&name, None);

        prop_assert_eq!(keys(&map), vec!["service", "status", "timestamp", "version"]);
        prop_assert_eq!(&map["service"], &Value::String(name.clone()));
        prop_assert_eq!(&map["status"], &json!("healthy"));
    }

    #[test]
    fn any_message_is_carried_verbatim(message in "\\PC{1,80}", code in proptest::option::of("[A-Z][0-9]{1,3}")) {
        let map = create_error_response(&message, code.as_deref());

        prop_assert_eq!(&map["message"], &Value::String(message.clone()));
        prop_assert_eq!(map.contains_key("error_code"), code.is_some());
    }
}
