use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{hours_with, temp_config};

#[test]
fn set_default_engagement_persists() {
    let (_dir, cfg) = temp_config();

    hours_with(&cfg, &["config", "set-default-engagement", "--id", "12345678"])
        .assert()
        .success()
        .stdout(contains("Default engagement set to 12345678"));

    let yaml = fs::read_to_string(&cfg).unwrap();
    assert!(yaml.contains("default_engagement_id: 12345678"));
    assert!(yaml.contains("prowand.pro-unlimited.com"));
}

#[test]
fn set_default_engagement_rejects_non_positive_id() {
    let (_dir, cfg) = temp_config();

    hours_with(&cfg, &["config", "set-default-engagement", "--id", "0"])
        .assert()
        .failure()
        .stderr(contains("--id must be > 0"));

    assert!(!cfg.exists());
}

#[test]
fn set_timezone_validates_name() {
    let (_dir, cfg) = temp_config();

    hours_with(&cfg, &["config", "set-timezone", "--tz", "America/Chicago"])
        .assert()
        .success()
        .stdout(contains("Timezone set to America/Chicago"));

    hours_with(&cfg, &["config", "set-timezone", "--tz", "Moon/Base"])
        .assert()
        .failure()
        .stderr(contains("invalid timezone"));

    let yaml = fs::read_to_string(&cfg).unwrap();
    assert!(yaml.contains("timezone: America/Chicago"));
}

#[test]
fn show_emits_json_payload() {
    let (_dir, cfg) = temp_config();
    hours_with(&cfg, &["config", "set-default-engagement", "--id", "42"])
        .assert()
        .success();

    let out = hours_with(&cfg, &["--json", "config", "show"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(payload["ok"], true);
    assert_eq!(payload["operation"], "config_show");
    assert_eq!(payload["config"]["default_engagement_id"], 42);
}

#[test]
fn json_default_from_config_file() {
    let (_dir, cfg) = temp_config();
    fs::write(&cfg, "output:\n  json_default: true\n").unwrap();

    hours_with(&cfg, &["config", "set-timezone", "--tz", "UTC"])
        .assert()
        .success()
        .stdout(contains("\"operation\": \"config_set_timezone\"").and(contains("\"ok\": true")));
}

#[test]
fn malformed_config_is_reported() {
    let (_dir, cfg) = temp_config();
    fs::write(&cfg, "default_engagement_id: [oops").unwrap();

    hours_with(&cfg, &["config", "show"])
        .assert()
        .failure()
        .stderr(contains("Configuration error"));
}
