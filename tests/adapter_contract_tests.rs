// SPDX-License-Identifier: MIT OR Apache-2.0

//! Behaviour every feature adapter must share, checked against the memory
//! adapter and the Posthog adapter over an in-process fake service.

mod common;

use feature_gate::adapters::MemoryAdapter;
use feature_gate::domain::{Feature, FeatureGateError};
use feature_gate::ports::FeatureAdapter;

fn funnel() -> Feature {
    Feature::new(
        "Funnel Test",
        "funnel_test",
        "This is a feature flag tests a conversion funnel",
    )
}

fn assert_lifecycle(adapter: &dyn FeatureAdapter) {
    assert!(adapter.features().unwrap().is_empty());

    assert!(adapter.add(&funnel()).unwrap());
    assert_eq!(adapter.features().unwrap(), vec!["funnel_test"]);
    assert!(!adapter.is_enabled("funnel_test").unwrap());

    assert!(adapter.enable("funnel_test").unwrap());
    assert!(adapter.is_enabled("funnel_test").unwrap());

    assert!(adapter.disable("funnel_test").unwrap());
    assert!(!adapter.is_enabled("funnel_test").unwrap());

    assert!(adapter.remove("funnel_test").unwrap());
    assert!(adapter.features().unwrap().is_empty());
}

fn assert_idempotent_add_and_remove(adapter: &dyn FeatureAdapter) {
    assert!(adapter.add(&funnel()).unwrap());
    assert!(adapter.add(&funnel()).unwrap());
    assert_eq!(adapter.features().unwrap(), vec!["funnel_test"]);

    assert!(adapter.remove("funnel_test").unwrap());
    assert!(adapter.remove("funnel_test").unwrap());
    assert!(adapter.features().unwrap().is_empty());
}

fn assert_missing_key_is_not_found(adapter: &dyn FeatureAdapter) {
    for result in [
        adapter.is_enabled("missing"),
        adapter.enable("missing"),
        adapter.disable("missing"),
    ] {
        match result {
            Err(FeatureGateError::FeatureNotFound { key }) => assert_eq!(key, "missing"),
            other => panic!("expected not found, got {other:?}"),
        }
    }
}

fn assert_readd_after_remove_starts_disabled(adapter: &dyn FeatureAdapter) {
    adapter.add(&funnel()).unwrap();
    adapter.enable("funnel_test").unwrap();
    adapter.remove("funnel_test").unwrap();

    adapter.add(&funnel()).unwrap();
    assert!(!adapter.is_enabled("funnel_test").unwrap());
}

#[test]
fn test_memory_adapter_contract() {
    assert_lifecycle(&MemoryAdapter::new());
    assert_idempotent_add_and_remove(&MemoryAdapter::new());
    assert_missing_key_is_not_found(&MemoryAdapter::new());
    assert_readd_after_remove_starts_disabled(&MemoryAdapter::new());
}

#[test]
fn test_posthog_adapter_contract() {
    assert_lifecycle(&common::fake_adapter().1);
    assert_idempotent_add_and_remove(&common::fake_adapter().1);
    assert_missing_key_is_not_found(&common::fake_adapter().1);
    assert_readd_after_remove_starts_disabled(&common::fake_adapter().1);
}

#[test]
fn test_posthog_add_creates_only_once() {
    let (fake, adapter) = common::fake_adapter();
    adapter.add(&funnel()).unwrap();
    adapter.add(&funnel()).unwrap();
    assert_eq!(fake.records().len(), 1);
    assert_eq!(fake.mutating_calls(), 1);
}

#[test]
fn test_posthog_create_uses_description_as_remote_name() {
    let (fake, adapter) = common::fake_adapter();
    adapter.add(&funnel()).unwrap();

    let record = &fake.records()[0];
    assert_eq!(record["key"], "funnel_test");
    assert_eq!(
        record["name"],
        "This is a feature flag tests a conversion funnel"
    );
    assert_eq!(record["active"], false);
}

#[test]
fn test_posthog_remove_is_soft_delete() {
    let (fake, adapter) = common::fake_adapter();
    adapter.add(&funnel()).unwrap();
    adapter.remove("funnel_test").unwrap();

    let records = fake.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["deleted"], true);
}

#[test]
fn test_posthog_readd_keeps_one_live_record() {
    let (fake, adapter) = common::fake_adapter();
    adapter.add(&funnel()).unwrap();
    adapter.remove("funnel_test").unwrap();
    adapter.add(&funnel()).unwrap();
    adapter.enable("funnel_test").unwrap();

    let records = fake.records();
    let live: Vec<_> = records.iter().filter(|r| r["deleted"] == false).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(live.len(), 1);
    assert_eq!(live[0]["active"], true);
}

#[test]
fn test_posthog_missing_key_issues_no_mutation() {
    let (fake, adapter) = common::fake_adapter();
    let _ = adapter.enable("missing");
    let _ = adapter.disable("missing");
    let _ = adapter.remove("missing");
    assert_eq!(fake.mutating_calls(), 0);
}

#[test]
fn test_posthog_outage_surfaces_connection_error() {
    let (fake, adapter) = common::fake_adapter();
    adapter.add(&funnel()).unwrap();
    fake.go_offline("connection refused");

    for result in [
        adapter.features().map(|_| true),
        adapter.add(&funnel()),
        adapter.remove("funnel_test"),
        adapter.is_enabled("funnel_test"),
        adapter.enable("funnel_test"),
    ] {
        match result {
            Err(FeatureGateError::ConnectionError { message, .. }) => {
                assert_eq!(message, "connection refused")
            }
            other => panic!("expected connection error, got {other:?}"),
        }
    }
}
