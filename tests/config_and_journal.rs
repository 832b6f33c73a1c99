mod support;

use anyhow::Result;
use contactbook::config;
use contactbook::events::EventType;
use contactbook::DraftField;
use std::fs;
use support::{Harness, ScriptedCamera};

#[test]
fn missing_config_yields_defaults() -> Result<()> {
    let _harness = Harness::new();
    let config = config::load_or_default()?;
    assert_eq!(config.capture.temp_file_prefix, "capture");
    assert!(!config.capture.keep_failed_captures);
    Ok(())
}

#[test]
fn partial_config_fills_in_defaults() -> Result<()> {
    let harness = Harness::new();
    let config_dir = harness.home_path().join("config");
    fs::create_dir_all(&config_dir)?;
    fs::write(
        config_dir.join(config::CONFIG_FILE_NAME),
        "[capture]\ntemp_file_prefix = \"shot\"\n",
    )?;

    let config = config::load_or_default()?;
    assert_eq!(config.capture.temp_file_prefix, "shot");
    assert!(!config.capture.keep_failed_captures, "unset field takes its default");
    Ok(())
}

#[test]
fn config_round_trips_through_toml() -> Result<()> {
    let _harness = Harness::new();
    let mut config = config::load_or_default()?;
    config.capture.temp_file_prefix = "photo".to_string();
    config.capture.keep_failed_captures = true;
    config::save(&config)?;

    let reloaded = config::load_or_default()?;
    assert_eq!(reloaded.capture.temp_file_prefix, "photo");
    assert!(reloaded.capture.keep_failed_captures);
    Ok(())
}

#[test]
fn a_session_leaves_a_readable_journal() -> Result<()> {
    let harness = Harness::new();
    let mut book = harness.book();
    let mut camera = ScriptedCamera::new();

    let flow_id = book.open_add_flow()?;
    book.edit_field(DraftField::Name, "Alice")?;
    book.edit_field(DraftField::Email, "a@x.com")?;
    book.edit_field(DraftField::Phone, "555-0001")?;
    book.request_photo(&mut camera)?;
    book.deliver_capture_result(flow_id, true)?;
    book.confirm()?;
    book.delete_contact(0)?;

    let events = book.activity().load()?;
    let types: Vec<EventType> = events.iter().map(|e| e.event_type).collect();
    assert_eq!(
        types,
        [
            EventType::FlowOpened,
            EventType::CaptureRequested,
            EventType::CaptureResolved,
            EventType::ContactAdded,
            EventType::ContactDeleted,
        ]
    );

    let resolved = &events[2];
    assert_eq!(resolved.details["success"], true);
    assert_eq!(resolved.details["applied"], true);
    Ok(())
}

#[test]
fn cancellation_and_stale_results_are_journaled() -> Result<()> {
    let harness = Harness::new();
    let mut book = harness.book();
    let mut camera = ScriptedCamera::new();

    let flow_id = book.open_add_flow()?;
    book.request_photo(&mut camera)?;
    book.cancel()?;
    book.deliver_capture_result(flow_id, true)?;

    let events = book.activity().load()?;
    let types: Vec<EventType> = events.iter().map(|e| e.event_type).collect();
    assert_eq!(
        types,
        [
            EventType::FlowOpened,
            EventType::CaptureRequested,
            EventType::FlowCancelled,
            EventType::CaptureResolved,
        ]
    );
    assert_eq!(events[3].details["applied"], false);
    Ok(())
}
