// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Prefs persistence through `PrefsService` and the `ConfigPort` impl.

use droplet_app_core::config::{ConfigError, PrefsService};
use droplet_app_core::config_port::ConfigPort;
use droplet_app_core::prefs::{ViewerPrefs, VIEWER_PREFS_KEY};
use droplet_dry_tests::InMemoryConfigStore;
use std::time::Duration;

#[test]
fn defaults_match_viewer_constants() {
    let prefs = ViewerPrefs::default();
    assert_eq!(prefs.playback.tween(), Duration::from_millis(200));
    assert_eq!(prefs.playback.autoplay_interval(), Duration::from_millis(500));
    assert_eq!(prefs.server.method, "visualizer_droplet_info");
    assert_eq!((prefs.board.width, prefs.board.height), (10, 10));
}

#[test]
fn missing_prefs_load_as_none() {
    let service = PrefsService::new(InMemoryConfigStore::new());
    assert!(service.load().unwrap().is_none());
    assert_eq!(service.load_prefs(), None);
}

#[test]
fn saved_prefs_round_trip_under_viewer_key() {
    let store = InMemoryConfigStore::new();
    let service = PrefsService::new(store.clone());
    let mut prefs = ViewerPrefs::default();
    prefs.playback.tween_ms = 80;
    prefs.server.url = "http://sim.local:9000/".into();

    service.save_prefs(&prefs);

    assert_eq!(service.key(), VIEWER_PREFS_KEY);
    assert!(store.contains_key(VIEWER_PREFS_KEY));
    assert!(store.raw(VIEWER_PREFS_KEY).unwrap().ends_with(b"}\n"));
    assert_eq!(service.load_prefs(), Some(prefs));
}

#[test]
fn profiles_use_their_own_key() {
    let store = InMemoryConfigStore::new();
    let demo = PrefsService::with_key(store.clone(), "demo");
    let mut prefs = ViewerPrefs::default();
    prefs.board.width = 24;
    demo.save(&prefs).unwrap();

    assert!(store.contains_key("demo"));
    assert!(!store.contains_key(VIEWER_PREFS_KEY));
    assert_eq!(PrefsService::new(store).load_prefs(), None);
}

#[test]
fn partial_file_fills_in_defaults() {
    let store =
        InMemoryConfigStore::with_entry(VIEWER_PREFS_KEY, br#"{"playback":{"tween_ms":50}}"#);
    let prefs = PrefsService::new(store).load_prefs().unwrap();
    assert_eq!(prefs.playback.tween_ms, 50);
    assert_eq!(prefs.playback.autoplay_interval_ms, 500);
    assert_eq!(prefs.server, ViewerPrefs::default().server);
}

#[test]
fn zero_values_are_sanitized_both_ways() {
    let store = InMemoryConfigStore::with_entry(
        VIEWER_PREFS_KEY,
        br#"{"playback":{"tween_ms":0},"board":{"width":0,"height":4,"cell_size":0}}"#,
    );
    let service = PrefsService::new(store.clone());
    let prefs = service.load_prefs().unwrap();
    assert_eq!(prefs.playback.tween_ms, 200);
    assert_eq!((prefs.board.width, prefs.board.height), (10, 10));
    assert_eq!(prefs.board.cell_size, 2);

    let mut broken = ViewerPrefs::default();
    broken.playback.autoplay_interval_ms = 0;
    service.save(&broken).unwrap();
    let raw = String::from_utf8(store.raw(VIEWER_PREFS_KEY).unwrap()).unwrap();
    assert!(raw.contains("\"autoplay_interval_ms\": 500"));
}

#[test]
fn unreadable_prefs_are_reported_then_ignored() {
    let store = InMemoryConfigStore::with_entry(VIEWER_PREFS_KEY, b"not json");
    let service = PrefsService::new(store.clone());
    assert!(matches!(service.load(), Err(ConfigError::Parse(_))));
    assert_eq!(service.load_prefs(), None);

    store.set_fail_on_load(true);
    assert!(matches!(service.load(), Err(ConfigError::Io(_))));
    assert_eq!(service.load_prefs(), None);
}

#[test]
fn blank_blob_loads_as_none() {
    let store = InMemoryConfigStore::with_entry(VIEWER_PREFS_KEY, b" \n");
    assert!(PrefsService::new(store).load().unwrap().is_none());
}
