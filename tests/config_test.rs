// ABOUTME: Integration tests for environment-based configuration
// ABOUTME: Serialized because every test mutates process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serial_test::serial;
use wellness_coach::config::AppConfig;
use wellness_coach::constants::env_config;
use wellness_coach::errors::ErrorCode;

const ALL_KEYS: &[&str] = &[
    env_config::CHAT_BASE_URL,
    env_config::USER_ID,
    env_config::SYNC_INTERVAL_MINUTES,
    env_config::FIRESTORE_PROJECT_ID,
    env_config::FIRESTORE_DATABASE,
    env_config::FIRESTORE_BASE_URL,
    env_config::FIRESTORE_TOKEN,
    env_config::HEALTH_FIXTURE,
    env_config::HTTP_TIMEOUT_SECS,
];

fn clear_env() {
    for key in ALL_KEYS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = AppConfig::from_env().unwrap();

    assert_eq!(config.user_id, "user_1");
    assert_eq!(config.chat.base_url.as_str(), "http://localhost:8000/");
    assert_eq!(config.sync.interval, Duration::from_secs(15 * 60));
    assert_eq!(config.firestore.database, "(default)");
    assert_eq!(
        config.firestore.base_url.as_str(),
        "https://firestore.googleapis.com/v1"
    );
    assert!(config.firestore.project_id.is_none());
    assert!(config.firestore.token.is_none());
    assert!(config.health_fixture.is_none());
    assert_eq!(config.http_timeout, Duration::from_secs(30));

    let missing = config.firestore.require_project_id().unwrap_err();
    assert_eq!(missing.code, ErrorCode::ConfigMissing);
}

#[test]
#[serial]
fn test_overrides_are_applied() {
    clear_env();
    env::set_var(env_config::USER_ID, "runner_42");
    env::set_var(env_config::CHAT_BASE_URL, "https://coach.example.com/api");
    env::set_var(env_config::SYNC_INTERVAL_MINUTES, "60");
    env::set_var(env_config::FIRESTORE_PROJECT_ID, "demo-project");
    env::set_var(env_config::FIRESTORE_TOKEN, "secret-token");
    env::set_var(env_config::HEALTH_FIXTURE, "/tmp/week.json");
    env::set_var(env_config::HTTP_TIMEOUT_SECS, "5");

    let config = AppConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.user_id, "runner_42");
    assert_eq!(config.chat.base_url.as_str(), "https://coach.example.com/api");
    assert_eq!(config.sync.interval, Duration::from_secs(3600));
    assert_eq!(config.firestore.require_project_id().unwrap(), "demo-project");
    assert_eq!(config.health_fixture, Some(PathBuf::from("/tmp/week.json")));
    assert_eq!(config.http_timeout, Duration::from_secs(5));
    assert!(!config.summary().contains("secret-token"));
    assert!(!format!("{config:?}").contains("secret-token"));
}

#[test]
#[serial]
fn test_short_sync_interval_is_raised() {
    clear_env();
    env::set_var(env_config::SYNC_INTERVAL_MINUTES, "5");
    let config = AppConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.sync.interval, Duration::from_secs(15 * 60));
}

#[test]
#[serial]
fn test_empty_values_count_as_unset() {
    clear_env();
    env::set_var(env_config::USER_ID, "  ");
    env::set_var(env_config::FIRESTORE_PROJECT_ID, "");
    let config = AppConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.user_id, "user_1");
    assert!(config.firestore.project_id.is_none());
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    let cases = [
        (env_config::SYNC_INTERVAL_MINUTES, "often"),
        (env_config::HTTP_TIMEOUT_SECS, "0"),
        (env_config::HTTP_TIMEOUT_SECS, "-3"),
        (env_config::CHAT_BASE_URL, "not a url"),
        (env_config::FIRESTORE_BASE_URL, "ftp://firestore.example.com"),
    ];

    for (key, value) in cases {
        clear_env();
        env::set_var(key, value);
        let error = AppConfig::from_env().unwrap_err();
        clear_env();

        assert_eq!(error.code, ErrorCode::ConfigInvalid, "{key}={value}");
        assert!(error.message.contains(key), "{key}={value}: {}", error.message);
    }
}
