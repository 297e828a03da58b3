#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use lobbylink_client::config::{self, ENV_CLIENT_ID, ENV_CLIENT_SECRET};

const MINIMAL: &str = r#"
version: 1
lobby:
  url: "wss://lobby.example.com/ws"
credentials:
  client_id: "jGKD8Ceh1VOHCQdMlDtStIYHXDIdyCjE"
  client_secret: "4ab90ddc-caa3-42e0-ba9f-d985b9524660"
"#;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
lobby:
  url: "wss://lobby.example.com/ws"
credentials:
  client_id: "jGKD8Ceh1VOHCQdMlDtStIYHXDIdyCjE"
  client_secret: "s"
session:
  freshnes_window_ms: 10 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str(MINIMAL).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.lobby.url, "wss://lobby.example.com/ws");
    assert_eq!(cfg.session.freshness_window(), Some(Duration::from_millis(300_000)));
    assert_eq!(cfg.session.outbound_queue, 1024);
    assert_eq!(cfg.session.close_timeout(), Duration::from_secs(5));
    assert_eq!(cfg.logging.filter, "info");
}

#[test]
fn zero_window_disables_freshness() {
    let yaml = format!("{MINIMAL}session:\n  freshness_window_ms: 0\n");
    let cfg = config::load_from_str(&yaml).unwrap();
    assert_eq!(cfg.session.freshness_window(), None);
}

#[test]
fn rejects_unsupported_version() {
    let yaml = MINIMAL.replace("version: 1", "version: 2");
    let err = config::load_from_str(&yaml).unwrap_err();
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn rejects_non_websocket_url() {
    let yaml = MINIMAL.replace("wss://lobby.example.com/ws", "https://lobby.example.com");
    let err = config::load_from_str(&yaml).unwrap_err();
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn rejects_short_client_id() {
    let yaml = MINIMAL.replace("jGKD8Ceh1VOHCQdMlDtStIYHXDIdyCjE", "too-short");
    let err = config::load_from_str(&yaml).unwrap_err();
    assert_eq!(err.code().as_str(), "INVALID_CREDENTIALS");
}

#[test]
fn rejects_zero_outbound_queue() {
    let yaml = format!("{MINIMAL}session:\n  outbound_queue: 0\n");
    let err = config::load_from_str(&yaml).unwrap_err();
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn rejects_zero_close_timeout() {
    let yaml = format!("{MINIMAL}session:\n  close_timeout_ms: 0\n");
    let err = config::load_from_str(&yaml).unwrap_err();
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn env_overrides_replace_credentials() {
    let mut cfg = config::load_from_str(MINIMAL).unwrap();
    config::apply_env_overrides(&mut cfg, |key| match key {
        k if k == ENV_CLIENT_ID => Some("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA".into()),
        k if k == ENV_CLIENT_SECRET => Some("rotated".into()),
        _ => None,
    });
    cfg.validate().unwrap();
    let creds = cfg.credentials.to_credentials().unwrap();
    assert_eq!(creds.client_id(), "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA");
    assert_eq!(creds.client_secret(), "rotated");
}

#[test]
fn missing_env_keeps_file_credentials() {
    let mut cfg = config::load_from_str(MINIMAL).unwrap();
    config::apply_env_overrides(&mut cfg, |_| None);
    assert_eq!(cfg.credentials.client_id, "jGKD8Ceh1VOHCQdMlDtStIYHXDIdyCjE");
}

#[test]
fn debug_output_redacts_secret() {
    let cfg = config::load_from_str(MINIMAL).unwrap();
    let dbg = format!("{cfg:?}");
    assert!(!dbg.contains("4ab90ddc"));
}
