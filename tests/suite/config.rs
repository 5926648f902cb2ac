use std::fs;
use std::path::PathBuf;

use awaken_engine::{AwakenConfig, AwakeningState, ConfigError, Profile, SessionSettings};
use tempfile::TempDir;

use crate::common::{mount, ms, role_frames};

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn file_settings_reach_the_session() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[audio]
sfx_muted = true

[awakening]
boot_delay_ms = 500

[typewriter]
roles = ["Rustacean"]
type_interval_ms = 10

[carousel]
interval_ms = 1000
"#,
    );
    let config = AwakenConfig::load_from(&path).unwrap().unwrap();
    let profile = Profile {
        featured: 2,
        ..Profile::default()
    };
    let mut session = mount(SessionSettings::from(&config), profile);

    assert_eq!(session.audio().active_loops(), 0);
    assert_eq!(session.next_deadline(), Some(ms(500)));

    let events = session.tick(ms(510));
    assert_eq!(session.awakening_state(), AwakeningState::Awakened);
    assert_eq!(role_frames(&events), vec!["R"]);

    session.tick(ms(1_000));
    assert_eq!(session.carousel().unwrap().index, 1);
}

#[test]
fn missing_file_means_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = AwakenConfig::load_from(&dir.path().join("absent.toml")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn malformed_and_invalid_files_are_reported() {
    let dir = TempDir::new().unwrap();

    let path = write_config(&dir, "[awakening\nboot_delay_ms = 1");
    assert!(matches!(
        AwakenConfig::load_from(&path),
        Err(ConfigError::Parse { .. })
    ));

    let path = write_config(&dir, "[typewriter]\nroles = []\n");
    match AwakenConfig::load_from(&path) {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "typewriter.roles"),
        other => panic!("expected invalid config, got {other:?}"),
    }

    let path = write_config(&dir, "[sparkles]\nenabled = true\n");
    assert!(AwakenConfig::load_from(&path).is_err());
}
