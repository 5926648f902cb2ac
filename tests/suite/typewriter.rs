use awaken_engine::{AwakeningConfig, Profile, SessionSettings};

use crate::common::{mount, ms, role_frames, roles};

fn settings() -> SessionSettings {
    SessionSettings {
        awakening: AwakeningConfig {
            boot_delay: ms(0),
            ..AwakeningConfig::default()
        },
        roles: roles(&["A", "BB"]),
        ..SessionSettings::default()
    }
}

#[test]
fn roles_type_and_delete_character_by_character() {
    let mut session = mount(settings(), Profile::default());
    let mut frames = vec![session.role_text()];
    frames.extend(role_frames(&session.tick(ms(0))));
    frames.extend(role_frames(&session.tick(ms(4_550))));
    assert_eq!(frames, vec!["", "A", "", "B", "BB", "B", "", "A"]);
}

#[test]
fn frame_sequence_does_not_depend_on_tick_rate() {
    let mut stepwise = mount(settings(), Profile::default());
    let mut fine = Vec::new();
    for t in (0..=9_000).step_by(16) {
        fine.extend(role_frames(&stepwise.tick(ms(t))));
    }
    fine.extend(role_frames(&stepwise.tick(ms(9_000))));

    let mut jumped = mount(settings(), Profile::default());
    let coarse = role_frames(&jumped.tick(ms(9_000)));

    assert_eq!(fine, coarse);
    assert_eq!(stepwise.role_text(), jumped.role_text());
}

#[test]
fn typing_waits_for_awakening() {
    let mut session = mount(SessionSettings::default(), Profile::default());
    assert!(role_frames(&session.tick(ms(1_400))).is_empty());
    assert_eq!(role_frames(&session.tick(ms(1_600))), vec!["S"]);
}
