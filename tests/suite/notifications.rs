use awaken_engine::{Icon, Profile, ProgressionState, SessionEvent, SessionSettings};

use crate::common::{mount, ms};

fn at_level(level: u64, xp: u64) -> Profile {
    Profile {
        progression: ProgressionState::new(level, xp).unwrap(),
        ..Profile::default()
    }
}

#[test]
fn level_up_replaces_the_awakening_notice() {
    let mut session = mount(SessionSettings::default(), at_level(5, 95));
    session.tick(ms(1_500));
    assert_eq!(session.notification().icon, Icon::System);

    let gain = session.award_experience(ms(3_000), 10).unwrap();
    assert!(gain.leveled_up);
    assert_eq!(gain.state.level(), 6);
    assert_eq!(gain.state.xp(), 5);

    let notification = session.notification();
    assert_eq!(notification.icon, Icon::LevelUp);
    assert_eq!(notification.since, ms(3_000));

    // The awakening notice would have expired at 5.5s; the level-up keeps its own 4s.
    let events = session.tick(ms(5_500));
    assert!(!events.contains(&SessionEvent::NotificationDismissed));
    assert!(session.notification().visible);
    assert!(session.notification_remaining(ms(5_500)) > 0.0);

    let events = session.tick(ms(7_000));
    assert!(events.contains(&SessionEvent::NotificationDismissed));
    assert_eq!(session.notification_remaining(ms(7_000)), 0.0);
}

#[test]
fn multi_level_gain() {
    let mut session = mount(SessionSettings::default(), Profile::default());
    let gain = session.award_experience(ms(0), 250).unwrap();
    assert_eq!(gain.state.level(), 3);
    assert_eq!(gain.state.xp(), 50);
    assert_eq!(gain.levels_gained, 2);
}

#[test]
fn gain_without_level_up_keeps_slot_quiet() {
    let mut session = mount(SessionSettings::default(), at_level(5, 50));
    let gain = session.award_experience(ms(0), 10).unwrap();
    assert!(!gain.leveled_up);
    assert_eq!(gain.state.xp(), 60);
    assert!(!session.notification().visible);
}

#[test]
fn zero_experience_is_rejected() {
    let mut session = mount(SessionSettings::default(), Profile::default());
    assert!(session.award_experience(ms(0), 0).is_err());
    assert_eq!(session.progression(), ProgressionState::default());
}
