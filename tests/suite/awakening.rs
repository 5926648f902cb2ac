use awaken_engine::{AudioSettings, AwakeningState, Icon, Profile, SessionEvent, SessionSettings};

use crate::common::{mount, ms};

#[test]
fn unmount_while_booting_leaves_no_timers_or_loops() {
    let session = mount(SessionSettings::default(), Profile::default());
    assert_eq!(session.awakening_state(), AwakeningState::Booting);
    assert_eq!(session.audio().active_loops(), 1);

    let audio = session.unmount();
    assert_eq!(audio.active_loops(), 0);
    assert!(audio.backend().playing.is_empty());
}

#[test]
fn boot_delay_announces_once() {
    let mut session = mount(SessionSettings::default(), Profile::default());
    assert!(session.tick(ms(1_499)).is_empty());

    let events = session.tick(ms(1_500));
    assert_eq!(events.first(), Some(&SessionEvent::Awakened));
    let notification = session.notification();
    assert!(notification.visible);
    assert_eq!(notification.icon, Icon::System);
    assert_eq!(notification.since, ms(1_500));

    let later = session.tick(ms(1_600));
    assert!(!later.contains(&SessionEvent::Awakened));
    assert_eq!(session.awakening_state(), AwakeningState::Awakened);
}

#[test]
fn late_tick_still_times_notification_from_boot() {
    let mut session = mount(SessionSettings::default(), Profile::default());
    // One tick long after both the boot delay and the announcement's lifetime.
    let events = session.tick(ms(10_000));
    assert!(events.contains(&SessionEvent::Awakened));
    assert!(events.contains(&SessionEvent::NotificationDismissed));
    assert!(!session.notification().visible);
}

#[test]
fn muted_sfx_boots_silently() {
    let settings = SessionSettings {
        audio: AudioSettings {
            sfx_muted: true,
            ..AudioSettings::default()
        },
        ..SessionSettings::default()
    };
    let mut session = mount(settings, Profile::default());
    assert_eq!(session.audio().active_loops(), 0);

    session.tick(ms(1_500));
    assert_eq!(session.awakening_state(), AwakeningState::Awakened);
    assert!(session.notification().visible);
}
