use awaken_engine::{CarouselError, Profile, SessionEvent, SessionSettings};

use crate::common::{mount, ms};

fn featured(n: usize) -> Profile {
    Profile {
        featured: n,
        ..Profile::default()
    }
}

fn carousel_events(events: &[SessionEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, SessionEvent::Carousel(_)))
        .count()
}

#[test]
fn manual_navigation_latches_auto_play() {
    let mut session = mount(SessionSettings::default(), featured(4));
    for expected in [1, 2, 3, 0] {
        session.carousel_next();
        assert_eq!(session.carousel().map(|state| state.index), Some(expected));
    }
    assert!(!session.carousel().unwrap().auto_playing);
    assert_eq!(carousel_events(&session.tick(ms(120_000))), 0);
    assert_eq!(session.carousel().unwrap().index, 0);
}

#[test]
fn auto_play_advances_until_touched() {
    let mut session = mount(SessionSettings::default(), featured(3));
    assert_eq!(carousel_events(&session.tick(ms(6_000))), 1);
    assert_eq!(session.carousel().unwrap().index, 1);

    session.carousel_previous();
    assert_eq!(session.carousel().unwrap().index, 0);
    assert_eq!(carousel_events(&session.tick(ms(60_000))), 0);
}

#[test]
fn out_of_range_select_keeps_auto_play() {
    let mut session = mount(SessionSettings::default(), featured(2));
    assert_eq!(
        session.carousel_select(9),
        Err(CarouselError::OutOfRange { index: 9, len: 2 })
    );
    assert!(session.carousel().unwrap().auto_playing);
}

#[test]
fn empty_feed_has_no_carousel() {
    let mut session = mount(SessionSettings::default(), featured(0));
    session.carousel_next();
    assert_eq!(session.carousel(), None);
    assert_eq!(carousel_events(&session.tick(ms(60_000))), 0);
}
