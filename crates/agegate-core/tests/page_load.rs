//! Behaviour across successive page loads sharing one cookie jar.

use agegate_core::{
    AgeGate, ChoiceStore, FixedClock, FormSelection, GateConfig, GateState, MemoryCookieJar,
    MemoryView, DENIAL_MESSAGE,
};

fn clock() -> FixedClock {
    FixedClock::ymd(2024, 6, 15).unwrap()
}

fn load(jar: &mut MemoryCookieJar) -> AgeGate<MemoryView, &mut MemoryCookieJar, FixedClock> {
    AgeGate::initialize(GateConfig::default(), MemoryView::new(), jar, clock())
        .expect("gate should initialise")
}

#[test]
fn remembered_denial_is_shown_on_next_load_with_form() {
    let mut jar = MemoryCookieJar::new();
    {
        let mut gate = load(&mut jar);
        assert_eq!(gate.submit(FormSelection::new(6, 2003), true), GateState::DeniedShown);
    }

    let gate = load(&mut jar);
    assert_eq!(gate.state(), GateState::DeniedShown);
    assert_eq!(gate.view().message(), Some(DENIAL_MESSAGE));
    assert!(gate.view().is_visible());
    assert_eq!(gate.view().render_count(), 1);
    assert!(gate.form().is_some());
}

#[test]
fn remembered_eligibility_skips_form_on_next_load() {
    let mut jar = MemoryCookieJar::new();
    {
        let mut gate = load(&mut jar);
        assert_eq!(gate.submit(FormSelection::new(5, 2003), true), GateState::Hidden);
    }

    let gate = load(&mut jar);
    assert_eq!(gate.state(), GateState::Hidden);
    assert!(!gate.view().is_visible());
    assert_eq!(gate.view().render_count(), 0);
    assert!(gate.form().is_none());
    assert!(gate.view().message().is_none());
}

#[test]
fn session_only_decision_is_asked_again() {
    let mut jar = MemoryCookieJar::new();
    let before = jar.read();
    {
        let mut gate = load(&mut jar);
        assert_eq!(gate.submit(FormSelection::new(5, 2003), false), GateState::Hidden);
    }
    assert_eq!(jar.read(), before);

    let gate = load(&mut jar);
    assert_eq!(gate.state(), GateState::AwaitingInput);
    assert!(gate.view().is_visible());
}

#[test]
fn previously_denied_visitor_can_be_admitted_and_remembered() {
    let mut jar = MemoryCookieJar::new();
    {
        let mut gate = load(&mut jar);
        gate.submit(FormSelection::new(6, 2003), true);
    }
    {
        let mut gate = load(&mut jar);
        assert_eq!(gate.state(), GateState::DeniedShown);
        assert_eq!(gate.submit(FormSelection::new(0, 1990), true), GateState::Hidden);
    }

    let gate = load(&mut jar);
    assert_eq!(gate.state(), GateState::Hidden);
}

#[test]
fn remember_and_session_paths_render_identically() {
    for selection in [FormSelection::new(5, 2003), FormSelection::new(6, 2003)] {
        let mut remembered = MemoryView::new();
        let mut session = MemoryView::new();

        let mut jar = MemoryCookieJar::new();
        {
            let mut gate = AgeGate::initialize(
                GateConfig::default(),
                &mut remembered,
                &mut jar,
                clock(),
            )
            .unwrap();
            gate.submit(selection, true);
        }
        {
            let mut gate = AgeGate::initialize(
                GateConfig::default(),
                &mut session,
                MemoryCookieJar::new(),
                clock(),
            )
            .unwrap();
            gate.submit(selection, false);
        }

        assert_eq!(remembered.is_visible(), session.is_visible());
        assert_eq!(remembered.message(), session.message());
    }
}

#[test]
fn forgetting_restores_first_visit_behaviour() {
    let mut jar = MemoryCookieJar::new();
    {
        let mut gate = load(&mut jar);
        gate.submit(FormSelection::new(0, 1980), true);
        gate.forget().unwrap();
    }

    let gate = load(&mut jar);
    assert_eq!(gate.state(), GateState::AwaitingInput);
    assert_eq!(gate.view().render_count(), 1);
}

#[test]
fn garbage_cookie_is_treated_as_never_answered() {
    let mut jar = MemoryCookieJar::new();
    jar.assign("is_of_age=yes");

    let gate = load(&mut jar);
    assert_eq!(gate.state(), GateState::AwaitingInput);
    assert!(gate.view().message().is_none());
}
