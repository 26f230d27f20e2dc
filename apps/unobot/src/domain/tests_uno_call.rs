// UNO declaration, penalty and callout rules.

use crate::domain::moves::play_card;
use crate::domain::test_state_helpers::{seeded_rng, table};
use crate::domain::uno_call::{call, callout, monitor_status, CallResult, CallStatus};
use crate::domain::{RuleError, Session, UnoCallRejection, DECK_SIZE};

fn status(session: &Session, id: &str) -> Option<CallStatus> {
    session.player(id).and_then(|p| p.call_status)
}

fn rejection(reason: UnoCallRejection) -> RuleError {
    RuleError::UnoCallInvalid(reason)
}

fn round() -> Session {
    table(
        &[
            ("a", &["R1", "R2"]),
            ("b", &["R3", "G9", "G8"]),
            ("c", &["R4", "Y9", "Y8"]),
        ],
        "R5",
    )
}

/// Play the first card of the current holder and run the monitor.
fn play_first(session: &mut Session) {
    let holder = session.turn_holder().unwrap().to_string();
    play_card(session, &holder, 0).unwrap();
    monitor_status(session);
}

#[test]
fn one_card_is_tracked_then_notified_after_a_full_cycle() {
    let mut session = round();

    play_first(&mut session);
    assert_eq!(status(&session, "a"), Some(CallStatus::Tracked));

    play_first(&mut session);
    assert_eq!(status(&session, "a"), Some(CallStatus::Tracked));

    play_first(&mut session);
    assert_eq!(session.turn_holder(), Some("a"));
    assert_eq!(status(&session, "a"), Some(CallStatus::Notified));
}

#[test]
fn callout_succeeds_only_once_notified() {
    let mut rng = seeded_rng();
    let mut session = round();

    play_first(&mut session);
    assert_eq!(
        callout(&mut session, "b", "a", &mut rng),
        Err(rejection(UnoCallRejection::GracePeriod))
    );

    play_first(&mut session);
    play_first(&mut session);
    let drawn = callout(&mut session, "b", "a", &mut rng).unwrap();

    assert_eq!(drawn.len(), 2);
    assert_eq!(session.hand("a").len(), 3);
    assert_eq!(status(&session, "a"), None);
    assert_eq!(session.card_total(), DECK_SIZE);
}

#[test]
fn declaring_with_one_card_makes_player_safe() {
    let mut rng = seeded_rng();
    let mut session = round();
    play_first(&mut session);

    assert_eq!(call(&mut session, "a", &mut rng), Ok(CallResult::Declared));
    assert_eq!(status(&session, "a"), Some(CallStatus::Safe));
    assert_eq!(session.hand("a").len(), 1);

    assert_eq!(
        call(&mut session, "a", &mut rng),
        Err(rejection(UnoCallRejection::AlreadySafe))
    );
    assert_eq!(
        callout(&mut session, "c", "a", &mut rng),
        Err(rejection(UnoCallRejection::TargetSafe))
    );

    // Safe survives further turns while still on one card.
    play_first(&mut session);
    play_first(&mut session);
    assert_eq!(status(&session, "a"), Some(CallStatus::Safe));
}

#[test]
fn declaring_unset_with_one_card_is_safe() {
    let mut rng = seeded_rng();
    let mut session = table(&[("a", &["R1"]), ("b", &["G1", "G2"])], "R5");
    assert_eq!(call(&mut session, "a", &mut rng), Ok(CallResult::Declared));
    assert_eq!(status(&session, "a"), Some(CallStatus::Safe));
}

#[test]
fn miscall_costs_two_cards_and_sticks() {
    let mut rng = seeded_rng();
    let mut session = round();

    let result = call(&mut session, "b", &mut rng).unwrap();
    assert!(matches!(result, CallResult::Miscalled(ref cards) if cards.len() == 2));
    assert_eq!(session.hand("b").len(), 5);
    assert_eq!(status(&session, "b"), Some(CallStatus::Penalized));

    monitor_status(&mut session);
    assert_eq!(status(&session, "b"), Some(CallStatus::Penalized));
    assert_eq!(
        callout(&mut session, "a", "b", &mut rng),
        Err(rejection(UnoCallRejection::TargetPenalized))
    );

    assert_eq!(
        call(&mut session, "b", &mut rng),
        Err(rejection(UnoCallRejection::AlreadyPenalized))
    );
    assert_eq!(session.hand("b").len(), 5);
    assert_eq!(session.card_total(), DECK_SIZE);

    session.player_mut("b").unwrap().hand.truncate(1);
    assert_eq!(call(&mut session, "b", &mut rng), Ok(CallResult::Declared));
    assert_eq!(status(&session, "b"), Some(CallStatus::Safe));
}

#[test]
fn safe_status_clears_once_hand_grows() {
    let mut rng = seeded_rng();
    let mut session = table(&[("a", &["R1"]), ("b", &["G1", "G2"])], "R5");
    call(&mut session, "a", &mut rng).unwrap();

    session.deal_to("a", 1, &mut rng);
    monitor_status(&mut session);
    assert_eq!(status(&session, "a"), None);
}

#[test]
fn callout_rejections_are_distinguishable() {
    let mut rng = seeded_rng();
    let mut session = round();

    assert_eq!(
        callout(&mut session, "a", "a", &mut rng),
        Err(RuleError::invalid("You can't call yourself out."))
    );
    assert_eq!(
        callout(&mut session, "a", "nobody", &mut rng),
        Err(rejection(UnoCallRejection::TargetNotPlaying))
    );
    assert_eq!(
        callout(&mut session, "stranger", "a", &mut rng),
        Err(RuleError::NotParticipant)
    );
    assert_eq!(
        callout(&mut session, "a", "b", &mut rng),
        Err(rejection(UnoCallRejection::MoreThanOneCard))
    );

    session.player_mut("c").unwrap().hand.truncate(1);
    assert_eq!(
        callout(&mut session, "a", "c", &mut rng),
        Err(rejection(UnoCallRejection::NotTracked))
    );
}
