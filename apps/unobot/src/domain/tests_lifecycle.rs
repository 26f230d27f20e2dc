// Roster changes and round lifecycle.

use crate::domain::lifecycle::{
    add_player, pause_session, remove_player, start_session, stop_session, JoinEffect,
    LeaveEffect,
};
use crate::domain::test_state_helpers::{card, seeded_rng, table};
use crate::domain::turns::{Turn, TurnAction};
use crate::domain::{Direction, RuleError, Session, DECK_SIZE};

fn three_player_round() -> Session {
    table(
        &[
            ("a", &["R1", "G2"]),
            ("b", &["Y3", "B4"]),
            ("c", &["G5", "Y6"]),
        ],
        "R9",
    )
}

#[test]
fn second_join_moves_session_into_intermission() {
    let mut rng = seeded_rng();
    let mut session = Session::new("g", "c");

    assert_eq!(
        add_player(&mut session, "a", "Ann", 7, &mut rng),
        Ok(JoinEffect::Seated)
    );
    assert!(!session.intermission);

    assert_eq!(
        add_player(&mut session, "b", "Bo", 7, &mut rng),
        Ok(JoinEffect::RoundPending)
    );
    assert!(session.intermission);
    assert!(!session.active);

    assert_eq!(
        add_player(&mut session, "c", "Cy", 7, &mut rng),
        Ok(JoinEffect::Seated)
    );
    assert_eq!(session.seats, vec!["a", "b", "c"]);
}

#[test]
fn mid_round_joiner_is_dealt_in_last() {
    let mut rng = seeded_rng();
    let mut session = three_player_round();

    let effect = add_player(&mut session, "d", "Dee", 7, &mut rng).unwrap();

    assert!(matches!(effect, JoinEffect::DealtIn(ref hand) if hand.len() == 7));
    assert_eq!(session.seats.last().map(String::as_str), Some("d"));
    assert_eq!(session.hand("d").len(), 7);
    assert_eq!(session.card_total(), DECK_SIZE);
}

#[test]
fn duplicate_join_is_rejected() {
    let mut rng = seeded_rng();
    let mut session = three_player_round();
    assert!(matches!(
        add_player(&mut session, "a", "Ann", 7, &mut rng),
        Err(RuleError::AlreadyJoined { here: true, .. })
    ));
}

#[test]
fn turn_holder_leaving_passes_turn_forward() {
    let mut session = three_player_round();
    let top = session.top_card().copied();

    let effect = remove_player(&mut session, "a").unwrap();

    assert_eq!(effect, LeaveEffect::TurnPassed("b".into()));
    assert_eq!(session.turn, Some(Turn::new("b", TurnAction::Play)));
    assert_eq!(session.top_card().copied(), top);
    assert_eq!(session.deck.discard_pile.len(), 3);
    assert_eq!(session.card_total(), DECK_SIZE);
}

#[test]
fn turn_holder_leaving_passes_turn_backward() {
    let mut session = three_player_round();
    session.direction = Direction::Backward;
    session.turn = Some(Turn::new("b", TurnAction::Play));

    let effect = remove_player(&mut session, "b").unwrap();

    assert_eq!(effect, LeaveEffect::TurnPassed("a".into()));
}

#[test]
fn last_seat_leaving_wraps_to_first() {
    let mut session = three_player_round();
    session.turn = Some(Turn::new("c", TurnAction::ForcedDraw { count: 2 }));

    let effect = remove_player(&mut session, "c").unwrap();

    assert_eq!(effect, LeaveEffect::TurnPassed("a".into()));
    assert_eq!(session.turn, Some(Turn::new("a", TurnAction::Play)));
}

#[test]
fn leaving_on_an_uncolored_wild_hands_over_the_color_choice() {
    let mut session = table(
        &[("a", &["R1"]), ("b", &["Y3"]), ("c", &["G5"])],
        "W",
    );
    session.turn = Some(Turn::new("a", TurnAction::ChooseColor { pending_draw: 0 }));

    remove_player(&mut session, "a").unwrap();

    assert_eq!(
        session.turn,
        Some(Turn::new("b", TurnAction::ChooseColor { pending_draw: 0 }))
    );
    assert_eq!(session.top_card(), Some(&card("W")));
}

#[test]
fn non_holder_leaving_keeps_turn() {
    let mut session = three_player_round();
    let effect = remove_player(&mut session, "c").unwrap();
    assert_eq!(effect, LeaveEffect::Left);
    assert_eq!(session.turn_holder(), Some("a"));
    assert!(session.player("c").is_none());
}

#[test]
fn dropping_below_two_players_stops_round_but_keeps_scores() {
    let mut session = table(&[("a", &["R1"]), ("b", &["Y3"])], "R9");
    session.scores.insert("a".into(), 30);

    let effect = remove_player(&mut session, "b").unwrap();

    assert_eq!(effect, LeaveEffect::RoundStopped);
    assert!(!session.active);
    assert!(session.turn.is_none());
    assert!(session.deck.is_empty());
    assert!(session.hand("a").is_empty());
    assert_eq!(session.scores.get("a"), Some(&30));
}

#[test]
fn leaving_an_idle_session_just_unseats() {
    let mut rng = seeded_rng();
    let mut session = Session::new("g", "c");
    add_player(&mut session, "a", "Ann", 7, &mut rng).unwrap();

    assert_eq!(remove_player(&mut session, "a"), Ok(LeaveEffect::Left));
    assert!(session.seats.is_empty());
    assert_eq!(remove_player(&mut session, "a"), Err(RuleError::AlreadyLeft));
}

#[test]
fn start_stop_and_pause() {
    let mut rng = seeded_rng();
    let mut session = Session::new("g", "c");
    add_player(&mut session, "a", "Ann", 7, &mut rng).unwrap();
    add_player(&mut session, "b", "Bo", 7, &mut rng).unwrap();

    start_session(&mut session, 7, &mut rng);
    assert!(session.active);
    assert!(!session.intermission);
    assert_eq!(session.card_total(), DECK_SIZE);
    assert!(session.turn.is_some());

    stop_session(&mut session);
    assert!(!session.active);
    assert!(session.turn.is_none());
    assert_eq!(session.card_total(), 0);
    assert_eq!(session.seats.len(), 2);

    pause_session(&mut session);
    assert!(session.intermission);
    assert!(!session.active);
}
