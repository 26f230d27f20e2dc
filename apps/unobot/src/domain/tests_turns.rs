// Turn state machine transitions and ownership checks.

use crate::domain::moves::{choose_color, draw_cards, play_card};
use crate::domain::test_state_helpers::{card, seeded_rng, table};
use crate::domain::turns::{check_action, set_first_turn, ActionClass, Turn, TurnAction};
use crate::domain::{Color, Direction, RuleError, Session, DECK_SIZE};

fn action(session: &Session) -> Option<(String, TurnAction)> {
    session
        .turn
        .as_ref()
        .map(|t| (t.player_id.clone(), t.action))
}

fn three_players(top: &str) -> Session {
    table(
        &[
            ("a", &["RS", "Rr", "RD2", "WD4", "W", "R7"]),
            ("b", &["G1", "G2", "B3"]),
            ("c", &["Y1", "Y2", "B4"]),
        ],
        top,
    )
}

#[test]
fn check_action_rejects_outsiders_and_waiting_players() {
    let session = three_players("R5");
    assert_eq!(
        check_action(&session, "zed", ActionClass::Play),
        Err(RuleError::NotParticipant)
    );
    assert_eq!(
        check_action(&session, "b", ActionClass::Play),
        Err(RuleError::WrongTurn)
    );
    assert_eq!(
        check_action(&session, "a", ActionClass::Play),
        Ok(TurnAction::Play)
    );
}

#[test]
fn check_action_names_the_pending_action() {
    let mut session = three_players("R5");
    session.turn = Some(Turn::new("a", TurnAction::ForcedDraw { count: 2 }));

    let err = check_action(&session, "a", ActionClass::Play).unwrap_err();
    assert_eq!(
        err,
        RuleError::WrongAction {
            pending: TurnAction::ForcedDraw { count: 2 }
        }
    );
    assert!(err.user_message().ends_with("You need to draw cards!"));
}

#[test]
fn frozen_turn_rejects_every_class() {
    let mut session = three_players("R5");
    session.turn = Some(Turn::new("a", TurnAction::Frozen));
    for class in [
        ActionClass::Play,
        ActionClass::Draw,
        ActionClass::Keep,
        ActionClass::Color,
    ] {
        assert!(matches!(
            check_action(&session, "a", class),
            Err(RuleError::WrongAction {
                pending: TurnAction::Frozen
            })
        ));
    }
}

#[test]
fn skip_passes_over_the_next_player() {
    let mut session = three_players("R5");
    play_card(&mut session, "a", 0).unwrap();
    assert_eq!(action(&session), Some(("c".into(), TurnAction::Play)));
}

#[test]
fn skip_with_two_players_returns_to_actor() {
    let mut session = table(&[("a", &["RS", "R1"]), ("b", &["G1"])], "R5");
    play_card(&mut session, "a", 0).unwrap();
    assert_eq!(action(&session), Some(("a".into(), TurnAction::Play)));
}

#[test]
fn reverse_with_two_players_returns_to_actor() {
    let mut session = table(&[("a", &["Rr", "R1"]), ("b", &["G1"])], "R5");
    play_card(&mut session, "a", 0).unwrap();
    assert_eq!(action(&session), Some(("a".into(), TurnAction::Play)));
    assert_eq!(session.direction, Direction::Backward);
}

#[test]
fn reverse_with_three_players_flips_rotation() {
    let mut session = three_players("R5");
    play_card(&mut session, "a", 1).unwrap();
    assert_eq!(session.direction, Direction::Backward);
    assert_eq!(action(&session), Some(("c".into(), TurnAction::Play)));
}

#[test]
fn draw_two_forces_next_player_then_skips_them() {
    let mut rng = seeded_rng();
    let mut session = three_players("R5");

    play_card(&mut session, "a", 2).unwrap();
    assert_eq!(
        action(&session),
        Some(("b".into(), TurnAction::ForcedDraw { count: 2 }))
    );

    let pending = check_action(&session, "b", ActionClass::Draw).unwrap();
    let drawn = draw_cards(&mut session, "b", pending, &mut rng);
    assert_eq!(drawn.len(), 2);
    assert_eq!(session.hand("b").len(), 5);
    assert_eq!(action(&session), Some(("c".into(), TurnAction::Play)));
}

#[test]
fn wild_draw_four_chain() {
    let mut rng = seeded_rng();
    let mut session = three_players("R5");

    play_card(&mut session, "a", 3).unwrap();
    assert_eq!(
        action(&session),
        Some(("a".into(), TurnAction::ChooseColor { pending_draw: 4 }))
    );

    let pending = check_action(&session, "a", ActionClass::Color).unwrap();
    choose_color(&mut session, pending, Color::Blue);
    assert_eq!(session.top_card(), Some(&card("BD4")));
    assert_eq!(
        action(&session),
        Some(("b".into(), TurnAction::ForcedDraw { count: 4 }))
    );

    let pending = check_action(&session, "b", ActionClass::Draw).unwrap();
    draw_cards(&mut session, "b", pending, &mut rng);
    assert_eq!(session.hand("b").len(), 7);
    assert_eq!(action(&session), Some(("c".into(), TurnAction::Play)));
    assert_eq!(session.card_total(), DECK_SIZE);
}

#[test]
fn plain_wild_resumes_with_next_player() {
    let mut session = three_players("R5");

    play_card(&mut session, "a", 4).unwrap();
    assert_eq!(
        action(&session),
        Some(("a".into(), TurnAction::ChooseColor { pending_draw: 0 }))
    );

    choose_color(&mut session, TurnAction::ChooseColor { pending_draw: 0 }, Color::Green);
    assert_eq!(session.top_card(), Some(&card("G")));
    assert_eq!(action(&session), Some(("b".into(), TurnAction::Play)));
}

#[test]
fn number_card_moves_one_seat() {
    let mut session = three_players("R5");
    play_card(&mut session, "a", 5).unwrap();
    assert_eq!(action(&session), Some(("b".into(), TurnAction::Play)));
}

fn opening(top: &str) -> Session {
    let mut session = three_players(top);
    session.turn = None;
    set_first_turn(&mut session, &mut seeded_rng());
    session
}

#[test]
fn opening_wild_asks_first_player_for_a_color() {
    let session = opening("W");
    assert_eq!(
        action(&session),
        Some(("a".into(), TurnAction::ChooseColor { pending_draw: 0 }))
    );
}

#[test]
fn opening_draw_two_feeds_first_player() {
    let session = opening("GD2");
    assert_eq!(session.hand("a").len(), 8);
    assert_eq!(action(&session), Some(("b".into(), TurnAction::Play)));
}

#[test]
fn opening_skip_starts_with_second_player() {
    let session = opening("YS");
    assert_eq!(action(&session), Some(("b".into(), TurnAction::Play)));
}

#[test]
fn opening_reverse_starts_with_last_player() {
    let session = opening("Br");
    assert_eq!(session.direction, Direction::Backward);
    assert_eq!(action(&session), Some(("c".into(), TurnAction::Play)));
}

#[test]
fn opening_number_starts_with_first_player() {
    let session = opening("B9");
    assert_eq!(action(&session), Some(("a".into(), TurnAction::Play)));
}

#[test]
fn opening_wild_draw_four_is_replaced() {
    let session = opening("WD4");
    assert_ne!(session.top_card(), Some(&card("WD4")));
    assert!(session.turn.is_some());
    assert_eq!(session.card_total(), DECK_SIZE);
}
