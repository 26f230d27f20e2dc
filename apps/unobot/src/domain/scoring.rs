use super::cards_logic::card_points;
use super::state::Session;

/// Sum the cards left in every other hand and credit them to `winner`.
///
/// Returns the points earned this round.
pub fn score_cards(session: &mut Session, winner: &str) -> u32 {
    let points: u32 = session
        .players
        .values()
        .filter(|p| p.id != winner)
        .flat_map(|p| p.hand.iter())
        .map(card_points)
        .sum();

    *session.scores.entry(winner.to_owned()).or_insert(0) += points;
    points
}
