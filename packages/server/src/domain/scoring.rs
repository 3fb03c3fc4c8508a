//! End-of-game scoring.
//!
//! Final assets are money plus the value of won cards. Holding the Crash
//! card adds its negative value and also nullifies the holder's single most
//! valuable other card.

use super::{
    entity::{Card, Player},
    value_object::{PlayerId, PlayerName},
};

/// One line of the final ranking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub player_id: PlayerId,
    pub name: PlayerName,
    pub final_assets: i64,
}

/// Total contribution of a set of won cards
pub fn card_contribution(cards: &[Card]) -> i64 {
    let mut counted: Vec<Card> = cards.to_vec();
    let mut total = 0;

    if let Some(crash_index) = counted.iter().position(Card::is_crash) {
        let crash = counted.remove(crash_index);
        total += crash.value;

        let best_index = counted
            .iter()
            .enumerate()
            .max_by_key(|(_, card)| card.value)
            .map(|(index, _)| index);
        if let Some(best_index) = best_index {
            counted.remove(best_index);
        }
    }

    total + counted.iter().map(|card| card.value).sum::<i64>()
}

pub fn final_assets(player: &Player) -> i64 {
    player.money + card_contribution(&player.point_cards)
}

/// Rank players by final assets, highest first. Ties keep seat order.
pub fn rank(players: &[Player]) -> Vec<Standing> {
    let mut standings: Vec<Standing> = players
        .iter()
        .map(|player| Standing {
            player_id: player.id.clone(),
            name: player.name.clone(),
            final_assets: final_assets(player),
        })
        .collect();
    standings.sort_by(|a, b| b.final_assets.cmp(&a.final_assets));
    standings
}

/// Narration announcing the ranking and the winner
pub fn game_over_message(standings: &[Standing]) -> String {
    let mut message = String::from("ゲーム終了！\n---最終結果---\n");
    for (index, standing) in standings.iter().enumerate() {
        message.push_str(&format!(
            "{}. {}: {}億\n",
            index + 1,
            standing.name,
            standing.final_assets
        ));
    }
    if let Some(winner) = standings.first() {
        message.push_str(&format!("\n勝者は {} です！", winner.name));
    }
    message
}
