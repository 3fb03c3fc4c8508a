//! Player entity.

use crate::domain::value_object::{PlayerId, PlayerName, Timestamp};

use super::card::Card;

/// A seated player. Seats are ordered by join time inside the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: PlayerName,
    /// Not clamped: a lying master can end up below zero
    pub money: i64,
    /// Cards won this game, in the order they were won
    pub point_cards: Vec<Card>,
    /// The card privately held this round
    pub dealt_card: Option<Card>,
    pub joined_at: Timestamp,
    /// Set when the game ends
    pub final_assets: Option<i64>,
}

impl Player {
    pub fn new(id: PlayerId, name: PlayerName, joined_at: Timestamp) -> Self {
        Self {
            id,
            name,
            money: 0,
            point_cards: Vec::new(),
            dealt_card: None,
            joined_at,
            final_assets: None,
        }
    }

    /// Clear everything a previous game left behind and grant the given money
    pub fn reset_for_game(&mut self, money: i64) {
        self.money = money;
        self.point_cards.clear();
        self.dealt_card = None;
        self.final_assets = None;
    }
}
