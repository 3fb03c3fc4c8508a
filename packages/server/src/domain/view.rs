//! Read-only projections of a [`Session`].
//!
//! `SessionView` is what a single connection is allowed to see: its own
//! dealt card, but only a flag for everyone else's. The deck order is never
//! exposed. `SessionSummary` is the public lobby view served over HTTP.

use super::{
    entity::{Card, GamePhase, HighestBid, Player, Session},
    scoring::Standing,
    value_object::{PlayerId, PlayerName, Timestamp},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: PlayerName,
    pub money: i64,
    pub point_cards: Vec<Card>,
    /// Present only in the owner's own view
    pub dealt_card: Option<Card>,
    pub has_dealt_card: bool,
    pub joined_at: Timestamp,
    pub final_assets: Option<i64>,
}

impl PlayerView {
    fn project(player: &Player, viewer: &PlayerId) -> Self {
        let own = &player.id == viewer;
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            money: player.money,
            point_cards: player.point_cards.clone(),
            dealt_card: if own { player.dealt_card } else { None },
            has_dealt_card: player.dealt_card.is_some(),
            joined_at: player.joined_at,
            final_assets: player.final_assets,
        }
    }
}

/// Snapshot of the session as seen by one player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub viewer_id: PlayerId,
    pub players: Vec<PlayerView>,
    pub host_id: Option<PlayerId>,
    pub deck_count: usize,
    pub auction_master: Option<PlayerId>,
    pub declared_item_name: Option<String>,
    pub highest_bid: HighestBid,
    pub current_auction_card: Option<Card>,
    pub phase: GamePhase,
    pub final_standings: Vec<Standing>,
}

impl SessionView {
    pub fn for_viewer(session: &Session, viewer: &PlayerId) -> Self {
        Self {
            viewer_id: viewer.clone(),
            players: session
                .players()
                .iter()
                .map(|p| PlayerView::project(p, viewer))
                .collect(),
            host_id: session.host_id().cloned(),
            deck_count: session.deck_len(),
            auction_master: session.auction_master().cloned(),
            declared_item_name: session.declared_item_name().map(str::to_string),
            highest_bid: session.highest_bid().clone(),
            current_auction_card: session.current_auction_card(),
            phase: session.phase(),
            final_standings: session.final_standings().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSummary {
    pub name: PlayerName,
    pub money: i64,
    pub point_card_count: usize,
    pub joined_at: Timestamp,
}

/// Public state of the session, without any card held privately
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub phase: GamePhase,
    pub round_generation: u64,
    pub deck_count: usize,
    pub host_name: Option<PlayerName>,
    pub players: Vec<PlayerSummary>,
}

impl SessionSummary {
    pub fn from_session(session: &Session) -> Self {
        let host_name = session
            .host_id()
            .and_then(|id| session.player(id))
            .map(|p| p.name.clone());

        Self {
            phase: session.phase(),
            round_generation: session.round_generation(),
            deck_count: session.deck_len(),
            host_name,
            players: session
                .players()
                .iter()
                .map(|p| PlayerSummary {
                    name: p.name.clone(),
                    money: p.money,
                    point_card_count: p.point_cards.len(),
                    joined_at: p.joined_at,
                })
                .collect(),
        }
    }
}
