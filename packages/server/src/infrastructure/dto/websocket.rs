//! WebSocket event DTOs.
//!
//! Every frame is a JSON text frame shaped `{"event": "<name>", "data": <payload>}`.
//! Payload-less events omit `data`.

use serde::{Deserialize, Serialize};

// ========================================
// Client → Server
// ========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    RequestStartGame,
    DeclareAuctionItem(DeclareAuctionItemPayload),
    PlaceBid(PlaceBidPayload),
    CallLiar,
    EndBidding,
    ReturnToLobby,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclareAuctionItemPayload {
    pub item_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceBidPayload {
    pub amount: i64,
}

// ========================================
// Server → Client
// ========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    GameStarted(GameStateDto),
    UpdateGameState(GameStateDto),
    NewDeclaration(String),
    NewBid(String),
    LiarResult(String),
    AuctionResult(String),
    NewRound(String),
    GameOver(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhaseDto {
    Waiting,
    Auction,
    Bidding,
    Result,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDto {
    pub name: String,
    pub value: i64,
    pub img: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighestBidDto {
    pub bidder: Option<String>,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    pub id: String,
    pub name: String,
    pub money: i64,
    pub point_cards: Vec<CardDto>,
    /// Only set in the recipient's own entry
    pub dealt_card: Option<CardDto>,
    pub has_dealt_card: bool,
    pub joined_at: i64,
    pub final_assets: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingDto {
    pub player_id: String,
    pub name: String,
    pub final_assets: i64,
}

/// Session snapshot as seen by `viewer_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateDto {
    pub viewer_id: String,
    pub players: Vec<PlayerDto>,
    pub host_id: Option<String>,
    pub deck_count: usize,
    pub auction_master: Option<String>,
    pub declared_item_name: Option<String>,
    pub highest_bid: HighestBidDto,
    pub current_auction_card: Option<CardDto>,
    pub game_phase: GamePhaseDto,
    pub final_standings: Vec<StandingDto>,
}

impl GameStateDto {
    pub fn player(&self, id: &str) -> Option<&PlayerDto> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn viewer(&self) -> Option<&PlayerDto> {
        self.player(&self.viewer_id)
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.player(id).map(|p| p.name.as_str())
    }
}
