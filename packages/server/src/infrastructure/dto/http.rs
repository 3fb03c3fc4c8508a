//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::GamePhaseDto;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummaryDto {
    pub name: String,
    pub money: i64,
    pub point_card_count: usize,
    /// JST, RFC 3339
    pub joined_at: Option<String>,
}

/// Public view of the session. Never carries dealt cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummaryDto {
    pub phase: GamePhaseDto,
    pub round: u64,
    pub deck_count: usize,
    pub host_name: Option<String>,
    pub players: Vec<PlayerSummaryDto>,
}
