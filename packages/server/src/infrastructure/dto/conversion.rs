//! Conversion logic between DTOs and domain types.

use liar_auction_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::{
    Card, GamePhase, HighestBid, Narration, OutboundMessage, PlayerSummary, PlayerView,
    SessionSummary, SessionView, Standing,
};
use crate::infrastructure::dto::{http, websocket as dto};
use crate::usecase::Intent;

// ========================================
// DTO → Domain
// ========================================

impl From<dto::ClientMessage> for Intent {
    fn from(message: dto::ClientMessage) -> Self {
        match message {
            dto::ClientMessage::RequestStartGame => Self::StartGame,
            dto::ClientMessage::DeclareAuctionItem(payload) => Self::DeclareItem {
                item_name: payload.item_name,
            },
            dto::ClientMessage::PlaceBid(payload) => Self::PlaceBid {
                amount: payload.amount,
            },
            dto::ClientMessage::CallLiar => Self::CallLiar,
            dto::ClientMessage::EndBidding => Self::EndBidding,
            dto::ClientMessage::ReturnToLobby => Self::ReturnToLobby,
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<GamePhase> for dto::GamePhaseDto {
    fn from(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Waiting => Self::Waiting,
            GamePhase::Auction => Self::Auction,
            GamePhase::Bidding => Self::Bidding,
            GamePhase::Result => Self::Result,
            GamePhase::End => Self::End,
        }
    }
}

impl From<Card> for dto::CardDto {
    fn from(card: Card) -> Self {
        Self {
            name: card.name.to_string(),
            value: card.value,
            img: card.image.to_string(),
        }
    }
}

impl From<HighestBid> for dto::HighestBidDto {
    fn from(bid: HighestBid) -> Self {
        Self {
            bidder: bid.bidder.map(|id| id.into_string()),
            amount: bid.amount,
        }
    }
}

impl From<Standing> for dto::StandingDto {
    fn from(standing: Standing) -> Self {
        Self {
            player_id: standing.player_id.into_string(),
            name: standing.name.to_string(),
            final_assets: standing.final_assets,
        }
    }
}

impl From<PlayerView> for dto::PlayerDto {
    fn from(player: PlayerView) -> Self {
        Self {
            id: player.id.into_string(),
            name: player.name.to_string(),
            money: player.money,
            point_cards: player.point_cards.into_iter().map(Into::into).collect(),
            dealt_card: player.dealt_card.map(Into::into),
            has_dealt_card: player.has_dealt_card,
            joined_at: player.joined_at.value(),
            final_assets: player.final_assets,
        }
    }
}

impl From<SessionView> for dto::GameStateDto {
    fn from(view: SessionView) -> Self {
        Self {
            viewer_id: view.viewer_id.into_string(),
            players: view.players.into_iter().map(Into::into).collect(),
            host_id: view.host_id.map(|id| id.into_string()),
            deck_count: view.deck_count,
            auction_master: view.auction_master.map(|id| id.into_string()),
            declared_item_name: view.declared_item_name,
            highest_bid: view.highest_bid.into(),
            current_auction_card: view.current_auction_card.map(Into::into),
            game_phase: view.phase.into(),
            final_standings: view.final_standings.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<OutboundMessage> for dto::ServerMessage {
    fn from(message: OutboundMessage) -> Self {
        match message {
            OutboundMessage::GameStarted(view) => Self::GameStarted(view.into()),
            OutboundMessage::UpdateGameState(view) => Self::UpdateGameState(view.into()),
            OutboundMessage::Narration(narration) => match narration {
                Narration::Declaration(text) => Self::NewDeclaration(text),
                Narration::Bid(text) => Self::NewBid(text),
                Narration::LiarResult(text) => Self::LiarResult(text),
                Narration::AuctionResult(text) => Self::AuctionResult(text),
                Narration::NewRound(text) => Self::NewRound(text),
                Narration::GameOver(text) => Self::GameOver(text),
            },
            OutboundMessage::Error(text) => Self::Error(text),
        }
    }
}

impl From<PlayerSummary> for http::PlayerSummaryDto {
    fn from(player: PlayerSummary) -> Self {
        Self {
            name: player.name.to_string(),
            money: player.money,
            point_card_count: player.point_card_count,
            joined_at: timestamp_to_jst_rfc3339(player.joined_at.value()),
        }
    }
}

impl From<SessionSummary> for http::SessionSummaryDto {
    fn from(summary: SessionSummary) -> Self {
        Self {
            phase: summary.phase.into(),
            round: summary.round_generation,
            deck_count: summary.deck_count,
            host_name: summary.host_name.map(|name| name.to_string()),
            players: summary.players.into_iter().map(Into::into).collect(),
        }
    }
}
