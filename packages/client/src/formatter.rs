//! Message formatting utilities for client display.

use liar_auction_server::infrastructure::dto::websocket::{
    CardDto, GamePhaseDto, GameStateDto, PlayerDto, ServerMessage,
};
use liar_auction_shared::time::timestamp_to_jst_clock;

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any event pushed by the server
    pub fn format_server_message(message: &ServerMessage) -> String {
        match message {
            ServerMessage::GameStarted(state) => {
                format!("\n*** ゲーム開始！ ***{}", Self::format_state(state))
            }
            ServerMessage::UpdateGameState(state) => Self::format_state(state),
            ServerMessage::NewDeclaration(text)
            | ServerMessage::NewBid(text)
            | ServerMessage::LiarResult(text)
            | ServerMessage::AuctionResult(text)
            | ServerMessage::NewRound(text) => Self::format_narration(text),
            ServerMessage::GameOver(text) => format!("\n{}\n{}\n{}\n", RULE, text, RULE),
            ServerMessage::Error(text) => format!("\n! {}\n", text),
        }
    }

    /// Format the session snapshot, marking the viewer's own row
    pub fn format_state(state: &GameStateDto) -> String {
        let mut output = String::new();
        output.push_str("\n\n");
        output.push_str(RULE);
        output.push('\n');

        let master = state
            .auction_master
            .as_deref()
            .and_then(|id| state.name_of(id))
            .unwrap_or("-");
        output.push_str(&format!(
            "Phase: {} | Deck: {} | Master: {}\n",
            Self::phase_label(state.game_phase),
            state.deck_count,
            master
        ));

        if let Some(item) = &state.declared_item_name {
            let bid = match state.highest_bid.bidder.as_deref() {
                Some(bidder) => format!(
                    "{}億 by {}",
                    state.highest_bid.amount,
                    state.name_of(bidder).unwrap_or("?")
                ),
                None => "none".to_string(),
            };
            output.push_str(&format!("Declared: {} | Highest bid: {}\n", item, bid));
        }
        if let Some(card) = &state.current_auction_card {
            output.push_str(&format!("Revealed: {}\n", Self::format_card(card)));
        }

        output.push_str("Players:\n");
        if state.players.is_empty() {
            output.push_str("(No players)\n");
        }
        for player in &state.players {
            output.push_str(&Self::format_player(state, player));
            output.push('\n');
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    fn format_player(state: &GameStateDto, player: &PlayerDto) -> String {
        let mut tags = Vec::new();
        if state.host_id.as_deref() == Some(player.id.as_str()) {
            tags.push("host");
        }
        if state.auction_master.as_deref() == Some(player.id.as_str()) {
            tags.push("master");
        }
        if player.id == state.viewer_id {
            tags.push("me");
        }
        let tags = if tags.is_empty() {
            String::new()
        } else {
            format!(" ({})", tags.join(", "))
        };

        let cards: Vec<String> = player.point_cards.iter().map(Self::format_card).collect();
        let mut line = format!(
            "  {}{} - {}億, cards: [{}]",
            player.name,
            tags,
            player.money,
            cards.join(", ")
        );
        if let Some(card) = &player.dealt_card {
            line.push_str(&format!(", hand: {}", Self::format_card(card)));
        }
        if let Some(assets) = player.final_assets {
            line.push_str(&format!(", final: {}億", assets));
        }
        if let Some(joined) = timestamp_to_jst_clock(player.joined_at) {
            line.push_str(&format!(" - joined {}", joined));
        }
        line
    }

    pub fn format_card(card: &CardDto) -> String {
        format!("{}({})", card.name, card.value)
    }

    pub fn format_narration(text: &str) -> String {
        format!("\n>> {}\n", text)
    }

    fn phase_label(phase: GamePhaseDto) -> &'static str {
        match phase {
            GamePhaseDto::Waiting => "waiting",
            GamePhaseDto::Auction => "auction",
            GamePhaseDto::Bidding => "bidding",
            GamePhaseDto::Result => "result",
            GamePhaseDto::End => "end",
        }
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }

    pub fn format_help() -> String {
        [
            "Commands:",
            "  start            start the game (host only)",
            "  declare <name>   declare the item you are auctioning (master only)",
            "  bid <amount>     place a bid",
            "  liar             call the master a liar",
            "  end              end bidding (master only)",
            "  lobby            back to the lobby after a game (host only)",
            "  help             show this help",
            "  quit             leave the game",
        ]
        .join("\n")
            + "\n"
    }
}
