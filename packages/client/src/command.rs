//! Parsing of typed commands.

use liar_auction_server::infrastructure::dto::websocket::{
    ClientMessage, DeclareAuctionItemPayload, PlaceBidPayload,
};

use crate::error::ClientError;

/// A line typed by the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Forward to the server
    Send(ClientMessage),
    Help,
    Quit,
}

/// Parse one input line. Only the shape is checked, never the game rules.
pub fn parse_command(line: &str) -> Result<InputCommand, ClientError> {
    let line = line.trim();
    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let message = match keyword.to_lowercase().as_str() {
        "help" | "?" => return Ok(InputCommand::Help),
        "quit" | "exit" => return Ok(InputCommand::Quit),
        "start" => ClientMessage::RequestStartGame,
        "declare" => {
            if rest.is_empty() {
                return Err(ClientError::MissingArgument("declare <item name>"));
            }
            ClientMessage::DeclareAuctionItem(DeclareAuctionItemPayload {
                item_name: rest.to_string(),
            })
        }
        "bid" => {
            if rest.is_empty() {
                return Err(ClientError::MissingArgument("bid <amount>"));
            }
            let amount = rest
                .parse::<i64>()
                .map_err(|_| ClientError::InvalidAmount(rest.to_string()))?;
            ClientMessage::PlaceBid(PlaceBidPayload { amount })
        }
        "liar" => ClientMessage::CallLiar,
        "end" => ClientMessage::EndBidding,
        "lobby" => ClientMessage::ReturnToLobby,
        _ => return Err(ClientError::UnknownCommand(keyword.to_string())),
    };

    Ok(InputCommand::Send(message))
}
