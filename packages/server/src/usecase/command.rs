//! Commands processed by the session controller, one at a time.

use tokio::sync::oneshot;

use crate::domain::{PlayerId, PusherChannel, SessionSummary};

/// What a connected player asked the session to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    StartGame,
    DeclareItem { item_name: String },
    PlaceBid { amount: i64 },
    CallLiar,
    EndBidding,
    ReturnToLobby,
}

impl Intent {
    /// Event name as used on the wire, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartGame => "request-start-game",
            Self::DeclareItem { .. } => "declare-auction-item",
            Self::PlaceBid { .. } => "place-bid",
            Self::CallLiar => "call-liar",
            Self::EndBidding => "end-bidding",
            Self::ReturnToLobby => "return-to-lobby",
        }
    }
}

#[derive(Debug)]
pub enum Command {
    /// A connection opened: register its channel and seat the player
    Connect {
        player_id: PlayerId,
        sender: PusherChannel,
    },
    /// A connection closed
    Disconnect { player_id: PlayerId },
    Intent { player_id: PlayerId, intent: Intent },
    /// Answer the player with an error without touching the session
    Reject { player_id: PlayerId, message: String },
    /// Fired by the round timer
    AdvanceRound { generation: u64 },
    Summary {
        reply: oneshot::Sender<SessionSummary>,
    },
}
