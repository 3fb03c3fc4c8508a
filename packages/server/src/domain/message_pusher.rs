//! Outbound notification port.
//!
//! The controller decides *what* each player receives. Implementations of
//! [`MessagePusher`] decide *how* it reaches them (WebSocket today).

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, transition::Narration, value_object::PlayerId, view::SessionView};

/// Per-connection outbound channel, drained by the socket's pusher task
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// A message addressed to one or more players
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    GameStarted(SessionView),
    UpdateGameState(SessionView),
    Narration(Narration),
    /// Sent to the requester only
    Error(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    async fn register_client(&self, player_id: PlayerId, sender: PusherChannel);

    async fn unregister_client(&self, player_id: &PlayerId);

    async fn push_to(
        &self,
        player_id: &PlayerId,
        message: &OutboundMessage,
    ) -> Result<(), MessagePushError>;

    /// Push the same message to every target. Missing targets are skipped.
    async fn broadcast(
        &self,
        targets: Vec<PlayerId>,
        message: &OutboundMessage,
    ) -> Result<(), MessagePushError>;
}
