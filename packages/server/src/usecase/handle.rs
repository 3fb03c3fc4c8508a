use tokio::sync::{mpsc, oneshot};

use crate::domain::{PlayerId, PusherChannel, SessionSummary};

use super::{
    command::{Command, Intent},
    error::UseCaseError,
};

/// Cloneable entry point to the session controller.
///
/// The controller stops once every handle is dropped.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
}

impl SessionHandle {
    pub fn new(commands: mpsc::Sender<Command>) -> Self {
        Self { commands }
    }

    pub async fn connect(
        &self,
        player_id: PlayerId,
        sender: PusherChannel,
    ) -> Result<(), UseCaseError> {
        self.send(Command::Connect { player_id, sender }).await
    }

    pub async fn disconnect(&self, player_id: PlayerId) -> Result<(), UseCaseError> {
        self.send(Command::Disconnect { player_id }).await
    }

    pub async fn dispatch(&self, player_id: PlayerId, intent: Intent) -> Result<(), UseCaseError> {
        self.send(Command::Intent { player_id, intent }).await
    }

    pub async fn reject(&self, player_id: PlayerId, message: String) -> Result<(), UseCaseError> {
        self.send(Command::Reject { player_id, message }).await
    }

    /// Public state, answered after every command queued before it
    pub async fn summary(&self) -> Result<SessionSummary, UseCaseError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Summary { reply }).await?;
        response.await.map_err(|_| UseCaseError::SessionClosed)
    }

    async fn send(&self, command: Command) -> Result<(), UseCaseError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| UseCaseError::SessionClosed)
    }
}
