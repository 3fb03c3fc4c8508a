//! Delayed round advancement.

use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};

use super::command::Command;

/// At most one pending round advance.
///
/// Scheduling replaces the pending advance. The timer task holds only a weak
/// sender so it never keeps the controller alive on its own.
#[derive(Debug, Default)]
pub struct RoundTimer {
    pending: Option<JoinHandle<()>>,
}

impl RoundTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(
        &mut self,
        delay: Duration,
        generation: u64,
        commands: mpsc::WeakSender<Command>,
    ) {
        self.cancel();
        tracing::debug!(
            "Scheduling round advance for generation {} in {:?}",
            generation,
            delay
        );

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(commands) = commands.upgrade() else {
                return;
            };
            if commands
                .send(Command::AdvanceRound { generation })
                .await
                .is_err()
            {
                tracing::debug!("Session closed before round advance {}", generation);
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RoundTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
