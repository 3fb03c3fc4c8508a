//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `PusherChannel` を PlayerId で管理
//! - `OutboundMessage` を `ServerMessage` の JSON に変換して送信
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された sender を受け取り、ソケットごとの pusher タスクに
//! JSON 文字列を流すだけです。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{MessagePushError, MessagePusher, OutboundMessage, PlayerId, PusherChannel},
    infrastructure::dto::websocket::ServerMessage,
};

#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のプレイヤーの sender
    clients: Arc<Mutex<HashMap<PlayerId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    fn encode(message: &OutboundMessage) -> Result<String, MessagePushError> {
        let wire: ServerMessage = message.clone().into();
        serde_json::to_string(&wire).map_err(|e| MessagePushError::Encode(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, player_id: PlayerId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Player '{}' registered to MessagePusher", player_id);
        clients.insert(player_id, sender);
    }

    async fn unregister_client(&self, player_id: &PlayerId) {
        let mut clients = self.clients.lock().await;
        clients.remove(player_id);
        tracing::debug!("Player '{}' unregistered from MessagePusher", player_id);
    }

    async fn push_to(
        &self,
        player_id: &PlayerId,
        message: &OutboundMessage,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(message)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(player_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(player_id.to_string()))?;
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::trace!("Pushed message to '{}'", player_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<PlayerId>,
        message: &OutboundMessage,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(message)?;
        let clients = self.clients.lock().await;

        for target in targets {
            match clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => {
                    if let Err(e) = sender.send(content.clone()) {
                        tracing::warn!("Failed to push message to '{}': {}", target, e);
                    }
                }
                None => {
                    tracing::warn!("Player '{}' not found during broadcast, skipping", target);
                }
            }
        }

        Ok(())
    }
}
