//! Game session controller.
//!
//! A single task owns the [`Session`] and handles [`Command`]s strictly in
//! arrival order. Every resulting message is pushed before the next command
//! is read, so all players observe the same sequence of snapshots and
//! narrations.

use std::sync::Arc;

use rand::rngs::StdRng;
use tokio::sync::mpsc;

use liar_auction_shared::time::Clock;

use crate::domain::{
    GameError, MessagePusher, Notice, OutboundMessage, PlayerId, Session, SessionSummary,
    SessionView, TimerDirective, Timestamp, Transition,
};

use super::{
    command::{Command, Intent},
    config::SessionConfig,
    handle::SessionHandle,
    timer::RoundTimer,
};

/// Capacity of the command queue between connections and the controller
pub const COMMAND_BUFFER: usize = 256;

pub struct SessionController {
    session: Session,
    /// MessagePusher（メッセージ通知の抽象化）
    pusher: Arc<dyn MessagePusher>,
    config: SessionConfig,
    clock: Arc<dyn Clock>,
    rng: StdRng,
    timer: RoundTimer,
    /// Handed to the round timer so delayed advances come back through the queue
    commands: mpsc::WeakSender<Command>,
}

impl SessionController {
    pub fn new(
        pusher: Arc<dyn MessagePusher>,
        config: SessionConfig,
        clock: Arc<dyn Clock>,
        rng: StdRng,
        commands: mpsc::WeakSender<Command>,
    ) -> Self {
        Self {
            session: Session::new(),
            pusher,
            config,
            clock,
            rng,
            timer: RoundTimer::new(),
            commands,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Process commands until every [`SessionHandle`] is dropped
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        tracing::info!("Session controller started");
        while let Some(command) = commands.recv().await {
            self.handle(command).await;
        }
        self.timer.cancel();
        tracing::info!("Session controller stopped");
    }

    pub async fn handle(&mut self, command: Command) {
        match command {
            Command::Connect { player_id, sender } => {
                self.pusher.register_client(player_id.clone(), sender).await;
                let joined_at = Timestamp::new(self.clock.now_jst_millis());
                let result = self.session.join(player_id.clone(), joined_at);
                if result.is_ok() {
                    tracing::info!(
                        "Player '{}' joined ({} seated)",
                        player_id,
                        self.session.players().len()
                    );
                }
                self.settle(&player_id, result).await;
            }
            Command::Disconnect { player_id } => {
                self.pusher.unregister_client(&player_id).await;
                match self.session.leave(&player_id) {
                    Ok(transition) => {
                        tracing::info!(
                            "Player '{}' left ({} seated)",
                            player_id,
                            self.session.players().len()
                        );
                        self.apply(transition).await;
                    }
                    Err(e) => tracing::warn!("Ignoring disconnect of '{}': {}", player_id, e),
                }
            }
            Command::Intent { player_id, intent } => {
                tracing::debug!("'{}' sent {}", player_id, intent.name());
                let result = self.dispatch(&player_id, intent);
                self.settle(&player_id, result).await;
            }
            Command::Reject { player_id, message } => {
                self.push_error(&player_id, message).await;
            }
            Command::AdvanceRound { generation } => {
                let transition = self.session.advance_round(generation);
                if transition.is_empty() {
                    tracing::debug!("Ignoring stale round advance {}", generation);
                }
                self.apply(transition).await;
            }
            Command::Summary { reply } => {
                if reply
                    .send(SessionSummary::from_session(&self.session))
                    .is_err()
                {
                    tracing::debug!("Summary requester went away");
                }
            }
        }
    }

    fn dispatch(&mut self, player_id: &PlayerId, intent: Intent) -> Result<Transition, GameError> {
        match intent {
            Intent::StartGame => self.session.start_game(player_id, &mut self.rng),
            Intent::DeclareItem { item_name } => {
                Ok(self.session.declare_item(player_id, item_name))
            }
            Intent::PlaceBid { amount } => self.session.place_bid(player_id, amount),
            Intent::CallLiar => self.session.call_liar(player_id),
            Intent::EndBidding => self.session.end_bidding(player_id),
            Intent::ReturnToLobby => self.session.return_to_lobby(player_id),
        }
    }

    /// Publish a successful transition, or answer the requester alone
    async fn settle(&mut self, requester: &PlayerId, result: Result<Transition, GameError>) {
        match result {
            Ok(transition) => self.apply(transition).await,
            Err(e) => {
                tracing::info!("Rejected request from '{}': {}", requester, e);
                self.push_error(requester, e.to_string()).await;
            }
        }
    }

    async fn apply(&mut self, transition: Transition) {
        let Transition { notices, timer } = transition;

        for notice in notices {
            match notice {
                Notice::GameStarted => self.push_snapshots(OutboundMessage::GameStarted).await,
                Notice::StateChanged => {
                    self.push_snapshots(OutboundMessage::UpdateGameState).await
                }
                Notice::Narration(narration) => {
                    let message = OutboundMessage::Narration(narration);
                    if let Err(e) = self
                        .pusher
                        .broadcast(self.session.player_ids(), &message)
                        .await
                    {
                        tracing::warn!("Failed to broadcast narration: {}", e);
                    }
                }
            }
        }

        match timer {
            TimerDirective::Keep => {}
            TimerDirective::Schedule { delay, generation } => {
                tracing::debug!(
                    "Round {} settled ({:?}), {}億 held by players",
                    generation,
                    delay,
                    self.session.total_money()
                );
                self.timer.schedule(
                    self.config.delay_for(delay),
                    generation,
                    self.commands.clone(),
                );
            }
            TimerDirective::Cancel => {
                if self.timer.is_pending() {
                    tracing::debug!("Cancelling pending round advance");
                }
                self.timer.cancel();
            }
        }
    }

    /// Each player gets a snapshot projected for them
    async fn push_snapshots(&self, wrap: fn(SessionView) -> OutboundMessage) {
        for player_id in self.session.player_ids() {
            let view = SessionView::for_viewer(&self.session, &player_id);
            if let Err(e) = self.pusher.push_to(&player_id, &wrap(view)).await {
                tracing::warn!("Failed to push state to '{}': {}", player_id, e);
            }
        }
    }

    async fn push_error(&self, player_id: &PlayerId, message: String) {
        if let Err(e) = self
            .pusher
            .push_to(player_id, &OutboundMessage::Error(message))
            .await
        {
            tracing::warn!("Failed to push error to '{}': {}", player_id, e);
        }
    }
}

/// Spawn the controller task and return a handle to it
pub fn spawn_session(
    pusher: Arc<dyn MessagePusher>,
    config: SessionConfig,
    clock: Arc<dyn Clock>,
    rng: StdRng,
) -> SessionHandle {
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    let controller = SessionController::new(pusher, config, clock, rng, tx.downgrade());
    tokio::spawn(controller.run(rx));
    SessionHandle::new(tx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        GamePhase, MessagePushError, MockMessagePusher, Narration, PusherChannel,
    };
    use async_trait::async_trait;
    use liar_auction_shared::time::FixedClock;
    use rand::SeedableRng;
    use std::time::Duration;
    use tokio::sync::Mutex;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - Command を受けて Session を操作し、結果を MessagePusher に流すこと
    // - 状態スナップショットは各プレイヤー向けに個別に作られること
    // - エラーは要求したプレイヤーだけに返ること
    // - 遅延ラウンド進行がタイマー経由で届き、古いタイマーは無視・破棄されること
    //
    // 【なぜこのテストが必要か】
    // - 配信の順序と宛先はゲームの公平性に直結する（手札の漏洩、エラーの誤配信）
    // - タイマーの競合は実時間では再現しにくいため、時間を止めて検証する
    // ========================================

    /// Records every push, in order
    #[derive(Default)]
    struct RecordingPusher {
        log: Mutex<Vec<(PlayerId, OutboundMessage)>>,
    }

    impl RecordingPusher {
        async fn take(&self) -> Vec<(PlayerId, OutboundMessage)> {
            std::mem::take(&mut *self.log.lock().await)
        }

        async fn received_by(&self, player_id: &PlayerId) -> Vec<OutboundMessage> {
            self.log
                .lock()
                .await
                .iter()
                .filter(|(id, _)| id == player_id)
                .map(|(_, message)| message.clone())
                .collect()
        }
    }

    #[async_trait]
    impl MessagePusher for RecordingPusher {
        async fn register_client(&self, _player_id: PlayerId, _sender: PusherChannel) {}

        async fn unregister_client(&self, _player_id: &PlayerId) {}

        async fn push_to(
            &self,
            player_id: &PlayerId,
            message: &OutboundMessage,
        ) -> Result<(), MessagePushError> {
            self.log
                .lock()
                .await
                .push((player_id.clone(), message.clone()));
            Ok(())
        }

        async fn broadcast(
            &self,
            targets: Vec<PlayerId>,
            message: &OutboundMessage,
        ) -> Result<(), MessagePushError> {
            let mut log = self.log.lock().await;
            for target in targets {
                log.push((target, message.clone()));
            }
            Ok(())
        }
    }

    fn id(value: &str) -> PlayerId {
        PlayerId::new(value.to_string()).unwrap()
    }

    fn channel() -> PusherChannel {
        mpsc::unbounded_channel().0
    }

    fn create_controller(
        pusher: Arc<dyn MessagePusher>,
    ) -> (SessionController, mpsc::Sender<Command>) {
        let (tx, _rx) = mpsc::channel(COMMAND_BUFFER);
        let controller = SessionController::new(
            pusher,
            SessionConfig::default(),
            Arc::new(FixedClock::new(1_700_000_000_000)),
            StdRng::seed_from_u64(5),
            tx.downgrade(),
        );
        (controller, tx)
    }

    async fn seat(controller: &mut SessionController, ids: &[&str]) {
        for value in ids {
            controller
                .handle(Command::Connect {
                    player_id: id(value),
                    sender: channel(),
                })
                .await;
        }
    }

    async fn intent(controller: &mut SessionController, player: &str, intent: Intent) {
        controller
            .handle(Command::Intent {
                player_id: id(player),
                intent,
            })
            .await;
    }

    fn narration_texts(messages: &[OutboundMessage]) -> Vec<Narration> {
        messages
            .iter()
            .filter_map(|m| match m {
                OutboundMessage::Narration(n) => Some(n.clone()),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_connect_pushes_projected_state_to_everyone() {
        // テスト項目: 参加のたびに全員へ、それぞれの視点のスナップショットが届く
        // given (前提条件):
        let pusher = Arc::new(RecordingPusher::default());
        let (mut controller, _tx) = create_controller(pusher.clone());

        // when (操作):
        seat(&mut controller, &["p1", "p2"]).await;

        // then (期待する結果):
        let log = pusher.take().await;
        assert_eq!(log.len(), 1 + 2);
        for (recipient, message) in &log {
            match message {
                OutboundMessage::UpdateGameState(view) => {
                    assert_eq!(&view.viewer_id, recipient)
                }
                other => panic!("unexpected message: {:?}", other),
            }
        }
        let joined_at = controller.session().players()[0].joined_at;
        assert_eq!(joined_at, Timestamp::new(1_700_000_000_000));
    }

    #[tokio::test]
    async fn test_rejected_start_is_reported_to_requester_only() {
        // テスト項目: ホスト以外の開始要求のエラーは要求者だけに届き、状態は変わらない
        // given (前提条件):
        let pusher = Arc::new(RecordingPusher::default());
        let (mut controller, _tx) = create_controller(pusher.clone());
        seat(&mut controller, &["p1", "p2", "p3"]).await;
        pusher.take().await;

        // when (操作):
        intent(&mut controller, "p2", Intent::StartGame).await;

        // then (期待する結果):
        let log = pusher.take().await;
        assert_eq!(
            log,
            vec![(
                id("p2"),
                OutboundMessage::Error("ホストプレイヤーのみがゲームを開始できます。".to_string())
            )]
        );
        assert_eq!(controller.session().phase(), GamePhase::Waiting);
    }

    #[tokio::test]
    async fn test_start_game_sends_game_started_then_state() {
        // テスト項目: ゲーム開始時は各プレイヤーに game-started の後に update-game-state が届き、自分の手札だけが見える
        // given (前提条件):
        let pusher = Arc::new(RecordingPusher::default());
        let (mut controller, _tx) = create_controller(pusher.clone());
        seat(&mut controller, &["p1", "p2", "p3"]).await;
        pusher.take().await;

        // when (操作):
        intent(&mut controller, "p1", Intent::StartGame).await;

        // then (期待する結果):
        let received = pusher.received_by(&id("p3")).await;
        assert_eq!(received.len(), 2);
        let OutboundMessage::GameStarted(view) = &received[0] else {
            panic!("expected game-started first: {:?}", received[0]);
        };
        assert!(matches!(received[1], OutboundMessage::UpdateGameState(_)));
        let visible: Vec<&PlayerId> = view
            .players
            .iter()
            .filter(|p| p.dealt_card.is_some())
            .map(|p| &p.id)
            .collect();
        assert_eq!(visible, vec![&id("p3")]);
        assert_eq!(view.deck_count, 7);
    }

    #[tokio::test]
    async fn test_reject_pushes_error_without_touching_session() {
        // テスト項目: 不正なリクエストの通知は要求者だけに届く
        // given (前提条件):
        let pusher = Arc::new(RecordingPusher::default());
        let (mut controller, _tx) = create_controller(pusher.clone());
        seat(&mut controller, &["p1", "p2"]).await;
        pusher.take().await;

        // when (操作):
        controller
            .handle(Command::Reject {
                player_id: id("p1"),
                message: "不正なリクエストです。".to_string(),
            })
            .await;

        // then (期待する結果):
        assert_eq!(
            pusher.take().await,
            vec![(
                id("p1"),
                OutboundMessage::Error("不正なリクエストです。".to_string())
            )]
        );
    }

    #[tokio::test]
    async fn test_narrations_follow_state_in_order() {
        // テスト項目: 入札すると全員にスナップショットが届いた後で入札ナレーションが届く
        // given (前提条件):
        let pusher = Arc::new(RecordingPusher::default());
        let (mut controller, _tx) = create_controller(pusher.clone());
        seat(&mut controller, &["p1", "p2", "p3"]).await;
        intent(&mut controller, "p1", Intent::StartGame).await;
        intent(
            &mut controller,
            "p1",
            Intent::DeclareItem {
                item_name: "ダイヤ".to_string(),
            },
        )
        .await;
        pusher.take().await;

        // when (操作):
        intent(&mut controller, "p2", Intent::PlaceBid { amount: 100 }).await;

        // then (期待する結果):
        let log = pusher.take().await;
        assert_eq!(log.len(), 3 + 3);
        assert!(log[..3]
            .iter()
            .all(|(_, m)| matches!(m, OutboundMessage::UpdateGameState(_))));
        assert!(log[3..].iter().all(|(_, m)| *m
            == OutboundMessage::Narration(Narration::Bid(
                "プレイヤー 2が100億で入札しました！".to_string()
            ))));
    }

    #[tokio::test]
    async fn test_stale_advance_pushes_nothing() {
        // テスト項目: 世代の合わない AdvanceRound は何も配信しない
        // given (前提条件):
        let pusher = Arc::new(RecordingPusher::default());
        let (mut controller, _tx) = create_controller(pusher.clone());
        seat(&mut controller, &["p1", "p2", "p3"]).await;
        intent(&mut controller, "p1", Intent::StartGame).await;
        pusher.take().await;

        // when (操作):
        controller
            .handle(Command::AdvanceRound { generation: 999 })
            .await;

        // then (期待する結果):
        assert!(pusher.take().await.is_empty());
        assert_eq!(controller.session().phase(), GamePhase::Auction);
    }

    #[tokio::test]
    async fn test_invalid_bid_goes_to_requester_via_push_to() {
        // テスト項目: フェーズ外の入札はエラーとして push_to で要求者にだけ送られ、broadcast は呼ばれない
        // given (前提条件):
        let mut mock = MockMessagePusher::new();
        mock.expect_register_client().returning(|_, _| ());
        mock.expect_push_to()
            .withf(|player_id, message| {
                player_id.as_str() == "p1" && matches!(message, OutboundMessage::UpdateGameState(_))
            })
            .times(1)
            .returning(|_, _| Ok(()));
        mock.expect_push_to()
            .withf(|player_id, message| {
                player_id.as_str() == "p1"
                    && matches!(message, OutboundMessage::Error(text) if text == "入札フェーズではありません。")
            })
            .times(1)
            .returning(|_, _| Ok(()));
        mock.expect_broadcast().never();
        let (mut controller, _tx) = create_controller(Arc::new(mock));
        seat(&mut controller, &["p1"]).await;

        // when (操作):
        intent(&mut controller, "p1", Intent::PlaceBid { amount: 100 }).await;

        // then (期待する結果): 期待値は MockMessagePusher の drop 時に検証される
        assert_eq!(controller.session().highest_bid().amount, 0);
    }

    #[tokio::test]
    async fn test_push_failure_does_not_stop_processing() {
        // テスト項目: 配信に失敗しても Session の更新は行われ、処理は続く
        // given (前提条件):
        let mut mock = MockMessagePusher::new();
        mock.expect_register_client().returning(|_, _| ());
        mock.expect_push_to()
            .returning(|player_id, _| Err(MessagePushError::ClientNotFound(player_id.to_string())));
        let (mut controller, _tx) = create_controller(Arc::new(mock));

        // when (操作):
        seat(&mut controller, &["p1", "p2"]).await;

        // then (期待する結果):
        assert_eq!(controller.session().players().len(), 2);
        assert_eq!(controller.session().host_id(), Some(&id("p1")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_round_advances_after_result_delay() {
        // テスト項目: 落札後、結果表示の遅延が過ぎると次のラウンドが始まり親が交代する
        // given (前提条件):
        let pusher = Arc::new(RecordingPusher::default());
        let handle = spawn_session(
            pusher.clone(),
            SessionConfig::default(),
            Arc::new(FixedClock::new(0)),
            StdRng::seed_from_u64(8),
        );
        for value in ["p1", "p2", "p3"] {
            handle.connect(id(value), channel()).await.unwrap();
        }
        handle.dispatch(id("p1"), Intent::StartGame).await.unwrap();
        handle
            .dispatch(
                id("p1"),
                Intent::DeclareItem {
                    item_name: "ダイヤ".to_string(),
                },
            )
            .await
            .unwrap();
        handle
            .dispatch(id("p2"), Intent::PlaceBid { amount: 100 })
            .await
            .unwrap();
        handle.dispatch(id("p1"), Intent::EndBidding).await.unwrap();
        let during = handle.summary().await.unwrap();
        pusher.take().await;

        // when (操作):
        tokio::time::sleep(Duration::from_secs(6)).await;

        // then (期待する結果):
        assert_eq!(during.phase, GamePhase::Result);
        let after = handle.summary().await.unwrap();
        assert_eq!(after.phase, GamePhase::Auction);
        assert_eq!(after.deck_count, 4);
        assert_eq!(after.players[0].money, 1100);
        assert_eq!(after.players[1].money, 900);
        assert_eq!(after.players[1].point_card_count, 1);
        let narrations = narration_texts(&pusher.received_by(&id("p3")).await);
        assert_eq!(
            narrations,
            vec![Narration::NewRound(
                "次のラウンドを開始します。新しい親は プレイヤー 2 です。".to_string()
            )]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_advance_before_delay_elapses() {
        // テスト項目: 入札なし終了の後、3秒経つまでは次のラウンドに進まない
        // given (前提条件):
        let pusher = Arc::new(RecordingPusher::default());
        let handle = spawn_session(
            pusher.clone(),
            SessionConfig::default(),
            Arc::new(FixedClock::new(0)),
            StdRng::seed_from_u64(8),
        );
        for value in ["p1", "p2", "p3"] {
            handle.connect(id(value), channel()).await.unwrap();
        }
        handle.dispatch(id("p1"), Intent::StartGame).await.unwrap();
        handle
            .dispatch(
                id("p1"),
                Intent::DeclareItem {
                    item_name: "ワイン".to_string(),
                },
            )
            .await
            .unwrap();
        handle.dispatch(id("p1"), Intent::EndBidding).await.unwrap();

        // when (操作):
        tokio::time::sleep(Duration::from_secs(2)).await;
        let early = handle.summary().await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        let late = handle.summary().await.unwrap();

        // then (期待する結果):
        assert_eq!(early.phase, GamePhase::Result);
        assert_eq!(early.deck_count, 7);
        assert_eq!(late.phase, GamePhase::Auction);
        assert_eq!(late.deck_count, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_master_leaving_cancels_pending_advance() {
        // テスト項目: 結果表示中に親が退出すると即座に次のラウンドが始まり、保留中の進行は発火しない
        // given (前提条件):
        let pusher = Arc::new(RecordingPusher::default());
        let handle = spawn_session(
            pusher.clone(),
            SessionConfig::default(),
            Arc::new(FixedClock::new(0)),
            StdRng::seed_from_u64(8),
        );
        for value in ["p1", "p2", "p3", "p4"] {
            handle.connect(id(value), channel()).await.unwrap();
        }
        handle.dispatch(id("p1"), Intent::StartGame).await.unwrap();
        handle
            .dispatch(
                id("p1"),
                Intent::DeclareItem {
                    item_name: "ワイン".to_string(),
                },
            )
            .await
            .unwrap();
        handle.dispatch(id("p1"), Intent::EndBidding).await.unwrap();
        handle.summary().await.unwrap();
        pusher.take().await;

        // when (操作):
        handle.disconnect(id("p1")).await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;

        // then (期待する結果):
        let summary = handle.summary().await.unwrap();
        assert_eq!(summary.phase, GamePhase::Auction);
        assert_eq!(summary.deck_count, 6 - 3);
        let new_rounds = narration_texts(&pusher.received_by(&id("p2")).await)
            .into_iter()
            .filter(|n| matches!(n, Narration::NewRound(_)))
            .count();
        assert_eq!(new_rounds, 1);
    }

    #[tokio::test]
    async fn test_controller_stops_when_handles_drop() {
        // テスト項目: すべての SessionHandle が破棄されるとコントローラのタスクが終了する
        // given (前提条件):
        let pusher = Arc::new(RecordingPusher::default());
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        let controller = SessionController::new(
            pusher,
            SessionConfig::default(),
            Arc::new(FixedClock::new(0)),
            StdRng::seed_from_u64(1),
            tx.downgrade(),
        );
        let task = tokio::spawn(controller.run(rx));

        // when (操作):
        drop(tx);

        // then (期待する結果):
        assert!(task.await.is_ok());
    }
}
