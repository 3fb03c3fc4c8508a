//! Domain error types.
//!
//! `GameError` covers every rule violation a player can trigger. Its
//! `Display` text is the message pushed back to the offending player on the
//! `error` event, so it is written for players rather than operators.

use thiserror::Error;

/// Invalid input for a value object
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("player id must not be empty")]
    EmptyPlayerId,

    #[error("player id must be at most {max} bytes (got {actual})")]
    PlayerIdTooLong { max: usize, actual: usize },
}

/// Validation failure of a player intent. The session is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("ホストプレイヤーのみがゲームを開始できます。")]
    NotHost,

    #[error("ゲームはすでに開始されています。")]
    GameAlreadyStarted,

    #[error("ゲームを開始するには3人または4人のプレイヤーが必要です。")]
    InvalidPlayerCount { count: usize },

    #[error("入札フェーズではありません。")]
    NotBiddingPhase,

    #[error("親は入札できません。")]
    MasterCannotBid,

    #[error("入札額は現在の最高入札額 {highest}億 より大きくする必要があります。")]
    BidTooLow { highest: i64 },

    #[error("所持金が足りません。現在の所持金は {money}億 です。")]
    InsufficientFunds { money: i64 },

    #[error("ライアーコールは入札フェーズでのみ行えます。")]
    LiarCallOutsideBidding,

    #[error("まだ誰も入札していません。")]
    NoBidYet,

    #[error("親はライアーコールできません。")]
    MasterCannotCallLiar,

    #[error("ホストプレイヤーのみがロビーに戻せます。")]
    NotHostForLobby,

    #[error("ゲームはまだ終了していません。")]
    GameNotOver,

    #[error("このプレイヤーはすでに参加しています。")]
    AlreadyJoined,

    #[error("プレイヤーが見つかりません。")]
    UnknownPlayer,

    #[error("ラウンドの状態が不正です。")]
    InconsistentRound,
}

/// Failure while pushing a message to connected players
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' is not registered")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to encode message: {0}")]
    Encode(String),
}
