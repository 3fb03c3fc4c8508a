//! Domain layer: the game rules, independent of transport and runtime.

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod scoring;
pub mod transition;
pub mod value_object;
pub mod view;

pub use entity::{
    CARD_CATALOG, CRASH_CARD_NAME, Card, GamePhase, HighestBid, MAX_PLAYERS, MIN_PLAYERS, Player,
    STARTING_MONEY, Session,
};
pub use error::{GameError, MessagePushError, ValueObjectError};
pub use message_pusher::{MessagePusher, OutboundMessage, PusherChannel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use scoring::Standing;
pub use transition::{AdvanceDelay, Narration, Notice, TimerDirective, Transition};
pub use value_object::{PlayerId, PlayerName, Timestamp};
pub use view::{PlayerSummary, PlayerView, SessionSummary, SessionView};
