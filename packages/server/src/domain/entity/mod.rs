//! Domain entities.

mod card;
mod player;
mod session;

pub use card::{CARD_CATALOG, CRASH_CARD_NAME, Card};
pub use player::Player;
pub use session::{GamePhase, HighestBid, MAX_PLAYERS, MIN_PLAYERS, STARTING_MONEY, Session};
