//! Terminal client for the Liar Auction game server.
//!
//! Prints every pushed snapshot and narration, and turns typed commands into
//! game intents. All rules are enforced by the server.

mod command;
mod error;
mod formatter;
mod session;
mod ui;

pub use command::{InputCommand, parse_command};
pub use error::ClientError;
pub use formatter::MessageFormatter;
pub use session::run_client_session;
