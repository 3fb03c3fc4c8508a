//! Utilities shared by the Liar Auction server and client.

pub mod logger;
pub mod time;
