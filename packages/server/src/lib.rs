//! Liar Auction game server library.
//!
//! A single in-memory game session is coordinated by one controller task and
//! exposed to browser or terminal clients over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
