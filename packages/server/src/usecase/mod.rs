//! UseCase layer: the session controller and the commands that drive it.
//!
//! One controller task owns the [`Session`](crate::domain::Session). The UI
//! layer talks to it only through a cloneable [`SessionHandle`].

mod command;
mod config;
mod controller;
mod error;
mod handle;
mod timer;

pub use command::{Command, Intent};
pub use config::SessionConfig;
pub use controller::{COMMAND_BUFFER, SessionController, spawn_session};
pub use error::UseCaseError;
pub use handle::SessionHandle;
pub use timer::RoundTimer;
