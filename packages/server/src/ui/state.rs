//! Shared application state.

use crate::usecase::SessionHandle;

pub struct AppState {
    /// Entry point to the session controller
    pub session: SessionHandle,
}
