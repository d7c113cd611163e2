//! Customer application logic
//!
//! Everything the web front end does besides rendering: a typed client for
//! the `/api` surface, the station autocomplete, a key-value session store
//! for tokens, and `App`, which tracks the active view and turns user actions
//! into API calls.

pub mod api;
pub mod app;
pub mod autocomplete;
pub mod session;

use crate::validation::ValidationError;

pub use api::{CargoApi, HttpApi};
pub use app::{App, BookingForm, HeaderState, Notice, SearchForm, View};
pub use autocomplete::StationField;
pub use session::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ClientError {
    /// HTTP status of a rejected request, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
