/// Error taxonomy for the dashboard
use std::fmt;
use thiserror::Error;

/// Lists the user can copy to the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Indexed,
    NotIndexed,
    Favorites,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Indexed | ListKind::NotIndexed => write!(f, "domains"),
            ListKind::Favorites => write!(f, "favorites"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("Please enter at least one domain")]
    Validation,

    #[error("API key is required")]
    MissingKey,

    #[error("{0}")]
    Request(String),

    #[error("poll failed: {0}")]
    PollTransport(String),

    #[error("No {0} to copy")]
    EmptyList(ListKind),

    #[error("stored favorites are unreadable: {0}")]
    StorageCorruption(String),
}
