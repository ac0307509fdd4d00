use thiserror::Error;

/// Message shown for any non-success HTTP status.
pub const TRANSPORT_MESSAGE: &str = "Whoops! Something went wrong!";

/// Why a weather query did not produce a record.
///
/// Everything that can go wrong between the user's input and a decoded
/// payload ends up in one of these variants; the state controller stores it
/// as-is and the presentation layer renders its `Display` text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryFailure {
    /// No usable credential. Raised before any query is attempted.
    #[error("{0}")]
    Configuration(String),

    /// The city input was rejected locally.
    #[error("{0}")]
    Validation(String),

    /// Upstream answered with a non-success status.
    #[error("{}", TRANSPORT_MESSAGE)]
    Transport { status: u16 },

    /// The request never completed (DNS, connect, timeout, reset).
    #[error("Network error: {0}")]
    Network(String),

    /// The response body did not have the expected shape.
    #[error("Unexpected response from weather service: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Configuration,
    Validation,
    Transport,
    Network,
    Parse,
}

impl QueryFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            QueryFailure::Configuration(_) => FailureKind::Configuration,
            QueryFailure::Validation(_) => FailureKind::Validation,
            QueryFailure::Transport { .. } => FailureKind::Transport,
            QueryFailure::Network(_) => FailureKind::Network,
            QueryFailure::Parse(_) => FailureKind::Parse,
        }
    }

    /// User-facing text.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status for transport failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            QueryFailure::Transport { status } => Some(*status),
            _ => None,
        }
    }
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Configuration => "configuration",
            FailureKind::Validation => "validation",
            FailureKind::Transport => "transport",
            FailureKind::Network => "network",
            FailureKind::Parse => "parse",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
