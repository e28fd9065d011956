use thiserror::Error;

/// Remote data API failures. None of these are fatal to the agent loop.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL for `{endpoint}`: {reason}")]
    InvalidUrl { endpoint: String, reason: String },
    #[error("transport failure on `{endpoint}`: {reason}")]
    Transport { endpoint: String, reason: String },
    #[error("`{endpoint}` timed out after {timeout_ms}ms")]
    Timeout { endpoint: String, timeout_ms: u64 },
    #[error("`{endpoint}` returned HTTP {status}")]
    Status { endpoint: String, status: u16 },
    #[error("malformed response from `{endpoint}`: {reason}")]
    Decode { endpoint: String, reason: String },
    #[error("`{endpoint}` returned no data")]
    Empty { endpoint: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitErrorKind {
    InsufficientBalance,
    Rejected,
    Spawn,
}

/// Deploy tool failures, classified from exit status and output.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("insufficient balance: {message}")]
    InsufficientBalance { message: String },
    #[error("deploy rejected: {message}")]
    Rejected { message: String },
    #[error("failed to launch deploy tool: {message}")]
    Spawn { message: String },
}

impl SubmitError {
    pub fn kind(&self) -> SubmitErrorKind {
        match self {
            Self::InsufficientBalance { .. } => SubmitErrorKind::InsufficientBalance,
            Self::Rejected { .. } => SubmitErrorKind::Rejected,
            Self::Spawn { .. } => SubmitErrorKind::Spawn,
        }
    }

    /// Operator-facing remediation, when one is known.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InsufficientBalance { .. } => Some(
                "fund the signing account (testnet faucet) or lower PAYMENT_AMOUNT_MOTES",
            ),
            Self::Spawn { .. } => {
                Some("check that CASPER_CLIENT_BIN points to an installed casper-client")
            }
            Self::Rejected { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("failed to write `{path}`: {reason}")]
    Io { path: String, reason: String },
    #[error("failed to encode bridge state: {0}")]
    Encode(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {0}")]
    MissingConfig(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
