//! Errors returned by the client factory and the bucket operations.

use std::fmt;
use thiserror::Error;

/// Local errors detected while building a client, before any I/O.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("access key is empty")]
    EmptyAccessKey,

    #[error("secret key is empty")]
    EmptySecretKey,

    #[error("region is empty")]
    EmptyRegion,

    #[error("{0}, set an endpoint to use a custom region")]
    Region(String),

    #[error("invalid endpoint url \"{url}\": {reason}")]
    Endpoint { url: String, reason: String },

    #[error("timeout must be greater than zero")]
    ZeroTimeout,

    #[error("unable to build http client: {0}")]
    HttpClient(String),
}

/// What went wrong with a remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageErrorKind {
    /// The bucket exists, owned by the caller or by someone else.
    AlreadyExists,
    AccessDenied,
    InvalidName,
    /// The endpoint could not be connected to.
    Unreachable,
    Timeout,
    Unknown,
}

impl StorageErrorKind {
    /// Process exit code used by the command line driver.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Unknown => 1,
            Self::AlreadyExists => 10,
            Self::AccessDenied => 11,
            Self::InvalidName => 12,
            Self::Unreachable => 13,
            Self::Timeout => 14,
        }
    }

    /// Map an S3 error code, e.g. `BucketAlreadyOwnedByYou`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "BucketAlreadyExists" | "BucketAlreadyOwnedByYou" => Some(Self::AlreadyExists),
            "AccessDenied"
            | "InvalidAccessKeyId"
            | "SignatureDoesNotMatch"
            | "AllAccessDisabled"
            | "AccountProblem" => Some(Self::AccessDenied),
            "InvalidBucketName" => Some(Self::InvalidName),
            "RequestTimeout" => Some(Self::Timeout),
            _ => None,
        }
    }

    /// Fallback when the response carries no recognized error code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            409 => Self::AlreadyExists,
            401 | 403 => Self::AccessDenied,
            408 | 504 => Self::Timeout,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::AlreadyExists => "AlreadyExists",
            Self::AccessDenied => "AccessDenied",
            Self::InvalidName => "InvalidName",
            Self::Unreachable => "Unreachable",
            Self::Timeout => "Timeout",
            Self::Unknown => "Unknown",
        };
        write!(f, "{kind}")
    }
}

/// A failed remote operation, either from the service response or the transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct StorageError {
    pub kind: StorageErrorKind,
    pub message: String,
}

impl StorageError {
    #[must_use]
    pub fn new(kind: StorageErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        self.kind == StorageErrorKind::AlreadyExists
    }
}

impl From<reqwest::Error> for StorageError {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_timeout() {
            StorageErrorKind::Timeout
        } else if e.is_connect() {
            StorageErrorKind::Unreachable
        } else {
            StorageErrorKind::Unknown
        };
        Self::new(kind, e.to_string())
    }
}
