//! Error types for address resolution.

use std::ffi::CStr;
use std::io;

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or reporting candidates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error while writing the report.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The resolver could not resolve the request.
    #[error("{message}")]
    Resolve {
        /// The `EAI_*` code returned by getaddrinfo.
        code: i32,
        /// Human-readable error message.
        message: String,
    },

    /// Hostname or service cannot be passed to the resolver.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Candidate address family is neither IPv4 nor IPv6.
    #[error("Unknown address family {0}")]
    UnknownFamily(i32),
}

impl Error {
    /// Create a resolution error from a getaddrinfo return code.
    pub fn from_gai(code: i32) -> Self {
        let message = if code == libc::EAI_SYSTEM {
            io::Error::last_os_error().to_string()
        } else {
            // SAFETY: gai_strerror returns a pointer to a static string.
            unsafe { CStr::from_ptr(libc::gai_strerror(code)) }
                .to_string_lossy()
                .into_owned()
        };
        Self::Resolve { code, message }
    }

    /// Returns true if this error only affects a single candidate.
    pub fn is_per_candidate(&self) -> bool {
        matches!(self, Self::UnknownFamily(_))
    }
}
