//! Error types and the per-thread error record.
//!
//! Every fallible operation returns a [`SocketTargetError`]. The same failure
//! is mirrored into a thread-local [`ErrorRecord`] so callers sitting behind a
//! dispatch layer that only sees a success flag can still inspect what went
//! wrong via [`last_error`].

use std::{cell::RefCell, fmt, io};

use thiserror::Error;

/// Errors produced while opening, using, or closing a socket target.
#[derive(Debug, Error)]
pub enum SocketTargetError {
    /// Invalid user supplied configuration.
    #[error("invalid socket target configuration: {0}")]
    InvalidConfig(String),
    /// Socket creation, local bind, or destination resolution failed.
    #[error("failed to open socket target: {source}")]
    Connection {
        #[source]
        source: io::Error,
    },
    /// The datagram could not be handed to the OS.
    #[error("failed to transmit entry: {source}")]
    Transmission {
        #[source]
        source: io::Error,
    },
    /// The entry does not fit in a single datagram.
    #[error("entry of {size} bytes exceeds the maximum datagram size")]
    MessageTooLarge {
        size: usize,
        /// Configured limit, when the rejection happened before the send call.
        limit: Option<usize>,
    },
    /// Releasing the descriptor failed during close.
    #[error("failed to release socket target resources: {source}")]
    ResourceCleanup {
        #[source]
        source: io::Error,
    },
}

/// Coarse classification of a [`SocketTargetError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidConfig,
    Connection,
    Transmission,
    MessageTooLarge,
    ResourceCleanup,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidConfig => "INVALID_CONFIG",
            ErrorKind::Connection => "CONNECTION",
            ErrorKind::Transmission => "TRANSMISSION",
            ErrorKind::MessageTooLarge => "MESSAGE_TOO_LARGE",
            ErrorKind::ResourceCleanup => "RESOURCE_CLEANUP",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SocketTargetError {
    pub(crate) fn connection(source: io::Error) -> Self {
        Self::Connection { source }
    }

    pub(crate) fn transmission(source: io::Error) -> Self {
        Self::Transmission { source }
    }

    /// Return the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SocketTargetError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            SocketTargetError::Connection { .. } => ErrorKind::Connection,
            SocketTargetError::Transmission { .. } => ErrorKind::Transmission,
            SocketTargetError::MessageTooLarge { .. } => ErrorKind::MessageTooLarge,
            SocketTargetError::ResourceCleanup { .. } => ErrorKind::ResourceCleanup,
        }
    }

    /// Platform error code carried by the underlying I/O error, if any.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            SocketTargetError::Connection { source }
            | SocketTargetError::Transmission { source }
            | SocketTargetError::ResourceCleanup { source } => source.raw_os_error(),
            #[cfg(unix)]
            SocketTargetError::MessageTooLarge { limit: None, .. } => Some(libc::EMSGSIZE),
            _ => None,
        }
    }
}

/// Snapshot of the most recent failure on the current thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub code: Option<i32>,
    pub message: String,
}

impl From<&SocketTargetError> for ErrorRecord {
    fn from(err: &SocketTargetError) -> Self {
        Self {
            kind: err.kind(),
            code: err.os_code(),
            message: err.to_string(),
        }
    }
}

thread_local! {
    static LAST_ERROR: RefCell<Option<ErrorRecord>> = const { RefCell::new(None) };
}

/// Return the error recorded by the last failing operation on this thread.
pub fn last_error() -> Option<ErrorRecord> {
    LAST_ERROR.with(|slot| slot.borrow().clone())
}

/// Reset the error record for this thread.
pub fn clear_error() {
    let _ = LAST_ERROR.try_with(|slot| slot.borrow_mut().take());
}

/// Store `err` as this thread's last error.
///
/// Targets dropped while thread-locals are being destroyed reach this from
/// `Drop`; by then the slot may be gone and the record is discarded.
pub(crate) fn record_error(err: &SocketTargetError) {
    let record = ErrorRecord::from(err);
    let _ = LAST_ERROR.try_with(|slot| *slot.borrow_mut() = Some(record));
}

/// Mirror a failed result into the thread's error record and pass it through.
pub(crate) fn recorded<T>(result: Result<T, SocketTargetError>) -> Result<T, SocketTargetError> {
    if let Err(err) = &result {
        record_error(err);
    }
    result
}
