//! Deliver log entries to a local daemon over a Unix domain datagram socket.
//!
//! ```no_run
//! use femto_socket_target::FemtoSocketTarget;
//!
//! let target = FemtoSocketTarget::open("/dev/log", None)?;
//! target.send(b"<14>hello from femto")?;
//! target.close();
//! # Ok::<(), femto_socket_target::SocketTargetError>(())
//! ```

pub mod error;
pub mod rate_limiter;
#[cfg(unix)]
pub mod socket_target;
mod target;

pub use error::{ErrorKind, ErrorRecord, SocketTargetError, clear_error, last_error};
#[cfg(unix)]
pub use socket_target::{
    DEFAULT_LOCAL_SOCKET_NAME, FemtoSocketTarget, LocalBinding, LocalNamespace,
    SocketTargetBuilder, SocketTargetConfig,
};
pub use target::LogTarget;
