//! Public target type exported by the crate.

use std::{
    io,
    os::fd::{AsRawFd, RawFd},
};

use log::{debug, warn};
use parking_lot::Mutex;

use crate::{
    error::{SocketTargetError, clear_error, record_error, recorded},
    rate_limiter::{RateLimiter, system_time_provider},
    target::LogTarget,
};

use super::{
    address::LocalBinding,
    config::{DEFAULT_LOCAL_SOCKET_NAME, SocketTargetConfig},
    connection::Connection,
};

/// Log target delivering each entry as one datagram on a Unix domain socket.
///
/// # Thread safety
///
/// `send` takes `&self` and may be called from any number of threads; a
/// non-reentrant lock serialises the actual transmissions. Closing consumes
/// the target, so it cannot race an in-flight send.
///
/// # Signal and cancellation safety
///
/// None of the operations are async-signal-safe: they allocate and take a
/// lock. A thread killed while inside `send` leaves the lock held, so do not
/// cancel threads asynchronously while they log to a target.
pub struct FemtoSocketTarget {
    destination_name: String,
    local_socket_name: String,
    binding: LocalBinding,
    raw_fd: RawFd,
    max_entry_size: Option<usize>,
    connection: Option<Mutex<Connection>>,
    failures: RateLimiter,
}

impl FemtoSocketTarget {
    /// Open a target sending to `destination`.
    ///
    /// `local_socket` names the local end; `None` selects
    /// [`DEFAULT_LOCAL_SOCKET_NAME`]. The name is bound in the abstract
    /// namespace where available and as a filesystem path otherwise. A
    /// filesystem node created this way is not removed on close.
    ///
    /// Empty names and names containing nul bytes are rejected with
    /// [`SocketTargetError::InvalidConfig`], as the builder does.
    pub fn open(destination: &str, local_socket: Option<&str>) -> Result<Self, SocketTargetError> {
        let config = SocketTargetConfig::new(destination)
            .with_local_socket(local_socket.unwrap_or(DEFAULT_LOCAL_SOCKET_NAME));
        Self::with_config(config)
    }

    /// Open a target from a configuration object.
    pub fn with_config(config: SocketTargetConfig) -> Result<Self, SocketTargetError> {
        clear_error();
        recorded(Self::open_inner(config))
    }

    fn open_inner(config: SocketTargetConfig) -> Result<Self, SocketTargetError> {
        config.validate()?;
        let (connection, binding) =
            Connection::open(&config).map_err(SocketTargetError::connection)?;
        debug!(
            "FemtoSocketTarget opened: destination={:?} local={:?} abstract={}",
            config.destination,
            config.local_socket,
            binding.is_abstract()
        );
        let failures = RateLimiter::new(
            "FemtoSocketTarget",
            config.warn_interval_secs,
            Box::new(system_time_provider),
        );
        Ok(Self {
            raw_fd: connection.as_raw_fd(),
            destination_name: config.destination,
            local_socket_name: config.local_socket,
            binding,
            max_entry_size: config.max_entry_size,
            connection: Some(Mutex::new(connection)),
            failures,
        })
    }

    /// Transmit `entry` verbatim as a single datagram.
    ///
    /// Success means the OS accepted the datagram; delivery is not
    /// guaranteed. Failures leave the target usable.
    pub fn send(&self, entry: &[u8]) -> Result<(), SocketTargetError> {
        clear_error();
        let result = self.transmit(entry);
        if result.is_err() {
            self.failures.record_failure();
        }
        recorded(result)
    }

    fn transmit(&self, entry: &[u8]) -> Result<(), SocketTargetError> {
        if let Some(limit) = self.max_entry_size {
            if entry.len() > limit {
                return Err(SocketTargetError::MessageTooLarge {
                    size: entry.len(),
                    limit: Some(limit),
                });
            }
        }
        let sent = self
            .connection()
            .lock()
            .send(entry)
            .map_err(|err| classify_send_error(err, entry.len()))?;
        if sent != entry.len() {
            return Err(SocketTargetError::transmission(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short datagram write: {sent} of {} bytes", entry.len()),
            )));
        }
        Ok(())
    }

    // `connection` is only emptied by `teardown`, which runs from `close(self)`
    // or `Drop`; neither leaves a live `&self` behind.
    fn connection(&self) -> &Mutex<Connection> {
        match self.connection.as_ref() {
            Some(connection) => connection,
            None => unreachable!("FemtoSocketTarget used after teardown"),
        }
    }

    /// Close the target and release its socket.
    ///
    /// Teardown always runs to completion. A failure to close the descriptor
    /// is logged and left in the thread's error record
    /// ([`last_error`](crate::error::last_error)).
    pub fn close(mut self) {
        clear_error();
        self.teardown();
    }

    fn teardown(&mut self) {
        let Some(connection) = self.connection.take() else {
            return;
        };
        self.failures.report_failures();
        match connection.into_inner().release() {
            Ok(()) => debug!(
                "FemtoSocketTarget closed: destination={:?}",
                self.destination_name
            ),
            Err(source) => {
                let err = SocketTargetError::ResourceCleanup { source };
                warn!("FemtoSocketTarget: {err}");
                record_error(&err);
            }
        }
    }

    /// Path of the daemon socket this target sends to.
    pub fn destination_name(&self) -> &str {
        &self.destination_name
    }

    /// Name bound to the local end of the socket.
    pub fn local_socket_name(&self) -> &str {
        &self.local_socket_name
    }

    pub fn binding(&self) -> &LocalBinding {
        &self.binding
    }

    /// Whether the local end lives in the abstract namespace.
    pub fn is_abstract(&self) -> bool {
        self.binding.is_abstract()
    }

    pub fn max_entry_size(&self) -> Option<usize> {
        self.max_entry_size
    }
}

fn classify_send_error(err: io::Error, size: usize) -> SocketTargetError {
    if err.raw_os_error() == Some(libc::EMSGSIZE) {
        SocketTargetError::MessageTooLarge { size, limit: None }
    } else {
        SocketTargetError::transmission(err)
    }
}

impl AsRawFd for FemtoSocketTarget {
    fn as_raw_fd(&self) -> RawFd {
        self.raw_fd
    }
}

impl LogTarget for FemtoSocketTarget {
    fn name(&self) -> &str {
        &self.destination_name
    }

    fn send_entry(&self, entry: &[u8]) -> Result<(), SocketTargetError> {
        self.send(entry)
    }
}

impl Drop for FemtoSocketTarget {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for FemtoSocketTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FemtoSocketTarget")
            .field("destination_name", &self.destination_name)
            .field("local_socket_name", &self.local_socket_name)
            .field("binding", &self.binding)
            .field("max_entry_size", &self.max_entry_size)
            .finish()
    }
}
