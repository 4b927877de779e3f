//! Configuration structures consumed when opening a socket target.
//!
//! [`SocketTargetBuilder`](super::SocketTargetBuilder) validates and produces
//! these values before [`FemtoSocketTarget`](super::FemtoSocketTarget) opens
//! the socket.

use std::time::Duration;

use crate::error::SocketTargetError;

/// Local socket name used when the caller does not supply one.
pub const DEFAULT_LOCAL_SOCKET_NAME: &str = "femtologging-socket";
/// Default interval between summarised transmission failure warnings.
pub const DEFAULT_WARN_INTERVAL_SECS: u64 = 5;

/// Address namespace used for the local end of the socket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LocalNamespace {
    /// Try the abstract namespace first and fall back to a filesystem path.
    #[default]
    Auto,
    /// Only bind an abstract name; fails on platforms without support.
    Abstract,
    /// Only bind a filesystem path.
    Filesystem,
}

/// Settings describing how to open a [`FemtoSocketTarget`](super::FemtoSocketTarget).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SocketTargetConfig {
    /// Path of the socket the daemon listens on.
    pub destination: String,
    /// Name bound to the local end of the socket.
    pub local_socket: String,
    pub namespace: LocalNamespace,
    /// Entries above this size are rejected before reaching the socket.
    pub max_entry_size: Option<usize>,
    /// Upper bound on how long a send may block under receiver backpressure.
    pub write_timeout: Option<Duration>,
    pub warn_interval_secs: u64,
}

impl SocketTargetConfig {
    /// Configuration targeting `destination` with every other field defaulted.
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            local_socket: DEFAULT_LOCAL_SOCKET_NAME.to_owned(),
            namespace: LocalNamespace::default(),
            max_entry_size: None,
            write_timeout: None,
            warn_interval_secs: DEFAULT_WARN_INTERVAL_SECS,
        }
    }

    /// Override the local socket name.
    pub fn with_local_socket(mut self, local_socket: impl Into<String>) -> Self {
        self.local_socket = local_socket.into();
        self
    }

    /// Override the local namespace selection.
    pub fn with_namespace(mut self, namespace: LocalNamespace) -> Self {
        self.namespace = namespace;
        self
    }

    /// Check that both socket names are usable before anything is bound.
    ///
    /// Every way of opening a target runs this, so the builder and
    /// [`FemtoSocketTarget::open`](super::FemtoSocketTarget::open) accept
    /// exactly the same names.
    pub fn validate(&self) -> Result<(), SocketTargetError> {
        ensure_name(&self.destination, "destination")?;
        ensure_name(&self.local_socket, "local_socket")?;
        if self.max_entry_size == Some(0) {
            return Err(SocketTargetError::InvalidConfig(
                "max_entry_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

fn ensure_name(value: &str, field: &str) -> Result<(), SocketTargetError> {
    if value.is_empty() {
        return Err(SocketTargetError::InvalidConfig(format!(
            "{field} must not be empty"
        )));
    }
    if value.contains('\0') {
        return Err(SocketTargetError::InvalidConfig(format!(
            "{field} must not contain nul bytes"
        )));
    }
    Ok(())
}
