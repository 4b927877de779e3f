//! Builder for [`FemtoSocketTarget`](super::FemtoSocketTarget).
//!
//! Collects the destination, local socket naming, and per-send limits, then
//! validates them before any socket is created.

use std::time::Duration;

use crate::error::{SocketTargetError, clear_error, recorded};

use super::{
    FemtoSocketTarget,
    config::{LocalNamespace, SocketTargetConfig},
};

macro_rules! ensure_positive {
    ($value:expr, $field:expr) => {{
        if $value == 0 {
            Err(SocketTargetError::InvalidConfig(format!(
                "{} must be greater than zero",
                $field
            )))
        } else {
            Ok($value)
        }
    }};
}

macro_rules! option_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

/// Builder for constructing [`FemtoSocketTarget`] instances.
#[derive(Clone, Debug, Default)]
pub struct SocketTargetBuilder {
    destination: Option<String>,
    local_socket: Option<String>,
    namespace: Option<LocalNamespace>,
    max_entry_size: Option<usize>,
    write_timeout_ms: Option<u64>,
    warn_interval_secs: Option<u64>,
}

impl SocketTargetBuilder {
    /// Create a new builder with no destination configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the socket path the daemon listens on.
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Set the name bound to the local end of the socket.
    pub fn with_local_socket(mut self, local_socket: impl Into<String>) -> Self {
        self.local_socket = Some(local_socket.into());
        self
    }

    option_setter!(
        #[doc = "Select the namespace used for the local bind."]
        with_namespace,
        namespace,
        LocalNamespace
    );
    option_setter!(
        #[doc = "Reject entries larger than this many bytes without sending them."]
        with_max_entry_size,
        max_entry_size,
        usize
    );
    option_setter!(with_write_timeout_ms, write_timeout_ms, u64);
    option_setter!(with_warn_interval_secs, warn_interval_secs, u64);

    fn validate(&self) -> Result<(), SocketTargetError> {
        if self.destination.is_none() {
            return Err(SocketTargetError::InvalidConfig(
                "socket target requires a destination".into(),
            ));
        }
        if let Some(size) = self.max_entry_size {
            ensure_positive!(size, "max_entry_size")?;
        }
        if let Some(timeout) = self.write_timeout_ms {
            ensure_positive!(timeout, "write_timeout_ms")?;
        }
        Ok(())
    }

    /// Validate the builder and produce the resulting configuration.
    pub fn build_config(&self) -> Result<SocketTargetConfig, SocketTargetError> {
        self.validate()?;
        let destination = self.destination.clone().unwrap_or_default();
        let mut config = SocketTargetConfig::new(destination);
        if let Some(local) = &self.local_socket {
            config.local_socket = local.clone();
        }
        if let Some(namespace) = self.namespace {
            config.namespace = namespace;
        }
        config.max_entry_size = self.max_entry_size;
        config.write_timeout = self.write_timeout_ms.map(Duration::from_millis);
        if let Some(interval) = self.warn_interval_secs {
            config.warn_interval_secs = interval;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and open the target.
    pub fn build(&self) -> Result<FemtoSocketTarget, SocketTargetError> {
        clear_error();
        let config = recorded(self.build_config())?;
        FemtoSocketTarget::with_config(config)
    }
}
