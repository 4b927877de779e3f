//! Unix domain datagram socket target.
//!
//! This module defines `FemtoSocketTarget`, which forwards pre-encoded log
//! entries to a local daemon (for example a syslog receiver on `/dev/log`),
//! one datagram per entry. The local end is bound in the abstract namespace
//! when the platform allows it, otherwise at a filesystem path. Sends from
//! multiple threads are serialised by a per-target lock; closing consumes
//! the target.

mod address;
mod builder;
mod config;
mod connection;
mod target;


pub use address::LocalBinding;
pub use builder::SocketTargetBuilder;
pub use config::{
    DEFAULT_LOCAL_SOCKET_NAME, DEFAULT_WARN_INTERVAL_SECS, LocalNamespace, SocketTargetConfig,
};
pub use target::FemtoSocketTarget;
