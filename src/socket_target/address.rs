//! Local and destination address handling for Unix datagram sockets.
//!
//! The local end is bound either in the abstract namespace (Linux and
//! Android), which leaves no trace in the filesystem, or at an ordinary path.
//! Which one was used is decided once at open time and kept in
//! [`LocalBinding`].

use std::{
    io,
    os::unix::net::{SocketAddr, UnixDatagram},
    path::{Path, PathBuf},
};

#[cfg(target_os = "android")]
use std::os::android::net::SocketAddrExt;
#[cfg(target_os = "linux")]
use std::os::linux::net::SocketAddrExt;

use log::debug;

use super::config::LocalNamespace;

/// How the local end of a target's socket was bound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocalBinding {
    /// Bound to an abstract name; nothing was created in the filesystem.
    Abstract,
    /// Bound to a socket node at this path. The node outlives the target.
    Filesystem(PathBuf),
}

impl LocalBinding {
    pub fn is_abstract(&self) -> bool {
        matches!(self, LocalBinding::Abstract)
    }

    /// Filesystem node created by the bind, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            LocalBinding::Abstract => None,
            LocalBinding::Filesystem(path) => Some(path),
        }
    }
}

/// Resolve the daemon's socket path into an address usable with `send_to`.
pub(super) fn destination_addr(name: &str) -> io::Result<SocketAddr> {
    if name.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "destination socket name must not be empty",
        ));
    }
    SocketAddr::from_pathname(name)
}

/// Create a datagram socket bound to `name` according to `namespace`.
pub(super) fn bind_local(
    name: &str,
    namespace: LocalNamespace,
) -> io::Result<(UnixDatagram, LocalBinding)> {
    match namespace {
        LocalNamespace::Abstract => bind_abstract(name).map(|s| (s, LocalBinding::Abstract)),
        LocalNamespace::Filesystem => bind_filesystem(name),
        LocalNamespace::Auto => match bind_abstract(name) {
            Ok(socket) => Ok((socket, LocalBinding::Abstract)),
            Err(err) => {
                debug!("abstract bind of {name:?} failed ({err}); binding filesystem path instead");
                bind_filesystem(name)
            }
        },
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn bind_abstract(name: &str) -> io::Result<UnixDatagram> {
    let addr = SocketAddr::from_abstract_name(name.as_bytes())?;
    UnixDatagram::bind_addr(&addr)
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn bind_abstract(name: &str) -> io::Result<UnixDatagram> {
    let _ = name;
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "abstract socket names are not supported on this platform",
    ))
}

fn bind_filesystem(name: &str) -> io::Result<(UnixDatagram, LocalBinding)> {
    let path = PathBuf::from(name);
    let socket = UnixDatagram::bind(&path)?;
    Ok((socket, LocalBinding::Filesystem(path)))
}
