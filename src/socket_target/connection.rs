//! Socket ownership for a single target.

use std::{
    io,
    os::{
        fd::{AsRawFd, IntoRawFd, RawFd},
        unix::net::{SocketAddr, UnixDatagram},
    },
};

use super::{
    address::{LocalBinding, bind_local, destination_addr},
    config::SocketTargetConfig,
};

/// Bound datagram socket paired with the resolved destination address.
#[derive(Debug)]
pub(super) struct Connection {
    socket: UnixDatagram,
    destination: SocketAddr,
}

impl Connection {
    /// Resolve the destination, then create and bind the local socket.
    ///
    /// The destination is checked before anything is bound so that a
    /// malformed name never leaves a filesystem node behind. Nothing is
    /// returned unless every step succeeded; a socket created along the way
    /// is closed when it drops.
    pub(super) fn open(config: &SocketTargetConfig) -> io::Result<(Self, LocalBinding)> {
        let destination = destination_addr(&config.destination)?;
        let (socket, binding) = bind_local(&config.local_socket, config.namespace)?;
        socket.set_write_timeout(config.write_timeout)?;
        Ok((
            Self {
                socket,
                destination,
            },
            binding,
        ))
    }

    /// Transmit `entry` as one datagram, returning the byte count accepted.
    pub(super) fn send(&self, entry: &[u8]) -> io::Result<usize> {
        self.socket.send_to_addr(entry, &self.destination)
    }

    /// Close the descriptor, surfacing any error from `close(2)`.
    pub(super) fn release(self) -> io::Result<()> {
        let fd = self.socket.into_raw_fd();
        // SAFETY: `fd` was just detached from its owner by `into_raw_fd`, so
        // this is the only place it is closed.
        if unsafe { libc::close(fd) } == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl AsRawFd for Connection {
    fn as_raw_fd(&self) -> RawFd {
        self.socket.as_raw_fd()
    }
}
