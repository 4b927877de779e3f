//! A stand-in for a syslog daemon that records every datagram it receives.
//!
//! The daemon binds a datagram socket inside a temporary directory and hands
//! out its path as the destination for targets under test. Received buffers
//! are kept exactly as delivered so tests can check that each one matches a
//! single complete entry.

use std::{
    io,
    os::unix::net::{SocketAddr, UnixDatagram},
    path::{Path, PathBuf},
    sync::mpsc,
    thread,
    time::Duration,
};

use tempfile::TempDir;

const RECV_BUF: usize = 64 * 1024;

pub struct RecordingDaemon {
    dir: TempDir,
    path: PathBuf,
    socket: UnixDatagram,
}

impl RecordingDaemon {
    pub fn bind() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("daemon.sock");
        let socket = UnixDatagram::bind(&path).expect("bind daemon socket");
        socket
            .set_read_timeout(Some(Duration::from_secs(2)))
            .expect("set read timeout");
        Self { dir, path, socket }
    }

    /// Destination name to pass to the target under test.
    pub fn dest(&self) -> &str {
        self.path.to_str().expect("utf-8 temp path")
    }

    /// Directory that outlives the daemon, for filesystem-bound local names.
    #[allow(dead_code)]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Receive one datagram, panicking if none arrives within the timeout.
    #[allow(dead_code)]
    pub fn recv(&self) -> Vec<u8> {
        self.recv_from().0
    }

    /// Receive one datagram together with the sender's address.
    pub fn recv_from(&self) -> (Vec<u8>, SocketAddr) {
        let mut buf = vec![0u8; RECV_BUF];
        let (len, addr) = self.socket.recv_from(&mut buf).expect("datagram received");
        buf.truncate(len);
        (buf, addr)
    }

    /// Return the datagram waiting in the queue, if any, without blocking.
    #[allow(dead_code)]
    pub fn try_recv(&self) -> Option<Vec<u8>> {
        self.socket.set_nonblocking(true).expect("nonblocking");
        let mut buf = vec![0u8; RECV_BUF];
        let result = self.socket.recv(&mut buf);
        self.socket.set_nonblocking(false).expect("blocking");
        match result {
            Ok(len) => {
                buf.truncate(len);
                Some(buf)
            }
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => None,
            Err(err) => panic!("unexpected receive error: {err}"),
        }
    }

    /// Drain `count` datagrams on a background thread.
    ///
    /// Senders block once the receive queue fills, so collection has to run
    /// concurrently with them.
    #[allow(dead_code)]
    pub fn collect(&self, count: usize) -> mpsc::Receiver<Vec<Vec<u8>>> {
        let socket = self.socket.try_clone().expect("clone daemon socket");
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut received = Vec::with_capacity(count);
            let mut buf = vec![0u8; RECV_BUF];
            while received.len() < count {
                match socket.recv(&mut buf) {
                    Ok(len) => received.push(buf[..len].to_vec()),
                    Err(_) => break,
                }
            }
            let _ = tx.send(received);
        });
        rx
    }
}
