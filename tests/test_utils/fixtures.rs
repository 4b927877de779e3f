//! Fixtures shared by the integration tests.

use std::{
    path::Path,
    sync::atomic::{AtomicUsize, Ordering},
};

use rstest::fixture;

use super::recording_daemon::RecordingDaemon;

static NEXT_NAME: AtomicUsize = AtomicUsize::new(0);

/// Return a local socket name under `dir` that no other test is using.
///
/// On Linux the name is bound in the abstract namespace; elsewhere the
/// fallback bind creates the node inside `dir`, which is cleaned up with it.
#[allow(dead_code)]
pub fn unique_local_name(dir: &Path, tag: &str) -> String {
    let file = format!("{tag}-{}.sock", NEXT_NAME.fetch_add(1, Ordering::Relaxed));
    dir.join(file)
        .to_str()
        .expect("utf-8 temp path")
        .to_owned()
}

/// Return a freshly bound daemon in its own temporary directory.
#[fixture]
pub fn daemon() -> RecordingDaemon {
    RecordingDaemon::bind()
}
