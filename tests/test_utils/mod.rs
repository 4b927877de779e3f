pub mod fixtures;
pub mod recording_daemon;

#[allow(unused_imports)]
pub use fixtures::{daemon, unique_local_name};
#[allow(unused_imports)]
pub use recording_daemon::RecordingDaemon;
