use crate::error::SocketTargetError;

/// Trait implemented by log delivery targets.
///
/// `LogTarget` is `Send + Sync` so one target can be shared by every thread
/// that logs. Entries arrive fully encoded; a target transmits them as-is.
pub trait LogTarget: Send + Sync {
    /// Human-readable identifier, typically the destination address.
    fn name(&self) -> &str;

    /// Deliver one encoded entry.
    fn send_entry(&self, entry: &[u8]) -> Result<(), SocketTargetError>;
}
