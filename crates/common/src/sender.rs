use crate::types::{CallerId, Location};

/// Whoever invoked a command: a player in a world or a console.
///
/// Callers are told apart by capability, not by type: an interactive caller
/// is one that reports a [`Location`].
pub trait CommandSender {
    fn id(&self) -> CallerId;

    /// Display name, used for logging.
    fn name(&self) -> &str;

    /// Current world and position, if the caller has one.
    fn location(&self) -> Option<Location>;

    fn send_message(&self, message: &str);
}
