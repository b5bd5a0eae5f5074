//! Test doubles shared across the workspace.

use std::cell::RefCell;

use glam::DVec3;

use crate::sender::CommandSender;
use crate::types::{CallerId, Location};

/// A caller that keeps every message it receives.
#[derive(Debug)]
pub struct RecordingSender {
    id: CallerId,
    name: String,
    location: Option<Location>,
    messages: RefCell<Vec<String>>,
}

impl RecordingSender {
    /// A non-interactive caller with no world or position.
    pub fn console() -> Self {
        Self {
            id: CallerId::new(),
            name: "CONSOLE".into(),
            location: None,
            messages: RefCell::new(Vec::new()),
        }
    }

    /// An interactive caller standing at the given position.
    pub fn player(world: &str, x: f64, y: f64, z: f64) -> Self {
        Self {
            id: CallerId::new(),
            name: "player".into(),
            location: Some(Location::new(world, DVec3::new(x, y, z))),
            messages: RefCell::new(Vec::new()),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn last_message(&self) -> Option<String> {
        self.messages.borrow().last().cloned()
    }
}

impl CommandSender for RecordingSender {
    fn id(&self) -> CallerId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> Option<Location> {
        self.location.clone()
    }

    fn send_message(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_owned());
    }
}
