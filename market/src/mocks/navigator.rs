//! Navigator that records intents for assertions.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::traits::{NavigationIntent, Navigator};

#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    intents: Arc<Mutex<Vec<NavigationIntent>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All intents received so far, oldest first.
    pub fn intents(&self) -> Vec<NavigationIntent> {
        self.intents.lock().clone()
    }

    pub fn last(&self) -> Option<NavigationIntent> {
        self.intents.lock().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, intent: NavigationIntent) {
        self.intents.lock().push(intent);
    }
}
