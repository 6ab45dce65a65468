//! Performer model.

use serde::{Deserialize, Serialize};

use super::TimeWindow;

/// A band member who may appear in several songs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performer {
    /// Unique performer identifier.
    pub id: String,
    /// Declared availability. `None` = available for the whole session.
    #[serde(default)]
    pub availability: Option<TimeWindow>,
}

impl Performer {
    /// Creates a performer available for the whole session.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            availability: None,
        }
    }

    /// Restricts availability to a window.
    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.availability = Some(window);
        self
    }
}
