//! Scheduler configuration.
//!
//! All fields have defaults, so a partial (or empty) serialized config is
//! valid. Defaults are 100 random trials per song and a session window
//! spanning the loaded slots.

use serde::{Deserialize, Serialize};

use crate::models::{TimeSlot, TimeWindow, END_OF_DAY};

/// Default trial budget per song for random placement.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Default node budget for backtracking placement.
pub const DEFAULT_BACKTRACK_NODE_LIMIT: usize = 100_000;

/// Session window used when no slots are loaded and none is configured.
pub const DEFAULT_SESSION_WINDOW: TimeWindow = TimeWindow {
    start: 10 * 60,
    end: END_OF_DAY,
};

/// How auto-place searches for a complete placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// Shuffled songs, random cells, bounded trials per song.
    #[default]
    Random,
    /// Deterministic depth-first search with undo, bounded by a node budget.
    Backtracking,
}

/// Scheduler settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Random trials per song before auto-place gives up.
    pub max_attempts_per_song: usize,
    /// Window assumed for performers without declared availability.
    /// `None` spans the loaded slots.
    pub session_window: Option<TimeWindow>,
    /// Search strategy for auto-place.
    pub strategy: PlacementStrategy,
    /// Search nodes the backtracking strategy may expand.
    pub backtrack_node_limit: usize,
    /// RNG seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_attempts_per_song: DEFAULT_MAX_ATTEMPTS,
            session_window: None,
            strategy: PlacementStrategy::Random,
            backtrack_node_limit: DEFAULT_BACKTRACK_NODE_LIMIT,
            seed: None,
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-song trial budget.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts_per_song = attempts;
        self
    }

    /// Sets the session window.
    pub fn with_session_window(mut self, window: TimeWindow) -> Self {
        self.session_window = Some(window);
        self
    }

    /// Window that unrestricted performers are available for.
    ///
    /// The configured window if any, else earliest slot start to latest
    /// slot end, else [`DEFAULT_SESSION_WINDOW`].
    pub fn resolve_session_window(&self, slots: &[TimeSlot]) -> TimeWindow {
        if let Some(window) = self.session_window {
            return window;
        }
        let start = slots.iter().map(|s| s.start).min();
        let end = slots.iter().map(|s| s.end).max();
        match (start, end) {
            (Some(start), Some(end)) => TimeWindow::new(start, end).unwrap_or(DEFAULT_SESSION_WINDOW),
            _ => DEFAULT_SESSION_WINDOW,
        }
    }

    /// Sets the search strategy.
    pub fn with_strategy(mut self, strategy: PlacementStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the backtracking node budget.
    pub fn with_backtrack_node_limit(mut self, limit: usize) -> Self {
        self.backtrack_node_limit = limit;
        self
    }

    /// Fixes the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SchedulerConfig::default();
        assert_eq!(c.max_attempts_per_song, 100);
        assert!(c.session_window.is_none());
        assert_eq!(c.strategy, PlacementStrategy::Random);
        assert!(c.seed.is_none());
    }

    #[test]
    fn test_builder() {
        let c = SchedulerConfig::new()
            .with_max_attempts(10)
            .with_strategy(PlacementStrategy::Backtracking)
            .with_backtrack_node_limit(500)
            .with_seed(7);
        assert_eq!(c.max_attempts_per_song, 10);
        assert_eq!(c.strategy, PlacementStrategy::Backtracking);
        assert_eq!(c.backtrack_node_limit, 500);
        assert_eq!(c.seed, Some(7));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let c: SchedulerConfig =
            serde_json::from_str(r#"{"strategy":"backtracking","seed":42}"#).unwrap();
        assert_eq!(c.strategy, PlacementStrategy::Backtracking);
        assert_eq!(c.seed, Some(42));
        assert_eq!(c.max_attempts_per_song, DEFAULT_MAX_ATTEMPTS);

        let empty: SchedulerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, SchedulerConfig::default());
    }

    #[test]
    fn test_session_window_spans_slots() {
        let slots = vec![
            TimeSlot::parse("S1", "09:00", "10:00").unwrap(),
            TimeSlot::parse("S2", "10:00", "11:00").unwrap(),
        ];
        let c = SchedulerConfig::new();
        assert_eq!(
            c.resolve_session_window(&slots),
            TimeWindow::parse("09:00", "11:00").unwrap()
        );
        assert_eq!(c.resolve_session_window(&[]), DEFAULT_SESSION_WINDOW);
    }

    #[test]
    fn test_configured_session_window_wins() {
        let slots = vec![TimeSlot::parse("S1", "09:00", "10:00").unwrap()];
        let window = TimeWindow::parse("12:00", "18:00").unwrap();
        let c = SchedulerConfig::new().with_session_window(window);
        assert_eq!(c.resolve_session_window(&slots), window);
    }

    #[test]
    fn test_inverted_session_window_rejected_in_json() {
        let r: Result<SchedulerConfig, _> =
            serde_json::from_str(r#"{"session_window":{"start":700,"end":600}}"#);
        assert!(r.is_err());
    }
}
