//! Performer availability and window intersection.
//!
//! Every performer has an effective window: the recorded one, or the
//! session window when nothing is recorded. A song can only be played
//! when all of its performers are present, i.e. inside the intersection
//! of their effective windows.
//!
//! An empty intersection is not an error here. It simply contains no
//! slot, so the conflict checker reports `OutsideWindow`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;
use crate::models::{Minutes, Performer, TimeWindow};

/// Performer → declared window, with a session-wide fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    session: TimeWindow,
    windows: HashMap<String, Option<TimeWindow>>,
}

impl Availability {
    /// Creates an empty map; everyone is available for `session`.
    pub fn new(session: TimeWindow) -> Self {
        Self {
            session,
            windows: HashMap::new(),
        }
    }

    /// Builds the map from loaded performers.
    pub fn from_performers<'a>(
        session: TimeWindow,
        performers: impl IntoIterator<Item = &'a Performer>,
    ) -> Self {
        let mut availability = Self::new(session);
        for p in performers {
            availability.set(p.id.clone(), p.availability);
        }
        availability
    }

    /// Records (or clears, with `None`) a performer's window.
    pub fn set(&mut self, performer_id: impl Into<String>, window: Option<TimeWindow>) {
        self.windows.insert(performer_id.into(), window);
    }

    /// Records a window given as independent optional bounds.
    ///
    /// A missing bound falls back to the matching session bound. With
    /// neither bound the performer is stored as available all session.
    /// Fails if the resolved window is empty.
    pub fn set_bounds(
        &mut self,
        performer_id: impl Into<String>,
        start: Option<Minutes>,
        end: Option<Minutes>,
    ) -> Result<()> {
        let window = match (start, end) {
            (None, None) => None,
            (s, e) => Some(TimeWindow::new(
                s.unwrap_or(self.session.start),
                e.unwrap_or(self.session.end),
            )?),
        };
        self.set(performer_id, window);
        Ok(())
    }

    /// The fallback window.
    pub fn session_window(&self) -> TimeWindow {
        self.session
    }

    /// Recorded window of a performer, `None` if unrestricted or unknown.
    pub fn declared(&self, performer_id: &str) -> Option<TimeWindow> {
        self.windows.get(performer_id).copied().flatten()
    }

    /// Window a performer is actually available for.
    pub fn effective_window(&self, performer_id: &str) -> TimeWindow {
        self.declared(performer_id).unwrap_or(self.session)
    }

    /// Intersection of the effective windows of `performer_ids`.
    ///
    /// Returns the session window for an empty set. The result may be
    /// empty (`start >= end`).
    ///
    /// # Example
    /// ```
    /// use studio_schedule::availability::Availability;
    /// use studio_schedule::models::TimeWindow;
    ///
    /// let session = TimeWindow::parse("10:00", "24:00").unwrap();
    /// let mut av = Availability::new(session);
    /// av.set("alice", Some(TimeWindow::parse("12:00", "18:00").unwrap()));
    /// av.set("bob", Some(TimeWindow::parse("15:00", "20:00").unwrap()));
    ///
    /// let w = av.available_window(["alice", "bob", "carol"]);
    /// assert_eq!(w, TimeWindow::parse("15:00", "18:00").unwrap());
    /// ```
    pub fn available_window<'a, I>(&self, performer_ids: I) -> TimeWindow
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut windows = performer_ids
            .into_iter()
            .map(|id| self.effective_window(id));
        let Some(first) = windows.next() else {
            return self.session;
        };
        windows.fold(first, |acc, w| acc.intersect(&w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> TimeWindow {
        TimeWindow::parse("10:00", "24:00").unwrap()
    }

    fn window(start: &str, end: &str) -> TimeWindow {
        TimeWindow::parse(start, end).unwrap()
    }

    #[test]
    fn test_empty_set_is_session_window() {
        let av = Availability::new(session());
        assert_eq!(av.available_window(std::iter::empty()), session());
    }

    #[test]
    fn test_unknown_performer_uses_session() {
        let av = Availability::new(session());
        assert_eq!(av.effective_window("nobody"), session());
        assert_eq!(av.available_window(["nobody"]), session());
    }

    #[test]
    fn test_intersection_takes_latest_start_earliest_end() {
        let mut av = Availability::new(session());
        av.set("a", Some(window("11:00", "20:00")));
        av.set("b", Some(window("13:00", "22:00")));
        av.set("c", None);

        assert_eq!(av.available_window(["a", "b", "c"]), window("13:00", "20:00"));
    }

    #[test]
    fn test_declared_window_is_not_clipped_to_session() {
        let mut av = Availability::new(session());
        av.set("early_bird", Some(window("09:00", "10:30")));
        assert_eq!(av.available_window(["early_bird"]), window("09:00", "10:30"));
    }

    #[test]
    fn test_disjoint_windows_give_empty_intersection() {
        let mut av = Availability::new(session());
        av.set("a", Some(window("10:00", "11:00")));
        av.set("b", Some(window("12:00", "13:00")));

        let w = av.available_window(["a", "b"]);
        assert!(w.is_empty());
    }

    #[test]
    fn test_set_bounds_fills_missing_side() {
        let mut av = Availability::new(session());
        av.set_bounds("late", Some(18 * 60), None).unwrap();
        av.set_bounds("early", None, Some(12 * 60)).unwrap();
        av.set_bounds("free", None, None).unwrap();

        assert_eq!(av.declared("late"), Some(window("18:00", "24:00")));
        assert_eq!(av.declared("early"), Some(window("10:00", "12:00")));
        assert_eq!(av.declared("free"), None);
    }

    #[test]
    fn test_set_bounds_rejects_inverted() {
        let mut av = Availability::new(session());
        assert!(av.set_bounds("x", Some(20 * 60), Some(19 * 60)).is_err());
        assert_eq!(av.declared("x"), None);
    }

    #[test]
    fn test_from_performers() {
        let performers = vec![
            Performer::new("a").with_window(window("10:00", "10:30")),
            Performer::new("b"),
        ];
        let av = Availability::from_performers(session(), &performers);
        assert_eq!(av.effective_window("a"), window("10:00", "10:30"));
        assert_eq!(av.effective_window("b"), session());
    }
}
