//! Song (entry) and band membership models.
//!
//! A song is one performance slot request. Who plays it is kept outside
//! the song in a [`Membership`] map, mirroring how entries and their
//! members are stored separately upstream.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// An entry to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Song {
    /// Unique song identifier.
    pub id: String,
    /// Performing artist (band) name.
    pub artist: String,
    /// Song title.
    pub title: String,
}

impl Song {
    /// Creates a song with empty artist and title.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            artist: String::new(),
            title: String::new(),
        }
    }

    /// Sets the artist.
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Song → performer set.
///
/// Sets deduplicate repeated `(song, performer)` rows. Songs without an
/// entry have no performers: they never overlap and fit the whole session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Membership {
    members: BTreeMap<String, BTreeSet<String>>,
}

static NO_MEMBERS: BTreeSet<String> = BTreeSet::new();

impl Membership {
    /// Creates an empty membership map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the map from `(song_id, performer_id)` rows.
    pub fn from_pairs<I, S, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, P)>,
        S: Into<String>,
        P: Into<String>,
    {
        let mut membership = Self::new();
        for (song_id, performer_id) in pairs {
            membership.add(song_id, performer_id);
        }
        membership
    }

    /// Adds one performer to a song.
    pub fn add(&mut self, song_id: impl Into<String>, performer_id: impl Into<String>) {
        self.members
            .entry(song_id.into())
            .or_default()
            .insert(performer_id.into());
    }

    /// Adds a performer (builder form).
    pub fn with_member(
        mut self,
        song_id: impl Into<String>,
        performer_id: impl Into<String>,
    ) -> Self {
        self.add(song_id, performer_id);
        self
    }

    /// Performers of a song (empty if none recorded).
    pub fn members_of(&self, song_id: &str) -> &BTreeSet<String> {
        self.members.get(song_id).unwrap_or(&NO_MEMBERS)
    }

    /// Whether two songs share at least one performer.
    pub fn share_performer(&self, a: &str, b: &str) -> bool {
        let (ma, mb) = (self.members_of(a), self.members_of(b));
        !ma.is_disjoint(mb)
    }

    /// Song ids with recorded members.
    pub fn song_ids(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_builder() {
        let s = Song::new("E1").with_artist("The Rests").with_title("Coda");
        assert_eq!(s.id, "E1");
        assert_eq!(s.artist, "The Rests");
        assert_eq!(s.title, "Coda");
    }

    #[test]
    fn test_membership_dedups_rows() {
        let m = Membership::from_pairs([("E1", "alice"), ("E1", "alice"), ("E1", "bob")]);
        assert_eq!(m.members_of("E1").len(), 2);
    }

    #[test]
    fn test_unknown_song_has_no_members() {
        let m = Membership::new();
        assert!(m.members_of("ghost").is_empty());
        assert!(!m.share_performer("ghost", "ghost"));
    }

    #[test]
    fn test_share_performer() {
        let m = Membership::new()
            .with_member("E1", "alice")
            .with_member("E2", "alice")
            .with_member("E3", "carol");
        assert!(m.share_performer("E1", "E2"));
        assert!(m.share_performer("E2", "E1"));
        assert!(!m.share_performer("E1", "E3"));
    }

    #[test]
    fn test_membership_serde() {
        let m = Membership::new().with_member("E1", "alice");
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"E1":["alice"]}"#);
        let back: Membership = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
