//! Incident feed: short reports, newest first.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{Result, ValidationError};
use crate::notice::{Notice, Notifier};
use crate::storage::{load_list, save_list, KvStore, FEED_KEY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentPost {
    pub title: String,
    pub description: String,
    /// Milliseconds since the Unix epoch, assigned when the post is created.
    pub timestamp: i64,
}

pub struct IncidentFeed<'s, S: KvStore + ?Sized, C: Clock + ?Sized> {
    store: &'s S,
    clock: &'s C,
    posts: Vec<IncidentPost>,
}

impl<'s, S: KvStore + ?Sized, C: Clock + ?Sized> IncidentFeed<'s, S, C> {
    /// Load the stored feed, newest first. Corrupt data loads as empty.
    pub fn load(store: &'s S, clock: &'s C, notifier: &dyn Notifier) -> Result<Self> {
        let posts = Self::read(store, notifier)?;
        Ok(Self { store, clock, posts })
    }

    pub fn posts(&self) -> &[IncidentPost] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Create a post stamped with the current time, persist, and reload.
    pub fn post(
        &mut self,
        title: &str,
        description: &str,
        notifier: &dyn Notifier,
    ) -> Result<IncidentPost> {
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(ValidationError::MissingPostFields.into());
        }

        let post = IncidentPost {
            title: title.to_string(),
            description: description.to_string(),
            timestamp: self.clock.now_ms(),
        };

        let mut posts = self.posts.clone();
        posts.push(post.clone());
        sort_newest_first(&mut posts);
        save_list(self.store, FEED_KEY, &posts)?;

        self.posts = Self::read(self.store, notifier)?;
        tracing::debug!("Posted incident '{}' ({} in feed)", post.title, self.posts.len());
        Ok(post)
    }

    fn read(store: &S, notifier: &dyn Notifier) -> Result<Vec<IncidentPost>> {
        let loaded = load_list::<IncidentPost, _>(store, FEED_KEY)?;
        if loaded.corrupt.is_some() {
            notifier.notify(&Notice::FeedLoadFailed);
        }
        let mut posts = loaded.items;
        sort_newest_first(&mut posts);
        Ok(posts)
    }
}

/// Stable sort by descending timestamp.
fn sort_newest_first(posts: &mut [IncidentPost]) {
    posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::CoreError;
    use crate::notice::{RecordingNotifier, SilentNotifier};
    use crate::storage::Database;

    #[test]
    fn post_assigns_clock_timestamp() {
        let db = Database::open_memory().unwrap();
        let clock = ManualClock::new(1_700_000_000_000);
        let mut feed = IncidentFeed::load(&db, &clock, &SilentNotifier).unwrap();

        let post = feed.post("Broken light", "Lot B lamp is out", &SilentNotifier).unwrap();
        assert_eq!(post.timestamp, 1_700_000_000_000);
        assert_eq!(feed.posts(), &[post]);
    }

    #[test]
    fn newest_first_even_when_clock_goes_back() {
        let db = Database::open_memory().unwrap();
        let clock = ManualClock::new(5_000);
        let mut feed = IncidentFeed::load(&db, &clock, &SilentNotifier).unwrap();

        feed.post("B", "second", &SilentNotifier).unwrap();
        clock.set(9_000);
        feed.post("C", "third", &SilentNotifier).unwrap();
        clock.set(1_000);
        feed.post("A", "older", &SilentNotifier).unwrap();

        let stamps: Vec<i64> = feed.posts().iter().map(|p| p.timestamp).collect();
        assert_eq!(stamps, vec![9_000, 5_000, 1_000]);

        let reloaded = IncidentFeed::load(&db, &clock, &SilentNotifier).unwrap();
        assert_eq!(reloaded.posts(), feed.posts());
    }

    #[test]
    fn unsorted_storage_loads_sorted() {
        let db = Database::open_memory().unwrap();
        db.kv_set(
            FEED_KEY,
            r#"[{"title":"a","description":"x","timestamp":1},
                {"title":"c","description":"x","timestamp":3},
                {"title":"b","description":"x","timestamp":2}]"#,
        )
        .unwrap();
        let clock = ManualClock::new(0);
        let feed = IncidentFeed::load(&db, &clock, &SilentNotifier).unwrap();
        let titles: Vec<&str> = feed.posts().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b", "a"]);
    }

    #[test]
    fn empty_fields_are_rejected() {
        let db = Database::open_memory().unwrap();
        let clock = ManualClock::new(0);
        let mut feed = IncidentFeed::load(&db, &clock, &SilentNotifier).unwrap();

        for (title, description) in [("", "desc"), ("title", "  "), ("", "")] {
            let err = feed.post(title, description, &SilentNotifier).unwrap_err();
            assert!(matches!(
                err,
                CoreError::Validation(ValidationError::MissingPostFields)
            ));
        }
        assert!(feed.is_empty());
        assert!(db.kv_get(FEED_KEY).unwrap().is_none());
    }

    #[test]
    fn corrupt_feed_notifies_and_loads_empty() {
        let db = Database::open_memory().unwrap();
        db.kv_set(FEED_KEY, "oops").unwrap();
        let clock = ManualClock::new(0);
        let notifier = RecordingNotifier::new();
        let feed = IncidentFeed::load(&db, &clock, &notifier).unwrap();
        assert!(feed.is_empty());
        assert_eq!(notifier.notices(), vec![Notice::FeedLoadFailed]);
    }
}
