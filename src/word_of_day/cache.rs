// Word-of-day cache
//
// Two states: Stale (no word for today) and Fresh (today's word recorded).
// The date comparison, the random pick and the write happen under one async
// mutex, so a rollover seen by many callers records exactly one pick.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::clock::Clock;
use crate::dictionary::DictionaryError;

/// Anything that can hand out a random dataset word.
///
/// The primary implementation is DictionaryStore.
#[async_trait]
pub trait WordSource: Send + Sync {
    /// One word chosen uniformly at random.
    async fn random_word(&self) -> Result<String, DictionaryError>;
}

/// The recorded pick for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordOfDayState {
    pub date: NaiveDate,
    pub word: String,
}

/// Single-slot cache holding the current day's word
pub struct WordOfDayCache {
    clock: Arc<dyn Clock>,
    slot: Mutex<Option<WordOfDayState>>,
}

impl WordOfDayCache {
    /// Empty cache; the first read picks a word.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            slot: Mutex::new(None),
        }
    }

    /// Today's word, picking a new one first if the stored date is older than today.
    ///
    /// The date is read under the lock, and a stored date at or after today
    /// counts as fresh, so the slot never moves back in time.
    /// A failed pick leaves the previous state untouched.
    pub async fn get(&self, source: &dyn WordSource) -> Result<String, DictionaryError> {
        let mut slot = self.slot.lock().await;
        let today = self.clock.today();

        if let Some(state) = slot.as_ref() {
            if state.date >= today {
                return Ok(state.word.clone());
            }
        }

        let word = source.random_word().await?;
        crate::info!("Word of the day for {} is '{}'", today, word);
        *slot = Some(WordOfDayState {
            date: today,
            word: word.clone(),
        });
        Ok(word)
    }

    /// Current state without triggering a pick
    pub async fn snapshot(&self) -> Option<WordOfDayState> {
        self.slot.lock().await.clone()
    }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
