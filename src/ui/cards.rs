use std::collections::VecDeque;
use std::time::{Duration, Instant};

use url::Url;

use crate::domain::ArticleRecord;

/// Delay before the first page starts revealing.
pub const INITIAL_REVEAL_DELAY: Duration = Duration::from_millis(1000);
/// Delay before a subsequent page starts revealing.
pub const MORE_REVEAL_DELAY: Duration = Duration::from_millis(500);

/// One rendered card. Starts in the skeleton state and is flipped to the
/// populated state by the reveal queue.
#[derive(Debug, Clone)]
pub struct Card {
    pub article_index: usize,
    pub revealed: bool,
    avatar: String,
    retried: bool,
}

impl Card {
    pub fn new(article_index: usize, article: &ArticleRecord, fallback: &str) -> Self {
        let mut card = Self {
            article_index,
            revealed: false,
            avatar: article.avatar.clone(),
            retried: false,
        };
        // An unusable primary source is substituted up front.
        if Url::parse(&card.avatar).is_err() {
            card.mark_avatar_broken(fallback);
        }
        card
    }

    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    /// One-shot fallback substitution; a broken fallback is left alone.
    pub fn mark_avatar_broken(&mut self, fallback: &str) {
        if !self.retried {
            self.retried = true;
            self.avatar = fallback.to_string();
        }
    }

    /// Host of the resolved avatar source, shown on the populated card.
    pub fn avatar_host(&self) -> Option<String> {
        Url::parse(&self.avatar)
            .ok()?
            .host_str()
            .map(str::to_string)
    }
}

/// Pending card reveals for one page, processed one per tick in index
/// order. A queue from a superseded load is identified by its generation
/// and dropped as a unit.
#[derive(Debug)]
pub struct RevealQueue {
    pending: VecDeque<usize>,
    start_at: Instant,
    pub generation: u64,
}

impl RevealQueue {
    pub fn new(
        indices: impl IntoIterator<Item = usize>,
        start_delay: Duration,
        generation: u64,
    ) -> Self {
        Self {
            pending: indices.into_iter().collect(),
            start_at: Instant::now() + start_delay,
            generation,
        }
    }

    /// The next card index once the start delay has elapsed, at most one
    /// per call.
    pub fn pop_due(&mut self, now: Instant) -> Option<usize> {
        if now < self.start_at {
            return None;
        }
        self.pending.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
