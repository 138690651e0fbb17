use std::time::Instant;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::api::FeedApi;
use crate::config::Config;
use crate::domain::fishing::{FISHING_TIPS, PLAIN_CATCH_TEXT};
use crate::domain::{ArticleRecord, StatisticalSummary};
use crate::services::{ArticleService, FishingService, Pager};
use crate::storage::traits::KvStore;
use crate::ui::cards::{Card, RevealQueue, INITIAL_REVEAL_DELAY, MORE_REVEAL_DELAY};
use crate::ui::intent::{DispatchContext, Intent, LayoutMap};
use crate::ui::modal::AuthorModal;

/// Shown on the load-more affordance when the feed could not be loaded.
pub const LOAD_FAILED_TEXT: &str = "加载失败";
pub const LOAD_MORE_TEXT: &str = "加载更多";

/// The random panel's state machine: Idle → Casting → (Starved | Caught)
/// → Idle. `Casting` doubles as the busy flag; re-roll requests while
/// casting are dropped, not queued.
#[derive(Debug, Clone)]
pub enum RandomPanel {
    Idle,
    Casting {
        until: Instant,
        generation: u64,
        level_tag: Option<String>,
    },
    Caught {
        tip: &'static str,
        article_index: usize,
    },
    Starved {
        level_tag: Option<String>,
    },
}

/// The widget controller. Owns all session state; `load_initial` and the
/// hosting loop's teardown form the explicit lifecycle pair. Deferred work
/// (reveals, cast completions) is stamped with `generation` and dropped
/// when a newer load has superseded it.
pub struct App<A: FeedApi, K: KvStore> {
    config: Config,
    service: ArticleService<A, K>,
    fishing: FishingService<K>,
    rng: StdRng,

    articles: Vec<ArticleRecord>,
    stats: Option<StatisticalSummary>,
    pager: Pager,
    cards: Vec<Card>,
    reveal: Option<RevealQueue>,
    random: RandomPanel,
    modal: Option<AuthorModal>,
    selected: usize,
    load_failed: bool,
    generation: u64,
    layout: LayoutMap,
}

impl<A: FeedApi, K: KvStore> App<A, K> {
    pub fn new(
        config: Config,
        service: ArticleService<A, K>,
        fishing: FishingService<K>,
        rng: StdRng,
    ) -> Self {
        let pager = Pager::new(config.page_size);
        Self {
            config,
            service,
            fishing,
            rng,
            articles: Vec::new(),
            stats: None,
            pager,
            cards: Vec::new(),
            reveal: None,
            random: RandomPanel::Idle,
            modal: None,
            selected: 0,
            load_failed: false,
            generation: 0,
            layout: LayoutMap::default(),
        }
    }

    /// (Re-)initialize from the repository. Replaces the article set
    /// wholesale, resets the pager and invalidates all deferred work from
    /// the previous load. Safe to call repeatedly.
    pub fn load_initial(&mut self) {
        self.generation += 1;
        self.reveal = None;
        self.modal = None;
        self.random = RandomPanel::Idle;
        self.selected = 0;
        self.pager.reset();
        self.cards.clear();

        match self.service.load() {
            Ok(feed) => {
                info!(
                    count = feed.articles.len(),
                    from_cache = feed.from_cache,
                    "feed loaded"
                );
                self.load_failed = false;
                self.articles = feed.articles;
                self.stats = feed.stats;
                self.display_page(true);
                self.reroll();
            }
            Err(e) => {
                warn!(error = %e, "initial load failed");
                self.load_failed = true;
                self.articles = Vec::new();
                self.stats = None;
            }
        }
    }

    /// Insert the next page as skeleton cards and queue their reveals.
    fn display_page(&mut self, initial: bool) {
        if initial {
            self.cards.clear();
        }

        let start = self.pager.revealed();
        let count = self.pager.next_page(&self.articles).len();

        for index in start..start + count {
            self.cards.push(Card::new(
                index,
                &self.articles[index],
                &self.config.fallback_avatar,
            ));
        }

        // Every still-hidden card joins the new queue; it supersedes any
        // in-flight sequence as a unit.
        let pending: Vec<usize> = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| !card.revealed)
            .map(|(i, _)| i)
            .collect();

        if !pending.is_empty() {
            let delay = if initial {
                INITIAL_REVEAL_DELAY
            } else {
                MORE_REVEAL_DELAY
            };
            self.reveal = Some(RevealQueue::new(pending, delay, self.generation));
        }
    }

    /// Advance time-driven state: at most one card reveal, cast
    /// completions, and the modal's closing transition.
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(mut queue) = self.reveal.take() {
            if queue.generation == self.generation {
                if let Some(index) = queue.pop_due(now) {
                    if let Some(card) = self.cards.get_mut(index) {
                        card.revealed = true;
                    }
                }
                if !queue.is_empty() {
                    self.reveal = Some(queue);
                }
            }
            // A stale queue is dropped wholesale.
        }

        if let RandomPanel::Casting {
            until, generation, ..
        } = self.random
        {
            if now >= until {
                if generation == self.generation {
                    self.complete_catch();
                } else {
                    // The cast outlived its load; never act on it.
                    self.random = RandomPanel::Idle;
                }
            }
        }

        if let Some(modal) = &self.modal {
            if modal.closed(now) {
                self.modal = None;
            }
        }
    }

    /// Random Feature entry point, for both variants.
    pub fn reroll(&mut self) {
        if matches!(self.random, RandomPanel::Casting { .. }) {
            debug!("re-roll ignored while casting");
            return;
        }

        if !self.fishing.enabled() {
            if self.articles.is_empty() {
                return;
            }
            let article_index = self.rng.gen_range(0..self.articles.len());
            self.random = RandomPanel::Caught {
                tip: PLAIN_CATCH_TEXT,
                article_index,
            };
            return;
        }

        let level_tag = self.fishing.level_tag();

        if self.fishing.starved_roll(&mut self.rng) {
            debug!("roll starved");
            self.random = RandomPanel::Starved { level_tag };
            return;
        }

        let delay = self.fishing.cast_delay(&mut self.rng);
        self.random = RandomPanel::Casting {
            until: Instant::now() + delay,
            generation: self.generation,
            level_tag,
        };
    }

    fn complete_catch(&mut self) {
        if self.articles.is_empty() {
            self.random = RandomPanel::Idle;
            return;
        }

        let article_index = self.rng.gen_range(0..self.articles.len());
        let tip = FISHING_TIPS[self.rng.gen_range(0..FISHING_TIPS.len())];
        self.fishing.record_catch();
        self.random = RandomPanel::Caught { tip, article_index };
    }

    pub fn dispatch(&mut self, intents: Vec<Intent>) {
        for intent in intents {
            match intent {
                Intent::OpenArticle { index } => {
                    if let Some(article) = self.articles.get(index) {
                        open_link(&article.link);
                    }
                }
                Intent::OpenAuthor { index } => {
                    if let Some(article) = self.articles.get(index) {
                        self.modal = Some(AuthorModal::show(
                            &article.author,
                            &article.avatar,
                            &article.link,
                            &self.articles,
                            &self.config.fallback_avatar,
                        ));
                    }
                }
                Intent::LoadMore => {
                    if !self.load_failed && !self.pager.exhausted(self.articles.len()) {
                        self.display_page(false);
                    }
                }
                Intent::Reroll => self.reroll(),
                Intent::OpenRandomArticle => {
                    if let RandomPanel::Caught { article_index, .. } = self.random {
                        if let Some(article) = self.articles.get(article_index) {
                            open_link(&article.link);
                        }
                    }
                }
                Intent::OpenRandomAuthor => {
                    if let RandomPanel::Caught { article_index, .. } = self.random {
                        if let Some(article) = self.articles.get(article_index) {
                            self.modal = Some(AuthorModal::show(
                                &article.author,
                                &article.avatar,
                                &article.link,
                                &self.articles,
                                &self.config.fallback_avatar,
                            ));
                        }
                    }
                }
                Intent::RecordClick => {
                    if self.fishing.enabled() {
                        self.fishing.record_click();
                    }
                }
                Intent::SelectUp => self.selected = self.selected.saturating_sub(1),
                Intent::SelectDown => {
                    if !self.cards.is_empty() {
                        self.selected = (self.selected + 1).min(self.cards.len() - 1);
                    }
                }
                Intent::CloseModal => {
                    if let Some(modal) = &mut self.modal {
                        modal.begin_close();
                    }
                }
                Intent::Quit => {}
            }
        }
    }

    pub fn dispatch_context(&self) -> DispatchContext {
        DispatchContext {
            selected_article: self
                .cards
                .get(self.selected)
                .map(|card| card.article_index)
                .unwrap_or(0),
            modal_open: self.modal.is_some(),
            fishing: self.fishing.enabled(),
        }
    }

    // Render surface.

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn articles(&self) -> &[ArticleRecord] {
        &self.articles
    }

    pub fn article(&self, index: usize) -> Option<&ArticleRecord> {
        self.articles.get(index)
    }

    pub fn stats(&self) -> Option<&StatisticalSummary> {
        self.stats.as_ref()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn random(&self) -> &RandomPanel {
        &self.random
    }

    pub fn modal(&self) -> Option<&AuthorModal> {
        self.modal.as_ref()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn load_more_visible(&self) -> bool {
        !self.load_failed && !self.pager.exhausted(self.articles.len())
    }

    pub fn fishing_enabled(&self) -> bool {
        self.fishing.enabled()
    }

    pub fn layout(&self) -> &LayoutMap {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: LayoutMap) {
        self.layout = layout;
    }
}

fn open_link(link: &str) {
    debug!(link, "opening in browser");
    if let Err(e) = open::that(link) {
        warn!(link, error = %e, "failed to open link");
    }
}
