use crate::compose::{logical_position, DecomposedTarget, Reconciler};
use crate::pool::CategoryPool;
use crate::report::Reporter;
use crate::scoring;
use crate::sequence::generate;
use crate::session::{SessionConfig, SessionResult, SessionState, Stage};
use std::time::{Duration, SystemTime};

/// How long the transient miss indicator stays up after a failed commit in
/// the position stage.
pub const MISS_FLASH_MS: u64 = 500;

/// The abstract input-surface event set. `Char`/`Backspace` are the
/// convenience path for surfaces that edit the buffer one key at a time
/// (the terminal shell); composing surfaces deliver the full text value
/// through `TextChange`/`CompositionUpdate` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    TextChange(String),
    Char(char),
    Backspace,
    CompositionStart,
    CompositionUpdate(String),
    CompositionEnd(String),
    Confirm,
}

/// A practice session being displayed to the user: the staged state
/// machine over position and word drills.
///
/// Pools are assumed non-empty; that is the caller's contract and the one
/// precondition this machine does not defend against.
pub struct Drill {
    pub config: SessionConfig,
    pub session: SessionState,
    pub stage: Stage,
    /// Global item position across both stages.
    pub item_index: usize,
    /// The input buffer; cleared on advance and on failed position commits.
    pub input: String,
    items: Vec<String>,
    target: DecomposedTarget,
    reconciler: Reconciler,
    pool: CategoryPool,
    miss_flash_until: Option<SystemTime>,
    result: Option<SessionResult>,
    reporter: Option<Box<dyn Reporter>>,
}

impl Drill {
    pub fn new(config: SessionConfig, pool: CategoryPool) -> Self {
        let (stage, items) = if config.words_only {
            (Stage::WordDrill, generate(&pool.words, config.word_items))
        } else {
            (
                Stage::PositionDrill,
                generate(&pool.positions, config.position_items),
            )
        };
        let target = DecomposedTarget::new(items.first().map(String::as_str).unwrap_or(""));

        Self {
            config,
            session: SessionState::new(),
            stage,
            item_index: 0,
            input: String::new(),
            items,
            target,
            reconciler: Reconciler::new(),
            pool,
            miss_flash_until: None,
            result: None,
            reporter: None,
        }
    }

    pub fn with_reporter(mut self, reporter: Box<dyn Reporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Discard the whole session and rebuild at the first stage with fresh
    /// sequences. Category and language changes go through the same path:
    /// the host constructs a new machine, carrying nothing over.
    pub fn restart(&mut self) {
        let reporter = self.reporter.take();
        let mut fresh = Drill::new(self.config.clone(), self.pool.clone());
        fresh.reporter = reporter;
        *self = fresh;
    }

    fn stage_base(&self) -> usize {
        match self.stage {
            Stage::PositionDrill => 0,
            Stage::WordDrill | Stage::Completed => {
                if self.config.words_only {
                    0
                } else {
                    self.config.position_items
                }
            }
        }
    }

    fn local_index(&self) -> usize {
        self.item_index.saturating_sub(self.stage_base())
    }

    pub fn current_item(&self) -> &str {
        self.items
            .get(self.local_index())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Upcoming item within the current stage; `None` at a stage boundary,
    /// because the next stage's sequence is generated at the transition.
    pub fn next_item(&self) -> Option<&str> {
        self.items
            .get(self.local_index() + 1)
            .map(String::as_str)
    }

    pub fn target_units(&self) -> &[char] {
        &self.target.units
    }

    /// The highlight cursor into the current target's phonetic units.
    pub fn cursor(&self) -> usize {
        logical_position(&self.input, &self.target)
    }

    pub fn total_items(&self) -> usize {
        if self.config.words_only {
            self.config.word_items
        } else {
            self.config.position_items + self.config.word_items
        }
    }

    pub fn progress(&self) -> (usize, usize) {
        (self.item_index, self.total_items())
    }

    pub fn has_finished(&self) -> bool {
        self.stage == Stage::Completed
    }

    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    pub fn is_paused(&self) -> bool {
        self.session.is_paused()
    }

    pub fn is_composing(&self) -> bool {
        self.reconciler.is_composing()
    }

    pub fn miss_flash(&self) -> bool {
        self.miss_flash_active_at(SystemTime::now())
    }

    pub fn miss_flash_active_at(&self, now: SystemTime) -> bool {
        self.miss_flash_until.is_some_and(|until| now < until)
    }

    pub fn apply(&mut self, signal: Signal) {
        self.apply_at(signal, SystemTime::now());
    }

    /// Single entry point for all input-surface signals. Handlers leave the
    /// machine internally consistent before returning; no signal ever
    /// panics, including after completion.
    pub fn apply_at(&mut self, signal: Signal, now: SystemTime) {
        match signal {
            Signal::Char(c) => {
                let mut text = self.input.clone();
                text.push(c);
                self.text_change_at(&text, now);
            }
            Signal::Backspace => {
                let mut text = self.input.clone();
                text.pop();
                self.text_change_at(&text, now);
            }
            Signal::TextChange(text) => self.text_change_at(&text, now),
            Signal::CompositionStart => self.reconciler.begin_composition(),
            Signal::CompositionUpdate(text) => {
                self.reconciler.begin_composition();
                self.text_change_at(&text, now);
            }
            Signal::CompositionEnd(text) => {
                self.reconciler.end_composition();
                if self.stage != Stage::Completed {
                    self.session.note_input_at(now);
                    self.input.clear();
                    self.input.push_str(&text);
                }
            }
            Signal::Confirm => self.commit_at(now),
        }
    }

    /// The recurring 1-second poll: inactivity detection plus housekeeping
    /// of the transient miss indicator.
    pub fn on_tick(&mut self) {
        self.on_tick_at(SystemTime::now());
    }

    pub fn on_tick_at(&mut self, now: SystemTime) {
        if self.stage == Stage::Completed {
            return;
        }
        self.session.check_pause_at(now);
        if let Some(until) = self.miss_flash_until {
            if now >= until {
                self.miss_flash_until = None;
            }
        }
    }

    fn text_change_at(&mut self, text: &str, now: SystemTime) {
        if self.stage == Stage::Completed {
            return;
        }
        self.session.note_input_at(now);
        self.session.total_key_presses += 1;
        if !text.is_empty() {
            self.session.begin_item_at(now);
        }
        self.input.clear();
        self.input.push_str(text);
    }

    /// Judge the buffer against the current item. Only the explicit
    /// confirmation signal lands here; the composition lifecycle never
    /// commits on its own.
    fn commit_at(&mut self, now: SystemTime) {
        if self.stage == Stage::Completed {
            return;
        }
        self.session.note_input_at(now);

        let item = self.current_item().to_string();
        let started = self.session.item_started_at.unwrap_or(now);
        let outcome = scoring::item_outcome(&item, &self.input, started, now);
        let correct = outcome.is_correct;
        self.session.history.push(outcome);
        self.reconciler.reset();

        match self.stage {
            Stage::PositionDrill if !correct => {
                // Same item retried; the index does not move
                self.input.clear();
                self.session.clear_item_clock();
                self.miss_flash_until = Some(now + Duration::from_millis(MISS_FLASH_MS));
            }
            _ => self.advance_at(now),
        }
    }

    fn advance_at(&mut self, now: SystemTime) {
        self.item_index += 1;
        self.input.clear();
        self.session.clear_item_clock();
        self.reconciler.reset();

        let local = self.local_index();
        if local < self.items.len() {
            self.target = DecomposedTarget::new(&self.items[local]);
            return;
        }

        match self.stage {
            Stage::PositionDrill => {
                self.stage = Stage::WordDrill;
                self.items = generate(&self.pool.words, self.config.word_items);
                if let Some(item) = self.items.first().cloned() {
                    self.target = DecomposedTarget::new(&item);
                } else {
                    self.complete_at(now);
                }
            }
            Stage::WordDrill => self.complete_at(now),
            Stage::Completed => {}
        }
    }

    fn complete_at(&mut self, now: SystemTime) {
        self.stage = Stage::Completed;
        let result = scoring::finalize(
            &self.session.history,
            self.session.elapsed_seconds_at(now),
            self.session.total_key_presses,
        );
        if let Some(reporter) = &self.reporter {
            let _ = reporter.report(&result, &self.config);
        }
        self.result = Some(result);
    }
}
