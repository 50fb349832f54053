//! # Playback Transitions
//!
//! The question/answer countdown cycle as a pure function of the current
//! screen and one event. Nothing here owns a timer or a speech engine; the
//! caller applies the returned [`Transition`] and voices its narration.
//!
//! ## Countdown
//!
//! A question is shown for [`QUESTION_SECONDS`] ticks and its answer for
//! [`ANSWER_SECONDS`] ticks. The tick that would bring the countdown to
//! zero performs the phase change instead, so `[A, B]` plays out as
//! 8 ticks → answer A, 6 ticks → question B, 8 ticks → answer B,
//! 6 ticks → ended.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use trivia_core::{PeriodFilter, SessionSelection, TriviaItem};

use crate::narration::{not_found_message, Narration};

/// Ticks a freshly shown question stays up before its answer is revealed.
pub const QUESTION_SECONDS: u32 = 8;

/// Ticks a revealed answer stays up before the next question.
pub const ANSWER_SECONDS: u32 = 6;

// ── Screen State ─────────────────────────────────────────────────────

/// Coarse state of the playback screen. Pause is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenState {
    /// Waiting for the retrieval result.
    Loading,
    /// Nothing found, or the fetch failed. Terminal for this screen.
    Error,
    ShowingQuestion,
    ShowingAnswer,
    /// Every item has been played. Only `Replay` leaves this state.
    Ended,
}

impl ScreenState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "LOADING",
            Self::Error => "ERROR",
            Self::ShowingQuestion => "SHOWING_QUESTION",
            Self::ShowingAnswer => "SHOWING_ANSWER",
            Self::Ended => "ENDED",
        }
    }
}

impl fmt::Display for ScreenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Errors ───────────────────────────────────────────────────────────

/// Why loading did not reach the playing state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    /// Retrieval succeeded but returned no items.
    NotFound {
        country: String,
        period: PeriodFilter,
    },
    /// The fetch itself failed.
    Unavailable {
        /// Diagnostic detail for logs; not shown to the user.
        reason: String,
    },
}

impl LoadFailure {
    /// The message shown and narrated on the error screen.
    pub fn message(&self) -> String {
        match self {
            Self::NotFound { country, period } => not_found_message(country, period),
            Self::Unavailable { .. } => {
                "Failed to load trivia. Please go back and try again.".to_string()
            }
        }
    }
}

/// A rejected user action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("cannot {event} in state {from}: {reason}")]
    InvalidTransition {
        /// State when the event arrived.
        from: ScreenState,
        /// Name of the rejected event.
        event: &'static str,
        reason: &'static str,
    },
}

impl PlaybackError {
    fn invalid(from: ScreenState, event: &Event, reason: &'static str) -> Self {
        Self::InvalidTransition {
            from,
            event: event.name(),
            reason,
        }
    }
}

// ── Events ───────────────────────────────────────────────────────────

/// Input to the transition function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Retrieval returned these items, in play order.
    Loaded(Vec<TriviaItem>),
    /// Retrieval failed.
    LoadFailed(String),
    /// One second elapsed.
    Tick,
    Pause,
    Resume,
    /// Skip to the next item, or end on the last one.
    Next,
    /// Narrate the current card again.
    Repeat,
    /// Start over from the first item. Only valid once ended.
    Replay,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loaded(_) => "load",
            Self::LoadFailed(_) => "fail loading",
            Self::Tick => "tick",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Next => "advance",
            Self::Repeat => "repeat",
            Self::Replay => "replay",
        }
    }
}

// ── Playback ─────────────────────────────────────────────────────────

/// Playback state of a loaded, non-empty session.
///
/// Invariants: `current_index < items.len()`; `show_answer` is false
/// exactly when a question is freshly shown; `countdown == 0` only once
/// ended.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    items: Arc<[TriviaItem]>,
    current_index: usize,
    show_answer: bool,
    is_paused: bool,
    has_ended: bool,
    countdown: u32,
}

impl Playback {
    /// Start at the first item. Returns `None` for an empty list.
    pub fn start(items: Vec<TriviaItem>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self {
            items: items.into(),
            current_index: 0,
            show_answer: false,
            is_paused: false,
            has_ended: false,
            countdown: QUESTION_SECONDS,
        })
    }

    pub fn items(&self) -> &[TriviaItem] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_item(&self) -> &TriviaItem {
        &self.items[self.current_index]
    }

    pub fn show_answer(&self) -> bool {
        self.show_answer
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn has_ended(&self) -> bool {
        self.has_ended
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn state(&self) -> ScreenState {
        if self.has_ended {
            ScreenState::Ended
        } else if self.show_answer {
            ScreenState::ShowingAnswer
        } else {
            ScreenState::ShowingQuestion
        }
    }

    fn question_narration(&self) -> Narration {
        Narration::Question {
            number: self.current_index + 1,
            total: self.items.len(),
            question: self.current_item().question.clone(),
        }
    }

    fn answer_narration(&self) -> Narration {
        let item = self.current_item();
        Narration::Answer {
            answer: item.answer.clone(),
            fun_fact: item.fun_fact().map(str::to_string),
        }
    }

    fn tick(&self) -> Transition {
        if self.has_ended || self.is_paused {
            return Transition::quiet(Screen::Playing(self.clone()));
        }
        if self.countdown > 1 {
            let mut next = self.clone();
            next.countdown -= 1;
            return Transition::quiet(Screen::Playing(next));
        }
        if self.show_answer {
            self.advance()
        } else {
            self.reveal()
        }
    }

    fn reveal(&self) -> Transition {
        let mut next = self.clone();
        next.show_answer = true;
        next.countdown = ANSWER_SECONDS;
        let narration = next.answer_narration();
        Transition::narrated(Screen::Playing(next), narration)
    }

    /// The answer-expiry transition, shared with `Next`.
    fn advance(&self) -> Transition {
        let mut next = self.clone();
        if self.current_index + 1 < self.items.len() {
            next.current_index += 1;
            next.show_answer = false;
            next.countdown = QUESTION_SECONDS;
            let narration = next.question_narration();
            Transition::narrated(Screen::Playing(next), narration)
        } else {
            next.has_ended = true;
            next.countdown = 0;
            Transition::narrated(Screen::Playing(next), Narration::Completed)
        }
    }

    fn apply(&self, event: Event) -> Result<Transition, PlaybackError> {
        let from = self.state();
        match event {
            Event::Tick => Ok(self.tick()),
            Event::Pause if self.has_ended => {
                Err(PlaybackError::invalid(from, &event, "session has ended"))
            }
            Event::Pause if self.is_paused => {
                Err(PlaybackError::invalid(from, &event, "already paused"))
            }
            Event::Pause => {
                let mut next = self.clone();
                next.is_paused = true;
                Ok(Transition::quiet(Screen::Playing(next)))
            }
            Event::Resume if self.has_ended => {
                Err(PlaybackError::invalid(from, &event, "session has ended"))
            }
            Event::Resume if !self.is_paused => {
                Err(PlaybackError::invalid(from, &event, "not paused"))
            }
            Event::Resume => {
                let mut next = self.clone();
                next.is_paused = false;
                Ok(Transition::quiet(Screen::Playing(next)))
            }
            Event::Next if self.has_ended => {
                Err(PlaybackError::invalid(from, &event, "session has ended"))
            }
            Event::Next => Ok(self.advance()),
            Event::Repeat if self.has_ended => {
                Err(PlaybackError::invalid(from, &event, "session has ended"))
            }
            Event::Repeat => {
                let item = self.current_item();
                let narration = Narration::Repeat {
                    question: item.question.clone(),
                    answer: self.show_answer.then(|| item.answer.clone()),
                };
                Ok(Transition::narrated(Screen::Playing(self.clone()), narration))
            }
            Event::Replay if !self.has_ended => {
                Err(PlaybackError::invalid(from, &event, "session has not ended"))
            }
            Event::Replay => {
                let next = Self {
                    items: Arc::clone(&self.items),
                    current_index: 0,
                    show_answer: false,
                    is_paused: false,
                    has_ended: false,
                    countdown: QUESTION_SECONDS,
                };
                let narration = next.question_narration();
                Ok(Transition::narrated(Screen::Playing(next), narration))
            }
            Event::Loaded(_) | Event::LoadFailed(_) => {
                Err(PlaybackError::invalid(from, &event, "session already loaded"))
            }
        }
    }
}

// ── Screen ───────────────────────────────────────────────────────────

/// The whole playback screen: loading, error, or playing.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading { selection: SessionSelection },
    Failed(LoadFailure),
    Playing(Playback),
}

/// The dependent state a tick source is created for.
///
/// Drivers tear down their timer and create a fresh one whenever this
/// value changes, and hold none while [`Screen::is_ticking`] is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickKey {
    pub state: ScreenState,
    pub paused: bool,
    pub index: usize,
}

impl Screen {
    pub fn loading(selection: SessionSelection) -> Self {
        Self::Loading { selection }
    }

    pub fn state(&self) -> ScreenState {
        match self {
            Self::Loading { .. } => ScreenState::Loading,
            Self::Failed(_) => ScreenState::Error,
            Self::Playing(p) => p.state(),
        }
    }

    pub fn playback(&self) -> Option<&Playback> {
        match self {
            Self::Playing(p) => Some(p),
            _ => None,
        }
    }

    /// Whether a one-second tick should currently be scheduled.
    pub fn is_ticking(&self) -> bool {
        matches!(self, Self::Playing(p) if !p.is_paused && !p.has_ended)
    }

    pub fn tick_key(&self) -> TickKey {
        let (paused, index) = match self {
            Self::Playing(p) => (p.is_paused, p.current_index),
            _ => (false, 0),
        };
        TickKey {
            state: self.state(),
            paused,
            index,
        }
    }

    /// Apply `event` in place, returning the narration to voice.
    ///
    /// On error the screen is left untouched.
    pub fn apply(&mut self, event: Event) -> Result<Option<Narration>, PlaybackError> {
        let Transition { screen, narration } = transition(self, event)?;
        *self = screen;
        Ok(narration)
    }
}

// ── Transition Function ──────────────────────────────────────────────

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub screen: Screen,
    /// Cue to hand to the narrator, if the transition speaks.
    pub narration: Option<Narration>,
}

impl Transition {
    fn quiet(screen: Screen) -> Self {
        Self {
            screen,
            narration: None,
        }
    }

    fn narrated(screen: Screen, narration: Narration) -> Self {
        Self {
            screen,
            narration: Some(narration),
        }
    }
}

/// Compute the next screen for `event`.
///
/// Ticks that arrive while nothing is counting down (loading, error,
/// paused, ended) are absorbed without change. User actions that make no
/// sense in the current state are rejected with
/// [`PlaybackError::InvalidTransition`].
pub fn transition(screen: &Screen, event: Event) -> Result<Transition, PlaybackError> {
    match screen {
        Screen::Playing(playback) => playback.apply(event),
        Screen::Loading { selection } => match event {
            Event::Loaded(mut items) => {
                items.truncate(selection.question_count);
                match Playback::start(items) {
                    Some(playback) => {
                        let narration = playback.question_narration();
                        Ok(Transition::narrated(Screen::Playing(playback), narration))
                    }
                    None => {
                        let failure = LoadFailure::NotFound {
                            country: selection.country.clone(),
                            period: selection.period.clone(),
                        };
                        Ok(Transition::narrated(
                            Screen::Failed(failure.clone()),
                            Narration::Failure(failure),
                        ))
                    }
                }
            }
            Event::LoadFailed(reason) => {
                let failure = LoadFailure::Unavailable { reason };
                Ok(Transition::narrated(
                    Screen::Failed(failure.clone()),
                    Narration::Failure(failure),
                ))
            }
            Event::Tick => Ok(Transition::quiet(screen.clone())),
            other => Err(PlaybackError::invalid(
                ScreenState::Loading,
                &other,
                "still loading",
            )),
        },
        Screen::Failed(_) => match event {
            Event::Tick => Ok(Transition::quiet(screen.clone())),
            other => Err(PlaybackError::invalid(
                ScreenState::Error,
                &other,
                "error screen only allows navigating back",
            )),
        },
    }
}
