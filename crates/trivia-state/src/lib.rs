//! # trivia-state — Playback State Machine
//!
//! Drives one trivia session through its question/answer countdown cycle.
//! All logic lives in a pure transition function,
//! `transition(&Screen, Event) -> Result<Transition, PlaybackError>`,
//! so every rule is testable without a timer. A scheduler feeds it
//! [`Event::Tick`] once per second; user actions arrive as discrete events.
//!
//! ## States
//!
//! ```text
//! LOADING ──Loaded(items)──▶ SHOWING_QUESTION ──countdown──▶ SHOWING_ANSWER
//!    │        (empty)              ▲    │                       │
//!    │          │                  │   next()              countdown / next()
//!    ▼          ▼                  │    │                       │
//!  ERROR ◀──────┘                  └────┴──── more items ◀──────┤
//!                                                               │ last item
//!                           replay() ◀──────── ENDED ◀──────────┘
//! ```
//!
//! `Paused` is orthogonal to the question/answer phase: it freezes the
//! countdown, index and answer flag until resumed.
//!
//! ## Narration
//!
//! Each transition may yield a [`Narration`] cue. Cues are handed to an
//! injected [`Narrator`] whose `speak` cancels whatever is in flight
//! before starting the new utterance: a queue of depth one.

pub mod narration;
pub mod playback;
pub mod session;

pub use narration::{Narration, Narrator, RecordingNarrator, SilentNarrator, SpeechParams};
pub use playback::{
    transition, Event, LoadFailure, Playback, PlaybackError, Screen, ScreenState, TickKey,
    Transition, ANSWER_SECONDS, QUESTION_SECONDS,
};
pub use session::PlaybackSession;
