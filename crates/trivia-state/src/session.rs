//! # Playback Session
//!
//! Owns one playback screen and its narrator for the lifetime of the
//! visible screen. Dropping the session is "navigating away": any
//! in-flight narration is cancelled.

use trivia_core::SessionSelection;

use crate::narration::Narrator;
use crate::playback::{transition, Event, PlaybackError, Screen, Transition};

/// A playback screen wired to its speech collaborator.
#[derive(Debug)]
pub struct PlaybackSession<N: Narrator> {
    screen: Screen,
    narrator: N,
}

impl<N: Narrator> PlaybackSession<N> {
    /// Enter the playback screen in the loading state.
    pub fn new(selection: SessionSelection, narrator: N) -> Self {
        Self {
            screen: Screen::loading(selection),
            narrator,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn narrator(&self) -> &N {
        &self.narrator
    }

    /// Apply one event and voice its narration.
    ///
    /// A rejected event leaves the screen and narrator untouched.
    pub fn dispatch(&mut self, event: Event) -> Result<(), PlaybackError> {
        let from = self.screen.state();
        let Transition { screen, narration } = transition(&self.screen, event)?;
        let to = screen.state();
        if from != to {
            tracing::debug!(%from, %to, "playback transition");
        }
        self.screen = screen;
        if let Some(narration) = narration {
            self.narrator.speak(&narration.text());
        }
        Ok(())
    }
}

impl<N: Narrator> Drop for PlaybackSession<N> {
    fn drop(&mut self) {
        self.narrator.cancel();
    }
}
