//! # Narration
//!
//! Spoken cues emitted by playback transitions and the collaborator that
//! voices them. The state machine only decides *what* to say; a
//! [`Narrator`] decides how.

use std::fmt;

use trivia_core::PeriodFilter;

use crate::playback::LoadFailure;

/// Fixed speech presentation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechParams {
    /// Speaking rate relative to the engine default.
    pub rate: f32,
    /// Pitch relative to the engine default.
    pub pitch: f32,
    /// Volume in `0.0..=1.0`.
    pub volume: f32,
}

impl SpeechParams {
    pub const DEFAULT: Self = Self {
        rate: 0.9,
        pitch: 1.0,
        volume: 1.0,
    };
}

impl Default for SpeechParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A spoken cue produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narration {
    /// A question has just been shown.
    Question {
        /// 1-based position in the session.
        number: usize,
        total: usize,
        question: String,
    },
    /// The answer has just been revealed.
    Answer {
        answer: String,
        fun_fact: Option<String>,
    },
    /// The user asked to hear the current card again.
    Repeat {
        question: String,
        /// Present when the answer is already showing.
        answer: Option<String>,
    },
    /// The last card has expired.
    Completed,
    /// Loading ended in an error screen.
    Failure(LoadFailure),
}

impl Narration {
    /// The plain text handed to the speech engine.
    pub fn text(&self) -> String {
        match self {
            Self::Question {
                number,
                total,
                question,
            } => format!("Question {number} of {total}. {question}"),
            Self::Answer { answer, fun_fact } => match fun_fact {
                Some(fact) => format!("The answer is {answer}. Fun fact: {fact}"),
                None => format!("The answer is {answer}."),
            },
            Self::Repeat { question, answer } => match answer {
                Some(answer) => format!("{question} The answer is {answer}."),
                None => question.clone(),
            },
            Self::Completed => {
                "That's the end of this round of trivia. Thanks for playing!".to_string()
            }
            Self::Failure(failure) => failure.message(),
        }
    }
}

impl fmt::Display for Narration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// User-visible message for a not-found error screen.
pub(crate) fn not_found_message(country: &str, period: &PeriodFilter) -> String {
    match period {
        PeriodFilter::Any => format!(
            "Sorry, no trivia was found for {country}. Please go back and try a different selection."
        ),
        PeriodFilter::Exact(p) => format!(
            "Sorry, no trivia was found for {country} in the {p} period. Please go back and try a different selection."
        ),
    }
}

/// The speech collaborator.
///
/// Contract: `speak` cancels any in-flight utterance before starting the
/// new one. There is no queue and no completion guarantee.
pub trait Narrator {
    /// Cancel whatever is being spoken, then start speaking `text`.
    fn speak(&mut self, text: &str);

    /// Stop any in-flight utterance.
    fn cancel(&mut self);
}

impl<N: Narrator + ?Sized> Narrator for Box<N> {
    fn speak(&mut self, text: &str) {
        (**self).speak(text);
    }

    fn cancel(&mut self) {
        (**self).cancel();
    }
}

/// A narrator that says nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn speak(&mut self, _text: &str) {}

    fn cancel(&mut self) {}
}

/// A narrator that records every utterance. The most recent utterance is
/// "in flight" until the next `speak` or `cancel`.
#[derive(Debug, Clone, Default)]
pub struct RecordingNarrator {
    spoken: Vec<String>,
    in_flight: Option<String>,
    cancelled: usize,
}

impl RecordingNarrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything spoken so far, oldest first.
    pub fn spoken(&self) -> &[String] {
        &self.spoken
    }

    pub fn last(&self) -> Option<&str> {
        self.spoken.last().map(String::as_str)
    }

    pub fn in_flight(&self) -> Option<&str> {
        self.in_flight.as_deref()
    }

    /// How many in-flight utterances were cut off.
    pub fn cancelled(&self) -> usize {
        self.cancelled
    }
}

impl Narrator for RecordingNarrator {
    fn speak(&mut self, text: &str) {
        self.cancel();
        self.spoken.push(text.to_string());
        self.in_flight = Some(text.to_string());
    }

    fn cancel(&mut self) {
        if self.in_flight.take().is_some() {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_text_includes_position() {
        let n = Narration::Question {
            number: 2,
            total: 5,
            question: "Who?".into(),
        };
        assert_eq!(n.text(), "Question 2 of 5. Who?");
    }

    #[test]
    fn answer_text_appends_fun_fact() {
        let plain = Narration::Answer {
            answer: "1066".into(),
            fun_fact: None,
        };
        assert_eq!(plain.text(), "The answer is 1066.");

        let with_fact = Narration::Answer {
            answer: "1066".into(),
            fun_fact: Some("It was a Saturday.".into()),
        };
        assert_eq!(
            with_fact.text(),
            "The answer is 1066. Fun fact: It was a Saturday."
        );
    }

    #[test]
    fn repeat_text_with_and_without_answer() {
        let q = Narration::Repeat {
            question: "Who?".into(),
            answer: None,
        };
        assert_eq!(q.text(), "Who?");
        let qa = Narration::Repeat {
            question: "Who?".into(),
            answer: Some("Me".into()),
        };
        assert_eq!(qa.text(), "Who? The answer is Me.");
    }

    #[test]
    fn not_found_message_mentions_period_only_when_exact() {
        let any = not_found_message("USA", &PeriodFilter::Any);
        assert!(any.contains("USA"));
        assert!(!any.contains("period"));
        let exact = not_found_message("USA", &PeriodFilter::Exact("Medieval".into()));
        assert!(exact.contains("Medieval"));
    }

    #[test]
    fn recording_narrator_supersedes_in_flight() {
        let mut n = RecordingNarrator::new();
        n.speak("one");
        n.speak("two");
        assert_eq!(n.spoken(), ["one", "two"]);
        assert_eq!(n.in_flight(), Some("two"));
        assert_eq!(n.cancelled(), 1);
        n.cancel();
        assert_eq!(n.in_flight(), None);
        assert_eq!(n.cancelled(), 2);
        n.cancel();
        assert_eq!(n.cancelled(), 2);
    }

    #[test]
    fn boxed_narrator_delegates() {
        let mut boxed: Box<RecordingNarrator> = Box::new(RecordingNarrator::new());
        boxed.speak("hello");
        assert_eq!(boxed.last(), Some("hello"));
    }

    #[test]
    fn default_speech_params() {
        let p = SpeechParams::default();
        assert_eq!(p, SpeechParams::DEFAULT);
        assert!(p.rate < 1.0);
    }
}
