//! # Screen Rendering
//!
//! Turns a playback [`Screen`] into a text frame. Pure: the driver decides
//! where the frame goes and whether the terminal is cleared first.
//!
//! High contrast renders emphasized lines bold, bright white on black,
//! through crossterm's styling.
//! Text size controls spacing and emphasis: `small` is compact, `medium`
//! separates blocks with blank lines, `large` also upper-cases the card.

use std::fmt::Write as _;

use crossterm::style::Stylize;
use trivia_core::{Contrast, DisplayPreferences, SessionSelection, TextSize};
use trivia_state::{Playback, Screen, ScreenState};

/// Renders frames for one selection with fixed display preferences.
#[derive(Debug, Clone)]
pub struct Renderer {
    prefs: DisplayPreferences,
    heading: String,
}

impl Renderer {
    pub fn new(prefs: DisplayPreferences, selection: &SessionSelection) -> Self {
        Self {
            prefs,
            heading: format!("Trivia: {} / {}", selection.country, selection.period.label()),
        }
    }

    /// Render `screen` with an optional narration caption.
    pub fn render(&self, screen: &Screen, caption: Option<&str>) -> String {
        let mut frame = Frame::new(self.prefs);
        frame.emphasized(&self.heading);
        frame.gap();

        match screen {
            Screen::Loading { .. } => frame.line("Loading trivia..."),
            Screen::Failed(failure) => {
                frame.emphasized(&failure.message());
                frame.gap();
                frame.line("[q] back");
            }
            Screen::Playing(p) if p.has_ended() => {
                frame.emphasized("All done!");
                frame.gap();
                frame.line("[a] play again  [q] back");
            }
            Screen::Playing(p) => self.render_card(&mut frame, p),
        }

        if let Some(caption) = caption {
            frame.gap();
            frame.line(&format!("> {caption}"));
        }
        frame.finish()
    }

    fn render_card(&self, frame: &mut Frame, p: &Playback) {
        let item = p.current_item();
        frame.line(&format!(
            "Question {} of {}",
            p.current_index() + 1,
            p.items().len()
        ));
        frame.gap();
        frame.card(&item.question);

        if p.show_answer() {
            frame.gap();
            frame.card(&format!("Answer: {}", item.answer));
            if let Some(fact) = item.fun_fact() {
                frame.line(&format!("Fun fact: {fact}"));
            }
        }

        frame.gap();
        frame.line(&status_line(p));
        frame.gap();
        let pause = if p.is_paused() { "[p] resume" } else { "[p] pause" };
        frame.line(&format!("{pause}  [n] next  [r] repeat  [q] back"));
    }
}

/// Countdown or pause status for the current card.
fn status_line(p: &Playback) -> String {
    if p.is_paused() {
        return "Paused".to_string();
    }
    let seconds = p.countdown();
    match p.state() {
        ScreenState::ShowingQuestion => format!("Answer in {seconds}s"),
        ScreenState::ShowingAnswer if p.current_index() + 1 == p.items().len() => {
            format!("Finishing in {seconds}s")
        }
        _ => format!("Next question in {seconds}s"),
    }
}

fn high_contrast(text: &str) -> impl std::fmt::Display + '_ {
    text.bold().white().on_black()
}

struct Frame {
    prefs: DisplayPreferences,
    out: String,
}

impl Frame {
    fn new(prefs: DisplayPreferences) -> Self {
        Self {
            prefs,
            out: String::new(),
        }
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    fn emphasized(&mut self, text: &str) {
        match self.prefs.contrast {
            Contrast::High => {
                let _ = writeln!(self.out, "{}", high_contrast(text));
            }
            Contrast::Normal => self.line(text),
        }
    }

    /// Question or answer text; scaled up for large text.
    fn card(&mut self, text: &str) {
        if self.prefs.text_size == TextSize::Large {
            self.emphasized(&text.to_uppercase());
        } else {
            self.emphasized(text);
        }
    }

    fn gap(&mut self) {
        if self.prefs.text_size != TextSize::Small {
            self.out.push('\n');
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::TriviaItem;
    use trivia_state::{Event, LoadFailure};

    fn item(q: &str, fact: Option<&str>) -> TriviaItem {
        TriviaItem {
            country: "USA".into(),
            period: "20th Century".into(),
            question: q.into(),
            answer: format!("ans {q}"),
            fun_fact: fact.map(str::to_string),
        }
    }

    fn selection() -> SessionSelection {
        SessionSelection::new("USA", None, 10)
    }

    fn playing(items: Vec<TriviaItem>) -> Screen {
        let mut screen = Screen::loading(selection());
        screen.apply(Event::Loaded(items)).unwrap();
        screen
    }

    fn renderer() -> Renderer {
        Renderer::new(DisplayPreferences::default(), &selection())
    }

    #[test]
    fn question_frame() {
        let frame = renderer().render(&playing(vec![item("Q1", None), item("Q2", None)]), None);
        assert!(frame.starts_with("Trivia: USA / Any Time\n"));
        assert!(frame.contains("Question 1 of 2\n"));
        assert!(frame.contains("Q1\n"));
        assert!(frame.contains("Answer in 8s"));
        assert!(!frame.contains("ans Q1"));
        assert!(!frame.contains('\x1b'));
    }

    #[test]
    fn answer_frame_shows_fun_fact() {
        let mut screen = playing(vec![item("Q1", Some("Fact")), item("Q2", None)]);
        for _ in 0..8 {
            screen.apply(Event::Tick).unwrap();
        }
        let frame = renderer().render(&screen, Some("The answer is ans Q1. Fun fact: Fact"));
        assert!(frame.contains("Answer: ans Q1"));
        assert!(frame.contains("Fun fact: Fact"));
        assert!(frame.contains("Next question in 6s"));
        assert!(frame.contains("> The answer is ans Q1. Fun fact: Fact"));
    }

    #[test]
    fn last_answer_says_finishing() {
        let mut screen = playing(vec![item("Q1", None)]);
        for _ in 0..8 {
            screen.apply(Event::Tick).unwrap();
        }
        assert!(renderer().render(&screen, None).contains("Finishing in 6s"));
    }

    #[test]
    fn paused_frame() {
        let mut screen = playing(vec![item("Q1", None)]);
        screen.apply(Event::Pause).unwrap();
        let frame = renderer().render(&screen, None);
        assert!(frame.contains("Paused"));
        assert!(frame.contains("[p] resume"));
    }

    #[test]
    fn ended_frame_offers_replay() {
        let mut screen = playing(vec![item("Q1", None)]);
        screen.apply(Event::Next).unwrap();
        let frame = renderer().render(&screen, None);
        assert!(frame.contains("All done!"));
        assert!(frame.contains("[a] play again"));
    }

    #[test]
    fn error_frame_shows_message() {
        let screen = Screen::Failed(LoadFailure::Unavailable {
            reason: "connection refused".into(),
        });
        let frame = renderer().render(&screen, None);
        assert!(frame.contains("Failed to load trivia. Please go back and try again."));
        assert!(!frame.contains("connection refused"));
    }

    #[test]
    fn high_contrast_and_large_text() {
        let prefs = DisplayPreferences {
            contrast: Contrast::High,
            text_size: TextSize::Large,
        };
        let frame = Renderer::new(prefs, &selection()).render(&playing(vec![item("Who?", None)]), None);
        assert!(frame.contains(&high_contrast("WHO?").to_string()));
        assert!(frame.contains("WHO?"));
        assert!(!frame.contains("Who?"));
    }

    #[test]
    fn small_text_is_compact() {
        let prefs = DisplayPreferences {
            contrast: Contrast::Normal,
            text_size: TextSize::Small,
        };
        let frame = Renderer::new(prefs, &selection()).render(&playing(vec![item("Q1", None)]), None);
        assert!(!frame.contains("\n\n"));
    }
}
