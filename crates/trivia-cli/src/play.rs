//! # Play Subcommand
//!
//! Runs one playback session in the terminal: fetch the selection, then
//! cycle through question and answer cards on a one-second tick while
//! reacting to single key presses.
//!
//! ## Keys
//!
//! - `p` / space toggles pause.
//! - `n` / right arrow skips to the next card.
//! - `r` narrates the current card again.
//! - `a` plays a finished session again.
//! - `q` / Esc / Ctrl-C leaves the screen, cancelling narration.
//!
//! On a terminal the session runs in raw mode on the alternate screen and
//! keys come from crossterm's [`EventStream`]. Without a terminal there is
//! no input and the session plays until it ends on its own.
//!
//! ## Timer Discipline
//!
//! At most one interval exists at a time. [`TickSchedule`] owns it and
//! rebuilds it whenever the screen's [`TickKey`] changes, holding none
//! while the screen is loading, failed, paused, or ended. Ticks and key
//! presses are handled one at a time by a single `select!` loop, so no two
//! events ever race on the session.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::builder::TypedValueParser;
use clap::Args;
use crossterm::event::{Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use futures::stream::{self, LocalBoxStream};
use futures::{Stream, StreamExt};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use trivia_core::{
    Contrast, DisplayPreferences, SessionSelection, TextSize, DEFAULT_QUESTION_COUNT,
};
use trivia_state::{
    Event, LoadFailure, Narrator, PlaybackSession, Screen, SpeechParams, TickKey,
};

use crate::narrator::{CommandNarrator, ConsoleNarrator};
use crate::render::Renderer;
use crate::source::{ItemSource, SourceArgs};

/// Wall-clock length of one countdown step.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Arguments for the `trivia play` subcommand.
#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Country to play.
    #[arg(long, required_unless_present = "selection")]
    pub country: Option<String>,

    /// Period to play (e.g. "20th Century"). Defaults to any time.
    #[arg(long)]
    pub period: Option<String>,

    /// Number of questions (5, 10, 15 or 20 on the selection screen; any
    /// positive number is accepted).
    #[arg(long, default_value_t = DEFAULT_QUESTION_COUNT, value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    pub count: usize,

    /// Encoded selection, e.g. "country=USA&period=any&count=5". Replaces
    /// the country, period and count flags.
    #[arg(long, conflicts_with_all = ["country", "period", "count"])]
    pub selection: Option<String>,

    /// Bright-on-black styling for emphasized text.
    #[arg(long)]
    pub high_contrast: bool,

    /// small, medium or large.
    #[arg(long, default_value_t = TextSize::Medium)]
    pub text_size: TextSize,

    /// Text-to-speech command (e.g. "espeak"). Captions only when absent.
    #[arg(long)]
    pub speech_command: Option<String>,
}

impl PlayArgs {
    /// The selection from `--selection`, or from the individual flags.
    pub fn selection(&self) -> Result<SessionSelection> {
        if let Some(encoded) = &self.selection {
            return SessionSelection::from_query_string(encoded.trim_start_matches('?'))
                .context("invalid --selection");
        }
        let country = self.country.as_deref().unwrap_or_default().trim();
        Ok(SessionSelection::new(country, self.period.as_deref(), self.count))
    }

    pub fn preferences(&self) -> DisplayPreferences {
        DisplayPreferences {
            contrast: if self.high_contrast {
                Contrast::High
            } else {
                Contrast::Normal
            },
            text_size: self.text_size,
        }
    }
}

/// How a session left the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Played through to the end screen.
    Completed,
    /// The user went back.
    Left,
    /// Nothing matched the selection.
    NotFound,
    /// The fetch failed.
    Unavailable,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Completed | Self::Left | Self::NotFound => 0,
            Self::Unavailable => 1,
        }
    }
}

/// Execute the play subcommand.
pub fn run_play(args: &PlayArgs) -> Result<u8> {
    let selection = args.selection()?;
    // Reject a blank country before any network or file access.
    selection.to_query()?;

    let source = ItemSource::from_args(&args.source)?;
    let voice: Box<dyn Narrator> = match &args.speech_command {
        Some(command) => Box::new(CommandNarrator::new(command, SpeechParams::DEFAULT)?),
        None => Box::new(trivia_state::SilentNarrator),
    };
    let renderer = Renderer::new(args.preferences(), &selection);
    let mut stdout = io::stdout();
    let interactive = stdout.is_terminal();
    let config = DriverConfig {
        tick_period: TICK_PERIOD,
        clear_screen: interactive,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    let outcome = runtime.block_on(async {
        let _terminal = if interactive {
            Some(TerminalGuard::enter(&mut stdout)?)
        } else {
            None
        };
        let input: LocalBoxStream<'static, io::Result<TermEvent>> = if interactive {
            EventStream::new().boxed_local()
        } else {
            stream::empty().boxed_local()
        };
        let mut session = PlaybackSession::new(selection.clone(), ConsoleNarrator::with_voice(voice));
        drive(&mut session, &source, input, &mut stdout, &renderer, &config).await
    })?;

    tracing::debug!(?outcome, "playback finished");
    Ok(outcome.exit_code())
}

/// Raw mode plus the alternate screen, restored on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter<W: Write>(out: &mut W) -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let guard = Self;
        execute!(out, EnterAlternateScreen, cursor::Hide).context("failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen) {
            tracing::warn!(error = %e, "failed to leave alternate screen");
        }
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!(error = %e, "failed to disable raw mode");
        }
    }
}

// ── Tick Schedule ────────────────────────────────────────────────────

/// Owner of the single playback interval.
#[derive(Debug)]
pub struct TickSchedule {
    period: Duration,
    active: Option<(TickKey, Interval)>,
}

impl TickSchedule {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            active: None,
        }
    }

    /// Bring the interval in line with `screen`.
    ///
    /// Returns `true` when an interval was created, replaced, or dropped.
    pub fn sync(&mut self, screen: &Screen) -> bool {
        if !screen.is_ticking() {
            return self.active.take().is_some();
        }
        let key = screen.tick_key();
        if matches!(&self.active, Some((current, _)) if *current == key) {
            return false;
        }
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.active = Some((key, interval));
        true
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Wait for the next tick; never completes while inactive.
    pub async fn tick(&mut self) {
        match &mut self.active {
            Some((_, interval)) => {
                interval.tick().await;
            }
            None => std::future::pending().await,
        }
    }
}

// ── Driver ───────────────────────────────────────────────────────────

/// Presentation settings for [`drive`].
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub tick_period: Duration,
    /// Redraw in place on a raw-mode terminal instead of appending frames.
    pub clear_screen: bool,
}

/// A user action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    TogglePause,
    Next,
    Repeat,
    Replay,
    Back,
}

impl Command {
    fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('c')).then_some(Self::Back);
        }
        match key.code {
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'p' | ' ' => Some(Self::TogglePause),
                'n' => Some(Self::Next),
                'r' => Some(Self::Repeat),
                'a' => Some(Self::Replay),
                'q' | 'b' => Some(Self::Back),
                _ => None,
            },
            KeyCode::Right => Some(Self::Next),
            KeyCode::Esc | KeyCode::Backspace => Some(Self::Back),
            _ => None,
        }
    }
}

/// Run a session from loading to exit.
///
/// `input` yields terminal events until it ends; a finished stream means
/// no more user input.
pub async fn drive<V, S, W>(
    session: &mut PlaybackSession<ConsoleNarrator<V>>,
    source: &ItemSource,
    mut input: S,
    out: &mut W,
    renderer: &Renderer,
    config: &DriverConfig,
) -> Result<Outcome>
where
    V: Narrator,
    S: Stream<Item = io::Result<TermEvent>> + Unpin,
    W: Write,
{
    draw(session, out, renderer, config)?;

    let selection = match session.screen() {
        Screen::Loading { selection } => selection.clone(),
        _ => anyhow::bail!("session already loaded"),
    };
    let loaded = match source.fetch(&selection).await {
        Ok(items) => Event::Loaded(items),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "trivia fetch failed");
            Event::LoadFailed(format!("{e:#}"))
        }
    };
    session.dispatch(loaded)?;

    let mut input_open = true;
    let mut schedule = TickSchedule::new(config.tick_period);

    loop {
        schedule.sync(session.screen());
        draw(session, out, renderer, config)?;

        if !input_open && !schedule.is_active() {
            break;
        }

        tokio::select! {
            _ = schedule.tick() => {
                session.dispatch(Event::Tick)?;
            }
            event = input.next(), if input_open => {
                match event {
                    Some(Ok(TermEvent::Key(key))) => {
                        if handle_key(session, &key) == Some(Command::Back) {
                            return Ok(Outcome::Left);
                        }
                    }
                    // Resizes and the like only need the redraw above.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e).context("failed to read terminal input"),
                    None => input_open = false,
                }
            }
        }
    }

    Ok(outcome_of(session.screen()))
}

fn handle_key<N: Narrator>(session: &mut PlaybackSession<N>, key: &KeyEvent) -> Option<Command> {
    let Some(command) = Command::from_key(key) else {
        tracing::debug!(code = ?key.code, "unbound key");
        return None;
    };
    let event = match command {
        Command::TogglePause => match session.screen().playback() {
            Some(p) if p.is_paused() => Event::Resume,
            _ => Event::Pause,
        },
        Command::Next => Event::Next,
        Command::Repeat => Event::Repeat,
        Command::Replay => Event::Replay,
        Command::Back => return Some(Command::Back),
    };
    if let Err(e) = session.dispatch(event) {
        tracing::info!("{e}");
    }
    Some(command)
}

fn outcome_of(screen: &Screen) -> Outcome {
    match screen {
        Screen::Failed(LoadFailure::NotFound { .. }) => Outcome::NotFound,
        Screen::Failed(LoadFailure::Unavailable { .. }) => Outcome::Unavailable,
        Screen::Playing(p) if p.has_ended() => Outcome::Completed,
        _ => Outcome::Left,
    }
}

fn draw<V: Narrator, W: Write>(
    session: &PlaybackSession<ConsoleNarrator<V>>,
    out: &mut W,
    renderer: &Renderer,
    config: &DriverConfig,
) -> Result<()> {
    let frame = renderer.render(session.screen(), session.narrator().caption());
    if config.clear_screen {
        // Raw mode does not return the carriage on a bare newline.
        queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        for line in frame.lines() {
            queue!(out, Print(line), cursor::MoveToNextLine(1))?;
        }
    } else {
        writeln!(out, "{frame}")?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use trivia_core::{Catalog, StaticSource, TriviaItem};
    use trivia_state::{RecordingNarrator, ScreenState};

    fn key(code: KeyCode) -> io::Result<TermEvent> {
        Ok(TermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn keys(chars: &str) -> Vec<io::Result<TermEvent>> {
        chars.chars().map(|c| key(KeyCode::Char(c))).collect()
    }

    fn item(country: &str, q: &str) -> TriviaItem {
        TriviaItem {
            country: country.into(),
            period: "Modern".into(),
            question: q.into(),
            answer: format!("ans {q}"),
            fun_fact: None,
        }
    }

    fn source(items: Vec<TriviaItem>) -> ItemSource {
        ItemSource::Local(Arc::new(StaticSource::new(Catalog::from_items(items).unwrap())))
    }

    fn config() -> DriverConfig {
        DriverConfig {
            tick_period: Duration::from_millis(1),
            clear_screen: false,
        }
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    /// Run a session over `input` and return the outcome, narration, and
    /// rendered output.
    fn play(
        country: &str,
        items: Vec<TriviaItem>,
        input: Vec<io::Result<TermEvent>>,
    ) -> (Outcome, Vec<String>, String) {
        let selection = SessionSelection::new(country, None, 10);
        let renderer = Renderer::new(DisplayPreferences::default(), &selection);
        let source = source(items);
        let mut session =
            PlaybackSession::new(selection, ConsoleNarrator::with_voice(RecordingNarrator::new()));
        let mut out = Vec::new();
        let outcome = runtime()
            .block_on(drive(
                &mut session,
                &source,
                stream::iter(input),
                &mut out,
                &renderer,
                &config(),
            ))
            .unwrap();
        let spoken = session.narrator().voice().spoken().to_vec();
        (outcome, spoken, String::from_utf8(out).unwrap())
    }

    #[test]
    fn plays_through_when_input_closes() {
        let items = vec![item("Peru", "Q1")];
        let (outcome, spoken, out) = play("Peru", items, Vec::new());
        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(
            spoken,
            [
                "Question 1 of 1. Q1",
                "The answer is ans Q1.",
                "That's the end of this round of trivia. Thanks for playing!",
            ]
        );
        assert!(out.contains("Loading trivia..."));
        assert!(out.contains("All done!"));
    }

    #[test]
    fn next_skips_the_answer() {
        let items = vec![item("Peru", "Q1")];
        let (outcome, spoken, _) = play("Peru", items, keys("n"));
        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(spoken.len(), 2);
        assert_eq!(spoken[0], "Question 1 of 1. Q1");
        assert_eq!(
            spoken[1],
            "That's the end of this round of trivia. Thanks for playing!"
        );
    }

    #[test]
    fn back_leaves_immediately() {
        let items = vec![item("Peru", "Q1"), item("Peru", "Q2")];
        let (outcome, spoken, _) = play("Peru", items, keys("q"));
        assert_eq!(outcome, Outcome::Left);
        assert_eq!(spoken.len(), 1);
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn repeat_renarrates() {
        let items = vec![item("Peru", "Q1")];
        let (_, spoken, _) = play("Peru", items, keys("rq"));
        assert_eq!(spoken, ["Question 1 of 1. Q1", "Q1"]);
    }

    #[test]
    fn pause_with_closed_input_stops() {
        let items = vec![item("Peru", "Q1")];
        let (outcome, spoken, out) = play("Peru", items, keys("p"));
        assert_eq!(outcome, Outcome::Left);
        assert_eq!(spoken.len(), 1);
        assert!(out.contains("Paused"));
    }

    #[test]
    fn invalid_and_unknown_commands_are_ignored() {
        // Replay before the end is rejected; `x` and Enter are unbound.
        let items = vec![item("Peru", "Q1")];
        let mut input = keys("ax");
        input.push(key(KeyCode::Enter));
        input.push(Ok(TermEvent::Resize(80, 24)));
        let (outcome, _, _) = play("Peru", items, input);
        assert_eq!(outcome, Outcome::Completed);
    }

    #[test]
    fn no_match_is_not_found() {
        let items = vec![item("Peru", "Q1")];
        let (outcome, spoken, out) = play("Atlantis", items, Vec::new());
        assert_eq!(outcome, Outcome::NotFound);
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(
            spoken,
            ["Sorry, no trivia was found for Atlantis. Please go back and try a different selection."]
        );
        assert!(out.contains("[q] back"));
    }

    #[test]
    fn fetch_failure_is_unavailable() {
        let selection = SessionSelection::new("Peru", None, 10);
        let renderer = Renderer::new(DisplayPreferences::default(), &selection);
        let source = ItemSource::Local(Arc::new(trivia_core::FileSource::new(
            "/nonexistent/catalog.json",
        )));
        let mut session = PlaybackSession::new(selection, ConsoleNarrator::new());
        let mut out = Vec::new();
        let outcome = runtime()
            .block_on(drive(
                &mut session,
                &source,
                stream::empty::<io::Result<TermEvent>>(),
                &mut out,
                &renderer,
                &config(),
            ))
            .unwrap();
        assert_eq!(outcome, Outcome::Unavailable);
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(session.screen().state(), ScreenState::Error);
    }

    #[test]
    fn schedule_follows_tick_key() {
        runtime().block_on(async {
            let mut schedule = TickSchedule::new(Duration::from_secs(1));
            let mut screen = Screen::loading(SessionSelection::new("Peru", None, 10));
            assert!(!schedule.sync(&screen));
            assert!(!schedule.is_active());

            screen
                .apply(Event::Loaded(vec![item("Peru", "Q1"), item("Peru", "Q2")]))
                .unwrap();
            assert!(schedule.sync(&screen));
            assert!(schedule.is_active());

            // Countdown steps keep the same interval.
            screen.apply(Event::Tick).unwrap();
            assert!(!schedule.sync(&screen));

            // Pausing drops it; resuming builds a fresh one.
            screen.apply(Event::Pause).unwrap();
            assert!(schedule.sync(&screen));
            assert!(!schedule.is_active());
            screen.apply(Event::Resume).unwrap();
            assert!(schedule.sync(&screen));

            // A new card gets a new interval.
            screen.apply(Event::Next).unwrap();
            assert!(schedule.sync(&screen));

            screen.apply(Event::Next).unwrap();
            assert!(schedule.sync(&screen));
            assert!(!schedule.is_active());
        });
    }

    #[test]
    fn key_bindings() {
        let press = |code| Command::from_key(&KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(press(KeyCode::Char('p')), Some(Command::TogglePause));
        assert_eq!(press(KeyCode::Char(' ')), Some(Command::TogglePause));
        assert_eq!(press(KeyCode::Char('N')), Some(Command::Next));
        assert_eq!(press(KeyCode::Right), Some(Command::Next));
        assert_eq!(press(KeyCode::Char('r')), Some(Command::Repeat));
        assert_eq!(press(KeyCode::Char('a')), Some(Command::Replay));
        assert_eq!(press(KeyCode::Esc), Some(Command::Back));
        assert_eq!(press(KeyCode::Char('x')), None);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Command::from_key(&ctrl_c), Some(Command::Back));
        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(Command::from_key(&ctrl_n), None);

        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(Command::from_key(&release), None);
    }

    #[test]
    fn replay_key_restarts_finished_session() {
        // Right arrow ends the only card, `a` replays it, `q` leaves.
        let items = vec![item("Peru", "Q1")];
        let mut input = vec![key(KeyCode::Right)];
        input.extend(keys("aq"));
        let (outcome, spoken, _) = play("Peru", items, input);
        assert_eq!(outcome, Outcome::Left);
        assert_eq!(spoken.last().map(String::as_str), Some("Question 1 of 1. Q1"));
        assert_eq!(spoken.len(), 3);
    }

    #[test]
    fn terminal_frames_redraw_in_place() {
        let selection = SessionSelection::new("Peru", None, 10);
        let renderer = Renderer::new(DisplayPreferences::default(), &selection);
        let session = PlaybackSession::new(selection, ConsoleNarrator::new());
        let config = DriverConfig {
            tick_period: Duration::from_millis(1),
            clear_screen: true,
        };
        let mut out = Vec::new();
        draw(&session, &mut out, &renderer, &config).unwrap();

        let mut expected = Vec::new();
        queue!(expected, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0)).unwrap();
        assert!(out.starts_with(&expected));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Loading trivia..."));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn selection_flag_decodes_navigation_query() {
        let args = PlayArgs {
            source: SourceArgs::default(),
            country: None,
            period: None,
            count: DEFAULT_QUESTION_COUNT,
            selection: Some("?country=Japan&period=Medieval&count=5".into()),
            high_contrast: false,
            text_size: TextSize::Medium,
            speech_command: None,
        };
        let selection = args.selection().unwrap();
        assert_eq!(selection.country, "Japan");
        assert_eq!(selection.period.label(), "Medieval");
        assert_eq!(selection.question_count, 5);

        let blank = PlayArgs {
            selection: Some("period=any".into()),
            ..args
        };
        assert!(blank.selection().is_err());
    }
}
