//! # Terminal Narrators
//!
//! [`ConsoleNarrator`] keeps the current utterance as an on-screen
//! caption and forwards it to an optional voice. [`CommandNarrator`] is
//! that voice: it runs an external text-to-speech program per utterance
//! and kills the previous one first, so speech never queues up.

use std::path::Path;
use std::process::{Child, Command, Stdio};

use anyhow::{bail, Result};

use trivia_state::{Narrator, SilentNarrator, SpeechParams};

// ── Captions ─────────────────────────────────────────────────────────

/// Narrator that shows the in-flight utterance as a caption.
#[derive(Debug, Default)]
pub struct ConsoleNarrator<V: Narrator = SilentNarrator> {
    voice: V,
    caption: Option<String>,
}

impl ConsoleNarrator {
    /// Captions only.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: Narrator> ConsoleNarrator<V> {
    /// Captions plus spoken output through `voice`.
    pub fn with_voice(voice: V) -> Self {
        Self {
            voice,
            caption: None,
        }
    }

    /// The utterance currently in flight, if any.
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn voice(&self) -> &V {
        &self.voice
    }
}

impl<V: Narrator> Narrator for ConsoleNarrator<V> {
    fn speak(&mut self, text: &str) {
        self.caption = Some(text.to_string());
        self.voice.speak(text);
    }

    fn cancel(&mut self) {
        self.caption = None;
        self.voice.cancel();
    }
}

// ── External TTS ─────────────────────────────────────────────────────

/// espeak's default speaking rate in words per minute.
const ESPEAK_BASE_WPM: f32 = 175.0;
/// espeak's default pitch on its 0-99 scale.
const ESPEAK_BASE_PITCH: f32 = 50.0;
/// espeak's default amplitude on its 0-200 scale.
const ESPEAK_BASE_AMPLITUDE: f32 = 100.0;

/// Narrator that speaks through an external program, one process per
/// utterance. The text is passed as the final argument.
#[derive(Debug)]
pub struct CommandNarrator {
    program: String,
    args: Vec<String>,
    child: Option<Child>,
}

impl CommandNarrator {
    /// Build from a command line such as `"espeak"` or `"say -v Alex"`.
    ///
    /// For `espeak` and `espeak-ng`, rate, pitch, and volume flags derived
    /// from `params` are appended to the given arguments.
    pub fn new(command_line: &str, params: SpeechParams) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let Some(program) = parts.next() else {
            bail!("speech command is empty");
        };
        let mut args: Vec<String> = parts.collect();
        if is_espeak(&program) {
            args.extend(espeak_args(params));
        }
        Ok(Self {
            program,
            args,
            child: None,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments placed before the utterance text.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Narrator for CommandNarrator {
    fn speak(&mut self, text: &str) {
        self.cancel();
        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(child) => self.child = Some(child),
            Err(e) => tracing::warn!(program = %self.program, error = %e, "speech command failed to start"),
        }
    }

    fn cancel(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        if let Ok(None) = child.try_wait() {
            if let Err(e) = child.kill() {
                tracing::debug!(error = %e, "failed to stop speech process");
            }
        }
        // Reap so no zombie outlives the utterance.
        if let Err(e) = child.wait() {
            tracing::debug!(error = %e, "failed to reap speech process");
        }
    }
}

impl Drop for CommandNarrator {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn is_espeak(program: &str) -> bool {
    Path::new(program)
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n == "espeak" || n == "espeak-ng")
}

/// `-s` words per minute, `-p` pitch, `-a` amplitude.
pub fn espeak_args(params: SpeechParams) -> Vec<String> {
    let scaled = |base: f32, factor: f32| ((base * factor).round() as u32).to_string();
    vec![
        "-s".into(),
        scaled(ESPEAK_BASE_WPM, params.rate),
        "-p".into(),
        scaled(ESPEAK_BASE_PITCH, params.pitch),
        "-a".into(),
        scaled(ESPEAK_BASE_AMPLITUDE, params.volume),
    ]
}
