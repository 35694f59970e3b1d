//! Console progress for long-running git operations.
//!
//! Clone callbacks arrive far faster than a human can read them, so the
//! [`ProgressReporter`] redraws a single console line at most once per
//! interval. The last checkout line is always written so the console ends on
//! a complete `N / N` state.

use console::{pad_str, Alignment, Term};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};

/// Minimum time between two throttled progress lines
pub const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// Spinner frames for the pull spinner
const SPINNER_FRAMES: [&str; 8] = ["⠁", "⠂", "⠄", "⡀", "⢀", "⠠", "⠐", "⠈"];

/// Width used when the terminal size cannot be determined
const FALLBACK_WIDTH: usize = 80;

/// Source of the current time, injectable for tests
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Throttled single-line progress writer fed by clone callbacks
pub struct ProgressReporter<W: Write, C: Clock = SystemClock> {
    out: W,
    clock: C,
    interval: Duration,
    width: usize,
    last_emit: Option<Instant>,
    writes: usize,
}

impl ProgressReporter<io::Stdout, SystemClock> {
    /// Reporter writing to stdout, padded to the current terminal width
    pub fn stdout() -> Self {
        let term = Term::stdout();
        let width = term
            .size_checked()
            .map(|(_, cols)| cols as usize)
            .unwrap_or(FALLBACK_WIDTH);
        Self::new(io::stdout(), SystemClock, width)
    }
}

impl ProgressReporter<io::Sink, SystemClock> {
    /// Reporter that discards everything
    pub fn hidden() -> Self {
        Self::new(io::sink(), SystemClock, FALLBACK_WIDTH)
    }
}

impl<W: Write, C: Clock> ProgressReporter<W, C> {
    pub fn new(out: W, clock: C, width: usize) -> Self {
        Self {
            out,
            clock,
            interval: PROGRESS_INTERVAL,
            width,
            last_emit: None,
            writes: 0,
        }
    }

    /// Checkout step callback
    pub fn checkout_progress(&mut self, _path: Option<&Path>, completed: usize, total: usize) {
        if completed == 0 {
            // Leave the transfer line intact
            self.write_raw("\n");
        }

        let line = format!("Completed steps: {} / {}", completed, total);

        if completed == total {
            let padded = self.pad(&line);
            self.write_raw(&format!("\r{}\n", padded));
            return;
        }

        if self.should_emit() {
            self.redraw(&line);
        }
    }

    /// Object transfer callback. Always asks git to continue.
    pub fn transfer_progress(&mut self, received_objects: usize, total_objects: usize) -> bool {
        if self.should_emit() {
            self.redraw(&format!(
                "Received Objects: {} / {}",
                received_objects, total_objects
            ));
        }
        true
    }

    /// Remote sideband text callback. Always asks git to continue.
    pub fn server_progress(&mut self, text: &str) -> bool {
        if self.should_emit() {
            let text = text.trim_matches(|c| c == '\r' || c == '\n');
            self.redraw(text);
        }
        true
    }

    /// Number of writes issued so far
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn should_emit(&mut self) -> bool {
        let now = self.clock.now();
        let due = match self.last_emit {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.interval,
        };
        if due {
            self.last_emit = Some(now);
        }
        due
    }

    fn pad(&self, line: &str) -> String {
        pad_str(line, self.width.saturating_sub(1), Alignment::Left, None).into_owned()
    }

    fn redraw(&mut self, line: &str) {
        let padded = self.pad(line);
        self.write_raw(&format!("\r{}", padded));
    }

    fn write_raw(&mut self, text: &str) {
        self.writes += 1;
        // Progress output must never abort the transfer
        let _ = self.out.write_all(text.as_bytes());
        let _ = self.out.flush();
    }
}

/// Spinner shown while pulling, since pulls report no checkout steps
pub fn pull_spinner(visible: bool, message: &str) -> ProgressBar {
    if !visible {
        return ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden());
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&SPINNER_FRAMES)
        .template("{spinner:.green} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
