//! Progress reporting
//!
//! In-place single-line progress feedback for long-running loops: a bar with
//! percentage when the total is known, a spinner otherwise. Rendering is
//! suppressed entirely when the destination is not an interactive terminal;
//! the interactivity answer is fixed at construction and never re-detected.

use crate::error::{CliError, Result};
use crate::utils::term;
use std::io::{self, Write};
use tracing::debug;

const SPINNER_GLYPHS: [char; 4] = ['|', '/', '-', '\\'];
const BAR_WIDTH: usize = 30;

/// Reporter lifecycle: one tick makes it active, finish is final
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Active,
    Done,
}

impl Phase {
    fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Done => "finished",
        }
    }
}

/// Emits incremental progress feedback during a unit-of-work loop
pub struct ProgressReporter<W: Write> {
    out: W,
    interactive: bool,
    label: String,
    total: Option<u64>,
    current: u64,
    glyph: usize,
    phase: Phase,
}

impl ProgressReporter<io::Stdout> {
    /// Reporter writing to stdout, with interactivity detected once here
    pub fn stdout(label: impl Into<String>, total: Option<u64>) -> Self {
        Self::new(io::stdout(), label, total, term::stdout_is_interactive())
    }
}

impl<W: Write> ProgressReporter<W> {
    /// Create a reporter against an already-resolved destination.
    ///
    /// `interactive` is the caller's answer to "can this destination redraw
    /// a line in place"; passing `false` makes every render a no-op while
    /// counters still advance.
    pub fn new(out: W, label: impl Into<String>, total: Option<u64>, interactive: bool) -> Self {
        let label = label.into();
        debug!("progress reporter for {:?}, interactive: {}", label, interactive);
        Self {
            out,
            interactive,
            label,
            total,
            current: 0,
            glyph: 0,
            phase: Phase::Idle,
        }
    }

    /// Record one completed unit of work and redraw the progress line.
    ///
    /// Non-interactive destinations get no bytes; the counters still move so
    /// a final summary stays accurate.
    pub fn tick(&mut self) -> Result<()> {
        if self.phase == Phase::Done {
            return Err(CliError::invalid_state("tick", self.phase.name()));
        }
        self.phase = Phase::Active;
        self.current += 1;
        if !self.interactive {
            return Ok(());
        }
        self.glyph = (self.glyph + 1) % SPINNER_GLYPHS.len();
        let line = self.render_line(false);
        write!(self.out, "\r{}", line)?;
        self.out.flush()?;
        Ok(())
    }

    /// Emit the final complete render and a single trailing newline.
    ///
    /// Leaves the terminal on a fresh line so subsequent output starts
    /// clean. The reporter cannot be reused afterwards.
    pub fn finish(&mut self) -> Result<()> {
        if self.phase == Phase::Done {
            return Err(CliError::invalid_state("finish", self.phase.name()));
        }
        self.phase = Phase::Done;
        if !self.interactive {
            return Ok(());
        }
        let line = self.render_line(true);
        writeln!(self.out, "\r{}", line)?;
        self.out.flush()?;
        Ok(())
    }

    /// Units of work recorded so far
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Whether renders actually reach the destination
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn render_line(&self, complete: bool) -> String {
        match self.total {
            Some(total) if total > 0 => self.render_bar(total, complete),
            _ => self.render_spinner(complete),
        }
    }

    /// pip-style bar: `label [=====>------] 47%`
    fn render_bar(&self, total: u64, complete: bool) -> String {
        let progress = if complete {
            1.0
        } else {
            (self.current as f64 / total as f64).min(1.0)
        };
        let filled = (progress * BAR_WIDTH as f64) as usize;

        let mut bar = String::with_capacity(BAR_WIDTH);
        for i in 0..BAR_WIDTH {
            if i < filled {
                bar.push('=');
            } else if i == filled {
                bar.push('>');
            } else {
                bar.push('-');
            }
        }
        format!(
            "{} [{}] {:>3}%",
            self.label,
            bar,
            (progress * 100.0) as u64
        )
    }

    /// Rotating glyph with a running count: `- label (12)`
    fn render_spinner(&self, complete: bool) -> String {
        if complete {
            format!("{} done ({})", self.label, self.current)
        } else {
            format!(
                "{} {} ({})",
                SPINNER_GLYPHS[self.glyph], self.label, self.current
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reporter(total: Option<u64>, interactive: bool) -> ProgressReporter<Vec<u8>> {
        ProgressReporter::new(Vec::new(), "scanning", total, interactive)
    }

    #[test]
    fn test_non_interactive_renders_zero_bytes() {
        let mut progress = reporter(Some(100), false);
        for _ in 0..100 {
            progress.tick().unwrap();
        }
        progress.finish().unwrap();
        assert_eq!(progress.current(), 100);
        assert!(progress.out.is_empty());
    }

    #[test]
    fn test_interactive_overwrites_in_place() {
        let mut progress = reporter(Some(4), true);
        for _ in 0..4 {
            progress.tick().unwrap();
        }
        let rendered = String::from_utf8(progress.out.clone()).unwrap();
        assert_eq!(rendered.matches('\r').count(), 4);
        assert_eq!(rendered.matches('\n').count(), 0);

        progress.finish().unwrap();
        let rendered = String::from_utf8(progress.out.clone()).unwrap();
        assert_eq!(rendered.matches('\n').count(), 1);
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn test_bar_reaches_full_on_finish() {
        let mut progress = reporter(Some(3), true);
        progress.tick().unwrap();
        progress.finish().unwrap();
        let rendered = String::from_utf8(progress.out.clone()).unwrap();
        let last = rendered.lines().last().unwrap();
        let last = last.rsplit('\r').next().unwrap();
        assert!(last.contains("100%"));
        assert!(!last.contains('>'));
    }

    #[test]
    fn test_spinner_without_total() {
        let mut progress = reporter(None, true);
        progress.tick().unwrap();
        progress.tick().unwrap();
        progress.finish().unwrap();
        let rendered = String::from_utf8(progress.out.clone()).unwrap();
        assert!(rendered.contains('/'));
        assert!(rendered.contains("scanning done (2)"));
    }

    #[test]
    fn test_tick_after_finish_is_invalid() {
        let mut progress = reporter(Some(2), false);
        progress.tick().unwrap();
        progress.finish().unwrap();

        let err = progress.tick().unwrap_err();
        assert!(matches!(
            err,
            CliError::InvalidState {
                operation: "tick",
                state: "finished",
            }
        ));
        assert!(progress.finish().is_err());
    }

    #[test]
    fn test_finish_from_idle_is_allowed() {
        let mut progress = reporter(Some(2), true);
        progress.finish().unwrap();
        let rendered = String::from_utf8(progress.out.clone()).unwrap();
        assert_eq!(rendered.matches('\n').count(), 1);
    }
}
