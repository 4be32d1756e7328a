//! Output sinks for progress notifications and final results.

use std::io::{self, IsTerminal, Stderr, Stdout, Write};

/// Delivers suite output to the caller.
pub trait Recorder {
    /// Sends a transient progress or failure message.
    fn notify(&mut self, message: &str);

    /// Sends a final result line.
    fn log(&mut self, result: &str);
}

/// Recorder writing notifications to a diagnostic stream and results to a
/// primary stream.
///
/// When the primary stream has been redirected away from a terminal, results
/// are mirrored to the diagnostic stream so progress and results stay visible
/// together.
#[derive(Debug)]
pub struct StreamRecorder<P: Write, D: Write> {
    primary: P,
    diagnostic: D,
    mirror_results: bool,
}

impl StreamRecorder<Stdout, Stderr> {
    /// Results on stdout, notifications on stderr.
    #[must_use]
    pub fn stdio() -> Self {
        let primary = io::stdout();
        let mirror_results = !primary.is_terminal();
        Self::new(primary, io::stderr(), mirror_results)
    }
}

impl<P: Write, D: Write> StreamRecorder<P, D> {
    /// Creates a recorder over explicit streams.
    #[must_use]
    pub const fn new(primary: P, diagnostic: D, mirror_results: bool) -> Self {
        Self {
            primary,
            diagnostic,
            mirror_results,
        }
    }

    /// Returns the underlying streams.
    pub fn into_inner(self) -> (P, D) {
        (self.primary, self.diagnostic)
    }
}

impl<P: Write, D: Write> Recorder for StreamRecorder<P, D> {
    fn notify(&mut self, message: &str) {
        writeln!(self.diagnostic, "{message}").ok();
    }

    fn log(&mut self, result: &str) {
        writeln!(self.primary, "{result}").ok();
        self.primary.flush().ok();
        if self.mirror_results {
            writeln!(self.diagnostic, "{result}").ok();
        }
    }
}
