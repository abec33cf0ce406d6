use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use parbuild::errors::{ParbuildError, Result};
use parbuild::exec::{CommandBackend, ExecContext};
use parbuild::types::CommandOutcome;

/// A fake backend that:
/// - records every command it is asked to run (diagnostics included)
/// - returns a scripted exit code per command (default: success)
/// - optionally sleeps per command, to make concurrency observable
/// - tracks the peak number of commands running at once
#[derive(Clone, Default)]
pub struct FakeBackend {
    calls: Arc<Mutex<Vec<String>>>,
    exit_codes: Arc<HashMap<String, i32>>,
    unspawnable: Arc<HashSet<String>>,
    delay: Duration,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `cmd` exit with `code`.
    pub fn with_exit_code(mut self, cmd: &str, code: i32) -> Self {
        Arc::make_mut(&mut self.exit_codes).insert(cmd.to_string(), code);
        self
    }

    /// Make `cmd` fail as if the shell could not be started.
    pub fn with_spawn_error(mut self, cmd: &str) -> Self {
        Arc::make_mut(&mut self.unspawnable).insert(cmd.to_string());
        self
    }

    /// Sleep this long inside every command.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Every command run so far, in the order they started.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// How many times `cmd` was run.
    pub fn count(&self, cmd: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == cmd).count()
    }

    /// Highest number of commands that were running at the same time.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl CommandBackend for FakeBackend {
    fn run<'a>(
        &'a self,
        cmd: &'a str,
        _ctx: &'a ExecContext,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutcome>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(cmd.to_string());

            if self.unspawnable.contains(cmd) {
                return Err(ParbuildError::Other(anyhow::anyhow!(
                    "fake spawn failure for '{cmd}'"
                )));
            }

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let outcome = match self.exit_codes.get(cmd) {
                Some(0) | None => CommandOutcome::Success,
                Some(code) => CommandOutcome::Failed(*code),
            };
            Ok(outcome)
        })
    }
}
