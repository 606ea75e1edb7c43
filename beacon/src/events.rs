//! Foreground event sources
//!
//! A plain thread reads console lines and turns them into button presses and
//! termination requests. A second thread turns SIGINT/SIGTERM into the same
//! termination request. Both only write the shared atomics, so they never
//! wait on the transmission task.

use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use morse_core::{Duration, TransmitterControl};
use tracing::{info, warn};

/// Console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Button press: switch message at the next pass
    Toggle,
    /// Stop after the current pass
    Quit,
    /// Log the active message and phase
    Status,
}

impl Command {
    /// Parse one input line. Empty line presses the button.
    pub fn parse(line: &str) -> Option<Command> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "t" | "toggle" => Some(Command::Toggle),
            "q" | "quit" => Some(Command::Quit),
            "s" | "status" => Some(Command::Status),
            _ => None,
        }
    }
}

/// Maps console input onto [`TransmitterControl`] notifications
pub struct ConsoleEvents<'a> {
    control: &'a TransmitterControl,
    longest_pass: Duration,
}

impl<'a> ConsoleEvents<'a> {
    /// `longest_pass` bounds how long a quit waits and is only reported
    pub fn new(control: &'a TransmitterControl, longest_pass: Duration) -> Self {
        Self { control, longest_pass }
    }

    /// Apply a command
    pub fn handle(&self, command: Command) {
        match command {
            Command::Toggle => {
                self.control.on_toggle_pressed();
            }
            Command::Quit => self.request_termination(),
            Command::Status => info!(
                "Active: {:?}, phase: {:?}, presses: {}",
                self.control.active_message(),
                self.control.phase_monitor().current(),
                self.control.toggle_count()
            ),
        }
    }

    /// Read lines until quit or end of input. End of input counts as quit.
    pub fn run<R: BufRead>(&self, reader: R) {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Console read failed: {e}");
                    break;
                }
            };
            match Command::parse(&line) {
                Some(command) => {
                    self.handle(command);
                    if command == Command::Quit {
                        return;
                    }
                }
                None => warn!("Unknown command {:?} (Enter/t = toggle, s = status, q = quit)", line.trim()),
            }
        }
        self.request_termination();
    }

    fn request_termination(&self) {
        info!(
            "Stopping after the current pass (at most {} ms)",
            self.longest_pass.as_millis()
        );
        self.control.on_termination_requested();
    }
}

/// Start the stdin reader thread
pub fn spawn_stdin_reader(control: &'static TransmitterControl, longest_pass: Duration) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("console".into())
        .spawn(move || ConsoleEvents::new(control, longest_pass).run(io::stdin().lock()))
}

/// Start a thread that turns SIGINT/SIGTERM into a termination request.
///
/// The handlers are installed before this returns. A second signal exits the
/// process at once with status 130.
pub fn spawn_signal_watcher(control: &'static TransmitterControl, longest_pass: Duration) -> io::Result<JoinHandle<()>> {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let mut signals = {
        let _guard = runtime.enter();
        TerminationSignals::new()?
    };

    thread::Builder::new().name("signals".into()).spawn(move || {
        let events = ConsoleEvents::new(control, longest_pass);
        runtime.block_on(async {
            let name = signals.recv().await;
            info!("Received {name}");
            events.handle(Command::Quit);

            let name = signals.recv().await;
            warn!("Received {name} again, exiting without waiting for the pass");
            std::process::exit(130);
        })
    })
}

#[cfg(unix)]
struct TerminationSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl TerminationSignals {
    fn new() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    async fn recv(&mut self) -> &'static str {
        tokio::select! {
            _ = self.interrupt.recv() => "SIGINT",
            _ = self.terminate.recv() => "SIGTERM",
        }
    }
}

#[cfg(not(unix))]
struct TerminationSignals;

#[cfg(not(unix))]
impl TerminationSignals {
    fn new() -> io::Result<Self> {
        Ok(Self)
    }

    async fn recv(&mut self) -> &'static str {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Ctrl-C handler unavailable: {e}");
            std::future::pending::<()>().await;
        }
        "Ctrl-C"
    }
}
