// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Event loop — the heartbeat of the picker.
//
// Stdin bytes flow in from the background reader, get parsed into
// events, the application handles them, and a full frame is composed
// and flushed when anything changed. The loop blocks on the stdin
// channel with a short timeout, which gives three behaviors in one:
//
//   1. Instant response: input bytes arrive on the channel immediately,
//      no polling latency.
//   2. Zero CPU idle: `recv_timeout` blocks the thread; an idle picker
//      costs nothing.
//   3. Escape resolution: when the timeout fires with a pending lone
//      ESC in the parser, it is flushed as a real Escape keypress.
//
// Terminal resize is detected via a SIGWINCH handler that sets an
// `AtomicBool`; the loop checks the flag each iteration and repaints
// at the new size.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crate::input::{Event, Parser};
use crate::reader::StdinReader;
use crate::screen::Screen;
use crate::terminal::{Size, Terminal};

// ─── SIGWINCH ────────────────────────────────────────────────────────────────

/// Global flag set by the SIGWINCH handler. Checked each loop iteration.
static SIGWINCH_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Install a signal handler for SIGWINCH (terminal resize).
///
/// The handler simply sets the [`SIGWINCH_RECEIVED`] flag. Writing to
/// an atomic is one of the few operations permitted inside signal
/// handlers.
#[cfg(unix)]
fn install_sigwinch_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigwinch_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigwinch_handler(_sig: libc::c_int) {
    SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_sigwinch_handler() {
    // No-op on non-unix platforms.
}

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the application tells the event loop to do after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Continue running.
    Continue,
    /// Exit the event loop cleanly.
    Quit,
}

/// Application interface for the event loop.
///
/// The event loop calls [`on_event`](App::on_event) for each parsed
/// input event, [`on_resize`](App::on_resize) when the terminal size
/// changes, and [`paint`](App::paint) whenever a repaint is due. Only
/// `paint` is required.
pub trait App {
    /// Handle a parsed input event (key or paste).
    ///
    /// Return [`Action::Quit`] to exit the event loop.
    fn on_event(&mut self, _event: &Event) -> Action {
        Action::Continue
    }

    /// Handle terminal resize.
    fn on_resize(&mut self, _size: Size) {}

    /// Paint the current application state into the frame buffer.
    ///
    /// The screen has been cleared before this call — paint everything
    /// that should be visible at the given terminal size.
    fn paint(&mut self, screen: &mut Screen, size: Size);
}

// ─── Loop Config ─────────────────────────────────────────────────────────────

/// Configuration for the event loop timing.
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    /// Timeout for the channel `recv_timeout` call (milliseconds).
    ///
    /// This doubles as the escape sequence timeout: a lone ESC is
    /// flushed as an Escape keypress after at most this long.
    pub tick_interval_ms: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 25,
        }
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// The terminal event loop.
///
/// Owns the terminal, parser, screen, and stdin reader. Call
/// [`run`](Self::run) to enter the loop — it returns when the
/// application signals [`Action::Quit`].
///
/// # Example
///
/// ```no_run
/// use tint_term::event_loop::{Action, App, EventLoop};
/// use tint_term::input::{Event, KeyCode, KeyEvent};
/// use tint_term::screen::Screen;
/// use tint_term::terminal::Size;
///
/// struct MyApp;
///
/// impl App for MyApp {
///     fn on_event(&mut self, event: &Event) -> Action {
///         if let Event::Key(KeyEvent { code: KeyCode::Char('q'), .. }) = event {
///             return Action::Quit;
///         }
///         Action::Continue
///     }
///
///     fn paint(&mut self, screen: &mut Screen, _size: Size) {
///         screen.print("hello");
///     }
/// }
///
/// let mut event_loop = EventLoop::new()?;
/// event_loop.run(&mut MyApp)?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct EventLoop {
    terminal: Terminal,
    parser: Parser,
    screen: Screen,
    config: LoopConfig,
}

impl EventLoop {
    /// Create a new event loop with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn new() -> io::Result<Self> {
        Self::with_config(LoopConfig::default())
    }

    /// Create a new event loop with custom timing configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn with_config(config: LoopConfig) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new()?,
            parser: Parser::new(),
            screen: Screen::new(),
            config,
        })
    }

    /// The current terminal size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.terminal.size()
    }

    /// Run the event loop until the application returns [`Action::Quit`].
    ///
    /// This method:
    /// 1. Enters TUI mode (raw mode, alternate screen, bracketed paste)
    /// 2. Installs the SIGWINCH handler
    /// 3. Spawns the background stdin reader
    /// 4. Runs the loop
    /// 5. Restores the terminal on exit (even on error)
    ///
    /// # Errors
    ///
    /// Returns an error if terminal enter/leave or frame output fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;
        install_sigwinch_handler();

        let (mut reader, rx) = StdinReader::spawn();

        let result = self.run_inner(app, &rx);

        // Always clean up, even if the loop errored.
        reader.stop();
        self.terminal.leave()?;

        result
    }

    /// The inner loop, separated so cleanup runs regardless of outcome.
    fn run_inner(&mut self, app: &mut impl App, rx: &Receiver<Vec<u8>>) -> io::Result<()> {
        let mut dirty = true; // First frame always renders.
        let timeout = Duration::from_millis(self.config.tick_interval_ms);

        loop {
            // ── Receive stdin bytes ──────────────────────────────
            match rx.recv_timeout(timeout) {
                Ok(bytes) => {
                    let events = self.parser.advance(&bytes);
                    for event in &events {
                        if app.on_event(event) == Action::Quit {
                            return Ok(());
                        }
                    }
                    if !events.is_empty() {
                        dirty = true;
                    }
                }
                Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                    // Flush pending escape sequences (lone ESC → Escape
                    // key); the parser holds mid-paste content itself.
                    if self.parser.has_pending() {
                        let events = self.parser.flush();
                        for event in &events {
                            if app.on_event(event) == Action::Quit {
                                return Ok(());
                            }
                        }
                        if !events.is_empty() {
                            dirty = true;
                        }
                    }
                }
                Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                    // Reader thread died — exit gracefully.
                    return Ok(());
                }
            }

            // ── Check for terminal resize ────────────────────────
            if SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed) {
                let new_size = self.terminal.refresh_size();
                app.on_resize(new_size);
                dirty = true;
            }

            // ── Render if dirty ──────────────────────────────────
            if dirty {
                let size = self.terminal.size();
                self.screen.begin_frame();
                app.paint(&mut self.screen, size);
                self.screen.present()?;
                dirty = false;
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
