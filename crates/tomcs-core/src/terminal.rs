//! Scoped terminal mode management.
//!
//! [`TerminalSession::start`] switches the terminal into the modes the
//! canvas needs and [`TerminalSession`]'s `Drop` reverts them in reverse
//! order. The same reversion runs from a panic hook. A termination
//! signal only raises a flag, see [`termination_requested`], so the owner
//! can unwind through its own cleanup; a second signal restores the
//! terminal and exits on the spot.
//!
//! | Mode | Enable | Disable |
//! |------|--------|---------|
//! | Raw input (no echo, no line buffering) | `enable_raw_mode` | `disable_raw_mode` |
//! | Alternate screen | `CSI ? 1049 h` | `CSI ? 1049 l` |
//! | Any-event mouse tracking | `CSI ? 1003 h` | `CSI ? 1003 l` |
//! | SGR extended coordinates | `CSI ? 1006 h` | `CSI ? 1006 l` |
//!
//! Every step is best-effort: a terminal that rejects a mode loses the
//! feature it enables, and the failure is logged.

use std::io::{self, Write};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Enables reporting of press, release, and motion events.
pub const ENABLE_MOUSE_TRACKING: &[u8] = b"\x1b[?1003h";
/// Disables any-event mouse tracking.
pub const DISABLE_MOUSE_TRACKING: &[u8] = b"\x1b[?1003l";
/// Enables SGR extended mouse coordinates.
pub const ENABLE_SGR_MOUSE: &[u8] = b"\x1b[?1006h";
/// Disables SGR extended mouse coordinates.
pub const DISABLE_SGR_MOUSE: &[u8] = b"\x1b[?1006l";

/// Exit status used after a termination signal.
const SIGNAL_EXIT_CODE: i32 = 130;

static TERMINATION: AtomicBool = AtomicBool::new(false);

/// Which modes a session should switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Raw input without echo or line buffering.
    pub raw_mode: bool,
    /// Draw on the alternate screen buffer.
    pub alternate_screen: bool,
    /// Extended (SGR) mouse reports on press, release, and motion.
    pub mouse_tracking: bool,
    /// Hide the text cursor while the session is active.
    pub hide_cursor: bool,
}

impl SessionOptions {
    /// Everything the interactive designer needs.
    #[must_use]
    pub const fn designer() -> Self {
        Self {
            raw_mode: true,
            alternate_screen: true,
            mouse_tracking: true,
            hide_cursor: true,
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::designer()
    }
}

/// Terminal modes held for the lifetime of this value.
#[derive(Debug)]
pub struct TerminalSession {
    raw_mode: bool,
    alternate_screen: bool,
    mouse_tracking: bool,
    cursor_hidden: bool,
}

impl TerminalSession {
    /// Switches on the requested modes.
    ///
    /// Installs the panic hook and signal handler on first use. Modes the
    /// terminal rejects are skipped with a warning.
    pub fn start(options: SessionOptions) -> Self {
        install_cleanup_hooks();

        let mut session = Self {
            raw_mode: false,
            alternate_screen: false,
            mouse_tracking: false,
            cursor_hidden: false,
        };
        let mut stdout = io::stdout();

        if options.raw_mode {
            match crossterm::terminal::enable_raw_mode() {
                Ok(()) => {
                    session.raw_mode = true;
                    tracing::info!("terminal raw mode enabled");
                }
                Err(e) => tracing::warn!(error = %e, "raw mode unavailable"),
            }
        }

        if options.alternate_screen {
            match crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen) {
                Ok(()) => {
                    session.alternate_screen = true;
                    tracing::info!("alternate screen enabled");
                }
                Err(e) => tracing::warn!(error = %e, "alternate screen unavailable"),
            }
        }

        if options.hide_cursor {
            match crossterm::execute!(stdout, crossterm::cursor::Hide) {
                Ok(()) => session.cursor_hidden = true,
                Err(e) => tracing::warn!(error = %e, "cannot hide cursor"),
            }
        }

        if options.mouse_tracking {
            match write_mouse_modes(&mut stdout, true) {
                Ok(()) => {
                    session.mouse_tracking = true;
                    tracing::info!("mouse tracking enabled");
                }
                Err(e) => tracing::warn!(error = %e, "mouse tracking unavailable, dragging disabled"),
            }
        }

        session
    }

    /// Whether mouse reports were switched on.
    #[must_use]
    pub const fn mouse_tracking(&self) -> bool {
        self.mouse_tracking
    }

    /// Whether raw input was switched on.
    #[must_use]
    pub const fn raw_mode(&self) -> bool {
        self.raw_mode
    }

    /// Reverts every mode now instead of at drop.
    pub fn stop(mut self) {
        self.cleanup();
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();

        if self.mouse_tracking {
            if let Err(e) = write_mouse_modes(&mut stdout, false) {
                tracing::warn!(error = %e, "failed to disable mouse tracking");
            }
            self.mouse_tracking = false;
            tracing::info!("mouse tracking disabled");
        }

        if self.cursor_hidden {
            let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
            self.cursor_hidden = false;
        }

        if self.alternate_screen {
            if let Err(e) = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen) {
                tracing::warn!(error = %e, "failed to leave alternate screen");
            }
            self.alternate_screen = false;
            tracing::info!("alternate screen disabled");
        }

        if self.raw_mode {
            if let Err(e) = crossterm::terminal::disable_raw_mode() {
                tracing::warn!(error = %e, "failed to disable raw mode");
            }
            self.raw_mode = false;
            tracing::info!("terminal raw mode disabled");
        }

        let _ = stdout.flush();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Writes the mode 1003 and 1006 toggles.
///
/// Enabling sets tracking before the encoding; disabling goes in reverse.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_mouse_modes(writer: &mut impl Write, enable: bool) -> io::Result<()> {
    if enable {
        writer.write_all(ENABLE_MOUSE_TRACKING)?;
        writer.write_all(ENABLE_SGR_MOUSE)?;
    } else {
        writer.write_all(DISABLE_SGR_MOUSE)?;
        writer.write_all(DISABLE_MOUSE_TRACKING)?;
    }
    writer.flush()
}

/// Whether a termination signal arrived since the handler was installed.
#[must_use]
pub fn termination_requested() -> bool {
    TERMINATION.load(Ordering::SeqCst)
}

/// Raises `flag` and reports whether it was already raised.
fn record_signal(flag: &AtomicBool) -> bool {
    flag.swap(true, Ordering::SeqCst)
}

/// Reverts every mode a session may have switched on, ignoring errors.
///
/// Safe to call when nothing was enabled.
pub fn restore_terminal() {
    let mut stdout = io::stdout();
    let _ = write_mouse_modes(&mut stdout, false);
    let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
    let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}

fn install_cleanup_hooks() {
    static HOOKS: OnceLock<()> = OnceLock::new();
    let _ = HOOKS.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal();
            previous(info);
        }));

        if let Err(e) = ctrlc::set_handler(|| {
            if record_signal(&TERMINATION) {
                tracing::warn!("second termination signal, exiting");
                restore_terminal();
                std::process::exit(SIGNAL_EXIT_CODE);
            }
            tracing::warn!("termination signal received, shutting down");
        }) {
            tracing::warn!(error = %e, "cannot install signal handler");
        }
    });
}
