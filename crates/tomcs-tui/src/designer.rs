//! Designer event loop.
//!
//! Stdin bytes, binding snapshots, image results and timers are turned
//! into [`TerminalEvent`]s and applied to the [`App`] one at a time, with a
//! redraw before each wait. The terminal modes and the poller are both
//! released before [`run`] returns, whatever the outcome.

use std::io::{self, Read};
use std::time::Duration;

use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::{mpsc, watch};
use tomcs_common::config::TomcsConfig;
use tomcs_core::input::InputDecoder;
use tomcs_core::terminal::{SessionOptions, TerminalSession};
use tomcs_image::{ConvertError, GlyphGrid};
use tomcs_runtime::poller::{self, BindingSnapshot, Poller};

use crate::app::{Action, App};
use crate::error::TuiError;
use crate::event::TerminalEvent;
use crate::ui;

/// How long a lone ESC byte waits for the rest of a sequence.
pub const ESCAPE_TIMEOUT: Duration = Duration::from_millis(50);

/// Redraw period when nothing else happens.
pub const TICK_RATE: Duration = Duration::from_millis(250);

const READ_BUFFER: usize = 1024;

type ImageResult = Result<GlyphGrid, ConvertError>;

/// Runs the designer until the user quits or stdin closes.
///
/// # Errors
///
/// Returns an error if the terminal backend cannot be set up or a frame
/// cannot be drawn.
pub async fn run(config: &TomcsConfig) -> Result<(), TuiError> {
    let mut poller = Poller::new(Duration::from_millis(config.poll_interval_ms));
    let bindings = poller.subscribe();
    poller
        .configure(poller::bindings_from_map(&config.bindings))
        .await;

    let session = TerminalSession::start(SessionOptions::designer());
    tracing::info!(
        theme = %config.theme,
        mouse = session.mouse_tracking(),
        "designer started"
    );

    let result = event_loop(config, bindings).await;

    poller.shutdown().await;
    session.stop();
    tracing::info!("designer stopped");
    result
}

async fn event_loop(
    config: &TomcsConfig,
    mut bindings: watch::Receiver<BindingSnapshot>,
) -> Result<(), TuiError> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
        .map_err(|source| TuiError::Setup { source })?;
    terminal
        .clear()
        .map_err(|source| TuiError::Setup { source })?;

    let mut app = App::new(config);
    app.apply_bindings(bindings.borrow_and_update().clone());

    let mut decoder = InputDecoder::new();
    let mut input = spawn_stdin_reader();
    let (image_tx, mut image_rx) = mpsc::unbounded_channel::<ImageResult>();
    let mut ticker = tokio::time::interval(TICK_RATE);

    while app.running {
        let _ = terminal
            .draw(|frame| ui::render(frame, &app))
            .map_err(|source| TuiError::Draw { source })?;

        let event = tokio::select! {
            chunk = input.recv() => chunk.map_or(TerminalEvent::InputClosed, TerminalEvent::Input),
            Ok(()) = bindings.changed() => {
                TerminalEvent::Bindings(bindings.borrow_and_update().clone())
            }
            Some(result) = image_rx.recv() => TerminalEvent::Image(result),
            () = tokio::time::sleep(ESCAPE_TIMEOUT), if decoder.has_pending() => {
                TerminalEvent::EscapeTimeout
            }
            _ = ticker.tick() => TerminalEvent::Tick,
        };

        match event {
            TerminalEvent::Input(chunk) => {
                for decoded in decoder.decode(&chunk) {
                    perform(app.handle_input(decoded), &image_tx);
                    if !app.running {
                        break;
                    }
                }
            }
            TerminalEvent::EscapeTimeout => {
                if let Some(decoded) = decoder.flush() {
                    perform(app.handle_input(decoded), &image_tx);
                }
            }
            TerminalEvent::InputClosed => {
                tracing::info!("stdin closed");
                app.quit();
            }
            TerminalEvent::Bindings(snapshot) => app.apply_bindings(snapshot),
            TerminalEvent::Image(result) => app.image_loaded(result),
            TerminalEvent::Tick => {}
        }

        if tomcs_core::terminal::termination_requested() {
            tracing::info!("termination requested");
            app.quit();
        }
    }
    Ok(())
}

fn perform(action: Action, images: &mpsc::UnboundedSender<ImageResult>) {
    match action {
        Action::LoadImage { source, width } => {
            tracing::debug!(source = %source.describe(), width, "converting image");
            let images = images.clone();
            let _ = tokio::spawn(async move {
                let _ = images.send(tomcs_image::convert_async(source, width).await);
            });
        }
        Action::None | Action::Quit => {}
    }
}

/// Reads stdin on a plain thread and forwards each chunk.
///
/// The thread is detached: a read still blocked at exit must not hold up
/// runtime shutdown.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<Vec<u8>> {
    let (tx, rx) = mpsc::unbounded_channel();
    let spawned = std::thread::Builder::new()
        .name("tomcs-stdin".into())
        .spawn(move || {
            let mut stdin = io::stdin().lock();
            let mut buf = [0u8; READ_BUFFER];
            loop {
                match stdin.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        if tx.send(buf[..n].to_vec()).is_err() {
                            break;
                        }
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                    Err(e) => {
                        tracing::warn!(error = %e, "stdin read failed");
                        break;
                    }
                }
            }
        });
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "cannot start stdin reader");
    }
    rx
}
