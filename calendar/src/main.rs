//! A TUI for signing up for or signing into your calendar

/// The "functional core" to the main module's "imperative shell"
mod app;

/// Configuration and argument parsing
mod config;

use app::{App, EffectContext};
use clap::Parser;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use std::{io, process::ExitCode, sync::Arc};
use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedSender},
    task::JoinHandle,
};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> io::Result<ExitCode> {
    let config = config::Config::parse();

    // The terminal belongs to the UI, so logs go to a file instead. We have to
    // hold onto the guard until exit to make sure buffered logs get written.
    let _guard = init_logging(&config)?;
    tracing::info!(server = %config.server, "starting");

    let mut terminal = ratatui::init();
    terminal.clear()?;
    let res = run(terminal, Arc::new(EffectContext::new(&config))).await;
    ratatui::restore();
    res
}

/// Send `tracing` output to a log file in the data directory, filtered by
/// `RUST_LOG` (or `info` if that's unset.)
fn init_logging(config: &config::Config) -> io::Result<WorkerGuard> {
    let appender = rolling::RollingFileAppender::builder()
        .rotation(rolling::Rotation::NEVER)
        .filename_prefix("calendar.log")
        .build(config.data_dir())
        .map_err(io::Error::other)?;

    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}

/// Manage the lifecycle of the app
async fn run(mut terminal: DefaultTerminal, context: Arc<EffectContext>) -> io::Result<ExitCode> {
    let mut app = App::new();

    // We expect side-effectful behaviors (that is, things like FS or network
    // access) to take place via async tasks. Once those tasks are done, we read
    // their results off of a channel. We keep track of outstanding effects so
    // we can exit cleanly.
    let (effect_tx, mut effect_rx) = unbounded_channel();
    let mut outstanding_effects = Vec::with_capacity(1);

    outstanding_effects.push(spawn_effect_task(
        effect_tx.clone(),
        Arc::clone(&context),
        app.init(),
    ));
    terminal.draw(|frame| app.render(frame))?;

    let mut event_stream = EventStream::new();

    loop {
        // Wait for either external input or the result of an effect. Not
        // every terminal event matters to us, hence the `Option`.
        let next_action_opt = tokio::select! {
            event_opt = event_stream.next() => {
                match event_opt {
                    Some(Ok(Event::Key(key_event))) => {
                        Some(app::Action::Key(key_event))
                    }
                    Some(Err(err)) => {
                        Some(app::Action::Problem(err.to_string()))
                    }
                    _ => None,
                }
            },

            effect_opt = effect_rx.recv() => {
                effect_opt
            }
        };

        if let Some(action) = next_action_opt {
            for effect in app.handle(action) {
                outstanding_effects.push(spawn_effect_task(
                    effect_tx.clone(),
                    Arc::clone(&context),
                    effect,
                ));
            }
        }

        terminal.draw(|frame| app.render(frame))?;

        // This list should never be too long (since we do this on every pass
        // through the event loop) so a full scan is fine.
        outstanding_effects.retain(|handle| !handle.is_finished());

        // If the app wants to exit, let outstanding effects finish first so
        // that a session that's mid-write makes it to disk.
        if let Some(code) = app.should_exit() {
            for effect in outstanding_effects.drain(..) {
                if let Err(err) = effect.await {
                    tracing::error!(?err, "effect task failed during shutdown");
                }
            }

            return Ok(code);
        }
    }
}

/// Spawn a task to run an effect and send the next action to the app.
fn spawn_effect_task(
    effect_tx: UnboundedSender<app::Action>,
    context: Arc<EffectContext>,
    effect: app::Effect,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Some(next_action) = effect.run(&context).await {
            // The receiver only goes away when we're shutting down, at which
            // point nobody needs the result.
            if effect_tx.send(next_action).is_err() {
                tracing::debug!("app is gone; dropping effect result");
            }
        }
    })
}
