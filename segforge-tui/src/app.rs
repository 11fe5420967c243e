use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::event;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing::{debug, info};

use segforge::clipboard::ClipboardSink;
use segforge::controller::{Flow, Input, InteractionController};

use crate::input;
use crate::view;

/// Input, then animation, then drawing, once per `frame_interval` until the
/// user quits or `shutdown` is raised.
///
/// Edits live in `app`, so they survive an error return.
pub fn run<B, C>(
    terminal: &mut Terminal<B>,
    app: &mut InteractionController<C>,
    frame_interval: Duration,
    shutdown: &AtomicBool,
) -> io::Result<()>
where
    B: Backend,
    C: ClipboardSink,
{
    loop {
        let size = terminal.size()?;
        let regions = view::regions(Rect::new(0, 0, size.width, size.height));

        if *app.layout() != regions.layout {
            debug!(width = size.width, height = size.height, "layout changed");
            app.handle(Input::Resize(regions.layout));
        }

        if shutdown.load(Ordering::Relaxed) {
            info!("termination signal received");
            break;
        }

        if drain_events(app, frame_interval)? == Flow::Exit {
            break;
        }

        app.tick();

        terminal.draw(|f| view::draw(f, &regions, app))?;
    }

    Ok(())
}

/// Waits up to one frame for the first event, then takes whatever else is
/// already queued.
fn drain_events<C: ClipboardSink>(
    app: &mut InteractionController<C>,
    frame_interval: Duration,
) -> io::Result<Flow> {
    let deadline = Instant::now() + frame_interval;
    let mut wait = frame_interval;

    while event::poll(wait)? {
        let ev = event::read()?;

        if let Some(input) = input::translate(&ev) {
            if app.handle(input) == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }

        wait = deadline.saturating_duration_since(Instant::now());
    }

    Ok(Flow::Continue)
}
