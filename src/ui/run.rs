use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use crate::api::FeedApi;
use crate::storage::traits::KvStore;
use crate::ui::app::App;
use crate::ui::intent::{intents_for_key, intents_for_mouse, Intent};
use crate::ui::render;

/// One animation frame; reveals advance at most one card per tick.
const TICK: Duration = Duration::from_millis(50);

/// Take over the terminal, drive the widget until quit, restore the
/// terminal. Teardown runs even when the loop errors.
pub fn run<A: FeedApi, K: KvStore>(app: &mut App<A, K>) -> Result<()> {
    let mut terminal = init().context("initialize terminal")?;
    let result = event_loop(&mut terminal, app);
    teardown(&mut terminal).context("restore terminal")?;
    result
}

fn init() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Releases raw mode and the alternate screen in reverse order of
/// acquisition; safe to call after a failed loop.
fn teardown(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn event_loop<A: FeedApi, K: KvStore>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<A, K>,
) -> Result<()> {
    app.load_initial();

    loop {
        terminal.draw(|frame| render::draw(frame, app))?;

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let intents = intents_for_key(key, app.dispatch_context());
                    if intents.contains(&Intent::Quit) {
                        info!("widget torn down");
                        return Ok(());
                    }
                    app.dispatch(intents);
                }
                Event::Mouse(mouse)
                    if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) =>
                {
                    let intents = intents_for_mouse(
                        mouse.column,
                        mouse.row,
                        app.layout(),
                        app.fishing_enabled(),
                    );
                    app.dispatch(intents);
                }
                _ => {}
            }
        }

        app.on_tick(Instant::now());
    }
}
