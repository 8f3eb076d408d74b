mod app;
mod assets;
mod config;
mod error;
mod input;
mod overlays;
mod panels;
mod task;
mod task_manager;
mod ui;

use std::fs::File;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use log::{error, info};
use ratatui::prelude::*;
use simplelog::{ConfigBuilder, WriteLogger};

use app::App;
use assets::Icons;
use config::Args;
use error::AppError;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    match try_main(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("task-app: {err}");
            ExitCode::FAILURE
        }
    }
}

// Logs go to a file since the terminal belongs to the UI
fn init_logging(args: &Args) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(args.log_level.into(), log_config, log_file);
    }
}

fn try_main(args: &Args) -> Result<(), AppError> {
    // Icons are required; fail before touching the terminal
    let icons = Icons::load(&args.assets)?;
    info!("Starting {}", ui::APP_TITLE);

    with_terminal_mode(
        || Ok(enable_raw_mode()?),
        || {
            let mut terminal = setup()?;
            let result = run(&mut terminal, App::new(icons));
            let shown = terminal.show_cursor().map_err(AppError::from);
            result.and(shown)
        },
        restore,
    )
}

/// Run `body` after `enter`, then `leave` once `enter` has succeeded,
/// even when `body` fails part way through.
fn with_terminal_mode<T>(
    enter: impl FnOnce() -> Result<(), AppError>,
    body: impl FnOnce() -> Result<T, AppError>,
    leave: impl FnOnce() -> Result<(), AppError>,
) -> Result<T, AppError> {
    enter()?;
    let result = body();
    let left = leave();
    let value = result?;
    left?;
    Ok(value)
}

fn setup() -> Result<Terminal<CrosstermBackend<io::Stdout>>, AppError> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle(ui::APP_TITLE)
    )?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore() -> Result<(), AppError> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<(), AppError> {
    loop {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        // Nothing happens between user events, so block on the next one
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }

        if app.should_quit {
            break;
        }
    }

    info!("Exiting with {} task(s)", app.task_manager.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn failure() -> AppError {
        AppError::Terminal(io::Error::other("no tty"))
    }

    #[test]
    fn test_leave_runs_when_body_fails() {
        let calls = RefCell::new(Vec::new());
        let result: Result<(), AppError> = with_terminal_mode(
            || {
                calls.borrow_mut().push("enter");
                Ok(())
            },
            || {
                calls.borrow_mut().push("body");
                Err(failure())
            },
            || {
                calls.borrow_mut().push("leave");
                Ok(())
            },
        );
        assert!(result.is_err());
        assert_eq!(*calls.borrow(), vec!["enter", "body", "leave"]);
    }

    #[test]
    fn test_failed_enter_skips_body_and_leave() {
        let calls = RefCell::new(Vec::new());
        let result: Result<(), AppError> = with_terminal_mode(
            || Err(failure()),
            || {
                calls.borrow_mut().push("body");
                Ok(())
            },
            || {
                calls.borrow_mut().push("leave");
                Ok(())
            },
        );
        assert!(result.is_err());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_body_value_passes_through() {
        let result = with_terminal_mode(|| Ok(()), || Ok(3), || Ok(()));
        assert_eq!(result.unwrap(), 3);

        let result: Result<u8, AppError> =
            with_terminal_mode(|| Ok(()), || Ok(3), || Err(failure()));
        assert!(result.is_err());
    }
}
