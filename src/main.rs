#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{self, stdout};
use std::sync::Arc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use prodform::api::HttpProductApi;
use prodform::config::Config;
use prodform::logging;
use prodform::tui::{App, AppError, Submitter};

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_path = logging::init().map_err(AppError::from)?;
    let config = Config::load().map_err(AppError::from)?;
    tracing::info!(log = %log_path.display(), endpoint = %config.endpoint(), "starting");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .map_err(AppError::from)?;
    let api = HttpProductApi::new(&config);
    let endpoint = api.endpoint().to_string();
    let submitter = Submitter::new(Arc::new(api), runtime.handle().clone());
    let mut app = App::new(submitter, endpoint);

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = app.run(&mut terminal);

    let restore_result = restore_terminal();
    tracing::info!("exiting");
    match result {
        Err(e) => Err(e.into()),
        Ok(()) => restore_result.map_err(Into::into),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), LeaveAlternateScreen);
    raw_result.and(screen_result)
}
