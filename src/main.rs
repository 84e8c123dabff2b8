mod app;
mod config;
mod db;
mod error;
mod event;
mod logging;
mod models;
mod planner;
mod timer;
mod ui;
mod validation;
mod view;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use app::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init_logging()?;

    let app = App::new()?;

    execute!(std::io::stdout(), EnableBracketedPaste)?;
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    let _ = execute!(std::io::stdout(), DisableBracketedPaste);

    log::info!("shutting down");
    result
}
