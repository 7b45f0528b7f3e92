use log::info;
use stock_portfolio_core::PortfolioTracker;
use stock_portfolio_tui::{app::App, config::Config, logging, terminal};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    logging::init_logging(&config)?;

    let tracker = PortfolioTracker::new();
    info!("Starting Stock Portfolio Tracker ({tracker:?})");

    let mut app = App::new(tracker, config);
    terminal::run(&mut app)?;

    if app.tracker.has_unsaved_changes() {
        info!("Exiting with {} unexported holdings", app.tracker.entries().len());
    }
    Ok(())
}
