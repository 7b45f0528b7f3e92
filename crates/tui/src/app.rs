use log::{error, info, warn};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;
use stock_portfolio_core::errors::CoreError;
use stock_portfolio_core::models::chart::ChartData;
use stock_portfolio_core::models::stock::StockQuote;
use stock_portfolio_core::services::portfolio_service::AddOutcome;
use stock_portfolio_core::PortfolioTracker;

use crate::config::Config;

/// Which half of the window receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Picker,
    Holdings,
}

/// A destructive action waiting for a yes/no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Remove(String),
    Clear,
    Quit,
}

/// Modal dialog drawn over the window. While one is open it swallows all keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Info { title: String, message: String },
    Warning { title: String, message: String },
    Error { title: String, message: String },
    Confirm { message: String, action: PendingAction },
    ExportPrompt { input: String },
}

/// UI controller: input widgets' state plus the tracker they drive.
pub struct App {
    pub tracker: PortfolioTracker,
    pub config: Config,
    pub catalogue: Vec<StockQuote>,
    pub picker_index: usize,
    /// Raw text of the quantity box; parsed on "add".
    pub quantity_input: String,
    pub focus: Focus,
    pub holdings_state: TableState,
    pub modal: Option<Modal>,
    pub charts: ChartData,
    pub should_quit: bool,
}

impl App {
    pub fn new(tracker: PortfolioTracker, config: Config) -> Self {
        let catalogue = tracker.available_stocks();
        let charts = tracker.chart_data();
        Self {
            tracker,
            config,
            catalogue,
            picker_index: 0,
            quantity_input: "1".to_string(),
            focus: Focus::Picker,
            holdings_state: TableState::default(),
            modal: None,
            charts,
            should_quit: false,
        }
    }

    // ── Key dispatch ────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.modal.is_some() {
            self.handle_modal_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.request_quit(),
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Char('+') | KeyCode::Char('=') => self.increment_quantity(),
            KeyCode::Char('-') => self.decrement_quantity(),
            KeyCode::Char(c) if c.is_ascii_digit() => self.type_quantity_digit(c),
            KeyCode::Backspace => {
                self.quantity_input.pop();
            }
            KeyCode::Char('a') => self.add_selected(),
            KeyCode::Enter if self.focus == Focus::Picker => self.add_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.request_remove(),
            KeyCode::Char('c') => self.request_clear(),
            KeyCode::Char('e') => self.open_export_prompt(),
            KeyCode::Char('r') => self.refresh(),
            _ => {}
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        let Some(modal) = self.modal.take() else {
            return;
        };

        match modal {
            Modal::Info { .. } | Modal::Warning { .. } | Modal::Error { .. } => {
                // any key dismisses
            }
            Modal::Confirm { message, action } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.run_action(action),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {}
                _ => self.modal = Some(Modal::Confirm { message, action }),
            },
            Modal::ExportPrompt { mut input } => match key.code {
                KeyCode::Enter => self.export(&input),
                KeyCode::Esc => {}
                KeyCode::Backspace => {
                    input.pop();
                    self.modal = Some(Modal::ExportPrompt { input });
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    self.modal = Some(Modal::ExportPrompt { input });
                }
                _ => self.modal = Some(Modal::ExportPrompt { input }),
            },
        }
    }

    // ── Input widgets ───────────────────────────────────────────────

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Picker => Focus::Holdings,
            Focus::Holdings => Focus::Picker,
        };
        if self.focus == Focus::Holdings
            && self.holdings_state.selected().is_none()
            && !self.tracker.is_empty()
        {
            self.holdings_state.select(Some(0));
        }
    }

    fn move_selection(&mut self, delta: isize) {
        match self.focus {
            Focus::Picker => {
                if self.catalogue.is_empty() {
                    return;
                }
                self.picker_index = step(self.picker_index, delta, self.catalogue.len());
            }
            Focus::Holdings => {
                let len = self.tracker.entries().len();
                if len == 0 {
                    self.holdings_state.select(None);
                    return;
                }
                let next = match self.holdings_state.selected() {
                    Some(current) => step(current, delta, len),
                    None => 0,
                };
                self.holdings_state.select(Some(next));
            }
        }
    }

    /// Quantity currently typed, if it is a valid number.
    pub fn quantity(&self) -> Option<u32> {
        self.quantity_input.parse().ok()
    }

    fn increment_quantity(&mut self) {
        let next = self.quantity().unwrap_or(0).saturating_add(1).max(1);
        self.quantity_input = next.to_string();
    }

    fn decrement_quantity(&mut self) {
        let next = self.quantity().unwrap_or(1).saturating_sub(1).max(1);
        self.quantity_input = next.to_string();
    }

    fn type_quantity_digit(&mut self, digit: char) {
        if self.quantity_input == "0" {
            self.quantity_input.clear();
        }
        let mut candidate = self.quantity_input.clone();
        candidate.push(digit);
        // digits that would push the count past u32::MAX are ignored
        if candidate.parse::<u32>().is_ok() {
            self.quantity_input = candidate;
        }
    }

    pub fn selected_quote(&self) -> Option<&StockQuote> {
        self.catalogue.get(self.picker_index)
    }

    /// Symbol of the highlighted holdings row, if any.
    pub fn selected_holding(&self) -> Option<String> {
        self.holdings_state
            .selected()
            .and_then(|idx| self.tracker.entries().get(idx))
            .map(|entry| entry.symbol.clone())
    }

    // ── Actions ─────────────────────────────────────────────────────

    fn add_selected(&mut self) {
        let Some(quote) = self.selected_quote() else {
            self.show_error(&CoreError::NothingSelected);
            return;
        };
        let label = quote.label();
        let symbol = quote.symbol.clone();

        let Some(quantity) = self.quantity() else {
            self.show_error(&CoreError::InvalidQuantity(format!(
                "'{}' is not a whole number",
                self.quantity_input
            )));
            return;
        };

        match self.tracker.add_stock(&label, quantity) {
            Ok(outcome) => {
                if let AddOutcome::Merged { new_quantity } = outcome {
                    info!("{symbol} now held x{new_quantity}");
                }
                self.refresh();
                if let Some(idx) = self.tracker.portfolio().position(&symbol) {
                    self.holdings_state.select(Some(idx));
                }
                self.show_info("Success", format!("Added {quantity} shares of {symbol}"));
            }
            Err(e) => self.show_error(&e),
        }
    }

    fn request_remove(&mut self) {
        let Some(symbol) = self.selected_holding() else {
            self.modal = Some(Modal::Warning {
                title: "Warning".into(),
                message: "Please select a stock to remove".into(),
            });
            return;
        };

        if self.config.confirm_destructive {
            self.modal = Some(Modal::Confirm {
                message: "Are you sure you want to remove the selected stock?".into(),
                action: PendingAction::Remove(symbol),
            });
        } else {
            self.run_action(PendingAction::Remove(symbol));
        }
    }

    fn request_clear(&mut self) {
        if self.config.confirm_destructive {
            self.modal = Some(Modal::Confirm {
                message: "Are you sure you want to clear your portfolio?".into(),
                action: PendingAction::Clear,
            });
        } else {
            self.run_action(PendingAction::Clear);
        }
    }

    fn request_quit(&mut self) {
        if self.config.confirm_destructive && self.tracker.has_unsaved_changes() {
            self.modal = Some(Modal::Confirm {
                message: "Your portfolio has not been exported. Quit anyway?".into(),
                action: PendingAction::Quit,
            });
        } else {
            self.should_quit = true;
        }
    }

    fn run_action(&mut self, action: PendingAction) {
        match action {
            PendingAction::Remove(symbol) => match self.tracker.remove_stock(Some(&symbol)) {
                Ok(_) => {
                    self.refresh();
                    self.show_info("Success", "Stock removed from portfolio");
                }
                Err(e) => self.show_error(&e),
            },
            PendingAction::Clear => {
                self.tracker.clear();
                self.refresh();
            }
            PendingAction::Quit => self.should_quit = true,
        }
    }

    fn open_export_prompt(&mut self) {
        self.modal = Some(Modal::ExportPrompt {
            input: self.config.export_path.clone(),
        });
    }

    fn export(&mut self, path: &str) {
        match self.tracker.export_to_file(path) {
            Ok(report) => {
                info!("Saved {} rows to {}", report.rows, report.path.display());
                self.show_info("Success", "Portfolio data saved successfully!");
            }
            Err(e) => {
                let message = format!("Failed to save file: {e}");
                if e.is_user_error() {
                    warn!("Export to {path} rejected: {e}");
                    self.modal = Some(Modal::Warning {
                        title: "Warning".into(),
                        message,
                    });
                } else {
                    error!("Export to {path} failed: {e}");
                    self.modal = Some(Modal::Error {
                        title: "Error".into(),
                        message,
                    });
                }
            }
        }
    }

    /// Recompute the chart datasets and keep the table selection in range.
    pub fn refresh(&mut self) {
        self.charts = self.tracker.chart_data();
        let len = self.tracker.entries().len();
        match self.holdings_state.selected() {
            _ if len == 0 => self.holdings_state.select(None),
            Some(idx) if idx >= len => self.holdings_state.select(Some(len - 1)),
            _ => {}
        }
    }

    // ── Dialogs ─────────────────────────────────────────────────────

    fn show_info(&mut self, title: &str, message: impl Into<String>) {
        self.modal = Some(Modal::Info {
            title: title.into(),
            message: message.into(),
        });
    }

    fn show_error(&mut self, err: &CoreError) {
        if err.is_user_error() {
            warn!("{err}");
            self.modal = Some(Modal::Warning {
                title: "Warning".into(),
                message: err.to_string(),
            });
        } else {
            error!("{err}");
            self.modal = Some(Modal::Error {
                title: "Error".into(),
                message: format!("An error occurred: {err}"),
            });
        }
    }
}

/// Move `current` by `delta` within `0..len`, wrapping at both ends.
fn step(current: usize, delta: isize, len: usize) -> usize {
    let len = len as isize;
    (current as isize + delta).rem_euclid(len) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            app.handle_key(key(*code));
        }
    }

    fn app() -> App {
        App::new(PortfolioTracker::new(), Config::default())
    }

    fn app_without_confirm() -> App {
        let config = Config {
            confirm_destructive: false,
            ..Config::default()
        };
        App::new(PortfolioTracker::new(), config)
    }

    fn dismiss(app: &mut App) {
        press(app, &[KeyCode::Enter]);
    }

    // ── Startup ─────────────────────────────────────────────────────

    #[test]
    fn starts_empty_on_first_stock() {
        let app = app();
        assert_eq!(app.catalogue.len(), 7);
        assert_eq!(app.selected_quote().unwrap().symbol, "AAPL");
        assert_eq!(app.quantity(), Some(1));
        assert!(app.charts.is_empty());
        assert!(app.modal.is_none());
    }

    // ── Quantity box ────────────────────────────────────────────────

    #[test]
    fn plus_and_minus_adjust_quantity_with_floor_of_one() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('+'), KeyCode::Char('+')]);
        assert_eq!(app.quantity(), Some(3));
        press(&mut app, &[KeyCode::Char('-'); 5]);
        assert_eq!(app.quantity(), Some(1));
    }

    #[test]
    fn typing_digits_appends() {
        let mut app = app();
        press(&mut app, &[KeyCode::Backspace, KeyCode::Char('4'), KeyCode::Char('2')]);
        assert_eq!(app.quantity(), Some(42));
    }

    #[test]
    fn digits_beyond_u32_max_are_ignored() {
        let mut app = app();
        press(&mut app, &[KeyCode::Backspace]);
        for c in "9999999999".chars() {
            press(&mut app, &[KeyCode::Char(c)]);
        }
        assert_eq!(app.quantity_input, "999999999");

        app.quantity_input = "429496729".into();
        press(&mut app, &[KeyCode::Char('5'), KeyCode::Char('1')]);
        assert_eq!(app.quantity(), Some(u32::MAX));
    }

    #[test]
    fn empty_quantity_is_rejected_on_add() {
        let mut app = app();
        press(&mut app, &[KeyCode::Backspace, KeyCode::Char('a')]);
        assert!(matches!(app.modal, Some(Modal::Warning { .. })));
        assert!(app.tracker.is_empty());
    }

    #[test]
    fn zero_quantity_is_rejected_on_add() {
        let mut app = app();
        press(&mut app, &[KeyCode::Backspace, KeyCode::Char('0'), KeyCode::Char('a')]);
        match &app.modal {
            Some(Modal::Warning { message, .. }) => assert!(message.contains("at least 1")),
            other => panic!("expected warning, got {other:?}"),
        }
        assert!(app.tracker.is_empty());
    }

    // ── Add ─────────────────────────────────────────────────────────

    #[test]
    fn add_shows_success_and_updates_charts() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('+'), KeyCode::Char('+'), KeyCode::Char('a')]);
        assert_eq!(
            app.modal,
            Some(Modal::Info {
                title: "Success".into(),
                message: "Added 3 shares of AAPL".into(),
            })
        );
        assert_eq!(app.tracker.total_value(), 540.0);
        assert_eq!(app.charts.allocation.len(), 1);
        assert_eq!(app.charts.trend.len(), 1);
        assert_eq!(app.holdings_state.selected(), Some(0));
    }

    #[test]
    fn enter_in_picker_adds() {
        let mut app = app();
        press(&mut app, &[KeyCode::Down, KeyCode::Enter]);
        assert!(app.tracker.get("TSLA").is_some());
    }

    #[test]
    fn repeated_add_merges() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a')]);
        dismiss(&mut app);
        press(&mut app, &[KeyCode::Char('a')]);
        dismiss(&mut app);
        assert_eq!(app.tracker.entries().len(), 1);
        assert_eq!(app.tracker.get("AAPL").unwrap().quantity, 2);
    }

    #[test]
    fn picker_wraps_around() {
        let mut app = app();
        press(&mut app, &[KeyCode::Up]);
        assert_eq!(app.selected_quote().unwrap().symbol, "META");
        press(&mut app, &[KeyCode::Down]);
        assert_eq!(app.selected_quote().unwrap().symbol, "AAPL");
    }

    // ── Remove ──────────────────────────────────────────────────────

    #[test]
    fn remove_without_selection_warns() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('d')]);
        assert_eq!(
            app.modal,
            Some(Modal::Warning {
                title: "Warning".into(),
                message: "Please select a stock to remove".into(),
            })
        );
    }

    #[test]
    fn remove_asks_for_confirmation() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a')]);
        dismiss(&mut app);
        press(&mut app, &[KeyCode::Char('d')]);
        assert!(matches!(
            app.modal,
            Some(Modal::Confirm { action: PendingAction::Remove(ref s), .. }) if s == "AAPL"
        ));

        press(&mut app, &[KeyCode::Char('n')]);
        assert!(app.modal.is_none());
        assert_eq!(app.tracker.entries().len(), 1);

        press(&mut app, &[KeyCode::Char('d'), KeyCode::Char('y')]);
        assert!(app.tracker.is_empty());
        assert_eq!(app.tracker.total_value(), 0.0);
        assert_eq!(app.holdings_state.selected(), None);
        assert!(app.charts.is_empty());
    }

    #[test]
    fn confirm_ignores_unrelated_keys() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('c'), KeyCode::Char('x')]);
        assert!(matches!(app.modal, Some(Modal::Confirm { .. })));
    }

    #[test]
    fn remove_without_confirm_setting_is_immediate() {
        let mut app = app_without_confirm();
        press(&mut app, &[KeyCode::Char('a')]);
        dismiss(&mut app);
        press(&mut app, &[KeyCode::Char('d')]);
        assert_eq!(
            app.modal,
            Some(Modal::Info {
                title: "Success".into(),
                message: "Stock removed from portfolio".into(),
            })
        );
        assert!(app.tracker.is_empty());
    }

    #[test]
    fn selection_clamps_after_removing_last_row() {
        let mut app = app_without_confirm();
        press(&mut app, &[KeyCode::Char('a')]);
        dismiss(&mut app);
        press(&mut app, &[KeyCode::Down, KeyCode::Char('a')]);
        dismiss(&mut app);
        assert_eq!(app.holdings_state.selected(), Some(1));

        press(&mut app, &[KeyCode::Char('d')]);
        dismiss(&mut app);
        assert_eq!(app.holdings_state.selected(), Some(0));
        assert_eq!(app.selected_holding().as_deref(), Some("AAPL"));
    }

    // ── Clear ───────────────────────────────────────────────────────

    #[test]
    fn clear_after_confirmation() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a')]);
        dismiss(&mut app);
        press(&mut app, &[KeyCode::Down, KeyCode::Char('a')]);
        dismiss(&mut app);

        press(&mut app, &[KeyCode::Char('c'), KeyCode::Char('y')]);
        assert!(app.tracker.is_empty());
        assert_eq!(app.tracker.total_label(), "Total Portfolio Value: $0.00");
        assert!(app.modal.is_none());
    }

    // ── Focus ───────────────────────────────────────────────────────

    #[test]
    fn tab_moves_focus_and_selects_first_row() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a')]);
        dismiss(&mut app);
        app.holdings_state.select(None);

        press(&mut app, &[KeyCode::Tab]);
        assert_eq!(app.focus, Focus::Holdings);
        assert_eq!(app.holdings_state.selected(), Some(0));

        press(&mut app, &[KeyCode::Tab]);
        assert_eq!(app.focus, Focus::Picker);
    }

    // ── Export ──────────────────────────────────────────────────────

    #[test]
    fn export_prompt_is_prefilled_and_editable() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('e')]);
        assert_eq!(
            app.modal,
            Some(Modal::ExportPrompt { input: "portfolio.csv".into() })
        );

        press(&mut app, &[KeyCode::Backspace; 3]);
        press(&mut app, &[KeyCode::Char('t'), KeyCode::Char('x'), KeyCode::Char('t')]);
        assert_eq!(
            app.modal,
            Some(Modal::ExportPrompt { input: "portfolio.txt".into() })
        );

        press(&mut app, &[KeyCode::Esc]);
        assert!(app.modal.is_none());
    }

    #[test]
    fn export_writes_file_and_clears_unsaved_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let config = Config {
            export_path: path.to_string_lossy().into_owned(),
            ..Config::default()
        };
        let mut app = App::new(PortfolioTracker::new(), config);

        press(&mut app, &[KeyCode::Char('a')]);
        dismiss(&mut app);
        assert!(app.tracker.has_unsaved_changes());

        press(&mut app, &[KeyCode::Char('e'), KeyCode::Enter]);
        assert_eq!(
            app.modal,
            Some(Modal::Info {
                title: "Success".into(),
                message: "Portfolio data saved successfully!".into(),
            })
        );
        assert!(!app.tracker.has_unsaved_changes());
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"total_value\": 180.0"));
    }

    #[test]
    fn unsupported_extension_shows_warning_dialog() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('e')]);
        app.modal = Some(Modal::ExportPrompt { input: "report.xlsx".into() });
        press(&mut app, &[KeyCode::Enter]);
        match &app.modal {
            Some(Modal::Warning { message, .. }) => {
                assert!(message.starts_with("Failed to save file:"));
                assert!(message.contains(".xlsx"));
            }
            other => panic!("expected warning dialog, got {other:?}"),
        }
    }

    #[test]
    fn write_failure_shows_error_dialog() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no_such_dir").join("out.csv");
        let mut app = app();
        app.modal = Some(Modal::ExportPrompt {
            input: missing.to_string_lossy().into_owned(),
        });
        press(&mut app, &[KeyCode::Enter]);
        match &app.modal {
            Some(Modal::Error { message, .. }) => {
                assert!(message.starts_with("Failed to save file: File I/O error"));
            }
            other => panic!("expected error dialog, got {other:?}"),
        }
        assert!(!missing.exists());
    }

    // ── Quit ────────────────────────────────────────────────────────

    #[test]
    fn quit_immediately_when_nothing_changed() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(app.should_quit);
    }

    #[test]
    fn quit_with_unexported_changes_asks_first() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a')]);
        dismiss(&mut app);

        press(&mut app, &[KeyCode::Char('q')]);
        assert!(!app.should_quit);
        assert!(matches!(
            app.modal,
            Some(Modal::Confirm { action: PendingAction::Quit, .. })
        ));

        press(&mut app, &[KeyCode::Char('y')]);
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a')]);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    // ── Helpers ─────────────────────────────────────────────────────

    #[test]
    fn step_wraps() {
        assert_eq!(step(0, -1, 7), 6);
        assert_eq!(step(6, 1, 7), 0);
        assert_eq!(step(3, 1, 7), 4);
    }
}
