use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span, Text},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap,
    },
    Frame,
};
use stock_portfolio_core::format::format_money;
use stock_portfolio_core::models::chart::{AllocationSlice, ChartData, TrendBar};
use stock_portfolio_core::models::stock::Trend;

use crate::app::{App, Focus, Modal};

// ── Palette ─────────────────────────────────────────────────────────

const BG: Color = Color::Rgb(44, 62, 80);
const FG: Color = Color::Rgb(236, 240, 241);
const ACCENT_BLUE: Color = Color::Rgb(52, 152, 219);
const ACCENT_GREEN: Color = Color::Rgb(46, 204, 113);
const ACCENT_RED: Color = Color::Rgb(231, 76, 60);
const ACCENT_YELLOW: Color = Color::Rgb(241, 196, 15);
const ACCENT_PURPLE: Color = Color::Rgb(155, 89, 182);

/// Pie slice colours, indexed by `AllocationSlice::color_index`.
const PIE_COLORS: [Color; 5] = [ACCENT_BLUE, ACCENT_GREEN, ACCENT_RED, ACCENT_YELLOW, ACCENT_PURPLE];

/// Sampling step of the pie raster, in canvas units.
const PIE_STEP: f64 = 0.02;

/// Share of each bar's slot that is filled, and the spacing of its fill lines.
const BAR_FILL: f64 = 0.6;
const BAR_COLUMN_STEP: f64 = 0.02;

const HELP: &str =
    "Tab focus | ↑/↓ select | +/- or digits shares | a add | d remove | c clear | e export | r refresh | q quit";

pub fn draw(f: &mut Frame, app: &mut App) {
    f.render_widget(Block::default().style(Style::default().bg(BG).fg(FG)), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_input_row(f, chunks[0], app);
    render_holdings(f, chunks[1], app);
    render_total(f, chunks[2], app);
    render_charts(f, chunks[3], &app.charts);

    let help = Paragraph::new(HELP)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[4]);

    if let Some(modal) = &app.modal {
        render_modal(f, modal);
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT_YELLOW).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(FG)
    }
}

fn render_input_row(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let picker_focused = app.focus == Focus::Picker;
    let label = app
        .selected_quote()
        .map(|q| format!("{}  {}", q.label(), format_money(q.price)))
        .unwrap_or_default();
    let picker = Paragraph::new(Line::from(vec![
        Span::styled("◀ ", Style::default().fg(ACCENT_BLUE)),
        Span::styled(label, Style::default().fg(FG).add_modifier(Modifier::BOLD)),
        Span::styled(" ▶", Style::default().fg(ACCENT_BLUE)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(picker_focused))
            .title("Stock"),
    );
    f.render_widget(picker, chunks[0]);

    let quantity = Paragraph::new(Line::from(vec![
        Span::styled("[-] ", Style::default().fg(ACCENT_BLUE)),
        Span::styled(
            app.quantity_input.clone(),
            Style::default().fg(FG).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" [+]", Style::default().fg(ACCENT_BLUE)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Shares"));
    f.render_widget(quantity, chunks[1]);
}

fn trend_color(trend: Trend) -> Color {
    if trend.is_up() {
        ACCENT_GREEN
    } else {
        ACCENT_RED
    }
}

fn render_holdings(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Symbol", "Company", "Shares", "Price", "Value", "Trend"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(ACCENT_YELLOW).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let rows: Vec<Row> = app
        .tracker
        .entries()
        .iter()
        .map(|entry| {
            Row::new(vec![
                Cell::from(entry.symbol.clone()),
                Cell::from(entry.company.clone()),
                Cell::from(entry.quantity.to_string()),
                Cell::from(format_money(entry.unit_price)),
                Cell::from(format_money(entry.value())),
                Cell::from(entry.trend.arrow()).style(
                    Style::default()
                        .fg(trend_color(entry.trend))
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(app.focus == Focus::Holdings))
            .title("Your Portfolio"),
    )
    .row_highlight_style(Style::default().bg(ACCENT_BLUE).fg(Color::Black))
    .highlight_symbol("> ");

    f.render_stateful_widget(table, area, &mut app.holdings_state);
}

fn render_total(f: &mut Frame, area: Rect, app: &App) {
    let total = Paragraph::new(app.tracker.total_label())
        .style(Style::default().fg(ACCENT_YELLOW).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(total, area);
}

fn render_charts(f: &mut Frame, area: Rect, charts: &ChartData) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_allocation(f, chunks[0], &charts.allocation);
    render_trend(f, chunks[1], charts);
}

fn placeholder(f: &mut Frame, area: Rect, title: &str, message: &str) {
    let text = Paragraph::new(Text::from(message.to_string()))
        .alignment(Alignment::Center)
        .style(Style::default().fg(FG))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(text, area);
}

fn render_allocation(f: &mut Frame, area: Rect, slices: &[AllocationSlice]) {
    let title = "Portfolio Distribution";
    if slices.is_empty() {
        placeholder(f, area, title, "\nNo portfolio data\nAdd stocks to see visualization");
        return;
    }

    let rasters = pie_points(slices, PIE_STEP);
    let labels: Vec<(f64, f64, String, Color)> = slices
        .iter()
        .map(|s| {
            let (x, y) = label_anchor(s);
            let text = format!("{} {}", s.symbol, s.percent_label());
            (x, y, text, PIE_COLORS[s.color_index % PIE_COLORS.len()])
        })
        .collect();

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .marker(Marker::Braille)
        .x_bounds([-1.6, 1.6])
        .y_bounds([-1.2, 1.2])
        .paint(move |ctx| {
            for (slice, coords) in slices.iter().zip(&rasters) {
                ctx.draw(&Points {
                    coords,
                    color: PIE_COLORS[slice.color_index % PIE_COLORS.len()],
                });
            }
            ctx.layer();
            for (x, y, text, color) in &labels {
                ctx.print(
                    *x,
                    *y,
                    Span::styled(text.clone(), Style::default().fg(*color).add_modifier(Modifier::BOLD)),
                );
            }
        });
    f.render_widget(canvas, area);
}

fn render_trend(f: &mut Frame, area: Rect, charts: &ChartData) {
    let title = "Recent Performance Trend";
    if charts.trend.is_empty() {
        placeholder(f, area, title, "\nNo performance data\nAdd stocks to see trends");
        return;
    }

    let geometry = trend_geometry(&charts.trend);
    let limit = trend_y_limit(&charts.trend);
    let width = charts.trend.len() as f64;
    let bars: Vec<(f64, f64, f64, String, String, Color)> = charts
        .trend
        .iter()
        .zip(&geometry)
        .map(|(bar, &(x0, x1, height))| {
            (x0, x1, height, bar.symbol.clone(), bar.label(), trend_color(bar.trend))
        })
        .collect();

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(vec![
                    Span::styled("▲ up ", Style::default().fg(ACCENT_GREEN)),
                    Span::styled("▼ down", Style::default().fg(ACCENT_RED)),
                ])),
        )
        .marker(Marker::HalfBlock)
        .x_bounds([0.0, width])
        .y_bounds([-limit, limit])
        .paint(move |ctx| {
            for &(x0, x1, height, _, _, color) in &bars {
                let mut x = x0;
                while x <= x1 {
                    ctx.draw(&CanvasLine {
                        x1: x,
                        y1: 0.0,
                        x2: x,
                        y2: height,
                        color,
                    });
                    x += BAR_COLUMN_STEP;
                }
            }
            ctx.draw(&CanvasLine {
                x1: 0.0,
                y1: 0.0,
                x2: width,
                y2: 0.0,
                color: FG,
            });
            ctx.layer();
            for (x0, _, height, symbol, label, color) in &bars {
                // value beyond the tip, symbol on the other side of the zero line
                let side = height.signum();
                ctx.print(
                    *x0,
                    height + side * 0.15 * limit,
                    Span::styled(label.clone(), Style::default().fg(*color).add_modifier(Modifier::BOLD)),
                );
                ctx.print(
                    *x0,
                    -side * 0.12 * limit,
                    Span::styled(symbol.clone(), Style::default().fg(FG)),
                );
            }
        });
    f.render_widget(canvas, area);
}

/// Horizontal span and signed height (in percent) of each trend bar.
/// Bar `i` sits inside `i..i + 1` and grows up from zero for gains and
/// down from zero for losses.
pub fn trend_geometry(bars: &[TrendBar]) -> Vec<(f64, f64, f64)> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let left = i as f64 + (1.0 - BAR_FILL) / 2.0;
            (left, left + BAR_FILL, bar.change_pct * 100.0)
        })
        .collect()
}

/// Symmetric vertical bound of the trend canvas, leaving room for labels.
fn trend_y_limit(bars: &[TrendBar]) -> f64 {
    let largest = bars
        .iter()
        .map(|b| (b.change_pct * 100.0).abs())
        .fold(0.0, f64::max);
    (largest * 1.5).max(1.0)
}

/// Rasterise the pie: for each slice, the sample points of the unit disc
/// that fall inside it. Slices start at 12 o'clock and run counter-clockwise.
pub fn pie_points(slices: &[AllocationSlice], step: f64) -> Vec<Vec<(f64, f64)>> {
    let mut rasters = vec![Vec::new(); slices.len()];
    let steps = (1.0 / step).round() as i64;

    for ix in -steps..=steps {
        for iy in -steps..=steps {
            let (x, y) = (ix as f64 * step, iy as f64 * step);
            if x * x + y * y > 1.0 {
                continue;
            }
            let turn = turn_of(x, y);
            if let Some(idx) = slices.iter().position(|s| s.contains(turn)) {
                rasters[idx].push((x, y));
            } else if let Some(last) = rasters.last_mut() {
                // rounding can leave the seam at turn ≈ 1.0 unclaimed
                last.push((x, y));
            }
        }
    }
    rasters
}

/// Fraction of a full counter-clockwise turn from 12 o'clock, in `0.0..1.0`.
fn turn_of(x: f64, y: f64) -> f64 {
    ((y.atan2(x) - FRAC_PI_2) / TAU).rem_euclid(1.0)
}

/// Where to print a slice's label: outside the disc, at the slice's mid-angle.
fn label_anchor(slice: &AllocationSlice) -> (f64, f64) {
    let mid = slice.start_fraction + slice.fraction / 2.0;
    let angle = FRAC_PI_2 + mid * TAU;
    (1.05 * angle.cos() - 0.2, 1.05 * angle.sin())
}

fn render_modal(f: &mut Frame, modal: &Modal) {
    let (title, body, color, hint) = match modal {
        Modal::Info { title, message } => (title.as_str(), message.clone(), ACCENT_GREEN, "Press any key"),
        Modal::Warning { title, message } => (title.as_str(), message.clone(), ACCENT_YELLOW, "Press any key"),
        Modal::Error { title, message } => (title.as_str(), message.clone(), ACCENT_RED, "Press any key"),
        Modal::Confirm { message, .. } => ("Confirm", message.clone(), ACCENT_BLUE, "y = yes, n = no"),
        Modal::ExportPrompt { input } => (
            "Export Portfolio",
            format!("Save as (.csv, .json, .txt):\n\n{input}_"),
            ACCENT_BLUE,
            "Enter = save, Esc = cancel",
        ),
    };

    let area = centered_rect(60, 30, f.area());
    f.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    lines.extend(
        body.lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(FG)))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::Gray))));
    let text = Text::from(lines);

    let popup = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(BG))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .title(title.to_string()),
        );
    f.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
