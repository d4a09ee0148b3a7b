//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel with three stepped controls (ρ, r, T),
//! renders the asset and consumption paths as two stacked charts sharing the
//! time axis, and shows the model description.
//!
//! Every control change recomputes the whole trajectory from scratch.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::debug;
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::app::pipeline::{RunOutput, run_model};
use crate::domain::{HORIZON_SLIDER, ModelParameters, RATE_SLIDER, RHO_SLIDER, Slider};
use crate::error::AppError;
use crate::report::MODEL_DESCRIPTION;

mod plotters_chart;

use plotters_chart::SeriesChart;

/// Number of selectable controls (ρ, r, T).
const FIELD_COUNT: usize = 3;

/// Width of the slider bar in the settings panel.
const BAR_WIDTH: usize = 12;

/// Start the TUI with the given initial controls.
pub fn run(params: ModelParameters) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(params);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    params: ModelParameters,
    selected_field: usize,
    status: String,
    run: RunOutput,
}

impl App {
    fn new(params: ModelParameters) -> Self {
        Self {
            params,
            selected_field: 0,
            status: "Ready.".to_string(),
            run: run_model(&params),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < FIELD_COUNT {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Char('0') => {
                self.params = ModelParameters::default();
                self.recompute();
                self.status = "Reset to defaults.".to_string();
            }
            KeyCode::Char('x') => {
                let path = PathBuf::from(format!(
                    "lcc_trajectory_{}.json",
                    chrono::Local::now().format("%Y%m%d_%H%M%S")
                ));
                self.status = match crate::io::write_trajectory_json(&path, &self.run) {
                    Ok(()) => format!("Wrote {}", path.display()),
                    Err(err) => format!("Export failed: {err}"),
                };
            }
            KeyCode::Char('d') => {
                self.status = match crate::debug::write_debug_bundle(&self.run) {
                    Ok(path) => format!("Wrote debug bundle: {}", path.display()),
                    Err(err) => format!("Debug write failed: {err}"),
                };
            }
            _ => {}
        }

        false
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.selected_field {
            0 => {
                self.params.rho = RHO_SLIDER.step_by(self.params.rho, delta);
                self.status = format!("ρ: {:.2}", self.params.rho);
            }
            1 => {
                self.params.r = RATE_SLIDER.step_by(self.params.r, delta);
                self.status = format!("r: {:.2}", self.params.r);
            }
            2 => {
                let next = HORIZON_SLIDER.step_by(f64::from(self.params.horizon), delta);
                self.params.horizon = next as u32;
                self.status = format!("T: {}", self.params.horizon);
            }
            _ => return,
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        debug!("recomputing trajectory");
        self.run = run_model(&self.params);
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("lcc", Style::default().fg(Color::Cyan)),
            Span::raw(" - Life-cycle Consumption Problem"),
        ]));

        let run = &self.run;
        let diag = if run.finite {
            format!(
                "c0={:.6} | r-ρ={:+.2} | a(T)={:.2e}",
                run.trajectory.c0,
                run.params.growth_rate(),
                run.terminal_assets,
            )
        } else {
            "non-finite solution (ρ too close to zero)".to_string()
        };
        lines.push(Line::from(Span::styled(diag, Style::default().fg(Color::Gray))));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(36), Constraint::Min(0)])
            .split(area);

        let sidebar = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(columns[0]);
        self.draw_settings(frame, sidebar[0]);
        self.draw_description(frame, sidebar[1]);

        let charts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let traj = &self.run.trajectory;
        let x_bounds = [1.0, f64::from(self.params.horizon).max(2.0)];
        self.draw_chart(
            frame,
            charts[0],
            "Assets over time a(t)",
            &traj.asset_series(),
            x_bounds,
            AxisText { x: "time", y: "a(t)" },
            RGBColor(0, 200, 0),
        );
        self.draw_chart(
            frame,
            charts[1],
            "Optimal consumption over time c(t)",
            &traj.consumption_series(),
            x_bounds,
            AxisText { x: "time", y: "c(t)" },
            RGBColor(200, 0, 200),
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_chart(
        &self,
        frame: &mut ratatui::Frame<'_>,
        area: Rect,
        title: &str,
        series: &[(f64, f64)],
        x_bounds: [f64; 2],
        text: AxisText<'_>,
        color: RGBColor,
    ) {
        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(y_bounds) = value_bounds(series) else {
            let msg = Paragraph::new("No finite values to plot (ρ near zero?).")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let widget = SeriesChart {
            series,
            x_bounds,
            y_bounds,
            x_label: text.x,
            y_label: text.y,
            color,
            fmt_x: fmt_axis_x,
            fmt_y: fmt_axis_y,
        };

        frame.render_widget(widget, inner);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items = vec![
            ListItem::new(slider_line(&RHO_SLIDER, self.params.rho, 2)),
            ListItem::new(slider_line(&RATE_SLIDER, self.params.r, 2)),
            ListItem::new(slider_line(&HORIZON_SLIDER, f64::from(self.params.horizon), 0)),
        ];

        let list = List::new(items)
            .block(Block::default().title("Parameter Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_description(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let p = Paragraph::new(MODEL_DESCRIPTION)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  0 defaults  x export  d debug  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Axis captions for one chart panel.
#[derive(Debug, Clone, Copy)]
struct AxisText<'a> {
    x: &'a str,
    y: &'a str,
}

/// `ρ (rho)   0.05 [#####-------]`
fn slider_line(slider: &Slider, value: f64, decimals: usize) -> String {
    let span = slider.max - slider.min;
    let frac = if span > 0.0 { ((value - slider.min) / span).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (frac * BAR_WIDTH as f64).round() as usize;
    format!(
        "{:<9}{:>6.*} [{}{}]",
        short_label(slider),
        decimals,
        value,
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

fn short_label(slider: &Slider) -> &'static str {
    slider.label.split(' ').next().unwrap_or(slider.label)
}

/// Padded y bounds over the finite values, or `None` when there are none.
fn value_bounds(series: &[(f64, f64)]) -> Option<[f64; 2]> {
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in series {
        if y.is_finite() {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        return None;
    }
    if y_max <= y_min {
        // Flat series (ρ = r for consumption).
        let pad = (y_min.abs() * 0.5).max(1e-3);
        return Some([y_min - pad, y_max + pad]);
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    Some([y_min - pad, y_max + pad])
}

fn fmt_axis_x(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_y(v: f64) -> String {
    if v != 0.0 && v.abs() < 0.01 {
        format!("{v:.1e}")
    } else {
        format!("{v:.3}")
    }
}
