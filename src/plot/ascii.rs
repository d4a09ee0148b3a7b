//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! A trajectory renders as two stacked panels sharing the time axis:
//! assets `a(t)` on top, consumption `c(t)` below. Each series is drawn as a
//! `-` line. Non-finite values break the line instead of panicking.

use crate::domain::Trajectory;

/// Render both trajectory panels.
pub fn render_trajectory_plot(traj: &Trajectory, width: usize, height: usize) -> String {
    let assets = traj.asset_series();
    let consumption = traj.consumption_series();
    let (t_min, t_max) = time_range(&assets).unwrap_or((1.0, 2.0));

    let mut out = render_panel("Assets over time a(t)", &assets, t_min, t_max, width, height);
    out.push('\n');
    out.push_str(&render_panel(
        "Optimal consumption over time c(t)",
        &consumption,
        t_min,
        t_max,
        width,
        height,
    ));
    out
}

/// Render a single series panel with a range header.
pub fn render_panel(
    title: &str,
    series: &[(f64, f64)],
    t_min: f64,
    t_max: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = match y_range(series) {
        Some((lo, hi)) if hi > lo => pad_range(lo, hi, 0.05),
        Some((v, _)) => flat_range(v),
        None => (0.0, 1.0),
    };

    let mut grid = vec![vec![' '; width]; height];
    draw_curve(&mut grid, series, t_min, t_max, y_min, y_max);

    let mut out = String::new();
    out.push_str(&format!(
        "{title}: t=[{t_min:.0}, {t_max:.0}] | y=[{y_min:.4}, {y_max:.4}]\n"
    ));
    if y_range(series).is_none() {
        out.push_str("(no finite values)\n");
    }

    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    out
}

fn time_range(series: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_t = f64::INFINITY;
    let mut max_t = f64::NEG_INFINITY;
    for &(t, _) in series {
        min_t = min_t.min(t);
        max_t = max_t.max(t);
    }
    if min_t.is_finite() && max_t.is_finite() && max_t > min_t {
        Some((min_t, max_t))
    } else {
        None
    }
}

fn y_range(series: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(_, y) in series {
        if y.is_finite() {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    if min_y.is_finite() && max_y.is_finite() {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

/// Range around a constant series (e.g. consumption when `ρ = r`).
fn flat_range(v: f64) -> (f64, f64) {
    let pad = (v.abs() * 0.5).max(1e-3);
    (v - pad, v + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], t_min: f64, t_max: f64, y_min: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(t, y) in curve {
        if !(t.is_finite() && y.is_finite()) {
            prev = None;
            continue;
        }
        let x = map_x(t, t_min, t_max, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, yy, '-');
        } else {
            grid[yy][x] = '-';
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
