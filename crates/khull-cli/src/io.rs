//! Point file reading and writing.
//!
//! Two formats: plain text with one `x y` (or `x,y`) pair per line, and a
//! JSON array of `[x, y]` pairs. Blank lines and `#` comments are allowed
//! in the text form.

use std::fmt::Write as _;

use anyhow::{bail, Context, Result};
use khull_math::Point2;

/// Parse a point list from `x y` lines or a JSON array of pairs.
///
/// Input starting with `[` is treated as JSON.
pub fn parse_points(text: &str) -> Result<Vec<Point2>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        let pairs: Vec<[f64; 2]> =
            serde_json::from_str(trimmed).context("invalid JSON point array")?;
        return Ok(pairs.iter().map(|p| Point2::new(p[0], p[1])).collect());
    }

    let mut points = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty());
        let (Some(x), Some(y)) = (fields.next(), fields.next()) else {
            bail!("line {}: expected two coordinates", lineno + 1);
        };
        if fields.next().is_some() {
            bail!("line {}: expected two coordinates", lineno + 1);
        }
        let x: f64 = x
            .parse()
            .with_context(|| format!("line {}: bad x coordinate {x:?}", lineno + 1))?;
        let y: f64 = y
            .parse()
            .with_context(|| format!("line {}: bad y coordinate {y:?}", lineno + 1))?;
        points.push(Point2::new(x, y));
    }
    Ok(points)
}

/// Format points as plain `x y` lines.
pub fn format_xy(points: &[Point2]) -> String {
    let mut out = String::new();
    for p in points {
        let _ = writeln!(out, "{} {}", p.x, p.y);
    }
    out
}

/// Format points as a JSON array of `[x, y]` pairs.
pub fn format_json(points: &[Point2]) -> Result<String> {
    let pairs: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
    Ok(serde_json::to_string_pretty(&pairs)?)
}
