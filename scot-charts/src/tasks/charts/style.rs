//! Hatch patterns, dash patterns and markers. `plotters` has no notion of
//! any of these, so they are computed here as plain pixel geometry and drawn
//! as paths, circles and polygons by the renderer.

use crate::tasks::charts::color::StyleError;
use std::{f64::consts::PI, str::FromStr};

pub type PixelPoint = (i32, i32);

/// Pixel spacing between hatch lines at density one.
const HATCH_SPACING: i32 = 16;

/// Axis-aligned rectangle in backend pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    /// Build from two opposite corners in any order.
    pub fn from_corners(a: PixelPoint, b: PixelPoint) -> PixelRect {
        PixelRect {
            left: a.0.min(b.0),
            top: a.1.min(b.1),
            right: a.0.max(b.0),
            bottom: a.1.max(b.1),
        }
    }

    pub fn outline(&self) -> Vec<PixelPoint> {
        vec![
            (self.left, self.top),
            (self.right, self.top),
            (self.right, self.bottom),
            (self.left, self.bottom),
            (self.left, self.top),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HatchPattern {
    /// `/`
    Forward,
    /// `\`
    Back,
    /// `-`
    Horizontal,
    /// `|`
    Vertical,
    /// `+`
    Plus,
    /// `x`
    Cross,
    /// `*`
    Star,
    /// `o`
    Ring,
}

/// A hatch written as its pattern character, repeated to make
/// the hatch denser (`//` is twice as dense as `/`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hatch {
    pub pattern: HatchPattern,
    pub density: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HatchMark {
    Line(PixelPoint, PixelPoint),
    Ring(PixelPoint, i32),
}

impl FromStr for Hatch {
    type Err = StyleError;

    fn from_str(input: &str) -> Result<Hatch, Self::Err> {
        let unknown = || StyleError::UnknownSeriesKey(input.to_string());
        let first = input.chars().next().ok_or_else(unknown)?;
        if input.chars().any(|c| c != first) {
            return Err(unknown());
        }

        let pattern = match first {
            '/' => HatchPattern::Forward,
            '\\' => HatchPattern::Back,
            '-' => HatchPattern::Horizontal,
            '|' => HatchPattern::Vertical,
            '+' => HatchPattern::Plus,
            'x' | 'X' => HatchPattern::Cross,
            '*' => HatchPattern::Star,
            'o' | 'O' => HatchPattern::Ring,
            _ => return Err(unknown()),
        };

        Ok(Hatch::new(pattern, input.chars().count() as u32))
    }
}

impl Hatch {
    pub const fn new(pattern: HatchPattern, density: u32) -> Hatch {
        Hatch { pattern, density }
    }

    pub fn spacing(&self) -> i32 {
        (HATCH_SPACING / self.density.max(1) as i32).max(3)
    }

    /// Marks filling `rect`. Every mark lies entirely inside the rectangle.
    pub fn marks(&self, rect: &PixelRect) -> Vec<HatchMark> {
        let spacing = self.spacing();
        let mut marks = Vec::new();

        match self.pattern {
            HatchPattern::Forward => marks.extend(forward_lines(rect, spacing)),
            HatchPattern::Back => marks.extend(back_lines(rect, spacing)),
            HatchPattern::Horizontal => marks.extend(horizontal_lines(rect, spacing)),
            HatchPattern::Vertical => marks.extend(vertical_lines(rect, spacing)),
            HatchPattern::Plus => {
                marks.extend(horizontal_lines(rect, spacing));
                marks.extend(vertical_lines(rect, spacing));
            }
            HatchPattern::Cross => {
                marks.extend(forward_lines(rect, spacing));
                marks.extend(back_lines(rect, spacing));
            }
            HatchPattern::Star => {
                marks.extend(horizontal_lines(rect, spacing * 2));
                marks.extend(forward_lines(rect, spacing * 2));
                marks.extend(back_lines(rect, spacing * 2));
            }
            HatchPattern::Ring => marks.extend(rings(rect, spacing)),
        }

        marks
    }
}

fn horizontal_lines(rect: &PixelRect, spacing: i32) -> Vec<HatchMark> {
    (rect.top + spacing..rect.bottom)
        .step_by(spacing as usize)
        .map(|y| HatchMark::Line((rect.left, y), (rect.right, y)))
        .collect()
}

fn vertical_lines(rect: &PixelRect, spacing: i32) -> Vec<HatchMark> {
    (rect.left + spacing..rect.right)
        .step_by(spacing as usize)
        .map(|x| HatchMark::Line((x, rect.top), (x, rect.bottom)))
        .collect()
}

// Pixel y grows downwards, so `x + y = c` rises to the right.
fn forward_lines(rect: &PixelRect, spacing: i32) -> Vec<HatchMark> {
    let mut lines = Vec::new();
    let mut c = rect.left + rect.top + spacing;
    while c < rect.right + rect.bottom {
        let x0 = rect.left.max(c - rect.bottom);
        let x1 = rect.right.min(c - rect.top);
        if x0 <= x1 {
            lines.push(HatchMark::Line((x0, c - x0), (x1, c - x1)));
        }
        c += spacing;
    }
    lines
}

// `x - y = c` falls to the right.
fn back_lines(rect: &PixelRect, spacing: i32) -> Vec<HatchMark> {
    let mut lines = Vec::new();
    let mut c = rect.left - rect.bottom + spacing;
    while c < rect.right - rect.top {
        let x0 = rect.left.max(c + rect.top);
        let x1 = rect.right.min(c + rect.bottom);
        if x0 <= x1 {
            lines.push(HatchMark::Line((x0, x0 - c), (x1, x1 - c)));
        }
        c += spacing;
    }
    lines
}

fn rings(rect: &PixelRect, spacing: i32) -> Vec<HatchMark> {
    let radius = (spacing / 3).max(1);
    let mut marks = Vec::new();
    let mut y = rect.top + spacing / 2;
    while y + radius <= rect.bottom {
        let mut x = rect.left + spacing / 2;
        while x + radius <= rect.right {
            if x - radius >= rect.left && y - radius >= rect.top {
                marks.push(HatchMark::Ring((x, y), radius));
            }
            x += spacing;
        }
        y += spacing;
    }
    marks
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

impl FromStr for LineStyle {
    type Err = StyleError;

    fn from_str(input: &str) -> Result<LineStyle, Self::Err> {
        match input {
            "-" => Ok(LineStyle::Solid),
            "--" => Ok(LineStyle::Dashed),
            "-." => Ok(LineStyle::DashDot),
            ":" => Ok(LineStyle::Dotted),
            _ => Err(StyleError::UnknownSeriesKey(input.to_string())),
        }
    }
}

impl LineStyle {
    /// Alternating on/off lengths in pixels. Empty for a solid line.
    pub fn pattern(&self) -> &'static [f64] {
        match self {
            LineStyle::Solid => &[],
            LineStyle::Dashed => &[14.0, 7.0],
            LineStyle::DashDot => &[14.0, 5.0, 3.0, 5.0],
            LineStyle::Dotted => &[3.0, 5.0],
        }
    }
}

/// Split a polyline into the pieces drawn by a dash pattern. The pattern
/// restarts at the first point and carries over across vertices.
pub fn dash_segments(points: &[(f64, f64)], pattern: &[f64]) -> Vec<Vec<(f64, f64)>> {
    if points.len() < 2 {
        return vec![];
    }
    if pattern.iter().all(|len| *len <= 0.0) {
        return vec![points.to_vec()];
    }

    let mut segments = Vec::new();
    let mut current = vec![points[0]];
    let mut idx = 0;
    let mut remaining = pattern[0];
    let mut on = true;

    for window in points.windows(2) {
        let (mut x0, mut y0) = window[0];
        let (x1, y1) = window[1];
        let mut left = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();

        while left > remaining {
            let t = remaining / left;
            let split = (x0 + (x1 - x0) * t, y0 + (y1 - y0) * t);
            current.push(split);
            if on {
                segments.push(std::mem::take(&mut current));
            } else {
                current = vec![split];
            }

            on = !on;
            left -= remaining;
            (x0, y0) = split;
            idx = (idx + 1) % pattern.len();
            remaining = pattern[idx].max(0.0);
        }

        remaining -= left;
        if on {
            current.push((x1, y1));
        }
    }

    if on && current.len() >= 2 {
        segments.push(current);
    }

    segments
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    Diamond,
    TriangleUp,
    TriangleDown,
    Pentagon,
    Star,
}

impl FromStr for Marker {
    type Err = StyleError;

    fn from_str(input: &str) -> Result<Marker, Self::Err> {
        match input {
            "o" => Ok(Marker::Circle),
            "s" => Ok(Marker::Square),
            "D" => Ok(Marker::Diamond),
            "^" => Ok(Marker::TriangleUp),
            "v" => Ok(Marker::TriangleDown),
            "p" => Ok(Marker::Pentagon),
            "*" => Ok(Marker::Star),
            _ => Err(StyleError::UnknownSeriesKey(input.to_string())),
        }
    }
}

fn regular_polygon(center: PixelPoint, radii: &[f64], count: usize, start: f64) -> Vec<PixelPoint> {
    (0..count)
        .map(|i| {
            let angle = start + 2.0 * PI * i as f64 / count as f64;
            let radius = radii[i % radii.len()];
            (
                center.0 + (radius * angle.cos()).round() as i32,
                center.1 + (radius * angle.sin()).round() as i32,
            )
        })
        .collect()
}

impl Marker {
    /// Polygon outline of the marker, or `None` for the circle.
    pub fn outline(&self, center: PixelPoint, radius: i32) -> Option<Vec<PixelPoint>> {
        let r = radius as f64;
        let up = -PI / 2.0;

        match self {
            Marker::Circle => None,
            Marker::Square => Some(
                PixelRect::from_corners(
                    (center.0 - radius, center.1 - radius),
                    (center.0 + radius, center.1 + radius),
                )
                .outline()[..4]
                    .to_vec(),
            ),
            Marker::Diamond => Some(regular_polygon(center, &[r * 1.2], 4, up)),
            Marker::TriangleUp => Some(regular_polygon(center, &[r * 1.2], 3, up)),
            Marker::TriangleDown => Some(regular_polygon(center, &[r * 1.2], 3, PI / 2.0)),
            Marker::Pentagon => Some(regular_polygon(center, &[r * 1.1], 5, up)),
            Marker::Star => Some(regular_polygon(center, &[r * 1.4, r * 0.6], 10, up)),
        }
    }
}
