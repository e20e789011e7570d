use crate::tasks::charts::{
    catalogue::{BarStyling, ChartLayout, ChartSpec, LabelOrder, LinePalette},
    color::{FONT_SIZE, LABEL_FONT_SIZE, LEGEND_FONT_SIZE, STROKE_WIDTH},
    layout::BarLayout,
    legend::{LegendEntry, LegendLook, draw_legend},
    series::SeriesSet,
    style::{Hatch, HatchMark, LineStyle, Marker, PixelPoint, PixelRect, dash_segments},
};
use anyhow::Result;
use plotters::{
    coord::Shift,
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
use std::path::Path;

pub type Canvas<'a> = DrawingArea<SVGBackend<'a>, Shift>;

const X_LABEL_AREA: u32 = 110;
const Y_LABEL_AREA: u32 = 150;
const MARKER_RADIUS: i32 = 8;

/// Room above the tallest value, larger when the legend sits inside the plot.
const HEADROOM: f64 = 1.1;
const LEGEND_HEADROOM: f64 = 1.35;

pub fn bold_font(size: i32) -> FontDesc<'static> {
    ("sans-serif", size, FontStyle::Bold).into_font()
}

/// Shared power of ten of a scientific y axis.
pub fn sci_exponent(max: f64) -> i32 {
    if !max.is_finite() || max <= 0.0 {
        return 0;
    }
    max.log10().floor() as i32
}

/// Tick label for `value` on an axis scaled by `10^exponent`.
pub fn format_scaled(value: f64, exponent: i32) -> String {
    let scaled = value / 10f64.powi(exponent);
    let text = format!("{scaled:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');

    match text {
        "" | "-0" => "0".to_string(),
        _ => text.to_string(),
    }
}

fn y_axis_max(max: u64, headroom: f64) -> f64 {
    if max == 0 {
        return 1.0;
    }
    max as f64 * headroom
}

pub fn draw_hatched_rect(
    root: &Canvas,
    rect: PixelRect,
    color: RGBColor,
    hatch: Option<&Hatch>,
) -> Result<()> {
    root.draw(&Rectangle::new(
        [(rect.left, rect.top), (rect.right, rect.bottom)],
        color.filled(),
    ))?;

    if let Some(hatch) = hatch {
        for mark in hatch.marks(&rect) {
            match mark {
                HatchMark::Line(from, to) => {
                    root.draw(&PathElement::new(vec![from, to], BLACK.stroke_width(1)))?
                }
                HatchMark::Ring(center, radius) => {
                    root.draw(&Circle::new(center, radius, BLACK.stroke_width(1)))?
                }
            }
        }
    }

    root.draw(&PathElement::new(rect.outline(), BLACK.stroke_width(2)))?;
    Ok(())
}

/// Draw a polyline with the dash pattern of `style`.
pub fn draw_styled_line(
    root: &Canvas,
    points: &[PixelPoint],
    color: RGBColor,
    style: LineStyle,
    width: u32,
) -> Result<()> {
    let points: Vec<(f64, f64)> = points
        .iter()
        .map(|(x, y)| (*x as f64, *y as f64))
        .collect();

    for segment in dash_segments(&points, style.pattern()) {
        let segment: Vec<PixelPoint> = segment
            .iter()
            .map(|(x, y)| (x.round() as i32, y.round() as i32))
            .collect();
        root.draw(&PathElement::new(segment, color.stroke_width(width)))?;
    }

    Ok(())
}

pub fn draw_marker(
    root: &Canvas,
    center: PixelPoint,
    marker: Marker,
    color: RGBColor,
    radius: i32,
) -> Result<()> {
    match marker.outline(center, radius) {
        None => {
            root.draw(&Circle::new(center, radius, color.filled()))?;
            root.draw(&Circle::new(center, radius, BLACK.stroke_width(1)))?;
        }
        Some(mut outline) => {
            root.draw(&Polygon::new(outline.clone(), color.filled()))?;
            if let Some(first) = outline.first().copied() {
                outline.push(first);
            }
            root.draw(&PathElement::new(outline, BLACK.stroke_width(1)))?;
        }
    }

    Ok(())
}

/// Axis descriptions, the scientific offset label and a solid frame around
/// the plotting area.
fn draw_axes_decoration(
    root: &Canvas,
    top_left: PixelPoint,
    bottom_right: PixelPoint,
    y_desc: &str,
    exponent: i32,
) -> Result<()> {
    let (_, height) = root.dim_in_pixel();

    root.draw(&Text::new(
        "Threads",
        ((top_left.0 + bottom_right.0) / 2, height as i32 - 10),
        bold_font(LABEL_FONT_SIZE)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom)),
    ))?;

    // Manually draw the y-axis label, rotated
    root.draw(&Text::new(
        y_desc.to_string(),
        (10, (top_left.1 + bottom_right.1) / 2),
        bold_font(LABEL_FONT_SIZE)
            .transform(FontTransform::Rotate270)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top)),
    ))?;

    if exponent != 0 {
        let base = (top_left.0, top_left.1 - 8);
        root.draw(&Text::new(
            "×10",
            base,
            bold_font(FONT_SIZE)
                .color(&BLACK)
                .pos(Pos::new(HPos::Left, VPos::Bottom)),
        ))?;
        root.draw(&Text::new(
            format!("{exponent}"),
            (base.0 + FONT_SIZE * 3 / 2 + 4, base.1 - FONT_SIZE / 2),
            bold_font(FONT_SIZE * 2 / 3)
                .color(&BLACK)
                .pos(Pos::new(HPos::Left, VPos::Bottom)),
        ))?;
    }

    // Add solid frame
    root.draw(&PathElement::new(
        PixelRect::from_corners(top_left, bottom_right).outline(),
        BLACK.stroke_width(2),
    ))?;

    Ok(())
}

fn draw_x_tick(root: &Canvas, at: PixelPoint, label: String) -> Result<()> {
    root.draw(&PathElement::new(
        vec![at, (at.0, at.1 + 8)],
        BLACK.stroke_width(2),
    ))?;
    root.draw(&Text::new(
        label,
        (at.0, at.1 + 12),
        bold_font(FONT_SIZE)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top)),
    ))?;
    Ok(())
}

fn render_bar_chart(
    spec: &ChartSpec,
    layout: &BarLayout,
    styling: &BarStyling,
    legend_columns: Option<usize>,
    set: &SeriesSet,
    path: &Path,
) -> Result<()> {
    let bars = styling.style_bars(&set.labels())?;
    let num_bars = styling.slot_count(&bars);
    let num_groups = set.threads().len();

    let headroom = if legend_columns.is_some() {
        LEGEND_HEADROOM
    } else {
        HEADROOM
    };
    let exponent = sci_exponent(set.max_value() as f64);
    let x_range = layout.x_range(num_groups, num_bars);
    let y_range = 0f64..y_axis_max(set.max_value(), headroom);

    let root = SVGBackend::new(path, spec.size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .margin(10)
        .margin_top(60)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;

    chart
        .configure_mesh()
        .light_line_style(WHITE)
        .disable_x_mesh()
        .y_labels(6)
        .y_label_style(bold_font(FONT_SIZE))
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|y| format_scaled(*y, exponent))
        .draw()?;

    // Draw bars
    for bar in &bars {
        let Some(values) = set.get(&bar.benchmark.label) else {
            continue;
        };

        for (group, value) in values.iter().enumerate() {
            let (left, right) = layout.bar_span(group, bar.slot, num_bars);
            let top_left = chart
                .plotting_area()
                .map_coordinate(&(left, *value as f64));
            let bottom_right = chart.plotting_area().map_coordinate(&(right, 0.0));
            draw_hatched_rect(
                &root,
                PixelRect::from_corners(top_left, bottom_right),
                bar.color,
                Some(&bar.hatch),
            )?;
        }
    }

    for (group, threads) in set.threads().iter().enumerate() {
        let at = chart
            .plotting_area()
            .map_coordinate(&(layout.tick_center(group, num_bars), 0.0));
        draw_x_tick(&root, at, format!("{threads}"))?;
    }

    let top_left = chart
        .plotting_area()
        .map_coordinate(&(x_range.start, y_range.end));
    let bottom_right = chart
        .plotting_area()
        .map_coordinate(&(x_range.end, y_range.start));
    draw_axes_decoration(&root, top_left, bottom_right, spec.y_desc, exponent)?;

    if let Some(columns) = legend_columns {
        let entries: Vec<LegendEntry> = bars.iter().map(LegendEntry::from).collect();
        draw_legend(
            &root,
            (top_left.0 + 15, top_left.1 + 15),
            &entries,
            &LegendLook {
                columns,
                font_size: LEGEND_FONT_SIZE,
                framed: false,
            },
        )?;
    }

    root.present()?;
    Ok(())
}

fn render_line_chart(
    spec: &ChartSpec,
    order: &LabelOrder,
    palette: &LinePalette,
    hidden_ticks: &[u64],
    legend_columns: usize,
    set: &SeriesSet,
    path: &Path,
) -> Result<()> {
    let lines = palette.style_lines(order, &set.labels())?;
    let threads = set.threads();

    let x_min = threads.iter().copied().min().unwrap_or(0) as f64;
    let x_max = threads.iter().copied().max().unwrap_or(1) as f64;
    let pad = ((x_max - x_min) * 0.04).max(1.0);
    let x_range = (x_min - pad)..(x_max + pad);

    let exponent = sci_exponent(set.max_value() as f64);
    let y_range = 0f64..y_axis_max(set.max_value(), LEGEND_HEADROOM);

    let root = SVGBackend::new(path, spec.size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .margin(10)
        .margin_top(60)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;

    chart
        .configure_mesh()
        .light_line_style(WHITE)
        .disable_x_mesh()
        .y_labels(6)
        .y_label_style(bold_font(FONT_SIZE))
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|y| format_scaled(*y, exponent))
        .draw()?;

    for line in &lines {
        let Some(values) = set.get(&line.label) else {
            continue;
        };

        let points: Vec<PixelPoint> = threads
            .iter()
            .zip(values.iter())
            .map(|(x, y)| {
                chart
                    .plotting_area()
                    .map_coordinate(&(*x as f64, *y as f64))
            })
            .collect();

        draw_styled_line(&root, &points, line.color, line.style, STROKE_WIDTH)?;
        for point in &points {
            draw_marker(&root, *point, line.marker, line.color, MARKER_RADIUS)?;
        }
    }

    for x in threads {
        let at = chart.plotting_area().map_coordinate(&(*x as f64, 0.0));
        let label = if hidden_ticks.contains(x) {
            String::new()
        } else {
            format!("{x}")
        };
        draw_x_tick(&root, at, label)?;
    }

    let top_left = chart
        .plotting_area()
        .map_coordinate(&(x_range.start, y_range.end));
    let bottom_right = chart
        .plotting_area()
        .map_coordinate(&(x_range.end, y_range.start));
    draw_axes_decoration(&root, top_left, bottom_right, spec.y_desc, exponent)?;

    let entries: Vec<LegendEntry> = lines.iter().map(LegendEntry::from).collect();
    draw_legend(
        &root,
        (top_left.0 + 15, top_left.1 + 15),
        &entries,
        &LegendLook {
            columns: legend_columns,
            font_size: LEGEND_FONT_SIZE,
            framed: true,
        },
    )?;

    root.present()?;
    Ok(())
}

/// Render the chart of one configuration into an SVG file at `path`.
pub fn render_chart(spec: &ChartSpec, set: &SeriesSet, path: &Path) -> Result<()> {
    match &spec.layout {
        ChartLayout::Bars {
            layout,
            styling,
            legend_columns,
        } => render_bar_chart(spec, layout, styling, *legend_columns, set, path),
        ChartLayout::Lines {
            order,
            palette,
            hidden_ticks,
            legend_columns,
        } => render_line_chart(
            spec,
            order,
            palette,
            hidden_ticks,
            *legend_columns,
            set,
            path,
        ),
    }
}
