use crate::tasks::charts::{
    catalogue::{StyledBar, StyledLine},
    color::STROKE_WIDTH,
    plot::{Canvas, bold_font, draw_hatched_rect, draw_marker, draw_styled_line},
    style::{Hatch, LineStyle, Marker, PixelPoint, PixelRect, dash_segments},
};
use anyhow::Result;
use plotters::{
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};

/// Width of an average bold glyph relative to the font size, used to size
/// legend cells without loading any font.
const GLYPH_WIDTH_RATIO: f64 = 0.62;
const FRAME_DASH: [f64; 2] = [10.0, 6.0];

#[derive(Clone, Debug, PartialEq)]
pub enum LegendGlyph {
    Patch {
        color: RGBColor,
        hatch: Hatch,
    },
    Line {
        color: RGBColor,
        style: LineStyle,
        marker: Marker,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub glyph: LegendGlyph,
}

impl From<&StyledBar> for LegendEntry {
    fn from(bar: &StyledBar) -> LegendEntry {
        LegendEntry {
            label: bar.benchmark.legend_label(),
            glyph: LegendGlyph::Patch {
                color: bar.color,
                hatch: bar.hatch,
            },
        }
    }
}

impl From<&StyledLine> for LegendEntry {
    fn from(line: &StyledLine) -> LegendEntry {
        LegendEntry {
            label: line.label.clone(),
            glyph: LegendGlyph::Line {
                color: line.color,
                style: line.style,
                marker: line.marker,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LegendLook {
    pub columns: usize,
    pub font_size: i32,
    /// Draw a dashed frame around the entries
    pub framed: bool,
}

impl LegendLook {
    fn padding(&self) -> i32 {
        self.font_size / 2
    }

    fn handle_width(&self) -> i32 {
        self.font_size * 2
    }

    fn row_height(&self) -> i32 {
        self.font_size * 3 / 2
    }
}

/// Column and row of entry `idx` out of `n`. Entries fill the grid column
/// by column.
pub fn legend_cell(idx: usize, n: usize, columns: usize) -> (usize, usize) {
    let rows = n.div_ceil(columns.max(1)).max(1);
    (idx / rows, idx % rows)
}

fn cell_width(entries: &[LegendEntry], look: &LegendLook) -> i32 {
    let longest = entries
        .iter()
        .map(|entry| entry.label.chars().count())
        .max()
        .unwrap_or(0);
    let text = (longest as f64 * look.font_size as f64 * GLYPH_WIDTH_RATIO).ceil() as i32;

    look.handle_width() + look.padding() + text + look.font_size
}

/// Pixel size of the legend box, padding and frame included.
pub fn legend_size(entries: &[LegendEntry], look: &LegendLook) -> (i32, i32) {
    let columns = look.columns.clamp(1, entries.len().max(1));
    let rows = entries.len().div_ceil(columns).max(1);

    (
        2 * look.padding() + columns as i32 * cell_width(entries, look),
        2 * look.padding() + rows as i32 * look.row_height(),
    )
}

fn draw_dashed_frame(root: &Canvas, rect: &PixelRect) -> Result<()> {
    let outline: Vec<(f64, f64)> = rect
        .outline()
        .iter()
        .map(|(x, y)| (*x as f64, *y as f64))
        .collect();

    for segment in dash_segments(&outline, &FRAME_DASH) {
        let segment: Vec<PixelPoint> = segment
            .iter()
            .map(|(x, y)| (x.round() as i32, y.round() as i32))
            .collect();
        root.draw(&PathElement::new(segment, BLACK.stroke_width(2)))?;
    }

    Ok(())
}

/// Draw a grid of legend entries with its top-left corner at `origin`.
pub fn draw_legend(
    root: &Canvas,
    origin: PixelPoint,
    entries: &[LegendEntry],
    look: &LegendLook,
) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }

    let (width, height) = legend_size(entries, look);
    let frame = PixelRect::from_corners(origin, (origin.0 + width, origin.1 + height));
    root.draw(&Rectangle::new(
        [(frame.left, frame.top), (frame.right, frame.bottom)],
        WHITE.mix(0.8).filled(),
    ))?;
    if look.framed {
        draw_dashed_frame(root, &frame)?;
    }

    let columns = look.columns.clamp(1, entries.len());
    let cell = cell_width(entries, look);
    let row_height = look.row_height();
    let handle = look.handle_width();

    for (idx, entry) in entries.iter().enumerate() {
        let (col, row) = legend_cell(idx, entries.len(), columns);
        let x = origin.0 + look.padding() + col as i32 * cell;
        let y = origin.1 + look.padding() + row as i32 * row_height;
        let middle = y + row_height / 2;

        match &entry.glyph {
            LegendGlyph::Patch { color, hatch } => {
                let rect = PixelRect::from_corners(
                    (x, y + row_height / 6),
                    (x + handle, y + row_height * 5 / 6),
                );
                draw_hatched_rect(root, rect, *color, Some(hatch))?;
            }
            LegendGlyph::Line {
                color,
                style,
                marker,
            } => {
                draw_styled_line(
                    root,
                    &[(x, middle), (x + handle, middle)],
                    *color,
                    *style,
                    STROKE_WIDTH,
                )?;
                draw_marker(root, (x + handle / 2, middle), *marker, *color, look.font_size / 4)?;
            }
        }

        root.draw(&Text::new(
            entry.label.clone(),
            (x + handle + look.padding(), middle),
            bold_font(look.font_size)
                .color(&BLACK)
                .pos(Pos::new(HPos::Left, VPos::Center)),
        ))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::charts::style::HatchPattern;

    fn entries(n: usize) -> Vec<LegendEntry> {
        (0..n)
            .map(|idx| LegendEntry {
                label: format!("HList-{idx}"),
                glyph: LegendGlyph::Patch {
                    color: BLACK,
                    hatch: Hatch::new(HatchPattern::Forward, 2),
                },
            })
            .collect()
    }

    #[test]
    fn test_cells_fill_column_major() {
        // Eight entries in two columns: four rows
        assert_eq!(legend_cell(0, 8, 2), (0, 0));
        assert_eq!(legend_cell(3, 8, 2), (0, 3));
        assert_eq!(legend_cell(4, 8, 2), (1, 0));
        assert_eq!(legend_cell(7, 8, 2), (1, 3));

        // Odd counts leave the last column short
        assert_eq!(legend_cell(2, 3, 2), (1, 0));

        // A single column is a plain list
        assert_eq!(legend_cell(5, 6, 1), (0, 5));
        assert_eq!(legend_cell(1, 2, 0), (0, 1));
    }

    #[test]
    fn test_legend_size_grows_with_rows_and_columns() {
        let look = LegendLook {
            columns: 2,
            font_size: 20,
            framed: true,
        };

        let (w2, h4) = legend_size(&entries(8), &look);
        let (w1, h8) = legend_size(
            &entries(8),
            &LegendLook {
                columns: 1,
                ..look
            },
        );
        assert_eq!(h8 - h4, 4 * look.row_height());
        assert!(w2 > w1);

        // More columns than entries collapses to one row
        let (_, h1) = legend_size(
            &entries(2),
            &LegendLook {
                columns: 6,
                ..look
            },
        );
        assert_eq!(h1, 2 * look.padding() + look.row_height());
    }
}
