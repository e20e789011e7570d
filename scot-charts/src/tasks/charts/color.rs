use log::error;
use plotters::prelude::RGBColor;
use thiserror::Error;

pub static FONT_SIZE: i32 = 40;
pub static LABEL_FONT_SIZE: i32 = 36;
pub static LEGEND_FONT_SIZE: i32 = 32;
pub static STROKE_WIDTH: u32 = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StyleError {
    #[error("unrecognised series key (key={0})")]
    UnknownSeriesKey(String),
}

fn parse_hex(label: &str) -> Option<RGBColor> {
    let hex = label.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Resolve a colour given either as `#rrggbb` or by one of the short names
/// used in the chart palettes.
pub fn get_color_from_label(label: &str) -> Result<RGBColor, StyleError> {
    if let Some(color) = parse_hex(label) {
        return Ok(color);
    }

    match label.to_ascii_lowercase().as_str() {
        "gold" => Ok(RGBColor(255, 215, 0)),
        "g" | "green" => Ok(RGBColor(0, 128, 0)),
        "m" | "magenta" => Ok(RGBColor(191, 0, 191)),
        "c" | "cyan" => Ok(RGBColor(0, 191, 191)),
        "blue" => Ok(RGBColor(0, 0, 255)),
        "red" => Ok(RGBColor(255, 0, 0)),
        "purple" => Ok(RGBColor(128, 0, 128)),
        "pink" => Ok(RGBColor(255, 192, 203)),
        "brown" => Ok(RGBColor(165, 42, 42)),
        "black" => Ok(RGBColor(0, 0, 0)),
        "teal" => Ok(RGBColor(0, 128, 128)),
        "orange" => Ok(RGBColor(255, 165, 0)),
        "olive" => Ok(RGBColor(128, 128, 0)),
        _ => {
            error!("unrecognized label for color (label={label})");
            Err(StyleError::UnknownSeriesKey(label.to_string()))
        }
    }
}
