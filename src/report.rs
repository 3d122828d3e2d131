//! Per-run output: dominant colors, ranked palettes and their renderings.

use crate::color::{Lab, rgb_to_hex, rgb_to_lab};
use crate::error::Result;
use crate::matcher::ScoredPalette;
use rgb::RGB8;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use svg::Document;
use svg::node::element::{Rectangle, Text};

const SWATCH: u32 = 48;
const GAP: u32 = 8;
const LABEL_WIDTH: u32 = 260;

/// A finalized cluster center with its hex and Lab forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DominantColor {
    pub rgb: RGB8,
    pub hex: String,
    pub lab: Lab,
}

impl DominantColor {
    pub fn new(rgb: RGB8) -> Self {
        DominantColor {
            rgb,
            hex: rgb_to_hex(rgb),
            lab: rgb_to_lab(rgb),
        }
    }
}

/// Everything one image produces.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub dominant_colors: Vec<DominantColor>,
    pub palettes: Vec<ScoredPalette>,
}

impl RunResult {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Plain-text summary with distances to two decimals.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let hexes: Vec<&str> = self.dominant_colors.iter().map(|c| c.hex.as_str()).collect();
        if hexes.is_empty() {
            out.push_str("Dominant colors: none (no visible pixels)\n");
        } else {
            let _ = writeln!(out, "Dominant colors: {}", hexes.join(" "));
        }

        if self.palettes.is_empty() {
            return out;
        }
        out.push_str("Similar palettes:\n");
        for (i, scored) in self.palettes.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>2}. {:<24} {}  Lab distance: {:.2}",
                i + 1,
                scored.palette.name,
                scored.palette.colors.join(" "),
                scored.distance
            );
        }
        out
    }
}

fn swatch(x: u32, y: u32, fill: &str) -> Rectangle {
    Rectangle::new()
        .set("x", x)
        .set("y", y)
        .set("width", SWATCH)
        .set("height", SWATCH)
        .set("fill", fill.to_string())
}

fn label(x: u32, y: u32, content: String) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("font-family", "monospace")
        .set("font-size", 12)
        .add(svg::node::Text::new(content))
}

/// Build a swatch sheet: one row for the dominant colors, then one row per
/// ranked palette labelled with its name and distance.
pub fn swatch_document(result: &RunResult) -> Document {
    let widest = result
        .palettes
        .iter()
        .map(|p| p.palette.colors.len())
        .chain(std::iter::once(result.dominant_colors.len()))
        .max()
        .unwrap_or(0) as u32;
    let rows = 1 + result.palettes.len() as u32;
    let width = GAP + widest * (SWATCH + GAP) + LABEL_WIDTH;
    let height = GAP + rows * (SWATCH + GAP);

    let mut document = Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0u32, 0u32, width, height))
        .add(
            Rectangle::new()
                .set("width", width)
                .set("height", height)
                .set("fill", "#FFFFFF"),
        );

    let text_x = GAP + widest * (SWATCH + GAP);
    for (i, color) in result.dominant_colors.iter().enumerate() {
        document = document.add(swatch(GAP + i as u32 * (SWATCH + GAP), GAP, &color.hex));
    }
    document = document.add(label(text_x, GAP + SWATCH / 2, "Dominant colors".to_string()));

    for (row, scored) in result.palettes.iter().enumerate() {
        let y = GAP + (row as u32 + 1) * (SWATCH + GAP);
        for (i, hex) in scored.palette.colors.iter().enumerate() {
            document = document.add(swatch(GAP + i as u32 * (SWATCH + GAP), y, hex));
        }
        document = document.add(label(
            text_x,
            y + SWATCH / 2,
            format!("{} ({:.2})", scored.palette.name, scored.distance),
        ));
    }

    document
}

pub fn generate_swatch_svg(result: &RunResult, output_path: &Path) -> Result<()> {
    svg::save(output_path, &swatch_document(result))?;
    Ok(())
}
