//! Terminal text encoder for [`StepView`]s.
//!
//! Two modes:
//! - Plain: highlight shown as a marker row under the cells
//! - ANSI: cells coloured with 24-bit escape codes

use std::fmt::Write as FmtWrite;

use super::{Highlight, StepView};

/// Text rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    /// Plain text with a marker row (widest compatibility).
    #[default]
    Plain,
    /// ANSI 24-bit colour.
    Ansi,
}

/// Step view to text encoder.
#[derive(Debug, Clone)]
pub struct TextEncoder {
    mode: TextMode,
    cell_width: usize,
    show_capture: bool,
}

impl Default for TextEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEncoder {
    /// Create a new encoder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: TextMode::default(),
            cell_width: 4,
            show_capture: true,
        }
    }

    /// Set the rendering mode.
    #[must_use]
    pub fn mode(mut self, mode: TextMode) -> Self {
        self.mode = mode;
        self
    }

    /// Minimum width of one cell in characters.
    #[must_use]
    pub fn cell_width(mut self, width: usize) -> Self {
        self.cell_width = width.max(1);
        self
    }

    /// Print `label#capture` instead of the bare label.
    #[must_use]
    pub fn show_capture(mut self, show: bool) -> Self {
        self.show_capture = show;
        self
    }

    /// Marker character for the plain-mode marker row.
    fn marker(highlight: Highlight) -> char {
        match highlight {
            Highlight::None => ' ',
            Highlight::Compare => '^',
            Highlight::Swap => 'x',
            Highlight::Sorted => '=',
            Highlight::Pivot => 'P',
            Highlight::Found => '!',
            Highlight::SearchRange => '-',
            Highlight::Merged => '~',
            Highlight::Insert => '+',
            Highlight::Mid => 'M',
            Highlight::Eliminated => '.',
        }
    }

    /// Foreground colour for ANSI mode, `None` to leave the cell plain.
    fn color(highlight: Highlight) -> Option<(u8, u8, u8)> {
        match highlight {
            Highlight::None => None,
            Highlight::Compare => Some((255, 215, 0)),
            Highlight::Swap => Some((255, 99, 71)),
            Highlight::Sorted => Some((50, 205, 50)),
            Highlight::Pivot => Some((186, 85, 211)),
            Highlight::Found => Some((0, 255, 127)),
            Highlight::SearchRange => Some((100, 149, 237)),
            Highlight::Merged => Some((64, 224, 208)),
            Highlight::Insert => Some((255, 165, 0)),
            Highlight::Mid => Some((255, 20, 147)),
            Highlight::Eliminated => Some((105, 105, 105)),
        }
    }

    /// Render a view to a string.
    #[must_use]
    pub fn render(&self, view: &StepView) -> String {
        let mut output = String::new();
        let indent = " ".repeat(view.indent);

        let _ = writeln!(
            output,
            "{} | step {}/{} ({:.0}%)",
            view.title, view.cursor, view.total, view.progress
        );
        match view.kind {
            Some(kind) => {
                let _ = writeln!(output, "{indent}[{kind}] {}", view.description);
            }
            None => {
                let _ = writeln!(output, "{indent}{}", view.description);
            }
        }

        let labels: Vec<String> = view
            .cells
            .iter()
            .map(|cell| {
                let unstable = if cell.unstable { "?" } else { "" };
                if self.show_capture {
                    format!("{}#{}{unstable}", cell.label, cell.capture_order)
                } else {
                    format!("{}{unstable}", cell.label)
                }
            })
            .collect();
        let width = labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(self.cell_width);

        output.push_str(&indent);
        for (cell, label) in view.cells.iter().zip(&labels) {
            match (self.mode, Self::color(cell.highlight)) {
                (TextMode::Ansi, Some((r, g, b))) => {
                    let _ = write!(output, "\x1b[38;2;{r};{g};{b}m{label:^width$}\x1b[0m ");
                }
                _ => {
                    let _ = write!(output, "{label:^width$} ");
                }
            }
        }
        output.push('\n');

        let highlighted = view.cells.iter().any(|c| c.highlight != Highlight::None);
        if self.mode == TextMode::Plain && highlighted {
            output.push_str(&indent);
            for cell in &view.cells {
                let marker = Self::marker(cell.highlight).to_string().repeat(width);
                let _ = write!(output, "{marker} ");
            }
            output.push('\n');
        }

        for entry in &view.legend {
            let symbol = match self.mode {
                TextMode::Plain => Self::marker(entry.highlight).to_string(),
                TextMode::Ansi => Self::color(entry.highlight)
                    .map_or_else(String::new, |(r, g, b)| {
                        format!("\x1b[38;2;{r};{g};{b}m\u{25a0}\x1b[0m")
                    }),
            };
            let _ = writeln!(output, "  {symbol} {}: {}", entry.highlight, entry.meaning);
        }

        if let Some(stats) = view.stats {
            let _ = writeln!(
                output,
                "  comparisons: {}  swaps: {}  max depth: {}",
                stats.comparisons, stats.swaps, stats.max_depth
            );
        }

        output
    }
}
