//! Text-mode canvas
//!
//! Collects sprite draws into a character buffer and prints it, optionally
//! with terminal colors.

use std::io::{self, Write};

use crossterm::QueueableCommand;
use crossterm::style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor};

use delve_core::world::{AsciiFallback, Color};
use delve_core::{Canvas, Position, Size};

/// Maps a sprite index to its text-mode rendering
pub type FallbackLookup = fn(u32) -> Option<AsciiFallback>;

/// Glyph for sprites without a fallback
const UNKNOWN: AsciiFallback = AsciiFallback::new('?', Color::BrightMagenta, Color::Default);

pub struct AsciiCanvas {
    size: Size,
    cells: Vec<Option<AsciiFallback>>,
    lookup: FallbackLookup,
}

impl AsciiCanvas {
    pub fn new(size: Size, lookup: FallbackLookup) -> Self {
        Self {
            size,
            cells: vec![None; size.area().max(0) as usize],
            lookup,
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.size.width || pos.y >= self.size.height {
            return None;
        }
        Some((pos.y * self.size.width + pos.x) as usize)
    }

    /// Rows of glyphs, blank for cells nothing was drawn on
    pub fn lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|cell| cell.map_or(' ', |c| c.glyph)).collect())
            .collect()
    }

    fn rows(&self) -> impl Iterator<Item = &[Option<AsciiFallback>]> {
        self.cells.chunks(self.size.width.max(1) as usize)
    }

    /// Print the buffer, one line per row
    pub fn render(&self, out: &mut impl Write, color: bool) -> io::Result<()> {
        if !color {
            for line in self.lines() {
                writeln!(out, "{line}")?;
            }
            return Ok(());
        }

        for row in self.rows() {
            for cell in row {
                match cell {
                    Some(fallback) => {
                        out.queue(SetForegroundColor(terminal_color(fallback.foreground)))?;
                        out.queue(SetBackgroundColor(terminal_color(fallback.background)))?;
                        out.queue(Print(fallback.glyph))?;
                        out.queue(ResetColor)?;
                    }
                    None => {
                        out.queue(Print(' '))?;
                    }
                }
            }
            out.queue(Print('\n'))?;
        }
        out.flush()
    }
}

impl Canvas for AsciiCanvas {
    fn draw(&mut self, sprite_index: u32, pos: Position) {
        let fallback = (self.lookup)(sprite_index).unwrap_or(UNKNOWN);
        if let Some(i) = self.index(pos) {
            self.cells[i] = Some(fallback);
        }
    }
}

fn terminal_color(color: Color) -> style::Color {
    match color {
        Color::Default => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::Gray => style::Color::DarkGrey,
        Color::BrightRed => style::Color::Red,
        Color::BrightGreen => style::Color::Green,
        Color::BrightYellow => style::Color::Yellow,
        Color::BrightBlue => style::Color::Blue,
        Color::BrightMagenta => style::Color::Magenta,
        Color::BrightCyan => style::Color::Cyan,
        Color::BrightWhite => style::Color::White,
    }
}
