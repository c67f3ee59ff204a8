//! Terminal session handling and framebuffer flushing.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Owns the raw-mode terminal session and redraws frames incrementally.
///
/// `enter` and `exit` bracket the session; callers must run `exit` on every
/// path out of the game loop, including error paths, or the shell is left in
/// raw mode.
pub struct TerminalRenderer {
    stdout: io::Stdout,
    prev: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            prev: None,
            out: Vec::with_capacity(32 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(terminal::DisableLineWrap)?;
        self.out.queue(cursor::Hide)?;
        self.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::EnableLineWrap)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Drop the retained frame so the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Flush a frame, repainting only the rows that changed since the
    /// previous one. A size mismatch forces a full clear and repaint.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        let full = match &self.prev {
            Some(p) => p.width() != fb.width() || p.height() != fb.height(),
            None => true,
        };

        self.out.clear();
        if full {
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
            let mut style = None;
            for y in 0..fb.height() {
                emit_span(&mut self.out, fb, 0, y, fb.width(), &mut style)?;
            }
        } else {
            let prev = self.prev.as_ref().unwrap();
            let mut style = None;
            for y in 0..fb.height() {
                if let Some((start, end)) = dirty_span(prev, fb, y) {
                    emit_span(&mut self.out, fb, start, y, end - start, &mut style)?;
                }
            }
        }
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.flush()?;

        match &mut self.prev {
            Some(p) => p.clone_from(fb),
            None => self.prev = Some(fb.clone()),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Leftmost and one-past-rightmost changed columns of a row, if any.
fn dirty_span(prev: &FrameBuffer, next: &FrameBuffer, y: u16) -> Option<(u16, u16)> {
    let w = next.width();
    let start = (0..w).find(|&x| prev.get(x, y) != next.get(x, y))?;
    let end = (start..w)
        .rev()
        .find(|&x| prev.get(x, y) != next.get(x, y))
        .unwrap_or(start)
        + 1;
    Some((start, end))
}

fn emit_span(
    out: &mut Vec<u8>,
    fb: &FrameBuffer,
    x: u16,
    y: u16,
    len: u16,
    style: &mut Option<CellStyle>,
) -> Result<()> {
    out.queue(cursor::MoveTo(x, y))?;
    for dx in 0..len {
        let cell = fb.get(x + dx, y).unwrap_or_default();
        if *style != Some(cell.style) {
            set_style(out, cell.style)?;
            *style = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
    }
    Ok(())
}

fn set_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(color(style.fg)))?;
    out.queue(SetBackgroundColor(color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::{Cell, CellStyle};

    #[test]
    fn dirty_span_brackets_the_changed_cells() {
        let a = FrameBuffer::new(8, 1);
        let mut b = FrameBuffer::new(8, 1);
        let style = CellStyle::default();
        b.set(2, 0, Cell { ch: 'x', style });
        b.set(5, 0, Cell { ch: 'y', style });
        assert_eq!(dirty_span(&a, &b, 0), Some((2, 6)));
    }

    #[test]
    fn identical_rows_produce_no_span() {
        let a = FrameBuffer::new(8, 2);
        let b = FrameBuffer::new(8, 2);
        assert_eq!(dirty_span(&a, &b, 0), None);
        assert_eq!(dirty_span(&a, &b, 1), None);
    }

    #[test]
    fn color_conversion_is_componentwise() {
        let rgb = Rgb::new(1, 2, 3);
        assert_eq!(color(rgb), Color::Rgb { r: 1, g: 2, b: 3 });
    }
}
