//! Maps two board snapshots into a terminal framebuffer.
//!
//! Pure code, no I/O; everything here is unit-testable.

use crate::core::{shape_of, BoardSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, PlayerSlot, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal dimensions handed in by the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Round-level state the panes cannot see on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundStatus {
    pub paused: bool,
    pub over: bool,
    pub winner: Option<PlayerSlot>,
}

/// Side-by-side two-player view.
///
/// Each pane is a bordered board (cells drawn two columns wide to roughly
/// square up terminal glyphs) with a stat strip on its outer edge.
pub struct DuelView {
    cell_w: u16,
}

const PANEL_W: u16 = 10;
const PANE_GAP: u16 = 4;

impl Default for DuelView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

impl DuelView {
    fn frame_w(&self) -> u16 {
        BOARD_WIDTH as u16 * self.cell_w + 2
    }

    fn frame_h(&self) -> u16 {
        BOARD_HEIGHT as u16 + 2
    }

    fn pane_w(&self) -> u16 {
        self.frame_w() + 1 + PANEL_W
    }

    /// Smallest terminal this view fits in without clipping.
    pub fn min_size(&self) -> (u16, u16) {
        (self.pane_w() * 2 + PANE_GAP, self.frame_h() + 1)
    }

    /// Render both panes into an existing framebuffer.
    ///
    /// The framebuffer is resized to the viewport and fully repainted; the
    /// renderer diffs, so redundant cells cost nothing downstream.
    pub fn render_into(
        &self,
        snaps: &[BoardSnapshot; 2],
        status: RoundStatus,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let total_w = self.pane_w() * 2 + PANE_GAP;
        let origin_x = viewport.width.saturating_sub(total_w) / 2;
        let origin_y = viewport.height.saturating_sub(self.frame_h() + 1) / 2;

        for slot in PlayerSlot::BOTH {
            let i = slot.index();
            // Stat strip sits on the outer edge, so the boards face each other.
            let pane_x = origin_x + i as u16 * (self.pane_w() + PANE_GAP);
            let (board_x, panel_x) = match slot {
                PlayerSlot::Left => (pane_x + PANEL_W + 1, pane_x),
                PlayerSlot::Right => (pane_x, pane_x + self.frame_w() + 1),
            };
            self.draw_pane(fb, &snaps[i], slot, status, board_x, panel_x, origin_y);
        }

        if status.paused {
            self.overlay(fb, viewport, "PAUSED");
        }
    }

    fn draw_pane(
        &self,
        fb: &mut FrameBuffer,
        snap: &BoardSnapshot,
        slot: PlayerSlot,
        status: RoundStatus,
        board_x: u16,
        panel_x: u16,
        y0: u16,
    ) {
        let border = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let well = CellStyle::plain(Rgb::new(70, 70, 80), Rgb::new(24, 24, 32));

        fb.draw_box(board_x, y0, self.frame_w(), self.frame_h(), border);
        fb.fill_rect(
            board_x + 1,
            y0 + 1,
            BOARD_WIDTH as u16 * self.cell_w,
            BOARD_HEIGHT as u16,
            ' ',
            well,
        );

        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match kind_from_code(snap.board[y as usize][x as usize]) {
                    Some(kind) => self.cell(fb, board_x, y0, x, y, '█', kind_style(kind)),
                    None => self.cell(fb, board_x, y0, x, y, '·', well),
                }
            }
        }

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let ghost = CellStyle::plain(Rgb::new(120, 120, 130), Rgb::new(24, 24, 32));
            for &(dx, dy) in shape_of(active.kind, active.rotation).iter() {
                self.piece_cell(fb, board_x, y0, active.x + dx, ghost_y + dy, '░', ghost);
            }
        }

        if let Some(active) = snap.active {
            let style = kind_style(active.kind);
            for &(dx, dy) in shape_of(active.kind, active.rotation).iter() {
                self.piece_cell(fb, board_x, y0, active.x + dx, active.y + dy, '█', style);
            }
        }

        self.draw_panel(fb, snap, slot, panel_x, y0);

        if status.over {
            let won = status.winner == Some(slot);
            let banner = if won {
                "WINNER"
            } else if snap.topped_out {
                "TOP OUT"
            } else {
                "DRAW"
            };
            let x = board_x + (self.frame_w().saturating_sub(banner.len() as u16)) / 2;
            let style = CellStyle {
                fg: Rgb::new(255, 255, 255),
                bg: Rgb::new(0, 0, 0),
                bold: true,
            };
            fb.put_str(x, y0 + self.frame_h() / 2, banner, style);
        }
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &BoardSnapshot,
        slot: PlayerSlot,
        x: u16,
        y0: u16,
    ) {
        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
        };
        let value = CellStyle::plain(Rgb::new(190, 190, 190), Rgb::new(0, 0, 0));
        let muted = CellStyle::plain(Rgb::new(110, 110, 110), Rgb::new(0, 0, 0));

        let name = match slot {
            PlayerSlot::Left => "P1",
            PlayerSlot::Right => "P2",
        };
        let mut y = y0;
        fb.put_str(x, y, name, label);
        y += 2;

        fb.put_str(x, y, "SCORE", label);
        fb.put_str(x, y + 1, &snap.score.to_string(), value);
        y += 3;

        fb.put_str(x, y, "LEVEL", label);
        fb.put_str(x, y + 1, &snap.level.to_string(), value);
        y += 3;

        fb.put_str(x, y, "LINES", label);
        fb.put_str(x, y + 1, &snap.lines.to_string(), value);
        y += 3;

        fb.put_str(x, y, "HOLD", label);
        match snap.hold {
            Some(kind) => {
                let style = if snap.can_hold { kind_style(kind) } else { muted };
                fb.put_char(x, y + 1, kind.as_char(), style);
            }
            None => fb.put_char(x, y + 1, '-', muted),
        }
        y += 3;

        fb.put_str(x, y, "NEXT", label);
        for (i, kind) in snap.next.iter().flatten().enumerate() {
            fb.put_char(x, y + 1 + i as u16, kind.as_char(), kind_style(*kind));
        }
    }

    fn cell(&self, fb: &mut FrameBuffer, bx: u16, by: u16, x: u16, y: u16, ch: char, style: CellStyle) {
        fb.fill_rect(bx + 1 + x * self.cell_w, by + 1 + y, self.cell_w, 1, ch, style);
    }

    fn piece_cell(
        &self,
        fb: &mut FrameBuffer,
        bx: u16,
        by: u16,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
            self.cell(fb, bx, by, x as u16, y as u16, ch, style);
        }
    }

    fn overlay(&self, fb: &mut FrameBuffer, viewport: Viewport, text: &str) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(60, 60, 60),
            bold: true,
        };
        let x = viewport.width.saturating_sub(text.len() as u16) / 2;
        fb.put_str(x, viewport.height / 2, text, style);
    }
}

fn kind_from_code(code: u8) -> Option<PieceKind> {
    match code {
        1 => Some(PieceKind::I),
        2 => Some(PieceKind::O),
        3 => Some(PieceKind::T),
        4 => Some(PieceKind::S),
        5 => Some(PieceKind::Z),
        6 => Some(PieceKind::J),
        7 => Some(PieceKind::L),
        _ => None,
    }
}

fn kind_style(kind: PieceKind) -> CellStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    };
    CellStyle::plain(fg, Rgb::new(24, 24, 32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cell_code;

    fn contains(fb: &FrameBuffer, text: &str) -> bool {
        for y in 0..fb.height() {
            let row: String = (0..fb.width())
                .map(|x| fb.get(x, y).unwrap_or_default().ch)
                .collect();
            if row.contains(text) {
                return true;
            }
        }
        false
    }

    fn big_viewport(view: &DuelView) -> Viewport {
        let (w, h) = view.min_size();
        Viewport::new(w + 8, h + 4)
    }

    #[test]
    fn renders_locked_cells_in_both_panes() {
        let view = DuelView::default();
        let mut snaps = [BoardSnapshot::default(), BoardSnapshot::default()];
        snaps[0].board[19][0] = cell_code(PieceKind::I);
        snaps[1].board[19][9] = cell_code(PieceKind::Z);

        let mut fb = FrameBuffer::new(1, 1);
        view.render_into(&snaps, RoundStatus::default(), big_viewport(&view), &mut fb);

        let mut blocks = 0;
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                if fb.get(x, y).unwrap().ch == '█' {
                    blocks += 1;
                }
            }
        }
        // One locked cell per pane, two terminal columns each.
        assert_eq!(blocks, 4);
    }

    #[test]
    fn pause_overlay_is_drawn() {
        let view = DuelView::default();
        let snaps = [BoardSnapshot::default(), BoardSnapshot::default()];
        let status = RoundStatus {
            paused: true,
            ..Default::default()
        };
        let mut fb = FrameBuffer::new(1, 1);
        view.render_into(&snaps, status, big_viewport(&view), &mut fb);
        assert!(contains(&fb, "PAUSED"));
    }

    #[test]
    fn winner_and_loser_banners() {
        let view = DuelView::default();
        let mut snaps = [BoardSnapshot::default(), BoardSnapshot::default()];
        snaps[1].topped_out = true;
        let status = RoundStatus {
            paused: false,
            over: true,
            winner: Some(PlayerSlot::Left),
        };
        let mut fb = FrameBuffer::new(1, 1);
        view.render_into(&snaps, status, big_viewport(&view), &mut fb);
        assert!(contains(&fb, "WINNER"));
        assert!(contains(&fb, "TOP OUT"));
    }

    #[test]
    fn panel_shows_scores_for_both_players() {
        let view = DuelView::default();
        let mut snaps = [BoardSnapshot::default(), BoardSnapshot::default()];
        snaps[0].score = 1234;
        snaps[1].score = 987;
        let mut fb = FrameBuffer::new(1, 1);
        view.render_into(&snaps, RoundStatus::default(), big_viewport(&view), &mut fb);
        assert!(contains(&fb, "1234"));
        assert!(contains(&fb, "987"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let view = DuelView::default();
        let snaps = [BoardSnapshot::default(), BoardSnapshot::default()];
        let mut fb = FrameBuffer::new(1, 1);
        view.render_into(&snaps, RoundStatus::default(), Viewport::new(10, 5), &mut fb);
        assert_eq!(fb.width(), 10);
    }
}
