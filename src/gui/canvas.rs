use std::mem;

use eframe::egui::{
    self,
    Pos2,
    Sense,
    Shape,
    Stroke,
    Vec2,
};

use super::theme::Theme;
use crate::glyph::{
    PlacedPath,
    GLYPH_SIZE,
};

pub const PAPER_WIDTH: f32 = 570.0;
pub const PAPER_HEIGHT: f32 = 2.0 * GLYPH_SIZE;
const GLYPH_ROW_TOP: f32 = (PAPER_HEIGHT - GLYPH_SIZE) / 2.0;

/// Freehand writing pad. Points are kept in paper units so the drawing
/// survives the window being resized.
#[derive(Debug, Default)]
pub struct PracticeCanvas {
    strokes: Vec<Vec<Pos2>>,
    current: Vec<Pos2>,
}

impl PracticeCanvas {
    pub fn begin_stroke(&mut self, point: Pos2) {
        self.finish_stroke();
        self.current.push(point);
    }

    pub fn extend_stroke(&mut self, point: Pos2) {
        if self.current.last() != Some(&point) {
            self.current.push(point);
        }
    }

    /// A lone tap leaves no mark.
    pub fn finish_stroke(&mut self) {
        let stroke = mem::take(&mut self.current);
        if stroke.len() > 1 {
            self.strokes.push(stroke);
        }
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.current.clear();
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Draws the paper, the reference strokes (if any) underneath, then the
    /// user's ink, and records pointer drags as new strokes.
    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme, reference: &[PlacedPath]) -> egui::Response {
        let ctx = ui.ctx().clone();
        let width = ui.available_width().min(PAPER_WIDTH);
        let scale = width / PAPER_WIDTH;
        let (response, painter) =
            ui.allocate_painter(Vec2::new(width, PAPER_HEIGHT * scale), Sense::drag());
        let rect = response.rect;

        let to_screen = |x: f32, y: f32| rect.min + Vec2::new(x, y) * scale;

        painter.rect_filled(rect, 4.0, theme.paper(&ctx));
        let guide = Stroke::new(1.0, theme.comment(&ctx).gamma_multiply(0.4));
        painter.hline(rect.x_range(), to_screen(0.0, GLYPH_ROW_TOP).y, guide);
        painter.hline(rect.x_range(), to_screen(0.0, GLYPH_ROW_TOP + GLYPH_SIZE).y, guide);

        let reference_ink = Stroke::new(3.0 * scale, theme.cyan(&ctx).gamma_multiply(0.6));
        for placed in reference {
            for line in placed.polylines() {
                let points = line.into_iter().map(|(x, y)| to_screen(x, y + GLYPH_ROW_TOP)).collect();
                painter.add(Shape::line(points, reference_ink));
            }
        }

        if let Some(pointer) = response.interact_pointer_pos() {
            let point = ((pointer - rect.min) / scale).to_pos2();
            if response.drag_started() {
                self.begin_stroke(point);
            } else if response.dragged() {
                self.extend_stroke(point);
            }
        }
        if response.drag_stopped() {
            self.finish_stroke();
        }

        let ink = Stroke::new(4.0 * scale, theme.ink(&ctx));
        for line in self.strokes.iter().chain(std::iter::once(&self.current)) {
            if line.len() > 1 {
                painter.add(Shape::line(line.iter().map(|p| to_screen(p.x, p.y)).collect(), ink));
            }
        }

        response
    }
}
