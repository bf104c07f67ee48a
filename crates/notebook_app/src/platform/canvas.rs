use notebook_core::{Point, Stroke};

/// Freehand drawing surface driven by the panel.
pub trait DrawingSurface {
    fn reset_canvas(&mut self);
    fn load_paths(&mut self, strokes: Vec<Stroke>);
    fn export_paths(&self) -> Vec<Stroke>;
    fn erase_mode(&mut self, enabled: bool);
}

/// In-memory surface used by the terminal host.
#[derive(Debug, Default)]
pub struct MemoryCanvas {
    strokes: Vec<Stroke>,
    erasing: bool,
}

impl MemoryCanvas {
    /// Records one finished stroke using the current pen or eraser.
    pub fn draw(&mut self, points: Vec<Point>) {
        let stroke = if self.erasing {
            Stroke::eraser(points)
        } else {
            Stroke::pen(points)
        };
        self.strokes.push(stroke);
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }
}

impl DrawingSurface for MemoryCanvas {
    fn reset_canvas(&mut self) {
        self.strokes.clear();
    }

    fn load_paths(&mut self, strokes: Vec<Stroke>) {
        self.strokes.extend(strokes);
    }

    fn export_paths(&self) -> Vec<Stroke> {
        self.strokes.clone()
    }

    fn erase_mode(&mut self, enabled: bool) {
        self.erasing = enabled;
    }
}
