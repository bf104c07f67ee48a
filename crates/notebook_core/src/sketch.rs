use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// One freehand stroke as produced by the drawing surface.
///
/// Field names follow the surface's export format so stored pages stay readable by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub paths: Vec<Point>,
    pub stroke_width: f32,
    pub stroke_color: String,
    /// `true` for pen strokes, `false` for eraser strokes.
    pub draw_mode: bool,
}

impl Stroke {
    pub fn pen(paths: Vec<Point>) -> Self {
        Self {
            paths,
            stroke_width: 4.0,
            stroke_color: "white".to_string(),
            draw_mode: true,
        }
    }

    pub fn eraser(paths: Vec<Point>) -> Self {
        Self {
            paths,
            stroke_width: 16.0,
            stroke_color: "#000000".to_string(),
            draw_mode: false,
        }
    }
}
