//! Shape generation for 2D primitives
//!
//! All geometry is built in cell units: (0, 0) is the top-left corner of the
//! board and (width, height) the bottom-right. The pipeline maps to NDC.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::{Cell, Snapshot};

/// Gap between neighbouring snake segments, in cells
const SEGMENT_INSET: f32 = 0.05;
/// Food circle radius, in cells
const FOOD_RADIUS: f32 = 0.45;
const FOOD_SEGMENTS: u32 = 20;
/// Grid line width, in cells
const GRID_LINE_WIDTH: f32 = 0.04;

/// Two triangles covering the rectangle `min..max`
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// A filled cell, shrunk by `inset` on every side
pub fn cell_quad(cell: Cell, inset: f32, color: [f32; 4]) -> [Vertex; 6] {
    let min = Vec2::new(cell.x as f32 + inset, cell.y as f32 + inset);
    let max = Vec2::new(cell.x as f32 + 1.0 - inset, cell.y as f32 + 1.0 - inset);
    rect(min, max, color)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Thin lines along every inner cell border
pub fn grid_lines(width: i32, height: i32, color: [f32; 4]) -> Vec<Vertex> {
    let (w, h) = (width as f32, height as f32);
    let half = GRID_LINE_WIDTH / 2.0;
    let mut vertices = Vec::with_capacity(((width + height).max(0) as usize) * 6);

    for x in 1..width {
        let x = x as f32;
        vertices.extend(rect(Vec2::new(x - half, 0.0), Vec2::new(x + half, h), color));
    }
    for y in 1..height {
        let y = y as f32;
        vertices.extend(rect(Vec2::new(0.0, y - half), Vec2::new(w, y + half), color));
    }

    vertices
}

/// Every vertex for one frame: grid lines, food, then the snake on top
pub fn scene(snapshot: &Snapshot, show_grid: bool) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(snapshot.snake.len() * 6 + FOOD_SEGMENTS as usize * 3);

    if show_grid {
        vertices.extend(grid_lines(snapshot.width, snapshot.height, colors::GRID_LINE));
    }

    if let Some(food) = snapshot.food {
        let center = Vec2::new(food.x as f32 + 0.5, food.y as f32 + 0.5);
        vertices.extend(circle(center, FOOD_RADIUS, colors::FOOD, FOOD_SEGMENTS));
    }

    // Tail first so the head is drawn last
    for (i, &cell) in snapshot.snake.iter().enumerate().rev() {
        let color = if i == 0 { colors::SNAKE_HEAD } else { colors::SNAKE };
        vertices.extend(cell_quad(cell, SEGMENT_INSET, color));
    }

    vertices
}

/// Map a point in cell units to normalized device coordinates
///
/// The board is scaled uniformly to fit the viewport and centered, so a
/// canvas with a different aspect ratio gets letterboxed.
pub fn grid_to_ndc(point: Vec2, board: (i32, i32), viewport: (u32, u32)) -> Vec2 {
    let board = Vec2::new(board.0.max(1) as f32, board.1.max(1) as f32);
    let view = Vec2::new(viewport.0.max(1) as f32, viewport.1.max(1) as f32);

    let cell_px = (view.x / board.x).min(view.y / board.y);
    let offset = (view - board * cell_px) / 2.0;
    let px = offset + point * cell_px;

    // Screen y grows downward, NDC y grows upward
    Vec2::new(px.x / view.x * 2.0 - 1.0, 1.0 - px.y / view.y * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RunState;

    fn snapshot() -> Snapshot {
        Snapshot {
            width: 30,
            height: 20,
            snake: vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)],
            food: Some(Cell::new(10, 10)),
            score: 0,
            run_state: RunState::Running,
            overlay: None,
        }
    }

    #[test]
    fn test_cell_quad_bounds() {
        let quad = cell_quad(Cell::new(2, 3), 0.1, colors::SNAKE);
        for v in &quad {
            assert!(v.position[0] >= 2.1 - 1e-5 && v.position[0] <= 2.9 + 1e-5);
            assert!(v.position[1] >= 3.1 - 1e-5 && v.position[1] <= 3.9 + 1e-5);
        }
    }

    #[test]
    fn test_scene_vertex_count() {
        let vertices = scene(&snapshot(), false);
        assert_eq!(vertices.len(), FOOD_SEGMENTS as usize * 3 + 3 * 6);
        // Head drawn last, in the head color
        assert_eq!(vertices.last().map(|v| v.color), Some(colors::SNAKE_HEAD));

        let with_grid = scene(&snapshot(), true);
        assert_eq!(with_grid.len(), vertices.len() + (29 + 19) * 6);
    }

    #[test]
    fn test_scene_without_food() {
        let mut snap = snapshot();
        snap.food = None;
        assert_eq!(scene(&snap, false).len(), 3 * 6);
    }

    #[test]
    fn test_grid_to_ndc_corners() {
        let tl = grid_to_ndc(Vec2::ZERO, (30, 20), (600, 400));
        let br = grid_to_ndc(Vec2::new(30.0, 20.0), (30, 20), (600, 400));
        assert!((tl - Vec2::new(-1.0, 1.0)).length() < 1e-5);
        assert!((br - Vec2::new(1.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_grid_to_ndc_letterbox() {
        // Square viewport: 30x20 board fills the width, bars top and bottom
        let tl = grid_to_ndc(Vec2::ZERO, (30, 20), (600, 600));
        assert!((tl.x + 1.0).abs() < 1e-5);
        assert!(tl.y < 1.0);
        let center = grid_to_ndc(Vec2::new(15.0, 10.0), (30, 20), (600, 600));
        assert!(center.length() < 1e-5);
    }
}
