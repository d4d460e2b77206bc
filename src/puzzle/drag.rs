// Pointer drag tracking for moving a piece onto the board.

use serde::Serialize;

use super::grid::GRID_SIZE;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// On-screen bounds of the board (client coordinates).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoardRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Grid `(row, col)` under the pointer, or None outside the board.
    pub fn cell_at(&self, p: Point) -> Option<(usize, usize)> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let inside = p.x >= self.left
            && p.x <= self.left + self.width
            && p.y >= self.top
            && p.y <= self.top + self.height;
        if !inside {
            return None;
        }
        let cell_w = self.width / GRID_SIZE as f64;
        let cell_h = self.height / GRID_SIZE as f64;
        let col = ((p.x - self.left) / cell_w).floor() as usize;
        let row = ((p.y - self.top) / cell_h).floor() as usize;
        // The far edges are inclusive but belong to no cell.
        (row < GRID_SIZE && col < GRID_SIZE).then_some((row, col))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragState {
    pub piece_index: usize,
    pub origin: Point,
    pub position: Point,
    pub drop_cell: Option<(usize, usize)>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DragTracker {
    active: Option<DragState>,
}

impl DragTracker {
    pub fn begin(&mut self, piece_index: usize, at: Point) {
        self.active = Some(DragState {
            piece_index,
            origin: at,
            position: at,
            drop_cell: None,
        });
    }

    /// Follow the pointer. Ignored when nothing is being dragged.
    pub fn move_to(&mut self, at: Point, board: &BoardRect) {
        if let Some(drag) = self.active.as_mut() {
            drag.position = at;
            drag.drop_cell = board.cell_at(at);
        }
    }

    /// End the drag, returning the piece and cell to try if the pointer was
    /// last over the board. The drag state is always cleared.
    pub fn release(&mut self) -> Option<(usize, (usize, usize))> {
        let drag = self.active.take()?;
        drag.drop_cell.map(|cell| (drag.piece_index, cell))
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn current(&self) -> Option<&DragState> {
        self.active.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD: BoardRect = BoardRect {
        left: 100.0,
        top: 50.0,
        width: 360.0,
        height: 360.0,
    };

    #[test]
    fn cell_at_maps_pointer_to_cell() {
        assert_eq!(BOARD.cell_at(Point::new(100.0, 50.0)), Some((0, 0)));
        assert_eq!(BOARD.cell_at(Point::new(145.0, 95.0)), Some((1, 1)));
        assert_eq!(BOARD.cell_at(Point::new(459.0, 409.0)), Some((8, 8)));
        assert_eq!(BOARD.cell_at(Point::new(460.0, 410.0)), None);
        assert_eq!(BOARD.cell_at(Point::new(99.0, 60.0)), None);
    }

    #[test]
    fn release_returns_last_cell_and_clears() {
        let mut d = DragTracker::default();
        d.begin(2, Point::new(0.0, 0.0));
        d.move_to(Point::new(145.0, 95.0), &BOARD);
        assert_eq!(d.current().map(|s| s.drop_cell), Some(Some((1, 1))));
        assert_eq!(d.release(), Some((2, (1, 1))));
        assert!(d.current().is_none());
    }

    #[test]
    fn release_off_board_yields_nothing() {
        let mut d = DragTracker::default();
        d.begin(0, Point::new(0.0, 0.0));
        d.move_to(Point::new(145.0, 95.0), &BOARD);
        d.move_to(Point::new(0.0, 0.0), &BOARD);
        assert_eq!(d.release(), None);
        assert!(d.current().is_none());
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let mut d = DragTracker::default();
        d.move_to(Point::new(145.0, 95.0), &BOARD);
        assert!(d.current().is_none());
        assert_eq!(d.release(), None);
    }
}
