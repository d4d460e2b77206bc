// Piece catalog: fixed shapes and palette, plus random piece generation.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

/// Rows of a shape's bounding box; `true` marks a filled cell.
pub type Shape = &'static [&'static [bool]];

const X: bool = true;
const O: bool = false;

/// Every shape a reward piece can take.
pub static SHAPES: &[Shape] = &[
    // 1x1
    &[&[X]],
    // dominoes
    &[&[X, X]],
    &[&[X], &[X]],
    // 2x2
    &[&[X, X], &[X, X]],
    // L trominoes
    &[&[X, O], &[X, X]],
    &[&[O, X], &[X, X]],
    &[&[X, X], &[X, O]],
    &[&[X, X], &[O, X]],
    // T
    &[&[X, X, X], &[O, X, O]],
    &[&[O, X], &[X, X], &[O, X]],
    &[&[O, X, O], &[X, X, X]],
    &[&[X, O], &[X, X], &[X, O]],
    // Z
    &[&[X, X, O], &[O, X, X]],
    &[&[O, X], &[X, X], &[X, O]],
    // lines
    &[&[X, X, X]],
    &[&[X], &[X], &[X]],
    // corners
    &[&[X, X, X], &[X, O, O], &[X, O, O]],
    &[&[X, X, X], &[O, O, X], &[O, O, X]],
    &[&[X, O, O], &[X, O, O], &[X, X, X]],
    &[&[O, O, X], &[O, O, X], &[X, X, X]],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Color {
    Pink,
    Purple,
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    Indigo,
    Teal,
}

impl Color {
    pub fn all() -> &'static [Color] {
        use Color::*;
        &[Pink, Purple, Blue, Green, Yellow, Orange, Red, Indigo, Teal]
    }

    /// CSS color for canvas / DOM rendering.
    pub fn css(self) -> &'static str {
        use Color::*;
        match self {
            Pink => "#f472b6",
            Purple => "#c084fc",
            Blue => "#60a5fa",
            Green => "#4ade80",
            Yellow => "#facc15",
            Orange => "#fb923c",
            Red => "#f87171",
            Indigo => "#818cf8",
            Teal => "#2dd4bf",
        }
    }

    /// Serialized color name to CSS value, for hosts painting snapshots.
    pub fn palette() -> BTreeMap<Color, &'static str> {
        Color::all().iter().map(|&c| (c, c.css())).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Piece {
    pub id: String,
    pub shape: Shape,
    pub color: Color,
}

impl Piece {
    pub fn new(id: impl Into<String>, shape: Shape, color: Color) -> Self {
        Self {
            id: id.into(),
            shape,
            color,
        }
    }

    pub fn height(&self) -> usize {
        self.shape.len()
    }

    pub fn width(&self) -> usize {
        self.shape.first().map_or(0, |row| row.len())
    }

    /// `(row, col)` offsets of filled cells within the bounding box.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.shape.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(c, _)| (r, c))
        })
    }
}

/// Draws random pieces; ids stay unique for the generator's lifetime.
#[derive(Debug, Default)]
pub struct PieceGenerator {
    issued: u64,
}

impl PieceGenerator {
    pub fn batch<R: Rng>(&mut self, count: usize, rng: &mut R) -> Vec<Piece> {
        (0..count).map(|_| self.next(rng)).collect()
    }

    fn next<R: Rng>(&mut self, rng: &mut R) -> Piece {
        let shape = *SHAPES.choose(rng).unwrap_or(&SHAPES[0]);
        let color = *Color::all().choose(rng).unwrap_or(&Color::Pink);
        self.issued += 1;
        Piece::new(format!("piece-{}", self.issued), shape, color)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn shapes_are_rectangular_and_nonempty() {
        assert_eq!(SHAPES.len(), 20);
        for shape in SHAPES {
            let w = shape[0].len();
            assert!(shape.iter().all(|row| row.len() == w));
            assert!(shape.iter().flat_map(|r| r.iter()).any(|c| *c));
            assert!(shape.len() <= 3 && w <= 3);
        }
    }

    #[test]
    fn cells_follow_filled_flags() {
        let p = Piece::new("p", SHAPES[4], Color::Blue);
        let cells: Vec<_> = p.cells().collect();
        assert_eq!(cells, [(0, 0), (1, 0), (1, 1)]);
        assert_eq!((p.height(), p.width()), (2, 2));
    }

    #[test]
    fn batch_ids_are_unique() {
        let mut gen_ = PieceGenerator::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut ids: Vec<_> = gen_
            .batch(3, &mut rng)
            .into_iter()
            .chain(gen_.batch(3, &mut rng))
            .map(|p| p.id)
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn palette_keys_match_serialized_names() {
        let palette = Color::palette();
        assert_eq!(palette.len(), Color::all().len());
        let json = serde_json::to_value(&palette).unwrap();
        assert_eq!(json["pink"], "#f472b6");
        assert_eq!(json["teal"], "#2dd4bf");
        assert_eq!(
            serde_json::to_value(Color::Indigo).unwrap(),
            serde_json::json!("indigo")
        );
    }
}
