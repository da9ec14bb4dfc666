//! Settle points for the food pieces of each letter, in letter-cell units.
//!
//! Every letter has fifteen points inside a 4x6 cell box centred on the origin (x in -2..=2,
//! y in -3..=3, +y down). Multiply by the letter scale to get pixels.

/// The word spelled by the food waves.
pub const WORD: &str = "GENUARY";

const G: [(f64, f64); 15] = [
    (-2.0, -3.0), (-2.0, -1.5), (-2.0, 0.0), (-2.0, 1.5), (-2.0, 3.0),
    (0.0, -3.0), (1.0, -3.0), (2.0, -3.0),
    (0.0, 3.0), (1.0, 3.0), (2.0, 3.0),
    (2.0, 1.5), (0.0, 0.0), (1.0, 0.0), (0.5, 1.5),
];

const E: [(f64, f64); 15] = [
    (-2.0, -3.0), (-2.0, -1.5), (-2.0, 0.0), (-2.0, 1.5), (-2.0, 3.0),
    (0.0, -3.0), (1.0, -3.0), (1.5, -3.0),
    (0.0, 0.0), (0.5, 0.0), (1.0, 0.0),
    (0.0, 3.0), (1.0, 3.0), (1.5, 3.0), (-1.0, -1.5),
];

const N: [(f64, f64); 15] = [
    (-2.0, -3.0), (-2.0, -1.5), (-2.0, 0.0), (-2.0, 1.5), (-2.0, 3.0),
    (2.0, -3.0), (2.0, -1.5), (2.0, 0.0), (2.0, 1.5), (2.0, 3.0),
    (-1.0, -2.0), (0.0, -1.0), (0.0, 0.0), (0.0, 1.0), (1.0, 2.0),
];

const U: [(f64, f64); 15] = [
    (-2.0, -3.0), (-2.0, -1.5), (-2.0, 0.0), (-2.0, 1.5),
    (2.0, -3.0), (2.0, -1.5), (2.0, 0.0), (2.0, 1.5),
    (-1.5, 3.0), (-1.0, 3.0), (-0.5, 3.0),
    (0.5, 3.0), (1.0, 3.0), (1.5, 3.0), (0.0, 2.5),
];

const A: [(f64, f64); 15] = [
    (0.0, -3.0), (-0.5, -2.5), (0.5, -2.5),
    (-1.0, -1.5), (1.0, -1.5),
    (-1.5, 0.0), (-0.5, 0.0), (0.0, 0.0), (0.5, 0.0), (1.5, 0.0),
    (-2.0, 1.5), (2.0, 1.5),
    (-2.0, 3.0), (-2.5, 2.5), (2.0, 3.0),
];

const R: [(f64, f64); 15] = [
    (-2.0, -3.0), (-2.0, -1.5), (-2.0, 0.0), (-2.0, 1.5), (-2.0, 3.0),
    (0.0, -3.0), (1.0, -3.0), (1.5, -3.0),
    (2.0, -2.0), (2.0, -1.5),
    (1.0, 0.0), (0.5, 0.0),
    (0.0, 1.5), (0.5, 2.0), (1.0, 3.0),
];

const Y: [(f64, f64); 15] = [
    (-2.0, -3.0), (-1.5, -2.5), (-1.0, -1.5),
    (2.0, -3.0), (1.5, -2.5), (1.0, -1.5),
    (-0.5, -0.5), (0.0, 0.0), (0.5, -0.5),
    (0.0, 1.0), (-0.5, 1.0), (0.5, 1.0),
    (0.0, 1.5), (0.0, 2.5), (0.0, 3.0),
];

/// Settle points for `letter`, or an empty slice for letters outside [`WORD`].
pub fn cluster(letter: char) -> &'static [(f64, f64)] {
    match letter.to_ascii_uppercase() {
        'G' => &G,
        'E' => &E,
        'N' => &N,
        'U' => &U,
        'A' => &A,
        'R' => &R,
        'Y' => &Y,
        _ => &[],
    }
}

/// Settle point of piece `piece` of `letter`; pieces beyond the table wrap around.
pub fn settle_point(letter: char, piece: usize) -> Option<(f64, f64)> {
    let pts = cluster(letter);
    if pts.is_empty() {
        return None;
    }
    Some(pts[piece % pts.len()])
}
