//! Static positional evaluation for the heuristic agent.
//!
//! Hand-tuned cell features: eyes, liberties, atari shapes, corner and
//! side adjacency, and how much a placement shrinks the opponent's
//! space. Used only by the heuristic agent; the search engine never
//! consults these scores.

use crate::core::{Board, Side, SIZE};

const EYE_SCORE: i32 = 16;
const LIBERTY_SCORE: i32 = 8;
const ATARI_SCORE: i32 = 24;
const SELF_CORNER_ADJACENT_SCORE: i32 = 8;
const OPPO_CORNER_ADJACENT_SCORE: i32 = 1;
const OPPO_SIDE_ADJACENT_SCORE: i32 = 1;
const BLOCK_OPPO_SCORE: i32 = 24;

/// Score a candidate placement for `side` at `pos`. Higher is better.
/// The placement is assumed legal; the board itself is not mutated.
pub fn action_value(board: &Board, pos: usize, side: Side) -> i32 {
    let x = (pos % SIZE) as i32;
    let y = (pos / SIZE) as i32;

    let mut score = -EYE_SCORE * is_eye(board, x, y, side) as i32
        + LIBERTY_SCORE * count_liberty(board, x, y)
        + ATARI_SCORE * is_atari(board, x, y, side) as i32
        + SELF_CORNER_ADJACENT_SCORE * count_corner_adjacent(board, x, y, side)
        + OPPO_CORNER_ADJACENT_SCORE * count_corner_adjacent(board, x, y, !side)
        + OPPO_SIDE_ADJACENT_SCORE * count_side_adjacent(board, x, y, !side);

    let before = count_available(board, !side);
    let mut after = *board;
    after.put(pos, side);

    // eyes the placement completes around itself
    score += EYE_SCORE
        * (is_eye(&after, x, y - 1, side) as i32
            + is_eye(&after, x - 1, y, side) as i32
            + is_eye(&after, x + 1, y, side) as i32
            + is_eye(&after, x, y + 1, side) as i32);

    score += BLOCK_OPPO_SCORE * (before - count_available(&after, !side));
    score
}

/// Empty point whose orthogonal neighbors are all own stones or walls
pub fn is_eye(board: &Board, x: i32, y: i32, side: Side) -> bool {
    if board.cell(x, y) != Some(None) {
        return false;
    }
    orthogonal(x, y).into_iter().all(|(nx, ny)| match board.cell(nx, ny) {
        None => true,
        Some(Some(s)) => s == side,
        Some(None) => false,
    })
}

/// Empty orthogonal neighbors of a point
pub fn count_liberty(board: &Board, x: i32, y: i32) -> i32 {
    orthogonal(x, y)
        .into_iter()
        .filter(|&(nx, ny)| board.cell(nx, ny) == Some(None))
        .count() as i32
}

/// Point hemmed in on three sides by enemy stones or walls with exactly
/// one liberty left
pub fn is_atari(board: &Board, x: i32, y: i32, side: Side) -> bool {
    let hemmed = orthogonal(x, y)
        .into_iter()
        .filter(|&(nx, ny)| match board.cell(nx, ny) {
            None => true,
            Some(Some(s)) => s == !side,
            Some(None) => false,
        })
        .count();
    hemmed == 3 && count_liberty(board, x, y) == 1
}

pub fn count_corner_adjacent(board: &Board, x: i32, y: i32, side: Side) -> i32 {
    diagonal(x, y)
        .into_iter()
        .filter(|&(nx, ny)| board.cell(nx, ny) == Some(Some(side)))
        .count() as i32
}

pub fn count_side_adjacent(board: &Board, x: i32, y: i32, side: Side) -> i32 {
    orthogonal(x, y)
        .into_iter()
        .filter(|&(nx, ny)| board.cell(nx, ny) == Some(Some(side)))
        .count() as i32
}

/// Number of legal placements `side` still has
pub fn count_available(board: &Board, side: Side) -> i32 {
    board.legal_moves(side) as i32
}

fn orthogonal(x: i32, y: i32) -> [(i32, i32); 4] {
    [(x, y - 1), (x - 1, y), (x + 1, y), (x, y + 1)]
}

fn diagonal(x: i32, y: i32) -> [(i32, i32); 4] {
    [(x - 1, y - 1), (x + 1, y - 1), (x - 1, y + 1), (x + 1, y + 1)]
}
