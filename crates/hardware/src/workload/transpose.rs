//! Cache-aware matrix transpose strategies.
//!
//! A strategy computes `B = A^T` through a [`Workspace`], which records every
//! element access. Strategies differ only in the order of those accesses,
//! and therefore in how many misses the recorded trace produces.
//!
//! # Strategies
//!
//! - `RowWise`: baseline row-major scan of A, column-major writes to B.
//! - `Blocked`: square tiles, element-by-element copy inside each tile.
//! - `BufferedBlocked`: square tiles; each tile row of A is read into locals
//!   before being scattered down a column of B, so the A line is not evicted
//!   by the B writes that conflict with it.
//! - `SplitBlocked`: tiles processed as four half-tiles, using the upper-right
//!   quarter of the B tile as scratch, for matrices whose rows alias every
//!   few lines of the cache.

use std::fmt;

use super::matrix::Workspace;
use crate::common::constants::{ELEMENT_BYTES, MAX_MATRIX_DIM};
use crate::config::CacheConfig;

/// A transpose access pattern.
pub trait TransposeStrategy: fmt::Debug {
    /// Short human-readable name, e.g. `blocked(16)`.
    fn name(&self) -> String;

    /// Whether this strategy can transpose a `rows x cols` matrix.
    fn supports(&self, rows: usize, cols: usize) -> bool {
        rows > 0 && cols > 0
    }

    /// Writes the transpose of A into B.
    fn transpose(&self, ws: &mut Workspace);
}

/// Baseline: scan A row by row and write each element to its place in B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowWise;

impl TransposeStrategy for RowWise {
    fn name(&self) -> String {
        "row-wise".to_string()
    }

    fn transpose(&self, ws: &mut Workspace) {
        for i in 0..ws.rows() {
            for j in 0..ws.cols() {
                let v = ws.load_a(i, j);
                ws.store_b(j, i, v);
            }
        }
    }
}

/// Tiled transpose copying one element at a time.
///
/// Edge tiles are clipped, so any shape is supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blocked {
    tile: usize,
}

impl Blocked {
    /// Creates a blocked strategy with `tile x tile` tiles (at least 1).
    pub fn new(tile: usize) -> Self {
        Self { tile: tile.max(1) }
    }

    /// Tile edge length.
    pub const fn tile(&self) -> usize {
        self.tile
    }
}

impl TransposeStrategy for Blocked {
    fn name(&self) -> String {
        format!("blocked({})", self.tile)
    }

    fn transpose(&self, ws: &mut Workspace) {
        let (rows, cols, t) = (ws.rows(), ws.cols(), self.tile);
        for ii in (0..rows).step_by(t) {
            for jj in (0..cols).step_by(t) {
                for i in ii..(ii + t).min(rows) {
                    for j in jj..(jj + t).min(cols) {
                        let v = ws.load_a(i, j);
                        ws.store_b(j, i, v);
                    }
                }
            }
        }
    }
}

/// Tiled transpose that reads a whole tile row of A before writing any of it.
///
/// Edge tiles are clipped, so any shape is supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferedBlocked {
    tile: usize,
}

impl BufferedBlocked {
    /// Creates a buffered blocked strategy with `tile x tile` tiles (at least 1).
    pub fn new(tile: usize) -> Self {
        Self { tile: tile.max(1) }
    }

    /// Tile edge length.
    pub const fn tile(&self) -> usize {
        self.tile
    }
}

impl TransposeStrategy for BufferedBlocked {
    fn name(&self) -> String {
        format!("buffered-blocked({})", self.tile)
    }

    fn transpose(&self, ws: &mut Workspace) {
        let (rows, cols, t) = (ws.rows(), ws.cols(), self.tile);
        let mut locals = Vec::with_capacity(t);
        for ii in (0..rows).step_by(t) {
            for jj in (0..cols).step_by(t) {
                for i in ii..(ii + t).min(rows) {
                    locals.clear();
                    locals.extend((jj..(jj + t).min(cols)).map(|j| ws.load_a(i, j)));
                    for (x, &v) in locals.iter().enumerate() {
                        ws.store_b(jj + x, i, v);
                    }
                }
            }
        }
    }
}

/// Tiled transpose working in half-tiles, for square matrices.
///
/// For each `t x t` tile with `h = t / 2`:
/// 1. The top `h` rows of the A tile are read a row at a time. Their left
///    halves go to their final place in the left half of the B tile; their
///    right halves are parked, still transposed, in the B tile's upper-right
///    quarter.
/// 2. For each of the top `h` rows of the B tile, the parked values are moved
///    down to the lower-left quarter, and the row's upper-right quarter is
///    filled from the bottom-left quarter of the A tile.
/// 3. The lower-right quarter of the B tile is filled from A directly.
///
/// Only B rows in one half of the tile are live at a time, so the strategy
/// suits caches that hold just `h` rows of the matrix without conflict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitBlocked {
    tile: usize,
}

impl SplitBlocked {
    /// Creates a split blocked strategy. `tile` is rounded down to an even
    /// number, and is at least 2.
    pub fn new(tile: usize) -> Self {
        Self {
            tile: (tile & !1).max(2),
        }
    }

    /// Tile edge length.
    pub const fn tile(&self) -> usize {
        self.tile
    }
}

impl TransposeStrategy for SplitBlocked {
    fn name(&self) -> String {
        format!("split-blocked({})", self.tile)
    }

    fn supports(&self, rows: usize, cols: usize) -> bool {
        rows > 0 && rows == cols && rows % self.tile == 0
    }

    fn transpose(&self, ws: &mut Workspace) {
        let n = ws.rows();
        let t = self.tile;
        let h = t / 2;
        let mut row = Vec::with_capacity(t);
        let mut upper = Vec::with_capacity(h);
        let mut lower = Vec::with_capacity(h);

        // i: first column of the A tile, j: first row of the A tile.
        for i in (0..n).step_by(t) {
            for j in (0..n).step_by(t) {
                for k in j..j + h {
                    row.clear();
                    row.extend((i..i + t).map(|c| ws.load_a(k, c)));
                    let (left, right) = row.split_at(h);
                    for (x, &v) in left.iter().enumerate() {
                        ws.store_b(i + x, k, v);
                    }
                    for (x, &v) in right.iter().enumerate() {
                        ws.store_b(i + x, k + h, v);
                    }
                }

                for k in i..i + h {
                    upper.clear();
                    upper.extend((0..h).map(|x| ws.load_b(k, j + h + x)));
                    lower.clear();
                    lower.extend((0..h).map(|x| ws.load_a(j + h + x, k)));
                    for (x, &v) in upper.iter().enumerate() {
                        ws.store_b(k + h, j + x, v);
                    }
                    for (x, &v) in lower.iter().enumerate() {
                        ws.store_b(k, j + h + x, v);
                    }
                }

                for k in i + h..i + t {
                    lower.clear();
                    lower.extend((0..h).map(|x| ws.load_a(j + h + x, k)));
                    for (x, &v) in lower.iter().enumerate() {
                        ws.store_b(k, j + h + x, v);
                    }
                }
            }
        }
    }
}

/// Chooses a transpose strategy for a `rows x cols` matrix on `cache`.
///
/// Let `epb` be the number of elements per cache block and `fit` the number
/// of matrix rows the whole cache holds.
///
/// - Square matrices with `fit >= epb` use [`BufferedBlocked`] with `epb`-wide
///   tiles: a full tile of B rows stays resident.
/// - Square matrices divisible by an even `epb` with `fit >= epb / 2` use
///   [`SplitBlocked`]: only half a tile of B rows is live at a time.
/// - Everything else uses [`Blocked`] with `2 * epb` tiles.
pub fn select_strategy(rows: usize, cols: usize, cache: &CacheConfig) -> Box<dyn TransposeStrategy> {
    let epb = (cache.block_bytes() / ELEMENT_BYTES).clamp(1, MAX_MATRIX_DIM as u64) as usize;
    let row_bytes = (cols.max(1) as u64) * ELEMENT_BYTES;
    let fit = cache.size_bytes() / row_bytes;

    if rows == cols {
        if fit >= epb as u64 {
            return Box::new(BufferedBlocked::new(epb));
        }
        if epb >= 2 && epb % 2 == 0 && rows % epb == 0 && fit >= (epb / 2) as u64 {
            return Box::new(SplitBlocked::new(epb));
        }
    }
    Box::new(Blocked::new(2 * epb))
}
