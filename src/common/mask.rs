use std::fmt::{Display, Formatter};
use std::ops::Deref;

use log::trace;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::error::{QRError, QRResult};
use crate::builder::QR;

// Mask pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern >= 8 {
            return Err(QRError::InvalidMaskingPattern);
        }
        Ok(Self(pattern))
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    // Products are widened since 176 * 176 overflows i16
    pub fn fields(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (p & 1) + (p % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        ((p & 1) + (p % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (((r + c) as i32 & 1) + (p % 3)) & 1 == 0
    }
}

impl MaskPattern {
    /// Predicate over (row, col) deciding which data modules get flipped.
    pub fn mask_functions(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern is validated on construction"),
        }
    }
}

// Mask selection
//------------------------------------------------------------------------------

/// Scores every mask on a copy of the symbol, applies the one with the
/// lowest total penalty and returns it. Ties go to the lowest mask id.
pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let scores = score_masks(qr);
    for (mask, pen) in scores.iter() {
        trace!("Mask {}: {pen}", **mask);
    }

    let (best_mask, best_pen) = scores[1..]
        .iter()
        .fold(scores[0], |best, &cur| if cur.1.total() < best.1.total() { cur } else { best });
    trace!("Selected mask {} with penalty {}", *best_mask, best_pen.total());

    qr.apply_mask(best_mask);
    best_mask
}

fn score_candidate(qr: &QR, mask: MaskPattern) -> (MaskPattern, Penalty) {
    let mut qr = qr.clone();
    qr.apply_mask(mask);
    (mask, compute_penalty(&qr))
}

#[cfg(not(feature = "parallel"))]
fn score_masks(qr: &QR) -> Vec<(MaskPattern, Penalty)> {
    MaskPattern::all().map(|m| score_candidate(qr, m)).collect()
}

// Collecting keeps the candidates in mask order, so selection is unchanged
#[cfg(feature = "parallel")]
fn score_masks(qr: &QR) -> Vec<(MaskPattern, Penalty)> {
    (0..8u8).into_par_iter().map(|m| score_candidate(qr, MaskPattern(m))).collect()
}

// Penalty
//------------------------------------------------------------------------------

/// Read-only view of a square module grid, as scored by the penalty rules.
pub trait ModuleGrid {
    fn width(&self) -> usize;

    fn is_dark(&self, r: usize, c: usize) -> bool;
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct Penalty {
    pub adjacent: u32,
    pub block: u32,
    pub finder: u32,
    pub balance: u32,
}

impl Penalty {
    pub fn total(&self) -> u32 {
        self.adjacent + self.block + self.finder + self.balance
    }
}

impl Display for Penalty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "adjacent {}, block {}, finder {}, balance {}, total {}",
            self.adjacent,
            self.block,
            self.finder,
            self.balance,
            self.total()
        )
    }
}

pub fn compute_penalty<G: ModuleGrid>(grid: &G) -> Penalty {
    Penalty {
        adjacent: compute_adjacent_penalty(grid, true) + compute_adjacent_penalty(grid, false),
        block: compute_block_penalty(grid),
        finder: compute_finder_pattern_penalty(grid, true)
            + compute_finder_pattern_penalty(grid, false),
        balance: compute_balance_penalty(grid),
    }
}

pub fn compute_total_penalty<G: ModuleGrid>(grid: &G) -> u32 {
    compute_penalty(grid).total()
}

fn line_getter<G: ModuleGrid>(grid: &G, is_hor: bool) -> impl Fn(usize, usize) -> bool + '_ {
    move |i, k| if is_hor { grid.is_dark(i, k) } else { grid.is_dark(k, i) }
}

// Each run of 5 or more same colored modules costs its length minus 2
fn compute_adjacent_penalty<G: ModuleGrid>(grid: &G, is_hor: bool) -> u32 {
    let mut pen = 0;
    let w = grid.width();
    let get = line_getter(grid, is_hor);
    for i in 0..w {
        let mut run = 1;
        for k in 1..w {
            if get(i, k) == get(i, k - 1) {
                run += 1;
                continue;
            }
            if run >= 5 {
                pen += run - 2;
            }
            run = 1;
        }
        if run >= 5 {
            pen += run - 2;
        }
    }
    pen
}

fn compute_block_penalty<G: ModuleGrid>(grid: &G) -> u32 {
    let mut pen = 0;
    let w = grid.width();
    for r in 0..w.saturating_sub(1) {
        for c in 0..w - 1 {
            let clr = grid.is_dark(r, c);
            if clr == grid.is_dark(r + 1, c)
                && clr == grid.is_dark(r, c + 1)
                && clr == grid.is_dark(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

fn compute_finder_pattern_penalty<G: ModuleGrid>(grid: &G, is_hor: bool) -> u32 {
    let mut pen = 0;
    let w = grid.width();
    if w < FINDER_WINDOW {
        return 0;
    }
    let get = line_getter(grid, is_hor);
    for i in 0..w {
        for j in 0..=w - FINDER_WINDOW {
            let window = (j..j + FINDER_WINDOW).fold(0u16, |acc, k| (acc << 1) | get(i, k) as u16);
            if FINDER_PATTERNS.contains(&window) {
                pen += 40;
            }
        }
    }
    pen
}

fn compute_balance_penalty<G: ModuleGrid>(grid: &G) -> u32 {
    let w = grid.width();
    let total = (w * w) as u32;
    if total == 0 {
        return 0;
    }
    let dark = (0..w).flat_map(|r| (0..w).map(move |c| (r, c))).filter(|&(r, c)| grid.is_dark(r, c)).count()
        as u32;
    let floor = dark * 20 / total;
    let ceil = (dark * 20).div_ceil(total);
    10 * floor.abs_diff(10).min(ceil.abs_diff(10))
}

#[cfg(test)]
mod mask_tests {
    use test_case::test_case;

    use super::{compute_penalty, MaskPattern, ModuleGrid, Penalty};
    use crate::common::error::QRError;

    struct TestGrid(Vec<Vec<bool>>);

    impl TestGrid {
        fn light(w: usize) -> Self {
            Self(vec![vec![false; w]; w])
        }

        fn from_str(s: &str) -> Self {
            Self(s.split_whitespace().map(|l| l.chars().map(|c| c == '#').collect()).collect())
        }
    }

    impl ModuleGrid for TestGrid {
        fn width(&self) -> usize {
            self.0.len()
        }

        fn is_dark(&self, r: usize, c: usize) -> bool {
            self.0[r][c]
        }
    }

    #[test]
    fn test_mask_pattern_new() {
        assert_eq!(*MaskPattern::new(7).unwrap(), 7);
        assert_eq!(MaskPattern::new(8), Err(QRError::InvalidMaskingPattern));
        assert_eq!(MaskPattern::all().count(), 8);
    }

    #[test_case(0, &[(0, 0), (1, 1), (2, 4)], &[(0, 1), (1, 2)])]
    #[test_case(1, &[(0, 5), (2, 3)], &[(1, 0), (3, 3)])]
    #[test_case(2, &[(5, 0), (1, 3)], &[(0, 1), (3, 2)])]
    #[test_case(3, &[(1, 2), (3, 3)], &[(1, 1), (0, 2)])]
    #[test_case(4, &[(1, 2), (2, 3)], &[(2, 0), (0, 3)])]
    #[test_case(5, &[(0, 7), (6, 5)], &[(1, 1), (5, 7)])]
    #[test_case(6, &[(1, 1), (3, 4)], &[(1, 3), (5, 7)])]
    #[test_case(7, &[(0, 0), (0, 2)], &[(1, 1), (0, 1)])]
    fn test_mask_functions(mask: u8, set: &[(i16, i16)], unset: &[(i16, i16)]) {
        let f = MaskPattern::new(mask).unwrap().mask_functions();
        assert!(set.iter().all(|&(r, c)| f(r, c)));
        assert!(unset.iter().all(|&(r, c)| !f(r, c)));
    }

    #[test]
    fn test_mask_functions_wide_coords() {
        // Row and col products beyond i16 range
        let f = MaskPattern::new(5).unwrap().mask_functions();
        assert!(f(176, 174));
        let f = MaskPattern::new(6).unwrap().mask_functions();
        assert!(f(176, 175));
    }

    #[test]
    fn test_adjacent_penalty() {
        let mut grid = TestGrid::light(7);
        assert_eq!(compute_penalty(&grid).adjacent, 70);
        grid.0[0][0] = true;
        assert_eq!(compute_penalty(&grid).adjacent, 68);
        grid.0[0][6] = true;
        assert_eq!(compute_penalty(&grid).adjacent, 66);
    }

    #[test]
    fn test_adjacent_penalty_ignores_short_runs() {
        let grid = TestGrid::from_str("#.#.# .#.#. #.#.# .#.#. #.#.#");
        assert_eq!(compute_penalty(&grid).adjacent, 0);
    }

    #[test]
    fn test_block_penalty() {
        let mut grid = TestGrid::light(3);
        assert_eq!(compute_penalty(&grid).block, 12);
        grid.0[0][0] = true;
        grid.0[1][1] = true;
        grid.0[2][0] = true;
        assert_eq!(compute_penalty(&grid).block, 0);
    }

    #[test]
    fn test_finder_pattern_penalty() {
        let mut grid = TestGrid::light(11);
        assert_eq!(compute_penalty(&grid).finder, 0);
        for (c, b) in "#.###.#....".chars().enumerate() {
            grid.0[0][c] = b == '#';
        }
        assert_eq!(compute_penalty(&grid).finder, 40);
        // Mirrored pattern in a column
        for (r, b) in "....#.###.#".chars().enumerate() {
            grid.0[r][10] = b == '#';
        }
        assert_eq!(compute_penalty(&grid).finder, 80);
    }

    #[test]
    fn test_finder_pattern_penalty_complement() {
        let mut grid = TestGrid(vec![vec![true; 11]; 11]);
        for (c, b) in "#.###.#....".chars().enumerate() {
            grid.0[5][c] = b != '#';
        }
        assert_eq!(compute_penalty(&grid).finder, 40);
    }

    #[test_case(0, 100)]
    #[test_case(1, 70)]
    #[test_case(2, 50)]
    #[test_case(3, 30)]
    #[test_case(4, 10)]
    #[test_case(5, 10)]
    #[test_case(6, 30)]
    #[test_case(7, 50)]
    #[test_case(8, 70)]
    #[test_case(9, 100)]
    fn test_balance_penalty(dark: usize, exp: u32) {
        let mut grid = TestGrid::light(3);
        for i in 0..dark {
            grid.0[i / 3][i % 3] = true;
        }
        assert_eq!(compute_penalty(&grid).balance, exp);
    }

    #[test]
    fn test_penalty_total() {
        let pen = Penalty { adjacent: 1, block: 2, finder: 40, balance: 10 };
        assert_eq!(pen.total(), 53);
        assert_eq!(pen.to_string(), "adjacent 1, block 2, finder 40, balance 10, total 53");
    }
}

// Global constants
//------------------------------------------------------------------------------

static FINDER_WINDOW: usize = 11;

// 1:1:3:1:1 with 4 light modules after or before, plus color inverted forms
static FINDER_PATTERNS: [u16; 4] = [0b10111010000, 0b00001011101, 0b01000101111, 0b11110100010];
