use std::ops::{Deref, Not};

use crate::common::bitstream::BitStream;
use crate::common::iter::EncRegionIter;
use crate::common::mask::{MaskPattern, ModuleGrid};
use crate::common::metadata::{
    format_info, ECLevel, Version, FORMAT_INFO_BIT_LEN, VERSION_INFO_BIT_LEN,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Color {
    Light,
    Dark,
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl Color {
    pub fn from_bit(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn select<T>(self, dark: T, light: T) -> T {
        match self {
            Self::Dark => dark,
            Self::Light => light,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Color {
        match self {
            Self::Empty => &Color::Light,
            Self::Func(c) | Self::Version(c) | Self::Format(c) | Self::Data(c) => c,
        }
    }
}

/// Construction time symbol. Every module remembers what wrote it, which
/// doubles as the occupancy grid while data is being placed.
#[derive(Debug, Clone)]
pub struct QR {
    grid: Box<[Module]>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
}

impl QR {
    pub fn new(ver: Version, ecl: ECLevel) -> Self {
        let w = ver.width();
        Self { grid: vec![Module::Empty; w * w].into_boxed_slice(), w, ver, ecl }
    }

    pub fn grid(&self) -> &[Module] {
        &self.grid
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|m| m.select(true, false)).count()
    }

    #[cfg(test)]
    pub fn count_empty_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(m, Module::Empty)).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(clr) => clr.select('f', 'F'),
                    Module::Version(clr) => clr.select('v', 'V'),
                    Module::Format(clr) => clr.select('m', 'M'),
                    Module::Data(clr) => clr.select('d', 'D'),
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    // Negative coordinates count back from the bottom or right edge
    fn index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        assert!((-w..w).contains(&r), "Row {r} outside a {w} module grid");
        assert!((-w..w).contains(&c), "Column {c} outside a {w} module grid");
        r.rem_euclid(w) as usize * self.w + c.rem_euclid(w) as usize
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.index(r, c)]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        let i = self.index(r, c);
        self.grid[i] = module;
    }

    fn is_empty_at(&self, r: i16, c: i16) -> bool {
        matches!(self.get(r, c), Module::Empty)
    }
}

impl ModuleGrid for QR {
    fn width(&self) -> usize {
        self.w
    }

    fn is_dark(&self, r: usize, c: usize) -> bool {
        *self.grid[r * self.w + c] == Color::Dark
    }
}


// Finders
//------------------------------------------------------------------------------

// Centres of the top left, top right and bottom left finders
static FINDER_CENTRES: [(i16, i16); 3] = [(3, 3), (3, -4), (-4, 3)];

impl QR {
    fn draw_finder_patterns(&mut self) {
        for (r, c) in FINDER_CENTRES {
            self.draw_finder_pattern_at(r, c);
        }
    }

    // 7x7 rings plus the light separator on the sides facing the symbol
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let rows = if r > 0 { -3..=4i16 } else { -4..=3 };
        let cols = if c > 0 { -3..=4i16 } else { -4..=3 };
        for i in rows {
            for j in cols.clone() {
                let ring = i.abs().max(j.abs());
                self.set(r + i, c + j, Module::Func(Color::from_bit(ring != 2 && ring != 4)));
            }
        }
    }
}


// Timing
//------------------------------------------------------------------------------

impl QR {
    // Row and column 6 alternate starting dark; occupied modules are left alone
    fn draw_timing_pattern(&mut self) {
        for i in 0..self.w as i16 {
            self.draw_timing_module(TIMING_LINE, i);
            self.draw_timing_module(i, TIMING_LINE);
        }
    }

    fn draw_timing_module(&mut self, r: i16, c: i16) {
        if self.is_empty_at(r, c) {
            self.set(r, c, Module::Func(Color::from_bit((r + c) & 1 == 0)));
        }
    }
}


// Alignment
//------------------------------------------------------------------------------

impl QR {
    // Every pairing of the version's centre coordinates, except those that
    // would land on a finder
    fn draw_alignment_patterns(&mut self) {
        let centres = self.ver.alignment_pattern();
        for &r in centres {
            for &c in centres {
                if self.is_empty_at(r, c) {
                    self.draw_alignment_pattern_at(r, c);
                }
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        for i in -2..=2i16 {
            for j in -2..=2i16 {
                let ring = i.abs().max(j.abs());
                self.set(r + i, c + j, Module::Func(Color::from_bit(ring != 1)));
            }
        }
    }
}


// Function patterns
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_alignment_patterns();
        self.draw_timing_pattern();
    }
}


// Format and version information
//------------------------------------------------------------------------------

impl QR {
    fn reserve_format_area(&mut self) {
        self.draw_format_info((1 << FORMAT_INFO_BIT_LEN) - 1);
    }

    fn draw_format_info(&mut self, info: u32) {
        for coords in [&FORMAT_INFO_COORDS_QR_MAIN, &FORMAT_INFO_COORDS_QR_SIDE] {
            self.draw_number(info, Module::Format, coords);
        }
        // Dark module beside the bottom left finder
        self.set(-8, 8, Module::Format(Color::Dark));
    }

    fn draw_version_info(&mut self) {
        if let Some(info) = self.ver.info() {
            for coords in [&VERSION_INFO_COORDS_TR, &VERSION_INFO_COORDS_BL] {
                self.draw_number(info, Module::Version, coords);
            }
        }
    }

    // Coords are listed from the least significant bit
    fn draw_number(&mut self, number: u32, kind: fn(Color) -> Module, coords: &[(i16, i16)]) {
        for (i, &(r, c)) in coords.iter().enumerate() {
            self.set(r, c, kind(Color::from_bit((number >> i) & 1 == 1)));
        }
    }
}


// Data placement
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_encoding_region(&mut self, payload: &BitStream) {
        self.reserve_format_area();
        self.draw_version_info();
        self.draw_payload(payload);

        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module found after placement");
    }

    // Modules left over after the last codeword hold light remainder bits
    fn draw_payload(&mut self, payload: &BitStream) {
        let mut bits = payload.iter();
        for (r, c) in EncRegionIter::new(self.ver) {
            if self.is_empty_at(r, c) {
                let dark = bits.next().unwrap_or(false);
                self.set(r, c, Module::Data(Color::from_bit(dark)));
            }
        }
    }

    /// Flips data modules selected by the pattern and rewrites the format
    /// information for it. Applying the same pattern twice restores the data.
    pub fn apply_mask(&mut self, pattern: MaskPattern) {
        let flips = pattern.mask_functions();
        let w = self.w;
        for (i, module) in self.grid.iter_mut().enumerate() {
            if let Module::Data(clr) = module {
                if flips((i / w) as i16, (i % w) as i16) {
                    *clr = !*clr;
                }
            }
        }
        self.draw_format_info(format_info(self.ecl, pattern));
    }
}


// Coordinate tables
//------------------------------------------------------------------------------

static TIMING_LINE: i16 = 6;

static FORMAT_INFO_COORDS_QR_MAIN: [(i16, i16); FORMAT_INFO_BIT_LEN] = [
    (0, 8),
    (1, 8),
    (2, 8),
    (3, 8),
    (4, 8),
    (5, 8),
    (7, 8),
    (8, 8),
    (8, 7),
    (8, 5),
    (8, 4),
    (8, 3),
    (8, 2),
    (8, 1),
    (8, 0),
];

static FORMAT_INFO_COORDS_QR_SIDE: [(i16, i16); FORMAT_INFO_BIT_LEN] = [
    (8, -1),
    (8, -2),
    (8, -3),
    (8, -4),
    (8, -5),
    (8, -6),
    (8, -7),
    (8, -8),
    (-7, 8),
    (-6, 8),
    (-5, 8),
    (-4, 8),
    (-3, 8),
    (-2, 8),
    (-1, 8),
];

static VERSION_INFO_COORDS_TR: [(i16, i16); VERSION_INFO_BIT_LEN] = [
    (0, -11),
    (0, -10),
    (0, -9),
    (1, -11),
    (1, -10),
    (1, -9),
    (2, -11),
    (2, -10),
    (2, -9),
    (3, -11),
    (3, -10),
    (3, -9),
    (4, -11),
    (4, -10),
    (4, -9),
    (5, -11),
    (5, -10),
    (5, -9),
];

static VERSION_INFO_COORDS_BL: [(i16, i16); VERSION_INFO_BIT_LEN] = [
    (-11, 0),
    (-10, 0),
    (-9, 0),
    (-11, 1),
    (-10, 1),
    (-9, 1),
    (-11, 2),
    (-10, 2),
    (-9, 2),
    (-11, 3),
    (-10, 3),
    (-9, 3),
    (-11, 4),
    (-10, 4),
    (-9, 4),
    (-11, 5),
    (-10, 5),
    (-9, 5),
];
