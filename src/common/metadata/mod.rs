mod version_db;

pub use version_db::{BlockGroup, VersionInfo};

use std::ops::Deref;

use super::codec::Mode;
use super::error::{QRError, QRResult};
use super::mask::MaskPattern;
use version_db::{ALIGNMENT_PATTERN_POSITIONS, VERSION_INFOS};

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    // Level indicator as written in the format information
    pub const fn format_bits(self) -> u32 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Deref for Version {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub fn new(version: u8) -> QRResult<Self> {
        if !(1..=40).contains(&version) {
            return Err(QRError::InvalidVersion);
        }
        Ok(Self(version))
    }

    pub fn all() -> impl Iterator<Item = Version> {
        (1..=40).map(Version)
    }

    pub const fn width(self) -> usize {
        (self.0 as usize - 1) * 4 + 21
    }

    pub const fn mode_bits(self) -> usize {
        4
    }

    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        let band = match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match mode {
            Mode::Numeric => [10, 12, 14][band],
            Mode::Alphanumeric => [9, 11, 13][band],
            Mode::Byte => [8, 16, 16][band],
            Mode::Kanji => [8, 10, 12][band],
        }
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_PATTERN_POSITIONS[self.0 as usize - 1]
    }

    // Modules left for codewords once every function pattern and info area is reserved
    pub fn total_modules(self) -> usize {
        let v = self.0 as usize;
        let mut res = (16 * v + 128) * v + 64;
        if v >= 2 {
            let align_cnt = v / 7 + 2;
            res -= (25 * align_cnt - 10) * align_cnt - 55;
            if v >= 7 {
                res -= 36;
            }
        }
        res
    }

    pub fn total_codewords(self) -> usize {
        self.total_modules() >> 3
    }

    pub fn remainder_bits(self) -> usize {
        self.total_modules() & 7
    }

    // 18 bit version information, only present from version 7 onwards
    pub fn info(self) -> Option<u32> {
        match self.0 {
            1..=6 => None,
            v => Some(VERSION_INFO_BITS[v as usize - 7]),
        }
    }

    pub fn version_info(self, ec_level: ECLevel) -> &'static VersionInfo {
        &VERSION_INFOS[(self.0 as usize - 1) * 4 + ec_level as usize]
    }
}

// Format information
//------------------------------------------------------------------------------

pub fn format_info(ec_level: ECLevel, mask: MaskPattern) -> u32 {
    let data = ec_level.format_bits() << 3 | *mask as u32;
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_INFO_GENERATOR);
    }
    (data << 10 | rem) ^ FORMAT_INFO_MASK
}


// Global constants
//------------------------------------------------------------------------------

static FORMAT_INFO_GENERATOR: u32 = 0x537;

static FORMAT_INFO_MASK: u32 = 0x5412;

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const VERSION_INFO_BIT_LEN: usize = 18;

static VERSION_INFO_BITS: [u32; 34] = [
    0x07C94, 0x085BC, 0x09A99, 0x0A4D3, 0x0BBF6, 0x0C762, 0x0D847, 0x0E60D, 0x0F928, 0x10B78,
    0x1145D, 0x12A17, 0x13532, 0x149A6, 0x15683, 0x168C9, 0x177EC, 0x18EC4, 0x191E1, 0x1AFAB,
    0x1B08E, 0x1CC1A, 0x1D33F, 0x1ED75, 0x1F250, 0x209D5, 0x216F0, 0x228BA, 0x2379F, 0x24B0B,
    0x2542E, 0x26A64, 0x27541, 0x28C69,
];
