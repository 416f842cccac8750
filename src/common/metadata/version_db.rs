use super::{ECLevel, Version};
use crate::common::codec::Mode;

// Block layout
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct BlockGroup {
    pub count: usize,
    pub data_codewords: usize,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct VersionInfo {
    pub version: Version,
    pub ec_level: ECLevel,
    pub ecc_per_block: usize,
    pub group1: BlockGroup,
    pub group2: BlockGroup,
}

impl VersionInfo {
    const fn new(
        version: u8,
        ec_level: ECLevel,
        ecc_per_block: usize,
        count1: usize,
        data1: usize,
        count2: usize,
        data2: usize,
    ) -> Self {
        Self {
            version: Version(version),
            ec_level,
            ecc_per_block,
            group1: BlockGroup { count: count1, data_codewords: data1 },
            group2: BlockGroup { count: count2, data_codewords: data2 },
        }
    }

    pub fn width(&self) -> usize {
        self.version.width()
    }

    pub fn total_blocks(&self) -> usize {
        self.group1.count + self.group2.count
    }

    pub fn total_data_bytes(&self) -> usize {
        self.group1.count * self.group1.data_codewords
            + self.group2.count * self.group2.data_codewords
    }

    pub fn data_bit_capacity(&self) -> usize {
        self.total_data_bytes() << 3
    }

    pub fn max_block_data_codewords(&self) -> usize {
        self.group1.data_codewords.max(self.group2.data_codewords)
    }

    /// Number of codeword errors the symbol can correct. The smallest
    /// symbols reserve a few ECC codewords for misdecode protection.
    pub fn error_correction_capacity(&self) -> usize {
        let p = match (*self.version, self.ec_level) {
            (1, ECLevel::L) => 3,
            (1, ECLevel::M) | (2, ECLevel::L) => 2,
            (1, _) | (3, ECLevel::L) => 1,
            _ => 0,
        };
        let ec_bytes = self.total_blocks() * self.ecc_per_block;
        (ec_bytes - p) / 2
    }

    // Scans versions in ascending order, so the first fit is the smallest
    pub fn find_smallest_version(
        ec_level: ECLevel,
        mode: Mode,
        data_bits: usize,
    ) -> Option<&'static VersionInfo> {
        let data_bits = data_bits + Version::MIN.mode_bits();
        Version::all().map(|v| v.version_info(ec_level)).find(|info| {
            info.data_bit_capacity() >= data_bits + info.version.char_cnt_bits(mode)
        })
    }
}


// Global constants
//------------------------------------------------------------------------------

pub(super) static ALIGNMENT_PATTERN_POSITIONS: [&[i16]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

pub(super) static VERSION_INFOS: [VersionInfo; 160] = [
    VersionInfo::new(1, ECLevel::L, 7, 1, 19, 0, 0),
    VersionInfo::new(1, ECLevel::M, 10, 1, 16, 0, 0),
    VersionInfo::new(1, ECLevel::Q, 13, 1, 13, 0, 0),
    VersionInfo::new(1, ECLevel::H, 17, 1, 9, 0, 0),
    VersionInfo::new(2, ECLevel::L, 10, 1, 34, 0, 0),
    VersionInfo::new(2, ECLevel::M, 16, 1, 28, 0, 0),
    VersionInfo::new(2, ECLevel::Q, 22, 1, 22, 0, 0),
    VersionInfo::new(2, ECLevel::H, 28, 1, 16, 0, 0),
    VersionInfo::new(3, ECLevel::L, 15, 1, 55, 0, 0),
    VersionInfo::new(3, ECLevel::M, 26, 1, 44, 0, 0),
    VersionInfo::new(3, ECLevel::Q, 18, 2, 17, 0, 0),
    VersionInfo::new(3, ECLevel::H, 22, 2, 13, 0, 0),
    VersionInfo::new(4, ECLevel::L, 20, 1, 80, 0, 0),
    VersionInfo::new(4, ECLevel::M, 18, 2, 32, 0, 0),
    VersionInfo::new(4, ECLevel::Q, 26, 2, 24, 0, 0),
    VersionInfo::new(4, ECLevel::H, 16, 4, 9, 0, 0),
    VersionInfo::new(5, ECLevel::L, 26, 1, 108, 0, 0),
    VersionInfo::new(5, ECLevel::M, 24, 2, 43, 0, 0),
    VersionInfo::new(5, ECLevel::Q, 18, 2, 15, 2, 16),
    VersionInfo::new(5, ECLevel::H, 22, 2, 11, 2, 12),
    VersionInfo::new(6, ECLevel::L, 18, 2, 68, 0, 0),
    VersionInfo::new(6, ECLevel::M, 16, 4, 27, 0, 0),
    VersionInfo::new(6, ECLevel::Q, 24, 4, 19, 0, 0),
    VersionInfo::new(6, ECLevel::H, 28, 4, 15, 0, 0),
    VersionInfo::new(7, ECLevel::L, 20, 2, 78, 0, 0),
    VersionInfo::new(7, ECLevel::M, 18, 4, 31, 0, 0),
    VersionInfo::new(7, ECLevel::Q, 18, 2, 14, 4, 15),
    VersionInfo::new(7, ECLevel::H, 26, 4, 13, 1, 14),
    VersionInfo::new(8, ECLevel::L, 24, 2, 97, 0, 0),
    VersionInfo::new(8, ECLevel::M, 22, 2, 38, 2, 39),
    VersionInfo::new(8, ECLevel::Q, 22, 4, 18, 2, 19),
    VersionInfo::new(8, ECLevel::H, 26, 4, 14, 2, 15),
    VersionInfo::new(9, ECLevel::L, 30, 2, 116, 0, 0),
    VersionInfo::new(9, ECLevel::M, 22, 3, 36, 2, 37),
    VersionInfo::new(9, ECLevel::Q, 20, 4, 16, 4, 17),
    VersionInfo::new(9, ECLevel::H, 24, 4, 12, 4, 13),
    VersionInfo::new(10, ECLevel::L, 18, 2, 68, 2, 69),
    VersionInfo::new(10, ECLevel::M, 26, 4, 43, 1, 44),
    VersionInfo::new(10, ECLevel::Q, 24, 6, 19, 2, 20),
    VersionInfo::new(10, ECLevel::H, 28, 6, 15, 2, 16),
    VersionInfo::new(11, ECLevel::L, 20, 4, 81, 0, 0),
    VersionInfo::new(11, ECLevel::M, 30, 1, 50, 4, 51),
    VersionInfo::new(11, ECLevel::Q, 28, 4, 22, 4, 23),
    VersionInfo::new(11, ECLevel::H, 24, 3, 12, 8, 13),
    VersionInfo::new(12, ECLevel::L, 24, 2, 92, 2, 93),
    VersionInfo::new(12, ECLevel::M, 22, 6, 36, 2, 37),
    VersionInfo::new(12, ECLevel::Q, 26, 4, 20, 6, 21),
    VersionInfo::new(12, ECLevel::H, 28, 7, 14, 4, 15),
    VersionInfo::new(13, ECLevel::L, 26, 4, 107, 0, 0),
    VersionInfo::new(13, ECLevel::M, 22, 8, 37, 1, 38),
    VersionInfo::new(13, ECLevel::Q, 24, 8, 20, 4, 21),
    VersionInfo::new(13, ECLevel::H, 22, 12, 11, 4, 12),
    VersionInfo::new(14, ECLevel::L, 30, 3, 115, 1, 116),
    VersionInfo::new(14, ECLevel::M, 24, 4, 40, 5, 41),
    VersionInfo::new(14, ECLevel::Q, 20, 11, 16, 5, 17),
    VersionInfo::new(14, ECLevel::H, 24, 11, 12, 5, 13),
    VersionInfo::new(15, ECLevel::L, 22, 5, 87, 1, 88),
    VersionInfo::new(15, ECLevel::M, 24, 5, 41, 5, 42),
    VersionInfo::new(15, ECLevel::Q, 30, 5, 24, 7, 25),
    VersionInfo::new(15, ECLevel::H, 24, 11, 12, 7, 13),
    VersionInfo::new(16, ECLevel::L, 24, 5, 98, 1, 99),
    VersionInfo::new(16, ECLevel::M, 28, 7, 45, 3, 46),
    VersionInfo::new(16, ECLevel::Q, 24, 15, 19, 2, 20),
    VersionInfo::new(16, ECLevel::H, 30, 3, 15, 13, 16),
    VersionInfo::new(17, ECLevel::L, 28, 1, 107, 5, 108),
    VersionInfo::new(17, ECLevel::M, 28, 10, 46, 1, 47),
    VersionInfo::new(17, ECLevel::Q, 28, 1, 22, 15, 23),
    VersionInfo::new(17, ECLevel::H, 28, 2, 14, 17, 15),
    VersionInfo::new(18, ECLevel::L, 30, 5, 120, 1, 121),
    VersionInfo::new(18, ECLevel::M, 26, 9, 43, 4, 44),
    VersionInfo::new(18, ECLevel::Q, 28, 17, 22, 1, 23),
    VersionInfo::new(18, ECLevel::H, 28, 2, 14, 19, 15),
    VersionInfo::new(19, ECLevel::L, 28, 3, 113, 4, 114),
    VersionInfo::new(19, ECLevel::M, 26, 3, 44, 11, 45),
    VersionInfo::new(19, ECLevel::Q, 26, 17, 21, 4, 22),
    VersionInfo::new(19, ECLevel::H, 26, 9, 13, 16, 14),
    VersionInfo::new(20, ECLevel::L, 28, 3, 107, 5, 108),
    VersionInfo::new(20, ECLevel::M, 26, 3, 41, 13, 42),
    VersionInfo::new(20, ECLevel::Q, 30, 15, 24, 5, 25),
    VersionInfo::new(20, ECLevel::H, 28, 15, 15, 10, 16),
    VersionInfo::new(21, ECLevel::L, 28, 4, 116, 4, 117),
    VersionInfo::new(21, ECLevel::M, 26, 17, 42, 0, 0),
    VersionInfo::new(21, ECLevel::Q, 28, 17, 22, 6, 23),
    VersionInfo::new(21, ECLevel::H, 30, 19, 16, 6, 17),
    VersionInfo::new(22, ECLevel::L, 28, 2, 111, 7, 112),
    VersionInfo::new(22, ECLevel::M, 28, 17, 46, 0, 0),
    VersionInfo::new(22, ECLevel::Q, 30, 7, 24, 16, 25),
    VersionInfo::new(22, ECLevel::H, 24, 34, 13, 0, 0),
    VersionInfo::new(23, ECLevel::L, 30, 4, 121, 5, 122),
    VersionInfo::new(23, ECLevel::M, 28, 4, 47, 14, 48),
    VersionInfo::new(23, ECLevel::Q, 30, 11, 24, 14, 25),
    VersionInfo::new(23, ECLevel::H, 30, 16, 15, 14, 16),
    VersionInfo::new(24, ECLevel::L, 30, 6, 117, 4, 118),
    VersionInfo::new(24, ECLevel::M, 28, 6, 45, 14, 46),
    VersionInfo::new(24, ECLevel::Q, 30, 11, 24, 16, 25),
    VersionInfo::new(24, ECLevel::H, 30, 30, 16, 2, 17),
    VersionInfo::new(25, ECLevel::L, 26, 8, 106, 4, 107),
    VersionInfo::new(25, ECLevel::M, 28, 8, 47, 13, 48),
    VersionInfo::new(25, ECLevel::Q, 30, 7, 24, 22, 25),
    VersionInfo::new(25, ECLevel::H, 30, 22, 15, 13, 16),
    VersionInfo::new(26, ECLevel::L, 28, 10, 114, 2, 115),
    VersionInfo::new(26, ECLevel::M, 28, 19, 46, 4, 47),
    VersionInfo::new(26, ECLevel::Q, 28, 28, 22, 6, 23),
    VersionInfo::new(26, ECLevel::H, 30, 33, 16, 4, 17),
    VersionInfo::new(27, ECLevel::L, 30, 8, 122, 4, 123),
    VersionInfo::new(27, ECLevel::M, 28, 22, 45, 3, 46),
    VersionInfo::new(27, ECLevel::Q, 30, 8, 23, 26, 24),
    VersionInfo::new(27, ECLevel::H, 30, 12, 15, 28, 16),
    VersionInfo::new(28, ECLevel::L, 30, 3, 117, 10, 118),
    VersionInfo::new(28, ECLevel::M, 28, 3, 45, 23, 46),
    VersionInfo::new(28, ECLevel::Q, 30, 4, 24, 31, 25),
    VersionInfo::new(28, ECLevel::H, 30, 11, 15, 31, 16),
    VersionInfo::new(29, ECLevel::L, 30, 7, 116, 7, 117),
    VersionInfo::new(29, ECLevel::M, 28, 21, 45, 7, 46),
    VersionInfo::new(29, ECLevel::Q, 30, 1, 23, 37, 24),
    VersionInfo::new(29, ECLevel::H, 30, 19, 15, 26, 16),
    VersionInfo::new(30, ECLevel::L, 30, 5, 115, 10, 116),
    VersionInfo::new(30, ECLevel::M, 28, 19, 47, 10, 48),
    VersionInfo::new(30, ECLevel::Q, 30, 15, 24, 25, 25),
    VersionInfo::new(30, ECLevel::H, 30, 23, 15, 25, 16),
    VersionInfo::new(31, ECLevel::L, 30, 13, 115, 3, 116),
    VersionInfo::new(31, ECLevel::M, 28, 2, 46, 29, 47),
    VersionInfo::new(31, ECLevel::Q, 30, 42, 24, 1, 25),
    VersionInfo::new(31, ECLevel::H, 30, 23, 15, 28, 16),
    VersionInfo::new(32, ECLevel::L, 30, 17, 115, 0, 0),
    VersionInfo::new(32, ECLevel::M, 28, 10, 46, 23, 47),
    VersionInfo::new(32, ECLevel::Q, 30, 10, 24, 35, 25),
    VersionInfo::new(32, ECLevel::H, 30, 19, 15, 35, 16),
    VersionInfo::new(33, ECLevel::L, 30, 17, 115, 1, 116),
    VersionInfo::new(33, ECLevel::M, 28, 14, 46, 21, 47),
    VersionInfo::new(33, ECLevel::Q, 30, 29, 24, 19, 25),
    VersionInfo::new(33, ECLevel::H, 30, 11, 15, 46, 16),
    VersionInfo::new(34, ECLevel::L, 30, 13, 115, 6, 116),
    VersionInfo::new(34, ECLevel::M, 28, 14, 46, 23, 47),
    VersionInfo::new(34, ECLevel::Q, 30, 44, 24, 7, 25),
    VersionInfo::new(34, ECLevel::H, 30, 59, 16, 1, 17),
    VersionInfo::new(35, ECLevel::L, 30, 12, 121, 7, 122),
    VersionInfo::new(35, ECLevel::M, 28, 12, 47, 26, 48),
    VersionInfo::new(35, ECLevel::Q, 30, 39, 24, 14, 25),
    VersionInfo::new(35, ECLevel::H, 30, 22, 15, 41, 16),
    VersionInfo::new(36, ECLevel::L, 30, 6, 121, 14, 122),
    VersionInfo::new(36, ECLevel::M, 28, 6, 47, 34, 48),
    VersionInfo::new(36, ECLevel::Q, 30, 46, 24, 10, 25),
    VersionInfo::new(36, ECLevel::H, 30, 2, 15, 64, 16),
    VersionInfo::new(37, ECLevel::L, 30, 17, 122, 4, 123),
    VersionInfo::new(37, ECLevel::M, 28, 29, 46, 14, 47),
    VersionInfo::new(37, ECLevel::Q, 30, 49, 24, 10, 25),
    VersionInfo::new(37, ECLevel::H, 30, 24, 15, 46, 16),
    VersionInfo::new(38, ECLevel::L, 30, 4, 122, 18, 123),
    VersionInfo::new(38, ECLevel::M, 28, 13, 46, 32, 47),
    VersionInfo::new(38, ECLevel::Q, 30, 48, 24, 14, 25),
    VersionInfo::new(38, ECLevel::H, 30, 42, 15, 32, 16),
    VersionInfo::new(39, ECLevel::L, 30, 20, 117, 4, 118),
    VersionInfo::new(39, ECLevel::M, 28, 40, 47, 7, 48),
    VersionInfo::new(39, ECLevel::Q, 30, 43, 24, 22, 25),
    VersionInfo::new(39, ECLevel::H, 30, 10, 15, 67, 16),
    VersionInfo::new(40, ECLevel::L, 30, 19, 118, 6, 119),
    VersionInfo::new(40, ECLevel::M, 28, 18, 47, 31, 48),
    VersionInfo::new(40, ECLevel::Q, 30, 34, 24, 34, 25),
    VersionInfo::new(40, ECLevel::H, 30, 20, 15, 61, 16),
];
