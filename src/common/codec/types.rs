// Mode
//------------------------------------------------------------------------------

// Segment modes as written in the mode indicator
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
    Kanji = 0b1000,
}

impl Mode {
    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => ALPHANUMERIC_CHARSET.contains(&byte),
            Self::Byte => true,
            Self::Kanji => false,
        }
    }

    #[inline]
    fn numeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Numeric.contains(char), "Invalid numeric data: {char}");
        (char - b'0') as u16
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
        ALPHANUMERIC_CHARSET.iter().position(|&c| c == char).unwrap_or_default() as u16
    }

    // Kanji never reaches here: no byte is in its set, so packing rejects it first
    pub(crate) fn encode_chunk(&self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + Self::numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte conversion: {len}");
                data[0] as u16
            }
            Self::Kanji => unreachable!("Kanji chunks are never encoded"),
        }
    }

    // Bit length of a full or trailing chunk
    pub(crate) fn chunk_bit_len(&self, chunk_len: usize) -> usize {
        match self {
            Self::Numeric => (chunk_len * 10 + 2) / 3,
            Self::Alphanumeric => (chunk_len * 11 + 1) / 2,
            Self::Byte => 8,
            Self::Kanji => 13,
        }
    }

    pub(crate) fn chunk_size(&self) -> usize {
        match self {
            Self::Numeric => 3,
            Self::Alphanumeric => 2,
            Self::Byte | Self::Kanji => 1,
        }
    }
}

#[cfg(test)]
mod mode_tests {
    use test_case::test_case;

    use super::Mode;

    #[test]
    fn test_contains() {
        assert!(Mode::Numeric.contains(b'7'));
        assert!(!Mode::Numeric.contains(b'A'));
        assert!(Mode::Alphanumeric.contains(b'$'));
        assert!(Mode::Alphanumeric.contains(b'Z'));
        assert!(!Mode::Alphanumeric.contains(b'a'));
        assert!(Mode::Byte.contains(0xFF));
    }

    #[test_case(Mode::Numeric, "012", 12)]
    #[test_case(Mode::Numeric, "67", 67)]
    #[test_case(Mode::Alphanumeric, "AC", 10 * 45 + 12)]
    #[test_case(Mode::Alphanumeric, ":", 44)]
    #[test_case(Mode::Byte, "a", 97)]
    fn test_encode_chunk(mode: Mode, chunk: &str, exp: u16) {
        assert_eq!(mode.encode_chunk(chunk.as_bytes()), exp);
    }

    #[test_case(Mode::Numeric, 3, 10)]
    #[test_case(Mode::Numeric, 2, 7)]
    #[test_case(Mode::Numeric, 1, 4)]
    #[test_case(Mode::Alphanumeric, 2, 11)]
    #[test_case(Mode::Alphanumeric, 1, 6)]
    fn test_chunk_bit_len(mode: Mode, len: usize, exp: usize) {
        assert_eq!(mode.chunk_bit_len(len), exp);
    }
}

// Requested encoding
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Hash)]
pub enum EncodingMode {
    #[default]
    Auto,
    Numeric,
    Alphanumeric,
    // UTF-8 bytes
    Byte,
    Kanji,
}

// Global constants
//------------------------------------------------------------------------------

pub static ALPHANUMERIC_CHARSET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

// Attempt order for automatic mode selection
pub static MODES: [Mode; 3] = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
