pub use encode::*;

// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use log::debug;

    use super::writer::{pad_remaining_capacity, push_header, push_terminator};
    use crate::common::bitstream::BitStream;
    use crate::common::codec::{EncodingMode, Mode, MODES};
    use crate::common::error::{QRError, QRResult};
    use crate::common::metadata::{ECLevel, Version, VersionInfo};

    // Encodes data into the data codewords of the smallest version that fits
    pub fn encode(
        data: &[u8],
        ecl: ECLevel,
        mode: EncodingMode,
    ) -> QRResult<(BitStream, &'static VersionInfo)> {
        attempt_modes(mode, |m| {
            let seg = pack_segment(data, m)?;
            let info = VersionInfo::find_smallest_version(ecl, m, seg.len())
                .ok_or(QRError::DataTooLong)?;
            Ok((build_payload(data.len(), m, &seg, info), info))
        })
    }

    pub fn encode_with_version(
        data: &[u8],
        ecl: ECLevel,
        mode: EncodingMode,
        ver: Version,
    ) -> QRResult<BitStream> {
        let info = ver.version_info(ecl);
        attempt_modes(mode, |m| {
            let seg = pack_segment(data, m)?;
            let sz = ver.mode_bits() + ver.char_cnt_bits(m) + seg.len();
            if sz > info.data_bit_capacity() {
                return Err(QRError::DataTooLong);
            }
            Ok(build_payload(data.len(), m, &seg, info))
        })
    }

    // Tries each candidate mode in priority order and returns the first success,
    // or the error of the last attempt
    fn attempt_modes<T>(
        mode: EncodingMode,
        mut f: impl FnMut(Mode) -> QRResult<T>,
    ) -> QRResult<T> {
        let candidates: &[Mode] = match mode {
            EncodingMode::Auto => &MODES,
            EncodingMode::Numeric => &[Mode::Numeric],
            EncodingMode::Alphanumeric => &[Mode::Alphanumeric],
            EncodingMode::Byte => &[Mode::Byte],
            EncodingMode::Kanji => return Err(QRError::UnsupportedMode),
        };

        let mut res = Err(QRError::UnsupportedMode);
        for &m in candidates {
            res = f(m);
            match &res {
                Ok(_) => {
                    debug!("Encoded data in {m:?} mode");
                    break;
                }
                Err(e) => debug!("Cannot encode data in {m:?} mode: {e}"),
            }
        }
        res
    }

    // Packs the characters of a single segment, without header
    pub(crate) fn pack_segment(data: &[u8], mode: Mode) -> QRResult<BitStream> {
        if !data.iter().all(|&b| mode.contains(b)) {
            return Err(QRError::InvalidChar);
        }

        let chunk_sz = mode.chunk_size();
        let bit_len = data.chunks(chunk_sz).map(|c| mode.chunk_bit_len(c.len())).sum();
        let mut bs = BitStream::new(bit_len);
        for chunk in data.chunks(chunk_sz) {
            bs.push_bits(mode.encode_chunk(chunk), mode.chunk_bit_len(chunk.len()));
        }
        Ok(bs)
    }

    fn build_payload(
        char_cnt: usize,
        mode: Mode,
        seg: &BitStream,
        info: &VersionInfo,
    ) -> BitStream {
        let mut bs = BitStream::new(info.data_bit_capacity());
        push_header(mode, char_cnt, info.version, &mut bs);
        seg.iter().for_each(|b| bs.push(b));
        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);
        bs
    }

    #[cfg(test)]
    mod encode_tests {
        use test_case::test_case;

        use super::{encode, encode_with_version, pack_segment};
        use crate::common::codec::{EncodingMode, Mode};
        use crate::common::error::QRError;
        use crate::common::metadata::{ECLevel, Version};

        #[test]
        fn test_encode_numeric() {
            let (bs, info) = encode(b"01234567", ECLevel::H, EncodingMode::Numeric).unwrap();
            assert_eq!(*info.version, 1);
            assert_eq!(bs.data(), [16, 32, 12, 86, 97, 128, 236, 17, 236]);
        }

        #[test]
        fn test_encode_alphanumeric() {
            let (bs, info) = encode(b"HELLO WORLD", ECLevel::Q, EncodingMode::Alphanumeric).unwrap();
            assert_eq!(*info.version, 1);
            assert_eq!(bs.data(), [32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236]);
        }

        #[test]
        fn test_encode_byte() {
            let (bs, info) = encode(b"hello world", ECLevel::H, EncodingMode::Byte).unwrap();
            assert_eq!(*info.version, 2);
            assert_eq!(
                bs.data(),
                [64, 182, 134, 86, 198, 198, 242, 7, 118, 247, 38, 198, 64, 236, 17, 236]
            );
        }

        #[test_case("0123456789", Mode::Numeric)]
        #[test_case("HTTP://EXAMPLE.COM/ABC", Mode::Alphanumeric)]
        #[test_case("Hello, world!", Mode::Byte)]
        #[test_case("Grüße 🌎", Mode::Byte)]
        fn test_encode_auto(data: &str, exp_mode: Mode) {
            let (bs, _) = encode(data.as_bytes(), ECLevel::M, EncodingMode::Auto).unwrap();
            assert_eq!(bs.data()[0] >> 4, exp_mode as u8);
        }

        #[test]
        fn test_encode_auto_matches_explicit() {
            let data = b"31415926535";
            let auto = encode(data, ECLevel::L, EncodingMode::Auto).unwrap();
            let explicit = encode(data, ECLevel::L, EncodingMode::Numeric).unwrap();
            assert_eq!(auto, explicit);
        }

        #[test]
        fn test_encode_unicode_char_count() {
            let (bs, _) = encode("é".as_bytes(), ECLevel::L, EncodingMode::Byte).unwrap();
            // Mode 0100, count 00000010, then 0xC3 0xA9
            assert_eq!(&bs.data()[..4], [0b0100_0000, 0b0010_1100, 0b0011_1010, 0b1001_0000]);
        }

        #[test]
        fn test_encode_invalid_char() {
            let res = encode(b"12a4", ECLevel::L, EncodingMode::Numeric);
            assert_eq!(res.unwrap_err(), QRError::InvalidChar);
            let res = encode(b"lower", ECLevel::L, EncodingMode::Alphanumeric);
            assert_eq!(res.unwrap_err(), QRError::InvalidChar);
        }

        #[test]
        fn test_encode_unsupported_mode() {
            let res = encode(b"1234", ECLevel::L, EncodingMode::Kanji);
            assert_eq!(res.unwrap_err(), QRError::UnsupportedMode);
        }

        #[test]
        fn test_encode_too_long() {
            let data = "a".repeat(2954);
            let res = encode(data.as_bytes(), ECLevel::L, EncodingMode::Byte);
            assert_eq!(res.unwrap_err(), QRError::DataTooLong);
            let res = encode(data.as_bytes(), ECLevel::L, EncodingMode::Auto);
            assert_eq!(res.unwrap_err(), QRError::DataTooLong);
        }

        #[test]
        fn test_encode_max_capacity() {
            let data = "a".repeat(2953);
            let (bs, info) = encode(data.as_bytes(), ECLevel::L, EncodingMode::Auto).unwrap();
            assert_eq!(*info.version, 40);
            assert_eq!(bs.len(), info.data_bit_capacity());
        }

        #[test]
        fn test_encode_with_version() {
            let ver = Version::new(9).unwrap();
            let data = "!".repeat(230);
            let bs = encode_with_version(data.as_bytes(), ECLevel::L, EncodingMode::Auto, ver)
                .unwrap();
            assert_eq!(bs.len(), ver.version_info(ECLevel::L).data_bit_capacity());

            let data = "!".repeat(231);
            let res = encode_with_version(data.as_bytes(), ECLevel::L, EncodingMode::Auto, ver);
            assert_eq!(res.unwrap_err(), QRError::DataTooLong);
        }

        #[test]
        fn test_pack_numeric_segment() {
            let bs = pack_segment(b"01234567", Mode::Numeric).unwrap();
            assert_eq!(bs.len(), 27);
            assert_eq!(bs.data(), [0b00000011, 0b00010101, 0b10011000, 0b01100000]);
            let bs = pack_segment(b"8", Mode::Numeric).unwrap();
            assert_eq!(bs.data(), [0b10000000]);
        }

        #[test]
        fn test_pack_alphanumeric_segment() {
            let bs = pack_segment(b"AC-42", Mode::Alphanumeric).unwrap();
            assert_eq!(bs.len(), 28);
            assert_eq!(bs.data(), [0b00111001, 0b11011100, 0b11100100, 0b00100000]);
        }

        #[test]
        fn test_pack_byte_segment() {
            let bs = pack_segment(b"a", Mode::Byte).unwrap();
            assert_eq!(bs.data(), [0b01100001]);
        }

        #[test]
        fn test_pack_kanji_segment_rejected() {
            assert_eq!(pack_segment(b"abc", Mode::Kanji).unwrap_err(), QRError::InvalidChar);
        }
    }
}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use crate::common::bitstream::BitStream;
    use crate::common::codec::{Mode, PADDING_CODEWORDS};
    use crate::common::metadata::Version;

    pub fn push_header(mode: Mode, char_cnt: usize, ver: Version, out: &mut BitStream) {
        out.push_bits(mode as u8, ver.mode_bits());
        let len_bits = ver.char_cnt_bits(mode);
        debug_assert!(
            char_cnt < (1 << len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {len_bits}"
        );
        out.push_bits(char_cnt as u16, len_bits);
    }

    // Up to four zero bits, truncated when the symbol is already full
    pub fn push_terminator(out: &mut BitStream) {
        let room = out.capacity() - out.len();
        out.push_bits(0u8, room.min(4));
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let fill = (8 - (out.len() & 7)) & 7;
        out.push_bits(0u8, fill);
    }

    fn push_padding_codewords(out: &mut BitStream) {
        debug_assert!(out.len() & 7 == 0, "Pad codewords must start on a byte boundary");

        let room = (out.capacity() - out.len()) >> 3;
        let pads: Vec<u8> = PADDING_CODEWORDS.iter().copied().cycle().take(room).collect();
        out.extend(&pads);
    }

    #[cfg(test)]
    mod writer_tests {
        use super::{push_header, push_padding_bits, push_padding_codewords, push_terminator};
        use crate::common::bitstream::BitStream;
        use crate::common::codec::{Mode, PADDING_CODEWORDS};
        use crate::common::metadata::{ECLevel, Version};

        #[test]
        fn test_push_header_v1() {
            let ver = Version::new(1).unwrap();
            let exp_vecs: Vec<Vec<u8>> = vec![
                vec![0b00011111, 0b11111100],
                vec![0b00101111, 0b11111000],
                vec![0b01001111, 0b11110000],
            ];
            let modes = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
            let counts = [1023, 511, 255];
            for ((mode, cnt), exp_vec) in modes.iter().zip(counts.iter()).zip(exp_vecs.iter()) {
                let mut bs = BitStream::new(152);
                push_header(*mode, *cnt, ver, &mut bs);
                assert_eq!(bs.data(), exp_vec);
            }
        }

        #[test]
        fn test_push_header_v27() {
            let ver = Version::new(27).unwrap();
            let exp_vecs: Vec<Vec<u8>> = vec![
                vec![0b00011111, 0b11111111, 0b11000000],
                vec![0b00101111, 0b11111111, 0b10000000],
                vec![0b01001111, 0b11111111, 0b11110000],
            ];
            let modes = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
            let counts = [16383, 8191, 65535];
            for ((mode, cnt), exp_vec) in modes.iter().zip(counts.iter()).zip(exp_vecs.iter()) {
                let mut bs = BitStream::new(64);
                push_header(*mode, *cnt, ver, &mut bs);
                assert_eq!(bs.data(), exp_vec);
            }
        }

        #[test]
        fn test_push_terminator() {
            let info = Version::new(1).unwrap().version_info(ECLevel::L);
            let bit_capacity = info.data_bit_capacity();
            let capacity = bit_capacity >> 3;
            let mut bs = BitStream::new(bit_capacity);
            bs.push_bits(0b1u8, 1);
            push_terminator(&mut bs);
            assert_eq!(bs.data(), vec![0b10000000]);
            assert_eq!(bs.len(), 5);
            bs.push_bits(0b111u8, 3);
            for _ in 0..capacity - 2 {
                bs.push_bits(0b11111111u8, 8);
            }
            bs.push_bits(0b11111u8, 5);
            push_terminator(&mut bs);
            assert_eq!(bs.len(), bit_capacity);
        }

        #[test]
        fn test_push_padding_bits() {
            let mut bs = BitStream::new(152);
            bs.push_bits(1u8, 1);
            push_padding_bits(&mut bs);
            assert_eq!(bs.data(), vec![0b10000000]);
            assert_eq!(bs.len() & 7, 0);
        }

        #[test]
        fn test_push_padding_codewords() {
            let bit_capacity = Version::new(1).unwrap().version_info(ECLevel::L).data_bit_capacity();
            let mut bs = BitStream::new(bit_capacity);
            bs.push_bits(1u8, 1);
            push_padding_bits(&mut bs);
            push_padding_codewords(&mut bs);
            let mut output = vec![0b10000000];
            output.extend(PADDING_CODEWORDS.iter().cycle().take(18));
            assert_eq!(bs.data(), output);
        }
    }
}
