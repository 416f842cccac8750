use std::ops::Deref;

use super::{ReedSolomonEncoder, MAX_BLOCK_SIZE};
use crate::common::error::{QRError, QRResult};
use crate::common::metadata::VersionInfo;

// Block
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Block {
    data: [u8; MAX_BLOCK_SIZE],
    // Block length
    len: usize,
    // Data length
    dlen: usize,
}

impl Block {
    pub fn new(raw: &[u8], ecc_len: usize, rs: &ReedSolomonEncoder) -> QRResult<Self> {
        let dlen = raw.len();
        let len = dlen + ecc_len;
        if len > MAX_BLOCK_SIZE {
            return Err(QRError::DataTooLong);
        }

        let mut data = [0u8; MAX_BLOCK_SIZE];
        data[..dlen].copy_from_slice(raw);
        let ecc = rs.encode_bytes(raw, ecc_len)?;
        data[dlen..len].copy_from_slice(&ecc);
        Ok(Self { data, len, dlen })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn ec_len(&self) -> usize {
        self.len - self.dlen
    }

    pub fn data_len(&self) -> usize {
        self.dlen
    }

    pub fn full(&self) -> &[u8] {
        &self.data[..self.len]
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..self.dlen]
    }

    pub fn ecc(&self) -> &[u8] {
        &self.data[self.dlen..self.len]
    }
}

// Splitting & interleaving
//------------------------------------------------------------------------------

/// Splits data codewords into the group 1 blocks followed by the group 2
/// blocks of the version and computes the ECC of each.
pub fn blockify(codewords: &[u8], info: &VersionInfo) -> QRResult<Vec<Block>> {
    if codewords.len() != info.total_data_bytes() {
        return Err(QRError::CodewordCountMismatch);
    }

    let rs = ReedSolomonEncoder::qr();
    let ecc_len = info.ecc_per_block;
    let (g1, g2) = (info.group1, info.group2);
    let g1_size = g1.count * g1.data_codewords;

    let mut blocks = Vec::with_capacity(info.total_blocks());
    for chunk in codewords[..g1_size].chunks(g1.data_codewords) {
        blocks.push(Block::new(chunk, ecc_len, rs)?);
    }
    if g2.count > 0 {
        for chunk in codewords[g1_size..].chunks(g2.data_codewords) {
            blocks.push(Block::new(chunk, ecc_len, rs)?);
        }
    }
    Ok(blocks)
}

/// Column-wise read of all data codewords, then of all ECC codewords.
pub fn interleave_blocks(blocks: &[Block]) -> Vec<u8> {
    let data = blocks.iter().map(Block::data).collect::<Vec<_>>();
    let ecc = blocks.iter().map(Block::ecc).collect::<Vec<_>>();
    let mut res = interleave(&data);
    res.extend(interleave(&ecc));
    res
}

pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}

#[cfg(test)]
mod block_tests {
    use super::{blockify, interleave, interleave_blocks, Block};
    use crate::common::ec::{ReedSolomonEncoder, MAX_BLOCK_SIZE};
    use crate::common::error::QRError;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_blockify_simple() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let info = Version::new(1).unwrap().version_info(ECLevel::M);
        let blocks = blockify(msg, info).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].data(), msg);
        assert_eq!(blocks[0].ecc(), b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17");
        assert_eq!(blocks[0].len(), 26);
    }

    #[test]
    fn test_blockify_complex() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";
        let expected_ec = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27",
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85",
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d",
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec",
        ];
        let info = Version::new(5).unwrap().version_info(ECLevel::Q);
        let blocks = blockify(msg, info).unwrap();
        let data_lens = blocks.iter().map(|b| b.data_len()).collect::<Vec<_>>();
        assert_eq!(data_lens, vec![15, 15, 16, 16]);
        for (b, exp) in blocks.iter().zip(expected_ec.iter()) {
            assert_eq!(b.ec_len(), 18);
            assert_eq!(b.ecc(), &exp[..]);
        }

        let interleaved = interleave_blocks(&blocks);
        assert_eq!(interleaved.len(), Version::new(5).unwrap().total_codewords());
        assert_eq!(&interleaved[..8], b"C\xf6\xb6F\x55\xf6\xe6\xf7");
        // Group 2 blocks contribute the last data column
        assert_eq!(&interleaved[60..62], b"\x07\xec");
        assert_eq!(&interleaved[62..66], b"\xd5\x57\x94\xeb");
        assert_eq!(interleaved[133], 0xec);
    }

    #[test]
    fn test_blockify_wrong_length() {
        let info = Version::new(1).unwrap().version_info(ECLevel::M);
        assert_eq!(blockify(&[0; 15], info), Err(QRError::CodewordCountMismatch));
        assert_eq!(blockify(&[0; 17], info), Err(QRError::CodewordCountMismatch));
        assert_eq!(blockify(&[], info), Err(QRError::CodewordCountMismatch));
    }

    #[test]
    fn test_block_too_long() {
        let rs = ReedSolomonEncoder::qr();
        let raw = [0u8; MAX_BLOCK_SIZE - 10];
        assert_eq!(Block::new(&raw, 11, rs), Err(QRError::DataTooLong));
        assert_eq!(Block::new(&raw, 10, rs).unwrap().len(), MAX_BLOCK_SIZE);
    }

    #[test]
    fn test_interleave_uneven() {
        let blocks: [&[u8]; 3] = [&[1, 4], &[2, 5], &[3, 6, 7]];
        assert_eq!(interleave(&blocks), vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(interleave::<u8, &[u8]>(&[]).is_empty());
    }
}
