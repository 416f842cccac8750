//! # qrsmith
//!
//! A Rust library for generating QR code symbols, built on a reusable Galois field and
//! Reed-Solomon error correction engine.
//!
//! ## Features
//!
//! - **QR Code Generation**: Versions 1-40 at every error correction level (L, M, Q, H)
//! - **Automatic Mode Selection**: Numeric, alphanumeric or byte (UTF-8), whichever fits first
//! - **Mask Selection**: All 8 masks are scored with the standard penalty rules
//! - **Reusable Error Correction**: `GaloisField`, `Polynomial` and `ReedSolomonEncoder` work
//!   over any GF(2^n) field, not just the one QR uses
//!
//! ## Quick Start
//!
//! ```rust
//! use qrsmith::{encode, ECLevel, EncodingMode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = encode("hello world", ECLevel::H, EncodingMode::Auto)?;
//!
//! assert_eq!(symbol.bounds().width, 25);
//! for y in 0..symbol.bounds().height {
//!     for x in 0..symbol.bounds().width {
//!         let _dark = symbol.at(x, y);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrsmith::{QRBuilder, ECLevel, EncodingMode, MaskPattern, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = QRBuilder::new("HELLO WORLD")
//!     .version(Version::new(2)?)          // Smallest fitting version if not provided
//!     .ec_level(ECLevel::Q)               // Defaults to ECLevel::M
//!     .mode(EncodingMode::Alphanumeric)   // Defaults to EncodingMode::Auto
//!     .mask(MaskPattern::new(3)?)         // Lowest penalty mask if not provided
//!     .build()?;
//!
//! println!("{}", symbol.to_str());
//! # Ok(())
//! # }
//! ```
//!
//! ### Error Correction Only
//!
//! ```rust
//! use qrsmith::{GaloisField, ReedSolomonEncoder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // GF(64) as used by Aztec codes
//! let rs = ReedSolomonEncoder::new(GaloisField::new(0x43, 64, 1));
//! let ecc = rs.encode(&[5, 9, 33, 2], 6)?;
//! assert_eq!(ecc.len(), 6);
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! Progress of each build is reported through the [`log`](https://docs.rs/log) facade at
//! `debug` level, with per mask penalties at `trace` level. No logger is installed by the
//! library.
//!
//! ## Cargo Features
//!
//! - `parallel`: scores the 8 mask candidates on the rayon thread pool. The selected mask is
//!   identical to the sequential search.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{encode, Bounds, Metadata, QRBuilder, Symbol};
pub use common::codec::{EncodingMode, Mode};
pub use common::ec::{
    blockify, interleave_blocks, Block, GaloisField, Polynomial, ReedSolomonEncoder, QR_PRIMITIVE,
};
pub use common::error::{QRError, QRResult};
pub use common::mask::{compute_penalty, compute_total_penalty, MaskPattern, ModuleGrid, Penalty};
pub use common::metadata::{BlockGroup, ECLevel, Version, VersionInfo};
