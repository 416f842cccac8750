mod qr;
mod symbol;

#[cfg(test)]
pub(crate) use qr::{Color, Module};
pub(crate) use qr::QR;
pub use symbol::{Bounds, Metadata, Symbol};

use log::debug;

use crate::common::{
    bitstream::BitStream,
    codec::{self, EncodingMode},
    ec::{blockify, interleave_blocks},
    error::{QRError, QRResult},
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

/// Encodes `content` into a QR symbol with the smallest version that fits and
/// the mask with the lowest penalty.
pub fn encode(content: &str, ec_level: ECLevel, mode: EncodingMode) -> QRResult<Symbol> {
    QRBuilder::new(content).ec_level(ec_level).mode(mode).build()
}

pub struct QRBuilder<'a> {
    data: &'a str,
    version: Option<Version>,
    ec_level: ECLevel,
    mode: EncodingMode,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a str) -> Self {
        Self { data, version: None, ec_level: ECLevel::M, mode: EncodingMode::Auto, mask: None }
    }

    pub fn data(&mut self, data: &'a str) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mode(&mut self, mode: EncodingMode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn metadata(&self) -> String {
        match self.version {
            Some(v) => format!(
                "{{ Version: {:?}, Ec level: {:?}, Mode: {:?} }}",
                *v, self.ec_level, self.mode
            ),
            None => {
                format!("{{ Version: None, Ec level: {:?}, Mode: {:?} }}", self.ec_level, self.mode)
            }
        }
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<Symbol> {
        debug!("Generating QR {}...", self.metadata());

        let mut qr = self.build_unmasked()?;

        let mask = match self.mask {
            Some(m) => {
                debug!("Applying mask {}...", *m);
                qr.apply_mask(m);
                m
            }
            None => {
                debug!("Finding & applying best mask...");
                apply_best_mask(&mut qr)
            }
        };

        let info = qr.version().version_info(self.ec_level);
        let total_modules = qr.width() * qr.width();
        let dark_modules = qr.count_dark_modules();

        debug!("QR generated with version {}, mask {}", *qr.version(), *mask);
        debug!(
            "Data capacity: {}, Error capacity: {}",
            info.total_data_bytes(),
            info.error_correction_capacity()
        );
        debug!(
            "Dark cells: {}, Light cells: {}, Balance: {}%",
            dark_modules,
            total_modules - dark_modules,
            dark_modules * 100 / total_modules
        );

        Ok(Symbol::new(self.data, &qr, mask))
    }

    // Function patterns and data placed, format info reserved but unmasked
    fn build_unmasked(&self) -> QRResult<QR> {
        if self.data.is_empty() {
            return Err(QRError::EmptyData);
        }
        let data = self.data.as_bytes();

        debug!("Encoding data...");
        let (encoded_data, info) = match self.version {
            Some(v) => {
                let encoded = codec::encode_with_version(data, self.ec_level, self.mode, v)?;
                (encoded, v.version_info(self.ec_level))
            }
            None => {
                debug!("Finding best version...");
                codec::encode(data, self.ec_level, self.mode)?
            }
        };
        debug!(
            "Using version {} with {} of {} data bits",
            *info.version,
            encoded_data.len(),
            info.data_bit_capacity()
        );

        debug!("Constructing payload with ecc & interleaving...");
        let blocks = blockify(encoded_data.data(), info)?;
        let mut payload = BitStream::new(info.version.total_codewords() << 3);
        payload.extend(&interleave_blocks(&blocks));

        debug!("Drawing functional patterns...");
        let mut qr = QR::new(info.version, self.ec_level);
        qr.draw_all_function_patterns();

        debug!("Drawing encoding region...");
        qr.draw_encoding_region(&payload);

        Ok(qr)
    }
}
