use std::sync::OnceLock;

use log::trace;
use parking_lot::Mutex;

use super::{GaloisField, Polynomial};
use crate::common::error::{QRError, QRResult};

// Reed-Solomon encoder
//------------------------------------------------------------------------------

/// Computes error correction codewords over a [`GaloisField`].
///
/// Generator polynomials are built lazily and cached by degree. The cache
/// sits behind a mutex so a single encoder can be shared between threads;
/// the lock is held across the lookup and any extension so concurrent
/// callers never build the same degree twice.
#[derive(Debug)]
pub struct ReedSolomonEncoder {
    field: GaloisField,
    generators: Mutex<Vec<Vec<u16>>>,
}

impl ReedSolomonEncoder {
    pub fn new(field: GaloisField) -> Self {
        Self { field, generators: Mutex::new(vec![vec![1]]) }
    }

    /// Process-wide encoder over the QR field.
    pub fn qr() -> &'static Self {
        static QR_ENCODER: OnceLock<ReedSolomonEncoder> = OnceLock::new();
        QR_ENCODER.get_or_init(|| Self::new(GaloisField::qr()))
    }

    pub fn field(&self) -> &GaloisField {
        &self.field
    }

    /// Generator polynomial with roots antilog(base)..antilog(base + degree - 1).
    pub fn generator(&self, degree: usize) -> Polynomial<'_> {
        let mut cache = self.generators.lock();
        if degree >= cache.len() {
            trace!("Extending generator cache from degree {} to {degree}", cache.len() - 1);

            let last = cache.len() - 1;
            let mut gen = Polynomial::new(&self.field, cache[last].clone());
            for d in cache.len()..=degree {
                let root = self.field.antilog(d - 1 + self.field.base());
                gen = gen.multiply(&Polynomial::new(&self.field, vec![1, root]));
                cache.push(gen.coefficients().to_vec());
            }
        }
        Polynomial::new(&self.field, cache[degree].clone())
    }

    pub fn cached_degrees(&self) -> usize {
        self.generators.lock().len()
    }

    /// Returns exactly `ecc_count` codewords, left padded with zeros when the
    /// remainder has fewer terms. Fails with `InvalidFieldElement` if a data
    /// word lies outside the field.
    pub fn encode(&self, data: &[u16], ecc_count: usize) -> QRResult<Vec<u16>> {
        if !data.iter().all(|&c| self.field.contains(c)) {
            return Err(QRError::InvalidFieldElement);
        }
        if ecc_count == 0 {
            return Ok(Vec::new());
        }

        let generator = self.generator(ecc_count);
        let info = Polynomial::new(&self.field, data.to_vec()).multiply_by_monomial(ecc_count, 1);
        let (_, remainder) = info.divide(&generator)?;

        let coeffs = remainder.coefficients();
        let mut ecc = vec![0; ecc_count];
        ecc[ecc_count - coeffs.len()..].copy_from_slice(coeffs);
        Ok(ecc)
    }

    pub fn encode_bytes(&self, data: &[u8], ecc_count: usize) -> QRResult<Vec<u8>> {
        let data = data.iter().map(|&b| b as u16).collect::<Vec<_>>();
        let ecc = self.encode(&data, ecc_count)?;
        Ok(ecc.into_iter().map(|c| c as u8).collect())
    }
}

#[cfg(test)]
mod rs_tests {
    use std::thread;

    use proptest::prelude::*;
    use test_case::test_case;

    use super::ReedSolomonEncoder;
    use crate::common::ec::{GaloisField, Polynomial};
    use crate::common::error::QRError;

    #[test_case(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11", 10, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17"; "1-M")]
    #[test_case(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec", 13, b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10"; "1-Q")]
    #[test_case(
        b"CUF\x86W&U\xc2w2\x06\x12\x06g&", 18,
        b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'";
        "5-Q"
    )]
    fn test_encode_bytes(data: &[u8], ecc_count: usize, exp: &[u8]) {
        let rs = ReedSolomonEncoder::new(GaloisField::qr());
        assert_eq!(rs.encode_bytes(data, ecc_count).unwrap(), exp);
    }

    #[test]
    fn test_generator() {
        let rs = ReedSolomonEncoder::new(GaloisField::qr());
        // (x - 1)(x - 2) = x^2 + 3x + 2
        assert_eq!(rs.generator(2).coefficients(), &[1, 3, 2]);
        assert_eq!(rs.cached_degrees(), 3);
        // Log form of the degree 7 generator: 0 87 229 146 149 238 102 21
        let gen = rs.generator(7);
        let logs = gen.coefficients().iter().map(|&c| rs.field().log(c)).collect::<Vec<_>>();
        assert_eq!(logs, vec![0, 87, 229, 146, 149, 238, 102, 21]);
        assert_eq!(rs.cached_degrees(), 8);
    }

    #[test]
    fn test_generator_roots() {
        let rs = ReedSolomonEncoder::new(GaloisField::new(0x12D, 256, 1));
        let gen = rs.generator(5);
        for i in 1..=5 {
            assert_eq!(gen.evaluate_at(rs.field().antilog(i)), 0);
        }
    }

    #[test]
    fn test_remainder_padding() {
        // All zero data yields an all zero remainder of the requested length
        let rs = ReedSolomonEncoder::new(GaloisField::qr());
        assert_eq!(rs.encode(&[0, 0, 0], 7).unwrap(), vec![0; 7]);
        assert!(rs.encode(&[1, 2, 3], 0).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_field_data() {
        let rs = ReedSolomonEncoder::new(GaloisField::new(0x13, 16, 1));
        assert_eq!(rs.encode(&[20, 3], 2), Err(QRError::InvalidFieldElement));
        assert_eq!(rs.encode(&[16], 0), Err(QRError::InvalidFieldElement));
        assert_eq!(rs.encode(&[15, 3], 2).unwrap().len(), 2);
    }

    #[test]
    fn test_shared_between_threads() {
        let rs = ReedSolomonEncoder::new(GaloisField::qr());
        let data = [32u16, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236];
        let expected =
            (1..=30).map(|d| ReedSolomonEncoder::qr().encode(&data, d).unwrap()).collect::<Vec<_>>();

        thread::scope(|s| {
            for t in 0..8 {
                let rs = &rs;
                let expected = &expected;
                s.spawn(move || {
                    for d in (1..=30).rev().skip(t) {
                        assert_eq!(&rs.encode(&data, d).unwrap(), &expected[d - 1]);
                    }
                });
            }
        });
        assert_eq!(rs.cached_degrees(), 31);
    }

    #[test]
    fn test_qr_singleton() {
        assert!(std::ptr::eq(ReedSolomonEncoder::qr(), ReedSolomonEncoder::qr()));
        assert_eq!(ReedSolomonEncoder::qr().field(), &GaloisField::qr());
    }

    proptest! {
        #[test]
        fn proptest_codeword_divisible_by_generator(
            data in prop::collection::vec(any::<u8>(), 1..60),
            ecc_count in 1usize..31,
        ) {
            let rs = ReedSolomonEncoder::qr();
            let data = data.into_iter().map(u16::from).collect::<Vec<_>>();
            let ecc = rs.encode(&data, ecc_count).unwrap();
            prop_assert_eq!(ecc.len(), ecc_count);

            let mut codeword = data.clone();
            codeword.extend(ecc);
            let codeword = Polynomial::new(rs.field(), codeword);
            for i in 0..ecc_count {
                prop_assert_eq!(codeword.evaluate_at(rs.field().antilog(i)), 0);
            }
        }
    }
}
