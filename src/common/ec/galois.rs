use crate::common::error::{QRError, QRResult};

// Galois field
//------------------------------------------------------------------------------

/// Finite field GF(2^n) backed by antilog/log lookup tables.
///
/// The tables are built once from the primitive polynomial by repeated
/// doubling, reducing whenever the running value reaches the field size.
/// Elements are stored as `u16`, which covers every field used by the
/// common 2D symbologies (GF(16) up to GF(4096)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaloisField {
    size: usize,
    base: usize,
    primitive: u32,
    antilog: Box<[u16]>,
    log: Box<[u16]>,
}

impl GaloisField {
    pub fn new(primitive: u32, size: usize, base: usize) -> Self {
        debug_assert!(size.is_power_of_two(), "Field size must be a power of two: {size}");
        debug_assert!((4..=1 << 16).contains(&size), "Unsupported field size: {size}");

        let mut antilog = vec![0u16; size].into_boxed_slice();
        let mut log = vec![0u16; size].into_boxed_slice();

        let mut x = 1usize;
        for a in antilog.iter_mut() {
            *a = x as u16;
            x <<= 1;
            if x >= size {
                x = (x ^ primitive as usize) & (size - 1);
            }
        }
        for i in 0..size - 1 {
            log[antilog[i] as usize] = i as u16;
        }

        Self { size, base, primitive, antilog, log }
    }

    /// GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1, as used by QR.
    pub fn qr() -> Self {
        Self::new(QR_PRIMITIVE, 256, 0)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn primitive(&self) -> u32 {
        self.primitive
    }

    // Cyclic in the exponent, so any index is accepted
    pub fn antilog(&self, i: usize) -> u16 {
        self.antilog[i % (self.size - 1)]
    }

    /// # Panics
    ///
    /// Panics if `a` is not below [`size`](Self::size). The arithmetic
    /// methods share this precondition; use [`contains`](Self::contains) to
    /// check untrusted values first.
    pub fn log(&self, a: u16) -> usize {
        debug_assert!(a != 0, "Log of zero is undefined");
        self.log[a as usize] as usize
    }

    pub fn contains(&self, a: u16) -> bool {
        (a as usize) < self.size
    }

    pub fn add_or_subtract(&self, a: u16, b: u16) -> u16 {
        a ^ b
    }

    pub fn multiply(&self, a: u16, b: u16) -> u16 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.antilog[(self.log(a) + self.log(b)) % (self.size - 1)]
    }

    pub fn divide(&self, a: u16, b: u16) -> QRResult<u16> {
        if b == 0 {
            return Err(QRError::DivideByZero);
        }
        if a == 0 {
            return Ok(0);
        }
        let order = self.size - 1;
        Ok(self.antilog[(self.log(a) + order - self.log(b)) % order])
    }

    pub fn inverse(&self, a: u16) -> QRResult<u16> {
        if a == 0 {
            return Err(QRError::DivideByZero);
        }
        Ok(self.antilog[self.size - 1 - self.log(a)])
    }
}


// Global constants
//------------------------------------------------------------------------------

pub static QR_PRIMITIVE: u32 = 0x11D;
