use std::fmt::Display;
use std::mem;

use num_traits::PrimInt;

/// Growable MSB-first bit buffer sized up front to the symbol's data capacity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    len: usize,
    capacity: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { data: Vec::with_capacity((capacity + 7) >> 3), len: 0, capacity }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn bit(&self, pos: usize) -> bool {
        debug_assert!(pos < self.len, "Bit {pos} read past the end of {} bits", self.len);
        (self.data[pos >> 3] >> (7 - (pos & 7))) & 1 == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| self.bit(i))
    }
}

// Writers
//------------------------------------------------------------------------------

impl BitStream {
    /// Appends the low `size` bits of `bits`, most significant first.
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let width = mem::size_of::<T>() * 8;
        debug_assert!(size <= width, "Cannot take {size} bits from a {width} bit value");
        debug_assert!(
            width - bits.leading_zeros() as usize <= size,
            "Value {bits} does not fit in {size} bits"
        );
        debug_assert!(
            self.len + size <= self.capacity,
            "Pushing {size} bits onto {} overflows capacity {}",
            self.len,
            self.capacity
        );

        (0..size).rev().for_each(|i| self.push((bits >> i) & T::one() == T::one()));
    }

    pub fn push(&mut self, bit: bool) {
        let offset = self.len & 7;
        if offset == 0 {
            self.data.push(0);
        }
        let last = self.data.len() - 1;
        self.data[last] |= u8::from(bit) << (7 - offset);
        self.len += 1;
    }

    /// Appends whole bytes, copying directly when the stream is byte aligned.
    pub fn extend(&mut self, bytes: &[u8]) {
        let size = bytes.len() << 3;
        debug_assert!(
            self.len + size <= self.capacity,
            "Extending {} bits by {size} overflows capacity {}",
            self.len,
            self.capacity
        );

        if self.len & 7 == 0 {
            self.data.extend_from_slice(bytes);
            self.len += size;
        } else {
            bytes.iter().for_each(|&b| self.push_bits(b, 8));
        }
    }
}
