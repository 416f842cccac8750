use super::GaloisField;
use crate::common::error::{QRError, QRResult};

// Polynomial
//------------------------------------------------------------------------------

/// Polynomial over a [`GaloisField`].
///
/// Coefficients are stored most significant first with leading zeros
/// stripped. The zero polynomial is the single coefficient `[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial<'a> {
    field: &'a GaloisField,
    coeffs: Vec<u16>,
}

impl<'a> Polynomial<'a> {
    pub fn new(field: &'a GaloisField, mut coeffs: Vec<u16>) -> Self {
        let lead = coeffs.iter().position(|&c| c != 0).unwrap_or(coeffs.len());
        coeffs.drain(..lead);
        if coeffs.is_empty() {
            coeffs.push(0);
        }
        Self { field, coeffs }
    }

    pub fn zero(field: &'a GaloisField) -> Self {
        Self { field, coeffs: vec![0] }
    }

    pub fn monomial(field: &'a GaloisField, degree: usize, coeff: u16) -> Self {
        if coeff == 0 {
            return Self::zero(field);
        }
        let mut coeffs = vec![0; degree + 1];
        coeffs[0] = coeff;
        Self { field, coeffs }
    }

    pub fn field(&self) -> &'a GaloisField {
        self.field
    }

    pub fn coefficients(&self) -> &[u16] {
        &self.coeffs
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs[0] == 0
    }

    /// Coefficient of the x^degree term.
    pub fn coefficient(&self, degree: usize) -> u16 {
        match self.degree().checked_sub(degree) {
            Some(i) => self.coeffs[i],
            None => 0,
        }
    }

    pub fn evaluate_at(&self, x: u16) -> u16 {
        self.coeffs.iter().fold(0, |acc, &c| self.field.add_or_subtract(self.field.multiply(acc, x), c))
    }

    pub fn add_or_subtract(&self, other: &Self) -> Self {
        debug_assert_eq!(self.field, other.field, "Polynomials belong to different fields");

        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }

        let (small, large) = if self.coeffs.len() < other.coeffs.len() {
            (&self.coeffs, &other.coeffs)
        } else {
            (&other.coeffs, &self.coeffs)
        };
        let offset = large.len() - small.len();
        let mut sum = large.clone();
        for (s, &c) in sum[offset..].iter_mut().zip(small.iter()) {
            *s = self.field.add_or_subtract(*s, c);
        }
        Self::new(self.field, sum)
    }

    pub fn multiply(&self, other: &Self) -> Self {
        debug_assert_eq!(self.field, other.field, "Polynomials belong to different fields");

        if self.is_zero() || other.is_zero() {
            return Self::zero(self.field);
        }

        let mut product = vec![0; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in other.coeffs.iter().enumerate() {
                let term = self.field.multiply(a, b);
                product[i + j] = self.field.add_or_subtract(product[i + j], term);
            }
        }
        Self::new(self.field, product)
    }

    pub fn multiply_by_monomial(&self, degree: usize, coeff: u16) -> Self {
        if coeff == 0 || self.is_zero() {
            return Self::zero(self.field);
        }
        let mut product: Vec<u16> = self.coeffs.iter().map(|&c| self.field.multiply(c, coeff)).collect();
        product.resize(self.coeffs.len() + degree, 0);
        Self::new(self.field, product)
    }

    /// Long division returning `(quotient, remainder)`.
    pub fn divide(&self, other: &Self) -> QRResult<(Self, Self)> {
        debug_assert_eq!(self.field, other.field, "Polynomials belong to different fields");

        if other.is_zero() {
            return Err(QRError::DivideByZero);
        }

        let lead_inv = self.field.inverse(other.coeffs[0])?;
        let mut quotient = Self::zero(self.field);
        let mut remainder = self.clone();

        while !remainder.is_zero() && remainder.degree() >= other.degree() {
            let diff = remainder.degree() - other.degree();
            let scale = self.field.multiply(remainder.coeffs[0], lead_inv);
            quotient = quotient.add_or_subtract(&Self::monomial(self.field, diff, scale));
            remainder = remainder.add_or_subtract(&other.multiply_by_monomial(diff, scale));
        }

        Ok((quotient, remainder))
    }
}
