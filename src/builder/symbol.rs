use std::fmt::{Display, Formatter};

use super::QR;
use crate::common::mask::{MaskPattern, ModuleGrid};
use crate::common::metadata::{ECLevel, Version};

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Bounds {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Metadata {
    pub kind: &'static str,
    pub dimensions: u8,
}

// Symbol
//------------------------------------------------------------------------------

/// Finished QR symbol, as handed to renderers.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Symbol {
    content: String,
    modules: Box<[bool]>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: MaskPattern,
}

impl Symbol {
    pub(crate) fn new(content: &str, qr: &QR, mask: MaskPattern) -> Self {
        let modules = qr.grid().iter().map(|m| m.select(true, false)).collect();
        Self {
            content: content.to_string(),
            modules,
            w: qr.width(),
            ver: qr.version(),
            ecl: qr.ec_level(),
            mask,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn bounds(&self) -> Bounds {
        Bounds { width: self.w, height: self.w }
    }

    /// Quiet zone width in modules.
    pub fn margin(&self) -> usize {
        QUIET_ZONE
    }

    pub fn metadata(&self) -> Metadata {
        Metadata { kind: SYMBOL_KIND, dimensions: 2 }
    }

    /// True if the module at column `x` and row `y` is dark.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside the symbol.
    pub fn at(&self, x: usize, y: usize) -> bool {
        assert!(
            x < self.w && y < self.w,
            "Module ({x}, {y}) out of bounds for {0}x{0} symbol",
            self.w
        );
        self.modules[y * self.w + x]
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    pub fn count_dark_modules(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }

    pub fn to_str(&self) -> String {
        let mut res = String::with_capacity(self.w * (self.w + 1));
        for row in self.modules.chunks(self.w) {
            res.extend(row.iter().map(|&m| if m { '#' } else { '.' }));
            res.push('\n');
        }
        res
    }
}

impl ModuleGrid for Symbol {
    fn width(&self) -> usize {
        self.w
    }

    fn is_dark(&self, r: usize, c: usize) -> bool {
        self.at(c, r)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_str())
    }
}


// Global constants
//------------------------------------------------------------------------------

static QUIET_ZONE: usize = 5;

static SYMBOL_KIND: &str = "QR Code";
