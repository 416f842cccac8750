mod block;
mod galois;
mod poly;
mod rs;

pub use block::*;
pub use galois::*;
pub use poly::*;
pub use rs::*;

// Global constants
//------------------------------------------------------------------------------

pub const MAX_BLOCK_SIZE: usize = 256;
