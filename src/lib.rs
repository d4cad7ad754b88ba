pub mod cli;
mod error;
mod fmix;
mod hash;
mod murmur128x64;
mod murmur128x86;
mod murmur32;
mod variant;

pub use error::Error;
pub use fmix::{fmix32, fmix64};
pub use hash::Hasher;
pub use murmur128x64::Murmur128x64;
pub use murmur128x86::Murmur128x86;
pub use murmur32::Murmur32;
pub use variant::{AnyHasher, Variant};
