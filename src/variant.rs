use std::{fmt, io, str::FromStr};

use crate::{Error, Murmur128x64, Murmur128x86, Murmur32};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Variant {
    #[default]
    Murmur32,
    Murmur128x86,
    Murmur128x64,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Self::Murmur32, Self::Murmur128x86, Self::Murmur128x64];

    pub fn name(self) -> &'static str {
        match self {
            Self::Murmur32 => "32x86",
            Self::Murmur128x86 => "128x86",
            Self::Murmur128x64 => "128x64",
        }
    }

    pub fn digest_size(self) -> usize {
        match self {
            Self::Murmur32 => 4,
            Self::Murmur128x86 | Self::Murmur128x64 => 16,
        }
    }

    pub fn block_size(self) -> usize {
        match self {
            Self::Murmur32 => 4,
            Self::Murmur128x86 | Self::Murmur128x64 => 16,
        }
    }

    /// Creates a hasher for this variant. The 32-bit word variants only use
    /// the low 32 bits of `seed`.
    pub fn hasher(self, seed: u64) -> AnyHasher {
        match self {
            Self::Murmur32 => AnyHasher::Murmur32(Murmur32::new(seed as u32)),
            Self::Murmur128x86 => AnyHasher::Murmur128x86(Murmur128x86::new(seed as u32)),
            Self::Murmur128x64 => AnyHasher::Murmur128x64(Murmur128x64::new(seed)),
        }
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "32x86" | "32" | "" => Ok(Self::Murmur32),
            "128x86" => Ok(Self::Murmur128x86),
            "128x64" => Ok(Self::Murmur128x64),
            other => Err(Error::UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the hash engines, picked at runtime.
#[derive(Debug, Clone)]
pub enum AnyHasher {
    Murmur32(Murmur32),
    Murmur128x86(Murmur128x86),
    Murmur128x64(Murmur128x64),
}

impl AnyHasher {
    pub fn variant(&self) -> Variant {
        match self {
            Self::Murmur32(_) => Variant::Murmur32,
            Self::Murmur128x86(_) => Variant::Murmur128x86,
            Self::Murmur128x64(_) => Variant::Murmur128x64,
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Murmur32(h) => h.update(data),
            Self::Murmur128x86(h) => h.update(data),
            Self::Murmur128x64(h) => h.update(data),
        }
    }

    pub fn digest(&self) -> Vec<u8> {
        match self {
            Self::Murmur32(h) => h.digest().to_vec(),
            Self::Murmur128x86(h) => h.digest().to_vec(),
            Self::Murmur128x64(h) => h.digest().to_vec(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Self::Murmur32(h) => h.reset(),
            Self::Murmur128x86(h) => h.reset(),
            Self::Murmur128x64(h) => h.reset(),
        }
    }
}

impl io::Write for AnyHasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
