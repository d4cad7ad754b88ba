pub trait Hasher<const N: usize>: Clone + Default {
    type Seed: Copy;

    const BLOCK_SIZE: usize;
    const DIGEST_SIZE: usize = N;

    fn with_seed(seed: Self::Seed) -> Self;

    fn update(&mut self, data: &[u8]);

    /// Finalizes a copy of the current state. The hasher itself is left
    /// untouched, so more data can be fed in afterwards.
    fn digest(&self) -> [u8; N];

    fn reset(&mut self);

    fn digest_message(message: &[u8]) -> [u8; N] {
        let mut hasher = Self::default();
        hasher.update(message);
        hasher.digest()
    }

    fn digest_message_with_seed(seed: Self::Seed, message: &[u8]) -> [u8; N] {
        let mut hasher = Self::with_seed(seed);
        hasher.update(message);
        hasher.digest()
    }

    fn update_and_digest(&mut self, message: &[u8]) -> [u8; N] {
        self.update(message);
        self.digest()
    }
}

/// Lets `std::io::copy` stream a reader straight into a hasher.
macro_rules! impl_io_write {
    ($hasher:ty) => {
        impl std::io::Write for $hasher {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                <$hasher>::update(self, buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
    };
}

pub(crate) use impl_io_write;

pub(crate) fn read_u32_le(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

pub(crate) fn read_u64_le(bytes: &[u8], at: usize) -> u64 {
    u64::from(read_u32_le(bytes, at)) | (u64::from(read_u32_le(bytes, at + 4)) << 32)
}

/// Packs up to one word of tail bytes little-endian; missing high bytes are zero.
pub(crate) fn pack_tail_u32(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .rev()
        .fold(0, |word, &byte| (word << 8) | u32::from(byte))
}

pub(crate) fn pack_tail_u64(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .rev()
        .fold(0, |word, &byte| (word << 8) | u64::from(byte))
}
