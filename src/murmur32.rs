//! MurmurHash3, x86 32-bit variant.

use crate::fmix::fmix32;
use crate::hash::{impl_io_write, pack_tail_u32, read_u32_le};
use crate::Hasher;

const BLOCK_SIZE: usize = 4;
const MURMUR32_LEN: usize = 4;

const C1: u32 = 0xcc9e2d51;
const C2: u32 = 0x1b873593;

#[derive(Debug, Clone)]
pub struct Murmur32 {
    buffer: [u8; BLOCK_SIZE],
    buffer_len: usize,
    hash: u32,
    message_len: u64,
    seed: u32,
}

impl Murmur32 {
    pub fn new(seed: u32) -> Self {
        Self {
            buffer: [0u8; BLOCK_SIZE],
            buffer_len: 0,
            hash: seed,
            message_len: 0,
            seed,
        }
    }

    pub fn update(&mut self, message: &[u8]) {
        self.message_len = self.message_len.wrapping_add(message.len() as u64);

        let mut offset = 0;
        if self.buffer_len > 0 {
            let to_copy = (BLOCK_SIZE - self.buffer_len).min(message.len());
            self.buffer[self.buffer_len..self.buffer_len + to_copy]
                .copy_from_slice(&message[..to_copy]);
            self.buffer_len += to_copy;
            offset += to_copy;

            if self.buffer_len < BLOCK_SIZE {
                return;
            }
            let block = self.buffer;
            self.process_block(&block);
            self.buffer_len = 0;
        }

        let mut blocks = message[offset..].chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            self.process_block(block);
        }

        let remainder = blocks.remainder();
        self.buffer[..remainder.len()].copy_from_slice(remainder);
        self.buffer_len = remainder.len();
    }

    pub fn digest(&self) -> [u8; MURMUR32_LEN] {
        self.clone().finish()
    }

    /// The digest as an integer, i.e. the digest bytes read little-endian.
    pub fn digest_u32(&self) -> u32 {
        u32::from_le_bytes(self.digest())
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.seed);
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    fn finish(mut self) -> [u8; MURMUR32_LEN] {
        let tail = &self.buffer[..self.buffer_len];
        if !tail.is_empty() {
            self.hash ^= mix_k(pack_tail_u32(tail));
        }

        // Only the low 32 bits of the length take part.
        self.hash ^= self.message_len as u32;
        fmix32(self.hash).to_le_bytes()
    }

    fn process_block(&mut self, block: &[u8]) {
        self.hash ^= mix_k(read_u32_le(block, 0));
        self.hash = self
            .hash
            .rotate_left(13)
            .wrapping_mul(5)
            .wrapping_add(0xe6546b64);
    }
}

fn mix_k(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

impl Default for Murmur32 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Hasher<MURMUR32_LEN> for Murmur32 {
    type Seed = u32;

    const BLOCK_SIZE: usize = BLOCK_SIZE;

    fn with_seed(seed: u32) -> Self {
        Self::new(seed)
    }

    fn update(&mut self, data: &[u8]) {
        Murmur32::update(self, data);
    }

    fn digest(&self) -> [u8; MURMUR32_LEN] {
        Murmur32::digest(self)
    }

    fn reset(&mut self) {
        Murmur32::reset(self);
    }
}

impl_io_write!(Murmur32);
