//! MurmurHash3, x86 128-bit variant: four 32-bit lanes.
use crate::fmix::fmix32;
use crate::hash::{impl_io_write, pack_tail_u32, read_u32_le};
use crate::Hasher;

const BLOCK_SIZE: usize = 16;
const LANES: usize = 4;
const LANE_SIZE: usize = 4;
const MURMUR128_LEN: usize = 16;

// Lane `i` multiplies by `C[i]` then `C[(i + 1) % 4]`.
const C: [u32; LANES] = [0x239b961b, 0xab0e9789, 0x38b34ae5, 0xa1e38b93];
const K_ROTATIONS: [u32; LANES] = [15, 16, 17, 18];
const H_ROTATIONS: [u32; LANES] = [19, 17, 15, 13];
const H_ADDENDS: [u32; LANES] = [0x561ccd1b, 0x0bcaa747, 0x96cd1c35, 0x32ac3b17];

#[derive(Debug, Clone)]
pub struct Murmur128x86 {
    buffer: [u8; BLOCK_SIZE],
    buffer_len: usize,
    hash: [u32; LANES],
    message_len: u64,
    seed: u32,
}

impl Murmur128x86 {
    pub fn new(seed: u32) -> Self {
        Self {
            buffer: [0u8; BLOCK_SIZE],
            buffer_len: 0,
            hash: [seed; LANES],
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

    pub fn digest(&self) -> [u8; MURMUR128_LEN] {
        self.clone().finish()
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.seed);
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    fn finish(mut self) -> [u8; MURMUR128_LEN] {
        let tail = &self.buffer[..self.buffer_len];
        // A lane takes part as soon as the tail reaches its first byte; the
        // bytes it is missing count as zero.
        for lane in (0..LANES).rev() {
            let start = lane * LANE_SIZE;
            if tail.len() > start {
                let end = tail.len().min(start + LANE_SIZE);
                self.hash[lane] ^= mix_k(lane, pack_tail_u32(&tail[start..end]));
            }
        }

        let len = self.message_len as u32;
        self.hash.iter_mut().for_each(|h| *h ^= len);

        self.cross_add();
        self.hash = self.hash.map(fmix32);
        self.cross_add();

        let mut out = [0u8; MURMUR128_LEN];
        for (chunk, h) in out.chunks_exact_mut(LANE_SIZE).zip(self.hash) {
            chunk.copy_from_slice(&h.to_le_bytes());
        }
        out
    }

    fn cross_add(&mut self) {
        let [h1, h2, h3, h4] = &mut self.hash;
        *h1 = h1.wrapping_add(*h2).wrapping_add(*h3).wrapping_add(*h4);
        *h2 = h2.wrapping_add(*h1);
        *h3 = h3.wrapping_add(*h1);
        *h4 = h4.wrapping_add(*h1);
    }

    fn process_block(&mut self, block: &[u8]) {
        // Lanes are mixed in order; lane 3 sees the already updated lane 0.
        for lane in 0..LANES {
            let next = (lane + 1) % LANES;
            self.hash[lane] ^= mix_k(lane, read_u32_le(block, lane * LANE_SIZE));
            self.hash[lane] = self.hash[lane]
                .rotate_left(H_ROTATIONS[lane])
                .wrapping_add(self.hash[next])
                .wrapping_mul(5)
                .wrapping_add(H_ADDENDS[lane]);
        }
    }
}

fn mix_k(lane: usize, k: u32) -> u32 {
    k.wrapping_mul(C[lane])
        .rotate_left(K_ROTATIONS[lane])
        .wrapping_mul(C[(lane + 1) % LANES])
}

impl Default for Murmur128x86 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Hasher<MURMUR128_LEN> for Murmur128x86 {
    type Seed = u32;

    const BLOCK_SIZE: usize = BLOCK_SIZE;

    fn with_seed(seed: u32) -> Self {
        Self::new(seed)
    }

    fn update(&mut self, data: &[u8]) {
        Murmur128x86::update(self, data);
    }

    fn digest(&self) -> [u8; MURMUR128_LEN] {
        Murmur128x86::digest(self)
    }

    fn reset(&mut self) {
        Murmur128x86::reset(self);
    }
}

impl_io_write!(Murmur128x86);
