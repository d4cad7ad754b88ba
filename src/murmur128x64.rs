//! MurmurHash3, x64 128-bit variant: two 64-bit lanes.
use crate::fmix::fmix64;
use crate::hash::{impl_io_write, pack_tail_u64, read_u64_le};
use crate::Hasher;

const BLOCK_SIZE: usize = 16;
const LANE_SIZE: usize = 8;
const MURMUR128_LEN: usize = 16;

const C1: u64 = 0x87c37b91114253d5;
const C2: u64 = 0x4cf5ad432745937f;

#[derive(Debug, Clone)]
pub struct Murmur128x64 {
    buffer: [u8; BLOCK_SIZE],
    buffer_len: usize,
    h1: u64,
    h2: u64,
    message_len: u64,
    seed: u64,
}

impl Murmur128x64 {
    pub fn new(seed: u64) -> Self {
        Self {
            buffer: [0u8; BLOCK_SIZE],
            buffer_len: 0,
            h1: seed,
            h2: seed,
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

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn finish(mut self) -> [u8; MURMUR128_LEN] {
        let tail = &self.buffer[..self.buffer_len];
        if tail.len() > LANE_SIZE {
            self.h2 ^= mix_k2(pack_tail_u64(&tail[LANE_SIZE..]));
        }
        if !tail.is_empty() {
            self.h1 ^= mix_k1(pack_tail_u64(&tail[..tail.len().min(LANE_SIZE)]));
        }

        self.h1 ^= self.message_len;
        self.h2 ^= self.message_len;

        self.h1 = self.h1.wrapping_add(self.h2);
        self.h2 = self.h2.wrapping_add(self.h1);

        self.h1 = fmix64(self.h1);
        self.h2 = fmix64(self.h2);

        self.h1 = self.h1.wrapping_add(self.h2);
        self.h2 = self.h2.wrapping_add(self.h1);

        let mut out = [0u8; MURMUR128_LEN];
        out[..LANE_SIZE].copy_from_slice(&self.h1.to_le_bytes());
        out[LANE_SIZE..].copy_from_slice(&self.h2.to_le_bytes());
        out
    }

    fn process_block(&mut self, block: &[u8]) {
        self.h1 ^= mix_k1(read_u64_le(block, 0));
        self.h1 = self
            .h1
            .rotate_left(27)
            .wrapping_add(self.h2)
            .wrapping_mul(5)
            .wrapping_add(0x52dce729);

        self.h2 ^= mix_k2(read_u64_le(block, LANE_SIZE));
        self.h2 = self
            .h2
            .rotate_left(31)
            .wrapping_add(self.h1)
            .wrapping_mul(5)
            .wrapping_add(0x38495ab5);
    }
}

fn mix_k1(k1: u64) -> u64 {
    k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2)
}

fn mix_k2(k2: u64) -> u64 {
    k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1)
}

impl Default for Murmur128x64 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Hasher<MURMUR128_LEN> for Murmur128x64 {
    type Seed = u64;

    const BLOCK_SIZE: usize = BLOCK_SIZE;

    fn with_seed(seed: u64) -> Self {
        Self::new(seed)
    }

    fn update(&mut self, data: &[u8]) {
        Murmur128x64::update(self, data);
    }

    fn digest(&self) -> [u8; MURMUR128_LEN] {
        Murmur128x64::digest(self)
    }

    fn reset(&mut self) {
        Murmur128x64::reset(self);
    }
}

impl_io_write!(Murmur128x64);

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    const FOX: &str = "the quick brown fox jumps over the lazy dog";

    #[rstest]
    #[case("", 0, "00000000000000000000000000000000")]
    #[case("", 1, "b55cff6ee5ab10468335f878aa2d6251")]
    #[case("", 0x9747b28c, "b3bbaa1d8a202b397a9502e38f60b093")]
    #[case("a", 0, "897859f6655555855a890e51483ab5e6")]
    #[case("abc", 0, "6778ad3f3f3f96b4522dca264174a23b")]
    #[case("abcd", 0, "4fcd5646d6b77bb875e87360883e00f2")]
    #[case("Hello, world!", 0x9747b28c, "2e39a862d685c4edba76d531767e5ef8")]
    #[case("0123456789abcdef", 0, "a7d14acf946de04bda08a7635c5bc387")]
    #[case("0123456789abcdefg", 0, "def945aa2d61328eee72c306c2f40008")]
    #[case(FOX, 0, "b386ade2fee9e4bc7f4b6e4074e3e20a")]
    #[case(FOX, 1, "bfaeb770c6aeeb98711ef56436def326")]
    #[case(FOX, 0xdeadbeef, "ff2a3d12b3562a1b651785cb90493e42")]
    fn digest_returns_expected_hash(
        #[case] input: &str,
        #[case] seed: u64,
        #[case] expected: &str,
    ) {
        let mut hasher = Murmur128x64::new(seed);
        hasher.update(input.as_bytes());

        assert_eq!(hex::encode(hasher.digest()), expected);
    }

    #[test]
    fn fox_lanes_match_reference_values() {
        let digest = Murmur128x64::digest_message(FOX.as_bytes());

        let (h1, h2) = digest.split_at(LANE_SIZE);
        assert_eq!(h1, 0xB386ADE2FEE9E4BC_u64.to_be_bytes());
        assert_eq!(h2, 0x7F4B6E4074E3E20A_u64.to_be_bytes());
    }

    #[rstest]
    #[case(1, "b55cff6ee5ab10468335f878aa2d6251")]
    #[case(7, "680d4bca87694cbd87c725bdd4dd3a61")]
    #[case(8, "c82f8ed6bde1a747c7dc31ec02eee660")]
    #[case(9, "322d816e0fcbb4fbb9ff00021d75de78")]
    #[case(10, "63e4589ee825cacf7620ad72c4134325")]
    #[case(15, "e92549fd98152347e97dc688ee6d84cd")]
    #[case(16, "303f9091b524494445e82f76566490ab")]
    #[case(17, "0ec2e79f0ff4765c24a8da9e6b025fc1")]
    #[case(24, "dedfb27562844e73529efbbbab7e7094")]
    #[case(25, "cb82e92eb57cbe3bfc9fefbe3354d3a2")]
    #[case(31, "94d02ca3e1d33d05905400b4ef9ae59e")]
    fn digest_handles_every_tail_length(#[case] len: u8, #[case] expected: &str) {
        let message: Vec<u8> = (0..len).collect();

        assert_eq!(hex::encode(Murmur128x64::digest_message(&message)), expected);
    }

    #[test]
    fn digest_is_independent_of_chunking() {
        let message: Vec<u8> = (0..=255u8).cycle().take(1024).collect();
        let expected = Murmur128x64::digest_message(&message);
        assert_eq!(hex::encode(expected), "294c6c31cedcd969c645cc05166c87ed");

        for chunk_size in [1, 2, 8, 15, 16, 17, 333] {
            let mut hasher = Murmur128x64::default();
            message.chunks(chunk_size).for_each(|c| hasher.update(c));
            assert_eq!(hasher.digest(), expected, "chunk size {chunk_size}");
        }
    }

    #[test]
    fn update_after_digest_continues_accumulating() {
        let mut hasher = Murmur128x64::new(3);
        let mut partial = Vec::new();
        for word in FOX.split_inclusive(' ') {
            hasher.update(word.as_bytes());
            partial.extend_from_slice(word.as_bytes());
            assert_eq!(
                hasher.digest(),
                Murmur128x64::digest_message_with_seed(3, &partial)
            );
        }
    }

    #[test]
    fn reset_restores_seeded_state() {
        let mut hasher = Murmur128x64::new(u64::MAX);
        hasher.update(&[0xab; 40]);
        hasher.reset();

        assert_eq!(
            hasher.update_and_digest(FOX.as_bytes()),
            Murmur128x64::digest_message_with_seed(u64::MAX, FOX.as_bytes())
        );
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 0xdeadbeef)]
    #[case(0xdeadbeef, 1 << 32)]
    fn seed_changes_digest(#[case] a: u64, #[case] b: u64) {
        assert_ne!(
            Murmur128x64::digest_message_with_seed(a, FOX.as_bytes()),
            Murmur128x64::digest_message_with_seed(b, FOX.as_bytes())
        );
    }
}
