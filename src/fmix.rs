/// Final avalanche mix for 32-bit lanes.
pub fn fmix32(mut k: u32) -> u32 {
    k ^= k >> 16;
    k = k.wrapping_mul(0x85ebca6b);
    k ^= k >> 13;
    k = k.wrapping_mul(0xc2b2ae35);
    k ^= k >> 16;
    k
}

/// Final avalanche mix for 64-bit lanes.
pub fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51afd7ed558ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ceb9fe1a85ec53);
    k ^= k >> 33;
    k
}
