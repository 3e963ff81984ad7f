//! Universal hashing over a Mersenne-prime modulus.
//!
//! `h(k) = ((A·k + B) mod M) mod table_size` with `M = 2^19 − 1`. The
//! reduction mod `M` uses a single fold, `n mod (2^p − 1) = (n & M) + (n >> p)`,
//! followed by at most one corrective subtraction. That is exact only for
//! `n < 2^(2p) − 1`, which bounds exact reduction of integer keys to values
//! below roughly `2^38 / A`. Larger keys still hash deterministically but are
//! spread less evenly across buckets.

pub const HASH_PARAM_A: u64 = 53;
pub const HASH_PARAM_B: u64 = 97;
pub const MERSENNE_EXPONENT: u32 = 19;
pub const MERSENNE_PRIME: u64 = (1 << MERSENNE_EXPONENT) - 1;

/// Base for folding strings into an integer before hashing.
const STRING_BASE: u64 = 37;

/// `n mod M` via one fold and one corrective subtraction.
#[inline]
pub fn mersenne_mod(n: u64) -> u64 {
    let folded = (n & MERSENNE_PRIME) + (n >> MERSENNE_EXPONENT);
    if folded >= MERSENNE_PRIME {
        folded - MERSENNE_PRIME
    } else {
        folded
    }
}

/// Bucket for an already-folded key in a table of `table_size` buckets.
#[inline]
pub fn universal_hash(folded_key: u64, table_size: usize) -> usize {
    debug_assert!(table_size > 0, "table_size must be positive");
    let hv = mersenne_mod(HASH_PARAM_A.wrapping_mul(folded_key).wrapping_add(HASH_PARAM_B));
    (hv % table_size as u64) as usize
}

/// Keys that can be placed in a [`HashIndex`](crate::HashIndex).
///
/// Implementors only provide `fold`, which reduces the key to a `u64`; the
/// bucket computation is shared.
pub trait UniversalHash: Eq {
    fn fold(&self) -> u64;

    #[inline]
    fn bucket(&self, table_size: usize) -> usize {
        universal_hash(self.fold(), table_size)
    }
}

macro_rules! impl_unsigned_key {
    ($($t:ty),*) => {
        $(
            impl UniversalHash for $t {
                #[inline]
                fn fold(&self) -> u64 {
                    *self as u64
                }
            }
        )*
    };
}

impl_unsigned_key!(u8, u16, u32, u64, usize);

impl UniversalHash for i64 {
    #[inline]
    fn fold(&self) -> u64 {
        *self as u64
    }
}

impl UniversalHash for i32 {
    #[inline]
    fn fold(&self) -> u64 {
        i64::from(*self) as u64
    }
}

/// Base-37 polynomial accumulation over the bytes of a string.
#[inline]
pub fn fold_str(s: &str) -> u64 {
    s.bytes()
        .fold(0u64, |hv, byte| hv.wrapping_mul(STRING_BASE).wrapping_add(u64::from(byte)))
}

impl UniversalHash for str {
    #[inline]
    fn fold(&self) -> u64 {
        fold_str(self)
    }
}

impl UniversalHash for String {
    #[inline]
    fn fold(&self) -> u64 {
        fold_str(self)
    }
}

impl<T: UniversalHash + ?Sized> UniversalHash for &T {
    #[inline]
    fn fold(&self) -> u64 {
        (**self).fold()
    }
}
