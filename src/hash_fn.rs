use core::fmt::Debug;

/// Signature of a string hash function usable by
/// [`HashMap`](crate::hash_map::HashMap).
pub type HashFn = fn(&str) -> u32;

const WEIGHT_BASE: u32 = 27;

/// Sums the bytes of `s`.
///
/// Anagrams collide, and short keys cluster in the low buckets. Useful for
/// demonstrating chaining, not much else.
pub fn naive_char_sum(s: &str) -> u32 {
    s.bytes()
        .fold(0u32, |h, b| h.wrapping_add(u32::from(b)))
}

/// Polynomial hash `h = h * 27 + byte` over the bytes of `s`.
pub fn weighted_char_sum(s: &str) -> u32 {
    s.bytes().fold(0u32, |h, b| {
        h.wrapping_mul(WEIGHT_BASE).wrapping_add(u32::from(b))
    })
}

/// foldhash with a fixed seed, truncated to 32 bits.
///
/// The seed is fixed so that chain layouts are reproducible across runs.
#[cfg(feature = "foldhash")]
pub fn foldhash_fixed(s: &str) -> u32 {
    use core::hash::BuildHasher;

    foldhash::fast::FixedState::with_seed(0).hash_one(s) as u32
}

/// The hash functions shipped with the crate, addressable by numeric id.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinHash {
    /// Id `0`: [`naive_char_sum`].
    Naive,
    /// Id `1`: [`weighted_char_sum`]. The default.
    #[default]
    Weighted,
    /// Id `2`: [`foldhash_fixed`].
    #[cfg(feature = "foldhash")]
    Foldhash,
}

impl BuiltinHash {
    /// All built-ins available with the enabled features, in id order.
    pub fn all() -> &'static [BuiltinHash] {
        cfg_if::cfg_if! {
            if #[cfg(feature = "foldhash")] {
                &[BuiltinHash::Naive, BuiltinHash::Weighted, BuiltinHash::Foldhash]
            } else {
                &[BuiltinHash::Naive, BuiltinHash::Weighted]
            }
        }
    }

    /// Looks up a built-in by id. Returns `None` for unknown ids.
    pub fn from_id(id: i32) -> Option<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| Self::all().get(idx).copied())
    }

    /// The numeric id of this built-in.
    pub fn id(self) -> i32 {
        match self {
            BuiltinHash::Naive => 0,
            BuiltinHash::Weighted => 1,
            #[cfg(feature = "foldhash")]
            BuiltinHash::Foldhash => 2,
        }
    }

    /// A short human readable description.
    pub fn description(self) -> &'static str {
        match self {
            BuiltinHash::Naive => "naive char sum",
            BuiltinHash::Weighted => "weighted char sum",
            #[cfg(feature = "foldhash")]
            BuiltinHash::Foldhash => "foldhash (fixed seed)",
        }
    }

    /// The function pointer implementing this built-in.
    pub fn function(self) -> HashFn {
        match self {
            BuiltinHash::Naive => naive_char_sum,
            BuiltinHash::Weighted => weighted_char_sum,
            #[cfg(feature = "foldhash")]
            BuiltinHash::Foldhash => foldhash_fixed,
        }
    }
}

/// A hash function together with its description.
///
/// Built either from a [`BuiltinHash`] or from a user supplied function
/// with [`HashFunction::custom`].
#[derive(Clone)]
pub struct HashFunction {
    function: HashFn,
    description: String,
}

impl Debug for HashFunction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashFunction")
            .field("description", &self.description)
            .finish()
    }
}

impl HashFunction {
    /// Wraps a user supplied function.
    ///
    /// A missing description falls back to `"user-supplied hash function"`.
    ///
    /// ```rust
    /// # use travel_planner::hash_fn::HashFunction;
    /// fn length(s: &str) -> u32 {
    ///     s.len() as u32
    /// }
    ///
    /// let f = HashFunction::custom(length, None);
    /// assert_eq!(f.description(), "user-supplied hash function");
    /// assert_eq!(f.hash("four"), 4);
    /// ```
    pub fn custom(function: HashFn, description: Option<&str>) -> Self {
        Self {
            function,
            description: description
                .unwrap_or("user-supplied hash function")
                .to_string(),
        }
    }

    /// Hashes `key`.
    #[inline]
    pub fn hash(&self, key: &str) -> u32 {
        (self.function)(key)
    }

    /// The description given when this function was selected.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl From<BuiltinHash> for HashFunction {
    fn from(builtin: BuiltinHash) -> Self {
        Self {
            function: builtin.function(),
            description: builtin.description().to_string(),
        }
    }
}

impl Default for HashFunction {
    fn default() -> Self {
        BuiltinHash::default().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_sum_collides_on_anagrams() {
        assert_eq!(naive_char_sum("abc"), naive_char_sum("cba"));
        assert_eq!(naive_char_sum("abc"), 97 + 98 + 99);
        assert_eq!(naive_char_sum(""), 0);
    }

    #[test]
    fn weighted_sum_is_order_sensitive() {
        assert_eq!(weighted_char_sum("a"), 97);
        assert_eq!(weighted_char_sum("ab"), 97 * 27 + 98);
        assert_ne!(weighted_char_sum("abc"), weighted_char_sum("cba"));
    }

    #[test]
    fn weighted_sum_wraps_on_long_keys() {
        // The seventh byte is the first to overflow u32.
        assert_eq!(weighted_char_sum("zzzzzz"), 1_817_896_136);
        assert_eq!(weighted_char_sum("zzzzzzz"), 1_838_555_538);
        assert_eq!(weighted_char_sum(&"z".repeat(64)), 1_979_107_072);

        let long = "interstate highway ".repeat(8);
        let widened = long
            .bytes()
            .fold(0u64, |h, b| (h * 27 + u64::from(b)) % (1 << 32));
        assert_eq!(u64::from(weighted_char_sum(&long)), widened);
    }

    #[test]
    fn builtin_ids_round_trip() {
        for builtin in BuiltinHash::all() {
            assert_eq!(BuiltinHash::from_id(builtin.id()), Some(*builtin));
        }
        assert_eq!(BuiltinHash::from_id(-1), None);
        assert_eq!(BuiltinHash::from_id(99), None);
    }

    #[test]
    fn default_is_weighted() {
        let f = HashFunction::default();
        assert_eq!(f.description(), "weighted char sum");
        assert_eq!(f.hash("ab"), weighted_char_sum("ab"));
    }

    #[cfg(feature = "foldhash")]
    #[test]
    fn foldhash_is_deterministic() {
        assert_eq!(foldhash_fixed("Denver"), foldhash_fixed("Denver"));
        assert_eq!(BuiltinHash::from_id(2), Some(BuiltinHash::Foldhash));
    }
}
