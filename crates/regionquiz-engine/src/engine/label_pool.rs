use std::fmt::Write as _;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic shuffling.
///
/// A 128-bit seed for the generator behind label pools and game orders. The
/// same seed reproduces the same shuffles, which keeps tests and replays
/// deterministic. Serialized as a 32-character hex string.
///
/// # Example
///
/// ```
/// use regionquiz_engine::{LabelPool, ShuffleSeed};
/// use rand::Rng as _;
///
/// let seed: ShuffleSeed = rand::rng().random();
/// let labels = ["Elmas", "Grafit", "Fulleren"].map(String::from);
///
/// let a = LabelPool::with_seed(labels.clone(), seed);
/// let b = LabelPool::with_seed(labels, seed);
/// assert_eq!(a.labels(), b.labels());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShuffleSeed([u8; 16]);

impl ShuffleSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub(crate) fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl Serialize for ShuffleSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for ShuffleSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid seed hex: {input}")]
pub struct ParseSeedError {
    input: String,
}

impl std::str::FromStr for ShuffleSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Distribution<ShuffleSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShuffleSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        ShuffleSeed(seed)
    }
}

/// The labels not yet placed on a region, in shuffled order.
///
/// The pool owns its generator, so every [`Self::refill`] produces a fresh
/// permutation while staying reproducible from the initial seed.
#[derive(Debug, Clone)]
pub struct LabelPool {
    rng: Pcg32,
    labels: Vec<String>,
}

impl LabelPool {
    /// Creates a pool with a random seed.
    #[must_use]
    pub fn new(labels: impl IntoIterator<Item = String>) -> Self {
        Self::with_seed(labels, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic shuffling.
    #[must_use]
    pub fn with_seed(labels: impl IntoIterator<Item = String>, seed: ShuffleSeed) -> Self {
        let mut this = Self {
            rng: seed.rng(),
            labels: Vec::new(),
        };
        this.refill(labels);
        this
    }

    /// Replaces the contents with `labels` in a new uniformly random order.
    pub fn refill(&mut self, labels: impl IntoIterator<Item = String>) {
        self.labels.clear();
        self.labels.extend(labels);
        self.labels.shuffle(&mut self.rng);
    }

    /// Removes and returns the first label equal to `label`.
    pub fn take(&mut self, label: &str) -> Option<String> {
        let index = self.labels.iter().position(|l| l == label)?;
        Some(self.labels.remove(index))
    }

    /// Returns a label to the end of the pool.
    pub fn put_back(&mut self, label: String) {
        self.labels.push(label);
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        ["Elmas", "Grafit", "Fulleren", "Nanotüp", "Grafen"]
            .map(String::from)
            .to_vec()
    }

    fn sorted(mut v: Vec<String>) -> Vec<String> {
        v.sort();
        v
    }

    mod shuffle_seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: ShuffleSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: ShuffleSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            let seed = ShuffleSeed::from_bytes([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
        }

        #[test]
        fn test_error_invalid_hex() {
            let json = "\"ghijklmnopqrstuvwxyzghijklmnopqr\"";
            let err = serde_json::from_str::<ShuffleSeed>(json).unwrap_err();
            assert!(err.to_string().contains("invalid seed hex"));
        }

        #[test]
        fn test_error_wrong_length() {
            assert!("0123456789abcdef".parse::<ShuffleSeed>().is_err());
            assert!("".parse::<ShuffleSeed>().is_err());
        }
    }

    #[test]
    fn test_pool_is_permutation_of_input() {
        let pool = LabelPool::with_seed(labels(), ShuffleSeed::from_bytes([7; 16]));
        assert_eq!(pool.len(), 5);
        assert_eq!(sorted(pool.labels().to_vec()), sorted(labels()));
    }

    #[test]
    fn test_same_seed_same_order() {
        let seed = ShuffleSeed::from_bytes([42; 16]);
        let mut a = LabelPool::with_seed(labels(), seed);
        let mut b = LabelPool::with_seed(labels(), seed);
        assert_eq!(a.labels(), b.labels());

        a.refill(labels());
        b.refill(labels());
        assert_eq!(a.labels(), b.labels());
    }

    #[test]
    fn test_take_and_put_back() {
        let mut pool = LabelPool::with_seed(labels(), ShuffleSeed::from_bytes([1; 16]));

        assert_eq!(pool.take("Grafit").as_deref(), Some("Grafit"));
        assert!(!pool.contains("Grafit"));
        assert_eq!(pool.len(), 4);
        assert_eq!(pool.take("Grafit"), None);

        pool.put_back("Grafit".to_owned());
        assert_eq!(pool.labels().last().map(String::as_str), Some("Grafit"));
        assert_eq!(sorted(pool.labels().to_vec()), sorted(labels()));
    }
}
