//! Random sources feeding nondeterministic key operations.

use std::fmt;

use rand::{CryptoRng, RngCore, SeedableRng, rngs::StdRng};

/// A cryptographically secure random source owned by one context.
///
/// Each [`PkContext`](crate::PkContext) owns exactly one [`RandomSource`],
/// which feeds the nondeterministic native primitives (RSA signature and
/// encryption padding). Every draw advances the stream, which is why the
/// drawing operations take their context by mutable reference.
///
/// Implements [`RngCore`] and [`CryptoRng`], so it can be handed to the
/// native primitives directly.
///
/// # Examples
///
/// ```
/// use pkops::RandomSource;
///
/// // a fixed seed reproduces its byte stream
/// let mut source = RandomSource::from_seed([1; 32]);
/// let mut repeat = RandomSource::from_seed([1; 32]);
///
/// let mut first = [0; 16];
/// let mut second = [0; 16];
/// source.fill(&mut first);
/// repeat.fill(&mut second);
/// assert_eq!(first, second);
/// ```
pub struct RandomSource(StdRng);

impl RandomSource {
    /// Creates a [`RandomSource`] seeded from operating system entropy.
    pub fn new() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Creates a [`RandomSource`] from a fixed seed.
    ///
    /// The resulting byte stream is fully deterministic, which makes
    /// operations reproducible in tests. Production contexts use
    /// [`RandomSource::new`].
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self(StdRng::from_seed(seed))
    }

    /// Fills `buffer` with random bytes.
    pub fn fill(&mut self, buffer: &mut [u8]) {
        self.0.fill_bytes(buffer);
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

// The stream state stays out of debug output.
impl fmt::Debug for RandomSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomSource").finish_non_exhaustive()
    }
}

impl RngCore for RandomSource {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl CryptoRng for RandomSource {}
