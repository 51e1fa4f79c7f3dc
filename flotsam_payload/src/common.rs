use rand::Rng;

// ASCII letters plus a raw newline. The newline is deliberate: consumers of a
// noise stream must cope with message bodies that span output lines.
const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ\n";

const NOISE_LENGTH: usize = 100;

/// Fixed-length strings of ASCII letters and embedded newlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NoiseString {
    length: usize,
}

impl Default for NoiseString {
    fn default() -> Self {
        Self {
            length: NOISE_LENGTH,
        }
    }
}

impl NoiseString {
    pub(crate) fn generate<R>(&self, rng: &mut R) -> String
    where
        R: Rng + ?Sized,
    {
        let mut s = String::with_capacity(self.length);
        for _ in 0..self.length {
            let idx = rng.random_range(0..CHARSET.len());
            s.push(char::from(CHARSET[idx]));
        }
        s
    }
}
