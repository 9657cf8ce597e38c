//! Seeded picker for the motivational messages shown on successful matches.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SUCCESS_MESSAGES: [&str; 8] = [
    "Bravo !",
    "Excellent !",
    "Superbe trouvaille !",
    "Quel talent !",
    "Continue comme ça !",
    "Impressionnant !",
    "Bien joué !",
    "La souveraineté numérique te sourit !",
];

/// Picks a success message uniformly at random from a finite set.
///
/// Seedable so transcripts stay reproducible under `--seed`.
pub(crate) struct MessageDeck {
    rng: ChaCha8Rng,
}

impl MessageDeck {
    pub(crate) fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { rng }
    }

    pub(crate) fn pick(&mut self) -> &'static str {
        let index = self.rng.gen_range(0..SUCCESS_MESSAGES.len());
        SUCCESS_MESSAGES[index]
    }
}
