//! Stochastic corpus generators for test variations
//!
//! Uses seeded RNG for reproducibility. Print seed on failure for replay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded generator for reproducible stochastic tests
pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

/// A generated table and the records it must parse to
pub struct GeneratedTable {
    pub text: String,
    /// (line number, fields) for every vector line
    pub expected: Vec<(usize, Vec<String>)>,
}

impl Gen {
    /// Create with specific seed (for reproduction)
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create from environment or random seed
    pub fn from_env_or_random() -> Self {
        let seed = std::env::var("UTS46_TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        Self::new(seed)
    }

    /// Geometric distribution: count until rand > alpha
    pub fn geometric(&mut self, alpha: f64) -> usize {
        let mut n = 0;
        while self.rng.gen::<f64>() < alpha {
            n += 1;
        }
        n
    }

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Random mode letter
    pub fn mode(&mut self) -> &'static str {
        ["B", "T", "N"][self.rng.gen_range(0..3)]
    }

    /// Random label: ASCII, Latin-1 and a few wider characters, no separators
    pub fn label(&mut self) -> String {
        const CHARS: &[char] = &[
            'a', 'b', 'c', 'x', 'n', '-', '0', '7', 'é', 'ß', 'ü', 'א', '日', '\u{10437}',
        ];
        let len = 1 + self.geometric(0.7);
        (0..len)
            .map(|_| CHARS[self.rng.gen_range(0..CHARS.len())])
            .collect()
    }

    /// Random domain of 1-3 labels
    pub fn domain(&mut self) -> String {
        let count = 1 + self.rng.gen_range(0..3);
        (0..count).map(|_| self.label()).collect::<Vec<_>>().join(".")
    }

    /// Random expected field: empty, a marker, or a domain
    pub fn expected_field(&mut self) -> String {
        match self.rng.gen_range(0..4) {
            0 => String::new(),
            1 => format!("[{}{}]", ["A", "B", "P", "V"][self.rng.gen_range(0..4)], self.rng.gen_range(1..9)),
            _ => self.domain(),
        }
    }

    /// Random whitespace padding (spaces and tabs)
    pub fn padding(&mut self) -> String {
        let len = self.geometric(0.4);
        (0..len).map(|_| if self.chance(0.5) { ' ' } else { '\t' }).collect()
    }

    /// Random vector line, padded, with an optional trailing comment
    pub fn vector_fields(&mut self) -> Vec<String> {
        let mut fields = vec![
            self.mode().to_string(),
            self.domain(),
            self.expected_field(),
            self.expected_field(),
        ];
        if self.chance(0.2) {
            fields.push("NV8".to_string());
        }
        fields
    }

    /// Random table mixing vector, comment and blank lines
    pub fn table(&mut self, lines: usize) -> GeneratedTable {
        let mut text = String::new();
        let mut expected = Vec::new();

        for line_number in 1..=lines {
            match self.rng.gen_range(0..10) {
                0 => text.push_str(&format!("{}# comment {}", self.padding(), line_number)),
                1 => text.push_str(&self.padding()),
                _ => {
                    let fields = self.vector_fields();
                    let padded: Vec<String> = fields
                        .iter()
                        .map(|f| format!("{}{}{}", self.padding(), f, self.padding()))
                        .collect();
                    text.push_str(&padded.join(";"));
                    if self.chance(0.3) {
                        text.push_str(&format!(" # {}", self.domain()));
                    }
                    expected.push((line_number, fields));
                }
            }
            text.push('\n');
        }

        GeneratedTable { text, expected }
    }
}
