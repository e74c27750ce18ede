//! Prompt generation
//!
//! Produces one display string per invocation:
//! - Single string glyph (uniform over the catalog)
//! - Oshi notation (marker glyph + string glyph)
//! - Two-string melodic interval
//!
//! Randomness comes in through an injected `Rng` so tests can seed it.

use rand::seq::SliceRandom;
use rand::Rng;

use super::catalog::{glyph, ResolvedVocab, OCTAVE_ON_ONE, STRINGS, TSUYO_MARKER, YOWA_MARKER};

/// Push-technique category
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OshiKind {
    Yowa,
    Tsuyo,
}

/// Render an oshi notation for a 1-based string number
pub fn render_oshi(kind: OshiKind, string_no: u8) -> String {
    let marker = match kind {
        OshiKind::Yowa => YOWA_MARKER,
        OshiKind::Tsuyo => TSUYO_MARKER,
    };
    format!("{}{}", marker, glyph(string_no))
}

/// Render a melodic interval from a 0-based base string index.
///
/// String 1 with interval 5 is the fixed octave-on-one sequence. Otherwise the
/// pair ascends from the base when it fits the catalog, and is reflected
/// downward when it would run past string 13. The reflection must stay exactly
/// this (no clamping, no redraw): it keeps every drawn interval renderable.
pub fn render_interval(base_index: usize, interval: u8) -> String {
    let interval = interval as usize;
    if base_index == 0 && interval == 5 {
        return OCTAVE_ON_ONE.to_string();
    }
    if base_index + interval < STRINGS.len() {
        format!("{}{}", STRINGS[base_index], STRINGS[base_index + interval])
    } else {
        format!("{}{}", STRINGS[base_index - interval], STRINGS[base_index])
    }
}

/// Prompt generator for one session's resolved vocabulary
#[derive(Clone, Debug)]
pub struct Generator {
    vocab: ResolvedVocab,
}

impl Generator {
    pub fn new(vocab: ResolvedVocab) -> Self {
        Generator { vocab }
    }

    /// Draw the next prompt.
    ///
    /// Two independent draws decide the shape: `is_interval` with
    /// `interval_probability`, `is_oshi` with `oshi_probability`. Both set
    /// means a coin flip between the two notations; neither means a plain
    /// string glyph.
    pub fn next_prompt<R: Rng>(
        &self,
        oshi_probability: f64,
        interval_probability: f64,
        rng: &mut R,
    ) -> String {
        let is_interval = rng.gen_bool(interval_probability);
        let is_oshi = rng.gen_bool(oshi_probability);

        match (is_interval, is_oshi) {
            (true, true) => {
                if rng.gen_bool(0.5) {
                    self.draw_oshi(rng)
                } else {
                    self.draw_interval(rng)
                }
            }
            (true, false) => self.draw_interval(rng),
            (false, true) => self.draw_oshi(rng),
            (false, false) => STRINGS[rng.gen_range(0..STRINGS.len())].to_string(),
        }
    }

    /// Coin flip weak/strong, then a uniform pick from that category's strings.
    /// Catalog validation guarantees every vocabulary set is non-empty.
    fn draw_oshi<R: Rng>(&self, rng: &mut R) -> String {
        if rng.gen_bool(0.5) {
            let string_no = *self.vocab.yowa.choose(rng).unwrap();
            render_oshi(OshiKind::Yowa, string_no)
        } else {
            let string_no = *self.vocab.tsuyo.choose(rng).unwrap();
            render_oshi(OshiKind::Tsuyo, string_no)
        }
    }

    /// Uniform base string over the whole catalog, uniform interval from the
    /// resolved set
    fn draw_interval<R: Rng>(&self, rng: &mut R) -> String {
        let base_index = rng.gen_range(0..STRINGS.len());
        let interval = *self.vocab.intervals.choose(rng).unwrap();
        render_interval(base_index, interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::catalog::{Catalog, Mode};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn beginner_generator() -> Generator {
        Generator::new(Catalog::builtin().resolve(Mode::Beginner))
    }

    #[test]
    fn test_octave_on_string_one() {
        assert_eq!(render_interval(0, 5), "一五");
    }

    #[test]
    fn test_interval_ascends_or_reflects() {
        for base in 0..STRINGS.len() {
            for interval in 1u8..=12 {
                if base == 0 && interval == 5 {
                    continue;
                }
                let rendered = render_interval(base, interval);
                let k = interval as usize;
                let expected = if base + k < STRINGS.len() {
                    format!("{}{}", STRINGS[base], STRINGS[base + k])
                } else {
                    format!("{}{}", STRINGS[base - k], STRINGS[base])
                };
                assert_eq!(rendered, expected, "base {} interval {}", base, interval);
            }
        }
    }

    #[test]
    fn test_oshi_rendering() {
        assert_eq!(render_oshi(OshiKind::Yowa, 13), "ｦ巾");
        assert_eq!(render_oshi(OshiKind::Tsuyo, 4), "ｵ四");
    }

    #[test]
    fn test_zero_probabilities_yield_single_glyphs() {
        let generator = beginner_generator();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let prompt = generator.next_prompt(0.0, 0.0, &mut rng);
            assert!(STRINGS.contains(&prompt.as_str()), "got '{}'", prompt);
        }
    }

    #[test]
    fn test_certain_interval_never_yields_oshi() {
        let generator = beginner_generator();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let prompt = generator.next_prompt(0.0, 1.0, &mut rng);
            assert!(!prompt.starts_with(YOWA_MARKER) && !prompt.starts_with(TSUYO_MARKER));
            assert_eq!(prompt.chars().count(), 2, "got '{}'", prompt);
        }
    }

    #[test]
    fn test_beginner_session_vocabulary() {
        // With defaults, beginner must only ever show: plain glyphs, oshi over
        // yowa={13} / tsuyo={4,6,9}, or interval-5 pairs.
        let mut allowed: Vec<String> = STRINGS.iter().map(|s| s.to_string()).collect();
        allowed.push(render_oshi(OshiKind::Yowa, 13));
        for n in [4u8, 6, 9] {
            allowed.push(render_oshi(OshiKind::Tsuyo, n));
        }
        for base in 0..STRINGS.len() {
            allowed.push(render_interval(base, 5));
        }

        let generator = beginner_generator();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let prompt = generator.next_prompt(0.5, 0.25, &mut rng);
            assert!(allowed.contains(&prompt), "unexpected prompt '{}'", prompt);
        }
    }
}
