use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::sentiment::lexicon::{BOOSTERS, NEGATIONS, POLARITY_LEXICON, VALENCE_LEXICON};

/// How far back a negation reaches, in tokens
const NEGATION_WINDOW: usize = 3;

/// Scalar applied to a negated valence
const NEGATION_FACTOR: f64 = -0.74;

/// Increment contributed by a booster token
const BOOST_INCREMENT: f64 = 0.293;

/// Normalization constant for the compound score
const COMPOUND_ALPHA: f64 = 15.0;

static POLARITY_MAP: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    POLARITY_LEXICON
        .iter()
        .map(|&(word, polarity, subjectivity)| (word, (polarity, subjectivity)))
        .collect()
});

static VALENCE_MAP: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| VALENCE_LEXICON.iter().copied().collect());

/// Word-polarity signal: averaged polarity and subjectivity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolaritySignal {
    /// Mean polarity of recognized words [-1, 1]
    pub polarity: f64,

    /// Mean subjectivity of recognized words [0, 1]
    pub subjectivity: f64,
}

/// Averaged word-polarity analyzer. Scores each recognized token and averages;
/// text without any recognized word reads as neutral.
pub struct PolarityAnalyzer;

impl PolarityAnalyzer {
    pub fn analyze(tokens: &[String]) -> PolaritySignal {
        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut hits = 0usize;

        for (index, token) in tokens.iter().enumerate() {
            if let Some(&(polarity, subjectivity)) = POLARITY_MAP.get(token.as_str()) {
                let signed = if is_negated(tokens, index) {
                    -polarity
                } else {
                    polarity
                };
                polarity_sum += signed;
                subjectivity_sum += subjectivity;
                hits += 1;
            }
        }

        if hits == 0 {
            return PolaritySignal {
                polarity: 0.0,
                subjectivity: 0.0,
            };
        }

        PolaritySignal {
            polarity: (polarity_sum / hits as f64).clamp(-1.0, 1.0),
            subjectivity: (subjectivity_sum / hits as f64).clamp(0.0, 1.0),
        }
    }
}

/// Valence-lexicon compound analyzer. Sums signed valences with negation
/// flipping and booster amplification, then squashes the total into [-1, 1]
/// with x / sqrt(x^2 + alpha).
pub struct CompoundAnalyzer;

impl CompoundAnalyzer {
    pub fn analyze(tokens: &[String]) -> f64 {
        let mut total = 0.0;

        for (index, token) in tokens.iter().enumerate() {
            let Some(&valence) = VALENCE_MAP.get(token.as_str()) else {
                continue;
            };

            let mut scored = valence;

            if index > 0 && BOOSTERS.contains(&tokens[index - 1].as_str()) {
                scored += scored.signum() * BOOST_INCREMENT;
            }

            if is_negated(tokens, index) {
                scored *= NEGATION_FACTOR;
            }

            total += scored;
        }

        (total / (total * total + COMPOUND_ALPHA).sqrt()).clamp(-1.0, 1.0)
    }
}

fn is_negated(tokens: &[String], index: usize) -> bool {
    let start = index.saturating_sub(NEGATION_WINDOW);
    tokens[start..index]
        .iter()
        .any(|token| NEGATIONS.contains(&token.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::lexicon::{normalize, tokenize};

    fn tokens(text: &str) -> Vec<String> {
        tokenize(&normalize(text))
    }

    #[test]
    fn test_negative_text_scores_negative() {
        let signal = PolarityAnalyzer::analyze(&tokens("everything is terrible and awful"));
        assert!(signal.polarity < -0.5);
        assert!(signal.subjectivity > 0.5);

        let compound = CompoundAnalyzer::analyze(&tokens("everything is terrible and awful"));
        assert!(compound < -0.5);
    }

    #[test]
    fn test_positive_text_scores_positive() {
        let signal = PolarityAnalyzer::analyze(&tokens("I am happy and grateful"));
        assert!(signal.polarity > 0.5);

        let compound = CompoundAnalyzer::analyze(&tokens("I am happy and grateful"));
        assert!(compound > 0.3);
    }

    #[test]
    fn test_unknown_words_are_neutral() {
        let signal = PolarityAnalyzer::analyze(&tokens("the quarterly syllabus arrived"));
        assert_eq!(signal.polarity, 0.0);
        assert_eq!(signal.subjectivity, 0.0);
        assert_eq!(CompoundAnalyzer::analyze(&tokens("the quarterly syllabus arrived")), 0.0);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let plain = PolarityAnalyzer::analyze(&tokens("I am happy"));
        let negated = PolarityAnalyzer::analyze(&tokens("I am not happy"));
        assert!(plain.polarity > 0.0);
        assert!(negated.polarity < 0.0);
    }

    #[test]
    fn test_booster_amplifies_compound() {
        let plain = CompoundAnalyzer::analyze(&tokens("I am sad"));
        let boosted = CompoundAnalyzer::analyze(&tokens("I am very sad"));
        assert!(boosted < plain);
    }

    #[test]
    fn test_compound_stays_in_range() {
        let text = "terrible awful horrible miserable hopeless worthless sad depressed";
        let compound = CompoundAnalyzer::analyze(&tokens(text));
        assert!((-1.0..=1.0).contains(&compound));
        assert!(compound < -0.8);
    }
}
