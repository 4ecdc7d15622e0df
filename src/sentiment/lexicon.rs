use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::KeywordCategory;

/// Crisis / self-harm terms. Any match forces High severity, in every mode.
/// Phrases are stored in normalized form (contractions expanded).
pub const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end it all",
    "want to die",
    "no point living",
    "hopeless",
    "worthless",
    "hate myself",
    "cannot take it",
    "give up",
    "breaking down",
    "cannot cope",
    "falling apart",
];

/// Emotional-distress terms; two or more matches yield Medium severity.
pub const STRESS_KEYWORDS: &[&str] = &[
    "stressed",
    "anxious",
    "depressed",
    "sad",
    "lonely",
    "isolated",
    "struggling",
    "difficult",
    "hard time",
    "worried",
    "scared",
    "exhausted",
    "tired",
    "overwhelmed",
    "burnt out",
    "pressure",
    "failing",
];

/// Academic-pressure terms; drive resource selection for Medium verdicts.
pub const ACADEMIC_KEYWORDS: &[&str] = &[
    "exam",
    "test",
    "assignment",
    "deadline",
    "grade",
    "fail",
    "behind",
    "catch up",
    "study",
    "homework",
    "project",
    "presentation",
];

/// Positive-affect terms.
pub const POSITIVE_KEYWORDS: &[&str] = &[
    "happy",
    "excited",
    "grateful",
    "confident",
    "motivated",
    "proud",
    "accomplished",
    "successful",
    "improving",
    "better",
];

static KEYWORD_PATTERNS: Lazy<Vec<(KeywordCategory, &'static str, Regex)>> = Lazy::new(|| {
    let mut patterns = Vec::new();
    for (category, keywords) in [
        (KeywordCategory::Crisis, CRISIS_KEYWORDS),
        (KeywordCategory::Stress, STRESS_KEYWORDS),
        (KeywordCategory::AcademicStress, ACADEMIC_KEYWORDS),
        (KeywordCategory::Positive, POSITIVE_KEYWORDS),
    ] {
        for &keyword in keywords {
            let pattern = format!(r"\b{}\b", regex::escape(keyword));
            patterns.push((
                category,
                keyword,
                Regex::new(&pattern).expect("keyword pattern is valid"),
            ));
        }
    }
    patterns
});

/// Word-boundary keyword matching over normalized text. Matches are returned
/// in lexicon order (crisis first), one entry per matched keyword.
pub fn match_keywords(text: &str) -> Vec<(KeywordCategory, String)> {
    KEYWORD_PATTERNS
        .iter()
        .filter(|(_, _, pattern)| pattern.is_match(text))
        .map(|(category, keyword, _)| (*category, (*keyword).to_string()))
        .collect()
}

/// Word-level polarity/subjectivity lexicon: (word, polarity [-1,1],
/// subjectivity [0,1]).
pub const POLARITY_LEXICON: &[(&str, f64, f64)] = &[
    // negative
    ("hopeless", -0.9, 0.9),
    ("worthless", -0.9, 0.9),
    ("terrible", -0.9, 0.9),
    ("awful", -0.8, 0.9),
    ("horrible", -0.8, 0.9),
    ("miserable", -0.8, 0.9),
    ("hate", -0.8, 0.9),
    ("useless", -0.8, 0.9),
    ("bad", -0.7, 0.7),
    ("depressed", -0.7, 0.9),
    ("pointless", -0.7, 0.8),
    ("sad", -0.6, 0.8),
    ("lonely", -0.6, 0.8),
    ("overwhelmed", -0.6, 0.8),
    ("angry", -0.6, 0.9),
    ("failing", -0.6, 0.7),
    ("anxious", -0.5, 0.8),
    ("stressed", -0.5, 0.8),
    ("scared", -0.5, 0.8),
    ("exhausted", -0.5, 0.7),
    ("struggling", -0.5, 0.7),
    ("upset", -0.5, 0.8),
    ("fail", -0.5, 0.6),
    ("hurt", -0.5, 0.7),
    ("worried", -0.4, 0.7),
    ("difficult", -0.4, 0.6),
    ("alone", -0.4, 0.6),
    ("tired", -0.3, 0.6),
    ("hard", -0.3, 0.5),
    // positive
    ("wonderful", 0.9, 0.9),
    ("amazing", 0.9, 0.9),
    ("happy", 0.8, 1.0),
    ("great", 0.8, 0.8),
    ("love", 0.8, 0.9),
    ("good", 0.7, 0.6),
    ("excited", 0.7, 0.9),
    ("grateful", 0.7, 0.8),
    ("proud", 0.7, 0.8),
    ("successful", 0.7, 0.8),
    ("confident", 0.6, 0.8),
    ("motivated", 0.6, 0.7),
    ("accomplished", 0.6, 0.7),
    ("enjoy", 0.6, 0.7),
    ("hopeful", 0.6, 0.8),
    ("improving", 0.5, 0.6),
    ("better", 0.5, 0.5),
    ("calm", 0.4, 0.6),
    ("fine", 0.4, 0.5),
];

/// Valence lexicon on the conventional [-4, 4] scale for the compound signal.
pub const VALENCE_LEXICON: &[(&str, f64)] = &[
    ("suicide", -3.5),
    ("die", -2.9),
    ("kill", -3.0),
    ("hopeless", -3.0),
    ("worthless", -3.0),
    ("miserable", -2.8),
    ("hate", -2.7),
    ("depressed", -2.7),
    ("bad", -2.5),
    ("angry", -2.3),
    ("fail", -2.2),
    ("failing", -2.2),
    ("terrible", -2.1),
    ("sad", -2.1),
    ("pain", -2.1),
    ("awful", -2.0),
    ("stressed", -2.0),
    ("lonely", -2.0),
    ("hurt", -2.0),
    ("crying", -2.0),
    ("anxious", -1.9),
    ("scared", -1.9),
    ("overwhelmed", -1.9),
    ("upset", -1.9),
    ("worried", -1.8),
    ("struggling", -1.8),
    ("exhausted", -1.7),
    ("difficult", -1.5),
    ("alone", -1.4),
    ("tired", -1.2),
    ("hard", -1.0),
    ("fine", 0.8),
    ("calm", 1.3),
    ("improving", 1.6),
    ("hopeful", 1.9),
    ("good", 1.9),
    ("better", 1.9),
    ("motivated", 1.9),
    ("accomplished", 1.9),
    ("excited", 2.2),
    ("confident", 2.2),
    ("proud", 2.2),
    ("successful", 2.2),
    ("enjoy", 2.2),
    ("grateful", 2.3),
    ("happy", 2.7),
    ("wonderful", 2.7),
    ("amazing", 2.8),
    ("great", 3.1),
    ("love", 3.2),
];

/// Tokens that intensify the following sentiment word.
pub const BOOSTERS: &[&str] = &[
    "very",
    "really",
    "extremely",
    "absolutely",
    "completely",
    "totally",
    "so",
];

/// Tokens that negate a following sentiment word.
pub const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "cannot", "nobody", "neither", "nor", "without",
];

/// Contraction expansions applied during normalization, after apostrophes are
/// stripped (so both "can't" and "cant" expand to "cannot").
const REPLACEMENTS: &[(&str, &str)] = &[
    ("u", "you"),
    ("ur", "your"),
    ("cant", "cannot"),
    ("wont", "will not"),
    ("dont", "do not"),
    ("im", "i am"),
    ("ive", "i have"),
    ("thats", "that is"),
    ("isnt", "is not"),
    ("doesnt", "does not"),
    ("didnt", "did not"),
    ("couldnt", "could not"),
];

/// Lowercase, strip apostrophes, expand common contractions, and collapse
/// whitespace.
pub fn normalize(text: &str) -> String {
    let lowered = text
        .to_lowercase()
        .replace(['\u{2019}', '\''], "");

    let words: Vec<&str> = lowered
        .split_whitespace()
        .map(|word| {
            for &(short, long) in REPLACEMENTS {
                // Trailing punctuation must not block the expansion
                if word.trim_end_matches(|c: char| c.is_ascii_punctuation()) == short {
                    return long;
                }
            }
            word
        })
        .collect();

    words.join(" ")
}

/// Split normalized text into alphabetic tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .collect()
}
