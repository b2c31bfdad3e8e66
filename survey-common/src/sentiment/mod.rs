//! Lexicon-based sentiment scoring
//!
//! Scores free-text feedback on a compound polarity scale of [-1, 1] and
//! labels it positive, neutral or negative. The scorer is rule based:
//! word valences from a lexicon, adjusted for intensifiers, negation,
//! capitalisation, contrastive "but" and exclamation marks, then normalised.
//!
//! Also provides emotion frequencies (joy, anger, trust, ...) for the
//! `emotion` column stored with each response.

mod lexicon;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// Compound score at or above which text is positive
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound score at or below which text is negative
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Added to (or subtracted from) a word's valence per intensifier
const BOOSTER_INCREMENT: f64 = 0.293;
/// Extra emphasis for an ALL-CAPS word in otherwise mixed-case text
const CAPS_INCREMENT: f64 = 0.733;
/// Multiplier applied to a negated word
const NEGATION_SCALAR: f64 = -0.74;
/// Emphasis per exclamation mark
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
/// Normalisation constant: compound = x / sqrt(x² + ALPHA)
const ALPHA: f64 = 15.0;
/// How far back negators and intensifiers reach
const LOOKBACK: usize = 3;

/// Sentiment label shown next to a polarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// All labels in display order
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label a compound score
pub fn classify(compound: f64) -> SentimentLabel {
    if compound >= POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if compound <= NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Emotion categories reported by [`SentimentAnalyzer::emotion_frequencies`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Fear,
    Anger,
    Anticipation,
    Trust,
    Surprise,
    Positive,
    Negative,
    Sadness,
    Disgust,
    Joy,
}

impl Emotion {
    pub const ALL: [Emotion; 10] = [
        Emotion::Fear,
        Emotion::Anger,
        Emotion::Anticipation,
        Emotion::Trust,
        Emotion::Surprise,
        Emotion::Positive,
        Emotion::Negative,
        Emotion::Sadness,
        Emotion::Disgust,
        Emotion::Joy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Fear => "fear",
            Emotion::Anger => "anger",
            Emotion::Anticipation => "anticipation",
            Emotion::Trust => "trust",
            Emotion::Surprise => "surprise",
            Emotion::Positive => "positive",
            Emotion::Negative => "negative",
            Emotion::Sadness => "sadness",
            Emotion::Disgust => "disgust",
            Emotion::Joy => "joy",
        }
    }
}

/// Proportions of negative, neutral and positive content plus the compound score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

impl Scores {
    fn zero() -> Self {
        Self {
            neg: 0.0,
            neu: 0.0,
            pos: 0.0,
            compound: 0.0,
        }
    }

    pub fn label(&self) -> SentimentLabel {
        classify(self.compound)
    }
}

/// Rule-based sentiment analyzer. Construct once and share.
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    valences: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, bool>,
    negators: HashSet<&'static str>,
    emotions: HashMap<&'static str, &'static [Emotion]>,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

struct Token<'a> {
    raw: &'a str,
    lower: String,
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            valences: lexicon::VALENCES.iter().copied().collect(),
            boosters: lexicon::BOOSTERS.iter().copied().collect(),
            negators: lexicon::NEGATORS.iter().copied().collect(),
            emotions: lexicon::EMOTIONS.iter().copied().collect(),
        }
    }

    /// Score a piece of text
    pub fn polarity_scores(&self, text: &str) -> Scores {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Scores::zero();
        }

        let mixed_case = has_mixed_case(&tokens);
        let mut valences: Vec<f64> = Vec::with_capacity(tokens.len());

        for (i, token) in tokens.iter().enumerate() {
            let key = token.lower.as_str();
            if self.boosters.contains_key(key) || self.is_negator(key) {
                valences.push(0.0);
                continue;
            }

            let Some(&base) = self.valences.get(key) else {
                valences.push(0.0);
                continue;
            };

            let mut valence = base;
            if mixed_case && is_shouting(token.raw) {
                valence += CAPS_INCREMENT.copysign(base);
            }

            let mut negated = false;
            for back in 1..=LOOKBACK.min(i) {
                let prev = tokens[i - back].lower.as_str();
                if let Some(&boost) = self.boosters.get(prev) {
                    let decay = match back {
                        1 => 1.0,
                        2 => 0.95,
                        _ => 0.9,
                    };
                    // Boosters push away from zero, dampeners pull toward it
                    let step = if boost { BOOSTER_INCREMENT } else { -BOOSTER_INCREMENT };
                    let signed = if base < 0.0 { -step } else { step };
                    valence += signed * decay;
                }
                if self.is_negator(prev) {
                    negated = true;
                }
            }

            if negated {
                valence *= NEGATION_SCALAR;
            }
            valences.push(valence);
        }

        apply_but_rule(&tokens, &mut valences);

        let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
        let emphasis = exclamations as f64 * EXCLAMATION_INCREMENT;

        let mut sum: f64 = valences.iter().sum();
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }

        let compound = normalize(sum);

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for &v in &valences {
            if v > 0.0 {
                pos_sum += v + 1.0;
            } else if v < 0.0 {
                neg_sum += v - 1.0;
            } else {
                neu_count += 1.0;
            }
        }
        if pos_sum > neg_sum.abs() {
            pos_sum += emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= emphasis;
        }

        let total = pos_sum + neg_sum.abs() + neu_count;
        if total == 0.0 {
            return Scores::zero();
        }

        Scores {
            neg: round4(neg_sum.abs() / total),
            neu: round4(neu_count / total),
            pos: round4(pos_sum / total),
            compound: round4(compound),
        }
    }

    /// Compound score only
    pub fn compound(&self, text: &str) -> f64 {
        self.polarity_scores(text).compound
    }

    /// Relative frequency of each emotion category over emotion-bearing words.
    ///
    /// Empty when the text contains no emotion words; otherwise every
    /// category is present and the values sum to 1.
    pub fn emotion_frequencies(&self, text: &str) -> BTreeMap<String, f64> {
        let mut counts: HashMap<Emotion, usize> = HashMap::new();
        let mut total = 0usize;

        for token in tokenize(text) {
            if let Some(emotions) = self.emotions.get(token.lower.as_str()) {
                for emotion in emotions.iter() {
                    *counts.entry(*emotion).or_default() += 1;
                    total += 1;
                }
            }
        }

        if total == 0 {
            return BTreeMap::new();
        }

        Emotion::ALL
            .iter()
            .map(|emotion| {
                let count = counts.get(emotion).copied().unwrap_or(0);
                (emotion.as_str().to_string(), count as f64 / total as f64)
            })
            .collect()
    }

    fn is_negator(&self, word: &str) -> bool {
        let stripped: String = word.chars().filter(|c| *c != '\'' && *c != '’').collect();
        self.negators.contains(stripped.as_str()) || word.ends_with("n't") || word.ends_with("n’t")
    }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '’'))
        .map(|w| w.trim_matches(|c: char| c == '\'' || c == '’'))
        .filter(|w| !w.is_empty())
        .map(|raw| Token {
            raw,
            lower: raw.to_lowercase(),
        })
        .collect()
}

/// ALL-CAPS words only count as emphasis when some other word is not capitalised
fn has_mixed_case(tokens: &[Token<'_>]) -> bool {
    let shouting = tokens.iter().filter(|t| is_shouting(t.raw)).count();
    shouting > 0 && shouting < tokens.len()
}

fn is_shouting(word: &str) -> bool {
    word.chars().filter(|c| c.is_alphabetic()).count() > 1
        && word.chars().all(|c| !c.is_alphabetic() || c.is_uppercase())
}

/// Sentiment after "but" dominates: earlier words count half, later ones 1.5x
fn apply_but_rule(tokens: &[Token<'_>], valences: &mut [f64]) {
    if let Some(pivot) = tokens.iter().position(|t| t.lower == "but") {
        for (i, v) in valences.iter_mut().enumerate() {
            if i < pivot {
                *v *= 0.5;
            } else if i > pivot {
                *v *= 1.5;
            }
        }
    }
}

fn normalize(score: f64) -> f64 {
    let normalized = score / (score * score + ALPHA).sqrt();
    normalized.clamp(-1.0, 1.0)
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
