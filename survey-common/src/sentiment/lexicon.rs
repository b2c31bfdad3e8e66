//! Word lists used by the sentiment scorer
//!
//! Valences are on the usual -4..=4 scale (mean human rating per word).

use super::Emotion;

/// Word valences
pub(super) const VALENCES: &[(&str, f64)] = &[
    // positive
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("calm", 1.3),
    ("clean", 1.7),
    ("clear", 1.6),
    ("comfortable", 2.3),
    ("convenient", 1.9),
    ("cool", 1.3),
    ("delight", 2.9),
    ("delighted", 3.1),
    ("easy", 1.9),
    ("efficient", 1.8),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("excellent", 2.7),
    ("fantastic", 2.6),
    ("fast", 1.0),
    ("fine", 0.8),
    ("friendly", 2.2),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("helpful", 1.8),
    ("impressed", 2.1),
    ("impressive", 2.3),
    ("informative", 1.8),
    ("intuitive", 1.5),
    ("kind", 2.4),
    ("like", 1.5),
    ("liked", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("nice", 1.8),
    ("perfect", 2.7),
    ("pleasant", 2.3),
    ("pleased", 1.9),
    ("polite", 1.8),
    ("professional", 1.2),
    ("quick", 1.1),
    ("recommend", 1.5),
    ("reliable", 1.9),
    ("satisfied", 1.8),
    ("smooth", 1.4),
    ("solid", 1.1),
    ("success", 2.7),
    ("superb", 3.1),
    ("support", 1.7),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("useful", 1.9),
    ("valuable", 2.1),
    ("welcoming", 2.0),
    ("wonderful", 2.7),
    ("worth", 0.9),
    // negative
    ("angry", -2.3),
    ("annoyed", -1.6),
    ("annoying", -1.8),
    ("awful", -2.0),
    ("bad", -2.5),
    ("boring", -1.3),
    ("broken", -1.6),
    ("buggy", -1.6),
    ("confused", -1.3),
    ("confusing", -1.3),
    ("crash", -1.7),
    ("crashed", -1.8),
    ("dirty", -1.9),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("dislike", -1.6),
    ("expensive", -0.9),
    ("fail", -2.5),
    ("failed", -2.3),
    ("frustrated", -2.1),
    ("frustrating", -1.9),
    ("hate", -2.7),
    ("hated", -3.2),
    ("horrible", -2.5),
    ("poor", -2.1),
    ("problem", -1.7),
    ("problems", -1.7),
    ("rude", -2.0),
    ("sad", -2.1),
    ("slow", -0.9),
    ("terrible", -2.1),
    ("unfriendly", -1.5),
    ("unhappy", -1.8),
    ("unhelpful", -1.8),
    ("useless", -1.8),
    ("waste", -1.8),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

/// Intensity modifiers: `true` boosts, `false` dampens
pub(super) const BOOSTERS: &[(&str, bool)] = &[
    ("absolutely", true),
    ("completely", true),
    ("especially", true),
    ("extremely", true),
    ("highly", true),
    ("incredibly", true),
    ("really", true),
    ("so", true),
    ("super", true),
    ("totally", true),
    ("truly", true),
    ("very", true),
    ("barely", false),
    ("kinda", false),
    ("marginally", false),
    ("partly", false),
    ("slightly", false),
    ("somewhat", false),
];

pub(super) const NEGATORS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "didnt", "doesnt", "dont", "hardly", "hasnt",
    "havent", "isnt", "neither", "never", "no", "nobody", "none", "nor", "not", "nothing",
    "rarely", "seldom", "shouldnt", "wasnt", "werent", "without", "wont", "wouldnt",
];

/// Word-to-emotion associations
pub(super) const EMOTIONS: &[(&str, &[Emotion])] = {
    use Emotion::*;
    &[
        ("angry", &[Anger, Negative]),
        ("annoying", &[Anger, Negative]),
        ("awful", &[Anger, Disgust, Fear, Negative, Sadness]),
        ("bad", &[Anger, Disgust, Fear, Negative, Sadness]),
        ("beautiful", &[Joy, Positive]),
        ("broken", &[Anger, Fear, Negative, Sadness]),
        ("crash", &[Fear, Negative, Surprise]),
        ("delight", &[Anticipation, Joy, Positive]),
        ("dirty", &[Disgust, Negative]),
        ("disappointed", &[Anger, Disgust, Negative, Sadness]),
        ("enjoy", &[Anticipation, Joy, Positive, Trust]),
        ("excellent", &[Joy, Positive, Trust]),
        ("friendly", &[Anticipation, Joy, Positive, Trust]),
        ("frustrated", &[Anger, Disgust, Negative, Sadness]),
        ("fun", &[Anticipation, Joy, Positive]),
        ("good", &[Anticipation, Joy, Positive, Surprise, Trust]),
        ("great", &[Joy, Positive]),
        ("happy", &[Anticipation, Joy, Positive, Trust]),
        ("hate", &[Anger, Disgust, Fear, Negative, Sadness]),
        ("helpful", &[Joy, Positive, Trust]),
        ("horrible", &[Anger, Disgust, Fear, Negative]),
        ("love", &[Joy, Positive]),
        ("perfect", &[Anticipation, Joy, Positive, Trust]),
        ("pleasant", &[Anticipation, Joy, Positive, Surprise, Trust]),
        ("problem", &[Fear, Negative, Sadness]),
        ("reliable", &[Positive, Trust]),
        ("rude", &[Anger, Disgust, Negative]),
        ("sad", &[Negative, Sadness]),
        ("slow", &[Negative]),
        ("success", &[Anticipation, Joy, Positive]),
        ("surprise", &[Fear, Joy, Positive, Surprise]),
        ("terrible", &[Anger, Disgust, Fear, Negative, Sadness]),
        ("thank", &[Joy, Positive, Trust]),
        ("unhappy", &[Anger, Disgust, Negative, Sadness]),
        ("useful", &[Positive]),
        ("waste", &[Disgust, Negative]),
        ("worst", &[Negative]),
        ("wrong", &[Negative]),
    ]
};
