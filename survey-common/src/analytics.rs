//! Analytics aggregation over stored responses and answers

use serde::Serialize;
use std::collections::BTreeMap;

use crate::db::{Answer, SurveyResponse, UserType};
use crate::sentiment::{classify, SentimentLabel};

/// Age bucket labels, in the order counts are reported
pub const AGE_LABELS: [&str; 5] = ["0-20", "21-30", "31-40", "41-50", "51+"];

/// Inclusive upper bound of each age bucket
const AGE_BUCKET_UPPER: [i64; 5] = [20, 30, 40, 50, 100];

/// Default number of recent feedback texts in a summary
pub const DEFAULT_RECENT_FEEDBACKS: usize = 10;

/// Per-question answer statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionStat {
    pub question_id: String,
    pub response_count: usize,
    pub avg_sentiment: f64,
}

/// Dashboard summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub total_responses: usize,
    pub average_age: f64,
    pub average_rating: f64,
    pub average_sentiment: f64,
    /// Most recent feedback texts, oldest first
    pub all_feedbacks: Vec<String>,
    /// Counts per [`AGE_LABELS`] bucket
    pub age_distribution: [usize; 5],
    /// Counts for Student, Professional, Other
    pub user_type_distribution: [usize; 3],
    /// Counts for positive, neutral, negative
    pub sentiment_distribution: [usize; 3],
    pub question_stats: Vec<QuestionStat>,
}

/// Build the summary. Returns `None` when there are no responses.
///
/// `responses` and `answers` are expected in insertion order.
pub fn compute(
    responses: &[SurveyResponse],
    answers: &[Answer],
    recent_feedbacks: usize,
) -> Option<AnalyticsSummary> {
    if responses.is_empty() {
        return None;
    }

    let total = responses.len();
    let mean = |sum: f64| round2(sum / total as f64);

    let average_age = mean(responses.iter().map(|r| r.age as f64).sum());
    let average_rating = mean(responses.iter().map(|r| r.rating as f64).sum());
    let average_sentiment = mean(responses.iter().map(|r| r.sentiment).sum());

    let skip = total.saturating_sub(recent_feedbacks);
    let all_feedbacks = responses
        .iter()
        .skip(skip)
        .map(|r| r.feedback.clone())
        .collect();

    Some(AnalyticsSummary {
        total_responses: total,
        average_age,
        average_rating,
        average_sentiment,
        all_feedbacks,
        age_distribution: age_distribution(responses.iter().map(|r| r.age)),
        user_type_distribution: user_type_distribution(responses),
        sentiment_distribution: sentiment_distribution(responses),
        question_stats: question_stats(answers),
    })
}

/// Index of the age bucket, or `None` for ages outside 0..=100
pub fn age_bucket(age: i64) -> Option<usize> {
    if age < 0 {
        return None;
    }
    AGE_BUCKET_UPPER.iter().position(|&upper| age <= upper)
}

pub fn age_distribution(ages: impl IntoIterator<Item = i64>) -> [usize; 5] {
    let mut counts = [0usize; 5];
    for age in ages {
        if let Some(bucket) = age_bucket(age) {
            counts[bucket] += 1;
        }
    }
    counts
}

fn user_type_distribution(responses: &[SurveyResponse]) -> [usize; 3] {
    let mut counts = [0usize; 3];
    for response in responses {
        let index = UserType::ALL
            .iter()
            .position(|t| *t == response.user_type)
            .unwrap_or(2);
        counts[index] += 1;
    }
    counts
}

fn sentiment_distribution(responses: &[SurveyResponse]) -> [usize; 3] {
    let mut counts = [0usize; 3];
    for response in responses {
        let index = match classify(response.sentiment) {
            SentimentLabel::Positive => 0,
            SentimentLabel::Neutral => 1,
            SentimentLabel::Negative => 2,
        };
        counts[index] += 1;
    }
    counts
}

/// Answer count and mean sentiment per question, ordered by question id
fn question_stats(answers: &[Answer]) -> Vec<QuestionStat> {
    let mut grouped: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for answer in answers {
        let entry = grouped.entry(answer.question_id.as_str()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += answer.sentiment;
    }

    grouped
        .into_iter()
        .map(|(question_id, (count, sum))| {
            let avg = sum / count as f64;
            QuestionStat {
                question_id: question_id.to_string(),
                response_count: count,
                avg_sentiment: if avg.is_finite() { round2(avg) } else { 0.0 },
            }
        })
        .collect()
}

/// Case-insensitive substring search over feedback texts
pub fn search_feedbacks<'a>(feedbacks: &'a [String], term: &str) -> Vec<&'a str> {
    let needle = term.to_lowercase();
    feedbacks
        .iter()
        .filter(|f| f.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}
