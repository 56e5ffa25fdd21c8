use crate::models::{MentorProfile, ScoringWeights};

/// Words too common to say anything about a mentor
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "for", "from", "i", "im", "in", "into", "is",
    "it", "me", "my", "of", "on", "or", "some", "someone", "the", "to", "want", "who", "with",
    "would", "like", "learn", "looking", "need", "help", "mentor", "about", "get", "how",
];

/// Split free text into lowercase, de-duplicated search terms
pub fn tokenize(text: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();

    for word in text
        .split(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
        .map(str::to_lowercase)
    {
        if word.len() < 2 || STOP_WORDS.contains(&word.as_str()) {
            continue;
        }
        if !terms.contains(&word) {
            terms.push(word);
        }
    }

    terms
}

/// Calculate a lexical relevance score (0-100) of a mentor for the given terms
///
/// Scoring formula:
/// score = (
///     name_overlap * name +           # Terms found in the name
///     expertise_overlap * expertise + # Terms found in any expertise field
///     summary_overlap * summary       # Terms found in the experience summary
/// ) * 100
///
/// Also returns the expertise fields that matched at least one term.
pub fn calculate_relevance_score(
    profile: &MentorProfile,
    terms: &[String],
    weights: &ScoringWeights,
) -> (f64, Vec<String>) {
    if terms.is_empty() {
        return (0.0, Vec::new());
    }

    let name = profile.name.to_lowercase();
    let summary = profile.experience_summary.to_lowercase();
    let fields: Vec<String> = profile
        .expertise_fields
        .iter()
        .map(|f| f.to_lowercase())
        .collect();

    let mut name_hits = 0usize;
    let mut expertise_hits = 0usize;
    let mut summary_hits = 0usize;
    let mut matched_fields = Vec::new();

    for term in terms {
        if name.contains(term.as_str()) {
            name_hits += 1;
        }

        let mut hit = false;
        for (lower, original) in fields.iter().zip(&profile.expertise_fields) {
            if lower.contains(term.as_str()) {
                hit = true;
                if !matched_fields.contains(original) {
                    matched_fields.push(original.clone());
                }
            }
        }
        if hit {
            expertise_hits += 1;
        }

        if summary.contains(term.as_str()) {
            summary_hits += 1;
        }
    }

    let total = terms.len() as f64;
    let score = (name_hits as f64 / total * weights.name
        + expertise_hits as f64 / total * weights.expertise
        + summary_hits as f64 / total * weights.summary)
        * 100.0;

    (score.clamp(0.0, 100.0), matched_fields)
}

/// First `max_words` words of a summary, with an ellipsis when shortened
pub fn summary_snippet(summary: &str, max_words: usize) -> String {
    let words: Vec<&str> = summary.split_whitespace().collect();
    if words.len() <= max_words {
        return words.join(" ");
    }
    format!("{}...", words[..max_words].join(" "))
}
