use crate::core::{
    prompts::{format_mentor_catalogue, recommendation_prompt, strip_code_fence},
    scoring::{calculate_relevance_score, summary_snippet, tokenize},
};
use crate::models::{MatchResult, MentorProfile, RecommendedMentor, ScoringWeights};
use crate::services::{CompletionError, CompletionRequest, CompletionService, MentorStore, SafetyPolicy, StoreError};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

pub const NO_MENTORS_ANALYSIS: &str =
    "Currently, there are no mentors available in our database. Please check back later.";
pub const MALFORMED_OUTPUT_ANALYSIS: &str = "I couldn't find suitable mentor recommendations based on your query at this time. You might want to try rephrasing your request or check our general mentor listings.";
pub const UNEXPECTED_ERROR_ANALYSIS: &str =
    "An unexpected error occurred while trying to generate mentor recommendations. Please try again later.";
pub const NO_VALID_MATCHES_ANALYSIS: &str = "None of the suggested mentors could be matched to our current directory. Try rephrasing your request or browse the mentor listings.";
pub const NO_LEXICAL_MATCHES_ANALYSIS: &str = "No mentor's expertise or experience matched your request. Try describing the skills you want to learn in different words.";

/// Upper bound on recommendations in any result
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Maximum words kept in a generated experience snippet
const SNIPPET_WORDS: usize = 20;

/// Why a recommendation request could not produce a ranked result
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("mentor catalogue is empty")]
    EmptyCatalogue,

    #[error("mentor store failed: {0}")]
    Store(#[from] StoreError),

    #[error("completion service failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("completion output did not match the expected shape: {0}")]
    MalformedOutput(#[from] serde_json::Error),
}

impl RecommendError {
    /// User-facing analysis for the no-throw contract
    pub fn fallback_analysis(&self) -> &'static str {
        match self {
            RecommendError::EmptyCatalogue => NO_MENTORS_ANALYSIS,
            RecommendError::MalformedOutput(_) => MALFORMED_OUTPUT_ANALYSIS,
            RecommendError::Store(_) | RecommendError::Completion(_) => UNEXPECTED_ERROR_ANALYSIS,
        }
    }
}

/// How candidates are ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingStrategy {
    /// Delegate ranking to the completion service
    #[default]
    Completion,
    /// Rank locally by weighted lexical overlap
    Lexical,
}

#[derive(Debug, Clone)]
pub struct RecommenderSettings {
    pub strategy: RankingStrategy,
    pub max_recommendations: usize,
    pub weights: ScoringWeights,
    pub safety: SafetyPolicy,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self {
            strategy: RankingStrategy::default(),
            max_recommendations: 3,
            weights: ScoringWeights::default(),
            safety: SafetyPolicy::permissive(),
        }
    }
}

/// Turns a free-text need into ranked mentor suggestions
///
/// # Pipeline Stages
/// 1. Snapshot the catalogue (short-circuit when empty)
/// 2. Rank, either through the completion service or lexically
/// 3. Reconcile the ranking against the snapshot
///
/// `recommend` never fails: every error is logged and turned into an empty
/// result with an explanatory analysis.
#[derive(Clone)]
pub struct Recommender {
    store: Arc<dyn MentorStore>,
    completion: Arc<dyn CompletionService>,
    settings: RecommenderSettings,
}

impl Recommender {
    pub fn new(
        store: Arc<dyn MentorStore>,
        completion: Arc<dyn CompletionService>,
        mut settings: RecommenderSettings,
    ) -> Self {
        settings.max_recommendations = settings.max_recommendations.clamp(1, MAX_RECOMMENDATIONS);
        Self {
            store,
            completion,
            settings,
        }
    }

    pub fn settings(&self) -> &RecommenderSettings {
        &self.settings
    }

    /// Recommend up to `max_recommendations` mentors for a query
    pub async fn recommend(&self, user_query: &str) -> MatchResult {
        tracing::info!("Recommendation requested: {:?}", truncate(user_query, 200));

        match self.try_recommend(user_query).await {
            Ok(result) => {
                tracing::info!(
                    "Returning {} recommendations",
                    result.recommendations.len()
                );
                result
            }
            Err(RecommendError::EmptyCatalogue) => {
                tracing::info!("No mentors in catalogue, skipping completion call");
                MatchResult::empty_with_analysis(NO_MENTORS_ANALYSIS)
            }
            Err(e @ RecommendError::MalformedOutput(_)) => {
                tracing::warn!("Recommendation degraded: {}", e);
                MatchResult::empty_with_analysis(e.fallback_analysis())
            }
            Err(e) => {
                tracing::error!("Recommendation failed: {}", e);
                MatchResult::empty_with_analysis(e.fallback_analysis())
            }
        }
    }

    /// Recommend, surfacing the tagged cause of any failure
    pub async fn try_recommend(&self, user_query: &str) -> Result<MatchResult, RecommendError> {
        let mentors = self.store.get_all().await?;
        if mentors.is_empty() {
            return Err(RecommendError::EmptyCatalogue);
        }

        match self.settings.strategy {
            RankingStrategy::Completion => self.rank_with_completion(user_query, &mentors).await,
            RankingStrategy::Lexical => Ok(self.rank_lexically(user_query, &mentors)),
        }
    }

    async fn rank_with_completion(
        &self,
        user_query: &str,
        mentors: &[MentorProfile],
    ) -> Result<MatchResult, RecommendError> {
        let catalogue = format_mentor_catalogue(mentors);
        tracing::debug!("Formatted mentor catalogue length: {}", catalogue.len());

        let prompt = recommendation_prompt(user_query, &catalogue, self.settings.max_recommendations);
        let request = CompletionRequest::json(prompt).with_safety(self.settings.safety.clone());

        let raw = self.completion.generate(&request).await?;
        tracing::debug!("Raw recommendation output: {}", truncate(&raw, 200));

        let parsed: MatchResult = serde_json::from_str(strip_code_fence(&raw))?;
        Ok(reconcile(parsed, mentors, self.settings.max_recommendations))
    }

    fn rank_lexically(&self, user_query: &str, mentors: &[MentorProfile]) -> MatchResult {
        let terms = tokenize(user_query);

        let mut scored: Vec<(f64, &MentorProfile, Vec<String>)> = mentors
            .iter()
            .filter_map(|mentor| {
                let (score, matched) = calculate_relevance_score(mentor, &terms, &self.settings.weights);
                (score > 0.0).then_some((score, mentor, matched))
            })
            .collect();

        // Stable sort keeps store order among equal scores
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(self.settings.max_recommendations);

        if scored.is_empty() {
            return MatchResult::empty_with_analysis(NO_LEXICAL_MATCHES_ANALYSIS);
        }

        let recommendations: Vec<RecommendedMentor> = scored
            .into_iter()
            .map(|(score, mentor, matched)| {
                tracing::debug!("Lexical score {:.1} for {}", score, mentor.id);
                RecommendedMentor {
                    mentor_id: mentor.id.clone(),
                    mentor_name: mentor.name.clone(),
                    justification: lexical_justification(mentor, &matched),
                    expertise_fields: Some(mentor.expertise_fields.clone()),
                    experience_summary_snippet: Some(summary_snippet(
                        &mentor.experience_summary,
                        SNIPPET_WORDS,
                    )),
                }
            })
            .collect();

        let analysis = format!(
            "Found {} mentor{} whose profile overlaps with your request.",
            recommendations.len(),
            if recommendations.len() == 1 { "" } else { "s" }
        );

        MatchResult {
            recommendations,
            analysis: Some(analysis),
        }
    }
}

fn lexical_justification(mentor: &MentorProfile, matched_fields: &[String]) -> String {
    if matched_fields.is_empty() {
        format!(
            "{}'s experience relates to what you described in your request.",
            mentor.name
        )
    } else {
        format!(
            "{}'s expertise in {} matches what you are looking for.",
            mentor.name,
            matched_fields.join(", ")
        )
    }
}

/// Reconcile a generated ranking against the catalogue it was built from
///
/// Drops unknown and repeated ids, restores names from the catalogue, keeps
/// only expertise fields the mentor actually has and caps the list length at
/// `max` (never above [`MAX_RECOMMENDATIONS`]).
pub fn reconcile(result: MatchResult, mentors: &[MentorProfile], max: usize) -> MatchResult {
    let max = max.min(MAX_RECOMMENDATIONS);
    let by_id: HashMap<&str, &MentorProfile> = mentors.iter().map(|m| (m.id.as_str(), m)).collect();
    let suggested = result.recommendations.len();
    let mut seen = HashSet::new();

    let recommendations: Vec<RecommendedMentor> = result
        .recommendations
        .into_iter()
        .filter_map(|mut rec| {
            let Some(mentor) = by_id.get(rec.mentor_id.as_str()) else {
                tracing::warn!("Dropping recommendation for unknown mentor id {:?}", rec.mentor_id);
                return None;
            };
            if !seen.insert(mentor.id.as_str()) {
                return None;
            }

            rec.mentor_name = mentor.name.clone();
            rec.expertise_fields = Some(known_fields(rec.expertise_fields.take(), mentor));
            Some(rec)
        })
        .take(max)
        .collect();

    // Text about dropped mentors would describe people who are not in the directory
    let analysis = match result.analysis {
        _ if recommendations.is_empty() && suggested > 0 => Some(NO_VALID_MATCHES_ANALYSIS.to_string()),
        Some(a) if !a.trim().is_empty() => Some(a),
        _ if recommendations.is_empty() => Some(MALFORMED_OUTPUT_ANALYSIS.to_string()),
        _ => None,
    };

    MatchResult {
        recommendations,
        analysis,
    }
}

/// Suggested fields the mentor really lists, in the mentor's spelling, or
/// the mentor's full list when none survive
fn known_fields(suggested: Option<Vec<String>>, mentor: &MentorProfile) -> Vec<String> {
    let mut kept: Vec<String> = Vec::new();

    for field in suggested.unwrap_or_default() {
        let wanted = field.trim().to_lowercase();
        let known = mentor
            .expertise_fields
            .iter()
            .find(|f| f.to_lowercase() == wanted);

        match known {
            Some(f) if !kept.contains(f) => kept.push(f.clone()),
            Some(_) => {}
            None => tracing::debug!("Dropping unknown expertise field {:?} for {}", field, mentor.id),
        }
    }

    if kept.is_empty() {
        mentor.expertise_fields.clone()
    } else {
        kept
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
