//! Prompt templates sent to the completion service.

use crate::models::MentorProfile;

/// Render the mentor catalogue the recommendation prompt reasons over
///
/// Every profile is included; there is no pre-filtering.
pub fn format_mentor_catalogue(mentors: &[MentorProfile]) -> String {
    if mentors.is_empty() {
        return "No mentors currently available in the database.".to_string();
    }

    mentors
        .iter()
        .map(|mentor| {
            format!(
                "Mentor ID: {}\nName: {}\nExpertise: {}\nSummary: {}\nAvailability: {}\n---\n",
                mentor.id,
                mentor.name,
                mentor.expertise_fields.join(", "),
                mentor.experience_summary,
                mentor.availability_or_default(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the ranking prompt for a user query against the full catalogue
pub fn recommendation_prompt(user_query: &str, catalogue: &str, max_recommendations: usize) -> String {
    format!(
        r#"You are an AI assistant for Wisdom Bridge, specializing in matching users with suitable mentors.
Your task is to recommend up to {max} mentors from the provided list based on the user's query.

User's Request:
"{query}"

Available Mentors:
{catalogue}

Instructions:
1. Analyze the user's request and the profiles of the available mentors.
2. Identify the top 1 to {max} mentors whose expertise and experience best match the user's needs.
3. For each recommended mentor, provide:
    - Their 'mentorId'.
    - Their 'mentorName'.
    - A concise 'justification' (1-2 sentences) explaining why they are a good match, based on their stated expertise and experience.
    - Their 'expertiseFields'.
    - A 'experienceSummarySnippet' (a relevant short part of their experience summary, max 20 words).
4. If no mentors are a good match, explain why and provide an empty recommendations list.
5. Optionally, provide a brief overall 'analysis' message about the recommendations or if no suitable mentors were found.
6. Ensure your output is a valid JSON object of the form:
   {{"recommendations": [{{"mentorId": "...", "mentorName": "...", "justification": "...", "expertiseFields": ["..."], "experienceSummarySnippet": "..."}}], "analysis": "..."}}

Example of a good justification: "Dr. Vance's extensive background in AI and Machine Learning aligns perfectly with your interest in advanced AI topics."
Example of a good experienceSummarySnippet: "Retired CTO with 30+ years in tech, specializing in AI development..."

Respond ONLY with the JSON object.
"#,
        max = max_recommendations,
        query = user_query,
        catalogue = catalogue,
    )
}

/// Build the single-topic chat prompt
pub fn topic_restricted_prompt(
    topic: &str,
    on_topic_examples: &str,
    off_topic_examples: &str,
    refusal: &str,
    user_query: &str,
) -> String {
    format!(
        r#"You are a specialized AI assistant for the Wisdom Bridge platform. Your ONLY function is to answer questions about {topic}.

If the user's query is clearly about {topic} (e.g., {on_topic_examples}), answer it comprehensively and helpfully.
If the user's query is NOT about {topic} (e.g., {off_topic_examples}), you MUST respond with the exact phrase: "{refusal}"
Do not deviate from this instruction. Do not engage in small talk or answer questions about yourself or other topics if they are not related to {topic}.

User query: {user_query}"#
    )
}

/// Strip a surrounding Markdown code fence from model output, if present
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. "json") on the opening fence line
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}
