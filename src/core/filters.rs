use crate::models::MentorProfile;

/// Lowercase a query for matching, or `None` if it is blank
#[inline]
pub fn normalize_query(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

/// Check whether any expertise field contains the (already lowercased) needle
#[inline]
pub fn expertise_matches(profile: &MentorProfile, needle: &str) -> bool {
    profile
        .expertise_fields
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Check whether the mentor's name contains the (already lowercased) needle
#[inline]
pub fn name_matches(profile: &MentorProfile, needle: &str) -> bool {
    profile.name.to_lowercase().contains(needle)
}

/// Directory search predicate: name OR any expertise field
#[inline]
pub fn matches_search(profile: &MentorProfile, needle: &str) -> bool {
    name_matches(profile, needle) || expertise_matches(profile, needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, fields: &[&str]) -> MentorProfile {
        MentorProfile {
            id: "test".to_string(),
            name: name.to_string(),
            expertise_fields: fields.iter().map(|f| f.to_string()).collect(),
            experience_summary: "Summary".to_string(),
            availability: None,
        }
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query(""), None);
        assert_eq!(normalize_query("   \t"), None);
        assert_eq!(normalize_query("PyThOn"), Some("python".to_string()));
    }

    #[test]
    fn test_expertise_substring_case_insensitive() {
        let p = profile("Jane", &["Mobile Development", "Software Engineering"]);
        assert!(expertise_matches(&p, "mobile"));
        assert!(expertise_matches(&p, "engineer"));
        assert!(!expertise_matches(&p, "python"));
    }

    #[test]
    fn test_search_matches_name_or_field() {
        let p = profile("Dr. Ada Cypher", &["Data Science"]);
        assert!(matches_search(&p, "cypher"));
        assert!(matches_search(&p, "data"));
        assert!(!matches_search(&p, "robotics"));
    }
}
