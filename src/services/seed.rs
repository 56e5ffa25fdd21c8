//! Built-in mentor catalogue and TOML seed file loading.

use crate::models::MentorProfile;
use serde::Deserialize;
use std::path::Path;

use super::store::StoreError;

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    mentors: Vec<MentorProfile>,
}

/// Parse a seed document of `[[mentors]]` tables
pub fn parse_seed(contents: &str) -> Result<Vec<MentorProfile>, StoreError> {
    let seed: SeedFile = toml::from_str(contents)
        .map_err(|e| StoreError::InvalidSeed(format!("Failed to parse seed: {}", e)))?;
    Ok(seed.mentors)
}

/// Load a seed file from disk
pub fn load_seed_file<P: AsRef<Path>>(path: P) -> Result<Vec<MentorProfile>, StoreError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        StoreError::InvalidSeed(format!("Failed to read seed file {}: {}", path.display(), e))
    })?;

    let mentors = parse_seed(&contents)?;
    tracing::info!("Loaded {} mentors from {}", mentors.len(), path.display());
    Ok(mentors)
}

fn mentor(
    id: &str,
    name: &str,
    fields: &[&str],
    summary: &str,
    availability: Option<&str>,
) -> MentorProfile {
    MentorProfile {
        id: id.to_string(),
        name: name.to_string(),
        expertise_fields: fields.iter().map(|f| f.to_string()).collect(),
        experience_summary: summary.to_string(),
        availability: availability.map(str::to_string),
    }
}

/// The default mentor catalogue
pub fn default_mentors() -> Vec<MentorProfile> {
    vec![
        mentor(
            "mentor-1",
            "Dr. Eleanor Vance",
            &["Software Engineering", "Artificial Intelligence", "Machine Learning"],
            "Retired CTO with 30+ years in tech, specializing in AI development and team leadership. Led several successful product launches.",
            Some("Weekends, Tuesday evenings"),
        ),
        mentor(
            "mentor-2",
            "Samuel Green",
            &["Business Strategy", "Entrepreneurship", "Marketing"],
            "Former CEO of a successful marketing agency. Expert in branding, market analysis, and startup growth. Enjoys guiding new entrepreneurs.",
            Some("Monday and Wednesday afternoons"),
        ),
        mentor(
            "mentor-3",
            "Aisha Khan",
            &["Creative Writing", "Publishing", "Arts Administration"],
            "Award-winning novelist and former editor-in-chief at a publishing house. Passionate about nurturing new literary voices.",
            None,
        ),
        mentor(
            "mentor-4",
            "Robert Chen",
            &["Mechanical Engineering", "Robotics"],
            "Lead engineer for a major robotics firm for 25 years. Holds several patents in automation technology.",
            Some("Flexible, by appointment"),
        ),
        mentor(
            "mentor-5",
            "John Doe",
            &["Software Engineering", "Web Development", "Python"],
            "Senior full-stack developer with 15 years of experience in building scalable web applications.",
            Some("Evenings and weekends"),
        ),
        mentor(
            "mentor-6",
            "Jane Smith",
            &["Software Engineering", "Mobile Development"],
            "Lead iOS developer with a decade of experience in mobile app design and development for startups.",
            Some("Weekends"),
        ),
        mentor(
            "mentor-7",
            "Alice Brown",
            &["Marketing", "Digital Marketing"],
            "Digital marketing strategist with expertise in SEO, SEM, and content marketing.",
            Some("Weekday afternoons"),
        ),
        mentor(
            "mentor-8",
            "Dr. Ada Cypher",
            &["Software Engineering", "Python", "Data Science", "Algorithm Design"],
            "Renowned data scientist with extensive experience in Python for machine learning and statistical analysis. Authored several key libraries.",
            Some("Wednesday mornings, Friday afternoons"),
        ),
        mentor(
            "mentor-9",
            "Priya Sharma",
            &["Java", "Spring Boot", "Microservices", "Backend Development"],
            "Senior Java Developer with 12 years of experience in enterprise application development and cloud-native architectures.",
            Some("Tuesday and Thursday evenings"),
        ),
    ]
}
