//! Skill lists
//!
//! Offers carry skills as an ordered list, entered as comma-separated text.

/// Split comma-separated input into trimmed, non-empty skills.
///
/// Order and duplicates are preserved.
pub fn parse_skills(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}
