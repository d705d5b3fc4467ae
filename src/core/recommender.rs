use crate::models::{ClubDefinition, ClubMatch, ClubSummary};

/// Tags a club advertises, split from its free-text comma list
#[inline]
pub fn club_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Three-way token/tag relation: equality or substring in either direction
#[inline]
pub fn token_matches_tag(token: &str, tag: &str) -> bool {
    token == tag || tag.contains(token) || token.contains(tag)
}

/// Distinct club tags hit by any of the query tokens
///
/// A tag counts once no matter how many tokens reach it; order follows the
/// club's own tag order per token, as tags are discovered.
pub fn matching_tags(tokens: &[String], tags: &[String]) -> Vec<String> {
    let mut matched: Vec<String> = Vec::new();
    for token in tokens {
        let needle = token.trim().to_lowercase();
        if needle.is_empty() {
            continue;
        }
        for tag in tags {
            if token_matches_tag(&needle, tag) && !matched.contains(tag) {
                matched.push(tag.clone());
            }
        }
    }
    matched
}

/// Rank clubs by interest-tag overlap with the query tokens
///
/// Inactive clubs and clubs with an empty tag field are skipped; zero-score
/// clubs are excluded. The sort is stable, so ties keep catalog order.
pub fn recommend(tokens: &[String], catalog: &[ClubDefinition]) -> Vec<ClubMatch> {
    let mut results: Vec<ClubMatch> = Vec::new();

    for club in catalog {
        if !club.is_active {
            continue;
        }
        let Some(raw_tags) = club.interests.as_deref() else {
            continue;
        };
        if raw_tags.trim().is_empty() {
            continue;
        }

        let tags = club_tags(raw_tags);
        let matched = matching_tags(tokens, &tags);
        if matched.is_empty() {
            continue;
        }

        results.push(ClubMatch {
            club: ClubSummary::from(club),
            match_score: matched.len() as u32,
            matching_interests: matched,
        });
    }

    results.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_club(id: i32, name: &str, interests: Option<&str>) -> ClubDefinition {
        ClubDefinition {
            id,
            name: name.to_string(),
            description: format!("{} at the campus", name),
            category: "technical".to_string(),
            interests: interests.map(str::to_string),
            faculty_coordinator: None,
            student_coordinator: None,
            meeting_schedule: None,
            contact_email: None,
            instagram_link: None,
            is_active: true,
        }
    }

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_robotics_and_arduino_tokens_score_two() {
        let catalog = vec![create_club(
            1,
            "Robotics Club",
            Some("robotics,electronics,automation,arduino,raspberry pi"),
        )];

        let results = recommend(&tokens(&["robotics", "arduino"]), &catalog);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_score, 2);
        assert!(results[0].matching_interests.contains(&"robotics".to_string()));
        assert!(results[0].matching_interests.contains(&"arduino".to_string()));
    }

    #[test]
    fn test_tag_counts_once_across_tokens() {
        // "photo" and "photography" both hit the same tag
        let catalog = vec![create_club(1, "Photo Club", Some("photography"))];

        let results = recommend(&tokens(&["photo", "photography"]), &catalog);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_score, 1);
        assert_eq!(results[0].matching_interests, vec!["photography"]);
    }

    #[test]
    fn test_substring_matches_both_directions() {
        assert!(token_matches_tag("photo", "photography"));
        assert!(token_matches_tag("photography club", "photography"));
        assert!(token_matches_tag("chess", "chess"));
        assert!(!token_matches_tag("chess", "robotics"));
    }

    #[test]
    fn test_zero_score_clubs_excluded() {
        let catalog = vec![
            create_club(1, "Robotics Club", Some("robotics,arduino")),
            create_club(2, "Drama Club", Some("acting,theatre")),
        ];

        let results = recommend(&tokens(&["robotics"]), &catalog);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].club.id, 1);
    }

    #[test]
    fn test_empty_tag_field_skipped() {
        let catalog = vec![
            create_club(1, "Untagged Club", None),
            create_club(2, "Blank Club", Some("   ")),
            create_club(3, "Chess Club", Some("chess")),
        ];

        let results = recommend(&tokens(&["chess"]), &catalog);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].club.id, 3);
    }

    #[test]
    fn test_inactive_club_skipped() {
        let mut inactive = create_club(1, "Old Club", Some("chess"));
        inactive.is_active = false;
        let catalog = vec![inactive, create_club(2, "Chess Club", Some("chess"))];

        let results = recommend(&tokens(&["chess"]), &catalog);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].club.id, 2);
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let catalog = vec![
            create_club(1, "One Tag", Some("music")),
            create_club(2, "Two Tags", Some("music,guitar")),
            create_club(3, "Tied With First", Some("music")),
        ];

        let results = recommend(&tokens(&["music", "guitar"]), &catalog);
        let ids: Vec<i32> = results.iter().map(|m| m.club.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let catalog = vec![create_club(1, "Chess Club", Some("chess"))];
        assert!(recommend(&[], &catalog).is_empty());
        assert!(recommend(&tokens(&["", "  "]), &catalog).is_empty());
    }
}
