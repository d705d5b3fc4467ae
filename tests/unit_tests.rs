// Unit tests for the campus portal library

use campus_portal::core::{
    eligibility::{evaluate, in_constraint_list, is_eligible, passes_cgpa, passes_income},
    recommender::{matching_tags, recommend, token_matches_tag},
    threads::{apply_reply, resolve},
};
use campus_portal::models::{
    CandidateProfile, ClubDefinition, IncomeValue, PostRole, ScholarshipOffer, ThreadStatus,
};
use chrono::{NaiveDate, Utc};

fn offer(id: i32, min_cgpa: f64, max_income: f64, categories: &str, genders: &str) -> ScholarshipOffer {
    ScholarshipOffer {
        id,
        name: format!("Offer {}", id),
        description: "Test offer".to_string(),
        category: "merit".to_string(),
        eligibility_criteria: "See thresholds".to_string(),
        min_cgpa,
        max_family_income: max_income,
        eligible_categories: categories.to_string(),
        eligible_genders: genders.to_string(),
        amount: 25000.0,
        deadline: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
        official_website: Some("https://scholarships.example.edu".to_string()),
        is_active: true,
        created_at: Utc::now(),
    }
}

fn club(id: i32, interests: Option<&str>) -> ClubDefinition {
    ClubDefinition {
        id,
        name: format!("Club {}", id),
        description: "Test club".to_string(),
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

#[test]
fn test_no_cgpa_passes_zero_threshold_offers() {
    let catalog = vec![offer(1, 0.0, 0.0, "all", "all")];
    let candidate = CandidateProfile::default();

    let eligible = evaluate(&candidate, &catalog);
    assert_eq!(eligible.len(), 1);
    assert!(eligible[0].eligible);
}

#[test]
fn test_cgpa_threshold_skipped_without_candidate_cgpa() {
    let strict = offer(1, 9.0, 0.0, "all", "all");
    assert!(passes_cgpa(&CandidateProfile::default(), &strict));

    let zero_cgpa = CandidateProfile { cgpa: Some(0.0), ..Default::default() };
    assert!(passes_cgpa(&zero_cgpa, &strict));
}

#[test]
fn test_category_all_accepts_any_candidate() {
    let catalog = vec![offer(1, 0.0, 0.0, "all", "all")];

    let with_category = CandidateProfile {
        category: Some("ews".to_string()),
        ..Default::default()
    };
    let without_category = CandidateProfile::default();

    assert_eq!(evaluate(&with_category, &catalog).len(), 1);
    assert_eq!(evaluate(&without_category, &catalog).len(), 1);
}

#[test]
fn test_malformed_income_does_not_disqualify() {
    let catalog = vec![offer(1, 0.0, 250000.0, "all", "all")];
    let candidate = CandidateProfile {
        family_income: Some(IncomeValue::Text("not-a-number".to_string())),
        ..Default::default()
    };

    let eligible = evaluate(&candidate, &catalog);
    assert_eq!(eligible.len(), 1);
}

#[test]
fn test_income_string_is_parsed_and_enforced() {
    let tight = offer(1, 0.0, 250000.0, "all", "all");
    let candidate = CandidateProfile {
        family_income: Some(IncomeValue::Text("300000".to_string())),
        ..Default::default()
    };

    assert!(!passes_income(&candidate, &tight));
}

#[test]
fn test_matcher_idempotence() {
    let catalog = vec![
        offer(1, 7.0, 0.0, "all", "all"),
        offer(2, 0.0, 500000.0, "general,obc", "female"),
        offer(3, 8.5, 0.0, "sc,st", "all"),
    ];
    let candidate = CandidateProfile {
        cgpa: Some(7.8),
        family_income: Some(IncomeValue::Amount(400000.0)),
        category: Some("obc".to_string()),
        gender: Some("female".to_string()),
    };

    let first: Vec<i32> = evaluate(&candidate, &catalog).iter().map(|o| o.id).collect();
    let second: Vec<i32> = evaluate(&candidate, &catalog).iter().map(|o| o.id).collect();

    assert_eq!(first, second);
    assert_eq!(first, vec![1, 2]);
}

#[test]
fn test_eligibility_scenario_from_portal() {
    let match_offer = offer(1, 7.5, 300000.0, "general,obc", "all");
    let sc_only = offer(2, 7.5, 300000.0, "sc", "all");
    let candidate = CandidateProfile {
        cgpa: Some(7.5),
        family_income: Some(IncomeValue::Amount(300000.0)),
        category: Some("obc".to_string()),
        gender: Some("male".to_string()),
    };

    assert!(is_eligible(&candidate, &match_offer));
    assert!(!is_eligible(&candidate, &sc_only));
}

#[test]
fn test_constraint_list_handles_spacing_and_case() {
    assert!(in_constraint_list(" General , OBC ", "obc"));
    assert!(in_constraint_list("male,female", "Female"));
    assert!(in_constraint_list("ALL", "anything"));
    assert!(!in_constraint_list("male", "female"));
}

#[test]
fn test_token_matching_relations() {
    assert!(token_matches_tag("robotics", "robotics"));
    assert!(token_matches_tag("robot", "robotics"));
    assert!(token_matches_tag("robotics and more", "robotics"));
    assert!(!token_matches_tag("painting", "robotics"));
}

#[test]
fn test_matching_tags_deduplicates_across_tokens() {
    let tags = vec!["photography".to_string(), "editing".to_string()];
    let tokens = vec![
        "photo".to_string(),
        "photography".to_string(),
        "editing".to_string(),
    ];

    let matched = matching_tags(&tokens, &tags);
    assert_eq!(matched, vec!["photography", "editing"]);
}

#[test]
fn test_recommender_scenario_from_portal() {
    let catalog = vec![club(1, Some("robotics,electronics,automation,arduino,raspberry pi"))];

    let tokens = vec!["robotics".to_string(), "arduino".to_string()];
    let results = recommend(&tokens, &catalog);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].match_score, 2);
    assert!(results[0].matching_interests.contains(&"robotics".to_string()));
    assert!(results[0].matching_interests.contains(&"arduino".to_string()));
}

#[test]
fn test_recommender_excludes_zero_scores_and_empty_tags() {
    let catalog = vec![
        club(1, Some("chess,strategy")),
        club(2, Some("dance")),
        club(3, None),
        club(4, Some("")),
    ];

    let results = recommend(&[String::from("chess")], &catalog);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].club.id, 1);
}

#[test]
fn test_thread_reply_transitions() {
    let answered = apply_reply(ThreadStatus::Pending, PostRole::Faculty, None);
    assert_eq!(answered.next_status, ThreadStatus::Answered);
    assert!(answered.notify_student);

    let clarification = apply_reply(ThreadStatus::Answered, PostRole::Student, None);
    assert_eq!(clarification.next_status, ThreadStatus::Clarification);
    assert!(!clarification.notify_student);

    let overridden = apply_reply(
        ThreadStatus::Clarification,
        PostRole::Faculty,
        Some(ThreadStatus::Resolved),
    );
    assert_eq!(overridden.next_status, ThreadStatus::Resolved);
}

#[test]
fn test_resolve_is_terminal_from_any_state() {
    for status in [
        ThreadStatus::Pending,
        ThreadStatus::Answered,
        ThreadStatus::Clarification,
        ThreadStatus::Resolved,
    ] {
        assert_eq!(resolve(status), ThreadStatus::Resolved);
    }
}
