// Criterion benchmarks for the campus portal matching routines

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use campus_portal::core::{eligibility, recommender};
use campus_portal::models::{CandidateProfile, ClubDefinition, IncomeValue, ScholarshipOffer};
use chrono::{NaiveDate, Utc};

fn create_offer(id: usize) -> ScholarshipOffer {
    ScholarshipOffer {
        id: id as i32,
        name: format!("Scholarship {}", id),
        description: "Benchmark offer".to_string(),
        category: "merit".to_string(),
        eligibility_criteria: "Benchmark thresholds".to_string(),
        min_cgpa: (id % 10) as f64,
        max_family_income: ((id % 5) * 100000) as f64,
        eligible_categories: if id % 3 == 0 {
            "all".to_string()
        } else {
            "general,obc,sc".to_string()
        },
        eligible_genders: "all".to_string(),
        amount: 25000.0,
        deadline: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
        official_website: None,
        is_active: true,
        created_at: Utc::now(),
    }
}

fn create_club(id: usize) -> ClubDefinition {
    let interests = match id % 4 {
        0 => "robotics,electronics,automation,arduino,raspberry pi",
        1 => "photography,editing,travel",
        2 => "programming,hackathons,ai,machine learning",
        _ => "music,guitar,singing",
    };

    ClubDefinition {
        id: id as i32,
        name: format!("Club {}", id),
        description: "Benchmark club".to_string(),
        category: "technical".to_string(),
        interests: Some(interests.to_string()),
        faculty_coordinator: None,
        student_coordinator: None,
        meeting_schedule: None,
        contact_email: None,
        instagram_link: None,
        is_active: true,
    }
}

fn create_candidate() -> CandidateProfile {
    CandidateProfile {
        cgpa: Some(7.8),
        family_income: Some(IncomeValue::Text("350000".to_string())),
        category: Some("obc".to_string()),
        gender: Some("female".to_string()),
    }
}

fn bench_eligibility(c: &mut Criterion) {
    let candidate = create_candidate();

    let mut group = c.benchmark_group("eligibility");

    for catalog_size in [10, 50, 100, 500, 1000].iter() {
        let catalog: Vec<ScholarshipOffer> = (0..*catalog_size).map(create_offer).collect();

        group.bench_with_input(
            BenchmarkId::new("evaluate", catalog_size),
            catalog_size,
            |b, _| {
                b.iter(|| eligibility::evaluate(black_box(&candidate), black_box(&catalog)));
            },
        );
    }

    group.finish();
}

fn bench_recommender(c: &mut Criterion) {
    let tokens: Vec<String> = vec![
        "robotics".to_string(),
        "arduino".to_string(),
        "programming".to_string(),
        "photography".to_string(),
    ];

    let mut group = c.benchmark_group("recommender");

    for catalog_size in [10, 50, 100, 500].iter() {
        let catalog: Vec<ClubDefinition> = (0..*catalog_size).map(create_club).collect();

        group.bench_with_input(
            BenchmarkId::new("recommend", catalog_size),
            catalog_size,
            |b, _| {
                b.iter(|| recommender::recommend(black_box(&tokens), black_box(&catalog)));
            },
        );
    }

    group.finish();
}

fn bench_constraint_list(c: &mut Criterion) {
    c.bench_function("in_constraint_list", |b| {
        b.iter(|| {
            eligibility::in_constraint_list(
                black_box("general, obc, sc, st, ews"),
                black_box("OBC"),
            )
        });
    });
}

criterion_group!(benches, bench_eligibility, bench_recommender, bench_constraint_list);
criterion_main!(benches);
