use crate::models::{CandidateProfile, EligibleOffer, ScholarshipOffer};

/// Check the candidate's CGPA against an offer's minimum
///
/// Skipped when the offer carries no minimum or the candidate supplied no
/// CGPA (absent and zero both mean "not supplied").
#[inline]
pub fn passes_cgpa(candidate: &CandidateProfile, offer: &ScholarshipOffer) -> bool {
    let cgpa = candidate.cgpa.unwrap_or(0.0);
    if offer.min_cgpa <= 0.0 || cgpa <= 0.0 {
        return true;
    }
    cgpa >= offer.min_cgpa
}

/// Check the candidate's family income against an offer's ceiling
///
/// Unparsable income is treated as "no constraint from this field", never as
/// a disqualification.
#[inline]
pub fn passes_income(candidate: &CandidateProfile, offer: &ScholarshipOffer) -> bool {
    let Some(income) = candidate.family_income.as_ref() else {
        return true;
    };
    let Some(value) = income.parsed() else {
        return true;
    };
    !(offer.max_family_income > 0.0 && value > offer.max_family_income)
}

/// Test membership in a comma-separated constraint list
///
/// List tokens are trimmed and lowercased; the sentinel "all" passes
/// everything.
#[inline]
pub fn in_constraint_list(list: &str, value: &str) -> bool {
    let needle = value.to_lowercase();
    list.split(',')
        .map(|token| token.trim().to_lowercase())
        .any(|token| token == "all" || token == needle)
}

#[inline]
pub fn passes_category(candidate: &CandidateProfile, offer: &ScholarshipOffer) -> bool {
    match candidate.category.as_deref() {
        Some(category) => in_constraint_list(&offer.eligible_categories, category),
        None => true,
    }
}

#[inline]
pub fn passes_gender(candidate: &CandidateProfile, offer: &ScholarshipOffer) -> bool {
    match candidate.gender.as_deref() {
        Some(gender) => in_constraint_list(&offer.eligible_genders, gender),
        None => true,
    }
}

/// All four checks, AND-combined
pub fn is_eligible(candidate: &CandidateProfile, offer: &ScholarshipOffer) -> bool {
    passes_cgpa(candidate, offer)
        && passes_income(candidate, offer)
        && passes_category(candidate, offer)
        && passes_gender(candidate, offer)
}

/// Evaluate a candidate against a scholarship catalog
///
/// Returns the offers the candidate qualifies for, in catalog order.
/// Inactive offers are filtered out even when the caller passes them.
pub fn evaluate(candidate: &CandidateProfile, catalog: &[ScholarshipOffer]) -> Vec<EligibleOffer> {
    catalog
        .iter()
        .filter(|offer| offer.is_active)
        .filter(|offer| is_eligible(candidate, offer))
        .map(EligibleOffer::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IncomeValue;
    use chrono::{NaiveDate, Utc};

    fn create_offer(min_cgpa: f64, max_income: f64, categories: &str, genders: &str) -> ScholarshipOffer {
        ScholarshipOffer {
            id: 1,
            name: "Merit Scholarship".to_string(),
            description: "Awarded on academic merit".to_string(),
            category: "merit".to_string(),
            eligibility_criteria: "See thresholds".to_string(),
            min_cgpa,
            max_family_income: max_income,
            eligible_categories: categories.to_string(),
            eligible_genders: genders.to_string(),
            amount: 50000.0,
            deadline: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            official_website: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn create_candidate(cgpa: Option<f64>, income: Option<IncomeValue>, category: Option<&str>, gender: Option<&str>) -> CandidateProfile {
        CandidateProfile {
            cgpa,
            family_income: income,
            category: category.map(str::to_string),
            gender: gender.map(str::to_string),
        }
    }

    #[test]
    fn test_zero_min_cgpa_passes_everyone() {
        let offer = create_offer(0.0, 0.0, "all", "all");
        assert!(passes_cgpa(&create_candidate(None, None, None, None), &offer));
        assert!(passes_cgpa(&create_candidate(Some(3.0), None, None, None), &offer));
    }

    #[test]
    fn test_cgpa_below_minimum_fails() {
        let offer = create_offer(7.5, 0.0, "all", "all");
        assert!(!passes_cgpa(&create_candidate(Some(7.0), None, None, None), &offer));
        assert!(passes_cgpa(&create_candidate(Some(7.5), None, None, None), &offer));
    }

    #[test]
    fn test_missing_cgpa_skips_check() {
        let offer = create_offer(7.5, 0.0, "all", "all");
        assert!(passes_cgpa(&create_candidate(None, None, None, None), &offer));
        assert!(passes_cgpa(&create_candidate(Some(0.0), None, None, None), &offer));
    }

    #[test]
    fn test_unparsable_income_is_not_disqualifying() {
        let offer = create_offer(0.0, 250000.0, "all", "all");
        let candidate = create_candidate(
            None,
            Some(IncomeValue::Text("not-a-number".to_string())),
            None,
            None,
        );
        assert!(passes_income(&candidate, &offer));
        assert!(is_eligible(&candidate, &offer));
    }

    #[test]
    fn test_income_above_ceiling_fails() {
        let offer = create_offer(0.0, 250000.0, "all", "all");
        let over = create_candidate(None, Some(IncomeValue::Amount(300000.0)), None, None);
        let at = create_candidate(None, Some(IncomeValue::Amount(250000.0)), None, None);
        assert!(!passes_income(&over, &offer));
        assert!(passes_income(&at, &offer));
    }

    #[test]
    fn test_category_all_sentinel() {
        let offer = create_offer(0.0, 0.0, "all", "all");
        assert!(passes_category(&create_candidate(None, None, Some("obc"), None), &offer));
        assert!(passes_category(&create_candidate(None, None, None, None), &offer));
    }

    #[test]
    fn test_category_mismatch_fails() {
        let offer = create_offer(0.0, 0.0, "sc", "all");
        assert!(!passes_category(&create_candidate(None, None, Some("obc"), None), &offer));
        assert!(passes_category(&create_candidate(None, None, Some("SC"), None), &offer));
    }

    #[test]
    fn test_constraint_list_trims_and_lowercases() {
        assert!(in_constraint_list("General, OBC , sc", "obc"));
        assert!(in_constraint_list("general,obc", "OBC"));
        assert!(!in_constraint_list("general,obc", "st"));
    }

    #[test]
    fn test_obc_candidate_matches_general_obc_offer() {
        let offer = create_offer(7.5, 300000.0, "general,obc", "all");
        let candidate = create_candidate(
            Some(7.5),
            Some(IncomeValue::Amount(300000.0)),
            Some("obc"),
            Some("male"),
        );
        assert!(is_eligible(&candidate, &offer));
    }

    #[test]
    fn test_obc_candidate_fails_sc_only_offer() {
        let offer = create_offer(7.5, 300000.0, "sc", "all");
        let candidate = create_candidate(
            Some(7.5),
            Some(IncomeValue::Amount(300000.0)),
            Some("obc"),
            Some("male"),
        );
        assert!(!is_eligible(&candidate, &offer));
    }

    #[test]
    fn test_evaluate_preserves_catalog_order_and_filters_inactive() {
        let mut first = create_offer(0.0, 0.0, "all", "all");
        first.id = 10;
        let mut inactive = create_offer(0.0, 0.0, "all", "all");
        inactive.id = 11;
        inactive.is_active = false;
        let mut last = create_offer(0.0, 0.0, "all", "all");
        last.id = 12;

        let catalog = vec![first, inactive, last];
        let candidate = create_candidate(None, None, None, None);

        let eligible = evaluate(&candidate, &catalog);
        let ids: Vec<i32> = eligible.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![10, 12]);
        assert!(eligible.iter().all(|o| o.eligible));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let catalog = vec![
            create_offer(7.0, 0.0, "all", "all"),
            create_offer(0.0, 400000.0, "general,obc", "all"),
        ];
        let candidate = create_candidate(
            Some(8.2),
            Some(IncomeValue::Text("350000".to_string())),
            Some("general"),
            Some("female"),
        );

        let first = evaluate(&candidate, &catalog);
        let second = evaluate(&candidate, &catalog);
        let first_ids: Vec<i32> = first.iter().map(|o| o.id).collect();
        let second_ids: Vec<i32> = second.iter().map(|o| o.id).collect();
        assert_eq!(first_ids, second_ids);
    }
}
