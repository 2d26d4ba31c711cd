use mfc_agent::domain::model::{CustomerInfo, PriorityTier, RecommendationPriority};
use mfc_agent::{LeadEvaluationEngine, TerritoryTable};

const INQUIRIES: &[&str] = &[
    "",
    "hello",
    "URGENT: need a quote",
    "bulk contract partnership for beef cattle, asap, budget approved",
    "Emergency! Horses off their feed, immediately need equine supplements",
    "What's the price for horse feed?",
    "large order of hay, cost sensitive, crisis on the ranch",
];

fn customers() -> Vec<Option<CustomerInfo>> {
    vec![
        None,
        Some(CustomerInfo::default()),
        Some(CustomerInfo {
            purchase_count: 1,
            total_spent: 250.0,
            ..Default::default()
        }),
        Some(CustomerInfo {
            purchase_count: 12,
            total_spent: 48_000.0,
            ..Default::default()
        }),
    ]
}

#[test]
fn test_score_always_within_bounds() {
    let engine = LeadEvaluationEngine::default();
    for customer in customers() {
        for inquiry in INQUIRIES {
            let result = engine.evaluate(customer.as_ref(), inquiry, None);
            assert!(result.score <= 100, "score {} for {:?}", result.score, inquiry);
            assert!(!result.recommendations.is_empty());
        }
    }
}

#[test]
fn test_empty_evaluation_defaults() {
    let engine = LeadEvaluationEngine::new(TerritoryTable::montana());
    let result = engine.evaluate(None, "", None);

    assert_eq!(result.score, 50);
    assert_eq!(result.territory.id, "central");
    assert_eq!(result.territory.representative, "Lisa Chen");
    assert_eq!(result.priority, PriorityTier::Standard);
    assert_eq!(
        result.recommendations[0].priority,
        RecommendationPriority::Standard
    );
}

#[test]
fn test_urgency_keyword_adds_25_holding_everything_else() {
    let engine = LeadEvaluationEngine::default();
    let customer = CustomerInfo {
        purchase_count: 1,
        ..Default::default()
    };

    let base = engine.evaluate(Some(&customer), "Looking at mineral tubs", Some("Havre"));
    for variant in ["urgent", "URGENT", "Urgent"] {
        let inquiry = format!("{} Looking at mineral tubs", variant);
        let result = engine.evaluate(Some(&customer), &inquiry, Some("Havre"));
        assert_eq!(result.score, base.score + 25);
        assert_eq!(result.territory, base.territory);
    }
}

#[test]
fn test_every_covered_place_resolves_to_its_first_territory() {
    let table = TerritoryTable::montana();
    let engine = LeadEvaluationEngine::new(table.clone());

    for territory in table.iter() {
        for place in &territory.coverage {
            let expected = table
                .iter()
                .find(|t| t.coverage.iter().any(|p| p.eq_ignore_ascii_case(place)))
                .unwrap();
            for location in [place.to_uppercase(), format!("near {}, MT", place.to_lowercase())] {
                let result = engine.evaluate(None, "", Some(&location));
                assert_eq!(result.territory.id, expected.id, "location {:?}", location);
            }
        }
    }

    assert_eq!(engine.territory_for(Some("missoula")).id, "northwest");
}

#[test]
fn test_evaluate_is_idempotent() {
    let engine = LeadEvaluationEngine::default();
    for customer in customers() {
        for inquiry in INQUIRIES {
            let first = engine.evaluate(customer.as_ref(), inquiry, Some("Bozeman"));
            let second = engine.evaluate(customer.as_ref(), inquiry, Some("Bozeman"));
            assert_eq!(first, second);
        }
    }
}

#[test]
fn test_high_value_cattle_lead() {
    let engine = LeadEvaluationEngine::default();
    let customer = CustomerInfo {
        name: Some("Hank Miller".into()),
        purchase_count: 3,
        total_spent: 15_000.0,
        ..Default::default()
    };

    let result = engine.evaluate(Some(&customer), "We need an urgent bulk cattle order", None);

    assert_eq!(result.score, 100);
    assert_eq!(result.priority, PriorityTier::High);
    assert_eq!(result.recommendations.len(), 2);
    assert_eq!(result.recommendations[0].action, "Immediate personal consultation");
    assert_eq!(
        result.recommendations[1].specialist.as_deref(),
        Some("Cattle nutrition expert")
    );
}

#[test]
fn test_billings_horse_price_question() {
    let engine = LeadEvaluationEngine::default();
    let result = engine.evaluate(None, "What's the price for horse feed?", Some("Billings"));

    assert_eq!(result.territory.id, "south");
    assert_eq!(result.score, 60);
    assert_eq!(result.priority, PriorityTier::Medium);
    assert_eq!(result.recommendations.len(), 2);
    assert_eq!(result.recommendations[1].action, "Equine feed consultation");

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["priority"], "medium");
    assert_eq!(json["territory"]["territory"], "south");
    assert_eq!(json["territory"]["rep"], "David Rodriguez");
}
