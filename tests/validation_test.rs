mod common;

use billing_kit::billing::{Rule, validate};
use billing_kit::{BillingConfig, BillingProvider, LineItemType, PaymentType};
use common::{base_item, single_plan_catalogue, stripe_catalogue};
use serde_json::json;

#[test]
fn test_valid_catalogue_round_trips() {
    let config = validate(stripe_catalogue()).unwrap();

    assert_eq!(config.provider, BillingProvider::Stripe);
    assert_eq!(config.products.len(), 3);

    let team = &config.products[1].plans[0];
    assert_eq!(team.line_items[1].item_type, LineItemType::PerSeat);
    assert_eq!(team.line_items[2].included, Some(10000.0));
    assert_eq!(team.line_items[2].tiers.as_ref().map(Vec::len), Some(2));
    assert_eq!(config.products[2].plans[0].payment_type, PaymentType::OneTime);

    // Serialising and validating again yields the same catalogue
    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(value["products"][0]["plans"][0]["trialPeriod"], json!(14));
    assert_eq!(value["products"][0]["badge"], json!("Popular"));
    assert!(value["products"][1].get("badge").is_none());
    assert_eq!(validate(value).unwrap(), config);
}

#[test]
fn test_metered_without_unit_or_included_fails() {
    for item in [
        json!({ "id": "m", "name": "API", "cost": 1, "type": "metered", "included": 0 }),
        json!({ "id": "m", "name": "API", "cost": 1, "type": "metered", "unit": "GB" }),
        json!({ "id": "m", "name": "API", "cost": 1, "type": "metered" }),
    ] {
        let err = validate(single_plan_catalogue("stripe", json!([base_item("b", 10.0), item]))).unwrap_err();

        assert_eq!(err.first().rule, Rule::MeteredUnitAndIncluded);
        let path = err.first().path.to_string();
        assert_eq!(path, "products.0.plans.0.lineItems.1.type.unit.included");
        assert!(err.first().path.contains_key("unit"));
    }
}

#[test]
fn test_duplicate_line_item_ids_fail() {
    // within a plan
    let err = validate(single_plan_catalogue(
        "stripe",
        json!([base_item("price_1", 10.0), { "id": "price_1", "name": "Seat", "cost": 5, "type": "per-seat" }]),
    ))
    .unwrap_err();
    assert!(err.has_rule(Rule::UniqueLineItemIdsInPlan));

    // across plans of one product
    let mut catalogue = stripe_catalogue();
    catalogue["products"][0]["plans"][1]["lineItems"][0]["id"] = json!("price_starter_monthly");
    let err = validate(catalogue).unwrap_err();
    assert!(err.has_rule(Rule::UniqueLineItemIds));
    assert!(!err.has_rule(Rule::UniqueLineItemIdsInPlan));

    // across products
    let mut catalogue = stripe_catalogue();
    catalogue["products"][2]["plans"][0]["lineItems"][0]["id"] = json!("price_team_base");
    let err = validate(catalogue).unwrap_err();
    assert_eq!(err.first().rule, Rule::UniqueLineItemIds);
    assert_eq!(err.first().path.to_string(), "products");
}

#[test]
fn test_duplicate_plan_and_product_ids_fail() {
    let mut catalogue = stripe_catalogue();
    catalogue["products"][0]["plans"][1]["id"] = json!("starter_monthly");
    let err = validate(catalogue).unwrap_err();
    assert!(err.has_rule(Rule::UniquePlanIdsInProduct));

    let mut catalogue = stripe_catalogue();
    catalogue["products"][2]["plans"][0]["id"] = json!("team_monthly");
    let err = validate(catalogue).unwrap_err();
    assert!(err.has_rule(Rule::UniquePlanIds));

    let mut catalogue = stripe_catalogue();
    catalogue["products"][2]["id"] = json!("team");
    let err = validate(catalogue).unwrap_err();
    assert!(err.has_rule(Rule::UniqueProductIds));
}

#[test]
fn test_one_time_plan_with_non_base_item_fails() {
    let mut catalogue = stripe_catalogue();
    catalogue["products"][2]["plans"][0]["lineItems"]
        .as_array_mut()
        .unwrap()
        .push(json!({ "id": "price_lifetime_seat", "name": "Seat", "cost": 10, "type": "per-seat" }));

    let err = validate(catalogue).unwrap_err();
    assert_eq!(err.first().rule, Rule::OneTimeBaseItemsOnly);
    assert_eq!(err.first().message, "One-time plans must not have non-base line items");
    assert_eq!(err.first().path.to_string(), "products.2.plans.0.paymentType.lineItems");
}

#[test]
fn test_interval_rules() {
    let mut catalogue = stripe_catalogue();
    catalogue["products"][0]["plans"][0]
        .as_object_mut()
        .unwrap()
        .remove("interval");
    let err = validate(catalogue).unwrap_err();
    assert_eq!(err.issues().len(), 1);
    assert_eq!(err.first().rule, Rule::RecurringRequiresInterval);

    let mut catalogue = stripe_catalogue();
    catalogue["products"][2]["plans"][0]["interval"] = json!("month");
    let err = validate(catalogue).unwrap_err();
    assert_eq!(err.first().rule, Rule::OneTimeWithoutInterval);
    assert_eq!(err.first().message, "One-time plans must not have an interval");
}

#[test]
fn test_lemon_squeezy_allows_one_line_item_per_plan() {
    let ok = single_plan_catalogue("lemon-squeezy", json!([base_item("1234", 10.0)]));
    assert_eq!(validate(ok).unwrap().provider, BillingProvider::LemonSqueezy);

    let two_items = single_plan_catalogue(
        "lemon-squeezy",
        json!([base_item("1234", 10.0), { "id": "5678", "name": "Seat", "cost": 5, "type": "per-seat" }]),
    );
    let err = validate(two_items.clone()).unwrap_err();
    assert_eq!(err.first().rule, Rule::LemonSqueezySingleLineItem);
    assert_eq!(err.first().path.to_string(), "products.0.plans.0.lineItems");

    // Other providers accept the same plan
    let mut stripe = two_items;
    stripe["provider"] = json!("stripe");
    assert!(validate(stripe).is_ok());
}

#[test]
fn test_field_rules_are_reported_together() {
    let mut catalogue = stripe_catalogue();
    catalogue["products"][0]["currency"] = json!("US");
    catalogue["products"][0]["plans"][0]["trialPeriod"] = json!(0);
    catalogue["products"][1]["plans"][0]["lineItems"][1]["cost"] = json!(-1);
    catalogue["products"][1]["features"] = json!([]);

    let err = validate(catalogue).unwrap_err();
    let rules: Vec<_> = err.issues().iter().map(|issue| issue.rule).collect();
    assert_eq!(
        rules,
        vec![Rule::CurrencyCode, Rule::PositiveTrialPeriod, Rule::NonEmpty, Rule::NonNegative]
    );
    assert!(err.to_string().ends_with("(and 3 more)"));
}

#[test]
fn test_shape_errors_are_schema_issues() {
    let mut catalogue = stripe_catalogue();
    catalogue["products"][0]["plans"][0]["lineItems"][0]["type"] = json!("flat");
    let err = validate(catalogue).unwrap_err();
    assert_eq!(err.issues().len(), 1);
    assert_eq!(err.first().rule, Rule::Schema);
    assert_eq!(err.first().path.to_string(), "products.0.plans.0.lineItems.0.type");

    let err = validate(json!({ "provider": "braintree", "products": [] })).unwrap_err();
    assert_eq!(err.first().rule, Rule::Schema);
    assert_eq!(err.first().path.to_string(), "provider");
}

#[test]
fn test_config_built_in_code_is_validated() {
    let mut config: BillingConfig = serde_json::from_value(stripe_catalogue()).unwrap();
    assert!(config.validate().is_ok());

    config.products[0].plans[0].line_items.clear();
    let err = config.validated().unwrap_err();
    assert_eq!(err.first().rule, Rule::PlanHasLineItems);
}
