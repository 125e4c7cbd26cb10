mod common;

use billing_kit::billing::{
    BillingError, get_base_line_item, get_line_item_type_by_id, get_plan_intervals,
    get_product_plan_pair, get_product_plan_pair_by_variant_id, validate,
};
use billing_kit::{BillingConfig, BillingInterval, KitError, LineItemType};
use common::{single_plan_catalogue, stripe_catalogue};
use serde_json::json;

fn catalogue() -> BillingConfig {
    validate(stripe_catalogue()).unwrap()
}

#[test]
fn test_plan_intervals_first_seen_order() {
    let mut value = stripe_catalogue();
    // month, year, month (team) and a one-time plan
    assert_eq!(
        get_plan_intervals(&validate(value.clone()).unwrap()),
        vec![BillingInterval::Month, BillingInterval::Year]
    );

    // Reordering the starter plans flips the order
    let plans = value["products"][0]["plans"].as_array_mut().unwrap();
    plans.reverse();
    assert_eq!(
        get_plan_intervals(&validate(value).unwrap()),
        vec![BillingInterval::Year, BillingInterval::Month]
    );
}

#[test]
fn test_product_plan_pair_lookup() {
    let config = validate(single_plan_catalogue(
        "stripe",
        json!([
            { "id": "base1", "name": "Base", "cost": 10, "type": "base" },
            { "id": "seat1", "name": "Seat", "cost": 5, "type": "per-seat" }
        ]),
    ))
    .unwrap();

    let pair = get_product_plan_pair(&config, "plan_pro_monthly").unwrap();
    assert_eq!(pair.product.id, "pro");
    assert_eq!(pair.plan.name, "Pro Monthly");

    let err = get_product_plan_pair(&config, "nonexistent").unwrap_err();
    assert!(err.is_not_found());
    let err: KitError = err.into();
    assert!(err.is_not_found());
}

#[test]
fn test_base_line_item_is_found_regardless_of_position() {
    let config = validate(single_plan_catalogue(
        "stripe",
        json!([
            { "id": "seat1", "name": "Seat", "cost": 5, "type": "per-seat" },
            { "id": "base1", "name": "Base", "cost": 10, "type": "base" }
        ]),
    ))
    .unwrap();

    let item = get_base_line_item(&config, "plan_pro_monthly").unwrap();
    assert_eq!(item.id, "base1");
    assert_eq!(item.cost, 10.0);
}

#[test]
fn test_variant_lookup() {
    let config = catalogue();

    let pair = get_product_plan_pair_by_variant_id(&config, "price_team_api").unwrap();
    assert_eq!(pair.product.id, "team");
    assert_eq!(pair.plan.id, "team_monthly");

    let err = config.product_plan_pair_by_variant_id("price_unknown").unwrap_err();
    assert_eq!(err.to_string(), "No plan contains line item: price_unknown");
}

#[test]
fn test_line_item_type_lookup_matches_type() {
    let config = catalogue();

    assert_eq!(get_line_item_type_by_id(&config, "metered").unwrap(), LineItemType::Metered);
    assert!(matches!(
        get_line_item_type_by_id(&config, "price_team_api"),
        Err(BillingError::LineItemNotFound { .. })
    ));
}

#[test]
fn test_primary_line_item_and_product() {
    let config = catalogue();

    assert_eq!(config.primary_line_item("lifetime").unwrap().id, "price_lifetime");
    assert_eq!(config.product("lifetime").unwrap().currency, "EUR");
    assert!(config.product("enterprise").unwrap_err().is_not_found());
}
