//! Shared catalogue fixtures for integration tests.

#![allow(dead_code)]

use serde_json::{Value, json};

/// A valid Stripe catalogue: a free-trial starter product billed monthly and
/// yearly, a team product with per-seat and metered items, and a lifetime
/// one-time product.
pub fn stripe_catalogue() -> Value {
    json!({
        "provider": "stripe",
        "products": [
            {
                "id": "starter",
                "name": "Starter",
                "description": "For individuals getting started",
                "currency": "USD",
                "badge": "Popular",
                "highlighted": true,
                "features": ["1 project", "Email support"],
                "plans": [
                    {
                        "id": "starter_monthly",
                        "name": "Starter Monthly",
                        "interval": "month",
                        "paymentType": "recurring",
                        "trialPeriod": 14,
                        "lineItems": [
                            { "id": "price_starter_monthly", "name": "Base", "cost": 9.99, "type": "base" }
                        ]
                    },
                    {
                        "id": "starter_yearly",
                        "name": "Starter Yearly",
                        "interval": "year",
                        "paymentType": "recurring",
                        "lineItems": [
                            { "id": "price_starter_yearly", "name": "Base", "cost": 99.99, "type": "base" }
                        ]
                    }
                ]
            },
            {
                "id": "team",
                "name": "Team",
                "description": "For growing teams",
                "currency": "USD",
                "features": ["Unlimited projects", "SSO"],
                "plans": [
                    {
                        "id": "team_monthly",
                        "name": "Team Monthly",
                        "interval": "month",
                        "paymentType": "recurring",
                        "lineItems": [
                            { "id": "price_team_base", "name": "Base", "cost": 49, "type": "base" },
                            { "id": "price_team_seat", "name": "Seats", "cost": 8, "type": "per-seat" },
                            {
                                "id": "price_team_api",
                                "name": "API requests",
                                "cost": 0.002,
                                "type": "metered",
                                "unit": "request",
                                "included": 10000,
                                "tiers": [
                                    { "upTo": 100000, "cost": 0.002 },
                                    { "upTo": 1000000, "cost": 0.001 }
                                ]
                            }
                        ]
                    }
                ]
            },
            {
                "id": "lifetime",
                "name": "Lifetime",
                "description": "Pay once, use forever",
                "currency": "EUR",
                "features": ["Everything in Team"],
                "plans": [
                    {
                        "id": "lifetime",
                        "name": "Lifetime",
                        "paymentType": "one-time",
                        "lineItems": [
                            { "id": "price_lifetime", "name": "Lifetime licence", "cost": 499, "type": "base" }
                        ]
                    }
                ]
            }
        ]
    })
}

/// A minimal valid catalogue with a single monthly plan per item list.
pub fn single_plan_catalogue(provider: &str, line_items: Value) -> Value {
    json!({
        "provider": provider,
        "products": [{
            "id": "pro",
            "name": "Pro",
            "description": "For professionals",
            "currency": "USD",
            "features": ["Everything"],
            "plans": [{
                "id": "plan_pro_monthly",
                "name": "Pro Monthly",
                "interval": "month",
                "paymentType": "recurring",
                "lineItems": line_items
            }]
        }]
    })
}

/// A base line item.
pub fn base_item(id: &str, cost: f64) -> Value {
    json!({ "id": id, "name": "Base", "cost": cost, "type": "base" })
}
