mod common;

use common::*;
use mockito::Matcher;
use plan_picker::api::ApiError;
use plan_picker::models::{PlanName, SubscriptionOutcome, UserError};
use plan_picker::services::{load_current_plan, request_subscription};
use serde_json::json;

#[tokio::test]
async fn test_current_plan_defaults_to_basic() {
    let mut server = mockito::Server::new_async().await;
    let m = mock_active_subscriptions(&mut server, &[]).await;

    let plan = load_current_plan(&admin_client(&server)).await.unwrap();

    assert_eq!(plan, "Basic");
    m.assert_async().await;
}

#[tokio::test]
async fn test_current_plan_uses_first_active_subscription() {
    let mut server = mockito::Server::new_async().await;
    mock_active_subscriptions(&mut server, &["Grow"]).await;

    let plan = load_current_plan(&admin_client(&server)).await.unwrap();

    assert_eq!(plan, "Grow");
}

#[tokio::test]
async fn test_graphql_errors_surface_as_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", GRAPHQL_PATH)
        .with_status(200)
        .with_body(r#"{"errors":[{"message":"Access denied for activeSubscriptions field."}]}"#)
        .create_async()
        .await;

    let err = load_current_plan(&admin_client(&server)).await.unwrap_err();

    match err {
        ApiError::GraphQl(messages) => {
            assert_eq!(messages, vec!["Access denied for activeSubscriptions field.".to_string()])
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_status_is_reported() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", GRAPHQL_PATH)
        .with_status(401)
        .with_body(r#"{"errors":"[API] Invalid API key or access token"}"#)
        .create_async()
        .await;

    let err = load_current_plan(&admin_client(&server)).await.unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 401, .. }));
}

#[tokio::test]
async fn test_subscription_request_has_fixed_shape() {
    let mut server = mockito::Server::new_async().await;
    let m = server
        .mock("POST", GRAPHQL_PATH)
        .match_header("x-shopify-access-token", ACCESS_TOKEN)
        .match_body(Matcher::PartialJson(json!({
            "variables": {
                "name": "Advance",
                "returnUrl": "https://app.example.com/app",
                "test": true,
                "lineItems": [{
                    "plan": {
                        "appRecurringPricingDetails": {
                            "price": { "amount": "49", "currencyCode": "USD" },
                            "interval": "EVERY_30_DAYS"
                        }
                    }
                }]
            }
        })))
        .with_status(200)
        .with_body(create_body(json!([]), Some("https://demo.myshopify.com/admin/charges/7/confirm")))
        .create_async()
        .await;

    let outcome = request_subscription(
        &admin_client(&server),
        PlanName::Advance,
        "49",
        "https://app.example.com/app",
    )
    .await
    .unwrap();

    m.assert_async().await;
    assert_eq!(
        outcome,
        SubscriptionOutcome::Confirm {
            confirmation_url: "https://demo.myshopify.com/admin/charges/7/confirm".into(),
            subscription_id: Some("gid://shopify/AppSubscription/7".into()),
        }
    );
}

#[tokio::test]
async fn test_subscription_user_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", GRAPHQL_PATH)
        .with_status(200)
        .with_body(create_body(
            json!([{ "field": ["lineItems", "0", "plan"], "message": "Price must be greater than zero" }]),
            None,
        ))
        .create_async()
        .await;

    let outcome = request_subscription(&admin_client(&server), PlanName::Grow, "19", "https://a/app")
        .await
        .unwrap();

    assert_eq!(
        outcome,
        SubscriptionOutcome::UserErrors(vec![UserError {
            field: Some(vec!["lineItems".into(), "0".into(), "plan".into()]),
            message: "Price must be greater than zero".into(),
        }])
    );
}

#[tokio::test]
async fn test_subscription_without_confirmation_url_fails() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", GRAPHQL_PATH)
        .with_status(200)
        .with_body(create_body(json!([]), None))
        .create_async()
        .await;

    let outcome = request_subscription(&admin_client(&server), PlanName::Grow, "19", "https://a/app")
        .await
        .unwrap();

    assert_eq!(outcome, SubscriptionOutcome::Failed("Failed to create subscription".into()));
}
