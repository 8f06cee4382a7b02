//! Integration tests for order actions.
//!
//! These tests cover payload sanitization on write, product and discount
//! hydration on read, and the derived customer/connection lookups.

use activecampaign::rest::resources::{hydrate_order, DiscountType, Order, OrderDate, OrderProduct};
use activecampaign::{ActiveCampaign, ActiveCampaignConfig, ApiToken, ApiUrl, ResourceError};
use serde_json::{json, Map, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn create_test_client(server: &MockServer) -> ActiveCampaign {
    let config = ActiveCampaignConfig::builder()
        .api_url(ApiUrl::new(server.uri()).unwrap())
        .api_token(ApiToken::new("test-token").unwrap())
        .build()
        .unwrap();

    ActiveCampaign::new(&config).unwrap()
}

async fn requests_to(server: &MockServer, verb: &str, request_path: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.to_string() == verb && r.url.path() == request_path)
        .collect()
}

fn sent_json(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

async fn mount_order_44(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/3/ecomOrders/44"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ecomOrder": {
                "id": "44",
                "externalid": "ord-1",
                "connectionid": "2",
                "customerid": "9",
                "email": "jane@example.com",
                "totalPrice": "4599",
                "currency": "USD",
                "externalCreatedDate": "2023-11-14T16:13:20-06:00"
            }
        })))
        .mount(server)
        .await;
}

async fn mount_sub_collections(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/3/ecomOrders/44/orderProducts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ecomOrderProducts": [
                {"id": "1", "name": "Trail Shoe", "price": "4999", "quantity": "1", "externalid": "sku-42"}
            ]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/3/ecomOrders/44/orderDiscounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ecomOrderDiscounts": [
                {"id": "5", "name": "WELCOME", "type": "order", "discountAmount": "400"}
            ]
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Reads and Hydration
// ============================================================================

#[tokio::test]
async fn test_get_order_hydrates_products_and_discounts() {
    let server = MockServer::start().await;
    mount_order_44(&server).await;
    mount_sub_collections(&server).await;

    let ac = create_test_client(&server);
    let order = ac.get_order(44).await.unwrap().unwrap();

    assert_eq!(order.id, Some(44));
    assert_eq!(order.order_products.len(), 1);
    assert_eq!(order.order_products[0].price, Some(4999));
    assert_eq!(order.order_discounts.len(), 1);
    assert_eq!(
        order.order_discounts[0].discount_type,
        Some(DiscountType::Order)
    );
}

#[tokio::test]
async fn test_get_missing_order_skips_hydration() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/3/ecomOrders/45"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .expect(1)
        .mount(&server)
        .await;

    let ac = create_test_client(&server);

    assert_eq!(ac.get_order(45).await.unwrap(), None);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_hydration_skips_populated_collections() {
    let server = MockServer::start().await;
    mount_sub_collections(&server).await;

    let ac = create_test_client(&server);
    let order = Order {
        id: Some(44),
        order_products: vec![OrderProduct {
            name: Some("Already here".to_string()),
            ..OrderProduct::default()
        }],
        ..Order::default()
    };

    let order = hydrate_order(ac.rest(), order).await.unwrap();

    assert_eq!(order.order_products[0].name.as_deref(), Some("Already here"));
    assert_eq!(order.order_discounts.len(), 1);
    assert!(requests_to(&server, "GET", "/api/3/ecomOrders/44/orderProducts")
        .await
        .is_empty());
    assert_eq!(
        requests_to(&server, "GET", "/api/3/ecomOrders/44/orderDiscounts")
            .await
            .len(),
        1
    );
}

#[tokio::test]
async fn test_hydration_of_unsaved_order_makes_no_request() {
    let server = MockServer::start().await;
    let ac = create_test_client(&server);

    let order = hydrate_order(ac.rest(), Order::default()).await.unwrap();

    assert!(order.order_products.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_hydration_propagates() {
    let server = MockServer::start().await;
    mount_order_44(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/3/ecomOrders/44/orderProducts"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(&server)
        .await;

    let ac = create_test_client(&server);

    let error = ac.get_order(44).await.unwrap_err();

    assert!(matches!(error, ResourceError::Rest(ref e) if e.status() == Some(500)));
    assert!(requests_to(&server, "GET", "/api/3/ecomOrders/44/orderDiscounts")
        .await
        .is_empty());
}

#[tokio::test]
async fn test_orders_send_filter_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/3/ecomOrders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ecomOrders": [{"id": "44"}, {"id": "45"}]
        })))
        .mount(&server)
        .await;

    let ac = create_test_client(&server);
    let orders = ac.orders(&[("email", "jane@example.com")]).await.unwrap();

    assert_eq!(orders.len(), 2);
    let requests = server.received_requests().await.unwrap();
    let pairs: Vec<(String, String)> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![("filter[email]".to_string(), "jane@example.com".to_string())]
    );
}

#[tokio::test]
async fn test_fetch_customer_and_connection_follow_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/3/ecomCustomers/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ecomCustomer": {"id": "9", "email": "jane@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/3/connections/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connection": {"id": "2", "service": "shopify"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ac = create_test_client(&server);
    let order = Order {
        id: Some(44),
        customer_id: Some(9),
        connection_id: Some(2),
        ..Order::default()
    };

    let customer = order.fetch_customer(ac.rest()).await.unwrap().unwrap();
    let connection = order.fetch_connection(ac.rest()).await.unwrap().unwrap();

    assert_eq!(customer.email.as_deref(), Some("jane@example.com"));
    assert_eq!(connection.service.as_deref(), Some("shopify"));

    let detached = Order::default();
    assert_eq!(detached.fetch_customer(ac.rest()).await.unwrap(), None);
}

// ============================================================================
// Writes
// ============================================================================

#[tokio::test]
async fn test_create_order_sends_sanitized_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/3/ecomOrders"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ecomOrder": {"id": "46", "externalid": "ord-2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ac = create_test_client(&server);
    let mut order = Order {
        id: Some(999),
        external_id: Some("ord-2".to_string()),
        connection_id: Some(2),
        customer_id: Some(9),
        email: Some("jane@example.com".to_string()),
        currency: Some("USD".to_string()),
        total_price: Some(4599),
        external_created_date: Some(OrderDate::from(1_700_000_000_i64)),
        ..Order::default()
    };
    order.add_product("Trail Shoe", 4999, 1, "sku-42");
    order.add_discount("WELCOME", DiscountType::Order, 400);

    let created = ac.create_order(&order).await.unwrap().unwrap();

    assert_eq!(created.id, Some(46));

    let posts = requests_to(&server, "POST", "/api/3/ecomOrders").await;
    assert_eq!(
        sent_json(&posts[0]),
        json!({
            "ecomOrder": {
                "externalid": "ord-2",
                "connectionid": 2,
                "customerid": 9,
                "email": "jane@example.com",
                "currency": "USD",
                "totalPrice": 4599,
                "externalCreatedDate": "2023-11-14T22:13:20+00:00",
                "orderProducts": [
                    {"name": "Trail Shoe", "price": 4999, "quantity": 1, "externalid": "sku-42"}
                ],
                "orderDiscounts": [
                    {"name": "WELCOME", "type": "order", "discountAmount": 400}
                ]
            }
        })
    );
}

#[tokio::test]
async fn test_create_order_with_bad_date_sends_nothing() {
    let server = MockServer::start().await;
    let ac = create_test_client(&server);

    let order = Order {
        external_checkout_id: Some("chk-1".to_string()),
        abandoned_date: Some(OrderDate::from("whenever")),
        ..Order::default()
    };

    let error = ac.create_order(&order).await.unwrap_err();

    assert!(matches!(
        error,
        ResourceError::InvalidField { field: "abandonedDate", .. }
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_order_by_id_resends_hydrated_payload() {
    let server = MockServer::start().await;
    mount_order_44(&server).await;
    mount_sub_collections(&server).await;

    Mock::given(method("PUT"))
        .and(path("/api/3/ecomOrders/44"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ecomOrder": {"id": "44"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ac = create_test_client(&server);
    let updated = ac.update_order(44_u64, Map::new()).await.unwrap();

    assert_eq!(updated.unwrap().id, Some(44));

    let puts = requests_to(&server, "PUT", "/api/3/ecomOrders/44").await;
    let sent = sent_json(&puts[0]);
    assert!(sent["ecomOrder"].get("id").is_none());
    assert_eq!(
        sent["ecomOrder"]["externalCreatedDate"],
        json!("2023-11-14T22:13:20+00:00")
    );
    assert_eq!(
        sent["ecomOrder"]["orderProducts"],
        json!([{"name": "Trail Shoe", "price": 4999, "quantity": 1, "externalid": "sku-42"}])
    );
    assert_eq!(
        sent["ecomOrder"]["orderDiscounts"],
        json!([{"name": "WELCOME", "type": "order", "discountAmount": 400}])
    );
}

#[tokio::test]
async fn test_update_order_by_value_sends_given_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/3/ecomOrders/44"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ecomOrder": {"id": "44", "totalPrice": "5000"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ac = create_test_client(&server);
    let order = Order {
        id: Some(44),
        total_price: Some(4599),
        ..Order::default()
    };

    let mut fields = Map::new();
    fields.insert("totalPrice".to_string(), json!(5000));

    let updated = ac.update_order(&order, fields).await.unwrap().unwrap();

    assert_eq!(updated.total_price, Some(5000));
    let puts = requests_to(&server, "PUT", "/api/3/ecomOrders/44").await;
    assert_eq!(sent_json(&puts[0]), json!({"ecomOrder": {"totalPrice": 5000}}));
}

#[tokio::test]
async fn test_update_order_by_key_is_a_no_op() {
    let server = MockServer::start().await;
    let ac = create_test_client(&server);

    let updated = ac.update_order("ord-1", Map::new()).await.unwrap();

    assert_eq!(updated, None);
    assert!(server.received_requests().await.unwrap().is_empty());
}
