// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for `StakingModule` and `CommonModule`

use api_client::Paging;
use chrono::{Duration, TimeZone, Utc};
use marketplace::filters::GlobalSearchArgs;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

use fixtures::*;

#[tokio::test]
async fn staking_endpoints() {
    let mock_server = MockServer::start().await;
    let market = create_test_marketplace(&mock_server);
    let address = address();

    Mock::given(method("GET"))
        .and(path(format!("/collection/{TICKER}/staking/explore")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "poolId": 7, "collection": TICKER, "rewardTokens": ["XOXNO-c1293a"], "isActive": true }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pool/7/profile"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "poolId": 7, "stakedCount": 120 })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/user/{address}/staking/pool/7")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "poolId": 7,
            "staked": [IDENTIFIER],
            "rewards": [{ "tokenIdentifier": "XOXNO-c1293a", "amountShort": 3.5 }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collection/staking/explore"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "collection": TICKER, "poolCount": 2 }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let staking = market.staking();

    let pools = staking.get_collection_staking_pools(TICKER).await.unwrap();
    assert_eq!(pools[0].reward_tokens, vec!["XOXNO-c1293a".to_string()]);

    let pool = staking.get_pool_details(7).await.unwrap();
    assert_eq!(pool.staked_count, Some(120));

    let position = staking
        .get_user_pool_staking_info(&address, 7)
        .await
        .unwrap();
    assert_eq!(position.staked, vec![IDENTIFIER.to_string()]);
    assert_eq!(position.rewards[0].amount_short, Some(3.5));

    let explore = staking.get_staking_explore().await.unwrap();
    assert_eq!(explore[0].pool_count, Some(2));
}

#[tokio::test]
async fn user_staking_summary() {
    let mock_server = MockServer::start().await;
    let market = create_test_marketplace(&mock_server);
    let address = address();

    Mock::given(method("GET"))
        .and(path(format!("/user/{address}/staking/summary")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pools": [{ "poolId": 1, "staked": [IDENTIFIER] }],
            "totalStaked": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let summary = market.user().get_user_staking_summary(&address).await.unwrap();
    assert_eq!(summary.total_staked, Some(1));
    assert_eq!(summary.pools[0].pool_id, 1);
}

#[tokio::test]
async fn tokens_usd_price_joins_identifiers() {
    let mock_server = MockServer::start().await;
    let market = create_test_marketplace(&mock_server);

    Mock::given(method("GET"))
        .and(path("/tokens/usd-price"))
        .and(query_param("identifier", "EGLD,USDC-c76f1f"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "EGLD": 35.2,
            "USDC-c76f1f": 1.0
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let common = market.common();
    let prices = common
        .get_tokens_usd_price(&["EGLD", "USDC-c76f1f"])
        .await
        .unwrap();
    assert_eq!(prices.len(), 2);
    assert!((prices["EGLD"] - 35.2).abs() < f64::EPSILON);

    assert!(
        common
            .get_tokens_usd_price(&[])
            .await
            .unwrap_err()
            .is_validation()
    );
}

#[tokio::test]
async fn accepted_payment_tokens() {
    let mock_server = MockServer::start().await;
    let market = create_test_marketplace(&mock_server);

    Mock::given(method("GET"))
        .and(path("/tokens/xoxno/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "identifier": "EGLD", "decimals": 18 },
            { "identifier": "USDC-c76f1f", "decimals": 6 }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tokens = market.common().get_accepted_payment_tokens().await.unwrap();
    assert_eq!(tokens[1].decimals, 6);
}

#[tokio::test]
async fn global_search_validation_and_filter() {
    let mock_server = MockServer::start().await;
    let market = create_test_marketplace(&mock_server);

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collections": [{ "collection": TICKER }],
            "users": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let common = market.common();
    assert!(
        common
            .global_search(&GlobalSearchArgs::new("  "))
            .await
            .unwrap_err()
            .is_validation()
    );
    let too_many = GlobalSearchArgs {
        paging: Paging::new(36, 0),
        ..GlobalSearchArgs::new("banana")
    };
    assert!(common.global_search(&too_many).await.unwrap_err().is_validation());

    let result = common
        .global_search(&GlobalSearchArgs::new("banana"))
        .await
        .unwrap();
    assert_eq!(result.collections.len(), 1);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let filter = query_filter(&requests[0]);
    assert_eq!(filter["name"], "banana");
}

#[tokio::test]
async fn analytics_volume_range() {
    let mock_server = MockServer::start().await;
    let market = create_test_marketplace(&mock_server);

    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let end = start + Duration::days(7);

    Mock::given(method("GET"))
        .and(path("/analytics/volume"))
        .and(query_param("startTime", "2025-01-01T00:00:00.000Z"))
        .and(query_param("bin", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "time": "2025-01-01", "volume": 120.5, "trades": 40 }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let common = market.common();
    let volume = common.get_analytics_volume(start, end, "1d").await.unwrap();
    assert_eq!(volume[0].trades, Some(40));

    assert!(
        common
            .get_analytics_volume(end, start, "1d")
            .await
            .unwrap_err()
            .is_validation()
    );
}
