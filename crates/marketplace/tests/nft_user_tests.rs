// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for `NftModule` and `UserModule`

use api_client::Paging;
use marketplace::filters::{NftOffersArgs, OfferDirection, SearchNftsArgs};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, path_regex, query_param},
};

use fixtures::*;

#[tokio::test]
async fn get_nft_by_collection_and_nonce_builds_identifier() {
    let mock_server = MockServer::start().await;
    let market = create_test_marketplace(&mock_server);

    Mock::given(method("GET"))
        .and(path(format!("/nft/{IDENTIFIER}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(nft_doc(1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let nft = market
        .nft()
        .get_nft_by_collection_and_nonce(TICKER, 1)
        .await
        .unwrap();

    assert_eq!(nft.identifier, IDENTIFIER);
    assert_eq!(nft.sale_info.unwrap().auction_id, Some(101));
    assert_eq!(nft.owner.unwrap().username.as_deref(), Some("banana-fan"));
}

#[tokio::test]
async fn nft_not_found_surfaces_status() {
    let mock_server = MockServer::start().await;
    let market = create_test_marketplace(&mock_server);

    Mock::given(method("GET"))
        .and(path("/nft/BANANA-e955fd-ff"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "NFT not found" })),
        )
        .mount(&mock_server)
        .await;

    let error = market
        .nft()
        .get_nft_by_identifier("BANANA-e955fd-ff")
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(404));
    assert!(error.to_string().contains("/nft/BANANA-e955fd-ff"));
}

#[tokio::test]
async fn invalid_identifier_fails_before_request() {
    let mock_server = MockServer::start().await;
    let market = create_test_marketplace(&mock_server);

    for identifier in ["BANANA-e955fd", "BANANA-e955fd-1", "BANANA-e955fd-0G"] {
        assert!(
            market
                .nft()
                .get_nft_by_identifier(identifier)
                .await
                .unwrap_err()
                .is_validation()
        );
    }

    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn nft_offers_filter_and_ceiling() {
    let mock_server = MockServer::start().await;
    let market = create_test_marketplace(&mock_server);

    Mock::given(method("GET"))
        .and(path("/nft/offer/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [
                { "offerId": 1, "identifier": IDENTIFIER, "priceShort": 2.5, "isActive": true },
                { "offerId": 2, "identifier": IDENTIFIER, "priceShort": 1.5, "isActive": false }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let too_many = NftOffersArgs {
        paging: Paging::new(26, 0),
        ..NftOffersArgs::default()
    };
    assert!(
        market
            .nft()
            .get_nft_offers(&too_many)
            .await
            .unwrap_err()
            .is_validation()
    );

    let args = NftOffersArgs {
        identifiers: vec![IDENTIFIER.to_string()],
        paging: Paging::new(2, 4),
        ..NftOffersArgs::default()
    };
    let page = market.nft().get_nft_offers(&args).await.unwrap();

    assert_eq!(page.resources.len(), 2);
    assert!(page.resources[0].is_active);
    assert_eq!(page.next_page.paging.skip, 6);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let filter = query_filter(&requests[0]);
    assert_eq!(filter["filters"]["identifier"], json!([IDENTIFIER]));
    assert_eq!(filter["skip"], 4);
}

#[tokio::test]
async fn nft_activity_filters_by_identifier() {
    let mock_server = MockServer::start().await;
    let market = create_test_marketplace(&mock_server);

    Mock::given(method("GET"))
        .and(path("/activity/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "resources": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = market
        .nft()
        .get_nft_activity(IDENTIFIER, Paging::new(10, 0))
        .await
        .unwrap();
    assert!(page.empty);
    assert_eq!(page.next_page.identifiers, vec![IDENTIFIER.to_string()]);

    let requests = mock_server.received_requests().await.unwrap();
    let filter = query_filter(&requests[0]);
    assert_eq!(filter["filters"]["identifier"], json!([IDENTIFIER]));
    assert_eq!(filter["filters"]["collection"], json!([TICKER]));
}

#[tokio::test]
async fn daily_trending_pages() {
    let mock_server = MockServer::start().await;
    let market = create_test_marketplace(&mock_server);

    Mock::given(method("GET"))
        .and(path("/nft/trending"))
        .and(query_param("top", "2"))
        .and(query_param("skip", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([nft_doc(1), nft_doc(2)])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = market
        .nft()
        .get_daily_trending(Paging::new(2, 0))
        .await
        .unwrap();

    assert_eq!(page.resources.len(), 2);
    assert!(page.has_more_results);
    assert_eq!(page.next_page.paging, Paging::new(2, 2));

    assert!(
        market
            .nft()
            .get_daily_trending(Paging::new(26, 0))
            .await
            .unwrap_err()
            .is_validation()
    );
}

#[tokio::test]
async fn user_profile_and_address_check() {
    let mock_server = MockServer::start().await;
    let market = create_test_marketplace(&mock_server);
    let address = address();

    Mock::given(method("GET"))
        .and(path(format!("/user/{address}/profile")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "address": address,
            "herotag": "banana.elrond"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let profile = market.user().get_user_profile(&address).await.unwrap();
    assert_eq!(profile.herotag.as_deref(), Some("banana.elrond"));

    for bad in ["erd1short", "0x1234", ""] {
        assert!(
            market
                .user()
                .get_user_profile(bad)
                .await
                .unwrap_err()
                .is_validation()
        );
    }
}

#[tokio::test]
async fn user_inventories() {
    let mock_server = MockServer::start().await;
    let market = create_test_marketplace(&mock_server);
    let address = address();

    Mock::given(method("GET"))
        .and(path(format!("/user/{address}/inventory-summary")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "collection": TICKER, "count": 3, "floorPrice": 1.0 }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/user/{address}/token-inventory")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "identifier": "EGLD", "balance": "1000000000000000000", "decimals": 18 }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let inventory = market.user().get_user_inventory(&address).await.unwrap();
    assert_eq!(inventory[0].count, 3);

    let tokens = market.user().get_user_token_inventory(&address).await.unwrap();
    assert_eq!(tokens[0].decimals, Some(18));
}

#[tokio::test]
async fn user_nfts_force_owner_filter() {
    let mock_server = MockServer::start().await;
    let market = create_test_marketplace(&mock_server);
    let address = address();

    Mock::given(method("GET"))
        .and(path_regex(r"^/nft/[A-Za-z0-9+/=]+/query$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nft_page(1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let args = SearchNftsArgs {
        collections: vec![TICKER.to_string()],
        paging: Paging::new(35, 0),
        ..SearchNftsArgs::default()
    };
    let page = market.user().get_user_nfts(&address, &args).await.unwrap();

    assert_eq!(page.next_page.owners, vec![address.clone()]);
    let requests = mock_server.received_requests().await.unwrap();
    let filter = path_filter(&requests[0]);
    assert_eq!(filter["filters"]["owner"], json!([address]));
}

#[tokio::test]
async fn user_offers_direction() {
    let mock_server = MockServer::start().await;
    let market = create_test_marketplace(&mock_server);
    let address = address();

    Mock::given(method("GET"))
        .and(path("/nft/offer/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "resources": [] })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let user = market.user();
    user.get_user_offers(&address, OfferDirection::Placed, Paging::default())
        .await
        .unwrap();
    user.get_user_offers(&address, OfferDirection::Received, Paging::default())
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let placed = query_filter(&requests[0]);
    assert_eq!(placed["filters"]["owner"], json!([address]));
    assert_eq!(placed["filters"]["nftOwner"], json!([]));

    let received = query_filter(&requests[1]);
    assert_eq!(received["filters"]["owner"], json!([]));
    assert_eq!(received["filters"]["nftOwner"], json!([address]));
}
