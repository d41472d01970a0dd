// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! The process-wide client keeps the first configuration it was given.
//! Kept in its own test binary so no other test touches the global.

use api_client::{ApiClient, ClientConfig};
use shared_types::Chain;

#[test]
fn first_init_wins() {
    assert!(ApiClient::global().is_none());

    let first = ApiClient::init(ClientConfig::new(Chain::Devnet)).unwrap();
    assert_eq!(first.config().chain, Chain::Devnet);

    let second = ApiClient::init(
        ClientConfig::new(Chain::Mainnet)
            .with_api_key("ignored")
            .unwrap(),
    )
    .unwrap();

    assert!(std::ptr::eq(first, second));
    assert_eq!(second.config().chain, Chain::Devnet);
    assert!(second.config().api_key.is_none());
    assert!(std::ptr::eq(ApiClient::global().unwrap(), first));
}
