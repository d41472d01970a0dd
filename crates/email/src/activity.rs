// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Trading activity notifications

use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared_types::NftIdentifier;
use url::Url;

use crate::{EmailBody, EmailConfig, EmailError, EmailResult, EmailTemplate, require};

const TEMPLATE: &str = "activity";

/// What happened to the NFT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityKind {
    /// The recipient's listing was bought
    Sale,
    /// The recipient bought a listing
    Purchase,
    /// Someone made an offer on the recipient's NFT
    OfferReceived,
    /// The recipient's offer was accepted
    OfferAccepted,
    /// Someone bid on the recipient's auction
    BidPlaced,
    /// The recipient's bid was beaten
    Outbid,
    /// The recipient won an auction
    AuctionWon,
    /// The recipient's collection offer was filled
    GlobalOfferAccepted,
}

impl ActivityKind {
    fn subject(self, nft: &str) -> String {
        match self {
            Self::Sale => format!("You sold {nft}"),
            Self::Purchase => format!("You bought {nft}"),
            Self::OfferReceived => format!("New offer on {nft}"),
            Self::OfferAccepted => format!("Your offer on {nft} was accepted"),
            Self::BidPlaced => format!("New bid on {nft}"),
            Self::Outbid => format!("You have been outbid on {nft}"),
            Self::AuctionWon => format!("You won the auction for {nft}"),
            Self::GlobalOfferAccepted => format!("Your collection offer filled with {nft}"),
        }
    }

    fn summary(self, nft: &str, price: &str) -> String {
        match self {
            Self::Sale => format!("{nft} sold for {price}."),
            Self::Purchase => format!("{nft} is now in your wallet. You paid {price}."),
            Self::OfferReceived => format!("You received an offer of {price} for {nft}."),
            Self::OfferAccepted => format!("Your offer of {price} for {nft} was accepted."),
            Self::BidPlaced => format!("A bid of {price} was placed on {nft}."),
            Self::Outbid => format!(
                "Someone bid {price} on {nft}. Place a higher bid to stay in the race."
            ),
            Self::AuctionWon => format!("Your winning bid of {price} secured {nft}."),
            Self::GlobalOfferAccepted => {
                format!("{nft} was sold to you through your collection offer of {price}.")
            }
        }
    }

    fn counterparty_label(self) -> &'static str {
        match self {
            Self::Sale => "Buyer",
            Self::OfferReceived => "From",
            Self::BidPlaced => "Bidder",
            Self::Outbid => "Highest bidder",
            Self::Purchase | Self::OfferAccepted | Self::AuctionWon | Self::GlobalOfferAccepted => {
                "Seller"
            }
        }
    }

    fn action(self) -> &'static str {
        match self {
            Self::OfferReceived => "Review offer",
            Self::Outbid => "Place a new bid",
            _ => "View NFT",
        }
    }
}

/// Notification about one NFT trade event
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEmail {
    #[allow(missing_docs)]
    pub kind: ActivityKind,
    /// Recipient's display name
    #[serde(default)]
    pub username: Option<String>,
    /// NFT display name
    pub nft_name: String,
    /// `TICKER-hash-nonce` identifier
    pub identifier: String,
    /// Decimal amount as shown to users, e.g. `1.25`
    pub price: String,
    /// Payment token ticker
    pub payment_token: String,
    /// The other party's name or address
    #[serde(default)]
    pub counterparty: Option<String>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub image_url: Option<Url>,
    /// 64 hex characters
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[allow(missing_docs)]
    pub timestamp: DateTime<Utc>,
}

impl EmailTemplate for ActivityEmail {
    fn name(&self) -> &'static str {
        TEMPLATE
    }

    fn validate(&self) -> EmailResult<()> {
        require(TEMPLATE, "nft name", &self.nft_name)?;
        require(TEMPLATE, "price", &self.price)?;
        require(TEMPLATE, "payment token", &self.payment_token)?;
        NftIdentifier::new(self.identifier.as_str())
            .map_err(|e| EmailError::invalid_payload(TEMPLATE, e))?;
        if let Some(hash) = &self.tx_hash
            && (hash.len() != 64 || !hash.chars().all(|c| c.is_ascii_hexdigit()))
        {
            return Err(EmailError::invalid_payload(
                TEMPLATE,
                format!("invalid transaction hash {hash}"),
            ));
        }
        Ok(())
    }

    fn subject(&self, _config: &EmailConfig) -> String {
        self.kind.subject(&self.nft_name)
    }

    fn body(&self, config: &EmailConfig) -> EmailBody {
        let price = format!("{} {}", self.price, self.payment_token);
        let greeting = match self.username.as_deref() {
            Some(name) if !name.trim().is_empty() => format!("Hi {name},"),
            _ => "Hi,".to_string(),
        };

        let mut body = EmailBody::new(self.kind.summary(&self.nft_name, &price))
            .heading(self.subject(config));
        if let Some(image) = &self.image_url {
            body = body.image(image.as_str(), self.nft_name.as_str());
        }
        body = body
            .paragraph(greeting)
            .paragraph(self.kind.summary(&self.nft_name, &price))
            .details(vec![
                ("Item", self.nft_name.clone()),
                ("Identifier", self.identifier.clone()),
                ("Price", price),
                (
                    self.kind.counterparty_label(),
                    self.counterparty.clone().unwrap_or_default(),
                ),
                (
                    "Date",
                    self.timestamp.format("%B %-d, %Y %H:%M UTC").to_string(),
                ),
            ])
            .button(self.kind.action(), config.page(&format!("nft/{}", self.identifier)));

        if let Some(hash) = &self.tx_hash {
            body = body.button("View transaction", config.transaction(hash));
        }
        body
    }
}
