// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `top`/`skip` paging shared by all listing endpoints
//!
//! Every listing operation takes an argument struct implementing
//! [`Paginated`]. Paging is validated before any request is made, and each
//! [`Page`] carries the argument struct for the following page.

use serde::{Deserialize, Serialize};

use crate::{ApiError, ApiResult};

/// Ceiling for collection, offer and trending listings
pub const MAX_TOP_STANDARD: u32 = 25;

/// Ceiling for NFT search, activity and global search
pub const MAX_TOP_EXTENDED: u32 = 35;

/// Page size and offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    /// Number of items requested
    pub top: u32,
    /// Number of items skipped
    pub skip: u32,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            top: MAX_TOP_STANDARD,
            skip: 0,
        }
    }
}

impl Paging {
    /// Create paging from explicit values
    pub const fn new(top: u32, skip: u32) -> Self {
        Self { top, skip }
    }

    /// Reject a zero page size or one above `max_top`
    pub fn validate(self, max_top: u32) -> ApiResult<()> {
        if self.top == 0 {
            return Err(ApiError::validation("Top must be greater than 0"));
        }
        if self.top > max_top {
            return Err(ApiError::validation(format!(
                "Top cannot be greater than {max_top}"
            )));
        }
        Ok(())
    }

    /// Paging of the page that follows this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            top: self.top,
            skip: self.skip.saturating_add(self.top),
        }
    }
}

/// Argument structs of paged listing operations
pub trait Paginated: Clone {
    /// Largest accepted `top` for this listing
    const MAX_TOP: u32;

    /// Current paging
    fn paging(&self) -> Paging;

    /// Replace the paging
    fn set_paging(&mut self, paging: Paging);

    /// Check paging against [`Paginated::MAX_TOP`]
    fn validate_paging(&self) -> ApiResult<()> {
        self.paging().validate(Self::MAX_TOP)
    }

    /// Same arguments with `skip` advanced by `top`
    #[must_use]
    fn next_page(&self) -> Self {
        let mut next = self.clone();
        next.set_paging(self.paging().next());
        next
    }
}

/// Listing body as returned by the server
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPage<T> {
    /// Items on this page
    #[serde(alias = "results", default)]
    pub resources: Vec<T>,
    /// Server-side "more results" flag, when provided
    #[serde(default)]
    pub has_more_results: Option<bool>,
    /// Total number of matches, when provided
    #[serde(default)]
    pub count: Option<u64>,
}

/// One page of results plus the arguments for the next page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T, A> {
    /// Items on this page
    pub resources: Vec<T>,
    /// Whether another page may exist
    pub has_more_results: bool,
    /// `true` when this page has no items
    pub empty: bool,
    /// Total number of matches, when the server reports it
    pub count: Option<u64>,
    /// Arguments that fetch the next page
    #[serde(rename = "getNextPagePayload")]
    pub next_page: A,
}

impl<T, A: Paginated> Page<T, A> {
    /// Build a page from a server response and the arguments that produced it
    ///
    /// Without a server-side flag, more results are assumed when the page is full.
    pub fn from_raw(raw: RawPage<T>, args: &A) -> Self {
        let top = usize::try_from(args.paging().top).unwrap_or(usize::MAX);
        let has_more_results = raw
            .has_more_results
            .unwrap_or(raw.resources.len() >= top);

        Self {
            empty: raw.resources.is_empty(),
            has_more_results,
            count: raw.count,
            next_page: args.next_page(),
            resources: raw.resources,
        }
    }

    /// Build a page from an endpoint that answers with a bare array
    pub fn from_items(items: Vec<T>, args: &A) -> Self {
        Self::from_raw(
            RawPage {
                resources: items,
                has_more_results: None,
                count: None,
            },
            args,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Args {
        name: String,
        paging: Paging,
    }

    impl Paginated for Args {
        const MAX_TOP: u32 = MAX_TOP_STANDARD;

        fn paging(&self) -> Paging {
            self.paging
        }

        fn set_paging(&mut self, paging: Paging) {
            self.paging = paging;
        }
    }

    #[test]
    fn validate_bounds() {
        assert!(Paging::new(0, 0).validate(25).is_err());
        assert!(Paging::new(26, 0).validate(25).is_err());
        assert!(Paging::new(25, 0).validate(25).is_ok());
        assert!(Paging::new(35, 0).validate(MAX_TOP_EXTENDED).is_ok());

        let error = Paging::new(26, 0).validate(25).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Validation error: Top cannot be greater than 25"
        );
    }

    #[test]
    fn next_page_advances_skip_only() {
        let args = Args {
            name: "x".to_string(),
            paging: Paging::new(10, 20),
        };
        let next = args.next_page();
        assert_eq!(next.paging, Paging::new(10, 30));
        assert_eq!(next.name, "x");
    }

    #[test]
    fn page_flags_from_raw() {
        let args = Args {
            paging: Paging::new(2, 0),
            ..Args::default()
        };

        let full = Page::from_items(vec![1, 2], &args);
        assert!(full.has_more_results);
        assert!(!full.empty);
        assert_eq!(full.next_page.paging.skip, 2);

        let partial = Page::from_items(vec![1], &args);
        assert!(!partial.has_more_results);

        let empty: Page<i32, Args> = Page::from_items(vec![], &args);
        assert!(empty.empty);
        assert!(!empty.has_more_results);
    }

    #[test]
    fn server_flag_wins() {
        let args = Args {
            paging: Paging::new(2, 0),
            ..Args::default()
        };
        let raw: RawPage<u32> =
            serde_json::from_str(r#"{"results":[1],"hasMoreResults":true,"count":9}"#).unwrap();
        let page = Page::from_raw(raw, &args);
        assert!(page.has_more_results);
        assert_eq!(page.count, Some(9));
    }
}
