//! HTTP client for the places search, details, and photo endpoints.
//!
//! Wraps `reqwest` with endpoint-specific error handling, credential
//! injection, and typed response deserialization. Both JSON endpoints carry
//! a `"status"` field in the envelope; API-level errors surface as
//! [`PlacesError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};

use platefinder_core::Coordinate;

use crate::error::PlacesError;
use crate::types::{Candidate, DetailsResponse, RawPlaceDetail, SearchPage, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Field set requested from the details endpoint. Fixed: the enricher merges
/// exactly these against the originating search result.
const DETAIL_FIELDS: &str =
    "name,formatted_address,geometry,photos,rating,user_ratings_total,price_level,opening_hours";

const DEFAULT_PHOTO_MAX_WIDTH: u32 = 400;

/// Client for the places API.
///
/// Manages the HTTP client, API key, and endpoint URLs. Use
/// [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    search_url: Url,
    details_url: Url,
    photo_url: Url,
    photo_max_width: u32,
}

impl PlacesClient {
    /// Creates a new client pointed at the production places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// The endpoint paths `nearbysearch/json`, `details/json`, and `photo`
    /// are resolved relative to `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL base.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("platefinder/0.1 (nearby-restaurant-search)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // relative joins append path segments instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let invalid = |reason: String| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };
        let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        let search_url = base
            .join("nearbysearch/json")
            .map_err(|e| invalid(e.to_string()))?;
        let details_url = base
            .join("details/json")
            .map_err(|e| invalid(e.to_string()))?;
        let photo_url = base.join("photo").map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            search_url,
            details_url,
            photo_url,
            photo_max_width: DEFAULT_PHOTO_MAX_WIDTH,
        })
    }

    /// Sets the `maxwidth` used when expanding photo references into URLs.
    #[must_use]
    pub fn photo_max_width(mut self, width: u32) -> Self {
        self.photo_max_width = width;
        self
    }

    /// Fetches one page of restaurant search results around `location`.
    ///
    /// `radius_m` is a positive distance in meters. Pass the previous page's
    /// continuation token to fetch the next page; note the token is only
    /// valid after a short delay from issuance (see the aggregation loop).
    ///
    /// A `"ZERO_RESULTS"` status is not an error: it yields an empty page
    /// with no continuation token.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] if the API returns any other non-`OK` status.
    /// - [`PlacesError::Http`] on network failure or timeout.
    /// - [`PlacesError::Deserialize`] if the response body does not match
    ///   the expected shape.
    pub async fn search_page(
        &self,
        location: Coordinate,
        radius_m: u32,
        page_token: Option<&str>,
    ) -> Result<SearchPage, PlacesError> {
        let location = location.to_string();
        let radius = radius_m.to_string();
        let mut params = vec![
            ("location", location.as_str()),
            ("radius", radius.as_str()),
            ("type", "restaurant"),
        ];
        if let Some(token) = page_token {
            params.push(("pagetoken", token));
        }

        let url = self.request_url(&self.search_url, &params);
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                context: "nearby search page".to_owned(),
                source: e,
            })?;

        match parsed.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => {
                return Ok(SearchPage {
                    candidates: Vec::new(),
                    next_page_token: None,
                })
            }
            other => {
                return Err(PlacesError::Api {
                    status: other.to_owned(),
                    message: parsed.error_message.unwrap_or_default(),
                })
            }
        }

        let mut candidates = Vec::with_capacity(parsed.results.len());
        for raw in parsed.results {
            match Candidate::from_raw(raw) {
                Some(candidate) => candidates.push(candidate),
                None => {
                    tracing::debug!("skipping search result missing place_id, name, or geometry");
                }
            }
        }

        Ok(SearchPage {
            candidates,
            next_page_token: parsed.next_page_token,
        })
    }

    /// Fetches the detail payload for one place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] if the API returns a non-`OK` status or an
    ///   `OK` envelope with no `result` object.
    /// - [`PlacesError::Http`] on network failure or timeout.
    /// - [`PlacesError::Deserialize`] if the response body does not match
    ///   the expected shape.
    pub async fn place_details(&self, place_id: &str) -> Result<RawPlaceDetail, PlacesError> {
        let url = self.request_url(
            &self.details_url,
            &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
        );
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let parsed: DetailsResponse =
            serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                context: format!("place details for {place_id}"),
                source: e,
            })?;

        if parsed.status != "OK" {
            return Err(PlacesError::Api {
                status: parsed.status,
                message: parsed.error_message.unwrap_or_default(),
            });
        }

        parsed.result.ok_or_else(|| PlacesError::Api {
            status: "OK".to_owned(),
            message: "details envelope has no result object".to_owned(),
        })
    }

    /// Expands an opaque photo reference into a fetchable URL carrying the
    /// configured `maxwidth` and the credential.
    #[must_use]
    pub fn photo_url(&self, reference: &str) -> String {
        let mut url = self.photo_url.clone();
        url.query_pairs_mut()
            .append_pair("maxwidth", &self.photo_max_width.to_string())
            .append_pair("photoreference", reference)
            .append_pair("key", &self.api_key);
        url.to_string()
    }

    /// Clones an endpoint URL and appends the credential plus `params`,
    /// percent-encoding all values.
    fn request_url(&self, endpoint: &Url, params: &[(&str, &str)]) -> Url {
        let mut url = endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
        }
        url
    }
}
