//! # Attraction Details
//!
//! The detail page consumes an [`AttractionDetail`] record resolved by a
//! [`DetailProvider`]. Only a mock provider exists; it answers every place id
//! with the same museum, renamed to the place id it was asked about.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::catalog::Attraction;

pub const DEFAULT_OPENING_HOURS: &str = "Daily 10:00 - 18:00";
pub const NO_OVERVIEW: &str = "No overview available yet.";
pub const NO_PRICES: &str = "Pricing information not available";
pub const NO_ABOUT: &str = "Additional details coming soon.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub rating: f32,
    pub text: String,
}

/// Everything the detail page shows about one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttractionDetail {
    pub place_id: String,
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub rating: Option<f32>,
    pub user_ratings_total: Option<u32>,
    pub price_level: Option<u8>,
    pub photos: Vec<String>,
    pub overview: Option<String>,
    pub about: Option<String>,
    pub prices: Option<String>,
    pub opening_hours: Option<String>,
    pub reviews: Vec<Review>,
}

impl AttractionDetail {
    /// `"city, address"`, or just the city when the address is unknown.
    pub fn location_line(&self) -> String {
        match self.address.as_deref().filter(|a| !a.is_empty()) {
            Some(address) => format!("{}, {}", self.city, address),
            None => self.city.clone(),
        }
    }

    pub fn overview_text(&self) -> &str {
        non_empty_or(self.overview.as_deref(), NO_OVERVIEW)
    }

    pub fn prices_text(&self) -> &str {
        non_empty_or(self.prices.as_deref(), NO_PRICES)
    }

    pub fn about_text(&self) -> &str {
        non_empty_or(self.about.as_deref(), NO_ABOUT)
    }

    pub fn opening_hours_text(&self) -> &str {
        non_empty_or(self.opening_hours.as_deref(), DEFAULT_OPENING_HOURS)
    }
}

fn non_empty_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(fallback)
}

#[derive(Debug)]
pub enum DetailError {
    /// No place with this id exists.
    NotFound(String),
    /// The provider could not answer right now.
    Unavailable(String),
}

impl fmt::Display for DetailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailError::NotFound(id) => write!(f, "no attraction with place id {id}"),
            DetailError::Unavailable(msg) => write!(f, "details unavailable: {msg}"),
        }
    }
}

impl std::error::Error for DetailError {}

#[async_trait]
pub trait DetailProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Resolve the full record for `place_id`.
    async fn fetch_detail(&self, place_id: &str) -> Result<AttractionDetail, DetailError>;
}

/// Serves canned details, optionally after a fixed delay.
pub struct MockDetailProvider {
    catalog: Vec<Attraction>,
    delay: Duration,
}

impl MockDetailProvider {
    pub fn new(catalog: Vec<Attraction>) -> Self {
        Self {
            catalog,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl DetailProvider for MockDetailProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_detail(&self, place_id: &str) -> Result<AttractionDetail, DetailError> {
        if place_id.trim().is_empty() {
            return Err(DetailError::NotFound(place_id.to_string()));
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        debug!("Resolving mock detail for {place_id}");

        let mut detail = mock_detail(place_id);
        // Known catalog entries keep their own name, city, and price level
        if let Some(entry) = self.catalog.iter().find(|a| a.place_id == place_id) {
            detail.name = entry.name.clone();
            detail.city = entry.city.clone();
            detail.price_level = entry.price_level;
        }
        Ok(detail)
    }
}

/// The canned museum every mock lookup starts from.
pub fn mock_detail(place_id: &str) -> AttractionDetail {
    AttractionDetail {
        place_id: place_id.to_string(),
        name: "National Museum of Art".to_string(),
        city: "Lisbon".to_string(),
        address: Some("Praça do Império".to_string()),
        rating: Some(4.6),
        user_ratings_total: Some(1287),
        price_level: Some(2),
        photos: (4..=9).map(|n| format!("/images/tirana{n}.jpg")).collect(),
        overview: Some(
            "A landmark museum featuring classic and contemporary exhibitions with waterfront \
             views. The museum houses an impressive collection spanning from ancient artifacts \
             to modern masterpieces, with special attention to local artists and cultural heritage."
                .to_string(),
        ),
        prices: Some(
            "Adults €10, Students €6, Children under 12 free. Guided tours available for an \
             additional €5 per person."
                .to_string(),
        ),
        opening_hours: Some(DEFAULT_OPENING_HOURS.to_string()),
        reviews: vec![
            Review {
                author: "Marta".to_string(),
                rating: 5.0,
                text: "Stunning collection and lovely café. The impressionist wing was \
                       particularly impressive with natural lighting that showcased the \
                       paintings beautifully."
                    .to_string(),
            },
            Review {
                author: "Jon".to_string(),
                rating: 4.5,
                text: "Great curation; go early to avoid crowds. The temporary exhibition on \
                       contemporary sculpture was thought-provoking and well-presented."
                    .to_string(),
            },
        ],
        about: Some(
            "Open daily 10:00–18:00. Guided tours available on weekends at 11:00 and 15:00. \
             The museum is wheelchair accessible and offers audio guides in multiple languages."
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::mock_catalog;

    #[test]
    fn test_fallback_texts() {
        let mut detail = mock_detail("pl_1");
        detail.overview = None;
        detail.prices = Some("   ".to_string());
        detail.about = None;
        detail.opening_hours = None;
        assert_eq!(detail.overview_text(), NO_OVERVIEW);
        assert_eq!(detail.prices_text(), NO_PRICES);
        assert_eq!(detail.about_text(), NO_ABOUT);
        assert_eq!(detail.opening_hours_text(), DEFAULT_OPENING_HOURS);
    }

    #[test]
    fn test_location_line() {
        let mut detail = mock_detail("pl_1");
        assert_eq!(detail.location_line(), "Lisbon, Praça do Império");
        detail.address = None;
        assert_eq!(detail.location_line(), "Lisbon");
    }

    #[tokio::test]
    async fn test_mock_provider_uses_catalog_entry() {
        let provider = MockDetailProvider::new(mock_catalog());
        let detail = provider.fetch_detail("pl_3").await.unwrap();
        assert_eq!(detail.place_id, "pl_3");
        assert_eq!(detail.name, "Botanical Garden 3");
        assert_eq!(detail.city, "Prague");
        assert_eq!(detail.photos.len(), 6);
        assert_eq!(detail.reviews.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_provider_unknown_id_gets_canned_record() {
        let provider = MockDetailProvider::new(Vec::new());
        let detail = provider.fetch_detail("pl_999").await.unwrap();
        assert_eq!(detail.name, "National Museum of Art");
        assert_eq!(detail.place_id, "pl_999");
    }

    #[test]
    fn test_mock_provider_rejects_blank_id() {
        let provider = MockDetailProvider::new(Vec::new());
        let result = tokio_test::block_on(provider.fetch_detail(""));
        assert!(matches!(result, Err(DetailError::NotFound(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_provider_delay() {
        let provider =
            MockDetailProvider::new(Vec::new()).with_delay(Duration::from_millis(200));
        let started = tokio::time::Instant::now();
        provider.fetch_detail("pl_1").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(200));
    }
}
