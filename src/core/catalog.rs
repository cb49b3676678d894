//! # Attraction Catalog
//!
//! Static mock data the search flow runs over. The catalog is generated once
//! at startup and handed around as a read-only slice; nothing mutates it.
//!
//! ```text
//! index i ──► name   = NAMES[i % 4] + " {i+1}"
//!         ──► city   = CITIES[i % 4]
//!         ──► rating = 3.8 + ((i * 7) % 12) / 10
//! ```

use serde::{Deserialize, Serialize};

/// Number of entries in the mock catalog.
pub const MOCK_CATALOG_SIZE: usize = 42;

/// Image shown whenever an attraction or city has no photo of its own.
pub const PLACEHOLDER_PHOTO: &str = "/images/placeholder-attraction.jpg";

const MOCK_NAMES: [&str; 4] = ["City Museum", "Old Town Square", "Botanical Garden", "Art Gallery"];
const MOCK_CITIES: [&str; 4] = ["Barcelona", "Lisbon", "Prague", "Athens"];

/// A point-of-interest entry in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub id: String,
    pub place_id: String,
    pub name: String,
    pub city: String,
    /// 0.0 to 5.0
    pub rating: f32,
    /// 1 (cheap) to 4 (expensive), when known.
    pub price_level: Option<u8>,
    pub photos: Vec<String>,
}

impl Attraction {
    /// First photo, or the placeholder when the attraction has none.
    pub fn cover_photo(&self) -> &str {
        photo_or_placeholder(&self.photos, 0)
    }
}

/// Photo at `index`, falling back to [`PLACEHOLDER_PHOTO`].
pub fn photo_or_placeholder(photos: &[String], index: usize) -> &str {
    photos
        .get(index)
        .map(String::as_str)
        .filter(|p| !p.trim().is_empty())
        .unwrap_or(PLACEHOLDER_PHOTO)
}

/// Build the fixed mock catalog.
pub fn mock_catalog() -> Vec<Attraction> {
    (0..MOCK_CATALOG_SIZE)
        .map(|i| Attraction {
            id: format!("a_{}", i + 1),
            place_id: format!("pl_{}", i + 1),
            name: format!("{} {}", MOCK_NAMES[i % 4], i + 1),
            city: MOCK_CITIES[i % 4].to_string(),
            rating: 3.8 + ((i * 7) % 12) as f32 / 10.0,
            price_level: Some((i % 4) as u8 + 1),
            photos: vec![PLACEHOLDER_PHOTO.to_string()],
        })
        .collect()
}

/// A destination offered by the city picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub name: &'static str,
    pub image: &'static str,
}

/// Popular destinations, in display order.
pub const POPULAR_CITIES: &[City] = &[
    City { name: "Tirana", image: "/images/cities/tirana.jpg" },
    City { name: "Lisbon", image: "/images/cities/lisbon.jpg" },
    City { name: "Barcelona", image: "/images/cities/barcelona.jpg" },
    City { name: "Paris", image: "/images/cities/paris.jpg" },
    City { name: "Rome", image: "/images/cities/roma.jpg" },
    City { name: "Athens", image: "/images/cities/athens.jpg" },
    City { name: "Prague", image: "/images/cities/prague.jpg" },
    City { name: "Vienna", image: "/images/cities/vienna.jpg" },
    City { name: "Amsterdam", image: "/images/cities/amsterdam.jpg" },
];

/// Render a price level as repeated currency symbols, e.g. `€€€`.
pub fn price_symbols(level: Option<u8>, symbol: char) -> Option<String> {
    level
        .filter(|l| *l > 0)
        .map(|l| std::iter::repeat_n(symbol, usize::from(l.min(4))).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_catalog_shape() {
        let catalog = mock_catalog();
        assert_eq!(catalog.len(), 42);
        assert_eq!(catalog[0].id, "a_1");
        assert_eq!(catalog[0].place_id, "pl_1");
        assert_eq!(catalog[0].name, "City Museum 1");
        assert_eq!(catalog[0].city, "Barcelona");
        assert_eq!(catalog[41].name, "Old Town Square 42");
        assert_eq!(catalog[41].city, "Lisbon");
    }

    #[test]
    fn test_ratings_stay_in_range() {
        for a in mock_catalog() {
            assert!((0.0..=5.0).contains(&a.rating), "{} has {}", a.name, a.rating);
            assert!(matches!(a.price_level, Some(1..=4)));
        }
    }

    #[test]
    fn test_rating_formula() {
        let catalog = mock_catalog();
        // i = 1: 3.8 + 7/10
        assert!((catalog[1].rating - 4.5).abs() < 1e-5);
        // i = 2: 3.8 + (14 % 12)/10
        assert!((catalog[2].rating - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_photo_placeholder_fallback() {
        let mut a = mock_catalog().remove(0);
        a.photos.clear();
        assert_eq!(a.cover_photo(), PLACEHOLDER_PHOTO);

        let photos = vec!["  ".to_string(), "/img/x.jpg".to_string()];
        assert_eq!(photo_or_placeholder(&photos, 0), PLACEHOLDER_PHOTO);
        assert_eq!(photo_or_placeholder(&photos, 1), "/img/x.jpg");
        assert_eq!(photo_or_placeholder(&photos, 9), PLACEHOLDER_PHOTO);
    }

    #[test]
    fn test_price_symbols() {
        assert_eq!(price_symbols(Some(3), '€').as_deref(), Some("€€€"));
        assert_eq!(price_symbols(Some(0), '$'), None);
        assert_eq!(price_symbols(None, '$'), None);
    }
}
