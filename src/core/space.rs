//! # Spaces
//!
//! A space is a shared trip-planning group. Creating one only records it in
//! local state; there is no backend to sync it to.

use serde::{Deserialize, Serialize};

use crate::core::search::{MIN_PARTY_SIZE, SearchCriteria};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Only the creator can see and plan.
    Private,
    /// Listed, join with a code.
    #[default]
    Friends,
    /// Anyone can join.
    Public,
}

impl Visibility {
    pub const ALL: [Visibility; 3] = [Visibility::Private, Visibility::Friends, Visibility::Public];

    pub fn label(self) -> &'static str {
        match self {
            Visibility::Private => "Private",
            Visibility::Friends => "Friends-only",
            Visibility::Public => "Public",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Visibility::Private => Visibility::Friends,
            Visibility::Friends => Visibility::Public,
            Visibility::Public => Visibility::Private,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Visibility::Private => Visibility::Public,
            Visibility::Friends => Visibility::Private,
            Visibility::Public => Visibility::Friends,
        }
    }
}

/// What the Create Space prompt hands back on confirm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSpacePayload {
    pub name: String,
    pub visibility: Visibility,
    pub people: u32,
    pub start: Option<String>,
    pub end: Option<String>,
    pub city: Option<String>,
}

impl CreateSpacePayload {
    /// Prefill the prompt from the current search.
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        let non_empty = |s: &str| (!s.trim().is_empty()).then(|| s.trim().to_string());
        let mut payload = Self {
            name: String::new(),
            visibility: Visibility::default(),
            people: criteria.people.max(MIN_PARTY_SIZE),
            start: non_empty(&criteria.start),
            end: non_empty(&criteria.end),
            city: non_empty(&criteria.city),
        };
        payload.name = payload.default_name();
        payload
    }

    /// `"City — start → end"`, `"City trip"`, or `"My Trip"`.
    pub fn default_name(&self) -> String {
        let city = self.city.as_deref().map(str::trim).filter(|c| !c.is_empty());
        let range = match (self.start.as_deref(), self.end.as_deref()) {
            (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => {
                Some(format!("{start} → {end}"))
            }
            _ => None,
        };
        match (city, range) {
            (Some(city), Some(range)) => format!("{city} — {range}"),
            (Some(city), None) => format!("{city} trip"),
            _ => "My Trip".to_string(),
        }
    }

    /// Finalize for submission: blank names fall back to the default.
    pub fn finalized(mut self) -> Self {
        let trimmed = self.name.trim().to_string();
        self.name = if trimmed.is_empty() { self.default_name() } else { trimmed };
        self.people = self.people.max(MIN_PARTY_SIZE);
        self
    }
}

/// A created space, kept only in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space {
    pub id: String,
    pub payload: CreateSpacePayload,
}

impl Space {
    pub fn create(payload: CreateSpacePayload) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            payload: payload.finalized(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(city: &str, start: &str, end: &str) -> SearchCriteria {
        SearchCriteria {
            city: city.into(),
            start: start.into(),
            end: end.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_name_variants() {
        let full = CreateSpacePayload::from_criteria(&criteria("Paris", "2025-09-10", "2025-09-14"));
        assert_eq!(full.name, "Paris — 2025-09-10 → 2025-09-14");

        let city_only = CreateSpacePayload::from_criteria(&criteria("Paris", "2025-09-10", ""));
        assert_eq!(city_only.name, "Paris trip");

        let nothing = CreateSpacePayload::from_criteria(&criteria("", "", ""));
        assert_eq!(nothing.name, "My Trip");
        assert_eq!(nothing.people, 2);
        assert_eq!(nothing.visibility, Visibility::Friends);
    }

    #[test]
    fn test_blank_name_falls_back() {
        let mut payload = CreateSpacePayload::from_criteria(&criteria("Rome", "", ""));
        payload.name = "   ".to_string();
        payload.people = 0;
        let payload = payload.finalized();
        assert_eq!(payload.name, "Rome trip");
        assert_eq!(payload.people, 1);
    }

    #[test]
    fn test_visibility_cycles() {
        for v in Visibility::ALL {
            assert_eq!(v.next().prev(), v);
        }
        assert_eq!(Visibility::Public.next(), Visibility::Private);
    }

    #[test]
    fn test_space_ids_are_unique() {
        let payload = CreateSpacePayload::from_criteria(&SearchCriteria::default());
        let a = Space::create(payload.clone());
        let b = Space::create(payload);
        assert_ne!(a.id, b.id);
    }
}
