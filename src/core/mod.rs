//! # Core Application Logic
//!
//! This module contains TripSync's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • filter / paginate    │
//!                    │                         │
//!                    │  No terminal. No UI.    │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct and the search view-state controller
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`search`]: Filter and pagination engines
//! - [`catalog`]: Mock attraction catalog and popular cities
//! - [`detail`]: Attraction detail records and their provider
//! - [`space`]: Create Space payloads
//! - [`config`]: Layered configuration

pub mod action;
pub mod catalog;
pub mod config;
pub mod detail;
pub mod search;
pub mod space;
pub mod state;
