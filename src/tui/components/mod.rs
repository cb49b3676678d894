//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: brand, navigation, login state, status message
//! - `Pagination`: previous/next and the page-number window
//!
//! ### Stateful Components (Event-Driven)
//!
//! A persistent `*State` lives in `TuiState` and handles events; a short-lived
//! wrapper borrows it together with the props to render one frame:
//! - `SearchForm` / `SearchFormView`: query, city, dates, party size
//! - `ResultsState` / `Results`: card grid, skeletons, empty state
//! - `DetailPageState` / `DetailPage`: gallery, add-to-trip, sections
//! - `DropdownState` / `Dropdown`: the selection popup the pickers share
//!
//! Anything that floats over other content (picker lists, the lightbox, the
//! Create Space prompt) has a separate render call made after the page so it
//! draws on top.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs               (this file)
//! ├── title_bar.rs         (Top bar)
//! ├── home.rs              (Landing page)
//! ├── search_form.rs       (Search inputs)
//! ├── text_field.rs        (Single-line input)
//! ├── dropdown.rs          (Shared selection popup)
//! ├── city_picker.rs       (Popular cities)
//! ├── date_picker.rs       (Next 30 days)
//! ├── results.rs           (Result grid)
//! ├── pagination.rs        (Page links)
//! ├── attraction_detail.rs (Detail page)
//! ├── carousel.rs          (Photo gallery + lightbox)
//! ├── add_to_trip.rs       (Trip day picker)
//! └── create_space.rs      (Create Space prompt)
//! ```

pub mod add_to_trip;
pub mod attraction_detail;
pub mod carousel;
pub mod city_picker;
pub mod create_space;
pub mod date_picker;
pub mod dropdown;
pub mod home;
pub mod pagination;
pub mod results;
pub mod search_form;
pub mod text_field;
mod title_bar;

pub use title_bar::TitleBar;
