//! TripSync library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Screen shown when the app opens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StartScreen {
    #[default]
    Home,
    Search,
}
