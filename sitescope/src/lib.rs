//! Terminal viewer for SharePoint site metadata.
//!
//! Fetches a site resource with its four nested expansions in one round trip
//! and displays the collections as sorted, tabbed lists: interactively in a
//! ratatui TUI, or as plain text via the `dump` subcommand.

pub mod cli;
pub mod loader;
pub mod rows;
pub mod tui;
