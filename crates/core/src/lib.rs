//! Core library for docfinder
//!
//! This crate is the **Functional Core** of docfinder: every rule that decides
//! which doctors are shown, in what order, and how that choice is written to
//! and read from a URL. Nothing here performs I/O; the `docfinder` crate
//! loads the directory and drives these functions from the CLI, the
//! interactive browser and the MCP server.
//!
//! # Module Organization
//!
//! - [`doctor`]: Doctor records and lenient fee/experience parsing
//! - [`filter`]: Filter state and the visible-list derivation
//! - [`catalog`]: Specialty catalog and specialty search
//! - [`suggest`]: Name autocomplete and keyboard navigation
//! - [`query`]: URL query string codec for filter state
//! - [`state`]: View state and its pure transition function
//! - [`listing`]: Render-ready cards and listing output
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use docfinder_core::filter::visible_doctors;
//! use docfinder_core::query::decode;
//!
//! let filters = decode("consultation=Video+Consult&sort=fees");
//! let visible = visible_doctors(&doctors, &filters);
//! ```

pub mod catalog;
pub mod doctor;
pub mod filter;
pub mod listing;
pub mod query;
pub mod state;
pub mod suggest;
