//! Transit fare finder.
//!
//! Builds a normalized station registry and fare table from a transit
//! authority's raw CSV exports, and answers "find station" and "fare
//! between two stations" queries against it.

pub mod builder;
pub mod dataset;
pub mod domain;
pub mod lookup;
pub mod source;
pub mod web;
