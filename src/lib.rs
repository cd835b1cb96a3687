//! Contrarian - A constructive devil's advocate.
//!
//! Takes a one-paragraph decision, decodes its intent, flags likely cognitive
//! biases, and answers with counterarguments, second-order impacts and
//! de-risking recommendations. Counterarguments come from a language model when
//! one is configured and from fixed templates otherwise.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
