// tests/integration/mod.rs
//! Integration tests for ghrecon
//!
//! These drive the analytics layer and whole reports over a scripted
//! transport, checking what a user would actually see.
