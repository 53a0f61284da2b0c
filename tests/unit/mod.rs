// tests/unit/mod.rs
//! Unit tests for ghrecon components
//!
//! Each module drives one component in isolation over a scripted transport.

#[cfg(test)]
mod endpoints;


#[cfg(test)]
mod normalize;

#[cfg(test)]
mod pagination;
