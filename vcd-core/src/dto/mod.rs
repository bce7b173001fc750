//! Data transfer envelopes
//!
//! Wire-only shapes that wrap or accompany domain records: pagination pages
//! returned by collection endpoints, error bodies, and the entity resolution
//! response.

pub mod error;
pub mod pages;
pub mod resolution;
