//! VCD Core
//!
//! Wire-level types for the Cloud Director OpenAPI.
//!
//! This crate contains:
//! - Domain types: API resource records (Runtime Defined Entities, Content Libraries, etc.)
//! - DTOs: transfer envelopes used on the wire (pagination pages, error bodies)

pub mod domain;
pub mod dto;
