//! Core domain types
//!
//! This module contains the resource records the Cloud Director API serves.
//! Every record mirrors the server-side JSON shape; server-assigned fields
//! are optional so the same type doubles as a creation payload.

pub mod common;
pub mod content_library;
pub mod rde;
pub mod task;
pub mod vcenter;
