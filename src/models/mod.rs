//! Request and Response models for the posts proxy API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP query strings and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::PostsQuery;
pub use responses::{
    ClearResponse, DeleteResponse, ErrorResponse, HasResponse, HealthResponse, KeysResponse,
    StatsResponse, SweepResponse,
};
