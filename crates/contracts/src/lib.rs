//! Types and pure helpers shared between the admin frontend and the API server.

pub mod domain;
pub mod shared;
