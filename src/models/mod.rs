//! Data Models Module
//!
//! Request and response DTOs for the cache server HTTP surface.

pub mod requests;
pub mod responses;

pub use requests::{KeysRequest, SetRequest};
pub use responses::{
    AddResponse, ClearResponse, DeleteManyResponse, DeleteResponse, GetManyResponse, GetResponse,
    HealthResponse, SetResponse, StatsResponse,
};
