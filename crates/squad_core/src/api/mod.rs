pub mod allocation_json;

pub use allocation_json::{
    allocate_json, allocation_request_schema, AllocationRequest, AllocationResponse, TeamSummary,
};
