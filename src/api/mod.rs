mod client;

pub use client::{ApiClient, ApiError, ApiResponse, ResponseBody};
