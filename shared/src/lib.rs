//! Shared library for the travel planner Lambda functions.
//!
//! This crate provides the configuration, error taxonomy, data models, and
//! store collaborator used by the API Lambdas.

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use http::{error_response, json_response, ApiMessage};
pub use models::{new_schedule_id, Schedule, ScheduleSummary, ScheduleType, User};
pub use store::{DynamoStore, ScheduleStore};
