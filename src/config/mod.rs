//! Restaurant configuration for the Gratuity Engine.
//!
//! Configuration is loaded once at startup from a directory of YAML files
//! and passed explicitly to the operations that need it.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EmployeeDirectory, EmployeeRecord, EmployeeStatus, EmployeesConfig, RestaurantConfig,
    RestaurantContext,
};
