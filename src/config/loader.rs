//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a restaurant's
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::DistributionMethod;

use super::types::{EmployeeDirectory, EmployeesConfig, RestaurantConfig, RestaurantContext};

/// Loads and provides access to a restaurant's configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── restaurant.yaml   # Restaurant id, name, closer and default method
/// └── employees.yaml    # Employee directory
/// ```
///
/// # Example
///
/// ```no_run
/// use gratuity_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Closing events for {}", loader.restaurant().name);
/// println!("{:?}", loader.employees().position_of("Ana"));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    restaurant: RestaurantConfig,
    employees: EmployeeDirectory,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails with `ConfigNotFound` when either file is missing and with
    /// `ConfigParseError` when either file is not valid YAML for its schema.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gratuity_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), gratuity_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let restaurant = Self::load_yaml::<RestaurantConfig>(&path.join("restaurant.yaml"))?;
        let employees = Self::load_yaml::<EmployeesConfig>(&path.join("employees.yaml"))?;

        debug!(
            restaurant_id = %restaurant.id,
            employees = employees.employees.len(),
            "Loaded restaurant configuration"
        );

        Ok(Self::new(restaurant, EmployeeDirectory::new(employees.employees)))
    }

    /// Creates a loader from already-parsed configuration.
    pub fn new(restaurant: RestaurantConfig, employees: EmployeeDirectory) -> Self {
        Self {
            restaurant,
            employees,
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the restaurant metadata.
    pub fn restaurant(&self) -> &RestaurantConfig {
        &self.restaurant
    }

    /// Returns the employee directory.
    pub fn employees(&self) -> &EmployeeDirectory {
        &self.employees
    }

    /// Returns the context events are closed under.
    pub fn context(&self) -> RestaurantContext {
        RestaurantContext::from(&self.restaurant)
    }

    /// Returns the method used when a request does not name one.
    pub fn default_method(&self) -> DistributionMethod {
        self.restaurant.default_method
    }
}
