//! Configuration types for the Gratuity Engine.
//!
//! These types are deserialized from the YAML files in a restaurant
//! configuration directory.

use serde::{Deserialize, Serialize};

use crate::models::DistributionMethod;

/// Restaurant metadata from restaurant.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RestaurantConfig {
    /// Unique identifier for the restaurant (e.g., "rest_harbor").
    pub id: String,
    /// Display name of the restaurant.
    pub name: String,
    /// Name recorded as the closer of events.
    #[serde(default = "default_closed_by")]
    pub closed_by: String,
    /// Method used when a request does not name one.
    #[serde(default)]
    pub default_method: DistributionMethod,
}

fn default_closed_by() -> String {
    "APP_USER".to_string()
}

/// Whether an employee is currently on staff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    /// Currently working.
    #[default]
    Active,
    /// No longer scheduled.
    Inactive,
}

/// One employee from employees.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// The employee's name as it appears on sales rows.
    pub name: String,
    /// The employee's position (e.g., "SERVER", "MANAGER").
    #[serde(default)]
    pub position: String,
    /// Department code (e.g., "FOH", "BOH", "ADMINISTRATIVE").
    #[serde(default)]
    pub department: String,
    /// Employment status.
    #[serde(default)]
    pub status: EmployeeStatus,
}

impl EmployeeRecord {
    /// Returns true if the employee is active.
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// Returns true if the employee's position is MANAGER.
    pub fn is_manager(&self) -> bool {
        self.position.trim().eq_ignore_ascii_case("MANAGER")
    }

    /// Returns true if the employee belongs to `department`, ignoring case.
    pub fn in_department(&self, department: &str) -> bool {
        self.department.trim().eq_ignore_ascii_case(department.trim())
    }
}

/// Employees configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeesConfig {
    /// The restaurant's staff.
    #[serde(default)]
    pub employees: Vec<EmployeeRecord>,
}

/// The staff list used to resolve positions for reporting.
///
/// # Example
///
/// ```
/// use gratuity_engine::config::{EmployeeDirectory, EmployeeRecord, EmployeeStatus};
///
/// let directory = EmployeeDirectory::new(vec![EmployeeRecord {
///     name: "Ana".to_string(),
///     position: "RUNNER".to_string(),
///     department: "FOH".to_string(),
///     status: EmployeeStatus::Active,
/// }]);
///
/// assert_eq!(directory.position_of("Ana"), Some("RUNNER"));
/// assert_eq!(directory.position_of("ANA"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDirectory {
    employees: Vec<EmployeeRecord>,
}

impl EmployeeDirectory {
    /// Creates a directory from employee records.
    pub fn new(employees: Vec<EmployeeRecord>) -> Self {
        Self { employees }
    }

    /// Returns every employee.
    pub fn employees(&self) -> &[EmployeeRecord] {
        &self.employees
    }

    /// Finds an employee by exact name, ignoring surrounding whitespace.
    pub fn find(&self, name: &str) -> Option<&EmployeeRecord> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.employees.iter().find(|e| e.name.trim() == name)
    }

    /// Returns the employee's position, if they are listed with one.
    pub fn position_of(&self, name: &str) -> Option<&str> {
        self.find(name)
            .map(|e| e.position.trim())
            .filter(|position| !position.is_empty())
    }

    /// Returns the active employees.
    pub fn active(&self) -> impl Iterator<Item = &EmployeeRecord> {
        self.employees.iter().filter(|e| e.is_active())
    }

    /// Returns the employees of one department.
    ///
    /// `MANAGEMENT` selects managers by position, since managers are often
    /// listed without a department.
    pub fn department<'a>(
        &'a self,
        department: &'a str,
    ) -> impl Iterator<Item = &'a EmployeeRecord> {
        let management = department.trim().eq_ignore_ascii_case("MANAGEMENT");
        self.employees.iter().filter(move |e| {
            if management {
                e.is_manager()
            } else {
                e.in_department(department)
            }
        })
    }
}

/// The restaurant an event is closed for, passed explicitly to
/// [`close_event`](crate::calculation::close_event).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantContext {
    /// Restaurant identifier.
    pub restaurant_id: String,
    /// Restaurant display name.
    pub restaurant_name: String,
    /// Name recorded as the closer.
    pub closed_by: String,
}

impl RestaurantContext {
    /// Creates a context.
    pub fn new(
        restaurant_id: impl Into<String>,
        restaurant_name: impl Into<String>,
        closed_by: impl Into<String>,
    ) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            restaurant_name: restaurant_name.into(),
            closed_by: closed_by.into(),
        }
    }
}

impl From<&RestaurantConfig> for RestaurantContext {
    fn from(config: &RestaurantConfig) -> Self {
        Self::new(&config.id, &config.name, &config.closed_by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(
        name: &str,
        position: &str,
        department: &str,
        status: EmployeeStatus,
    ) -> EmployeeRecord {
        EmployeeRecord {
            name: name.to_string(),
            position: position.to_string(),
            department: department.to_string(),
            status,
        }
    }

    fn create_directory() -> EmployeeDirectory {
        EmployeeDirectory::new(vec![
            employee("Ana", "RUNNER", "FOH", EmployeeStatus::Active),
            employee("Juan", "SERVER", "foh", EmployeeStatus::Inactive),
            employee("Maria", "Manager", "", EmployeeStatus::Active),
            employee("Luis", "COOK", "BOH", EmployeeStatus::Active),
            employee("Rosa", "", "ADMINISTRATIVE", EmployeeStatus::Active),
        ])
    }

    #[test]
    fn test_position_of_trims_but_matches_case_exactly() {
        let directory = create_directory();
        assert_eq!(directory.position_of("  Juan "), Some("SERVER"));
        assert_eq!(directory.position_of("JUAN"), None);
        assert_eq!(directory.position_of(""), None);
    }

    #[test]
    fn test_position_of_blank_position_is_none() {
        assert_eq!(create_directory().position_of("Rosa"), None);
    }

    #[test]
    fn test_active_filters_inactive() {
        let directory = create_directory();
        let names: Vec<&str> = directory.active().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Maria", "Luis", "Rosa"]);
    }

    #[test]
    fn test_management_department_selects_managers_by_position() {
        let directory = create_directory();
        let management: Vec<&str> = directory
            .department("management")
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(management, vec!["Maria"]);
    }

    #[test]
    fn test_department_ignores_case() {
        let directory = create_directory();
        let foh: Vec<&str> = directory.department("FOH").map(|e| e.name.as_str()).collect();
        assert_eq!(foh, vec!["Ana", "Juan"]);
    }

    #[test]
    fn test_restaurant_context_from_config() {
        let config = RestaurantConfig {
            id: "rest_1".to_string(),
            name: "Harbor".to_string(),
            closed_by: "APP_USER".to_string(),
            default_method: DistributionMethod::Equal,
        };
        let context = RestaurantContext::from(&config);
        assert_eq!(context.restaurant_id, "rest_1");
        assert_eq!(context.restaurant_name, "Harbor");
        assert_eq!(context.closed_by, "APP_USER");
    }

    #[test]
    fn test_restaurant_config_defaults() {
        let config: RestaurantConfig = serde_yaml::from_str("id: r\nname: R\n").unwrap();
        assert_eq!(config.closed_by, "APP_USER");
        assert_eq!(config.default_method, DistributionMethod::Percentage);
    }
}
