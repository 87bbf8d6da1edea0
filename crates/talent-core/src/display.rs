//! Placeholder values shown instead of missing nested data.

pub const UNKNOWN_CANDIDATE: &str = "Unknown candidate";
pub const UNSPECIFIED_POSITION: &str = "Unspecified position";
pub const UNSPECIFIED_DEPARTMENT: &str = "Unspecified department";
pub const UNSPECIFIED: &str = "Unspecified";
pub const UNKNOWN_STATUS: &str = "Unknown";
pub const INVALID_DATE: &str = "Invalid date";

/// Joins first and last name, falling back to [`UNKNOWN_CANDIDATE`].
pub fn person_name(first_name: &str, last_name: &str) -> String {
    let name = format!("{} {}", first_name.trim(), last_name.trim());
    let name = name.trim();
    if name.is_empty() {
        UNKNOWN_CANDIDATE.to_owned()
    } else {
        name.to_owned()
    }
}

/// Department name, `Department <id>` when only the id is known, or
/// [`UNSPECIFIED_DEPARTMENT`].
pub fn department_name(name: Option<&str>, id: Option<i64>) -> String {
    match (name, id) {
        (Some(name), _) => name.to_owned(),
        (None, Some(id)) => format!("Department {id}"),
        (None, None) => UNSPECIFIED_DEPARTMENT.to_owned(),
    }
}
