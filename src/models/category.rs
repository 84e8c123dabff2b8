sql_id!(
    /// Row id of a category
    CategoryId
);

/// The fixed day-of-week categories, in display order
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A named bucket of tasks, one per day of the week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
