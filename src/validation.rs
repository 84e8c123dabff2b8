/// Validate that a task title is not empty
pub fn validate_task_title(title: &str) -> bool {
    !title.trim().is_empty()
}

/// Parse the points field of the add-task form.
///
/// Anything that is not an integer (including an empty field) counts as 0.
pub fn parse_points(text: &str) -> i64 {
    text.trim().parse().unwrap_or(0)
}

/// Normalize a category name to its stored form ("monday" -> "Monday")
pub fn normalize_category_name(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
