//! Category display formatting

use crate::models::Category;

/// Format categories as a table, system categories first
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let mut sorted: Vec<&Category> = categories.iter().collect();
    sorted.sort_by(|a, b| {
        a.is_custom
            .cmp(&b.is_custom)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    let name_width = sorted
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<name_width$}  {:<14}  {}\n",
        "ID",
        "Name",
        "System Name",
        "Kind",
        name_width = name_width
    ));
    output.push_str(&format!(
        "{:->4}  {:-<name_width$}  {:-<14}  {:-<6}\n",
        "",
        "",
        "",
        "",
        name_width = name_width
    ));

    for category in sorted {
        output.push_str(&format!(
            "{:>4}  {:<name_width$}  {:<14}  {}\n",
            category.id.to_string(),
            category.name,
            category.system_name_or_default(),
            if category.is_custom { "custom" } else { "system" },
            name_width = name_width
        ));
    }

    output
}

/// Format a single category's details
pub fn format_category_details(category: &Category) -> String {
    let mut output = String::new();
    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:          {}\n", category.id));
    output.push_str(&format!(
        "  System Name: {}\n",
        category.system_name_or_default()
    ));
    output.push_str(&format!(
        "  Custom:      {}\n",
        if category.is_custom { "Yes" } else { "No" }
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::spending::tests::category;

    #[test]
    fn test_system_categories_listed_first() {
        let mut gym = category(7, "Gym", "health");
        gym.is_custom = true;
        let categories = vec![gym, category(1, "Food", "food")];

        let output = format_category_list(&categories);
        let food = output.find("Food").unwrap();
        let gym = output.find("Gym").unwrap();
        assert!(food < gym);
        assert!(output.contains("custom"));
    }

    #[test]
    fn test_missing_system_name_shows_other() {
        let mut misc = category(4, "Misc", "");
        misc.system_name = None;
        assert!(format_category_details(&misc).contains("System Name: other"));
    }

    #[test]
    fn test_format_empty_list() {
        assert!(format_category_list(&[]).contains("No categories found"));
    }
}
