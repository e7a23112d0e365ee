use serde::{Deserialize, Serialize};

/// A fixed partition of the forum, created once when the store is seeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

// Category listing with live post count (sidebar)
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    #[serde(flatten)]
    pub category: Category,
    pub post_count: usize,
}

// Select category request; `null` clears the filter
#[derive(Debug, Deserialize)]
pub struct SelectCategoryRequest {
    pub category_id: Option<String>,
}
