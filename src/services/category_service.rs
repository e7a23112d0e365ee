use crate::{
    error::{AppError, Result},
    models::{Category, CategorySummary},
    store::ForumStore,
};

/// Sets or clears the category filter. Unknown ids leave the filter as it was.
pub fn select_category(
    store: &mut ForumStore,
    category_id: Option<&str>,
) -> Result<Option<Category>> {
    let selected = match category_id {
        Some(id) => Some(
            store
                .category(id)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?,
        ),
        None => None,
    };

    store.set_selected_category(selected.as_ref().map(|c| c.id.clone()));
    tracing::debug!(
        "Category filter set to {:?}",
        selected.as_ref().map(|c| c.name.as_str())
    );

    Ok(selected)
}

pub fn category_summaries(store: &ForumStore) -> Vec<CategorySummary> {
    store
        .categories()
        .iter()
        .map(|category| CategorySummary {
            category: category.clone(),
            post_count: store
                .posts()
                .iter()
                .filter(|p| p.category_id == category.id)
                .count(),
        })
        .collect()
}
