//! Required-field checks run before any submit reaches the network.

use catalog_core::ProductInput;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingProductFields,

    #[error("Category name is required")]
    MissingCategoryName,
}

/// Name, title and description must be non-blank and a category selected.
pub fn validate_product(input: &ProductInput) -> Result<(), ValidationError> {
    let blank = [&input.name, &input.title, &input.description]
        .iter()
        .any(|field| field.trim().is_empty());
    if blank || input.category.is_empty() {
        return Err(ValidationError::MissingProductFields);
    }
    Ok(())
}

pub fn validate_category_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingCategoryName);
    }
    Ok(())
}
