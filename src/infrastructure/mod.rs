pub mod category_repo;
pub mod error_mapping;
pub mod file_storage;
pub mod models;
pub mod order_repo;
pub mod product_repo;
pub mod smtp_mailer;
pub mod user_repo;

#[cfg(test)]
pub(crate) mod test_support;

pub use category_repo::DieselCategoryRepository;
pub use file_storage::DiskImageStorage;
pub use order_repo::DieselOrderRepository;
pub use product_repo::DieselProductRepository;
pub use smtp_mailer::SmtpMailer;
pub use user_repo::DieselUserRepository;

/// Build a bound `ILIKE` pattern matching `search` anywhere in a column.
/// `%`, `_` and `\` in the input match literally.
pub(crate) fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn pattern_wraps_search_term() {
        assert_eq!(contains_pattern("mug"), "%mug%");
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }
}
