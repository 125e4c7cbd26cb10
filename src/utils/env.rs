/// Get environment variable with BILLING_KIT_ prefix, falling back to unprefixed version
///
/// This helper function checks for `BILLING_KIT_{key}` first, then falls back to `{key}`
/// for compatibility with standard environment variable naming.
///
/// # Examples
///
/// ```rust
/// use billing_kit::utils::get_env_with_prefix;
///
/// // Checks BILLING_KIT_BILLING_CONFIG_PATH first, then BILLING_CONFIG_PATH
/// let path = get_env_with_prefix("BILLING_CONFIG_PATH");
///
/// // Checks BILLING_KIT_LOG_LEVEL first, then LOG_LEVEL
/// let level = get_env_with_prefix("LOG_LEVEL");
/// ```
pub fn get_env_with_prefix(key: &str) -> Option<String> {
    std::env::var(format!("BILLING_KIT_{}", key))
        .or_else(|_| std::env::var(key))
        .ok()
}

/// Read a comma-separated list, trimming entries and dropping empty ones.
pub fn get_env_list_with_prefix(key: &str) -> Option<Vec<String>> {
    get_env_with_prefix(key).map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(String::from)
            .collect()
    })
}

/// Read a boolean flag. `true`, `1` and `yes` (any case) are true.
pub fn get_env_bool_with_prefix(key: &str) -> Option<bool> {
    get_env_with_prefix(key)
        .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_with_prefix() {
        // Test with BILLING_KIT_ prefix
        unsafe {
            std::env::set_var("BILLING_KIT_ENV_TEST_VAR", "prefixed_value");
        }
        assert_eq!(get_env_with_prefix("ENV_TEST_VAR"), Some("prefixed_value".to_string()));
        unsafe {
            std::env::remove_var("BILLING_KIT_ENV_TEST_VAR");
        }

        // Test with unprefixed fallback
        unsafe {
            std::env::set_var("ENV_FALLBACK_VAR", "unprefixed_value");
        }
        assert_eq!(get_env_with_prefix("ENV_FALLBACK_VAR"), Some("unprefixed_value".to_string()));
        unsafe {
            std::env::remove_var("ENV_FALLBACK_VAR");
        }

        // Test non-existent variable
        assert_eq!(get_env_with_prefix("ENV_NON_EXISTENT_VAR"), None);
    }

    #[test]
    fn test_get_env_list_and_bool() {
        unsafe {
            std::env::set_var("BILLING_KIT_ENV_TEST_LIST", " example.com, ,app.example.com ");
            std::env::set_var("BILLING_KIT_ENV_TEST_FLAG", "Yes");
        }
        assert_eq!(
            get_env_list_with_prefix("ENV_TEST_LIST"),
            Some(vec!["example.com".to_string(), "app.example.com".to_string()])
        );
        assert_eq!(get_env_bool_with_prefix("ENV_TEST_FLAG"), Some(true));
        assert_eq!(get_env_bool_with_prefix("ENV_TEST_MISSING_FLAG"), None);
        unsafe {
            std::env::remove_var("BILLING_KIT_ENV_TEST_LIST");
            std::env::remove_var("BILLING_KIT_ENV_TEST_FLAG");
        }
    }
}
