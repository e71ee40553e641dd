//! Structured logging helpers
//!
//! Filter construction for the `tracing` subscriber, per-request correlation
//! IDs, and field extraction for request logs.

pub mod fields;
pub mod middleware;

pub use fields::{extract_outcome, intent_preview};
pub use middleware::{generate_request_id, request_id, REQUEST_ID_HEADER};

/// Build filter directives string from LoggingConfig
///
/// Produces the base level followed by one `advisor::<component>=<level>`
/// directive per configured component.
///
/// # Examples
///
/// ```
/// use advisor::config::logging::{LogFormat, LoggingConfig};
/// use advisor::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("reasoning".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
///     enable_content_logging: false,
/// };
///
/// assert_eq!(build_filter_directives(&config), "info,advisor::reasoning=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",advisor::{}={}", component, level));
        }
    }

    filter_str
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;
    use std::collections::HashMap;

    #[test]
    fn test_filter_without_components() {
        let config = LoggingConfig::default();
        assert_eq!(build_filter_directives(&config), config.level);
    }

    #[test]
    fn test_filter_components_sorted() {
        let mut levels = HashMap::new();
        levels.insert("pipeline".to_string(), "trace".to_string());
        levels.insert("catalog".to_string(), "warn".to_string());
        let config = LoggingConfig {
            level: "debug".to_string(),
            component_levels: Some(levels),
            ..Default::default()
        };
        assert_eq!(
            build_filter_directives(&config),
            "debug,advisor::catalog=warn,advisor::pipeline=trace"
        );
    }
}
