//! Default value functions for configuration.

pub fn default_dialect() -> String {
    "juno".to_string()
}

pub fn default_log_filter() -> String {
    "info".to_string()
}
