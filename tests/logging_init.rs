//! Global subscriber installation, kept in its own test binary

use health_analytics::logging::init_tracing;
use health_analytics::LoggingConfig;

#[test]
fn test_second_init_fails() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        format: "json".to_string(),
    };

    assert!(init_tracing(&config).is_ok());
    assert!(init_tracing(&config).is_err());
}
