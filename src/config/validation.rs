//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, status codes, addresses)
//! - Reject route patterns the router would refuse at startup
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::fmt;
use std::net::SocketAddr;

use axum::http::{Method, StatusCode};

use crate::config::schema::ServerConfig;
use crate::routing::{compile, join_paths};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "routes[2].method").
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("{:?} is not a socket address", config.listener.bind_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            "must be greater than zero",
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "{:?} is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    let mut names = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        let field = |name: &str| format!("routes[{}].{}", index, name);

        if route.name.is_empty() {
            errors.push(ValidationError::new(field("name"), "must not be empty"));
        } else if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::new(
                field("name"),
                format!("duplicate route name {:?}", route.name),
            ));
        }

        if route.method.is_empty() || Method::from_bytes(route.method.as_bytes()).is_err() {
            errors.push(ValidationError::new(
                field("method"),
                format!("{:?} is not an HTTP method", route.method),
            ));
        }

        let full_path = join_paths(&config.router.base_path, &route.path);
        if let Err(e) = compile(&full_path) {
            errors.push(ValidationError::new(field("path"), e.to_string()));
        }

        if StatusCode::from_u16(route.status).is_err() {
            errors.push(ValidationError::new(
                field("status"),
                format!("{} is not a valid status code", route.status),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    fn route(name: &str, method: &str, path: &str, status: u16) -> RouteConfig {
        RouteConfig {
            name: name.into(),
            method: method.into(),
            path: path.into(),
            status,
            body: String::new(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ServerConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.routes.push(route("a", "GET", "/ok", 200));
        config.routes.push(route("a", "G ET", "/files/*rest/x", 1000));

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "timeouts.request_secs",
                "routes[1].name",
                "routes[1].method",
                "routes[1].path",
                "routes[1].status",
            ]
        );
    }

    #[test]
    fn test_empty_path_under_empty_base_is_rejected() {
        let mut config = ServerConfig::default();
        config.routes.push(route("root", "GET", "", 200));
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "routes[0].path");
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ServerConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
