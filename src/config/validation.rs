//! Route table validation with detailed error reporting.
//!
//! The [`validate`] function checks a parsed [`RouteTable`] for problems
//! that would otherwise only show up as silently unmatched requests:
//! empty or duplicate names, patterns without a leading `/`, unknown hints,
//! malformed qualifiers, unsupported methods and action strings that do
//! not parse. Every problem is collected before returning.

use super::model::RouteTable;
use crate::error::ValidationError;
use crate::route::segment::{parse_pattern, PatternSegment};
use crate::route::{Action, HttpMethod};

/// Validate a match pattern. Returns `Ok(())` or a human-readable error.
pub fn validate_pattern(pattern: &str) -> Result<(), String> {
    if pattern.is_empty() {
        return Err("match pattern cannot be empty".into());
    }
    if !pattern.starts_with('/') {
        return Err("match pattern must start with '/'".into());
    }

    for segment in parse_pattern(pattern) {
        match segment {
            PatternSegment::Unrecognized(raw) => {
                return Err(format!(
                    "segment '{raw}' is not a recognized hint (expected :int, :num or :str)"
                ));
            }
            PatternSegment::Hinted { raw, qualifier, .. } if qualifier.is_malformed() => {
                return Err(format!(
                    "segment '{raw}' has a malformed qualifier (expected [n] or [min-max])"
                ));
            }
            _ => {}
        }
    }

    Ok(())
}

/// Validate an HTTP method string. Returns `Ok(())` or a human-readable error.
pub fn validate_method(method: &str) -> Result<(), String> {
    method
        .parse::<HttpMethod>()
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// Validate a `Class:method` action string. Returns `Ok(())` or a
/// human-readable error.
pub fn validate_action(action: &str) -> Result<(), String> {
    if Action::parse(action).is_ready() {
        Ok(())
    } else {
        Err(format!(
            "'{action}' is not a valid action (expected exactly one ':' between class and method)"
        ))
    }
}

pub fn validate(table: &RouteTable) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if table.routes.is_empty() {
        errors.push(ValidationError {
            route: "(root)".into(),
            field: "routes".into(),
            message: "at least one route must be defined".into(),
            suggestion: None,
        });
        return Err(errors);
    }

    let mut seen_names = std::collections::HashSet::new();

    for (i, def) in table.routes.iter().enumerate() {
        let route_id = if def.name.trim().is_empty() {
            format!("routes[{i}]")
        } else {
            def.name.clone()
        };

        if def.name.trim().is_empty() {
            errors.push(ValidationError {
                route: route_id.clone(),
                field: "name".into(),
                message: "name cannot be empty".into(),
                suggestion: None,
            });
        } else if !seen_names.insert(def.name.as_str()) {
            errors.push(ValidationError {
                route: route_id.clone(),
                field: "name".into(),
                message: "duplicate route name".into(),
                suggestion: Some("a later route with the same name replaces the earlier one".into()),
            });
        }

        if let Err(msg) = validate_pattern(&def.pattern) {
            errors.push(ValidationError {
                route: route_id.clone(),
                field: "match".into(),
                message: msg,
                suggestion: if !def.pattern.is_empty() && !def.pattern.starts_with('/') {
                    Some(format!("did you mean '/{}'?", def.pattern))
                } else {
                    None
                },
            });
        }

        if let Err(msg) = validate_method(&def.method) {
            errors.push(ValidationError {
                route: route_id.clone(),
                field: "method".into(),
                message: msg,
                suggestion: None,
            });
        }

        for action in def.action.as_slice() {
            let qualified = table.qualified_action(action);
            if let Err(msg) = validate_action(&qualified) {
                errors.push(ValidationError {
                    route: route_id.clone(),
                    field: "action".into(),
                    message: msg,
                    suggestion: qualified.contains("::").then(|| {
                        "separate namespaces with '\\', '/', '.' or '_', not '::'".to_string()
                    }),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[must_use]
pub fn format_validation_report(path: &str, table: &RouteTable) -> String {
    let mut lines = vec![format!("  {} routes\n", table.routes.len())];

    for def in &table.routes {
        let params = def
            .params
            .map_or_else(|| "unbounded".to_string(), |p| p.to_string());

        lines.push(format!(
            "  {}  {} {}",
            def.name,
            def.method.to_uppercase(),
            def.pattern
        ));
        lines.push(format!("    params: {params}"));
        for action in def.action.as_slice() {
            lines.push(format!("    action: {}", Action::parse(&table.qualified_action(action))));
        }
    }

    format!("{} is valid\n{}", path, lines.join("\n"))
}
