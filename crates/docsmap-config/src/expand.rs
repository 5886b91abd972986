//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// Only braced references are handed to the expander. Text around them,
/// bare `$VAR` included, is copied verbatim, as is an unclosed `${`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let (literal, tail) = rest.split_at(start);
        let (reference, tail) = tail.split_at(len + 1);
        expanded.push_str(literal);
        expanded.push_str(&expand_reference(reference, field)?);
        rest = tail;
    }

    expanded.push_str(rest);
    Ok(expanded)
}

/// Expand a single `${...}` reference.
fn expand_reference(reference: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env_with_context(reference, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Variable that has no value and no default.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_base_path_from_env() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCSMAP_TEST_BASE", "/gql");
        }
        let result = expand_env("${DOCSMAP_TEST_BASE}/docs", "docs.route_base_path").unwrap();
        assert_eq!(result, "/gql/docs");
        unsafe {
            std::env::remove_var("DOCSMAP_TEST_BASE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCSMAP_TEST_UNSET_LABEL");
        }
        let result = expand_env("${DOCSMAP_TEST_UNSET_LABEL:-Next}", "version.label").unwrap();
        assert_eq!(result, "Next");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCSMAP_TEST_MISSING");
        }
        let err = expand_env("${DOCSMAP_TEST_MISSING}", "version.label").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("DOCSMAP_TEST_MISSING"));
        assert!(err.to_string().contains("version.label"));
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("/docs/$version", "docs.route_base_path").unwrap();
        assert_eq!(result, "/docs/$version");
    }

    #[test]
    fn test_bare_dollar_next_to_reference_kept() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCSMAP_TEST_UNSET_PREFIX");
        }
        let result = expand_env(
            "${DOCSMAP_TEST_UNSET_PREFIX:-/gql}/$version/$HOME",
            "docs.route_base_path",
        )
        .unwrap();
        assert_eq!(result, "/gql/$version/$HOME");
    }

    #[test]
    fn test_unclosed_reference_kept() {
        let result = expand_env("/docs/${version", "docs.route_base_path").unwrap();
        assert_eq!(result, "/docs/${version");
    }
}
