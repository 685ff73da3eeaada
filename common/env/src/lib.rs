#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

/// Obtain a variable from the environment.
///
/// Empty values are treated as unset.
pub fn var(variable: &str) -> Option<String> {
  std::env::var(variable).ok().filter(|value| !value.is_empty())
}

/// Obtain a boolean flag from the environment.
///
/// `1`, `true`, and `yes` (case-insensitive) are true. Anything else, including the variable not
/// being set, is false.
pub fn flag(variable: &str) -> bool {
  var(variable)
    .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
    .unwrap_or(false)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unset_and_empty() {
    std::env::set_var("RYO_ENV_TEST_EMPTY", "");
    assert_eq!(var("RYO_ENV_TEST_EMPTY"), None);
    assert_eq!(var("RYO_ENV_TEST_DEFINITELY_UNSET"), None);
    assert!(!flag("RYO_ENV_TEST_DEFINITELY_UNSET"));
  }

  #[test]
  fn flags() {
    std::env::set_var("RYO_ENV_TEST_FLAG", "TRUE");
    assert!(flag("RYO_ENV_TEST_FLAG"));
    std::env::set_var("RYO_ENV_TEST_FLAG_OFF", "no");
    assert!(!flag("RYO_ENV_TEST_FLAG_OFF"));
  }
}
