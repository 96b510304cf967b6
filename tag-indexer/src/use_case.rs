// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical namespace a string is indexed in. The same string recorded for the
/// same organization under two use cases gets two unrelated ids.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UseCaseKey {
  ReleaseHealth,
  Performance,
}

impl UseCaseKey {
  pub fn as_str(&self) -> &'static str {
    match self {
      UseCaseKey::ReleaseHealth => "release-health",
      UseCaseKey::Performance => "performance",
    }
  }
}

impl fmt::Display for UseCaseKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_use_case_serde() {
    let json = serde_json::to_string(&UseCaseKey::ReleaseHealth).unwrap();
    assert_eq!(json, "\"release_health\"");

    let use_case: UseCaseKey = serde_json::from_str("\"performance\"").unwrap();
    assert_eq!(use_case, UseCaseKey::Performance);
    assert_eq!(use_case.to_string(), "performance");
  }
}
