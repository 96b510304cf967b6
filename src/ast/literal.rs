// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A literal value passed as a function parameter.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
  Int(i64),
  // Resolved ids and metric ids.
  UInt(u64),
  #[serde(with = "float")]
  Float(f64),
  String(String),
  List(Vec<Literal>),
}

impl fmt::Display for Literal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Literal::Int(inner) => write!(f, "{inner}"),
      Literal::UInt(inner) => write!(f, "{inner}"),
      // Always keep a decimal point, so a float never reads back as an integer.
      Literal::Float(inner) => match non_finite_name(*inner) {
        Some(name) => f.write_str(name),
        None => write!(f, "{inner:?}"),
      },
      Literal::String(inner) => write!(f, "'{}'", inner.replace('\\', "\\\\").replace('\'', "\\'")),
      Literal::List(items) => {
        f.write_str("[")?;
        for (i, item) in items.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{item}")?;
        }
        f.write_str("]")
      }
    }
  }
}

fn non_finite_name(value: f64) -> Option<&'static str> {
  if value.is_nan() {
    Some("nan")
  } else if value == f64::INFINITY {
    Some("inf")
  } else if value == f64::NEG_INFINITY {
    Some("-inf")
  } else {
    None
  }
}

/// JSON has no NaN or infinity, so those are written by name.
mod float {
  use serde::de::Error;

  use super::*;

  pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match non_finite_name(*value) {
      Some(name) => serializer.serialize_str(name),
      None => serializer.serialize_f64(*value),
    }
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Float {
      Number(f64),
      Name(String),
    }

    match Float::deserialize(deserializer)? {
      Float::Number(value) => Ok(value),
      Float::Name(name) => match name.as_str() {
        "nan" => Ok(f64::NAN),
        "inf" => Ok(f64::INFINITY),
        "-inf" => Ok(f64::NEG_INFINITY),
        other => Err(D::Error::custom(format!("invalid float literal {other}"))),
      },
    }
  }
}

impl From<i32> for Literal {
  fn from(value: i32) -> Self {
    Literal::Int(value.into())
  }
}

impl From<i64> for Literal {
  fn from(value: i64) -> Self {
    Literal::Int(value)
  }
}

impl From<u64> for Literal {
  fn from(value: u64) -> Self {
    Literal::UInt(value)
  }
}

impl From<f64> for Literal {
  fn from(value: f64) -> Self {
    Literal::Float(value)
  }
}

impl From<&str> for Literal {
  fn from(value: &str) -> Self {
    Literal::String(value.to_owned())
  }
}

impl<T: Into<Literal>> From<Vec<T>> for Literal {
  fn from(values: Vec<T>) -> Self {
    Literal::List(values.into_iter().map(Into::into).collect())
  }
}

#[cfg(test)]
mod tests {
  use test_case::test_case;

  use super::*;

  #[test_case(Literal::Int(-3), "-3"; "negative integer")]
  #[test_case(Literal::UInt(42), "42"; "unsigned integer")]
  #[test_case(Literal::Float(0.64), "0.64"; "float")]
  #[test_case(Literal::Float(1.0), "1.0"; "whole float")]
  #[test_case(Literal::Float(f64::NAN), "nan"; "nan")]
  #[test_case(Literal::Float(f64::NEG_INFINITY), "-inf"; "negative infinity")]
  #[test_case(Literal::from("it's"), "'it\\'s'"; "string with quote")]
  #[test_case(Literal::from(vec![0u64, 1, 2]), "[0, 1, 2]"; "list")]
  #[test_case(Literal::List(vec![]), "[]"; "empty list")]
  fn test_display(literal: Literal, expected: &str) {
    assert_eq!(literal.to_string(), expected);
  }

  #[test]
  fn test_integer_kinds_are_distinct() {
    assert_ne!(Literal::from(1), Literal::from(1u64));
    assert_eq!(Literal::from(1), Literal::Int(1));
    assert_ne!(Literal::from(1).to_string(), Literal::from(1.0).to_string());
  }

  #[test]
  fn test_non_finite_float_serde() {
    let json = serde_json::to_string(&Literal::Float(f64::NAN)).unwrap();
    assert_eq!(json, r#"{"float":"nan"}"#);
    let literal: Literal = serde_json::from_str(&json).unwrap();
    assert!(matches!(literal, Literal::Float(value) if value.is_nan()));

    let literal = Literal::Float(f64::INFINITY);
    let json = serde_json::to_string(&literal).unwrap();
    assert_eq!(serde_json::from_str::<Literal>(&json).unwrap(), literal);

    let literal: Literal = serde_json::from_str(r#"{"float":2}"#).unwrap();
    assert_eq!(literal, Literal::Float(2.0));
    assert!(serde_json::from_str::<Literal>(r#"{"float":"half"}"#).is_err());
  }
}
