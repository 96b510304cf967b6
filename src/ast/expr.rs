// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

use std::fmt;

use serde::{Deserialize, Serialize};

use super::literal::Literal;

/// A reference to a column of the metrics table.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Column {
  name: String,
}

impl Column {
  pub fn new(name: impl Into<String>) -> Self {
    Column { name: name.into() }
  }

  pub fn get_name(&self) -> &str {
    &self.name
  }
}

/// A function call, such as `sumIf(value, in(metric_id, [1, 2]))`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Function {
  name: String,
  parameters: Vec<Expr>,
  alias: Option<String>,
}

impl Function {
  pub fn new(name: impl Into<String>, parameters: Vec<Expr>, alias: Option<&str>) -> Self {
    Function {
      name: name.into(),
      parameters,
      alias: alias.map(str::to_owned),
    }
  }

  pub fn get_name(&self) -> &str {
    &self.name
  }

  pub fn get_parameters(&self) -> &[Expr] {
    &self.parameters
  }

  pub fn get_alias(&self) -> Option<&str> {
    self.alias.as_deref()
  }
}

/// A node of the query expression tree.
///
/// Two expressions are equal when they have the same shape: same variant, same
/// names, same parameters in the same order, and same alias.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
  Column(Column),
  Literal(Literal),
  Function(Function),
}

impl Expr {
  pub fn column(name: impl Into<String>) -> Self {
    Expr::Column(Column::new(name))
  }

  pub fn function(name: impl Into<String>, parameters: Vec<Expr>, alias: Option<&str>) -> Self {
    Expr::Function(Function::new(name, parameters, alias))
  }

  /// The alias of this expression, if it is an aliased function call.
  pub fn get_alias(&self) -> Option<&str> {
    match self {
      Expr::Function(function) => function.get_alias(),
      _ => None,
    }
  }
}

impl fmt::Display for Expr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Expr::Column(column) => f.write_str(column.get_name()),
      Expr::Literal(literal) => write!(f, "{literal}"),
      Expr::Function(function) => {
        write!(f, "{}(", function.get_name())?;
        for (i, parameter) in function.get_parameters().iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{parameter}")?;
        }
        f.write_str(")")?;
        if let Some(alias) = function.get_alias() {
          write!(f, " AS `{alias}`")?;
        }
        Ok(())
      }
    }
  }
}

impl From<Literal> for Expr {
  fn from(literal: Literal) -> Self {
    Expr::Literal(literal)
  }
}

impl From<Column> for Expr {
  fn from(column: Column) -> Self {
    Expr::Column(column)
  }
}

impl From<Function> for Expr {
  fn from(function: Function) -> Self {
    Expr::Function(function)
  }
}

impl From<i32> for Expr {
  fn from(value: i32) -> Self {
    Expr::Literal(value.into())
  }
}

impl From<i64> for Expr {
  fn from(value: i64) -> Self {
    Expr::Literal(value.into())
  }
}

impl From<u64> for Expr {
  fn from(value: u64) -> Self {
    Expr::Literal(value.into())
  }
}

impl From<f64> for Expr {
  fn from(value: f64) -> Self {
    Expr::Literal(value.into())
  }
}
