//! The five filterable columns of `loss_item`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the table every preset query reads from.
pub const LOSS_TABLE: &str = "loss_item";

/// A filterable (and groupable) column of `loss_item`.
///
/// The declaration order is the canonical column order used for `SELECT`,
/// `WHERE` and `GROUP BY` in generated SQL.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Dimension {
  #[serde(rename = "as_of")]
  Date,
  #[serde(rename = "party")]
  Belligerent,
  #[serde(rename = "category_name")]
  Category,
  #[serde(rename = "type_name")]
  Type,
  #[serde(rename = "loss_type")]
  LossType,
}

impl Dimension {
  pub const ALL: [Dimension; 5] = [
    Dimension::Date,
    Dimension::Belligerent,
    Dimension::Category,
    Dimension::Type,
    Dimension::LossType,
  ];

  /// The raw column name in `loss_item`.
  pub fn column(self) -> &'static str {
    match self {
      Dimension::Date => "as_of",
      Dimension::Belligerent => "party",
      Dimension::Category => "category_name",
      Dimension::Type => "type_name",
      Dimension::LossType => "loss_type",
    }
  }

  /// The column alias shown to users.
  pub fn label(self) -> &'static str {
    match self {
      Dimension::Date => "Date",
      Dimension::Belligerent => "Belligerent",
      Dimension::Category => "Equipment Category",
      Dimension::Type => "Equipment Type",
      Dimension::LossType => "Loss Category",
    }
  }
}

impl fmt::Display for Dimension {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.column())
  }
}

/// The dimension a day-over-day comparison is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
  Category,
  Type,
  LossType,
}

impl GroupBy {
  pub fn dimension(self) -> Dimension {
    match self {
      GroupBy::Category => Dimension::Category,
      GroupBy::Type => Dimension::Type,
      GroupBy::LossType => Dimension::LossType,
    }
  }
}
