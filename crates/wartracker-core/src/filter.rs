//! Filter selections and their translation into `WHERE` fragments.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;

/// The option-list value meaning "no restriction on this dimension".
pub const ALL_SENTINEL: &str = "ALL";

// ─── Filter ──────────────────────────────────────────────────────────────────

/// The restriction placed on a single column.
///
/// On the wire a filter is a plain list of strings, as the option lists
/// supplied to clients are. An empty list, or any list containing
/// [`ALL_SENTINEL`], becomes [`Filter::NoRestriction`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub enum Filter {
  #[default]
  NoRestriction,
  /// Non-empty, duplicate-free, in first-seen order.
  Values(Vec<String>),
}

impl Filter {
  /// Interpret a UI selection list.
  pub fn from_selection<I, S>(selection: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for value in selection {
      let value = value.into();
      if value == ALL_SENTINEL {
        return Filter::NoRestriction;
      }
      if seen.insert(value.clone()) {
        values.push(value);
      }
    }
    if values.is_empty() {
      Filter::NoRestriction
    } else {
      Filter::Values(values)
    }
  }

  /// A filter matching exactly one value.
  pub fn only(value: impl Into<String>) -> Self {
    Filter::Values(vec![value.into()])
  }

  pub fn is_restricted(&self) -> bool {
    matches!(self, Filter::Values(values) if restricts(values))
  }
}

impl From<Vec<String>> for Filter {
  fn from(selection: Vec<String>) -> Self { Filter::from_selection(selection) }
}

impl From<Filter> for Vec<String> {
  fn from(filter: Filter) -> Self {
    match filter {
      Filter::NoRestriction => Vec::new(),
      Filter::Values(values) => values,
    }
  }
}

// ─── Selection ───────────────────────────────────────────────────────────────

/// Per-dimension filters for one request.
///
/// Iteration is always in canonical [`Dimension`] order, whatever order the
/// entries were inserted or deserialised in. Dimensions without an entry are
/// unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSelection {
  filters: BTreeMap<Dimension, Filter>,
}

impl FilterSelection {
  pub fn new() -> Self { Self::default() }

  /// Builder-style insert; replaces any existing filter for `dimension`.
  pub fn with(mut self, dimension: Dimension, filter: Filter) -> Self {
    self.set(dimension, filter);
    self
  }

  pub fn set(&mut self, dimension: Dimension, filter: Filter) {
    self.filters.insert(dimension, filter);
  }

  pub fn get(&self, dimension: Dimension) -> &Filter {
    self.filters.get(&dimension).unwrap_or(&Filter::NoRestriction)
  }

  pub fn iter(&self) -> impl Iterator<Item = (Dimension, &Filter)> {
    self.filters.iter().map(|(d, f)| (*d, f))
  }

  /// The `AND ...` suffix for every restricted dimension.
  pub fn where_suffix(&self) -> String {
    build_where_suffix(self.iter().map(|(d, f)| (d.column(), f)))
  }
}

// ─── SQL fragments ───────────────────────────────────────────────────────────

/// Quote `value` as a SQL string literal, doubling embedded single quotes.
pub fn quote_literal(value: &str) -> String {
  format!("'{}'", value.replace('\'', "''"))
}

/// Build ` AND <column> in ('a','b')` for a restricted filter, or `""`.
///
/// A `Values` list that is empty or holds [`ALL_SENTINEL`] restricts nothing,
/// however it was constructed. `column` is written verbatim and must come from
/// a fixed set of names.
pub fn build_predicate(column: &str, filter: &Filter) -> String {
  match filter {
    Filter::Values(values) if restricts(values) => {
      let quoted: Vec<String> = values.iter().map(|v| quote_literal(v)).collect();
      format!(" AND {column} in ({})", quoted.join(","))
    }
    _ => String::new(),
  }
}

fn restricts(values: &[String]) -> bool {
  !values.is_empty() && !values.iter().any(|v| v == ALL_SENTINEL)
}

/// Concatenate the predicates for `filters` in iteration order.
pub fn build_where_suffix<'a, I, C>(filters: I) -> String
where
  I: IntoIterator<Item = (C, &'a Filter)>,
  C: AsRef<str>,
{
  filters
    .into_iter()
    .map(|(column, filter)| build_predicate(column.as_ref(), filter))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sel(values: &[&str]) -> Filter { Filter::from_selection(values.iter().copied()) }

  #[test]
  fn empty_and_all_are_equivalent() {
    assert_eq!(sel(&[]), Filter::NoRestriction);
    assert_eq!(sel(&["ALL"]), Filter::NoRestriction);
    assert_eq!(sel(&["Tanks", "ALL"]), Filter::NoRestriction);
    for column in ["category", "as_of", "loss_type"] {
      assert_eq!(build_predicate(column, &sel(&[])), "");
      assert_eq!(build_predicate(column, &sel(&["ALL"])), "");
    }
  }

  #[test]
  fn hand_built_values_honour_the_sentinel_rule() {
    assert_eq!(build_predicate("category", &Filter::Values(vec![])), "");
    assert_eq!(build_predicate("category", &Filter::Values(vec!["ALL".into()])), "");
    assert_eq!(
      build_predicate("category", &Filter::Values(vec!["Tanks".into(), "ALL".into()])),
      ""
    );
    let empty = Filter::Values(vec![]);
    assert!(!empty.is_restricted());
    assert_eq!(build_where_suffix([("category_name", &empty)]), "");
  }

  #[test]
  fn predicate_single_value() {
    assert_eq!(build_predicate("category", &sel(&["Tanks"])), " AND category in ('Tanks')");
  }

  #[test]
  fn predicate_multiple_values() {
    assert_eq!(
      build_predicate("category", &sel(&["Tanks", "IFVs"])),
      " AND category in ('Tanks','IFVs')"
    );
  }

  #[test]
  fn predicate_doubles_embedded_quotes() {
    assert_eq!(
      build_predicate("type_name", &sel(&["Commander's vehicle"])),
      " AND type_name in ('Commander''s vehicle')"
    );
  }

  #[test]
  fn selection_drops_duplicates_keeping_first_order() {
    assert_eq!(sel(&["IFVs", "Tanks", "IFVs"]), Filter::Values(vec!["IFVs".into(), "Tanks".into()]));
  }

  #[test]
  fn where_suffix_empty() {
    let none: Vec<(&str, &Filter)> = Vec::new();
    assert_eq!(build_where_suffix(none), "");
  }

  #[test]
  fn where_suffix_all_sentinels() {
    let all = sel(&["ALL"]);
    assert_eq!(build_where_suffix([("category_name", &all), ("loss_type", &all)]), "");
  }

  #[test]
  fn where_suffix_mixed_follows_input_order() {
    let categories = sel(&["Tanks", "IFVs"]);
    let damaged = sel(&["damaged"]);
    let all = sel(&["ALL"]);
    assert_eq!(
      build_where_suffix([
        ("category", &categories),
        ("loss_type", &damaged),
        ("loss_id", &all),
      ]),
      " AND category in ('Tanks','IFVs') AND loss_type in ('damaged')"
    );
  }

  #[test]
  fn where_suffix_single_filter() {
    let categories = sel(&["Tanks", "IFVs"]);
    assert_eq!(
      build_where_suffix([("category", &categories)]),
      " AND category in ('Tanks','IFVs')"
    );
  }

  #[test]
  fn selection_iterates_in_canonical_order() {
    let selection = FilterSelection::new()
      .with(Dimension::LossType, Filter::only("damaged"))
      .with(Dimension::Date, Filter::only("2025-04-01"))
      .with(Dimension::Category, Filter::NoRestriction);

    assert_eq!(
      selection.where_suffix(),
      " AND as_of in ('2025-04-01') AND loss_type in ('damaged')"
    );
    assert_eq!(selection.get(Dimension::Type), &Filter::NoRestriction);
  }

  #[test]
  fn selection_deserialises_from_ui_lists() {
    let selection: FilterSelection = serde_json::from_str(
      r#"{"loss_type":["destroyed"],"party":["ALL"],"category_name":[]}"#,
    )
    .unwrap();
    assert_eq!(selection.get(Dimension::LossType), &Filter::only("destroyed"));
    assert!(!selection.get(Dimension::Belligerent).is_restricted());
    assert!(!selection.get(Dimension::Category).is_restricted());
    assert_eq!(selection.where_suffix(), " AND loss_type in ('destroyed')");
  }

  #[test]
  fn selection_rejects_unknown_columns() {
    let parsed = serde_json::from_str::<FilterSelection>(r#"{"loss_id":["1"]}"#);
    assert!(parsed.is_err());
  }
}
