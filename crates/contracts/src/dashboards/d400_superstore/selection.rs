use serde::{Deserialize, Serialize};
use std::fmt;

/// Measure the dashboard aggregates by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Sales,
    Profit,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Sales, Metric::Profit];

    /// Column name, also used as chart title and axis label
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Sales => "sales",
            Metric::Profit => "profit",
        }
    }

    /// Label for the radio button
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Sales => "Sales",
            Metric::Profit => "Profit",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key the regional ranking is grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    #[default]
    State,
    City,
}

impl Grouping {
    pub const ALL: [Grouping; 2] = [Grouping::State, Grouping::City];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grouping::State => "state",
            Grouping::City => "city",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grouping::State => "State",
            Grouping::City => "City",
        }
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current values of the five dashboard selectors.
///
/// `city` is `None` only when the selected state has no cities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub state: String,
    pub city: Option<String>,
    #[serde(default)]
    pub metric: Metric,
    #[serde(default)]
    pub grouping: Grouping,
    pub product: String,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            state: "California".to_string(),
            city: Some("Los Angeles".to_string()),
            metric: Metric::Sales,
            grouping: Grouping::State,
            product: "Bookcases".to_string(),
        }
    }
}

/// Selector identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionInput {
    State,
    City,
    Metric,
    Grouping,
    Product,
}

/// A single user interaction: one selector set to a new value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "input", content = "value", rename_all = "snake_case")]
pub enum SelectionChange {
    State(String),
    City(String),
    Metric(Metric),
    Grouping(Grouping),
    Product(String),
}

impl SelectionChange {
    pub fn input(&self) -> SelectionInput {
        match self {
            SelectionChange::State(_) => SelectionInput::State,
            SelectionChange::City(_) => SelectionInput::City,
            SelectionChange::Metric(_) => SelectionInput::Metric,
            SelectionChange::Grouping(_) => SelectionInput::Grouping,
            SelectionChange::Product(_) => SelectionInput::Product,
        }
    }
}
