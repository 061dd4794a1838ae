use std::fmt;

use serde::Deserialize;

pub type Rgb = [u8; 3];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
}

/// A table cell as supplied by the caller. Rendered with `Display`; no locale
/// formatting happens at the table layer. Any JSON value is accepted: arrays
/// and objects land in `Other` and are stringified rather than rejected.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i64),
    Number(f64),
    Bool(bool),
    Text(String),
    #[default]
    Empty,
    Other(serde_json::Value),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(v) => write!(f, "{v}"),
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Bool(v) => write!(f, "{v}"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Empty => Ok(()),
            CellValue::Other(value) => write_json(f, value),
        }
    }
}

/// Arrays flatten to comma-joined elements; objects print as compact JSON.
fn write_json(f: &mut fmt::Formatter<'_>, value: &serde_json::Value) -> fmt::Result {
    use serde_json::Value;
    match value {
        Value::Null => Ok(()),
        Value::String(s) => f.write_str(s),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write_json(f, item)?;
            }
            Ok(())
        }
        other => write!(f, "{other}"),
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    #[serde(default, alias = "dueDate")]
    pub due_date: Option<String>,
    pub emi: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TableSpec {
    #[serde(default)]
    pub title: Option<String>,
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Section,
    #[default]
    Field,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReportItem {
    pub label: String,
    #[serde(default)]
    pub value: CellValue,
    #[serde(default, alias = "type")]
    pub kind: ItemKind,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GenericReport {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub items: Vec<ReportItem>,
    #[serde(default)]
    pub tables: Vec<TableSpec>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GroupTerms {
    pub tenure_months: u32,
    /// Percent per annum; loans without their own rate and no matching slab use it.
    pub annual_rate: f64,
    #[serde(default)]
    pub meeting_frequency: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
}

/// Interest bracket: amounts at or above `threshold` use `annual_rate`.
#[derive(Clone, Debug, Deserialize)]
pub struct InterestSlab {
    pub threshold: f64,
    pub annual_rate: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MemberLoan {
    #[serde(default)]
    pub loan_id: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    pub principal: f64,
    #[serde(default)]
    pub annual_rate: Option<f64>,
    #[serde(default)]
    pub tenure_months: Option<u32>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub outstanding: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(default)]
    pub member_id: Option<String>,
    #[serde(default)]
    pub loans: Vec<MemberLoan>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BalanceValidation {
    pub reported_outstanding: f64,
    #[serde(default)]
    pub reported_disbursed: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GroupReport {
    pub group_name: String,
    #[serde(default)]
    pub group_id: Option<String>,
    pub terms: GroupTerms,
    #[serde(default)]
    pub slabs: Vec<InterestSlab>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub validation: BalanceValidation,
    #[serde(default)]
    pub include_schedules: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoanSummary {
    pub borrower: String,
    #[serde(default)]
    pub loan_id: Option<String>,
    pub principal: f64,
    pub annual_rate: f64,
    pub tenure_months: u32,
    #[serde(default)]
    pub start_date: Option<String>,
}
