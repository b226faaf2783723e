use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::money::format_currency;
use crate::common::sanitize::{clean_req, clean_text, Sanitize};
use crate::common::SiteId;
use crate::domains::financial::models::{CurrencyTotal, FinancialType};

pub const DEFAULT_CURRENCY: &str = "BRL";

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateFinancialRequest {
    #[serde(rename = "type", default)]
    pub kind: FinancialType,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "category is required"))]
    pub category: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "description is required"))]
    pub description: String,
    #[serde(default)]
    pub amount: Decimal,
    #[validate(length(equal = 3, message = "currency must be a 3-letter code"))]
    pub currency: Option<String>,
    pub site_id: Option<SiteId>,
    pub date: Option<NaiveDate>,
}

impl Sanitize for CreateFinancialRequest {
    fn sanitize(&mut self) {
        clean_req(&mut self.category, clean_text);
        clean_req(&mut self.description, clean_text);
        self.currency = self
            .currency
            .take()
            .map(|c| clean_text(&c).to_uppercase())
            .filter(|c| !c.is_empty());
    }
}

/// `GET /financial?type=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinancialFilter {
    #[serde(rename = "type")]
    pub kind: Option<FinancialType>,
}

/// `GET /financial/summary?since=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryQuery {
    pub since: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencySummary {
    pub currency: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub formatted_income: String,
    pub formatted_expense: String,
    pub formatted_balance: String,
}

impl CurrencySummary {
    fn new(currency: &str, income: Decimal, expense: Decimal) -> Self {
        let balance = income - expense;
        Self {
            currency: currency.to_string(),
            income,
            expense,
            balance,
            formatted_income: format_currency(income, currency),
            formatted_expense: format_currency(expense, currency),
            formatted_balance: format_currency(balance, currency),
        }
    }
}

/// Fold grouped totals into one summary per currency. Currencies keep the
/// order they arrive in.
pub fn summarize(rows: &[CurrencyTotal]) -> Vec<CurrencySummary> {
    let mut buckets: Vec<(String, Decimal, Decimal)> = Vec::new();
    for row in rows {
        let idx = match buckets.iter().position(|(c, _, _)| *c == row.currency) {
            Some(idx) => idx,
            None => {
                buckets.push((row.currency.clone(), Decimal::ZERO, Decimal::ZERO));
                buckets.len() - 1
            }
        };
        match row.kind {
            FinancialType::Income => buckets[idx].1 += row.total,
            FinancialType::Expense => buckets[idx].2 += row.total,
        }
    }
    buckets
        .into_iter()
        .map(|(currency, income, expense)| CurrencySummary::new(&currency, income, expense))
        .collect()
}
