//! Money balance and the append-only expense ledger.
//!
//! RULE: a debit and its ledger entry are one operation. `try_spend`
//! either does both or neither.

use crate::types::Money;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_BALANCE: Money = 50;

/// Ledger timestamp format: "YYYY-MM-DD HH:MM:SS".
pub const LEDGER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseEntry {
    pub label:  String,
    pub amount: u32,
    #[serde(rename = "date", with = "ledger_date")]
    pub timestamp: NaiveDateTime,
}

mod ledger_date {
    use super::LEDGER_DATE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&at.format(LEDGER_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, LEDGER_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

impl ExpenseEntry {
    /// Parse a ledger timestamp. Also accepts ISO-8601 with a 'T'
    /// separator and optional fractional seconds, truncated to seconds.
    pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
        use chrono::Timelike;
        let raw = raw.trim();
        NaiveDateTime::parse_from_str(raw, LEDGER_DATE_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .or_else(|_| NaiveDateTime::parse_from_str(raw.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
            .map(|at| at.with_nanosecond(0).unwrap_or(at))
    }
}

/// Newest-first, append-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ExpenseLedger {
    entries: VecDeque<ExpenseEntry>,
}

impl ExpenseLedger {
    /// Build from entries already ordered newest-first.
    pub fn from_newest_first(entries: impl IntoIterator<Item = ExpenseEntry>) -> Self {
        Self { entries: entries.into_iter().collect() }
    }

    fn record(&mut self, entry: ExpenseEntry) {
        self.entries.push_front(entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &ExpenseEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&ExpenseEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> Money {
        self.entries.iter().map(|e| Money::from(e.amount)).sum()
    }
}

/// Raised by `try_spend` when the balance cannot cover a cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientFunds {
    pub needed:    Money,
    pub available: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EconomyState {
    pub balance: Money,
    pub ledger:  ExpenseLedger,
}

impl Default for EconomyState {
    fn default() -> Self {
        Self {
            balance: DEFAULT_BALANCE,
            ledger:  ExpenseLedger::default(),
        }
    }
}

impl EconomyState {
    pub fn can_afford(&self, cost: u32) -> bool {
        self.balance >= Money::from(cost)
    }

    /// Debit `cost` and prepend a ledger entry, or change nothing.
    pub fn try_spend(
        &mut self,
        label: &str,
        cost: u32,
        at: NaiveDateTime,
    ) -> Result<(), InsufficientFunds> {
        if !self.can_afford(cost) {
            return Err(InsufficientFunds {
                needed:    Money::from(cost),
                available: self.balance,
            });
        }
        self.balance -= Money::from(cost);
        self.ledger.record(ExpenseEntry {
            label: label.to_string(),
            amount: cost,
            timestamp: at,
        });
        Ok(())
    }

    /// Income never touches the ledger.
    pub fn earn(&mut self, amount: Money) {
        self.balance = self.balance.saturating_add(amount);
    }

    pub fn total_expenses(&self) -> Money {
        self.ledger.total()
    }
}
