//! Snapshot serialization — full pet state to/from JSON.
//!
//! The field names are the save format shared with earlier saves:
//! `name`, `type`, `created`, the five stats, `money`, `expenses`.
//!
//! RULE: restoring never fails. Any absent or malformed field takes its
//! default, stats are clamped, and bad expense entries are dropped one
//! by one.

use crate::{
    error::SimResult,
    ledger::{EconomyState, ExpenseEntry, ExpenseLedger, DEFAULT_BALANCE},
    profile::{PetProfile, Species, DEFAULT_PET_NAME},
    state::PetState,
    stats::{Stat, StatBlock},
    types::Money,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PetSnapshot {
    pub name:        String,
    #[serde(rename = "type")]
    pub species:     Species,
    pub created:     bool,
    pub hunger:      f64,
    pub happiness:   f64,
    pub health:      f64,
    pub cleanliness: f64,
    pub energy:      f64,
    pub money:       Money,
    pub expenses:    Vec<ExpenseEntry>,
}

impl Default for PetSnapshot {
    fn default() -> Self {
        Self::capture(&PetState::default())
    }
}

impl PetSnapshot {
    pub fn capture(state: &PetState) -> Self {
        let stats = &state.stats;
        Self {
            name:        state.profile.name.clone(),
            species:     state.profile.species,
            created:     state.profile.created,
            hunger:      stats.hunger(),
            happiness:   stats.happiness(),
            health:      stats.health(),
            cleanliness: stats.cleanliness(),
            energy:      stats.energy(),
            money:       state.economy.balance,
            expenses:    state.economy.ledger.entries().cloned().collect(),
        }
    }

    /// Rebuild the aggregate, clamping any out-of-range stat.
    pub fn to_state(&self) -> PetState {
        PetState {
            profile: PetProfile {
                name:    PetProfile::normalize_name(&self.name),
                species: self.species,
                created: self.created,
            },
            stats: StatBlock::new(
                self.hunger,
                self.happiness,
                self.health,
                self.cleanliness,
                self.energy,
            ),
            economy: EconomyState {
                balance: self.money,
                ledger:  ExpenseLedger::from_newest_first(
                    self.expenses.iter().filter(|e| e.amount > 0).cloned(),
                ),
            },
        }
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored payload. Text that is not JSON yields the defaults.
    /// Numbers too large for an f64 only cost the field that holds them.
    pub fn from_json(raw: &str) -> Self {
        let parsed = serde_json::from_str::<Value>(raw).or_else(|e| {
            serde_json::from_str::<Value>(&null_out_of_range_numbers(raw)).map_err(|_| e)
        });
        match parsed {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                log::warn!("snapshot is not valid JSON ({e}); using defaults");
                Self::default()
            }
        }
    }

    /// Field-by-field lenient decode.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            log::warn!("snapshot is not a JSON object; using defaults");
            return Self::default();
        };
        let mut reader = FieldReader { obj, degraded: Vec::new() };

        let snapshot = Self {
            name: reader
                .field(&["name"], |v| {
                    v.as_str().filter(|s| !s.trim().is_empty()).map(str::to_string)
                })
                .unwrap_or_else(|| DEFAULT_PET_NAME.to_string()),
            species: reader
                .field(&["type", "species"], |v| v.as_str().and_then(Species::parse))
                .unwrap_or_default(),
            created: reader.field(&["created"], Value::as_bool).unwrap_or(false),
            hunger:      reader.stat(Stat::Hunger),
            happiness:   reader.stat(Stat::Happiness),
            health:      reader.stat(Stat::Health),
            cleanliness: reader.stat(Stat::Cleanliness),
            energy:      reader.stat(Stat::Energy),
            money: reader
                .field(&["money", "balance"], whole_number)
                .unwrap_or(DEFAULT_BALANCE),
            expenses: reader.expenses(),
        };

        if !reader.degraded.is_empty() {
            log::warn!(
                "snapshot fields defaulted or repaired: {}",
                reader.degraded.join(", ")
            );
        }
        snapshot
    }
}

struct FieldReader<'a> {
    obj:      &'a Map<String, Value>,
    degraded: Vec<String>,
}

impl FieldReader<'_> {
    /// First key present wins. A present but unusable value is noted.
    fn field<T>(&mut self, keys: &[&str], decode: impl Fn(&Value) -> Option<T>) -> Option<T> {
        let obj = self.obj;
        let (key, raw) = keys.iter().find_map(|k| obj.get(*k).map(|v| (*k, v)))?;
        let decoded = decode(raw);
        if decoded.is_none() {
            self.degraded.push(key.to_string());
        }
        decoded
    }

    fn stat(&mut self, stat: Stat) -> f64 {
        self.field(&[stat.name()], |v| v.as_f64().filter(|f| f.is_finite()))
            .unwrap_or_else(|| stat.default_value())
    }

    fn expenses(&mut self) -> Vec<ExpenseEntry> {
        let Some(raw) = self.field(&["expenses"], |v| v.as_array().cloned()) else {
            return Vec::new();
        };
        let entries: Vec<ExpenseEntry> = raw.iter().filter_map(decode_expense).collect();
        if entries.len() != raw.len() {
            self.degraded
                .push(format!("expenses ({} dropped)", raw.len() - entries.len()));
        }
        entries
    }
}

fn whole_number(v: &Value) -> Option<Money> {
    v.as_i64().or_else(|| {
        v.as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15)
            .map(|f| f as Money)
    })
}

fn decode_expense(v: &Value) -> Option<ExpenseEntry> {
    let obj = v.as_object()?;
    let label = obj.get("label")?.as_str()?.to_string();
    let amount = whole_number(obj.get("amount")?)?;
    let amount = u32::try_from(amount).ok().filter(|a| *a > 0)?;
    let timestamp = ExpenseEntry::parse_date(obj.get("date")?.as_str()?)?;
    Some(ExpenseEntry { label, amount, timestamp })
}

/// Replace number literals that overflow an f64 (`1e400`) with `null`.
/// String contents are copied untouched.
fn null_out_of_range_numbers(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some((start, c)) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        if c == '-' || c.is_ascii_digit() {
            let mut end = start + c.len_utf8();
            while let Some(&(i, n)) = chars.peek() {
                if !(n.is_ascii_digit() || matches!(n, '.' | 'e' | 'E' | '+' | '-')) {
                    break;
                }
                end = i + n.len_utf8();
                chars.next();
            }
            let literal = &raw[start..end];
            match literal.parse::<f64>() {
                Ok(n) if !n.is_finite() => out.push_str("null"),
                _ => out.push_str(literal),
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        }
        out.push(c);
    }
    out
}
