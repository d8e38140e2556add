use chrono::{DateTime, NaiveDate, Weekday};
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Two-letter weekday codes as they appear in the rule wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WeekdayCode {
    Mo,
    Tu,
    We,
    Th,
    Fr,
    Sa,
    Su,
}

impl WeekdayCode {
    /// Monday through Friday, the `weekdays` preset expansion.
    pub const WEEKDAYS: [WeekdayCode; 5] = [
        WeekdayCode::Mo,
        WeekdayCode::Tu,
        WeekdayCode::We,
        WeekdayCode::Th,
        WeekdayCode::Fr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekdayCode::Mo => "MO",
            WeekdayCode::Tu => "TU",
            WeekdayCode::We => "WE",
            WeekdayCode::Th => "TH",
            WeekdayCode::Fr => "FR",
            WeekdayCode::Sa => "SA",
            WeekdayCode::Su => "SU",
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => WeekdayCode::Mo,
            Weekday::Tue => WeekdayCode::Tu,
            Weekday::Wed => WeekdayCode::We,
            Weekday::Thu => WeekdayCode::Th,
            Weekday::Fri => WeekdayCode::Fr,
            Weekday::Sat => WeekdayCode::Sa,
            Weekday::Sun => WeekdayCode::Su,
        }
    }

    pub fn to_weekday(self) -> Weekday {
        match self {
            WeekdayCode::Mo => Weekday::Mon,
            WeekdayCode::Tu => Weekday::Tue,
            WeekdayCode::We => Weekday::Wed,
            WeekdayCode::Th => Weekday::Thu,
            WeekdayCode::Fr => Weekday::Fri,
            WeekdayCode::Sa => Weekday::Sat,
            WeekdayCode::Su => Weekday::Sun,
        }
    }
}

impl fmt::Display for WeekdayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid weekday: {0}")]
pub struct ParseWeekdayCodeError(String);

impl FromStr for WeekdayCode {
    type Err = ParseWeekdayCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mo" | "mon" | "monday" => Ok(WeekdayCode::Mo),
            "tu" | "tue" | "tuesday" => Ok(WeekdayCode::Tu),
            "we" | "wed" | "wednesday" => Ok(WeekdayCode::We),
            "th" | "thu" | "thursday" => Ok(WeekdayCode::Th),
            "fr" | "fri" | "friday" => Ok(WeekdayCode::Fr),
            "sa" | "sat" | "saturday" => Ok(WeekdayCode::Sa),
            "su" | "sun" | "sunday" => Ok(WeekdayCode::Su),
            _ => Err(ParseWeekdayCodeError(s.to_string())),
        }
    }
}

/// Stepping unit of a `custom` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleUnit {
    Day,
    Week,
    Month,
    Year,
}

impl RuleUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleUnit::Day => "day",
            RuleUnit::Week => "week",
            RuleUnit::Month => "month",
            RuleUnit::Year => "year",
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid rule unit: {0}")]
pub struct ParseRuleUnitError(String);

impl FromStr for RuleUnit {
    type Err = ParseRuleUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "days" => Ok(RuleUnit::Day),
            "week" | "weeks" => Ok(RuleUnit::Week),
            "month" | "months" => Ok(RuleUnit::Month),
            "year" | "years" => Ok(RuleUnit::Year),
            _ => Err(ParseRuleUnitError(s.to_string())),
        }
    }
}

/// Whether a `custom` rule runs forever or stops on its `until` date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleEnd {
    #[default]
    Never,
    On,
}

impl RuleEnd {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleEnd::Never => "never",
            RuleEnd::On => "on",
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid rule end: {0}")]
pub struct ParseRuleEndError(String);

impl FromStr for RuleEnd {
    type Err = ParseRuleEndError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "never" => Ok(RuleEnd::Never),
            "on" => Ok(RuleEnd::On),
            _ => Err(ParseRuleEndError(s.to_string())),
        }
    }
}

/// The free-form rule variant: an explicit step size and unit plus the
/// optional bounds and filters the fixed presets do not carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomRule {
    pub interval: u32,
    /// `None` when the stored unit was missing or unrecognized; such a rule
    /// never produces an occurrence.
    pub unit: Option<RuleUnit>,
    pub end: RuleEnd,
    pub until: Option<NaiveDate>,
    pub by_day: Vec<WeekdayCode>,
    pub by_month_day: Option<u32>,
    /// Carried through storage and compared on edit, but not enforced by
    /// occurrence generation.
    pub count: Option<u32>,
}

impl Default for CustomRule {
    fn default() -> Self {
        Self {
            interval: 1,
            unit: None,
            end: RuleEnd::Never,
            until: None,
            by_day: Vec::new(),
            by_month_day: None,
            count: None,
        }
    }
}

/// Canonical representation of how a task repeats.
///
/// Rules reach the engine from loosely-shaped storage and UI payloads, so
/// every read boundary routes through [`RecurrenceRule::from_json`]: the
/// `Deserialize` impl below never fails, it degrades malformed input to
/// [`RecurrenceRule::Never`] instead. Serialization always emits the
/// canonical wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecurrenceRule {
    #[default]
    Never,
    Daily {
        interval: u32,
    },
    Weekly {
        interval: u32,
        by_day: Vec<WeekdayCode>,
    },
    Monthly {
        interval: u32,
        by_month_day: Option<u32>,
    },
    Yearly {
        interval: u32,
    },
    Custom(CustomRule),
}

impl RecurrenceRule {
    pub fn daily() -> Self {
        RecurrenceRule::Daily { interval: 1 }
    }

    /// The `weekdays` preset: weekly on Monday through Friday.
    pub fn weekdays() -> Self {
        RecurrenceRule::Weekly {
            interval: 1,
            by_day: WeekdayCode::WEEKDAYS.to_vec(),
        }
    }

    /// The `biweekly` preset: weekly with a stated interval of 2.
    pub fn biweekly() -> Self {
        RecurrenceRule::Weekly {
            interval: 2,
            by_day: Vec::new(),
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self, RecurrenceRule::Never)
    }

    pub fn is_recurring(&self) -> bool {
        !self.is_never()
    }

    /// The wire discriminant for this rule.
    pub fn kind(&self) -> &'static str {
        match self {
            RecurrenceRule::Never => "never",
            RecurrenceRule::Daily { .. } => "daily",
            RecurrenceRule::Weekly { .. } => "weekly",
            RecurrenceRule::Monthly { .. } => "monthly",
            RecurrenceRule::Yearly { .. } => "yearly",
            RecurrenceRule::Custom(_) => "custom",
        }
    }

    /// Inclusive end bound, carried only by `custom` rules.
    pub fn until(&self) -> Option<NaiveDate> {
        match self {
            RecurrenceRule::Custom(custom) => custom.until,
            _ => None,
        }
    }

    /// Canonicalizes an already-typed rule: clamps intervals to >= 1, sorts
    /// and deduplicates weekday sets, and drops out-of-range optionals.
    /// Idempotent; [`RecurrenceRule::from_json`] output is already in this
    /// form.
    pub fn normalized(self) -> Self {
        match self {
            RecurrenceRule::Never => RecurrenceRule::Never,
            RecurrenceRule::Daily { interval } => RecurrenceRule::Daily {
                interval: interval.max(1),
            },
            RecurrenceRule::Weekly {
                interval,
                mut by_day,
            } => {
                by_day.sort();
                by_day.dedup();
                RecurrenceRule::Weekly {
                    interval: interval.max(1),
                    by_day,
                }
            }
            RecurrenceRule::Monthly {
                interval,
                by_month_day,
            } => RecurrenceRule::Monthly {
                interval: interval.max(1),
                by_month_day: by_month_day.filter(|d| (1..=31).contains(d)),
            },
            RecurrenceRule::Yearly { interval } => RecurrenceRule::Yearly {
                interval: interval.max(1),
            },
            RecurrenceRule::Custom(mut custom) => {
                custom.interval = custom.interval.max(1);
                custom.by_day.sort();
                custom.by_day.dedup();
                custom.by_month_day = custom.by_month_day.filter(|d| (1..=31).contains(d));
                custom.count = custom.count.filter(|c| *c >= 1);
                RecurrenceRule::Custom(custom)
            }
        }
    }

    /// Normalizes a loosely-shaped rule value into canonical form.
    ///
    /// # Behavior
    /// - Accepts the rule object directly or nested one level under a legacy
    ///   `repeat` / `repeat_info` key.
    /// - Missing, unknown, or non-string `type` yields `Never`; so does any
    ///   non-object input. Malformed input never errors and never invents
    ///   occurrences.
    /// - `weekdays` and `biweekly` presets collapse to their canonical
    ///   `weekly` forms.
    /// - `interval` coerces to an integer >= 1 (truncating floats, parsing
    ///   numeric strings); anything else clamps to 1.
    /// - `until` must parse as `YYYY-MM-DD` or an RFC 3339 timestamp;
    ///   unparseable values are dropped. A `custom` rule missing `end`
    ///   derives it from whether `until` survived.
    pub fn from_json(value: &Value) -> Self {
        let value = unwrap_legacy(value);
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => return RecurrenceRule::Never,
        };
        let kind = match obj.get("type").and_then(Value::as_str) {
            Some(kind) => kind.trim().to_lowercase(),
            None => return RecurrenceRule::Never,
        };

        match kind.as_str() {
            "never" | "none" | "" => RecurrenceRule::Never,
            "daily" => RecurrenceRule::Daily {
                interval: read_interval(obj),
            },
            "weekly" => RecurrenceRule::Weekly {
                interval: read_interval(obj),
                by_day: read_by_day(obj),
            },
            "weekdays" => RecurrenceRule::weekdays(),
            "biweekly" => RecurrenceRule::Weekly {
                interval: 2,
                by_day: read_by_day(obj),
            },
            "monthly" => RecurrenceRule::Monthly {
                interval: read_interval(obj),
                by_month_day: read_by_month_day(obj),
            },
            "yearly" | "annually" => RecurrenceRule::Yearly {
                interval: read_interval(obj),
            },
            "custom" => RecurrenceRule::Custom(read_custom(obj)),
            _ => RecurrenceRule::Never,
        }
    }

    /// Normalizes a rule from raw JSON text. Unparseable text yields `Never`.
    pub fn parse(input: &str) -> Self {
        match serde_json::from_str::<Value>(input) {
            Ok(value) => RecurrenceRule::from_json(&value),
            Err(_) => RecurrenceRule::Never,
        }
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceRule::Never => write!(f, "never"),
            RecurrenceRule::Daily { .. } => write!(f, "daily"),
            RecurrenceRule::Weekly { interval, by_day } => {
                if *interval > 1 {
                    write!(f, "every {} weeks", interval)?;
                } else {
                    write!(f, "weekly")?;
                }
                if !by_day.is_empty() {
                    write!(f, " on {}", join_days(by_day))?;
                }
                Ok(())
            }
            RecurrenceRule::Monthly {
                interval,
                by_month_day,
            } => {
                if *interval > 1 {
                    write!(f, "every {} months", interval)?;
                } else {
                    write!(f, "monthly")?;
                }
                if let Some(day) = by_month_day {
                    write!(f, " (day {})", day)?;
                }
                Ok(())
            }
            RecurrenceRule::Yearly { interval } => {
                if *interval > 1 {
                    write!(f, "every {} years", interval)
                } else {
                    write!(f, "yearly")
                }
            }
            RecurrenceRule::Custom(custom) => {
                match custom.unit {
                    Some(unit) if custom.interval > 1 => {
                        write!(f, "every {} {}s", custom.interval, unit.as_str())?
                    }
                    Some(unit) => write!(f, "every {}", unit.as_str())?,
                    None => write!(f, "custom (inactive)")?,
                }
                if !custom.by_day.is_empty() {
                    write!(f, " on {}", join_days(&custom.by_day))?;
                }
                if let Some(until) = custom.until {
                    write!(f, " until {}", until)?;
                }
                Ok(())
            }
        }
    }
}

fn join_days(days: &[WeekdayCode]) -> String {
    days.iter()
        .map(WeekdayCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Serialize for RecurrenceRule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.kind())?;
        match self {
            RecurrenceRule::Never => {}
            RecurrenceRule::Daily { interval } | RecurrenceRule::Yearly { interval } => {
                map.serialize_entry("interval", interval)?;
            }
            RecurrenceRule::Weekly { interval, by_day } => {
                map.serialize_entry("interval", interval)?;
                if !by_day.is_empty() {
                    map.serialize_entry("byDay", &codes_of(by_day))?;
                }
            }
            RecurrenceRule::Monthly {
                interval,
                by_month_day,
            } => {
                map.serialize_entry("interval", interval)?;
                if let Some(day) = by_month_day {
                    map.serialize_entry("byMonthDay", day)?;
                }
            }
            RecurrenceRule::Custom(custom) => {
                map.serialize_entry("interval", &custom.interval)?;
                if let Some(unit) = custom.unit {
                    map.serialize_entry("unit", unit.as_str())?;
                }
                map.serialize_entry("end", custom.end.as_str())?;
                if let Some(until) = custom.until {
                    map.serialize_entry("until", &until)?;
                }
                if !custom.by_day.is_empty() {
                    map.serialize_entry("byDay", &codes_of(&custom.by_day))?;
                }
                if let Some(day) = custom.by_month_day {
                    map.serialize_entry("byMonthDay", &day)?;
                }
                if let Some(count) = custom.count {
                    map.serialize_entry("count", &count)?;
                }
            }
        }
        map.end()
    }
}

fn codes_of(days: &[WeekdayCode]) -> Vec<&'static str> {
    days.iter().map(WeekdayCode::as_str).collect()
}

impl<'de> Deserialize<'de> for RecurrenceRule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(RecurrenceRule::from_json(&value))
    }
}

/// Unwraps a legacy `repeat` / `repeat_info` container, one level only. The
/// unwrapping is skipped when the object already carries a `type` of its own.
fn unwrap_legacy(value: &Value) -> &Value {
    if let Some(obj) = value.as_object() {
        if !obj.contains_key("type") {
            for key in ["repeat", "repeat_info"] {
                if let Some(inner) = obj.get(key) {
                    return inner;
                }
            }
        }
    }
    value
}

/// Coerces a JSON value to an integer: whole numbers directly, floats by
/// truncation, numeric strings by parsing.
fn int_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

fn read_interval(obj: &Map<String, Value>) -> u32 {
    obj.get("interval")
        .and_then(int_value)
        .map(|n| n.clamp(1, i64::from(u32::MAX)) as u32)
        .unwrap_or(1)
}

fn read_by_day(obj: &Map<String, Value>) -> Vec<WeekdayCode> {
    let raw = obj.get("byDay").or_else(|| obj.get("by_day"));
    let mut days: Vec<WeekdayCode> = match raw {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(|s| s.parse().ok())
            .collect(),
        Some(Value::String(s)) => s.split(',').filter_map(|tok| tok.parse().ok()).collect(),
        _ => Vec::new(),
    };
    days.sort();
    days.dedup();
    days
}

fn read_by_month_day(obj: &Map<String, Value>) -> Option<u32> {
    obj.get("byMonthDay")
        .or_else(|| obj.get("by_month_day"))
        .and_then(int_value)
        .filter(|n| (1..=31).contains(n))
        .map(|n| n as u32)
}

fn read_count(obj: &Map<String, Value>) -> Option<u32> {
    obj.get("count")
        .and_then(int_value)
        .filter(|n| (1..=i64::from(u32::MAX)).contains(n))
        .map(|n| n as u32)
}

fn read_until(obj: &Map<String, Value>) -> Option<NaiveDate> {
    let raw = obj.get("until")?.as_str()?.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

fn read_custom(obj: &Map<String, Value>) -> CustomRule {
    let until = read_until(obj);
    let end = match obj
        .get("end")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<RuleEnd>().ok())
    {
        Some(end) => end,
        None if until.is_some() => RuleEnd::On,
        None => RuleEnd::Never,
    };
    CustomRule {
        interval: read_interval(obj),
        unit: obj
            .get("unit")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok()),
        end,
        until,
        by_day: read_by_day(obj),
        by_month_day: read_by_month_day(obj),
        count: read_count(obj),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod normalizer_tests {
        use super::*;

        #[test]
        fn test_missing_or_unknown_type_is_never() {
            assert_eq!(RecurrenceRule::from_json(&json!(null)), RecurrenceRule::Never);
            assert_eq!(RecurrenceRule::from_json(&json!({})), RecurrenceRule::Never);
            assert_eq!(
                RecurrenceRule::from_json(&json!({"interval": 3})),
                RecurrenceRule::Never
            );
            assert_eq!(
                RecurrenceRule::from_json(&json!({"type": "fortnightly"})),
                RecurrenceRule::Never
            );
            assert_eq!(
                RecurrenceRule::from_json(&json!({"type": 7})),
                RecurrenceRule::Never
            );
        }

        #[test]
        fn test_non_object_input_is_never() {
            assert_eq!(RecurrenceRule::from_json(&json!("daily")), RecurrenceRule::Never);
            assert_eq!(RecurrenceRule::from_json(&json!(5)), RecurrenceRule::Never);
            assert_eq!(RecurrenceRule::from_json(&json!(true)), RecurrenceRule::Never);
            assert_eq!(
                RecurrenceRule::from_json(&json!([{"type": "daily"}])),
                RecurrenceRule::Never
            );
        }

        #[test]
        fn test_weekdays_preset_expands() {
            let rule = RecurrenceRule::from_json(&json!({"type": "weekdays"}));
            assert_eq!(rule, RecurrenceRule::weekdays());

            // The preset wins over whatever byDay the input carried.
            let rule = RecurrenceRule::from_json(&json!({"type": "weekdays", "byDay": ["SA"]}));
            assert_eq!(rule, RecurrenceRule::weekdays());
        }

        #[test]
        fn test_biweekly_preset_expands() {
            let rule = RecurrenceRule::from_json(&json!({"type": "biweekly"}));
            assert_eq!(rule, RecurrenceRule::biweekly());

            let rule = RecurrenceRule::from_json(&json!({"type": "biweekly", "byDay": ["MO"]}));
            assert_eq!(
                rule,
                RecurrenceRule::Weekly {
                    interval: 2,
                    by_day: vec![WeekdayCode::Mo],
                }
            );
        }

        #[test]
        fn test_interval_coercion() {
            let cases = [
                (json!({"type": "daily"}), 1),
                (json!({"type": "daily", "interval": 0}), 1),
                (json!({"type": "daily", "interval": -3}), 1),
                (json!({"type": "daily", "interval": 2.9}), 2),
                (json!({"type": "daily", "interval": "3"}), 3),
                (json!({"type": "daily", "interval": "soon"}), 1),
                (json!({"type": "daily", "interval": null}), 1),
            ];
            for (input, expected) in cases {
                match RecurrenceRule::from_json(&input) {
                    RecurrenceRule::Daily { interval } => assert_eq!(interval, expected, "{input}"),
                    other => panic!("expected daily for {input}, got {other:?}"),
                }
            }
        }

        #[test]
        fn test_by_day_cleanup() {
            let rule = RecurrenceRule::from_json(
                &json!({"type": "weekly", "byDay": ["fr", "MO", "mo", "xx", 3]}),
            );
            assert_eq!(
                rule,
                RecurrenceRule::Weekly {
                    interval: 1,
                    by_day: vec![WeekdayCode::Mo, WeekdayCode::Fr],
                }
            );
        }

        #[test]
        fn test_by_day_from_comma_string() {
            let rule = RecurrenceRule::from_json(&json!({"type": "weekly", "byDay": "we,mo"}));
            assert_eq!(
                rule,
                RecurrenceRule::Weekly {
                    interval: 1,
                    by_day: vec![WeekdayCode::Mo, WeekdayCode::We],
                }
            );
        }

        #[test]
        fn test_until_parsing() {
            let rule = RecurrenceRule::from_json(
                &json!({"type": "custom", "unit": "day", "until": "2024-06-30"}),
            );
            assert_eq!(rule.until(), Some(date(2024, 6, 30)));

            let rule = RecurrenceRule::from_json(
                &json!({"type": "custom", "unit": "day", "until": "2024-06-30T18:00:00Z"}),
            );
            assert_eq!(rule.until(), Some(date(2024, 6, 30)));

            let rule = RecurrenceRule::from_json(
                &json!({"type": "custom", "unit": "day", "until": "someday"}),
            );
            assert_eq!(rule.until(), None);
        }

        #[test]
        fn test_custom_end_reconciliation() {
            let rule = RecurrenceRule::from_json(
                &json!({"type": "custom", "unit": "day", "until": "2024-06-30"}),
            );
            match rule {
                RecurrenceRule::Custom(custom) => assert_eq!(custom.end, RuleEnd::On),
                other => panic!("expected custom, got {other:?}"),
            }

            let rule = RecurrenceRule::from_json(&json!({"type": "custom", "unit": "day"}));
            match rule {
                RecurrenceRule::Custom(custom) => assert_eq!(custom.end, RuleEnd::Never),
                other => panic!("expected custom, got {other:?}"),
            }

            // An explicit end survives even when inconsistent with until.
            let rule = RecurrenceRule::from_json(
                &json!({"type": "custom", "unit": "day", "end": "never", "until": "2024-06-30"}),
            );
            match rule {
                RecurrenceRule::Custom(custom) => {
                    assert_eq!(custom.end, RuleEnd::Never);
                    assert_eq!(custom.until, Some(date(2024, 6, 30)));
                }
                other => panic!("expected custom, got {other:?}"),
            }
        }

        #[test]
        fn test_custom_unknown_unit_collapses_to_none() {
            let rule = RecurrenceRule::from_json(&json!({"type": "custom", "unit": "fortnight"}));
            match rule {
                RecurrenceRule::Custom(custom) => assert_eq!(custom.unit, None),
                other => panic!("expected custom, got {other:?}"),
            }
        }

        #[test]
        fn test_count_and_by_month_day_kept_only_when_valid() {
            let rule = RecurrenceRule::from_json(
                &json!({"type": "custom", "unit": "month", "count": 0, "byMonthDay": 32}),
            );
            match rule {
                RecurrenceRule::Custom(custom) => {
                    assert_eq!(custom.count, None);
                    assert_eq!(custom.by_month_day, None);
                }
                other => panic!("expected custom, got {other:?}"),
            }

            let rule = RecurrenceRule::from_json(
                &json!({"type": "custom", "unit": "month", "count": 5, "byMonthDay": 31}),
            );
            match rule {
                RecurrenceRule::Custom(custom) => {
                    assert_eq!(custom.count, Some(5));
                    assert_eq!(custom.by_month_day, Some(31));
                }
                other => panic!("expected custom, got {other:?}"),
            }
        }

        #[test]
        fn test_legacy_wrappers_unwrap_one_level() {
            let rule = RecurrenceRule::from_json(&json!({"repeat": {"type": "daily"}}));
            assert_eq!(rule, RecurrenceRule::daily());

            let rule = RecurrenceRule::from_json(&json!({"repeat_info": {"type": "weekly"}}));
            assert_eq!(
                rule,
                RecurrenceRule::Weekly {
                    interval: 1,
                    by_day: vec![],
                }
            );

            // A doubly-wrapped rule is not chased further.
            let rule =
                RecurrenceRule::from_json(&json!({"repeat": {"repeat": {"type": "daily"}}}));
            assert_eq!(rule, RecurrenceRule::Never);

            // An object that already has a type is not unwrapped.
            let rule = RecurrenceRule::from_json(
                &json!({"type": "daily", "repeat": {"type": "weekly"}}),
            );
            assert_eq!(rule, RecurrenceRule::daily());
        }

        #[test]
        fn test_normalize_is_idempotent() {
            let samples = [
                json!(null),
                json!({"type": "weekdays"}),
                json!({"type": "biweekly", "byDay": ["su", "SA"]}),
                json!({"type": "daily", "interval": -1}),
                json!({"type": "monthly", "byMonthDay": 15}),
                json!({"repeat_info": {"type": "custom", "unit": "week", "interval": "2", "until": "2025-01-01"}}),
                json!({"type": "custom", "unit": "parsec", "count": 3}),
            ];
            for sample in samples {
                let once = RecurrenceRule::from_json(&sample);
                let wire = serde_json::to_value(&once).unwrap();
                let twice = RecurrenceRule::from_json(&wire);
                assert_eq!(once, twice, "not idempotent for {sample}");
                assert_eq!(once.clone().normalized(), once, "normalized() changed {sample}");
            }
        }

        #[test]
        fn test_parse_from_raw_text() {
            assert_eq!(
                RecurrenceRule::parse(r#"{"type": "daily"}"#),
                RecurrenceRule::daily()
            );
            assert_eq!(RecurrenceRule::parse("not json"), RecurrenceRule::Never);
        }
    }

    mod wire_shape_tests {
        use super::*;

        #[test]
        fn test_never_serializes_minimal() {
            let value = serde_json::to_value(RecurrenceRule::Never).unwrap();
            assert_eq!(value, json!({"type": "never"}));
        }

        #[test]
        fn test_weekly_omits_empty_by_day() {
            let value = serde_json::to_value(RecurrenceRule::Weekly {
                interval: 2,
                by_day: vec![],
            })
            .unwrap();
            assert_eq!(value, json!({"type": "weekly", "interval": 2}));

            let value = serde_json::to_value(RecurrenceRule::weekdays()).unwrap();
            assert_eq!(
                value,
                json!({"type": "weekly", "interval": 1, "byDay": ["MO", "TU", "WE", "TH", "FR"]})
            );
        }

        #[test]
        fn test_custom_emits_end_and_skips_absent_optionals() {
            let value = serde_json::to_value(RecurrenceRule::Custom(CustomRule {
                interval: 3,
                unit: Some(RuleUnit::Week),
                end: RuleEnd::On,
                until: Some(date(2025, 12, 31)),
                by_day: vec![WeekdayCode::Mo],
                by_month_day: None,
                count: None,
            }))
            .unwrap();
            assert_eq!(
                value,
                json!({
                    "type": "custom",
                    "interval": 3,
                    "unit": "week",
                    "end": "on",
                    "until": "2025-12-31",
                    "byDay": ["MO"],
                })
            );
        }

        #[test]
        fn test_deserialize_never_fails() {
            let rule: RecurrenceRule = serde_json::from_str("\"garbage\"").unwrap();
            assert_eq!(rule, RecurrenceRule::Never);

            let rule: RecurrenceRule =
                serde_json::from_str(r#"{"type": "daily", "interval": 0}"#).unwrap();
            assert_eq!(rule, RecurrenceRule::Daily { interval: 1 });
        }

        #[test]
        fn test_round_trip_preserves_normalized_rules() {
            let rules = [
                RecurrenceRule::Never,
                RecurrenceRule::daily(),
                RecurrenceRule::weekdays(),
                RecurrenceRule::biweekly(),
                RecurrenceRule::Monthly {
                    interval: 1,
                    by_month_day: Some(15),
                },
                RecurrenceRule::Yearly { interval: 4 },
                RecurrenceRule::Custom(CustomRule {
                    interval: 2,
                    unit: Some(RuleUnit::Month),
                    end: RuleEnd::Never,
                    until: None,
                    by_day: vec![],
                    by_month_day: Some(1),
                    count: Some(12),
                }),
            ];
            for rule in rules {
                let wire = serde_json::to_string(&rule).unwrap();
                let back: RecurrenceRule = serde_json::from_str(&wire).unwrap();
                assert_eq!(back, rule);
            }
        }
    }

    mod display_tests {
        use super::*;

        #[test]
        fn test_display_summaries() {
            assert_eq!(RecurrenceRule::Never.to_string(), "never");
            assert_eq!(RecurrenceRule::daily().to_string(), "daily");
            assert_eq!(
                RecurrenceRule::weekdays().to_string(),
                "weekly on MO, TU, WE, TH, FR"
            );
            assert_eq!(RecurrenceRule::biweekly().to_string(), "every 2 weeks");
            assert_eq!(
                RecurrenceRule::Monthly {
                    interval: 1,
                    by_month_day: Some(15),
                }
                .to_string(),
                "monthly (day 15)"
            );
            assert_eq!(
                RecurrenceRule::Custom(CustomRule {
                    interval: 2,
                    unit: Some(RuleUnit::Week),
                    end: RuleEnd::On,
                    until: Some(date(2025, 6, 1)),
                    by_day: vec![WeekdayCode::Fr],
                    by_month_day: None,
                    count: None,
                })
                .to_string(),
                "every 2 weeks on FR until 2025-06-01"
            );
            assert_eq!(
                RecurrenceRule::Custom(CustomRule::default()).to_string(),
                "custom (inactive)"
            );
        }
    }
}
