use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use chrono_english::{parse_date_string, Dialect};
use dayboard_core::rule::{CustomRule, RecurrenceRule, RuleEnd, RuleUnit, WeekdayCode};

use crate::cli::{RecurrencePreset, RuleFlags, UnitArg};

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a calendar date: ISO `YYYY-MM-DD` first, then natural language
/// ("tomorrow", "next friday") relative to now.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
        return Ok(date);
    }
    parse_date_string(input, Local::now(), Dialect::Us)
        .map(|parsed| parsed.date_naive())
        .map_err(|e| anyhow!("Failed to parse date '{}': {}", input, e))
}

/// Parse a days string like "mon,wed,fri", "monday,tuesday", or "weekdays".
pub fn parse_weekday_list(days_str: &str) -> Result<Vec<WeekdayCode>> {
    let input = days_str.trim().to_lowercase();

    // Special day groups
    match input.as_str() {
        "weekdays" | "workdays" => return Ok(WeekdayCode::WEEKDAYS.to_vec()),
        "weekends" => return Ok(vec![WeekdayCode::Sa, WeekdayCode::Su]),
        "daily" | "everyday" => {
            return Ok(vec![
                WeekdayCode::Mo,
                WeekdayCode::Tu,
                WeekdayCode::We,
                WeekdayCode::Th,
                WeekdayCode::Fr,
                WeekdayCode::Sa,
                WeekdayCode::Su,
            ]);
        }
        _ => {}
    }

    let mut days = Vec::new();
    let mut invalid_days = Vec::new();

    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        // Single letters are unambiguous for three weekdays only.
        let day = match token {
            "m" => Some(WeekdayCode::Mo),
            "w" => Some(WeekdayCode::We),
            "f" => Some(WeekdayCode::Fr),
            _ => token.parse().ok(),
        };
        match day {
            Some(day) => {
                if !days.contains(&day) {
                    days.push(day);
                }
            }
            None => invalid_days.push(token.to_string()),
        }
    }

    if !invalid_days.is_empty() {
        return Err(anyhow!(
            "Invalid day(s): {}\n\nSupported formats:\n  • Full names: 'monday,tuesday,wednesday'\n  • Short names: 'mon,tue,wed'\n  • Two-letter codes: 'mo,tu,we'\n  • Groups: 'weekdays', 'weekends', 'daily'",
            invalid_days.join(", ")
        ));
    }

    if days.is_empty() {
        return Err(anyhow!(
            "No valid days specified in: '{}'\n\nExamples:\n  • mon,wed,fri\n  • weekdays",
            days_str
        ));
    }

    days.sort();
    Ok(days)
}

/// Builds a recurrence rule from the shared `--every ...` flag group.
///
/// Returns `Ok(None)` when no recurrence flag was given at all. Detail
/// flags without `--every` are rejected. `--until`, `--count`,
/// `--interval`, and `--unit` route the request through the custom
/// variant so the extra bounds are carried.
pub fn rule_from_flags(flags: &RuleFlags) -> Result<Option<RecurrenceRule>> {
    if flags.is_empty() {
        return Ok(None);
    }

    let preset = match flags.every {
        Some(preset) => preset,
        None => {
            return Err(anyhow!(
                "Recurrence detail flags require --every (e.g., --every weekly --on mon,wed)"
            ))
        }
    };

    // The weekdays preset always pins Monday through Friday.
    let by_day = match (&flags.on, preset) {
        (_, RecurrencePreset::Weekdays) => WeekdayCode::WEEKDAYS.to_vec(),
        (Some(days), _) => parse_weekday_list(days)?,
        (None, _) => Vec::new(),
    };

    let needs_custom = preset == RecurrencePreset::Custom
        || flags.until.is_some()
        || flags.count.is_some()
        || flags.interval.is_some()
        || flags.unit.is_some();

    let rule = if needs_custom {
        let unit = flags
            .unit
            .map(UnitArg::to_rule_unit)
            .or_else(|| preset_unit(preset));
        let unit = match unit {
            Some(unit) => unit,
            None => {
                return Err(anyhow!(
                    "Custom recurrence requires --unit (day, week, month, or year)"
                ))
            }
        };
        let until = flags.until.as_deref().map(parse_date).transpose()?;
        RecurrenceRule::Custom(CustomRule {
            interval: flags.interval.unwrap_or_else(|| preset_interval(preset)),
            unit: Some(unit),
            end: if until.is_some() {
                RuleEnd::On
            } else {
                RuleEnd::Never
            },
            until,
            by_day,
            by_month_day: flags.by_month_day,
            count: flags.count,
        })
    } else {
        match preset {
            RecurrencePreset::Daily => RecurrenceRule::daily(),
            RecurrencePreset::Weekly | RecurrencePreset::Weekdays => {
                RecurrenceRule::Weekly { interval: 1, by_day }
            }
            RecurrencePreset::Biweekly => RecurrenceRule::Weekly { interval: 2, by_day },
            RecurrencePreset::Monthly => RecurrenceRule::Monthly {
                interval: 1,
                by_month_day: flags.by_month_day,
            },
            RecurrencePreset::Yearly => RecurrenceRule::Yearly { interval: 1 },
            RecurrencePreset::Custom => unreachable!(),
        }
    };

    Ok(Some(rule.normalized()))
}

fn preset_unit(preset: RecurrencePreset) -> Option<RuleUnit> {
    match preset {
        RecurrencePreset::Daily => Some(RuleUnit::Day),
        RecurrencePreset::Weekly | RecurrencePreset::Weekdays | RecurrencePreset::Biweekly => {
            Some(RuleUnit::Week)
        }
        RecurrencePreset::Monthly => Some(RuleUnit::Month),
        RecurrencePreset::Yearly => Some(RuleUnit::Year),
        RecurrencePreset::Custom => None,
    }
}

fn preset_interval(preset: RecurrencePreset) -> u32 {
    if preset == RecurrencePreset::Biweekly {
        2
    } else {
        1
    }
}
