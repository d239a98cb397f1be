//! Decomposition of recipe durations into whole hours and minutes.
//!
//! Accepts ISO-8601 durations (`PT1H30M`, `P1DT2H`, `PT5400.0S`, `PT15-20M`)
//! as well as the loose forms recipe sites type by hand (`1 hour 30 mins`,
//! `1h30m`, `1 1/2 hours`, `1:30`, `45`). Components that are negative or
//! unreadable count as zero; input with no readable component yields `0:00`.

use crate::model::HoursMinutes;
use serde_json::Value;

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_WEEK: f64 = 604_800.0;

/// Duration from any JSON value; bare numbers are minutes
pub fn parse_duration(value: &Value) -> HoursMinutes {
    match value {
        Value::String(s) => parse_duration_str(s),
        Value::Number(n) => from_seconds(clamp(n.as_f64().unwrap_or(0.0)) * SECONDS_PER_MINUTE),
        Value::Array(items) => items.first().map(parse_duration).unwrap_or_default(),
        _ => HoursMinutes::default(),
    }
}

pub fn parse_duration_str(input: &str) -> HoursMinutes {
    let lower = input.trim().to_ascii_lowercase();
    let seconds = match lower.strip_prefix('p') {
        Some(rest) => parse_iso(rest).or_else(|| parse_human(&lower)),
        None => parse_clock(&lower).or_else(|| parse_human(&lower)),
    };
    seconds.map(from_seconds).unwrap_or_default()
}

fn parse_iso(rest: &str) -> Option<f64> {
    let mut in_time = false;
    let mut number = String::new();
    let mut total = 0.0;
    let mut recognised = false;

    for c in rest.chars() {
        match c {
            '0'..='9' | '.' | ',' | '-' => number.push(c),
            't' if number.is_empty() && !in_time => in_time = true,
            designator => {
                if number.is_empty() {
                    return None;
                }
                let amount = component(&number);
                number.clear();
                let scale = match (designator, in_time) {
                    ('w', false) => SECONDS_PER_WEEK,
                    ('d', false) => SECONDS_PER_DAY,
                    // years and months have no fixed length
                    ('y' | 'm', false) => 0.0,
                    ('h', true) => SECONDS_PER_HOUR,
                    ('m', true) => SECONDS_PER_MINUTE,
                    ('s', true) => 1.0,
                    _ => return None,
                };
                total += amount * scale;
                recognised = true;
            }
        }
    }

    (recognised && number.is_empty()).then_some(total)
}

/// `h:mm`
fn parse_clock(input: &str) -> Option<f64> {
    let (hours, minutes) = input.split_once(':')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    Some(f64::from(hours) * SECONDS_PER_HOUR + f64::from(minutes) * SECONDS_PER_MINUTE)
}

/// Words are units or noise; bare numbers before a number-plus-unit pair are
/// added to it, so `1 1/2 hours` reads as one and a half hours
fn parse_human(input: &str) -> Option<f64> {
    let tokens = tokenize(input);
    let mut total = 0.0;
    let mut recognised = false;
    let mut pending = 0.0;
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        let Token::Number(number) = token else {
            pending = 0.0;
            continue;
        };
        let amount = pending + component(number);
        pending = 0.0;
        let scale = match iter.peek() {
            Some(Token::Word(word)) => {
                let scale = unit_scale(word);
                iter.next();
                scale
            }
            Some(Token::Number(_)) => {
                pending = amount;
                None
            }
            // a lone number means minutes
            None if tokens.len() == 1 => Some(SECONDS_PER_MINUTE),
            None => None,
        };
        if let Some(scale) = scale {
            total += amount * scale;
            recognised = true;
        }
    }

    recognised.then_some(total)
}

fn unit_scale(word: &str) -> Option<f64> {
    match word {
        "h" | "hr" | "hrs" | "hour" | "hours" => Some(SECONDS_PER_HOUR),
        "m" | "min" | "mins" | "minute" | "minutes" => Some(SECONDS_PER_MINUTE),
        "s" | "sec" | "secs" | "second" | "seconds" => Some(1.0),
        "d" | "day" | "days" => Some(SECONDS_PER_DAY),
        _ => None,
    }
}

#[derive(Debug, PartialEq)]
enum Token {
    Number(String),
    Word(String),
}

fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current: Option<Token> = None;

    for c in input.chars() {
        let numeric = c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '/');
        current = match (current.take(), numeric, c.is_alphabetic()) {
            (Some(Token::Number(mut n)), true, _) => {
                n.push(c);
                Some(Token::Number(n))
            }
            (Some(Token::Word(mut w)), _, true) => {
                w.push(c);
                Some(Token::Word(w))
            }
            (previous, numeric, alphabetic) => {
                tokens.extend(previous);
                if numeric {
                    Some(Token::Number(c.to_string()))
                } else if alphabetic {
                    Some(Token::Word(c.to_string()))
                } else {
                    None
                }
            }
        };
    }
    tokens.extend(current);
    tokens
}

/// Numeric value of one component: ranges take the lower bound, `a/b` is a
/// fraction, bad input is 0
fn component(raw: &str) -> f64 {
    if raw.starts_with('-') {
        return 0.0;
    }
    let lower_bound = raw.split('-').next().unwrap_or_default().replace(',', ".");
    let value = match lower_bound.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: f64 = numerator.parse().unwrap_or(0.0);
            let denominator: f64 = denominator.parse().unwrap_or(0.0);
            if denominator > 0.0 {
                numerator / denominator
            } else {
                0.0
            }
        }
        None => lower_bound.parse().unwrap_or(0.0),
    };
    clamp(value)
}

fn clamp(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn from_seconds(seconds: f64) -> HoursMinutes {
    let minutes = (clamp(seconds) / SECONDS_PER_MINUTE).round();
    // saturating float-to-int conversion
    HoursMinutes::from_minutes(minutes as u64)
}
