// pwnmlrs/src/value.rs

//! Scalar values that can appear on the right-hand side of a namelist assignment.

use crate::error::{NmlError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar namelist value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FortranValue {
    /// Integer value
    Integer(i64),

    /// Real (floating-point) value
    Real(f64),

    /// Logical (boolean) value
    Logical(bool),

    /// Character string
    Character(String),
}

/// Formatting options for value output.
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// Use `.TRUE.`/`.FALSE.` instead of lowercase logicals
    pub uppercase: bool,
    /// Fixed number of digits after the decimal point for reals
    pub float_precision: Option<usize>,
    /// Use `d` as the exponent marker for reals
    pub use_fortran_double: bool,
}

impl FortranValue {
    pub fn character<S: Into<String>>(value: S) -> Self {
        FortranValue::Character(value.into())
    }

    /// Get the type name as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            FortranValue::Integer(_) => "integer",
            FortranValue::Real(_) => "real",
            FortranValue::Logical(_) => "logical",
            FortranValue::Character(_) => "character",
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FortranValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Reals and integers both read as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FortranValue::Real(f) => Some(*f),
            FortranValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FortranValue::Logical(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FortranValue::Character(s) => Some(s),
            _ => None,
        }
    }

    /// Format this value as it appears in a namelist.
    pub fn to_fortran_string(&self) -> String {
        self.to_fortran_string_with_options(&FormatOptions::default())
    }

    pub fn to_fortran_string_with_options(&self, options: &FormatOptions) -> String {
        match self {
            FortranValue::Integer(i) => i.to_string(),
            FortranValue::Real(f) => format_real(*f, options),
            FortranValue::Logical(b) => {
                let base = if *b { ".true." } else { ".false." };
                if options.uppercase {
                    base.to_uppercase()
                } else {
                    base.to_string()
                }
            }
            FortranValue::Character(s) => format!("'{}'", s.replace('\'', "''")),
        }
    }
}

fn format_real(value: f64, options: &FormatOptions) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "+inf" } else { "-inf" }.to_string();
    }
    if value.is_nan() {
        return "nan".to_string();
    }

    let abs_val = value.abs();
    let exponential = abs_val != 0.0 && !(1e-4..1e16).contains(&abs_val);
    let s = match (exponential, options.float_precision) {
        (true, Some(precision)) => format!("{:.precision$e}", value, precision = precision),
        (true, None) => format!("{:e}", value),
        (false, Some(precision)) => {
            let s = format!("{:.precision$}", value, precision = precision);
            if s.contains('.') {
                s
            } else {
                format!("{}.", s)
            }
        }
        (false, None) => {
            // a real always carries a '.' so it reads back as a real
            let s = value.to_string();
            if s.contains('.') {
                s
            } else {
                format!("{}.0", s)
            }
        }
    };
    if options.use_fortran_double && s.contains('e') {
        s.replace('e', "d")
    } else {
        s
    }
}

impl fmt::Display for FortranValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fortran_string())
    }
}

impl From<i64> for FortranValue {
    fn from(value: i64) -> Self {
        FortranValue::Integer(value)
    }
}

impl From<i32> for FortranValue {
    fn from(value: i32) -> Self {
        FortranValue::Integer(value as i64)
    }
}

impl From<usize> for FortranValue {
    fn from(value: usize) -> Self {
        FortranValue::Integer(value as i64)
    }
}

impl From<f64> for FortranValue {
    fn from(value: f64) -> Self {
        FortranValue::Real(value)
    }
}

impl From<bool> for FortranValue {
    fn from(value: bool) -> Self {
        FortranValue::Logical(value)
    }
}

impl From<&str> for FortranValue {
    fn from(value: &str) -> Self {
        FortranValue::Character(value.to_string())
    }
}

impl From<String> for FortranValue {
    fn from(value: String) -> Self {
        FortranValue::Character(value)
    }
}

/// Parse an integer literal, ignoring a trailing kind specifier.
pub fn parse_integer(value: &str) -> Result<FortranValue> {
    let clean = value.split('_').next().unwrap_or(value);
    clean
        .parse::<i64>()
        .map(FortranValue::Integer)
        .map_err(|_| NmlError::invalid_value(value, "integer"))
}

/// Parse a real literal. Accepts `d`/`D` exponent markers and kind specifiers.
pub fn parse_real(value: &str) -> Result<FortranValue> {
    let clean = value.split('_').next().unwrap_or(value);
    let normalized = clean.replace(['d', 'D'], "e");

    match normalized.to_lowercase().as_str() {
        "+inf" | "inf" | "+infinity" | "infinity" => return Ok(FortranValue::Real(f64::INFINITY)),
        "-inf" | "-infinity" => return Ok(FortranValue::Real(f64::NEG_INFINITY)),
        "nan" | "+nan" | "-nan" => return Ok(FortranValue::Real(f64::NAN)),
        _ => {}
    }

    normalized
        .parse::<f64>()
        .map(FortranValue::Real)
        .map_err(|_| NmlError::invalid_value(value, "real"))
}

/// Parse a dotted logical literal such as `.true.` or `.F.`.
pub fn parse_logical(value: &str) -> Result<FortranValue> {
    let lower = value.trim().to_lowercase();
    let inner = lower.trim_start_matches('.');
    if inner.starts_with('t') {
        Ok(FortranValue::Logical(true))
    } else if inner.starts_with('f') {
        Ok(FortranValue::Logical(false))
    } else {
        Err(NmlError::invalid_value(value, "logical"))
    }
}

/// Strip the delimiters from a quoted literal and undo doubled-quote escaping.
pub fn unquote(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(q @ ('\'' | '"')) => {
            let inner = value[1..].strip_suffix(q).unwrap_or(&value[1..]);
            let doubled: String = [q, q].iter().collect();
            inner.replace(&doubled, &q.to_string())
        }
        _ => value.to_string(),
    }
}
