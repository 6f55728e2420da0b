//! Human-readable rendering of raw metric values by declared unit.
//!
//! Each unit class converts integers and floats separately; the two paths
//! differ in the precision of their smallest tier and that difference is part
//! of the output format.

use crate::error::{DebugReadError, Result};

use super::MetricValue;

const KB: f64 = 1024.0;
const MB: f64 = 1024.0 * KB;
const GB: f64 = 1024.0 * MB;
const TB: f64 = 1024.0 * GB;

const NS_IN_MS: f64 = 1e6;
const NS_IN_SECOND: f64 = 1e9;
const NS_IN_HOUR: f64 = 3.6e12;
const MS_IN_SECOND: f64 = 1e3;
const MS_IN_HOUR: f64 = 3.6e6;
const SECONDS_IN_HOUR: f64 = 3600.0;

/// Conversion strategy selected from a telemetry unit string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Nanoseconds,
    Milliseconds,
    Seconds,
    Hours,
    Bytes,
    Percentage,
    Raw,
}

impl Unit {
    /// Classify a unit string. Duration units match exactly; byte and
    /// percentage units match on substring.
    pub fn classify(unit: &str) -> Self {
        match unit {
            "ns" => Unit::Nanoseconds,
            "ms" => Unit::Milliseconds,
            "seconds" => Unit::Seconds,
            "hours" => Unit::Hours,
            u if u.contains("bytes") => Unit::Bytes,
            u if u.contains("percentage") => Unit::Percentage,
            _ => Unit::Raw,
        }
    }

    /// Render `value` in this unit.
    ///
    /// Every unit, [`Unit::Raw`] included, rejects non-numeric input with
    /// [`DebugReadError::UnsupportedValueType`].
    pub fn convert(self, value: &MetricValue) -> Result<String> {
        let float = value
            .as_f64()
            .ok_or_else(|| DebugReadError::UnsupportedValueType {
                type_name: value.type_name().to_string(),
            })?;
        Ok(match (self, value) {
            (Unit::Nanoseconds, MetricValue::Int(v)) => nanoseconds_int(*v),
            (Unit::Nanoseconds, _) => nanoseconds_float(float),
            (Unit::Milliseconds, _) => milliseconds(float),
            (Unit::Seconds, _) => seconds(float),
            (Unit::Hours, _) => format!("{float:.2}h"),
            (Unit::Bytes, MetricValue::Int(v)) => bytes_int(*v),
            (Unit::Bytes, _) => bytes_float(float),
            (Unit::Percentage, _) => format!("{:.2}%", float * 100.0),
            (Unit::Raw, _) => value.to_string(),
        })
    }
}

/// Render `value` according to the telemetry unit string `unit`.
pub fn format_value(value: &MetricValue, unit: &str) -> Result<String> {
    Unit::classify(unit).convert(value)
}

// ---------------------------------------------------------------------------
// Durations
// ---------------------------------------------------------------------------

fn nanoseconds_int(v: i64) -> String {
    let f = v as f64;
    if f >= NS_IN_HOUR {
        format!("{:.2}h", f / NS_IN_HOUR)
    } else if f >= NS_IN_SECOND {
        format!("{:.2}s", f / NS_IN_SECOND)
    } else if f >= NS_IN_MS {
        format!("{:.2}ms", f / NS_IN_MS)
    } else {
        format!("{v}ns")
    }
}

fn nanoseconds_float(v: f64) -> String {
    if v >= NS_IN_HOUR {
        format!("{:.2}h", v / NS_IN_HOUR)
    } else if v >= NS_IN_SECOND {
        format!("{:.2}s", v / NS_IN_SECOND)
    } else if v >= NS_IN_MS {
        format!("{:.4}ms", v / NS_IN_MS)
    } else {
        format!("{v:.4}ns")
    }
}

fn milliseconds(v: f64) -> String {
    if v >= MS_IN_HOUR {
        format!("{:.2}h", v / MS_IN_HOUR)
    } else if v >= MS_IN_SECOND {
        format!("{:.2}s", v / MS_IN_SECOND)
    } else {
        format!("{v:.4}ms")
    }
}

fn seconds(v: f64) -> String {
    if v >= SECONDS_IN_HOUR {
        format!("{:.2}h", v / SECONDS_IN_HOUR)
    } else {
        format!("{v:.2}s")
    }
}

// ---------------------------------------------------------------------------
// Bytes
// ---------------------------------------------------------------------------

/// Scale above 1 KB, or `None` when the value stays in plain bytes.
fn scaled_bytes(v: f64) -> Option<String> {
    let (div, suffix) = if v >= TB {
        (TB, "TB")
    } else if v >= GB {
        (GB, "GB")
    } else if v >= MB {
        (MB, "MB")
    } else if v >= KB {
        (KB, "KB")
    } else {
        return None;
    };
    Some(format!("{:.2} {suffix}", v / div))
}

fn bytes_int(v: i64) -> String {
    scaled_bytes(v as f64).unwrap_or_else(|| format!("{v} bytes"))
}

fn bytes_float(v: f64) -> String {
    scaled_bytes(v).unwrap_or_else(|| format!("{v:.4} bytes"))
}

// ---------------------------------------------------------------------------
// Go-compatible float text
// ---------------------------------------------------------------------------

/// Shortest decimal representation of `v`, switching to exponent form when
/// the decimal exponent is below -4 or at least 6, as Go's `%v` does:
/// `1e+06`, `123456`, `0.0001`, `1e-05`.
pub fn format_go_float(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let sci = format!("{v:e}");
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return sci,
    };
    if (-4..6).contains(&exp) {
        return format!("{v}");
    }
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> MetricValue {
        MetricValue::Int(v)
    }

    fn float(v: f64) -> MetricValue {
        MetricValue::Float(v)
    }

    // -----------------------------------------------------------------------
    // Unit classification
    // -----------------------------------------------------------------------

    #[test]
    fn classify_duration_units_exactly() {
        assert_eq!(Unit::classify("ns"), Unit::Nanoseconds);
        assert_eq!(Unit::classify("ms"), Unit::Milliseconds);
        assert_eq!(Unit::classify("seconds"), Unit::Seconds);
        assert_eq!(Unit::classify("hours"), Unit::Hours);
        assert_eq!(Unit::classify("ms "), Unit::Raw);
        assert_eq!(Unit::classify("nanoseconds"), Unit::Raw);
    }

    #[test]
    fn classify_substring_units() {
        assert_eq!(Unit::classify("bytes"), Unit::Bytes);
        assert_eq!(Unit::classify("number of bytes"), Unit::Bytes);
        assert_eq!(Unit::classify("percentage"), Unit::Percentage);
        assert_eq!(Unit::classify("percentage of heap"), Unit::Percentage);
        assert_eq!(Unit::classify("requests"), Unit::Raw);
        assert_eq!(Unit::classify("-"), Unit::Raw);
    }

    // -----------------------------------------------------------------------
    // Durations
    // -----------------------------------------------------------------------

    #[test]
    fn nanoseconds_int_tiers() {
        assert_eq!(format_value(&int(500), "ns").unwrap(), "500ns");
        assert_eq!(format_value(&int(2_500_000), "ns").unwrap(), "2.50ms");
        assert_eq!(format_value(&int(1_500_000_000), "ns").unwrap(), "1.50s");
        assert_eq!(format_value(&int(7_200_000_000_000), "ns").unwrap(), "2.00h");
    }

    #[test]
    fn nanoseconds_float_tiers() {
        assert_eq!(format_value(&float(1.5e9), "ns").unwrap(), "1.50s");
        assert_eq!(format_value(&float(2.5e6), "ns").unwrap(), "2.5000ms");
        assert_eq!(format_value(&float(500.0), "ns").unwrap(), "500.0000ns");
        assert_eq!(format_value(&float(3.6e12), "ns").unwrap(), "1.00h");
    }

    #[test]
    fn milliseconds_tiers() {
        assert_eq!(format_value(&int(250), "ms").unwrap(), "250.0000ms");
        assert_eq!(format_value(&float(12.5), "ms").unwrap(), "12.5000ms");
        assert_eq!(format_value(&int(1500), "ms").unwrap(), "1.50s");
        assert_eq!(format_value(&float(5_400_000.0), "ms").unwrap(), "1.50h");
    }

    #[test]
    fn seconds_and_hours() {
        assert_eq!(format_value(&int(30), "seconds").unwrap(), "30.00s");
        assert_eq!(format_value(&float(5400.0), "seconds").unwrap(), "1.50h");
        assert_eq!(format_value(&int(3), "hours").unwrap(), "3.00h");
        assert_eq!(format_value(&float(0.25), "hours").unwrap(), "0.25h");
    }

    // -----------------------------------------------------------------------
    // Bytes
    // -----------------------------------------------------------------------

    #[test]
    fn bytes_below_one_kb_differ_by_type() {
        assert_eq!(format_value(&int(512), "bytes").unwrap(), "512 bytes");
        assert_eq!(format_value(&float(512.0), "bytes").unwrap(), "512.0000 bytes");
    }

    #[test]
    fn bytes_tier_boundaries() {
        let tiers = ["KB", "MB", "GB", "TB"];
        for (k, suffix) in tiers.iter().enumerate() {
            let base = 1024_i64.pow(k as u32 + 1);
            assert_eq!(
                format_value(&int(base), "bytes").unwrap(),
                format!("1.00 {suffix}")
            );
            let below_next = base * 1024 - 1;
            let rendered = format_value(&int(below_next), "bytes").unwrap();
            if k < 3 {
                assert!(
                    rendered.ends_with(suffix),
                    "{below_next} rendered as {rendered}"
                );
            }
        }
        assert_eq!(format_value(&int(1023), "bytes").unwrap(), "1023 bytes");
        assert_eq!(format_value(&float(1536.0), "bytes").unwrap(), "1.50 KB");
        assert_eq!(
            format_value(&int(5 * 1024 * 1024 * 1024 * 1024 * 1024), "bytes").unwrap(),
            "5120.00 TB"
        );
    }

    // -----------------------------------------------------------------------
    // Percentage and raw
    // -----------------------------------------------------------------------

    #[test]
    fn percentage_scales_by_hundred() {
        assert_eq!(format_value(&float(0.4567), "percentage").unwrap(), "45.67%");
        assert_eq!(format_value(&int(1), "percentage").unwrap(), "100.00%");
    }

    #[test]
    fn raw_uses_compact_text() {
        assert_eq!(format_value(&int(42), "requests").unwrap(), "42");
        assert_eq!(format_value(&float(12345.0), "-").unwrap(), "12345");
        assert_eq!(format_value(&float(0.125), "-").unwrap(), "0.125");
    }

    #[test]
    fn unsupported_value_fails_for_every_unit() {
        let err = format_value(&MetricValue::Unsupported(serde_json::json!("x")), "-").unwrap_err();
        assert!(
            matches!(err, DebugReadError::UnsupportedValueType { ref type_name } if type_name == "string")
        );

        let value = MetricValue::Unsupported(serde_json::json!([1, 2]));
        for unit in ["ns", "ms", "seconds", "hours", "bytes", "percentage", "requests", "-"] {
            let err = format_value(&value, unit).unwrap_err();
            assert!(
                matches!(err, DebugReadError::UnsupportedValueType { ref type_name } if type_name == "array"),
                "unit {unit}: {err}"
            );
        }
    }

    // -----------------------------------------------------------------------
    // Go float text
    // -----------------------------------------------------------------------

    #[test]
    fn go_float_decimal_range() {
        assert_eq!(format_go_float(1.0), "1");
        assert_eq!(format_go_float(-2.5), "-2.5");
        assert_eq!(format_go_float(123456.0), "123456");
        assert_eq!(format_go_float(0.0001), "0.0001");
        assert_eq!(format_go_float(0.0), "0");
    }

    #[test]
    fn go_float_exponent_range() {
        assert_eq!(format_go_float(1e6), "1e+06");
        assert_eq!(format_go_float(1234567.0), "1.234567e+06");
        assert_eq!(format_go_float(0.00001), "1e-05");
        assert_eq!(format_go_float(-3.5e-7), "-3.5e-07");
        assert_eq!(format_go_float(1e100), "1e+100");
    }

    #[test]
    fn go_float_special_values() {
        assert_eq!(format_go_float(f64::NAN), "NaN");
        assert_eq!(format_go_float(f64::INFINITY), "+Inf");
        assert_eq!(format_go_float(f64::NEG_INFINITY), "-Inf");
    }
}
