//! "Do not track" signal normalization.

use crate::host::PrivacySignals;
use serde_json::Value;

/// True only for the exact encodings `1`, `true`, `"1"` and `"yes"`.
pub fn is_truthy_signal(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64() == Some(1.0),
        Value::String(text) => text == "1" || text == "yes",
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

/// Use the first defined source (standard, vendor-prefixed, global) and
/// normalize it. A defined `false` in an earlier source still wins.
pub fn resolve_do_not_track(signals: &dyn PrivacySignals) -> bool {
    signals
        .standard()
        .or_else(|| signals.vendor_prefixed())
        .or_else(|| signals.global())
        .map(|value| is_truthy_signal(&value))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::StaticPrivacySignals;
    use serde_json::json;

    #[test]
    fn truthy_encodings() {
        for value in [json!(1), json!(1.0), json!(true), json!("1"), json!("yes")] {
            assert!(is_truthy_signal(&value), "{value} should be truthy");
        }
    }

    #[test]
    fn everything_else_is_false() {
        for value in [
            json!(0),
            json!(2),
            json!(false),
            json!("0"),
            json!("no"),
            json!("YES"),
            json!("true"),
            json!("unspecified"),
            json!(null),
            json!([1]),
            json!({"value": 1}),
        ] {
            assert!(!is_truthy_signal(&value), "{value} should be false");
        }
    }

    #[test]
    fn no_source_defined_is_false() {
        assert!(!resolve_do_not_track(&StaticPrivacySignals::default()));
    }

    #[test]
    fn standard_source_wins_even_when_false() {
        let signals = StaticPrivacySignals {
            standard: Some(json!(false)),
            vendor_prefixed: Some(json!("1")),
            global: Some(json!("yes")),
        };
        assert!(!resolve_do_not_track(&signals));
    }

    #[test]
    fn falls_through_undefined_sources_in_order() {
        let vendor = StaticPrivacySignals {
            standard: None,
            vendor_prefixed: Some(json!("1")),
            global: Some(json!("0")),
        };
        assert!(resolve_do_not_track(&vendor));

        let global = StaticPrivacySignals {
            standard: None,
            vendor_prefixed: None,
            global: Some(json!("yes")),
        };
        assert!(resolve_do_not_track(&global));
    }

    #[test]
    fn null_counts_as_defined() {
        let signals = StaticPrivacySignals {
            standard: Some(json!(null)),
            vendor_prefixed: Some(json!(1)),
            global: None,
        };
        assert!(!resolve_do_not_track(&signals));
    }
}
