// Numeric fields reach the backend from HTML forms and come back either as
// JSON numbers or as strings. These deserializers accept both.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `Option<f64>` from a number, numeric string, `null`, or empty string.
pub(crate) fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().and_then(to_f64))
}

/// `f64` defaulting to zero when absent or unparseable.
pub(crate) fn f64_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    opt_f64(d).map(Option::unwrap_or_default)
}

/// `u64` defaulting to zero when absent or unparseable.
pub(crate) fn u64_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::opt_f64")]
        rate: Option<f64>,
        #[serde(default, deserialize_with = "super::u64_or_zero")]
        count: u64,
    }

    #[test]
    fn accepts_numbers_and_strings() {
        let p: Probe = serde_json::from_value(json!({ "rate": "12.5", "count": "3" })).unwrap();
        assert_eq!(p.rate, Some(12.5));
        assert_eq!(p.count, 3);

        let p: Probe = serde_json::from_value(json!({ "rate": 10, "count": 7 })).unwrap();
        assert_eq!(p.rate, Some(10.0));
        assert_eq!(p.count, 7);
    }

    #[test]
    fn blanks_become_none_or_zero() {
        let p: Probe = serde_json::from_value(json!({ "rate": "", "count": null })).unwrap();
        assert_eq!(p.rate, None);
        assert_eq!(p.count, 0);

        let p: Probe = serde_json::from_value(json!({})).unwrap();
        assert_eq!(p.rate, None);
        assert_eq!(p.count, 0);
    }
}
