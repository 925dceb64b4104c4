//! 宽松的反序列化辅助函数
//!
//! 后端在不同接口里会把同一个字段编码成字符串或数字（例如 DECIMAL 价格、自增 ID），
//! 这里统一把它们收敛到客户端使用的类型。

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

/// 接受字符串或数字形式的标识符，`null` 视为空字符串
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Text(s)) => s,
        Some(Scalar::Integer(n)) => n.to_string(),
        Some(Scalar::Float(f)) => f.to_string(),
        Some(Scalar::Flag(b)) => b.to_string(),
        None => String::new(),
    })
}

/// 接受数字或数字字符串形式的金额
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Text(s)) => s.trim().parse().unwrap_or_default(),
        Some(Scalar::Integer(n)) => n as f64,
        Some(Scalar::Float(f)) => f,
        Some(Scalar::Flag(_)) | None => 0.0,
    })
}

/// 金额的可选形式，缺失 / null / 无法解析时为 `None`
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Text(s)) => s.trim().parse().ok(),
        Some(Scalar::Integer(n)) => Some(n as f64),
        Some(Scalar::Float(f)) => Some(f),
        _ => None,
    })
}

/// 接受数字或数字字符串形式的数量，负数归零
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Text(s)) => s.trim().parse().unwrap_or_default(),
        Some(Scalar::Integer(n)) => u32::try_from(n.max(0)).unwrap_or(u32::MAX),
        Some(Scalar::Float(f)) if f > 0.0 => f as u32,
        _ => 0,
    })
}

/// 把数量的可选形式（缺失 / null / 数字 / 字符串）解析为 `Option<u32>`
pub fn lenient_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Text(s)) => s.trim().parse().ok(),
        Some(Scalar::Integer(n)) => u32::try_from(n).ok(),
        Some(Scalar::Float(f)) if f >= 0.0 => Some(f as u32),
        _ => None,
    })
}

/// 解析后端返回的时间戳
///
/// 依次尝试 RFC 3339、毫秒时间戳以及不带时区的 `YYYY-MM-DD HH:MM:SS`（按 UTC 处理）。
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis);
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "lenient_f64")]
        price: f64,
        #[serde(default, deserialize_with = "lenient_u32")]
        quantity: u32,
    }

    #[test]
    fn accepts_numbers_and_strings() {
        let sample: Sample =
            serde_json::from_str(r#"{"id": 42, "price": "499.50", "quantity": "3"}"#).unwrap();
        assert_eq!(sample.id, "42");
        assert_eq!(sample.price, 499.5);
        assert_eq!(sample.quantity, 3);

        let sample: Sample = serde_json::from_str(r#"{"id": null, "quantity": -2}"#).unwrap();
        assert_eq!(sample.id, "");
        assert_eq!(sample.price, 0.0);
        assert_eq!(sample.quantity, 0);
    }

    #[test]
    fn parses_common_timestamp_shapes() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-05-01T10:30:00.000Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T12:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01 10:30:00"), Some(expected));
        assert_eq!(
            parse_timestamp(&expected.timestamp_millis().to_string()),
            Some(expected)
        );
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
