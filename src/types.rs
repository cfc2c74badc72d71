use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;

use crate::category::Category;

/// Inbound body for `POST /classify_receipt`. Both fields are required, but
/// they are modeled as options so absence is reported with the service's own
/// 400 body rather than the framework's deserialization error.
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub store_name: Option<String>,
    pub product_names: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub store_name: String,
    pub category: Category,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

pub const MISSING_FIELDS_ERROR: &str = "store_name과 product_names를 제공해야 합니다.";

/// JSON formatter that escapes every non-ASCII character as `\uXXXX`
/// (surrogate pairs for characters outside the BMP). Used when the service
/// is configured for ASCII-only response bodies.
pub struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

/// Serializes `value` either with serde_json's default UTF-8 output or with
/// non-ASCII characters escaped, per the service configuration.
pub fn encode_json<T: Serialize>(value: &T, ascii: bool) -> serde_json::Result<Vec<u8>> {
    if ascii {
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, AsciiFormatter);
        value.serialize(&mut serializer)?;
        Ok(out)
    } else {
        serde_json::to_vec(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_output_is_unescaped_by_default() {
        let response = ClassifyResponse {
            store_name: "스타벅스".to_string(),
            category: Category::Food,
        };
        let body = String::from_utf8(encode_json(&response, false).unwrap()).unwrap();
        assert!(body.contains("스타벅스"));
        assert!(body.contains("식비"));
    }

    #[test]
    fn ascii_mode_escapes_korean_text() {
        let response = ClassifyResponse {
            store_name: "가".to_string(),
            category: Category::Other,
        };
        let body = String::from_utf8(encode_json(&response, true).unwrap()).unwrap();
        // U+AC00 and 기타 (U+AE30 U+D0C0)
        assert!(body.contains("\\uac00"));
        assert!(body.contains("\\uae30\\ud0c0"));
        assert!(body.is_ascii());
    }

    #[test]
    fn ascii_mode_emits_surrogate_pairs() {
        let body = String::from_utf8(encode_json(&"🧾", true).unwrap()).unwrap();
        assert_eq!(body, "\"\\ud83e\\uddfe\"");
    }

    #[test]
    fn missing_fields_are_none_not_a_decode_error() {
        let request: ClassifyRequest = serde_json::from_str(r#"{"store_name":"가게"}"#).unwrap();
        assert!(request.store_name.is_some());
        assert!(request.product_names.is_none());
    }
}
