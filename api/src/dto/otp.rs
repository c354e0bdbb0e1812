use serde::{Deserialize, Serialize};

/// A JSON field that clients send either as a string or as a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    /// Text form of the value, or `None` when it counts as missing
    ///
    /// Empty or whitespace-only strings and the number zero are missing.
    /// Whole numbers are rendered without a fraction, so `4821.0` reads as `4821`.
    pub fn into_text(self) -> Option<String> {
        match self {
            TextOrNumber::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            TextOrNumber::Number(number) => {
                let is_zero = number.as_f64().map_or(false, |n| n == 0.0);
                (!is_zero).then(|| render_number(&number))
            }
        }
    }
}

fn render_number(number: &serde_json::Number) -> String {
    if number.is_f64() {
        if let Some(n) = number.as_f64() {
            if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                return (n as i64).to_string();
            }
        }
    }
    number.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestOtpRequest {
    /// Destination phone number, passed to the SMS provider as given
    #[serde(default)]
    pub phone: Option<TextOrNumber>,
}

impl RequestOtpRequest {
    pub fn phone(&self) -> Option<String> {
        self.phone.clone().and_then(TextOrNumber::into_text)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub phone: Option<TextOrNumber>,

    /// Submitted passcode, e.g. `"4821"` or `4821`
    #[serde(default)]
    pub otp: Option<TextOrNumber>,
}

impl VerifyOtpRequest {
    /// Both fields, or `None` if either is missing
    pub fn credentials(&self) -> Option<(String, String)> {
        let phone = self.phone.clone().and_then(TextOrNumber::into_text)?;
        let otp = self.otp.clone().and_then(TextOrNumber::into_text)?;
        Some((phone, otp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_as_string_or_number() {
        let as_string: VerifyOtpRequest =
            serde_json::from_str(r#"{"phone": "9876543210", "otp": "4821"}"#).unwrap();
        let as_number: VerifyOtpRequest =
            serde_json::from_str(r#"{"phone": "9876543210", "otp": 4821}"#).unwrap();

        assert_eq!(
            as_string.credentials(),
            Some(("9876543210".to_string(), "4821".to_string()))
        );
        assert_eq!(as_string.credentials(), as_number.credentials());
    }

    #[test]
    fn test_whole_float_otp_reads_as_integer() {
        let request: VerifyOtpRequest =
            serde_json::from_str(r#"{"phone": 9876543210.0, "otp": 4821.0}"#).unwrap();
        assert_eq!(
            request.credentials(),
            Some(("9876543210".to_string(), "4821".to_string()))
        );

        let fractional: VerifyOtpRequest =
            serde_json::from_str(r#"{"phone": "9876543210", "otp": 4821.5}"#).unwrap();
        assert_eq!(
            fractional.credentials(),
            Some(("9876543210".to_string(), "4821.5".to_string()))
        );
    }

    #[test]
    fn test_missing_fields() {
        let cases = [
            r#"{}"#,
            r#"{"phone": "9876543210"}"#,
            r#"{"otp": "4821"}"#,
            r#"{"phone": "", "otp": "4821"}"#,
            r#"{"phone": "9876543210", "otp": null}"#,
            r#"{"phone": "9876543210", "otp": 0}"#,
            r#"{"phone": "9876543210", "otp": "   "}"#,
        ];
        for case in cases {
            let request: VerifyOtpRequest = serde_json::from_str(case).unwrap();
            assert!(request.credentials().is_none(), "{}", case);
        }
    }

    #[test]
    fn test_numeric_phone() {
        let request: RequestOtpRequest =
            serde_json::from_str(r#"{"phone": 9876543210}"#).unwrap();
        assert_eq!(request.phone(), Some("9876543210".to_string()));
    }

    #[test]
    fn test_unsupported_type_is_rejected() {
        assert!(serde_json::from_str::<RequestOtpRequest>(r#"{"phone": true}"#).is_err());
    }
}
