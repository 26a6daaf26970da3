// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Language {
    #[default]
    Zh,
    En,
}

impl Language {
    /// Only `zh` is special-cased; every other code reads as English.
    pub fn from_code(code: &str) -> Self {
        if code == "zh" { Language::Zh } else { Language::En }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }

    /// Looks for a CJK Unified Ideograph (U+4E00..=U+9FA5) in `text`.
    pub fn detect(text: &str) -> Self {
        if text.chars().any(|c| ('\u{4e00}'..='\u{9fa5}').contains(&c)) {
            Language::Zh
        } else {
            Language::En
        }
    }

    /// Best-effort language lookup on a raw request body. Anything that does
    /// not parse falls back to `zh`.
    pub fn sniff(body: &[u8]) -> Self {
        serde_json::from_slice::<Value>(body)
            .ok()
            .as_ref()
            .and_then(|v| v.get("language"))
            .and_then(Value::as_str)
            .map(Language::from_code)
            .unwrap_or_default()
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Language::from_code(&code)
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    pub language: Option<Language>,
    #[serde(rename = "systemPrompt")]
    pub system_prompt: Option<String>,
}

impl ChatRequest {
    pub fn language(&self) -> Language {
        self.language.unwrap_or_default()
    }

    /// The message, if present and non-empty.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref().filter(|p| !p.is_empty())
    }
}

/// Outgoing payload from the client dispatcher.
#[derive(Debug, Serialize)]
pub struct OutgoingMessage<'a> {
    pub message: &'a str,
    pub language: Language,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

impl ChatReply {
    pub fn answer(reply: impl Into<String>, language: Language) -> Self {
        Self {
            reply: reply.into(),
            language,
            timestamp: Some(now_iso8601()),
            error: false,
        }
    }

    pub fn failure(reply: impl Into<String>, language: Language) -> Self {
        Self {
            reply: reply.into(),
            language,
            timestamp: None,
            error: true,
        }
    }
}

/// UTC timestamp in the `2024-01-01T00:00:00.000Z` form.
pub fn now_iso8601() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_cjk_ideographs() {
        assert_eq!(Language::detect("什么是token"), Language::Zh);
        assert_eq!(Language::detect("tell me about deepseek"), Language::En);
        // Hiragana sits outside the ideograph block.
        assert_eq!(Language::detect("こんにちは"), Language::En);
        assert_eq!(Language::detect(""), Language::En);
    }

    #[test]
    fn unknown_language_codes_read_as_english() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"message":"hi","language":"fr"}"#).unwrap();
        assert_eq!(req.language(), Language::En);

        let req: ChatRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(req.language(), Language::Zh);
    }

    #[test]
    fn empty_fields_count_as_absent() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"message":"","systemPrompt":""}"#).unwrap();
        assert!(req.message().is_none());
        assert!(req.system_prompt().is_none());
    }

    #[test]
    fn sniff_defaults_to_chinese() {
        assert_eq!(Language::sniff(br#"{"language":"en""#), Language::Zh);
        assert_eq!(Language::sniff(br#"{"message":5,"language":"en"}"#), Language::En);
        assert_eq!(Language::sniff(b""), Language::Zh);
    }

    #[test]
    fn reply_omits_unset_fields() {
        let json = serde_json::to_value(ChatReply::failure("x", Language::En)).unwrap();
        assert_eq!(json, serde_json::json!({"reply": "x", "language": "en", "error": true}));

        let json = serde_json::to_value(ChatReply::answer("y", Language::Zh)).unwrap();
        assert!(json.get("error").is_none());
        let ts = json["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
        assert!(ts.ends_with('Z'));
    }
}
