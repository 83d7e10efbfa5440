//! Localized messages for terminal error reporting
//!
//! The HBnB product ships Arabic-first with an English fallback. Only the
//! strings the client itself surfaces live here; page-level copy belongs to
//! the calling layer.

use serde::{Deserialize, Serialize};

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// Arabic (product default)
    Ar,
    /// English
    En,
}

impl Default for Lang {
    fn default() -> Self {
        Self::Ar
    }
}

impl Lang {
    /// Parse a language code, falling back to the product default
    #[must_use]
    pub fn parse(code: &str) -> Self {
        match code.to_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Self::En,
            _ => Self::Ar,
        }
    }

    /// Two-letter language code sent as the `lang` query parameter
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
        }
    }

    /// Message shown when the stored session is no longer valid
    #[must_use]
    pub fn session_expired(self) -> &'static str {
        match self {
            Self::Ar => "انتهت صلاحية الجلسة",
            Self::En => "Session expired",
        }
    }

    /// Message shown when every attempt of a request timed out
    #[must_use]
    pub fn connection_timeout(self) -> &'static str {
        match self {
            Self::Ar => "انتهت مهلة الاتصال",
            Self::En => "Connection timed out",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_to_arabic() {
        assert_eq!(Lang::parse("ar"), Lang::Ar);
        assert_eq!(Lang::parse("fr"), Lang::Ar);
        assert_eq!(Lang::parse(""), Lang::Ar);
        assert_eq!(Lang::parse("EN"), Lang::En);
    }

    #[test]
    fn test_messages_differ_by_language() {
        assert_ne!(
            Lang::Ar.connection_timeout(),
            Lang::En.connection_timeout()
        );
        assert_eq!(Lang::En.session_expired(), "Session expired");
    }
}
