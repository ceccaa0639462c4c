use crate::i18n::Language;

/// All localized strings the script writes into the page itself.
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    /// Label shown on the submit button while a message is in flight
    pub sending: &'static str,

    /// Status/alert text after the relay accepted the message
    pub send_success: &'static str,

    /// Status/alert text after the relay failed
    pub send_failure: &'static str,

    /// `aria-label` of the mobile menu toggle
    pub menu_toggle_label: &'static str,
}

impl LanguageStrings {
    /// Strings for `language`, falling back to English.
    pub fn for_language(language: Language) -> &'static LanguageStrings {
        match language.code() {
            "hi" => &HINDI_STRINGS,
            _ => &ENGLISH_STRINGS,
        }
    }
}

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    sending: "Sending...",
    send_success: "Message sent successfully!",
    send_failure: "Failed to send message. Please try again later.",
    menu_toggle_label: "Toggle navigation menu",
};

// ==================== Hindi Strings ====================

pub const HINDI_STRINGS: LanguageStrings = LanguageStrings {
    sending: "भेज रहे हैं...",
    send_success: "संदेश सफलतापूर्वक भेजा गया!",
    send_failure: "संदेश भेजने में विफल। कृपया बाद में पुनः प्रयास करें।",
    menu_toggle_label: "नेविगेशन मेनू खोलें या बंद करें",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_language_selects_table() {
        assert_eq!(
            LanguageStrings::for_language(Language::ENGLISH).send_success,
            "Message sent successfully!"
        );
        assert_eq!(
            LanguageStrings::for_language(Language::HINDI).sending,
            "भेज रहे हैं..."
        );
    }

    #[test]
    fn test_no_string_is_empty() {
        for strings in [&ENGLISH_STRINGS, &HINDI_STRINGS] {
            assert!(!strings.sending.is_empty());
            assert!(!strings.send_success.is_empty());
            assert!(!strings.send_failure.is_empty());
            assert!(!strings.menu_toggle_label.is_empty());
        }
    }

    #[test]
    fn test_success_and_failure_differ() {
        assert_ne!(ENGLISH_STRINGS.send_success, ENGLISH_STRINGS.send_failure);
        assert_ne!(HINDI_STRINGS.send_success, HINDI_STRINGS.send_failure);
    }

    #[test]
    fn test_tables_are_translated() {
        assert_ne!(ENGLISH_STRINGS.sending, HINDI_STRINGS.sending);
        assert_ne!(ENGLISH_STRINGS.send_success, HINDI_STRINGS.send_success);
        assert_ne!(ENGLISH_STRINGS.send_failure, HINDI_STRINGS.send_failure);
        assert_ne!(ENGLISH_STRINGS.menu_toggle_label, HINDI_STRINGS.menu_toggle_label);
    }
}
