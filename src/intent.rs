// src/intent.rs
// Keyword intent classification for inbound mentions

/// What the user seems to want from the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageIntent {
    /// Asking how many codes remain or have been given out
    CountInquiry,
    /// Playing for a discount code
    CodeRequest,
    /// Anything else, handled as plain conversation
    General,
}

/// Phrases that read as an inventory status question. Checked before the
/// request keywords so "how many codes are left" is a status question, not
/// a request for one.
const COUNT_INQUIRY_PHRASES: &[&str] = &[
    "how many codes",
    "how many discount",
    "how many coupons",
    "how many are left",
    "how many left",
    "codes left",
    "codes are left",
    "codes remaining",
    "codes do you have",
    "code count",
    "code inventory",
    "inventory status",
];

/// Words that make a message a play for a code
const CODE_REQUEST_KEYWORDS: &[&str] = &["code", "discount", "coupon", "promo", "voucher"];

pub fn classify(text: &str) -> MessageIntent {
    let lowered = text.to_lowercase();
    if COUNT_INQUIRY_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
    {
        return MessageIntent::CountInquiry;
    }
    if CODE_REQUEST_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
    {
        return MessageIntent::CodeRequest;
    }
    MessageIntent::General
}
