//! Lightweight HTML signal extraction.
//!
//! Not a parser: a handful of precompiled patterns that pull the title, meta
//! tags, operational keywords and follower counts out of a fetched page.

use once_cell::sync::Lazy;
use regex::Regex;

static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title regex"));

static META_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("meta regex"));

// Matches name="value", name='value'
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)([a-z][a-z0-9:_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("attribute regex")
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

// Matches "1,234 followers", "1.2K Followers", "3m followers"
static FOLLOWERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d[\d,]*(?:\.\d+)?)\s*([kmb])?\s+followers\b").expect("followers regex")
});

/// An operational capability advertised on a business's website.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperationalSignal {
    OnlineBooking,
    OnlinePayments,
    ClientPortal,
    ContactForm,
    LiveChat,
}

impl OperationalSignal {
    pub const ALL: [OperationalSignal; 5] = [
        OperationalSignal::OnlineBooking,
        OperationalSignal::OnlinePayments,
        OperationalSignal::ClientPortal,
        OperationalSignal::ContactForm,
        OperationalSignal::LiveChat,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OperationalSignal::OnlineBooking => "online booking",
            OperationalSignal::OnlinePayments => "online payments",
            OperationalSignal::ClientPortal => "client portal",
            OperationalSignal::ContactForm => "contact form",
            OperationalSignal::LiveChat => "live chat",
        }
    }

    fn pattern(&self) -> &'static Regex {
        static BOOKING: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)book (?:now|online|an appointment)|schedule (?:online|an appointment)|calendly|acuityscheduling|squareup\.com/appointments")
                .expect("booking regex")
        });
        static PAYMENTS: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)pay (?:online|your invoice|now)|js\.stripe\.com|paypal\.com|checkout")
                .expect("payments regex")
        });
        static PORTAL: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)client (?:portal|login)|customer (?:portal|login)|my account")
                .expect("portal regex")
        });
        static CONTACT: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r#"(?is)<form\b[^>]*>.*?(?:type="email"|name="message"|contact)"#)
                .expect("contact regex")
        });
        static CHAT: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)intercom|drift\.com|tawk\.to|livechat|zendesk|crisp\.chat")
                .expect("chat regex")
        });

        match self {
            OperationalSignal::OnlineBooking => &*BOOKING,
            OperationalSignal::OnlinePayments => &*PAYMENTS,
            OperationalSignal::ClientPortal => &*PORTAL,
            OperationalSignal::ContactForm => &*CONTACT,
            OperationalSignal::LiveChat => &*CHAT,
        }
    }
}

/// Text of the first `<title>` element, cleaned up.
pub fn extract_title(html: &str) -> Option<String> {
    TITLE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| clean_text(m.as_str()))
        .filter(|title| !title.is_empty())
}

/// Content of the first `<meta>` tag whose `name` or `property` equals `key`.
pub fn extract_meta(html: &str, key: &str) -> Option<String> {
    META_TAG.find_iter(html).find_map(|tag| {
        let mut matches_key = false;
        let mut content = None;

        for caps in ATTRIBUTE.captures_iter(tag.as_str()) {
            let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();

            if name.eq_ignore_ascii_case("name") || name.eq_ignore_ascii_case("property") {
                matches_key |= value.eq_ignore_ascii_case(key);
            } else if name.eq_ignore_ascii_case("content") {
                content = Some(value);
            }
        }

        content
            .filter(|_| matches_key)
            .map(clean_text)
            .filter(|text| !text.is_empty())
    })
}

/// Operational signals present on the page, in a stable order.
pub fn detect_signals(html: &str) -> Vec<OperationalSignal> {
    OperationalSignal::ALL
        .into_iter()
        .filter(|signal| signal.pattern().is_match(html))
        .collect()
}

/// Parses the first "N followers" figure, honoring K/M/B suffixes.
pub fn parse_follower_count(text: &str) -> Option<u64> {
    let caps = FOLLOWERS.captures(text)?;
    let number: f64 = caps.get(1)?.as_str().replace(',', "").parse().ok()?;
    let multiplier = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(suffix) if suffix == "k" => 1_000.0,
        Some(suffix) if suffix == "m" => 1_000_000.0,
        Some(suffix) if suffix == "b" => 1_000_000_000.0,
        _ => 1.0,
    };

    Some((number * multiplier).round() as u64)
}

/// Collapses whitespace and decodes the common named entities.
pub fn clean_text(raw: &str) -> String {
    let decoded = raw
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ");

    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}

/// Truncates to at most `max_chars` characters, appending an ellipsis.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
          <head>
            <title>
              Smith &amp; Sons   Plumbing
            </title>
            <meta charset="utf-8">
            <meta content="Family plumbers since 1982." name="description">
            <meta property='og:title' content='Smith Plumbing'>
          </head>
          <body>
            <a href="https://calendly.com/smith">Book online</a>
            <script src="https://js.stripe.com/v3"></script>
            <form action="/contact"><input type="email" name="from"></form>
          </body>
        </html>
    "#;

    #[test]
    fn extracts_and_cleans_title() {
        assert_eq!(extract_title(PAGE).as_deref(), Some("Smith & Sons Plumbing"));
    }

    #[test]
    fn missing_title_is_none() {
        assert_eq!(extract_title("<html><title>   </title></html>"), None);
        assert_eq!(extract_title("<p>no head</p>"), None);
    }

    #[test]
    fn extracts_meta_regardless_of_attribute_order() {
        assert_eq!(
            extract_meta(PAGE, "description").as_deref(),
            Some("Family plumbers since 1982.")
        );
        assert_eq!(extract_meta(PAGE, "og:title").as_deref(), Some("Smith Plumbing"));
        assert_eq!(extract_meta(PAGE, "og:description"), None);
    }

    #[test]
    fn detects_operational_signals() {
        let signals = detect_signals(PAGE);
        assert_eq!(
            signals,
            vec![
                OperationalSignal::OnlineBooking,
                OperationalSignal::OnlinePayments,
                OperationalSignal::ContactForm,
            ]
        );
    }

    #[test]
    fn plain_page_has_no_signals() {
        assert!(detect_signals("<html><body>Call us today</body></html>").is_empty());
    }

    #[test]
    fn parses_follower_counts() {
        assert_eq!(parse_follower_count("1.2K Followers, 300 Following"), Some(1_200));
        assert_eq!(parse_follower_count("12,345 followers"), Some(12_345));
        assert_eq!(parse_follower_count("3m followers"), Some(3_000_000));
        assert_eq!(parse_follower_count("87 Followers"), Some(87));
        assert_eq!(parse_follower_count("no audience yet"), None);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééé", 3), "éé…");
    }
}
