/// A single test against a holding's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Case-insensitive substring. Needles are written in upper case.
    Substring(&'static str),
    /// Case-insensitive whole word, words being runs of alphanumerics.
    Word(&'static str),
    /// One to five capital letters with an optional share class suffix, e.g. `AAPL` or `BRK.B`.
    Ticker
}

impl Matcher {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Matcher::Substring(needle) => text.to_uppercase().contains(needle),
            Matcher::Word(word) => text
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| token.eq_ignore_ascii_case(word)),
            Matcher::Ticker => is_ticker(text.trim())
        }
    }
}

/// Assigns `class` when any of its matchers fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicRule {
    pub class: &'static str,
    pub matchers: &'static [Matcher]
}

impl HeuristicRule {
    pub fn matches(&self, text: &str) -> bool {
        self.matchers.iter().any(|matcher| matcher.matches(text))
    }
}

/// Built-in classes for assets nobody mapped, in priority order.
///
/// Fixed income and cash keywords come before equity keywords so that e.g. a bond index
/// fund is not taken for a stock index fund. The ticker rule is the last resort.
pub const DEFAULT_HEURISTICS: &[HeuristicRule] = &[
    HeuristicRule {
        class: "Cash",
        matchers: &[
            Matcher::Substring("MONEY MARKET"),
            Matcher::Substring("MONEY MKT"),
            Matcher::Substring("SETTLEMENT FUND"),
            Matcher::Substring("SWEEP"),
            Matcher::Word("CASH")
        ]
    },
    HeuristicRule {
        class: "Treasury",
        matchers: &[
            Matcher::Substring("TREASURY"),
            Matcher::Substring("UNITED STATES TREAS"),
            Matcher::Substring("US TREAS"),
            Matcher::Substring("T-BILL"),
            Matcher::Word("TREAS"),
            Matcher::Word("NTS")
        ]
    },
    HeuristicRule {
        class: "CD",
        matchers: &[
            Matcher::Substring("CERTIFICATE OF DEPOSIT"),
            Matcher::Word("CD"),
            Matcher::Word("CDS")
        ]
    },
    HeuristicRule {
        class: "Municipal",
        matchers: &[
            Matcher::Substring("MUNICIPAL"),
            Matcher::Substring("TAX-EXEMPT"),
            Matcher::Substring("TAX EXEMPT"),
            Matcher::Word("MUNI")
        ]
    },
    HeuristicRule {
        class: "Bond",
        matchers: &[
            Matcher::Substring("BOND"),
            Matcher::Substring("FIXED INCOME"),
            Matcher::Substring("DEBENTURE"),
            Matcher::Word("CPN"),
            Matcher::Word("NOTE"),
            Matcher::Word("NOTES")
        ]
    },
    HeuristicRule {
        class: "Equity",
        matchers: &[
            Matcher::Substring("STOCK"),
            Matcher::Substring("EQUITY"),
            Matcher::Substring("INDEX"),
            Matcher::Substring("ETF"),
            Matcher::Substring("GROWTH"),
            Matcher::Word("SHARES"),
            Matcher::Word("INC"),
            Matcher::Word("CORP")
        ]
    },
    HeuristicRule {
        class: "Equity",
        matchers: &[Matcher::Ticker]
    }
];

fn is_ticker(text: &str) -> bool {
    let (base, suffix) = match text.split_once(['.', '/']) {
        Some((base, suffix)) => (base, Some(suffix)),
        None => (text, None)
    };

    let capitals = |part: &str, max: usize| {
        (1..=max).contains(&part.len()) && part.chars().all(|c| c.is_ascii_uppercase())
    };

    capitals(base, 5) && suffix.is_none_or(|suffix| capitals(suffix, 2))
}
