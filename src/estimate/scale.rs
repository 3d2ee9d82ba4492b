use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// "30 billion" -> "30 * 1e9", largest scale first
    static ref WORD_MULTIPLIERS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)(\d+(?:\.\d+)?)\s+trillion").unwrap(), "${1} * 1e12"),
        (Regex::new(r"(?i)(\d+(?:\.\d+)?)\s+billion").unwrap(), "${1} * 1e9"),
        (Regex::new(r"(?i)(\d+(?:\.\d+)?)\s+million").unwrap(), "${1} * 1e6"),
        (Regex::new(r"(?i)(\d+(?:\.\d+)?)\s+thousand").unwrap(), "${1} * 1e3"),
    ];

    /// "20K" -> "20e3", "30B" -> "30e9"
    /// The regex crate has no lookahead, so a letter right after the suffix
    /// ("MB", "Bytes") is rejected in `replace_suffix` instead.
    static ref SUFFIX_MULTIPLIERS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(\d+(?:\.\d+)?)\s*T").unwrap(), "e12"),
        (Regex::new(r"(\d+(?:\.\d+)?)\s*B").unwrap(), "e9"),
        (Regex::new(r"(\d+(?:\.\d+)?)\s*M").unwrap(), "e6"),
        (Regex::new(r"(\d+(?:\.\d+)?)\s*K").unwrap(), "e3"),
    ];
}

/// Replace human multiplier words and letter suffixes with exponent literals
pub fn preprocess_scale(expr: &str) -> String {
    let mut s = expr.trim().to_string();
    for (pattern, replacement) in WORD_MULTIPLIERS.iter() {
        s = pattern.replace_all(&s, *replacement).into_owned();
    }
    for (pattern, exponent) in SUFFIX_MULTIPLIERS.iter() {
        s = replace_suffix(pattern, exponent, &s);
    }
    log::trace!("scaled {:?} -> {:?}", expr, s);
    s
}

fn replace_suffix(pattern: &Regex, exponent: &str, s: &str) -> String {
    pattern
        .replace_all(s, |caps: &Captures| {
            let whole = &caps[0];
            let end = caps.get(0).map_or(s.len(), |m| m.end());
            let followed_by_letter = s[end..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic());
            if followed_by_letter {
                whole.to_string()
            } else {
                format!("{}{}", &caps[1], exponent)
            }
        })
        .into_owned()
}
