//! Answer grading for typed listening answers.
//!
//! # Template syntax
//! ```text
//! rain(-)wear           optional segment: "rain-wear", "rainwear"
//! this/that afternoon   bound alternatives: "this afternoon", "that afternoon"
//! trains / bus          independent alternatives: "trains", "bus"
//! ```
//! Malformed syntax (an unmatched parenthesis, a dangling slash) is kept as
//! literal text and later dropped by normalization.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Upper bound on the literal candidates one template may expand to.
pub const MAX_CANDIDATES: usize = 256;

/// Result of grading a typed answer against a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResult {
    /// Whether any expanded candidate matched.
    pub is_correct: bool,
    /// Normalized user answer (for display).
    pub user_normalized: String,
    /// The literal candidate that matched, if any.
    pub matched_candidate: Option<String>,
    /// All literal candidates the template expands to.
    pub candidates: Vec<String>,
}

/// Decide whether `user_answer` satisfies `template`.
pub fn check_answer(user_answer: &str, template: &str) -> bool {
    grade_answer(user_answer, template).is_correct
}

/// Grade `user_answer` against `template`, reporting which candidate matched.
pub fn grade_answer(user_answer: &str, template: &str) -> GradeResult {
    let user_normalized = normalize(user_answer);

    if user_answer.trim().is_empty() || template.trim().is_empty() || user_normalized.is_empty() {
        return GradeResult {
            is_correct: false,
            user_normalized,
            matched_candidate: None,
            candidates: Vec::new(),
        };
    }

    let user_compact = without_spaces(&user_normalized);
    let candidates = expand_template(template);

    let matched_candidate = candidates
        .iter()
        .find(|candidate| {
            let normalized = normalize(candidate);
            if normalized.is_empty() {
                return false;
            }
            let compact = without_spaces(&normalized);

            user_normalized == normalized
                || user_compact == normalized
                || user_normalized == compact
                || numeric_equal(&user_normalized, &normalized)
        })
        .cloned();

    GradeResult {
        is_correct: matched_candidate.is_some(),
        user_normalized,
        matched_candidate,
        candidates,
    }
}

/// Normalize an answer for comparison.
///
/// Lower-cases, strips diacritics, drops a leading `a)` / `1.` style label,
/// turns `point` into `.` and number words into digits, removes punctuation
/// other than `.` and collapses whitespace. Idempotent.
pub fn normalize(text: &str) -> String {
    let mut current = normalize_once(text);
    // After the first pass every change shortens the string, so this ends.
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let unlabeled = strip_label(folded.trim_start());

    let mapped = unlabeled
        .split_whitespace()
        .map(|token| {
            let word = token.trim_matches(|c: char| !c.is_alphanumeric());
            if word == "point" {
                "."
            } else {
                number_word(word).unwrap_or(token)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    mapped
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '.')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drop a leading one or two character label such as `a)`, `b.` or `12.`.
///
/// The marker must be followed by whitespace and more text, so decimals
/// like `1.5` and abbreviations like `u.k.` or `e.g.` are kept whole.
fn strip_label(s: &str) -> &str {
    let chars: Vec<(usize, char)> = s.char_indices().take(4).collect();

    for label_len in 1..=2 {
        let Some(&(marker_idx, marker)) = chars.get(label_len) else {
            break;
        };
        if !chars[..label_len].iter().all(|(_, c)| c.is_alphanumeric()) {
            break;
        }
        if marker != '.' && marker != ')' {
            continue;
        }
        let rest = &s[marker_idx + marker.len_utf8()..];
        if !rest.starts_with(char::is_whitespace) || rest.trim().is_empty() {
            return s;
        }
        return rest.trim_start();
    }

    s
}

fn number_word(word: &str) -> Option<&'static str> {
    let digits = match word {
        "zero" => "0",
        "one" => "1",
        "two" => "2",
        "three" => "3",
        "four" => "4",
        "five" => "5",
        "six" => "6",
        "seven" => "7",
        "eight" => "8",
        "nine" => "9",
        "ten" => "10",
        "eleven" => "11",
        "twelve" => "12",
        "thirteen" => "13",
        "fourteen" => "14",
        "fifteen" => "15",
        "sixteen" => "16",
        "seventeen" => "17",
        "eighteen" => "18",
        "nineteen" => "19",
        "twenty" => "20",
        "thirty" => "30",
        "forty" => "40",
        "fifty" => "50",
        "sixty" => "60",
        "seventy" => "70",
        "eighty" => "80",
        "ninety" => "90",
        "hundred" => "100",
        "thousand" => "1000",
        _ => return None,
    };
    Some(digits)
}

fn without_spaces(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn is_numeric(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c.is_whitespace())
}

fn numeric_equal(a: &str, b: &str) -> bool {
    if !is_numeric(a) || !is_numeric(b) {
        return false;
    }
    let digits = |s: &str| s.chars().filter(char::is_ascii_digit).collect::<String>();
    digits(a) == digits(b)
}

enum Rewrite {
    Expanded(Vec<String>),
    Literal(String),
}

/// Expand a template into its literal candidates.
///
/// Never returns an empty list: a template without syntax (or one whose
/// alternatives are all blank) yields itself.
pub fn expand_template(pattern: &str) -> Vec<String> {
    // Depth-first work list; alternatives are pushed in reverse so the first
    // alternative is expanded first.
    let mut work = vec![pattern.to_string()];
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    let mut budget = MAX_CANDIDATES * 64;

    while let Some(current) = work.pop() {
        if candidates.len() >= MAX_CANDIDATES || budget == 0 {
            break;
        }
        budget -= 1;
        match rewrite(&current) {
            Rewrite::Expanded(alternatives) => work.extend(alternatives.into_iter().rev()),
            Rewrite::Literal(literal) => {
                if !literal.is_empty() && seen.insert(literal.clone()) {
                    candidates.push(literal);
                }
            }
        }
    }

    if candidates.is_empty() {
        candidates.push(pattern.trim().to_string());
    }
    candidates
}

/// Apply one rewrite step. Every expansion removes at least one `(`, `)` or
/// `/`, and matched parentheses are resolved before slashes.
fn rewrite(s: &str) -> Rewrite {
    if let Some((open, close)) = innermost_group(s) {
        let prefix = &s[..open];
        let content = &s[open + 1..close];
        let suffix = &s[close + 1..];
        return Rewrite::Expanded(vec![
            format!("{prefix}{content}{suffix}"),
            format!("{prefix}{suffix}"),
        ]);
    }

    if let Some((start, end)) = bound_alternative(s) {
        let prefix = &s[..start];
        let suffix = &s[end..];
        let alternatives = s[start..end]
            .split('/')
            .filter(|part| !part.is_empty())
            .map(|part| format!("{prefix}{part}{suffix}"))
            .collect::<Vec<_>>();
        if alternatives.is_empty() {
            return Rewrite::Expanded(vec![format!("{prefix}{suffix}")]);
        }
        return Rewrite::Expanded(alternatives);
    }

    if s.contains('/') {
        return Rewrite::Expanded(
            s.split('/')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect(),
        );
    }

    Rewrite::Literal(s.trim().to_string())
}

/// Byte offsets of the first `)` that closes a preceding `(`.
fn innermost_group(s: &str) -> Option<(usize, usize)> {
    let mut last_open = None;
    for (idx, c) in s.char_indices() {
        match c {
            '(' => last_open = Some(idx),
            ')' => {
                if let Some(open) = last_open {
                    return Some((open, idx));
                }
            }
            _ => {}
        }
    }
    None
}

/// Byte range of the first whitespace-delimited token containing a `/` with
/// no space on either side.
fn bound_alternative(s: &str) -> Option<(usize, usize)> {
    let chars: Vec<(usize, char)> = s.char_indices().collect();

    let slash = (1..chars.len().saturating_sub(1)).find(|&i| {
        chars[i].1 == '/' && !chars[i - 1].1.is_whitespace() && !chars[i + 1].1.is_whitespace()
    })?;

    let start = chars[..slash]
        .iter()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(idx, c)| idx + c.len_utf8())
        .unwrap_or(0);
    let end = chars[slash..]
        .iter()
        .find(|(_, c)| c.is_whitespace())
        .map(|(idx, _)| *idx)
        .unwrap_or(s.len());

    Some((start, end))
}
