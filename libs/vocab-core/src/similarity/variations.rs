//! British/American spelling alternations.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// (pattern, replacement) pairs; each direction is listed explicitly.
///
/// Every suffix needs a stem in front of it so short words such as `four`,
/// `hour` or `filed` are not rewritten into other words.
static RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        // colour / color
        (r"([a-z]{3,})our\b", "${1}or"),
        (r"([a-z]{3,})or\b", "${1}our"),
        // organise / organize
        (r"([a-z]{3,})is(e|ed|es|ing)\b", "${1}iz$2"),
        (r"([a-z]{3,})iz(e|ed|es|ing)\b", "${1}is$2"),
        (r"([a-z]{2,})isation(s?)\b", "${1}ization$2"),
        (r"([a-z]{2,})ization(s?)\b", "${1}isation$2"),
        // analyse / analyze
        (r"([a-z]{2,})yse\b", "${1}yze"),
        (r"([a-z]{2,})yze\b", "${1}yse"),
        // centre / center
        (r"([a-z]{2,}[bgtv])re\b", "${1}er"),
        (r"([a-z]{3,}[bgtv])er\b", "${1}re"),
        // catalogue / catalog
        (r"([a-z]{3,})ogue\b", "${1}og"),
        (r"([a-z]{3,})og\b", "${1}ogue"),
        // defence / defense
        (r"([a-z]{3,})ence\b", "${1}ense"),
        (r"([a-z]{3,})ense\b", "${1}ence"),
        // travelled / traveled
        (r"([a-z]{2,}e)ll(ed|ing|er)\b", "${1}l$2"),
        (r"([a-z]{2,}e)l(ed|ing|er)\b", "${1}ll$2"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("invalid spelling variation pattern"),
            replacement,
        )
    })
    .collect()
});

/// Every spelling of `word` reachable by one British/American alternation,
/// including the lower-cased word itself.
pub fn detect_variations(word: &str) -> BTreeSet<String> {
    let lowered = word.trim().to_lowercase();
    let mut variations = BTreeSet::new();

    if lowered.is_empty() {
        return variations;
    }

    for (re, replacement) in RULES.iter() {
        let candidate = re.replace_all(&lowered, *replacement);
        if candidate != lowered {
            variations.insert(candidate.into_owned());
        }
    }

    variations.insert(lowered);
    variations
}

/// Whether the two words share a spelling once alternations are applied.
pub fn is_spelling_variation(a: &str, b: &str) -> bool {
    let left = detect_variations(a);
    let right = detect_variations(b);
    !left.is_disjoint(&right)
}
