//! American Soundex phonetic codes.

/// Code returned when nothing is left after stripping non-letters.
pub const EMPTY_SOUNDEX: &str = "0000";

fn class(c: char) -> Option<char> {
    match c {
        'B' | 'F' | 'P' | 'V' => Some('1'),
        'C' | 'G' | 'J' | 'K' | 'Q' | 'S' | 'X' | 'Z' => Some('2'),
        'D' | 'T' => Some('3'),
        'L' => Some('4'),
        'M' | 'N' => Some('5'),
        'R' => Some('6'),
        _ => None,
    }
}

/// Encode a word as a four character Soundex code, e.g. `Robert` -> `R163`.
///
/// Vowels separate repeated codes, `H` and `W` do not.
pub fn soundex(s: &str) -> String {
    let letters: Vec<char> = s
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let Some((&first, rest)) = letters.split_first() else {
        return EMPTY_SOUNDEX.to_string();
    };

    let mut code = String::with_capacity(4);
    code.push(first);
    let mut last = class(first);

    for &c in rest {
        if code.len() == 4 {
            break;
        }
        match c {
            'H' | 'W' => continue,
            'A' | 'E' | 'I' | 'O' | 'U' | 'Y' => last = None,
            _ => {
                let digit = class(c);
                if digit.is_some() && digit != last {
                    code.extend(digit);
                }
                last = digit;
            }
        }
    }

    while code.len() < 4 {
        code.push('0');
    }
    code
}
