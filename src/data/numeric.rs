/// Cell values that stand for "no value" rather than a parse failure.
const MISSING_WORDS: [&str; 3] = ["na", "n/a", "null"];

const STRIPPED_SYMBOLS: [char; 5] = ['$', '€', '£', '¥', '%'];

/// Normalize a raw cell and parse it as a number.
///
/// Accepts currency/percent decoration (`$1,234.50`, `45%`), thousands
/// separators (`1,234,567`, `1 234`) and accounting negatives (`(12.3)`).
/// Returns `None` for missing markers (`""`, `na`, `n/a`, `null`, `-`, `.`),
/// for anything that still fails to parse, and for non-finite results.
pub fn clean_and_parse(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let stripped: String = token
        .chars()
        .filter(|c| !STRIPPED_SYMBOLS.contains(c))
        .collect();
    let ungrouped = remove_group_separators(&stripped);
    let signed = ungrouped.replace('(', "-").replace(')', "");
    let cleaned = signed.trim();

    if is_missing(cleaned) {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn is_missing(cleaned: &str) -> bool {
    cleaned.is_empty()
        || cleaned == "-"
        || cleaned == "."
        || MISSING_WORDS
            .iter()
            .any(|word| cleaned.eq_ignore_ascii_case(word))
}

/// Drop every comma or whitespace character that is directly followed by
/// three ASCII digits. One left-to-right pass over the original text.
fn remove_group_separators(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        let is_separator = c == ',' || c.is_whitespace();
        let precedes_group = chars
            .get(i + 1..i + 4)
            .is_some_and(|next| next.iter().all(char::is_ascii_digit));
        if is_separator && precedes_group {
            continue;
        }
        out.push(c);
    }
    out
}
