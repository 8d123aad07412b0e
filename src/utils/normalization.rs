use unicode_normalization::UnicodeNormalization;

/// Letters that NFKD leaves untouched but which still have a conventional
/// ASCII spelling.
const APPROXIMATIONS: &[(char, &str)] = &[
    ('ß', "ss"),
    ('ẞ', "SS"),
    ('æ', "ae"),
    ('Æ', "AE"),
    ('ø', "o"),
    ('Ø', "O"),
    ('œ', "oe"),
    ('Œ', "OE"),
    ('đ', "d"),
    ('Đ', "D"),
    ('ð', "d"),
    ('Ð', "D"),
    ('ł', "l"),
    ('Ł', "L"),
    ('þ', "th"),
    ('Þ', "TH"),
    ('ħ', "h"),
    ('Ħ', "H"),
    ('ŧ', "t"),
    ('Ŧ', "T"),
    ('ŋ', "ng"),
    ('Ŋ', "NG"),
    ('ı', "i"),
    ('ĸ', "k"),
];

/// Generate a canonical tag name from arbitrary user text.
///
/// The text is folded to ASCII, lower-cased, stripped of everything but
/// `a-z`, `0-9`, space, `-` and `+`, and has its spaces collapsed and trimmed.
/// When nothing survives (a tag written entirely in a non-Latin script, say)
/// the trimmed input is kept as is.
pub fn normalize(raw: &str) -> String {
    let transliterated = transliterate(raw).to_ascii_lowercase();

    let mut canonical = String::with_capacity(transliterated.len());
    for c in transliterated.chars() {
        if !is_allowed(c) {
            continue;
        }
        if c == ' ' && canonical.ends_with(' ') {
            continue;
        }
        canonical.push(c);
    }

    let canonical = canonical.trim();
    if canonical.is_empty() {
        raw.trim().to_string()
    } else {
        canonical.to_string()
    }
}

/// Absent input stays absent rather than becoming a canonical empty tag.
pub fn normalize_opt(raw: Option<&str>) -> Option<String> {
    raw.map(normalize)
}

/// Normalize text that arrived as raw bytes.
///
/// Input that cannot be decoded is returned unchanged; normalization never
/// reports an error.
pub fn normalize_bytes(raw: &[u8]) -> Vec<u8> {
    match std::str::from_utf8(raw) {
        Ok(text) => normalize(text).into_bytes(),
        Err(e) => {
            log::debug!("Skipping normalization of undecodable tag bytes: {}", e);
            raw.to_vec()
        }
    }
}

/// Compatibility decomposition with combining marks and unmapped
/// characters dropped. ASCII passes through untouched.
fn transliterate(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.nfkd() {
        if c.is_ascii() {
            out.push(c);
        } else if let Some((_, ascii)) = APPROXIMATIONS.iter().find(|(from, _)| *from == c) {
            out.push_str(ascii);
        }
    }
    out
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, ' ' | '-' | '+')
}
