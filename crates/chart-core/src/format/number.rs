// File: crates/chart-core/src/format/number.rs
// Summary: Custom numeric format strings ("#,0.00", "0.0 %;-0.0 %", "$#,0") and their metadata.
// Notes:
// - Sections are separated by ';' as positive;negative;zero.
// - Literal text inside the digit run is emitted after the number.

/// Most decimal places any format or precision override may request.
pub const MAX_DECIMAL_PLACES: usize = 20;

/// What a custom format string asks for, without formatting anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormatMetadata {
    pub has_dots: bool,
    pub has_commas: bool,
    pub has_percent: bool,
    pub has_permille: bool,
    pub has_quotes: bool,
    pub has_e: bool,
    /// Number of decimal placeholders (`0` or `#`) after the decimal point.
    /// Only computed on request.
    pub precision: Option<u32>,
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Zero,
    Hash,
    Dot,
    Comma,
    Percent,
    Permille,
    Literal(String),
}

impl Token {
    fn is_numeric(&self) -> bool {
        matches!(self, Token::Zero | Token::Hash | Token::Dot)
    }
}

/// Split a format into its `;` sections, ignoring separators inside quotes or after `\`.
pub fn split_sections(format: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in format.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'') | (None, '"') => quote = Some(c),
            (None, ';') => {
                sections.push(&format[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    sections.push(&format[start..]);
    sections
}

fn tokenize(section: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = section.chars().peekable();
    let mut seen_dot = false;
    let push_literal = |tokens: &mut Vec<Token>, s: &str| {
        if let Some(Token::Literal(prev)) = tokens.last_mut() {
            prev.push_str(s);
        } else {
            tokens.push(Token::Literal(s.to_string()));
        }
    };
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    push_literal(&mut tokens, &next.to_string());
                }
            }
            '\'' | '"' => {
                let mut lit = String::new();
                for n in chars.by_ref() {
                    if n == c {
                        break;
                    }
                    lit.push(n);
                }
                push_literal(&mut tokens, &lit);
            }
            '0' => tokens.push(Token::Zero),
            '#' => tokens.push(Token::Hash),
            '.' if !seen_dot => {
                seen_dot = true;
                tokens.push(Token::Dot);
            }
            ',' => tokens.push(Token::Comma),
            '%' => tokens.push(Token::Percent),
            '\u{2030}' => tokens.push(Token::Permille),
            other => push_literal(&mut tokens, &other.to_string()),
        }
    }
    tokens
}

/// Inspect a custom format. `calculate_precision` also counts decimal placeholders.
pub fn custom_format_metadata(format: &str, calculate_precision: bool) -> FormatMetadata {
    let mut meta = FormatMetadata::default();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut after_dot = false;
    let mut first_section = true;
    let mut precision = 0u32;
    for c in format.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\\' => escaped = true,
            '\'' | '"' => {
                meta.has_quotes = true;
                quote = Some(c);
            }
            '.' => {
                meta.has_dots = true;
                after_dot = true;
            }
            ',' => meta.has_commas = true,
            '%' => meta.has_percent = true,
            '\u{2030}' => meta.has_permille = true,
            'e' | 'E' => meta.has_e = true,
            '0' | '#' if after_dot && first_section => precision += 1,
            ';' => {
                after_dot = false;
                first_section = false;
            }
            _ => {}
        }
    }
    if calculate_precision {
        meta.precision = Some(precision);
    }
    meta
}

/// Expand a .NET-style standard numeric format (`N2`, `F0`, `P1`, `C2`, `D3`)
/// into an equivalent custom format. Returns `None` for custom formats.
pub fn expand_standard_format(format: &str) -> Option<String> {
    let mut chars = format.chars();
    let spec = chars.next()?;
    let digits: String = chars.collect();
    if digits.len() > 2 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let explicit: Option<usize> = digits.parse().ok();
    let decimals = |default: usize| "0".repeat(explicit.unwrap_or(default));
    let with_dot = |d: String| if d.is_empty() { String::new() } else { format!(".{d}") };
    Some(match spec {
        'N' | 'n' => format!("#,0{}", with_dot(decimals(2))),
        'F' | 'f' => format!("0{}", with_dot(decimals(2))),
        'P' | 'p' => format!("#,0{}%", with_dot(decimals(2))),
        'C' | 'c' => {
            let body = format!("#,0{}", with_dot(decimals(2)));
            format!("\\${body};-\\${body}")
        }
        'D' | 'd' => "0".repeat(explicit.unwrap_or(1).max(1)),
        _ => return None,
    })
}

/// Format `value` with a custom (or standard) numeric format.
pub fn format_number(value: f64, format: &str) -> String {
    format_number_with_precision(value, format, None)
}

/// Format `value`; when `precision` is set it replaces the decimal placeholders
/// of the chosen section with exactly that many zeros.
pub fn format_number_with_precision(value: f64, format: &str, precision: Option<u32>) -> String {
    if !value.is_finite() {
        return if value.is_nan() { "NaN".to_string() } else if value > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    let expanded = expand_standard_format(format);
    let format = expanded.as_deref().unwrap_or(format);
    let sections = split_sections(format);
    let (section, auto_sign) = if value < 0.0 && sections.len() >= 2 && !sections[1].is_empty() {
        (sections[1], false)
    } else if value == 0.0 && sections.len() >= 3 && !sections[2].is_empty() {
        (sections[2], false)
    } else {
        (sections[0], true)
    };
    let body = format_section(value.abs(), &tokenize(section), precision);
    if auto_sign && value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{body}")
    } else {
        body
    }
}

fn format_section(value: f64, tokens: &[Token], precision: Option<u32>) -> String {
    let first = tokens.iter().position(Token::is_numeric);
    let last = tokens.iter().rposition(Token::is_numeric);
    let (Some(first), Some(mut last)) = (first, last) else {
        // No digit placeholders: the section is pure text.
        return tokens.iter().map(render_passive).collect();
    };
    let mut trailing_commas = 0i32;
    while tokens.get(last + 1) == Some(&Token::Comma) {
        last += 1;
        trailing_commas += 1;
    }

    let region = &tokens[first..=last];
    let dot = region.iter().position(|t| *t == Token::Dot);
    let int_part = &region[..dot.unwrap_or(region.len())];
    let dec_part = dot.map(|d| &region[d + 1..]).unwrap_or(&[]);

    let int_zeros = int_part.iter().filter(|t| **t == Token::Zero).count();
    let mut dec_zeros = dec_part.iter().filter(|t| **t == Token::Zero).count();
    let mut dec_hashes = dec_part.iter().filter(|t| **t == Token::Hash).count();
    if let Some(p) = precision {
        dec_zeros = p as usize;
        dec_hashes = 0;
    }
    dec_zeros = dec_zeros.min(MAX_DECIMAL_PLACES);
    dec_hashes = dec_hashes.min(MAX_DECIMAL_PLACES - dec_zeros);

    // Commas directly before the decimal point or at the end of the digit run
    // scale by 1000; commas between placeholders request grouping.
    let mut scaling = trailing_commas;
    if dot.is_some() {
        scaling += int_part.iter().rev().take_while(|t| **t == Token::Comma).count() as i32;
    }
    let last_digit = int_part.iter().rposition(|t| matches!(t, Token::Zero | Token::Hash));
    let grouping = last_digit
        .map(|ld| int_part[..ld].iter().any(|t| *t == Token::Comma))
        .unwrap_or(false);

    let percent = tokens.iter().filter(|t| **t == Token::Percent).count() as i32;
    let permille = tokens.iter().filter(|t| **t == Token::Permille).count() as i32;
    let scaled = value * 100f64.powi(percent) * 1000f64.powi(permille) / 1000f64.powi(scaling);

    let decimals = dec_zeros + dec_hashes;
    let fixed = format!("{:.*}", decimals, scaled);
    let (int_digits, frac_digits) = match fixed.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (fixed.clone(), String::new()),
    };
    let mut frac = frac_digits;
    while frac.len() > dec_zeros && frac.ends_with('0') {
        frac.pop();
    }
    let mut int = if int_digits == "0" && int_zeros == 0 { String::new() } else { int_digits };
    while int.len() < int_zeros {
        int.insert(0, '0');
    }
    if grouping {
        int = group_thousands(&int);
    }

    let mut out = String::new();
    for t in &tokens[..first] {
        out.push_str(&render_passive(t));
    }
    out.push_str(&int);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    for t in region.iter().filter(|t| matches!(t, Token::Literal(_) | Token::Percent | Token::Permille)) {
        out.push_str(&render_passive(t));
    }
    for t in &tokens[last + 1..] {
        out.push_str(&render_passive(t));
    }
    out
}

fn render_passive(t: &Token) -> String {
    match t {
        Token::Literal(s) => s.clone(),
        Token::Percent => "%".to_string(),
        Token::Permille => "\u{2030}".to_string(),
        Token::Comma => ",".to_string(),
        Token::Dot => ".".to_string(),
        Token::Zero => "0".to_string(),
        Token::Hash => String::new(),
    }
}

/// Insert `,` every three digits from the right.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Unformatted rendering: integers without decimals, others with at most
/// `max_decimals` decimals and no trailing zeros.
pub fn format_general(value: f64, max_decimals: usize) -> String {
    if !value.is_finite() {
        return format_number(value, "0");
    }
    let fixed = format!("{:.*}", max_decimals, value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    };
    if trimmed == "-0" { "0".to_string() } else { trimmed }
}
