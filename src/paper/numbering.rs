//! Section numbering and author ordinals.

/// Largest value with a canonical Roman numeral.
pub const MAX_ROMAN: u32 = 3999;

const ROMAN_TABLE: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NumberingError {
    #[error("{0} has no Roman numeral (supported range is 1..=3999)")]
    OutOfRange(u64),
}

/// Encode `n` as a Roman numeral by greedy subtraction.
pub fn to_roman(n: u32) -> Result<String, NumberingError> {
    if n == 0 || n > MAX_ROMAN {
        return Err(NumberingError::OutOfRange(n.into()));
    }

    let mut remaining = n;
    let mut numeral = String::new();
    for (value, symbol) in ROMAN_TABLE {
        while remaining >= value {
            numeral.push_str(symbol);
            remaining -= value;
        }
    }
    Ok(numeral)
}

/// Display label for the top-level section at `index`.
///
/// Index 0 is the introduction and is never numbered.
pub fn section_label(index: usize) -> Result<String, NumberingError> {
    if index == 0 {
        return Ok("Introduction".to_string());
    }
    let position = u32::try_from(index + 1)
        .map_err(|_| NumberingError::OutOfRange(index as u64 + 1))?;
    Ok(format!("Section {}", to_roman(position)?))
}

/// English ordinal suffix: 1 -> "st", 12 -> "th", 22 -> "nd".
pub fn ordinal_suffix(n: usize) -> &'static str {
    match (n % 10, n % 100) {
        (1, h) if h != 11 => "st",
        (2, h) if h != 12 => "nd",
        (3, h) if h != 13 => "rd",
        _ => "th",
    }
}

/// `n` followed by its ordinal suffix, e.g. "3rd".
pub fn ordinal(n: usize) -> String {
    format!("{n}{}", ordinal_suffix(n))
}
