use std::cmp::Ordering;

/// Compare two tab-delimited records, treating fields that look numeric as numbers.
///
/// Fields are compared pairwise from left to right. When both fields start with an
/// ASCII digit, a decimal point or a minus sign they are compared as signed decimal
/// numerals, digit by digit, so arbitrarily long values compare exactly where a round
/// trip through a 64 bit float would lose precision. Any other pair of fields is
/// compared byte-wise, which for UTF-8 text is the same as comparing scalar values.
///
/// Numeral comparison:
/// * a minus sign on one side only makes that side smaller, whatever follows it
/// * leading zeros are insignificant
/// * a longer run of integer digits is a larger magnitude; equal runs are decided by
///   the first differing digit
/// * fractional digits after a decimal point continue the digit walk; trailing zeros
///   are insignificant, so `42`, `42.0` and `42.00` all compare equal
/// * bytes after the numeral prefix fall back to byte order
///
/// A record that runs out of fields while the other still has non-empty fields is the
/// smaller one. A missing tail and an empty tail are equivalent, so `"a"` and `"a\t"`
/// compare equal, and an empty record equals only another empty record.
///
/// The dump NULL token `\N` needs no special handling: the byte-wise fallback places
/// it after every numeral and after the empty field, and before lower case text.
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use pg_dump_sort::comparator::compare;
///
/// assert_eq!(compare("42\tfoo", "42\tbar"), Ordering::Greater);
/// assert_eq!(compare("0.042", "0.42"), Ordering::Less);
/// assert_eq!(compare("42", "42.0"), Ordering::Equal);
/// ```
pub fn compare(l1: &str, l2: &str) -> Ordering {
    let mut rest1 = l1;
    let mut rest2 = l2;
    loop {
        let (field1, tail1) = split_field(rest1);
        let (field2, tail2) = split_field(rest2);
        let ordering = compare_fields(field1, field2);
        if ordering != Ordering::Equal {
            return ordering;
        }
        match (tail1, tail2) {
            (None, None) => return Ordering::Equal,
            // a missing tail keeps comparing as an empty one
            (t1, t2) => {
                rest1 = t1.unwrap_or("");
                rest2 = t2.unwrap_or("");
            }
        }
    }
}

fn split_field(record: &str) -> (&str, Option<&str>) {
    match record.split_once('\t') {
        Some((field, tail)) => (field, Some(tail)),
        None => (record, None),
    }
}

// the first byte decides whether a field takes part in numeral comparison
fn looks_numeric(field: &str) -> bool {
    matches!(field.as_bytes().first(), Some(b'0'..=b'9' | b'.' | b'-'))
}

fn compare_fields(field1: &str, field2: &str) -> Ordering {
    if looks_numeric(field1) && looks_numeric(field2) {
        compare_numerals(field1.as_bytes(), field2.as_bytes())
    } else {
        field1.cmp(field2)
    }
}

fn compare_numerals(field1: &[u8], field2: &[u8]) -> Ordering {
    let (negative1, magnitude1) = strip_sign(field1);
    let (negative2, magnitude2) = strip_sign(field2);
    match (negative1, negative2) {
        // a sign on one side only decides the field, numeral or not
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => compare_magnitudes(magnitude1, magnitude2),
        (true, true) => compare_magnitudes(magnitude1, magnitude2).reverse(),
    }
}

fn strip_sign(field: &[u8]) -> (bool, &[u8]) {
    match field.split_first() {
        Some((b'-', magnitude)) => (true, magnitude),
        _ => (false, field),
    }
}

fn compare_magnitudes(magnitude1: &[u8], magnitude2: &[u8]) -> Ordering {
    let (int1, frac1, rest1) = split_numeral(magnitude1);
    let (int2, frac2, rest2) = split_numeral(magnitude2);
    // more integer digits means a larger magnitude; equal runs fall through to the
    // fractional digits and finally to whatever trails the numeral
    int1.len()
        .cmp(&int2.len())
        .then_with(|| int1.cmp(int2))
        .then_with(|| compare_fractions(frac1, frac2))
        .then_with(|| rest1.cmp(rest2))
}

/// Split a magnitude into integer digits with leading zeros dropped, fractional
/// digits, and the remaining bytes after the numeral prefix.
fn split_numeral(magnitude: &[u8]) -> (&[u8], &[u8], &[u8]) {
    let zeros = magnitude.iter().take_while(|byte| **byte == b'0').count();
    let magnitude = &magnitude[zeros..];
    let (int, after) = magnitude.split_at(digit_run(magnitude));
    match after.first() {
        Some(b'.') => {
            let frac_len = digit_run(&after[1..]);
            (int, &after[1..1 + frac_len], &after[1 + frac_len..])
        }
        _ => (int, &[], after),
    }
}

fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|byte| byte.is_ascii_digit()).count()
}

// trailing zeros do not change the value: 0.42 == 0.420, but 0.42 < 0.421
fn compare_fractions(frac1: &[u8], frac2: &[u8]) -> Ordering {
    let common = frac1.len().min(frac2.len());
    frac1[..common].cmp(&frac2[..common]).then_with(|| {
        if frac1[common..].iter().any(|digit| *digit != b'0') {
            Ordering::Greater
        } else if frac2[common..].iter().any(|digit| *digit != b'0') {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    })
}
