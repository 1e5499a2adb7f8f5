//! Display-value ordering for table sorting.
//!
//! Values band into blanks, numbers, then text. Numbers compare by value
//! with a decimal comma tolerated; text compares naturally, case- and
//! accent-insensitive, with digit runs compared as integers so `item2`
//! sorts before `item10`. The banding makes the comparison a total order,
//! which the sort requires.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

enum Classified<'a> {
    Blank,
    Number(f64),
    Text(&'a str),
}

fn classify(value: &str) -> Classified<'_> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Classified::Blank;
    }
    match parse_decimal(trimmed) {
        Some(number) => Classified::Number(number),
        None => Classified::Text(value),
    }
}

/// Parse a number tolerating one decimal comma, so `4,5` reads as 4.5.
fn parse_decimal(value: &str) -> Option<f64> {
    value.replacen(',', ".", 1).parse().ok()
}

/// Compare two cell display values.
pub fn compare_display(a: &str, b: &str) -> Ordering {
    match (classify(a), classify(b)) {
        (Classified::Blank, Classified::Blank) => Ordering::Equal,
        (Classified::Blank, _) => Ordering::Less,
        (_, Classified::Blank) => Ordering::Greater,
        (Classified::Number(left), Classified::Number(right)) => left.total_cmp(&right),
        (Classified::Number(_), Classified::Text(_)) => Ordering::Less,
        (Classified::Text(_), Classified::Number(_)) => Ordering::Greater,
        (Classified::Text(left), Classified::Text(right)) => natural_cmp(left, right),
    }
}

/// Natural text comparison: folded case and accents, digit runs by value.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a = fold(a);
    let b = fold(b);
    let mut i = 0;
    let mut j = 0;
    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let end_a = digit_run_end(&a, i);
            let end_b = digit_run_end(&b, j);
            let ordering = compare_digit_runs(&a[i..end_a], &b[j..end_b]);
            if ordering != Ordering::Equal {
                return ordering;
            }
            i = end_a;
            j = end_b;
        } else {
            match a[i].cmp(&b[j]) {
                Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
                ordering => return ordering,
            }
        }
    }
    (a.len() - i).cmp(&(b.len() - j))
}

/// NFD, strip combining marks, lowercase: `École` and `ecole` fold equal.
fn fold(value: &str) -> Vec<char> {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn digit_run_end(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    end
}

/// Longer run wins once leading zeros are dropped; equal lengths compare
/// digit by digit.
fn compare_digit_runs(a: &[char], b: &[char]) -> Ordering {
    let a = strip_leading_zeros(a);
    let b = strip_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn strip_leading_zeros(run: &[char]) -> &[char] {
    let first = run
        .iter()
        .position(|c| *c != '0')
        .unwrap_or(run.len().saturating_sub(1));
    &run[first..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_by_value() {
        assert_eq!(compare_display("2", "10"), Ordering::Less);
        assert_eq!(compare_display("4,5", "4.2"), Ordering::Greater);
        assert_eq!(compare_display("-1", "0"), Ordering::Less);
        assert_eq!(compare_display("1200", "1200"), Ordering::Equal);
    }

    #[test]
    fn blanks_sort_before_everything() {
        assert_eq!(compare_display("", "0"), Ordering::Less);
        assert_eq!(compare_display("   ", "a"), Ordering::Less);
        assert_eq!(compare_display("", "  "), Ordering::Equal);
        assert_eq!(compare_display("z", ""), Ordering::Greater);
    }

    #[test]
    fn numbers_band_before_text() {
        assert_eq!(compare_display("999", "abc"), Ordering::Less);
        assert_eq!(compare_display("45 kg", "50"), Ordering::Greater);
    }

    #[test]
    fn natural_order_handles_digit_runs() {
        assert_eq!(natural_cmp("item2", "item10"), Ordering::Less);
        assert_eq!(natural_cmp("item007", "item7"), Ordering::Equal);
        assert_eq!(natural_cmp("item10a", "item10b"), Ordering::Less);
        assert_eq!(natural_cmp("2a", "10a"), Ordering::Less);
    }

    #[test]
    fn natural_order_folds_case_and_accents() {
        assert_eq!(natural_cmp("Alpha", "alpha"), Ordering::Equal);
        assert_eq!(natural_cmp("École", "ecole"), Ordering::Equal);
        assert_eq!(natural_cmp("école", "zebra"), Ordering::Less);
    }

    #[test]
    fn iso_dates_order_chronologically_as_text() {
        assert_eq!(
            compare_display("2023-12-01", "2024-01-02"),
            Ordering::Less
        );
        assert_eq!(
            compare_display("2026-01-09", "2026-01-10"),
            Ordering::Less
        );
    }
}
