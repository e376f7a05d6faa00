use crate::models::Item;
use crate::selection::{SortDirection, SortMode, SortSpec};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid digit pattern"));

/// Sort items in place by the directive's field.
///
/// The sort is stable: items with equal keys keep their relative order, so
/// callers that start from store order get deterministic ties.
pub fn sort_items(items: &mut [&Item], spec: &SortSpec) {
    let field = spec.field;
    match spec.mode {
        SortMode::Natural => items.sort_by(|a, b| {
            directed(natural_cmp(a.field(field), b.field(field)), spec.direction)
        }),
        SortMode::NumericExtract => items.sort_by_key(|item| {
            let n = extract_number(item.field(field));
            match spec.direction {
                SortDirection::Asc => n as i128,
                SortDirection::Desc => -(n as i128),
            }
        }),
    }
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// First contiguous run of ASCII digits parsed as base-10; 0 when there is no
/// run or it does not fit.
pub fn extract_number(value: &str) -> u64 {
    DIGIT_RUN
        .find(value)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Numeric-aware, accent- and case-insensitive ordering.
///
/// Digit runs compare by numeric value ("2" < "10"). Values equal under that
/// primary ordering fall back to plain code-point order so only identical
/// strings compare equal.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a_key = normalize_for_sorting(a);
    let b_key = normalize_for_sorting(b);

    compare_chunks(&mut a_key.chars().peekable(), &mut b_key.chars().peekable())
        .then_with(|| a.cmp(b))
}

/// Normalize a string for primary comparison
/// - Unicode NFD with combining marks dropped
/// - Lowercase
/// - Trim and collapse internal whitespace
pub fn normalize_for_sorting(s: &str) -> String {
    let folded: String = s
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn compare_chunks(a: &mut Peekable<Chars<'_>>, b: &mut Peekable<Chars<'_>>) -> Ordering {
    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let a_run = take_digits(a);
                let b_run = take_digits(b);
                let ordering = compare_digit_runs(&a_run, &b_run);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                a.next();
                b.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        run.push(c);
    }
    run
}

/// Compare two digit strings by value without parsing, so arbitrarily long
/// runs cannot overflow.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
