//! Ingredient line normalization.
//!
//! Provider ingredient lines are free text ("2 Tablespoons olive oil (extra
//! virgin)"). [`normalize`] brings them to a canonical lower-case form with
//! short unit names, and [`parse_ingredient`] splits a normalized line into
//! count, unit and ingredient name.

use crate::model::Ingredient;

/// Long unit names and their canonical abbreviation.
///
/// Plural forms come before their singular so that "tablespoons" is not
/// first rewritten to "tbsps".
const UNIT_ABBREVIATIONS: [(&str, &str); 8] = [
    ("tablespoons", "tbsp"),
    ("tablespoon", "tbsp"),
    ("ounces", "oz"),
    ("ounce", "oz"),
    ("teaspoons", "tsp"),
    ("teaspoon", "tsp"),
    ("cups", "cup"),
    ("pounds", "pound"),
];

/// Units recognized when splitting a normalized line.
const SHORT_UNITS: [&str; 7] = ["tbsp", "oz", "tsp", "cup", "pound", "kg", "g"];

/// Lower-cases a raw ingredient line, abbreviates long unit names and strips
/// parenthesized remarks.
pub fn normalize(raw: &str) -> String {
    let mut line = raw.to_lowercase();
    for (long, short) in UNIT_ABBREVIATIONS {
        line = line.replace(long, short);
    }
    strip_parenthesized(&line)
}

/// Replaces every `(...)` group, together with the spaces around it, by a
/// single space. An unmatched `(` is kept as is.
fn strip_parenthesized(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    // spaces copied from the input since the last non-space or replacement
    let mut trailing_spaces = 0;
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        if c == '(' {
            if let Some(close) = rest.find(')') {
                out.truncate(out.len() - trailing_spaces);
                out.push(' ');
                trailing_spaces = 0;
                rest = rest[close + 1..].trim_start_matches(' ');
                continue;
            }
        }

        out.push(c);
        if c == ' ' {
            trailing_spaces += 1;
        } else {
            trailing_spaces = 0;
        }
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Splits a normalized line into count, unit and ingredient.
///
/// Tokens before the first known unit make up the count ("1 1/2 cup" and
/// "1-1/2 cup" both give 1.5). Without a unit, a leading number is still
/// taken as the count ("2 eggs").
pub fn parse_ingredient(normalized: &str) -> Ingredient {
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    let unit_index = tokens.iter().position(|t| SHORT_UNITS.contains(t));

    match unit_index {
        Some(index) => Ingredient::Parsed {
            count: sum_quantities(&tokens[..index]),
            unit: tokens[index].to_string(),
            ingredient: tokens[index + 1..].join(" "),
        },
        None => match tokens.first().and_then(|first| parse_quantity(first)) {
            Some(count) => Ingredient::Parsed {
                count: Some(count),
                unit: String::new(),
                ingredient: tokens[1..].join(" "),
            },
            None => Ingredient::Parsed {
                count: None,
                unit: String::new(),
                ingredient: tokens.join(" "),
            },
        },
    }
}

fn sum_quantities(tokens: &[&str]) -> Option<f64> {
    if tokens.is_empty() {
        return None;
    }
    tokens
        .iter()
        .map(|t| parse_quantity(t))
        .sum::<Option<f64>>()
}

/// Parses "2", "1.5", "1/2" and "1-1/2" style quantities.
fn parse_quantity(token: &str) -> Option<f64> {
    let total = token
        .split('-')
        .map(|part| match part.split_once('/') {
            Some((num, den)) => {
                let num: f64 = num.parse().ok()?;
                let den: f64 = den.parse().ok()?;
                Some(num / den)
            }
            None => part.parse::<f64>().ok(),
        })
        .sum::<Option<f64>>()?;

    total.is_finite().then_some(total)
}
