//! Staged product filter.
//!
//! Stages run in a fixed order, each narrowing the previous result:
//!
//! 1. category (case-insensitive substring, `"all"` disables; run by the
//!    store query)
//! 2. price range (`min <= price <= max`)
//! 3. price sort (stable, only when `asc`/`desc` is requested)
//! 4. size (case-insensitive exact match, `"all"` disables)
//! 5. carate (exact integer match)
//! 6. search text (name or category, case-insensitive substring)
//!
//! Sorting happens before the size/carate/search stages. Those stages only
//! remove items, so the final order is still sorted.

use serde::Deserialize;
use thiserror::Error;

use super::{ALL_SENTINEL, search};
use crate::types::Product;

/// Raw query parameters accepted by the filter endpoint.
///
/// Every value arrives as an untyped string; [`ProductFilter::parse`] turns
/// them into a typed filter according to a [`ParseMode`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub price_order: Option<String>,
    pub size: Option<String>,
    pub carate: Option<String>,
    pub search: Option<String>,
}

/// How malformed parameter values are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Malformed values silently fall back to their defaults.
    #[default]
    Lenient,
    /// Malformed values are rejected with a [`FilterError`].
    Strict,
}

/// A parameter value that could not be parsed in strict mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("invalid value for {parameter}: {value:?}")]
    InvalidParameter {
        parameter: &'static str,
        value: String,
    },
}

/// Price sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceOrder {
    Asc,
    Desc,
}

impl PriceOrder {
    /// Parse `asc`/`desc`, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }
}

/// A fully parsed product filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    /// Lowercased category substring; `None` means every category.
    pub category: Option<String>,
    pub min_price: f64,
    pub max_price: f64,
    pub order: Option<PriceOrder>,
    /// Lowercased size; `None` means every size.
    pub size: Option<String>,
    pub carate: Option<i64>,
    /// Lowercased search text; `None` means no search stage.
    pub search: Option<String>,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            min_price: 0.0,
            max_price: f64::INFINITY,
            order: None,
            size: None,
            carate: None,
            search: None,
        }
    }
}

impl ProductFilter {
    /// Build a filter from raw query parameters.
    ///
    /// Empty strings are treated as absent. Text parameters equal to `"all"`
    /// (any case) disable their stage.
    ///
    /// Lenient mode reads numbers the way browsers' `parseFloat`/`parseInt`
    /// do: a leading numeric prefix is used (`"60abc"` is 60, `"18k"` is 18)
    /// and a zero or unreadable value means "absent", so `maxPrice=0` leaves
    /// the upper bound open and `carate=0` disables the carate stage.
    ///
    /// # Errors
    ///
    /// In [`ParseMode::Strict`], returns [`FilterError::InvalidParameter`]
    /// for an unparseable price, carate, or sort order. Lenient mode never
    /// fails.
    pub fn parse(params: &FilterParams, mode: ParseMode) -> Result<Self, FilterError> {
        let defaults = Self::default();

        let (min_price, max_price, carate, order) = match mode {
            ParseMode::Lenient => (
                lenient_number(params.min_price.as_deref()),
                lenient_number(params.max_price.as_deref()),
                lenient_integer(params.carate.as_deref()),
                non_empty(params.price_order.as_deref())
                    .and_then(parse_order)
                    .flatten(),
            ),
            ParseMode::Strict => (
                strict_value("minPrice", params.min_price.as_deref(), parse_price)?,
                strict_value("maxPrice", params.max_price.as_deref(), parse_price)?,
                strict_value("carate", params.carate.as_deref(), |s| {
                    s.trim().parse::<i64>().ok()
                })?,
                strict_value("priceOrder", params.price_order.as_deref(), parse_order)?
                    .flatten(),
            ),
        };

        Ok(Self {
            category: sentinel_text(params.category.as_deref()),
            min_price: min_price.unwrap_or(defaults.min_price),
            max_price: max_price.unwrap_or(defaults.max_price),
            order,
            size: sentinel_text(params.size.as_deref()),
            carate,
            search: non_empty(params.search.as_deref()).map(str::to_lowercase),
        })
    }

    /// Category substring to push down to the store, if any.
    #[must_use]
    pub fn category_needle(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Run every stage after the category stage.
    ///
    /// The category stage is applied by the store query that produced
    /// `products`. A product without a numeric price fails the price stage.
    #[must_use]
    pub fn refine(&self, mut products: Vec<Product>) -> Vec<Product> {
        products.retain(|p| {
            p.price()
                .is_some_and(|price| price >= self.min_price && price <= self.max_price)
        });

        let price = |p: &Product| p.price().unwrap_or_default();
        match self.order {
            Some(PriceOrder::Asc) => products.sort_by(|a, b| price(a).total_cmp(&price(b))),
            Some(PriceOrder::Desc) => products.sort_by(|a, b| price(b).total_cmp(&price(a))),
            None => {}
        }

        if let Some(size) = &self.size {
            products.retain(|p| p.size().is_some_and(|s| s.to_lowercase() == *size));
        }

        if let Some(carate) = self.carate {
            products.retain(|p| p.carate_is(carate));
        }

        if let Some(text) = &self.search {
            products.retain(|p| search::matches_text(p, text));
        }

        products
    }
}

/// Parse one optional parameter, rejecting malformed values.
fn strict_value<T>(
    parameter: &'static str,
    raw: Option<&str>,
    parser: impl FnOnce(&str) -> Option<T>,
) -> Result<Option<T>, FilterError> {
    let Some(raw) = non_empty(raw) else {
        return Ok(None);
    };

    parser(raw)
        .map(Some)
        .ok_or_else(|| FilterError::InvalidParameter {
            parameter,
            value: raw.to_owned(),
        })
}

fn parse_price(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Numeric prefix, or `None` when it is missing or zero.
fn lenient_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(number_prefix).filter(|n| *n != 0.0)
}

/// Integer prefix, or `None` when it is missing or zero.
fn lenient_integer(raw: Option<&str>) -> Option<i64> {
    raw.and_then(integer_prefix).filter(|n| *n != 0)
}

/// Longest leading decimal literal after whitespace: sign, digits, fraction,
/// exponent, or `Infinity`.
fn number_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if s.get(end..).is_some_and(|rest| rest.starts_with("Infinity")) {
        let infinity = if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some(infinity);
    }

    let digits_from = |start: usize| {
        bytes
            .get(start..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let int_digits = digits_from(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = digits_from(end + 1 + sign);
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }

    s.get(..end)?.parse().ok()
}

/// Leading base-10 integer after whitespace.
fn integer_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign = usize::from(matches!(s.as_bytes().first(), Some(b'+' | b'-')));
    let digits = s
        .bytes()
        .skip(sign)
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    s.get(..sign + digits)?.parse().ok()
}

/// `Some(None)` is an explicit "all", `None` is malformed.
fn parse_order(s: &str) -> Option<Option<PriceOrder>> {
    if s.eq_ignore_ascii_case(ALL_SENTINEL) {
        Some(None)
    } else {
        PriceOrder::parse(s).map(Some)
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.is_empty())
}

fn sentinel_text(raw: Option<&str>) -> Option<String> {
    non_empty(raw)
        .map(str::to_lowercase)
        .filter(|s| s != ALL_SENTINEL)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn product(value: Value) -> Product {
        match value {
            Value::Object(doc) => Product::from(doc),
            _ => panic!("products must be objects"),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(json!({ "name": "Gold Ring", "category": "Rings", "price": 100, "size": "M", "carate": 18 })),
            product(json!({ "name": "Silver Chain", "category": "Chains", "price": 50, "size": "L", "carate": 14 })),
            product(json!({ "name": "Diamond Ring", "category": "Engagement Rings", "price": 900, "size": "S", "carate": 22 })),
            product(json!({ "name": "Pearl Earrings", "category": "Earrings", "price": 50.0, "size": "m", "carate": 18 })),
        ]
    }

    fn params() -> FilterParams {
        FilterParams::default()
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().filter_map(Product::name).collect()
    }

    fn parse(params: &FilterParams) -> ProductFilter {
        ProductFilter::parse(params, ParseMode::Lenient).unwrap()
    }

    fn run(params: &FilterParams) -> Vec<Product> {
        parse(params).refine(catalog())
    }

    #[test]
    fn test_no_params_returns_everything_in_order() {
        let result = run(&params());
        assert_eq!(
            names(&result),
            ["Gold Ring", "Silver Chain", "Diamond Ring", "Pearl Earrings"]
        );
    }

    #[test]
    fn test_category_is_lowercased_and_all_disables_it() {
        for sentinel in ["all", "ALL", "All", ""] {
            let filter = parse(&FilterParams {
                category: Some(sentinel.to_owned()),
                ..params()
            });
            assert_eq!(filter.category_needle(), None);
        }

        let filter = parse(&FilterParams {
            category: Some("Rings".to_owned()),
            ..params()
        });
        assert_eq!(filter.category_needle(), Some("rings"));
    }

    #[test]
    fn test_inverted_price_range_is_empty() {
        let result = run(&FilterParams {
            min_price: Some("10".to_owned()),
            max_price: Some("5".to_owned()),
            ..params()
        });
        assert!(result.is_empty());
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let result = run(&FilterParams {
            min_price: Some("50".to_owned()),
            max_price: Some("100".to_owned()),
            ..params()
        });
        assert_eq!(
            names(&result),
            ["Gold Ring", "Silver Chain", "Pearl Earrings"]
        );
    }

    #[test]
    fn test_products_without_numeric_price_fail_price_stage() {
        let mut products = catalog();
        products.push(product(json!({ "name": "Gift Card", "category": "Gifts" })));
        products.push(product(json!({ "name": "Quote", "price": "100" })));

        let result = parse(&params()).refine(products);
        assert_eq!(result.len(), 4);
        assert!(!names(&result).contains(&"Gift Card"));
    }

    #[test]
    fn test_results_are_the_stored_documents() {
        let stored = json!({ "name": "Band", "price": 100, "carate": null, "img": "b.png" });
        let result = parse(&params()).refine(vec![product(stored.clone())]);

        assert_eq!(serde_json::to_value(&result[0]).unwrap(), stored);
    }

    #[test]
    fn test_lenient_zero_max_price_leaves_upper_bound_open() {
        let filter = parse(&FilterParams {
            max_price: Some("0".to_owned()),
            ..params()
        });
        assert!(filter.max_price.is_infinite());
        assert_eq!(filter.refine(catalog()).len(), 4);
    }

    #[test]
    fn test_lenient_prices_use_numeric_prefix() {
        let filter = parse(&FilterParams {
            min_price: Some("60abc".to_owned()),
            max_price: Some(" 1e3$".to_owned()),
            ..params()
        });
        assert!((filter.min_price - 60.0).abs() < f64::EPSILON);
        assert!((filter.max_price - 1000.0).abs() < f64::EPSILON);

        let result = run(&FilterParams {
            min_price: Some("60abc".to_owned()),
            ..params()
        });
        assert_eq!(names(&result), ["Gold Ring", "Diamond Ring"]);
    }

    #[test]
    fn test_lenient_carate_uses_integer_prefix() {
        for raw in ["18", "18.0", "18k", " 18"] {
            let result = run(&FilterParams {
                carate: Some(raw.to_owned()),
                ..params()
            });
            assert_eq!(names(&result), ["Gold Ring", "Pearl Earrings"], "{raw}");
        }
    }

    #[test]
    fn test_lenient_zero_carate_disables_stage() {
        let filter = parse(&FilterParams {
            carate: Some("0".to_owned()),
            ..params()
        });
        assert_eq!(filter.carate, None);
    }

    #[test]
    fn test_number_prefix() {
        assert_eq!(number_prefix("60abc"), Some(60.0));
        assert_eq!(number_prefix("  -2.5e1x"), Some(-25.0));
        assert_eq!(number_prefix(".5"), Some(0.5));
        assert_eq!(number_prefix("7."), Some(7.0));
        assert_eq!(number_prefix("3e"), Some(3.0));
        assert_eq!(number_prefix("Infinity"), Some(f64::INFINITY));
        assert_eq!(number_prefix("abc"), None);
        assert_eq!(number_prefix("-"), None);
        assert_eq!(number_prefix("."), None);
    }

    #[test]
    fn test_integer_prefix() {
        assert_eq!(integer_prefix("18.9"), Some(18));
        assert_eq!(integer_prefix("-4x"), Some(-4));
        assert_eq!(integer_prefix("x4"), None);
    }

    #[test]
    fn test_sort_ascending_is_non_decreasing_and_stable() {
        let result = run(&FilterParams {
            price_order: Some("asc".to_owned()),
            ..params()
        });
        // Ties keep their relative order
        assert_eq!(
            names(&result),
            ["Silver Chain", "Pearl Earrings", "Gold Ring", "Diamond Ring"]
        );
    }

    #[test]
    fn test_sort_descending_is_non_increasing_and_stable() {
        let result = run(&FilterParams {
            price_order: Some("DESC".to_owned()),
            ..params()
        });
        assert_eq!(
            names(&result),
            ["Diamond Ring", "Gold Ring", "Silver Chain", "Pearl Earrings"]
        );
    }

    #[test]
    fn test_order_all_leaves_order_unchanged() {
        let result = run(&FilterParams {
            price_order: Some("all".to_owned()),
            ..params()
        });
        assert_eq!(result, run(&params()));
    }

    #[test]
    fn test_size_is_case_insensitive_exact_match() {
        let result = run(&FilterParams {
            size: Some("M".to_owned()),
            ..params()
        });
        assert_eq!(names(&result), ["Gold Ring", "Pearl Earrings"]);

        let result = run(&FilterParams {
            size: Some("X".to_owned()),
            ..params()
        });
        assert!(result.is_empty());
    }

    #[test]
    fn test_string_carate_never_matches() {
        let mut products = catalog();
        products.push(product(json!({ "name": "Odd Ring", "price": 10, "carate": "22" })));

        let result = parse(&FilterParams {
            carate: Some("22".to_owned()),
            ..params()
        })
        .refine(products);
        assert_eq!(names(&result), ["Diamond Ring"]);
    }

    #[test]
    fn test_search_matches_name_or_category() {
        let result = run(&FilterParams {
            search: Some("CHAIN".to_owned()),
            ..params()
        });
        assert_eq!(names(&result), ["Silver Chain"]);

        let result = run(&FilterParams {
            search: Some("engagement".to_owned()),
            ..params()
        });
        assert_eq!(names(&result), ["Diamond Ring"]);
    }

    #[test]
    fn test_stages_compose() {
        let result = run(&FilterParams {
            min_price: Some("60".to_owned()),
            price_order: Some("desc".to_owned()),
            carate: Some("22".to_owned()),
            search: Some("ring".to_owned()),
            ..params()
        });
        assert_eq!(names(&result), ["Diamond Ring"]);
    }

    #[test]
    fn test_lenient_mode_falls_back_to_defaults() {
        let lenient = parse(&FilterParams {
            min_price: Some("cheap".to_owned()),
            max_price: Some("NaN".to_owned()),
            price_order: Some("sideways".to_owned()),
            carate: Some("gold".to_owned()),
            ..params()
        });

        assert_eq!(lenient, ProductFilter::default());
    }

    #[test]
    fn test_strict_mode_rejects_malformed_values() {
        let err = ProductFilter::parse(
            &FilterParams {
                carate: Some("18k".to_owned()),
                ..params()
            },
            ParseMode::Strict,
        )
        .unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidParameter {
                parameter: "carate",
                value: "18k".to_owned(),
            }
        );

        let err = ProductFilter::parse(
            &FilterParams {
                price_order: Some("sideways".to_owned()),
                ..params()
            },
            ParseMode::Strict,
        )
        .unwrap_err();
        assert!(err.to_string().contains("priceOrder"));
    }

    #[test]
    fn test_strict_mode_accepts_well_formed_values() {
        let filter = ProductFilter::parse(
            &FilterParams {
                min_price: Some(" 10.5".to_owned()),
                max_price: Some("0".to_owned()),
                price_order: Some("ASC".to_owned()),
                carate: Some("18".to_owned()),
                size: Some(String::new()),
                ..params()
            },
            ParseMode::Strict,
        )
        .unwrap();

        assert!((filter.min_price - 10.5).abs() < f64::EPSILON);
        // Strict mode takes an explicit zero literally
        assert!(filter.max_price.abs() < f64::EPSILON);
        assert_eq!(filter.order, Some(PriceOrder::Asc));
        assert_eq!(filter.carate, Some(18));
        assert_eq!(filter.size, None);
    }
}
