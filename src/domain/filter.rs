//! The catalog filter/sort pipeline.
//!
//! [`apply`] narrows the product list by category, then text, then price, and
//! sorts last. It never mutates its input.

use super::catalog::Product;
use crate::error::StorefrontError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound of the price slider, also the default `price_max`.
pub const DEFAULT_PRICE_MAX: Decimal = Decimal::ONE_THOUSAND;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order; there is no timestamp to sort on.
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Rating,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Rating => "rating",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "newest" => Ok(Self::Newest),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "rating" => Ok(Self::Rating),
            other => Err(StorefrontError::ValidationError(format!(
                "Unknown sort option '{other}'"
            ))),
        }
    }
}

/// The durable `category` / `search` URL parameters of the product listing.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
pub struct QueryParams {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct FilterSpec {
    pub active_category: Option<String>,
    pub search_query: String,
    /// Inclusive upper price bound. The lower bound is always zero.
    pub price_max: Decimal,
    pub sort_by: SortOption,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            active_category: None,
            search_query: String::new(),
            price_max: DEFAULT_PRICE_MAX,
            sort_by: SortOption::Newest,
        }
    }
}

impl FilterSpec {
    pub fn from_query(params: &QueryParams) -> Self {
        Self {
            active_category: params.category.clone(),
            search_query: params.search.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Re-applies externally changed URL parameters. Price and sort are left
    /// alone. Returns whether anything changed.
    pub fn sync_query(&mut self, params: &QueryParams) -> bool {
        let mut changed = false;
        if self.active_category != params.category {
            self.active_category.clone_from(&params.category);
            changed = true;
        }
        let search = params.search.as_deref().unwrap_or_default();
        if self.search_query != search {
            self.search_query = search.to_string();
            changed = true;
        }
        changed
    }

    /// Resets every filter to its default ("Clear Filters").
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.active_category
            .as_deref()
            .is_none_or(|category| product.category == category)
    }

    fn matches_price(&self, product: &Product) -> bool {
        let price = product.price.value();
        price >= Decimal::ZERO && price <= self.price_max
    }
}

fn matches_text(query: &str, product: &Product) -> bool {
    query.is_empty()
        || product.name.to_lowercase().contains(query)
        || product.description.to_lowercase().contains(query)
}

/// Runs the filter stages in order and sorts the survivors.
pub fn apply(products: &[Product], spec: &FilterSpec) -> Vec<Product> {
    let query = spec.search_query.trim().to_lowercase();

    let mut result: Vec<Product> = products
        .iter()
        .filter(|p| spec.matches_category(p))
        .filter(|p| matches_text(&query, p))
        .filter(|p| spec.matches_price(p))
        .cloned()
        .collect();

    // `sort_by` is stable, so ties keep catalog order.
    match spec.sort_by {
        SortOption::Newest => {}
        SortOption::PriceAsc => result.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOption::PriceDesc => result.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOption::Rating => result.sort_by(|a, b| b.rating.cmp(&a.rating)),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::fixtures::product;
    use rust_decimal_macros::dec;

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    /// Ten products; three electronics of which two cost at most 100.
    fn catalog() -> Vec<Product> {
        vec![
            product("1", "electronics", dec!(99.99)),
            product("2", "fashion", dec!(45)),
            product("3", "electronics", dec!(249)),
            product("4", "home-living", dec!(80)),
            product("5", "sports", dec!(30)),
            product("6", "electronics", dec!(59)),
            product("7", "fashion", dec!(120)),
            product("8", "home-living", dec!(15)),
            product("9", "sports", dec!(210)),
            product("10", "fashion", dec!(5)),
        ]
    }

    #[test]
    fn test_category_and_price_scenario() {
        let spec = FilterSpec {
            active_category: Some("electronics".to_string()),
            price_max: dec!(100),
            sort_by: SortOption::PriceAsc,
            ..FilterSpec::default()
        };
        let result = apply(&catalog(), &spec);
        assert_eq!(ids(&result), ["6", "1"]);
    }

    #[test]
    fn test_price_max_is_inclusive() {
        let spec = FilterSpec {
            price_max: dec!(45),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&apply(&catalog(), &spec)), ["2", "5", "8", "10"]);
    }

    #[test]
    fn test_text_filter_is_trimmed_and_case_insensitive() {
        let mut products = catalog();
        products[3].name = "Ceramic Vase".to_string();
        products[6].description = "A warm wool SWEATER with a vase print".to_string();

        let spec = FilterSpec {
            search_query: "  VaSe ".to_string(),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&apply(&products, &spec)), ["4", "7"]);
    }

    #[test]
    fn test_newest_preserves_catalog_order() {
        let products = catalog();
        let result = apply(&products, &FilterSpec::default());
        assert_eq!(result, products);
    }

    #[test]
    fn test_price_asc_and_desc_are_reverses() {
        let products = catalog();
        let mut spec = FilterSpec {
            sort_by: SortOption::PriceAsc,
            ..FilterSpec::default()
        };
        let asc = apply(&products, &spec);
        spec.sort_by = SortOption::PriceDesc;
        let mut desc = apply(&products, &spec);
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_rating_sort_is_stable() {
        let mut products = catalog();
        products[4].rating = dec!(4.8);
        products[1].rating = dec!(3.5);
        let spec = FilterSpec {
            sort_by: SortOption::Rating,
            ..FilterSpec::default()
        };
        let result = apply(&products, &spec);
        assert_eq!(result[0].id, "5");
        assert_eq!(result.last().map(|p| p.id.as_str()), Some("2"));
        // Equal ratings keep catalog order.
        assert_eq!(ids(&result[1..4]), ["1", "3", "4"]);
    }

    #[test]
    fn test_apply_is_pure() {
        let products = catalog();
        let before = products.clone();
        let spec = FilterSpec {
            search_query: "product".to_string(),
            sort_by: SortOption::PriceDesc,
            ..FilterSpec::default()
        };
        let first = apply(&products, &spec);
        let second = apply(&products, &spec);
        assert_eq!(first, second);
        assert_eq!(products, before);
    }

    #[test]
    fn test_query_sync() {
        let mut spec = FilterSpec::from_query(&QueryParams {
            category: Some("fashion".to_string()),
            search: None,
        });
        spec.price_max = dec!(50);
        assert_eq!(spec.active_category.as_deref(), Some("fashion"));

        let same = QueryParams {
            category: Some("fashion".to_string()),
            search: None,
        };
        assert!(!spec.sync_query(&same));

        let changed = QueryParams {
            category: None,
            search: Some("shoe".to_string()),
        };
        assert!(spec.sync_query(&changed));
        assert_eq!(spec.active_category, None);
        assert_eq!(spec.search_query, "shoe");
        assert_eq!(spec.price_max, dec!(50));
    }

    #[test]
    fn test_clear_restores_defaults() {
        let mut spec = FilterSpec {
            active_category: Some("sports".to_string()),
            search_query: "ball".to_string(),
            price_max: dec!(10),
            sort_by: SortOption::Rating,
        };
        spec.clear();
        assert_eq!(spec, FilterSpec::default());
    }

    #[test]
    fn test_sort_option_parsing() {
        assert_eq!("price-desc".parse::<SortOption>().unwrap(), SortOption::PriceDesc);
        assert!("cheapest".parse::<SortOption>().is_err());
    }
}
