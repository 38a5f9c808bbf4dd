//! Catalog filtering and sorting.
//!
//! [`filter_and_sort`] is the storefront's browsing engine: a pure function
//! from a product slice and a [`CatalogQuery`] to a freshly allocated,
//! render-ready list. Calling it twice with the same arguments yields the
//! same output and the input slice is never touched; the catalog page can
//! therefore re-derive its view on every filter change without bookkeeping.

pub mod seed;

use std::cmp::Ordering;

use daisy_client::{ApiClient, ApiError};
use daisy_core::{CategoryFilter, CollectionFilter, PriceRange, Product, SortKey};

/// Transient per-view filter and sort state for the catalog page.
///
/// Not persisted; a fresh page starts from `CatalogQuery::default()`
/// (everything visible, featured order, the default browsing price range).
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub category: CategoryFilter,
    pub collection: CollectionFilter,
    pub sort: SortKey,
    pub price_range: PriceRange,
}

/// Derive the render-ready product list for a query.
///
/// Filters apply in order (category, collection, inclusive price range),
/// then the sort. `newest` and `featured` are stable partitions; the price
/// and rating sorts are stable, so catalog order breaks ties throughout.
#[must_use]
pub fn filter_and_sort(products: &[Product], query: &CatalogQuery) -> Vec<Product> {
    let mut filtered: Vec<Product> = products
        .iter()
        .filter(|p| query.category.matches(p.category))
        .filter(|p| query.collection.matches(&p.collection))
        .filter(|p| query.price_range.contains(p.price))
        .cloned()
        .collect();

    match query.sort {
        SortKey::Newest => stable_partition(&mut filtered, |p| p.is_new),
        SortKey::PriceAsc => filtered.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => filtered.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Rating => filtered.sort_by(|a, b| {
            b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)
        }),
        SortKey::Featured => stable_partition(&mut filtered, |p| p.is_bestseller),
    }

    filtered
}

/// Move matching elements to the front, preserving relative order within
/// both groups.
fn stable_partition<F>(items: &mut Vec<Product>, pred: F)
where
    F: Fn(&Product) -> bool,
{
    let (mut front, back): (Vec<Product>, Vec<Product>) =
        items.drain(..).partition(|p| pred(p));
    front.extend(back);
    *items = front;
}

/// Fetch the full catalog from the backend.
///
/// The API-backed variant of the catalog page; the static seed in
/// [`seed`] covers the offline variant.
///
/// # Errors
///
/// Returns [`ApiError`] if the request fails.
pub async fn fetch_products(api: &ApiClient) -> Result<Vec<Product>, ApiError> {
    api.get("/products").await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use daisy_core::{Category, ProductId};
    use rust_decimal::Decimal;

    fn product(id: i32, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Piece {id}"),
            price: Decimal::from(price),
            original_price: None,
            images: vec![],
            category: Category::Rings,
            collection: "Everyday Luxe".to_owned(),
            description: String::new(),
            details: vec![],
            materials: vec![],
            care_instructions: vec![],
            is_new: false,
            is_bestseller: false,
            rating: 4.0,
            reviews: 10,
            in_stock: true,
            colors: None,
            sizes: None,
        }
    }

    fn catalog() -> Vec<Product> {
        let mut one = product(1, 100);
        one.category = Category::Earrings;
        one.collection = "Garden Dreams".to_owned();
        one.is_new = true;
        one.rating = 4.9;

        let mut two = product(2, 200);
        two.category = Category::Bracelets;
        two.is_bestseller = true;
        two.rating = 4.8;

        let mut three = product(3, 300);
        three.category = Category::Necklaces;
        three.collection = "Garden Dreams".to_owned();
        three.is_new = true;
        three.is_bestseller = true;
        three.rating = 5.0;

        let four = product(4, 400);

        vec![one, two, three, four]
    }

    fn ids(products: &[Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_pure_and_input_untouched() {
        let input = catalog();
        let before = input.clone();
        let query = CatalogQuery {
            sort: SortKey::PriceDesc,
            ..CatalogQuery::default()
        };

        let first = filter_and_sort(&input, &query);
        let second = filter_and_sort(&input, &query);

        assert_eq!(first, second);
        assert_eq!(input, before);
    }

    #[test]
    fn test_category_filter() {
        let query = CatalogQuery {
            category: CategoryFilter::Only(Category::Earrings),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&filter_and_sort(&catalog(), &query)), vec![1]);
    }

    #[test]
    fn test_collection_filter() {
        let query = CatalogQuery {
            collection: CollectionFilter::Named("Garden Dreams".to_owned()),
            ..CatalogQuery::default()
        };
        // Featured default sort puts bestseller 3 before 1
        assert_eq!(ids(&filter_and_sort(&catalog(), &query)), vec![3, 1]);
    }

    #[test]
    fn test_price_range_inclusive() {
        let query = CatalogQuery {
            price_range: PriceRange::new(Decimal::from(100), Decimal::from(300)).unwrap(),
            sort: SortKey::PriceAsc,
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&filter_and_sort(&catalog(), &query)), vec![1, 2, 3]);
    }

    #[test]
    fn test_every_result_within_range() {
        let range = PriceRange::new(Decimal::from(150), Decimal::from(350)).unwrap();
        let query = CatalogQuery {
            price_range: range,
            ..CatalogQuery::default()
        };
        for p in filter_and_sort(&catalog(), &query) {
            assert!(range.contains(p.price), "{} out of range", p.price);
        }
    }

    #[test]
    fn test_newest_is_stable_partition() {
        let query = CatalogQuery {
            sort: SortKey::Newest,
            ..CatalogQuery::default()
        };
        // New items 1, 3 keep their relative order, then 2, 4 keep theirs.
        assert_eq!(ids(&filter_and_sort(&catalog(), &query)), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_featured_is_stable_partition() {
        let query = CatalogQuery::default();
        assert_eq!(ids(&filter_and_sort(&catalog(), &query)), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_price_sort_ties_keep_catalog_order() {
        let mut input = catalog();
        for p in &mut input {
            p.price = Decimal::from(250);
        }
        let query = CatalogQuery {
            sort: SortKey::PriceAsc,
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&filter_and_sort(&input, &query)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_rating_sorts_descending() {
        let query = CatalogQuery {
            sort: SortKey::Rating,
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&filter_and_sort(&catalog(), &query)), vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_price_desc_within_range_scenario() {
        // Catalog priced [100, 200, 300, 400], sort price-desc, range [150, 350]
        let query = CatalogQuery {
            sort: SortKey::PriceDesc,
            price_range: PriceRange::new(Decimal::from(150), Decimal::from(350)).unwrap(),
            ..CatalogQuery::default()
        };
        let result = filter_and_sort(&catalog(), &query);
        assert_eq!(
            result.iter().map(|p| p.price).collect::<Vec<_>>(),
            vec![Decimal::from(300), Decimal::from(200)]
        );
    }

    #[test]
    fn test_empty_catalog() {
        assert!(filter_and_sort(&[], &CatalogQuery::default()).is_empty());
    }
}
