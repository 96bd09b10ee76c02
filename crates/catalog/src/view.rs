//! View pipeline: filter → sort → paginate.
//!
//! Everything here is a pure function of the catalog and the view parameters.
//! The catalog is only borrowed; rows are returned as references into it.

use core::cmp::Ordering;
use core::num::NonZeroUsize;
use core::ops::RangeInclusive;

use stockdesk_core::{Entity, ProductId, ValueObject};

use crate::product::Product;

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(n) => n,
    None => unreachable!(),
};

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 20];

/// Sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Price,
    Category,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Name, SortKey::Price, SortKey::Category];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Price => "Price",
            SortKey::Category => "Category",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Name => a.name().cmp(b.name()),
            SortKey::Price => a.price().total_cmp(&b.price()),
            // Missing categories sort as the empty string.
            SortKey::Category => a
                .category()
                .unwrap_or_default()
                .cmp(b.category().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl ValueObject for SortConfig {}

impl SortConfig {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    /// Next configuration after the user clicks `key`'s header.
    ///
    /// A new key starts ascending; clicking the active key flips between
    /// ascending and descending.
    pub fn toggled(current: Option<SortConfig>, key: SortKey) -> SortConfig {
        match current {
            Some(SortConfig {
                key: active,
                direction: SortDirection::Ascending,
            }) if active == key => SortConfig {
                key,
                direction: SortDirection::Descending,
            },
            _ => SortConfig::ascending(key),
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ord = self.key.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Header arrow state for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

impl SortIndicator {
    pub fn of(sort: Option<SortConfig>, key: SortKey) -> Self {
        match sort {
            Some(cfg) if cfg.key == key => match cfg.direction {
                SortDirection::Ascending => SortIndicator::Ascending,
                SortDirection::Descending => SortIndicator::Descending,
            },
            _ => SortIndicator::Unsorted,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            SortIndicator::Unsorted => "↕",
            SortIndicator::Ascending => "▲",
            SortIndicator::Descending => "▼",
        }
    }
}

/// Transient view state. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewParams {
    pub search: String,
    pub sort: Option<SortConfig>,
    pub page_size: NonZeroUsize,
    pub current_page: NonZeroUsize,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: None,
            page_size: DEFAULT_PAGE_SIZE,
            current_page: NonZeroUsize::MIN,
        }
    }
}

/// One rendered page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub rows: Vec<&'a Product>,
    pub total_matches: usize,
    pub page_count: usize,
    pub current_page: usize,
    pub page_size: usize,
}

impl PageView<'_> {
    /// No product matched; the table should show its "no products" state.
    pub fn is_empty(&self) -> bool {
        self.total_matches == 0
    }

    /// Page buttons to render, `1..=page_count` (empty when nothing matched).
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.page_count
    }

    pub fn row_ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.rows.iter().map(|p| p.id())
    }
}

/// Keep products matching `query` (case-insensitive), preserving order.
pub fn filter<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products.iter().filter(|p| p.matches(&needle)).collect()
}

/// Stable sort by the given configuration; `None` leaves the order alone.
pub fn sort(rows: &mut [&Product], sort: Option<SortConfig>) {
    if let Some(cfg) = sort {
        rows.sort_by(|a, b| cfg.compare(a, b));
    }
}

pub fn page_count(total: usize, page_size: NonZeroUsize) -> usize {
    total.div_ceil(page_size.get())
}

/// Slice `[(page-1)*size, page*size)`. Pages past the end are empty.
pub fn paginate<'a>(
    rows: &[&'a Product],
    page: NonZeroUsize,
    page_size: NonZeroUsize,
) -> Vec<&'a Product> {
    let start = (page.get() - 1).saturating_mul(page_size.get());
    rows.iter()
        .skip(start)
        .take(page_size.get())
        .copied()
        .collect()
}

/// Run the whole pipeline.
pub fn render<'a>(products: &'a [Product], params: &ViewParams) -> PageView<'a> {
    let mut rows = filter(products, &params.search);
    sort(&mut rows, params.sort);
    let total_matches = rows.len();

    PageView {
        rows: paginate(&rows, params.current_page, params.page_size),
        total_matches,
        page_count: page_count(total_matches, params.page_size),
        current_page: params.current_page.get(),
        page_size: params.page_size.get(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Price;

    fn product(id: i64, name: &str, price: f64, category: Option<&str>) -> Product {
        Product::new(
            ProductId::new(id),
            name,
            Price::new(price).unwrap(),
            category.map(str::to_string),
        )
        .unwrap()
    }

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn ids(rows: &[&Product]) -> Vec<i64> {
        rows.iter().map(|p| p.id().get()).collect()
    }

    fn twelve() -> Vec<Product> {
        (1..=12)
            .map(|i| product(i, &format!("Item {i}"), i as f64, None))
            .collect()
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let products = twelve();
        let rows = filter(&products, "");
        assert_eq!(ids(&rows), (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn filter_is_case_insensitive_across_fields() {
        let products = vec![
            product(1, "Widget", 10.0, Some("Tools")),
            product(2, "Gadget", 5.0, Some("Toys")),
            product(3, "Sprocket", 42.5, None),
        ];
        assert_eq!(ids(&filter(&products, "WIDG")), vec![1]);
        assert_eq!(ids(&filter(&products, "toy")), vec![2]);
        assert_eq!(ids(&filter(&products, "42.5")), vec![3]);
        assert_eq!(ids(&filter(&products, "o")), vec![1, 2, 3]);
        assert!(filter(&products, "zzz").is_empty());
    }

    #[test]
    fn whitespace_in_the_query_is_matched_literally() {
        let products = vec![
            product(1, "Widget", 10.0, None),
            product(2, "Big Gadget", 5.0, None),
            product(3, "Thingamabig", 7.0, None),
        ];
        assert_eq!(ids(&filter(&products, " ")), vec![2]);
        assert_eq!(ids(&filter(&products, "big ")), vec![2]);
        assert_eq!(ids(&filter(&products, "big")), vec![2, 3]);
    }

    #[test]
    fn toggling_sort_alternates_direction() {
        let first = SortConfig::toggled(None, SortKey::Price);
        assert_eq!(first, SortConfig::ascending(SortKey::Price));

        let second = SortConfig::toggled(Some(first), SortKey::Price);
        assert_eq!(second.direction, SortDirection::Descending);

        let third = SortConfig::toggled(Some(second), SortKey::Price);
        assert_eq!(third.direction, SortDirection::Ascending);

        let other = SortConfig::toggled(Some(second), SortKey::Name);
        assert_eq!(other, SortConfig::ascending(SortKey::Name));
    }

    #[test]
    fn price_sort_scenario() {
        let products = vec![
            product(1, "Widget", 10.0, Some("A")),
            product(2, "Gadget", 5.0, Some("B")),
        ];
        let mut params = ViewParams {
            sort: Some(SortConfig::toggled(None, SortKey::Price)),
            ..ViewParams::default()
        };
        assert_eq!(ids(&render(&products, &params).rows), vec![2, 1]);

        params.sort = Some(SortConfig::toggled(params.sort, SortKey::Price));
        assert_eq!(ids(&render(&products, &params).rows), vec![1, 2]);
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let products = vec![
            product(1, "Same", 3.0, None),
            product(2, "Same", 1.0, None),
            product(3, "Other", 2.0, None),
            product(4, "Same", 9.0, None),
        ];
        let mut rows = filter(&products, "");
        sort(&mut rows, Some(SortConfig::ascending(SortKey::Name)));
        assert_eq!(ids(&rows), vec![3, 1, 2, 4]);

        let mut rows = filter(&products, "");
        sort(
            &mut rows,
            Some(SortConfig {
                key: SortKey::Name,
                direction: SortDirection::Descending,
            }),
        );
        assert_eq!(ids(&rows), vec![1, 2, 4, 3]);
    }

    #[test]
    fn missing_category_sorts_first_ascending() {
        let products = vec![
            product(1, "A", 1.0, Some("b")),
            product(2, "B", 1.0, None),
            product(3, "C", 1.0, Some("a")),
        ];
        let mut rows = filter(&products, "");
        sort(&mut rows, Some(SortConfig::ascending(SortKey::Category)));
        assert_eq!(ids(&rows), vec![2, 3, 1]);
    }

    #[test]
    fn pagination_over_twelve_items() {
        let products = twelve();
        let mut params = ViewParams::default();

        let page = render(&products, &params);
        assert_eq!(page.rows.len(), 5);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.page_numbers().collect::<Vec<_>>(), vec![1, 2, 3]);

        params.current_page = nz(3);
        let page = render(&products, &params);
        assert_eq!(ids(&page.rows), vec![11, 12]);
    }

    #[test]
    fn page_past_the_end_is_empty_not_clamped() {
        let products = twelve();
        let params = ViewParams {
            current_page: nz(7),
            ..ViewParams::default()
        };
        let page = render(&products, &params);
        assert!(page.rows.is_empty());
        assert_eq!(page.current_page, 7);
        assert!(!page.is_empty());
    }

    #[test]
    fn no_matches_means_zero_pages() {
        let products = twelve();
        let params = ViewParams {
            search: "nothing like this".into(),
            ..ViewParams::default()
        };
        let page = render(&products, &params);
        assert!(page.is_empty());
        assert_eq!(page.page_count, 0);
        assert_eq!(page.page_numbers().count(), 0);
    }

    #[test]
    fn indicator_follows_active_column() {
        let sort = Some(SortConfig::ascending(SortKey::Name));
        assert_eq!(SortIndicator::of(sort, SortKey::Name), SortIndicator::Ascending);
        assert_eq!(SortIndicator::of(sort, SortKey::Price), SortIndicator::Unsorted);
        assert_eq!(SortIndicator::of(None, SortKey::Name), SortIndicator::Unsorted);
    }

    #[test]
    fn render_does_not_touch_the_catalog() {
        let products = vec![product(2, "B", 2.0, None), product(1, "A", 1.0, None)];
        let before = products.clone();
        let params = ViewParams {
            sort: Some(SortConfig::ascending(SortKey::Name)),
            ..ViewParams::default()
        };
        let _ = render(&products, &params);
        assert_eq!(products, before);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn catalog() -> impl Strategy<Value = Vec<Product>> {
            proptest::collection::vec(("[a-c]{1,2}", 1u32..5, proptest::option::of("[x-z]")), 0..40)
                .prop_map(|rows| {
                    rows.into_iter()
                        .enumerate()
                        .map(|(i, (name, price, category))| {
                            product(i as i64, &name, f64::from(price), category.as_deref())
                        })
                        .collect()
                })
        }

        fn key() -> impl Strategy<Value = SortKey> {
            prop_oneof![Just(SortKey::Name), Just(SortKey::Price), Just(SortKey::Category)]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: equal keys keep their pre-sort relative order.
            #[test]
            fn sort_is_stable(products in catalog(), key in key(), descending in any::<bool>()) {
                let cfg = SortConfig {
                    key,
                    direction: if descending { SortDirection::Descending } else { SortDirection::Ascending },
                };
                let mut rows = filter(&products, "");
                sort(&mut rows, Some(cfg));

                for pair in rows.windows(2) {
                    let ord = cfg.compare(pair[0], pair[1]);
                    prop_assert_ne!(ord, Ordering::Greater);
                    if ord == Ordering::Equal {
                        // ids were assigned in catalog order
                        prop_assert!(pair[0].id() < pair[1].id());
                    }
                }
            }

            /// Property: concatenating every page yields the filtered list.
            #[test]
            fn pages_partition_the_matches(products in catalog(), size in 1usize..8) {
                let size = nz(size);
                let all = filter(&products, "");
                let count = page_count(all.len(), size);
                let mut joined = Vec::new();
                for page in 1..=count {
                    let chunk = paginate(&all, nz(page), size);
                    prop_assert!(!chunk.is_empty() && chunk.len() <= size.get());
                    joined.extend(chunk);
                }
                prop_assert_eq!(ids(&joined), ids(&all));
            }

            /// Property: the empty query is the identity.
            #[test]
            fn empty_query_is_identity(products in catalog()) {
                let rows = filter(&products, "");
                let expected: Vec<&Product> = products.iter().collect();
                prop_assert_eq!(rows, expected);
            }
        }
    }
}
