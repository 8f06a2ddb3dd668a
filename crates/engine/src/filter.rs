use inventory_core::{Product, ProductId};

use crate::events::CatalogEvent;

/// The products matching the current search query, in catalog order.
///
/// Holds ids only; the product data always comes from the catalog.
#[derive(Debug, Clone, Default)]
pub struct FilteredView {
    query: String,
    visible: Vec<ProductId>,
}

impl FilteredView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible_ids(&self) -> &[ProductId] {
        &self.visible
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.visible.contains(&id)
    }

    /// Name or category contains the trimmed query, ignoring case. A blank
    /// query matches everything.
    pub fn matches(query: &str, product: &Product) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        product.name.to_lowercase().contains(&needle)
            || product.category.to_lowercase().contains(&needle)
    }

    pub(crate) fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub(crate) fn recompute(&mut self, products: &[Product]) {
        self.visible = products
            .iter()
            .filter(|p| Self::matches(&self.query, p))
            .map(|p| p.id)
            .collect();
    }

    pub(crate) fn on_event(&mut self, event: &CatalogEvent, products: &[Product]) {
        if matches!(event, CatalogEvent::ProductsChanged | CatalogEvent::QueryChanged) {
            self.recompute(products);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Vec<Product> {
        vec![
            Product::new(ProductId::new(), "Bolt", "Hardware", 5),
            Product::new(ProductId::new(), "Nail", "Hardware", 9),
            Product::new(ProductId::new(), "Pen", "Office", 3),
        ]
    }

    fn names<'a>(view: &FilteredView, products: &'a [Product]) -> Vec<&'a str> {
        products
            .iter()
            .filter(|p| view.contains(p.id))
            .map(|p| p.name.as_str())
            .collect()
    }

    #[test]
    fn empty_query_shows_everything() {
        let products = products();
        let mut view = FilteredView::new();
        view.recompute(&products);
        assert_eq!(view.visible_ids().len(), 3);
    }

    #[test]
    fn query_matches_category_case_insensitively() {
        let products = products();
        let mut view = FilteredView::new();
        view.set_query("  hard ");
        view.recompute(&products);
        assert_eq!(names(&view, &products), ["Bolt", "Nail"]);
    }

    #[test]
    fn query_matches_name_substring() {
        let products = products();
        let mut view = FilteredView::new();
        view.set_query("EN");
        view.recompute(&products);
        assert_eq!(names(&view, &products), ["Pen"]);
    }

    #[test]
    fn only_product_and_query_events_recompute() {
        let products = products();
        let mut view = FilteredView::new();
        view.set_query("office");
        view.on_event(&CatalogEvent::SuggestionsChanged, &products);
        assert!(view.visible_ids().is_empty());
        view.on_event(&CatalogEvent::QueryChanged, &products);
        assert_eq!(view.visible_ids(), [products[2].id]);
    }
}
