use crate::filters::{ProductPredicate, SearchPredicate};
use crate::product::Product;

/// Search-box suggestions: the first `limit` products matching `text`, in
/// catalog order. Blank text suggests nothing.
pub fn suggestions<'p>(products: &'p [Product], text: &str, limit: usize) -> Vec<&'p Product> {
    let predicate = SearchPredicate::new(text);
    if !predicate.is_active() {
        return Vec::new();
    }
    products
        .iter()
        .filter(|p| predicate.matches(p))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("1", "Televisor LG", "tv", "LG", 300, 4.0),
            Product::new("2", "Teléfono", "phone", "Samsung", 200, 3.0),
            Product::new("3", "Tetera", "home", "Oster", 50, 5.0),
            Product::new("4", "Radio", "audio", "Sony", 80, 2.0),
        ]
    }

    #[test]
    fn blank_text_suggests_nothing() {
        assert!(suggestions(&catalog(), "  ", 5).is_empty());
    }

    #[test]
    fn limits_matches_in_catalog_order() {
        let products = catalog();
        let ids: Vec<&str> = suggestions(&products, "te", 2)
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn matches_brand_too() {
        let products = catalog();
        let found = suggestions(&products, "SONY", 5);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Radio");
    }
}
