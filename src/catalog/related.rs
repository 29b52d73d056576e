//! Related product recommendations.

use rustc_hash::FxHashSet;

use crate::products::Product;

/// Pick up to `limit` products to show next to `target`.
///
/// Same-category products come first. If there are fewer than `limit` of them,
/// products from other categories sharing a tag with `target` follow, and any
/// remaining slots are padded from the rest of the catalog. Catalog order is
/// preserved within each stage.
pub(super) fn related_products<'a>(
    products: &'a [Product],
    target: &Product,
    limit: usize,
) -> Vec<&'a Product> {
    let others = || products.iter().filter(move |p| p.id != target.id);

    let same_category: Vec<&Product> = others()
        .filter(|p| p.category == target.category)
        .collect();

    if same_category.len() >= limit {
        return same_category.into_iter().take(limit).collect();
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut related = Vec::with_capacity(limit);

    let mut push = |product: &'a Product, related: &mut Vec<&'a Product>| {
        if related.len() < limit && seen.insert(product.id.as_str()) {
            related.push(product);
        }
    };

    for product in same_category {
        push(product, &mut related);
    }

    if !target.tags.is_empty() {
        for product in others()
            .filter(|p| p.category != target.category && p.tags.intersects(&target.tags))
        {
            push(product, &mut related);
        }
    }

    for product in others() {
        if related.len() >= limit {
            break;
        }

        push(product, &mut related);
    }

    related
}
