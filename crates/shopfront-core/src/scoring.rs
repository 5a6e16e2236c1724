//! Desirability score for "best ranking" ordering and the dynamic rank index
//! behind the "Top N" badges.

use std::collections::HashMap;

use crate::product::Product;

/// Points per rating star. Dominant term: a 5-star product contributes 5000.
pub const RATING_WEIGHT: f64 = 1000.0;

/// Points per unit sold. Separates products that share a rating.
pub const SALES_WEIGHT: f64 = 100.0;

/// Upstream ranks above this value earn no bonus.
pub const RANKING_BONUS_CEILING: i64 = 100;

/// Small nudge for products the backend already ranks in its top 100.
///
/// `ranking = 1` earns 99, `ranking = 100` earns 0, and anything outside
/// `[1, 100]` (or unranked) earns 0.
#[must_use]
pub fn ranking_bonus(ranking: Option<i64>) -> f64 {
    match ranking {
        Some(rank) if (1..=RANKING_BONUS_CEILING).contains(&rank) => {
            #[allow(clippy::cast_precision_loss)]
            let bonus = (RANKING_BONUS_CEILING - rank).max(0) as f64;
            bonus
        }
        _ => 0.0,
    }
}

/// Score a product: `rating × 1000 + sales × 100 + ranking bonus`.
///
/// Missing fields count as zero, so every product has a defined score.
#[must_use]
pub fn product_score(product: &Product) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let sales = product.sales_or_zero() as f64;
    product.rating_or_zero() * RATING_WEIGHT + sales * SALES_WEIGHT + ranking_bonus(product.ranking)
}

/// Order products by descending [`product_score`].
///
/// Returns a new vector of borrows; the source is left untouched. The sort is
/// stable, so equal scores keep their input order.
#[must_use]
pub fn rank_by_score<'a, I>(products: I) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut scored: Vec<(f64, &'a Product)> = products
        .into_iter()
        .map(|p| (product_score(p), p))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, p)| p).collect()
}

/// 1-based position of every product in the score-ordered full catalog.
///
/// Built once per catalog and queried per displayed product, so a product's
/// rank does not depend on the filters currently applied.
#[derive(Debug, Clone, Default)]
pub struct RankIndex {
    ranks: HashMap<String, usize>,
}

impl RankIndex {
    #[must_use]
    pub fn build(catalog: &[Product]) -> Self {
        let ordered = rank_by_score(catalog);
        let mut ranks = HashMap::with_capacity(ordered.len());
        for (position, product) in ordered.into_iter().enumerate() {
            // Duplicate ASINs keep their best (first) position.
            ranks.entry(product.asin.clone()).or_insert(position + 1);
        }
        Self { ranks }
    }

    #[must_use]
    pub fn rank_of(&self, asin: &str) -> Option<usize> {
        self.ranks.get(asin).copied()
    }

    /// Rank to show on a "Top N" badge, if the product is within `limit`.
    #[must_use]
    pub fn top_badge(&self, asin: &str, limit: usize) -> Option<usize> {
        self.rank_of(asin).filter(|rank| *rank <= limit)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}
