use crate::criteria::Criteria;
use crate::facets::{self, StoreOption};
use crate::pipeline::apply_criteria;
use crate::product::{Product, StockStatus};
use crate::scoring::RankIndex;
use crate::session::{Role, ShopSession};
use crate::store::StoreSettings;

/// The product list a shop page works from, together with its rank index.
///
/// A catalog is replaced wholesale when the products are re-fetched; the
/// rank index is rebuilt with it and is never recomputed per query.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    ranks: RankIndex,
}

/// One rendered row of the shop listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingEntry<'a> {
    pub product: &'a Product,
    /// Position in the unfiltered catalog ordered by score.
    pub dynamic_rank: Option<usize>,
    /// Set when the product falls within the configured "Top N" badge limit.
    pub top_badge: Option<usize>,
    pub stock: StockStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listing<'a> {
    pub entries: Vec<ListingEntry<'a>>,
    /// Size of the catalog the entries were drawn from.
    pub catalog_size: usize,
}

impl Listing<'_> {
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} products",
            self.entries.len(),
            self.catalog_size
        )
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Catalog {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        let ranks = RankIndex::build(&products);
        Self { products, ranks }
    }

    /// Build the catalog a given viewer shops from.
    ///
    /// Sellers never see their own listings, so those are dropped before the
    /// rank index is computed.
    #[must_use]
    pub fn for_viewer(products: Vec<Product>, session: &ShopSession) -> Self {
        match session.user() {
            Some(user) if user.role == Role::Seller => {
                let before = products.len();
                let products: Vec<Product> = products
                    .into_iter()
                    .filter(|p| p.seller_id != Some(user.id))
                    .collect();
                tracing::debug!(
                    seller_id = user.id,
                    hidden = before - products.len(),
                    "excluded seller's own listings from catalog"
                );
                Self::new(products)
            }
            _ => Self::new(products),
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn find(&self, asin: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.asin == asin)
    }

    #[must_use]
    pub fn dynamic_rank(&self, asin: &str) -> Option<usize> {
        self.ranks.rank_of(asin)
    }

    #[must_use]
    pub fn query(&self, criteria: &Criteria) -> Vec<&Product> {
        apply_criteria(&self.products, criteria)
    }

    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        facets::categories(&self.products)
    }

    #[must_use]
    pub fn stores(&self, settings: &StoreSettings) -> Vec<StoreOption> {
        facets::stores(&self.products, &settings.platform_store)
    }

    /// Run the pipeline and decorate each hit with its badges.
    #[must_use]
    pub fn listing(&self, criteria: &Criteria, settings: &StoreSettings) -> Listing<'_> {
        let entries = self
            .query(criteria)
            .into_iter()
            .map(|product| ListingEntry {
                product,
                dynamic_rank: self.ranks.rank_of(&product.asin),
                top_badge: self
                    .ranks
                    .top_badge(&product.asin, settings.top_badge_limit),
                stock: product.stock_status(settings.low_stock_threshold),
            })
            .collect();

        Listing {
            entries,
            catalog_size: self.products.len(),
        }
    }
}
