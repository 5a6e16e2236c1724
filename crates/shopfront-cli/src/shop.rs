//! `shop` and `facets` command handlers.

use shopfront_core::{
    AppConfig, Catalog, CategoryFilter, Criteria, ListingEntry, Product, Role, SessionUser,
    ShopSession, SortMode, StockStatus, StoreFilter, StoreSettings,
};

const NAME_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShopArgs {
    pub search: String,
    pub category: String,
    pub store: String,
    pub price: Option<String>,
    pub sort: SortMode,
    pub seller_id: Option<i64>,
    pub limit: Option<usize>,
}

/// Turn raw command-line values into pipeline criteria.
///
/// A price value matching a configured preset label uses that preset's range.
///
/// # Errors
///
/// Returns an error if the price value is neither a preset label nor a
/// well-formed range.
pub(crate) fn build_criteria(
    args: &ShopArgs,
    settings: &StoreSettings,
) -> anyhow::Result<Criteria> {
    let price = match args.price.as_deref() {
        None => None,
        Some(raw) => match settings.preset(raw) {
            Some(preset) => Some(preset.range),
            None => Criteria::parse_price(raw)?,
        },
    };

    Ok(Criteria {
        search: args.search.clone(),
        category: CategoryFilter::parse(&args.category),
        store: StoreFilter::parse(&args.store, &settings.platform_store),
        price,
        sort: args.sort,
    })
}

/// Session for the viewer the listing is rendered for. A seller id signs in
/// as that seller so their own listings drop out of the catalog.
fn viewer_session(seller_id: Option<i64>, config: &AppConfig) -> ShopSession {
    let mut session = ShopSession::default();
    if let Some(id) = seller_id {
        session.login(
            config.api_token.clone().unwrap_or_default(),
            SessionUser {
                id,
                name: format!("seller-{id}"),
                role: Role::Seller,
            },
        );
    }
    session
}

/// Run the pipeline over `products` and print the listing.
///
/// # Errors
///
/// Returns an error if the criteria cannot be parsed.
pub(crate) fn run_shop(
    products: Vec<Product>,
    args: &ShopArgs,
    settings: &StoreSettings,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let criteria = build_criteria(args, settings)?;
    let session = viewer_session(args.seller_id, config);
    let catalog = Catalog::for_viewer(products, &session);
    let listing = catalog.listing(&criteria, settings);

    if let Some(active) = active_filters(&criteria, settings) {
        println!("{active}");
    }
    if listing.is_empty() {
        println!("No products match the current filters.");
        println!("{}", listing.summary());
        return Ok(());
    }

    println!(
        "{:<6}{:<12}{:<42}{:>10}  {:<7}{:<14}{:<18}BADGE",
        "RANK", "ASIN", "NAME", "PRICE", "RATING", "STOCK", "STORE"
    );
    let shown = args.limit.unwrap_or(usize::MAX);
    for entry in listing.entries.iter().take(shown) {
        println!("{}", format_row(entry, settings));
    }
    println!();
    println!("{}", listing.summary());

    Ok(())
}

/// "Active filters: ..." line naming each narrowing filter, or `None` when
/// only search (or nothing) is applied.
pub(crate) fn active_filters(criteria: &Criteria, settings: &StoreSettings) -> Option<String> {
    if !criteria.has_active_filters() {
        return None;
    }

    let mut labels = Vec::new();
    if let CategoryFilter::Named(name) = &criteria.category {
        labels.push(name.clone());
    }
    match &criteria.store {
        StoreFilter::All => {}
        StoreFilter::Platform => labels.push(settings.platform_store.clone()),
        StoreFilter::Seller(name) => labels.push(name.clone()),
    }
    if let Some(range) = criteria.price {
        labels.push(match range.max {
            Some(max) => format!("${} - ${max}", range.min),
            None => format!("${}+", range.min),
        });
    }
    Some(format!("Active filters: {}", labels.join(", ")))
}

pub(crate) fn format_row(entry: &ListingEntry<'_>, settings: &StoreSettings) -> String {
    let product = entry.product;
    let rank = entry
        .dynamic_rank
        .map_or_else(|| "-".to_string(), |r| format!("#{r}"));
    let rating = product
        .rating
        .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
    let stock = match entry.stock {
        StockStatus::OutOfStock => "out of stock".to_string(),
        StockStatus::Low(left) => format!("only {left} left"),
        StockStatus::InStock => "in stock".to_string(),
    };
    let store = product
        .seller_name
        .clone()
        .unwrap_or_else(|| settings.platform_store.clone());
    let badge = entry
        .top_badge
        .map(|r| format!("Top {r}"))
        .unwrap_or_default();
    let price = format!("${:.2}", product.price);

    format!(
        "{:<6}{:<12}{:<42}{:>10}  {:<7}{:<14}{:<18}{}",
        rank,
        product.asin,
        truncate(&product.product_name, NAME_WIDTH),
        price,
        rating,
        stock,
        truncate(&store, 16),
        badge
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width - 3).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Print the category and store dropdown options.
pub(crate) fn run_facets(products: Vec<Product>, settings: &StoreSettings) {
    let catalog = Catalog::new(products);

    println!("Categories:");
    for category in catalog.categories() {
        println!("  {category}");
    }

    println!("Stores:");
    for store in catalog.stores(settings) {
        match store.seller_id {
            Some(id) => println!("  {} (seller {id})", store.name),
            None => println!("  {}", store.name),
        }
    }

    println!("Price ranges:");
    for preset in &settings.price_ranges {
        println!("  {:<16}{}", preset.label, preset.range);
    }
}
