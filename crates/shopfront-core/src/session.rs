//! Explicit application state: the signed-in user, their bearer token, and
//! the shopping cart. All changes go through the action methods below.

use rust_decimal::Decimal;

use crate::error::CartError;
use crate::product::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Buyer,
    Seller,
    Admin,
    Analyst,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Cart lines keyed by ASIN, in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Add `quantity` units, merging with an existing line for the same ASIN.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`] when `quantity` is zero.
    /// - [`CartError::InsufficientStock`] when the line would exceed the
    ///   product's stock (absent stock counts as zero).
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let current = self.quantity_of(&product.asin);
        let requested = u64::from(current) + u64::from(quantity);
        ensure_in_stock(product, requested)?;

        match self.items.iter_mut().find(|i| i.product.asin == product.asin) {
            Some(item) => item.quantity += quantity,
            None => self.items.push(CartItem {
                product: product.clone(),
                quantity,
            }),
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] if no line exists for `asin`.
    pub fn remove_item(&mut self, asin: &str) -> Result<CartItem, CartError> {
        let position = self
            .items
            .iter()
            .position(|i| i.product.asin == asin)
            .ok_or_else(|| CartError::NotInCart(asin.to_string()))?;
        Ok(self.items.remove(position))
    }

    /// Set a line's quantity. Zero removes the line.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotInCart`] if no line exists for `asin`.
    /// - [`CartError::InsufficientStock`] if `quantity` exceeds stock.
    pub fn update_quantity(&mut self, asin: &str, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove_item(asin).map(|_| ());
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.product.asin == asin)
            .ok_or_else(|| CartError::NotInCart(asin.to_string()))?;
        ensure_in_stock(&item.product, u64::from(quantity))?;
        item.quantity = quantity;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn quantity_of(&self, asin: &str) -> u32 {
        self.items
            .iter()
            .find(|i| i.product.asin == asin)
            .map_or(0, |i| i.quantity)
    }

    #[must_use]
    pub fn contains(&self, asin: &str) -> bool {
        self.items.iter().any(|i| i.product.asin == asin)
    }

    /// Whether one more unit of `product` fits within its stock.
    #[must_use]
    pub fn can_add_more(&self, product: &Product) -> bool {
        product.stock_or_zero() > i64::from(self.quantity_of(&product.asin))
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn ensure_in_stock(product: &Product, requested: u64) -> Result<(), CartError> {
    let available = product.stock_or_zero();
    let fits = u64::try_from(available).is_ok_and(|stock| requested <= stock);
    if fits {
        Ok(())
    } else {
        Err(CartError::InsufficientStock {
            asin: product.asin.clone(),
            requested,
            available,
        })
    }
}

/// Per-user storefront state handed to whatever needs it, instead of
/// ambient globals.
#[derive(Clone, Default)]
pub struct ShopSession {
    token: Option<String>,
    user: Option<SessionUser>,
    cart: Cart,
}

impl std::fmt::Debug for ShopSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopSession")
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .field("user", &self.user)
            .field("cart", &self.cart)
            .finish()
    }
}

impl ShopSession {
    /// Start a session with a token issued by the external auth service.
    pub fn login(&mut self, token: impl Into<String>, user: SessionUser) {
        tracing::info!(user_id = user.id, role = ?user.role, "session started");
        self.token = Some(token.into());
        self.user = Some(user);
    }

    /// End the session, dropping the token and the cart.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = user.id, "session ended");
        }
        self.token = None;
        self.cart.clear();
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// # Errors
    ///
    /// See [`Cart::add_item`].
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        self.cart.add_item(product, quantity)
    }

    /// # Errors
    ///
    /// See [`Cart::remove_item`].
    pub fn remove_item(&mut self, asin: &str) -> Result<CartItem, CartError> {
        self.cart.remove_item(asin)
    }

    /// # Errors
    ///
    /// See [`Cart::update_quantity`].
    pub fn update_quantity(&mut self, asin: &str, quantity: u32) -> Result<(), CartError> {
        self.cart.update_quantity(asin, quantity)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }
}
