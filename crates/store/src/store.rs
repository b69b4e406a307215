//! The multi-index store.
//!
//! Every mutation follows the same discipline: validate everything first,
//! then update the primary map and each secondary index before returning.
//! Entities whose index keys depend on mutable fields are taken out of the
//! ordered index before they are changed and put back afterwards; an ordered
//! index is never asked to reposition an entry in place.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use datastore_core::{
    Category, CustomerId, Email, LoyaltyPoints, Name, OrderId, OrderStatus, Price, ProductId,
    ValidationError,
};

use crate::clock::{Clock, SystemClock};
use crate::entity::{
    Customer, CustomerKey, Order, OrderItem, OrderTimeKey, PriceLookup, Product, ProductKey,
};
use crate::error::{EntityKind, StoreError};

/// Fields to change on a customer. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub loyalty_points: Option<i64>,
}

impl CustomerUpdate {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub const fn loyalty_points(mut self, points: i64) -> Self {
        self.loyalty_points = Some(points);
        self
    }
}

/// Fields to change on a product. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
}

impl ProductUpdate {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }
}

/// In-memory repository of customers, products and orders.
///
/// # Indexes
///
/// - `customers`, `products`, `orders`: primary maps, the source of truth for existence
/// - `customer_emails`: every live customer's email, exactly once
/// - `product_categories`: the categories of live products, exactly
/// - `customers_sorted`, `products_sorted`: natural-order keys of live entities
/// - `orders_by_time`: `(created_at, id)` of every live order
///
/// The store is single-writer. Wrap it in a [`SharedStore`](crate::SharedStore)
/// to share it between threads.
pub struct Store {
    customers: HashMap<CustomerId, Customer>,
    products: HashMap<ProductId, Product>,
    orders: HashMap<OrderId, Order>,

    customer_emails: HashSet<Email>,
    product_categories: HashSet<Category>,

    customers_sorted: BTreeSet<CustomerKey>,
    products_sorted: BTreeSet<ProductKey>,

    orders_by_time: BTreeSet<OrderTimeKey>,

    clock: Box<dyn Clock>,
}

impl Store {
    /// Create an empty store stamping orders with wall-clock time.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create an empty store using `clock` for order timestamps.
    #[must_use]
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            customers: HashMap::new(),
            products: HashMap::new(),
            orders: HashMap::new(),
            customer_emails: HashSet::new(),
            product_categories: HashSet::new(),
            customers_sorted: BTreeSet::new(),
            products_sorted: BTreeSet::new(),
            orders_by_time: BTreeSet::new(),
            clock: Box::new(clock),
        }
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Create a customer.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field is invalid or another live
    /// customer already has the (trimmed) email.
    pub fn create_customer(
        &mut self,
        name: &str,
        email: &str,
        loyalty_points: i64,
    ) -> Result<&Customer, StoreError> {
        let customer = Customer::new(CustomerId::generate(), name, email, loyalty_points)?;
        if self.customer_emails.contains(customer.email()) {
            return Err(ValidationError::DuplicateEmail(customer.email().to_string()).into());
        }

        let id = customer.id();
        self.customer_emails.insert(customer.email().clone());
        self.customers_sorted.insert(customer.sort_key());
        debug!(customer_id = %id, email = %customer.email(), "Created customer");

        Ok(&*self.customers.entry(id).or_insert(customer))
    }

    #[must_use]
    pub fn read_customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(&id)
    }

    /// Apply `update` to a customer, fields in the order name, email, points.
    ///
    /// Every supplied field and the email uniqueness rule are checked before
    /// anything changes: on error the customer and all indexes are untouched,
    /// including the customer's current email in the uniqueness set.
    ///
    /// # Errors
    ///
    /// Returns not-found if `id` is unknown, or a validation error if a field
    /// is invalid or the new email belongs to another customer.
    pub fn update_customer(
        &mut self,
        id: CustomerId,
        update: CustomerUpdate,
    ) -> Result<&Customer, StoreError> {
        let customer = self
            .customers
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Customer, id))?;

        let name = update.name.as_deref().map(Name::parse).transpose()?;
        let email = update.email.as_deref().map(Email::parse).transpose()?;
        let loyalty_points = update
            .loyalty_points
            .map(LoyaltyPoints::new)
            .transpose()?;

        if let Some(email) = &email
            && email != customer.email()
            && self.customer_emails.contains(email)
        {
            return Err(ValidationError::DuplicateEmail(email.to_string()).into());
        }

        // Both the ordered key and the email set entry derive from fields
        // that may change.
        self.customers_sorted.remove(&customer.sort_key());
        self.customer_emails.remove(customer.email());

        if let Some(name) = name {
            customer.set_name(name);
        }
        if let Some(email) = email {
            customer.set_email(email);
        }
        if let Some(points) = loyalty_points {
            customer.set_loyalty_points(points);
        }

        self.customer_emails.insert(customer.email().clone());
        self.customers_sorted.insert(customer.sort_key());
        debug!(customer_id = %id, "Updated customer");

        Ok(&*customer)
    }

    /// Delete a customer and every order it owns.
    ///
    /// Returns `false` if the customer does not exist.
    #[instrument(skip(self))]
    pub fn delete_customer(&mut self, id: CustomerId) -> bool {
        let Some(customer) = self.customers.remove(&id) else {
            return false;
        };
        self.customer_emails.remove(customer.email());
        self.customers_sorted.remove(&customer.sort_key());

        let owned: Vec<OrderId> = self
            .orders
            .values()
            .filter(|order| order.customer_id() == id)
            .map(Order::id)
            .collect();
        for order_id in &owned {
            self.delete_order(*order_id);
        }

        info!(orders_removed = owned.len(), "Deleted customer");
        true
    }

    /// Point-in-time copy of all customers, in no particular order.
    #[must_use]
    pub fn list_customers(&self) -> Vec<Customer> {
        self.customers.values().cloned().collect()
    }

    /// Customers in natural order (name, email, ID).
    pub fn list_customers_ordered(&self) -> impl Iterator<Item = &Customer> {
        self.customers_sorted
            .iter()
            .filter_map(|key| self.customers.get(&key.id))
    }

    #[must_use]
    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field is blank or the price is negative.
    pub fn create_product(
        &mut self,
        name: &str,
        category: &str,
        price: Decimal,
    ) -> Result<&Product, StoreError> {
        let product = Product::new(ProductId::generate(), name, category, price)?;

        let id = product.id();
        self.product_categories.insert(product.category().clone());
        self.products_sorted.insert(product.sort_key());
        debug!(product_id = %id, category = %product.category(), "Created product");

        Ok(&*self.products.entry(id).or_insert(product))
    }

    #[must_use]
    pub fn read_product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Apply `update` to a product, fields in the order name, category, price.
    ///
    /// All supplied fields are validated before the product is looked up, so
    /// nothing changes on error. When the category changes the category set
    /// is rebuilt from the live products.
    ///
    /// # Errors
    ///
    /// Returns not-found if `id` is unknown, or a validation error if a field
    /// is invalid.
    pub fn update_product(
        &mut self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<&Product, StoreError> {
        let name = update.name.as_deref().map(Name::parse).transpose()?;
        let category = update.category.as_deref().map(Category::parse).transpose()?;
        let price = update.price.map(Price::new).transpose()?;

        let mut product = self
            .products
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Product, id))?;
        self.products_sorted.remove(&product.sort_key());
        let old_category = product.category().clone();

        if let Some(name) = name {
            product.set_name(name);
        }
        if let Some(category) = category {
            product.set_category(category);
        }
        if let Some(price) = price {
            product.set_price(price);
        }

        // The product is out of the primary map here, so a rescan covers
        // only the other products and its own category is added back after.
        let category_changed = *product.category() != old_category;
        if category_changed {
            self.recompute_categories();
        }
        self.product_categories.insert(product.category().clone());
        self.products_sorted.insert(product.sort_key());
        debug!(product_id = %id, category_changed, "Updated product");

        Ok(&*self.products.entry(id).or_insert(product))
    }

    /// Delete a product and strip its lines from every order.
    ///
    /// Orders are kept even when this leaves them empty. Returns `false` if the
    /// product does not exist.
    #[instrument(skip(self))]
    pub fn delete_product(&mut self, id: ProductId) -> bool {
        let Some(product) = self.products.remove(&id) else {
            return false;
        };
        self.products_sorted.remove(&product.sort_key());
        self.recompute_categories();

        let mut orders_touched = 0usize;
        let mut lines_removed = 0usize;
        for order in self.orders.values_mut() {
            let removed = order.remove_items_for_product(id);
            if removed > 0 {
                orders_touched += 1;
                lines_removed += removed;
            }
        }

        info!(orders_touched, lines_removed, "Deleted product");
        true
    }

    /// Point-in-time copy of all products, in no particular order.
    #[must_use]
    pub fn list_products(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    /// Products in natural order (name, category, price, ID).
    pub fn list_products_ordered(&self) -> impl Iterator<Item = &Product> {
        self.products_sorted
            .iter()
            .filter_map(|key| self.products.get(&key.id))
    }

    /// Categories of the live products, as maintained by the mutators.
    #[must_use]
    pub const fn list_categories(&self) -> &HashSet<Category> {
        &self.product_categories
    }

    #[must_use]
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    // No per-category counts are kept, so removal is a full rescan.
    fn recompute_categories(&mut self) {
        self.product_categories.clear();
        self.product_categories
            .extend(self.products.values().map(|p| p.category().clone()));
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Open a new order for `customer_id`, stamped with the store's clock.
    ///
    /// # Errors
    ///
    /// Returns not-found if the customer does not exist.
    pub fn create_order(&mut self, customer_id: CustomerId) -> Result<&Order, StoreError> {
        if !self.customers.contains_key(&customer_id) {
            return Err(StoreError::not_found(EntityKind::Customer, customer_id));
        }

        let order = Order::new(OrderId::generate(), customer_id, self.clock.now());
        let id = order.id();
        self.orders_by_time.insert(order.time_key());
        debug!(order_id = %id, customer_id = %customer_id, "Created order");

        Ok(&*self.orders.entry(id).or_insert(order))
    }

    #[must_use]
    pub fn read_order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    /// Append a line for `product_id` to an order. No stock check is made.
    ///
    /// # Errors
    ///
    /// Returns not-found if the order or the product is unknown, or a
    /// validation error if `quantity` is not positive.
    pub fn add_item_to_order(
        &mut self,
        order_id: OrderId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<&Order, StoreError> {
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Order, order_id))?;
        let product = self
            .products
            .get(&product_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Product, product_id))?;

        order.push_item(OrderItem::new(product, quantity)?);
        debug!(order_id = %order_id, product_id = %product_id, quantity, "Added order item");

        Ok(&*order)
    }

    /// Overwrite an order's status. Any status may follow any other.
    ///
    /// # Errors
    ///
    /// Returns not-found if the order is unknown.
    pub fn update_order_status(
        &mut self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<&Order, StoreError> {
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Order, order_id))?;
        order.set_status(status);
        debug!(order_id = %order_id, %status, "Updated order status");

        Ok(&*order)
    }

    /// Delete an order. Returns `false` if it does not exist.
    pub fn delete_order(&mut self, id: OrderId) -> bool {
        let Some(order) = self.orders.remove(&id) else {
            return false;
        };
        self.orders_by_time.remove(&order.time_key());
        debug!(order_id = %id, "Deleted order");
        true
    }

    /// Point-in-time copy of all orders, in no particular order.
    #[must_use]
    pub fn list_orders(&self) -> Vec<Order> {
        self.orders.values().cloned().collect()
    }

    /// `(created_at, order_id)` pairs, oldest first. Orders sharing a
    /// timestamp are ordered by ID.
    pub fn list_orders_by_time(&self) -> impl Iterator<Item = (DateTime<Utc>, OrderId)> {
        self.orders_by_time.iter().map(|key| (key.created_at, key.id))
    }

    /// Orders oldest first.
    pub fn orders_by_time(&self) -> impl Iterator<Item = &Order> {
        self.orders_by_time
            .iter()
            .filter_map(|key| self.orders.get(&key.id))
    }

    /// Orders owned by `customer_id`, in no particular order.
    pub fn orders_for_customer(&self, customer_id: CustomerId) -> impl Iterator<Item = &Order> {
        self.orders
            .values()
            .filter(move |order| order.customer_id() == customer_id)
    }

    /// Current total of an order, resolved against live product prices.
    #[must_use]
    pub fn order_total(&self, id: OrderId) -> Option<Decimal> {
        self.orders.get(&id).map(|order| order.total(self))
    }

    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    // =========================================================================
    // Consistency
    // =========================================================================

    /// Cross-check every secondary index against the primary maps.
    ///
    /// Returns a description of each inconsistency found; empty when coherent.
    #[must_use]
    pub fn check_invariants(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.customer_emails.len() != self.customers.len() {
            problems.push(format!(
                "email set has {} entries for {} customers",
                self.customer_emails.len(),
                self.customers.len()
            ));
        }
        if self.customers_sorted.len() != self.customers.len() {
            problems.push(format!(
                "customer view has {} entries for {} customers",
                self.customers_sorted.len(),
                self.customers.len()
            ));
        }
        for customer in self.customers.values() {
            if !self.customer_emails.contains(customer.email()) {
                problems.push(format!("email of customer {} not indexed", customer.id()));
            }
            if !self.customers_sorted.contains(&customer.sort_key()) {
                problems.push(format!("customer {} missing from ordered view", customer.id()));
            }
        }

        if self.products_sorted.len() != self.products.len() {
            problems.push(format!(
                "product view has {} entries for {} products",
                self.products_sorted.len(),
                self.products.len()
            ));
        }
        for product in self.products.values() {
            if !self.products_sorted.contains(&product.sort_key()) {
                problems.push(format!("product {} missing from ordered view", product.id()));
            }
        }
        let live_categories: HashSet<&Category> =
            self.products.values().map(Product::category).collect();
        let indexed_categories: HashSet<&Category> = self.product_categories.iter().collect();
        if live_categories != indexed_categories {
            problems.push("category set differs from live product categories".to_owned());
        }

        if self.orders_by_time.len() != self.orders.len() {
            problems.push(format!(
                "time view has {} entries for {} orders",
                self.orders_by_time.len(),
                self.orders.len()
            ));
        }
        for order in self.orders.values() {
            if !self.orders_by_time.contains(&order.time_key()) {
                problems.push(format!("order {} missing from time view", order.id()));
            }
            for item in order.items() {
                if !self.products.contains_key(&item.product_id()) {
                    problems.push(format!(
                        "order {} references deleted product {}",
                        order.id(),
                        item.product_id()
                    ));
                }
            }
        }

        problems
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("customers", &self.customers.len())
            .field("products", &self.products.len())
            .field("orders", &self.orders.len())
            .field("categories", &self.product_categories)
            .finish_non_exhaustive()
    }
}

impl PriceLookup for Store {
    fn price_of(&self, id: ProductId) -> Option<Price> {
        self.products.get(&id).map(Product::price)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::clock::FixedClock;

    fn assert_coherent(store: &Store) {
        let problems = store.check_invariants();
        assert!(problems.is_empty(), "index problems: {problems:?}");
    }

    fn categories(store: &Store) -> Vec<&str> {
        let mut cats: Vec<&str> = store.list_categories().iter().map(Category::as_str).collect();
        cats.sort_unstable();
        cats
    }

    // -------------------------------------------------------------------------
    // Customers
    // -------------------------------------------------------------------------

    #[test]
    fn test_create_customer_indexes_everything() {
        let mut store = Store::new();
        let id = store.create_customer(" Ann ", " a@x.com ", 10).unwrap().id();

        let ann = store.read_customer(id).unwrap();
        assert_eq!(ann.name().as_str(), "Ann");
        assert_eq!(ann.email().as_str(), "a@x.com");
        assert_eq!(ann.loyalty_points().get(), 10);
        assert_eq!(store.list_customers_ordered().count(), 1);
        assert_coherent(&store);
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let mut store = Store::new();
        store.create_customer("Ann", "a@x.com", 10).unwrap();

        let err = store.create_customer("Bo", "a@x.com", 5).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(store.customer_count(), 1);

        // Comparison is on the trimmed value
        assert!(store.create_customer("Bo", "  a@x.com", 5).unwrap_err().is_conflict());

        // ...and case-sensitive
        store.create_customer("Bo", "A@x.com", 5).unwrap();
        assert_eq!(store.customer_count(), 2);
        assert_coherent(&store);
    }

    #[test]
    fn test_create_customer_validation() {
        let mut store = Store::new();
        assert!(store.create_customer("", "a@x.com", 1).unwrap_err().is_validation());
        assert!(store.create_customer("Ann", " ", 1).unwrap_err().is_validation());
        assert!(store.create_customer("Ann", "a@x.com", -1).unwrap_err().is_validation());
        assert_eq!(store.customer_count(), 0);
        assert_coherent(&store);
    }

    #[test]
    fn test_read_missing_customer_is_none() {
        let store = Store::new();
        assert!(store.read_customer(CustomerId::generate()).is_none());
    }

    #[test]
    fn test_update_customer_repositions_in_view() {
        let mut store = Store::new();
        let ann = store.create_customer("Ann", "ann@x.com", 1).unwrap().id();
        store.create_customer("Bo", "bo@x.com", 1).unwrap();

        store
            .update_customer(ann, CustomerUpdate::default().name("Zed").loyalty_points(99))
            .unwrap();

        let names: Vec<_> = store
            .list_customers_ordered()
            .map(|c| c.name().as_str())
            .collect();
        assert_eq!(names, ["Bo", "Zed"]);
        assert_eq!(store.read_customer(ann).unwrap().loyalty_points().get(), 99);
        assert_coherent(&store);
    }

    #[test]
    fn test_update_customer_email_moves_uniqueness() {
        let mut store = Store::new();
        let ann = store.create_customer("Ann", "ann@x.com", 1).unwrap().id();

        store
            .update_customer(ann, CustomerUpdate::default().email("new@x.com"))
            .unwrap();

        // Old email is free again, new one is taken
        store.create_customer("Bo", "ann@x.com", 1).unwrap();
        assert!(store.create_customer("Cy", "new@x.com", 1).unwrap_err().is_conflict());
        assert_coherent(&store);
    }

    #[test]
    fn test_update_customer_same_email_is_not_conflict() {
        let mut store = Store::new();
        let ann = store.create_customer("Ann", "ann@x.com", 1).unwrap().id();
        store
            .update_customer(ann, CustomerUpdate::default().email("ann@x.com"))
            .unwrap();
        assert_coherent(&store);
    }

    // Failed email updates are atomic: the customer's original email stays
    // reserved and no field is changed.
    #[test]
    fn test_failed_email_update_keeps_original_email_reserved() {
        let mut store = Store::new();
        let ann = store.create_customer("Ann", "ann@x.com", 1).unwrap().id();
        store.create_customer("Bo", "bo@x.com", 1).unwrap();

        let err = store
            .update_customer(ann, CustomerUpdate::default().name("Anna").email("bo@x.com"))
            .unwrap_err();
        assert!(err.is_conflict());

        let unchanged = store.read_customer(ann).unwrap();
        assert_eq!(unchanged.name().as_str(), "Ann");
        assert_eq!(unchanged.email().as_str(), "ann@x.com");
        assert!(store.create_customer("Cy", "ann@x.com", 1).unwrap_err().is_conflict());
        assert_coherent(&store);
    }

    #[test]
    fn test_failed_points_update_changes_nothing() {
        let mut store = Store::new();
        let ann = store.create_customer("Ann", "ann@x.com", 1).unwrap().id();

        let err = store
            .update_customer(ann, CustomerUpdate::default().name("Anna").loyalty_points(-1))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.read_customer(ann).unwrap().name().as_str(), "Ann");
        assert_coherent(&store);
    }

    #[test]
    fn test_update_unknown_customer() {
        let mut store = Store::new();
        let err = store
            .update_customer(CustomerId::generate(), CustomerUpdate::default().name("X"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_customer_cascades_orders() {
        let mut store = Store::new();
        let ann = store.create_customer("Ann", "ann@x.com", 1).unwrap().id();
        let bo = store.create_customer("Bo", "bo@x.com", 1).unwrap().id();
        for _ in 0..3 {
            store.create_order(ann).unwrap();
        }
        let kept = store.create_order(bo).unwrap().id();

        assert!(store.delete_customer(ann));
        assert_eq!(store.orders_for_customer(ann).count(), 0);
        assert_eq!(store.order_count(), 1);
        assert!(store.read_order(kept).is_some());
        assert_eq!(store.list_orders_by_time().count(), 1);

        // Email is released
        store.create_customer("Ann again", "ann@x.com", 0).unwrap();
        assert_coherent(&store);
    }

    #[test]
    fn test_delete_absent_customer() {
        let mut store = Store::new();
        store.create_customer("Ann", "ann@x.com", 1).unwrap();
        assert!(!store.delete_customer(CustomerId::generate()));
        assert_eq!(store.customer_count(), 1);
        assert_coherent(&store);
    }

    #[test]
    fn test_list_customers_is_a_snapshot() {
        let mut store = Store::new();
        let ann = store.create_customer("Ann", "ann@x.com", 1).unwrap().id();
        let snapshot = store.list_customers();

        store
            .update_customer(ann, CustomerUpdate::default().name("Changed"))
            .unwrap();
        assert_eq!(snapshot[0].name().as_str(), "Ann");
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    #[test]
    fn test_negative_price_rejected() {
        let mut store = Store::new();
        let err = store
            .create_product("Pen", "Office", Decimal::NEGATIVE_ONE)
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.product_count(), 0);
        assert!(store.list_categories().is_empty());
    }

    #[test]
    fn test_category_survives_until_last_product() {
        let mut store = Store::new();
        let first = store.create_product("One", "A", Decimal::ONE).unwrap().id();
        let second = store.create_product("Two", "A", Decimal::ONE).unwrap().id();

        assert!(store.delete_product(first));
        assert_eq!(categories(&store), ["A"]);

        assert!(store.delete_product(second));
        assert!(categories(&store).is_empty());
        assert_coherent(&store);
    }

    #[test]
    fn test_update_product_category_recomputes_set() {
        let mut store = Store::new();
        let tea = store.create_product("Tea", "Food", Decimal::from(180)).unwrap().id();
        store.create_product("Mouse", "Electronics", Decimal::from(700)).unwrap();

        store
            .update_product(tea, ProductUpdate::default().category("Drinks"))
            .unwrap();
        assert_eq!(categories(&store), ["Drinks", "Electronics"]);
        assert_coherent(&store);
    }

    #[test]
    fn test_update_product_same_category_keeps_set() {
        let mut store = Store::new();
        let tea = store.create_product("Tea", "Food", Decimal::from(180)).unwrap().id();
        store
            .update_product(tea, ProductUpdate::default().category(" Food ").price(Decimal::TEN))
            .unwrap();
        assert_eq!(categories(&store), ["Food"]);
        assert_eq!(store.read_product(tea).unwrap().price().amount(), Decimal::TEN);
        assert_coherent(&store);
    }

    #[test]
    fn test_update_product_repositions_in_view() {
        let mut store = Store::new();
        let apple = store.create_product("Apple", "Food", Decimal::ONE).unwrap().id();
        store.create_product("Banana", "Food", Decimal::ONE).unwrap();

        store
            .update_product(apple, ProductUpdate::default().name("Cherry"))
            .unwrap();
        let names: Vec<_> = store
            .list_products_ordered()
            .map(|p| p.name().as_str())
            .collect();
        assert_eq!(names, ["Banana", "Cherry"]);
        assert_coherent(&store);
    }

    #[test]
    fn test_failed_product_update_changes_nothing() {
        let mut store = Store::new();
        let pen = store.create_product("Pen", "Office", Decimal::ONE).unwrap().id();

        let err = store
            .update_product(
                pen,
                ProductUpdate::default()
                    .name("Marker")
                    .price(Decimal::NEGATIVE_ONE),
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.read_product(pen).unwrap().name().as_str(), "Pen");
        assert_coherent(&store);

        assert!(store
            .update_product(ProductId::generate(), ProductUpdate::default())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_delete_product_strips_order_lines() {
        let mut store = Store::new();
        let ann = store.create_customer("Ann", "ann@x.com", 1).unwrap().id();
        let pen = store.create_product("Pen", "Office", Decimal::from(2)).unwrap().id();
        let pad = store.create_product("Pad", "Office", Decimal::from(5)).unwrap().id();

        let o1 = store.create_order(ann).unwrap().id();
        store.add_item_to_order(o1, pen, 3).unwrap();
        store.add_item_to_order(o1, pad, 1).unwrap();
        let o2 = store.create_order(ann).unwrap().id();
        store.add_item_to_order(o2, pen, 1).unwrap();
        let o3 = store.create_order(ann).unwrap().id();
        store.add_item_to_order(o3, pad, 2).unwrap();

        assert_eq!(store.order_total(o1), Some(Decimal::from(11)));

        assert!(store.delete_product(pen));

        assert_eq!(store.order_count(), 3);
        assert_eq!(store.read_order(o1).unwrap().item_count(), 1);
        assert_eq!(store.order_total(o1), Some(Decimal::from(5)));
        assert_eq!(store.read_order(o2).unwrap().item_count(), 0);
        assert_eq!(store.order_total(o2), Some(Decimal::ZERO));
        assert_eq!(store.read_order(o3).unwrap().item_count(), 1);
        assert_coherent(&store);
    }

    #[test]
    fn test_delete_absent_product() {
        let mut store = Store::new();
        store.create_product("Pen", "Office", Decimal::ONE).unwrap();
        assert!(!store.delete_product(ProductId::generate()));
        assert_eq!(categories(&store), ["Office"]);
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    #[test]
    fn test_create_order_unknown_customer() {
        let mut store = Store::new();
        let err = store.create_order(CustomerId::generate()).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.order_count(), 0);
        assert_eq!(store.list_orders_by_time().count(), 0);
    }

    #[test]
    fn test_create_order_defaults() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let mut store = Store::with_clock(FixedClock(at));
        let ann = store.create_customer("Ann", "ann@x.com", 1).unwrap().id();

        let order = store.create_order(ann).unwrap();
        assert_eq!(order.status(), OrderStatus::New);
        assert_eq!(order.customer_id(), ann);
        assert_eq!(order.created_at(), at);
        assert_eq!(order.item_count(), 0);
    }

    #[test]
    fn test_oversized_values_rejected() {
        let mut store = Store::new();
        assert!(store
            .create_product("Yacht", "Luxury", Decimal::MAX)
            .unwrap_err()
            .is_validation());
        assert_eq!(store.product_count(), 0);

        let pen = store.create_product("Pen", "Office", Decimal::ONE).unwrap().id();
        assert!(store
            .update_product(pen, ProductUpdate::default().price(Decimal::MAX))
            .unwrap_err()
            .is_validation());

        let ann = store.create_customer("Ann", "ann@x.com", 1).unwrap().id();
        let order = store.create_order(ann).unwrap().id();
        assert!(store
            .add_item_to_order(order, pen, 1_000_001)
            .unwrap_err()
            .is_validation());
        assert_coherent(&store);
    }

    #[test]
    fn test_order_total_at_bounds() {
        let mut store = Store::new();
        let ann = store.create_customer("Ann", "ann@x.com", 1).unwrap().id();
        let yacht = store
            .create_product("Yacht", "Luxury", Decimal::from(Price::MAX_AMOUNT))
            .unwrap()
            .id();
        let order = store.create_order(ann).unwrap().id();
        for _ in 0..3 {
            store.add_item_to_order(order, yacht, 1_000_000).unwrap();
        }

        assert_eq!(
            store.order_total(order),
            Some(Decimal::from(3_000_000_000_000_000_000_i64))
        );
    }

    #[test]
    fn test_update_product_moves_only_product_to_new_category() {
        let mut store = Store::new();
        let pen = store.create_product("Pen", "Office", Decimal::ONE).unwrap().id();

        let moved = store
            .update_product(pen, ProductUpdate::default().category("Stationery"))
            .unwrap();
        assert_eq!(moved.category().as_str(), "Stationery");
        assert_eq!(categories(&store), ["Stationery"]);
        assert_eq!(store.list_products_ordered().count(), 1);
        assert_coherent(&store);
    }

    #[test]
    fn test_update_unknown_product_with_invalid_field() {
        let mut store = Store::new();
        let err = store
            .update_product(ProductId::generate(), ProductUpdate::default().name(" "))
            .unwrap_err();
        assert!(err.is_validation());

        let err = store
            .update_product(ProductId::generate(), ProductUpdate::default().name("Pen"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_add_item_errors() {
        let mut store = Store::new();
        let ann = store.create_customer("Ann", "ann@x.com", 1).unwrap().id();
        let pen = store.create_product("Pen", "Office", Decimal::ONE).unwrap().id();
        let order = store.create_order(ann).unwrap().id();

        assert!(store
            .add_item_to_order(OrderId::generate(), pen, 1)
            .unwrap_err()
            .is_not_found());
        assert!(store
            .add_item_to_order(order, ProductId::generate(), 1)
            .unwrap_err()
            .is_not_found());
        assert!(store.add_item_to_order(order, pen, 0).unwrap_err().is_validation());
        assert_eq!(store.read_order(order).unwrap().item_count(), 0);
    }

    #[test]
    fn test_price_change_is_retroactive() {
        let mut store = Store::new();
        let ann = store.create_customer("Ann", "ann@x.com", 1).unwrap().id();
        let pen = store.create_product("Pen", "Office", Decimal::from(2)).unwrap().id();
        let order = store.create_order(ann).unwrap().id();
        store.add_item_to_order(order, pen, 5).unwrap();
        assert_eq!(store.order_total(order), Some(Decimal::from(10)));

        store
            .update_product(pen, ProductUpdate::default().price(Decimal::from(3)))
            .unwrap();
        assert_eq!(store.order_total(order), Some(Decimal::from(15)));
    }

    #[test]
    fn test_any_status_transition_allowed() {
        let mut store = Store::new();
        let ann = store.create_customer("Ann", "ann@x.com", 1).unwrap().id();
        let order = store.create_order(ann).unwrap().id();

        for status in [
            OrderStatus::Cancelled,
            OrderStatus::New,
            OrderStatus::Shipped,
            OrderStatus::Paid,
        ] {
            assert_eq!(store.update_order_status(order, status).unwrap().status(), status);
        }
        assert!(store
            .update_order_status(OrderId::generate(), OrderStatus::Paid)
            .unwrap_err()
            .is_not_found());
    }

    // Identical timestamps do not shadow each other in the time view.
    #[test]
    fn test_same_timestamp_orders_both_kept() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let mut store = Store::with_clock(FixedClock(at));
        let ann = store.create_customer("Ann", "ann@x.com", 1).unwrap().id();
        let first = store.create_order(ann).unwrap().id();
        let second = store.create_order(ann).unwrap().id();

        let view: Vec<_> = store.list_orders_by_time().collect();
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|(ts, _)| *ts == at));
        let mut expected = vec![first, second];
        expected.sort();
        assert_eq!(view.iter().map(|(_, id)| *id).collect::<Vec<_>>(), expected);

        assert!(store.delete_order(first));
        assert_eq!(store.list_orders_by_time().collect::<Vec<_>>(), [(at, second)]);
        assert_coherent(&store);
    }

    #[test]
    fn test_orders_by_time_ascending() {
        let mut store = Store::new();
        let ann = store.create_customer("Ann", "ann@x.com", 1).unwrap().id();
        for _ in 0..5 {
            store.create_order(ann).unwrap();
        }
        let stamps: Vec<_> = store.orders_by_time().map(Order::created_at).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(stamps.len(), 5);
    }

    #[test]
    fn test_delete_order_twice() {
        let mut store = Store::new();
        let ann = store.create_customer("Ann", "ann@x.com", 1).unwrap().id();
        let order = store.create_order(ann).unwrap().id();
        assert!(store.delete_order(order));
        assert!(!store.delete_order(order));
        assert_coherent(&store);
    }
}
