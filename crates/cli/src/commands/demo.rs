//! Fixed demo scenario.
//!
//! Creates a handful of customers, products and orders in a fresh store,
//! mutates them, and reports each view the store offers. Every step is one
//! [`Section`] of the report.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use datastore::analytics::{
    avg_price_by_category, expensive_product_names, safe_customer_email, top_customer,
    total_revenue,
};
use datastore::sort::{
    customer_by_points_desc_then_name, product_by_price_desc_then_name_then_category,
};
use datastore::{Customer, CustomerUpdate, Order, OrderStatus, Store};

use crate::error::CliError;

/// Threshold for the "expensive products" report.
const EXPENSIVE_FROM: i64 = 2000;

/// Shown in place of the top customer when the store has none.
const NO_CUSTOMERS: &str = "NO_CUSTOMERS";

/// One step of the demo report.
#[derive(Debug, Serialize)]
pub struct Section {
    pub title: String,
    pub lines: Vec<String>,
    pub data: serde_json::Value,
}

impl Section {
    fn new(
        title: &str,
        lines: Vec<String>,
        data: impl Serialize,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            title: title.to_string(),
            lines,
            data: serde_json::to_value(data)?,
        })
    }
}

/// Run the scenario on a fresh store and print the report.
///
/// # Errors
///
/// Returns an error if a store operation fails or the report cannot be
/// serialized.
#[allow(clippy::print_stdout)]
pub fn run(json: bool) -> Result<(), CliError> {
    let mut store = Store::new();
    let report = scenario(&mut store)?;
    info!(sections = report.len(), "Demo scenario complete");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for section in &report {
        println!("=== {} ===", section.title);
        for line in &section.lines {
            println!("  {line}");
        }
        println!();
    }
    Ok(())
}

fn top_customer_line(customers: &[Customer]) -> String {
    top_customer(customers).map_or_else(|| NO_CUSTOMERS.to_owned(), ToString::to_string)
}

fn order_line(store: &Store, order: &Order) -> String {
    format!("{order} total={}", order.total(store))
}

/// Drive `store` through the demo and collect the report.
///
/// # Errors
///
/// Returns an error if a store operation fails or a section cannot be
/// serialized.
pub fn scenario(store: &mut Store) -> Result<Vec<Section>, CliError> {
    let mut report = Vec::new();

    // Customers
    let olena = store.create_customer("Olena", "olena@example.com", 120)?.id();
    let andrii = store.create_customer("Andrii", "andrii@example.com", 45)?.id();
    let maria = store.create_customer("Maria", "maria@example.com", 200)?.id();
    let customers = store.list_customers();
    report.push(Section::new(
        "Customers created",
        customers.iter().map(ToString::to_string).collect(),
        &customers,
    )?);

    let updated = store
        .update_customer(
            andrii,
            CustomerUpdate::default().name("Andrii K.").loyalty_points(60),
        )?
        .to_string();
    report.push(Section::new(
        "Customer updated",
        vec![updated],
        store.read_customer(andrii),
    )?);

    let email = safe_customer_email(store.read_customer(andrii));
    report.push(Section::new(
        "Safe email lookup",
        vec![email.clone()],
        email,
    )?);

    // Products
    let laptop = store
        .create_product("Laptop", "Electronics", Decimal::from(32000))?
        .id();
    let mouse = store
        .create_product("Mouse", "Electronics", Decimal::from(700))?
        .id();
    let coffee = store.create_product("Coffee", "Food", Decimal::from(250))?.id();
    store.create_product("Headphones", "Electronics", Decimal::from(2200))?;
    let tea = store.create_product("Tea", "Food", Decimal::from(180))?.id();
    let products: Vec<_> = store.list_products_ordered().cloned().collect();
    report.push(Section::new(
        "Products in natural order",
        products.iter().map(ToString::to_string).collect(),
        &products,
    )?);

    let mut categories: Vec<_> = store
        .list_categories()
        .iter()
        .map(ToString::to_string)
        .collect();
    categories.sort();
    report.push(Section::new("Categories", categories.clone(), categories)?);

    // Orders
    let first = store.create_order(olena)?.id();
    store.add_item_to_order(first, laptop, 1)?;
    store.add_item_to_order(first, mouse, 2)?;
    store.update_order_status(first, OrderStatus::Paid)?;

    let second = store.create_order(maria)?.id();
    store.add_item_to_order(second, coffee, 3)?;
    store.add_item_to_order(second, tea, 2)?;

    let orders: Vec<_> = store.orders_by_time().cloned().collect();
    report.push(Section::new(
        "Orders by creation time",
        orders.iter().map(|o| order_line(store, o)).collect(),
        &orders,
    )?);

    // Views
    let ordered: Vec<_> = store.list_customers_ordered().cloned().collect();
    report.push(Section::new(
        "Customers in natural order",
        ordered.iter().map(ToString::to_string).collect(),
        &ordered,
    )?);

    let mut by_points = store.list_customers();
    by_points.sort_by(customer_by_points_desc_then_name);
    report.push(Section::new(
        "Customers by points",
        by_points.iter().map(ToString::to_string).collect(),
        &by_points,
    )?);

    let mut by_price = store.list_products();
    by_price.sort_by(product_by_price_desc_then_name_then_category);
    report.push(Section::new(
        "Products by price",
        by_price.iter().map(ToString::to_string).collect(),
        &by_price,
    )?);

    // Analytics
    let products = store.list_products();
    let expensive = expensive_product_names(&products, Decimal::from(EXPENSIVE_FROM));
    report.push(Section::new(
        &format!("Products priced from {EXPENSIVE_FROM}"),
        expensive.clone(),
        expensive,
    )?);

    let averages: BTreeMap<String, Decimal> = avg_price_by_category(&products)
        .into_iter()
        .map(|(category, avg)| (category.to_string(), avg.round_dp(2)))
        .collect();
    report.push(Section::new(
        "Average price by category",
        averages.iter().map(|(c, avg)| format!("{c}: {avg}")).collect(),
        &averages,
    )?);

    let revenue = total_revenue(&store.list_orders(), &*store);
    report.push(Section::new(
        "Total revenue",
        vec![revenue.to_string()],
        revenue,
    )?);

    let customers = store.list_customers();
    let top = top_customer(&customers);
    report.push(Section::new(
        "Top customer",
        vec![top_customer_line(&customers)],
        top,
    )?);

    // Cascade
    store.delete_product(mouse);
    let after = store
        .read_order(first)
        .map(|order| order_line(store, order))
        .into_iter()
        .collect();
    report.push(Section::new(
        "First order after deleting Mouse",
        after,
        store.read_order(first),
    )?);

    Ok(report)
}
