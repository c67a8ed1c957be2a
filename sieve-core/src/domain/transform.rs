// sieve-core/src/domain/transform.rs
//
// Central transaction-fact table: transactions LEFT JOIN customers
// LEFT JOIN products, plus the derived columns.

use std::collections::HashMap;

use crate::domain::model::{CentralTransaction, Customer, Product, Transaction};

pub const UNKNOWN: &str = "Unknown";

/// First occurrence wins, so a left join can never fan a transaction out.
pub(crate) fn index_by<'a, T, F>(rows: &'a [T], key: F) -> HashMap<&'a str, &'a T>
where
    F: Fn(&'a T) -> Option<&'a str>,
{
    let mut index = HashMap::with_capacity(rows.len());
    for row in rows {
        if let Some(k) = key(row) {
            index.entry(k).or_insert(row);
        }
    }
    index
}

pub fn customer_name(customer: Option<&Customer>) -> String {
    let first = customer.and_then(|c| c.first_name.as_deref()).unwrap_or("");
    let last = customer.and_then(|c| c.last_name.as_deref()).unwrap_or("");
    format!("{} {}", first, last).trim().to_string()
}

pub fn build_central_transactions(
    transactions: &[Transaction],
    customers: &[Customer],
    products: &[Product],
) -> Vec<CentralTransaction> {
    let customers_by_id = index_by(customers, |c| c.customer_id.as_deref());
    let products_by_id = index_by(products, |p| p.product_id.as_deref());

    transactions
        .iter()
        .map(|t| {
            let customer = t
                .customer_id
                .as_deref()
                .and_then(|id| customers_by_id.get(id).copied());
            let product = t
                .product_id
                .as_deref()
                .and_then(|id| products_by_id.get(id).copied());

            // Re-coerced here as well: an unresolved product has no cost.
            let cost_price = product
                .map(|p| p.cost_price)
                .filter(|c| c.is_finite())
                .unwrap_or(0.0);

            CentralTransaction {
                transaction_id: t.transaction_id.clone(),
                customer_id: t.customer_id.clone(),
                customer_name: customer_name(customer),
                product_id: t.product_id.clone(),
                product_name: product
                    .and_then(|p| p.product_name.clone())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                category: product
                    .and_then(|p| p.category.clone())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                quantity: t.quantity,
                price: t.price,
                transaction_date: t.transaction_date,
                store_id: t.store_id.clone(),
                profit: (t.price - cost_price) * t.quantity as f64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: &str, first: Option<&str>, last: Option<&str>) -> Customer {
        Customer {
            customer_id: Some(id.into()),
            first_name: first.map(Into::into),
            last_name: last.map(Into::into),
            region: "North".into(),
            signup_date: None,
        }
    }

    fn product(id: &str, cost: f64) -> Product {
        Product {
            product_id: Some(id.into()),
            product_name: Some("Widget".into()),
            category: Some("Tools".into()),
            stock_quantity: 1,
            cost_price: cost,
        }
    }

    fn transaction(id: &str, customer: &str, product: &str, qty: i64, price: f64) -> Transaction {
        Transaction {
            transaction_id: Some(id.into()),
            customer_id: Some(customer.into()),
            product_id: Some(product.into()),
            quantity: qty,
            price,
            transaction_date: None,
            store_id: Some("S1".into()),
        }
    }

    #[test]
    fn test_join_and_profit() {
        let facts = build_central_transactions(
            &[transaction("100", "1", "10", 3, 5.0)],
            &[customer("1", Some("Alice"), Some("Smith"))],
            &[product("10", 2.0)],
        );
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].customer_name, "Alice Smith");
        assert_eq!(facts[0].product_name, "Widget");
        assert_eq!(facts[0].category, "Tools");
        assert_eq!(facts[0].profit, 9.0);
    }

    #[test]
    fn test_unresolved_keys_keep_the_row() {
        let facts = build_central_transactions(
            &[
                transaction("100", "404", "999", 2, 4.0),
                transaction("101", "1", "10", 1, 1.0),
            ],
            &[customer("1", Some("Dave"), None)],
            &[product("10", 0.5)],
        );
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].customer_name, "");
        assert_eq!(facts[0].product_name, "Unknown");
        assert_eq!(facts[0].category, "Unknown");
        assert_eq!(facts[0].profit, 8.0);
        assert_eq!(facts[1].customer_name, "Dave");
    }

    #[test]
    fn test_row_count_matches_transactions() {
        let transactions: Vec<Transaction> = (0..20)
            .map(|i| transaction(&i.to_string(), &(i % 3).to_string(), "10", 1, 1.0))
            .collect();
        let facts = build_central_transactions(
            &transactions,
            &[customer("0", None, None), customer("1", None, None)],
            &[product("10", 0.0), product("10", 7.0)],
        );
        assert_eq!(facts.len(), transactions.len());
    }
}
