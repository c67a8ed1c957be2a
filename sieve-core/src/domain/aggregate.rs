// sieve-core/src/domain/aggregate.rs
//
// In-process group-by reports over the cleaned snapshots.
// Groups come out sorted by key (natural order, absent keys last).

use std::collections::BTreeMap;

use crate::domain::model::{Customer, Product, Transaction};
use crate::domain::table::{DataType, GroupKey, Record, Value};
use crate::domain::transform::index_by;

// --- REPORT ROWS ---

#[derive(Debug, Clone, PartialEq)]
pub struct RegionTransactions {
    pub region: GroupKey,
    pub total_transactions: i64,
}

impl Record for RegionTransactions {
    const FIELDS: &'static [(&'static str, DataType)] = &[
        ("region", DataType::Text),
        ("total_transactions", DataType::Integer),
    ];

    fn to_row(&self) -> Vec<Value> {
        vec![self.region.value(), Value::Integer(self.total_transactions)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRevenue {
    pub category: GroupKey,
    pub total_revenue: f64,
}

impl Record for CategoryRevenue {
    const FIELDS: &'static [(&'static str, DataType)] = &[
        ("category", DataType::Text),
        ("total_revenue", DataType::Float),
    ];

    fn to_row(&self) -> Vec<Value> {
        vec![self.category.value(), Value::Float(self.total_revenue)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRevenue {
    pub product_id: GroupKey,
    pub product_name: GroupKey,
    pub revenue: f64,
    pub total_qty: i64,
}

impl Record for ProductRevenue {
    const FIELDS: &'static [(&'static str, DataType)] = &[
        ("product_id", DataType::Text),
        ("product_name", DataType::Text),
        ("revenue", DataType::Float),
        ("total_qty", DataType::Integer),
    ];

    fn to_row(&self) -> Vec<Value> {
        vec![
            self.product_id.value(),
            self.product_name.value(),
            Value::Float(self.revenue),
            Value::Integer(self.total_qty),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockAggregate {
    pub product_id: GroupKey,
    pub product_name: GroupKey,
    pub category: GroupKey,
    pub total_stock: i64,
    pub avg_cost_price: f64,
}

impl Record for StockAggregate {
    const FIELDS: &'static [(&'static str, DataType)] = &[
        ("product_id", DataType::Text),
        ("product_name", DataType::Text),
        ("category", DataType::Text),
        ("total_stock", DataType::Integer),
        ("avg_cost_price", DataType::Float),
    ];

    fn to_row(&self) -> Vec<Value> {
        vec![
            self.product_id.value(),
            self.product_name.value(),
            self.category.value(),
            Value::Integer(self.total_stock),
            Value::Float(self.avg_cost_price),
        ]
    }
}

// --- INNER JOIN LOOKUPS ---

/// Transactions with a matching product, paired with it (inner join).
fn with_products<'a>(
    transactions: &'a [Transaction],
    products: &'a [Product],
) -> Vec<(&'a Transaction, &'a Product)> {
    let by_id = index_by(products, |p| p.product_id.as_deref());
    transactions
        .iter()
        .filter_map(|t| {
            let product = by_id.get(t.product_id.as_deref()?)?;
            Some((t, *product))
        })
        .collect()
}

// --- REPORTS ---

/// Transaction count per customer region. Transactions whose customer does
/// not resolve are excluded (inner join), unlike the fact table.
pub fn transactions_per_region(
    transactions: &[Transaction],
    customers: &[Customer],
) -> Vec<RegionTransactions> {
    let by_id = index_by(customers, |c| c.customer_id.as_deref());
    let mut groups: BTreeMap<GroupKey, i64> = BTreeMap::new();

    for t in transactions {
        let Some(customer) = t.customer_id.as_deref().and_then(|id| by_id.get(id)) else {
            continue;
        };
        let count = groups.entry(GroupKey::of(Some(customer.region.as_str()))).or_insert(0);
        if t.transaction_id.is_some() {
            *count += 1;
        }
    }

    groups
        .into_iter()
        .map(|(region, total_transactions)| RegionTransactions {
            region,
            total_transactions,
        })
        .collect()
}

pub fn revenue_by_category(
    transactions: &[Transaction],
    products: &[Product],
) -> Vec<CategoryRevenue> {
    let mut groups: BTreeMap<GroupKey, f64> = BTreeMap::new();
    for (t, p) in with_products(transactions, products) {
        *groups.entry(GroupKey::of(p.category.as_deref())).or_insert(0.0) += t.revenue();
    }

    groups
        .into_iter()
        .map(|(category, total_revenue)| CategoryRevenue {
            category,
            total_revenue,
        })
        .collect()
}

/// Top `limit` products by revenue, descending.
///
/// Ties keep group-key order: groups are built in `(product_id,
/// product_name)` order and the sort is stable.
pub fn top_products(
    transactions: &[Transaction],
    products: &[Product],
    limit: usize,
) -> Vec<ProductRevenue> {
    let mut groups: BTreeMap<(GroupKey, GroupKey), (f64, i64)> = BTreeMap::new();
    for (t, p) in with_products(transactions, products) {
        let key = (
            GroupKey::of(p.product_id.as_deref()),
            GroupKey::of(p.product_name.as_deref()),
        );
        let acc = groups.entry(key).or_insert((0.0, 0));
        acc.0 += t.revenue();
        acc.1 += t.quantity;
    }

    let mut ranked: Vec<ProductRevenue> = groups
        .into_iter()
        .map(|((product_id, product_name), (revenue, total_qty))| ProductRevenue {
            product_id,
            product_name,
            revenue,
            total_qty,
        })
        .collect();

    ranked.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    ranked.truncate(limit);
    ranked
}

pub fn aggregated_stock(products: &[Product]) -> Vec<StockAggregate> {
    let mut groups: BTreeMap<(GroupKey, GroupKey, GroupKey), (i64, f64, usize)> = BTreeMap::new();
    for p in products {
        let key = (
            GroupKey::of(p.product_id.as_deref()),
            GroupKey::of(p.product_name.as_deref()),
            GroupKey::of(p.category.as_deref()),
        );
        let acc = groups.entry(key).or_insert((0, 0.0, 0));
        acc.0 += p.stock_quantity;
        acc.1 += p.cost_price;
        acc.2 += 1;
    }

    groups
        .into_iter()
        .map(
            |((product_id, product_name, category), (stock, cost, n))| StockAggregate {
                product_id,
                product_name,
                category,
                total_stock: stock,
                avg_cost_price: cost / n as f64,
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: &str, region: &str) -> Customer {
        Customer {
            customer_id: Some(id.into()),
            first_name: None,
            last_name: None,
            region: region.into(),
            signup_date: None,
        }
    }

    fn product(id: &str, name: &str, category: &str, stock: i64, cost: f64) -> Product {
        Product {
            product_id: Some(id.into()),
            product_name: Some(name.into()),
            category: Some(category.into()),
            stock_quantity: stock,
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
            store_id: None,
        }
    }

    #[test]
    fn test_transactions_per_region_inner_join() {
        let customers = vec![customer("1", "North"), customer("2", "South")];
        let transactions = vec![
            transaction("a", "1", "x", 1, 1.0),
            transaction("b", "1", "x", 1, 1.0),
            transaction("c", "2", "x", 1, 1.0),
            transaction("d", "404", "x", 1, 1.0),
        ];
        let report = transactions_per_region(&transactions, &customers);
        assert_eq!(
            report,
            vec![
                RegionTransactions {
                    region: GroupKey::of(Some("North")),
                    total_transactions: 2
                },
                RegionTransactions {
                    region: GroupKey::of(Some("South")),
                    total_transactions: 1
                },
            ]
        );
    }

    #[test]
    fn test_revenue_by_category() {
        let products = vec![
            product("10", "Widget", "Tools", 1, 1.0),
            product("11", "Gadget", "Electronics", 1, 1.0),
        ];
        let transactions = vec![
            transaction("a", "1", "10", 2, 5.0),
            transaction("b", "1", "11", 1, 12.0),
            transaction("c", "1", "10", 3, 4.5),
            transaction("d", "1", "99", 1, 100.0),
        ];
        let report = revenue_by_category(&transactions, &products);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].category, GroupKey::of(Some("Electronics")));
        assert_eq!(report[0].total_revenue, 12.0);
        assert_eq!(report[1].category, GroupKey::of(Some("Tools")));
        assert_eq!(report[1].total_revenue, 23.5);
    }

    #[test]
    fn test_top_products_order_limit_and_ties() {
        let products: Vec<Product> = (1..=7)
            .map(|i| product(&i.to_string(), &format!("P{}", i), "C", 0, 0.0))
            .collect();
        // Revenues: 1 -> 10, 2 -> 50, 3 -> 30, 4 -> 30, 5 -> 5, 6 -> 70, 7 -> 1
        let transactions = vec![
            transaction("a", "c", "1", 1, 10.0),
            transaction("b", "c", "2", 5, 10.0),
            transaction("c", "c", "3", 3, 10.0),
            transaction("d", "c", "4", 1, 30.0),
            transaction("e", "c", "5", 1, 5.0),
            transaction("f", "c", "6", 7, 10.0),
            transaction("g", "c", "7", 1, 1.0),
        ];
        let top = top_products(&transactions, &products, 5);
        let ids: Vec<Option<String>> = top.iter().map(|p| p.product_id.0.clone()).collect();
        assert_eq!(
            ids,
            vec![
                Some("6".into()),
                Some("2".into()),
                Some("3".into()),
                Some("4".into()),
                Some("1".into())
            ]
        );
        assert_eq!(top[0].total_qty, 7);
        assert!(top.windows(2).all(|w| w[0].revenue >= w[1].revenue));
    }

    #[test]
    fn test_top_products_fewer_than_limit() {
        let products = vec![product("1", "A", "C", 0, 0.0)];
        let transactions = vec![transaction("a", "c", "1", 1, 1.0)];
        assert_eq!(top_products(&transactions, &products, 5).len(), 1);
        assert!(top_products(&[], &products, 5).is_empty());
    }

    #[test]
    fn test_aggregated_stock_sorted_by_key() {
        let products = vec![
            product("10", "Widget", "Tools", 5, 2.0),
            product("2", "Gadget", "Electronics", 7, 3.0),
        ];
        let report = aggregated_stock(&products);
        assert_eq!(report[0].product_id, GroupKey::of(Some("2")));
        assert_eq!(report[0].total_stock, 7);
        assert_eq!(report[0].avg_cost_price, 3.0);
        assert_eq!(report[1].product_id, GroupKey::of(Some("10")));
    }
}
