//! Hand-registered entities shared by the unit tests.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::core::schema::{Filterable, SchemaBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Shipped,
    Cancelled,
}

crate::filter_enum!(OrderStatus {
    Pending,
    Shipped,
    Cancelled
});

#[derive(Debug, Clone)]
pub struct Address {
    pub city: String,
}

impl Filterable for Address {
    const ENTITY_NAME: &'static str = "Address";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.field("city", |address: &Self| &address.city);
    }
}

#[derive(Debug, Clone)]
pub struct Customer {
    pub name: String,
    pub address: Option<Address>,
}

impl Filterable for Customer {
    const ENTITY_NAME: &'static str = "Customer";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .field("name", |customer: &Self| &customer.name)
            .nested_optional("address", |customer: &Self| customer.address.as_ref());
    }
}

#[derive(Debug, Clone)]
pub struct Discount {
    pub code: String,
}

impl Filterable for Discount {
    const ENTITY_NAME: &'static str = "Discount";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.field("code", |discount: &Self| &discount.code);
    }
}

#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product_id: i32,
    pub quantity: i32,
    pub discounts: Vec<Discount>,
}

impl Filterable for OrderLine {
    const ENTITY_NAME: &'static str = "OrderLine";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .field("product_id", |line: &Self| &line.product_id)
            .field("quantity", |line: &Self| &line.quantity)
            .collection("discounts", |line: &Self| line.discounts.as_slice());
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: i64,
    pub number: String,
    pub total: Decimal,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
    pub customer: Customer,
    pub lines: Vec<OrderLine>,
}

impl Filterable for Order {
    const ENTITY_NAME: &'static str = "Order";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .field("id", |order: &Self| &order.id)
            .field("number", |order: &Self| &order.number)
            .field("total", |order: &Self| &order.total)
            .field("status", |order: &Self| &order.status)
            .field("placed_at", |order: &Self| &order.placed_at)
            .nested("customer", |order: &Self| &order.customer)
            .collection("lines", |order: &Self| order.lines.as_slice());
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub parent: Option<Box<Category>>,
    pub children: Vec<Category>,
}

impl Filterable for Category {
    const ENTITY_NAME: &'static str = "Category";
    const IDENTITY: &'static str = "name";

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .field("name", |category: &Self| &category.name)
            .nested_optional("parent", |category: &Self| category.parent.as_deref())
            .collection("children", |category: &Self| category.children.as_slice());
    }
}

fn line(product_id: i32, quantity: i32, codes: &[&str]) -> OrderLine {
    OrderLine {
        product_id,
        quantity,
        discounts: codes
            .iter()
            .map(|code| Discount {
                code: (*code).to_string(),
            })
            .collect(),
    }
}

fn customer(name: &str, city: Option<&str>) -> Customer {
    Customer {
        name: name.to_string(),
        address: city.map(|city| Address {
            city: city.to_string(),
        }),
    }
}

/// Four orders:
///
/// | id | number   | total | status    | customer          | line products |
/// |----|----------|-------|-----------|-------------------|---------------|
/// | 1  | SO-1001  | 25.00 | Pending   | Ana, Lisbon       | 5, 9          |
/// | 2  | SO-1002  | 60.00 | Shipped   | Bruno, Porto      | 7             |
/// | 3  | WEB-2001 | 5.50  | Cancelled | Carla, no address | none          |
/// | 4  | SO-0999  | 25.00 | Shipped   | Dmitri, Lisbon    | 9             |
pub fn sample_orders() -> Vec<Order> {
    vec![
        Order {
            id: 1,
            number: "SO-1001".to_string(),
            total: Decimal::new(2500, 2),
            status: OrderStatus::Pending,
            placed_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            customer: customer("Ana", Some("Lisbon")),
            lines: vec![line(5, 1, &["SPRING"]), line(9, 2, &[])],
        },
        Order {
            id: 2,
            number: "SO-1002".to_string(),
            total: Decimal::new(6000, 2),
            status: OrderStatus::Shipped,
            placed_at: Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap(),
            customer: customer("Bruno", Some("Porto")),
            lines: vec![line(7, 3, &[])],
        },
        Order {
            id: 3,
            number: "WEB-2001".to_string(),
            total: Decimal::new(550, 2),
            status: OrderStatus::Cancelled,
            placed_at: Utc.with_ymd_and_hms(2024, 2, 20, 12, 0, 0).unwrap(),
            customer: customer("Carla", None),
            lines: Vec::new(),
        },
        Order {
            id: 4,
            number: "SO-0999".to_string(),
            total: Decimal::new(2500, 2),
            status: OrderStatus::Shipped,
            placed_at: Utc.with_ymd_and_hms(2024, 3, 10, 15, 30, 0).unwrap(),
            customer: customer("Dmitri", Some("Lisbon")),
            lines: vec![line(9, 1, &[])],
        },
    ]
}

/// Top-level categories Wine, Beer and Spirits; Wine has children Red and
/// White.
pub fn sample_categories() -> Vec<Category> {
    let leaf = |name: &str| Category {
        name: name.to_string(),
        parent: None,
        children: Vec::new(),
    };
    let mut wine = leaf("Wine");
    wine.children = vec![leaf("Red"), leaf("White")];
    vec![wine, leaf("Beer"), leaf("Spirits")]
}
