#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use querycrate::FilterMap;
use rust_decimal::Decimal;
use uuid::Uuid;

pub mod storefront;

pub use storefront::*;

/// Build a filter map from `(key, values)` pairs.
pub fn filters(entries: &[(&str, &[&str])]) -> FilterMap {
    entries
        .iter()
        .map(|(key, values)| (*key, values.to_vec()))
        .collect()
}

pub fn price(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn product_ids(products: &[Product]) -> Vec<i32> {
    products.iter().map(|product| product.id).collect()
}

pub fn cart_ids(carts: &[Cart]) -> Vec<i32> {
    carts.iter().map(|cart| cart.id).collect()
}

pub fn usernames(users: &[User]) -> Vec<&str> {
    users.iter().map(|user| user.username.as_str()).collect()
}

pub fn sale_numbers(sales: &[Sale]) -> Vec<&str> {
    sales.iter().map(|sale| sale.sale_number.as_str()).collect()
}

/// A product with only the fields the sorting and range examples need set.
pub fn bare_product(id: i32, title: &str, cents: i64) -> Product {
    Product {
        id,
        title: title.to_string(),
        price: price(cents),
        category: "Misc".to_string(),
        status: ProductStatus::Active,
        rating: Rating {
            rate: 0.0,
            count: 0,
        },
        created_at: at(2024, 1, 1),
    }
}

/// | id | title         | price  | category    | status       | rate | count |
/// |----|---------------|--------|-------------|--------------|------|-------|
/// | 1  | Solar Lamp    | 199.99 | Electronics | Active       | 4.5  | 120   |
/// | 2  | Polar Lager   | 12.50  | Beer        | Active       | 4.1  | 300   |
/// | 3  | Larch Table   | 89.00  | Furniture   | Discontinued | 3.8  | 40    |
/// | 4  | Wine Cellar   | 25.00  | Home        | Active       | 4.7  | 85    |
/// | 5  | Stellar Stout | 9.00   | Beer        | Discontinued | 4.1  | 60    |
/// | 6  | House White   | 45.00  | Wine        | Active       | 3.9  | 15    |
pub fn products() -> Vec<Product> {
    let rows = [
        (1, "Solar Lamp", 19_999, "Electronics", ProductStatus::Active, 4.5, 120, 3),
        (2, "Polar Lager", 1_250, "Beer", ProductStatus::Active, 4.1, 300, 5),
        (3, "Larch Table", 8_900, "Furniture", ProductStatus::Discontinued, 3.8, 40, 1),
        (4, "Wine Cellar", 2_500, "Home", ProductStatus::Active, 4.7, 85, 9),
        (5, "Stellar Stout", 900, "Beer", ProductStatus::Discontinued, 4.1, 60, 2),
        (6, "House White", 4_500, "Wine", ProductStatus::Active, 3.9, 15, 7),
    ];
    rows.into_iter()
        .map(
            |(id, title, cents, category, status, rate, count, created)| Product {
                id,
                title: title.to_string(),
                price: price(cents),
                category: category.to_string(),
                status,
                rating: Rating { rate, count },
                created_at: at(2024, 1, created),
            },
        )
        .collect()
}

/// Cart 1 (user 1) holds products 5 and 9, cart 2 (user 2) holds four of
/// product 7, cart 3 (user 1) is empty.
pub fn carts() -> Vec<Cart> {
    let item = |product_id, quantity| CartItem {
        product_id,
        quantity,
    };
    vec![
        Cart {
            id: 1,
            user_id: 1,
            date: day(2024, 3, 1),
            items: vec![item(5, 1), item(9, 2)],
        },
        Cart {
            id: 2,
            user_id: 2,
            date: day(2024, 3, 2),
            items: vec![item(7, 4)],
        },
        Cart {
            id: 3,
            user_id: 1,
            date: day(2024, 3, 3),
            items: Vec::new(),
        },
    ]
}

/// Sales in insertion order S-003, S-001, S-002.
pub fn sales() -> Vec<Sale> {
    let item = |product_id, quantity, unit_cents, cancelled| SaleItem {
        product_id,
        quantity,
        unit_price: price(unit_cents),
        cancelled,
    };
    vec![
        Sale {
            id: Uuid::new_v4(),
            sale_number: "S-003".to_string(),
            date: at(2024, 4, 3),
            customer: "Acme".to_string(),
            branch: "Lisbon".to_string(),
            total: price(12_000),
            status: SaleStatus::Active,
            items: vec![item(5, 2, 1_000, false)],
        },
        Sale {
            id: Uuid::new_v4(),
            sale_number: "S-001".to_string(),
            date: at(2024, 4, 1),
            customer: "Globex".to_string(),
            branch: "Porto".to_string(),
            total: price(4_000),
            status: SaleStatus::Cancelled,
            items: vec![item(7, 1, 4_000, true)],
        },
        Sale {
            id: Uuid::new_v4(),
            sale_number: "S-002".to_string(),
            date: at(2024, 4, 2),
            customer: "Acme".to_string(),
            branch: "Porto".to_string(),
            total: price(7_550),
            status: SaleStatus::Active,
            items: vec![item(9, 3, 2_500, false), item(5, 1, 50, false)],
        },
    ]
}

/// ana (Admin, Lisbon), bruno (Customer, no address), carla (Manager, Porto).
pub fn users() -> Vec<User> {
    vec![
        User {
            id: 1,
            email: "ana@example.com".to_string(),
            username: "ana".to_string(),
            name: Name {
                firstname: "Ana".to_string(),
                lastname: "Silva".to_string(),
            },
            address: Some(Address {
                city: "Lisbon".to_string(),
                street: "Rua Augusta".to_string(),
                number: 12,
                zipcode: "1100-053".to_string(),
            }),
            phone: Some("+351 210 000 000".to_string()),
            role: UserRole::Admin,
            status: UserStatus::Active,
            password_hash: "x".to_string(),
        },
        User {
            id: 2,
            email: "bruno@example.com".to_string(),
            username: "bruno".to_string(),
            name: Name {
                firstname: "Bruno".to_string(),
                lastname: "Costa".to_string(),
            },
            address: None,
            phone: None,
            role: UserRole::Customer,
            status: UserStatus::Inactive,
            password_hash: "x".to_string(),
        },
        User {
            id: 3,
            email: "carla@example.com".to_string(),
            username: "carla".to_string(),
            name: Name {
                firstname: "Carla".to_string(),
                lastname: "Sousa".to_string(),
            },
            address: Some(Address {
                city: "Porto".to_string(),
                street: "Rua de Santa Catarina".to_string(),
                number: 300,
                zipcode: "4000-447".to_string(),
            }),
            phone: None,
            role: UserRole::Manager,
            status: UserStatus::Active,
            password_hash: "x".to_string(),
        },
    ]
}
