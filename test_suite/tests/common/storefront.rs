//! Storefront entities declared with the derive macros.

use chrono::{DateTime, NaiveDate, Utc};
use querycrate::{FilterEnum, Filterable};
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, FilterEnum)]
pub enum ProductStatus {
    Active,
    Discontinued,
}

#[derive(Debug, Clone, PartialEq, Filterable)]
pub struct Rating {
    pub rate: f64,
    pub count: i32,
}

#[derive(Debug, Clone, PartialEq, Filterable)]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub price: Decimal,
    pub category: String,
    pub status: ProductStatus,
    #[filterable(nested)]
    pub rating: Rating,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Filterable)]
pub struct CartItem {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Filterable)]
pub struct Cart {
    pub id: i32,
    pub user_id: i32,
    pub date: NaiveDate,
    #[filterable(collection)]
    pub items: Vec<CartItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FilterEnum)]
pub enum SaleStatus {
    Active,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Filterable)]
pub struct SaleItem {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub cancelled: bool,
}

#[derive(Debug, Clone, PartialEq, Filterable)]
#[filterable(identity = "sale_number")]
pub struct Sale {
    pub id: Uuid,
    pub sale_number: String,
    pub date: DateTime<Utc>,
    pub customer: String,
    pub branch: String,
    pub total: Decimal,
    pub status: SaleStatus,
    #[filterable(collection)]
    pub items: Vec<SaleItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FilterEnum)]
pub enum UserRole {
    Customer,
    Manager,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FilterEnum)]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Filterable)]
pub struct Name {
    pub firstname: String,
    pub lastname: String,
}

#[derive(Debug, Clone, PartialEq, Filterable)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub number: i32,
    pub zipcode: String,
}

#[derive(Debug, Clone, PartialEq, Filterable)]
#[filterable(name = "User")]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    #[filterable(nested)]
    pub name: Name,
    #[filterable(nested)]
    pub address: Option<Address>,
    pub phone: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    #[filterable(skip)]
    pub password_hash: String,
}
