//! Storefront demo: parse list requests, compile them and print JSON pages.
//!
//! Run with: `RUST_LOG=querycrate=debug cargo run --example storefront`

use querycrate::{FilterEnum, Filterable, ListQuery, QueryCompiler, QueryError};
use rust_decimal::Decimal;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, FilterEnum)]
enum Availability {
    InStock,
    Backorder,
    Discontinued,
}

#[derive(Debug, Clone, Filterable)]
struct Brand {
    name: String,
    country: String,
}

#[derive(Debug, Clone, Filterable)]
struct Variant {
    sku: String,
    size: String,
    stock: i32,
}

#[derive(Debug, Clone, Filterable)]
struct Product {
    id: i32,
    title: String,
    price: Decimal,
    availability: Availability,
    #[filterable(nested)]
    brand: Brand,
    #[filterable(collection)]
    variants: Vec<Variant>,
}

fn catalogue() -> Vec<Product> {
    let product = |id, title: &str, cents, availability, brand: (&str, &str), variants: &[(&str, &str, i32)]| Product {
        id,
        title: title.to_string(),
        price: Decimal::new(cents, 2),
        availability,
        brand: Brand {
            name: brand.0.to_string(),
            country: brand.1.to_string(),
        },
        variants: variants
            .iter()
            .map(|(sku, size, stock)| Variant {
                sku: (*sku).to_string(),
                size: (*size).to_string(),
                stock: *stock,
            })
            .collect(),
    };

    vec![
        product(1, "Trail Runner", 12_900, Availability::InStock, ("Stride", "PT"), &[("TR-40", "40", 3), ("TR-42", "42", 0)]),
        product(2, "Road Racer", 15_450, Availability::Backorder, ("Stride", "PT"), &[("RR-41", "41", 0)]),
        product(3, "City Walker", 7_999, Availability::InStock, ("Urbano", "ES"), &[("CW-38", "38", 12), ("CW-42", "42", 4)]),
        product(4, "Hiking Boot", 18_900, Availability::Discontinued, ("Montes", "ES"), &[]),
        product(5, "Court Classic", 9_950, Availability::InStock, ("Stride", "PT"), &[("CC-42", "42", 7)]),
    ]
}

fn run(compiler: &QueryCompiler<Product>, query_string: &str) -> Result<serde_json::Value, QueryError> {
    let list = ListQuery::parse(query_string, compiler.limits())?;
    let query = compiler.compile_list(&list)?;
    let page = query
        .page(catalogue(), list.page, list.size)
        .map(|product| {
            json!({
                "id": product.id,
                "title": product.title,
                "price": product.price.to_string(),
                "brand": product.brand.name,
            })
        });
    Ok(serde_json::to_value(page).unwrap_or_default())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let compiler = QueryCompiler::<Product>::new();
    let requests = [
        "",
        "availability=instock&_order=price desc",
        "title=*r*&_maxPrice=130&_order=brand.name, price",
        "variants.size=42&_minVariants_Stock=1",
        "brand_country=es&_page=1&_size=1",
        "colour=red",
        "_minPrice=cheap",
        "_order=variants.stock desc",
    ];

    for request in requests {
        match run(&compiler, request) {
            Ok(page) => {
                tracing::info!(request, "ok");
                println!("{page:#}");
            }
            Err(error) => tracing::warn!(request, %error, "rejected"),
        }
    }
}
