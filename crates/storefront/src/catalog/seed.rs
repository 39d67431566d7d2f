//! The hardcoded product list.
//!
//! Images are served from `static/productos/`.

use chrono::NaiveDate;
use jacobo_core::{Price, Product, ProductCategory, ProductId};

const SHIRT_SIZES: &[&str] = &["S", "M", "L", "XL", "XXL"];
const TROUSER_SIZES: &[&str] = &["38", "40", "42", "44", "46", "48", "50"];
const SHORT_TROUSER_SIZES: &[&str] = &["38", "40", "42", "44", "46"];

const COTTON_FEATURES: &[&str] = &[
    "100% algodón",
    "Doble costura",
    "Bolsillos frontales",
    "Resistente al desgaste",
];

struct Entry {
    id: i32,
    name: &'static str,
    description: &'static str,
    category: ProductCategory,
    image: &'static str,
    sizes: &'static [&'static str],
    colors: &'static [&'static str],
    features: &'static [&'static str],
    featured: bool,
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: 1,
        name: "Camisa Ombu Blanca",
        description: "Camisa de trabajo manga larga, confeccionada en tela de algodón 100%, resistente al desgaste.",
        category: ProductCategory::Trabajo,
        image: "o-cm13-blanco.webp",
        sizes: SHIRT_SIZES,
        colors: &["Blanco"],
        features: COTTON_FEATURES,
        featured: true,
    },
    Entry {
        id: 2,
        name: "Camisa de Trabajo sticker Antiolor",
        description: "Camisa de trabajo manga larga, confeccionada en tela de algodón 100%, resistente al desgaste.",
        category: ProductCategory::Trabajo,
        image: "camisa-sticker-antiolor.webp",
        sizes: SHIRT_SIZES,
        colors: &["Azul", "Gris", "Verde"],
        features: COTTON_FEATURES,
        featured: true,
    },
    Entry {
        id: 3,
        name: "Chomba Ombu de Piqué Verde",
        description: "Chomba, confeccionada en tela de algodón 100%, resistente al desgaste.",
        category: ProductCategory::Campo,
        image: "o-ch03-verde.webp",
        sizes: SHIRT_SIZES,
        colors: &["Verde"],
        features: COTTON_FEATURES,
        featured: true,
    },
    Entry {
        id: 4,
        name: "Pantalón Cargo Verde con Bolsillo Porta Celular OMBU",
        description: "Pantalón, confeccionado en tela de algodón 100%, resistente al desgaste.",
        category: ProductCategory::Trabajo,
        image: "pantalon-cargo-verde.webp",
        sizes: TROUSER_SIZES,
        colors: &["Verde"],
        features: &[
            "100% algodón",
            "Doble costura",
            "Bolsillos laterales",
            "Resistente al desgaste",
        ],
        featured: true,
    },
    Entry {
        id: 5,
        name: "Bombacha de Campo Beige",
        description: "Bombacha de campo, confeccionada en tela de algodón 100%, resistente al desgaste.",
        category: ProductCategory::Campo,
        image: "obca01p-beige.webp",
        sizes: TROUSER_SIZES,
        colors: &["Beige"],
        features: &["Doble costura", "Resistente al desgaste"],
        featured: true,
    },
    Entry {
        id: 6,
        name: "Bombacha de Campo Verde",
        description: "",
        category: ProductCategory::Campo,
        image: "obcd03-verde.webp",
        sizes: TROUSER_SIZES,
        colors: &["Verde"],
        features: &[],
        featured: false,
    },
    Entry {
        id: 7,
        name: "Bombacha de Campo Frisa Beige",
        description: "",
        category: ProductCategory::Campo,
        image: "obcf01p-beige.webp",
        sizes: TROUSER_SIZES,
        colors: &["Beige"],
        features: &[],
        featured: false,
    },
    Entry {
        id: 9,
        name: "Bermuda Cargo de Gabardina",
        description: "",
        category: ProductCategory::Campo,
        image: "obmc03s-beige.webp",
        sizes: TROUSER_SIZES,
        colors: &["Beige"],
        features: &[],
        featured: false,
    },
    Entry {
        id: 10,
        name: "Bermuda de Gabardina",
        description: "",
        category: ProductCategory::Campo,
        image: "obmc03s-verde.webp",
        sizes: TROUSER_SIZES,
        colors: &["Verde"],
        features: &[],
        featured: false,
    },
    Entry {
        id: 11,
        name: "Camisa Ombu Beige",
        description: "",
        category: ProductCategory::Campo,
        image: "oca03-beige.webp",
        sizes: SHIRT_SIZES,
        colors: &["Beige"],
        features: &[],
        featured: false,
    },
    Entry {
        id: 12,
        name: "Camisa Ombu Azul Marino",
        description: "",
        category: ProductCategory::Campo,
        image: "oca04-azul.webp",
        sizes: SHIRT_SIZES,
        colors: &["Azul Marino"],
        features: &[],
        featured: false,
    },
    Entry {
        id: 13,
        name: "Campera Polar Verde",
        description: "",
        category: ProductCategory::Campo,
        image: "ocm01ca-verde.webp",
        sizes: SHIRT_SIZES,
        colors: &["Verde"],
        features: &[],
        featured: false,
    },
    Entry {
        id: 14,
        name: "Mameluco de Trabajo Verde",
        description: "",
        category: ProductCategory::Campo,
        image: "omar01-verde.webp",
        sizes: SHIRT_SIZES,
        colors: &["Verde"],
        features: &[],
        featured: false,
    },
    Entry {
        id: 15,
        name: "Pantalón Ombu Azulino",
        description: "",
        category: ProductCategory::Trabajo,
        image: "opa08-azulino.webp",
        sizes: SHORT_TROUSER_SIZES,
        colors: &["Azul"],
        features: &[],
        featured: false,
    },
    Entry {
        id: 16,
        name: "Pantalón Ombu Blanco",
        description: "",
        category: ProductCategory::Trabajo,
        image: "opa08-blanco.webp",
        sizes: SHORT_TROUSER_SIZES,
        colors: &["Blanco"],
        features: &[],
        featured: false,
    },
];

/// Every product in the catalog, in display order.
#[must_use]
pub fn products() -> Vec<Product> {
    let created_at = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap_or_default();
    ENTRIES
        .iter()
        .map(|entry| Product {
            id: ProductId::new(entry.id),
            name: entry.name.to_string(),
            description: entry.description.to_string(),
            category: entry.category,
            brand: "OMBU".to_string(),
            image: format!("/static/productos/{}", entry.image),
            gallery: Vec::new(),
            price: Some(Price::ars(15_000)),
            sizes: to_list(entry.sizes),
            colors: to_list(entry.colors),
            features: to_list(entry.features),
            in_stock: true,
            featured: entry.featured,
            created_at,
        })
        .collect()
}

fn to_list(values: &[&str]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.iter().map(ToString::to_string).collect())
}
