//! Demo catalog: one dragonfly brooch and one fly brooch.

use crate::model::category::CategoryType;
use crate::service::seed::CatalogEntry;

/// Entries written by `CatalogStore::load_fixture_data`, in insert order.
pub fn fixture_entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry {
            image_path: "/assets/photo_5370574978803683622_y.jpg".to_string(),
            category_type: CategoryType::DRAGONFLY,
            category_name: "Категория стрекоз".to_string(),
            product_name: "Стрекоза 1".to_string(),
            product_description: "Брошь в виде стрекозы".to_string(),
            product_price: "5000 р.".to_string(),
            quantity_in_stock: 1,
            quantity_purchased: 0,
        },
        CatalogEntry {
            image_path: "/assets/photo_5370574978803683643_y.jpg".to_string(),
            category_type: CategoryType::FLY,
            category_name: "Категория мушки".to_string(),
            product_name: "Мушка 1".to_string(),
            product_description: "Брошь в виде мушки".to_string(),
            product_price: "5000 р.".to_string(),
            quantity_in_stock: 1,
            quantity_purchased: 0,
        },
    ]
}
