use brooch_core::{
    CatalogEntry, CatalogStore, CategoryType, DeliveryType, Entity, NewCategory, NewCustomer,
    NewOrder, NewProduct, RepoError, SeedStep, ValidationError,
};

fn entry(image_path: &str, category_type: CategoryType) -> CatalogEntry {
    CatalogEntry {
        image_path: image_path.to_string(),
        category_type,
        category_name: "Cat A".to_string(),
        product_name: "Prod A".to_string(),
        product_description: "desc".to_string(),
        product_price: "100 р.".to_string(),
        quantity_in_stock: 5,
        quantity_purchased: 0,
    }
}

fn counts(store: &CatalogStore) -> Vec<u64> {
    Entity::ALL
        .iter()
        .map(|entity| store.row_count(*entity).unwrap())
        .collect()
}

/// Store with one seeded product and one customer holding an order for it.
fn store_with_order() -> (CatalogStore, i64, i64) {
    let mut store = CatalogStore::open_in_memory().unwrap();
    let seeded = store
        .add_image_category_product(&entry("/a.jpg", CategoryType::DRAGONFLY))
        .unwrap();
    let customer_id = store
        .add_customer(&NewCustomer::new("alice", "secret"))
        .unwrap();
    let order_id = store
        .add_order(&NewOrder {
            price: "100 р.".to_string(),
            user_name: "Alice".to_string(),
            user_address: "Main st. 1".to_string(),
            delivery_type: DeliveryType(1),
            customer_id,
            product_id: seeded.product_id,
        })
        .unwrap();
    (store, seeded.product_id, order_id)
}

#[test]
fn duplicate_image_path_returns_no_id_and_keeps_table() {
    let store = CatalogStore::open_in_memory().unwrap();
    let first = store.add_image("/assets/a.jpg").unwrap();
    assert!(first > 0);

    let err = store.add_image("/assets/a.jpg").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Duplicate {
            entity: Entity::Image,
            field: "path"
        }
    ));
    assert!(store.add_image("/assets/a.jpg").ok().is_none());
    assert_eq!(store.row_count(Entity::Image).unwrap(), 1);
}

#[test]
fn duplicate_category_type_keeps_single_row() {
    let store = CatalogStore::open_in_memory().unwrap();
    store
        .add_category(&NewCategory::new(CategoryType::FLY, "Flies", None))
        .unwrap();

    let err = store
        .add_category(&NewCategory::new(CategoryType::FLY, "Flies again", None))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Duplicate {
            entity: Entity::Category,
            ..
        }
    ));

    let count: i64 = store
        .connection()
        .query_row(
            "SELECT COUNT(*) FROM Categories WHERE Type = ?1;",
            [CategoryType::FLY.0],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn duplicate_login_is_rejected() {
    let store = CatalogStore::open_in_memory().unwrap();
    store
        .add_customer(&NewCustomer::new("bob", "pw").with_admin(true))
        .unwrap();

    let err = store
        .add_customer(&NewCustomer::new("bob", "other"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Duplicate {
            entity: Entity::Customer,
            field: "login"
        }
    ));

    let bob = store.get_customer("bob").unwrap().unwrap();
    assert!(bob.admin);
    assert_eq!(bob.password, "pw");
}

#[test]
fn new_customer_defaults_to_non_admin() {
    let store = CatalogStore::open_in_memory().unwrap();
    store.add_customer(&NewCustomer::new("carol", "pw")).unwrap();
    assert!(!store.get_customer("carol").unwrap().unwrap().admin);
}

#[test]
fn empty_login_and_path_fail_validation() {
    let store = CatalogStore::open_in_memory().unwrap();
    let err = store.add_customer(&NewCustomer::new("  ", "pw")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyLogin)
    ));
    let err = store.add_image("").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyImagePath)
    ));
    assert_eq!(counts(&store), vec![0, 0, 0, 0, 0]);
}

#[test]
fn seed_with_fresh_values_links_all_three_rows() {
    let mut store = CatalogStore::open_in_memory().unwrap();
    let seeded = store
        .add_image_category_product(&entry("/a.jpg", CategoryType::DRAGONFLY))
        .unwrap();

    assert_eq!(store.row_count(Entity::Image).unwrap(), 1);
    assert_eq!(store.row_count(Entity::Category).unwrap(), 1);
    assert_eq!(store.row_count(Entity::Product).unwrap(), 1);

    let category = store.get_category(seeded.category_id).unwrap().unwrap();
    assert_eq!(category.image_id, Some(seeded.image_id));
    assert_eq!(category.kind, CategoryType::DRAGONFLY);

    let product = store.get_product(seeded.product_id).unwrap().unwrap();
    assert_eq!(product.category_id, seeded.category_id);
    assert_eq!(product.image_id, seeded.image_id);
    assert_eq!(
        store.get_image(seeded.image_id).unwrap().unwrap().path,
        "/a.jpg"
    );

    let (category_id, image_id): (i64, i64) = store
        .connection()
        .query_row(
            "SELECT CategoryId, ImageId FROM Products WHERE Id = ?1;",
            [seeded.product_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(category_id, seeded.category_id);
    assert_eq!(image_id, seeded.image_id);
}

#[test]
fn seed_with_duplicate_image_path_aborts_without_writes() {
    let mut store = CatalogStore::open_in_memory().unwrap();
    store
        .add_image_category_product(&entry("/a.jpg", CategoryType::DRAGONFLY))
        .unwrap();
    let before = counts(&store);

    let err = store
        .add_image_category_product(&entry("/a.jpg", CategoryType::FLY))
        .unwrap_err();
    assert_eq!(err.step, SeedStep::Image);
    assert!(matches!(err.source, RepoError::Duplicate { .. }));
    assert_eq!(counts(&store), before);
}

#[test]
fn seed_failing_at_category_leaves_no_orphan_image() {
    let mut store = CatalogStore::open_in_memory().unwrap();
    store
        .add_image_category_product(&entry("/a.jpg", CategoryType::DRAGONFLY))
        .unwrap();

    let err = store
        .add_image_category_product(&entry("/b.jpg", CategoryType::DRAGONFLY))
        .unwrap_err();
    assert_eq!(err.step, SeedStep::Category);
    assert!(err.to_string().contains("category"));

    assert_eq!(store.row_count(Entity::Image).unwrap(), 1);
    let orphan: i64 = store
        .connection()
        .query_row(
            "SELECT COUNT(*) FROM Images WHERE ImagePath = '/b.jpg';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphan, 0);
}

#[test]
fn product_round_trip_keeps_price_text() {
    let store = CatalogStore::open_in_memory().unwrap();
    let image_id = store.add_image("/p.jpg").unwrap();
    let category_id = store
        .add_category(&NewCategory::new(CategoryType(9), "Beetles", Some(image_id)))
        .unwrap();
    let product = NewProduct {
        name: "Жук".to_string(),
        description: "Брошь в виде жука".to_string(),
        price: "5 000,50 р.".to_string(),
        quantity_in_stock: 3,
        quantity_purchased: 7,
        category_id,
        image_id,
    };

    let id = store.add_product(&product).unwrap();
    let loaded = store.get_product(id).unwrap().unwrap();

    assert_eq!(loaded.name, product.name);
    assert_eq!(loaded.description, product.description);
    assert_eq!(loaded.price, "5 000,50 р.");
    assert_eq!(loaded.quantity_in_stock, 3);
    assert_eq!(loaded.quantity_purchased, 7);
    assert_eq!(loaded.category_id, category_id);
    assert_eq!(loaded.image_id, image_id);
}

#[test]
fn inserts_with_missing_references_change_nothing() {
    let store = CatalogStore::open_in_memory().unwrap();

    let err = store
        .add_category(&NewCategory::new(CategoryType::FLY, "Flies", Some(42)))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::MissingReference {
            entity: Entity::Image,
            id: 42
        }
    ));

    let err = store
        .add_order(&NewOrder {
            price: "1 р.".to_string(),
            user_name: "Nobody".to_string(),
            user_address: "Nowhere".to_string(),
            delivery_type: DeliveryType(2),
            customer_id: 7,
            product_id: 8,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::MissingReference {
            entity: Entity::Customer,
            id: 7
        }
    ));

    assert_eq!(counts(&store), vec![0, 0, 0, 0, 0]);
}

#[test]
fn customer_with_order_cannot_be_removed() {
    let (store, _, _) = store_with_order();

    let err = store.remove_customer("alice").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Referenced {
            entity: Entity::Customer,
            by: Some(Entity::Order),
            ..
        }
    ));
    assert_eq!(store.row_count(Entity::Customer).unwrap(), 1);
}

#[test]
fn customer_without_order_is_removed() {
    let store = CatalogStore::open_in_memory().unwrap();
    store.add_customer(&NewCustomer::new("dave", "pw")).unwrap();

    store.remove_customer("dave").unwrap();
    assert_eq!(store.row_count(Entity::Customer).unwrap(), 0);
    assert!(store.get_customer("dave").unwrap().is_none());
}

#[test]
fn deleting_order_unblocks_customer_and_product() {
    let (store, product_id, order_id) = store_with_order();

    let err = store.delete_product(product_id).unwrap_err();
    assert!(matches!(err, RepoError::Referenced { .. }));

    let order = store.get_order(order_id).unwrap().unwrap();
    assert_eq!(order.delivery_type, DeliveryType(1));
    assert_eq!(order.user_address, "Main st. 1");

    store.delete_order(order_id).unwrap();
    store.delete_product(product_id).unwrap();
    store.remove_customer("alice").unwrap();
    assert_eq!(store.row_count(Entity::Order).unwrap(), 0);
    assert_eq!(store.row_count(Entity::Product).unwrap(), 0);
}

#[test]
fn referenced_image_and_category_cannot_be_deleted() {
    let mut store = CatalogStore::open_in_memory().unwrap();
    let seeded = store
        .add_image_category_product(&entry("/a.jpg", CategoryType::DRAGONFLY))
        .unwrap();

    let err = store.delete_image(seeded.image_id).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Referenced {
            entity: Entity::Image,
            ..
        }
    ));
    let err = store.delete_category(seeded.category_id).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Referenced {
            entity: Entity::Category,
            by: Some(Entity::Product),
            ..
        }
    ));

    store.delete_product(seeded.product_id).unwrap();
    store.delete_category(seeded.category_id).unwrap();
    store.delete_image(seeded.image_id).unwrap();
    assert_eq!(counts(&store), vec![0, 0, 0, 0, 0]);
}

#[test]
fn engine_blocks_referenced_delete_without_precheck() {
    let (store, _, _) = store_with_order();

    let err = store
        .connection()
        .execute("DELETE FROM Customers WHERE Login = 'alice';", [])
        .unwrap_err();
    assert_eq!(
        err.sqlite_error_code(),
        Some(rusqlite::ErrorCode::ConstraintViolation)
    );
    assert_eq!(store.row_count(Entity::Customer).unwrap(), 1);
}

#[test]
fn deleting_missing_rows_reports_not_found() {
    let store = CatalogStore::open_in_memory().unwrap();

    assert!(matches!(
        store.remove_customer("ghost").unwrap_err(),
        RepoError::NotFound {
            entity: Entity::Customer,
            ..
        }
    ));
    assert!(matches!(
        store.delete_image(1).unwrap_err(),
        RepoError::NotFound {
            entity: Entity::Image,
            ..
        }
    ));
    assert!(matches!(
        store.delete_category(1).unwrap_err(),
        RepoError::NotFound { .. }
    ));
    assert!(matches!(
        store.delete_product(1).unwrap_err(),
        RepoError::NotFound { .. }
    ));
    assert!(matches!(
        store.delete_order(1).unwrap_err(),
        RepoError::NotFound {
            entity: Entity::Order,
            ..
        }
    ));
}

#[test]
fn clear_tables_empties_populated_store_and_is_idempotent() {
    let (mut store, _, _) = store_with_order();
    assert_ne!(counts(&store), vec![0, 0, 0, 0, 0]);

    store.clear_tables().unwrap();
    assert_eq!(counts(&store), vec![0, 0, 0, 0, 0]);

    store.clear_tables().unwrap();
    assert_eq!(counts(&store), vec![0, 0, 0, 0, 0]);
}

#[test]
fn list_products_filters_by_category() {
    let mut store = CatalogStore::open_in_memory().unwrap();
    let first = store
        .add_image_category_product(&entry("/a.jpg", CategoryType::DRAGONFLY))
        .unwrap();
    let second = store
        .add_image_category_product(&entry("/b.jpg", CategoryType::FLY))
        .unwrap();

    let all = store.list_products(None).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first.product_id);

    let flies = store.list_products(Some(second.category_id)).unwrap();
    assert_eq!(flies.len(), 1);
    assert_eq!(flies[0].id, second.product_id);

    let categories = store.list_categories().unwrap();
    assert_eq!(categories[0].kind, CategoryType::DRAGONFLY);
    assert_eq!(
        store
            .get_category_by_type(CategoryType::FLY)
            .unwrap()
            .unwrap()
            .id,
        second.category_id
    );
}

#[test]
fn negative_quantity_is_blocked_by_check_constraint() {
    let mut store = CatalogStore::open_in_memory().unwrap();
    let seeded = store
        .add_image_category_product(&entry("/a.jpg", CategoryType::DRAGONFLY))
        .unwrap();

    let err = store
        .connection()
        .execute(
            "UPDATE Products SET QuantityInStock = -1 WHERE Id = ?1;",
            [seeded.product_id],
        )
        .unwrap_err();
    assert_eq!(
        err.sqlite_error_code(),
        Some(rusqlite::ErrorCode::ConstraintViolation)
    );
    assert_eq!(
        store
            .get_product(seeded.product_id)
            .unwrap()
            .unwrap()
            .quantity_in_stock,
        5
    );
}

#[test]
fn end_to_end_seed_then_repeat_aborts() {
    let mut store = CatalogStore::open_in_memory().unwrap();
    let seed = entry("/a.jpg", CategoryType(1));

    let seeded = store.add_image_category_product(&seed).unwrap();
    assert_eq!(counts(&store), vec![0, 1, 1, 1, 0]);
    let product = store.get_product(seeded.product_id).unwrap().unwrap();
    assert_eq!(product.name, "Prod A");
    assert_eq!(product.price, "100 р.");
    assert_eq!(product.quantity_in_stock, 5);
    assert_eq!(product.quantity_purchased, 0);

    assert!(store.add_image_category_product(&seed).is_err());
    assert_eq!(counts(&store), vec![0, 1, 1, 1, 0]);
}

#[test]
fn load_fixture_data_resets_to_two_brooches() {
    let (mut store, _, _) = store_with_order();

    let seeded = store.load_fixture_data().unwrap();
    assert_eq!(seeded.len(), 2);
    assert_eq!(counts(&store), vec![0, 2, 2, 2, 0]);

    store.load_fixture_data().unwrap();
    assert_eq!(counts(&store), vec![0, 2, 2, 2, 0]);

    let dragonflies = store
        .get_category_by_type(CategoryType::DRAGONFLY)
        .unwrap()
        .unwrap();
    let products = store.list_products(Some(dragonflies.id)).unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Стрекоза 1");
    assert_eq!(products[0].price, "5000 р.");
}

#[test]
fn close_connection_releases_store() {
    let store = CatalogStore::open_in_memory().unwrap();
    store.close_connection().unwrap();
}
