//! Integration tests for PostgresStore
//!
//! These tests require a PostgreSQL database to be running.
//! Set the DATABASE_URL environment variable to run these tests:
//!
//! ```bash
//! export DATABASE_URL="postgresql://localhost/vehicletype_test"
//! cargo test --package vehicletype-repository --features postgres -- --ignored
//! ```

#[cfg(feature = "postgres")]
mod postgres_tests {
    use std::sync::Arc;
    use vehicletype_core::{CarAttrs, CarDto, RepositoryPort, TruckAttrs, TruckDto, VehicleKind};
    use vehicletype_repository::{
        CacheConfig, PostgresStore, VehicleDetails, VehicleEntity, VehicleRepository, VehicleStore,
    };

    /// Get database URL from environment or use default test database
    fn get_database_url() -> String {
        std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgresql://localhost/vehicletype_test".to_string())
    }

    /// Connect, apply the schema and clear existing rows
    async fn setup_test_store() -> PostgresStore {
        let store = PostgresStore::new(&get_database_url())
            .await
            .expect("Failed to connect to test database. Make sure PostgreSQL is running and DATABASE_URL is set correctly.");
        store.migrate().await.expect("Failed to apply schema");

        sqlx::query("TRUNCATE TABLE vehicle RESTART IDENTITY CASCADE")
            .execute(store.pool())
            .await
            .expect("Failed to clean vehicle tables");

        store
    }

    fn truck(make: &str, capacity: f64) -> VehicleEntity {
        VehicleEntity {
            id: None,
            make: make.to_string(),
            model: "Test".to_string(),
            year: 2021,
            details: VehicleDetails::Truck {
                payload_capacity: capacity,
            },
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_save_and_find_truck() {
        let store = setup_test_store().await;

        let saved = store.save(truck("Volvo", 25000.5)).await.unwrap();
        let id = saved.id.unwrap();

        let found = store.find_by_id(VehicleKind::Truck, id).await.unwrap();
        assert_eq!(found, Some(saved));
        assert!(store.find_by_id(VehicleKind::Car, id).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore]
    async fn test_update_existing_record() {
        let store = setup_test_store().await;

        let mut saved = store.save(truck("MAN", 100.0)).await.unwrap();
        saved.details = VehicleDetails::Truck {
            payload_capacity: 200.25,
        };
        let updated = store.save(saved.clone()).await.unwrap();

        assert_eq!(updated.id, saved.id);
        let found = store
            .find_by_id(VehicleKind::Truck, saved.id.unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.details, VehicleDetails::Truck { payload_capacity: 200.25 });
    }

    #[tokio::test]
    #[ignore]
    async fn test_find_all_orders_by_make() {
        let store = setup_test_store().await;
        for make in ["Scania", "DAF", "MAN"] {
            store.save(truck(make, 10.0)).await.unwrap();
        }

        let page = store
            .find_all_by_make_asc(VehicleKind::Truck, 0, 2)
            .await
            .unwrap();
        let makes: Vec<String> = page.into_iter().map(|t| t.make).collect();
        assert_eq!(makes, vec!["DAF".to_string(), "MAN".to_string()]);
    }

    #[tokio::test]
    #[ignore]
    async fn test_delete_removes_detail_row() {
        let store = setup_test_store().await;
        let id = store.save(truck("Iveco", 50.0)).await.unwrap().id.unwrap();

        store.delete_by_id(VehicleKind::Car, id).await.unwrap();
        assert!(store.exists_by_id(VehicleKind::Truck, id).await.unwrap());

        store.delete_by_id(VehicleKind::Truck, id).await.unwrap();
        assert!(!store.exists_by_id(VehicleKind::Truck, id).await.unwrap());
    }

    #[tokio::test]
    #[ignore]
    async fn test_cached_repository_over_postgres() {
        let store: Arc<dyn VehicleStore> = Arc::new(setup_test_store().await);
        let cars = VehicleRepository::<CarAttrs>::new(store.clone(), CacheConfig::default());
        let trucks = VehicleRepository::<TruckAttrs>::new(store, CacheConfig::default());

        let car = cars
            .save(CarDto::new("Toyota", "Corolla", 2020, CarAttrs { number_of_doors: 4 }))
            .await
            .unwrap();
        let truck = trucks
            .save(TruckDto::new("Volvo", "FH16", 2021, TruckAttrs { payload_capacity: 99999.99 }))
            .await
            .unwrap();

        assert_ne!(car.id, truck.id);
        assert_eq!(cars.find_by_id(car.id.unwrap()).await.unwrap(), car);
        assert!(cars.delete(car.id.unwrap()).await.unwrap());
        assert!(cars.find_by_id(car.id.unwrap()).await.is_err());
    }
}
