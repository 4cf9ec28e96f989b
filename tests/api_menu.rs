//! Integration tests per il documento menu e l'health check

mod common;

#[cfg(test)]
mod menu_tests {
    use super::common::*;
    use server::entities::MenuDocument;
    use sqlx::SqlitePool;

    #[sqlx::test]
    async fn test_root_health_check(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let response = server.get("/").await;
        response.assert_status_ok();
        Ok(())
    }

    #[sqlx::test]
    async fn test_menu_schema(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let response = server.get("/menu").await;
        response.assert_status_ok();

        let menu: MenuDocument = response.json();
        assert_eq!(menu.total_halls as usize, menu.halls.len());
        assert!(!menu.last_updated.is_empty());

        // hall -> stazioni -> piatti, ognuno con nutrizione, allergeni e tag
        let hall = menu.halls.get("Bursley").expect("fixture contains Bursley");
        assert_eq!(hall.name, "Bursley");
        let items: usize = hall.stations.values().map(Vec::len).sum();
        assert_eq!(hall.item_count as usize, items);

        let pizza = hall
            .stations
            .values()
            .flatten()
            .find(|item| item.name == "Cheese Pizza")
            .expect("fixture contains Cheese Pizza");
        assert!(pizza.nutrition.has_nutrition_data);
        assert_eq!(pizza.nutrition.calories, Some(290));
        assert!(pizza.allergens.contains(&"milk".to_string()));
        assert!(pizza.dietary_tags.contains(&"Vegetarian".to_string()));

        // i piatti senza tabella nutrizionale mantengono il flag spento
        let fruit = hall
            .stations
            .values()
            .flatten()
            .find(|item| item.name == "Seasonal Fruit Cup")
            .expect("fixture contains Seasonal Fruit Cup");
        assert!(!fruit.nutrition.has_nutrition_data);
        assert_eq!(fruit.nutrition.calories, None);
        Ok(())
    }

    #[sqlx::test]
    async fn test_menu_is_public(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        // nessun token: il menu resta leggibile
        let response = server.get("/menu").await;
        response.assert_status_ok();
        Ok(())
    }
}
