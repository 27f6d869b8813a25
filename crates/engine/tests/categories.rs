use engine::{EngineError, NewUser, Repository};

mod common;

use common::{CHAT, OTHER_CHAT, at, count_rows, engine_with_db, expense};

#[tokio::test]
async fn add_user_inserts_once() {
    let (engine, _db) = engine_with_db().await;
    let user = NewUser {
        chat_id: CHAT,
        username: Some("alice".to_string()),
        language: Some("en".to_string()),
    };

    assert!(engine.add_user(user.clone()).await.unwrap());
    assert!(!engine.add_user(user).await.unwrap());

    let stored = engine.user_by_chat_id(CHAT).await.unwrap().unwrap();
    assert_eq!(stored.username.as_deref(), Some("alice"));
    assert_eq!(stored.language.as_deref(), Some("en"));
}

#[tokio::test]
async fn unknown_user_is_absent() {
    let (engine, _db) = engine_with_db().await;
    assert_eq!(engine.user_by_chat_id(CHAT).await.unwrap(), None);
}

#[tokio::test]
async fn add_category_trims_name() {
    let (engine, _db) = engine_with_db().await;
    let category = engine.add_category(CHAT, "  Groceries ").await.unwrap();

    assert_eq!(category.name, "Groceries");
    assert_eq!(category.chat_id, CHAT);
    assert!(!category.is_deleted);
}

#[tokio::test]
async fn blank_category_name_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let err = engine.add_category(CHAT, "   ").await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));
    assert!(engine.categories_by_chat_id(CHAT).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_names_are_allowed() {
    let (engine, _db) = engine_with_db().await;
    let first = engine.add_category(CHAT, "Food").await.unwrap();
    let second = engine.add_category(CHAT, "Food").await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(engine.categories_by_chat_id(CHAT).await.unwrap().len(), 2);
}

#[tokio::test]
async fn categories_are_listed_per_chat_in_creation_order() {
    let (engine, _db) = engine_with_db().await;
    engine.add_category(CHAT, "Food").await.unwrap();
    engine.add_category(OTHER_CHAT, "Rent").await.unwrap();
    engine.add_category(CHAT, "Fuel").await.unwrap();

    let names: Vec<String> = engine
        .categories_by_chat_id(CHAT)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Food".to_string(), "Fuel".to_string()]);
}

#[tokio::test]
async fn rename_keeps_id_owner_and_transactions() {
    let (engine, _db) = engine_with_db().await;
    let category = engine.add_category(CHAT, "Food").await.unwrap();
    engine
        .add_transaction(expense(CHAT, category.id, 10.0, at(2024, 1, 10, 12)))
        .await
        .unwrap();

    engine
        .rename_category(CHAT, category.id, "Groceries")
        .await
        .unwrap();

    let categories = engine.categories_by_chat_id(CHAT).await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].id, category.id);
    assert_eq!(categories[0].chat_id, CHAT);
    assert_eq!(categories[0].name, "Groceries");

    let stats = engine
        .transaction_stats(CHAT, at(2024, 1, 1, 0), at(2024, 2, 1, 0))
        .await
        .unwrap();
    assert_eq!(stats.expense.get("Groceries"), Some(&10.0));
    assert!(!stats.expense.contains_key("Food"));
}

#[tokio::test]
async fn rename_from_another_chat_is_not_found() {
    let (engine, _db) = engine_with_db().await;
    let category = engine.add_category(CHAT, "Food").await.unwrap();

    let err = engine
        .rename_category(OTHER_CHAT, category.id, "Hijack")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::KeyNotFound(format!("category {}", category.id))
    );
    assert_eq!(engine.categories_by_chat_id(CHAT).await.unwrap()[0].name, "Food");
}

#[tokio::test]
async fn delete_hides_category_and_its_transactions_but_keeps_rows() {
    let (engine, db) = engine_with_db().await;
    let food = engine.add_category(CHAT, "Food").await.unwrap();
    let rent = engine.add_category(CHAT, "Rent").await.unwrap();
    engine
        .add_transaction(expense(CHAT, food.id, 10.0, at(2024, 1, 10, 12)))
        .await
        .unwrap();
    engine
        .add_transaction(expense(CHAT, rent.id, 500.0, at(2024, 1, 11, 12)))
        .await
        .unwrap();

    engine.delete_category(CHAT, food.id).await.unwrap();

    let live = engine.categories_by_chat_id(CHAT).await.unwrap();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].id, rent.id);

    let stats = engine
        .transaction_stats(CHAT, at(2024, 1, 1, 0), at(2024, 2, 1, 0))
        .await
        .unwrap();
    assert!(!stats.expense.contains_key("Food"));
    assert_eq!(stats.total_expense(), 500.0);

    let categories = count_rows(
        &db,
        "SELECT COUNT(*) AS n FROM categories WHERE id = ? AND is_deleted = 1",
        food.id,
    )
    .await;
    assert_eq!(categories, 1);
    let transactions = count_rows(
        &db,
        "SELECT COUNT(*) AS n FROM transactions WHERE category_id = ? AND is_deleted = 1",
        food.id,
    )
    .await;
    assert_eq!(transactions, 1);
}

#[tokio::test]
async fn delete_twice_reports_not_found() {
    let (engine, _db) = engine_with_db().await;
    let food = engine.add_category(CHAT, "Food").await.unwrap();

    engine.delete_category(CHAT, food.id).await.unwrap();
    let err = engine.delete_category(CHAT, food.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn delete_from_another_chat_leaves_everything_in_place() {
    let (engine, db) = engine_with_db().await;
    let food = engine.add_category(CHAT, "Food").await.unwrap();
    engine
        .add_transaction(expense(CHAT, food.id, 10.0, at(2024, 1, 10, 12)))
        .await
        .unwrap();

    let err = engine.delete_category(OTHER_CHAT, food.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    assert_eq!(engine.categories_by_chat_id(CHAT).await.unwrap().len(), 1);
    let hidden = count_rows(
        &db,
        "SELECT COUNT(*) AS n FROM transactions WHERE category_id = ? AND is_deleted = 1",
        food.id,
    )
    .await;
    assert_eq!(hidden, 0);
}
