use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    DatabaseExpenseStore, EngineError, Expense, ExpenseDetails, ExpenseService, ExpenseStore,
    MoneyCents, Role, User,
};
use migration::MigratorTrait;

async fn service_with_db() -> (ExpenseService, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    for username in ["alice", "bob"] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, password) VALUES (?, ?)",
            vec![username.into(), "not-a-hash".into()],
        ))
        .await
        .unwrap();
    }
    let service = ExpenseService::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (service, db)
}

fn details(description: &str, amount: &str, date: &str) -> ExpenseDetails {
    ExpenseDetails {
        description: description.to_string(),
        amount: amount.parse().unwrap(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
    }
}

#[tokio::test]
async fn create_stores_owner_and_amount() {
    let (service, _db) = service_with_db().await;

    let expense = service
        .create(details("Coffee", "3.50", "2024-01-01"), "alice")
        .await
        .unwrap();

    assert!(expense.id.is_some());
    assert_eq!(expense.owner.username, "alice");
    assert_eq!(expense.owner.id, 1);
    assert_eq!(expense.amount, MoneyCents::new(350));
    assert_eq!(expense.description, "Coffee");

    let stored = service
        .get_by_id(expense.id.unwrap(), "alice")
        .await
        .unwrap();
    assert_eq!(stored, expense);
}

#[tokio::test]
async fn other_user_is_denied() {
    let (service, _db) = service_with_db().await;
    let id = service
        .create(details("Coffee", "3.50", "2024-01-01"), "alice")
        .await
        .unwrap()
        .id
        .unwrap();

    let err = service.get_by_id(id, "bob").await.unwrap_err();
    assert_eq!(err, EngineError::AccessDenied(id));
}

#[tokio::test]
async fn unknown_user_is_rejected() {
    let (service, _db) = service_with_db().await;

    let err = service
        .create(details("Coffee", "3.50", "2024-01-01"), "carol")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::UserNotFound("carol".to_string()));

    let err = service.get_all("carol").await.unwrap_err();
    assert_eq!(err, EngineError::UserNotFound("carol".to_string()));
}

#[tokio::test]
async fn usernames_match_exactly() {
    let (service, _db) = service_with_db().await;

    let err = service.get_all("Alice").await.unwrap_err();
    assert_eq!(err, EngineError::UserNotFound("Alice".to_string()));
}

#[tokio::test]
async fn update_keeps_id_and_owner() {
    let (service, _db) = service_with_db().await;
    let created = service
        .create(details("Coffee", "3.50", "2024-01-01"), "alice")
        .await
        .unwrap();
    let id = created.id.unwrap();

    let updated = service
        .update(id, details("Tea", "4.00", "2024-01-02"), "alice")
        .await
        .unwrap();

    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.owner, created.owner);
    assert_eq!(updated.description, "Tea");
    assert_eq!(updated.amount, MoneyCents::new(400));
    assert_eq!(
        updated.date,
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    );

    let reloaded = service.get_by_id(id, "alice").await.unwrap();
    assert_eq!(reloaded, updated);
}

#[tokio::test]
async fn update_missing_expense_fails() {
    let (service, _db) = service_with_db().await;

    let err = service
        .update(7, details("Tea", "4.00", "2024-01-02"), "alice")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ExpenseNotFound(7));
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let (service, _db) = service_with_db().await;
    let id = service
        .create(details("Coffee", "3.50", "2024-01-01"), "alice")
        .await
        .unwrap()
        .id
        .unwrap();

    service.delete(id, "alice").await.unwrap();

    let err = service.get_by_id(id, "alice").await.unwrap_err();
    assert_eq!(err, EngineError::ExpenseNotFound(id));
}

#[tokio::test]
async fn delete_leaves_other_expenses() {
    let (service, _db) = service_with_db().await;
    let coffee = service
        .create(details("Coffee", "3.50", "2024-01-01"), "alice")
        .await
        .unwrap();
    let lunch = service
        .create(details("Lunch", "12", "2024-01-01"), "alice")
        .await
        .unwrap();
    let bread = service
        .create(details("Bread", "2,20", "2024-01-03"), "bob")
        .await
        .unwrap();

    let err = service
        .delete(coffee.id.unwrap(), "bob")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::AccessDenied(coffee.id.unwrap()));

    service.delete(coffee.id.unwrap(), "alice").await.unwrap();

    assert_eq!(service.get_all("alice").await.unwrap(), vec![lunch]);
    assert_eq!(service.get_all("bob").await.unwrap(), vec![bread]);
}

#[tokio::test]
async fn get_all_returns_exactly_own_records() {
    let (service, _db) = service_with_db().await;
    let first = service
        .create(details("Coffee", "3.50", "2024-01-01"), "alice")
        .await
        .unwrap();
    let second = service
        .create(details("Tea", "-1.25", "2024-01-02"), "alice")
        .await
        .unwrap();
    service
        .create(details("Bread", "2.20", "2024-01-03"), "bob")
        .await
        .unwrap();

    let expenses = service.get_all("alice").await.unwrap();

    assert_eq!(expenses, vec![first, second]);
    assert!(expenses.iter().all(|e| e.owner.username == "alice"));
    assert!(expenses[1].amount.is_negative());
}

#[tokio::test]
async fn get_by_id_is_idempotent() {
    let (service, _db) = service_with_db().await;
    let id = service
        .create(details("Coffee", "3.50", "2024-01-01"), "alice")
        .await
        .unwrap()
        .id
        .unwrap();

    let first = service.get_by_id(id, "alice").await.unwrap();
    let second = service.get_by_id(id, "alice").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn deleting_owner_cascades_to_expenses() {
    let (service, db) = service_with_db().await;
    let id = service
        .create(details("Coffee", "3.50", "2024-01-01"), "bob")
        .await
        .unwrap()
        .id
        .unwrap();

    let backend = db.get_database_backend();
    db.execute(Statement::from_string(backend, "PRAGMA foreign_keys = ON"))
        .await
        .unwrap();
    db.execute(Statement::from_sql_and_values(
        backend,
        "DELETE FROM users WHERE username = ?",
        vec!["bob".into()],
    ))
    .await
    .unwrap();

    let err = service.get_by_id(id, "bob").await.unwrap_err();
    assert_eq!(err, EngineError::ExpenseNotFound(id));
}

#[tokio::test]
async fn saving_unknown_id_is_not_found() {
    let (_service, db) = service_with_db().await;
    let store = DatabaseExpenseStore::new(db);
    let owner = User {
        id: 1,
        username: "alice".to_string(),
        role: Role::User,
    };
    let mut expense = Expense::new(details("Coffee", "3.50", "2024-01-01"), owner);
    expense.id = Some(99);

    let err = store.save(expense).await.unwrap_err();
    assert_eq!(err, EngineError::ExpenseNotFound(99));
}

#[tokio::test]
async fn saving_after_concurrent_delete_is_not_found() {
    let (service, db) = service_with_db().await;
    let store = DatabaseExpenseStore::new(db);
    let id = service
        .create(details("Coffee", "3.50", "2024-01-01"), "alice")
        .await
        .unwrap()
        .id
        .unwrap();

    let mut loaded = service.get_by_id(id, "alice").await.unwrap();
    store.delete(&loaded).await.unwrap();
    loaded.apply(details("Tea", "4.00", "2024-01-02"));

    let err = store.save(loaded).await.unwrap_err();
    assert_eq!(err, EngineError::ExpenseNotFound(id));
    assert!(store.find_by_id(id).await.unwrap().is_none());
}
