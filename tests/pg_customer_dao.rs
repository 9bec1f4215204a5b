//! PostgreSQL store tests. They need a reachable database in `DATABASE_URL` and
//! return early when it is unset.

use customer_api::model::{CustomerChanges, NewCustomer};
use customer_api::{ensure_customer_table, CustomerDao, PgCustomerDao};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::OnceCell;
use uuid::Uuid;

// Create the table once per test process; concurrent CREATE TABLE IF NOT EXISTS can collide.
static TABLE_READY: OnceCell<()> = OnceCell::const_new();

async fn dao() -> anyhow::Result<Option<PgCustomerDao>> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL missing; skip postgres store tests");
        return Ok(None);
    };
    TABLE_READY
        .get_or_try_init(|| async {
            let pool = PgPoolOptions::new().max_connections(1).connect(&url).await?;
            ensure_customer_table(&pool).await?;
            pool.close().await;
            Ok::<(), anyhow::Error>(())
        })
        .await?;
    // Fresh pool per test: each #[tokio::test] has its own runtime.
    let pool = PgPoolOptions::new().max_connections(2).connect(&url).await?;
    Ok(Some(PgCustomerDao::new(pool)))
}

fn unique_email() -> String {
    format!("customer-{}@example.com", Uuid::new_v4())
}

fn new_customer(email: &str) -> NewCustomer {
    NewCustomer {
        name: "Grace Hopper".into(),
        email: email.into(),
        age: 20,
    }
}

#[tokio::test]
async fn select_all_customers() -> anyhow::Result<()> {
    let Some(dao) = dao().await? else { return Ok(()) };
    dao.insert_customer(new_customer(&unique_email())).await?;

    let all = dao.select_all_customers().await?;
    assert!(!all.is_empty());
    Ok(())
}

#[tokio::test]
async fn select_customer_by_id() -> anyhow::Result<()> {
    let Some(dao) = dao().await? else { return Ok(()) };
    let email = unique_email();
    let id = dao.insert_customer(new_customer(&email)).await?;

    let customer = dao.select_customer_by_id(id).await?.expect("inserted row");
    assert_eq!(customer.id, id);
    assert_eq!(customer.name, "Grace Hopper");
    assert_eq!(customer.email, email);
    assert_eq!(customer.age, 20);
    Ok(())
}

#[tokio::test]
async fn select_missing_id_returns_none() -> anyhow::Result<()> {
    let Some(dao) = dao().await? else { return Ok(()) };
    assert!(dao.select_customer_by_id(-1).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn exists_by_email_and_id() -> anyhow::Result<()> {
    let Some(dao) = dao().await? else { return Ok(()) };
    let email = unique_email();
    let id = dao.insert_customer(new_customer(&email)).await?;

    assert!(dao.exists_customer_with_email(&email).await?);
    assert!(!dao.exists_customer_with_email(&unique_email()).await?);
    assert!(dao.exists_customer_with_id(id).await?);
    assert!(!dao.exists_customer_with_id(-1).await?);
    Ok(())
}

#[tokio::test]
async fn duplicate_email_insert_is_a_conflict() -> anyhow::Result<()> {
    let Some(dao) = dao().await? else { return Ok(()) };
    let email = unique_email();
    dao.insert_customer(new_customer(&email)).await?;

    let err = dao.insert_customer(new_customer(&email)).await.unwrap_err();
    assert!(matches!(err, customer_api::AppError::Conflict(_)));
    Ok(())
}

#[tokio::test]
async fn delete_customer_by_id() -> anyhow::Result<()> {
    let Some(dao) = dao().await? else { return Ok(()) };
    let id = dao.insert_customer(new_customer(&unique_email())).await?;

    dao.delete_customer_by_id(id).await?;
    assert!(dao.select_customer_by_id(id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn update_single_columns() -> anyhow::Result<()> {
    let Some(dao) = dao().await? else { return Ok(()) };
    let email = unique_email();
    let id = dao.insert_customer(new_customer(&email)).await?;

    let mut changes = CustomerChanges::new(id);
    changes.name = Some("foo".into());
    dao.update_customer(&changes).await?;
    let c = dao.select_customer_by_id(id).await?.expect("row");
    assert_eq!((c.name.as_str(), c.email.as_str(), c.age), ("foo", email.as_str(), 20));

    let new_email = unique_email();
    let mut changes = CustomerChanges::new(id);
    changes.email = Some(new_email.clone());
    dao.update_customer(&changes).await?;
    let c = dao.select_customer_by_id(id).await?.expect("row");
    assert_eq!((c.name.as_str(), c.email.as_str(), c.age), ("foo", new_email.as_str(), 20));

    let mut changes = CustomerChanges::new(id);
    changes.age = Some(100);
    dao.update_customer(&changes).await?;
    let c = dao.select_customer_by_id(id).await?.expect("row");
    assert_eq!((c.name.as_str(), c.email.as_str(), c.age), ("foo", new_email.as_str(), 100));
    Ok(())
}

#[tokio::test]
async fn update_all_columns() -> anyhow::Result<()> {
    let Some(dao) = dao().await? else { return Ok(()) };
    let id = dao.insert_customer(new_customer(&unique_email())).await?;

    let changes = CustomerChanges {
        id,
        name: Some("foo".into()),
        email: Some(unique_email()),
        age: Some(22),
    };
    dao.update_customer(&changes).await?;

    let c = dao.select_customer_by_id(id).await?.expect("row");
    assert_eq!(Some(c.name), changes.name);
    assert_eq!(Some(c.email), changes.email);
    assert_eq!(Some(c.age), changes.age);
    Ok(())
}

#[tokio::test]
async fn empty_changes_leave_row_intact() -> anyhow::Result<()> {
    let Some(dao) = dao().await? else { return Ok(()) };
    let email = unique_email();
    let id = dao.insert_customer(new_customer(&email)).await?;

    dao.update_customer(&CustomerChanges::new(id)).await?;

    let c = dao.select_customer_by_id(id).await?.expect("row");
    assert_eq!((c.name.as_str(), c.email.as_str(), c.age), ("Grace Hopper", email.as_str(), 20));
    Ok(())
}
