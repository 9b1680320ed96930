//! Integration tests for order assignment against a real database.
//!
//! Covers the Postgres lookup on its own (scoped, unscoped, NULL partitions,
//! missing tables, store failures) and the module/content append paths that
//! use it.

use assert_matches::assert_matches;
use educa_core::content::ContentKind;
use educa_core::ordering::{assign_order, Order, OrderError, OrderScope, Orderable};
use educa_core::roles::ROLE_INSTRUCTOR;
use educa_db::models::course::{Course, CreateCourse};
use educa_db::models::item::ItemInput;
use educa_db::models::module::{CreateModule, Module};
use educa_db::models::subject::CreateSubject;
use educa_db::models::user::CreateUser;
use educa_db::ordering::PgOrderLookup;
use educa_db::repositories::{
    ContentRepo, CourseRepo, ModuleRepo, RoleRepo, SubjectRepo, UserRepo,
};
use sqlx::{PgConnection, PgPool};

// ---------------------------------------------------------------------------
// Probe table
// ---------------------------------------------------------------------------

/// A row of the `ordering_probe` table, ordered within its category.
struct Probe {
    category: Option<String>,
    order: Option<Order>,
}

impl Orderable for Probe {
    const RECORD_TYPE: &'static str = "ordering_probe";

    fn order(&self) -> Option<Order> {
        self.order
    }

    fn set_order(&mut self, order: Order) {
        self.order = Some(order);
    }
}

/// Same shape, pointed at a table that is never created.
struct Unprovisioned {
    order: Option<Order>,
}

impl Orderable for Unprovisioned {
    const RECORD_TYPE: &'static str = "ordering_probe_missing";

    fn order(&self) -> Option<Order> {
        self.order
    }

    fn set_order(&mut self, order: Order) {
        self.order = Some(order);
    }
}

async fn create_probe_table(pool: &PgPool) {
    sqlx::query(
        "CREATE TABLE ordering_probe (
            id         BIGSERIAL PRIMARY KEY,
            category   TEXT,
            sort_order INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await
    .unwrap();
}

/// Assign an order to a probe within its category and insert it.
async fn save_probe(conn: &mut PgConnection, category: Option<&str>, order: Option<Order>) -> Order {
    let mut probe = Probe {
        category: category.map(str::to_string),
        order,
    };
    let scope = OrderScope::unscoped().with("category", probe.category.clone());
    let assigned = {
        let mut lookup = PgOrderLookup::new(&mut *conn);
        assign_order(&mut probe, &scope, &mut lookup).await.unwrap()
    };
    sqlx::query("INSERT INTO ordering_probe (category, sort_order) VALUES ($1, $2)")
        .bind(&probe.category)
        .bind(assigned)
        .execute(&mut *conn)
        .await
        .unwrap();
    assert_eq!(probe.order, Some(assigned));
    assigned
}

// ---------------------------------------------------------------------------
// Helpers for the course hierarchy
// ---------------------------------------------------------------------------

async fn seed_course(pool: &PgPool, slug: &str) -> Course {
    let role = RoleRepo::find_by_name(pool, ROLE_INSTRUCTOR)
        .await
        .unwrap()
        .unwrap();
    let owner = UserRepo::create(
        pool,
        &CreateUser {
            username: format!("owner-{slug}"),
            email: format!("{slug}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            role_id: role.id,
        },
    )
    .await
    .unwrap();
    let subject = SubjectRepo::create(
        pool,
        &CreateSubject {
            title: format!("Subject {slug}"),
            slug: format!("subject-{slug}"),
        },
    )
    .await
    .unwrap();
    CourseRepo::create(
        pool,
        owner.id,
        &CreateCourse {
            subject_id: subject.id,
            title: format!("Course {slug}"),
            slug: slug.to_string(),
            overview: String::new(),
        },
    )
    .await
    .unwrap()
}

fn new_module(course_id: i64, title: &str, order: Option<Order>) -> CreateModule {
    CreateModule {
        course_id,
        title: title.to_string(),
        description: String::new(),
        order,
    }
}

async fn add_module(pool: &PgPool, course_id: i64, title: &str) -> Module {
    ModuleRepo::create(pool, &new_module(course_id, title, None))
        .await
        .unwrap()
}

fn text(title: &str) -> ItemInput {
    ItemInput {
        title: title.to_string(),
        body: "Lorem ipsum".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Test: Postgres lookup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_categories_are_numbered_independently(pool: PgPool) {
    create_probe_table(&pool).await;
    let mut conn = pool.acquire().await.unwrap();

    assert_eq!(save_probe(&mut conn, Some("A"), None).await, 0);
    assert_eq!(save_probe(&mut conn, Some("A"), None).await, 1);
    assert_eq!(save_probe(&mut conn, Some("B"), None).await, 0);
    assert_eq!(save_probe(&mut conn, Some("A"), None).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_null_category_is_its_own_partition(pool: PgPool) {
    create_probe_table(&pool).await;
    let mut conn = pool.acquire().await.unwrap();

    assert_eq!(save_probe(&mut conn, Some("A"), None).await, 0);
    assert_eq!(save_probe(&mut conn, None, None).await, 0);
    assert_eq!(save_probe(&mut conn, None, None).await, 1);
    assert_eq!(save_probe(&mut conn, Some("A"), None).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unscoped_lookup_spans_the_table(pool: PgPool) {
    create_probe_table(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    save_probe(&mut conn, Some("A"), None).await;
    save_probe(&mut conn, Some("B"), Some(4)).await;

    let mut probe = Probe {
        category: None,
        order: None,
    };
    let mut lookup = PgOrderLookup::new(&mut conn);
    let order = assign_order(&mut probe, &OrderScope::unscoped(), &mut lookup)
        .await
        .unwrap();
    assert_eq!(order, 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_explicit_order_is_kept(pool: PgPool) {
    create_probe_table(&pool).await;
    let mut conn = pool.acquire().await.unwrap();

    assert_eq!(save_probe(&mut conn, Some("A"), Some(10)).await, 10);
    assert_eq!(save_probe(&mut conn, Some("A"), None).await, 11);
    // Duplicates are not rejected.
    assert_eq!(save_probe(&mut conn, Some("A"), Some(10)).await, 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_table_starts_at_zero(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let mut record = Unprovisioned { order: None };
    let mut lookup = PgOrderLookup::new(&mut conn);

    let order = assign_order(&mut record, &OrderScope::unscoped(), &mut lookup)
        .await
        .unwrap();

    assert_eq!(order, 0);
    assert_eq!(record.order, Some(0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_database_errors_propagate(pool: PgPool) {
    create_probe_table(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    let mut probe = Probe {
        category: None,
        order: None,
    };
    let scope = OrderScope::unscoped().with("no_such_column", 1_i64);
    let mut lookup = PgOrderLookup::new(&mut conn);

    let result = assign_order(&mut probe, &scope, &mut lookup).await;

    assert_matches!(result, Err(OrderError::Store(sqlx::Error::Database(_))));
    assert_eq!(probe.order, None);
}

// ---------------------------------------------------------------------------
// Test: Modules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_modules_are_numbered_per_course(pool: PgPool) {
    let first = seed_course(&pool, "first").await;
    let second = seed_course(&pool, "second").await;

    let a = add_module(&pool, first.id, "Intro").await;
    let b = add_module(&pool, first.id, "Basics").await;
    let c = add_module(&pool, second.id, "Welcome").await;

    assert_eq!((a.order, b.order, c.order), (0, 1, 0));
    assert_eq!(a.label(), "0. Intro");

    let listed: Vec<_> = ModuleRepo::list_by_course(&pool, first.id)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.title)
        .collect();
    assert_eq!(listed, vec!["Intro", "Basics"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_module_leaves_a_gap(pool: PgPool) {
    let course = seed_course(&pool, "gaps").await;
    add_module(&pool, course.id, "A").await;
    let b = add_module(&pool, course.id, "B").await;
    let c = add_module(&pool, course.id, "C").await;

    sqlx::query("DELETE FROM modules WHERE id = $1")
        .bind(c.id)
        .execute(&pool)
        .await
        .unwrap();
    let d = add_module(&pool, course.id, "D").await;
    assert_eq!(d.order, 2, "follows the largest remaining order");

    sqlx::query("DELETE FROM modules WHERE id = $1")
        .bind(b.id)
        .execute(&pool)
        .await
        .unwrap();
    let e = add_module(&pool, course.id, "E").await;
    assert_eq!(e.order, 3, "gaps are not reused");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_module_for_missing_course_is_not_found(pool: PgPool) {
    let result = ModuleRepo::create(&pool, &new_module(999_999, "Orphan", None)).await;
    assert_matches!(result, Err(OrderError::Store(sqlx::Error::RowNotFound)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_appends_get_distinct_orders(pool: PgPool) {
    let course = seed_course(&pool, "race").await;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let pool = pool.clone();
            let input = new_module(course.id, &format!("M{i}"), None);
            tokio::spawn(async move { ModuleRepo::create(&pool, &input).await.unwrap() })
        })
        .collect();

    let mut orders = Vec::new();
    for handle in handles {
        orders.push(handle.await.unwrap().order);
    }
    orders.sort_unstable();
    assert_eq!(orders, (0..8).collect::<Vec<Order>>());
}

// ---------------------------------------------------------------------------
// Test: Contents
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_contents_are_numbered_per_module(pool: PgPool) {
    let course = seed_course(&pool, "contents").await;
    let m1 = add_module(&pool, course.id, "One").await;
    let m2 = add_module(&pool, course.id, "Two").await;

    let a = ContentRepo::create_with_item(&pool, m1.id, ContentKind::Text, course.owner_id, &text("a"))
        .await
        .unwrap();
    let b = ContentRepo::create_with_item(
        &pool,
        m1.id,
        ContentKind::Video,
        course.owner_id,
        &ItemInput {
            title: "b".to_string(),
            body: "https://videos.example.com/b".to_string(),
        },
    )
    .await
    .unwrap();
    let c = ContentRepo::create_with_item(&pool, m2.id, ContentKind::Text, course.owner_id, &text("c"))
        .await
        .unwrap();

    assert_eq!(a.content.order, 0);
    assert_eq!(b.content.order, 1, "kinds share one sequence per module");
    assert_eq!(c.content.order, 0);

    let listed = ContentRepo::list_with_items(&pool, m1.id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].content.kind, ContentKind::Text);
    assert_eq!(listed[1].item.as_ref().unwrap().body, "https://videos.example.com/b");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_content_removes_item(pool: PgPool) {
    let course = seed_course(&pool, "delete-content").await;
    let module = add_module(&pool, course.id, "One").await;
    let created = ContentRepo::create_with_item(
        &pool,
        module.id,
        ContentKind::Text,
        course.owner_id,
        &text("gone"),
    )
    .await
    .unwrap();

    assert!(ContentRepo::delete_with_item(&pool, &created.content).await.unwrap());

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM texts")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
    assert!(ContentRepo::find_by_id(&pool, created.content.id)
        .await
        .unwrap()
        .is_none());
}
