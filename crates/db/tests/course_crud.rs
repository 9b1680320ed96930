//! Integration tests for course, module-editor and item repositories.

use assert_matches::assert_matches;
use educa_core::content::ContentKind;
use educa_core::formset::{plan_modules, ModuleForm};
use educa_core::ordering::OrderError;
use educa_core::roles::ROLE_INSTRUCTOR;
use educa_db::models::course::{CreateCourse, UpdateCourse};
use educa_db::models::item::ItemInput;
use educa_db::models::module::CreateModule;
use educa_db::models::subject::CreateSubject;
use educa_db::models::user::{CreateUser, User};
use educa_db::repositories::{
    ContentRepo, CourseRepo, ItemRepo, ModuleRepo, RoleRepo, SubjectRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn instructor(pool: &PgPool, username: &str) -> User {
    let role = RoleRepo::find_by_name(pool, ROLE_INSTRUCTOR)
        .await
        .unwrap()
        .unwrap();
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            role_id: role.id,
        },
    )
    .await
    .unwrap()
}

async fn subject(pool: &PgPool) -> i64 {
    SubjectRepo::create(
        pool,
        &CreateSubject {
            title: "Programming".to_string(),
            slug: "programming".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn new_course(subject_id: i64, slug: &str) -> CreateCourse {
    CreateCourse {
        subject_id,
        title: format!("Course {slug}"),
        slug: slug.to_string(),
        overview: String::new(),
    }
}

fn form(id: Option<i64>, title: &str, delete: bool) -> ModuleForm {
    ModuleForm {
        id,
        title: title.to_string(),
        description: String::new(),
        delete,
    }
}

// ---------------------------------------------------------------------------
// Test: Courses
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_course_lifecycle(pool: PgPool) {
    let owner = instructor(&pool, "ada").await;
    let subject_id = subject(&pool).await;

    let course = CourseRepo::create(&pool, owner.id, &new_course(subject_id, "rust-101"))
        .await
        .unwrap();
    assert_eq!(course.owner_id, owner.id);
    assert_eq!(course.overview, "");

    let updated = CourseRepo::update_owned(
        &pool,
        course.id,
        owner.id,
        &UpdateCourse {
            title: Some("Rust 101".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.title, "Rust 101");
    assert_eq!(updated.slug, "rust-101", "untouched fields are kept");

    assert!(CourseRepo::delete_owned(&pool, course.id, owner.id).await.unwrap());
    assert!(CourseRepo::find_by_id(&pool, course.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_owner_cannot_touch_course(pool: PgPool) {
    let owner = instructor(&pool, "ada").await;
    let other = instructor(&pool, "grace").await;
    let subject_id = subject(&pool).await;
    let course = CourseRepo::create(&pool, owner.id, &new_course(subject_id, "mine"))
        .await
        .unwrap();

    assert!(CourseRepo::find_owned(&pool, course.id, other.id)
        .await
        .unwrap()
        .is_none());
    assert!(CourseRepo::update_owned(&pool, course.id, other.id, &UpdateCourse::default())
        .await
        .unwrap()
        .is_none());
    assert!(!CourseRepo::delete_owned(&pool, course.id, other.id).await.unwrap());
    assert!(CourseRepo::list_by_owner(&pool, other.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_slug_is_rejected(pool: PgPool) {
    let owner = instructor(&pool, "ada").await;
    let subject_id = subject(&pool).await;
    CourseRepo::create(&pool, owner.id, &new_course(subject_id, "dup"))
        .await
        .unwrap();

    let err = CourseRepo::create(&pool, owner.id, &new_course(subject_id, "dup"))
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db) => {
            assert_eq!(db.code().as_deref(), Some("23505"));
            assert_eq!(db.constraint(), Some("uq_courses_slug"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_course_removes_items(pool: PgPool) {
    let owner = instructor(&pool, "ada").await;
    let subject_id = subject(&pool).await;
    let course = CourseRepo::create(&pool, owner.id, &new_course(subject_id, "cleanup"))
        .await
        .unwrap();
    let module = ModuleRepo::create(
        &pool,
        &CreateModule {
            course_id: course.id,
            title: "One".to_string(),
            description: String::new(),
            order: None,
        },
    )
    .await
    .unwrap();
    let created = ContentRepo::create_with_item(
        &pool,
        module.id,
        ContentKind::File,
        owner.id,
        &ItemInput {
            title: "Slides".to_string(),
            body: "files/slides.pdf".to_string(),
        },
    )
    .await
    .unwrap();
    let item_id = created.item.unwrap().id;

    assert!(CourseRepo::delete_owned(&pool, course.id, owner.id).await.unwrap());

    assert!(ItemRepo::find_by_id(&pool, ContentKind::File, item_id)
        .await
        .unwrap()
        .is_none());
    assert!(ModuleRepo::find_by_id(&pool, module.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: Module editor
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_apply_module_plan(pool: PgPool) {
    let owner = instructor(&pool, "ada").await;
    let subject_id = subject(&pool).await;
    let course = CourseRepo::create(&pool, owner.id, &new_course(subject_id, "editor"))
        .await
        .unwrap();

    let plan = plan_modules(
        &[],
        vec![form(None, "Intro", false), form(None, "Basics", false), form(None, "", false)],
    )
    .unwrap();
    let modules = ModuleRepo::apply_plan(&pool, course.id, &plan).await.unwrap();
    let labels: Vec<_> = modules.iter().map(|m| m.label()).collect();
    assert_eq!(labels, vec!["0. Intro", "1. Basics"]);

    let existing = ModuleRepo::list_ids(&pool, course.id).await.unwrap();
    let plan = plan_modules(
        &existing,
        vec![
            form(Some(modules[0].id), "Introduction", false),
            form(Some(modules[1].id), "Basics", true),
            form(None, "Advanced", false),
        ],
    )
    .unwrap();
    let modules = ModuleRepo::apply_plan(&pool, course.id, &plan).await.unwrap();
    let labels: Vec<_> = modules.iter().map(|m| m.label()).collect();
    assert_eq!(labels, vec!["0. Introduction", "2. Advanced"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stale_module_plan_applies_nothing(pool: PgPool) {
    let owner = instructor(&pool, "ada").await;
    let subject_id = subject(&pool).await;
    let course = CourseRepo::create(&pool, owner.id, &new_course(subject_id, "stale"))
        .await
        .unwrap();
    let plan = plan_modules(&[], vec![form(None, "Intro", false), form(None, "Basics", false)])
        .unwrap();
    let modules = ModuleRepo::apply_plan(&pool, course.id, &plan).await.unwrap();

    // Both plans are checked against the same snapshot of module IDs.
    let existing = ModuleRepo::list_ids(&pool, course.id).await.unwrap();
    let removal = plan_modules(&existing, vec![form(Some(modules[1].id), "Basics", true)]).unwrap();
    let stale = plan_modules(
        &existing,
        vec![
            form(Some(modules[0].id), "Introduction", false),
            form(Some(modules[1].id), "Basics (edited)", false),
            form(None, "Advanced", false),
        ],
    )
    .unwrap();

    ModuleRepo::apply_plan(&pool, course.id, &removal).await.unwrap();
    let result = ModuleRepo::apply_plan(&pool, course.id, &stale).await;
    assert_matches!(result, Err(OrderError::Store(sqlx::Error::RowNotFound)));

    let intro = ModuleRepo::find_by_id(&pool, modules[0].id).await.unwrap().unwrap();
    assert_eq!(intro.title, "Intro", "rolled back with the rest of the plan");
    let titles: Vec<_> = ModuleRepo::list_by_course(&pool, course.id)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.title)
        .collect();
    assert_eq!(titles, vec!["Intro"]);
}

// ---------------------------------------------------------------------------
// Test: Items
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_item_update_is_owner_scoped(pool: PgPool) {
    let owner = instructor(&pool, "ada").await;
    let other = instructor(&pool, "grace").await;
    let mut tx = pool.begin().await.unwrap();
    let item = ItemRepo::create_in(
        &mut tx,
        ContentKind::Video,
        owner.id,
        &ItemInput {
            title: "Talk".to_string(),
            body: "https://videos.example.com/talk".to_string(),
        },
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();

    let replacement = ItemInput {
        title: "Talk (remastered)".to_string(),
        body: "https://videos.example.com/talk-hd".to_string(),
    };
    assert!(ItemRepo::update_owned(&pool, ContentKind::Video, item.id, other.id, &replacement)
        .await
        .unwrap()
        .is_none());

    let updated = ItemRepo::update_owned(&pool, ContentKind::Video, item.id, owner.id, &replacement)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.body, "https://videos.example.com/talk-hd");
}
