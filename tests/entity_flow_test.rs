//! Integration tests for derived entities, key resolution and route binding
//!
//! Statements go to a scripted executor, so no database is needed.

use recordhaus::prelude::*;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(EntityMetadata)]
#[entity(primary_keys(id), unique_keys(email), graded(name, email), hidden(email))]
pub struct Member;

impl EntitySchema for Member {
    fn rules() -> Vec<ValidationRule> {
        vec![
            ValidationRule::required("name").with_message("a member needs a name"),
            ValidationRule::email("email"),
            ValidationRule::one_of("role", vec!["admin".into(), "user".into()]),
        ]
    }
}

#[derive(EntityMetadata)]
#[entity(unique_keys(slug))]
pub struct Page;

impl EntitySchema for Page {
    fn rules() -> Vec<ValidationRule> {
        vec![ValidationRule::required("slug")]
    }
}

struct MemberController;

impl Controller for MemberController {
    type Model = Member;
}

struct PageController;

impl Controller for PageController {
    type Model = Page;
}

#[derive(Default)]
struct ScriptedExecutor {
    replies: Mutex<VecDeque<Result<ExecutionResult, StoreError>>>,
    seen: Mutex<Vec<Statement>>,
}

impl ScriptedExecutor {
    fn then(&self, rows: Vec<ResultRow>) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(ExecutionResult::from_rows(rows)));
        self
    }

    fn then_fail(&self) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(StoreError::query_execution(
                "members",
                "SELECT * FROM members WHERE id = $1",
                recordhaus::sqlx::Error::PoolClosed,
            )));
        self
    }

    fn sql(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.sql().to_string())
            .collect()
    }
}

#[async_trait]
impl StatementExecutor for ScriptedExecutor {
    async fn execute(&self, statement: &Statement) -> Result<ExecutionResult, StoreError> {
        self.seen.lock().unwrap().push(statement.clone());
        let reply = self.replies.lock().unwrap().pop_front();
        reply.unwrap_or_else(|| Ok(ExecutionResult::empty()))
    }
}

fn setup() -> (Arc<ScriptedExecutor>, DataStore) {
    let executor = Arc::new(ScriptedExecutor::default());
    let store = DataStore::new(executor.clone());
    (executor, store)
}

fn member_row() -> ResultRow {
    vec![
        ("id", FieldValue::Int(42)),
        ("email", FieldValue::from("a@x.com")),
        ("name", FieldValue::from("A")),
    ]
    .into_iter()
    .collect()
}

fn path(pairs: &[(&str, &str)]) -> PathData {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_derived_metadata() {
    assert_eq!(Member::table_name(), "members");
    assert_eq!(Member::primary_keys(), &["id"]);
    assert_eq!(Member::unique_keys(), &["email"]);
    assert_eq!(Member::graded(), &["name", "email"]);
    assert_eq!(Member::hidden(), &["email"]);
    assert_eq!(Member::primary_key(), Some("id"));

    assert_eq!(Page::table_name(), "pages");
    assert!(Page::primary_keys().is_empty());
    assert_eq!(Page::primary_key(), None);
}

#[tokio::test]
async fn test_lookup_falls_through_to_unique_key() {
    let (executor, store) = setup();
    executor.then(vec![]).then(vec![member_row()]);

    let mut member = Entity::<Member>::new();
    member.find_and_load(&store, "42").await.unwrap();

    assert_eq!(
        executor.sql(),
        vec![
            "SELECT * FROM members WHERE id = $1",
            "SELECT * FROM members WHERE email = $1"
        ]
    );
    assert_eq!(member.get("id"), Some(&FieldValue::Int(42)));
    assert_eq!(member.get("email"), Some(&FieldValue::from("a@x.com")));
    assert_eq!(member.get("name"), Some(&FieldValue::from("A")));
}

#[tokio::test]
async fn test_rendering_hides_hidden_fields() {
    let (executor, store) = setup();
    executor.then(vec![member_row()]);

    let mut member = Entity::<Member>::new();
    member.find_and_load(&store, 42).await.unwrap();

    assert_eq!(member.viewable_fields(), vec!["name"]);
    let rendered = serde_json::to_value(member.to_map()).unwrap();
    assert_eq!(rendered, json!({ "name": "A" }));
}

#[tokio::test]
async fn test_validation_messages_reach_the_caller() {
    let (executor, store) = setup();
    let mut member = Entity::<Member>::new();
    member.set("email", "a@x.com");
    member.set("role", "root");

    let error = member.insert(&store).await.unwrap_err();
    let errors = error.validation_errors().unwrap();

    assert_eq!(
        errors.get("name"),
        Some(&["a member needs a name".to_string()][..])
    );
    assert_eq!(
        errors.get("role"),
        Some(&["role must be one of: admin, user".to_string()][..])
    );
    assert!(executor.sql().iter().all(|sql| sql.starts_with("SELECT")));
}

#[tokio::test]
async fn test_insert_then_update_then_delete() {
    let (executor, store) = setup();
    executor.then(vec![]).then(vec![member_row()]);

    let mut member = Entity::<Member>::new();
    member.set("name", "A");
    member.set("email", "a@x.com");
    member.insert(&store).await.unwrap();
    assert_eq!(member.get("id"), Some(&FieldValue::Int(42)));

    member.set("name", "B");
    member.update(&store).await.unwrap();
    member.delete(&store).await.unwrap();

    // the unset serial id is left out of the key check
    let sql = executor.sql();
    assert_eq!(
        sql[0],
        "SELECT email FROM members WHERE email = $1 LIMIT $2 OFFSET $3"
    );
    assert_eq!(
        sql[1],
        "INSERT INTO members (name, email) VALUES ($1, $2) RETURNING *"
    );
    assert_eq!(
        sql[2],
        "UPDATE members SET name = $1, email = $2 WHERE id = $3 RETURNING *"
    );
    assert_eq!(sql[3], "DELETE FROM members WHERE id = $1 RETURNING *");
}

#[tokio::test]
async fn test_page_without_primary_key_cannot_insert() {
    let (executor, store) = setup();
    let mut page = Entity::<Page>::new();
    page.set("slug", "home");

    let result = page.insert(&store).await;

    assert!(matches!(result, Err(EntityError::MissingKeys { .. })));
    assert!(executor.sql().is_empty());
}

// ========================================
// Route binding
// ========================================

#[tokio::test]
async fn test_bind_model_loads_addressed_record() {
    let (executor, store) = setup();
    executor.then(vec![member_row()]);

    let member = bind_model::<MemberController>(&path(&[("id", "42")]), &store)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(member.get("name"), Some(&FieldValue::from("A")));
    assert_eq!(member.get("id"), Some(&FieldValue::Int(42)));
    assert_eq!(
        executor.seen.lock().unwrap()[0].params(),
        &[FieldValue::Int(42)]
    );
}

#[tokio::test]
async fn test_bind_model_keeps_key_when_nothing_matches() {
    let (_executor, store) = setup();

    let member = bind_model::<MemberController>(&path(&[("id", "7")]), &store)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(member.attributes().len(), 1);
    assert_eq!(member.get("id"), Some(&FieldValue::Int(7)));
}

#[tokio::test]
async fn test_bind_model_without_key_in_path() {
    let (executor, store) = setup();

    let bound = bind_model::<MemberController>(&path(&[("slug", "home")]), &store)
        .await
        .unwrap();

    assert!(bound.is_none());
    assert!(executor.sql().is_empty());
}

#[tokio::test]
async fn test_bind_model_without_primary_key() {
    let (executor, store) = setup();

    let bound = bind_model::<PageController>(&path(&[("slug", "home")]), &store)
        .await
        .unwrap();

    assert!(bound.is_none());
    assert!(executor.sql().is_empty());
}

#[tokio::test]
async fn test_bind_model_propagates_store_failure() {
    let (executor, store) = setup();
    executor.then_fail();

    let result = bind_model::<MemberController>(&path(&[("id", "42")]), &store).await;

    assert!(matches!(result, Err(EntityError::Store(_))));
}
