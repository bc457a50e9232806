//! Integration tests for `DieselTodoRepository` against embedded PostgreSQL.
//!
//! Each context gets its own database, created empty and bootstrapped with
//! the same DDL the server runs at startup.

#[path = "support/pg_embed.rs"]
mod pg_embed;

use std::time::Duration;

use pg_embed::{handle_cluster_setup_failure, reset_database, test_cluster};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use todo_backend::domain::ports::TodoRepository;
use todo_backend::domain::{NewTodo, Patch, Todo, TodoFilter, TodoId, TodoName, TodoPatch};
use todo_backend::outbound::persistence::{
    DbPool, DieselTodoRepository, PoolConfig, ensure_todos_table,
};
use tokio::runtime::Runtime;
use uuid::Uuid;

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    database_url: String,
    repository: DieselTodoRepository,
}

impl TestContext {
    fn insert(&self, name: &str, description: Option<&str>) -> Todo {
        let new_todo = NewTodo {
            name: TodoName::new(name).expect("valid name"),
            description: description.map(str::to_owned),
        };
        self.runtime
            .block_on(self.repository.insert(&new_todo))
            .expect("insert todo")
    }

    fn update(&self, id: TodoId, patch: TodoPatch) -> Option<Todo> {
        self.runtime
            .block_on(self.repository.update(id, &patch))
            .expect("update todo")
    }

    fn list(&self, done: Option<bool>) -> Vec<Todo> {
        self.runtime
            .block_on(self.repository.list(TodoFilter { done }))
            .expect("list todos")
    }

    fn find(&self, id: TodoId) -> Option<Todo> {
        self.runtime
            .block_on(self.repository.find_by_id(id))
            .expect("find todo")
    }
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database = format!("todos_{}", Uuid::new_v4().simple());
    reset_database(&cluster, &database)?;
    let database_url = cluster.connection().database_url(&database);

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let repository = runtime
        .block_on(async {
            let pool = DbPool::new(config).await.map_err(|err| err.to_string())?;
            ensure_todos_table(&pool)
                .await
                .map_err(|err| err.to_string())?;
            Ok::<_, String>(DieselTodoRepository::new(pool))
        })?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        database_url,
        repository,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn done_patch(done: bool) -> TodoPatch {
    TodoPatch {
        done: Some(done),
        ..TodoPatch::default()
    }
}

#[rstest]
fn insert_assigns_id_and_matching_timestamps(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: insert_assigns_id_and_matching_timestamps skipped");
        return;
    };

    context
        .runtime
        .block_on(context.repository.ping())
        .expect("store reachable");

    let first = context.insert("Buy milk", Some("oat"));
    let second = context.insert(&"x".repeat(50), None);

    assert!(first.id.get() > 0);
    assert!(second.id > first.id);
    assert!(!first.done);
    assert_eq!(first.description.as_deref(), Some("oat"));
    assert_eq!(first.created_at, first.updated_at);
    assert_eq!(context.find(first.id), Some(first));
}

#[rstest]
fn list_orders_by_id_and_filters_on_done(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: list_orders_by_id_and_filters_on_done skipped");
        return;
    };

    let ids: Vec<TodoId> = ["a", "b", "c", "d"]
        .into_iter()
        .map(|name| context.insert(name, None).id)
        .collect();
    context.update(ids[2], done_patch(true));
    context.update(ids[0], done_patch(true));

    let all: Vec<TodoId> = context.list(None).into_iter().map(|todo| todo.id).collect();
    let done: Vec<TodoId> = context.list(Some(true)).into_iter().map(|todo| todo.id).collect();
    let open: Vec<TodoId> = context.list(Some(false)).into_iter().map(|todo| todo.id).collect();

    assert_eq!(all, ids);
    assert_eq!(done, vec![ids[0], ids[2]]);
    assert_eq!(open, vec![ids[1], ids[3]]);
}

#[rstest]
fn update_refreshes_updated_at_only_on_change(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_refreshes_updated_at_only_on_change skipped");
        return;
    };

    let created = context.insert("Buy milk", Some("oat"));
    std::thread::sleep(Duration::from_millis(10));

    let unchanged = context
        .update(
            created.id,
            TodoPatch {
                name: Some(TodoName::new("Buy milk").expect("valid name")),
                description: Patch::Value("oat".to_owned()),
                done: Some(false),
            },
        )
        .expect("todo exists");
    assert_eq!(unchanged, created);

    let updated = context
        .update(created.id, done_patch(true))
        .expect("todo exists");
    assert!(updated.done);
    assert_eq!(updated.name, "Buy milk");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(context.find(created.id), Some(updated));
}

#[rstest]
#[case::explicit_null(Patch::Null, None)]
#[case::absent(Patch::Absent, Some("oat"))]
#[case::replaced(Patch::Value("soy".to_owned()), Some("soy"))]
fn update_applies_description_patch(
    repo_context: Option<TestContext>,
    #[case] description: Patch<String>,
    #[case] expected: Option<&str>,
) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_applies_description_patch skipped");
        return;
    };

    let created = context.insert("Buy milk", Some("oat"));
    let updated = context
        .update(
            created.id,
            TodoPatch {
                name: Some(TodoName::new("Buy bread").expect("valid name")),
                description,
                done: None,
            },
        )
        .expect("todo exists");

    assert_eq!(updated.name, "Buy bread");
    assert_eq!(updated.description.as_deref(), expected);
    assert_eq!(
        context.find(created.id).and_then(|todo| todo.description),
        expected.map(str::to_owned)
    );
}

#[rstest]
fn missing_ids_report_absence(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: missing_ids_report_absence skipped");
        return;
    };

    let missing = TodoId::new(999);

    assert_eq!(context.find(missing), None);
    assert_eq!(context.update(missing, done_patch(true)), None);
    let deleted = context
        .runtime
        .block_on(context.repository.delete(missing))
        .expect("delete todo");
    assert!(!deleted);
}

#[rstest]
fn delete_removes_only_the_target(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: delete_removes_only_the_target skipped");
        return;
    };

    let keep = context.insert("keep", None);
    let drop = context.insert("drop", None);

    let deleted = context
        .runtime
        .block_on(context.repository.delete(drop.id))
        .expect("delete todo");

    assert!(deleted);
    assert_eq!(context.find(drop.id), None);
    assert_eq!(context.list(None), vec![keep]);
}

#[rstest]
fn bootstrap_keeps_existing_rows(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: bootstrap_keeps_existing_rows skipped");
        return;
    };

    let created = context.insert("Buy milk", None);
    let config = PoolConfig::new(&context.database_url);
    context
        .runtime
        .block_on(async {
            let pool = DbPool::new(config).await.expect("second pool");
            ensure_todos_table(&pool).await
        })
        .expect("bootstrap is idempotent");

    assert_eq!(context.find(created.id), Some(created));
}
