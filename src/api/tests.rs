use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use super::*;
use crate::model::{Character, NewCharacter};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;
use crate::store::{MemoryStore, StoreError, StoreState};

fn app() -> Router<App> {
    router(App::new(MemoryStore::new()), Cors::permissive())
}

async fn call(router: &Router<App>, method: Method, target: &str, body: &str) -> (Status, Value) {
    let res: Response = router
        .handle(Request::from_target(method, target, body.to_owned()))
        .await;
    assert_eq!(res.header("access-control-allow-origin"), Some("*"));
    assert_eq!(res.header("content-type"), Some("application/json"));
    let body = if res.body().is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(res.body()).unwrap()
    };
    (res.status_code(), body)
}

fn submission(name: &str, status: &str) -> String {
    json!({ "name": name, "species": "Human", "status": status, "image": "http://x/1.png" }).to_string()
}

#[tokio::test]
async fn rick_scenario() {
    let router = app();

    let (status, body) = call(&router, Method::Post, "/api/character", &submission("Rick", "Alive")).await;
    assert_eq!(status, Status::Created);
    assert_eq!(body["id"], 1);

    let (status, body) = call(&router, Method::Post, "/api/character", &submission("Morty", "Alive")).await;
    assert_eq!(status, Status::Created);
    assert_eq!(body["id"], 2);

    let (status, body) = call(&router, Method::Get, "/api/character?status=Alive", "").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);

    let (status, _) = call(&router, Method::Delete, "/api/character/1", "").await;
    assert_eq!(status, Status::Ok);

    let (status, body) = call(&router, Method::Get, "/api/character?page=1", "").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["info"]["pages"], 1);
    assert_eq!(body["results"][0]["id"], 2);
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let router = app();
    let (_, created) = call(&router, Method::Post, "/api/character", &submission("Beth", "Alive")).await;
    let (status, fetched) = call(&router, Method::Get, "/api/character/1", "").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(fetched, created);
    assert_eq!(
        fetched,
        json!({ "id": 1, "name": "Beth", "status": "Alive", "species": "Human", "image": "http://x/1.png" })
    );
}

#[tokio::test]
async fn validation_failures_are_400_and_store_nothing() {
    let router = app();

    let (status, body) = call(&router, Method::Post, "/api/character", r#"{"name":"Rick"}"#).await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body, json!({ "message": "Missing field: species" }));

    let (status, body) = call(
        &router,
        Method::Post,
        "/api/character",
        r#"{"name":"Rick","species":1,"status":"Alive","image":"x"}"#,
    )
    .await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body, json!({ "message": "Invalid type for field: species" }));

    let (status, body) = call(&router, Method::Post, "/api/character", "{oops").await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body, json!({ "message": "Invalid data" }));

    let (_, body) = call(&router, Method::Get, "/api/character", "").await;
    assert_eq!(body, json!({ "info": { "pages": 1 }, "results": [] }));
}

#[tokio::test]
async fn unknown_ids_and_routes_are_404() {
    let router = app();
    call(&router, Method::Post, "/api/character", &submission("Rick", "Alive")).await;

    let (status, body) = call(&router, Method::Get, "/api/character/9", "").await;
    assert_eq!(status, Status::NotFound);
    assert_eq!(body, json!({ "message": "Character not found" }));

    let (status, _) = call(&router, Method::Delete, "/api/character/9", "").await;
    assert_eq!(status, Status::NotFound);
    let (_, body) = call(&router, Method::Get, "/api/character", "").await;
    assert_eq!(body["results"].as_array().unwrap().len(), 1);

    for (method, target) in [
        (Method::Get, "/api/character/abc"),
        (Method::Delete, "/api/character/-1"),
        (Method::Delete, "/api/character/init"),
        (Method::Get, "/api/character/"),
        (Method::Put, "/api/character/1"),
        (Method::Get, "/elsewhere"),
    ] {
        let (status, body) = call(&router, method, target, "").await;
        assert_eq!(status, Status::NotFound, "{method} {target}");
        assert_eq!(body, json!({ "message": "Route not found" }));
    }
}

#[tokio::test]
async fn preflight_answers_any_path() {
    let router = app();
    let (status, body) = call(&router, Method::Options, "/whatever/path", "").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn init_replaces_collection_with_sequential_ids() {
    let router = app();
    for _ in 0..3 {
        call(&router, Method::Post, "/api/character", &submission("Old", "Dead")).await;
    }

    let batch = format!("[{},{}]", submission("Rick", "Alive"), submission("Morty", "alive"));
    let (status, body) = call(&router, Method::Post, "/api/character/init", &batch).await;
    assert_eq!(status, Status::Created);
    assert_eq!(body["message"], "Data initialized successfully");
    let ids: Vec<_> = body["characters"].as_array().unwrap().iter().map(|c| c["id"].clone()).collect();
    assert_eq!(ids, vec![json!(1), json!(2)]);

    let (_, body) = call(&router, Method::Get, "/api/character?status=ALIVE", "").await;
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    let (_, body) = call(&router, Method::Get, "/api/character?status=dead", "").await;
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn init_rejects_oversized_or_invalid_batches() {
    let router = app();
    call(&router, Method::Post, "/api/character", &submission("Keep", "Alive")).await;

    let entries: Vec<String> = (0..=INIT_LIMIT).map(|i| submission(&format!("c{i}"), "Alive")).collect();
    let (status, body) = call(&router, Method::Post, "/api/character/init", &format!("[{}]", entries.join(","))).await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body, json!({ "message": "Invalid init data. Expected an array of up to 20 elements." }));

    let (status, _) = call(&router, Method::Post, "/api/character/init", &submission("Solo", "Alive")).await;
    assert_eq!(status, Status::BadRequest);

    let batch = format!(r#"[{}, {{"name":"Nameless"}}]"#, submission("Rick", "Alive"));
    let (status, body) = call(&router, Method::Post, "/api/character/init", &batch).await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body, json!({ "message": "Record 1: Missing field: species" }));

    let (_, body) = call(&router, Method::Get, "/api/character", "").await;
    assert_eq!(body["results"][0]["name"], "Keep");
}

#[tokio::test]
async fn init_accepts_empty_and_full_batches() {
    let router = app();
    let (status, body) = call(&router, Method::Post, "/api/character/init", "[]").await;
    assert_eq!(status, Status::Created);
    assert_eq!(body["characters"], json!([]));

    let entries: Vec<String> = (0..INIT_LIMIT).map(|i| submission(&format!("c{i}"), "Alive")).collect();
    let (status, body) = call(&router, Method::Post, "/api/character/init", &format!("[{}]", entries.join(","))).await;
    assert_eq!(status, Status::Created);
    assert_eq!(body["characters"][19]["id"], 20);

    let (_, body) = call(&router, Method::Get, "/api/character?page=4", "").await;
    assert_eq!(body["info"]["pages"], 4);
    assert_eq!(body["results"].as_array().unwrap().len(), 5);
    let (_, body) = call(&router, Method::Get, "/api/character?page=5", "").await;
    assert_eq!(body["info"]["pages"], 4);
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn name_filter_matches_substrings() {
    let router = app();
    for name in ["Rick Sanchez", "Morty Smith", "Evil Rick", "Summer Smith"] {
        call(&router, Method::Post, "/api/character", &submission(name, "Alive")).await;
    }
    let (_, body) = call(&router, Method::Get, "/api/character?name=rick", "").await;
    let names: Vec<_> = body["results"].as_array().unwrap().iter().map(|c| c["name"].clone()).collect();
    assert_eq!(names, vec![json!("Rick Sanchez"), json!("Evil Rick")]);

    let (_, body) = call(&router, Method::Get, "/api/character?name=smith&page=2", "").await;
    assert_eq!(body, json!({ "info": { "pages": 1 }, "results": [] }));
}

/// A store whose backing file never parses.
struct BrokenStore;

#[async_trait]
impl CharacterStore for BrokenStore {
    fn state(&self) -> StoreState {
        StoreState::Uninitialized
    }

    async fn ready(&self) -> Result<(), StoreError> {
        Err(StoreError::Malformed {
            path: "db.json".into(),
            source: serde_json::from_str::<Value>("{").unwrap_err(),
        })
    }

    async fn list(&self) -> Result<Vec<Character>, StoreError> {
        self.ready().await.map(|_| Vec::new())
    }

    async fn get(&self, _id: u64) -> Result<Option<Character>, StoreError> {
        self.ready().await.map(|_| None)
    }

    async fn create(&self, new: NewCharacter) -> Result<Character, StoreError> {
        self.ready().await.map(|_| new.with_id(1))
    }

    async fn delete(&self, _id: u64) -> Result<bool, StoreError> {
        self.ready().await.map(|_| false)
    }

    async fn replace_all(&self, _records: Vec<NewCharacter>) -> Result<Vec<Character>, StoreError> {
        self.ready().await.map(|_| Vec::new())
    }
}

#[tokio::test]
async fn storage_failures_are_500() {
    let router = super::router(App::new(BrokenStore), Cors::permissive());

    let (status, body) = call(&router, Method::Get, "/api/character", "").await;
    assert_eq!(status, Status::InternalServerError);
    assert_eq!(body, json!({ "message": "Server error" }));

    let (status, _) = call(&router, Method::Post, "/api/character", &submission("Rick", "Alive")).await;
    assert_eq!(status, Status::InternalServerError);

    // Validation still runs first.
    let (status, _) = call(&router, Method::Post, "/api/character", "{}").await;
    assert_eq!(status, Status::BadRequest);
}

#[tokio::test]
async fn health_probes_follow_store_lifecycle() {
    let router = app();
    let (status, body) = call(&router, Method::Get, "/healthz", "").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body, json!({ "status": "ok" }));

    assert_eq!(router.state().store().state(), StoreState::Uninitialized);
    let (status, body) = call(&router, Method::Get, "/readyz", "").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body, json!({ "status": "ready" }));
    assert_eq!(router.state().store().state(), StoreState::Ready);

    let broken = super::router(App::new(BrokenStore), Cors::permissive());
    let (status, _) = call(&broken, Method::Get, "/readyz", "").await;
    assert_eq!(status, Status::ServiceUnavailable);
}

#[test]
fn unreadable_body_is_a_json_bad_request() {
    let res = app().unreadable();
    assert_eq!(res.status_code(), Status::BadRequest);
    assert_eq!(res.header("access-control-allow-origin"), Some("*"));
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body, json!({ "message": "Invalid data" }));
}

#[tokio::test]
async fn create_fails_cleanly_when_ids_run_out() {
    let last = NewCharacter {
        name: "Last".into(),
        species: "Human".into(),
        status: "Alive".into(),
        image: "http://x/1.png".into(),
    }
    .with_id(u64::MAX);
    let router = super::router(App::new(MemoryStore::with_records(vec![last])), Cors::permissive());

    let (status, body) = call(&router, Method::Post, "/api/character", &submission("Rick", "Alive")).await;
    assert_eq!(status, Status::InternalServerError);
    assert_eq!(body, json!({ "message": "Server error" }));

    let (_, body) = call(&router, Method::Get, "/api/character", "").await;
    assert_eq!(body["results"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn enormous_page_number_is_past_the_end() {
    let router = app();
    call(&router, Method::Post, "/api/character", &submission("Rick", "Alive")).await;

    let (status, body) = call(&router, Method::Get, "/api/character?page=99999999999999999999999", "").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body, json!({ "info": { "pages": 1 }, "results": [] }));
}
