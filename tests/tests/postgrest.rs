use pretty_assertions::{assert_eq, assert_ne};
use recipe_share::{Config, Db, Profile, Recipe, RecipeId, RecipeInput, UserId};
use serde_json::{json, Value};
use tests::{assert_err, assert_ok, profile, recipe, PostgRestStub, StubRequest};

const JOINED_SELECT: &str = "*,profile:profiles!recipes_user_id_fkey(*)";
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

async fn connect(stub: &PostgRestStub) -> Db {
    assert_ok!(
        Db::builder()
            .config(
                Config::new(stub.url())
                    .api_key("anon-key")
                    .access_token("user-jwt")
            )
            .connect()
            .await
    )
}

fn missing_relationship() -> Value {
    json!({
        "code": "PGRST200",
        "details": "Searched for a foreign key relationship between 'recipes' and 'profiles' in the schema 'public', but no matches were found.",
        "hint": null,
        "message": "Could not find a relationship between 'recipes' and 'profiles' in the schema cache"
    })
}

fn no_rows() -> Value {
    json!({
        "code": "PGRST116",
        "details": "The result contains 0 rows",
        "hint": null,
        "message": "JSON object requested, multiple (or no) rows returned"
    })
}

fn embedded(recipe: &Recipe, profile: Value) -> Value {
    let mut row = json!(recipe);
    row["profile"] = profile;
    row
}

/// Newest first: u1, u2, u1. Only u1 (`alice`) has a profile.
fn three_recipes() -> (UserId, UserId, Vec<Recipe>, Profile) {
    let u1 = UserId::generate();
    let u2 = UserId::generate();
    let rows = vec![
        recipe(Some(u1), "된장찌개", 2),
        recipe(Some(u2), "잡채", 1),
        recipe(Some(u1), "호떡", 0),
    ];
    (u1, u2, rows, profile(u1, "alice"))
}

fn authors(recipes: &[recipe_share::RecipeWithProfile]) -> Vec<Option<String>> {
    recipes
        .iter()
        .map(|r| r.profile.as_ref().and_then(|p| p.username.clone()))
        .collect()
}

fn assert_authenticated(requests: &[StubRequest]) {
    for request in requests {
        assert_eq!(request.header("apikey"), Some("anon-key"));
        assert_eq!(request.header("authorization"), Some("Bearer user-jwt"));
    }
}

#[tokio::test]
async fn missing_relationship_falls_back_to_one_profile_batch() {
    let (u1, u2, rows, alice) = three_recipes();

    let stub = PostgRestStub::start({
        let recipes = json!(rows);
        let profiles = json!([alice]);
        move |request: &StubRequest| {
            if request.is_joined_read("recipes") {
                (400, missing_relationship())
            } else if request.path.ends_with("/recipes") {
                (200, recipes.clone())
            } else {
                (200, profiles.clone())
            }
        }
    })
    .await;
    let db = connect(&stub).await;

    let recipes = assert_ok!(db.dashboard(None).await);

    assert_eq!(
        recipes.iter().map(|r| r.recipe.clone()).collect::<Vec<_>>(),
        rows
    );
    assert_eq!(
        authors(&recipes),
        [Some("alice".to_string()), None, Some("alice".to_string())]
    );

    let requests = stub.requests();
    assert_eq!(requests.len(), 3);
    assert_authenticated(&requests);
    assert!(requests.iter().all(|r| r.method == "GET"));

    assert_eq!(requests[0].path, "/rest/v1/recipes");
    assert_eq!(requests[0].param("select"), Some(JOINED_SELECT));

    assert_eq!(requests[1].path, "/rest/v1/recipes");
    assert_eq!(requests[1].param("select"), Some("*"));
    assert_eq!(requests[1].param("order"), Some("created_at.desc"));
    assert_eq!(requests[1].param("limit"), Some("12"));

    assert_eq!(requests[2].path, "/rest/v1/profiles");
    assert_eq!(
        requests[2].param("id").map(str::to_string),
        Some(format!("in.({u1},{u2})"))
    );
}

#[tokio::test]
async fn joined_read_accepts_object_and_list_embeds() {
    let (_, _, rows, alice) = three_recipes();

    let stub = PostgRestStub::start({
        let body = json!([
            embedded(&rows[0], json!(alice)),
            embedded(&rows[1], Value::Null),
            embedded(&rows[2], json!([alice])),
        ]);
        move |_: &StubRequest| (200, body.clone())
    })
    .await;
    let db = connect(&stub).await;

    let recipes = assert_ok!(db.dashboard(Some(3)).await);

    assert_eq!(
        authors(&recipes),
        [Some("alice".to_string()), None, Some("alice".to_string())]
    );

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].param("select"), Some(JOINED_SELECT));
    assert_eq!(requests[0].param("limit"), Some("3"));
    assert_ne!(requests[0].header("accept"), Some(SINGLE_OBJECT));
}

#[tokio::test]
async fn detail_asks_for_a_single_object() {
    let (_, _, rows, alice) = three_recipes();
    let found = rows[0].id;

    let stub = PostgRestStub::start({
        let body = embedded(&rows[0], json!(alice));
        let wanted = format!("eq.{found}");
        move |request: &StubRequest| {
            if request.param("id") == Some(wanted.as_str()) {
                (200, body.clone())
            } else {
                (406, no_rows())
            }
        }
    })
    .await;
    let db = connect(&stub).await;

    let detail = assert_ok!(db.recipe_detail(found).await);
    assert_eq!(detail.recipe, rows[0]);
    assert_eq!(detail.author_name(), "alice");

    let err = assert_err!(db.recipe_detail(RecipeId::generate()).await);
    assert!(err.is_record_not_found(), "{err}");

    // Not found is final; no fallback reads
    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    assert_authenticated(&requests);
    for request in &requests {
        assert_eq!(request.header("accept"), Some(SINGLE_OBJECT));
        assert_eq!(request.param("select"), Some(JOINED_SELECT));
    }
}

#[tokio::test]
async fn detail_falls_back_to_single_reads() {
    let (u1, _, rows, alice) = three_recipes();
    let id = rows[2].id;

    let stub = PostgRestStub::start({
        let recipe = json!(rows[2]);
        let alice = json!(alice);
        move |request: &StubRequest| {
            if request.is_joined_read("recipes") {
                (400, missing_relationship())
            } else if request.path.ends_with("/recipes") {
                (200, recipe.clone())
            } else {
                (200, alice.clone())
            }
        }
    })
    .await;
    let db = connect(&stub).await;

    let detail = assert_ok!(db.recipe_detail(id).await);
    assert_eq!(detail.recipe, rows[2]);
    assert_eq!(detail.author_name(), "alice");

    let requests = stub.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].param("select"), Some("*"));
    assert_eq!(
        requests[2].param("id").map(str::to_string),
        Some(format!("eq.{u1}"))
    );
    assert!(requests
        .iter()
        .all(|r| r.header("accept") == Some(SINGLE_OBJECT)));
}

#[tokio::test]
async fn other_store_errors_do_not_fall_back() {
    let stub = PostgRestStub::start(|_: &StubRequest| {
        (
            401,
            json!({
                "code": "42501",
                "details": null,
                "hint": null,
                "message": "permission denied for table recipes"
            }),
        )
    })
    .await;
    let db = connect(&stub).await;

    let err = assert_err!(db.dashboard(None).await);

    assert!(err.is_store());
    assert!(!err.is_join_unavailable());
    assert_eq!(err.code(), Some("42501"));
    assert_eq!(stub.requests().len(), 1);
}

#[tokio::test]
async fn create_asks_for_the_inserted_row() {
    let owner = UserId::generate();

    let stub = PostgRestStub::start(|request: &StubRequest| {
        let mut row = request.json();
        row["id"] = json!(RecipeId::generate());
        row["created_at"] = json!("2024-03-01T09:00:00+00:00");
        (201, json!([row]))
    })
    .await;
    let db = connect(&stub).await;

    let created = assert_ok!(
        db.create_recipe(
            &owner,
            RecipeInput {
                title: "김치찌개".to_string(),
                ingredients: "김치".to_string(),
                instructions: "끓입니다".to_string(),
                cooking_time: Some(30),
                difficulty: Some("보통".to_string()),
                category: Some("한식".to_string()),
            }
        )
        .await
    );

    assert_eq!(created.title, "김치찌개");
    assert_eq!(created.user_id, Some(owner));
    assert_eq!(created.cooking_time, Some(30));

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_authenticated(&requests);

    let insert = &requests[0];
    assert_eq!(insert.method, "POST");
    assert_eq!(insert.path, "/rest/v1/recipes");
    assert_eq!(insert.header("prefer"), Some("return=representation"));
    assert_eq!(insert.json()["user_id"], json!(owner));
    assert_eq!(insert.json()["difficulty"], json!("보통"));
}

#[tokio::test]
async fn delete_is_filtered_by_owner() {
    let stub = PostgRestStub::start(|_: &StubRequest| (200, json!([]))).await;
    let db = connect(&stub).await;
    let owner = UserId::generate();
    let id = RecipeId::generate();

    let err = assert_err!(db.delete_recipe(&owner, id).await);
    assert!(err.is_record_not_found());

    let requests = stub.requests();
    assert_eq!(requests[0].method, "DELETE");
    assert_eq!(
        requests[0].param("id").map(str::to_string),
        Some(format!("eq.{id}"))
    );
    assert_eq!(
        requests[0].param("user_id").map(str::to_string),
        Some(format!("eq.{owner}"))
    );
    assert_eq!(requests[0].header("prefer"), Some("return=representation"));
}

#[tokio::test]
async fn schema_belongs_to_the_hosted_project() {
    let stub = PostgRestStub::start(|_: &StubRequest| (404, json!({}))).await;
    let db = connect(&stub).await;

    assert_ok!(db.push_schema().await);
    let err = assert_err!(db.reset_db().await);
    assert!(err.is_invalid_configuration());

    assert!(stub.requests().is_empty());
}
