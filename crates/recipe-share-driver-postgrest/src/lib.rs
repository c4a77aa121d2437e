//! Store driver speaking the PostgREST HTTP dialect, as served by hosted
//! Postgres backends under `<project>/rest/v1/`.

mod error;
pub use error::{JOIN_UNAVAILABLE, NOT_SINGULAR};

mod query;

use chrono::Utc;
use recipe_share_core::{
    async_trait,
    driver::{
        operation::{
            DeleteRecipe, InsertProfile, InsertRecipe, QueryProfiles, QueryRecipes,
            UpdateProfile, UpdateRecipe,
        },
        Operation, Response,
    },
    model::{Profile, RecipeRow},
    Driver, Error, Result,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client, Method, RequestBuilder,
};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use url::Url;

/// Media type asking PostgREST for a single object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

#[derive(Debug, Clone)]
pub struct PostgRest {
    client: Client,

    /// `<origin>/rest/v1/`
    root: Url,
}

#[derive(Debug)]
pub struct Builder {
    url: Url,
    api_key: String,
    access_token: Option<String>,
    timeout: Option<Duration>,
}

impl PostgRest {
    /// Starts configuring a driver for the project at `url`, authenticated
    /// with the project's API key.
    pub fn builder(url: Url, api_key: impl Into<String>) -> Builder {
        Builder {
            url,
            api_key: api_key.into(),
            access_token: None,
            timeout: None,
        }
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, %url, "postgrest request");
        self.client.request(method, url)
    }

    async fn query_recipes(&self, op: QueryRecipes) -> Result<Response> {
        let url = query::recipes(&self.root, &op.query, op.include_profile)?;
        let request = self.request(Method::GET, url);

        let rows: Vec<RecipeRow> = if op.single {
            vec![send(request.header(ACCEPT, SINGLE_OBJECT)).await?]
        } else {
            send(request).await?
        };

        Ok(Response::recipes(rows))
    }

    async fn query_profiles(&self, op: QueryProfiles) -> Result<Response> {
        let url = query::profiles(&self.root, &op.filter)?;
        let request = self.request(Method::GET, url);

        let rows: Vec<Profile> = if op.single {
            vec![send(request.header(ACCEPT, SINGLE_OBJECT)).await?]
        } else {
            send(request).await?
        };

        Ok(Response::profiles(rows))
    }

    async fn insert_recipe(&self, op: InsertRecipe) -> Result<Response> {
        let url = query::insert(&self.root, query::RECIPES)?;
        let rows: Vec<RecipeRow> = send(returning(self.request(Method::POST, url), &op.recipe)).await?;
        Ok(Response::recipes(rows))
    }

    async fn update_recipe(&self, op: UpdateRecipe) -> Result<Response> {
        let url = query::owned_recipe(&self.root, op.id, op.owner)?;
        let rows: Vec<RecipeRow> =
            send(returning(self.request(Method::PATCH, url), &op.changes)).await?;
        Ok(Response::recipes(rows))
    }

    async fn delete_recipe(&self, op: DeleteRecipe) -> Result<Response> {
        let url = query::owned_recipe(&self.root, op.id, op.owner)?;
        let request = self
            .request(Method::DELETE, url)
            .header("Prefer", "return=representation");

        let deleted: Vec<serde_json::Value> = send(request).await?;
        Ok(Response::count(deleted.len() as u64))
    }

    async fn insert_profile(&self, op: InsertProfile) -> Result<Response> {
        let url = query::insert(&self.root, query::PROFILES)?;
        let rows: Vec<Profile> = send(returning(self.request(Method::POST, url), &op.profile)).await?;
        Ok(Response::profiles(rows))
    }

    async fn update_profile(&self, op: UpdateProfile) -> Result<Response> {
        let url = query::profile(&self.root, op.id)?;
        let body = serde_json::json!({
            "username": op.changes.username,
            "full_name": op.changes.full_name,
            "updated_at": Utc::now(),
        });

        let rows: Vec<Profile> = send(returning(self.request(Method::PATCH, url), &body)).await?;
        Ok(Response::profiles(rows))
    }
}

impl Builder {
    /// Per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Acts as this signed-in user instead of the anonymous role.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn build(self) -> Result<PostgRest> {
        let root = query::rest_root(&self.url)?;

        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(&self.api_key)?);
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {bearer}"))?);

        let mut client = Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }

        let client = client.build().map_err(Error::driver_operation_failed)?;

        Ok(PostgRest { client, root })
    }
}

#[async_trait]
impl Driver for PostgRest {
    fn name(&self) -> &'static str {
        "postgrest"
    }

    async fn exec(&self, op: Operation) -> Result<Response> {
        match op {
            Operation::QueryRecipes(op) => self.query_recipes(op).await,
            Operation::QueryProfiles(op) => self.query_profiles(op).await,
            Operation::InsertRecipe(op) => self.insert_recipe(op).await,
            Operation::UpdateRecipe(op) => self.update_recipe(op).await,
            Operation::DeleteRecipe(op) => self.delete_recipe(op).await,
            Operation::InsertProfile(op) => self.insert_profile(op).await,
            Operation::UpdateProfile(op) => self.update_profile(op).await,
        }
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::invalid_configuration("credentials contain characters not allowed in HTTP headers"))
}

/// Write requests ask for the affected rows back.
fn returning(request: RequestBuilder, body: &impl Serialize) -> RequestBuilder {
    request
        .header("Prefer", "return=representation")
        .json(body)
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(Error::driver_operation_failed)?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(Error::driver_operation_failed)?;

    if !status.is_success() {
        let err = error::from_response(status, &body);
        tracing::debug!(%status, error = %err, "postgrest request failed");
        return Err(err);
    }

    Ok(serde_json::from_str(&body)?)
}
