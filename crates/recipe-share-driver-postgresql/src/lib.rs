mod sql;
use sql::Statement;

mod value;
pub(crate) use value::Value;

use recipe_share_core::{
    async_trait,
    driver::{
        operation::{
            DeleteRecipe, InsertProfile, InsertRecipe, QueryProfiles, QueryRecipes,
            UpdateProfile, UpdateRecipe,
        },
        Operation, Response,
    },
    model::{Difficulty, EmbeddedProfile, Profile, Recipe, RecipeId, RecipeRow},
    Driver, Error, Result,
};
use tokio_postgres::{
    error::SqlState,
    tls::MakeTlsConnect,
    Client, Config, Row, Socket,
};
use url::Url;
use uuid::Uuid;

/// SQLSTATEs that mean a joined statement cannot be resolved against the
/// current schema.
const JOIN_UNAVAILABLE_STATES: [SqlState; 3] = [
    SqlState::UNDEFINED_TABLE,
    SqlState::UNDEFINED_COLUMN,
    SqlState::INVALID_COLUMN_REFERENCE,
];

#[derive(Debug)]
pub struct PostgreSQL {
    /// The PostgreSQL client.
    client: Client,
}

impl PostgreSQL {
    /// Connects to the database named by a `postgresql://` or `postgres://`
    /// URL, without TLS.
    pub async fn connect(url: &str) -> Result<Self> {
        let config = config_from_url(url)?;
        Self::connect_with_config(config, tokio_postgres::NoTls).await
    }

    /// Connects with a prepared [`tokio_postgres::Config`] and TLS connector.
    /// The connection is driven by a background task for the life of the
    /// client.
    pub async fn connect_with_config<T>(config: Config, tls: T) -> Result<Self>
    where
        T: MakeTlsConnect<Socket> + 'static,
        T::Stream: Send,
    {
        let (client, connection) = config
            .connect(tls)
            .await
            .map_err(Error::driver_operation_failed)?;

        let dbname = config.get_dbname().unwrap_or_default().to_string();
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                tracing::error!(%dbname, error = %err, "postgresql connection closed");
            }
        });

        Ok(Self::from(client))
    }

    async fn batch(&self, sql: &str) -> Result<()> {
        self.client
            .batch_execute(sql)
            .await
            .map_err(|err| store_error(err, false))
    }

    async fn query(&self, stmt: &Statement, joined: bool) -> Result<Vec<Row>> {
        tracing::debug!(sql = %stmt.sql, params = stmt.params.len(), "postgresql query");
        self.client
            .query(&stmt.sql, &stmt.args())
            .await
            .map_err(|err| store_error(err, joined))
    }

    async fn query_recipes(&self, op: QueryRecipes) -> Result<Response> {
        let stmt = sql::select_recipes(&op.query, op.include_profile);
        let rows = self.query(&stmt, op.include_profile).await?;
        check_single(op.single, rows.len(), "recipes")?;

        let rows = rows
            .iter()
            .map(|row| {
                let recipe = recipe_from_row(row)?;
                let profile = if op.include_profile {
                    EmbeddedProfile::from(joined_profile(row)?)
                } else {
                    EmbeddedProfile::Missing
                };
                Ok(RecipeRow { recipe, profile })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Response::recipes(rows))
    }

    async fn query_profiles(&self, op: QueryProfiles) -> Result<Response> {
        let rows = self.query(&sql::select_profiles(&op.filter), false).await?;
        check_single(op.single, rows.len(), "profiles")?;

        let profiles = rows
            .iter()
            .map(|row| profile_from_row(row, ""))
            .collect::<Result<Vec<_>>>()?;

        Ok(Response::profiles(profiles))
    }

    async fn recipe_rows(&self, stmt: Statement) -> Result<Response> {
        let recipes = self
            .query(&stmt, false)
            .await?
            .iter()
            .map(recipe_from_row)
            .collect::<Result<Vec<_>>>()?;

        Ok(Response::recipes(recipes))
    }

    async fn profile_rows(&self, stmt: Statement) -> Result<Response> {
        let profiles = self
            .query(&stmt, false)
            .await?
            .iter()
            .map(|row| profile_from_row(row, ""))
            .collect::<Result<Vec<_>>>()?;

        Ok(Response::profiles(profiles))
    }

    async fn delete_recipe(&self, op: DeleteRecipe) -> Result<Response> {
        let stmt = sql::delete_recipe(op.id, op.owner);
        let count = self
            .client
            .execute(&stmt.sql, &stmt.args())
            .await
            .map_err(|err| store_error(err, false))?;

        Ok(Response::count(count))
    }
}

impl From<Client> for PostgreSQL {
    fn from(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Driver for PostgreSQL {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    async fn exec(&self, op: Operation) -> Result<Response> {
        match op {
            Operation::QueryRecipes(op) => self.query_recipes(op).await,
            Operation::QueryProfiles(op) => self.query_profiles(op).await,
            Operation::InsertRecipe(InsertRecipe { recipe }) => {
                self.recipe_rows(sql::insert_recipe(RecipeId::generate(), &recipe))
                    .await
            }
            Operation::UpdateRecipe(UpdateRecipe { id, owner, changes }) => {
                self.recipe_rows(sql::update_recipe(id, owner, &changes))
                    .await
            }
            Operation::DeleteRecipe(op) => self.delete_recipe(op).await,
            Operation::InsertProfile(InsertProfile { profile }) => {
                self.profile_rows(sql::insert_profile(&profile)).await
            }
            Operation::UpdateProfile(UpdateProfile { id, changes }) => {
                self.profile_rows(sql::update_profile(id, &changes)).await
            }
        }
    }

    async fn push_schema(&self) -> Result<()> {
        self.batch(sql::CREATE_TABLES).await
    }

    async fn reset_db(&self) -> Result<()> {
        self.batch(sql::DROP_TABLES).await?;
        self.batch(sql::CREATE_TABLES).await
    }
}

/// Parses a connection URL, requiring a host and a database name.
fn config_from_url(url: &str) -> Result<Config> {
    let parsed = Url::parse(url)?;
    if !matches!(parsed.scheme(), "postgresql" | "postgres") {
        return Err(Error::invalid_configuration(format!(
            "not a PostgreSQL URL; scheme={}",
            parsed.scheme()
        )));
    }

    let config: Config = url
        .parse()
        .map_err(|err| Error::invalid_configuration(format!("invalid PostgreSQL URL: {err}")))?;

    if config.get_hosts().is_empty() {
        return Err(Error::invalid_configuration("PostgreSQL URL names no host"));
    }

    if config.get_dbname().map_or(true, str::is_empty) {
        return Err(Error::invalid_configuration(
            "PostgreSQL URL names no database",
        ));
    }

    Ok(config)
}

fn store_error(err: tokio_postgres::Error, joined: bool) -> Error {
    match err.as_db_error() {
        Some(db) => db_error(db.code(), db.message(), joined),
        None => Error::driver_operation_failed(err),
    }
}

/// Only a joined statement can report the relationship as unavailable; the
/// same states on a plain statement are ordinary store errors.
fn db_error(state: &SqlState, message: &str, joined: bool) -> Error {
    if joined && JOIN_UNAVAILABLE_STATES.contains(state) {
        Error::join_unavailable(state.code(), message)
    } else {
        Error::store(state.code(), message)
    }
}

fn check_single(single: bool, len: usize, table: &str) -> Result<()> {
    match (single, len) {
        (true, 0) => Err(Error::record_not_found(format!(
            "{table}: the result contains 0 rows"
        ))),
        (true, n) if n > 1 => Err(Error::invalid_result(format!(
            "{table}: expected a single row, the result contains {n} rows"
        ))),
        _ => Ok(()),
    }
}

fn recipe_from_row(row: &Row) -> Result<Recipe> {
    let difficulty = row
        .try_get::<_, Option<String>>("difficulty")
        .map_err(Error::driver_operation_failed)?
        .map(|label| {
            label
                .parse::<Difficulty>()
                .map_err(|_| Error::invalid_result(format!("unknown difficulty `{label}`")))
        })
        .transpose()?;

    Ok(Recipe {
        id: get::<Uuid>(row, "id")?.into(),
        created_at: get(row, "created_at")?,
        user_id: get::<Option<Uuid>>(row, "user_id")?.map(Into::into),
        title: get(row, "title")?,
        ingredients: get(row, "ingredients")?,
        instructions: get(row, "instructions")?,
        cooking_time: get(row, "cooking_time")?,
        difficulty,
        category: get(row, "category")?,
    })
}

/// The `LEFT JOIN` yields `NULL` profile columns when the owner has no
/// profile.
fn joined_profile(row: &Row) -> Result<Option<Profile>> {
    let id: Option<Uuid> = get(row, &format!("{}id", sql::PROFILE_PREFIX))?;
    match id {
        Some(_) => profile_from_row(row, sql::PROFILE_PREFIX).map(Some),
        None => Ok(None),
    }
}

fn profile_from_row(row: &Row, prefix: &str) -> Result<Profile> {
    Ok(Profile {
        id: get::<Uuid>(row, &format!("{prefix}id"))?.into(),
        username: get(row, &format!("{prefix}username"))?,
        full_name: get(row, &format!("{prefix}full_name"))?,
        created_at: get(row, &format!("{prefix}created_at"))?,
        updated_at: get(row, &format!("{prefix}updated_at"))?,
    })
}

fn get<'a, T>(row: &'a Row, column: &str) -> Result<T>
where
    T: tokio_postgres::types::FromSql<'a>,
{
    row.try_get(column).map_err(Error::driver_operation_failed)
}
