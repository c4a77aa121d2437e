use recipe_share_core::{
    model::{RecipeId, UserId},
    stmt::{ProfileFilter, RecipeQuery},
    Error, Result,
};

use url::Url;

pub(crate) const RECIPES: &str = "recipes";
pub(crate) const PROFILES: &str = "profiles";

/// Embeds the owner's profile under `profile`, naming the foreign key so the
/// store cannot pick a different relationship.
pub(crate) const JOINED_SELECT: &str = "*,profile:profiles!recipes_user_id_fkey(*)";

/// Normalizes a project URL to the REST root, `<origin>/rest/v1/`. A URL that
/// already points at the REST root is kept.
pub(crate) fn rest_root(url: &Url) -> Result<Url> {
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(Error::invalid_configuration(format!(
            "not a PostgREST URL: {url}"
        )));
    }

    let mut root = url.clone();
    root.set_query(None);
    root.set_fragment(None);

    let path = url.path().trim_end_matches('/');
    if path.ends_with("/rest/v1") {
        root.set_path(&format!("{path}/"));
    } else {
        root.set_path(&format!("{path}/rest/v1/"));
    }

    Ok(root)
}

fn table(root: &Url, name: &str) -> Result<Url> {
    Ok(root.join(name)?)
}

pub(crate) fn recipes(root: &Url, query: &RecipeQuery, include_profile: bool) -> Result<Url> {
    let mut url = table(root, RECIPES)?;

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("select", if include_profile { JOINED_SELECT } else { "*" });

        for filter in &query.filter {
            pairs.append_pair(
                filter.field().column(),
                &format!("eq.{}", filter.value_text()),
            );
        }

        if let Some(order_by) = &query.order_by {
            pairs.append_pair(
                "order",
                &format!(
                    "{}.{}",
                    order_by.field.column(),
                    order_by.direction.as_sql().to_ascii_lowercase()
                ),
            );
        }

        if let Some(limit) = query.limit {
            pairs.append_pair("limit", &limit.to_string());
        }
    }

    Ok(url)
}

pub(crate) fn profiles(root: &Url, filter: &ProfileFilter) -> Result<Url> {
    let mut url = table(root, PROFILES)?;

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("select", "*");

        match filter {
            ProfileFilter::Id(id) => {
                pairs.append_pair("id", &format!("eq.{id}"));
            }
            ProfileFilter::IdIn(ids) => {
                let ids = ids.iter().map(ToString::to_string).collect::<Vec<_>>();
                pairs.append_pair("id", &format!("in.({})", ids.join(",")));
            }
            ProfileFilter::Username(username) => {
                pairs.append_pair("username", &format!("eq.{username}"));
            }
        }
    }

    Ok(url)
}

/// Targets one recipe, only if `owner` owns it.
pub(crate) fn owned_recipe(root: &Url, id: RecipeId, owner: UserId) -> Result<Url> {
    let mut url = table(root, RECIPES)?;
    url.query_pairs_mut()
        .append_pair("id", &format!("eq.{id}"))
        .append_pair("user_id", &format!("eq.{owner}"));
    Ok(url)
}

pub(crate) fn profile(root: &Url, id: UserId) -> Result<Url> {
    let mut url = table(root, PROFILES)?;
    url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
    Ok(url)
}

pub(crate) fn insert(root: &Url, name: &str) -> Result<Url> {
    table(root, name)
}
