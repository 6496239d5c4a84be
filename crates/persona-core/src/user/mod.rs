//! User account services: registration, authentication, graph linkage.

pub mod model;

use async_trait::async_trait;
use tracing::{info, warn};

use persona_db::queries::users::{self, UserRow};
use persona_db::{DbError, DbPool};
use persona_graph::{GraphClient, GraphError, NewPerson};

use crate::auth::{hash_password, verify_password};
use crate::error::{CoreError, CoreResult};

pub use model::UserResponse;

/// Seam to the graph store for account-linked Person nodes.
///
/// Registration only needs "create a profile node and give me its id", so
/// that is all this trait exposes; tests substitute a failing directory to
/// exercise the best-effort path without a live store.
#[async_trait]
pub trait PersonDirectory: Send + Sync {
    async fn seed_person(&self, new: &NewPerson, created_by: &str) -> Result<String, GraphError>;
}

#[async_trait]
impl PersonDirectory for GraphClient {
    async fn seed_person(&self, new: &NewPerson, created_by: &str) -> Result<String, GraphError> {
        let record = persona_graph::person::create_person(self, new, created_by).await?;
        Ok(record.id)
    }
}

/// The starter Person profile seeded for a fresh account.
pub fn registration_profile(email: &str, full_name: Option<&str>) -> NewPerson {
    let name = full_name
        .filter(|n| !n.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string());

    NewPerson {
        description: Some(format!("Personal profile for {}", name)),
        name,
        birth_year: None,
        death_year: None,
        occupation: Some(vec!["User".to_string()]),
        specialty: Some(vec!["User".to_string()]),
        hobby: None,
        achievement: Some("New user registration".to_string()),
        kind: Some("user".to_string()),
        frequency: Some(1),
        degree: Some(1),
        source_type: "user_created".to_string(),
        is_verified: false,
    }
}

/// Register a new account.
///
/// The relational row is the source of truth; seeding the Person node in
/// the graph is best-effort. When the graph write fails the account is
/// still created, the failure is logged, and the back-reference simply
/// stays unset.
pub async fn register(
    db: &DbPool,
    directory: &dyn PersonDirectory,
    email: &str,
    password: &str,
    full_name: Option<&str>,
) -> CoreResult<UserRow> {
    let hashed = hash_password(password)?;

    let user = users::create_user(db, email, &hashed, full_name).map_err(|e| match e {
        DbError::Duplicate(_) => CoreError::validation("Email already registered"),
        e => CoreError::Database(e),
    })?;

    let profile = registration_profile(email, full_name);
    match directory.seed_person(&profile, email).await {
        Ok(person_id) => {
            info!(email, person_id = %person_id, "Seeded Person node for new account");
            if let Err(e) = users::set_person_link(db, email, Some(&person_id)) {
                warn!(email, error = %e, "Failed to record Person back-reference");
            }
        }
        Err(e) => {
            warn!(email, error = %e, "Failed to seed Person node; account left unlinked");
        }
    }

    Ok(users::get_user_by_email(db, email)?.unwrap_or(user))
}

/// Check login credentials.
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub fn authenticate(db: &DbPool, email: &str, password: &str) -> CoreResult<Option<UserRow>> {
    let Some(user) = users::get_user_by_email(db, email)? else {
        return Ok(None);
    };

    if !verify_password(password, &user.hashed_password) {
        return Ok(None);
    }

    Ok(Some(user))
}

/// Record the back-reference from a user to a Person node it created, if
/// the account is not linked yet. The first created node wins; later
/// creates leave the link untouched.
pub fn link_person_if_unlinked(db: &DbPool, user: &UserRow, person_id: &str) -> CoreResult<()> {
    if user.is_linked || user.linked_person_id.is_some() {
        return Ok(());
    }
    users::set_person_link(db, &user.email, Some(person_id))?;
    Ok(())
}
