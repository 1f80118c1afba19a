//! End-to-end walk through against a local PostgreSQL.
//!
//! Expects a table like:
//! ```sql
//! CREATE TABLE users (
//!     id BIGSERIAL PRIMARY KEY,
//!     name TEXT NOT NULL,
//!     email TEXT NOT NULL UNIQUE,
//!     password TEXT
//! );
//! ```
//! Connection settings come from `recordhaus.toml` or `RECORDHAUS_CONFIG`.

use recordhaus::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(EntityMetadata)]
#[entity(primary_keys(id), unique_keys(email), graded(id, name, email), hidden(password))]
pub struct User;

impl EntitySchema for User {
    fn rules() -> Vec<ValidationRule> {
        vec![
            ValidationRule::required("name"),
            ValidationRule::max_length("name", 80),
            ValidationRule::required("email"),
            ValidationRule::email("email"),
            ValidationRule::min_length("password", 8),
        ]
    }
}

struct UserController;

impl Controller for UserController {
    type Model = User;
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🚀 RecordHaus Demo\n");

    let config = AppConfig::load()?;
    let recordhaus = RecordHaus::new(config.database).await?;
    recordhaus.health_check().await?;
    let store = recordhaus.data_store();

    // Rejected before any statement is sent
    let mut invalid = recordhaus.entity::<User>();
    invalid.set("email", "not-an-address");
    match invalid.insert(store).await {
        Err(EntityError::Validation(errors)) => println!("❌ Rejected: {}", errors),
        other => println!("Unexpected: {:?}", other.map(|r| r.row_count())),
    }

    let mut user = recordhaus.entity::<User>();
    user.set("name", "John Doe");
    user.set("email", "john@example.com");
    user.set("password", "correct horse");
    match user.insert(store).await {
        Ok(_) => println!("✅ Inserted: {:?}", user.to_map()),
        Err(EntityError::KeyConflict { field, .. }) => {
            println!("⚠️  A user with this {} already exists", field)
        }
        Err(e) => return Err(e.into()),
    }

    // Lookup by unique key
    let mut found = recordhaus.entity::<User>();
    found.find_and_load(store, "john@example.com").await?;
    println!("🔎 Found: {:?}", found.to_map());

    // Route binding, as a router would call it for /users/{id}
    if let Some(id) = found.get("id") {
        let path_data: PathData = [("id".to_string(), id.to_string())].into_iter().collect();
        if let Some(mut bound) = recordhaus.bind_model::<UserController>(&path_data).await? {
            bound.set("name", "Jane Doe");
            bound.update(store).await?;
            println!("✏️  Updated: {:?}", bound.to_map());

            let page = bound.first(store, 10, 0).await?;
            println!("📄 First page holds {} row(s)", page.row_count());

            bound.delete(store).await?;
            println!("🗑️  Deleted");
        }
    }

    Ok(())
}
