//! Idempotent startup schema creation.

use sea_orm::{ConnectionTrait, DbConn, DbErr, Schema};

use super::entity::post;

/// Ensure the posts table exists. Create-if-absent only; there is no
/// migration machinery.
pub async fn ensure_tables(db: &DbConn) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut stmt = schema.create_table_from_entity(post::Entity);
    stmt.if_not_exists();

    db.execute(backend.build(&stmt)).await?;
    tracing::info!("Schema ensured (posts table)");

    Ok(())
}
