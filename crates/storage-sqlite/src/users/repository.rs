use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use paperfolio_core::errors::{DatabaseError, Error, Result};
use paperfolio_core::users::{User, UserRepositoryTrait};

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;

/// Repository for managing user rows in the database
pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    /// Creates a new UserRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create(&self, user: User) -> Result<User> {
        self.writer
            .exec(move |conn| {
                let user_db = UserDB::from(user);

                diesel::insert_into(users::table)
                    .values(&user_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(User::from(user_db))
            })
            .await
    }

    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;

        let user_db = users::table
            .select(UserDB::as_select())
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(User::from(user_db))
    }

    fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;

        let user_db = users::table
            .select(UserDB::as_select())
            .filter(users::username.eq(username))
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(user_db.map(User::from))
    }

    async fn update_password_hash(&self, user_id: &str, password_hash: String) -> Result<()> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::update(users::table.find(&user_id))
                    .set((
                        users::password_hash.eq(&password_hash),
                        users::updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                if affected == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "user {}",
                        user_id
                    ))));
                }
                Ok(())
            })
            .await
    }
}
