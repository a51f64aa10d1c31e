use crate::blog::{NewUser, User};
use crate::store::{Repository, StoreError};
use argon2::{PasswordHasher, PasswordVerifier};
use rand::SeedableRng;

// dummy unit tuple so `Auth`s can't be instantiated outside of this file
pub struct Auth(());

fn hash_password(password: &str) -> argon2::password_hash::Result<String> {
    let salt =
        argon2::password_hash::SaltString::generate(&mut rand_chacha::ChaCha20Rng::from_entropy());

    Ok(argon2::Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

fn verify_password(password: &str, hash: &str) -> argon2::password_hash::Result<bool> {
    let hash = argon2::password_hash::PasswordHash::new(hash)?;

    match argon2::Argon2::default().verify_password(password.as_bytes(), &hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(err),
    }
}

impl Auth {
    /// `Ok(Some(..))` if the credentials match, `Ok(None)` if they don't, `Err`
    /// if the store could not be read
    pub async fn validate(
        store: &dyn Repository,
        username: &str,
        password: String,
    ) -> anyhow::Result<Option<(User, Auth)>> {
        let Some(user) = store.user_by_username(username).await? else {
            return Ok(None);
        };

        let hash = user.password_hash.clone();
        let password_is_valid =
            match tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await? {
                Ok(it) => it,
                Err(err) => {
                    // e.g. accounts created without a usable password
                    tracing::warn!("Stored password hash for {username:?} is unusable: {err}");
                    false
                }
            };

        if password_is_valid {
            Ok(Some((user, Auth(()))))
        } else {
            Ok(None)
        }
    }

    /// `Ok(Some(..))` if created, `Ok(None)` if the username is already taken,
    /// `Err` if hashing failed or the store could not be written
    pub async fn register(
        store: &dyn Repository,
        username: String,
        password: String,
    ) -> anyhow::Result<Option<(User, Auth)>> {
        if store.user_by_username(&username).await?.is_some() {
            return Ok(None);
        }

        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await?
            .map_err(|err| anyhow::anyhow!("hashing password: {err}"))?;

        match store
            .insert_user(NewUser {
                username,
                password_hash,
            })
            .await
        {
            Ok(user) => Ok(Some((user, Auth(())))),
            Err(StoreError::Duplicate { .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    #[cfg(test)]
    pub fn trusted() -> Auth {
        Auth(())
    }
}
