//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use platform::password::HashedPassword;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entity::{account::Account, auth_session::AuthSession, profile::Profile};
use crate::domain::repository::{AccountRepository, AuthSessionRepository, ProfileRepository};
use crate::domain::value_object::{Email, Role, Siret, Username};
use crate::error::{AccountsError, AccountsResult};

const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed accounts repository
#[derive(Clone)]
pub struct PgAccountsRepository {
    pool: PgPool,
}

impl PgAccountsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_account(
        tx: &mut Transaction<'_, Postgres>,
        account: &Account,
    ) -> AccountsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                username,
                username_canonical,
                password_hash,
                email,
                first_name,
                last_name,
                is_staff,
                is_superuser,
                is_active,
                last_login_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.username.original())
        .bind(account.username.canonical())
        .bind(account.password_hash.as_phc_string())
        .bind(account.email.as_str())
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.is_staff)
        .bind(account.is_superuser)
        .bind(account.is_active)
        .bind(account.last_login_at)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&mut **tx)
        .await
        .map_err(map_unique_violation)?;

        Ok(())
    }

    async fn update_account(
        tx: &mut Transaction<'_, Postgres>,
        account: &Account,
    ) -> AccountsResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE accounts SET
                password_hash = $2,
                email = $3,
                first_name = $4,
                last_name = $5,
                is_staff = $6,
                is_superuser = $7,
                is_active = $8,
                last_login_at = $9,
                updated_at = $10
            WHERE account_id = $1
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.password_hash.as_phc_string())
        .bind(account.email.as_str())
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.is_staff)
        .bind(account.is_superuser)
        .bind(account.is_active)
        .bind(account.last_login_at)
        .bind(account.updated_at)
        .execute(&mut **tx)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(AccountsError::AccountNotFound);
        }
        Ok(())
    }

    async fn upsert_profile(
        tx: &mut Transaction<'_, Postgres>,
        profile: &Profile,
    ) -> AccountsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (
                account_id,
                role,
                address,
                image_ref,
                siret,
                cv_ref
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (account_id) DO UPDATE SET
                address = EXCLUDED.address,
                image_ref = EXCLUDED.image_ref,
                siret = EXCLUDED.siret,
                cv_ref = EXCLUDED.cv_ref
            "#,
        )
        .bind(profile.account_id.as_uuid())
        .bind(profile.role.id())
        .bind(&profile.address)
        .bind(&profile.image_ref)
        .bind(profile.siret.as_ref().map(Siret::as_str))
        .bind(&profile.cv_ref)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

fn map_unique_violation(err: sqlx::Error) -> AccountsError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            AccountsError::UsernameTaken
        }
        _ => AccountsError::Database(err),
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgAccountsRepository {
    async fn create(&self, account: &Account) -> AccountsResult<()> {
        let mut tx = self.pool.begin().await?;
        Self::insert_account(&mut tx, account).await?;
        tx.commit().await?;

        Ok(())
    }

    async fn create_with_profile(&self, account: &Account, profile: &Profile) -> AccountsResult<()> {
        let mut tx = self.pool.begin().await?;
        Self::insert_account(&mut tx, account).await?;
        Self::upsert_profile(&mut tx, profile).await?;
        tx.commit().await?;

        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AccountsResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                username,
                password_hash,
                email,
                first_name,
                last_name,
                is_staff,
                is_superuser,
                is_active,
                last_login_at,
                created_at,
                updated_at
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> AccountsResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                username,
                password_hash,
                email,
                first_name,
                last_name,
                is_staff,
                is_superuser,
                is_active,
                last_login_at,
                created_at,
                updated_at
            FROM accounts
            WHERE username_canonical = $1
            "#,
        )
        .bind(username.canonical())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn exists_by_username(&self, username: &Username) -> AccountsResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE username_canonical = $1)",
        )
        .bind(username.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, account: &Account) -> AccountsResult<()> {
        let mut tx = self.pool.begin().await?;
        Self::update_account(&mut tx, account).await?;
        tx.commit().await?;

        Ok(())
    }

    async fn update_with_profile(&self, account: &Account, profile: &Profile) -> AccountsResult<()> {
        let mut tx = self.pool.begin().await?;
        Self::update_account(&mut tx, account).await?;
        Self::upsert_profile(&mut tx, profile).await?;
        tx.commit().await?;

        Ok(())
    }
}

// ============================================================================
// Profile Repository Implementation
// ============================================================================

impl ProfileRepository for PgAccountsRepository {
    async fn find_by_account(&self, account_id: &AccountId) -> AccountsResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT account_id, role, address, image_ref, siret, cv_ref
            FROM profiles
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_profile()).transpose()
    }

    async fn get_or_create(&self, account_id: &AccountId) -> AccountsResult<Profile> {
        let placeholder = Profile::placeholder(*account_id);

        // DO NOTHING leaves a concurrent insert in place; the SELECT sees it.
        sqlx::query(
            r#"
            INSERT INTO profiles (account_id, role, address)
            VALUES ($1, $2, $3)
            ON CONFLICT (account_id) DO NOTHING
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(placeholder.role.id())
        .bind(&placeholder.address)
        .execute(&self.pool)
        .await?;

        self.find_by_account(account_id)
            .await?
            .ok_or(AccountsError::AccountNotFound)
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for PgAccountsRepository {
    async fn create_session(&self, session: &AuthSession) -> AccountsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                account_id,
                is_staff,
                is_superuser,
                expires_at_ms,
                client_fingerprint_hash,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(session.session_id)
        .bind(session.account_id.as_uuid())
        .bind(session.is_staff)
        .bind(session.is_superuser)
        .bind(session.expires_at_ms)
        .bind(&session.client_fingerprint_hash)
        .bind(&session.client_ip)
        .bind(&session.user_agent)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_session(
        &self,
        session_id: Uuid,
        fingerprint_hash: &[u8],
    ) -> AccountsResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT
                session_id,
                account_id,
                is_staff,
                is_superuser,
                expires_at_ms,
                client_fingerprint_hash,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            FROM auth_sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => {
                if r.client_fingerprint_hash != fingerprint_hash {
                    tracing::warn!(session_id = %session_id, "Session fingerprint mismatch");
                    return Err(AccountsError::SessionFingerprintMismatch);
                }
                Ok(Some(r.into_session()))
            }
            None => Ok(None),
        }
    }

    async fn touch_session(&self, session: &AuthSession) -> AccountsResult<()> {
        sqlx::query("UPDATE auth_sessions SET last_activity_at = $2 WHERE session_id = $1")
            .bind(session.session_id)
            .bind(session.last_activity_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_session(&self, session_id: Uuid) -> AccountsResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired_sessions(&self) -> AccountsResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    username: String,
    password_hash: String,
    email: String,
    first_name: String,
    last_name: String,
    is_staff: bool,
    is_superuser: bool,
    is_active: bool,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AccountsResult<Account> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AccountsError::Internal(format!("Invalid password hash: {e}")))?;

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            username: Username::from_db(&self.username),
            password_hash,
            email: Email::from_db(self.email),
            first_name: self.first_name,
            last_name: self.last_name,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
            is_active: self.is_active,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    account_id: Uuid,
    role: i16,
    address: String,
    image_ref: Option<String>,
    siret: Option<String>,
    cv_ref: Option<String>,
}

impl ProfileRow {
    fn into_profile(self) -> AccountsResult<Profile> {
        let role = Role::from_id(self.role)
            .ok_or_else(|| AccountsError::Internal(format!("Invalid role id: {}", self.role)))?;

        Ok(Profile {
            account_id: AccountId::from_uuid(self.account_id),
            role,
            address: self.address,
            image_ref: self.image_ref,
            siret: self.siret.map(Siret::from_db),
            cv_ref: self.cv_ref,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    session_id: Uuid,
    account_id: Uuid,
    is_staff: bool,
    is_superuser: bool,
    expires_at_ms: i64,
    client_fingerprint_hash: Vec<u8>,
    client_ip: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl AuthSessionRow {
    fn into_session(self) -> AuthSession {
        AuthSession {
            session_id: self.session_id,
            account_id: AccountId::from_uuid(self.account_id),
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
            expires_at_ms: self.expires_at_ms,
            client_fingerprint_hash: self.client_fingerprint_hash,
            client_ip: self.client_ip,
            user_agent: self.user_agent,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        }
    }
}
