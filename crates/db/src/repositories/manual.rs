//! Account manual repository.
//!
//! Manuals are free-form usage notes attached to an account: what the
//! account is for and example movements. Plain CRUD, enriched with the
//! owning account's label on reads.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{account_manuals, accounts};

/// Error types for account manual operations.
#[derive(Debug, thiserror::Error)]
pub enum ManualError {
    /// Manual not found.
    #[error("Manual not found: {0}")]
    NotFound(Uuid),

    /// Referenced account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account manual.
#[derive(Debug, Clone)]
pub struct CreateManualInput {
    /// The account this manual documents.
    pub account_id: Uuid,
    /// What the account is used for.
    pub description: String,
    /// Optional example movements.
    pub examples: Option<String>,
}

/// Input for updating an account manual.
#[derive(Debug, Clone)]
pub struct UpdateManualInput {
    /// Move the manual to another account, if set.
    pub account_id: Option<Uuid>,
    /// Replacement description.
    pub description: String,
    /// Replacement examples.
    pub examples: Option<String>,
}

/// A manual together with its account's display label.
#[derive(Debug, Clone)]
pub struct ManualWithAccount {
    /// The manual record.
    pub manual: account_manuals::Model,
    /// `"{code} - {name}"` of the owning account.
    pub account_label: String,
}

/// Account manual repository.
#[derive(Debug, Clone)]
pub struct ManualRepository {
    db: DatabaseConnection,
}

impl ManualRepository {
    /// Creates a new account manual repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a manual for an existing account.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the referenced account does not exist.
    pub async fn create_manual(
        &self,
        input: CreateManualInput,
    ) -> Result<ManualWithAccount, ManualError> {
        let account = accounts::Entity::find_by_id(input.account_id)
            .one(&self.db)
            .await?
            .ok_or(ManualError::AccountNotFound(input.account_id))?;

        let manual = account_manuals::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_id: Set(account.id),
            description: Set(input.description),
            examples: Set(input.examples),
            created_at: Set(chrono::Utc::now().into()),
        };
        let manual = manual.insert(&self.db).await?;

        tracing::info!(manual_id = %manual.id, account = %account.code, "Account manual created");

        Ok(ManualWithAccount {
            manual,
            account_label: account.label(),
        })
    }

    /// Lists all manuals with their account labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_manuals(&self) -> Result<Vec<ManualWithAccount>, ManualError> {
        let rows = account_manuals::Entity::find()
            .find_also_related(accounts::Entity)
            .order_by_asc(account_manuals::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(manual, account)| ManualWithAccount {
                account_label: account.map(|a| a.label()).unwrap_or_default(),
                manual,
            })
            .collect())
    }

    /// Lists the manuals attached to one account.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist.
    pub async fn list_for_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<ManualWithAccount>, ManualError> {
        let account = accounts::Entity::find_by_id(account_id)
            .one(&self.db)
            .await?
            .ok_or(ManualError::AccountNotFound(account_id))?;

        let manuals = account_manuals::Entity::find()
            .filter(account_manuals::Column::AccountId.eq(account_id))
            .order_by_asc(account_manuals::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let label = account.label();
        Ok(manuals
            .into_iter()
            .map(|manual| ManualWithAccount {
                manual,
                account_label: label.clone(),
            })
            .collect())
    }

    /// Finds a manual by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the manual does not exist.
    pub async fn find_manual(&self, id: Uuid) -> Result<ManualWithAccount, ManualError> {
        let (manual, account) = account_manuals::Entity::find_by_id(id)
            .find_also_related(accounts::Entity)
            .one(&self.db)
            .await?
            .ok_or(ManualError::NotFound(id))?;

        Ok(ManualWithAccount {
            account_label: account.map(|a| a.label()).unwrap_or_default(),
            manual,
        })
    }

    /// Updates a manual; the account reference is re-validated when moved.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the manual does not exist, `AccountNotFound`
    /// if a new target account does not exist.
    pub async fn update_manual(
        &self,
        id: Uuid,
        input: UpdateManualInput,
    ) -> Result<ManualWithAccount, ManualError> {
        let existing = account_manuals::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ManualError::NotFound(id))?;

        let target_id = input.account_id.unwrap_or(existing.account_id);
        let account = accounts::Entity::find_by_id(target_id)
            .one(&self.db)
            .await?
            .ok_or(ManualError::AccountNotFound(target_id))?;

        let mut active: account_manuals::ActiveModel = existing.into();
        active.account_id = Set(account.id);
        active.description = Set(input.description);
        active.examples = Set(input.examples);
        let manual = active.update(&self.db).await?;

        Ok(ManualWithAccount {
            manual,
            account_label: account.label(),
        })
    }

    /// Deletes a manual.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the manual does not exist.
    pub async fn delete_manual(&self, id: Uuid) -> Result<(), ManualError> {
        let existing = account_manuals::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ManualError::NotFound(id))?;

        existing.delete(&self.db).await?;
        tracing::info!(manual_id = %id, "Account manual deleted");
        Ok(())
    }
}
