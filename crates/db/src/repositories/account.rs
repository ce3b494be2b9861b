//! Account repository for chart of accounts database operations.
//!
//! Level and parent are never supplied by callers; every create and update
//! runs the full hierarchy resolver against the current chart.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use libros_core::coa::{self, CoaError, Placement};

use crate::entities::{account_manuals, accounts, entry_lines, sea_orm_active_enums::AccountType};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account code already exists.
    #[error("Account code '{0}' already exists")]
    DuplicateCode(String),

    /// Account code is empty.
    #[error("Account code must not be empty")]
    EmptyCode,

    /// Account code contains non-ASCII characters.
    #[error("Account code must be ASCII: '{0}'")]
    NonAsciiCode(String),

    /// No existing account qualifies as the parent for the code.
    #[error("No valid parent account found for code '{0}'")]
    ParentNotFound(String),

    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// Cannot delete an account that other accounts reference as parent.
    #[error("Cannot delete account: it has {0} child accounts")]
    HasChildren(u64),

    /// Cannot delete an account referenced by entry lines or manuals.
    #[error("Cannot delete account: referenced by {lines} entry lines and {manuals} manuals")]
    InUse {
        /// Entry lines posting to the account.
        lines: u64,
        /// Manuals documenting the account.
        manuals: u64,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<CoaError> for AccountError {
    fn from(value: CoaError) -> Self {
        match value {
            CoaError::EmptyCode => Self::EmptyCode,
            CoaError::NonAsciiCode(code) => Self::NonAsciiCode(code),
            CoaError::NoValidParent(code) => Self::ParentNotFound(code),
        }
    }
}

/// Account enriched with its parent's label at read time.
///
/// The label reflects the parent's current code and name, so a parent
/// rename is always visible without rewriting children.
#[derive(Debug, Clone)]
pub struct AccountWithParent {
    /// The account record.
    pub account: accounts::Model,
    /// `"{code} - {name}"` of the parent, if any.
    pub parent_label: Option<String>,
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Account code (unique, structured in 4-character segments).
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
}

/// Input for updating an account. All fields are replaced.
#[derive(Debug, Clone)]
pub struct UpdateAccountInput {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
}

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account with resolved level and parent.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The code already exists (checked up front and again via the
    ///   store's uniqueness constraint for concurrent creates)
    /// - The code is empty or no valid parent exists for it
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<AccountWithParent, AccountError> {
        let code = input.code.trim().to_string();

        let existing = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(&code))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AccountError::DuplicateCode(code));
        }

        let placement = self.resolve_placement(&code, None).await?;

        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(code.clone()),
            name: Set(input.name),
            account_type: Set(input.account_type),
            level: Set(level_column(placement.level)),
            parent_id: Set(placement.parent),
            created_at: Set(chrono::Utc::now().into()),
        };

        match account.insert(&self.db).await {
            Ok(model) => {
                tracing::info!(account_id = %model.id, code = %model.code, level = model.level, "Account created");
                let parent_label = self.parent_label(model.parent_id).await?;
                Ok(AccountWithParent {
                    account: model,
                    parent_label,
                })
            }
            // Two concurrent creates with the same code race past the
            // up-front check; the unique constraint serializes them.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AccountError::DuplicateCode(code))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all accounts ordered by code, with parent labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(&self) -> Result<Vec<AccountWithParent>, AccountError> {
        let all = accounts::Entity::find()
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await?;

        let labels: HashMap<Uuid, String> = all.iter().map(|a| (a.id, a.label())).collect();

        Ok(all
            .into_iter()
            .map(|account| {
                let parent_label = account.parent_id.and_then(|p| labels.get(&p).cloned());
                AccountWithParent {
                    account,
                    parent_label,
                }
            })
            .collect())
    }

    /// Finds an account by ID, with its parent label.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist.
    pub async fn find_account(&self, id: Uuid) -> Result<AccountWithParent, AccountError> {
        let account = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        let parent_label = self.parent_label(account.parent_id).await?;

        Ok(AccountWithParent {
            account,
            parent_label,
        })
    }

    /// Fetches the parent's current `"{code} - {name}"` label, if any.
    async fn parent_label(&self, parent_id: Option<Uuid>) -> Result<Option<String>, AccountError> {
        match parent_id {
            Some(pid) => Ok(accounts::Entity::find_by_id(pid)
                .one(&self.db)
                .await?
                .map(|p| p.label())),
            None => Ok(None),
        }
    }

    /// Updates an account, recomputing level and parent from the new code.
    ///
    /// Resolution is always redone, even for an unchanged code: parent
    /// accounts may have appeared or vanished since creation.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing, the new code collides,
    /// or the resolver cannot place the new code.
    pub async fn update_account(
        &self,
        id: Uuid,
        input: UpdateAccountInput,
    ) -> Result<AccountWithParent, AccountError> {
        let account = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        let code = input.code.trim().to_string();

        if code != account.code {
            let existing = accounts::Entity::find()
                .filter(accounts::Column::Code.eq(&code))
                .filter(accounts::Column::Id.ne(id))
                .one(&self.db)
                .await?;
            if existing.is_some() {
                return Err(AccountError::DuplicateCode(code));
            }
        }

        // Exclude the account itself so it can never become its own parent.
        let placement = self.resolve_placement(&code, Some(id)).await?;

        let mut active: accounts::ActiveModel = account.into();
        active.code = Set(code.clone());
        active.name = Set(input.name);
        active.account_type = Set(input.account_type);
        active.level = Set(level_column(placement.level));
        active.parent_id = Set(placement.parent);

        match active.update(&self.db).await {
            Ok(model) => {
                let parent_label = self.parent_label(model.parent_id).await?;
                Ok(AccountWithParent {
                    account: model,
                    parent_label,
                })
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AccountError::DuplicateCode(code))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes an account that nothing references.
    ///
    /// # Errors
    ///
    /// Returns `HasChildren` if any account references this one as its
    /// parent, `InUse` if entry lines or manuals reference it, `NotFound`
    /// if the account does not exist.
    pub async fn delete_account(&self, id: Uuid) -> Result<(), AccountError> {
        let account = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        if let Some(blocked) = self.delete_blocker(id).await? {
            return Err(blocked);
        }

        match accounts::Entity::delete_by_id(account.id)
            .exec(&self.db)
            .await
        {
            Ok(_) => {
                tracing::info!(account_id = %id, "Account deleted");
                Ok(())
            }
            // A child, line, or manual can appear between the checks and
            // the delete; the foreign keys catch it, and a recount names
            // the blocker.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) => {
                match self.delete_blocker(id).await? {
                    Some(blocked) => Err(blocked),
                    None => Err(e.into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the error blocking a delete, if anything references the
    /// account.
    async fn delete_blocker(&self, id: Uuid) -> Result<Option<AccountError>, AccountError> {
        let children = accounts::Entity::find()
            .filter(accounts::Column::ParentId.eq(id))
            .count(&self.db)
            .await?;
        if children > 0 {
            return Ok(Some(AccountError::HasChildren(children)));
        }

        let lines = entry_lines::Entity::find()
            .filter(entry_lines::Column::AccountId.eq(id))
            .count(&self.db)
            .await?;
        let manuals = account_manuals::Entity::find()
            .filter(account_manuals::Column::AccountId.eq(id))
            .count(&self.db)
            .await?;
        if lines > 0 || manuals > 0 {
            return Ok(Some(AccountError::InUse { lines, manuals }));
        }

        Ok(None)
    }

    /// Resolves level and parent for a code against the current chart.
    ///
    /// Candidate ancestors are fetched in one query; `exclude` keeps an
    /// account from matching itself during an update.
    async fn resolve_placement(
        &self,
        code: &str,
        exclude: Option<Uuid>,
    ) -> Result<Placement<Uuid>, AccountError> {
        let prefixes = coa::ancestor_prefixes(code.trim());

        let ancestors: HashMap<String, Uuid> = if prefixes.is_empty() {
            HashMap::new()
        } else {
            let mut query = accounts::Entity::find()
                .filter(accounts::Column::Code.is_in(prefixes.iter().copied()));
            if let Some(excluded_id) = exclude {
                query = query.filter(accounts::Column::Id.ne(excluded_id));
            }
            query
                .all(&self.db)
                .await?
                .into_iter()
                .map(|a| (a.code, a.id))
                .collect()
        };

        let placement = coa::resolve_placement(code, |c| ancestors.get(c).copied())?;
        Ok(placement)
    }
}

/// Converts a resolver level to the column type.
fn level_column(level: u32) -> i32 {
    i32::try_from(level).unwrap_or(i32::MAX)
}
