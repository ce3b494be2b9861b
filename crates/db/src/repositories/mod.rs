//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod journal;
pub mod manual;
pub mod posting;

pub use account::{
    AccountError, AccountRepository, AccountWithParent, CreateAccountInput, UpdateAccountInput,
};
pub use journal::{EntryError, EntryRepository, EntryWithLines};
pub use manual::{
    CreateManualInput, ManualError, ManualRepository, ManualWithAccount, UpdateManualInput,
};
pub use posting::{PostingError, PostingFilter, PostingRepository};
