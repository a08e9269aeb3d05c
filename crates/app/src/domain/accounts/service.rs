//! Accounts service.
//!
//! Account creation also creates the account's loyalty profile and cart, in
//! the same transaction. Related records exist from the moment the account
//! does; nothing is created behind the caller's back later.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        accounts::{
            errors::AccountsServiceError,
            models::{Account, AccountUpdate, AccountUuid, NewAccount},
            repository::PgAccountsRepository,
        },
        carts::{models::CartUuid, repositories::PgCartsRepository},
        loyalty::repository::PgLoyaltyRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAccountsService {
    db: Db,
    accounts: PgAccountsRepository,
    carts: PgCartsRepository,
    loyalty: PgLoyaltyRepository,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            accounts: PgAccountsRepository::new(),
            carts: PgCartsRepository::new(),
            loyalty: PgLoyaltyRepository::new(),
        }
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    #[tracing::instrument(
        name = "accounts.service.create_account",
        skip(self, account),
        fields(account_uuid = %account.uuid),
        err
    )]
    async fn create_account(&self, account: NewAccount) -> Result<Account, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let uuid = account.uuid;
        let created = self.accounts.create_account(&mut tx, account).await?;

        self.loyalty.create_profile(&mut tx, uuid).await?;
        self.carts.create_cart(&mut tx, CartUuid::new(), uuid).await?;

        tx.commit().await?;

        info!(account_uuid = %created.uuid, "created account with profile and cart");

        Ok(created)
    }

    async fn get_account(&self, account: AccountUuid) -> Result<Account, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let account = self.accounts.get_account(&mut tx, account).await?;

        tx.commit().await?;

        Ok(account)
    }

    async fn update_account(
        &self,
        account: AccountUuid,
        update: AccountUpdate,
    ) -> Result<Account, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .accounts
            .update_account(&mut tx, account, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Creates an account together with its loyalty profile and cart.
    async fn create_account(&self, account: NewAccount) -> Result<Account, AccountsServiceError>;

    /// Retrieve a single account.
    async fn get_account(&self, account: AccountUuid) -> Result<Account, AccountsServiceError>;

    /// Updates an account's contact details.
    async fn update_account(
        &self,
        account: AccountUuid,
        update: AccountUpdate,
    ) -> Result<Account, AccountsServiceError>;
}
