//! Account Models

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Account UUID
pub type AccountUuid = TypedUuid<Account>;

/// Account Model
#[derive(Debug, Clone)]
pub struct Account {
    pub uuid: AccountUuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Account Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub uuid: AccountUuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Account Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct AccountUpdate {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}
