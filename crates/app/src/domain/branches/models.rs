//! Branch Models

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Branch UUID
pub type BranchUuid = TypedUuid<Branch>;

/// Branch Model
#[derive(Debug, Clone)]
pub struct Branch {
    pub uuid: BranchUuid,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub is_main: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Branch Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewBranch {
    pub uuid: BranchUuid,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub is_main: bool,
}

/// Branch Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct BranchUpdate {
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub is_main: bool,
}
