//! Branches service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::branches::{
        errors::BranchesServiceError,
        models::{Branch, BranchUpdate, BranchUuid, NewBranch},
        repository::PgBranchesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgBranchesService {
    db: Db,
    repository: PgBranchesRepository,
}

impl PgBranchesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgBranchesRepository::new(),
        }
    }
}

#[async_trait]
impl BranchesService for PgBranchesService {
    async fn list_branches(&self) -> Result<Vec<Branch>, BranchesServiceError> {
        let mut tx = self.db.begin().await?;

        let branches = self.repository.list_branches(&mut tx).await?;

        tx.commit().await?;

        Ok(branches)
    }

    async fn get_branch(&self, branch: BranchUuid) -> Result<Branch, BranchesServiceError> {
        let mut tx = self.db.begin().await?;

        let branch = self.repository.get_branch(&mut tx, branch).await?;

        tx.commit().await?;

        Ok(branch)
    }

    async fn create_branch(&self, branch: NewBranch) -> Result<Branch, BranchesServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_branch(&mut tx, branch).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_branch(
        &self,
        branch: BranchUuid,
        update: BranchUpdate,
    ) -> Result<Branch, BranchesServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_branch(&mut tx, branch, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_branch(&self, branch: BranchUuid) -> Result<(), BranchesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_branch(&mut tx, branch).await?;

        if rows_affected == 0 {
            return Err(BranchesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait BranchesService: Send + Sync {
    /// Retrieves all branches, main branch first.
    async fn list_branches(&self) -> Result<Vec<Branch>, BranchesServiceError>;

    /// Retrieve a single branch.
    async fn get_branch(&self, branch: BranchUuid) -> Result<Branch, BranchesServiceError>;

    /// Creates a new branch.
    async fn create_branch(&self, branch: NewBranch) -> Result<Branch, BranchesServiceError>;

    /// Updates a branch with the given details.
    async fn update_branch(
        &self,
        branch: BranchUuid,
        update: BranchUpdate,
    ) -> Result<Branch, BranchesServiceError>;

    /// Deletes a branch with the given UUID.
    async fn delete_branch(&self, branch: BranchUuid) -> Result<(), BranchesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn lahore_branch() -> NewBranch {
        NewBranch {
            uuid: BranchUuid::new(),
            name: "Gulberg".to_string(),
            address: Some("12-B Main Boulevard".to_string()),
            city: Some("Lahore".to_string()),
            phone: Some("042-111-222".to_string()),
            is_main: true,
        }
    }

    #[tokio::test]
    async fn create_branch_returns_created_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let new = lahore_branch();

        let branch = ctx.branches.create_branch(new.clone()).await?;

        assert_eq!(branch.uuid, new.uuid);
        assert_eq!(branch.name, new.name);
        assert!(branch.is_main);

        Ok(())
    }

    #[tokio::test]
    async fn get_branch_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.branches.get_branch(BranchUuid::new()).await;

        assert!(
            matches!(result, Err(BranchesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_branches_puts_main_branch_first() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.branches
            .create_branch(NewBranch {
                uuid: BranchUuid::new(),
                name: "Airport Road".to_string(),
                address: None,
                city: Some("Peshawar".to_string()),
                phone: None,
                is_main: false,
            })
            .await?;

        ctx.branches.create_branch(lahore_branch()).await?;

        let branches = ctx.branches.list_branches().await?;
        let first = branches.first().ok_or("no branches listed")?;

        assert_eq!(branches.len(), 2);
        assert!(first.is_main, "main branch should sort first");

        Ok(())
    }

    #[tokio::test]
    async fn update_branch_reflects_new_details() -> TestResult {
        let ctx = TestContext::new().await;

        let branch = ctx.branches.create_branch(lahore_branch()).await?;

        let updated = ctx
            .branches
            .update_branch(
                branch.uuid,
                BranchUpdate {
                    name: "Gulberg III".to_string(),
                    address: branch.address.clone(),
                    city: branch.city.clone(),
                    phone: None,
                    is_main: false,
                },
            )
            .await?;

        assert_eq!(updated.name, "Gulberg III");
        assert_eq!(updated.phone, None);
        assert!(!updated.is_main);

        Ok(())
    }

    #[tokio::test]
    async fn delete_branch_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let branch = ctx.branches.create_branch(lahore_branch()).await?;

        ctx.branches.delete_branch(branch.uuid).await?;

        let result = ctx.branches.get_branch(branch.uuid).await;

        assert!(
            matches!(result, Err(BranchesServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_branch_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.branches.delete_branch(BranchUuid::new()).await;

        assert!(
            matches!(result, Err(BranchesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
