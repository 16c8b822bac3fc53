use async_trait::async_trait;

use crate::error::ApplicationResult;

/// A single application operation.
#[async_trait]
pub trait UseCase: Send + Sync {
    type Input: Send;
    type Output;

    async fn execute(&self, input: Self::Input) -> ApplicationResult<Self::Output>;
}
