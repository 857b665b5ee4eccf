//! Anything a list controller can page through.

use async_trait::async_trait;

use crate::Result;
use crate::types::{ListQuery, Page};

#[async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch(&self, query: &ListQuery) -> Result<Page<T>>;
}
