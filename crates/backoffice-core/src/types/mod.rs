//! Validated value types shared by every layer.

mod api_url;
mod query;
mod request;
mod status;

pub use api_url::ApiUrl;
pub use query::{DEFAULT_PAGE_SIZE, ListQuery, Page};
pub use request::{ApiRequest, HttpMethod};
pub use status::{ProcessStatus, RecordStatus};
