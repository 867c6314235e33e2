mod api;
mod pagination;

pub use self::api::{ApiResponse, ApiResponsePagination};
pub use self::pagination::Pagination;
