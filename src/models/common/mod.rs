pub mod action;
pub mod error_code;
pub mod listing;
pub mod pagination;
pub mod response;

pub use action::{ActionState, FormMode};
pub use error_code::ErrorCode;
pub use listing::ListPage;
pub use pagination::{PageRequest, PaginatedResponse, PaginationInfo};
pub use response::ApiResponse;
