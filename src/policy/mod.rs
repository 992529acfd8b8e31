//! 访问控制
//!
//! - `access`：按路径前缀声明可访问的角色
//! - `visibility`：按 (资源, 角色) 声明记录可见范围
//! - `query`：将查询参数映射为列表筛选条件

pub mod access;
pub mod query;
pub mod visibility;

pub use access::{allowed_roles, may_mutate, mutating_roles};
pub use query::{ListFilter, ListParams};
pub use visibility::{Predicate, Resource, Viewer, Visibility, predicate_for};
