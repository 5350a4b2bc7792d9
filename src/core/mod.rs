//! 核心层：错误、校验、响应和中间件

pub mod error;
pub mod middleware;
pub mod response;
pub mod validation;
