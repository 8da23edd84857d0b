pub mod cookie;
pub mod interceptor;
