pub mod auth_api;
pub mod chat_api;
pub mod config;
pub mod task_api;
pub mod token;

mod http;

pub use auth_api::AuthApi;
pub use chat_api::ChatApi;
pub use config::ApiConfig;
pub use task_api::HttpTaskRepository;
