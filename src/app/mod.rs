pub mod service;

pub use service::AgentService;
