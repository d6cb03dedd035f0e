pub mod application_master;
pub mod auth;
pub mod cli;
pub mod client;
pub mod constants;
pub mod endpoint;
pub mod error;
pub mod hadoop_conf;
pub mod history_server;
pub mod logging;
pub mod node_manager;
pub mod resource_manager;

pub use crate::application_master::ApplicationMaster;
pub use crate::auth::{Authenticator, SimpleAuth};
pub use crate::client::{ApiClient, ApiRequest, Response};
pub use crate::endpoint::Endpoint;
pub use crate::error::Error;
pub use crate::history_server::HistoryServer;
pub use crate::node_manager::NodeManager;
pub use crate::resource_manager::ResourceManager;
