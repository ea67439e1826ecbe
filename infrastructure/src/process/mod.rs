//! Process execution: the only place a child process is started.
//!
//! - [`allow_list`]: logical executable name to absolute path
//! - [`gateway`]: [`ProcessCommandGateway`], the
//!   [`CommandGatewayPort`](simbridge_application::CommandGatewayPort) adapter

pub mod allow_list;
pub mod gateway;

pub use allow_list::{AllowList, AllowListError, ExecutableStatus};
pub use gateway::ProcessCommandGateway;
