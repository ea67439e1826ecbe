//! Stdio JSON-RPC dispatch server exposing the tool registry.

pub mod handler;
pub mod protocol;
pub mod stdio;

pub use handler::{PROTOCOL_VERSION, RequestHandler};
pub use protocol::{JsonRpcRequest, JsonRpcResponse, RpcError};
pub use stdio::{MAX_FRAME_BYTES, ServerError, run};
