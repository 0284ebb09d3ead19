// ABOUTME: Tool module - the calling convention shared with the agent framework.
// ABOUTME: Defines the Tool trait and the ToolResult it produces.

mod result;
mod traits;

pub use result::*;
pub use traits::*;
