pub mod hook_name;
pub mod invocation;

pub use hook_name::HookName;
pub use invocation::HookInvocation;
