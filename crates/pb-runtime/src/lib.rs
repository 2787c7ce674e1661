//! # pb-runtime
//!
//! Runtime data shared by the checker, the emitter, and the VM:
//! - `value` - the primitive runtime values
//! - `pending` - one-shot completion channel for async externals
//! - `external` - host function registry keyed by signature
//! - `stdlib` - the standard externals (`print`, `alert`, `toString`, ...)

pub mod external;
pub mod pending;
pub mod stdlib;
pub mod value;

pub use external::{Callback, ExternalFunction, ExternalParam, ExternalRegistry};
pub use pending::{Completer, Pending};
pub use stdlib::{register_std, StdHost};
pub use value::Value;
