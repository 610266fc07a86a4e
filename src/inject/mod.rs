//! Remote code injection: stub construction and remote invocation

mod injector;
mod stub;

pub use injector::{CodeInjector, PreparedCall};
pub use stub::{RemoteCallStub, X86StdcallPairStub};
