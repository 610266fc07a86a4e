//! Remote invocation of a target-process function
//!
//! The lifecycle is: allocate a code region and an argument region, write
//! the patched stub once, then per invocation write the argument record,
//! launch a remote thread at the stub and join it before touching the
//! record again. The join must happen before the next invocation or the
//! release: the remote thread reads the argument region, and freeing it
//! early would race that read. Both regions are owned by the prepared call
//! and released whenever it goes out of scope, error paths included.

use std::time::Duration;

use tracing::{debug, warn};

use crate::core::types::{Address, MemoryResult};
use crate::memory::{JoinOutcome, Protection, RemoteProcess, RemoteRegion};

use super::stub::RemoteCallStub;

/// Stages call stubs into a target process
pub struct CodeInjector<'p, P: RemoteProcess + ?Sized> {
    process: &'p P,
    timeout: Duration,
}

impl<'p, P: RemoteProcess + ?Sized> CodeInjector<'p, P> {
    pub fn new(process: &'p P, timeout: Duration) -> Self {
        CodeInjector { process, timeout }
    }

    /// Allocates both regions and writes the stub patched to call `target`.
    /// On any failure, regions allocated so far are released before the
    /// error propagates.
    pub fn prepare<'s>(
        &self,
        stub: &'s dyn RemoteCallStub,
        target: Address,
    ) -> MemoryResult<PreparedCall<'p, 's, P>> {
        let code = RemoteRegion::alloc(
            self.process,
            stub.template().len(),
            Protection::ExecuteReadWrite,
        )?;
        let args = RemoteRegion::alloc(self.process, stub.arg_record_len(), Protection::ReadWrite)?;

        let patched = stub.materialize(code.address(), target);
        self.process.write_bytes(code.address(), &patched)?;

        debug!(
            "call stub for {} staged at {} (arguments at {})",
            target,
            code.address(),
            args.address()
        );

        Ok(PreparedCall {
            process: self.process,
            stub,
            code,
            args,
            timeout: self.timeout,
        })
    }
}

/// A stub staged in the target, ready to be invoked repeatedly with fresh
/// arguments. Dropping it releases both remote regions.
pub struct PreparedCall<'p, 's, P: RemoteProcess + ?Sized> {
    process: &'p P,
    stub: &'s dyn RemoteCallStub,
    code: RemoteRegion<'p, P>,
    args: RemoteRegion<'p, P>,
    timeout: Duration,
}

impl<P: RemoteProcess + ?Sized> PreparedCall<'_, '_, P> {
    /// Writes one coordinate record and runs the stub in a remote thread,
    /// blocking until it finishes or the timeout elapses. A timeout is a
    /// safety valve, not a correctness guarantee: it is logged and the call
    /// is treated as done.
    pub fn invoke(&self, x: i32, y: i32) -> MemoryResult<()> {
        let record = self.stub.pack_args(x, y);
        self.process.write_bytes(self.args.address(), &record)?;

        let outcome =
            self.process
                .spawn_and_wait(self.code.address(), self.args.address(), self.timeout)?;
        if outcome == JoinOutcome::TimedOut {
            warn!(
                "remote thread at {} did not finish within {:?}, proceeding",
                self.code.address(),
                self.timeout
            );
        }
        Ok(())
    }

    pub fn code_address(&self) -> Address {
        self.code.address()
    }

    pub fn args_address(&self) -> Address {
        self.args.address()
    }
}
