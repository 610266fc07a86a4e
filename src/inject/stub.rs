//! Relocatable call stubs for remote invocation
//!
//! A stub is the tiny preamble written into the target process: the remote
//! thread hands it one pointer (its sole parameter), the stub loads the
//! marshaled fields out of that record onto the callee's convention and
//! calls a fixed absolute address through a patched relative displacement.
//! The technique generalizes to any remote function reachable with zero or
//! one record argument; only the template bytes are convention-specific.

use crate::core::types::Address;

/// One calling-convention/architecture variant of the call stub.
///
/// Orchestration (argument marshaling, thread launch, join) stays
/// independent of the exact byte sequence behind this trait.
pub trait RemoteCallStub {
    /// Template machine code with a zeroed call displacement
    fn template(&self) -> &[u8];

    /// Byte offset of the 4-byte call operand inside the template
    fn patch_offset(&self) -> usize;

    /// Offset of the first instruction after the call; relative call
    /// displacements are measured from there
    fn return_site_offset(&self) -> usize;

    /// Size of the argument record the stub dereferences
    fn arg_record_len(&self) -> usize;

    /// Marshals one coordinate pair into the argument record
    fn pack_args(&self, x: i32, y: i32) -> Vec<u8>;

    /// Template with the call displacement patched for a concrete placement:
    /// operand = target - (stub_base + return_site_offset), little-endian
    fn materialize(&self, stub_base: Address, target: Address) -> Vec<u8> {
        let mut code = self.template().to_vec();
        let origin = stub_base.as_usize().wrapping_add(self.return_site_offset());
        let displacement = target.as_usize().wrapping_sub(origin) as u32;
        let patch = self.patch_offset();
        code[patch..patch + 4].copy_from_slice(&displacement.to_le_bytes());
        code
    }
}

/// x86 stub for a two-int stdcall callee, fed through a pointer-to-record
/// thread parameter.
pub struct X86StdcallPairStub;

impl X86StdcallPairStub {
    // push ebp; mov ebp, esp          - frame setup
    // mov eax, [ebp+8]; mov ecx, [eax+4]; push ecx   - second field (y)
    // mov edx, [ebp+8]; mov eax, [edx]; push eax     - first field (x)
    // call rel32                      - displacement patched at runtime
    // pop ebp; ret
    const TEMPLATE: [u8; 23] = [
        0x55, 0x8B, 0xEC, 0x8B, 0x45, 0x08, 0x8B, 0x48, 0x04, 0x51, 0x8B, 0x55, 0x08, 0x8B, 0x02,
        0x50, 0xE8, 0x00, 0x00, 0x00, 0x00, 0x5D, 0xC3,
    ];
    const CALL_OPERAND_OFFSET: usize = 0x11;
    const RETURN_SITE_OFFSET: usize = 0x15;
}

impl RemoteCallStub for X86StdcallPairStub {
    fn template(&self) -> &[u8] {
        &Self::TEMPLATE
    }

    fn patch_offset(&self) -> usize {
        Self::CALL_OPERAND_OFFSET
    }

    fn return_site_offset(&self) -> usize {
        Self::RETURN_SITE_OFFSET
    }

    fn arg_record_len(&self) -> usize {
        8
    }

    fn pack_args(&self, x: i32, y: i32) -> Vec<u8> {
        let mut record = Vec::with_capacity(8);
        record.extend_from_slice(&x.to_le_bytes());
        record.extend_from_slice(&y.to_le_bytes());
        record
    }
}
