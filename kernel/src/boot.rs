//! Limine protocol glue.
//!
//! This kernel only needs to prove it was handed control in 64-bit long mode
//! with a working stack -- it has no framebuffer, no memory map consumer (the
//! scheduler core never touches the heap; see `rtcsched_core::pool`), and no
//! SMP. So the request list is the minimal one any Limine kernel must carry:
//! a base revision marker the bootloader checks before calling the entry
//! point at all.
//!
//! A fuller kernel built around the same bootloader declares the same
//! start/end section markers around a much larger request list
//! (framebuffer, memory map, RSDP, MP, ...) this subsystem has no use for.

use limine::BaseRevision;

#[used]
#[unsafe(link_section = ".limine_requests_start_marker")]
static LIMINE_REQUESTS_START_MARKER: [u64; 1] = [0];

#[used]
#[unsafe(link_section = ".limine_requests")]
static BASE_REVISION: BaseRevision = BaseRevision::new();

#[used]
#[unsafe(link_section = ".limine_requests_end_marker")]
static LIMINE_REQUESTS_END_MARKER: [u64; 1] = [0];

/// Must be checked before touching anything the protocol promises -- an
/// unsupported revision means the bootloader may not have set up the
/// environment this kernel assumes.
pub fn ensure_base_revision_supported() {
    assert!(BASE_REVISION.is_supported());
}
