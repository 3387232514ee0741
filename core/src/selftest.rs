//! In-kernel test runner.
//!
//! Every crate in this workspace carries `test = false` -- there is no
//! hosted `cargo test` entry point, only this harness, run booted under
//! QEMU. Each `*_tests.rs` module registers a [`TestSuiteDesc`] via
//! [`rtcsched_lib::define_test_suite`]; this module just calls them in a
//! fixed order and folds the results into one [`TestRunSummary`], rather
//! than scanning a linker-section registry. Panic recovery, stacktrace
//! demos, and suite masks belong to a whole-OS test harness this
//! subsystem does not need.

use rtcsched_lib::klog_info;
use rtcsched_lib::testing::{TestRunSummary, TestSuiteDesc};

use crate::api_tests::API_BOUNDARIES_SUITE_DESC;
use crate::cmos_tests::CMOS_SUITE_DESC;
use crate::id_alloc_tests::ID_ALLOC_SUITE_DESC;
use crate::timer_list_tests::TIMER_LIST_SUITE_DESC;

const SUITES: &[&TestSuiteDesc] = &[
    &CMOS_SUITE_DESC,
    &ID_ALLOC_SUITE_DESC,
    &TIMER_LIST_SUITE_DESC,
    &API_BOUNDARIES_SUITE_DESC,
];

/// Run every registered suite and log a one-line summary per suite plus a
/// final totals line. Returns `true` iff every suite passed.
pub fn run_all() -> bool {
    let mut summary = TestRunSummary::default();

    for desc in SUITES {
        let Some(run) = desc.run else { continue };
        let mut result = rtcsched_lib::testing::TestSuiteResult::default();
        let _ = run(core::ptr::null(), &mut result as *mut _);
        klog_info!(
            "selftest: {} {}/{} passed ({} ms)",
            suite_name(desc),
            result.passed,
            result.total,
            result.elapsed_ms
        );
        summary.add_suite_result(&result);
    }

    klog_info!(
        "selftest: {}/{} tests passed across {} suites",
        summary.passed,
        summary.total_tests,
        SUITES.len()
    );
    summary.all_passed()
}

fn suite_name(desc: &TestSuiteDesc) -> &'static str {
    // SAFETY: every descriptor's `name` is a NUL-terminated, 'static byte
    // string produced by `define_test_suite!` from a Rust identifier, so it
    // is always valid UTF-8 with no interior NUL.
    unsafe {
        let cstr = core::ffi::CStr::from_ptr(desc.name);
        cstr.to_str().unwrap_or("<unnamed>")
    }
}
