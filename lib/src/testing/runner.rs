use core::ffi::c_int;

use crate::klog_info;
use crate::testing::TestResult;

/// Run a single `fn() -> c_int` test, logging its name on failure.
pub fn run_single_test(name: &str, f: impl FnOnce() -> c_int) -> TestResult {
    if f() == 0 {
        TestResult::Pass
    } else {
        klog_info!("TEST FAIL: {}", name);
        TestResult::Fail
    }
}
