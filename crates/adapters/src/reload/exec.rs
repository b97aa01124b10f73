// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::os::unix::process::CommandExt;
use std::process::Command;

/// Replace the current process image with a fresh copy of the same
/// executable and arguments.
///
/// Only returns on failure.
pub fn restart_current_process() -> std::io::Error {
    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => return e,
    };
    tracing::info!(exe = %exe.display(), "restarting process");
    Command::new(exe).args(std::env::args_os().skip(1)).exec()
}
