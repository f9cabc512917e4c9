use anyhow::Result;
use chrono::Local;
use cleanup_logs::{
    params::{self, Invocation, ParamError},
    print_summary, sweep, ErrorPolicy, RetentionCutoff, SweepOptions,
};
use std::process;

fn exit_with(err: ParamError) -> ! {
    match err {
        ParamError::Clap(err) => err.exit(),
        other => {
            println!("{}", other);
            process::exit(other.exit_code());
        }
    }
}

fn main() -> Result<()> {
    let invocation: Invocation = match params::resolve(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(err) => exit_with(err),
    };

    if let Err(err) = params::verify_directory_exists(&invocation.directory) {
        exit_with(err);
    }

    let cutoff = RetentionCutoff::from_local(Local::now(), invocation.retention_days);
    let options = SweepOptions {
        verbose: invocation.verbose,
        error_policy: if invocation.keep_going {
            ErrorPolicy::Continue
        } else {
            ErrorPolicy::Abort
        },
    };

    let report = sweep(
        &invocation.directory,
        cutoff,
        &invocation.protected_items,
        options,
    )?;

    print_summary(&report.deleted);

    if !report.failures.is_empty() {
        eprintln!("{} file(s) could not be processed", report.failures.len());
        process::exit(1);
    }

    Ok(())
}
