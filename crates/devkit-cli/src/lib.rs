use devkit_core::{DevkitError, ErrorKind};

pub mod cmd;
pub mod output;
pub mod prompt;
pub mod root;

/// Install the stderr `tracing` subscriber. `RUST_LOG` directives take
/// precedence; otherwise the default level is WARN, or DEBUG with `verbose`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse arguments, exiting 1 on usage errors (clap's default is 2).
pub fn parse_args<P: clap::Parser>() -> P {
    P::try_parse().unwrap_or_else(|e| {
        if e.use_stderr() {
            let _ = e.print();
            std::process::exit(1);
        }
        e.exit()
    })
}

/// Print the full error chain and exit 1, or return normally on success.
pub fn exit_on_error(result: anyhow::Result<()>) {
    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        let usage = e
            .downcast_ref::<DevkitError>()
            .is_some_and(|d| d.kind() == ErrorKind::Usage);
        if usage {
            eprintln!("Run with --help for usage.");
        }
        std::process::exit(1);
    }
}
