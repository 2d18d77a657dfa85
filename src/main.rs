#[cfg(not(feature = "cli"))]
compile_error!("The `sql2csv` binary requires the `cli` feature. Build with `--features cli`.");

use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::process;
use std::sync::Arc;

use sqlcsv::cli;
use sqlcsv::cli::app::{Cli, ColorMode, Commands};
use sqlcsv::util::audit::AuditLogger;
use sqlcsv::SqlCsvError;

fn main() {
    let cli = Cli::parse();

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {} // colored auto-detects tty
    }

    let writer_result: Result<Box<dyn Write>, SqlCsvError> = match &cli.output {
        Some(path) => File::create(path)
            .map(|f| Box::new(f) as Box<dyn Write>)
            .map_err(|e| SqlCsvError::Io(format!("Cannot create {}: {}", path, e))),
        None => Ok(Box::new(std::io::stdout()) as Box<dyn Write>),
    };

    let mut writer = match writer_result {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Create audit logger if --audit-log was specified
    let audit_logger: Option<Arc<AuditLogger>> = match &cli.audit_log {
        Some(path) => {
            let logger = match AuditLogger::open(path) {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };
            let args: Vec<String> = std::env::args().collect();
            let _ = logger.start_session(args);
            Some(Arc::new(logger))
        }
        None => None,
    };

    let result = match cli.command {
        Commands::Convert {
            file,
            format,
            output_dir,
            require_schema,
            progress,
            verbose,
        } => cli::convert::execute(
            &cli::convert::ConvertOptions {
                file,
                format,
                output_dir,
                require_schema,
                progress,
                verbose,
                audit_logger: audit_logger.clone(),
            },
            &mut writer,
        ),

        Commands::Columns { file, json } => {
            cli::columns::execute(&cli::columns::ColumnsOptions { file, json }, &mut writer)
        }

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "sql2csv", &mut std::io::stdout());
            Ok(())
        }
    };

    let result = result.and_then(|()| {
        writer
            .flush()
            .map_err(|e| SqlCsvError::Io(format!("Cannot flush output: {}", e)))
    });

    // End audit session if logger was created
    if let Some(ref logger) = audit_logger {
        let _ = logger.end_session();
    }

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
