//!
//! memeforge -- Meme captions in the shell
//!

             extern crate clap;
             extern crate exitcode;
#[macro_use] extern crate lazy_static;
             extern crate memeforge;
#[macro_use] extern crate serde_json;
             extern crate slog;
             extern crate slog_async;
             extern crate slog_envlogger;
             extern crate slog_scope;
             extern crate slog_stdlog;
             extern crate slog_term;
             extern crate thiserror;

#[cfg(test)] #[macro_use] extern crate speculoos;

// `log` must be at the end of these declarations so that its macros
// are the ones used throughout the crate.
#[macro_use] extern crate log;


mod args;
mod logging;


use std::env;
use std::io::{self, Write};
use std::process::exit;

use memeforge::{CaptionError, Engine, EngineBuilder, ErrorKind, RenderedImage, TemplateRegistry};
use serde_json::Value;

use crate::args::{ArgsError, Command, Options};


lazy_static! {
    /// Application / package name, as filled out by Cargo.
    static ref NAME: &'static str = option_env!("CARGO_PKG_NAME").unwrap_or("memeforge");

    /// Application version, as filled out by Cargo.
    static ref VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

    /// Git revision that the application was built from, if known.
    static ref REVISION: Option<&'static str> = Some(
        include_str!(concat!(env!("OUT_DIR"), "/revision")).trim()
    ).filter(|r| !r.is_empty());
}


fn main() {
    let opts = args::parse().unwrap_or_else(|e| {
        print_args_error(e).unwrap_or(());
        exit(exitcode::USAGE);
    });

    let code = {
        let _guard = logging::init(opts.verbosity).unwrap_or_else(|e| {
            writeln!(&mut io::stderr(), "Failed to initialize logging: {}", e).unwrap_or(());
            exit(exitcode::SOFTWARE);
        });
        if cfg!(debug_assertions) {
            warn!("Debug mode! The program will likely be much slower.");
        }
        debug!("{} {} (revision: {})",
            *NAME, VERSION.unwrap_or("<UNKNOWN>"), REVISION.unwrap_or("<UNKNOWN>"));
        for (i, arg) in env::args().enumerate() {
            debug!("argv[{}] = {:?}", i, arg);
        }
        trace!("Options parsed from argv:\n{:#?}", opts);

        run(opts)
    };  // dropping the guard flushes the logs
    exit(code);
}

/// Print an error that may occur while parsing arguments.
fn print_args_error(e: ArgsError) -> io::Result<()> {
    match e {
        // In case of generic parse error (or --help / --version),
        // clap knows best what to print and how to exit.
        ArgsError::Parse(e) => e.exit(),
        e => writeln!(&mut io::stderr(), "Failed to parse arguments: {}", e),
    }
}


/// Execute the command given in the options, printing the JSON result.
/// Returns the program's exit code.
fn run(opts: Options) -> exitcode::ExitCode {
    let engine = match build_engine(&opts) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Failed to set up the rendering engine: {}", e);
            print_json(&failure("config", &e.to_string()));
            return exitcode::CONFIG;
        }
    };

    match opts.command {
        Command::List => {
            let memes = engine.registry().templates();
            info!("Listing {} template(s)", memes.len());
            print_json(&json!({"success": true, "data": {"memes": memes}}));
            exitcode::OK
        }
        Command::Render(request) => match engine.render(request) {
            Ok(meme) => {
                info!("Meme rendered to {}", meme.path().display());
                print_json(&success(&meme));
                exitcode::OK
            }
            Err(e) => {
                error!("Error while rendering meme: {}", e);
                print_json(&failure(e.kind().as_str(), &e.to_string()));
                exit_code_for(&e)
            }
        },
    }
}

fn build_engine(opts: &Options) -> Result<Engine, memeforge::EngineBuildError> {
    EngineBuilder::new()
        .registry_file(&opts.registry)
        .image_root(&opts.images)
        .font_directory(&opts.fonts)
        .system_fonts(opts.system_fonts)
        .strict_fonts(opts.strict_fonts)
        .horizontal_anchor(opts.anchor)
        .output_directory(&opts.output)
        .build()
}


fn success(meme: &RenderedImage) -> Value {
    json!({
        "success": true,
        "data": {
            "url": meme.path().display().to_string(),
            "filename": meme.filename(),
            "mime_type": meme.mime_type().map(|m| m.to_string()),
            "width": meme.width(),
            "height": meme.height(),
            "boxes": meme.boxes(),
        },
    })
}

fn failure(kind: &str, message: &str) -> Value {
    json!({
        "success": false,
        "error": {"kind": kind, "message": message},
    })
}

fn print_json(value: &Value) {
    let mut stdout = io::stdout();
    writeln!(stdout, "{:#}", value).unwrap_or_else(|e| {
        error!("Failed to write the result to standard output: {}", e);
    });
}

fn exit_code_for(error: &CaptionError) -> exitcode::ExitCode {
    match error.kind() {
        ErrorKind::NotFound | ErrorKind::Validation | ErrorKind::Format => exitcode::DATAERR,
        ErrorKind::Load => exitcode::NOINPUT,
        ErrorKind::FontResolution => exitcode::UNAVAILABLE,
        ErrorKind::Render => match *error {
            CaptionError::Output{..} => exitcode::CANTCREAT,
            _ => exitcode::SOFTWARE,
        },
    }
}


#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use memeforge::CaptionError;
    use super::{exit_code_for, failure};

    #[test]
    fn failure_envelope() {
        let value = failure("not-found", "template `42` not found");
        assert_eq!(false, value["success"]);
        assert_eq!("not-found", value["error"]["kind"]);
        assert_eq!("template `42` not found", value["error"]["message"]);
    }

    #[test]
    fn exit_codes() {
        assert_eq!(exitcode::DATAERR, exit_code_for(&CaptionError::NotFound("42".into())));
        assert_eq!(exitcode::DATAERR, exit_code_for(&CaptionError::Format("no ||".into())));
        assert_eq!(exitcode::SOFTWARE, exit_code_for(&CaptionError::Render("oops".into())));
        assert_eq!(exitcode::CANTCREAT, exit_code_for(&CaptionError::Output{
            path: PathBuf::from("out"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        }));
    }
}
