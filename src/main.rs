use std::fs;
use std::io::Read;
use std::process::ExitCode;

use clap::Parser as _;
use owo_colors::OwoColorize;

use egglet::cli::{self, AppConfig, Args, Commands};
use egglet::diagnostic::DiagnosticRenderer;
use egglet::format;
use egglet::interpreter::{self, Interpreter};

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(Commands::Complete { shell }) = args.command {
        cli::generate_completions(shell);
        return ExitCode::SUCCESS;
    }

    let config = AppConfig::from_args(&args);

    let (source, origin) = match read_source(&args) {
        Ok(pair) => pair,
        Err(message) => {
            if config.color_enabled {
                eprintln!("{} {}", "error:".red().bold(), message);
            } else {
                eprintln!("error: {}", message);
            }
            return ExitCode::FAILURE;
        }
    };

    if config.verbose {
        if let Ok(program) = interpreter::parse(&source) {
            let dump = format!("{:#?}", program);
            if config.color_enabled {
                eprintln!("{}", dump.dimmed());
            } else {
                eprintln!("{}", dump);
            }
        }
    }

    match Interpreter::new().run(&source) {
        Ok(value) => {
            println!("{}", format::display_value(&value));
            ExitCode::SUCCESS
        }
        Err(err) => {
            let renderer = DiagnosticRenderer::new(&source, &origin, config.color_enabled);
            eprint!("{}", renderer.render(&err.to_diagnostic()));
            ExitCode::FAILURE
        }
    }
}

fn read_source(args: &Args) -> Result<(String, String), String> {
    if let Some(program) = &args.program {
        return Ok((program.clone(), "<program>".to_string()));
    }
    if let Some(path) = &args.file {
        let text = fs::read_to_string(path)
            .map_err(|err| format!("cannot read {}: {}", path.display(), err))?;
        return Ok((text, path.display().to_string()));
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("cannot read stdin: {}", err))?;
    Ok((buffer, "<stdin>".to_string()))
}
