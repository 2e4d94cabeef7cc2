use bakelint::{BakelintError, Orchestrator};
use bakelint_core::{Diagnostic, LintConfig, SourceKind};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "bakelint [--config FILE] [--build] FILE...";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    build: bool,
    files: Vec<PathBuf>,
}

impl Args {
    fn parse(raw: impl IntoIterator<Item = String>) -> Result<Self, BakelintError> {
        let mut args = Args::default();
        let mut raw = raw.into_iter();
        while let Some(arg) = raw.next() {
            match arg.as_str() {
                "--config" => {
                    let path = raw.next().ok_or_else(|| usage("--config needs a file"))?;
                    args.config = Some(PathBuf::from(path));
                }
                "--build" => args.build = true,
                "-h" | "--help" => return Err(BakelintError::Usage(USAGE.to_string())),
                flag if flag.starts_with('-') => {
                    return Err(usage(&format!("unknown flag {flag}")));
                }
                _ => args.files.push(PathBuf::from(arg)),
            }
        }
        if args.files.is_empty() && !args.build {
            return Err(BakelintError::Usage(USAGE.to_string()));
        }
        Ok(args)
    }
}

fn usage(detail: &str) -> BakelintError {
    BakelintError::Usage(format!("{detail}\n{USAGE}"))
}

fn kind_of(path: &Path) -> Result<SourceKind, BakelintError> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(SourceKind::from_extension)
        .ok_or_else(|| BakelintError::UnknownSourceKind(path.to_path_buf()))
}

fn print_diagnostic(path: &Path, diagnostic: &Diagnostic) {
    let code = diagnostic.code.as_deref().unwrap_or("-");
    match diagnostic.line {
        Some(line) => println!(
            "{}:{}: {}[{}]: {}",
            path.display(),
            line,
            diagnostic.severity,
            code,
            diagnostic.message
        ),
        None => println!(
            "{}: {}[{}]: {}",
            path.display(),
            diagnostic.severity,
            code,
            diagnostic.message
        ),
    }
}

fn run(args: Args) -> Result<bool, BakelintError> {
    let config = match &args.config {
        Some(path) => LintConfig::load(path)?,
        None => LintConfig::default(),
    };
    let mut orchestrator = Orchestrator::new(config);
    let mut failed = false;

    for path in &args.files {
        let kind = kind_of(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| BakelintError::Read {
            path: path.clone(),
            source,
        })?;
        let result = orchestrator.set_source(kind, text);
        for diagnostic in result {
            print_diagnostic(path, diagnostic);
        }
        failed |= result.has_errors();
    }

    if args.build {
        let report = orchestrator.run_build();
        print!("{report}");
        failed |= !report.succeeded();
    }

    Ok(failed)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = match Args::parse(env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("bakelint: {err}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, BakelintError> {
        Args::parse(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn test_parse_flags_and_files() {
        let args = parse(&["--config", "lint.yml", "main.c", "--build", "app.muf"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("lint.yml")));
        assert!(args.build);
        assert_eq!(
            args.files,
            vec![PathBuf::from("main.c"), PathBuf::from("app.muf")]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse(&[]), Err(BakelintError::Usage(_))));
        assert!(matches!(parse(&["--config"]), Err(BakelintError::Usage(_))));
        assert!(matches!(
            parse(&["--fix", "a.c"]),
            Err(BakelintError::Usage(_))
        ));
        assert!(parse(&["--build"]).is_ok());
    }

    #[test]
    fn test_kind_from_path() {
        assert_eq!(kind_of(Path::new("src/main.c")).unwrap(), SourceKind::C);
        assert_eq!(
            kind_of(Path::new("app.steelconf")).unwrap(),
            SourceKind::Buildconf
        );
        assert!(matches!(
            kind_of(Path::new("README")),
            Err(BakelintError::UnknownSourceKind(_))
        ));
    }
}
