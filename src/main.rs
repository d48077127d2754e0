use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{bail, WrapErr};
use parse_display::{Display, FromStr};
use tracing_subscriber::EnvFilter;

mod convert;
mod error;
mod format;
mod parse;

/// Packs whitespace-separated integer pairs into little-endian i32 records
#[derive(Parser)]
#[clap(version)]
struct App {
    /// `convert` a text workload, or `dump` a packed file as text
    kind: Kind,

    /// Text workload to read (`convert`), or packed file to print (`dump`)
    #[clap(parse(from_os_str))]
    input: Option<PathBuf>,

    /// Where packed records are written (`convert` only)
    #[clap(parse(from_os_str))]
    output: Option<PathBuf>,
}

#[derive(Display, FromStr, PartialEq, Debug, Clone, Copy)]
#[display(style = "snake_case")]
enum Kind {
    Convert,
    Dump,
}

const DEFAULT_INPUT: &str = "workload.txt";
const DEFAULT_OUTPUT: &str = "output_file.bin";

#[tokio::main]
async fn main() -> Result<(), color_eyre::Report> {
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let app = App::parse();
    match app.kind {
        Kind::Convert => {
            let input = app.input.unwrap_or_else(|| DEFAULT_INPUT.into());
            let output = app.output.unwrap_or_else(|| DEFAULT_OUTPUT.into());
            convert::convert(&input, &output).await.wrap_err_with(|| {
                format!(
                    "converting {} into {}",
                    input.display(),
                    output.display()
                )
            })?;
        }
        Kind::Dump => {
            if let Some(output) = app.output {
                bail!("dump writes to stdout, unexpected {}", output.display());
            }
            let input = app.input.unwrap_or_else(|| DEFAULT_OUTPUT.into());
            convert::dump(&input, tokio::io::stdout())
                .await
                .wrap_err_with(|| format!("dumping {}", input.display()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_snake_case() {
        assert_eq!("convert".parse::<Kind>().unwrap(), Kind::Convert);
        assert_eq!("dump".parse::<Kind>().unwrap(), Kind::Dump);
        assert_eq!(Kind::Dump.to_string(), "dump");
        assert!("Convert".parse::<Kind>().is_err());
    }

    #[test]
    fn paths_are_optional() {
        let app = App::try_parse_from(["pairpack", "convert"]).unwrap();
        assert_eq!(app.kind, Kind::Convert);
        assert!(app.input.is_none() && app.output.is_none());

        let app = App::try_parse_from(["pairpack", "convert", "in.txt", "out.bin"]).unwrap();
        assert_eq!(app.input, Some(PathBuf::from("in.txt")));
        assert_eq!(app.output, Some(PathBuf::from("out.bin")));
    }
}
