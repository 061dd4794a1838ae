use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use lending_report_pdf::{Assets, Layout, RenderOptions, ReportKind, convert_report_file};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    /// Title, labelled fields and free-form tables
    Generic,
    /// Group lending assessment with member loans and balance validation
    Group,
    /// One-page loan summary
    Summary,
}

impl From<Kind> for ReportKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Generic => ReportKind::Generic,
            Kind::Group => ReportKind::Group,
            Kind::Summary => ReportKind::Summary,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Compose paginated lending reports as PDF")]
struct Args {
    #[arg(value_enum)]
    kind: Kind,

    /// JSON input document
    input: PathBuf,

    /// PDF to write
    output: PathBuf,

    /// Append a repayment schedule for every loan (group reports)
    #[arg(long)]
    schedules: bool,

    /// JSON file overriding layout constants, palette and branding
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Logo image; falls back to LENDING_REPORT_LOGO
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Watermark image; falls back to LENDING_REPORT_WATERMARK
    #[arg(long)]
    watermark: Option<PathBuf>,
}

fn run(args: &Args) -> lending_report_pdf::Result<()> {
    let layout = match &args.layout {
        Some(path) => Layout::from_json_file(path)?,
        None => Layout::default(),
    };
    let assets = Assets::load(args.logo.as_deref(), args.watermark.as_deref())?;
    let options = RenderOptions {
        layout,
        assets,
        include_schedules: args.schedules,
    };
    convert_report_file(args.kind.into(), &args.input, &args.output, &options)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => {
            log::info!("Wrote {}", args.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
