use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use resume_pdf::ExportConfig;
use tracing_subscriber::EnvFilter;

/// Exports the résumé of a markdown personal site.
///
/// Fonts are looked up under `assets/fonts` next to the binary or the `resume_pdf` crate, or in
/// the directory named by `RESUME_FONTS_DIR`. A system DejaVu Sans or Arial family is used when
/// none is found.
#[derive(Parser)]
#[command(author, version, about = "Export a site's markdown content as a résumé")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the résumé fields and render them to a PDF.
    Pdf(ExportArgs),

    /// Concatenate the markdown content and convert it to a standalone HTML page.
    Html(ExportArgs),
}

#[derive(Args)]
struct ExportArgs {
    /// Site root that holds `_pages`, `_experience`, `_awards` and `_publications`.
    #[arg(long, default_value = ".", env = "RESUME_ROOT")]
    root: PathBuf,

    /// Output file. Defaults to `files/resume.pdf` (or `.html`) under the root.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Header photo. Defaults to `images/bio-photo.jpg` under the root.
    #[arg(long)]
    photo: Option<PathBuf>,

    /// Maximum number of publications to list; 0 lists all of them.
    #[arg(long, default_value_t = resume_pdf::config::DEFAULT_MAX_PUBLICATIONS)]
    max_publications: usize,

    /// Print "Page N" in the footer of every page.
    #[arg(long)]
    page_numbers: bool,
}

impl ExportArgs {
    fn config(&self) -> ExportConfig {
        let mut config = ExportConfig::new(&self.root)
            .with_max_publications(self.max_publications)
            .with_page_numbers(self.page_numbers);
        if let Some(output) = &self.output {
            config = config.with_output(output);
        }
        if let Some(photo) = &self.photo {
            config = config.with_photo(photo.clone());
        }
        config
    }

    /// The explicit output file, used verbatim by the HTML export.
    fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pdf(args) => resume_pdf::export_pdf(&args.config()),
        Commands::Html(args) => resume_pdf::export_html(&args.config(), args.output()),
    };

    match result {
        Ok(path) => println!("Saved: {}", path.display()),
        Err(err) => {
            eprintln!("Error: {}", err);
            print_error_sources(&err);
            std::process::exit(1);
        }
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
