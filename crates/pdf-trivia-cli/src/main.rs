use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use pdf_trivia::constants::pt_to_mm;
use pdf_trivia::layout::grid_geometry;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ptrivia", about = "Trivia card PDF generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate six-question cards from CSV
    Cards {
        #[command(flatten)]
        io: IoArgs,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Generate one card per CSV row
    Single {
        #[command(flatten)]
        io: IoArgs,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Validate a CSV file and lay it out without writing anything
    Check {
        /// Input CSV file (columns: level, subject, question, answer)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Input CSV file (columns: level, subject, question, answer)
    #[arg(short, long)]
    input: PathBuf,

    /// Output PDF file
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct LayoutArgs {
    /// Duplex mode
    #[arg(long, default_value = "long-edge", value_enum)]
    mode: ModeArg,

    /// Paper size (overrides the config file)
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Cards per row (overrides the config file)
    #[arg(long)]
    cols: Option<usize>,

    /// Cards per column (overrides the config file)
    #[arg(long)]
    rows: Option<usize>,

    /// Layout configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    SingleSided,
    LongEdge,
    ShortEdge,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    A5,
    Letter,
    Legal,
}

impl From<ModeArg> for pdf_trivia::PrintMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::SingleSided => Self::SingleSided,
            ModeArg::LongEdge => Self::DuplexLongEdge,
            ModeArg::ShortEdge => Self::DuplexShortEdge,
        }
    }
}

impl From<PaperArg> for pdf_trivia::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

impl LayoutArgs {
    async fn resolve(&self) -> Result<pdf_trivia::LayoutConfig> {
        let mut config = match &self.config {
            Some(path) => pdf_trivia::LayoutConfig::load(path).await?,
            None => pdf_trivia::LayoutConfig::default(),
        };
        if let Some(paper) = self.paper {
            let paper = pdf_trivia::PaperSize::from(paper);
            log::info!("Using {} paper", paper.name());
            let (width, height) = paper.dimensions_pt();
            config.page_width = width;
            config.page_height = height;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        config.validate()?;
        Ok(config)
    }
}

fn print_statistics(
    card_count: usize,
    config: &pdf_trivia::LayoutConfig,
    mode: pdf_trivia::PrintMode,
) -> Result<()> {
    let stats = pdf_trivia::calculate_statistics(card_count, config, mode)?;
    let geometry = grid_geometry(config)?;
    println!("Sheet Statistics:");
    println!("  Cards: {}", stats.cards);
    println!(
        "  Card size: {:.1} x {:.1} mm",
        pt_to_mm(geometry.card_width),
        pt_to_mm(geometry.card_height)
    );
    println!("  Cards per sheet: {}", stats.cards_per_sheet);
    println!("  Sheets: {}", stats.sheets);
    println!("  Output pages: {}", stats.pages);
    println!("  Empty slots: {}", stats.empty_slots);
    Ok(())
}

fn print_level_summary(cards: &[pdf_trivia::Card]) {
    let mut levels: Vec<(&str, usize)> = Vec::new();
    for card in cards {
        match levels.iter_mut().find(|(level, _)| *level == card.level()) {
            Some((_, count)) => *count += 1,
            None => levels.push((card.level(), 1)),
        }
    }
    println!("Levels:");
    for (level, count) in levels {
        println!("  {}: {} card(s)", level, count);
    }
}

fn done(count: usize, what: &str, output: &Path) {
    println!("Generated {} {} → {}", count, what, output.display());
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Cards {
            io,
            layout,
            stats_only,
        } => {
            let config = layout.resolve().await?;
            let mode = layout.mode.into();

            let cards = pdf_trivia::load_from_csv(&io.input).await?;
            print_statistics(cards.len(), &config, mode)?;
            if stats_only {
                return Ok(());
            }

            pdf_trivia::generate_pdf(&cards, &config, mode, &io.output).await?;
            done(cards.len(), "trivia cards", &io.output);
        }

        Commands::Single {
            io,
            layout,
            stats_only,
        } => {
            let config = layout.resolve().await?;
            let mode = layout.mode.into();

            let rows = pdf_trivia::load_rows_from_csv(&io.input).await?;
            pdf_trivia::validate_rows(&rows, &config)?;
            print_statistics(rows.len(), &config, mode)?;
            if stats_only {
                return Ok(());
            }

            pdf_trivia::generate_single_pdf(&rows, &config, mode, &io.output).await?;
            done(rows.len(), "single-question cards", &io.output);
        }

        Commands::Check { input, layout } => {
            let config = layout.resolve().await?;
            let mode = layout.mode.into();

            let cards = pdf_trivia::load_from_csv(&input).await?;
            print_level_summary(&cards);
            print_statistics(cards.len(), &config, mode)?;

            // Lay out every card so overflowing text is reported now
            let bytes = pdf_trivia::render_pdf_bytes(&cards, &config, mode)?;
            log::debug!("Dry run produced {} bytes", bytes.len());
            println!("{} OK", input.display());
        }
    }

    Ok(())
}
