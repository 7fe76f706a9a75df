use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use screenplay_config::Config;
use screenplay_engine::{
    BlockKind, Document, Format, LayoutConfig, layout_document, read_document, write_document,
};

#[derive(Parser)]
#[command(name = "screenplay", version, about = "Convert and paginate screenplays")]
struct Cli {
    /// Config file to use instead of ~/.config/screenplay-studio/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert between plain text, JSON, PDF and Word
    Convert(ConvertArgs),

    /// List the blocks an input file imports as
    Blocks {
        /// Screenplay file (.fountain, .txt, .json, .docx)
        input: PathBuf,
    },

    /// Show how an input file paginates
    Layout {
        /// Screenplay file (.fountain, .txt, .json, .docx)
        input: PathBuf,
    },

    /// Create or inspect the config file
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write the default settings
    Init {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Print the settings in effect
    Show,
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Screenplay file (.fountain, .txt, .json, .docx)
    input: PathBuf,

    /// Output file; its extension picks the format unless --to is given
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    to: Option<OutputFormat>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Fountain,
    Json,
    Pdf,
    Docx,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Fountain => Format::Fountain,
            OutputFormat::Json => Format::Json,
            OutputFormat::Pdf => Format::Pdf,
            OutputFormat::Docx => Format::Docx,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Convert(args) => convert(args, &load_config(config_path)?),
        Command::Blocks { input } => {
            let doc = read(&input)?;
            print_blocks(&doc);
            Ok(())
        }
        Command::Layout { input } => {
            let config = load_config(config_path)?;
            let doc = read(&input)?;
            print_layout(&doc, &config.page);
            Ok(())
        }
        Command::Config { action } => {
            let path = config_path.map_or_else(Config::config_path, Path::to_path_buf);
            run_config(action, &path)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file not found: {}", path.display())),
        None => Ok(Config::load()?.unwrap_or_default()),
    }
}

fn run_config(action: ConfigCommand, path: &Path) -> Result<()> {
    match action {
        ConfigCommand::Init { force } => {
            Config::init_at(path, force)?;
            log::info!("Wrote default config to {}", path.display());
        }
        ConfigCommand::Show => {
            let config = Config::load_from_path(path)?.unwrap_or_default();
            println!("# {}", path.display());
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}

fn read(input: &Path) -> Result<Document> {
    read_document(input).with_context(|| format!("Failed to import {}", input.display()))
}

fn convert(args: ConvertArgs, config: &Config) -> Result<()> {
    let doc = read(&args.input)?;
    let (path, format) = resolve_output(
        &args.input,
        args.output,
        args.to.map(Format::from),
        config.output_dir.as_deref(),
    )?;
    write_document(&doc, &path, format, &config.page)
        .with_context(|| format!("Failed to export {}", path.display()))?;
    Ok(())
}

/// Work out where the converted file goes and in which format.
///
/// An explicit output path wins; otherwise the input's file name gets the
/// target extension, placed in the configured output directory or next to the
/// input.
fn resolve_output(
    input: &Path,
    output: Option<PathBuf>,
    to: Option<Format>,
    output_dir: Option<&Path>,
) -> Result<(PathBuf, Format)> {
    if let Some(output) = output {
        let format = match to {
            Some(format) => format,
            None => Format::from_path(&output)?,
        };
        return Ok((output, format));
    }

    let Some(format) = to else {
        bail!("Either --output or --to is required");
    };
    let stem = input
        .file_stem()
        .with_context(|| format!("Input has no file name: {}", input.display()))?;
    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(format.extension());
    let path = dir.join(name);
    if path == input {
        bail!("Refusing to overwrite input {}", input.display());
    }
    Ok((path, format))
}

fn print_blocks(doc: &Document) {
    for (index, block) in doc.blocks().iter().enumerate() {
        let kind = match block.kind {
            BlockKind::Heading { level } => format!("heading {}", level.get()),
            kind => kind.type_name().to_string(),
        };
        println!("{index:>4}  {kind:<14} {}", block.text);
    }
}

fn print_layout(doc: &Document, page: &LayoutConfig) {
    let layout = layout_document(doc, page);
    println!("{} page(s)", layout.page_count);
    for line in layout.lines() {
        println!(
            "p{:<3} y={:>5.2}in x={:>4.2}in  {}",
            line.page + 1,
            line.y.inches(),
            line.x.inches(),
            line.text
        );
    }
}
