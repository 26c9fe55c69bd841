use anyhow::{Context, bail};
use clap::{Args, Subcommand};
use photodis_core::common::nuclide::Nuclide;
use photodis_core::length::LengthCalculator;
use photodis_core::measurements::read_exfor_file;
use photodis_core::plot::{
    LengthSeries, plot_cross_sections, plot_interaction_length, plot_relative_difference,
};
use photodis_core::serialization::{format_table_rows, write_text_artifact};
use photodis_core::sweep::{
    DEFAULT_NUCLIDES, SweepConfig, difference_percentage_path, length_table_path,
    read_length_table, run_sweeps, write_difference_percentage_table, write_difference_table,
};
use photodis_core::xsection::tendl::TendlClient;
use photodis_core::xsection::{Channel, XsModel};
use std::path::PathBuf;
use tracing::info;

#[derive(Subcommand)]
pub(super) enum Command {
    /// Print or write a cross-section table for one nuclide
    Xs(XsArgs),
    /// Compute a single interaction length in Mpc
    Length(LengthArgs),
    /// Run interaction-length sweeps and write the result tables
    Sweep(SweepArgs),
    /// Write model-difference tables from existing sweep tables
    Diff(DiffArgs),
    /// Render comparison figures
    #[command(subcommand)]
    Plot(PlotCommand),
    /// Download a TENDL-2023 table into the local cache
    Fetch(FetchArgs),
}

#[derive(Args)]
pub(super) struct XsArgs {
    /// Mass number
    #[arg(long)]
    a: u32,

    /// Atomic number
    #[arg(long)]
    z: u32,

    /// Cross-section model: v2r4 or TENDL-2023
    #[arg(long)]
    model: XsModel,

    /// v2r4 ejectile channel (N or alpha); omitted means the channel sum
    #[arg(long)]
    channel: Option<Channel>,

    /// Write the table here instead of printing it
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
pub(super) struct LengthArgs {
    /// Mass number
    #[arg(long)]
    a: u32,

    /// Atomic number
    #[arg(long)]
    z: u32,

    /// Lorentz factor of the nucleus
    #[arg(long)]
    gamma: f64,

    /// Cross-section model: v2r4 or TENDL-2023
    #[arg(long)]
    model: XsModel,
}

#[derive(Args)]
pub(super) struct SweepArgs {
    /// Nuclide as A,Z; repeatable. Defaults to the benchmark set
    #[arg(long = "nuclide", value_parser = parse_nuclide)]
    nuclides: Vec<Nuclide>,

    /// Model to sweep; repeatable. Defaults to both
    #[arg(long = "model")]
    models: Vec<XsModel>,

    /// Output directory for the result tables
    #[arg(long, default_value = "results/interaction-length")]
    out_dir: PathBuf,

    /// JSON sweep configuration overriding the flags above
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
pub(super) struct DiffArgs {
    /// Mass number
    #[arg(long)]
    a: u32,

    /// Atomic number
    #[arg(long)]
    z: u32,

    /// Directory holding the sweep tables for both models
    #[arg(long, default_value = "results/interaction-length")]
    dir: PathBuf,

    /// Also write the absolute-difference table
    #[arg(long)]
    absolute: bool,
}

#[derive(Subcommand)]
pub(super) enum PlotCommand {
    /// Cross-section overlay with optional EXFOR measurement files
    Xs(PlotXsArgs),
    /// Interaction-length curves from sweep tables
    Length(PlotLengthArgs),
    /// Percentage-difference curves from difference tables
    Diff(PlotDiffArgs),
}

#[derive(Args)]
pub(super) struct PlotXsArgs {
    /// Mass number
    #[arg(long)]
    a: u32,

    /// Atomic number
    #[arg(long)]
    z: u32,

    /// EXFOR measurement file; repeatable, legend label is the file stem
    #[arg(long = "exfor")]
    exfor_files: Vec<PathBuf>,

    /// Figure path (.png or .svg)
    #[arg(long)]
    output: PathBuf,
}

#[derive(Args)]
pub(super) struct PlotLengthArgs {
    /// Nuclide as A,Z; repeatable. Defaults to the benchmark set
    #[arg(long = "nuclide", value_parser = parse_nuclide)]
    nuclides: Vec<Nuclide>,

    /// Directory holding the sweep tables
    #[arg(long, default_value = "results/interaction-length")]
    dir: PathBuf,

    /// Figure path (.png or .svg)
    #[arg(long)]
    output: PathBuf,
}

#[derive(Args)]
pub(super) struct PlotDiffArgs {
    /// Nuclide as A,Z; repeatable. Defaults to the benchmark set
    #[arg(long = "nuclide", value_parser = parse_nuclide)]
    nuclides: Vec<Nuclide>,

    /// Directory holding the difference tables
    #[arg(long, default_value = "results/interaction-length")]
    dir: PathBuf,

    /// Figure path (.png or .svg)
    #[arg(long)]
    output: PathBuf,
}

#[derive(Args)]
pub(super) struct FetchArgs {
    /// Mass number
    #[arg(long)]
    a: u32,

    /// Atomic number
    #[arg(long)]
    z: u32,

    /// Cache directory; defaults to ~/.cache/photodis
    #[arg(long)]
    cache_dir: Option<PathBuf>,
}

impl Command {
    pub(super) fn execute(self) -> anyhow::Result<()> {
        match self {
            Command::Xs(args) => run_xs(args),
            Command::Length(args) => run_length(args),
            Command::Sweep(args) => run_sweep(args),
            Command::Diff(args) => run_diff(args),
            Command::Plot(command) => run_plot(command),
            Command::Fetch(args) => run_fetch(args),
        }
    }
}

fn run_xs(args: XsArgs) -> anyhow::Result<()> {
    let nuclide = Nuclide::new(args.a, args.z);
    let calculator = LengthCalculator::new()?;

    let curve = match (args.model, args.channel) {
        (XsModel::V2r4, Some(channel)) => calculator.v2r4_table().evaluate(nuclide, channel)?,
        (XsModel::Tendl2023, Some(_)) => {
            bail!("channel selection applies to the v2r4 model only")
        }
        (model, None) => calculator.cross_section(nuclide, model)?,
    };

    let rows: Vec<(f64, f64)> = curve
        .energy_mev
        .iter()
        .copied()
        .zip(curve.sigma_mb.iter().copied())
        .collect();
    let content = format_table_rows(&rows);
    match args.output {
        Some(path) => {
            write_text_artifact(&path, &content)?;
            println!("{}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn run_length(args: LengthArgs) -> anyhow::Result<()> {
    let calculator = LengthCalculator::new()?;
    let length =
        calculator.interaction_length(Nuclide::new(args.a, args.z), args.gamma, args.model)?;
    println!("{length}");
    Ok(())
}

fn run_sweep(args: SweepArgs) -> anyhow::Result<()> {
    let calculator = LengthCalculator::new()?;

    let (nuclides, models, out_dir) = match args.config {
        Some(path) => {
            info!(config = %path.display(), "loading sweep configuration");
            let config = SweepConfig::load(&path)
                .with_context(|| format!("loading sweep config {}", path.display()))?;
            let out_dir = config.out_dir.clone().unwrap_or(args.out_dir);
            (config.nuclides(), config.models()?, out_dir)
        }
        None => {
            let nuclides = if args.nuclides.is_empty() {
                DEFAULT_NUCLIDES.to_vec()
            } else {
                args.nuclides
            };
            let models = if args.models.is_empty() {
                XsModel::ALL.to_vec()
            } else {
                args.models
            };
            (nuclides, models, args.out_dir)
        }
    };

    let written = run_sweeps(&calculator, &nuclides, &models, &out_dir)?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn run_diff(args: DiffArgs) -> anyhow::Result<()> {
    let nuclide = Nuclide::new(args.a, args.z);
    let path = write_difference_percentage_table(&args.dir, nuclide)?;
    println!("{}", path.display());
    if args.absolute {
        let path = write_difference_table(&args.dir, nuclide)?;
        println!("{}", path.display());
    }
    Ok(())
}

fn run_plot(command: PlotCommand) -> anyhow::Result<()> {
    match command {
        PlotCommand::Xs(args) => {
            let nuclide = Nuclide::new(args.a, args.z);
            let calculator = LengthCalculator::new()?;
            let v2r4 = calculator.cross_section(nuclide, XsModel::V2r4)?;
            let tendl = calculator.cross_section(nuclide, XsModel::Tendl2023)?;

            let mut measurements = Vec::new();
            for path in &args.exfor_files {
                let label = path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or("measurement")
                    .to_string();
                let series = read_exfor_file(path)
                    .with_context(|| format!("reading EXFOR table {}", path.display()))?;
                measurements.push((label, series));
            }

            plot_cross_sections(nuclide, &v2r4, &tendl, &measurements, &args.output)?;
            println!("{}", args.output.display());
            Ok(())
        }
        PlotCommand::Length(args) => {
            let nuclides = if args.nuclides.is_empty() {
                DEFAULT_NUCLIDES.to_vec()
            } else {
                args.nuclides
            };

            let mut series = Vec::new();
            for nuclide in nuclides {
                for model in XsModel::ALL {
                    let path = length_table_path(&args.dir, nuclide, model);
                    if !path.is_file() {
                        continue;
                    }
                    series.push(LengthSeries {
                        nuclide,
                        model,
                        table: read_length_table(&path)?,
                    });
                }
            }
            if series.is_empty() {
                bail!(
                    "no interaction-length tables found in {}",
                    args.dir.display()
                );
            }

            plot_interaction_length(&series, &args.output)?;
            println!("{}", args.output.display());
            Ok(())
        }
        PlotCommand::Diff(args) => {
            let nuclides = if args.nuclides.is_empty() {
                DEFAULT_NUCLIDES.to_vec()
            } else {
                args.nuclides
            };

            let mut series = Vec::new();
            for nuclide in nuclides {
                let path = difference_percentage_path(&args.dir, nuclide);
                if !path.is_file() {
                    continue;
                }
                series.push((nuclide, read_length_table(&path)?));
            }
            if series.is_empty() {
                bail!("no difference tables found in {}", args.dir.display());
            }

            plot_relative_difference(&series, &args.output)?;
            println!("{}", args.output.display());
            Ok(())
        }
    }
}

fn run_fetch(args: FetchArgs) -> anyhow::Result<()> {
    let client = match args.cache_dir {
        Some(dir) => TendlClient::with_cache_dir(dir)?,
        None => TendlClient::new()?,
    };
    let path = client.download(Nuclide::new(args.a, args.z))?;
    println!("{}", path.display());
    Ok(())
}

fn parse_nuclide(value: &str) -> Result<Nuclide, String> {
    let (a, z) = value
        .split_once(',')
        .ok_or_else(|| format!("expected A,Z but got '{value}'"))?;
    let a = a
        .trim()
        .parse()
        .map_err(|error| format!("mass number: {error}"))?;
    let z = z
        .trim()
        .parse()
        .map_err(|error| format!("atomic number: {error}"))?;
    Ok(Nuclide::new(a, z))
}

#[cfg(test)]
mod tests {
    use super::parse_nuclide;

    #[test]
    fn nuclide_flags_parse_mass_and_atomic_numbers() {
        let nuclide = parse_nuclide("56,26").expect("valid pair");
        assert_eq!((nuclide.a, nuclide.z), (56, 26));
        let nuclide = parse_nuclide(" 195 , 78 ").expect("spaces tolerated");
        assert_eq!((nuclide.a, nuclide.z), (195, 78));
    }

    #[test]
    fn malformed_nuclide_flags_are_rejected() {
        assert!(parse_nuclide("56").is_err());
        assert!(parse_nuclide("a,b").is_err());
    }
}
