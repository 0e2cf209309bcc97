use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use serde_json::json;

#[derive(Parser, Debug)]
#[command(name = "race-columns", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build every frame and write them as JSON.
    Frames(FramesArgs),
    /// Print one frame's ranked rows and axis.
    Frame(FrameArgs),
    /// Print the value axis of every frame.
    Axis(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Dataset JSON (`relation` + `rows`).
    #[arg(long)]
    data: PathBuf,

    /// Chart configuration JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Frame index (0-based).
    #[arg(long)]
    index: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Axis(args) => cmd_axis(args),
    }
}

fn load_race(input: &InputArgs) -> anyhow::Result<race_columns::Race> {
    let dataset = race_columns::Dataset::from_path(&input.data)?;
    let config = match &input.config {
        Some(path) => race_columns::ConfigFile::from_path(path)?.resolve()?,
        None => race_columns::RaceConfig::default(),
    };
    let race = race_columns::Race::build(dataset, config)
        .with_context(|| format!("build race from '{}'", input.data.display()))?;
    Ok(race)
}

fn write_json(out: Option<&Path>, value: &impl serde::Serialize) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, value).with_context(|| "write JSON")?;
            w.flush()
                .with_context(|| format!("flush output '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut w = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut w, value).with_context(|| "write JSON")?;
            writeln!(w)?;
        }
    }
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let race = load_race(&args.input)?;
    write_json(args.out.as_deref(), &race.frames())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let race = load_race(&args.input)?;
    let frame = race.frame(race_columns::FrameIndex(args.index))?;
    let dataset = race.dataset();

    let rows: Vec<_> = race
        .visible_rows(frame)
        .into_iter()
        .map(|r| {
            json!({
                "label": dataset.label(r.entity),
                "value": r.frame_value,
                "rank": r.rank,
                "new_rank": r.new_rank,
            })
        })
        .collect();

    let out = json!({
        "index": frame.index,
        "source": frame.source,
        "rows": rows,
        "axis": frame.axis,
    });
    write_json(None, &out)
}

fn cmd_axis(args: InputArgs) -> anyhow::Result<()> {
    let race = load_race(&args)?;
    let axes: Vec<_> = race
        .frames()
        .iter()
        .map(|f| {
            json!({
                "index": f.index,
                "axis": f.axis,
            })
        })
        .collect();
    write_json(None, &axes)
}
