use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "visim", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the composed filter chain for a simulation state.
    Chain(ChainArgs),
    /// Print the shader uniform table for a simulation state.
    Uniforms(UniformsArgs),
    /// Apply the per-pixel program to a PNG.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct ChainArgs {
    /// Input simulation state JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Emit the chain as JSON instead of a filter string.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct UniformsArgs {
    /// Input simulation state JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Simulation time in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f32,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input simulation state JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Source image (PNG).
    #[arg(long)]
    source: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Simulation time in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Chain(args) => cmd_chain(args),
        Command::Uniforms(args) => cmd_uniforms(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn read_state_json(path: &Path) -> anyhow::Result<visim::SimulationState> {
    let f = File::open(path).with_context(|| format!("open state '{}'", path.display()))?;
    let r = BufReader::new(f);
    let state: visim::SimulationState =
        serde_json::from_reader(r).with_context(|| "parse state JSON")?;
    state.validate()?;
    Ok(state)
}

fn cmd_chain(args: ChainArgs) -> anyhow::Result<()> {
    let state = read_state_json(&args.in_path)?;
    let chain = state.to_filter_chain();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&chain)?);
    } else {
        println!("{}", chain.to_filter_string());
    }
    Ok(())
}

fn cmd_uniforms(args: UniformsArgs) -> anyhow::Result<()> {
    let state = read_state_json(&args.in_path)?;
    let uniforms = state.to_uniforms(args.time);
    for (name, value) in uniforms.named_values() {
        println!("{name} = {value}");
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let state = read_state_json(&args.in_path)?;

    let img = image::open(&args.source)
        .with_context(|| format!("open source '{}'", args.source.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    let mut frame = visim::Frame::from_rgba8(width, height, img.into_raw())?;

    let backend = visim::CpuBackend::new()?;
    visim::simulate_frame(&state, args.time, &backend, &mut frame)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
