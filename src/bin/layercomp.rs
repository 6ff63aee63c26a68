use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "layercomp", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the display size a base image of the given size gets.
    Fit(FitArgs),
    /// Composite a component over a base image and write a PNG.
    Compose(ComposeArgs),
}

#[derive(Parser, Debug)]
struct FitArgs {
    /// Intrinsic width in pixels.
    #[arg(long)]
    width: u32,

    /// Intrinsic height in pixels.
    #[arg(long)]
    height: u32,

    /// Maximum display width.
    #[arg(long, default_value_t = 600)]
    max_width: u32,

    /// Maximum display height.
    #[arg(long, default_value_t = 400)]
    max_height: u32,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Base image (establishes the surface size).
    #[arg(long)]
    base: PathBuf,

    /// Component image placed over the base.
    #[arg(long)]
    component: PathBuf,

    /// Output PNG path, or an existing directory to write `composite-image-<millis>.png` into.
    #[arg(long)]
    out: PathBuf,

    /// JSON configuration (display bounds, effect parameters).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Component left edge in surface pixels (defaults to centered).
    #[arg(long, requires = "y", allow_negative_numbers = true)]
    x: Option<f64>,

    /// Component top edge in surface pixels (defaults to centered).
    #[arg(long, requires = "x", allow_negative_numbers = true)]
    y: Option<f64>,

    /// Component scale in percent.
    #[arg(long, default_value_t = 100.0)]
    scale_percent: f64,

    /// Clockwise rotation in degrees.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    rotation: i32,

    /// Component opacity in percent.
    #[arg(long, default_value_t = 100.0)]
    opacity_percent: f64,

    /// Blend mode (normal, multiply, screen, overlay, ...).
    #[arg(long, default_value = "normal")]
    blend: String,

    /// Drag gesture in surface pixels: "x1,y1 x2,y2 ...". Pressed at the first point,
    /// released at the last.
    #[arg(long, allow_hyphen_values = true)]
    drag: Option<String>,

    /// Run the post-effect with this prompt before writing.
    #[arg(long)]
    prompt: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Fit(args) => cmd_fit(args),
        Command::Compose(args) => cmd_compose(args),
    }
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.width > 0 && args.height > 0,
        "width and height must be positive"
    );
    let bounds = layercomp::DisplayBounds {
        max_width: args.max_width,
        max_height: args.max_height,
    };
    layercomp::ComposerConfig {
        bounds,
        ..Default::default()
    }
    .validate()?;

    let size = layercomp::fit_within(layercomp::PixelSize::new(args.width, args.height), bounds);
    println!("{}x{}", size.width, size.height);
    Ok(())
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => layercomp::ComposerConfig::from_json_path(path)?,
        None => layercomp::ComposerConfig::default(),
    };
    let mut composer = layercomp::Composer::new(config)?;

    let base = read_bytes(&args.base)?;
    let size = composer
        .load_base(&base)
        .with_context(|| format!("load base '{}'", args.base.display()))?;
    let component = read_bytes(&args.component)?;
    composer
        .load_component(&component)
        .with_context(|| format!("load component '{}'", args.component.display()))?;

    if !composer.set_scale_percent(args.scale_percent)? {
        tracing::warn!(
            scale_percent = args.scale_percent,
            "non-positive scale ignored"
        );
    }
    composer.set_rotation_degrees(args.rotation);
    composer.set_opacity_percent(args.opacity_percent)?;
    composer.set_blend_mode(&args.blend)?;
    if let (Some(x), Some(y)) = (args.x, args.y) {
        composer.set_position(layercomp::Point::new(x, y))?;
    }

    if let Some(gesture) = &args.drag {
        for event in parse_drag(gesture)? {
            composer.pointer(event);
        }
    }

    let png = match &args.prompt {
        Some(prompt) => {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .context("start async runtime")?;
            rt.block_on(composer.generate(prompt))?.png
        }
        None => composer.export_png()?,
    };

    let out = resolve_out_path(&args.out)?;
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out, png).with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {} ({}x{})", out.display(), size.width, size.height);
    Ok(())
}

fn read_bytes(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read '{}'", path.display()))
}

fn resolve_out_path(out: &Path) -> anyhow::Result<PathBuf> {
    if !out.is_dir() {
        return Ok(out.to_path_buf());
    }
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before unix epoch")?
        .as_millis();
    Ok(out.join(layercomp::Composer::export_file_name(millis)))
}

/// Parse `"x1,y1 x2,y2 ..."` into a press, moves, and a release.
fn parse_drag(gesture: &str) -> anyhow::Result<Vec<layercomp::PointerEvent>> {
    use layercomp::{PointerEvent, PointerKind};

    let points = gesture
        .split_whitespace()
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .with_context(|| format!("drag point '{pair}' is not 'x,y'"))?;
            let x: f64 = x
                .trim()
                .parse()
                .with_context(|| format!("drag x in '{pair}'"))?;
            let y: f64 = y
                .trim()
                .parse()
                .with_context(|| format!("drag y in '{pair}'"))?;
            Ok(layercomp::Point::new(x, y))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let Some((&first, rest)) = points.split_first() else {
        anyhow::bail!("drag needs at least one point");
    };
    let last = rest.last().copied().unwrap_or(first);

    let mut events = Vec::with_capacity(points.len() + 1);
    events.push(PointerEvent::new(PointerKind::Down, first));
    events.extend(
        rest.iter()
            .map(|&p| PointerEvent::new(PointerKind::Move, p)),
    );
    events.push(PointerEvent::new(PointerKind::Up, last));
    Ok(events)
}
