use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use dia::{
    ArchiveOpts, AssetStore, DependencyIndex, DirAssetStore, ImageRsCodec, ListingTree, Size,
    ZipAssetStore,
};

#[derive(Parser, Debug)]
#[command(name = "dia", version, about = "Render layered images from .dia archives")]
struct Cli {
    /// Log per-layer compositing detail.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite one identifier and write it as a PNG.
    Render(RenderArgs),
    /// Print every identifier and its file, in natural order.
    List(SourceArgs),
    /// Print identifiers grouped by folder.
    Tree(SourceArgs),
    /// Print the dependency index as JSON, or the resolved chain of one identifier.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Input .dia archive.
    #[arg(long, conflicts_with = "dir", required_unless_present = "dir")]
    archive: Option<PathBuf>,

    /// Extracted archive directory (alternative to --archive).
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Manifest entry name inside the archive.
    #[arg(long, default_value = dia::DEFAULT_MANIFEST_NAME)]
    manifest: String,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Identifier to render. Defaults to the first entry in listing order.
    #[arg(long)]
    id: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Scale down to fit a WIDTHxHEIGHT viewport.
    #[arg(long, value_parser = parse_size)]
    fit: Option<Size>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Print the resolved chain of this identifier instead of the index.
    #[arg(long)]
    id: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::List(args) => cmd_list(args),
        Command::Tree(args) => cmd_tree(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_source(args: &SourceArgs) -> anyhow::Result<(Box<dyn AssetStore>, DependencyIndex)> {
    let store: Box<dyn AssetStore> = match (&args.archive, &args.dir) {
        (Some(archive), _) => Box::new(
            ZipAssetStore::open(archive)
                .with_context(|| format!("open archive '{}'", archive.display()))?,
        ),
        (None, Some(dir)) => Box::new(DirAssetStore::new(dir)),
        (None, None) => anyhow::bail!("one of --archive or --dir is required"),
    };

    let opts = ArchiveOpts {
        manifest_name: args.manifest.clone(),
    };
    let index = DependencyIndex::from_store(store.as_ref(), &opts)
        .with_context(|| format!("load manifest '{}'", opts.manifest_name))?;
    index.log_summary();
    Ok((store, index))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (store, index) = open_source(&args.source)?;
    let id = match args.id {
        Some(id) => id,
        None => ListingTree::build(&index)
            .first_id()
            .map(str::to_string)
            .context("archive lists no images")?,
    };

    let codec = ImageRsCodec;
    let mut canvas = dia::render(&index, store.as_ref(), &codec, &id)
        .with_context(|| format!("render '{id}'"))?;
    if let Some(viewport) = args.fit {
        canvas = dia::scale_to_fit(&codec, &canvas, viewport)?.with_context(|| {
            format!(
                "nothing visible in a {}x{} viewport",
                viewport.width, viewport.height
            )
        })?;
    }

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let png = dia::encode_png(&canvas)?;
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    tracing::info!(
        id = %id,
        width = canvas.width(),
        height = canvas.height(),
        "wrote {}",
        args.out.display()
    );
    Ok(())
}

fn cmd_list(args: SourceArgs) -> anyhow::Result<()> {
    let (_store, index) = open_source(&args)?;
    for (id, file) in index.entries() {
        println!("{id}\t{file}");
    }
    Ok(())
}

fn cmd_tree(args: SourceArgs) -> anyhow::Result<()> {
    let (_store, index) = open_source(&args)?;
    let tree = ListingTree::build(&index);
    for (depth, node) in tree.walk() {
        let indent = "  ".repeat(depth);
        match &node.id {
            Some(id) => println!("{indent}{} [{id}]", node.label),
            None => println!("{indent}{}/", node.label),
        }
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let (_store, index) = open_source(&args.source)?;
    match args.id {
        Some(id) => {
            let chain = dia::resolve_chain(&index, &id)?;
            for (depth, layer) in chain.ids().iter().enumerate() {
                let file = index.image_of(layer).unwrap_or("<unmapped>");
                match index.alpha_of(layer) {
                    Some(mask) => println!("{depth}\t{layer}\t{file}\talpha={mask}"),
                    None => println!("{depth}\t{layer}\t{file}"),
                }
            }
        }
        None => {
            let json = serde_json::to_string_pretty(&index).context("serialize index")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: u32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h: u32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok(Size::new(w, h))
}
