use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use moviepack::{
    CodecConfig, LocalLibrary, MovieArchive, MovieCodec, THEMELIST_MEMBER, parse_theme_list,
};

#[derive(Parser, Debug)]
#[command(name = "moviepack", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pack a movie document and its assets into a ZIP archive.
    Pack(PackArgs),
    /// Import an archive's user assets and write out its movie and thumbnail.
    Unpack(UnpackArgs),
    /// Print the movie's audio timeline as JSON.
    Audio(AudioArgs),
    /// Print movie metadata as JSON.
    Info(InfoArgs),
    /// List an archive's members and theme list.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct PackArgs {
    /// Movie document XML.
    #[arg(long)]
    movie: PathBuf,

    /// Thumbnail PNG stored as `thumbnail.png`.
    #[arg(long)]
    thumb: Option<PathBuf>,

    /// Output ZIP path.
    #[arg(long)]
    out: PathBuf,

    /// Codec config JSON.
    #[arg(long)]
    config: PathBuf,

    /// User library directory.
    #[arg(long)]
    library: PathBuf,
}

#[derive(Parser, Debug)]
struct UnpackArgs {
    /// Input archive.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory receiving `movie.xml` and `thumbnail.png`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Codec config JSON.
    #[arg(long)]
    config: PathBuf,

    /// User library directory.
    #[arg(long)]
    library: PathBuf,
}

#[derive(Parser, Debug)]
struct AudioArgs {
    /// Movie document XML.
    #[arg(long)]
    movie: PathBuf,

    /// Codec config JSON.
    #[arg(long)]
    config: PathBuf,

    /// User library directory holding user clips.
    #[arg(long)]
    library: PathBuf,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Movie document XML.
    #[arg(long)]
    movie: PathBuf,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input archive.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Pack(args) => cmd_pack(args),
        Command::Unpack(args) => cmd_unpack(args),
        Command::Audio(args) => cmd_audio(args),
        Command::Info(args) => cmd_info(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn read(path: &Path, what: &str) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read {what} '{}'", path.display()))
}

fn open_codec(
    config: &Path,
    library: &Path,
) -> anyhow::Result<MovieCodec<LocalLibrary, LocalLibrary>> {
    let config = CodecConfig::from_json_file(config)?;
    let library = LocalLibrary::open(library)?;
    Ok(MovieCodec::new(config, library.clone(), library))
}

fn cmd_pack(args: PackArgs) -> anyhow::Result<()> {
    let codec = open_codec(&args.config, &args.library)?;
    let movie = read(&args.movie, "movie")?;
    let thumb = args
        .thumb
        .as_deref()
        .map(|p| read(p, "thumbnail"))
        .transpose()?;

    let zip = codec.pack(&movie, thumb.as_deref())?;
    std::fs::write(&args.out, zip)
        .with_context(|| format!("write archive '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_unpack(args: UnpackArgs) -> anyhow::Result<()> {
    let mut codec = open_codec(&args.config, &args.library)?;
    let archive = read(&args.in_path, "archive")?;
    let (movie, thumb) = codec.unpack(&archive)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create out dir '{}'", args.out_dir.display()))?;
    for (name, bytes) in [("movie.xml", movie), ("thumbnail.png", thumb)] {
        let path = args.out_dir.join(name);
        std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    }
    eprintln!("wrote {}", args.out_dir.display());
    Ok(())
}

fn cmd_audio(args: AudioArgs) -> anyhow::Result<()> {
    let codec = open_codec(&args.config, &args.library)?;
    let movie = read(&args.movie, "movie")?;
    let times = codec.extract_audio_times(&movie)?;
    println!("{}", serde_json::to_string_pretty(&times)?);
    Ok(())
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let movie = read(&args.movie, "movie")?;
    let meta = moviepack::movie_meta(&movie)?;
    println!("{}", serde_json::to_string_pretty(&meta)?);
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let archive = MovieArchive::from_zip(&read(&args.in_path, "archive")?)?;
    println!("members:");
    for name in archive.names() {
        println!("  {name}");
    }
    if let Some(list) = archive.get(THEMELIST_MEMBER) {
        println!("themes: {}", parse_theme_list(list)?.join(", "));
    }
    Ok(())
}
