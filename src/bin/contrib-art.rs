use std::{
    io::{BufRead as _, IsTerminal as _, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand};
use contrib_art::{
    Author, CommitConfig, CommitWriter, GlyphStyle, GridStats, IntensityGrid, Settings,
    SourceDescriptor, TemplateRegistry, TerminalOpts,
};

#[derive(Parser, Debug)]
#[command(
    name = "contrib-art",
    version,
    about = "Draw images, text, or templates on your contribution graph",
    after_help = "Create an empty repository on your hosting service first, then push the generated branch to it."
)]
struct Cli {
    /// Import templates from a JSON file (name -> 2D array of 0-4) before running.
    #[arg(long, global = true)]
    templates: Option<PathBuf>,

    /// Settings JSON; missing keys keep their defaults.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Font size in pixels for text sources.
    #[arg(long, global = true)]
    font_size: Option<f32>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Preview the contribution graph without creating commits.
    Preview(PreviewArgs),
    /// Print every scheduled commit timestamp (dry run).
    Schedule(ScheduleArgs),
    /// Create the backdated commits in a new local repository (requires `git` on PATH).
    Commit(CommitArgs),
    /// Show available templates.
    ListTemplates(ListArgs),
    /// Write every registered template to a JSON file.
    ExportTemplates(ExportArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Path to an image file.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Text to convert to pixels.
    #[arg(long)]
    text: Option<String>,

    /// Template name (see `list-templates`).
    #[arg(long)]
    template: Option<String>,
}

impl SourceArgs {
    fn descriptor(&self) -> anyhow::Result<SourceDescriptor> {
        match (&self.image, &self.text, &self.template) {
            (Some(p), None, None) => Ok(SourceDescriptor::Image(p.clone())),
            (None, Some(t), None) => Ok(SourceDescriptor::Text(t.clone())),
            (None, None, Some(n)) => Ok(SourceDescriptor::Template(n.clone())),
            _ => anyhow::bail!("exactly one of --image, --text, --template is required"),
        }
    }
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Use shade characters instead of terminal colors.
    #[arg(long)]
    plain: bool,

    /// Number of weeks to draw.
    #[arg(long, default_value_t = contrib_art::GRID_WEEKS)]
    weeks: usize,

    /// Also write the reconstructed grid as a PNG.
    #[arg(long)]
    png: Option<PathBuf>,

    /// Pixels per grid cell in the PNG.
    #[arg(long, default_value_t = 10)]
    cell: u32,
}

#[derive(Args, Debug)]
struct ScheduleArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Shift the pattern this many weeks further into the past.
    #[arg(short = 'w', long = "weeks-ago", default_value_t = 0, allow_negative_numbers = true)]
    weeks_ago: i64,

    /// Print the schedule as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct CommitArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Directory for the new repository; must be empty or missing.
    #[arg(long)]
    repo_dir: PathBuf,

    /// Branch to create (defaults to the settings value).
    #[arg(long)]
    branch: Option<String>,

    /// Shift the pattern this many weeks further into the past.
    #[arg(short = 'w', long = "weeks-ago", default_value_t = 0, allow_negative_numbers = true)]
    weeks_ago: i64,

    /// Author name written to the repository config.
    #[arg(long, requires = "author_email")]
    author_name: Option<String>,

    /// Author email written to the repository config.
    #[arg(long, requires = "author_name")]
    author_email: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(long)]
    yes: bool,

    /// Show what would happen without creating anything.
    #[arg(long)]
    dry_run: bool,

    /// Use shade characters instead of terminal colors.
    #[arg(long)]
    plain: bool,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Use shade characters instead of terminal colors.
    #[arg(long)]
    plain: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Output JSON path.
    out: PathBuf,
}

struct Session {
    settings: Settings,
    registry: TemplateRegistry,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let session = load_session(&cli)?;
    match cli.cmd {
        Command::Preview(args) => cmd_preview(&session, args),
        Command::Schedule(args) => cmd_schedule(&session, args),
        Command::Commit(args) => cmd_commit(&session, args),
        Command::ListTemplates(args) => cmd_list_templates(&session, args),
        Command::ExportTemplates(args) => cmd_export_templates(&session, args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_session(cli: &Cli) -> anyhow::Result<Session> {
    let mut settings = match &cli.settings {
        Some(path) => Settings::from_path(path)?,
        None => Settings::default(),
    };
    if let Some(size) = cli.font_size {
        settings.font_size = size;
    }
    settings.validate()?;

    let mut registry = TemplateRegistry::builtin();
    if let Some(path) = &cli.templates {
        let n = registry
            .import_json(path)
            .with_context(|| format!("import templates '{}'", path.display()))?;
        eprintln!("Imported {n} templates from {}.", path.display());
    }

    Ok(Session { settings, registry })
}

fn glyph_style(plain: bool) -> GlyphStyle {
    if plain || !std::io::stdout().is_terminal() {
        GlyphStyle::Plain
    } else {
        GlyphStyle::Ansi
    }
}

fn build_grid(session: &Session, source: &SourceArgs) -> anyhow::Result<(SourceDescriptor, IntensityGrid)> {
    let desc = source.descriptor()?;
    eprintln!("Processing input...");
    let grid = contrib_art::build_grid(&desc, &session.registry, &session.settings)
        .with_context(|| format!("process input ({})", desc.describe()))?;
    Ok((desc, grid))
}

fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}

fn cmd_preview(session: &Session, args: PreviewArgs) -> anyhow::Result<()> {
    let (_, grid) = build_grid(session, &args.source)?;
    let style = glyph_style(args.plain);

    println!("\nPreview of contribution graph:");
    let opts = TerminalOpts {
        style,
        weeks: args.weeks,
        ..TerminalOpts::default()
    };
    let projection = contrib_art::project(&grid, &opts)?;
    println!("{}", projection.terminal);
    println!("{}", projection.stats);

    if let Some(out) = &args.png {
        contrib_art::save_grid_png(&grid, args.cell, out)?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_schedule(session: &Session, args: ScheduleArgs) -> anyhow::Result<()> {
    let (_, grid) = build_grid(session, &args.source)?;
    let schedule = contrib_art::schedule(&grid, args.weeks_ago, now())?;

    if args.json {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        serde_json::to_writer_pretty(&mut lock, &schedule).context("write schedule JSON")?;
        writeln!(lock).context("write schedule JSON")?;
        return Ok(());
    }

    if schedule.is_empty() {
        println!(
            "No commits to create (input is empty or too light). Try a darker image, bolder text, or a different template."
        );
        return Ok(());
    }

    println!(
        "Will create {} commits over {} days, starting {}:",
        schedule.len(),
        schedule.active_days,
        schedule.anchor
    );
    for at in schedule.timestamps() {
        println!("  {}", at.format("%Y-%m-%d %H:%M:%S"));
    }
    Ok(())
}

fn cmd_commit(session: &Session, args: CommitArgs) -> anyhow::Result<()> {
    let (desc, grid) = build_grid(session, &args.source)?;
    eprintln!("Generating commit dates...");
    let schedule = contrib_art::schedule(&grid, args.weeks_ago, now())?.ensure_non_empty()?;

    println!(
        "Will create {} commits over {} days",
        schedule.len(),
        schedule.active_days
    );
    println!("\nQuick preview:");
    let quick = TerminalOpts::quick(glyph_style(args.plain), session.settings.quick_preview_weeks);
    print!("{}", contrib_art::render_terminal(&grid, &quick));

    let branch = args.branch.unwrap_or_else(|| session.settings.branch.clone());
    println!(
        "\nThis will create {} commits on branch '{branch}' in {}.",
        schedule.len(),
        args.repo_dir.display()
    );

    if args.dry_run {
        println!("\n[DRY RUN] No changes will be made.");
        return Ok(());
    }

    if !args.yes && !confirm("Do you want to continue? Type 'yes' to proceed, or anything else to cancel: ")? {
        println!("Cancelled. No changes were made.");
        return Ok(());
    }

    let author = match (args.author_name, args.author_email) {
        (Some(name), Some(email)) => Some(Author { name, email }),
        _ => None,
    };
    let writer = CommitWriter::new(CommitConfig {
        repo_dir: args.repo_dir,
        branch: branch.clone(),
        author,
    })?;
    let n = writer.write(&schedule, &desc)?;

    println!("All {n} commits created in {}.", writer.repo_dir().display());
    println!("Push them with: git -C {} push -u <remote> {branch}", writer.repo_dir().display());
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush().context("flush stdout")?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read confirmation")?;
    Ok(line.trim().eq_ignore_ascii_case("yes"))
}

fn cmd_list_templates(session: &Session, args: ListArgs) -> anyhow::Result<()> {
    let opts = TerminalOpts::quick(glyph_style(args.plain), session.settings.quick_preview_weeks);
    println!("Available templates:\n");
    for (name, pattern) in session.registry.iter() {
        let grid = contrib_art::quantize(&pattern.to_raw_grid()?, true)?;
        let stats = GridStats::of(&grid);
        println!(
            "{} ({}x{}, {} commits):",
            name.to_uppercase(),
            pattern.height(),
            pattern.width(),
            stats.total_events
        );
        println!("{}", contrib_art::render_terminal(&grid, &opts));
    }
    Ok(())
}

fn cmd_export_templates(session: &Session, args: ExportArgs) -> anyhow::Result<()> {
    session.registry.export_json(&args.out)?;
    println!(
        "Exported {} templates to {}.",
        session.registry.len(),
        args.out.display()
    );
    Ok(())
}
