use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use redpen_classify::{LineClassifier, ScanReport};
use redpen_editor::{DecorationLayer, EditorHandle, LineWidget, SpanWidget, StyleClass};
use redpen_highlight::HighlightSynchronizer;
use redpen_settings::SettingsStore;
use serde::Serialize;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(
    name = "redpen-cli",
    about = "Review tooling for translated chapter text",
    author,
    version
)]
struct Cli {
    /// Workspace root holding the .redpen settings directory; defaults to
    /// the current directory.
    #[arg(long, global = true, value_name = "PATH")]
    workspace: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan files for suspicious lines (untranslated or promotional text).
    Scan(ScanArgs),
    /// Render a file with suspicious-line annotations.
    Annotate(AnnotateArgs),
    /// Inspect or move review settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Args)]
struct ScanArgs {
    /// Files or directories to scan; defaults to the current directory.
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Emit machine-readable JSON instead of the text report.
    #[arg(long)]
    json: bool,

    /// Print only the aggregate summary, not individual lines.
    #[arg(long, conflicts_with = "json")]
    summary_only: bool,
}

#[derive(Args)]
struct AnnotateArgs {
    /// File to annotate.
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Backing widget model; output must be identical either way.
    #[arg(long, value_enum, default_value_t = WidgetChoice::Line)]
    widget: WidgetChoice,

    /// Show clean lines even when the stored settings collapse them.
    #[arg(long)]
    show_clean: bool,

    /// Render without any highlighting.
    #[arg(long)]
    no_highlight: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum WidgetChoice {
    /// Line/cursor-oriented widget.
    Line,
    /// Offset/range-oriented widget.
    Span,
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print the effective settings as JSON.
    Show,
    /// Export current settings to a file.
    Export(SettingsExportArgs),
    /// Import settings from a file.
    Import(SettingsImportArgs),
}

#[derive(Args)]
struct SettingsExportArgs {
    /// Destination file path.
    #[arg(long, value_name = "FILE")]
    output: PathBuf,
}

#[derive(Args)]
struct SettingsImportArgs {
    /// Source settings JSON.
    #[arg(value_name = "FILE")]
    input: PathBuf,
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let Cli { workspace, command } = Cli::parse();
    match command {
        Commands::Scan(args) => execute_scan(args),
        Commands::Annotate(args) => {
            let workspace_root = resolve_workspace(workspace)?;
            execute_annotate(args, &workspace_root)?;
            Ok(0)
        }
        Commands::Settings(subcommand) => {
            let workspace_root = resolve_workspace(workspace)?;
            execute_settings_command(subcommand, &workspace_root)?;
            Ok(0)
        }
    }
}

#[derive(Serialize)]
struct FileScan {
    path: PathBuf,
    report: ScanReport,
}

fn execute_scan(mut args: ScanArgs) -> Result<i32> {
    if args.paths.is_empty() {
        let cwd = std::env::current_dir().context("failed to determine current directory")?;
        args.paths.push(cwd);
    }

    let targets = collect_target_files(&args.paths);
    if targets.is_empty() {
        println!("No files to scan.");
        return Ok(0);
    }

    let classifier = LineClassifier::new();
    let mut scans = Vec::new();
    for path in targets {
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                eprintln!("warning: {}: {}", path.display(), err);
                continue;
            }
        };
        let report = classifier.classify_lines(contents.split('\n'));
        if report.is_clean() {
            continue;
        }
        scans.push(FileScan { path, report });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scans)?);
        return Ok(if scans.is_empty() { 0 } else { 2 });
    }

    if scans.is_empty() {
        println!("No suspicious lines found.");
        return Ok(0);
    }

    print_scan_report(&scans, args.summary_only);
    Ok(2)
}

fn print_scan_report(scans: &[FileScan], summary_only: bool) {
    let mut total = 0;
    for scan in scans {
        let summary = scan.report.summary();
        total += summary.suspicious_lines;
        println!(
            "{} ({} suspicious of {} lines; latin {}, source-spam {}, target-spam {})",
            scan.path.display(),
            summary.suspicious_lines,
            summary.total_lines,
            summary.foreign_alphabet,
            summary.source_spam,
            summary.target_spam
        );
        if summary_only {
            continue;
        }
        for entry in &scan.report.flagged {
            println!(
                "  Line {} [{}]: {}",
                entry.line + 1,
                entry.flags.labels().join(","),
                entry.text
            );
        }
    }
    println!(
        "{} suspicious lines in {} files",
        total,
        scans.len()
    );
}

fn execute_annotate(args: AnnotateArgs, workspace_root: &Path) -> Result<()> {
    let contents = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let store = SettingsStore::load(settings_path(workspace_root))
        .with_context(|| "failed to load settings")?;
    let mut settings = store.settings().clone();
    settings.highlight_suspicious = !args.no_highlight;
    if args.show_clean {
        settings.hide_clean = false;
    }

    let mut widget: Box<dyn EditorHandle> = match args.widget {
        WidgetChoice::Line => Box::new(LineWidget::new(&contents)),
        WidgetChoice::Span => Box::new(SpanWidget::new(&contents)),
    };
    let mut sync = HighlightSynchronizer::new();
    sync.refresh(widget.as_mut(), &settings);

    render_annotated(widget.as_ref());
    Ok(())
}

fn render_annotated(editor: &dyn EditorHandle) {
    let suspicious = editor.decorations(DecorationLayer::Suspicious);
    let hidden = editor.decorations(DecorationLayer::Hidden);

    let mut marks = vec![None; editor.line_count()];
    for decoration in &suspicious {
        marks[decoration.line] = Some(style_labels(&decoration.styles));
    }
    let mut is_hidden = vec![false; editor.line_count()];
    for decoration in &hidden {
        is_hidden[decoration.line] = true;
    }

    let mut collapsed = 0usize;
    for (index, line) in editor.lines().iter().enumerate() {
        if is_hidden[index] {
            collapsed += 1;
            continue;
        }
        flush_collapsed(&mut collapsed);
        match &marks[index] {
            Some(labels) => println!("{:>4} ! [{}] {}", index + 1, labels, line),
            None => println!("{:>4}   {}", index + 1, line),
        }
    }
    flush_collapsed(&mut collapsed);
}

fn flush_collapsed(collapsed: &mut usize) {
    if *collapsed > 0 {
        println!("     ... {} clean lines hidden", collapsed);
        *collapsed = 0;
    }
}

fn style_labels(styles: &[StyleClass]) -> String {
    let mut labels = Vec::new();
    for style in styles {
        match style {
            StyleClass::ForeignAlphabet => labels.push("latin"),
            StyleClass::SourceSpam => labels.push("source-spam"),
            StyleClass::TargetSpam => labels.push("target-spam"),
            _ => {}
        }
    }
    labels.join(",")
}

fn execute_settings_command(command: SettingsCommand, workspace_root: &Path) -> Result<()> {
    let path = settings_path(workspace_root);
    match command {
        SettingsCommand::Show => {
            let store = SettingsStore::load(&path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?;
            println!("{}", serde_json::to_string_pretty(store.settings())?);
            Ok(())
        }
        SettingsCommand::Export(args) => {
            let store = SettingsStore::load(&path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?;
            store
                .export_to(&args.output)
                .with_context(|| format!("failed to export settings to {}", args.output.display()))?;
            println!("Exported settings to {}", args.output.display());
            Ok(())
        }
        SettingsCommand::Import(args) => {
            if !args.input.exists() {
                bail!("settings file '{}' does not exist", args.input.display());
            }
            let mut store = SettingsStore::load(&path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?;
            store
                .import_from(&args.input)
                .with_context(|| format!("failed to import settings from {}", args.input.display()))?;
            println!("Imported settings from {}", args.input.display());
            Ok(())
        }
    }
}

fn settings_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(".redpen").join("settings.json")
}

fn resolve_workspace(workspace: Option<PathBuf>) -> Result<PathBuf> {
    match workspace {
        Some(path) => {
            if path.is_absolute() {
                Ok(path)
            } else {
                Ok(std::env::current_dir()
                    .context("determine current directory")?
                    .join(path))
            }
        }
        None => std::env::current_dir().context("determine current directory"),
    }
}

fn collect_target_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                match entry {
                    Ok(entry) => {
                        if entry.file_type().is_file() {
                            files.push(entry.path().to_path_buf());
                        }
                    }
                    Err(err) => {
                        eprintln!("warning: {}: {}", path.display(), err);
                    }
                }
            }
        } else {
            eprintln!("warning: {} does not exist", path.display());
        }
    }
    files
}
