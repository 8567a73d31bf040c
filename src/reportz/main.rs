use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use reportz::api::ReportzApi;
use reportz::commands::{CmdMessage, MessageLevel, ReportDetail};
use reportz::config::ReportzConfig;
use reportz::editor::edit_text;
use reportz::error::{ReportzError, Result};
use reportz::model::{Paragraph, Report};
use reportz::settings::Setting;
use reportz::snapshot::{ParagraphRecord, ReportRecord};
use reportz::store::fs::FileStore;
use std::path::{Path, PathBuf};
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands, ParCommands, RepCommands, UiCommands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: ReportzApi<FileStore>,
    config: ReportzConfig,
    root: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Init => handle_init(&mut ctx),
        Commands::Status => handle_status(&ctx),
        Commands::Save => handle_save(&mut ctx),
        Commands::Discard => handle_discard(&mut ctx),
        Commands::Check => handle_check(&ctx),
        Commands::Render { id } => handle_render(&ctx, &id),
        Commands::Par(cmd) => match cmd {
            ParCommands::Add {
                id,
                label,
                description,
                text,
                no_editor,
            } => handle_par_add(&mut ctx, id, label, description, text, no_editor),
            ParCommands::Edit {
                id,
                rename,
                label,
                description,
                text,
                edit,
            } => handle_par_edit(&mut ctx, id, rename, label, description, text, edit),
            ParCommands::Delete { id } => handle_par_delete(&mut ctx, &id),
            ParCommands::List { search } => handle_par_list(&ctx, search.as_deref()),
            ParCommands::Show { id } => handle_par_show(&ctx, &id),
        },
        Commands::Rep(cmd) => match cmd {
            RepCommands::Add { id, title, refs } => handle_rep_add(&mut ctx, id, title, refs),
            RepCommands::Edit { id, rename, title } => handle_rep_edit(&mut ctx, id, rename, title),
            RepCommands::Delete { id } => handle_rep_delete(&mut ctx, &id),
            RepCommands::List { search } => handle_rep_list(&ctx, search.as_deref()),
            RepCommands::Show { id } => handle_rep_show(&ctx, &id),
            RepCommands::Attach { report, paragraph } => {
                handle_attach(&mut ctx, &report, &paragraph)
            }
            RepCommands::Detach { report, paragraph } => {
                handle_detach(&mut ctx, &report, &paragraph)
            }
            RepCommands::Tail { report, paragraph } => handle_tail(&mut ctx, &report, &paragraph),
        },
        Commands::Ui(cmd) => match cmd {
            UiCommands::List => handle_ui_list(&ctx),
            UiCommands::On { name } => handle_ui_toggle(&mut ctx, &name, true),
            UiCommands::Off { name } => handle_ui_toggle(&mut ctx, &name, false),
            UiCommands::Order { name, order } => handle_ui_order(&mut ctx, &name, order),
            UiCommands::ShowAll => handle_ui_all(&mut ctx, true),
            UiCommands::HideAll => handle_ui_all(&mut ctx, false),
            UiCommands::Renumber { step } => handle_ui_renumber(&mut ctx, step),
            UiCommands::Export => handle_ui_export(&ctx),
        },
        Commands::Config { key, value } => handle_config(&mut ctx, key, value),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let root = resolve_root(cli.dir.as_deref())?;
    let config = ReportzConfig::load(&root).unwrap_or_default();
    let store = FileStore::new(root.clone());
    let api = ReportzApi::open(store)?;
    Ok(AppContext { api, config, root })
}

/// Store directory resolution: --dir flag, then $REPORTZ_DIR, then a
/// .reportz directory in the cwd, then the user data dir.
fn resolve_root(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Ok(dir) = std::env::var("REPORTZ_DIR") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let local = cwd.join(".reportz");
    if local.is_dir() {
        return Ok(local);
    }
    let dirs = ProjectDirs::from("com", "reportz", "reportz")
        .ok_or_else(|| ReportzError::Store("could not determine a data directory".into()))?;
    Ok(dirs.data_dir().to_path_buf())
}

// --- lifecycle handlers ---

fn handle_init(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    println!("Store: {}", ctx.root.display());
    Ok(())
}

fn handle_status(ctx: &AppContext) -> Result<()> {
    println!("Store: {}", ctx.root.display());
    let result = ctx.api.status()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_save(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.save()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_discard(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.discard()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_check(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.check()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_render(ctx: &AppContext, id: &str) -> Result<()> {
    let result = ctx.api.render_report(id)?;
    // warnings go to stderr so the rendered text can be piped
    for message in &result.messages {
        eprintln!("{}", format!("Warning: {}", message.content).yellow());
    }
    if let Some(text) = &result.text {
        println!("{}", text);
    }
    Ok(())
}

// --- paragraph handlers ---

fn handle_par_add(
    ctx: &mut AppContext,
    id: String,
    label: Option<String>,
    description: Option<String>,
    text: Option<String>,
    no_editor: bool,
) -> Result<()> {
    let text = match text {
        Some(t) => t,
        None if no_editor => String::new(),
        None => edit_text("", &ctx.config.file_ext)?,
    };
    let rec = ParagraphRecord {
        label: label.unwrap_or_else(|| id.clone()),
        description: description.unwrap_or_default(),
        id,
        text,
    };
    let result = ctx.api.add_paragraph(&rec)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_par_edit(
    ctx: &mut AppContext,
    id: String,
    rename: Option<String>,
    label: Option<String>,
    description: Option<String>,
    text: Option<String>,
    edit: bool,
) -> Result<()> {
    let existing = ctx
        .api
        .session()
        .doc
        .paragraph(&id)
        .cloned()
        .ok_or_else(|| ReportzError::Validation(format!("no such paragraph: {id}")))?;

    let text = match text {
        Some(t) => t,
        None if edit => edit_text(&existing.text, &ctx.config.file_ext)?,
        None => existing.text,
    };
    let rec = ParagraphRecord {
        id: rename.unwrap_or_else(|| id.clone()),
        label: label.unwrap_or(existing.label),
        description: description.unwrap_or(existing.description),
        text,
    };
    let result = ctx.api.update_paragraph(&id, &rec)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_par_delete(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.delete_paragraph(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_par_list(ctx: &AppContext, search: Option<&str>) -> Result<()> {
    let result = ctx.api.list_paragraphs(search)?;
    print_paragraphs(&result.paragraphs);
    print_messages(&result.messages);
    Ok(())
}

fn handle_par_show(ctx: &AppContext, id: &str) -> Result<()> {
    let result = ctx.api.show_paragraph(id)?;
    print_full_paragraphs(&result.paragraphs);
    Ok(())
}

// --- report handlers ---

fn handle_rep_add(
    ctx: &mut AppContext,
    id: String,
    title: Option<String>,
    refs: Vec<String>,
) -> Result<()> {
    let rec = ReportRecord {
        title: title.unwrap_or_else(|| id.clone()),
        id,
        paragraph_ids: refs,
    };
    let result = ctx.api.add_report(&rec)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_rep_edit(
    ctx: &mut AppContext,
    id: String,
    rename: Option<String>,
    title: Option<String>,
) -> Result<()> {
    let existing = ctx
        .api
        .session()
        .doc
        .report(&id)
        .cloned()
        .ok_or_else(|| ReportzError::Validation(format!("no such report: {id}")))?;

    let rec = ReportRecord {
        id: rename.unwrap_or_else(|| id.clone()),
        title: title.unwrap_or(existing.title),
        paragraph_ids: existing.paragraph_ids,
    };
    let result = ctx.api.update_report(&id, &rec)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_rep_delete(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.delete_report(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_rep_list(ctx: &AppContext, search: Option<&str>) -> Result<()> {
    let result = ctx.api.list_reports(search)?;
    print_reports(&result.reports);
    print_messages(&result.messages);
    Ok(())
}

fn handle_rep_show(ctx: &AppContext, id: &str) -> Result<()> {
    let result = ctx.api.show_report(id)?;
    for detail in &result.details {
        print_report_detail(detail);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_attach(ctx: &mut AppContext, report: &str, paragraph: &str) -> Result<()> {
    let result = ctx.api.attach_ref(report, paragraph)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_detach(ctx: &mut AppContext, report: &str, paragraph: &str) -> Result<()> {
    let result = ctx.api.detach_ref(report, paragraph)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_tail(ctx: &mut AppContext, report: &str, paragraph: &str) -> Result<()> {
    let result = ctx.api.move_ref_to_end(report, paragraph)?;
    print_messages(&result.messages);
    Ok(())
}

// --- settings handlers ---

fn handle_ui_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_settings()?;
    print_settings(&result.settings);
    Ok(())
}

fn handle_ui_toggle(ctx: &mut AppContext, name: &str, enabled: bool) -> Result<()> {
    let result = ctx.api.set_enabled(name, enabled)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_ui_order(ctx: &mut AppContext, name: &str, order: f64) -> Result<()> {
    let result = ctx.api.set_order(name, order)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_ui_all(ctx: &mut AppContext, enabled: bool) -> Result<()> {
    let result = if enabled {
        ctx.api.enable_all()?
    } else {
        ctx.api.disable_all()?
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_ui_renumber(ctx: &mut AppContext, step: Option<i64>) -> Result<()> {
    let step = step.unwrap_or(ctx.config.renumber_step);
    let result = ctx.api.renumber(step)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_ui_export(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.export_settings()?;
    if let Some(text) = &result.text {
        print!("{}", text);
    }
    Ok(())
}

// --- config ---

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            println!("file_ext = {}", ctx.config.file_ext);
            println!("renumber_step = {}", ctx.config.renumber_step);
        }
        (Some(key), None) => match ctx.config.get(&key) {
            Some(value) => println!("{} = {}", key, value),
            None => {
                return Err(ReportzError::Validation(format!(
                    "unknown config key: {key}"
                )))
            }
        },
        (Some(key), Some(value)) => {
            ctx.config.set(&key, &value)?;
            ctx.config.save(&ctx.root)?;
            println!("{} = {}", key, value);
        }
    }
    Ok(())
}

// --- output helpers ---

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const PREVIEW_LEN: usize = 60;

fn preview(text: &str) -> String {
    let mut out: String = text
        .chars()
        .take(PREVIEW_LEN)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    if text.chars().count() > PREVIEW_LEN {
        out.push('…');
    }
    out
}

fn pad_to(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn print_paragraphs(paragraphs: &[Paragraph]) {
    if paragraphs.is_empty() {
        println!("No paragraphs found.");
        return;
    }
    let id_width = paragraphs.iter().map(|p| p.id.width()).max().unwrap_or(0);
    let label_width = paragraphs
        .iter()
        .map(|p| p.label.width())
        .max()
        .unwrap_or(0);
    for p in paragraphs {
        println!(
            "  {}  {}  {}",
            pad_to(&p.id, id_width).yellow(),
            pad_to(&p.label, label_width).bold(),
            preview(&p.text).dimmed()
        );
    }
}

fn print_full_paragraphs(paragraphs: &[Paragraph]) {
    for (i, p) in paragraphs.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!("{} {}", p.id.yellow(), p.label.bold());
        if !p.description.is_empty() {
            println!("{}", p.description.dimmed());
        }
        println!("--------------------------------");
        println!("{}", p.text);
    }
}

fn print_reports(reports: &[Report]) {
    if reports.is_empty() {
        println!("No reports found.");
        return;
    }
    let id_width = reports.iter().map(|r| r.id.width()).max().unwrap_or(0);
    for r in reports {
        let count = r.paragraph_ids.len();
        println!(
            "  {}  {}  {}",
            pad_to(&r.id, id_width).yellow(),
            r.title.bold(),
            format!("({} paragraph(s))", count).dimmed()
        );
    }
}

fn print_report_detail(detail: &ReportDetail) {
    println!(
        "{} {}",
        detail.report.id.yellow(),
        detail.report.title.bold()
    );
    println!("--------------------------------");
    if detail.entries.is_empty() {
        println!("  (no paragraph references)");
        return;
    }
    let pid_width = detail
        .entries
        .iter()
        .map(|e| e.paragraph_id.width())
        .max()
        .unwrap_or(0);
    for (i, entry) in detail.entries.iter().enumerate() {
        let label = match &entry.label {
            Some(label) => label.normal(),
            None => "(missing)".red(),
        };
        println!(
            "  {:>2}. {}  {}",
            i + 1,
            pad_to(&entry.paragraph_id, pid_width).yellow(),
            label
        );
    }
}

fn print_settings(settings: &[Setting]) {
    if settings.is_empty() {
        println!("No parameters in the catalog.");
        return;
    }

    let name_width = settings.iter().map(|s| s.name.width()).max().unwrap_or(0);
    let order_width = settings
        .iter()
        .map(|s| s.order.to_string().len())
        .max()
        .unwrap_or(1);

    let sort_key = |s: &&Setting| (s.order, s.name.clone());
    let mut visible: Vec<&Setting> = settings.iter().filter(|s| s.enabled).collect();
    let mut hidden: Vec<&Setting> = settings.iter().filter(|s| !s.enabled).collect();
    visible.sort_by_key(sort_key);
    hidden.sort_by_key(sort_key);

    for (heading, group) in [("Visible:", &visible), ("Hidden:", &hidden)] {
        println!("{}", heading.bold());
        if group.is_empty() {
            println!("  {}", "(none)".dimmed());
            continue;
        }
        for s in group {
            println!(
                "  {:>ow$}  {}  {}",
                s.order,
                pad_to(&s.name, name_width).yellow(),
                s.description.dimmed(),
                ow = order_width
            );
        }
    }
}
