//! Subcommand implementations.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use codepad_api::{SnippetId, UserId};
use codepad_executor::{ClientConfig, HttpRunner};
use codepad_kernel::{
    Database, EditorStore, HistoryLog, NewSnippet, RunDisposition, SnippetStore, TextBuffer,
    user_stats,
};
use codepad_registry::{LanguageRegistry, ThemeRegistry};
use codepad_ui::OutputView;

use crate::cli::{RunArgs, SnippetCommand};

/// Shared state for commands that touch the registries or the database.
pub struct AppContext {
    pub languages: Arc<LanguageRegistry>,
    pub db_path: Option<std::path::PathBuf>,
    pub json: bool,
}

impl AppContext {
    fn database(&self) -> Result<Arc<Database>> {
        let db = match &self.db_path {
            Some(path) => Database::open(path),
            None => Database::open_default(),
        }
        .context("Failed to open database")?;
        Ok(Arc::new(db))
    }

    fn print_json(&self, value: &impl serde::Serialize) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Map a file extension to a language id.
pub fn language_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let id = match ext.as_str() {
        "js" | "mjs" | "cjs" => "javascript",
        "ts" => "typescript",
        "py" => "python",
        "java" => "java",
        "go" => "go",
        "rs" => "rust",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp",
        "cs" => "csharp",
        "rb" => "ruby",
        "swift" => "swift",
        _ => return None,
    };
    Some(id)
}

fn resolve_language(ctx: &AppContext, explicit: Option<&str>, file: &Path) -> Result<&'static str> {
    let id = match explicit {
        Some(id) => id,
        None => language_for_path(file).with_context(|| {
            format!("Cannot infer language for '{}'; pass --language", file.display())
        })?,
    };
    match ctx.languages.find(id) {
        Some(config) => Ok(config.id),
        None => bail!("Unknown language '{}'", id),
    }
}

fn read_source(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read '{}'", file.display()))
}

fn parse_id(raw: &str) -> Result<SnippetId> {
    raw.parse().with_context(|| format!("Invalid snippet id '{}'", raw))
}

pub fn languages(ctx: &AppContext) -> Result<()> {
    if ctx.json {
        let all: Vec<_> = ctx.languages.list().collect();
        return ctx.print_json(&all);
    }
    for lang in ctx.languages.list() {
        println!("{:<12} {:<12} {}", lang.id, lang.label, lang.version);
    }
    Ok(())
}

pub fn themes(ctx: &AppContext) -> Result<()> {
    let themes = ThemeRegistry::builtin();
    if ctx.json {
        let all: Vec<_> = themes.list().collect();
        return ctx.print_json(&all);
    }
    for theme in themes.list() {
        println!("{:<16} {:<16} {}", theme.id, theme.label, theme.swatch_color);
    }
    Ok(())
}

/// Returns whether the run succeeded.
pub async fn run(ctx: &AppContext, args: RunArgs) -> Result<bool> {
    let language = resolve_language(ctx, args.language.as_deref(), &args.file)?;
    let source = read_source(&args.file)?;

    let mut config = ClientConfig::from_env();
    if let Some(endpoint) = args.endpoint {
        config = config.with_endpoint(endpoint);
    }
    if let Some(secs) = args.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    let runner = HttpRunner::new(config, ctx.languages.clone())?;

    let store = EditorStore::new(
        ctx.languages.clone(),
        Arc::new(ThemeRegistry::builtin()),
        Arc::new(runner),
    );
    store.set_language(language);
    store.attach_editor_handle(Arc::new(TextBuffer::new(source)));

    if let Some(user) = args.user {
        let history = Arc::new(HistoryLog::new(ctx.database()?));
        history.sign_in(UserId::new(user));
        store.add_observer(history);
    }

    if store.run().await == RunDisposition::AlreadyRunning {
        bail!("A run is already in progress");
    }

    let snapshot = store.snapshot();
    if ctx.json {
        ctx.print_json(&snapshot)?;
        return Ok(snapshot.error.is_none());
    }

    let view = OutputView::from_snapshot(&snapshot);
    match &view {
        OutputView::Error(error) => {
            eprint!("{error}");
            if !error.ends_with('\n') {
                eprintln!();
            }
        }
        OutputView::Output(output) => print!("{output}"),
        OutputView::Running | OutputView::Idle => {}
    }
    Ok(!view.is_error())
}

pub fn history(ctx: &AppContext, user: &str, limit: usize) -> Result<()> {
    let log = HistoryLog::new(ctx.database()?);
    let records = log.recent(&UserId::new(user), limit)?;
    if ctx.json {
        return ctx.print_json(&records);
    }
    for record in records {
        let status = if record.error.is_some() { "error" } else { "ok" };
        println!(
            "{}  {:<10} {:<5} {}",
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.language,
            status,
            first_line(&record.code)
        );
    }
    Ok(())
}

pub fn stats(ctx: &AppContext, user: &str) -> Result<()> {
    let db = ctx.database()?;
    let stats = user_stats(&db, &UserId::new(user))?;
    if ctx.json {
        return ctx.print_json(&stats);
    }
    println!("Total executions:      {}", stats.total_executions);
    println!("Last 24 hours:         {}", stats.last_24_hours);
    println!("Languages used:        {} ({})", stats.languages_count, stats.languages.join(", "));
    println!("Favorite language:     {}", stats.favorite_language.as_deref().unwrap_or("-"));
    println!("Starred snippets:      {}", stats.starred_count);
    println!("Most starred language: {}", stats.most_starred_language.as_deref().unwrap_or("-"));
    Ok(())
}

pub fn snippet(ctx: &AppContext, command: SnippetCommand) -> Result<()> {
    let store = SnippetStore::new(ctx.database()?, ctx.languages.clone());

    match command {
        SnippetCommand::Share { file, title, user, name, language } => {
            let language = resolve_language(ctx, language.as_deref(), &file)?;
            let code = read_source(&file)?;
            let name = name.unwrap_or_else(|| user.clone());
            let new = NewSnippet { title: &title, language, code: &code };
            let snippet = store.create(&UserId::new(user), &name, new)?;
            println!("{}", snippet.id);
        }
        SnippetCommand::List => print_snippets(ctx, store.list()?)?,
        SnippetCommand::Search { query, language } => {
            print_snippets(ctx, store.search(&query, language.as_deref())?)?
        }
        SnippetCommand::Show { id } => {
            let id = parse_id(&id)?;
            let snippet = store.get(id)?.with_context(|| format!("No snippet {}", id))?;
            if ctx.json {
                ctx.print_json(&snippet)?;
            } else {
                print!("{}", snippet.code);
            }
        }
        SnippetCommand::Delete { id, user } => {
            store.delete(parse_id(&id)?, &UserId::new(user))?;
        }
        SnippetCommand::Star { id, user } => {
            let starred = store.toggle_star(parse_id(&id)?, &UserId::new(user))?;
            println!("{}", if starred { "starred" } else { "unstarred" });
        }
    }
    Ok(())
}

fn print_snippets(ctx: &AppContext, snippets: Vec<codepad_api::Snippet>) -> Result<()> {
    if ctx.json {
        return ctx.print_json(&snippets);
    }
    for s in snippets {
        println!("{}  {:<10} {:>3}*  {}  ({})", s.id, s.language, s.stars, s.title, s.user_name);
    }
    Ok(())
}

fn first_line(code: &str) -> &str {
    code.lines().find(|line| !line.trim().is_empty()).unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_for_path() {
        assert_eq!(language_for_path(Path::new("main.rs")), Some("rust"));
        assert_eq!(language_for_path(Path::new("script.PY")), Some("python"));
        assert_eq!(language_for_path(Path::new("a/b/c.cc")), Some("cpp"));
        assert_eq!(language_for_path(Path::new("Program.cs")), Some("csharp"));
        assert_eq!(language_for_path(Path::new("notes.txt")), None);
        assert_eq!(language_for_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_every_inferred_language_is_registered() {
        let registry = LanguageRegistry::builtin();
        for ext in ["js", "ts", "py", "java", "go", "rs", "cpp", "cs", "rb", "swift"] {
            let id = language_for_path(Path::new(&format!("x.{ext}"))).unwrap();
            assert!(registry.contains(id), "{id} not registered");
        }
    }

    fn context(db_path: Option<std::path::PathBuf>) -> AppContext {
        AppContext {
            languages: Arc::new(LanguageRegistry::builtin()),
            db_path,
            json: false,
        }
    }

    #[test]
    fn test_resolve_language_explicit_wins() {
        let ctx = context(None);
        assert_eq!(resolve_language(&ctx, Some("go"), Path::new("x.py")).unwrap(), "go");
        assert!(resolve_language(&ctx, Some("cobol"), Path::new("x.py")).is_err());
        assert!(resolve_language(&ctx, None, Path::new("x.txt")).is_err());
    }

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("\n\n  print(1)\nprint(2)"), "print(1)");
        assert_eq!(first_line(""), "");
    }

    // -------------------------------------------------------------------------
    // Database-backed commands
    // -------------------------------------------------------------------------

    #[test]
    fn test_stats_and_history_on_fresh_database() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(Some(dir.path().join("codepad.db")));

        stats(&ctx, "alice").unwrap();
        history(&ctx, "alice", 5).unwrap();
    }

    #[test]
    fn test_snippet_share_then_star() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("codepad.db");
        let source = dir.path().join("hello.py");
        std::fs::write(&source, "print('hi')\n").unwrap();
        let ctx = context(Some(db_path.clone()));

        snippet(
            &ctx,
            SnippetCommand::Share {
                file: source,
                title: "Hello".to_string(),
                user: "alice".to_string(),
                name: None,
                language: None,
            },
        )
        .unwrap();

        let db = Arc::new(Database::open(&db_path).unwrap());
        let store = SnippetStore::new(db, ctx.languages.clone());
        let shared = store.list().unwrap();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].language, "python");
        assert_eq!(shared[0].user_name, "alice");

        let id = shared[0].id.to_string();
        snippet(&ctx, SnippetCommand::Star { id, user: "bob".to_string() }).unwrap();
        stats(&ctx, "bob").unwrap();
        assert_eq!(store.get(shared[0].id).unwrap().unwrap().stars, 1);
    }
}
