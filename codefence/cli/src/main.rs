use clap::Parser;
use codefence_cli::{Cli, Command};
use codefence_lib::clipboard::Osc52Clipboard;
use codefence_lib::fence::try_parse_metadata;
use codefence_lib::highlighting::{ColorMode, LanguageRegistry, SyntectTokenizer, ThemePair};
use codefence_lib::input::CodeBlockInput;
use codefence_lib::range::expand_ranges;
use codefence_lib::render::{
    CodeBlock, LanguageMenu, MenuFragment, RenderOptions, assets, render_markdown,
};
use color_eyre::eyre::{Context, Result, eyre};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber based on verbosity level.
///
/// Verbosity levels:
/// - 0 (default): WARN only (errors and warnings)
/// - 1 (-v): INFO (color mode detection, theme choice)
/// - 2 (-vv): DEBUG (per-block render summaries, language fallback)
/// - 3 (-vvv): TRACE (tokenizer detail)
/// - 4+ (-vvvv): TRACE with file/line numbers
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,codefence=info,codefence_lib=info".to_string(),
            2 => "info,codefence=debug,codefence_lib=debug".to_string(),
            _ => "debug,codefence=trace,codefence_lib=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_file(verbose >= 4)
                .with_line_number(verbose >= 4)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(command) = &cli.command {
        return run_command(command);
    }

    // Listing flags need no input
    if cli.list_themes {
        list_themes();
        return Ok(());
    }
    if cli.list_languages {
        list_languages();
        return Ok(());
    }

    let options = resolve_options(&cli);
    tracing::info!(
        theme = options.theme_pair.kebab_name(),
        color_mode = options.color_mode.as_str(),
        "Resolved render options"
    );

    let text = load_input(cli.input.as_ref())?;

    if cli.is_block_mode() {
        render_block(&cli, &text, &options)
    } else {
        if cli.copy {
            return Err(eyre!("--copy requires --block"));
        }
        let menu = cli
            .language_menu
            .then(|| LanguageMenu::from_registry("", LanguageRegistry::global()));
        let html = render_markdown(&text, &options, menu.as_ref().map(|m| m as &dyn MenuFragment))
            .context("Failed to render markdown")?;
        print!("{}", html);
        Ok(())
    }
}

fn run_command(command: &Command) -> Result<()> {
    match command {
        Command::Expand { ranges } => {
            let lines = expand_ranges(ranges)
                .wrap_err_with(|| format!("Invalid line selectors: {:?}", ranges))?;
            println!("{}", serde_json::to_string(&lines)?);
        }
        Command::Meta { meta } => {
            let parsed = try_parse_metadata(meta).wrap_err("Invalid fence metadata")?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
    }
    Ok(())
}

/// Flags win over `CODE_THEME` and the detected color mode.
fn resolve_options(cli: &Cli) -> RenderOptions {
    let mut options = RenderOptions::from_env();
    if let Some(theme) = cli.theme {
        options.theme_pair = theme;
    }
    if cli.light {
        options.color_mode = ColorMode::Light;
    } else if cli.dark {
        options.color_mode = ColorMode::Dark;
    }
    options.line_numbers = cli.line_numbers;
    options.include_styles = !cli.no_styles;
    options.include_copy_script = !cli.no_script;
    options
}

fn render_block(cli: &Cli, text: &str, options: &RenderOptions) -> Result<()> {
    let mut input = CodeBlockInput::new(text);
    if let Some(lang) = &cli.lang {
        input = input.with_language(lang);
    }
    if let Some(meta) = &cli.meta {
        input = input.with_metastring(meta.as_str());
    }

    let menu = cli
        .language_menu
        .then(|| LanguageMenu::from_registry(input.language(), LanguageRegistry::global()));

    let theme = options.theme();
    let mut block = CodeBlock::new(&input)
        .with_optional_menu(menu.as_ref().map(|m| m as &dyn MenuFragment))
        .render(&SyntectTokenizer::new(), &theme)
        .context("Failed to render code block")?;

    if cli.copy {
        let mut clipboard = Osc52Clipboard::new(io::stderr());
        block.copy.on_copy(&mut clipboard);
        eprintln!("{}", block.copy.label());
    }

    print!("{}", assets(&theme, options));
    print!("{}", block.to_html(&theme, options));
    Ok(())
}

/// Loads input text from a file path or stdin.
fn load_input(path: Option<&PathBuf>) -> Result<String> {
    if let Some(p) = path {
        if p.to_str() == Some("-") {
            // Explicit stdin marker
            read_from_stdin()
        } else {
            std::fs::read_to_string(p).wrap_err_with(|| format!("Failed to read file: {:?}", p))
        }
    } else if atty::is(atty::Stream::Stdin) {
        Err(eyre!("No input file provided. Use `codefence --help` for usage."))
    } else {
        read_from_stdin()
    }
}

fn read_from_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .wrap_err("Failed to read from stdin")?;
    Ok(buffer)
}

fn list_themes() {
    println!("Available themes:\n");
    for theme_pair in ThemePair::all() {
        println!(
            "  {:20} {}",
            theme_pair.kebab_name(),
            theme_pair.description(ColorMode::Dark)
        );
    }
    println!("\nUse --theme <name> or CODE_THEME=<name> to choose one");
}

fn list_languages() {
    println!("Registered languages:\n");
    for (id, grammar) in LanguageRegistry::global().languages() {
        println!("  {:12} {}", id, grammar);
    }
    println!("\nUnregistered languages render as plain text");
}
