use anyhow::Context;
use clap::Parser;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use vitrine_runtime::{
    Catalog, Dispatcher, PageSink, Registry, RuntimeConfig, TerminalSink, BUILTIN_REGISTRY,
};

#[derive(Debug, Parser)]
#[command(
    name = "vitrine",
    about = "Vitrine: executa snippets de demonstração e mostra a saída capturada"
)]
struct Args {
    /// Executa o snippet com este ID (pode repetir)
    #[arg(long = "run", value_name = "ID")]
    run: Vec<String>,

    /// Executa todos os snippets do catálogo, na ordem do catálogo
    #[arg(long)]
    all: bool,

    /// Lista as entradas do catálogo e se cada uma tem snippet registrado
    #[arg(long)]
    list: bool,

    /// Verifica se todo ID do catálogo tem snippet registrado
    #[arg(long)]
    check: bool,

    /// Gera uma página HTML estática com a saída de todo o catálogo
    #[arg(long, value_name = "ARQUIVO")]
    html: Option<PathBuf>,

    /// Caminho para um catálogo JSON alternativo
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Caminho para o arquivo de configuração TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Logs de diagnóstico (equivale a RUST_LOG=debug)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .try_init();
}

fn load_catalog(args: &Args, config: &RuntimeConfig) -> anyhow::Result<Catalog> {
    match args.catalog.as_ref().or(config.catalog.as_ref()) {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Falha ao carregar catálogo '{}'", path.display())),
        None => Catalog::builtin().context("Catálogo embarcado inválido"),
    }
}

fn list_entries(catalog: &Catalog, registry: &Registry) {
    println!("Snippets do catálogo ({}):", catalog.len());
    for entry in catalog.entries() {
        let status = if registry.contains(&entry.id) {
            "ok"
        } else {
            "SEM SNIPPET"
        };
        println!(
            "- {:<16} [{:<8}] {} ({})",
            entry.id, entry.section, entry.title, status
        );
    }

    for id in catalog.unlisted(registry) {
        println!("- {id:<16} registrado, mas fora do catálogo");
    }
}

fn check(catalog: &Catalog, registry: &Registry) -> anyhow::Result<()> {
    catalog.verify(registry)?;
    println!(
        "Catálogo completo: {} entradas, todas com snippet registrado.",
        catalog.len()
    );
    Ok(())
}

fn render_page(
    catalog: &Catalog,
    registry: &Registry,
    config: &RuntimeConfig,
    path: &Path,
) -> anyhow::Result<()> {
    let page = PageSink::from_catalog(catalog, config.placeholder.as_str());
    let mut dispatcher = Dispatcher::new(registry, page);
    let ran = dispatcher.dispatch_all(catalog.ids())?;
    let html = dispatcher.into_sink().render(&config.page_title);

    fs::write(path, html)
        .with_context(|| format!("Falha ao escrever página em '{}'", path.display()))?;
    println!("> Página gerada em {} ({ran} snippets).", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = RuntimeConfig::load(args.config.as_deref())?;
    let catalog = load_catalog(&args, &config)?;
    let registry: &Registry = &BUILTIN_REGISTRY;

    if args.list {
        // Só lista e sai
        list_entries(&catalog, registry);
        return Ok(());
    }

    if args.check {
        return check(&catalog, registry);
    }

    if args.run.is_empty() && !args.all && args.html.is_none() {
        anyhow::bail!("Use --run <id>, --all, --html <arquivo>, --list ou --check");
    }

    config
        .check_strict(&catalog, registry)
        .context("Modo strict: catálogo incompleto")?;

    if let Some(path) = &args.html {
        render_page(&catalog, registry, &config, path)?;
    }

    if args.all || !args.run.is_empty() {
        let stdout = io::stdout();
        let sink = TerminalSink::new(stdout.lock(), config.placeholder.as_str());
        let mut dispatcher = Dispatcher::new(registry, sink);

        let ids: Vec<&str> = if args.all {
            catalog.ids().collect()
        } else {
            args.run.iter().map(String::as_str).collect()
        };

        for id in ids {
            if !dispatcher.dispatch(id)? {
                eprintln!("[vitrine] snippet '{id}' não registrado; nada a executar");
            }
        }
    }

    Ok(())
}
