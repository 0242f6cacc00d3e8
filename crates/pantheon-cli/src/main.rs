use pantheon::{
    Constellation, ConstellationConfig, Deity, DomainColorRegistry, Mythology, PipelineError,
    apply_relationship_rows, build_scene, classic_pantheon, parse_bindings,
    parse_relationship_rows, validate_deities,
};
use serde::Serialize;
use serde_json::json;
use std::io::Read;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Core(pantheon::Error),
    Pipeline(PipelineError),
    Json(serde_json::Error),
    Invalid(usize),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Pipeline(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Invalid(count) => write!(f, "Validation failed with {count} error(s)"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<pantheon::Error> for CliError {
    fn from(value: pantheon::Error) -> Self {
        Self::Core(value)
    }
}

impl From<PipelineError> for CliError {
    fn from(value: PipelineError) -> Self {
        Self::Pipeline(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Scene,
    Classic,
    Validate,
    Color,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    domains: Vec<String>,
    pretty: bool,
    seed: Option<u64>,
    mythology: Option<String>,
    start_id: Option<u32>,
    no_cluster: bool,
    config: Option<String>,
    relations: Option<String>,
}

fn usage() -> &'static str {
    "pantheon-cli\n\
\n\
USAGE:\n\
  pantheon-cli [layout] [--pretty] [--seed <n>] [--mythology <name>] [--start-id <n>] [--no-cluster] [--relations <path>] [--config <path>] [<path>|-]\n\
  pantheon-cli scene [--pretty] [--seed <n>] [--mythology <name>] [--start-id <n>] [--no-cluster] [--relations <path>] [--config <path>] [<path>|-]\n\
  pantheon-cli classic [--pretty] [--seed <n>] [--config <path>]\n\
  pantheon-cli validate [--pretty] [<path>|-]\n\
  pantheon-cli color [--seed <n>] <domain>...\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - layout and scene read a SPARQL JSON response (`results.bindings`) or a bare array of rows.\n\
  - --relations reads a second response with subjectLabel/objectLabel rows and adds those relations.\n\
  - validate reads a deity JSON array and exits with status 3 when any entry is invalid.\n\
  - Set PANTHEON_LOG (e.g. PANTHEON_LOG=debug) to see layout diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut seen_positional = false;

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--pretty" => args.pretty = true,
            "--no-cluster" => args.no_cluster = true,
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--mythology" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if name.trim().is_empty() {
                    return Err(CliError::Usage(usage()));
                }
                args.mythology = Some(name.trim().to_string());
            }
            "--start-id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.start_id = Some(id.parse::<u32>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--relations" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.relations = Some(path.clone());
            }
            "--" => {
                for rest in it.by_ref() {
                    push_positional(&mut args, rest)?;
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            positional => {
                match subcommand(positional) {
                    Some(command) if !seen_positional => args.command = command,
                    _ => push_positional(&mut args, positional)?,
                }
                seen_positional = true;
            }
        }
    }

    if matches!(args.command, Command::Color) && args.domains.is_empty() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

/// Subcommand names are only recognized as the first positional argument.
fn subcommand(word: &str) -> Option<Command> {
    match word {
        "layout" => Some(Command::Layout),
        "scene" => Some(Command::Scene),
        "classic" => Some(Command::Classic),
        "validate" => Some(Command::Validate),
        "color" => Some(Command::Color),
        _ => None,
    }
}

fn push_positional(args: &mut Args, value: &str) -> Result<(), CliError> {
    if matches!(args.command, Command::Color) {
        args.domains.push(value.to_string());
        return Ok(());
    }
    if args.input.is_some() {
        return Err(CliError::Usage(usage()));
    }
    args.input = Some(value.to_string());
    Ok(())
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

/// Defaults, then the `--config` file, then command line flags.
fn load_config(args: &Args) -> Result<ConstellationConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => ConstellationConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => ConstellationConfig::defaults(),
    };
    if let Some(seed) = args.seed {
        config.set_value("layout.seed", json!(seed));
    }
    if args.no_cluster {
        config.set_value("clustering.enabled", json!(false));
    }
    if let Some(name) = args.mythology.as_deref() {
        match name.parse::<Mythology>() {
            Ok(known) => {
                config.set_value("conversion.mythology", json!(known.name()));
                config.set_value("conversion.startId", json!(known.start_id()));
            }
            Err(()) => config.set_value("conversion.mythology", json!(name)),
        }
    }
    if let Some(start_id) = args.start_id {
        config.set_value("conversion.startId", json!(start_id));
    }
    Ok(config)
}

fn conversion_settings(config: &ConstellationConfig) -> Result<(String, u32), CliError> {
    let mythology = config
        .get_str("conversion.mythology")
        .unwrap_or(Mythology::Greek.name())
        .to_string();
    let start_id = config
        .optional_u64("conversion.startId")?
        .unwrap_or(1);
    let start_id = u32::try_from(start_id).map_err(|_| pantheon::Error::InvalidConfig {
        path: "conversion.startId".to_string(),
        message: format!("{start_id} does not fit in u32"),
    })?;
    Ok((mythology, start_id))
}

fn build_deities(args: &Args, constellation: &mut Constellation) -> Result<Vec<Deity>, CliError> {
    let (mythology, start_id) = conversion_settings(constellation.config())?;
    let records = parse_bindings(&read_input(args.input.as_deref())?)?;
    let mut deities = constellation.build(&records, &mythology, start_id)?;
    if let Some(path) = args.relations.as_deref() {
        let rows = parse_relationship_rows(&std::fs::read_to_string(path)?)?;
        let added = apply_relationship_rows(&mut deities, &rows);
        tracing::debug!(rows = rows.len(), added, "applied relationship rows");
    }
    tracing::info!(
        deities = deities.len(),
        %mythology,
        clustered = constellation.clustering_enabled(),
        "converted knowledge-base rows"
    );
    Ok(deities)
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Layout => {
            let mut constellation = Constellation::new(load_config(&args)?)?;
            let deities = build_deities(&args, &mut constellation)?;
            write_json(&deities, args.pretty)
        }
        Command::Scene => {
            let mut constellation = Constellation::new(load_config(&args)?)?;
            let deities = build_deities(&args, &mut constellation)?;
            let scene = build_scene(&deities, constellation.colors());
            write_json(&scene, args.pretty)
        }
        Command::Classic => {
            let constellation = Constellation::new(load_config(&args)?)?;
            let deities = classic_pantheon();
            tracing::info!(deities = deities.len(), "loaded classic dataset");
            let scene = build_scene(&deities, constellation.colors());
            write_json(&json!({ "deities": deities, "scene": scene }), args.pretty)
        }
        Command::Validate => {
            let deities: Vec<Deity> = serde_json::from_str(&read_input(args.input.as_deref())?)?;
            let report = validate_deities(&deities);
            write_json(&report, args.pretty)?;
            if report.valid {
                Ok(())
            } else {
                Err(CliError::Invalid(report.errors.len()))
            }
        }
        Command::Color => {
            let colors = match args.seed {
                Some(seed) => DomainColorRegistry::with_seed(seed),
                None => DomainColorRegistry::new(),
            };
            for domain in &args.domains {
                println!("{domain}\t{}", colors.color_for(domain));
            }
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("PANTHEON_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::Invalid(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
