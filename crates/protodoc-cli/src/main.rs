use protodoc_core::{DiagramConfig, Documentation};
use protodoc_layout::RankDir;
use protodoc_render::SvgRenderOptions;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Core(protodoc_core::Error),
    Render(protodoc_render::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<protodoc_core::Error> for CliError {
    fn from(value: protodoc_core::Error) -> Self {
        Self::Core(value)
    }
}

impl From<protodoc_render::Error> for CliError {
    fn from(value: protodoc_render::Error) -> Self {
        Self::Render(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    Graph,
    #[default]
    Layout,
    Render,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    file: Option<String>,
    direction: Option<RankDir>,
    config: Option<String>,
    out: Option<String>,
    verbose: bool,
}

fn usage() -> &'static str {
    "Usage:\n  protodoc [graph|layout|render] [--pretty] [--file <name>] [--direction <TB|BT|LR|RL>] [--config <path>] [--out <path>] [--verbose] [<path>|-]\n\nInput is the JSON written by `protoc-gen-doc --doc_opt=json`.\n\nCommands:\n  graph   Print each file's reference graph as JSON\n  layout  Print each file's laid out diagram as JSON (default)\n  render  Print one file's diagram as SVG (the first file unless --file is given)\n\nOptions:\n  --pretty             Pretty-print JSON output\n  --file <name>        Only handle the file with this name (e.g. `booking.proto`)\n  --direction <dir>    Layout direction; overrides the config file\n  --config <path>      Diagram config (YAML or JSON)\n  --out <path>         Write output to a file instead of stdout\n  --verbose            Log layout phases to stderr\n"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut it = argv.iter().skip(1).peekable();

    if let Some(cmd) = it.peek().map(|s| s.as_str()) {
        match cmd {
            "graph" => {
                args.command = Command::Graph;
                it.next();
            }
            "layout" => {
                args.command = Command::Layout;
                it.next();
            }
            "render" => {
                args.command = Command::Render;
                it.next();
            }
            "-h" | "--help" | "help" => return Err(CliError::Usage(usage())),
            _ => {}
        }
    }

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => return Err(CliError::Usage(usage())),
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--file" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.file = Some(name.clone());
            }
            "--direction" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.direction = Some(dir.parse().map_err(|_| CliError::Usage(usage()))?);
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
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

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            println!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn load_config(args: &Args) -> Result<DiagramConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => DiagramConfig::load(path)?,
        None => DiagramConfig::default(),
    };
    if let Some(direction) = args.direction {
        config.direction = direction;
    }
    Ok(config)
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(&args)?;
    let text = read_input(args.input.as_deref())?;
    let doc = Documentation::from_json_str(&text)?;
    tracing::debug!(
        files = doc.files.len(),
        command = ?args.command,
        direction = %config.direction,
        "loaded descriptor"
    );

    let file = args.file.as_deref();
    let output = match args.command {
        Command::Graph => protodoc_render::graphs_json(&doc, &config, file, args.pretty)?,
        Command::Layout => protodoc_render::diagrams_json(&doc, &config, file, args.pretty)?,
        Command::Render => {
            protodoc_render::render_svg(&doc, &config, file, &SvgRenderOptions::default())?
        }
    };
    write_text(&output, args.out.as_deref())
}

fn main() {
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

    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
