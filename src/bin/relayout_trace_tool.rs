use replot_rs::api::{RelayoutEvent, ViewportEngine};
use replot_rs::core::Figure;
use replot_rs::{ChartContext, EngineConfig};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    /// Replay a captured relayout payload against a figure snapshot.
    Recompute,
    /// Run the full-extent reset path against a figure snapshot.
    Reset,
}

#[derive(Debug)]
struct CliArgs {
    command: CommandKind,
    figure: PathBuf,
    event: Option<PathBuf>,
    output: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let raw = fs::read_to_string(&args.figure)
        .map_err(|err| format!("failed to read `{}`: {err}", args.figure.display()))?;
    let figure = Figure::from_json_str(&raw).map_err(|err| format!("invalid figure: {err}"))?;
    let context = ChartContext::new(figure).map_err(|err| format!("invalid figure: {err}"))?;

    let event = match args.command {
        CommandKind::Recompute => {
            let path = args
                .event
                .ok_or_else(|| "recompute requires --event".to_owned())?;
            let raw = fs::read_to_string(&path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            RelayoutEvent::from_json_str(&raw).map_err(|err| format!("invalid event: {err}"))?
        }
        CommandKind::Reset => RelayoutEvent::autorange(),
    };

    let engine = ViewportEngine::new(EngineConfig::default())
        .map_err(|err| format!("engine init failed: {err}"))?;
    let update = engine
        .recompute_now(&context, &event)
        .ok_or_else(|| "event produced no update".to_owned())?;

    let payload = update
        .to_json_contract_v1_pretty()
        .map_err(|err| format!("failed to serialize update: {err}"))?;
    match args.output {
        Some(path) => fs::write(&path, payload)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{payload}");
            Ok(())
        }
    }
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let command = match args.next().as_deref() {
        Some("recompute") => CommandKind::Recompute,
        Some("reset") => CommandKind::Reset,
        _ => {
            return Err(
                "usage: relayout_trace_tool <recompute|reset> --figure <path> [--event <path>] [--output <path>]"
                    .to_owned(),
            );
        }
    };

    let mut figure = None::<PathBuf>;
    let mut event = None::<PathBuf>;
    let mut output = None::<PathBuf>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--figure" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --figure".to_owned())?;
                figure = Some(PathBuf::from(value));
            }
            "--event" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --event".to_owned())?;
                event = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                return Err(
                    "usage: relayout_trace_tool <recompute|reset> --figure <path> [--event <path>] [--output <path>]"
                        .to_owned(),
                );
            }
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let figure = figure.ok_or_else(|| "missing --figure".to_owned())?;
    Ok(CliArgs {
        command,
        figure,
        event,
        output,
    })
}
