mod shell;

use anyhow::Context;
use gacha_core::{DrawEngine, Locale, RngState};
use gacha_data::load_assets_or_default;
use gacha_sim::{simulate, write_json, write_text, SimConfig, Strategy};
use shell::{Flow, Shell};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BUDGET: u64 = 100_000;
const DEFAULT_DELAY_MS: u64 = 500;

#[derive(Debug, Clone)]
struct CliOptions {
    seed: Option<u64>,
    locale: Locale,
    assets: PathBuf,
    simulate: Option<Strategy>,
    budget: u64,
    trace: Option<PathBuf>,
    report: Option<PathBuf>,
    steps: bool,
    delay_ms: u64,
}

fn parse_cli_options(args: &[String]) -> Result<CliOptions, String> {
    let mut seed = None;
    let mut locale_arg: Option<String> = std::env::var("GACHA_LANG").ok();
    let mut assets = PathBuf::from("assets");
    let mut simulate = None;
    let mut budget = DEFAULT_BUDGET;
    let mut trace = None;
    let mut report = None;
    let mut steps = false;
    let mut delay_ms = DEFAULT_DELAY_MS;
    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        match flag {
            "--steps" => steps = true,
            "--no-delay" => delay_ms = 0,
            "--lang" | "-l" | "--seed" | "--assets" | "--simulate" | "--budget" | "--trace"
            | "--report" | "--delay-ms" => {
                let value = args
                    .get(idx + 1)
                    .ok_or_else(|| format!("{flag} needs a value"))?;
                idx += 1;
                match flag {
                    "--lang" | "-l" => locale_arg = Some(value.clone()),
                    "--seed" => {
                        seed = Some(
                            value
                                .parse::<u64>()
                                .map_err(|_| format!("invalid seed: {value}"))?,
                        )
                    }
                    "--assets" => assets = PathBuf::from(value),
                    "--simulate" => {
                        simulate = Some(
                            Strategy::parse(value)
                                .ok_or_else(|| format!("unknown strategy: {value}"))?,
                        )
                    }
                    "--budget" => {
                        budget = value
                            .parse::<u64>()
                            .map_err(|_| format!("invalid budget: {value}"))?
                    }
                    "--trace" => trace = Some(PathBuf::from(value)),
                    "--report" => report = Some(PathBuf::from(value)),
                    _ => {
                        delay_ms = value
                            .parse::<u64>()
                            .map_err(|_| format!("invalid delay: {value}"))?
                    }
                }
            }
            other => return Err(format!("unknown option: {other}")),
        }
        idx += 1;
    }
    let locale = locale_arg
        .as_deref()
        .map(Locale::from_code)
        .unwrap_or_default();
    Ok(CliOptions {
        seed,
        locale,
        assets,
        simulate,
        budget,
        trace,
        report,
        steps,
        delay_ms,
    })
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_cli_options(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            eprintln!(
                "usage: gacha [--lang en|ko] [--seed N] [--assets DIR] [--no-delay] \
                 [--simulate single|batch|mini|mixed|guaranteed --budget N --trace FILE --report FILE --steps]"
            );
            std::process::exit(2);
        }
    };
    let result = match options.simulate {
        Some(strategy) => run_simulation(&options, strategy),
        None => run_shell(&options),
    };
    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run_simulation(options: &CliOptions, strategy: Strategy) -> anyhow::Result<()> {
    let (config, _) = load_assets_or_default(&options.assets)?;
    let defaults = SimConfig::default();
    let sim = SimConfig {
        seed: options.seed.unwrap_or(defaults.seed),
        budget: options.budget,
        strategy,
        record_steps: options.steps || options.trace.is_some(),
        ..defaults
    };
    let report = simulate(&config, &sim).context("run simulation")?;
    println!("{}", report.to_text_report());
    if let Some(path) = options.trace.as_ref() {
        write_json(path, &report).with_context(|| format!("write trace {}", path.display()))?;
        log::info!("trace written to {}", path.display());
    }
    if let Some(path) = options.report.as_ref() {
        write_text(path, &report).with_context(|| format!("write report {}", path.display()))?;
        log::info!("report written to {}", path.display());
    }
    Ok(())
}

fn run_shell(options: &CliOptions) -> anyhow::Result<()> {
    let (config, catalog) = load_assets_or_default(&options.assets)?;
    let rng = match options.seed {
        Some(seed) => RngState::from_seed(seed),
        None => RngState::from_entropy(),
    };
    log::info!("machine seed {}", rng.seed());
    let engine = DrawEngine::new(config, Box::new(rng))
        .context("build draw engine")?
        .with_locale(options.locale);
    let mut shell = Shell::new(engine, catalog, Duration::from_millis(options.delay_ms));
    let locale = options.locale;

    println!(
        "{}",
        locale.text("=== Gacha vending machine ===", "=== 룰렛형 음료수 자판기 ===")
    );
    for line in shell.execute("help").map_err(anyhow::Error::msg)?.1 {
        println!("{line}");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush().context("flush stdout")?;
        let mut line = String::new();
        let read = stdin.lock().read_line(&mut line).context("read stdin")?;
        if read == 0 {
            break;
        }
        match shell.execute(line.trim()) {
            Ok((flow, output)) => {
                for row in output {
                    println!("{row}");
                }
                if flow == Flow::Quit {
                    break;
                }
            }
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_simulation_options() {
        let options = parse_cli_options(&args(&[
            "--simulate",
            "batch",
            "--budget",
            "5000",
            "--seed",
            "9",
            "--lang",
            "ko",
        ]))
        .expect("parse");
        assert_eq!(options.simulate, Some(Strategy::Batch));
        assert_eq!(options.budget, 5000);
        assert_eq!(options.seed, Some(9));
        assert_eq!(options.locale, Locale::KoKr);
        assert!(!options.steps);
        assert_eq!(options.report, None);
    }

    #[test]
    fn parses_report_path() {
        let options = parse_cli_options(&args(&["--simulate", "mixed", "--report", "out/sim.txt"]))
            .expect("parse");
        assert_eq!(options.report, Some(PathBuf::from("out/sim.txt")));
        assert!(parse_cli_options(&args(&["--report"])).is_err());
    }

    #[test]
    fn no_delay_zeroes_display_delay() {
        let options = parse_cli_options(&args(&["--no-delay"])).expect("parse");
        assert_eq!(options.delay_ms, 0);
        assert_eq!(options.assets, PathBuf::from("assets"));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse_cli_options(&args(&["--seed", "abc"])).is_err());
        assert!(parse_cli_options(&args(&["--simulate", "yolo"])).is_err());
        assert!(parse_cli_options(&args(&["--budget"])).is_err());
        assert!(parse_cli_options(&args(&["--wat"])).is_err());
    }
}
