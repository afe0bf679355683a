// Mon Aug 24 2026

use clap::Parser;
use colored::Colorize;
use delit::{
    config::Config,
    engine::{load_tables, Driver},
    ini::IniFile,
    report,
    utils::{measure_time, pluralize, LoggingUtils},
};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version = "1.0.0")]
#[command(about = "Replace numeric literals in decompiled scripts with symbolic constants", long_about = None)]
struct Args {
    /// Configuration file with defines, descriptors and rules
    #[arg(short, long, default_value = "delit.ini")]
    config: PathBuf,

    /// Directory containing the declared header files
    #[arg(long, default_value = ".")]
    headers: PathBuf,

    /// Directory scanned recursively for script files
    #[arg(short, long)]
    scripts: PathBuf,

    /// Script file extension; may be given more than once
    #[arg(short, long, default_value = "ssl")]
    ext: Vec<String>,

    /// Report changes without writing any file
    #[arg(short, long)]
    read_only: bool,

    /// Apply raw substitutions before construct processing
    #[arg(long)]
    raw_first: bool,

    /// Write a JSON run report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(long)]
    no_progress: bool,
}

fn main() {
    let args = Args::parse();

    LoggingUtils::init_logger(LoggingUtils::level_from_verbosity(args.verbose as usize));

    let config = Config {
        config_file: args.config,
        headers_root: args.headers,
        scripts_root: args.scripts,
        script_extensions: args.ext,
        read_only: args.read_only,
        raw_before_constructs: args.raw_first,
        report_file: args.report,
        enable_progress_bars: !args.no_progress,
        verbosity: args.verbose as usize,
    };

    if let Err(e) = config.validate() {
        eprintln!("{} Invalid options: {}", "[!]".red(), e);
        std::process::exit(1);
    }

    println!("{}", "delit".cyan().bold());
    println!("{}", "=".repeat(50).cyan());
    println!();

    println!("{} Reading configuration: {}", "[*]".blue(), config.config_file.display());

    // An unreadable configuration degrades to a no-op run: nothing is
    // known, every literal ends up in the unknown report.
    let ini = match IniFile::load(&config.config_file) {
        Ok(ini) => ini,
        Err(e) => {
            warn!("configuration not read ({}), continuing with empty tables", e);
            IniFile::default()
        }
    };

    if ini.is_empty() {
        warn!("configuration has no sections; this run will change nothing");
    }

    let tables = load_tables(&ini);
    let mut driver = Driver::new(tables, &config);

    println!("{} Scanning headers under: {}", "[*]".blue(), config.headers_root.display());

    let (registered, header_elapsed) = measure_time(|| driver.run_headers(&config.headers_root));
    println!(
        "{} Registered {} in {:.2}s",
        "[+]".green(),
        pluralize(registered, "define", "defines"),
        header_elapsed.as_secs_f64()
    );

    let files = driver.collect_scripts(&config.scripts_root);
    println!(
        "{} Processing {} under: {}",
        "[*]".blue(),
        pluralize(files.len(), "script", "scripts"),
        config.scripts_root.display()
    );
    if config.read_only {
        println!("{} Read-only mode: no file will be written", "[*]".blue());
    }

    let progress = if config.enable_progress_bars && !files.is_empty() {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let (_, script_elapsed) = measure_time(|| {
        driver.run_scripts(&config.scripts_root, |path| {
            if let Some(ref pb) = progress {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    pb.set_message(name.to_string());
                }
                pb.inc(1);
            }
        })
    });

    if let Some(pb) = progress {
        pb.finish_with_message("done");
    }

    println!();
    println!("{}", "=".repeat(50).cyan());
    report::print_summary(&driver.status, config.read_only);
    println!();
    println!(
        "{} Script phase complete in {:.2}s",
        "[+]".green(),
        script_elapsed.as_secs_f64()
    );

    if let Some(path) = &config.report_file {
        if let Err(e) = report::save_report(&driver.status, path) {
            eprintln!("{} Failed to save report: {}", "[!]".red(), e);
        } else {
            println!("{} Report saved to: {}", "[+]".green(), path.display());
        }
    }
}
