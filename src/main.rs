mod cli;

use filterbrr::{config, pipeline::Pipeline};
use filterbrr_parser::{AnnounceVars, Parser as ReleaseParser, Release};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "filterbrr=trace,filterbrr_rules=trace,filterbrr_parser=debug".to_string()
        } else {
            "filterbrr=info,filterbrr_rules=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Parse { title, tags, json } => {
            parse_title(&title, tags.as_deref(), json, cli.config.as_deref())
        }
        Commands::Check {
            title,
            indexer,
            category,
            size,
            tags,
            freeleech,
            uploader,
            vars,
        } => {
            let mut announce = AnnounceVars::from_iter(vars);
            announce.insert("torrentName", title);
            let optional = [
                ("category", category),
                ("torrentSize", size),
                ("releaseTags", tags),
                ("uploader", uploader),
                ("freeleech", freeleech.then(|| "freeleech".to_string())),
            ];
            for (key, value) in optional {
                if let Some(value) = value {
                    announce.insert(key, value);
                }
            }
            check_announce(&indexer, &announce, cli.config.as_deref())
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("filterbrr {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn parse_title(
    title: &str,
    tags: Option<&str>,
    json: bool,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let release = ReleaseParser::new(config.parser).parse(title, tags);

    if json {
        println!("{}", serde_json::to_string_pretty(&release)?);
    } else {
        print_release(&release);
    }
    Ok(())
}

fn print_release(release: &Release) {
    let text = [
        ("Title", release.title.clone()),
        ("Artists", release.artists.clone()),
        ("Group", release.group.clone()),
        ("Resolution", release.resolution.clone()),
        ("Source", release.source.clone()),
        ("Container", release.container.clone()),
        ("Audio channels", release.audio_channels.clone()),
        ("Audio format", release.audio_format.clone()),
        ("Bitrate", release.bitrate.clone()),
        ("Website", release.website.clone()),
        ("Region", release.region.clone()),
    ];
    let lists = [
        ("Codec", &release.codec),
        ("HDR", &release.hdr),
        ("Audio", &release.audio),
        ("Language", &release.language),
        ("Other", &release.other),
        ("Bonus", &release.bonus),
    ];
    let numbers = [
        ("Year", release.year),
        ("Month", release.month),
        ("Day", release.day),
        ("Season", release.season),
        ("Episode", release.episode),
        ("Log score", release.log_score),
    ];

    println!("Release: {}", release.torrent_name);
    println!("Type: {}", release.release_type);
    for (label, value) in text {
        if !value.is_empty() {
            println!("{}: {}", label, value);
        }
    }
    for (label, values) in lists {
        if !values.is_empty() {
            println!("{}: {}", label, values.join(", "));
        }
    }
    for (label, value) in numbers {
        if value != 0 {
            println!("{}: {}", label, value);
        }
    }
    if release.proper {
        println!("Proper: yes");
    }
    if release.repack {
        println!("Repack: yes");
    }
    if release.has_log {
        println!("Log: yes");
    }
    if release.has_cue {
        println!("Cue: yes");
    }
}

fn check_announce(
    indexer: &str,
    vars: &AnnounceVars,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let pipeline = Pipeline::new(&config);

    if pipeline.engine().is_empty() {
        println!("No enabled filters configured.");
    }

    let announce = pipeline.process(indexer, vars)?;
    let release = &announce.release;
    println!(
        "Release: {} ({}, {} bytes)",
        release.torrent_name, release.release_type, release.size
    );

    for result in &announce.results {
        if result.matched {
            println!("✓ {} (priority {}): matched", result.filter_name, result.priority);
        } else {
            println!(
                "✗ {} (priority {}): {}",
                result.filter_name,
                result.priority,
                pipeline.render_rejections(&result.rejections)
            );
        }
    }

    match announce.first_match() {
        Some(hit) => println!("\nAccepted by: {}", hit.filter_name),
        None => println!("\nNo filter accepted this release."),
    }
    Ok(())
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!(
                "  Parser years: {}..={}",
                config.parser.min_year, config.parser.max_year
            );
            println!("  Music detection: {}", config.parser.detect_music);
            println!(
                "  Pattern cache: {} entries, {}s TTL",
                config.engine.pattern_cache_capacity, config.engine.pattern_cache_ttl_secs
            );
            println!("  Indexers: {}", config.indexers.len());
            for indexer in &config.indexers {
                println!(
                    "    {} ({}){}",
                    indexer.identifier,
                    indexer.normalizer(),
                    if indexer.enabled { "" } else { " [disabled]" }
                );
            }
            println!("  Filters: {}", config.filters.len());
            println!(
                "    Enabled: {}",
                config.filters.iter().filter(|f| f.enabled).count()
            );
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!(
                "  Parser years: {}..={}",
                config.parser.min_year, config.parser.max_year
            );
        }
    }

    Ok(())
}
