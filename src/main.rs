use anyhow::{anyhow, Result};
use clap::{crate_version, App, Arg, ArgMatches};
use log::LevelFilter;
use postfilter::build::preview;
use postfilter::config::Config;
use postfilter::page::Event;
use postfilter::tag::ActiveTag;
use std::io::Write;
use std::path::Path;

fn main() -> Result<()> {
    let matches = App::new("postfilter")
        .version(crate_version!())
        .about("Previews a blog index page filtered by tag")
        .arg(
            Arg::with_name("PROJECT")
                .help("A directory within the project (defaults to the current directory)")
                .index(1),
        )
        .arg(
            Arg::with_name("url")
                .long("url")
                .takes_value(true)
                .conflicts_with("fragment")
                .help("The page URL; its fragment selects the tag"),
        )
        .arg(
            Arg::with_name("fragment")
                .long("fragment")
                .short("f")
                .takes_value(true)
                .help("The location hash selecting the tag, e.g. `#rust`"),
        )
        .arg(
            Arg::with_name("event")
                .long("event")
                .short("e")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .help(
                    "An event to apply, in order: `filter[:N]`, `filter-more[:N]`, or \
                     `more[:N]`. N defaults to the page size.",
                ),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .short("o")
                .takes_value(true)
                .help("Write the page here instead of stdout"),
        )
        .arg(
            Arg::with_name("verbose")
                .long("verbose")
                .short("v")
                .multiple(true)
                .help("Log more (repeat for more detail)"),
        )
        .get_matches();

    init_logger(matches.occurrences_of("verbose"));

    let project_dir = Path::new(matches.value_of("PROJECT").unwrap_or(".")).canonicalize()?;
    let config = Config::from_directory(&project_dir)?;
    let active = active_tag(&matches)?;

    let mut events = Vec::new();
    for event in matches.values_of("event").into_iter().flatten() {
        events.push(Event::parse(event, Some(config.page_size))?);
    }

    let html = preview(&config, &active, &events)?;
    match matches.value_of("output") {
        Some(path) => std::fs::write(path, html)?,
        None => std::io::stdout().write_all(html.as_bytes())?,
    }
    Ok(())
}

fn active_tag(matches: &ArgMatches) -> Result<ActiveTag> {
    if let Some(url) = matches.value_of("url") {
        let url = url::Url::parse(url).map_err(|e| anyhow!("Parsing `--url`: {}", e))?;
        return Ok(ActiveTag::from_url(&url));
    }
    Ok(matches
        .value_of("fragment")
        .map(ActiveTag::from_hash)
        .unwrap_or_default())
}

fn init_logger(verbosity: u64) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
