use std::{io::Write, path::PathBuf};

use anyhow::{bail, Context as _};
use clap::{command, Arg, ArgMatches, Command};
use context::{Context, DEFAULT_CONTAINER_ID, DEFAULT_PREVIEW_LEN};
use listing::ListingOrder;
use log::{info, warn};
use source::{FsSource, HttpSource, TextSource};
use typing::Typewriter;

mod context;
mod listing;
mod markdown;
mod page;
mod posts;
mod renderer;
mod source;
mod typing;

fn out_arg() -> Arg {
    Arg::new("out")
        .long("out")
        .short('o')
        .help("Output file. Printed to stdout when omitted.")
        .value_parser(clap::value_parser!(PathBuf))
}

fn write_output(out: Option<&PathBuf>, content: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("while creating {parent:?}"))?;
            }
            std::fs::write(path, content).with_context(|| format!("while writing {path:?}"))?;
            info!("Wrote {path:?}");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{content}")?;
        }
    }
    Ok(())
}

fn render(matches: &ArgMatches) -> anyhow::Result<()> {
    let file: &PathBuf = matches.get_one("file").context("file is required")?;
    if !file.is_file() {
        bail!("{file:?} must be a file.");
    }
    let md = std::fs::read_to_string(file).with_context(|| format!("while reading {file:?}"))?;

    let handlebars = match matches.get_one::<PathBuf>("template") {
        Some(template) => Some(renderer::generate_renderer(template)?),
        None => None,
    };
    let html = renderer::render_post(&md, file, handlebars.as_ref())?;

    write_output(matches.get_one("out"), &html)
}

fn list(matches: &ArgMatches) -> anyhow::Result<()> {
    let posts = match matches.get_one::<PathBuf>("posts") {
        Some(path) => posts::load_posts(path)?,
        None => posts::builtin_posts(),
    };

    let base_url = matches
        .get_one::<String>("base_url")
        .cloned()
        .or_else(|| std::env::var("POSTLIST_BASE_URL").ok());
    let source: Box<dyn TextSource> = match base_url {
        Some(base_url) => {
            info!("Retrieving posts from {base_url}");
            Box::new(HttpSource { base_url })
        }
        None => {
            let root: &PathBuf = matches.get_one("root").context("root is required")?;
            if !root.is_dir() {
                bail!("root must be a directory.");
            }
            info!("Retrieving posts under {root:?}");
            Box::new(FsSource {
                root: root.to_owned(),
            })
        }
    };

    let order = match matches.get_one::<String>("order") {
        Some(order) => order.parse()?,
        None => ListingOrder::default(),
    };
    let preview_len = matches
        .get_one::<usize>("preview_len")
        .copied()
        .unwrap_or(DEFAULT_PREVIEW_LEN);

    let ctx = Context::new(posts, source)
        .with_preview_len(preview_len)
        .with_order(order);
    let fragments = listing::load_listing(&ctx);

    let output = match matches.get_one::<PathBuf>("page") {
        Some(page_path) => {
            let container: &String = matches
                .get_one("container")
                .context("container is required")?;
            let page = std::fs::read_to_string(page_path)
                .with_context(|| format!("while reading {page_path:?}"))?;
            page::inject(&page, container, &fragments).unwrap_or_else(|| {
                warn!("{page_path:?} has no element with id {container:?}. leaving it as it is.");
                page
            })
        }
        None => fragments.join("\n"),
    };

    write_output(matches.get_one("out"), &output)
}

fn type_text(matches: &ArgMatches) -> anyhow::Result<()> {
    let typewriter = match matches.get_one::<String>("text") {
        Some(text) => Typewriter::new(text),
        None => Typewriter::default(),
    };
    let blinks = matches.get_one::<usize>("blinks").copied().unwrap_or(6);
    let mut stdout = std::io::stdout().lock();
    typewriter.play(&mut stdout, blinks, std::thread::sleep)?;
    Ok(())
}

fn cli() -> Command {
    command!()
        .subcommand_required(true)
        .subcommand(
            Command::new("render")
                .about("Convert a Markdown post to HTML")
                .args(&[
                    Arg::new("file")
                        .help("Markdown file to convert")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                    Arg::new("template")
                        .long("template")
                        .help("Handlebars template wrapping the post. Gets title, body and source.")
                        .value_parser(clap::value_parser!(PathBuf)),
                    out_arg(),
                ]),
        )
        .subcommand(
            Command::new("list")
                .about("Render the blog listing previews")
                .args(&[
                    Arg::new("root")
                        .long("root")
                        .help("Site root that post paths are relative to")
                        .value_parser(clap::value_parser!(PathBuf))
                        .default_value("."),
                    Arg::new("base_url")
                        .long("base-url")
                        .help("Retrieve posts over HTTP from this URL instead of --root. Falls back to POSTLIST_BASE_URL."),
                    Arg::new("posts")
                        .long("posts")
                        .help("JSON file of [{\"file\", \"title\"}] replacing the built-in post list")
                        .value_parser(clap::value_parser!(PathBuf)),
                    Arg::new("page")
                        .long("page")
                        .help("HTML page whose container receives the previews")
                        .value_parser(clap::value_parser!(PathBuf)),
                    Arg::new("container")
                        .long("container")
                        .help("Id of the container element in --page")
                        .default_value(DEFAULT_CONTAINER_ID),
                    Arg::new("preview_len")
                        .long("preview-len")
                        .help("Maximum characters of the preview line")
                        .value_parser(clap::value_parser!(usize)),
                    Arg::new("order")
                        .long("order")
                        .help("Emit items in post list order or in the order retrievals finished")
                        .value_parser(["descriptor", "completion"])
                        .default_value("descriptor"),
                    out_arg(),
                ]),
        )
        .subcommand(
            Command::new("type")
                .about("Play the typing effect on the terminal")
                .args(&[
                    Arg::new("text").long("text").help("Text to type"),
                    Arg::new("blinks")
                        .long("blinks")
                        .help("Cursor blinks after typing finished")
                        .value_parser(clap::value_parser!(usize)),
                ]),
        )
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("render", m)) => render(m),
        Some(("list", m)) => list(m),
        Some(("type", m)) => type_text(m),
        Some((name, _)) => bail!("unknown subcommand: {name}"),
        None => bail!("a subcommand is required."),
    }
}
