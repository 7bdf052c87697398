use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use blogfs::{Article, ArticleCodec};
use clap::{command, value_parser, Arg, ArgMatches, Command};

mod config;

fn custom_url_arg() -> Arg {
    Arg::new("custom_url")
        .help("Entry path below the entry directory, e.g. 2020/05/12/today-blog")
        .required(true)
}

fn file_arg() -> Arg {
    Arg::new("file")
        .help("Markdown file under the entry directory")
        .required(true)
        .value_parser(value_parser!(PathBuf))
}

fn required<'a, T: Clone + Send + Sync + 'static>(
    matches: &'a ArgMatches,
    id: &str,
) -> anyhow::Result<&'a T> {
    matches
        .get_one::<T>(id)
        .with_context(|| format!("missing argument <{id}>"))
}

fn print_json(article: &Article) -> anyhow::Result<()> {
    let mut out = BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut out, article)?;
    writeln!(out)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = command!()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .args(&[
            Arg::new("entry_dir")
                .long("entry-dir")
                .help("Directory holding the entry markdown files [default: entry]")
                .env("BLOGFS_ENTRY_DIR")
                .global(true)
                .value_parser(value_parser!(PathBuf)),
            Arg::new("config")
                .long("config")
                .help("JSON config file; `entryDir` is used when --entry-dir is absent")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .default_value("blogfs.json"),
        ])
        .subcommands([
            Command::new("list").about("Print every entry as one JSON object per line"),
            Command::new("show")
                .about("Print the entry stored for a customUrl")
                .arg(custom_url_arg()),
            Command::new("read")
                .about("Print the entry stored in a file")
                .arg(file_arg()),
            Command::new("write")
                .about("Store an entry given as JSON (stdin when FILE is omitted)")
                .arg(file_arg().required(false).help("JSON file with the entry")),
            Command::new("delete")
                .about("Remove the file of an entry")
                .arg(custom_url_arg()),
            Command::new("path")
                .about("Print the file path for a customUrl")
                .arg(custom_url_arg()),
            Command::new("url")
                .about("Print the customUrl for a file path")
                .arg(file_arg()),
        ])
        .get_matches();

    let config_path: &PathBuf = required(&matches, "config")?;
    let config = config::load_config(config_path)?;
    let entry_dir = config.entry_dir(matches.get_one("entry_dir"));
    let codec = ArticleCodec::new(entry_dir);

    match matches.subcommand() {
        Some(("list", _)) => {
            let articles = codec.reads().context("while reading entries")?;
            let mut out = BufWriter::new(io::stdout().lock());
            for article in articles.iter() {
                serde_json::to_writer(&mut out, article)?;
                writeln!(out)?;
            }
        }
        Some(("show", sub)) => {
            let custom_url: &String = required(sub, "custom_url")?;
            let article = codec
                .read_url(custom_url)
                .with_context(|| format!("while reading {custom_url}"))?;
            print_json(&article)?;
        }
        Some(("read", sub)) => {
            let file: &PathBuf = required(sub, "file")?;
            let article = codec
                .read(file)
                .with_context(|| format!("while reading {file:?}"))?;
            print_json(&article)?;
        }
        Some(("write", sub)) => {
            let article: Article = match sub.get_one::<PathBuf>("file") {
                Some(file) => {
                    let fd = File::open(file).with_context(|| format!("opening {file:?}"))?;
                    serde_json::from_reader(BufReader::new(fd))
                        .with_context(|| format!("parsing {file:?}"))?
                }
                None => serde_json::from_reader(io::stdin().lock()).context("parsing stdin")?,
            };
            let path = codec.write(&article).context("while writing entry")?;
            println!("{}", path.display());
        }
        Some(("delete", sub)) => {
            let custom_url: &String = required(sub, "custom_url")?;
            let path = codec
                .delete_url(custom_url)
                .with_context(|| format!("while deleting {custom_url}"))?;
            println!("{}", path.display());
        }
        Some(("path", sub)) => {
            let custom_url: &String = required(sub, "custom_url")?;
            println!("{}", codec.paths().url_to_path(custom_url).display());
        }
        Some(("url", sub)) => {
            let file: &PathBuf = required(sub, "file")?;
            println!("{}", codec.paths().path_to_url(file)?);
        }
        _ => unreachable!("clap requires a subcommand"),
    }

    Ok(())
}
