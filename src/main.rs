use anyhow::{Context, Result};
use browrooms::{
    logging::init_logger,
    shell::{normalize_url, Entry, History, Loaded, Loader, HOME_PAGE},
    text_only, FetchConfig, Fetcher, TlsDispatch,
};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::{
    io::{self, BufRead, Write},
    sync::mpsc::Receiver,
    thread,
    time::Duration,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// A tiny text browser over raw HTTP/1.1.
#[derive(Debug, Parser)]
#[command(name = "browrooms", version)]
struct Cli {
    /// Page to fetch and print. Starts an interactive session when omitted.
    url: Option<String>,

    /// Seconds allowed for the TCP connect (0 waits forever)
    #[arg(long, default_value_t = 30)]
    connect_timeout: u64,

    /// Seconds allowed for each socket read or write (0 waits forever)
    #[arg(long, default_value_t = 30)]
    read_timeout: u64,

    #[arg(long, default_value_t = browrooms::config::DEFAULT_MAX_REDIRECTS)]
    max_redirects: usize,

    /// Use TLS for https URLs instead of for port 443
    #[arg(long)]
    tls_by_scheme: bool,

    /// Verify server certificates
    #[arg(long)]
    verify_certs: bool,

    /// Print the response as received instead of its text
    #[arg(long)]
    raw: bool,

    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

impl Cli {
    fn fetch_config(&self) -> FetchConfig {
        let secs = |s: u64| (s > 0).then(|| Duration::from_secs(s));
        FetchConfig {
            connect_timeout: secs(self.connect_timeout),
            io_timeout: secs(self.read_timeout),
            max_redirects: self.max_redirects,
            tls_dispatch: if self.tls_by_scheme {
                TlsDispatch::Scheme
            } else {
                TlsDispatch::Port
            },
            verify_certificates: self.verify_certs,
            ..FetchConfig::default()
        }
    }
}

fn render(html: &str, raw: bool) -> String {
    if raw {
        html.to_string()
    } else {
        text_only(html)
    }
}

fn display(rx: Receiver<Loaded>, raw: bool) {
    for loaded in rx {
        println!("--- [{}] {}", loaded.id, loaded.url);
        println!("{}", render(&loaded.html, raw));
        print!("> ");
        let _ = io::stdout().flush();
    }
}

fn show_home(raw: bool) {
    println!("{}", render(HOME_PAGE, raw));
}

fn open(loader: &mut Loader, entry: Entry, raw: bool) {
    match entry {
        Entry::Home => show_home(raw),
        Entry::Url(url) => {
            loader.load(&url);
        }
    }
}

fn interactive(fetcher: Fetcher, raw: bool) -> Result<()> {
    let (mut loader, rx) = Loader::new(fetcher);
    thread::Builder::new()
        .name("display".to_string())
        .spawn(move || display(rx, raw))
        .context("failed to start display thread")?;

    let mut history = History::new();
    show_home(raw);
    print!("> ");
    io::stdout().flush()?;
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read command")?;
        let (command, arg) = line.trim().split_once(' ').unwrap_or((line.trim(), ""));
        match command {
            "" => {}
            "quit" | "exit" => break,
            "back" => match history.back() {
                Some(entry) => open(&mut loader, entry, raw),
                None => println!("no earlier page"),
            },
            "forward" => match history.forward() {
                Some(entry) => open(&mut loader, entry, raw),
                None => println!("no later page"),
            },
            "refresh" => open(&mut loader, history.current(), raw),
            "home" => {
                history.go_home();
                show_home(raw);
            }
            "go" => match normalize_url(arg) {
                Some(url) => {
                    history.visit(url.clone());
                    loader.load(&url);
                }
                None => println!("usage: go URL"),
            },
            _ => {
                if let Some(url) = normalize_url(&line) {
                    history.visit(url.clone());
                    loader.load(&url);
                }
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level.into()).context("failed to initialize logger")?;
    let fetcher = Fetcher::new(cli.fetch_config());

    match cli.url.as_deref().and_then(normalize_url) {
        Some(url) => {
            println!("{}", render(&fetcher.fetch(&url), cli.raw));
            Ok(())
        }
        None => interactive(fetcher, cli.raw),
    }
}
