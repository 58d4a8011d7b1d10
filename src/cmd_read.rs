//! `read` subcommand: an interactive terminal reader.
//!
//! Each input line is one navigation input. Displayed pages are reported
//! on stdout and, with `--out`, written to disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use mangaview_client::reader::page_indicator;
use mangaview_client::{
    open_chapter, ChapterErrorView, NavInput, NavigationMapper, PageErrorView, Reader,
    ReaderSession, SessionEvent, ShareableLocation,
};
use mangaview_config::Config;
use mangaview_gateway::HttpImageLoader;

use crate::cmd_search::relay_client;

const HELP: &str = "n/Enter next, p previous, <number> jump, r retry, t toggle method, q quit";

pub(crate) struct ReadOptions {
    pub chapter_id: String,
    pub page: Option<usize>,
    pub out: Option<PathBuf>,
    pub direct: bool,
}

#[derive(Debug, PartialEq)]
enum Line {
    Nav(NavInput),
    Quit,
    Unknown,
}

fn parse_line(line: &str) -> Line {
    match line.trim() {
        "" | "n" | "next" => Line::Nav(NavInput::NextButton),
        "p" | "prev" => Line::Nav(NavInput::PrevButton),
        "r" | "retry" => Line::Nav(NavInput::Retry),
        "t" | "toggle" => Line::Nav(NavInput::ToggleMethod),
        "q" | "quit" => Line::Quit,
        other => match other.parse() {
            Ok(page) => Line::Nav(NavInput::Jump { page }),
            Err(_) => Line::Unknown,
        },
    }
}

pub(crate) async fn run(
    config: &Config,
    options: ReadOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let gateway = relay_client(config)?;
    let loader = Arc::new(HttpImageLoader::new(&config.upstream.user_agent)?);
    let external_url = format!(
        "{}/chapter/{}",
        config.upstream.site_base.trim_end_matches('/'),
        options.chapter_id
    );

    let pages = match open_chapter(&gateway, &options.chapter_id, config.reader.data_saver).await
    {
        Ok(pages) => pages,
        Err(e) => {
            let view = ChapterErrorView::new(&e, Some(&external_url));
            println!("{}", view.message);
            for affordance in &view.affordances {
                println!("  {}", affordance.label());
            }
            println!("  {}", external_url);
            return Err(e.into());
        }
    };
    let page_count = pages.len();

    if let Some(out) = &options.out {
        tokio::fs::create_dir_all(out).await?;
    }

    let mut location = ShareableLocation::for_chapter(None, &options.chapter_id);
    if let Some(page) = options.page {
        location.set_page(page);
    }

    let mut reader = Reader::new(pages, location);
    if options.direct {
        reader = reader.with_proxy_preference(false);
    } else if let Some(prefer_proxy) = config.reader.prefer_proxy {
        reader = reader.with_proxy_preference(prefer_proxy);
    }

    let (command_tx, command_rx) = mpsc::channel(16);
    let (event_tx, mut event_rx) = mpsc::channel(16);
    let session = ReaderSession::new(reader, loader);
    let session_task = tokio::spawn(session.run(command_rx, event_tx));

    let mapper = NavigationMapper::new(config.reader.swipe_threshold);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut command_tx = Some(command_tx);
    println!("{}", HELP);

    loop {
        tokio::select! {
            line = lines.next_line(), if command_tx.is_some() => {
                let Some(line) = line? else {
                    debug!("stdin closed, finishing in-flight loads");
                    command_tx = None;
                    continue;
                };
                match parse_line(&line) {
                    Line::Quit => {
                        session_task.abort();
                        info!("Reader closed");
                        return Ok(());
                    }
                    Line::Unknown => println!("{}", HELP),
                    Line::Nav(input) => {
                        let Some(command) = mapper.map(input) else { continue };
                        if let Some(tx) = &command_tx {
                            if tx.send(command).await.is_err() {
                                break;
                            }
                        }
                    }
                }
            }

            event = event_rx.recv() => match event {
                Some(event) => {
                    report(&event, page_count, &external_url, options.out.as_deref()).await?
                }
                None => break,
            },
        }
    }

    let reader = session_task.await?;
    println!("Stopped on {}", reader.location());
    Ok(())
}

async fn report(
    event: &SessionEvent,
    page_count: usize,
    external_url: &str,
    out: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    match event {
        SessionEvent::Loading { page, form } => {
            println!("{} loading ({})", page_indicator(*page, page_count), form);
        }
        SessionEvent::Displayed { page, form, image } => {
            let mut line = format!(
                "{} [{}] {} bytes",
                page_indicator(*page, page_count),
                form,
                image.bytes.len()
            );
            if let Some(dir) = out {
                let path = dir.join(format!("page-{:03}.{}", page, image.extension()));
                tokio::fs::write(&path, &image.bytes).await?;
                line.push_str(&format!(" -> {}", path.display()));
            }
            println!("{}", line);
        }
        SessionEvent::FellBack { page, from, to } => {
            println!("Page {}: {} load failed, trying {}", page, from, to);
        }
        SessionEvent::Failed { page, error } => {
            error!("{}", error);
            let view = PageErrorView::new(*page, external_url);
            println!("{}", view.message);
            for affordance in &view.affordances {
                println!("  {}", affordance.label());
            }
            println!("  {}", external_url);
        }
        SessionEvent::Discarded { page } => debug!("Dropped late load for page {}", page),
    }
    Ok(())
}
