//! `search` and `details` subcommands, served through the relay.

use mangaview_client::{DetailsView, ListingView, PageButton};
use mangaview_config::Config;
use mangaview_gateway::RelayClient;
use mangaview_protocols::CatalogGateway;

pub(crate) fn relay_client(config: &Config) -> Result<RelayClient, Box<dyn std::error::Error>> {
    Ok(RelayClient::new(
        &config.reader.relay_url,
        config.reader.gateway_timeout(),
    )?)
}

pub(crate) async fn search(
    config: &Config,
    query: &str,
    page: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let gateway = relay_client(config)?;
    let page = page.max(1);
    let results = gateway.search(query, page).await?;

    match ListingView::new(results, page as usize) {
        ListingView::Empty { message } => println!("{}", message),
        ListingView::Results {
            items,
            page,
            total_pages,
            buttons,
        } => {
            for item in &items {
                println!("{}  {}", item.id, item.title);
            }
            println!();
            println!("Page {} / {}", page, total_pages);
            if !buttons.is_empty() {
                println!("{}", render_buttons(&buttons));
            }
        }
    }
    Ok(())
}

pub(crate) async fn details(
    config: &Config,
    series_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let gateway = relay_client(config)?;
    let details = gateway.series_details(series_id).await?;
    let view = DetailsView::new(&details, &config.upstream.site_base);

    println!("{}", view.title);
    println!("{} | {} | {}", view.author, view.status, view.demographic);
    if !view.description.is_empty() {
        println!();
        println!("{}", view.description);
    }

    if let Some(message) = view.empty_message {
        println!();
        println!("{}", message);
    }
    for section in &view.sections {
        println!();
        println!("{}", section.heading);
        for entry in &section.chapters {
            let title = entry.title.as_deref().unwrap_or_default();
            println!("  {:<14} {}", entry.label, title);
            println!("    mangaview read {}   {}", entry.chapter_id, entry.external_link);
        }
    }
    Ok(())
}

/// `< 1 ... 4 5 [6] 7 8 ... 12 >`; disabled arrows are left out.
fn render_buttons(buttons: &[PageButton]) -> String {
    buttons
        .iter()
        .filter_map(|button| match button {
            PageButton::Prev { disabled: true, .. } | PageButton::Next { disabled: true, .. } => {
                None
            }
            PageButton::Prev { .. } => Some("<".to_string()),
            PageButton::Next { .. } => Some(">".to_string()),
            PageButton::Ellipsis => Some("...".to_string()),
            PageButton::Page {
                number,
                current: true,
            } => Some(format!("[{}]", number)),
            PageButton::Page { number, .. } => Some(number.to_string()),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
