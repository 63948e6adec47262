//! fakenft CLI: browse and manage the FakeNFT marketplace from the terminal.
//!
//! Usage:
//! ```bash
//! export FAKENFT_BASE_URL=https://api.example
//! export FAKENFT_TOKEN=...
//!
//! # Resolve several NFTs at once
//! fakenft nfts --ids 1,2,3 --concurrency 2
//!
//! # Show the basket sorted by price
//! fakenft basket --sort price
//!
//! # Pay with a currency
//! fakenft pay --currency 1
//! ```

mod config;
mod logging;

use std::env;
use std::process;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use fakenft_core::{CollectionSort, InMemoryNftCache, Marketplace, SortKey, Transport};
use fakenft_http::{profiles, HttpTransport};

use crate::config::CliConfig;

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "version" | "--version" | "-V" => {
            println!("fakenft {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        command => run(command, &args[2..]).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn print_usage() {
    println!("fakenft {}", env!("CARGO_PKG_VERSION"));
    println!("Browse and manage the FakeNFT marketplace\n");
    println!("USAGE:");
    println!("    fakenft <COMMAND> [FLAGS]\n");
    println!("COMMANDS:");
    println!("    nft          --id ID                  Load one NFT");
    println!("    nfts         --ids A,B,C [--concurrency N]  Load several NFTs");
    println!("    page         --page N                 Load one page of the listing");
    println!("    collections  [--by-name]              List collections");
    println!("    collection   --id ID                  Show a collection and its NFTs");
    println!("    users                                 Rating leaderboard");
    println!("    user         --id ID                  Show a user and their NFTs");
    println!("    profile                               Show the profile");
    println!("    like         --id ID                  Toggle a like");
    println!("    basket       [--sort price|rating|name]  Show the basket");
    println!("    remove       --id ID                  Remove an NFT from the basket");
    println!("    currencies                            List payment currencies");
    println!("    pay          --currency ID            Pay for the basket");
    println!("    version                               Print version");
    println!("    help                                  Print this help\n");
    println!("ENVIRONMENT:");
    println!("    FAKENFT_BASE_URL     API base URL  [required]");
    println!("    FAKENFT_TOKEN        Access token");
    println!("    FAKENFT_CONCURRENCY  Parallel NFT fetches (default 4)");
    println!("    FAKENFT_LOG_LEVEL    Log level when RUST_LOG is unset (default info)");
    println!("    FAKENFT_LOG_JSON     Emit JSON logs when set to 1");
}

async fn run(command: &str, args: &[String]) -> Result<()> {
    let mut config = CliConfig::from_env()?;
    logging::init(&config.log);

    if let Some(raw) = parse_flag(args, "--concurrency") {
        config.fetcher.max_concurrency = raw
            .parse()
            .with_context(|| format!("--concurrency must be a number, got '{raw}'"))?;
    }

    let market = connect(&config)?;

    match command {
        "nft" => {
            let id = required(args, "--id")?;
            print_json(&market.nfts.load_nft(&id).await?)
        }
        "nfts" => {
            let ids = split_ids(&required(args, "--ids")?);
            print_json(&market.nfts.load_nfts(&ids).await?)
        }
        "page" => {
            let page: u32 = required(args, "--page")?
                .parse()
                .context("--page must be a positive number")?;
            if page == 0 {
                return Err(anyhow!("pages start at 1"));
            }
            print_json(&market.nfts.load_page(page).await?)
        }
        "collections" => {
            let sort = if has_flag(args, "--by-name") {
                CollectionSort::ByName
            } else {
                CollectionSort::ByNftCount
            };
            print_json(&market.catalog.collections(sort).await?)
        }
        "collection" => {
            let id = required(args, "--id")?;
            let (collection, nfts) = market.catalog.collection_nfts(&id).await?;
            print_json(&serde_json::json!({ "collection": collection, "nfts": nfts }))
        }
        "users" => print_json(&market.statistics.users().await?),
        "user" => {
            let id = required(args, "--id")?;
            let user = market.statistics.user(&id).await?;
            let nfts = market.nfts.load_nfts(&user.nfts).await?;
            print_json(&serde_json::json!({ "user": user, "nfts": nfts }))
        }
        "profile" => print_json(&market.profile.load_profile().await?),
        "like" => {
            let id = required(args, "--id")?;
            print_json(&market.profile.toggle_like(&id).await?)
        }
        "basket" => {
            let mut basket = market.orders.load_basket().await?;
            if let Some(raw) = parse_flag(args, "--sort") {
                basket.sort(raw.parse::<SortKey>().map_err(|e| anyhow!(e))?);
            }
            print_json(&serde_json::json!({
                "items": basket.items(),
                "count": basket.len(),
                "total": basket.total_price(),
            }))
        }
        "remove" => {
            let id = required(args, "--id")?;
            print_json(&market.orders.remove_from_basket(&id).await?)
        }
        "currencies" => print_json(&market.payments.currencies().await?),
        "pay" => {
            let currency = required(args, "--currency")?;
            let paid = market.payments.pay(&currency).await?;
            if paid {
                market.orders.clear().await?;
            }
            print_json(&serde_json::json!({ "paid": paid, "currency": currency }))
        }
        other => {
            print_usage();
            Err(anyhow!("unknown command: {other}"))
        }
    }
}

fn connect(config: &CliConfig) -> Result<Marketplace> {
    let transport: HttpTransport = match &config.token {
        Some(token) => profiles::practicum(&config.base_url, token)?,
        None => profiles::local(&config.base_url)?,
    };
    tracing::debug!(base_url = transport.base_url(), "connected");

    Ok(Marketplace::new(
        Arc::new(transport),
        Arc::new(InMemoryNftCache::new()),
        config.fetcher.clone(),
    ))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_flag(args: &[String], flag: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == flag)?;
    args.get(pos + 1).cloned()
}

fn required(args: &[String], flag: &str) -> Result<String> {
    parse_flag(args, flag).ok_or_else(|| anyhow!("{flag} is required"))
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
