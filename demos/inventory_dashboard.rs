//! Inventory Dashboard Example
//!
//! Walks through the data layer of the dashboard without any UI:
//! - Seeds an in-memory store with a few PCs, vulnerabilities and users
//! - Opens list pages, applies search, facets and column sorting
//! - Prints the summary cards of each page
//! - Follows live changes with a collection watch and sidebar badges
//!
//! Run with `RUST_LOG=assetdesk=debug` to see the store's tracing output.
//! Pass a YAML file to merge custom schemas over the built-in ones.

use anyhow::{Context, Result};
use assetdesk::entities::{pcs, users, vulnerabilities};
use assetdesk::prelude::*;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let site = DeskConfig::from_yaml_file(&path)
                .with_context(|| format!("loading {}", path))?;
            DeskConfig::merge(vec![DeskConfig::default_config(), site])
        }
        None => DeskConfig::default_config(),
    };

    let store = InMemoryRecordStore::with_event_bus(EventBus::new(config.event_capacity));
    populate_test_data(&store).await?;

    println!("📦 Collections: {:?}", config.collections());

    let mut badges = BadgeBoard::start(&store, config.collections()).await?;
    print_badges(&badges);

    // === PCs page ===
    let schema = config
        .schema(pcs::COLLECTION)
        .context("pcs collection is not configured")?
        .clone();
    let mut pcs_page = ListView::new(schema);
    pcs_page.load(&store).await;

    let first = pcs_page.page(1, config.page_size)?;
    println!(
        "\n🖥  PCs (default sort, page {}/{})",
        first.pagination.page, first.pagination.total_pages
    );
    print_rows(&first.data, &["name", "status", "os", "cost"]);

    pcs_page.set_facet("status", "online");
    pcs_page.click_column("cost")?;
    pcs_page.click_column("cost")?;
    println!("\n🖥  Online PCs, most expensive first");
    print_rows(&pcs_page.rows()?, &["name", "status", "os", "cost"]);

    println!("\n📊 PC cards");
    print_cards(&pcs_page.cards());
    println!("   status options: {:?}", pcs_page.facet_options("status"));

    if let Err(e) = pcs_page.click_column("warranty") {
        println!("\n⚠️  {} ({})", e, DeskError::from(e.clone()).error_code());
    }

    // === Vulnerabilities page, kept live by a watch ===
    let schema = config
        .schema(vulnerabilities::COLLECTION)
        .context("vulnerabilities collection is not configured")?
        .clone();
    let vuln_page = Arc::new(Mutex::new(ListView::new(schema)));
    let page = Arc::clone(&vuln_page);
    let (seen_tx, mut seen_rx) = watch::channel(0usize);
    let _watch = watch_collection(&store, vulnerabilities::COLLECTION, move |snapshot| {
        let len = snapshot.len();
        if let Ok(mut page) = page.lock() {
            page.replace_snapshot(snapshot);
        }
        seen_tx.send_replace(len);
    })
    .await?;

    let critical = store
        .create(
            vulnerabilities::COLLECTION,
            fields! {
                "cve_id" => "CVE-2024-3094",
                "title" => "xz backdoor",
                "severity" => "critical",
                "cvss_score" => 10.0,
                "status" => "open",
                "discovered_date" => "2024-03-29",
            },
        )
        .await?;

    seen_rx.wait_for(|len| *len == 4).await?;

    {
        let mut page = vuln_page
            .lock()
            .map_err(|_| anyhow::anyhow!("vulnerability page lock poisoned"))?;
        page.set_search("xz");
        println!("\n🛡  Vulnerabilities matching \"xz\"");
        print_rows(&page.rows()?, &["cve_id", "severity", "cvss_score"]);
        println!("\n📊 Vulnerability cards");
        print_cards(&page.cards());
    }

    store
        .update(vulnerabilities::COLLECTION, &critical, fields! { "status" => "resolved" })
        .await?;
    store.delete(vulnerabilities::COLLECTION, &critical).await?;
    if let Some(vulns) = badges.watch_mut(vulnerabilities::COLLECTION) {
        while vulns.current() != 3 {
            if vulns.changed().await.is_none() {
                break;
            }
        }
    }
    print_badges(&badges);

    // === Store outage ===
    let schema = config
        .schema(users::COLLECTION)
        .context("users collection is not configured")?
        .clone();
    let mut users_page = ListView::new(schema);
    store.set_online(false);
    if !users_page.load(&store).await
        && let Some(e) = users_page.last_error()
    {
        println!("\n⚠️  users page: {} ({})", e, e.error_code());
    }
    store.set_online(true);
    users_page.load(&store).await;
    println!("\n👤 Users after retry");
    print_rows(&users_page.rows()?, &["name", "department", "role"]);

    Ok(())
}

async fn populate_test_data(store: &InMemoryRecordStore) -> Result<()> {
    for (name, status, os, department, cost, purchased) in [
        ("ws-finance-01", "online", "Windows 11", "Finance", 1450.0, "2023-02-14"),
        ("ws-dev-07", "online", "Ubuntu 22.04", "Engineering", 2100.0, "2024-01-09"),
        ("lt-sales-03", "offline", "macOS 14", "Sales", 1899.0, "2022-11-30"),
        ("ws-dev-02", "maintenance", "Ubuntu 22.04", "Engineering", 1980.0, "2021-06-01"),
        ("ws-hr-01", "online", "Windows 11", "HR", 1100.0, "2023-08-21"),
    ] {
        store
            .create(
                pcs::COLLECTION,
                fields! {
                    "name" => name,
                    "hostname" => format!("{}.corp.local", name),
                    "status" => status,
                    "os" => os,
                    "department" => department,
                    "cost" => cost,
                    "purchase_date" => purchased,
                },
            )
            .await?;
    }

    for (cve, title, severity, score) in [
        ("CVE-2021-44228", "Log4Shell", "critical", 10.0),
        ("CVE-2023-4863", "libwebp heap overflow", "high", 8.8),
        ("CVE-2023-44487", "HTTP/2 rapid reset", "high", 7.5),
    ] {
        store
            .create(
                vulnerabilities::COLLECTION,
                fields! {
                    "cve_id" => cve,
                    "title" => title,
                    "severity" => severity,
                    "cvss_score" => score,
                    "status" => "open",
                },
            )
            .await?;
    }

    for (name, email, department, role) in [
        ("Ada Lovelace", "ada@corp.local", "Engineering", "admin"),
        ("Grace Hopper", "grace@corp.local", "Engineering", "technician"),
        ("Linus Pauling", "linus@corp.local", "Finance", "user"),
    ] {
        store
            .create(
                users::COLLECTION,
                fields! {
                    "name" => name,
                    "email" => email,
                    "department" => department,
                    "role" => role,
                },
            )
            .await?;
    }

    Ok(())
}

fn print_rows(rows: &[Record], columns: &[&str]) {
    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| row.get(c).map(FieldValue::to_text).unwrap_or_default())
            .collect();
        println!("   {}", cells.join(" | "));
    }
    if rows.is_empty() {
        println!("   (no rows)");
    }
}

fn print_cards(cards: &[Aggregate]) {
    for card in cards {
        let label = card.spec.label.as_deref().unwrap_or(&card.spec.group_by);
        let parts: Vec<String> = card
            .keys()
            .into_iter()
            .map(|k| format!("{}={}", k, card.get(k).unwrap_or_default()))
            .collect();
        println!("   {}: {}", label, parts.join(", "));
    }
}

fn print_badges(badges: &BadgeBoard) {
    let counts: Vec<String> = badges
        .counts()
        .iter()
        .map(|(name, count)| format!("{} ({})", name, count))
        .collect();
    println!("🔢 {}", counts.join("  "));
}
