use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fdomain::api::{glue, DSymbol, FdCfg, FundamentalDomain};
use serde_json::json;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod doc;
mod provenance;

use doc::{InvariantsDoc, LayoutDoc};
use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "fdomain-cli")]
#[command(about = "Fundamental-domain layout for Delaney–Dress symbols")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Glue a symbol and print its invariants as JSON
    Classify {
        #[arg(long)]
        symbol: String,
    },
    /// Lay out a symbol's fundamental domain
    Layout {
        #[arg(long)]
        symbol: String,
        /// Write the layout here (plus a provenance sidecar) instead of stdout
        #[arg(long)]
        out: Option<String>,
        #[arg(long)]
        no_relax: bool,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Classify { symbol } => classify(&symbol),
        Action::Layout {
            symbol,
            out,
            no_relax,
        } => layout(&symbol, out.as_deref(), !no_relax),
        Action::Report => report(),
    }
}

fn parse_symbol(text: &str) -> Result<DSymbol> {
    text.parse::<DSymbol>()
        .with_context(|| format!("reading symbol {text}"))
}

fn classify(symbol: &str) -> Result<()> {
    tracing::info!(symbol, "classify");
    let sym = parse_symbol(symbol)?;
    let graph = glue(&sym, &FdCfg::default())?;
    println!("{}", serde_json::to_string_pretty(&InvariantsDoc::from_graph(&graph))?);
    Ok(())
}

fn layout(symbol: &str, out: Option<&str>, relaxed: bool) -> Result<()> {
    tracing::info!(symbol, out = ?out, relaxed, "layout");
    let sym = parse_symbol(symbol)?;
    let fd = FundamentalDomain::build_with(&sym, &FdCfg::default(), relaxed)?;
    let doc = LayoutDoc::new(sym.to_string(), &fd);
    let body = serde_json::to_vec_pretty(&doc)?;
    match out {
        None => println!("{}", String::from_utf8(body)?),
        Some(out) => {
            write_layout(Path::new(out), &body)?;
            let s = fd.summary();
            let payload = Payload::new(sym.to_string(), json!({ "relax": relaxed }))
                .with_results(json!({
                    "geometry": s.geometry.name(),
                    "radius": s.radius,
                    "boundary": s.boundary,
                    "converged": s.converged,
                }));
            let sidecar = write_sidecar(out, &payload)?;
            tracing::info!(sidecar = %sidecar.display(), "wrote provenance");
        }
    }
    Ok(())
}

fn write_layout(path: &Path, body: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(path, body).with_context(|| format!("writing {}", path.display()))
}

fn report() -> Result<()> {
    let payload = Payload::new("", json!({}));
    let doc = provenance::document(&payload, &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
