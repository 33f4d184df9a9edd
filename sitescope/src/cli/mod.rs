//! Command-line surface and dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use sitescope_client::{SiteClient, SiteContext};
use sitescope_model::SiteInfo;

use crate::{
    loader::{self, LoaderOptions},
    rows::{self, ListRow},
    tui,
};

#[derive(Parser)]
#[command(name = "sitescope", about = "SharePoint site metadata viewer")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Args, Clone)]
pub struct ConnectionArgs {
    /// Target site URL (overrides SITESCOPE_SITE_URL)
    #[arg(long)]
    pub site: Option<String>,
    /// Read environment values from this file instead of ./.env
    #[arg(long)]
    pub env_file: Option<PathBuf>,
    /// Request timeout in seconds (overrides SITESCOPE_TIMEOUT_SECS)
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Browse the site's sub-webs, content types, fields, and lists in a
    /// tabbed terminal UI (the default)
    View,
    /// Fetch once and print the four sorted sections to stdout
    Dump,
}

impl ConnectionArgs {
    fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            site: self.site.clone(),
            env_file: self.env_file.clone(),
            timeout_secs: self.timeout,
        }
    }
}

/// Resolve configuration and dispatch the selected subcommand.
pub async fn run(cli: Cli) -> Result<()> {
    let ctx = loader::load(&cli.connection.loader_options())?;

    match cli.command.unwrap_or(Command::View) {
        Command::View => {
            let handle = tokio::runtime::Handle::current();
            tokio::task::spawn_blocking(move || tui::run(ctx, handle))
                .await??;
            Ok(())
        }
        Command::Dump => dump(&ctx).await,
    }
}

async fn dump(ctx: &SiteContext) -> Result<()> {
    let client = SiteClient::new(ctx)?;
    let site = client.fetch_site_info().await?;
    print!("{}", render_dump(&site));
    Ok(())
}

/// Plain-text rendition of the four sorted sections, in the same fixed tab
/// order the TUI uses.
pub fn render_dump(site: &SiteInfo) -> String {
    let mut out = String::new();
    if !site.title.is_empty() {
        out.push_str(&format!("Site: {}\n\n", site.title));
    }
    section(&mut out, "Sub Webs", &rows::sub_web_rows(&site.webs));
    section(
        &mut out,
        "Content Types",
        &rows::content_type_rows(&site.content_types),
    );
    section(&mut out, "Fields", &rows::field_rows(&site.fields));
    section(&mut out, "Lists", &rows::list_rows(&site.lists));
    out
}

fn section(out: &mut String, title: &str, rows: &[ListRow]) {
    out.push_str(&format!("{title} ({})\n", rows.len()));
    for row in rows {
        out.push_str("  ");
        out.push_str(&row.primary);
        for extra in [&row.tertiary, &row.meta] {
            if !extra.is_empty() {
                out.push_str("  ");
                out.push_str(extra);
            }
        }
        out.push('\n');
        if !row.secondary.is_empty() {
            out.push_str("      ");
            out.push_str(&row.secondary);
            out.push('\n');
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitescope_model::{ListInfo, SubWeb};

    #[test]
    fn dump_sections_appear_in_fixed_tab_order() {
        let site = SiteInfo::default();
        let out = render_dump(&site);
        let webs = out.find("Sub Webs (0)").unwrap();
        let cts = out.find("Content Types (0)").unwrap();
        let fields = out.find("Fields (0)").unwrap();
        let lists = out.find("Lists (0)").unwrap();
        assert!(webs < cts && cts < fields && fields < lists);
    }

    #[test]
    fn dump_orders_rows_and_carries_counts() {
        let site = SiteInfo {
            title: "Contoso".into(),
            webs: vec![
                SubWeb {
                    title: "Zeta".into(),
                    ..SubWeb::default()
                },
                SubWeb {
                    title: "Alpha".into(),
                    description: "First".into(),
                    server_relative_url: "/sites/alpha".into(),
                },
            ],
            lists: vec![ListInfo {
                title: "Documents".into(),
                description: String::new(),
                base_template: 101,
            }],
            ..SiteInfo::default()
        };
        let out = render_dump(&site);
        assert!(out.starts_with("Site: Contoso\n"));
        assert!(out.contains("Sub Webs (2)"));
        assert!(out.find("Alpha").unwrap() < out.find("Zeta").unwrap());
        assert!(out.contains("/sites/alpha"));
        assert!(out.contains("      First\n"));
        assert!(out.contains("  Documents  101\n"));
    }
}
