//! CLI output formatting utilities.

use crate::error::Result;
use crate::summary::Summary;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

const HEADER_ART: &str = r"
  _____ _      ______        __
 |_   _| |    |  _ \ \      / /
   | | | |    | | | \ \ /\ / /
   | | | |    | |_| |\ V  V /
   |_| |_|____|____/  \_/\_/
         |_____|
";

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Print a summary with timestamps and deep links into the video.
    pub fn summary(summary: &Summary, video_url: &str) -> Result<()> {
        println!("{}", style(HEADER_ART).cyan().bold());
        println!("  {}\n", style("too long; didn't watch").dim());

        let one_liner = if summary.one_liner.is_empty() {
            "No summary available"
        } else {
            summary.one_liner.as_str()
        };
        println!("  {}", style("tl;dw").yellow().bold());
        println!("  {}\n", style(one_liner).white().bold());

        for (i, section) in summary.sections.iter().enumerate() {
            let number = i + 1;
            let title = if section.title.is_empty() {
                format!("Section {}", number)
            } else {
                section.title.clone()
            };

            println!("  {}", style(format!("#{} {}", number, title)).magenta().bold());
            if !section.summary.is_empty() {
                println!("  {}", section.summary);
            }
            println!();
            println!("  {}", style(format!("\"{}\"", section.quote)).italic().dim());
            println!();
            println!(
                "    {}  {}",
                style(format!("[{}]", section.timestamp())).cyan().bold(),
                style(section.url(video_url)?).underlined().blue()
            );
            println!();
        }

        println!("  {}", style(RULE).dim());
        println!(
            "  {} {}",
            style("full video:").dim(),
            style(video_url).underlined().blue()
        );
        println!();

        Ok(())
    }

    /// Print a summary as pretty JSON.
    pub fn summary_json(summary: &Summary, video_url: &str) -> Result<()> {
        println!("{}", summary_to_json(summary, video_url)?);
        Ok(())
    }
}

#[derive(Serialize)]
struct SummaryView<'a> {
    video_url: &'a str,
    one_liner: &'a str,
    sections: Vec<SectionView<'a>>,
}

#[derive(Serialize)]
struct SectionView<'a> {
    title: &'a str,
    summary: &'a str,
    quote: &'a str,
    timestamp_hint: &'a str,
    matched_start: f64,
    timestamp: String,
    url: String,
}

/// JSON view of a summary with derived timestamps and links.
fn summary_to_json(summary: &Summary, video_url: &str) -> Result<String> {
    let sections = summary
        .sections
        .iter()
        .map(|s| {
            Ok(SectionView {
                title: &s.title,
                summary: &s.summary,
                quote: &s.quote,
                timestamp_hint: &s.timestamp_hint,
                matched_start: s.start_seconds(),
                timestamp: s.timestamp(),
                url: s.url(video_url)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let view = SummaryView {
        video_url,
        one_liner: &summary.one_liner,
        sections,
    };
    Ok(serde_json::to_string_pretty(&view)?)
}
