use crate::discovery::IconOrigin;
use crate::pipeline::RunSummary;
use colored::Colorize;
use miette::Result;

/// Terminal reporter with colored output
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report(&self, summary: &RunSummary) -> Result<()> {
        if summary.wrappers.is_empty() && summary.skipped.is_empty() {
            println!("{}", "No SVG icons found.".yellow());
            return Ok(());
        }

        println!();
        println!(
            "{}",
            format!("Generated {} wrapper templates:", summary.wrappers.len())
                .green()
                .bold()
        );

        for origin in [IconOrigin::Plain, IconOrigin::Optimized] {
            let group: Vec<_> = summary
                .wrappers
                .iter()
                .filter(|w| w.origin == origin)
                .collect();
            if group.is_empty() {
                continue;
            }

            println!();
            println!("{}", format!("{} icons:", origin.as_str()).cyan().bold());
            for wrapper in group {
                let view_box = if wrapper.view_box.is_empty() {
                    "no viewBox".dimmed().to_string()
                } else {
                    wrapper.view_box.clone()
                };
                println!(
                    "  {} {} -> #{} ({})",
                    "+".green(),
                    wrapper.name.white(),
                    wrapper.sprite_ref,
                    view_box
                );
                if let Some(replaced) = &wrapper.replaced {
                    println!(
                        "    {}",
                        format!("replaces {}", replaced.display()).dimmed()
                    );
                }
            }
        }

        if !summary.skipped.is_empty() {
            println!();
            println!(
                "{}",
                format!("Skipped {} files:", summary.skipped.len())
                    .yellow()
                    .bold()
            );
            for skip in &summary.skipped {
                println!(
                    "  {} {} [{}] {}",
                    "-".yellow(),
                    skip.path.display(),
                    skip.stage,
                    skip.reason.dimmed()
                );
            }
        }

        println!();
        println!(
            "{}",
            format!(
                "Cleaned {}, normalized {} ({} rewritten), generated {}",
                summary.cleaned,
                summary.normalized,
                summary.rewritten,
                summary.wrappers.len()
            )
            .dimmed()
        );

        if summary.dry_run {
            println!("{}", "Dry run: no files were written.".yellow());
        }

        Ok(())
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
