//! Console output formatter for strategy canvases

use canvas_application::PipelineOutput;
use canvas_domain::{CanonicalDocument, Field, OutputFormat};
use colored::Colorize;

/// Formats a generated canvas for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format in the requested console format
    pub fn format(output: &PipelineOutput, format: OutputFormat) -> String {
        match format {
            OutputFormat::Markdown => Self::format_markdown(&output.rendered),
            OutputFormat::Json => Self::format_json(&output.document),
            OutputFormat::Tree => Self::format_tree(&output.document),
        }
    }

    /// Rendered markdown, with headings highlighted
    pub fn format_markdown(rendered: &str) -> String {
        rendered
            .lines()
            .map(|line| {
                if line.starts_with("# ") || line.starts_with("## ") {
                    line.cyan().bold().to_string()
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format as JSON
    pub fn format_json(doc: &CanonicalDocument) -> String {
        serde_json::to_string_pretty(doc).unwrap_or_else(|_| "{}".to_string())
    }

    /// Colored tree view of the canonical document
    pub fn format_tree(doc: &CanonicalDocument) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Strategy Canvas"));
        output.push('\n');

        output.push_str(&Self::section_header("Stocks"));
        for (key, value) in doc.stocks().iter() {
            Self::push_field(&mut output, 1, key, value);
        }

        output.push_str(&Self::section_header("Flows"));
        for (key, value) in doc.flows().iter() {
            Self::push_field(&mut output, 1, key, value);
        }

        output.push_str(&Self::section_header("Loops"));
        for (label, effects) in doc.loops().iter() {
            output.push_str(&format!("  {} {}\n", label.yellow().bold(), "->".dimmed()));
            for effect in effects {
                output.push_str(&format!("    * {}\n", effect));
            }
        }

        output.push_str(&Self::section_header("Context"));
        for (key, items) in doc.context().iter() {
            output.push_str(&format!("  {}\n", key.yellow().bold()));
            for item in items {
                output.push_str(&format!("    * {}\n", item));
            }
        }

        let summary = doc.summary();
        for (title, items) in [
            ("Insights", &summary.insights),
            ("Bottlenecks", &summary.bottlenecks),
            ("Opportunities", &summary.opportunities),
        ] {
            if !items.is_empty() {
                output.push_str(&format!("\n{}\n", format!("{}:", title).green().bold()));
                for item in items {
                    output.push_str(&format!("  * {}\n", item));
                }
            }
        }

        if !summary.strategic_recommendation.is_empty() {
            output.push_str(&format!(
                "\n{}\n{}\n",
                "Strategic Recommendation:".green().bold(),
                Self::indent(&summary.strategic_recommendation, "  ")
            ));
        }

        if !doc.diagram().is_empty() {
            output.push_str(&format!(
                "\n{}\n{}\n",
                "Diagram (mermaid):".dimmed(),
                Self::indent(doc.diagram(), "  ")
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    fn push_field(output: &mut String, depth: usize, key: &str, value: &Field) {
        let pad = "  ".repeat(depth);
        match value {
            Field::Text(text) => {
                output.push_str(&format!("{}{}: {}\n", pad, key.yellow(), text));
            }
            Field::List(items) => {
                output.push_str(&format!("{}{}\n", pad, key.yellow()));
                for item in items {
                    output.push_str(&format!("{}  * {}\n", pad, item));
                }
            }
            Field::Group(group) => {
                output.push_str(&format!("{}{}\n", pad, key.yellow()));
                for (inner_key, inner) in group.iter() {
                    Self::push_field(output, depth + 1, inner_key, inner);
                }
            }
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
