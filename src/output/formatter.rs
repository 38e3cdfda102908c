//! Output formatters for scan reports

use crate::config::{AbsentCategoryPolicy, OutputFormat, ScoringStrategy};
use crate::error::{Result, ResumeScannerError};
use crate::output::report::{ScanReport, Verdict};
use colored::{Color, Colorize};
use std::fmt::Write as _;
use std::path::Path;

/// Trait for formatting scan reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colored score badges
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter. Without `detailed` it emits only the evaluation result.
pub struct JsonFormatter {
    pretty: bool,
    detailed: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn fmt_err(e: std::fmt::Error) -> ResumeScannerError {
    ResumeScannerError::OutputFormatting(e.to_string())
}

fn strategy_label(strategy: ScoringStrategy) -> &'static str {
    match strategy {
        ScoringStrategy::Tfidf => "TF-IDF cosine similarity",
        ScoringStrategy::KeywordFrequency => "keyword frequency",
    }
}

fn policy_label(policy: AbsentCategoryPolicy) -> &'static str {
    match policy {
        AbsentCategoryPolicy::CountAsZero => "absent sections count as zero",
        AbsentCategoryPolicy::Exclude => "absent sections excluded",
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n▓ {}\n", title)
        }
    }

    fn score_color(score: f64) -> Color {
        match Verdict::from_score(score) {
            Verdict::Excellent => Color::Green,
            Verdict::Good => Color::BrightGreen,
            Verdict::Fair => Color::Yellow,
            Verdict::Weak => Color::BrightRed,
            Verdict::Poor => Color::Red,
        }
    }

    fn format_score_bar(&self, score: f64) -> String {
        let filled = (score / 5.0).round() as usize;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled.min(20)));
        self.colorize(&bar, Self::score_color(score))
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String> {
        let mut output = String::new();
        let overall = report.result.overall_score;

        output.push_str(&self.format_header("RESUME SCAN"));
        writeln!(
            output,
            "Candidate: {}\nReference: {}",
            report.metadata.candidate_path, report.metadata.reference_path
        )
        .map_err(fmt_err)?;

        output.push_str(&self.format_header("Section Scores"));
        let width = report
            .sections
            .iter()
            .map(|s| s.category.chars().count())
            .max()
            .unwrap_or(0);
        for section in &report.sections {
            writeln!(
                output,
                "  {:<width$}  {} {:>6.1}",
                section.category,
                self.format_score_bar(section.score),
                section.score,
                width = width
            )
            .map_err(fmt_err)?;
        }

        output.push_str(&self.format_header("Overall"));
        let badge = self.colorize(report.verdict.label(), Self::score_color(overall));
        writeln!(output, "Overall Score: {:.1} {}", overall, badge).map_err(fmt_err)?;
        writeln!(
            output,
            "Verdict: {}",
            self.colorize(report.verdict.description(), Color::Cyan)
        )
        .map_err(fmt_err)?;

        if self.detailed {
            output.push_str(&self.format_header("Details"));
            for section in &report.sections {
                let status = if section.absent {
                    "absent from both"
                } else if section.candidate_words == 0 {
                    "missing from candidate"
                } else if section.reference_words == 0 {
                    "not in reference"
                } else {
                    "compared"
                };
                writeln!(
                    output,
                    "  • {}: {} words vs {} words ({})",
                    section.category, section.candidate_words, section.reference_words, status
                )
                .map_err(fmt_err)?;
            }

            let strong = report.strongest_sections(70.0);
            if !strong.is_empty() {
                writeln!(output, "\nStrongest sections:").map_err(fmt_err)?;
                for section in strong {
                    writeln!(output, "  • {} ({:.1})", section.category, section.score)
                        .map_err(fmt_err)?;
                }
            }

            let missing = report.missing_sections();
            if !missing.is_empty() {
                writeln!(output, "\n{}", self.colorize("Missing sections:", Color::Yellow))
                    .map_err(fmt_err)?;
                for section in missing {
                    writeln!(output, "  • {}", section.category).map_err(fmt_err)?;
                }
            }

            writeln!(
                output,
                "\nScoring: {} ({})\nGenerated: {} | Processing time: {}ms",
                strategy_label(report.metadata.strategy),
                policy_label(report.metadata.absent_policy),
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            )
            .map_err(fmt_err)?;
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool, detailed: bool) -> Self {
        Self { pretty, detailed }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String> {
        let json = match (self.detailed, self.pretty) {
            (true, true) => serde_json::to_string_pretty(report)?,
            (true, false) => serde_json::to_string(report)?,
            (false, true) => serde_json::to_string_pretty(&report.result)?,
            (false, false) => serde_json::to_string(&report.result)?,
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String> {
        let mut md = String::new();

        writeln!(md, "# Resume Scan Report\n").map_err(fmt_err)?;
        writeln!(
            md,
            "**Overall score:** {:.1} ({})\n",
            report.result.overall_score,
            report.verdict.label()
        )
        .map_err(fmt_err)?;
        writeln!(md, "_{}_\n", report.verdict.description()).map_err(fmt_err)?;

        writeln!(md, "## Section Scores\n").map_err(fmt_err)?;
        writeln!(md, "| Section | Score | Candidate words | Reference words |").map_err(fmt_err)?;
        writeln!(md, "|---|---:|---:|---:|").map_err(fmt_err)?;
        for section in &report.sections {
            writeln!(
                md,
                "| {} | {:.1} | {} | {} |",
                section.category, section.score, section.candidate_words, section.reference_words
            )
            .map_err(fmt_err)?;
        }

        let missing = report.missing_sections();
        if !missing.is_empty() {
            writeln!(md, "\n## Missing Sections\n").map_err(fmt_err)?;
            for section in missing {
                writeln!(md, "- {}", section.category).map_err(fmt_err)?;
            }
        }

        if self.include_metadata {
            writeln!(md, "\n---\n").map_err(fmt_err)?;
            writeln!(md, "- Candidate: `{}`", report.metadata.candidate_path).map_err(fmt_err)?;
            writeln!(md, "- Reference: `{}`", report.metadata.reference_path).map_err(fmt_err)?;
            writeln!(
                md,
                "- Scoring: {} ({})",
                strategy_label(report.metadata.strategy),
                policy_label(report.metadata.absent_policy)
            )
            .map_err(fmt_err)?;
            writeln!(
                md,
                "- Generated: {} by resume-scanner {}",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.version
            )
            .map_err(fmt_err)?;
        }

        Ok(md)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true, detailed),
            markdown_formatter: MarkdownFormatter::new(detailed),
        }
    }

    pub fn generate(&self, report: &ScanReport, format: OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        };
        formatter.format_report(report)
    }

    pub fn save(&self, content: &str, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
