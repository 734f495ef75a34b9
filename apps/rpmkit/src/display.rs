//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use rpmkit_ops::OperationResult;
use rpmkit_types::{ColorChoice, PlacementMethod, TargetReport};
use std::io;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    /// Color configuration
    color_choice: ColorChoice,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool, color_choice: ColorChoice) -> Self {
        Self {
            json_output,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render operation result
    pub fn render_result(&self, result: &OperationResult) -> io::Result<()> {
        if self.json_output {
            let json = result.to_json().map_err(io::Error::other)?;
            println!("{json}");
            return Ok(());
        }

        match result {
            OperationResult::Targets(reports) => self.render_targets(reports),
        }
        Ok(())
    }

    fn render_targets(&self, reports: &[TargetReport]) {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Target").add_attribute(Attribute::Bold),
            Cell::new("Steps").add_attribute(Attribute::Bold),
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("Duration").add_attribute(Attribute::Bold),
        ]);

        for report in reports {
            let mut steps: Vec<String> = report
                .repository_steps
                .iter()
                .map(|s| format!("make {}", s.step))
                .collect();
            let package = match &report.build {
                Some(build) => {
                    steps.push(format!("compose {}", build.profile));
                    let method = match build.method {
                        PlacementMethod::HardLink => "linked",
                        PlacementMethod::Copy => "copied",
                    };
                    format!("{} ({method})", build.destination.display())
                }
                None => "-".to_string(),
            };

            let target_cell = if self.supports_color() {
                Cell::new(report.target.to_string()).fg(Color::Green)
            } else {
                Cell::new(report.target.to_string())
            };
            table.add_row(vec![
                target_cell,
                Cell::new(steps.join(", ")),
                Cell::new(package),
                Cell::new(format!("{}ms", report.duration_ms)),
            ]);
        }

        println!("{}", self.style_heading("Summary"));
        println!("{table}");
    }

    fn style_heading(&self, text: &str) -> String {
        if self.supports_color() {
            Style::new().bold().apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Check if color output is supported
    pub fn supports_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }
}
