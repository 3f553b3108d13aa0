//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Main menu -> accession prompt -> pipeline run -> optional export.

use crate::adapters::ui::progress::spinner;
use crate::adapters::ui::render::{print_notice, print_result};
use crate::domain::{AccessionId, DomainError, Notice, Severity};
use crate::ports::InputPort;
use crate::usecases::{ExportService, PipelineService};
use async_trait::async_trait;
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, StyleSheet, Styled};
use inquire::{Confirm, Select, Text};
use std::sync::Arc;
use tracing::warn;

const MENU_LOOKUP: &str = "Look up a UniProt ID";
const MENU_EXIT: &str = "Exit";

/// Applies the prompt theme globally. Called once from `init_ui`.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("?").with_fg(Color::LightCyan))
        .with_answer(StyleSheet::new().with_fg(Color::LightMagenta));
    inquire::set_global_render_config(config);
}

/// True when the user pressed Esc or Ctrl-C; treated as "leave" rather than an error.
fn is_cancel(e: &InquireError) -> bool {
    matches!(
        e,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    pipeline: Arc<PipelineService>,
    export_service: Arc<ExportService>,
    auto_export: bool,
}

impl TuiInputPort {
    pub fn new(
        pipeline: Arc<PipelineService>,
        export_service: Arc<ExportService>,
        auto_export: bool,
    ) -> Self {
        Self {
            pipeline,
            export_service,
            auto_export,
        }
    }

    /// Resolve one accession, print it, and export if asked to.
    async fn lookup(&self, accession: &AccessionId, interactive: bool) -> Result<(), DomainError> {
        let pb = spinner(format!("Resolving {} against KEGG...", accession));
        let result = self.pipeline.resolve(accession).await;
        pb.finish_and_clear();

        print_result(accession, &result);
        if !result.is_success() {
            return Ok(());
        }

        let export = if interactive {
            match Confirm::new("Save disease CSV and pathway images?")
                .with_default(true)
                .prompt()
            {
                Ok(answer) => answer,
                Err(e) if is_cancel(&e) => false,
                Err(e) => return Err(DomainError::Ui(e.to_string())),
            }
        } else {
            self.auto_export
        };
        if !export {
            return Ok(());
        }

        match self.export_service.export(accession, &result).await {
            Ok(report) => {
                let mut written: Vec<_> = report.csv.into_iter().collect();
                written.extend(report.images);
                written.extend(report.summary);
                for path in written {
                    println!("  saved {}", path.display());
                }
            }
            Err(e) => {
                warn!(accession = %accession, error = %e, "export failed");
                print_notice(&Notice {
                    severity: Severity::Error,
                    message: e.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choice = match Select::new("What would you like to do?", vec![MENU_LOOKUP, MENU_EXIT])
                .prompt()
            {
                Ok(choice) => choice,
                Err(e) if is_cancel(&e) => return Ok(()),
                Err(e) => return Err(DomainError::Ui(e.to_string())),
            };
            if choice == MENU_EXIT {
                return Ok(());
            }

            let input = match Text::new("Enter UniProt ID (e.g., P01308):").prompt() {
                Ok(input) => input,
                Err(e) if is_cancel(&e) => continue,
                Err(e) => return Err(DomainError::Ui(e.to_string())),
            };

            match AccessionId::parse(&input) {
                Ok(accession) => self.lookup(&accession, true).await?,
                Err(e) => print_notice(&Notice {
                    severity: Severity::Warning,
                    message: e.to_string(),
                }),
            }
        }
    }

    async fn run_batch(&self, accessions: &[String]) -> Result<(), DomainError> {
        for raw in accessions {
            match AccessionId::parse(raw) {
                Ok(accession) => {
                    println!("== {}", accession);
                    self.lookup(&accession, false).await?;
                }
                Err(e) => {
                    warn!(input = %raw, "skipping invalid accession");
                    print_notice(&Notice {
                        severity: Severity::Warning,
                        message: e.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
