//! Export command writing the two-sheet workbook to disk.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use fsched_core::export::{
    ExportError, ExportReceipt, ExportSink, ExportSnapshot, Workbook, workbook_file_name,
};

use crate::Config;
use crate::commands::util;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// Tab-separated text, one block per sheet.
    #[default]
    Tsv,
    /// JSON with a `sheets` array.
    Json,
}

impl ExportFormat {
    const fn extension(self) -> &'static str {
        match self {
            Self::Tsv => "tsv",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    pub format: ExportFormat,
    /// Output file. Defaults to `<name>_schedule_<semester>.<ext>` in the export directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Writes the workbook to one file.
#[derive(Debug)]
pub struct WorkbookFileSink {
    pub path: PathBuf,
    pub format: ExportFormat,
}

impl ExportSink for WorkbookFileSink {
    fn export(&self, snapshot: &ExportSnapshot<'_>) -> Result<ExportReceipt, ExportError> {
        let workbook = Workbook::build(snapshot);
        let content = match self.format {
            ExportFormat::Tsv => workbook.to_tsv(),
            ExportFormat::Json => serde_json::to_string_pretty(&workbook)? + "\n",
        };
        let io_err = |source| ExportError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(&self.path, content).map_err(io_err)?;
        tracing::debug!(path = %self.path.display(), format = ?self.format, "exported workbook");
        Ok(ExportReceipt {
            path: self.path.clone(),
        })
    }
}

pub fn run<W: Write>(writer: &mut W, args: &ExportArgs, config: &Config) -> Result<()> {
    let planner = util::open_planner(&config.schedule_path)?;
    let path = args.output.clone().unwrap_or_else(|| {
        config
            .export_dir
            .join(workbook_file_name(planner.faculty(), args.format.extension()))
    });

    let sink = WorkbookFileSink {
        path,
        format: args.format,
    };
    let receipt = sink
        .export(&planner.export_snapshot())
        .context("failed to export workbook")?;
    writeln!(writer, "Exported workbook to {}", receipt.path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::util::test_support::*;

    #[test]
    fn export_tsv_to_default_name() {
        let temp = tempfile::tempdir().unwrap();
        let config = fixture_config(temp.path());
        let mut out = Vec::new();

        let args = ExportArgs {
            format: ExportFormat::Tsv,
            output: None,
        };
        run(&mut out, &args, &config).unwrap();

        let path = temp.path().join("Ada_Lovelace_schedule_Fall_2026.tsv");
        assert_eq!(
            output(out),
            format!("Exported workbook to {}\n", path.display())
        );
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Detailed Events\nDetailed Schedule\n"));
        assert!(content.contains("Friday\tcampus\t08:00\t09:30\t\t\t\t1.50\tYes\tNo\n"));
        assert!(content.contains("Student Hours\t3.00\n"));
        assert!(content.ends_with("Total Minus Overload\t4.50\n"));
    }

    #[test]
    fn export_json_to_explicit_path() {
        let temp = tempfile::tempdir().unwrap();
        let config = fixture_config(temp.path());
        let path = temp.path().join("out").join("week.json");

        let args = ExportArgs {
            format: ExportFormat::Json,
            output: Some(path.clone()),
        };
        run(&mut Vec::new(), &args, &config).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["sheets"][0]["name"], "Detailed Events");
        assert_eq!(value["sheets"][1]["name"], "Summary");
        assert_eq!(value["sheets"][0]["rows"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn export_reports_unwritable_destination() {
        let temp = tempfile::tempdir().unwrap();
        let config = fixture_config(temp.path());
        let blocker = temp.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        let args = ExportArgs {
            format: ExportFormat::Tsv,
            output: Some(blocker.join("nested.tsv")),
        };
        let err = run(&mut Vec::new(), &args, &config).unwrap_err();
        assert_eq!(err.to_string(), "failed to export workbook");
    }
}
