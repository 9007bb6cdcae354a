//! Delete command for removing a block.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use crate::Config;
use crate::commands::util;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Event ID or a unique prefix of at least four characters.
    pub id: String,
}

pub fn run<W: Write>(writer: &mut W, args: &DeleteArgs, config: &Config) -> Result<()> {
    let mut planner = util::open_planner(&config.schedule_path)?;
    let id = util::resolve_id(planner.schedule(), &args.id)?;
    let day = planner.schedule().locate(id).map(|(day, _)| day);

    let removed = planner.delete(id)?;
    util::save_planner(&planner, &config.schedule_path)?;

    if let Some(day) = day {
        writeln!(writer, "Deleted {}", util::describe(day, &removed))?;
    }
    writeln!(writer, "Total: {:.2}h", planner.totals().total_hours())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use insta::assert_snapshot;

    use super::*;
    use crate::commands::util::test_support::*;

    #[test]
    fn delete_removes_event_and_updates_totals() {
        let temp = tempfile::tempdir().unwrap();
        let config = fixture_config(temp.path());
        let mut out = Vec::new();

        let args = DeleteArgs {
            id: "bbbb3333".to_string(),
        };
        run(&mut out, &args, &config).unwrap();

        assert_snapshot!(output(out), @r"
        Deleted bbbb3333 Friday 08:00-09:30 Campus Hours (1.50h)
        Total: 4.50h
        ");
        let snapshot = saved(&config);
        assert_eq!(snapshot.schedule.len(), 3);
        assert_eq!(snapshot.totals.overload, Duration::zero());
    }

    #[test]
    fn delete_rejects_ambiguous_prefix() {
        let temp = tempfile::tempdir().unwrap();
        let config = fixture_config(temp.path());
        let args = DeleteArgs {
            id: "bbbb".to_string(),
        };
        let err = run(&mut Vec::new(), &args, &config).unwrap_err();
        assert!(err.to_string().contains("ambiguous"));
        assert_eq!(saved(&config).schedule.len(), 4);
    }

    #[test]
    fn delete_full_id_that_does_not_exist() {
        let temp = tempfile::tempdir().unwrap();
        let config = fixture_config(temp.path());
        let args = DeleteArgs {
            id: "eeee0000-0000-4000-8000-000000000000".to_string(),
        };
        let err = run(&mut Vec::new(), &args, &config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "event not found: eeee0000-0000-4000-8000-000000000000"
        );
    }
}
