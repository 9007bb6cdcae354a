//! List command showing blocks by day.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use clap::Args;
use fsched_core::{Day, Event, Planner};

use crate::Config;
use crate::commands::util;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Print the schedule as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &ListArgs, config: &Config) -> Result<()> {
    let planner = util::open_planner(&config.schedule_path)?;
    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(planner.schedule())?)?;
    } else {
        write!(writer, "{}", format_schedule(&planner))?;
    }
    Ok(())
}

fn flags(event: &Event) -> String {
    let mut flags = String::new();
    if event.is_overload {
        flags.push_str(" [overload]");
    }
    if let Some(temporary) = &event.temporary {
        write!(flags, " [temporary: counts {:.2}h", temporary.counted_hours()).unwrap();
        if let Some(date) = temporary.expected_end_date {
            write!(flags, " until {date}").unwrap();
        }
        flags.push(']');
    }
    flags
}

fn format_schedule(planner: &Planner) -> String {
    let mut output = String::new();
    let faculty = planner.faculty();
    writeln!(output, "{} - {}", faculty.name, faculty.semester).unwrap();

    let schedule = planner.schedule();
    if schedule.is_empty() {
        writeln!(output, "\nNo events scheduled.").unwrap();
        return output;
    }

    for day in Day::ALL {
        let events = schedule.day(day);
        if events.is_empty() {
            continue;
        }
        writeln!(output, "\n{}", day.title()).unwrap();
        for event in events {
            let location = event
                .kind()
                .class_location()
                .map(|l| format!(" @ {l}"))
                .unwrap_or_default();
            let description = event
                .description
                .as_deref()
                .map(|d| format!(" - {d}"))
                .unwrap_or_default();
            writeln!(
                output,
                "  {}  {}-{}  {:<8}  {}{}{}  {:.2}h{}",
                event.id().short(),
                event.start(),
                event.end(),
                event.category().as_str(),
                event.kind().label(),
                location,
                description,
                event.duration_hours(),
                flags(event)
            )
            .unwrap();
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;
    use crate::commands::util::test_support::*;

    #[test]
    fn list_groups_by_day() {
        let temp = tempfile::tempdir().unwrap();
        let config = fixture_config(temp.path());
        let mut out = Vec::new();

        run(&mut out, &ListArgs { json: false }, &config).unwrap();

        assert_snapshot!(output(out), @r"
        Ada Lovelace - Fall 2026

        Monday
          aaaa1111  09:00-10:20  teaching  CS 101 @ Hall B  1.50h

        Wednesday
          bbbb2222  13:00-14:00  student   Student Hours - Walk-in  1.00h

        Thursday
          cccc4444  10:00-10:45  student   Student Hours  0.75h [temporary: counts 2.00h until 2026-12-11]

        Friday
          bbbb3333  08:00-09:30  campus    Campus Hours  1.50h [overload]
        ");
    }

    #[test]
    fn list_empty_schedule() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());
        crate::commands::util::save_planner(
            &Planner::new(fsched_core::FacultyInfo::new("Ada", "Fall")),
            &config.schedule_path,
        )
        .unwrap();
        let mut out = Vec::new();

        run(&mut out, &ListArgs { json: false }, &config).unwrap();

        assert_snapshot!(output(out), @r"
        Ada - Fall

        No events scheduled.
        ");
    }

    #[test]
    fn list_json_uses_save_file_shape() {
        let temp = tempfile::tempdir().unwrap();
        let config = fixture_config(temp.path());
        let mut out = Vec::new();

        run(&mut out, &ListArgs { json: true }, &config).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output(out)).unwrap();
        assert_eq!(value["monday"][0]["className"], "CS 101");
        assert_eq!(value["thursday"][0]["isTemporary"], true);
        assert_eq!(value["saturday"].as_array().unwrap().len(), 0);
    }
}
