use crate::model::{Holiday, Plan};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import des fériés depuis CSV: header `date,name[,local_name]`
pub fn import_holidays_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Holiday>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let raw_date = rec.get(0).context("missing date")?.trim();
        let name = rec.get(1).context("missing name")?.trim();
        if raw_date.is_empty() || name.is_empty() {
            bail!("invalid holiday row (empty)");
        }
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .with_context(|| format!("invalid date: {raw_date}"))?;
        let local_name = rec.get(2).map(str::trim).unwrap_or("");
        out.push(Holiday::new(date, name, local_name));
    }
    Ok(out)
}

/// Export JSON du plan (jolie mise en forme)
pub fn export_plan_json<P: AsRef<Path>>(path: P, plan: &Plan) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(plan)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des blocs: header `id,start_date,end_date,vacation_days_used,total_days_off,description,is_manual`
pub fn export_suggestions_csv<P: AsRef<Path>>(path: P, plan: &Plan) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "id",
        "start_date",
        "end_date",
        "vacation_days_used",
        "total_days_off",
        "description",
        "is_manual",
    ])?;
    for s in &plan.suggestions {
        let start = s.start_date.to_string();
        let end = s.end_date.to_string();
        let used = s.vacation_days_used.to_string();
        let total = s.total_days_off.to_string();
        w.write_record([
            s.id.as_str(),
            start.as_str(),
            end.as_str(),
            used.as_str(),
            total.as_str(),
            s.description.as_str(),
            if s.is_manual { "true" } else { "false" },
        ])?;
    }
    w.flush()?;
    Ok(())
}
