use console::style;
use crate::cli::commands::{LeadsArgs, NoteArgs, StatusArgs};
use crate::config::ProspectorConfig;
use crate::db::Database;
use crate::errors::ProspectorError;
use crate::models::{filter_by_category, parse_status_filter, Lead, LeadStatus};
use tracing::info;

pub async fn handle_leads(args: LeadsArgs, config: ProspectorConfig) -> Result<(), ProspectorError> {
    let db = Database::new(&config.database.path)?;
    let status = parse_status_filter(args.status.as_deref())?;
    let leads = filter_by_category(db.list_leads(status)?, args.category.as_deref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&leads)?);
        return Ok(());
    }

    if leads.is_empty() {
        println!("No leads found matching your filters.");
        return Ok(());
    }

    println!("Work Queue ({} leads)", leads.len());
    for lead in &leads {
        println!("{}", format_lead_line(lead));
    }

    let counts = db.status_counts()?;
    let summary: Vec<String> = counts
        .iter()
        .map(|(status, count)| format!("{} {}", count, status))
        .collect();
    println!("\n{}", style(summary.join(" | ")).dim());
    Ok(())
}

pub async fn handle_status(args: StatusArgs, config: ProspectorConfig) -> Result<(), ProspectorError> {
    let status: LeadStatus = args.status.parse()?;
    let db = Database::new(&config.database.path)?;

    if !db.set_status(&args.place_id, status, args.note.as_deref())? {
        return Err(ProspectorError::NotFound(format!("Lead {} not found", args.place_id)));
    }
    info!(place_id = %args.place_id, status = %status, "Lead status updated");
    println!("{} {} is now {}", style("✓").green(), args.place_id, styled_status(status));
    Ok(())
}

pub async fn handle_note(args: NoteArgs, config: ProspectorConfig) -> Result<(), ProspectorError> {
    let db = Database::new(&config.database.path)?;

    if !db.save_note(&args.place_id, &args.text)? {
        return Err(ProspectorError::NotFound(format!("Lead {} not found", args.place_id)));
    }
    println!("{} Saved", style("✓").green());
    Ok(())
}

fn format_lead_line(lead: &Lead) -> String {
    format!(
        "{:<12} {} [{}]  {}  {}",
        styled_status(lead.status),
        style(&lead.name).bold(),
        lead.source_keyword,
        lead.phone.as_deref().unwrap_or("no phone"),
        style(&lead.place_id).dim(),
    )
}

fn styled_status(status: LeadStatus) -> console::StyledObject<&'static str> {
    let s = style(status.as_str());
    match status {
        LeadStatus::New => s.green(),
        LeadStatus::Contacted => s.blue(),
        LeadStatus::Interested => s.yellow(),
        LeadStatus::Closed => s.dim(),
        LeadStatus::Ignored => s.red(),
    }
}
