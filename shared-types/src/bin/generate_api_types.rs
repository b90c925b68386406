use shared_types::*;
use std::fs;
use std::path::PathBuf;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for the appointment form
    let mut types = Vec::new();

    // Service types
    types.push(clean_type(ServiceType::export_to_string()?));
    types.push(clean_type(ServiceOption::export_to_string()?));

    // Form types
    types.push(clean_type(FormField::export_to_string()?));
    types.push(clean_type(AppointmentForm::export_to_string()?));
    types.push(clean_type(AppointmentRequest::export_to_string()?));
    types.push(clean_type(FieldValue::export_to_string()?));
    types.push(clean_type(FieldChange::export_to_string()?));
    types.push(clean_type(FieldErrors::export_to_string()?));

    // Submission types
    types.push(clean_type(SubmitPhase::export_to_string()?));
    types.push(clean_type(NotificationKind::export_to_string()?));
    types.push(clean_type(Notification::export_to_string()?));
    types.push(clean_type(SubmitResponse::export_to_string()?));

    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("../site/src/api-types/types.ts"));
    if let Some(output_dir) = output_path.parent() {
        fs::create_dir_all(output_dir)?;
    }

    let output = types.join("\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

/// Types land in a single file, so per-type import lines are dropped
fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
