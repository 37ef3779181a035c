use crate::sheet::{SheetSummary, Verdict};

/// Joins floor numbers with commas, e.g. "2,3"
pub fn format_floors(floors: &[u32]) -> String {
    floors
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Housekeeper number with name, e.g. "3 Alice"; blank names show the number only
pub fn format_housekeeper(number: &str, name: &str) -> String {
    if name.is_empty() {
        number.to_string()
    } else {
        format!("{} {}", number, name)
    }
}

/// Renders the summary as plain text, the way the sheet reads top to bottom
pub fn render_summary(summary: &SheetSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("** Housekeeping sheet {} **\n", summary.date));
    if !summary.submitter.is_empty() {
        out.push_str(&format!("Submitted by: {}\n", summary.submitter));
    }

    out.push_str("\nNo   Name                 Rooms  Floors      Keys            dd\n");
    for row in &summary.housekeepers {
        out.push_str(&format!(
            "{:<4} {:<20} {:>5}  {:<10}  {:<14}  {}\n",
            row.number,
            row.name,
            row.room_count,
            format_floors(&row.floors),
            row.keys,
            format_floors(&row.dd_floors),
        ));
    }

    let stats = &summary.stats;
    out.push_str(&format!(
        "\nRooms: {}  Muted: {}  All clean: {}  Instructed: {}  => {:?}\n",
        stats.room_count, stats.muted_count, stats.all_clean_count, stats.instruction_count, stats.verdict
    ));
    if stats.verdict == Verdict::NG {
        out.push_str("⚠️  Some rooms have no instruction\n");
    }

    let methods = &summary.clean_methods;
    out.push_str(&format!(
        "Eco: {}  Amenity: {}  Duvet: {}  Multiple night: {}\n",
        methods.eco, methods.amenity, methods.duvet, methods.multiple_night
    ));

    out.push_str("\nEnd times:\n");
    for column in &summary.instruction.columns {
        let bath = if column.bath { " (bath)" } else { "" };
        out.push_str(&format!(
            "  {} -> {}{}\n",
            format_housekeeper(&column.number, &column.name),
            column.end_time,
            bath
        ));
    }

    out.push_str("\nInstructions:\n");
    for row in summary.instruction.text_rows() {
        out.push_str(&format!("  {}\n", row.join("\t")));
    }
    out
}

/// Prints the summary to stdout
pub fn print_summary(summary: &SheetSummary) {
    print!("{}", render_summary(summary));
}
