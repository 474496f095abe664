//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::stats::ScanStats;
use crate::types::ScanRecord;
use console::style;
use std::io::{self, Write};

const RULE: &str = "───────────────────────────────────────────────────────────────";

/// Write records as a table, one line per record.
pub fn write_plain<W: Write + ?Sized>(out: &mut W, records: &[ScanRecord]) -> io::Result<()> {
    if records.is_empty() {
        writeln!(out, "  {}", style("No scans to display.").dim())?;
        return Ok(());
    }

    writeln!(out, "  {}", style(RULE).dim())?;
    writeln!(
        out,
        "  {:<8}  {:<12}  {:<24}  {:>6}  {:<10}  {}",
        style("ID").bold(),
        style("CROP").bold(),
        style("DISEASE").bold(),
        style("CONF").bold(),
        style("DATE").bold(),
        style("USER").bold()
    )?;
    writeln!(out, "  {}", style(RULE).dim())?;

    for record in records {
        let id = record.id.as_ref().map_or("-", |id| id.short());
        let disease = truncate_string(&record.disease, 24);
        let disease = if record.is_healthy() {
            style(disease).green()
        } else {
            style(disease).yellow()
        };

        writeln!(
            out,
            "  {:<8}  {:<12}  {:<24}  {:>6}  {:<10}  {}",
            style(id).dim(),
            truncate_string(&record.crop, 12),
            disease,
            format_confidence(record.confidence_score),
            record
                .scan_date
                .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string()),
            record.user_id
        )?;
    }

    writeln!(out, "  {}", style(RULE).dim())?;
    writeln!(out, "  {} scan(s)", records.len())?;
    Ok(())
}

/// Write every field of a single record.
pub fn write_detail<W: Write + ?Sized>(out: &mut W, record: &ScanRecord) -> io::Result<()> {
    let id = record.id.as_ref().map_or("-", |id| id.as_str());
    let date = record
        .scan_date
        .map_or_else(|| "-".to_string(), |d| d.to_rfc3339());

    writeln!(out)?;
    writeln!(out, "Scan Report: {}", style(id).cyan().bold())?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "  {:<13} {}", style("User:").bold(), record.user_id)?;
    writeln!(out, "  {:<13} {}", style("Crop:").bold(), record.crop)?;
    writeln!(out, "  {:<13} {}", style("Disease:").bold(), record.disease)?;
    writeln!(
        out,
        "  {:<13} {}",
        style("Confidence:").bold(),
        format_confidence(record.confidence_score)
    )?;
    writeln!(out, "  {:<13} {}", style("Scanned:").bold(), date)?;
    writeln!(out, "  {:<13} {}", style("Image:").bold(), record.image_url)?;
    writeln!(out)?;
    writeln!(out, "  {}", style("Symptoms").bold().underlined())?;
    writeln!(out, "  {}", or_dash(&record.symptoms))?;
    writeln!(out)?;

    writeln!(out, "  {}", style("Treatment").bold().underlined())?;
    if record.treatment.is_empty() {
        writeln!(out, "  {}", style("No treatment recorded.").dim())?;
    } else {
        let t = &record.treatment;
        writeln!(out, "  {:<10} {}", "Chemical:", or_dash(&t.chemical))?;
        writeln!(out, "  {:<10} {}", "Organic:", or_dash(&t.organic))?;
        writeln!(out, "  {:<10} {}", "Schedule:", or_dash(&t.schedule))?;
        writeln!(out, "  {:<10} {}", "Quantity:", or_dash(&t.quantity))?;
    }
    writeln!(out)?;

    writeln!(out, "  {}", style("Precautions").bold().underlined())?;
    writeln!(out, "  {}", or_dash(&record.precautions))?;
    writeln!(out)?;
    Ok(())
}

/// Write a statistics summary for one user.
pub fn write_stats<W: Write + ?Sized>(
    out: &mut W,
    user_id: &str,
    stats: &ScanStats,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Scan statistics for {}", style(user_id).cyan().bold())?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "  {:<20} {}", style("Total scans:").bold(), stats.total_scans)?;
    writeln!(
        out,
        "  {:<20} {}",
        style("Healthy:").bold(),
        style(stats.healthy_scans).green()
    )?;
    writeln!(
        out,
        "  {:<20} {}",
        style("Diseases found:").bold(),
        style(stats.diseases_found).yellow()
    )?;
    writeln!(
        out,
        "  {:<20} {:.2}",
        style("Avg confidence:").bold(),
        stats.average_confidence
    )?;

    if !stats.crop_types.is_empty() {
        writeln!(out)?;
        writeln!(out, "  {}", style("Crops").bold().underlined())?;
        for (crop, count) in &stats.crop_types {
            writeln!(out, "  {:<24} {:>4}", crop, count)?;
        }
    }

    if !stats.disease_types.is_empty() {
        writeln!(out)?;
        writeln!(out, "  {}", style("Diseases").bold().underlined())?;
        for (disease, count) in &stats.disease_types {
            writeln!(out, "  {:<24} {:>4}", disease, count)?;
        }
    }

    if !stats.recent_scans.is_empty() {
        writeln!(out)?;
        writeln!(out, "  {}", style("Recent scans").bold().underlined())?;
        write_plain(out, &stats.recent_scans)?;
    }

    writeln!(out)?;
    Ok(())
}

fn format_confidence(score: Option<f64>) -> String {
    score.map_or_else(|| "-".to_string(), |c| format!("{:.1}%", c * 100.0))
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

/// Truncate a string to a maximum length, adding ellipsis if truncated.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TreatmentAdvice;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        console::strip_ansi_codes(&String::from_utf8(buf).unwrap()).into_owned()
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("ñandú ñandú", 8), "ñandú...");
    }

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(Some(0.9512)), "95.1%");
        assert_eq!(format_confidence(None), "-");
    }

    #[test]
    fn test_plain_table_lists_records() {
        let records = vec![
            ScanRecord::new("u1").with_crop("Tomato").with_disease("Late blight"),
            ScanRecord::new("u2").with_crop("Potato").with_disease("Potato___healthy"),
        ];
        let text = render(|out| write_plain(out, &records));

        assert!(text.contains("Tomato"));
        assert!(text.contains("Potato___healthy"));
        assert!(text.contains("2 scan(s)"));
    }

    #[test]
    fn test_plain_table_empty() {
        let text = render(|out| write_plain(out, &[]));
        assert!(text.contains("No scans to display."));
    }

    #[test]
    fn test_detail_shows_treatment() {
        let record = ScanRecord::new("u1")
            .with_id("s-1".parse().unwrap())
            .with_treatment(TreatmentAdvice::default().with_organic("Neem oil"));
        let text = render(|out| write_detail(out, &record));

        assert!(text.contains("Scan Report: s-1"));
        assert!(text.contains("Neem oil"));
        assert!(text.contains("Chemical:  -"));
    }

    #[test]
    fn test_stats_summary() {
        let stats = ScanStats::from_records(
            vec![ScanRecord::new("u1").with_crop("Tomato").with_disease("Leaf Mold")],
            5,
        );
        let text = render(|out| write_stats(out, "u1", &stats));

        assert!(text.contains("Scan statistics for u1"));
        assert!(text.contains("Leaf Mold"));
        assert!(text.contains("Recent scans"));
    }
}
