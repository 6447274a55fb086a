use bigdecimal::{BigDecimal, RoundingMode};
use chrono::NaiveDateTime;
use std::io::Write;

use crate::error::ReportError;
use crate::types::{MemberRecord, ReportResult};

const PLACEHOLDER: &str = "-";
const SEPARATOR: &str = "==================================================";

/// `$` plus the amount rounded half-up to cents, always with two decimals
pub fn format_amount(amount: Option<&BigDecimal>) -> String {
    match amount {
        Some(value) => {
            // rounding to zero drops the scale, so set it again
            let cents = value.with_scale_round(2, RoundingMode::HalfUp).with_scale(2);
            format!("${:.2}", cents)
        }
        None => PLACEHOLDER.to_string(),
    }
}

pub fn format_timestamp(timestamp: Option<&NaiveDateTime>) -> String {
    timestamp
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn text_or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => PLACEHOLDER,
    }
}

fn write_member(out: &mut impl Write, member: &MemberRecord) -> std::io::Result<()> {
    writeln!(out, "Name: {}", text_or_placeholder(member.name.as_deref()))?;
    writeln!(out, "Plan: {}", text_or_placeholder(member.plan.as_deref()))?;
    writeln!(out, "Status: {}", text_or_placeholder(member.status.as_deref()))?;
    writeln!(out, "Payment: {}", format_amount(member.last_payment_amount.as_ref()))?;
    writeln!(out, "Created: {}", format_timestamp(member.created_at.as_ref()))
}

/// Write the report as plain text.
///
/// Layout: banner, `Total: N`, then one block per member separated by blank lines.
pub fn render(report: &ReportResult, out: &mut impl Write) -> Result<(), ReportError> {
    writeln!(out, "Gym member verification")?;
    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out, "Total: {}", report.total_count)?;

    for member in &report.recent_records {
        writeln!(out)?;
        write_member(out, member)?;
    }

    writeln!(out, "{}", SEPARATOR)?;
    out.flush()?;
    Ok(())
}
