//! Activity table rendering
//!
//! Records are turned into `ActivityRow`s first; the HTML for
//! `#activity-body` and the CLI's text table are both built from those rows.

use debtweb_utils::escape_html;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::Record;
use crate::types::{AmountClass, RecordType};

/// Text of the placeholder row shown for an empty ledger
pub const NO_ACTIVITY: &str = "No activity recorded.";

/// Number of columns in the activity table
pub const COLUMN_COUNT: usize = 6;

/// Class that marks a delete control
pub const DELETE_CLASS: &str = "delete-record";

fn two_places(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a signed amount as `+$12.50` / `-$12.50` with its style class
pub fn format_signed_amount(amount: Decimal) -> (String, AmountClass) {
    let (sign, class) = if amount >= Decimal::ZERO {
        ('+', AmountClass::Positive)
    } else {
        ('-', AmountClass::Negative)
    };
    (format!("{}${:.2}", sign, two_places(amount.abs())), class)
}

/// Format a balance as `$42.00`; negative balances keep their sign after `$`
pub fn format_balance(balance: Decimal) -> String {
    format!("${:.2}", two_places(balance))
}

/// Delete control attached to a rendered row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteControl {
    pub record_type: RecordType,
    pub id: String,
}

impl DeleteControl {
    pub fn to_html(&self) -> String {
        format!(
            r#"<button class="link-button {}" data-type="{}" data-id="{}">Delete</button>"#,
            DELETE_CLASS,
            self.record_type.as_str(),
            escape_html(&self.id)
        )
    }
}

/// One rendered record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRow {
    pub date: String,
    pub type_label: String,
    pub description: String,
    pub amount: String,
    pub amount_class: AmountClass,
    pub payment_method: String,
    pub delete: DeleteControl,
}

impl ActivityRow {
    pub fn from_record(record: &Record) -> Self {
        let (amount, amount_class) = format_signed_amount(record.amount);
        Self {
            date: record.date.clone(),
            type_label: record.record_type.label().to_string(),
            description: record.description.clone().unwrap_or_default(),
            amount,
            amount_class,
            payment_method: record.payment_method.clone(),
            delete: DeleteControl {
                record_type: record.record_type,
                id: record.id.to_string(),
            },
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<tr><td>{}</td><td>{}</td><td>{}</td><td class="{}">{}</td><td>{}</td><td>{}</td></tr>"#,
            escape_html(&self.date),
            self.type_label,
            escape_html(&self.description),
            self.amount_class,
            self.amount,
            escape_html(&self.payment_method),
            self.delete.to_html()
        )
    }
}

/// Contents of `#activity-body`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivityTable {
    pub rows: Vec<ActivityRow>,
}

impl ActivityTable {
    /// Build the table from records, keeping server order
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            rows: records.iter().map(ActivityRow::from_record).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of `<tr>` elements the table renders to
    pub fn row_count(&self) -> usize {
        self.rows.len().max(1)
    }

    pub fn to_html(&self) -> String {
        if self.rows.is_empty() {
            return format!(r#"<tr><td colspan="{}">{}</td></tr>"#, COLUMN_COUNT, NO_ACTIVITY);
        }
        self.rows.iter().map(ActivityRow::to_html).collect::<Vec<_>>().join("\n")
    }

    /// Plain-text rendering for terminals
    pub fn to_text(&self) -> String {
        if self.rows.is_empty() {
            return NO_ACTIVITY.to_string();
        }

        let header = ["Date", "Type", "Description", "Amount", "Method", "Ref"];
        let cells: Vec<[String; COLUMN_COUNT]> = self
            .rows
            .iter()
            .map(|row| {
                [
                    row.date.clone(),
                    row.type_label.clone(),
                    row.description.clone(),
                    row.amount.clone(),
                    row.payment_method.clone(),
                    format!("{}/{}", row.delete.record_type, row.delete.id),
                ]
            })
            .collect();

        let mut widths = header.map(|h| h.chars().count());
        for line in &cells {
            for (width, cell) in widths.iter_mut().zip(line.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let format_line = |line: &[String]| {
            line.iter()
                .zip(widths.iter())
                .enumerate()
                .map(|(i, (cell, width))| {
                    // amounts read better right-aligned
                    if i == 3 {
                        format!("{:>width$}", cell, width = *width)
                    } else {
                        format!("{:<width$}", cell, width = *width)
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let header: Vec<String> = header.iter().map(|h| h.to_string()).collect();
        let mut out = vec![format_line(&header[..])];
        out.extend(cells.iter().map(|line| format_line(&line[..])));
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn record(id: i64, record_type: RecordType, amount: &str) -> Record {
        Record {
            id,
            date: "2024-03-01".to_string(),
            record_type,
            description: Some("Groceries".to_string()),
            amount: Decimal::from_str(amount).unwrap(),
            payment_method: "Card".to_string(),
            person_name: None,
            notes: None,
        }
    }

    #[test]
    fn test_signed_amount_formatting() {
        let (text, class) = format_signed_amount(Decimal::from_str("-12.5").unwrap());
        assert_eq!(text, "-$12.50");
        assert_eq!(class, AmountClass::Negative);

        let (text, class) = format_signed_amount(Decimal::from_str("12.5").unwrap());
        assert_eq!(text, "+$12.50");
        assert_eq!(class, AmountClass::Positive);

        let (text, class) = format_signed_amount(Decimal::ZERO);
        assert_eq!(text, "+$0.00");
        assert_eq!(class, AmountClass::Positive);

        let (text, _) = format_signed_amount(Decimal::from_str("0.125").unwrap());
        assert_eq!(text, "+$0.13");
    }

    #[test]
    fn test_balance_formatting() {
        assert_eq!(format_balance(Decimal::from(42)), "$42.00");
        assert_eq!(format_balance(Decimal::from_str("-5").unwrap()), "$-5.00");
    }

    #[test]
    fn test_empty_table_placeholder() {
        let table = ActivityTable::from_records(&[]);
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 1);
        let html = table.to_html();
        assert_eq!(html.matches("<tr>").count(), 1);
        assert!(html.contains("No activity recorded."));
        assert!(html.contains(r#"colspan="6""#));
        assert_eq!(table.to_text(), NO_ACTIVITY);
    }

    #[test]
    fn test_rows_keep_server_order() {
        let records = vec![
            record(3, RecordType::Transaction, "-12.5"),
            record(1, RecordType::Payment, "20"),
        ];
        let table = ActivityTable::from_records(&records);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].delete.id, "3");
        assert_eq!(table.rows[1].type_label, "Payment");

        let html = table.to_html();
        assert_eq!(html.matches("<tr>").count(), 2);
        assert!(html.find(r#"data-id="3""#).unwrap() < html.find(r#"data-id="1""#).unwrap());
    }

    #[test]
    fn test_row_html() {
        let row = ActivityRow::from_record(&record(7, RecordType::Transaction, "-12.5"));
        let html = row.to_html();
        assert!(html.contains("<td>2024-03-01</td>"));
        assert!(html.contains("<td>Transaction</td>"));
        assert!(html.contains(r#"<td class="negative">-$12.50</td>"#));
        assert!(html.contains(r#"class="link-button delete-record" data-type="transaction" data-id="7""#));
    }

    #[test]
    fn test_row_escapes_text() {
        let mut rec = record(1, RecordType::Payment, "5");
        rec.description = Some("<b>lunch</b>".to_string());
        let html = ActivityRow::from_record(&rec).to_html();
        assert!(html.contains("&lt;b&gt;lunch&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_missing_description_renders_empty() {
        let mut rec = record(1, RecordType::Payment, "5");
        rec.description = None;
        let row = ActivityRow::from_record(&rec);
        assert_eq!(row.description, "");
        assert!(row.to_html().contains("<td>Payment</td><td></td>"));
    }

    #[test]
    fn test_text_table() {
        let table = ActivityTable::from_records(&[record(4, RecordType::Payment, "20")]);
        let text = table.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Date"));
        assert!(lines[1].contains("+$20.00"));
        assert!(lines[1].ends_with("payment/4"));
    }
}
